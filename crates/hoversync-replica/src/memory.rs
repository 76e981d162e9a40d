//! Deterministic in-memory replication substrate
//!
//! One `MemoryDirectory` is shared by every participant of a single-process
//! session, and by tests simulating multiple participants. It implements the
//! full directory contract: idempotent create-or-join, participant reference
//! counting with non-durable destruction, last-acquirer-wins ownership with
//! a global sequence as the deterministic tie-break, and per-participant
//! event queues standing in for the transport.

use crate::directory::{RecordDirectory, RecordEvent, RecordHandle};
use crate::error::Error;
use crate::resolver::LocalObject;
use crate::Result;
use hoversync_core::{
    FieldValue, ParticipantId, RecordKey, RecordTemplate, SharedObjectState, StateField,
};
use indexmap::{IndexMap, IndexSet};

#[derive(Debug)]
struct RecordSlot {
    key: RecordKey,
    state: SharedObjectState,
    durable: bool,
    transferable: bool,
    owner: Option<ParticipantId>,
    attached: IndexSet<ParticipantId>,
}

/// In-memory implementation of [`RecordDirectory`]
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    slots: IndexMap<RecordHandle, RecordSlot>,
    by_key: IndexMap<RecordKey, RecordHandle>,
    ancestors: IndexMap<String, String>,
    queues: IndexMap<ParticipantId, Vec<RecordEvent>>,
    next_handle: u64,
    /// Global ordering over ownership grants; the arbiter's tie-break
    acquire_seq: u64,
}

impl MemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that a local object sits under a replicated ancestor
    ///
    /// Scene wiring for [`RecordDirectory::ancestor_record`]; objects never
    /// registered here resolve through the authoring-name fallback.
    pub fn set_ancestor(&mut self, object_name: impl Into<String>, ancestor_id: impl Into<String>) {
        self.ancestors.insert(object_name.into(), ancestor_id.into());
    }

    /// Number of live records
    pub fn record_count(&self) -> usize {
        self.slots.len()
    }

    /// The recorded owner of a record, if any
    pub fn owner_of(&self, handle: RecordHandle) -> Option<ParticipantId> {
        self.slots.get(&handle).and_then(|slot| slot.owner)
    }

    fn push_event(&mut self, participant: ParticipantId, event: RecordEvent) {
        self.queues.entry(participant).or_default().push(event);
    }

    /// Deliver an authoritative notification to every attached participant.
    ///
    /// The origin is included: queues are FIFO in grant/accept order, so an
    /// optimistic winner that drained a rival's earlier notification still
    /// ends on the substrate's final resolution.
    fn broadcast(&mut self, handle: RecordHandle, event: RecordEvent) {
        let recipients: Vec<ParticipantId> = match self.slots.get(&handle) {
            Some(slot) => slot.attached.iter().copied().collect(),
            None => return,
        };
        for participant in recipients {
            self.push_event(participant, event.clone());
        }
    }

    /// Queue the catch-up sequence for a joining participant: every
    /// non-default field, the current owner, then readiness.
    fn replay_to(&mut self, handle: RecordHandle, participant: ParticipantId) {
        let Some(slot) = self.slots.get(&handle) else {
            return;
        };
        let default = SharedObjectState::default();
        let mut events = Vec::new();
        for field in [StateField::ShapeIndex, StateField::Scale, StateField::Rotation] {
            let value = slot.state.get(field);
            if value != default.get(field) {
                events.push(RecordEvent::FieldChanged(handle, field, value));
            }
        }
        if let Some(owner) = slot.owner {
            events.push(RecordEvent::OwnerChanged(handle, Some(owner)));
        }
        events.push(RecordEvent::Ready(handle));
        for event in events {
            self.push_event(participant, event);
        }
    }
}

impl RecordDirectory for MemoryDirectory {
    fn has_record(&self, key: &RecordKey) -> bool {
        self.by_key.contains_key(key)
    }

    fn lookup(&self, key: &RecordKey) -> Option<RecordHandle> {
        self.by_key.get(key).copied()
    }

    fn create_record(
        &mut self,
        key: &RecordKey,
        template: &RecordTemplate,
        participant: ParticipantId,
    ) -> RecordHandle {
        // Idempotent by key: a concurrent creator converges on the record
        // that got there first, and its create resolves as a join.
        if let Some(handle) = self.lookup(key) {
            log::debug!("create for {key} resolved as join by {participant}");
            let _ = self.attach(handle, participant);
            return handle;
        }

        let handle = RecordHandle::new(self.next_handle);
        self.next_handle += 1;
        let mut attached = IndexSet::new();
        attached.insert(participant);
        self.slots.insert(
            handle,
            RecordSlot {
                key: key.clone(),
                state: template.initial,
                durable: template.durable,
                transferable: template.transferable,
                owner: None,
                attached,
            },
        );
        self.by_key.insert(key.clone(), handle);
        log::debug!("{participant} created record {key} as {handle}");
        self.push_event(participant, RecordEvent::Ready(handle));
        handle
    }

    fn attach(&mut self, handle: RecordHandle, participant: ParticipantId) -> Result<()> {
        let slot = self
            .slots
            .get_mut(&handle)
            .ok_or(Error::UnknownHandle(handle.raw()))?;
        if slot.attached.insert(participant) {
            log::debug!("{participant} joined record {}", slot.key);
            self.replay_to(handle, participant);
        }
        Ok(())
    }

    fn detach(&mut self, handle: RecordHandle, participant: ParticipantId) {
        let Some(slot) = self.slots.get_mut(&handle) else {
            return;
        };
        slot.attached.shift_remove(&participant);
        if slot.attached.is_empty() && !slot.durable {
            if let Some(slot) = self.slots.shift_remove(&handle) {
                self.by_key.shift_remove(&slot.key);
                log::debug!("record {} destroyed with last participant gone", slot.key);
            }
        }
    }

    fn is_owner(&self, handle: RecordHandle, participant: ParticipantId) -> bool {
        self.slots
            .get(&handle)
            .is_some_and(|slot| slot.owner == Some(participant))
    }

    fn try_acquire(&mut self, handle: RecordHandle, participant: ParticipantId) -> bool {
        let Some(slot) = self.slots.get_mut(&handle) else {
            return false;
        };
        if slot.owner == Some(participant) {
            return true;
        }
        if !slot.transferable && slot.owner.is_some() {
            // Structural refusal: ownership pinned to the current holder.
            return false;
        }
        slot.owner = Some(participant);
        self.acquire_seq += 1;
        log::debug!(
            "{participant} acquired {} (grant #{})",
            slot.key,
            self.acquire_seq
        );
        self.broadcast(handle, RecordEvent::OwnerChanged(handle, Some(participant)));
        true
    }

    fn write(
        &mut self,
        handle: RecordHandle,
        participant: ParticipantId,
        field: StateField,
        value: FieldValue,
    ) -> bool {
        let Some(slot) = self.slots.get_mut(&handle) else {
            return false;
        };
        if slot.owner != Some(participant) {
            log::trace!("dropped write to {} from non-owner {participant}", slot.key);
            return false;
        }
        slot.state.apply(field, value);
        self.broadcast(handle, RecordEvent::FieldChanged(handle, field, value));
        true
    }

    fn ancestor_record(&self, object: &LocalObject) -> Option<String> {
        self.ancestors.get(object.name()).cloned()
    }

    fn drain_events(&mut self, participant: ParticipantId) -> Vec<RecordEvent> {
        self.queues
            .get_mut(&participant)
            .map(std::mem::take)
            .unwrap_or_default()
    }
}
