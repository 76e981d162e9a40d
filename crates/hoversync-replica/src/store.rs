//! Canonical replicated state for one shared object
//!
//! The store holds the local copy of the shared fields, gates every local
//! mutation through readiness, ownership, and the synchronization manifest,
//! and applies authoritative substrate events over local belief. Consumers
//! observe it through drained [`StateChange`] notifications plus a read-only
//! snapshot; the store holds no reference back to any consumer.

use crate::directory::{RecordDirectory, RecordEvent, RecordHandle};
use crate::ownership::OwnershipGate;
use glam::Vec3;
use hoversync_core::{
    FieldValue, ShapeCatalog, SharedObjectState, StateField, SyncManifest, SHAPE_INDEX_UNSET,
};

/// Notification emitted when the canonical state moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateChange {
    /// The record finished initializing; reads and writes are now legal
    Ready,
    ShapeChanged(i32),
    ScaleChanged(Vec3),
    RotationChanged(Vec3),
}

/// Read-only view of the canonical state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSnapshot {
    pub shape_index: i32,
    pub scale: Vec3,
    pub rotation: Vec3,
    pub ready: bool,
}

/// Replicated state store bound to one shared record
pub struct ReplicatedStore {
    handle: RecordHandle,
    state: SharedObjectState,
    catalog: ShapeCatalog,
    manifest: SyncManifest,
    gate: OwnershipGate,
    ready: bool,
    pending: Vec<StateChange>,
}

impl ReplicatedStore {
    /// Create a store for a bound record
    ///
    /// Starts not-ready; every read returns defaults and every write is a
    /// no-op until the substrate delivers [`RecordEvent::Ready`].
    pub fn new(
        handle: RecordHandle,
        catalog: ShapeCatalog,
        manifest: SyncManifest,
        gate: OwnershipGate,
    ) -> Self {
        Self {
            handle,
            state: SharedObjectState::default(),
            catalog,
            manifest,
            gate,
            ready: false,
            pending: Vec::new(),
        }
    }

    /// The record this store is bound to
    pub fn handle(&self) -> RecordHandle {
        self.handle
    }

    /// Whether the record has finished initializing
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The ownership gate for this record
    pub fn gate(&self) -> &OwnershipGate {
        &self.gate
    }

    /// Current canonical snapshot
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            shape_index: self.state.shape_index,
            scale: self.state.scale,
            rotation: self.state.rotation,
            ready: self.ready,
        }
    }

    /// Set the scale vector, if this participant may originate changes
    pub fn set_scale(&mut self, directory: &mut dyn RecordDirectory, scale: Vec3) {
        self.mutate(directory, StateField::Scale, FieldValue::Vector(scale));
    }

    /// Set the rotation vector, if this participant may originate changes
    pub fn set_rotation(&mut self, directory: &mut dyn RecordDirectory, rotation: Vec3) {
        self.mutate(directory, StateField::Rotation, FieldValue::Vector(rotation));
    }

    /// Advance to the next shape in the catalog, wrapping at the end
    pub fn advance_shape(&mut self, directory: &mut dyn RecordDirectory) {
        let next = self.catalog.next_index(self.state.shape_index);
        if next == SHAPE_INDEX_UNSET {
            return;
        }
        self.mutate(directory, StateField::ShapeIndex, FieldValue::ShapeIndex(next));
    }

    fn mutate(&mut self, directory: &mut dyn RecordDirectory, field: StateField, value: FieldValue) {
        if !self.ready {
            // Expected transient while attachment completes.
            return;
        }
        if !self.gate.try_acquire_or_confirm(directory, self.handle) {
            // Not authorized to originate changes right now; the intent is
            // dropped and the user's next gesture retries naturally.
            return;
        }
        self.state.apply(field, value);
        if self.manifest.should_send(field, &value) {
            let accepted =
                directory.write(self.handle, self.gate.participant(), field, value);
            if !accepted {
                log::trace!(
                    "write to {} rejected in flight; awaiting authoritative value",
                    self.handle
                );
            }
        }
    }

    /// Apply one authoritative substrate event
    ///
    /// Remote values always overwrite local belief; a participant that
    /// optimistically wrote as a superseded owner reconverges here. Events
    /// for other records are ignored.
    pub fn apply_event(&mut self, event: RecordEvent) {
        if event.handle() != self.handle {
            return;
        }
        match event {
            RecordEvent::Ready(_) => {
                self.ready = true;
                self.pending.push(StateChange::Ready);
            }
            RecordEvent::OwnerChanged(_, owner) => {
                self.gate.on_owner_changed(owner);
            }
            RecordEvent::FieldChanged(_, field, value) => {
                self.state.apply(field, value);
                let change = match (field, value) {
                    (StateField::ShapeIndex, FieldValue::ShapeIndex(index)) => {
                        Some(StateChange::ShapeChanged(index))
                    }
                    (StateField::Scale, FieldValue::Vector(v)) => {
                        Some(StateChange::ScaleChanged(v))
                    }
                    (StateField::Rotation, FieldValue::Vector(v)) => {
                        Some(StateChange::RotationChanged(v))
                    }
                    _ => None,
                };
                self.pending.extend(change);
            }
        }
    }

    /// Drain this participant's substrate events and apply them
    ///
    /// Called once per frame by the host loop, between render ticks.
    pub fn pump(&mut self, directory: &mut dyn RecordDirectory) {
        for event in directory.drain_events(self.gate.participant()) {
            self.apply_event(event);
        }
    }

    /// Take the accumulated change notifications
    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDirectory;
    use hoversync_core::{ParticipantId, RecordKey, RecordTemplate};

    fn store_for(
        directory: &mut MemoryDirectory,
        participant: ParticipantId,
    ) -> ReplicatedStore {
        let key = RecordKey::for_object_name("orb");
        let handle = if let Some(handle) = directory.lookup(&key) {
            directory.attach(handle, participant).unwrap();
            handle
        } else {
            directory.create_record(&key, &RecordTemplate::hover_object(), participant)
        };
        let mut store = ReplicatedStore::new(
            handle,
            ShapeCatalog::default(),
            SyncManifest::hover_object(0.01),
            OwnershipGate::new(participant),
        );
        store.pump(directory);
        store
    }

    #[test]
    fn test_snapshot_defaults_until_ready() {
        let store = ReplicatedStore::new(
            RecordHandle::new(0),
            ShapeCatalog::default(),
            SyncManifest::hover_object(0.01),
            OwnershipGate::new(ParticipantId::new(1)),
        );
        let snapshot = store.snapshot();
        assert!(!snapshot.ready);
        assert_eq!(snapshot.shape_index, SHAPE_INDEX_UNSET);
        assert_eq!(snapshot.scale, Vec3::ONE);
    }

    #[test]
    fn test_writes_before_ready_are_dropped() {
        let a = ParticipantId::new(1);
        let mut directory = MemoryDirectory::new();
        let handle =
            directory.create_record(&RecordKey::for_object_name("orb"), &RecordTemplate::hover_object(), a);
        // No pump: the Ready event is still in the queue.
        let mut store = ReplicatedStore::new(
            handle,
            ShapeCatalog::default(),
            SyncManifest::hover_object(0.01),
            OwnershipGate::new(a),
        );

        store.set_scale(&mut directory, Vec3::splat(2.0));
        store.advance_shape(&mut directory);
        assert_eq!(store.snapshot().scale, Vec3::ONE);
        assert_eq!(store.snapshot().shape_index, SHAPE_INDEX_UNSET);
    }

    #[test]
    fn test_ready_change_emitted() {
        let a = ParticipantId::new(1);
        let mut directory = MemoryDirectory::new();
        let mut store = store_for(&mut directory, a);
        assert!(store.is_ready());
        assert_eq!(store.drain_changes(), vec![StateChange::Ready]);
    }

    #[test]
    fn test_advance_shape_cycles() {
        let a = ParticipantId::new(1);
        let mut directory = MemoryDirectory::new();
        let mut store = store_for(&mut directory, a);

        store.advance_shape(&mut directory);
        assert_eq!(store.snapshot().shape_index, 0);

        let len = ShapeCatalog::default().len();
        for _ in 0..len {
            store.advance_shape(&mut directory);
        }
        assert_eq!(store.snapshot().shape_index, 0);
    }

    #[test]
    fn test_mutation_acquires_ownership() {
        let a = ParticipantId::new(1);
        let mut directory = MemoryDirectory::new();
        let mut store = store_for(&mut directory, a);

        assert!(!store.gate().is_owner());
        store.set_scale(&mut directory, Vec3::splat(1.5));
        assert!(store.gate().is_owner());
        assert!(directory.is_owner(store.handle(), a));
    }

    #[test]
    fn test_refused_acquisition_drops_intent() {
        let a = ParticipantId::new(1);
        let b = ParticipantId::new(2);
        let mut directory = MemoryDirectory::new();
        let mut template = RecordTemplate::hover_object();
        template.transferable = false;

        let key = RecordKey::for_object_name("orb");
        let handle = directory.create_record(&key, &template, a);
        directory.try_acquire(handle, a);

        directory.attach(handle, b).unwrap();
        let mut store = ReplicatedStore::new(
            handle,
            ShapeCatalog::default(),
            SyncManifest::hover_object(0.01),
            OwnershipGate::new(b),
        );
        store.pump(&mut directory);

        store.set_scale(&mut directory, Vec3::splat(3.0));
        // Intent dropped locally and nothing reached the substrate.
        assert_eq!(store.snapshot().scale, Vec3::ONE);
        assert!(!store.gate().is_owner());
    }

    #[test]
    fn test_remote_value_overrides_local_belief() {
        let a = ParticipantId::new(1);
        let b = ParticipantId::new(2);
        let mut directory = MemoryDirectory::new();
        let mut store_a = store_for(&mut directory, a);
        let mut store_b = store_for(&mut directory, b);

        // A owns and writes; B optimistically writes, gets superseded by A's
        // later grant... here: B writes after A acquires. B's acquire wins
        // (last acquirer), then A re-acquires and writes again.
        store_a.set_scale(&mut directory, Vec3::splat(1.2));
        store_b.set_scale(&mut directory, Vec3::splat(2.0));
        store_a.pump(&mut directory);
        // A's gate has been superseded by B's grant; A's snapshot converged
        // to B's authoritative value.
        assert!(!store_a.gate().is_owner());
        assert_eq!(store_a.snapshot().scale, Vec3::splat(2.0));
    }

    #[test]
    fn test_stale_owner_write_is_refused_then_reconverges() {
        let a = ParticipantId::new(1);
        let b = ParticipantId::new(2);
        let mut directory = MemoryDirectory::new();
        let mut store_a = store_for(&mut directory, a);
        let mut store_b = store_for(&mut directory, b);

        store_a.set_scale(&mut directory, Vec3::splat(1.2));
        store_b.set_scale(&mut directory, Vec3::splat(2.0));

        // A has not pumped yet, so it still believes it owns the record and
        // keeps writing; the substrate refuses the stale write.
        store_a.set_scale(&mut directory, Vec3::splat(1.6));
        assert_eq!(store_a.snapshot().scale, Vec3::splat(1.6));
        assert_eq!(directory.owner_of(store_a.handle()), Some(b));

        // B never sees the refused value; A reconverges on the notification.
        store_b.pump(&mut directory);
        assert_eq!(store_b.snapshot().scale, Vec3::splat(2.0));
        store_a.pump(&mut directory);
        assert!(!store_a.gate().is_owner());
        assert_eq!(store_a.snapshot().scale, Vec3::splat(2.0));

        // A's next gesture re-acquires and wins again.
        store_a.set_scale(&mut directory, Vec3::splat(1.1));
        assert!(store_a.gate().is_owner());
        assert_eq!(directory.owner_of(store_a.handle()), Some(a));
    }

    #[test]
    fn test_convergence_across_participants() {
        let a = ParticipantId::new(1);
        let b = ParticipantId::new(2);
        let mut directory = MemoryDirectory::new();
        let mut store_a = store_for(&mut directory, a);
        let mut store_b = store_for(&mut directory, b);

        store_a.set_scale(&mut directory, Vec3::splat(1.3));
        store_a.advance_shape(&mut directory);
        store_b.pump(&mut directory);
        store_a.pump(&mut directory);

        let snap_a = store_a.snapshot();
        let snap_b = store_b.snapshot();
        assert_eq!(snap_a.shape_index, snap_b.shape_index);
        assert_eq!(snap_a.scale, snap_b.scale);
        assert_eq!(snap_a.rotation, snap_b.rotation);
    }

    #[test]
    fn test_jitter_updates_local_state_but_not_wire() {
        let a = ParticipantId::new(1);
        let b = ParticipantId::new(2);
        let mut directory = MemoryDirectory::new();
        let mut store_a = store_for(&mut directory, a);
        let mut store_b = store_for(&mut directory, b);
        store_b.drain_changes();

        store_a.set_scale(&mut directory, Vec3::splat(1.5));
        store_b.pump(&mut directory);
        store_b.drain_changes();

        // Jitter below epsilon: local canonical value moves, transport stays
        // quiet, so B sees nothing new.
        store_a.set_scale(&mut directory, Vec3::splat(1.5005));
        assert_eq!(store_a.snapshot().scale, Vec3::splat(1.5005));
        store_b.pump(&mut directory);
        assert!(store_b.drain_changes().is_empty());
        assert_eq!(store_b.snapshot().scale, Vec3::splat(1.5));
    }

    #[test]
    fn test_rotation_replicates_when_driven() {
        // No in-repo producer drives rotation; the schema still carries it.
        let a = ParticipantId::new(1);
        let b = ParticipantId::new(2);
        let mut directory = MemoryDirectory::new();
        let mut store_a = store_for(&mut directory, a);
        let mut store_b = store_for(&mut directory, b);

        store_a.set_rotation(&mut directory, Vec3::new(0.0, 1.0, 0.0));
        store_b.pump(&mut directory);
        assert_eq!(store_b.snapshot().rotation, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_events_for_other_records_ignored() {
        let a = ParticipantId::new(1);
        let mut directory = MemoryDirectory::new();
        let mut store = store_for(&mut directory, a);
        store.drain_changes();

        store.apply_event(RecordEvent::FieldChanged(
            RecordHandle::new(999),
            StateField::ShapeIndex,
            FieldValue::ShapeIndex(4),
        ));
        assert_eq!(store.snapshot().shape_index, SHAPE_INDEX_UNSET);
        assert!(store.drain_changes().is_empty());
    }
}
