//! Substrate capability traits
//!
//! The replication substrate, the system that transports field changes
//! between participants and arbitrates ownership and creation races, is an
//! external collaborator. This module defines the capability surface the
//! replication layer needs from it, as a trait so tests can inject a
//! deterministic implementation.

use crate::resolver::LocalObject;
use crate::Result;
use hoversync_core::{FieldValue, ParticipantId, RecordKey, RecordTemplate, StateField};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to one shared record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordHandle(pub u64);

impl RecordHandle {
    /// Create a new record handle
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw handle value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record:{}", self.0)
    }
}

/// Authoritative event delivered by the substrate to one participant
///
/// These are the only inputs that may override a participant's local belief:
/// readiness, ownership resolution, and remote participants' accepted
/// writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordEvent {
    /// The record's sub-state is fully initialized; reads and writes are legal
    Ready(RecordHandle),
    /// The substrate resolved ownership to the given participant (or none)
    ///
    /// Delivered to every attached participant, the grantee included, in the
    /// substrate's global resolution order.
    OwnerChanged(RecordHandle, Option<ParticipantId>),
    /// An accepted write, propagated to every attached participant
    FieldChanged(RecordHandle, StateField, FieldValue),
}

impl RecordEvent {
    /// The record this event concerns
    pub fn handle(&self) -> RecordHandle {
        match self {
            RecordEvent::Ready(handle) => *handle,
            RecordEvent::OwnerChanged(handle, _) => *handle,
            RecordEvent::FieldChanged(handle, _, _) => *handle,
        }
    }
}

/// The shared record directory and ownership arbiter
///
/// Implementations must make `create_record` idempotent by key: concurrent
/// creators converge on one record, with the later create resolving as a
/// join. Ownership acquisition is synchronous and optimistic; the
/// implementation's own global ordering decides conflicts, and losers learn
/// of it through [`RecordEvent::OwnerChanged`].
pub trait RecordDirectory {
    /// Check whether a record with this key exists
    fn has_record(&self, key: &RecordKey) -> bool;

    /// Look up the handle for an existing record
    fn lookup(&self, key: &RecordKey) -> Option<RecordHandle>;

    /// Create a record with this exact key, attaching the creator
    ///
    /// If the key already exists the call degrades to a join and returns the
    /// existing handle. New records live at the directory's flat top-level
    /// scope and start from the template's initial state.
    fn create_record(
        &mut self,
        key: &RecordKey,
        template: &RecordTemplate,
        participant: ParticipantId,
    ) -> RecordHandle;

    /// Attach a participant to an existing record
    ///
    /// The substrate brings the joiner up to date (current non-default state,
    /// current owner) and then delivers [`RecordEvent::Ready`].
    fn attach(&mut self, handle: RecordHandle, participant: ParticipantId) -> Result<()>;

    /// Detach a participant from a record
    ///
    /// When the last participant detaches, a non-durable record is destroyed.
    /// Unknown handles are ignored; teardown must be callable late.
    fn detach(&mut self, handle: RecordHandle, participant: ParticipantId);

    /// Check whether the participant is the recorded owner
    fn is_owner(&self, handle: RecordHandle, participant: ParticipantId) -> bool;

    /// Attempt to record the participant as owner, without blocking
    ///
    /// Returns `false` only when acquisition is structurally refused (a
    /// non-transferable record held by someone else, or an unknown handle).
    fn try_acquire(&mut self, handle: RecordHandle, participant: ParticipantId) -> bool;

    /// Submit a field write; accepted iff the participant is the recorded owner
    ///
    /// Accepted writes reach every attached participant as
    /// [`RecordEvent::FieldChanged`], in acceptance order.
    fn write(
        &mut self,
        handle: RecordHandle,
        participant: ParticipantId,
        field: StateField,
        value: FieldValue,
    ) -> bool;

    /// Walk up from a local object looking for a replicated ancestor
    ///
    /// `None` is the expected "object is not part of a replicated hierarchy"
    /// answer, not a failure.
    fn ancestor_record(&self, object: &LocalObject) -> Option<String>;

    /// Drain the authoritative events queued for one participant
    fn drain_events(&mut self, participant: ParticipantId) -> Vec<RecordEvent>;
}
