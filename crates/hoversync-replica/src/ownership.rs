//! Ownership gating for replicated record mutation
//!
//! Every mutation passes through the gate. Acquisition is optimistic: the
//! gate declares local intent and proceeds without waiting for other
//! participants, trading an occasionally discarded write for synchronous
//! responsiveness. The substrate's resolution is authoritative and is the
//! only thing that can mark a gate superseded.

use crate::directory::{RecordDirectory, RecordHandle};
use hoversync_core::ParticipantId;
use serde::{Deserialize, Serialize};

/// Ownership state of the local participant for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OwnerState {
    /// Nobody locally believed to own the record
    #[default]
    Unowned,
    /// The local participant believes it owns the record
    LocallyOwned,
    /// The substrate resolved ownership to another participant
    Superseded(ParticipantId),
}

/// Per-record ownership gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipGate {
    participant: ParticipantId,
    state: OwnerState,
}

impl OwnershipGate {
    /// Create a gate for the local participant, initially unowned
    pub fn new(participant: ParticipantId) -> Self {
        Self {
            participant,
            state: OwnerState::Unowned,
        }
    }

    /// The local participant this gate speaks for
    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    /// Current ownership state
    pub fn state(&self) -> OwnerState {
        self.state
    }

    /// Whether the local participant currently believes it is the owner
    pub fn is_owner(&self) -> bool {
        self.state == OwnerState::LocallyOwned
    }

    /// Confirm ownership or attempt optimistic acquisition
    ///
    /// Fast path: already owned locally, returns `true` with no substrate
    /// call. Otherwise declares intent through [`RecordDirectory::try_acquire`]
    /// and transitions to [`OwnerState::LocallyOwned`] immediately on
    /// success; `false` means the substrate refused outright and the state is
    /// left untouched.
    pub fn try_acquire_or_confirm(
        &mut self,
        directory: &mut dyn RecordDirectory,
        handle: RecordHandle,
    ) -> bool {
        if self.is_owner() {
            return true;
        }
        if directory.try_acquire(handle, self.participant) {
            self.state = OwnerState::LocallyOwned;
            true
        } else {
            log::trace!(
                "{} refused ownership of {} by substrate",
                self.participant,
                handle
            );
            false
        }
    }

    /// Apply an authoritative ownership resolution from the substrate
    ///
    /// This is the only transition into [`OwnerState::Superseded`]; local
    /// logic never second-guesses its own belief.
    pub fn on_owner_changed(&mut self, owner: Option<ParticipantId>) {
        self.state = match owner {
            Some(p) if p == self.participant => OwnerState::LocallyOwned,
            Some(p) => {
                if self.is_owner() {
                    log::debug!("{} superseded as owner by {}", self.participant, p);
                }
                OwnerState::Superseded(p)
            }
            None => OwnerState::Unowned,
        };
    }
}
