//! Record resolution: deriving the shared key and joining or creating
//!
//! Every participant must, from its own local object alone, arrive at the
//! same record key and then converge on the same shared record. Key
//! derivation is pure; the create-or-join race is settled by the directory's
//! idempotent-by-key creation.

use crate::directory::{RecordDirectory, RecordHandle};
use crate::Result;
use hoversync_core::{ParticipantId, RecordKey, RecordTemplate};

/// The local visual object a resolver starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalObject {
    name: String,
}

impl LocalObject {
    /// Create a local object with its authoring-time name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The authoring-time name, assumed unique within the room
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An attached shared record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Handle of the record this participant is attached to
    pub handle: RecordHandle,
    /// Whether this participant took the create path locally
    ///
    /// Local belief only: under a create race the substrate may still have
    /// resolved the call as a join. Logged, never branched on.
    pub created: bool,
}

/// Resolves a local object to its shared record for one participant
#[derive(Debug, Clone, Copy)]
pub struct EntityResolver {
    participant: ParticipantId,
}

impl EntityResolver {
    /// Create a resolver for the local participant
    pub fn new(participant: ParticipantId) -> Self {
        Self { participant }
    }

    /// The participant this resolver attaches as
    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    /// Derive the record key for a local object
    ///
    /// Prefers the replicated ancestor's identifier; an object outside any
    /// replicated hierarchy falls back to its authoring-time name. Both
    /// paths are pure, so every participant computes the identical key.
    pub fn resolve_key(&self, directory: &dyn RecordDirectory, object: &LocalObject) -> RecordKey {
        match directory.ancestor_record(object) {
            Some(ancestor_id) => RecordKey::for_ancestor(&ancestor_id),
            None => RecordKey::for_object_name(object.name()),
        }
    }

    /// Attach to the record for `key`, creating it if absent
    ///
    /// The created record lives at the directory's flat top-level scope and
    /// follows the template's durability; it is never parented under the
    /// local object.
    pub fn attach(
        &self,
        directory: &mut dyn RecordDirectory,
        key: &RecordKey,
        template: &RecordTemplate,
    ) -> Result<Binding> {
        if let Some(handle) = directory.lookup(key) {
            directory.attach(handle, self.participant)?;
            log::debug!("{} joined {key}", self.participant);
            Ok(Binding {
                handle,
                created: false,
            })
        } else {
            let handle = directory.create_record(key, template, self.participant);
            log::debug!("{} created {key}", self.participant);
            Ok(Binding {
                handle,
                created: true,
            })
        }
    }

    /// Detach from a previously attached record
    ///
    /// The only teardown this layer performs; record destruction is the
    /// substrate's reference-counted concern.
    pub fn release(&self, directory: &mut dyn RecordDirectory, binding: Binding) {
        directory.detach(binding.handle, self.participant);
    }
}
