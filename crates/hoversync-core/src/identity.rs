//! Identity types for participants and shared records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to every derived record key.
///
/// Both derivation paths use the same suffix so that every participant,
/// starting from the same local object, lands on the same key.
pub const RECORD_KEY_SUFFIX: &str = "-hover";

/// Unique identifier for one connected participant session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    /// Create a new participant ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant:{}", self.0)
    }
}

/// Key identifying one shared record in the directory
///
/// Derivation is pure: the same inputs produce a byte-identical key on every
/// participant, which is what makes the create-or-join race resolvable
/// without coordination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(pub String);

impl RecordKey {
    /// Derive the key from a replicated ancestor's identifier
    pub fn for_ancestor(ancestor_id: &str) -> Self {
        Self(format!("{ancestor_id}{RECORD_KEY_SUFFIX}"))
    }

    /// Derive the key from the object's authoring-time name
    ///
    /// Fallback path used when the object has no replicated ancestor. The
    /// name is assumed unique within the room at authoring time.
    pub fn for_object_name(name: &str) -> Self {
        Self(format!("{name}{RECORD_KEY_SUFFIX}"))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
