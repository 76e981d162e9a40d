//! Synchronization manifest: which fields are transmitted, and when
//!
//! Declared once per record kind, not per instance. Each entry pairs a field
//! with a send gate; fields without an entry are never transmitted. The
//! store consults the manifest after a mutation is accepted locally, on the
//! transport boundary.

use crate::change::ChangeDetector;
use crate::state::{FieldValue, StateField};

/// Per-field transmission gate
#[derive(Debug, Clone)]
pub enum SendGate {
    /// Transmit every accepted change
    Always,
    /// Transmit vector changes only when the detector fires
    VectorDelta(ChangeDetector),
}

impl SendGate {
    fn should_send(&mut self, value: &FieldValue) -> bool {
        match self {
            SendGate::Always => true,
            SendGate::VectorDelta(detector) => match value.as_vector() {
                Some(v) => detector.has_changed(v),
                // Non-vector value behind a vector gate: nothing to compare.
                None => true,
            },
        }
    }
}

/// One manifest entry: a field and its gate
#[derive(Debug, Clone)]
pub struct SyncEntry {
    pub field: StateField,
    pub gate: SendGate,
}

/// The synchronization manifest for one record kind
#[derive(Debug, Clone, Default)]
pub struct SyncManifest {
    entries: Vec<SyncEntry>,
}

impl SyncManifest {
    /// Create an empty manifest (nothing is transmitted)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its gate
    pub fn with_field(mut self, field: StateField, gate: SendGate) -> Self {
        self.entries.push(SyncEntry { field, gate });
        self
    }

    /// Manifest for the shared hover object
    ///
    /// Shape index is transmitted unconditionally; the vector fields are
    /// epsilon-gated so drag jitter stays off the wire.
    pub fn hover_object(epsilon: f32) -> Self {
        Self::new()
            .with_field(StateField::ShapeIndex, SendGate::Always)
            .with_field(StateField::Scale, SendGate::VectorDelta(ChangeDetector::new(epsilon)))
            .with_field(
                StateField::Rotation,
                SendGate::VectorDelta(ChangeDetector::new(epsilon)),
            )
    }

    /// Check whether a field is transmitted at all
    pub fn carries(&self, field: StateField) -> bool {
        self.entries.iter().any(|e| e.field == field)
    }

    /// Decide whether this accepted change should be transmitted
    ///
    /// Returns `false` for fields absent from the manifest.
    pub fn should_send(&mut self, field: StateField, value: &FieldValue) -> bool {
        match self.entries.iter_mut().find(|e| e.field == field) {
            Some(entry) => entry.gate.should_send(value),
            None => false,
        }
    }
}
