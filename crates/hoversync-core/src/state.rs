//! Replicated state schema for one shared object

use crate::catalog::SHAPE_INDEX_UNSET;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The canonical replicated fields for one shared object
///
/// Every participant holds a copy; the replication substrate keeps copies
/// converging toward the owner's last accepted values. Rotation is part of
/// the schema for compatibility but currently has no producer outside tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedObjectState {
    /// Index into the shape catalog; `SHAPE_INDEX_UNSET` until first received
    pub shape_index: i32,
    /// Scale applied to the visual geometry, per axis
    pub scale: Vec3,
    /// Rotation of the visual geometry, per axis
    pub rotation: Vec3,
}

impl Default for SharedObjectState {
    fn default() -> Self {
        Self {
            shape_index: SHAPE_INDEX_UNSET,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }
}

impl SharedObjectState {
    /// Read one field as a tagged value
    pub fn get(&self, field: StateField) -> FieldValue {
        match field {
            StateField::ShapeIndex => FieldValue::ShapeIndex(self.shape_index),
            StateField::Scale => FieldValue::Vector(self.scale),
            StateField::Rotation => FieldValue::Vector(self.rotation),
        }
    }

    /// Overwrite one field from a tagged value
    ///
    /// Mismatched tags are ignored; the substrate only ever delivers the
    /// value shape the field was registered with.
    pub fn apply(&mut self, field: StateField, value: FieldValue) {
        match (field, value) {
            (StateField::ShapeIndex, FieldValue::ShapeIndex(index)) => self.shape_index = index,
            (StateField::Scale, FieldValue::Vector(v)) => self.scale = v,
            (StateField::Rotation, FieldValue::Vector(v)) => self.rotation = v,
            _ => {}
        }
    }
}

/// Tag naming one replicated field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateField {
    ShapeIndex,
    Scale,
    Rotation,
}

/// A tagged field value handed to and received from the substrate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    ShapeIndex(i32),
    Vector(Vec3),
}

impl FieldValue {
    /// Try to get this value as a shape index
    pub fn as_shape_index(&self) -> Option<i32> {
        match self {
            FieldValue::ShapeIndex(index) => Some(*index),
            _ => None,
        }
    }

    /// Try to get this value as a vector
    pub fn as_vector(&self) -> Option<Vec3> {
        match self {
            FieldValue::Vector(v) => Some(*v),
            _ => None,
        }
    }
}

/// Schema template registered once per shared-object kind
///
/// The directory uses it when a resolver creates a record: initial field
/// values, whether the record outlives its last participant, and whether
/// ownership may move between participants after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTemplate {
    /// Name of the record kind this template describes
    pub kind: String,
    /// Field values a freshly created record starts with
    pub initial: SharedObjectState,
    /// Whether the record survives with no participant attached
    pub durable: bool,
    /// Whether non-creating participants may acquire ownership
    pub transferable: bool,
}

impl RecordTemplate {
    /// Template for the shared hover object: non-durable, transferable
    pub fn hover_object() -> Self {
        Self {
            kind: "hover-object".to_string(),
            initial: SharedObjectState::default(),
            durable: false,
            transferable: true,
        }
    }
}
