//! Fixed ordered catalog of shape primitives

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel shape index meaning "not yet received"
pub const SHAPE_INDEX_UNSET: i32 = -1;

/// A primitive shape kind the visual representation can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Box,
    Sphere,
    Cylinder,
    Capsule,
    Cone,
    Torus,
    Prism,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Capsule => "capsule",
            ShapeKind::Cone => "cone",
            ShapeKind::Torus => "torus",
            ShapeKind::Prism => "prism",
        };
        write!(f, "{name}")
    }
}

/// Ordered catalog of shape kinds
///
/// The replication protocol only depends on the order and count; the kinds
/// themselves are presentation detail. Every participant must construct the
/// catalog in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCatalog {
    kinds: Vec<ShapeKind>,
}

impl ShapeCatalog {
    /// Create a catalog from an explicit ordering
    pub fn new(kinds: Vec<ShapeKind>) -> Self {
        Self { kinds }
    }

    /// Get the number of shapes in the catalog
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Look up a shape by replicated index
    ///
    /// Returns `None` for the unset sentinel and for out-of-range indices.
    pub fn get(&self, index: i32) -> Option<ShapeKind> {
        if index < 0 {
            return None;
        }
        self.kinds.get(index as usize).copied()
    }

    /// Compute the index following `current`, wrapping at the end
    ///
    /// The unset sentinel advances to index 0, so the first activation on a
    /// fresh record lands on the catalog's first shape.
    pub fn next_index(&self, current: i32) -> i32 {
        let len = self.kinds.len() as i32;
        if len == 0 {
            return SHAPE_INDEX_UNSET;
        }
        (current.max(0) + 1).rem_euclid(len)
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::new(vec![
            ShapeKind::Box,
            ShapeKind::Sphere,
            ShapeKind::Cylinder,
            ShapeKind::Capsule,
            ShapeKind::Cone,
            ShapeKind::Torus,
            ShapeKind::Prism,
        ])
    }
}
