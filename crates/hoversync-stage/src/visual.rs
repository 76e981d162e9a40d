//! Seam to the local visual representation
//!
//! Rendering lives outside this system. The controller drives whatever
//! stands behind this trait; nothing behind it ever reaches back into the
//! replication layer.

use glam::Vec3;
use hoversync_core::ShapeKind;

/// The local visual representation of the shared object
pub trait Visual {
    /// Swap the rendered primitive
    fn set_shape(&mut self, kind: ShapeKind);

    /// Apply the replicated scale
    fn set_scale(&mut self, scale: Vec3);

    /// Apply the replicated rotation
    fn set_rotation(&mut self, rotation: Vec3);

    /// Apply the local idle-animation height offset
    fn set_height_offset(&mut self, offset: f32);
}
