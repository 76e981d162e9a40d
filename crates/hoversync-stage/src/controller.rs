//! Frame-driven presentation controller
//!
//! Consumes the replicated store's change notifications each frame and
//! drives the local visual; forwards user gestures back into the store.
//! The coupling is one-way: the store knows nothing about this module or
//! the visual behind it.

use crate::config::StageConfig;
use crate::visual::Visual;
use glam::Vec3;
use hoversync_core::ShapeCatalog;
use hoversync_replica::{RecordDirectory, ReplicatedStore, StateChange};

/// Drives the local visual from replicated state and forwards gestures
pub struct PresentationController {
    config: StageConfig,
    catalog: ShapeCatalog,
    /// Scale at the start of the current drag gesture
    drag_base: f32,
    /// Vertical displacement accumulated over the current drag gesture
    drag_accum: f32,
}

impl PresentationController {
    /// Create a controller with the given tuning and shape catalog
    ///
    /// The catalog must match the one the store advances through; both sides
    /// agree because every participant builds it in the same fixed order.
    pub fn new(config: StageConfig, catalog: ShapeCatalog) -> Self {
        Self {
            config,
            catalog,
            drag_base: 1.0,
            drag_accum: 0.0,
        }
    }

    /// The controller's tuning
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Run one presentation frame
    ///
    /// Pumps the substrate, applies pending state changes to the visual, and
    /// overlays the idle bob. The bob is a pure function of wall-clock time,
    /// local to this participant, and never written to the store.
    pub fn frame(
        &mut self,
        time_secs: f32,
        directory: &mut dyn RecordDirectory,
        store: &mut ReplicatedStore,
        visual: &mut dyn Visual,
    ) {
        store.pump(directory);
        for change in store.drain_changes() {
            match change {
                StateChange::Ready => self.apply_snapshot(store, visual),
                StateChange::ShapeChanged(index) => {
                    if let Some(kind) = self.catalog.get(index) {
                        visual.set_shape(kind);
                    }
                }
                StateChange::ScaleChanged(scale) => visual.set_scale(scale),
                StateChange::RotationChanged(rotation) => visual.set_rotation(rotation),
            }
        }
        let bob = self.config.bob_amplitude * (time_secs * self.config.bob_frequency).sin();
        visual.set_height_offset(bob);
    }

    /// Start a drag gesture from the current replicated scale
    pub fn begin_drag(&mut self, store: &ReplicatedStore) {
        self.drag_base = store.snapshot().scale.x;
        self.drag_accum = 0.0;
    }

    /// Feed one drag delta (vertical displacement since the last call)
    ///
    /// The accumulated displacement maps to a uniform target scale, clamped
    /// on every axis simultaneously before the write, so an overshooting
    /// drag pins the object at exactly the bound.
    pub fn drag(
        &mut self,
        delta_y: f32,
        directory: &mut dyn RecordDirectory,
        store: &mut ReplicatedStore,
    ) {
        self.drag_accum += delta_y;
        let target = self.drag_base + self.drag_accum * self.config.drag_sensitivity;
        let scale = Vec3::splat(target).clamp(
            Vec3::splat(self.config.min_scale()),
            Vec3::splat(self.config.max_scale()),
        );
        store.set_scale(directory, scale);
    }

    /// Forward a discrete activate gesture (click) to the store
    pub fn activate(&mut self, directory: &mut dyn RecordDirectory, store: &mut ReplicatedStore) {
        store.advance_shape(directory);
    }

    fn apply_snapshot(&self, store: &ReplicatedStore, visual: &mut dyn Visual) {
        let snapshot = store.snapshot();
        if let Some(kind) = self.catalog.get(snapshot.shape_index) {
            visual.set_shape(kind);
        }
        visual.set_scale(snapshot.scale);
        visual.set_rotation(snapshot.rotation);
    }
}
