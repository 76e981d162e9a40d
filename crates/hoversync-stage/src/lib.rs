//! Hoversync Stage - Presentation bridge for the shared room object
//!
//! Drives a local visual representation from replicated state and forwards
//! user gestures into the replication layer:
//!
//! - `Visual` - the seam to whatever renders the object locally
//! - `StageConfig` - gesture tuning, scale bounds, idle-bob parameters
//! - `PresentationController` - per-frame state application, drag-to-scale
//!   with simultaneous per-axis clamping, activate-to-cycle-shape, and the
//!   purely local idle bob
//!
//! The dependency points one way: this crate reads `hoversync-replica`;
//! nothing in the replication layer knows the stage exists.
//!
//! # Example
//!
//! ```rust,ignore
//! use hoversync_core::{ParticipantId, RecordTemplate, ShapeCatalog, SyncManifest};
//! use hoversync_replica::{
//!     EntityResolver, LocalObject, MemoryDirectory, OwnershipGate, ReplicatedStore,
//!     SessionBootstrap,
//! };
//! use hoversync_stage::{PresentationController, StageConfig};
//!
//! let mut bootstrap = SessionBootstrap::new();
//!
//! // Frame loop
//! loop {
//!     if bootstrap.poll(&session) {
//!         let resolver = EntityResolver::new(participant);
//!         let key = resolver.resolve_key(&directory, &LocalObject::new("orb"));
//!         let binding = resolver.attach(&mut directory, &key, &RecordTemplate::hover_object())?;
//!         store = Some(ReplicatedStore::new(
//!             binding.handle,
//!             ShapeCatalog::default(),
//!             SyncManifest::hover_object(0.01),
//!             OwnershipGate::new(participant),
//!         ));
//!     }
//!     if let Some(store) = store.as_mut() {
//!         controller.frame(now_secs, &mut directory, store, &mut visual);
//!     }
//! }
//! ```

mod config;
mod controller;
mod visual;

pub use config::StageConfig;
pub use controller::PresentationController;
pub use visual::Visual;
