//! Hoversync Core - Shared-object replication data model
//!
//! This crate provides the pure types underneath the hoversync replication
//! layer:
//! - Participant and record identity, including the deterministic record-key
//!   derivations every participant must agree on
//! - The fixed ordered shape catalog and its cyclic index arithmetic
//! - The replicated state schema (`SharedObjectState`) and record template
//! - The synchronization manifest with per-field send gates
//! - Epsilon-gated change detection for vector fields
//!
//! Nothing here touches the replication substrate; that boundary lives in
//! `hoversync-replica`.

mod catalog;
mod change;
mod error;
mod identity;
mod manifest;
mod state;

pub use catalog::{ShapeCatalog, ShapeKind, SHAPE_INDEX_UNSET};
pub use change::ChangeDetector;
pub use error::{Error, Result};
pub use identity::{ParticipantId, RecordKey, RECORD_KEY_SUFFIX};
pub use manifest::{SendGate, SyncEntry, SyncManifest};
pub use state::{FieldValue, RecordTemplate, SharedObjectState, StateField};
