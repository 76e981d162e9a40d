//! Error types for hoversync-replica

use thiserror::Error;

/// Replica error type
///
/// Only directory misuse lands here. Expected protocol outcomes (ancestor
/// fallback, acquisition refusal, record-not-ready) are values on their
/// respective APIs, never errors, and nothing in this layer is fatal.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown record handle: {0}")]
    UnknownHandle(u64),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
