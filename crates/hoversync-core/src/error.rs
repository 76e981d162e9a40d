//! Error types for hoversync-core

use thiserror::Error;

/// Core error type
///
/// Expected protocol states (resolution fallback, acquisition refusal,
/// record-not-ready) are modeled as values, not errors; only genuine misuse
/// of the core types lands here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Shape catalog is empty")]
    EmptyCatalog,

    #[error("Shape index {index} out of range for catalog of {len}")]
    ShapeIndexOutOfRange { index: i32, len: usize },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
