//! Error types for the CAS reader core.
//!
//! Decoding itself never fails: malformed or truncated input simply yields a
//! shorter chunk sequence. Errors only arise when building chunks by hand or
//! when parsing a chunk selection string supplied by a user.

use thiserror::Error;

/// Top-level error type for all fallible operations in the core.
#[derive(Debug, Error)]
pub enum Error {
    /// Chunk construction failed (e.g., payload does not fit the length field)
    #[error("chunk error: {0}")]
    Chunk(#[from] ChunkError),

    /// Chunk selection specification could not be parsed
    #[error("invalid chunk selection: {0}")]
    Selection(#[from] SelectionError),
}

/// Errors raised while constructing a chunk programmatically.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// Payload is longer than the 16-bit length field can describe
    #[error("payload of {actual} bytes exceeds maximum chunk length {max}")]
    PayloadTooLong { actual: usize, max: usize },
}

/// Errors raised by [`crate::selection::parse_chunk_selection`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A comma-separated part is not a non-negative integer
    #[error("invalid index {token:?}")]
    InvalidIndex { token: String },

    /// A range part has a malformed bound
    #[error("invalid range {part:?}: {reason}")]
    InvalidRange { part: String, reason: &'static str },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
