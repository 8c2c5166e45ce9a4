//! cas-reader-core: decoder and derived views for Atari 8-bit cassette (CAS) images
//!
//! A CAS image is a flat run of typed, length-prefixed chunks. This library
//! decodes such a buffer once and answers questions about it:
//! - the recovered data bytes (`data` chunk payloads, concatenated)
//! - a byte-exact re-serialization of every decoded chunk
//! - tape metadata (description, baud rate, counts)
//! - per-chunk summaries and hex/ASCII dumps
//!
//! # Architecture
//!
//! - `chunk`: header layout, kind classification, serialization
//! - `decoder`: buffer -> `ChunkSequence` with the truncation policy
//! - `stats`: how a decode pass ended and what it dropped
//! - `store`: `ChunkStore` and its read-only derivations
//! - `dump`: hex/ASCII dump rendering
//! - `selection`: chunk selection strings like `"1,3-7"`
//! - `text`: lossless-or-lossy byte to text helpers that never fail
//!
//! # Design Principles
//!
//! - **Never fails on input**: malformed or truncated data shortens the result
//! - **Parse once**: the sequence is immutable after decoding
//! - **No I/O**: callers supply bytes and route the output themselves
//!
//! # Example
//! ```
//! use cas_reader_core::ChunkStore;
//!
//! let mut cas = Vec::new();
//! cas.extend_from_slice(b"FUJI");
//! cas.extend_from_slice(&4u16.to_le_bytes());
//! cas.extend_from_slice(&0u16.to_le_bytes());
//! cas.extend_from_slice(b"Demo");
//!
//! let store = ChunkStore::from_bytes(&cas);
//! assert_eq!(store.metadata().description.as_deref(), Some("Demo"));
//! assert_eq!(store.reserialize(), cas);
//! ```

pub mod chunk;
pub mod decoder;
pub mod dump;
pub mod error;
pub mod selection;
pub mod stats;
pub mod store;
pub mod text;

// Re-export commonly used types
pub use chunk::{Chunk, ChunkHeader, ChunkKind};
pub use decoder::{decode, decode_with_stats, ChunkSequence};
pub use dump::DumpOptions;
pub use error::{Error, Result};
pub use selection::parse_chunk_selection;
pub use stats::{DecodeStats, StopReason};
pub use store::{ChunkInfo, ChunkStore, Metadata, DEFAULT_BAUD_RATE};
