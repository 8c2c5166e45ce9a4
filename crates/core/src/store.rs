//! Read-only views over a decoded chunk sequence.
//!
//! A [`ChunkStore`] owns its sequence outright and never changes it, so every
//! accessor is a pure projection and the store can be shared between threads
//! (e.g. behind an `Arc`) without locking.

use serde::Serialize;

use crate::chunk::ChunkKind;
use crate::decoder::{decode_with_stats, ChunkSequence};
use crate::dump::{render_dump, DumpOptions};
use crate::stats::DecodeStats;
use crate::text::decode_permissive;

/// Baud rate assumed when the tape carries no usable `baud` chunk
pub const DEFAULT_BAUD_RATE: u16 = 600;

/// Tape-level summary.
///
/// Only the first `FUJI` and the first `baud` chunk contribute; repeats are
/// listed by [`ChunkStore::describe_chunks`] but ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub description: Option<String>,
    pub baud_rate: u16,
    pub chunk_count: usize,
    pub data_block_count: usize,
}

/// Per-chunk summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkInfo {
    pub index: usize,
    pub type_name: String,
    pub kind: Option<ChunkKind>,
    pub length: u16,
    pub aux_data: u16,
}

/// A decoded CAS image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkStore {
    chunks: ChunkSequence,
}

impl ChunkStore {
    pub fn new(chunks: ChunkSequence) -> Self {
        Self { chunks }
    }

    /// Decode `buffer` and wrap the result.
    pub fn from_bytes(buffer: &[u8]) -> Self {
        Self::from_bytes_with_stats(buffer).0
    }

    /// Decode `buffer`, keeping the decode statistics alongside.
    pub fn from_bytes_with_stats(buffer: &[u8]) -> (Self, DecodeStats) {
        let (chunks, stats) = decode_with_stats(buffer);
        (Self::new(chunks), stats)
    }

    pub fn chunks(&self) -> &ChunkSequence {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Payloads of all `data` chunks, in file order.
    pub fn data_payloads(&self) -> Vec<&[u8]> {
        self.chunks
            .iter()
            .filter(|chunk| chunk.is_kind(ChunkKind::Data))
            .map(|chunk| chunk.payload())
            .collect()
    }

    /// All `data` payloads concatenated: the recovered program/file bytes.
    pub fn to_flat_bytes(&self) -> Vec<u8> {
        let payloads = self.data_payloads();
        let total = payloads.iter().map(|p| p.len()).sum();
        let mut out = Vec::with_capacity(total);
        for payload in payloads {
            out.extend_from_slice(payload);
        }
        out
    }

    /// CRC-32 of [`Self::to_flat_bytes`].
    pub fn data_crc32(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for payload in self.data_payloads() {
            hasher.update(payload);
        }
        hasher.finalize()
    }

    /// Write every chunk back out in its on-tape form.
    ///
    /// Decoding the result yields this store's sequence again. Bytes dropped
    /// during the original decode (stray trailing bytes, a truncated final
    /// chunk) are not reproduced.
    pub fn reserialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.chunks.encoded_len());
        for chunk in &self.chunks {
            chunk.encode_into(&mut out);
        }
        out
    }

    pub fn metadata(&self) -> Metadata {
        let description = self
            .first_of(ChunkKind::Fuji)
            .map(decode_permissive);

        let baud_rate = self
            .first_of(ChunkKind::Baud)
            .and_then(|payload| payload.get(..2))
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .unwrap_or(DEFAULT_BAUD_RATE);

        Metadata {
            description,
            baud_rate,
            chunk_count: self.chunks.len(),
            data_block_count: self.data_payloads().len(),
        }
    }

    pub fn describe_chunks(&self) -> Vec<ChunkInfo> {
        self.chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| {
                let header = chunk.header();
                ChunkInfo {
                    index,
                    type_name: header.type_name(),
                    kind: header.kind(),
                    length: header.length,
                    aux_data: header.aux_data,
                }
            })
            .collect()
    }

    /// Hex/ASCII dump of the selected chunks (all when `indices` is `None`).
    pub fn render_dump(&self, indices: Option<&[usize]>, options: DumpOptions) -> String {
        render_dump(self.chunks.as_slice(), indices, options)
    }

    fn first_of(&self, kind: ChunkKind) -> Option<&[u8]> {
        self.chunks
            .iter()
            .find(|chunk| chunk.is_kind(kind))
            .map(|chunk| chunk.payload())
    }
}
