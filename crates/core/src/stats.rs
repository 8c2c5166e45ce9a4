//! Decode statistics.
//!
//! Truncation is not an error, so the decoder has no way to tell its caller
//! that bytes were dropped other than handing back a shorter sequence. These
//! statistics make that visible for reporting without changing the decode
//! result.

/// Why the decode loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every byte of the input belonged to a complete chunk
    EndOfInput,

    /// 1..=7 bytes were left over, too few for a header
    TruncatedHeader { offset: usize, remaining: usize },

    /// A header declared more payload than the input still held
    TruncatedPayload {
        offset: usize,
        declared: u16,
        available: usize,
    },
}

/// Counters collected during a single decode pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeStats {
    /// Size of the input buffer
    pub input_bytes: usize,

    /// Bytes belonging to emitted chunks (headers + payloads)
    pub consumed_bytes: usize,

    /// Chunks emitted
    pub chunks_decoded: usize,

    /// Emitted chunks with the `data` type code
    pub data_chunks: usize,

    /// Emitted chunks whose type code is not a known kind
    pub unknown_chunks: usize,

    /// How the loop ended
    pub stop: StopReason,
}

impl DecodeStats {
    pub(crate) fn new(input_bytes: usize) -> Self {
        Self {
            input_bytes,
            consumed_bytes: 0,
            chunks_decoded: 0,
            data_chunks: 0,
            unknown_chunks: 0,
            stop: StopReason::EndOfInput,
        }
    }

    /// Input bytes that were not part of any emitted chunk.
    pub fn trailing_bytes(&self) -> usize {
        self.input_bytes.saturating_sub(self.consumed_bytes)
    }

    /// True when the whole input decoded into complete chunks.
    pub fn is_clean(&self) -> bool {
        self.stop == StopReason::EndOfInput
    }

    /// Human-readable summary.
    pub fn summary_text(&self) -> String {
        let result = match self.stop {
            StopReason::EndOfInput => "complete".to_string(),
            StopReason::TruncatedHeader { offset, remaining } => {
                format!("truncated header at offset {offset:#06x} ({remaining} stray bytes)")
            }
            StopReason::TruncatedPayload {
                offset,
                declared,
                available,
            } => format!("truncated chunk at offset {offset:#06x} (declares {declared} bytes, {available} available)"),
        };

        let mut out = format!(
            "=== Decode ===\n\
             Input: {} bytes\n\
             Consumed: {} bytes\n\
             Chunks: {} ({} data, {} unknown)\n\
             Result: {}\n",
            self.input_bytes,
            self.consumed_bytes,
            self.chunks_decoded,
            self.data_chunks,
            self.unknown_chunks,
            result,
        );
        if self.trailing_bytes() > 0 {
            out.push_str(&format!("Dropped: {} bytes\n", self.trailing_bytes()));
        }
        out
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_bytes={}\n\
             consumed_bytes={}\n\
             trailing_bytes={}\n\
             chunks_decoded={}\n\
             data_chunks={}\n\
             unknown_chunks={}\n\
             clean={}\n",
            self.input_bytes,
            self.consumed_bytes,
            self.trailing_bytes(),
            self.chunks_decoded,
            self.data_chunks,
            self.unknown_chunks,
            self.is_clean(),
        )
    }
}
