//! Chunk stream decoder.
//!
//! # Truncation Policy
//!
//! Decoding never fails. The loop stops at the first point where it cannot
//! read a complete chunk:
//! - fewer than 8 bytes left: the header cannot be read
//! - the declared length runs past the end of the buffer: the chunk is
//!   dropped whole, together with everything after it
//!
//! The result is however many complete chunks preceded that point.

use crate::chunk::{Chunk, ChunkHeader, ChunkKind, HEADER_SIZE};
use crate::stats::{DecodeStats, StopReason};

/// Ordered, immutable list of chunks in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkSequence {
    chunks: Vec<Chunk>,
}

impl ChunkSequence {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    pub fn as_slice(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Total bytes the sequence occupies when written back out.
    pub fn encoded_len(&self) -> usize {
        self.chunks.iter().map(Chunk::encoded_len).sum()
    }
}

impl FromIterator<Chunk> for ChunkSequence {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChunkSequence {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Decode a byte buffer into a chunk sequence.
pub fn decode(buffer: &[u8]) -> ChunkSequence {
    decode_with_stats(buffer).0
}

/// Decode a byte buffer, also reporting how the decode ended.
pub fn decode_with_stats(buffer: &[u8]) -> (ChunkSequence, DecodeStats) {
    let mut stats = DecodeStats::new(buffer.len());
    let mut chunks = Vec::new();
    let mut offset = 0;

    while offset < buffer.len() {
        let Some(header) = ChunkHeader::parse(&buffer[offset..]) else {
            let remaining = buffer.len() - offset;
            tracing::warn!(offset, remaining, "stray bytes after last chunk");
            stats.stop = StopReason::TruncatedHeader { offset, remaining };
            break;
        };

        let payload_start = offset + HEADER_SIZE;
        let payload_end = payload_start + header.length as usize;
        if payload_end > buffer.len() {
            let available = buffer.len() - payload_start;
            tracing::warn!(
                offset,
                declared = header.length,
                available,
                chunk_type = %header.type_name(),
                "chunk overruns end of input, dropping it and everything after"
            );
            stats.stop = StopReason::TruncatedPayload {
                offset,
                declared: header.length,
                available,
            };
            break;
        }

        tracing::debug!(
            index = chunks.len(),
            offset,
            chunk_type = %header.type_name(),
            length = header.length,
            aux = header.aux_data,
            "decoded chunk"
        );

        match header.kind() {
            Some(ChunkKind::Data) => stats.data_chunks += 1,
            None => stats.unknown_chunks += 1,
            Some(_) => {}
        }
        chunks.push(Chunk::from_parts(header, &buffer[payload_start..payload_end]));
        offset = payload_end;
    }

    stats.consumed_bytes = offset.min(buffer.len());
    stats.chunks_decoded = chunks.len();
    (ChunkSequence { chunks }, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_chunk(code: &[u8; 4], aux: u16, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(code);
        out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        out.extend_from_slice(&aux.to_le_bytes());
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn test_empty_input() {
        let (seq, stats) = decode_with_stats(&[]);
        assert!(seq.is_empty());
        assert!(stats.is_clean());
        assert_eq!(stats.consumed_bytes, 0);
    }

    #[test]
    fn test_two_chunks() {
        let mut buf = raw_chunk(b"FUJI", 0, b"Test Tape");
        buf.extend(raw_chunk(b"data", 250, &[0x55; 10]));

        let (seq, stats) = decode_with_stats(&buf);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(0).unwrap().payload(), b"Test Tape");
        assert_eq!(seq.get(1).unwrap().header().aux_data, 250);
        assert_eq!(stats.consumed_bytes, buf.len());
        assert_eq!(stats.data_chunks, 1);
        assert!(stats.is_clean());
    }

    #[test]
    fn test_zero_length_chunk() {
        let buf = raw_chunk(b"baud", 600, &[]);
        let seq = decode(&buf);
        assert_eq!(seq.len(), 1);
        assert!(seq.get(0).unwrap().payload().is_empty());
    }

    #[test]
    fn test_stops_mid_header() {
        let mut buf = raw_chunk(b"data", 0, &[1, 2, 3]);
        buf.extend_from_slice(b"dat");

        let (seq, stats) = decode_with_stats(&buf);
        assert_eq!(seq.len(), 1);
        assert_eq!(
            stats.stop,
            StopReason::TruncatedHeader {
                offset: 11,
                remaining: 3
            }
        );
        assert_eq!(stats.trailing_bytes(), 3);
    }

    #[test]
    fn test_stops_mid_payload() {
        let mut buf = raw_chunk(b"data", 0, &[1, 2, 3]);
        let mut truncated = raw_chunk(b"data", 0, &[9; 20]);
        truncated.truncate(8 + 5);
        buf.extend(truncated);
        // A complete chunk after the truncated one must not be reached
        buf.extend(raw_chunk(b"FUJI", 0, b""));

        let (seq, stats) = decode_with_stats(&buf);
        assert_eq!(seq.len(), 1);
        assert!(matches!(
            stats.stop,
            StopReason::TruncatedPayload { offset: 11, declared: 20, .. }
        ));
    }

    #[test]
    fn test_unknown_type_preserved() {
        let buf = raw_chunk(&[0xde, 0xad, 0xbe, 0xef], 7, b"xyz");
        let (seq, stats) = decode_with_stats(&buf);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.get(0).unwrap().type_code(), [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(seq.get(0).unwrap().kind(), None);
        assert_eq!(stats.unknown_chunks, 1);
    }

    #[test]
    fn test_garbage_never_panics() {
        // Every prefix of a noisy buffer must decode without panicking
        let noise: Vec<u8> = (0..600u32).map(|i| (i * 37 + 11) as u8).collect();
        for end in 0..noise.len() {
            let (seq, stats) = decode_with_stats(&noise[..end]);
            assert!(seq.encoded_len() <= end);
            assert_eq!(stats.consumed_bytes, seq.encoded_len());
        }
    }
}
