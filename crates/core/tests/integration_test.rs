//! Integration tests for decoding and the derived views.
//!
//! These tests build CAS images byte by byte, decode them, and check the
//! properties every view must keep: decode never overruns its input, writing
//! the chunks back out is a fixed point, and the data stream is exactly the
//! `data` payloads in order.

use cas_reader_core::{
    decode, decode_with_stats, parse_chunk_selection, Chunk, ChunkKind, ChunkSequence,
    ChunkStore, DumpOptions, StopReason,
};

fn raw_chunk(code: &[u8; 4], aux: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(code);
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(&aux.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// A small but realistic tape: description, baud, three records, a turbo
/// block and an unknown chunk.
fn sample_tape() -> Vec<u8> {
    let mut tape = Vec::new();
    tape.extend(raw_chunk(b"FUJI", 0, b"Sample Tape"));
    tape.extend(raw_chunk(b"baud", 0, &600u16.to_le_bytes()));
    for (i, gap) in [20000u16, 250, 250].into_iter().enumerate() {
        let mut record = vec![0x55, 0x55, 0xfc];
        record.extend(std::iter::repeat(i as u8).take(128));
        record.push(0x00);
        tape.extend(raw_chunk(b"data", gap, &record));
    }
    tape.extend(raw_chunk(b"pwmd", 0, &[1, 2, 3, 4]));
    tape.extend(raw_chunk(b"XYZ1", 42, b""));
    tape
}

#[test]
fn test_decode_sample_tape() {
    let tape = sample_tape();
    let (chunks, stats) = decode_with_stats(&tape);

    assert_eq!(chunks.len(), 7);
    assert!(stats.is_clean());
    assert_eq!(stats.consumed_bytes, tape.len());
    assert_eq!(stats.data_chunks, 3);
    assert_eq!(stats.unknown_chunks, 1);

    let kinds: Vec<Option<ChunkKind>> = chunks.iter().map(Chunk::kind).collect();
    assert_eq!(
        kinds,
        vec![
            Some(ChunkKind::Fuji),
            Some(ChunkKind::Baud),
            Some(ChunkKind::Data),
            Some(ChunkKind::Data),
            Some(ChunkKind::Data),
            Some(ChunkKind::Pwmd),
            None,
        ]
    );
}

#[test]
fn test_round_trip_is_fixed_point() {
    let tape = sample_tape();
    let first = decode(&tape);
    let rewritten = ChunkStore::new(first.clone()).reserialize();

    assert_eq!(rewritten, tape);
    assert_eq!(decode(&rewritten), first);
}

#[test]
fn test_round_trip_after_truncation() {
    let tape = sample_tape();
    for cut in [0, 5, 8, 19, 30, 100, tape.len() - 1] {
        let first = decode(&tape[..cut]);
        let rewritten = ChunkStore::new(first.clone()).reserialize();
        assert!(rewritten.len() <= cut);
        assert_eq!(decode(&rewritten), first, "cut at {cut}");
    }
}

#[test]
fn test_truncated_final_record_dropped() {
    let mut tape = sample_tape();
    let full = decode(&tape).len();
    // Declare a 128-byte record but supply only 10 bytes of it
    let mut partial = raw_chunk(b"data", 250, &[0xaa; 128]);
    partial.truncate(8 + 10);
    tape.extend(partial);

    let (chunks, stats) = decode_with_stats(&tape);
    assert_eq!(chunks.len(), full);
    assert_eq!(stats.trailing_bytes(), 18);
    assert!(matches!(
        stats.stop,
        StopReason::TruncatedPayload {
            declared: 128,
            available: 10,
            ..
        }
    ));
}

#[test]
fn test_consumed_never_exceeds_input() {
    // Deterministic pseudo-random buffers of growing length
    let mut state = 0x1234_5678u32;
    for len in (0..2048).step_by(61) {
        let buf: Vec<u8> = (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) as u8 & 0x1f
            })
            .collect();
        let chunks = decode(&buf);
        assert!(chunks.encoded_len() <= buf.len());
    }
}

#[test]
fn test_flat_stream_matches_payloads() {
    let store = ChunkStore::from_bytes(&sample_tape());
    let joined: Vec<u8> = store.data_payloads().concat();

    assert_eq!(store.to_flat_bytes(), joined);
    assert_eq!(joined.len(), 3 * 132);
}

#[test]
fn test_metadata_counts() {
    let store = ChunkStore::from_bytes(&sample_tape());
    let meta = store.metadata();

    assert_eq!(meta.description.as_deref(), Some("Sample Tape"));
    assert_eq!(meta.baud_rate, 600);
    assert_eq!(meta.chunk_count, store.len());
    assert_eq!(meta.data_block_count, 3);
}

#[test]
fn test_test_tape_scenario() {
    let payload = [9u8, 8, 7, 6, 5, 4, 3, 2, 1, 0];
    let mut buf = raw_chunk(b"FUJI", 0, b"Test Tape");
    buf.extend(raw_chunk(b"data", 0, &payload));

    let store = ChunkStore::from_bytes(&buf);
    let meta = store.metadata();
    assert_eq!(meta.description.as_deref(), Some("Test Tape"));
    assert_eq!(meta.baud_rate, 600);
    assert_eq!(meta.chunk_count, 2);
    assert_eq!(meta.data_block_count, 1);
    assert_eq!(store.to_flat_bytes(), payload);
}

#[test]
fn test_dump_selected_chunks() {
    let store = ChunkStore::from_bytes(&sample_tape());
    let indices = parse_chunk_selection("0,5-9", store.len()).unwrap();
    assert_eq!(indices, vec![0, 5, 6]);

    let dump = store.render_dump(Some(indices.as_slice()), DumpOptions::both());
    assert!(dump.contains("Chunk [0] Type: FUJI, Length: 11, Aux: 0"));
    assert!(dump.contains("| Sample Tape"));
    assert!(dump.contains("Chunk [5] Type: pwmd, Length: 4, Aux: 0"));
    assert!(dump.contains("Chunk [6] Type: XYZ1, Length: 0, Aux: 42\n"));
    assert!(dump.contains("(empty)"));
    assert!(!dump.contains("Chunk [1]"));
}

#[test]
fn test_store_shared_across_threads() {
    let store = std::sync::Arc::new(ChunkStore::from_bytes(&sample_tape()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || store.data_crc32())
        })
        .collect();

    let expected = crc32fast::hash(&store.to_flat_bytes());
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_collected_sequence_equals_decoded() {
    let tape = sample_tape();
    let decoded = decode(&tape);
    let rebuilt: ChunkSequence = decoded
        .iter()
        .map(|c| Chunk::new(c.type_code(), c.header().aux_data, c.payload().to_vec()).unwrap())
        .collect();
    assert_eq!(rebuilt, decoded);
}
