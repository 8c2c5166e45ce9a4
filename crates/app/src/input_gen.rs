//! Sample tape generation for testing.
//!
//! Produces a synthetic CAS image laid out the way a real standard-speed
//! recording is: a `FUJI` description, a `baud` chunk, a run of 132-byte SIO
//! records and a final end-of-file record.
//!
//! # Record Layout
//!
//! ```text
//! 0x55 0x55 | control | 128 data bytes | checksum
//! ```
//!
//! Control is 0xFC for a full record and 0xFE for end of file. The checksum is
//! the byte sum of everything before it with end-around carry.
//!
//! Record contents mix runs, text-like bytes and random bytes so dumps show
//! something worth looking at.

use cas_reader_core::{Chunk, ChunkKind, ChunkSequence, ChunkStore};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Standard baud rate written into the `baud` chunk
pub const SAMPLE_BAUD_RATE: u16 = 600;

/// Gap before the first record (leader tone), in milliseconds
const LEADER_GAP_MS: u16 = 20_000;

/// Gap between records, in milliseconds
const RECORD_GAP_MS: u16 = 250;

const RECORD_DATA_LEN: usize = 128;
const CONTROL_FULL: u8 = 0xfc;
const CONTROL_EOF: u8 = 0xfe;

/// Build a sample tape as a chunk sequence.
///
/// `records` full data records are followed by one end-of-file record, so
/// the tape holds `records + 1` data chunks.
pub fn generate_sample_tape(seed: u64, records: usize, description: &str) -> cas_reader_core::Result<ChunkSequence> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut chunks = Vec::with_capacity(records + 3);

    chunks.push(Chunk::of_kind(ChunkKind::Fuji, 0, description.as_bytes().to_vec())?);
    chunks.push(Chunk::of_kind(ChunkKind::Baud, SAMPLE_BAUD_RATE, Vec::new())?);

    for i in 0..records {
        let gap = if i == 0 { LEADER_GAP_MS } else { RECORD_GAP_MS };
        let data = generate_record_data(&mut rng);
        chunks.push(Chunk::of_kind(ChunkKind::Data, gap, build_record(CONTROL_FULL, &data))?);
    }

    let gap = if records == 0 { LEADER_GAP_MS } else { RECORD_GAP_MS };
    let eof = build_record(CONTROL_EOF, &[0u8; RECORD_DATA_LEN]);
    chunks.push(Chunk::of_kind(ChunkKind::Data, gap, eof)?);

    Ok(chunks.into_iter().collect())
}

/// Build a sample tape and serialize it.
pub fn generate_sample_bytes(seed: u64, records: usize, description: &str) -> cas_reader_core::Result<Vec<u8>> {
    let tape = generate_sample_tape(seed, records, description)?;
    Ok(ChunkStore::new(tape).reserialize())
}

fn generate_record_data(rng: &mut ChaCha8Rng) -> [u8; RECORD_DATA_LEN] {
    let mut data = [0u8; RECORD_DATA_LEN];

    match rng.gen_range(0..10) {
        // 30% runs of a single byte
        0..=2 => {
            let value: u8 = rng.gen();
            data.fill(value);
        }

        // 40% text-like (ATASCII letters, spaces, EOL)
        3..=6 => {
            let alphabet = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ 0123456789\x9b";
            for byte in data.iter_mut() {
                *byte = alphabet[rng.gen_range(0..alphabet.len())];
            }
        }

        // 30% random bytes
        _ => rng.fill(&mut data[..]),
    }

    data
}

fn build_record(control: u8, data: &[u8]) -> Vec<u8> {
    let mut record = Vec::with_capacity(RECORD_DATA_LEN + 4);
    record.extend_from_slice(&[0x55, 0x55, control]);
    record.extend_from_slice(data);
    record.push(sio_checksum(&record));
    record
}

/// Byte sum with end-around carry.
fn sio_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| {
        let (sum, carry) = acc.overflowing_add(b);
        sum.wrapping_add(carry as u8)
    })
}
