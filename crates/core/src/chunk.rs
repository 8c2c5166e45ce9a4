//! CAS chunk layout, classification and serialization.
//!
//! A CAS file is nothing but chunks written back to back. There is no file
//! header, footer or checksum.
//!
//! # Chunk Format
//!
//! ```text
//! +------------------+
//! | type_code (4)    |  raw bytes, e.g. "FUJI", "baud", "data", "fsk "
//! +------------------+
//! | length (2)       |  u16 little-endian, payload bytes only
//! +------------------+
//! | aux_data (2)     |  u16 little-endian, meaning depends on type_code
//! +------------------+
//! | payload          |  exactly `length` bytes
//! | (variable)       |
//! +------------------+
//! ```
//!
//! Unknown type codes are legal. They are kept verbatim and simply have no
//! [`ChunkKind`].

use serde::Serialize;

use crate::error::{ChunkError, Result};
use crate::text::{render_printable, TYPE_PLACEHOLDER};

/// Size of the chunk header in bytes
pub const HEADER_SIZE: usize = 8;

/// Largest payload the 16-bit length field can describe
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Known chunk kinds.
///
/// The set is closed for interpretation only; a code missing from it is still
/// a valid chunk (see [`ChunkKind::from_code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// `FUJI`: tape description text
    Fuji,
    /// `baud`: transmission baud rate
    Baud,
    /// `data`: standard SIO record
    Data,
    /// `fsk `: non-standard signal lengths
    Fsk,
    /// `pwms`: turbo transmission settings
    Pwms,
    /// `pwmc`: turbo synchronization signals
    Pwmc,
    /// `pwmd`: turbo data block
    Pwmd,
    /// `pwml`: raw PWM state sequence
    Pwml,
}

const KIND_TABLE: [(ChunkKind, [u8; 4]); 8] = [
    (ChunkKind::Fuji, *b"FUJI"),
    (ChunkKind::Baud, *b"baud"),
    (ChunkKind::Data, *b"data"),
    (ChunkKind::Fsk, *b"fsk "),
    (ChunkKind::Pwms, *b"pwms"),
    (ChunkKind::Pwmc, *b"pwmc"),
    (ChunkKind::Pwmd, *b"pwmd"),
    (ChunkKind::Pwml, *b"pwml"),
];

impl ChunkKind {
    /// Classify a raw type code. Returns `None` for unrecognized codes.
    pub fn from_code(code: &[u8; 4]) -> Option<Self> {
        KIND_TABLE
            .iter()
            .find(|(_, known)| known == code)
            .map(|(kind, _)| *kind)
    }

    /// The 4-byte type code written on tape for this kind.
    pub fn code(self) -> [u8; 4] {
        match self {
            ChunkKind::Fuji => *b"FUJI",
            ChunkKind::Baud => *b"baud",
            ChunkKind::Data => *b"data",
            ChunkKind::Fsk => *b"fsk ",
            ChunkKind::Pwms => *b"pwms",
            ChunkKind::Pwmc => *b"pwmc",
            ChunkKind::Pwmd => *b"pwmd",
            ChunkKind::Pwml => *b"pwml",
        }
    }

    /// Short human-readable meaning of the kind.
    pub fn description(self) -> &'static str {
        match self {
            ChunkKind::Fuji => "tape description",
            ChunkKind::Baud => "baud rate",
            ChunkKind::Data => "standard record",
            ChunkKind::Fsk => "non-standard signal lengths",
            ChunkKind::Pwms => "turbo transmission settings",
            ChunkKind::Pwmc => "turbo synchronization",
            ChunkKind::Pwmd => "turbo data block",
            ChunkKind::Pwml => "raw PWM states",
        }
    }
}

/// Fixed 8-byte chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Raw type code, not necessarily valid text
    pub type_code: [u8; 4],

    /// Payload length in bytes (header not included)
    pub length: u16,

    /// Type-dependent auxiliary value (baud rate, gap length, ...)
    pub aux_data: u16,
}

impl ChunkHeader {
    /// Parse a header from the start of `bytes`.
    ///
    /// Returns `None` if fewer than [`HEADER_SIZE`] bytes are available.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let b = bytes.get(..HEADER_SIZE)?;
        Some(Self {
            type_code: [b[0], b[1], b[2], b[3]],
            length: u16::from_le_bytes([b[4], b[5]]),
            aux_data: u16::from_le_bytes([b[6], b[7]]),
        })
    }

    /// Serialize the header into its on-tape form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.type_code);
        out[4..6].copy_from_slice(&self.length.to_le_bytes());
        out[6..8].copy_from_slice(&self.aux_data.to_le_bytes());
        out
    }

    /// Classify the type code.
    pub fn kind(&self) -> Option<ChunkKind> {
        ChunkKind::from_code(&self.type_code)
    }

    /// Type code as text; non-printable bytes become `?`.
    pub fn type_name(&self) -> String {
        render_printable(&self.type_code, TYPE_PLACEHOLDER)
    }
}

/// A complete chunk: header plus exactly `header.length` payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    header: ChunkHeader,
    payload: Vec<u8>,
}

impl Chunk {
    /// Build a chunk, deriving the length field from the payload.
    ///
    /// # Errors
    /// - `ChunkError::PayloadTooLong` if the payload exceeds 65535 bytes
    pub fn new(type_code: [u8; 4], aux_data: u16, payload: Vec<u8>) -> Result<Self> {
        let length = u16::try_from(payload.len()).map_err(|_| ChunkError::PayloadTooLong {
            actual: payload.len(),
            max: MAX_PAYLOAD_LEN,
        })?;

        Ok(Self {
            header: ChunkHeader {
                type_code,
                length,
                aux_data,
            },
            payload,
        })
    }

    /// Build a chunk of a known kind.
    pub fn of_kind(kind: ChunkKind, aux_data: u16, payload: Vec<u8>) -> Result<Self> {
        Self::new(kind.code(), aux_data, payload)
    }

    /// Pair a parsed header with its payload slice.
    ///
    /// The caller guarantees `payload.len() == header.length`.
    pub(crate) fn from_parts(header: ChunkHeader, payload: &[u8]) -> Self {
        debug_assert_eq!(payload.len(), header.length as usize);
        Self {
            header,
            payload: payload.to_vec(),
        }
    }

    pub fn header(&self) -> &ChunkHeader {
        &self.header
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn type_code(&self) -> [u8; 4] {
        self.header.type_code
    }

    pub fn kind(&self) -> Option<ChunkKind> {
        self.header.kind()
    }

    pub fn is_kind(&self, kind: ChunkKind) -> bool {
        self.header.type_code == kind.code()
    }

    /// Bytes this chunk occupies on tape (header + payload).
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Append the on-tape form of this chunk to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(&self.payload);
    }
}
