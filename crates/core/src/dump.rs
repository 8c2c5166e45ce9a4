//! Hex/ASCII dump rendering.
//!
//! # Layout
//!
//! ```text
//! Chunk [0] Type: FUJI, Length: 9, Aux: 0
//! --------------------------------------------------------------------------------
//! 0000: 54 65 73 74 20 54 61 70 65                      | Test Tape
//!
//! ```
//!
//! Rows hold 16 bytes. The hex column is padded to a fixed width when the
//! ASCII column follows it, so the `|` separator lines up across rows.

use crate::chunk::Chunk;
use crate::text::{render_printable, DUMP_PLACEHOLDER};

/// Bytes per dump row
pub const ROW_WIDTH: usize = 16;

/// Hex column width when the ASCII column follows (three columns per byte)
const HEX_COLUMN_WIDTH: usize = ROW_WIDTH * 3;

const RULE_WIDTH: usize = 80;

const EMPTY_MARKER: &str = "  (empty)";

/// Which columns a dump shows.
///
/// With both flags off only the offsets are printed; choosing a useful
/// default is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    pub show_hex: bool,
    pub show_ascii: bool,
}

impl DumpOptions {
    pub fn hex() -> Self {
        Self {
            show_hex: true,
            show_ascii: false,
        }
    }

    pub fn ascii() -> Self {
        Self {
            show_hex: false,
            show_ascii: true,
        }
    }

    pub fn both() -> Self {
        Self {
            show_hex: true,
            show_ascii: true,
        }
    }
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self::hex()
    }
}

/// Render the selected chunks.
///
/// `indices` of `None` means every chunk in order. Indices past the end of
/// `chunks` are skipped.
pub fn render_dump(chunks: &[Chunk], indices: Option<&[usize]>, options: DumpOptions) -> String {
    let mut lines = Vec::new();

    let selected: Vec<usize> = match indices {
        Some(indices) => indices.to_vec(),
        None => (0..chunks.len()).collect(),
    };

    for index in selected {
        let Some(chunk) = chunks.get(index) else {
            continue;
        };
        render_chunk(index, chunk, options, &mut lines);
    }

    lines.join("\n")
}

fn render_chunk(index: usize, chunk: &Chunk, options: DumpOptions, lines: &mut Vec<String>) {
    let header = chunk.header();
    lines.push(format!(
        "Chunk [{}] Type: {}, Length: {}, Aux: {}",
        index,
        header.type_name(),
        header.length,
        header.aux_data
    ));
    lines.push("-".repeat(RULE_WIDTH));

    let payload = chunk.payload();
    if payload.is_empty() {
        lines.push(EMPTY_MARKER.to_string());
    } else {
        for (row, bytes) in payload.chunks(ROW_WIDTH).enumerate() {
            lines.push(render_row(row * ROW_WIDTH, bytes, options));
        }
    }

    lines.push(String::new());
}

fn render_row(offset: usize, bytes: &[u8], options: DumpOptions) -> String {
    let mut parts = vec![format!("{offset:04x}:")];

    if options.show_hex {
        let hex = bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        if options.show_ascii {
            parts.push(format!("{:<width$}", hex, width = HEX_COLUMN_WIDTH));
            parts.push("|".to_string());
        } else {
            parts.push(hex);
        }
    }

    if options.show_ascii {
        parts.push(render_printable(bytes, DUMP_PLACEHOLDER));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkKind;

    fn data_chunk(payload: &[u8]) -> Chunk {
        Chunk::of_kind(ChunkKind::Data, 0, payload.to_vec()).unwrap()
    }

    fn row_lines(dump: &str) -> Vec<&str> {
        dump.lines().filter(|l| l.len() >= 5 && l.as_bytes()[4] == b':').collect()
    }

    #[test]
    fn test_empty_payload() {
        let dump = render_dump(&[data_chunk(&[])], None, DumpOptions::both());
        assert!(dump.contains("(empty)"));
        assert!(row_lines(&dump).is_empty());
    }

    #[test]
    fn test_sixteen_bytes_one_row() {
        let payload: Vec<u8> = (0..16).collect();
        let dump = render_dump(&[data_chunk(&payload)], None, DumpOptions::hex());
        let rows = row_lines(&dump);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            "0000: 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f"
        );
    }

    #[test]
    fn test_seventeen_bytes_two_rows() {
        let payload: Vec<u8> = (0..17).collect();
        let dump = render_dump(&[data_chunk(&payload)], None, DumpOptions::hex());
        let rows = row_lines(&dump);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], "0010: 10");
    }

    #[test]
    fn test_ascii_column_aligned() {
        let payload: Vec<u8> = b"ABCDEFGHIJKLMNOPQR\x00".to_vec();
        let dump = render_dump(&[data_chunk(&payload)], None, DumpOptions::both());
        let rows = row_lines(&dump);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].find('|'), rows[1].find('|'));
        assert!(rows[0].ends_with("| ABCDEFGHIJKLMNOP"));
        assert!(rows[1].ends_with("| QR."));
    }

    #[test]
    fn test_ascii_only() {
        let dump = render_dump(&[data_chunk(b"hi\xff")], None, DumpOptions::ascii());
        assert_eq!(row_lines(&dump), vec!["0000: hi."]);
    }

    #[test]
    fn test_full_layout() {
        let chunk = Chunk::of_kind(ChunkKind::Fuji, 0, b"Test Tape".to_vec()).unwrap();
        let dump = render_dump(&[chunk], None, DumpOptions::both());
        let expected = format!(
            "Chunk [0] Type: FUJI, Length: 9, Aux: 0\n{}\n0000: {:<48} | Test Tape\n",
            "-".repeat(80),
            "54 65 73 74 20 54 61 70 65"
        );
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_selection_and_skipping() {
        let chunks = vec![data_chunk(b"a"), data_chunk(b"b"), data_chunk(b"c")];
        let dump = render_dump(&chunks, Some(&[2, 7, 0][..]), DumpOptions::ascii());
        let headers: Vec<&str> = dump.lines().filter(|l| l.starts_with("Chunk")).collect();
        assert_eq!(headers.len(), 2);
        assert!(headers[0].starts_with("Chunk [2]"));
        assert!(headers[1].starts_with("Chunk [0]"));
    }

    #[test]
    fn test_chunks_separated_by_blank_line() {
        let chunks = vec![data_chunk(b"a"), data_chunk(b"b")];
        let dump = render_dump(&chunks, None, DumpOptions::hex());
        assert!(dump.contains("0000: 61\n\nChunk [1]"));
    }

    #[test]
    fn test_nothing_selected() {
        assert_eq!(render_dump(&[], None, DumpOptions::hex()), "");
    }
}
