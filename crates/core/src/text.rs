//! Byte-to-text helpers that never fail.
//!
//! Tape descriptions are usually ASCII but nothing stops a tool from writing
//! arbitrary bytes into a `FUJI` chunk, and chunk type codes are four raw bytes.
//! Everything here degrades to a lossy rendering instead of returning an error.

/// Character substituted for non-printable bytes in type codes.
pub const TYPE_PLACEHOLDER: char = '?';

/// Character substituted for non-printable bytes in ASCII dump columns.
pub const DUMP_PLACEHOLDER: char = '.';

/// Returns true for printable ASCII (0x20..=0x7E).
#[inline]
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

/// Decode bytes as UTF-8, falling back to Latin-1 when they are not valid UTF-8.
///
/// Latin-1 maps every byte value to the code point of the same number, so the
/// fallback cannot fail.
pub fn decode_permissive(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Render bytes as printable ASCII, replacing anything else with `placeholder`.
pub fn render_printable(bytes: &[u8], placeholder: char) -> String {
    bytes
        .iter()
        .map(|&b| if is_printable(b) { char::from(b) } else { placeholder })
        .collect()
}
