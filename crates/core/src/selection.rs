//! Chunk selection strings such as `"0"`, `"1,3,5"`, `"0-5"` or `"1,3-7,10"`.

use std::collections::BTreeSet;

use crate::error::SelectionError;

/// Parse a selection string into sorted, deduplicated chunk indices.
///
/// Each comma-separated part is a single index or an inclusive `start-end`
/// range. Indices outside `0..max_count` are dropped silently, including ones
/// too large to represent, and a range with `start > end` selects nothing.
/// An empty string selects every index.
///
/// # Errors
/// - `SelectionError::InvalidIndex` if a single part is not a non-negative integer
/// - `SelectionError::InvalidRange` if either bound of a range is malformed
pub fn parse_chunk_selection(spec: &str, max_count: usize) -> Result<Vec<usize>, SelectionError> {
    if spec.is_empty() {
        return Ok((0..max_count).collect());
    }

    let mut indices = BTreeSet::new();

    for part in spec.split(',') {
        let part = part.trim();

        if let Some((start, end)) = part.split_once('-') {
            let start = parse_bound(start, part, "bad start")?;
            let end = parse_bound(end, part, "bad end")?;
            let (Bound::Index(start), end) = (start, end) else {
                continue;
            };
            let end = match end {
                Bound::Index(end) => end,
                Bound::Overflow => usize::MAX,
            };
            if start > end || start >= max_count {
                continue;
            }
            // Clamp so a huge end bound does not turn into a huge loop
            indices.extend(start..=end.min(max_count - 1));
        } else {
            let index = parse_integer(part).ok_or_else(|| SelectionError::InvalidIndex {
                token: part.to_string(),
            })?;
            if let Bound::Index(index) = index {
                if index < max_count {
                    indices.insert(index);
                }
            }
        }
    }

    Ok(indices.into_iter().collect())
}

/// A well-formed non-negative integer, possibly past `usize::MAX`.
enum Bound {
    Index(usize),
    Overflow,
}

fn parse_integer(token: &str) -> Option<Bound> {
    let digits = token.strip_prefix('+').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().map_or(Bound::Overflow, Bound::Index))
}

fn parse_bound(token: &str, part: &str, reason: &'static str) -> Result<Bound, SelectionError> {
    parse_integer(token.trim()).ok_or_else(|| SelectionError::InvalidRange {
        part: part.to_string(),
        reason,
    })
}
