//! Character offset extraction
//!
//! BRAT offsets count Unicode scalar values, not bytes. Annotation tools
//! that normalize `\r\n` to `\n` record offsets against the normalized
//! text, so carriage returns are skipped when counting: the same `.ann`
//! resolves identically against either line-ending convention.

use thiserror::Error;

/// Offset range rejected by [`substring`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("start position should be a positive number, received start position {0}")]
    NegativeStart(i64),

    #[error("end position should be greater than start position, received start {start} and end {end}")]
    EndBeforeStart { start: i64, end: i64 },

    #[error("end position should be lesser than length of the txt data, length of txt data: {len}, end position: {end}")]
    EndPastLength { len: usize, end: i64 },
}

/// Number of Unicode scalar values in `text`, carriage returns included
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Number of offset positions in `text`, i.e. scalar values other than `\r`
pub fn logical_len(text: &str) -> usize {
    text.chars().filter(|&c| c != '\r').count()
}

/// Extract the text between the character offsets `[start, end)`.
///
/// `\r` is consumed without advancing the position counter and never
/// appears in the result. The upper bound is checked against
/// [`char_len`], so an `end` between the logical and the raw length yields
/// a truncated result rather than an error.
pub fn substring(text: &str, start: i64, end: i64) -> Result<String, RangeError> {
    if start < 0 {
        return Err(RangeError::NegativeStart(start));
    }
    if end < start {
        return Err(RangeError::EndBeforeStart { start, end });
    }
    let len = char_len(text);
    if end as u64 > len as u64 {
        return Err(RangeError::EndPastLength { len, end });
    }

    let (start, end) = (start as usize, end as usize);
    let mut position = 0usize;
    let mut out = String::with_capacity(end - start);

    for c in text.chars() {
        if c == '\r' {
            continue;
        }
        if position >= end {
            break;
        }
        if position >= start {
            out.push(c);
        }
        position += 1;
    }

    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
