//! Fixed-width field formatting.
//!
//! Every field in a NACHA record is built from one primitive: truncate a
//! value to the field width, or pad it to the field width. A space pad
//! left-justifies (text fields); any other pad right-justifies (zero-padded
//! numeric fields). `fit` truncates overlong values, which is acceptable
//! only for display text; identifier and numeric fields go through
//! `fit_exact`, where an overlong value is an error.

use crate::error::{NachaError, Result};

/// Every NACHA record is exactly this many characters.
pub const RECORD_LENGTH: usize = 94;

/// Renders `value` into a field of exactly `width` characters.
///
/// Values longer than the field are truncated on the right. Shorter values
/// are padded with `pad`: on the right for a space pad (left-justified), on
/// the left for anything else (right-justified).
///
/// # Examples
///
/// ```
/// use nacha::field::fit;
///
/// assert_eq!(fit("ACME", 6, ' '), "ACME  ");
/// assert_eq!(fit("42", 6, '0'), "000042");
/// assert_eq!(fit("OVERLONG", 4, ' '), "OVER");
/// ```
pub fn fit(value: &str, width: usize, pad: char) -> String {
    let truncated: String = value.chars().take(width).collect();
    let deficit = width - truncated.chars().count();
    if deficit == 0 {
        return truncated;
    }

    let padding: String = std::iter::repeat(pad).take(deficit).collect();
    if pad == ' ' {
        truncated + &padding
    } else {
        padding + &truncated
    }
}

/// Like [`fit`], but a value wider than the field is an error instead of a
/// silent truncation. `field` names the offending field in the error.
pub fn fit_exact(value: &str, width: usize, pad: char, field: &'static str) -> Result<String> {
    if value.chars().count() > width {
        return Err(NachaError::FieldOverflow {
            field,
            value: value.to_string(),
            width,
        });
    }
    Ok(fit(value, width, pad))
}

/// A run of `width` spaces (reserved/blank fields).
pub fn blank(width: usize) -> String {
    " ".repeat(width)
}

/// Asserts the structural invariant that an assembled record line is exactly
/// [`RECORD_LENGTH`] characters. A violation is a field-width programming
/// error, not bad input, so it panics rather than returning an error.
pub fn sealed(line: String) -> String {
    assert_eq!(
        line.chars().count(),
        RECORD_LENGTH,
        "record line must be {} characters: {:?}",
        RECORD_LENGTH,
        line
    );
    line
}
