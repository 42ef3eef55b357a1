//! Float scanning for the path and coordinate micro-grammars.
//!
//! Tokens may be glued together without separators (`"1-2.5.5e1"` is three
//! numbers), so the reader always takes the longest valid prefix and reports
//! where it stopped.

use crate::error::PathError;

/// Returns true for characters that only separate numbers.
#[inline]
pub(crate) fn is_separator(c: u8) -> bool {
    c == b',' || c.is_ascii_whitespace()
}

/// Returns true if `c` can begin a number.
#[inline]
pub(crate) fn starts_number(c: u8) -> bool {
    c.is_ascii_digit() || c == b'-' || c == b'+' || c == b'.'
}

/// Skips one run of separators starting at `pos`.
#[inline]
pub(crate) fn skip_separators(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_separator(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// Reads one float token from `text` starting at byte offset `start`.
///
/// Leading separators (whitespace, commas) are skipped, then the longest
/// prefix matching `[-+]?(digits[.digits?]|.digits)([eE][-+]?digits)?` is
/// taken. An exponent marker without digits after it is left unread.
///
/// Returns the token text and the offset just past it.
///
/// # Errors
///
/// [`PathError::MalformedNumber`] if no float starts at the cursor.
///
/// # Example
///
/// ```
/// use svgspline::path::read_float;
///
/// let (token, end) = read_float("10-2.5e1,3", 0).unwrap();
/// assert_eq!((token, end), ("10", 2));
/// let (token, end) = read_float("10-2.5e1,3", end).unwrap();
/// assert_eq!((token, end), ("-2.5e1", 8));
/// let (token, _) = read_float("10-2.5e1,3", end).unwrap();
/// assert_eq!(token, "3");
/// ```
pub fn read_float(text: &str, start: usize) -> Result<(&str, usize), PathError> {
    let bytes = text.as_bytes();
    let begin = skip_separators(bytes, start);
    let mut pos = begin;

    if pos < bytes.len() && (bytes[pos] == b'-' || bytes[pos] == b'+') {
        pos += 1;
    }

    let int_end = skip_digits(bytes, pos);
    let has_int = int_end > pos;
    pos = int_end;

    let mut has_frac = false;
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_end = skip_digits(bytes, pos + 1);
        has_frac = frac_end > pos + 1;
        // "5." is a number, a lone "." is not.
        if has_int || has_frac {
            pos = frac_end;
        }
    }

    if !has_int && !has_frac {
        return Err(PathError::MalformedNumber { at: begin });
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'-' || bytes[exp] == b'+') {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            pos = exp_end;
        }
    }

    Ok((&text[begin..pos], pos))
}

/// Reads one elliptical-arc flag: exactly one character, `0` or `1`.
///
/// Flags are routinely written without separators (`"1,01,50,50"`), so the
/// general float grammar must not be used for them.
///
/// # Errors
///
/// [`PathError::MalformedNumber`] if the character is not `0` or `1`.
pub fn read_flag(text: &str, start: usize) -> Result<(&str, usize), PathError> {
    let bytes = text.as_bytes();
    let pos = skip_separators(bytes, start);
    match bytes.get(pos) {
        Some(b'0') | Some(b'1') => Ok((&text[pos..pos + 1], pos + 1)),
        _ => Err(PathError::MalformedNumber { at: pos }),
    }
}

/// Reads every float in `text`, e.g. a `points` or `viewBox` list.
///
/// # Errors
///
/// [`PathError::MalformedNumber`] at the first unreadable position.
pub fn read_float_list(text: &str) -> Result<Vec<f64>, PathError> {
    let bytes = text.as_bytes();
    let mut values = Vec::new();
    let mut pos = skip_separators(bytes, 0);
    while pos < bytes.len() {
        let (token, end) = read_float(text, pos)?;
        let value = token
            .parse::<f64>()
            .map_err(|_| PathError::MalformedNumber { at: pos })?;
        values.push(value);
        pos = skip_separators(bytes, end);
    }
    Ok(values)
}
