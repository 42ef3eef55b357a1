//! Path data tokenizer.
//!
//! Splits a `d` attribute into command letters and numeric arguments.
//! Separators produce no tokens, and numbers may touch each other or the
//! next command letter.

use super::number::{is_separator, read_flag, read_float, starts_number};
use crate::error::PathError;

/// Letters accepted in command position (uppercase absolute, lowercase relative).
pub const COMMAND_LETTERS: &[u8] = b"MmLlHhVvCcSsQqTtAaZz";

/// A path data token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A command letter such as `M` or `c`.
    Command(char),
    /// The source text of one numeric argument.
    Number(&'a str),
}

/// A token with the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Spanned<'a> {
    pub token: Token<'a>,
    pub at: usize,
}

/// Tokenizes path data.
///
/// Arguments of the elliptical-arc command at positions 3 and 4 of each
/// 7-argument group (the large-arc and sweep flags) are always read as a
/// single character, so `"A1,1,0,10,5,5"` yields the flags `1` and `0`
/// followed by `5,5`.
///
/// # Errors
///
/// - [`PathError::UnknownPathCommand`] for a letter that is not a command.
/// - [`PathError::MalformedNumber`] for anything else that cannot be read.
///
/// # Example
///
/// ```
/// use svgspline::path::{tokenize, Token};
///
/// let tokens = tokenize("M0,0L10-5").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Command('M'),
///         Token::Number("0"),
///         Token::Number("0"),
///         Token::Command('L'),
///         Token::Number("10"),
///         Token::Number("-5"),
///     ]
/// );
/// ```
pub fn tokenize(data: &str) -> Result<Vec<Token<'_>>, PathError> {
    Ok(tokenize_spanned(data)?.into_iter().map(|s| s.token).collect())
}

pub(crate) fn tokenize_spanned(data: &str) -> Result<Vec<Spanned<'_>>, PathError> {
    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut command: Option<u8> = None;
    let mut arg_index = 0usize;
    let mut pos = 0usize;

    while pos < bytes.len() {
        let c = bytes[pos];

        if is_separator(c) {
            pos += 1;
            continue;
        }

        if COMMAND_LETTERS.contains(&c) {
            tokens.push(Spanned {
                token: Token::Command(c as char),
                at: pos,
            });
            command = Some(c);
            arg_index = 0;
            pos += 1;
            continue;
        }

        if starts_number(c) {
            let in_flag = matches!(command, Some(b'A') | Some(b'a')) && matches!(arg_index % 7, 3 | 4);
            let (text, end) = if in_flag {
                read_flag(data, pos)?
            } else {
                read_float(data, pos)?
            };
            tokens.push(Spanned {
                token: Token::Number(text),
                at: pos,
            });
            arg_index += 1;
            pos = end;
            continue;
        }

        // Non-ASCII input is reported by character, not by byte.
        let letter = data[pos..].chars().next().unwrap_or('\u{fffd}');
        if letter.is_alphabetic() {
            return Err(PathError::UnknownPathCommand { letter });
        }
        return Err(PathError::MalformedNumber { at: pos });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens
            .iter()
            .filter_map(|t| match t {
                Token::Number(n) => Some(*n),
                Token::Command(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  ,\n ").unwrap().is_empty());
    }

    #[test]
    fn test_commands_and_numbers() {
        let tokens = tokenize("M 10,20 l-5.5.5 z").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Command('M'),
                Token::Number("10"),
                Token::Number("20"),
                Token::Command('l'),
                Token::Number("-5.5"),
                Token::Number(".5"),
                Token::Command('z'),
            ]
        );
    }

    #[test]
    fn test_arc_flags_without_separators() {
        let spaced = tokenize("A 10 10 0 1 0 20 20").unwrap();
        let packed = tokenize("A10,10,0,1,0,20,20").unwrap();
        assert_eq!(spaced, packed);
    }

    #[test]
    fn test_arc_flags_glued_to_coordinates() {
        let tokens = tokenize("a5,5 0 1,01,50,50").unwrap();
        assert_eq!(numbers(&tokens), vec!["5", "5", "0", "1", "0", "1", "50", "50"]);
    }

    #[test]
    fn test_arc_flags_in_repeated_group() {
        let tokens = tokenize("A1 1 0 0 1 2 2 1 1 0 11 3 3").unwrap();
        assert_eq!(
            numbers(&tokens),
            vec!["1", "1", "0", "0", "1", "2", "2", "1", "1", "0", "1", "1", "3", "3"]
        );
    }

    #[test]
    fn test_flag_position_only_applies_to_arcs() {
        let tokens = tokenize("L 1 2 3 10 5").unwrap();
        assert_eq!(numbers(&tokens), vec!["1", "2", "3", "10", "5"]);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            tokenize("M 0 0 X 10 10"),
            Err(PathError::UnknownPathCommand { letter: 'X' })
        );
    }

    #[test]
    fn test_garbage_is_malformed_number() {
        assert_eq!(tokenize("M 0 # 1"), Err(PathError::MalformedNumber { at: 4 }));
        assert_eq!(tokenize("M 0 - 1"), Err(PathError::MalformedNumber { at: 4 }));
    }

    #[test]
    fn test_bad_flag() {
        assert_eq!(
            tokenize("A 1 1 0 2 0 5 5"),
            Err(PathError::MalformedNumber { at: 8 })
        );
    }

    #[test]
    fn test_spans() {
        let spanned = tokenize_spanned("M1 22").unwrap();
        let offsets: Vec<usize> = spanned.iter().map(|s| s.at).collect();
        assert_eq!(offsets, vec![0, 1, 3]);
    }
}
