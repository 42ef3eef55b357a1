//! Error types for path and document parsing.

use thiserror::Error;

/// Errors that abort parsing of a single path or shape.
///
/// Every variant is scoped to one call: a failing `<path>` never poisons
/// the shapes parsed before or after it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// No float could be matched at the given byte offset.
    #[error("malformed number at offset {at}")]
    MalformedNumber {
        /// Byte offset into the input.
        at: usize,
    },

    /// A letter in command position is not a supported path command.
    #[error("unknown path command '{letter}'")]
    UnknownPathCommand {
        /// The offending character.
        letter: char,
    },

    /// A command's argument group ended before all arguments were read.
    #[error("command '{command}' is missing arguments at offset {at}")]
    MissingArguments {
        /// The command being read.
        command: char,
        /// Byte offset where the next argument was expected.
        at: usize,
    },

    /// Numeric data appeared before any command letter.
    #[error("number at offset {at} is not preceded by a command")]
    MissingCommand {
        /// Byte offset of the stray number.
        at: usize,
    },
}

/// Errors that prevent a whole document from being imported.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input is not well-formed XML.
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not `<svg>`.
    #[error("root element is <{0}>, expected <svg>")]
    NotSvg(String),
}
