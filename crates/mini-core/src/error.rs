//! Error types for MINI parsing, writing and tree access.

use std::path::PathBuf;
use thiserror::Error;

/// The specific cause of a failure. Every fallible operation in mini-core
/// reports exactly one of these, wrapped in a [`MiniError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Tree consistency
    #[error("key not present")]
    KeyNotPresent,
    #[error("key already present")]
    KeyAlreadyPresent,
    #[error("section not present")]
    SectionNotPresent,
    #[error("section already present")]
    SectionAlreadyPresent,
    #[error("value has a different data type")]
    InvalidDataType,

    // I/O
    #[error("file could not be read or written")]
    FileIo,

    // Value encoding
    #[error("array elements have different data types")]
    ArrayDataTypeInconsistency,
    #[error("'\\' at end of string")]
    BadEscapeSequence,
    #[error("unknown escape sequence")]
    UnknownEscapeSequence,
    #[error("unescaped '\"' inside string value")]
    UnescapedStringValue,
    #[error("empty value")]
    ValueEmpty,
    #[error("invalid integer value")]
    IntegerValueInvalid,
    #[error("integer value out of range")]
    IntegerValueOutOfRange,
    #[error("invalid float value")]
    FloatValueInvalid,
    #[error("invalid boolean value (only lowercase true and false)")]
    BooleanValueInvalid,
    #[error("array value must be enclosed in []")]
    ArrayNotEnclosed,
    #[error("array brackets are not balanced")]
    ArrayBracketsInbalanced,
    #[error("expected '\"' at the end of the value")]
    MissingQuote,
    #[error("arrays nested too deeply")]
    ArrayNestingTooDeep,

    // Naming
    #[error("invalid name (may only contain [A-Za-z0-9_])")]
    InvalidName,
    #[error("comment must be a single line starting with '#'")]
    InvalidComment,

    // Structure
    #[error("expected ']' at the end of the line")]
    SectionExpectedClosingBracket,
    #[error("empty section name")]
    EmptySectionName,
    #[error("key-value pair before any section")]
    KeyValuePairNotInSection,
    #[error("expected '=' in line")]
    ExpectedKeyValuePair,
    #[error("empty key")]
    KeyEmpty,
}

/// Errors returned by mini-core operations.
#[derive(Error, Debug)]
pub enum MiniError {
    /// A file could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input text was not valid MINI. `line` is 1-based.
    #[error("MINI parse error at line {line}: {kind}")]
    Syntax { line: usize, kind: ErrorKind },

    /// A value, name or tree operation failed outside of line-oriented parsing.
    #[error("{0}")]
    Invalid(#[from] ErrorKind),
}

impl MiniError {
    /// The error code, regardless of where the error was raised.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MiniError::Io { .. } => ErrorKind::FileIo,
            MiniError::Syntax { kind, .. } => *kind,
            MiniError::Invalid(kind) => *kind,
        }
    }

    /// The 1-based line for parse errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            MiniError::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Successful result of an insertion into a [`Section`](crate::Section).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The name was free and the value or section was inserted.
    Success,
    /// An existing value or section was replaced (only with `allow_overwrite`).
    ValueOverwritten,
}

/// Convenience alias used throughout mini-core.
pub type Result<T> = std::result::Result<T, MiniError>;
