//! Error types for parsing and tree inspection.
//!
//! Two independent failure kinds exist:
//!
//! - [`ParseError`] is raised by the parser when input text does not match
//!   the grammar. The first error aborts the parse; no partial tree is
//!   returned.
//! - [`TypeMismatch`] is raised by the `as_*` accessors on [`Node`] when the
//!   stored variant is not the one requested.
//!
//! [`Error`] wraps both so callers mixing parsing and inspection can use `?`
//! on either.
//!
//! [`Node`]: crate::Node

use std::io;

use thiserror::Error;

/// Failure raised while parsing JSON text.
///
/// Each variant carries enough context to produce a readable message and a
/// stable numeric [`code`](ParseError::code).
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input ended in the middle of a production.
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    /// A byte that cannot start or continue the current production.
    #[error("unexpected character {found:?} at offset {offset}, expected {expected}")]
    UnexpectedCharacter {
        /// The offending character (lossy for non-ASCII bytes).
        found: char,
        /// Byte offset of the character in the input.
        offset: u64,
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// Backslash followed by something other than `n t r " \`.
    #[error("unrecognized escape sequence \\{escape} at offset {offset}")]
    InvalidEscape {
        /// Character following the backslash.
        escape: char,
        /// Byte offset of the escaped character.
        offset: u64,
    },

    /// Raw LF or CR inside a string literal.
    #[error("line break inside string literal at offset {0}")]
    LineBreakInString(u64),

    /// String contents are not valid UTF-8.
    #[error("string ending at offset {0} is not valid UTF-8")]
    InvalidUtf8(u64),

    /// Number token missing a required digit or otherwise unconvertible.
    #[error("malformed number `{text}`: {reason}")]
    MalformedNumber {
        /// Text accumulated before the failure.
        text: String,
        /// What went wrong.
        reason: &'static str,
    },

    /// Bytes starting with `n`, `t` or `f` that do not spell a literal.
    #[error("unrecognized literal at offset {offset}, expected `{expected}`")]
    UnrecognizedLiteral {
        /// Literal the first byte announced.
        expected: &'static str,
        /// Byte offset where the literal began.
        offset: u64,
    },

    /// `[]` or `{}` under limits that reject empty containers.
    #[error("empty {0} is not allowed")]
    EmptyContainer(&'static str),

    /// Arrays and objects nested deeper than the configured limit.
    #[error("nesting depth {0} exceeds limit {1}")]
    NestingTooDeep(u64, u64),

    /// String literal longer than the configured limit.
    #[error("string length {0} exceeds limit {1}")]
    StringTooLong(u64, u64),

    /// Non-whitespace after the root value.
    #[error("trailing characters after document at offset {0}")]
    TrailingCharacters(u64),

    /// The underlying stream failed.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ParseError::UnexpectedEof(_) => 100,
            ParseError::UnexpectedCharacter { .. } => 101,
            ParseError::InvalidEscape { .. } => 102,
            ParseError::LineBreakInString(_) => 103,
            ParseError::InvalidUtf8(_) => 104,
            ParseError::MalformedNumber { .. } => 105,
            ParseError::UnrecognizedLiteral { .. } => 106,
            ParseError::EmptyContainer(_) => 107,
            ParseError::NestingTooDeep(..) => 108,
            ParseError::StringTooLong(..) => 109,
            ParseError::TrailingCharacters(_) => 110,
            ParseError::Io(_) => 111,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ParseError::UnexpectedEof(_) => "UnexpectedEof",
            ParseError::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ParseError::InvalidEscape { .. } => "InvalidEscape",
            ParseError::LineBreakInString(_) => "LineBreakInString",
            ParseError::InvalidUtf8(_) => "InvalidUtf8",
            ParseError::MalformedNumber { .. } => "MalformedNumber",
            ParseError::UnrecognizedLiteral { .. } => "UnrecognizedLiteral",
            ParseError::EmptyContainer(_) => "EmptyContainer",
            ParseError::NestingTooDeep(..) => "NestingTooDeep",
            ParseError::StringTooLong(..) => "StringTooLong",
            ParseError::TrailingCharacters(_) => "TrailingCharacters",
            ParseError::Io(_) => "Io",
        }
    }
}

/// Accessor called against a node holding a different variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("wrong type: expected {expected}, found {found}")]
pub struct TypeMismatch {
    /// Variant the caller asked for.
    pub expected: &'static str,
    /// Variant the node actually holds.
    pub found: &'static str,
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An accessor was called on the wrong variant.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
