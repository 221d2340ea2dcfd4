//! Error types for parsing and tree access.
//!
//! Every error is fatal to the call that produced it. The parser never
//! returns a partial tree.

use std::fmt;

use crate::value::Kind;

/// Error codes for parse errors.
///
/// A fieldless enum keeps `ParseError` small and `Copy`; the human-readable
/// text comes from [`ParseErrorCode::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParseErrorCode {
    /// No significant character left where a value or delimiter was expected
    UnexpectedEnd = 0,
    /// Lookahead does not start any value
    UnexpectedChar,
    /// `null`, `true` or `false` misspelled or followed by identifier chars
    MalformedLiteral,
    /// Missing digits before or after the decimal point
    InvalidNumber,
    /// No unescaped closing quote
    UnterminatedString,
    /// List item not followed by `,` or `]`
    ExpectedCommaOrBracket,
    /// Dict entry not followed by `,` or `}`
    ExpectedCommaOrBrace,
    /// Dict key not followed by `:`
    ExpectedColon,
    /// Dict key is not a string
    KeyNotString,
    /// Unknown escape, bad `\u` hex digits, or lone surrogate
    InvalidEscape,
    /// Non-comment content after the root value
    TrailingContent,
    /// Lists and dicts nested deeper than the configured limit
    DepthLimitExceeded,
}

impl ParseErrorCode {
    /// Get a human-readable message for this error code.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnexpectedEnd => "unexpected end of input",
            Self::UnexpectedChar => "unexpected character",
            Self::MalformedLiteral => "malformed literal",
            Self::InvalidNumber => "invalid number",
            Self::UnterminatedString => "unterminated string",
            Self::ExpectedCommaOrBracket => "expected ',' or ']' in list",
            Self::ExpectedCommaOrBrace => "expected ',' or '}' in dict",
            Self::ExpectedColon => "expected ':' in dict",
            Self::KeyNotString => "dict key is not a string",
            Self::InvalidEscape => "invalid escape sequence",
            Self::TrailingContent => "trailing content after value",
            Self::DepthLimitExceeded => "nesting depth limit exceeded",
        }
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error returned when parsing fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub code: ParseErrorCode,
    /// Byte offset into the input where the error was detected.
    pub offset: usize,
}

impl ParseError {
    pub(crate) fn new(code: ParseErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.code.message(), self.offset)
    }
}

impl std::error::Error for ParseError {}

/// Error returned by typed or container access on a [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Typed access against a different active tag.
    TypeMismatch { expected: Kind, found: Kind },
    /// Keyed operation on a non-dict.
    NotADict(Kind),
    /// Append/remove-last on a non-list.
    NotAList(Kind),
    /// Typed keyed read of a key that is not present.
    MissingKey(String),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::NotADict(found) => write!(f, "not a dict: found {found}"),
            Self::NotAList(found) => write!(f, "not a list: found {found}"),
            Self::MissingKey(key) => write!(f, "missing key {key:?}"),
        }
    }
}

impl std::error::Error for AccessError {}

/// Either failure of the one-call conversion helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Parse(ParseError),
    Access(AccessError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::Access(err) => write!(f, "access error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Access(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        Self::Access(err)
    }
}
