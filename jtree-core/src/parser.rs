//! Recursive-descent parser from text to a [`Value`] tree.
//!
//! The grammar is JSON plus `//` line comments, with two numeric types:
//! a literal with a decimal point is a float, anything else an `i32`.
//! Exponent notation is not part of the grammar.
//!
//! Each call builds its own [`Parser`]; nothing is shared between calls, so
//! independent parses may run on different threads.
//!
//! # Example
//!
//! ```
//! use jtree_core::{parse, Value};
//!
//! let doc = parse("// settings\n{\"retries\": 3, \"ratio\": 0.5}").unwrap();
//! assert_eq!(doc["retries"], Value::Int(3));
//! assert_eq!(doc["ratio"], Value::Float(0.5));
//! ```

use std::borrow::Cow;
use std::str::FromStr;

use memchr::memchr;
use unicode_xid::UnicodeXID;

use crate::error::{ParseError, ParseErrorCode};
use crate::escape;
use crate::trace::{debug, trace};
use crate::value::{Dict, List, Value};

/// How quoted string content is turned into a [`Value::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringMode {
    /// Interpret backslash escapes (`\n`, `\"`, `\u00e9`, ...).
    #[default]
    Decode,

    /// Keep the bytes between the quotes verbatim, backslashes included.
    ///
    /// Serializing such a string escapes the backslashes again, so a
    /// parse/serialize round trip is only stable for strings without
    /// escapes.
    Raw,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip `//` line comments between tokens.
    pub comments: bool,
    pub strings: StringMode,
    /// Maximum nesting of lists and dicts.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_strings(mut self, strings: StringMode) -> Self {
        self.strings = strings;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            comments: true,
            strings: StringMode::Decode,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse `input` with default options.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    Parser::new(input).parse()
}

/// Parse `input` with explicit options.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    Parser::with_options(input, *options).parse()
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Whitespace as classified by C `isspace`.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Parser state for a single document: the input and a byte cursor.
///
/// [`Parser::parse`] consumes the parser, so a state is never reused.
#[derive(Debug)]
pub struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        // Trailing whitespace is dropped so running out of input means
        // running out of significant characters.
        let src = input.trim_end_matches(|c: char| c.is_ascii() && is_space(c as u8));
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Parse the whole input as one value.
    #[cfg_attr(not(any(test, feature = "tracing")), allow(unused_variables))]
    pub fn parse(mut self) -> Result<Value, ParseError> {
        let result = self.parse_document();
        match &result {
            Ok(value) => {
                trace!(bytes = self.bytes.len(), kind = %value.kind(), "parsed document");
            }
            Err(err) => {
                debug!(code = ?err.code, offset = err.offset, "parse failed");
            }
        }
        result
    }

    fn parse_document(&mut self) -> Result<Value, ParseError> {
        let value = self.parse_value()?;
        self.skip_insignificant();
        if self.pos < self.bytes.len() {
            return Err(self.error(ParseErrorCode::TrailingContent));
        }
        Ok(value)
    }

    #[inline]
    fn error(&self, code: ParseErrorCode) -> ParseError {
        ParseError::new(code, self.pos)
    }

    /// Skip whitespace and any run of line comments.
    fn skip_insignificant(&mut self) {
        loop {
            while self.bytes.get(self.pos).copied().is_some_and(is_space) {
                self.pos += 1;
            }
            if !self.options.comments || !self.bytes[self.pos..].starts_with(b"//") {
                return;
            }
            self.pos = match memchr(b'\n', &self.bytes[self.pos..]) {
                Some(newline) => self.pos + newline + 1,
                None => self.bytes.len(),
            };
        }
    }

    /// The next significant byte, not consumed.
    fn peek(&mut self) -> Result<u8, ParseError> {
        self.skip_insignificant();
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.error(ParseErrorCode::UnexpectedEnd))
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek()? {
            b'n' => self.parse_literal(b"null", Value::Null),
            b't' => self.parse_literal(b"true", Value::Bool(true)),
            b'f' => self.parse_literal(b"false", Value::Bool(false)),
            b'-' | b'0'..=b'9' => self.parse_number(),
            b'"' => self.parse_string().map(Value::String),
            b'[' => self.parse_list(),
            b'{' => self.parse_dict(),
            _ => Err(self.error(ParseErrorCode::UnexpectedChar)),
        }
    }

    /// Match `literal` exactly; `truee` or `nullable` is not `true`/`null`.
    fn parse_literal(&mut self, literal: &[u8], value: Value) -> Result<Value, ParseError> {
        let end = self.pos + literal.len();
        let matches = self.bytes[self.pos..].starts_with(literal)
            && !self.src[end..].chars().next().is_some_and(|c| c.is_xid_continue());
        if !matches {
            return Err(self.error(ParseErrorCode::MalformedLiteral));
        }
        self.pos = end;
        Ok(value)
    }

    /// Consume a run of ASCII digits, returning how many there were.
    fn eat_digits(&mut self) -> usize {
        let run = self.bytes[self.pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        self.pos += run;
        run
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let negative = self.bytes[start] == b'-';
        if negative {
            self.pos += 1;
        }

        let digits_start = self.pos;
        if self.eat_digits() == 0 {
            return Err(self.error(ParseErrorCode::InvalidNumber));
        }

        if self.bytes.get(self.pos) != Some(&b'.') {
            let digits = &self.bytes[digits_start..self.pos];
            return Ok(Value::Int(truncate_integer(digits, negative)));
        }

        self.pos += 1;
        if self.eat_digits() == 0 {
            return Err(self.error(ParseErrorCode::InvalidNumber));
        }

        // A literal beyond f64 range is an error, not infinity
        match self.src[start..self.pos].parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Value::Float(x)),
            _ => Err(ParseError::new(ParseErrorCode::InvalidNumber, start)),
        }
    }

    /// Parse a quoted string. The cursor is on the opening quote.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let open = self.pos;
        let start = open + 1;

        let mut search = start;
        let end = loop {
            let Some(offset) = memchr(b'"', &self.bytes[search..]) else {
                return Err(ParseError::new(ParseErrorCode::UnterminatedString, open));
            };
            let quote = search + offset;
            // A quote preceded by an odd run of backslashes is escaped
            if trailing_backslashes(&self.bytes[start..quote]) % 2 == 0 {
                break quote;
            }
            search = quote + 1;
        };
        self.pos = end + 1;

        let raw = &self.src[start..end];
        match self.options.strings {
            StringMode::Raw => Ok(raw.to_owned()),
            StringMode::Decode => escape::decode(raw, start).map(Cow::into_owned),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error(ParseErrorCode::DepthLimitExceeded));
        }
        Ok(())
    }

    fn parse_list(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.pos += 1;

        let mut items = List::new();
        if self.peek()? == b']' {
            self.pos += 1;
        } else {
            loop {
                items.push(self.parse_value()?);
                match self.peek()? {
                    b',' => self.pos += 1,
                    b']' => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error(ParseErrorCode::ExpectedCommaOrBracket)),
                }
            }
        }

        self.depth -= 1;
        Ok(Value::List(items))
    }

    fn parse_dict(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.pos += 1;

        let mut entries = Dict::new();
        if self.peek()? == b'}' {
            self.pos += 1;
        } else {
            loop {
                self.peek()?;
                let key_at = self.pos;
                let Value::String(key) = self.parse_value()? else {
                    return Err(ParseError::new(ParseErrorCode::KeyNotString, key_at));
                };

                if self.peek()? != b':' {
                    return Err(self.error(ParseErrorCode::ExpectedColon));
                }
                self.pos += 1;

                let value = self.parse_value()?;
                entries.insert(key, value);

                match self.peek()? {
                    b',' => self.pos += 1,
                    b'}' => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error(ParseErrorCode::ExpectedCommaOrBrace)),
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Dict(entries))
    }
}

/// Number of consecutive backslashes at the end of `bytes`.
#[inline]
fn trailing_backslashes(bytes: &[u8]) -> usize {
    bytes.iter().rev().take_while(|&&b| b == b'\\').count()
}

/// Convert a decimal digit run to `i32` the way `(int) strtol(..)` does:
/// clamp to the 64-bit range, then keep the low 32 bits.
fn truncate_integer(digits: &[u8], negative: bool) -> i32 {
    let clamped = digits.iter().fold(0i64, |acc, &b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });
    clamped as i32
}
