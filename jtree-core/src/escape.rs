//! Backslash escapes inside quoted strings.
//!
//! Decoding turns the raw bytes between two quotes into string content.
//! Encoding is the inverse used by the serializer; it escapes exactly what
//! would otherwise break the quoted form.

use std::borrow::Cow;
use std::fmt;

use memchr::memchr;
use phf::phf_map;

use crate::error::{ParseError, ParseErrorCode};

/// Single-character escapes: the byte after `\` and what it stands for.
static SIMPLE_ESCAPES: phf::Map<u8, char> = phf_map! {
    b'"' => '"',
    b'\\' => '\\',
    b'/' => '/',
    b'b' => '\u{08}',
    b'f' => '\u{0C}',
    b'n' => '\n',
    b'r' => '\r',
    b't' => '\t',
};

/// Decode escapes in `raw`, the content between the delimiting quotes.
///
/// `base` is the byte offset of `raw` within the parser input; it is only
/// used to position errors. Content without a backslash is borrowed.
pub(crate) fn decode(raw: &str, base: usize) -> Result<Cow<'_, str>, ParseError> {
    let bytes = raw.as_bytes();
    let Some(first) = memchr(b'\\', bytes) else {
        return Ok(Cow::Borrowed(raw));
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first]);

    let mut pos = first;
    while pos < bytes.len() {
        let Some(next) = memchr(b'\\', &bytes[pos..]) else {
            out.push_str(&raw[pos..]);
            break;
        };
        let slash = pos + next;
        out.push_str(&raw[pos..slash]);

        let invalid = || ParseError::new(ParseErrorCode::InvalidEscape, base + slash);
        let &tag = bytes.get(slash + 1).ok_or_else(invalid)?;

        if let Some(&ch) = SIMPLE_ESCAPES.get(&tag) {
            out.push(ch);
            pos = slash + 2;
            continue;
        }
        if tag != b'u' {
            return Err(invalid());
        }

        let high = hex4(bytes, slash + 2).ok_or_else(invalid)?;
        pos = slash + 6;
        let code = match high {
            0xD800..=0xDBFF => {
                // High surrogate must be followed by `\u` + low surrogate
                if bytes.get(pos) != Some(&b'\\') || bytes.get(pos + 1) != Some(&b'u') {
                    return Err(invalid());
                }
                let low = hex4(bytes, pos + 2).ok_or_else(invalid)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(invalid());
                }
                pos += 6;
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(invalid()),
            _ => high,
        };
        out.push(char::from_u32(code).ok_or_else(invalid)?);
    }

    Ok(Cow::Owned(out))
}

/// Read four hex digits starting at `at`.
fn hex4(bytes: &[u8], at: usize) -> Option<u32> {
    let digits = bytes.get(at..at + 4)?;
    digits.iter().try_fold(0u32, |acc, &b| {
        let digit = (b as char).to_digit(16)?;
        Some(acc * 16 + digit)
    })
}

/// Write `s` as a quoted string, escaping `"`, `\` and control characters.
pub(crate) fn write_quoted<W: fmt::Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;

    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escaped = match b {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x0C => "\\f",
            0x00..=0x1F => "",
            _ => continue,
        };
        out.write_str(&s[start..i])?;
        if escaped.is_empty() {
            write!(out, "\\u{:04x}", b)?;
        } else {
            out.write_str(escaped)?;
        }
        start = i + 1;
    }
    out.write_str(&s[start..])?;

    out.write_char('"')
}
