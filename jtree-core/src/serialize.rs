//! Compact text output for a [`Value`] tree.
//!
//! Output has no insignificant whitespace. Dict entries come out in key
//! order, and floats always carry a decimal point so they read back as
//! floats.

use std::fmt;

use crate::escape::write_quoted;
use crate::value::Value;

/// Serialize `value` to a new string.
///
/// ```
/// use jtree_core::{parse, to_string};
///
/// let v = parse(r#"{"b": 1, "a": [2.0, "x"]}"#).unwrap();
/// assert_eq!(to_string(&v), r#"{"a":[2.0,"x"],"b":1}"#);
/// ```
pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_value(&mut out, value);
    out
}

/// Serialize `value` into any [`fmt::Write`] sink.
pub fn write_value<W: fmt::Write + ?Sized>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Bool(true) => out.write_str("true"),
        Value::Bool(false) => out.write_str("false"),
        Value::Int(i) => write!(out, "{i}"),
        Value::Float(x) => write_float(out, *x),
        Value::String(s) => write_quoted(out, s),
        Value::List(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, item)?;
            }
            out.write_char(']')
        }
        Value::Dict(entries) => {
            out.write_char('{')?;
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_quoted(out, key)?;
                out.write_char(':')?;
                write_value(out, item)?;
            }
            out.write_char('}')
        }
    }
}

/// Shortest decimal that reads back to the same `f64`, never in exponent
/// form (the grammar has none). Integral values get a `.0` suffix.
/// NaN and infinities have no literal and are written as `null`.
fn write_float<W: fmt::Write + ?Sized>(out: &mut W, x: f64) -> fmt::Result {
    if !x.is_finite() {
        return out.write_str("null");
    }
    if x.fract() == 0.0 {
        write!(out, "{x:.1}")
    } else {
        write!(out, "{x}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self)
    }
}
