//! jtree Core
//!
//! Parses JSON with `//` line comments into a tree of tagged values, and
//! serializes trees back to compact JSON.
//!
//! # Architecture
//!
//! - **value.rs** - `Value` tagged union, `Kind` tags, typed and keyed access
//! - **parser.rs** - Recursive-descent parser and `ParseOptions`
//! - **escape.rs** - String escape decoding and quoting
//! - **serialize.rs** - Compact serializer
//! - **convert.rs** - `ToValue`/`FromValue` for mapping native types
//! - **error.rs** - `ParseError`, `AccessError`, `Error`
//!
//! # Example
//!
//! ```
//! use jtree_core::{parse, to_string, Value};
//!
//! let mut doc = parse("{\"name\": \"jtree\", // inline comment\n \"tags\": []}").unwrap();
//! doc["tags"].push("parser").unwrap();
//! doc["version"] = Value::Int(3);
//!
//! assert_eq!(to_string(&doc), r#"{"name":"jtree","tags":["parser"],"version":3}"#);
//! ```

mod escape;
mod trace;

pub mod convert;
pub mod error;
pub mod parser;
pub mod serialize;
pub mod value;

pub use convert::{from_str, to_string_of, FromValue, ToValue};
pub use error::{AccessError, Error, ParseError, ParseErrorCode};
pub use parser::{parse, parse_with, ParseOptions, Parser, StringMode};
pub use serialize::{to_string, write_value};
pub use value::{Dict, Kind, List, Payload, Value};
