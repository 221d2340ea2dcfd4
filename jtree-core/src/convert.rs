//! Conversions between native types and [`Value`] trees.
//!
//! Record types map their fields onto dict keys by implementing
//! [`ToValue`] and [`FromValue`]:
//!
//! ```
//! use jtree_core::{from_str, to_string_of, AccessError, FromValue, ToValue, Value};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl ToValue for Point {
//!     fn to_value(&self) -> Value {
//!         let mut v = Value::dict();
//!         v["x"] = self.x.to_value();
//!         v["y"] = self.y.to_value();
//!         v
//!     }
//! }
//!
//! impl FromValue for Point {
//!     fn from_value(value: &Value) -> Result<Self, AccessError> {
//!         Ok(Point { x: value.field("x")?, y: value.field("y")? })
//!     }
//! }
//!
//! let p: Point = from_str(r#"{"y": 2, "x": 1}"#).unwrap();
//! assert_eq!(to_string_of(&p), r#"{"x":1,"y":2}"#);
//! ```

use std::collections::BTreeMap;

use crate::error::{AccessError, Error};
use crate::parser::parse;
use crate::serialize::to_string;
use crate::value::{Kind, Value};

/// Build a [`Value`] from a native value.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Read a native value out of a [`Value`], failing on a tag mismatch.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, AccessError>;
}

/// Serialize anything convertible to a [`Value`].
pub fn to_string_of<T: ToValue + ?Sized>(value: &T) -> String {
    to_string(&value.to_value())
}

/// Parse `input` and convert the tree to `T`.
pub fn from_str<T: FromValue>(input: &str) -> Result<T, Error> {
    let value = parse(input)?;
    Ok(T::from_value(&value)?)
}

impl Value {
    /// Read and convert the dict entry at `key`.
    pub fn field<T: FromValue>(&self, key: &str) -> Result<T, AccessError> {
        match self {
            Value::Dict(entries) => {
                let item = entries.get(key).ok_or_else(|| AccessError::MissingKey(key.to_owned()))?;
                T::from_value(item)
            }
            other => Err(AccessError::NotADict(other.kind())),
        }
    }
}

fn mismatch(expected: Kind, value: &Value) -> AccessError {
    AccessError::TypeMismatch { expected, found: value.kind() }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, AccessError> {
        Ok(value.clone())
    }
}

macro_rules! scalar {
    ($ty:ty, $variant:ident) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }

        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, AccessError> {
                match value {
                    Value::$variant(inner) => Ok(inner.clone()),
                    other => Err(mismatch(Kind::$variant, other)),
                }
            }
        }
    };
}

scalar!(bool, Bool);
scalar!(i32, Int);
scalar!(f64, Float);
scalar!(String, String);

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, AccessError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, AccessError> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(mismatch(Kind::List, other)),
        }
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Dict(self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: &Value) -> Result<Self, AccessError> {
        match value {
            Value::Dict(entries) => entries
                .iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
            other => Err(mismatch(Kind::Dict, other)),
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}
