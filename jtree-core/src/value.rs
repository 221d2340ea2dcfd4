//! The tagged value tree.
//!
//! A [`Value`] is one of exactly seven variants. Containers own their
//! children outright, so a tree is always acyclic and dropping a node drops
//! its whole subtree.
//!
//! Dict entries iterate in ascending key order. This is part of the
//! observable contract: the serializer writes dict entries in that order.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::AccessError;

/// Payload of a list value.
pub type List = Vec<Value>;

/// Payload of a dict value. Keys iterate in sorted order.
pub type Dict = BTreeMap<String, Value>;

/// The tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Dict,
}

impl Kind {
    /// Lower-case tag name, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::List => "list",
            Kind::Dict => "dict",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the parsed tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,

    /// `true` or `false`
    Bool(bool),

    /// Integer literal without a decimal point: `42`, `-5`
    Int(i32),

    /// Literal with a decimal point: `3.0`, `-0.25`
    Float(f64),

    /// Quoted string
    String(String),

    /// `[a, b, c]`
    List(List),

    /// `{"key": value}`
    Dict(Dict),
}

static NULL: Value = Value::Null;

impl Value {
    /// An empty list.
    #[inline]
    pub fn list() -> Self {
        Value::List(List::new())
    }

    /// An empty dict.
    #[inline]
    pub fn dict() -> Self {
        Value::Dict(Dict::new())
    }

    /// The active tag.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Dict(_) => Kind::Dict,
        }
    }

    /// Check if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as integer.
    #[inline]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float. Integers are not widened.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Typed reference to the payload.
    ///
    /// ```
    /// use jtree_core::{Value, Kind, AccessError};
    ///
    /// let v = Value::from(7);
    /// assert_eq!(v.get::<i32>(), Ok(&7));
    /// assert_eq!(
    ///     v.get::<String>(),
    ///     Err(AccessError::TypeMismatch { expected: Kind::String, found: Kind::Int })
    /// );
    /// ```
    pub fn get<T: Payload>(&self) -> Result<&T, AccessError> {
        T::from_value(self).ok_or_else(|| self.mismatch(T::KIND))
    }

    /// Typed mutable reference to the payload.
    pub fn get_mut<T: Payload>(&mut self) -> Result<&mut T, AccessError> {
        let found = self.kind();
        T::from_value_mut(self).ok_or(AccessError::TypeMismatch { expected: T::KIND, found })
    }

    /// Mutable reference to the value at `key`, inserting `null` if absent.
    pub fn entry(&mut self, key: &str) -> Result<&mut Value, AccessError> {
        match self {
            Value::Dict(entries) => Ok(entries.entry(key.to_owned()).or_default()),
            other => Err(AccessError::NotADict(other.kind())),
        }
    }

    /// Store `value` at `key`, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, AccessError> {
        match self {
            Value::Dict(entries) => Ok(entries.insert(key.into(), value.into())),
            other => Err(AccessError::NotADict(other.kind())),
        }
    }

    /// Look up `key` without inserting. `None` for non-dicts and absent keys.
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.as_dict().and_then(|entries| entries.get(key))
    }

    /// Typed reference to the payload stored at `key`.
    pub fn get_as<T: Payload>(&self, key: &str) -> Result<&T, AccessError> {
        match self {
            Value::Dict(entries) => entries
                .get(key)
                .ok_or_else(|| AccessError::MissingKey(key.to_owned()))?
                .get::<T>(),
            other => Err(AccessError::NotADict(other.kind())),
        }
    }

    /// Append to a list.
    pub fn push(&mut self, item: impl Into<Value>) -> Result<(), AccessError> {
        match self {
            Value::List(items) => {
                items.push(item.into());
                Ok(())
            }
            other => Err(AccessError::NotAList(other.kind())),
        }
    }

    /// Remove the last list item. `Ok(None)` if the list is empty.
    pub fn pop(&mut self) -> Result<Option<Value>, AccessError> {
        match self {
            Value::List(items) => Ok(items.pop()),
            other => Err(AccessError::NotAList(other.kind())),
        }
    }

    /// Number of children of a list or dict; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Dict(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Whether a list or dict has no children; `None` for scalars.
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    fn mismatch(&self, expected: Kind) -> AccessError {
        AccessError::TypeMismatch { expected, found: self.kind() }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for super::List {}
    impl Sealed for super::Dict {}
}

/// A payload type that [`Value::get`] can hand out by reference.
///
/// Implemented for `bool`, `i32`, `f64`, `String`, [`List`] and [`Dict`].
/// Null has no payload.
pub trait Payload: sealed::Sealed + Sized {
    const KIND: Kind;

    fn from_value(value: &Value) -> Option<&Self>;

    fn from_value_mut(value: &mut Value) -> Option<&mut Self>;
}

macro_rules! payload {
    ($ty:ty, $variant:ident) => {
        impl Payload for $ty {
            const KIND: Kind = Kind::$variant;

            #[inline]
            fn from_value(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            #[inline]
            fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

payload!(bool, Bool);
payload!(i32, Int);
payload!(f64, Float);
payload!(String, String);
payload!(List, List);
payload!(Dict, Dict);

// ============================================================================
// Construction
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<List> for Value {
    fn from(items: List) -> Self {
        Value::List(items)
    }
}

impl From<Dict> for Value {
    fn from(entries: Dict) -> Self {
        Value::Dict(entries)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Dict(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ============================================================================
// Indexing
// ============================================================================

impl Index<&str> for Value {
    type Output = Value;

    /// `null` for absent keys and non-dicts.
    fn index(&self, key: &str) -> &Value {
        self.get_key(key).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Value {
    /// Assign-through indexing, inserting `null` for absent keys.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a dict. Use [`Value::entry`] for the
    /// fallible form.
    fn index_mut(&mut self, key: &str) -> &mut Value {
        match self {
            Value::Dict(entries) => entries.entry(key.to_owned()).or_default(),
            other => panic!("cannot index {} with key {key:?}", other.kind()),
        }
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// `null` for out-of-range indices and non-lists.
    fn index(&self, index: usize) -> &Value {
        self.as_list().and_then(|items| items.get(index)).unwrap_or(&NULL)
    }
}

impl IndexMut<usize> for Value {
    /// # Panics
    ///
    /// Panics if the value is not a list or `index` is out of range.
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self {
            Value::List(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .unwrap_or_else(|| panic!("index {index} out of range for list of length {len}"))
            }
            other => panic!("cannot index {} with {index}", other.kind()),
        }
    }
}
