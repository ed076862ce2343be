//! Common type definitions for utilkit
//!
//! This module contains the dynamic value model classified by the
//! [`crate::is`] predicates, the registered [`Callable`] wrapper and the
//! small shared types used by the array helpers.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Field map used by plain objects and tagged instances
pub type Fields = BTreeMap<String, Dynamic>;

/// Signature of a function stored inside a [`Callable`]
pub type NativeFn = dyn Fn(&[Dynamic]) -> Dynamic + Send + Sync;

/// A value whose shape is only known at runtime
///
/// `Undefined` and `Null` are distinct: `Undefined` means "no value at
/// all" (a missing key, an absent argument) while `Null` is an explicit
/// empty value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dynamic {
    /// No value
    #[default]
    Undefined,
    /// Explicit empty value
    Null,
    /// Boolean
    Bool(bool),
    /// Floating point number
    Number(f64),
    /// Arbitrary precision integer
    BigInt(BigInt),
    /// UTF-8 string
    String(String),
    /// Ordered list of values
    Array(Vec<Dynamic>),
    /// Plain structural record
    Object(Fields),
    /// Record carrying a custom type tag (a date, a map, a class instance...)
    Instance {
        /// Type tag, e.g. `"Date"`
        tag: String,
        /// Own fields
        fields: Fields,
    },
    /// Function or constructor
    Function(Callable),
}

/// Classification tags returned by [`Dynamic::type_tag`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeTag {
    /// `Dynamic::Undefined`
    Undefined,
    /// `Dynamic::Null`
    Null,
    /// `Dynamic::Bool`
    Boolean,
    /// `Dynamic::Number`
    Number,
    /// `Dynamic::BigInt`
    BigInt,
    /// `Dynamic::String`
    String,
    /// `Dynamic::Array`
    Array,
    /// `Dynamic::Object`
    PlainObject,
    /// `Dynamic::Instance`
    Object,
    /// Callable registered as a plain function
    Function,
    /// Callable registered as a constructor
    Class,
}

impl TypeTag {
    /// Convert tag to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Undefined => "undefined",
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::BigInt => "bigint",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::PlainObject => "plain-object",
            TypeTag::Object => "object",
            TypeTag::Function => "function",
            TypeTag::Class => "class",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Dynamic {
    /// Build a plain object from key/value pairs
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Dynamic>,
        I: IntoIterator<Item = (K, V)>,
    {
        Dynamic::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a tagged instance from a type tag and key/value pairs
    pub fn instance<T, K, V, I>(tag: T, entries: I) -> Self
    where
        T: Into<String>,
        K: Into<String>,
        V: Into<Dynamic>,
        I: IntoIterator<Item = (K, V)>,
    {
        Dynamic::Instance {
            tag: tag.into(),
            fields: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Most specific classification of this value
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Dynamic::Undefined => TypeTag::Undefined,
            Dynamic::Null => TypeTag::Null,
            Dynamic::Bool(_) => TypeTag::Boolean,
            Dynamic::Number(_) => TypeTag::Number,
            Dynamic::BigInt(_) => TypeTag::BigInt,
            Dynamic::String(_) => TypeTag::String,
            Dynamic::Array(_) => TypeTag::Array,
            Dynamic::Object(_) => TypeTag::PlainObject,
            Dynamic::Instance { .. } => TypeTag::Object,
            Dynamic::Function(callable) if callable.is_constructor() => TypeTag::Class,
            Dynamic::Function(_) => TypeTag::Function,
        }
    }

    /// String slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    /// Number if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Own fields of a plain object or tagged instance
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Dynamic::Object(fields) | Dynamic::Instance { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Wrap a scalar into a one-element array; arrays are returned as is
    pub fn into_array(self) -> Vec<Dynamic> {
        match self {
            Dynamic::Array(items) => items,
            other => vec![other],
        }
    }
}

impl From<bool> for Dynamic {
    fn from(value: bool) -> Self {
        Dynamic::Bool(value)
    }
}

macro_rules! dynamic_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Dynamic {
                fn from(value: $ty) -> Self {
                    Dynamic::Number(value as f64)
                }
            }
        )*
    };
}

dynamic_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<BigInt> for Dynamic {
    fn from(value: BigInt) -> Self {
        Dynamic::BigInt(value)
    }
}

impl From<&str> for Dynamic {
    fn from(value: &str) -> Self {
        Dynamic::String(value.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(value: String) -> Self {
        Dynamic::String(value)
    }
}

impl<T: Into<Dynamic>> From<Vec<T>> for Dynamic {
    fn from(values: Vec<T>) -> Self {
        Dynamic::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Dynamic>> From<Option<T>> for Dynamic {
    fn from(value: Option<T>) -> Self {
        value.map_or(Dynamic::Undefined, Into::into)
    }
}

impl From<Callable> for Dynamic {
    fn from(value: Callable) -> Self {
        Dynamic::Function(value)
    }
}

impl From<serde_json::Value> for Dynamic {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Dynamic::Null,
            Value::Bool(b) => Dynamic::Bool(b),
            Value::Number(n) => Dynamic::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Dynamic::String(s),
            Value::Array(items) => Dynamic::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                Dynamic::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Whether a [`Callable`] is meant to be invoked as a plain function or
/// used as a constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallableKind {
    /// Ordinary function
    #[default]
    Function,
    /// Constructor-style callable
    Class,
}

/// A function value with an explicit function-or-constructor registration
///
/// Two callables are equal only when they share the same underlying
/// function allocation.
#[derive(Clone)]
pub struct Callable {
    name: Option<String>,
    kind: CallableKind,
    func: Arc<NativeFn>,
}

impl Callable {
    /// Register an ordinary function
    pub fn function<F>(func: F) -> Self
    where
        F: Fn(&[Dynamic]) -> Dynamic + Send + Sync + 'static,
    {
        Callable {
            name: None,
            kind: CallableKind::Function,
            func: Arc::new(func),
        }
    }

    /// Register a constructor
    pub fn class<S, F>(name: S, constructor: F) -> Self
    where
        S: Into<String>,
        F: Fn(&[Dynamic]) -> Dynamic + Send + Sync + 'static,
    {
        Callable {
            name: Some(name.into()),
            kind: CallableKind::Class,
            func: Arc::new(constructor),
        }
    }

    /// Attach a name
    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Invoke with the given arguments
    pub fn call(&self, args: &[Dynamic]) -> Dynamic {
        (self.func)(args)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> CallableKind {
        self.kind
    }

    /// Does this callable declare itself constructor-like?
    pub fn is_constructor(&self) -> bool {
        self.kind == CallableKind::Class
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Either a single value or a list of values
///
/// Deserializes from either a JSON scalar/object or a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Already a list
    Many(Vec<T>),
    /// A single value
    One(T),
}

impl<T> OneOrMany<T> {
    /// Flatten into a list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}
