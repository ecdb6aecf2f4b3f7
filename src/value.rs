//! Runtime values.
//!
//! [`Value`] is the dynamic data model everything in splay dispatches on. It
//! covers the JSON-like kinds (null, booleans, numbers, strings, arrays,
//! objects) plus dates, callables, and values that carry their own kind.
//!
//! # Custom kinds
//!
//! A value opts into a custom kind by implementing [`Kind`]. Classification
//! checks that marker before it looks at the value's shape, so a wrapped array
//! or date is dispatched by its kind, not as `"array"` or `"date"`:
//!
//! ```
//! use splay::{Value, classify};
//!
//! let list = Value::tagged("my-list", Value::array([1, 2, 3]));
//! assert_eq!(classify(&list), "my-list");
//! ```

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

/// Insertion-ordered object map.
pub type Map = IndexMap<String, Value>;

// =============================================================================
// Kind marker
// =============================================================================

/// Explicit kind marker for user-defined values.
///
/// Implementors choose the type tag they dispatch under. The tag should not
/// collide with the built-in tags unless overriding them is intended.
pub trait Kind: fmt::Debug {
    /// The type tag this value dispatches under.
    fn kind(&self) -> &str;

    /// Structured payload, if the value wraps one.
    fn inner(&self) -> Option<&Value> {
        None
    }
}

/// A value of any shape relabelled with a custom kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    kind: String,
    inner: Value,
}

impl Tagged {
    pub fn new(kind: impl Into<String>, inner: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            inner: inner.into(),
        }
    }

    /// The wrapped value.
    pub fn value(&self) -> &Value {
        &self.inner
    }
}

impl Kind for Tagged {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn inner(&self) -> Option<&Value> {
        Some(&self.inner)
    }
}

// =============================================================================
// Function
// =============================================================================

/// A shared callable value.
///
/// Equality is identity: two `Function`s are equal only if they share the
/// same closure.
#[derive(Clone)]
pub struct Function(Rc<dyn Fn(&[Value]) -> Value>);

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function")
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// =============================================================================
// Value
// =============================================================================

/// A dynamically typed runtime value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    /// Absent value (a missing field, an unset slot).
    Undefined,
    Bool(bool),
    /// IEEE 754 double. NaN and infinities are ordinary numbers here.
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Map),
    Function(Function),
    /// A value carrying an explicit [`Kind`].
    Custom(Rc<dyn Kind>),
}

impl Value {
    /// Build an array from anything convertible to values.
    pub fn array<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build an object from key/value pairs, keeping their order.
    pub fn object<K: Into<String>, V: Into<Value>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wrap `inner` so that it dispatches under `kind`.
    pub fn tagged(kind: impl Into<String>, inner: impl Into<Value>) -> Self {
        Value::Custom(Rc::new(Tagged::new(kind, inner)))
    }

    /// Wrap a user-defined [`Kind`] implementor.
    pub fn custom(value: impl Kind + 'static) -> Self {
        Value::Custom(Rc::new(value))
    }

    /// Wrap a closure as a callable value.
    pub fn function(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Function(Function::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&dyn Kind> {
        match self {
            Value::Custom(k) => Some(k.as_ref()),
            _ => None,
        }
    }

    /// Convert RFC 3339 strings into [`Value::Date`], recursively.
    ///
    /// JSON has no date type, so data decoded from JSON carries timestamps as
    /// strings. Custom values are left untouched.
    pub fn with_dates(self) -> Value {
        match self {
            Value::String(s) => match DateTime::parse_from_rfc3339(&s) {
                Ok(date) => Value::Date(date.with_timezone(&Utc)),
                Err(_) => Value::String(s),
            },
            Value::Array(items) => Value::Array(items.into_iter().map(Value::with_dates).collect()),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, v.with_dates()))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Array(items) => write!(f, "[array({})]", items.len()),
            Value::Object(_) => f.write_str("[object]"),
            Value::Function(_) => f.write_str("[function]"),
            Value::Custom(k) => write!(f, "<{}>", k.kind()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}
