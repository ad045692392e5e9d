mod number;

pub use number::Number;

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The result of statements that produce nothing (declarations, `print`, ...).
    None,
    Number(Number),
    Bool(bool),
    Str(Rc<str>),
}

impl Value {
    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Number(Number::Int(_)) => "int",
            Value::Number(Number::Float(_)) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Number(val) => !val.is_zero(),
            Value::Bool(val) => *val,
            Value::Str(val) => !val.is_empty(),
        }
    }

    /// Returns the number if the `Value` is already numeric or `None` if wrong type.
    /// Booleans count as `0` and `1`.
    pub fn cast_to_number(&self) -> Option<Number> {
        match self {
            Value::Number(val) => Some(val.clone()),
            Value::Bool(val) => Some(Number::from(i64::from(*val))),
            _ => None,
        }
    }

    /// Numeric coercion: numbers and booleans pass through, numeric-looking strings are parsed.
    pub fn coerce_to_number(&self) -> Option<Number> {
        match self {
            Value::Str(val) => Number::coerce_str(val),
            _ => self.cast_to_number(),
        }
    }

    /// Language-level equality. Numbers and booleans compare by value; any other
    /// mix of types is unequal.
    pub fn equals(&self, other: &Value) -> bool {
        match (self.cast_to_number(), other.cast_to_number()) {
            (Some(l), Some(r)) => l.compare(&r) == Some(Ordering::Equal),
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Number(val) => write!(f, "{}", val),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Str(val) => write!(f, "{}", val),
        }
    }
}

impl From<Number> for Value {
    fn from(val: Number) -> Self {
        Value::Number(val)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Number(Number::from(val))
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Number(Number::Float(val))
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Str(val.into())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Str(val.into())
    }
}
