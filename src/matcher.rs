//! Argument matchers.
//!
//! Each function in this module builds a [Matcher] for one argument position of
//! [Spy::when](crate::Spy::when).

use std::fmt::Debug;
use std::sync::Arc;

use crate::value::Value;

/// A predicate over one argument value.
///
/// Implementations must be total: a value of an unexpected kind is a mismatch,
/// never a panic.
pub trait Match {
    fn matches(&self, actual: &Value) -> bool;
}

/// A predicate over one argument value.
#[derive(Clone)]
pub enum Matcher {
    Str(String),
    Bool(bool),
    I32(i32),
    I64(i64),
    U64(u64),
    /// Matches any present value whose [Value::type_name] equals the given name.
    TypeName(String),
    Anything,
    Nil,
    NotNil,
    Custom(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
}

impl Matcher {
    /// The value an equality matcher compares against.
    pub(crate) fn expected_value(&self) -> Option<Value> {
        match self {
            Self::Str(value) => Some(Value::Str(value.clone())),
            Self::Bool(value) => Some(Value::Bool(*value)),
            Self::I32(value) => Some(Value::I32(*value)),
            Self::I64(value) => Some(Value::I64(*value)),
            Self::U64(value) => Some(Value::U64(*value)),
            _ => None,
        }
    }
}

impl Match for Matcher {
    fn matches(&self, actual: &Value) -> bool {
        match (self, actual) {
            (Self::Str(expected), Value::Str(actual)) => expected == actual,
            (Self::Bool(expected), Value::Bool(actual)) => expected == actual,
            (Self::I32(expected), Value::I32(actual)) => expected == actual,
            (Self::I64(expected), Value::I64(actual)) => expected == actual,
            (Self::U64(expected), Value::U64(actual)) => expected == actual,
            (Self::TypeName(_), Value::Nil) => false,
            (Self::TypeName(expected), actual) => actual.type_name() == expected.as_str(),
            (Self::Anything, _) => true,
            (Self::Nil, actual) => actual.is_nil(),
            (Self::NotNil, actual) => !actual.is_nil(),
            (Self::Custom(func), actual) => func(actual),
            _ => false,
        }
    }
}

impl<M: Match + ?Sized> Match for &M {
    fn matches(&self, actual: &Value) -> bool {
        (**self).matches(actual)
    }
}

impl Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(value) => write!(f, "string({value:?})"),
            Self::Bool(value) => write!(f, "bool({value})"),
            Self::I32(value) => write!(f, "int({value})"),
            Self::I64(value) => write!(f, "int64({value})"),
            Self::U64(value) => write!(f, "uint64({value})"),
            Self::TypeName(name) => write!(f, "type_name({name:?})"),
            Self::Anything => write!(f, "anything()"),
            Self::Nil => write!(f, "nil()"),
            Self::NotNil => write!(f, "not_nil()"),
            Self::Custom(_) => write!(f, "custom(..)"),
        }
    }
}

/// Positional conjunction: true when there is one matcher per value and every matcher accepts its value.
pub fn matches_all<M: Match>(matchers: &[M], values: &[Value]) -> bool {
    matchers.len() == values.len()
        && matchers
            .iter()
            .zip(values)
            .all(|(matcher, value)| matcher.matches(value))
}

/// Match a string equal to `value`.
pub fn string(value: impl Into<String>) -> Matcher {
    Matcher::Str(value.into())
}

pub fn bool(value: bool) -> Matcher {
    Matcher::Bool(value)
}

/// Match an `i32` equal to `value`.
pub fn int(value: i32) -> Matcher {
    Matcher::I32(value)
}

pub fn int64(value: i64) -> Matcher {
    Matcher::I64(value)
}

pub fn uint64(value: u64) -> Matcher {
    Matcher::U64(value)
}

/// Match any present value of the given type, e.g. `type_name("&mut i32")` for an `i32` output slot.
pub fn type_name(name: impl Into<String>) -> Matcher {
    Matcher::TypeName(name.into())
}

/// Match anything, including [Value::Nil].
pub fn anything() -> Matcher {
    Matcher::Anything
}

pub fn nil() -> Matcher {
    Matcher::Nil
}

pub fn not_nil() -> Matcher {
    Matcher::NotNil
}

/// Match using caller supplied logic.
pub fn custom<F>(func: F) -> Matcher
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Matcher::Custom(Arc::new(func))
}
