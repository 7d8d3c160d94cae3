use std::any::Any;
use std::borrow::Cow;
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// A dynamically typed argument or return value.
///
/// Every argument passed to [Spy::called](crate::Spy::called) and every canned
/// return value is represented as a `Value`, so that matchers and typed
/// accessors can inspect them without knowing the mocked signature.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The absence of a value.
    Nil,
    Bool(bool),
    Str(String),
    I32(i32),
    I64(i64),
    U64(u64),
    Error(ErrorValue),
    /// Any other `'static` value, compared by identity.
    Opaque(Opaque),
    /// The view of a mutable output slot.
    Ref(RefValue),
}

impl Value {
    /// Wrap an arbitrary value.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    /// Whether this value denotes "no value".
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Canonical name of the runtime type of this value, e.g. `"i32"` or `"&mut i32"`.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Self::Nil => Cow::Borrowed("nil"),
            Self::Bool(_) => Cow::Borrowed("bool"),
            Self::Str(_) => Cow::Borrowed("String"),
            Self::I32(_) => Cow::Borrowed("i32"),
            Self::I64(_) => Cow::Borrowed("i64"),
            Self::U64(_) => Cow::Borrowed("u64"),
            Self::Error(_) => Cow::Borrowed("Error"),
            Self::Opaque(opaque) => Cow::Borrowed(opaque.type_name()),
            Self::Ref(reference) => Cow::Owned(format!("&mut {}", reference.target_type)),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::I32(value) => write!(f, "{value}"),
            Self::I64(value) => write!(f, "{value}i64"),
            Self::U64(value) => write!(f, "{value}u64"),
            Self::Error(error) => write!(f, "error({:?})", error.to_string()),
            Self::Opaque(opaque) => write!(f, "<{}>", opaque.type_name()),
            Self::Ref(reference) => write!(f, "&mut {}", reference.target),
        }
    }
}

/// A cloneable, shared error usable as a canned return value.
#[derive(Clone)]
pub struct ErrorValue(Arc<dyn std::error::Error + Send + Sync + 'static>);

impl ErrorValue {
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// An error that only carries a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Try to view the wrapped error as a concrete type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

impl Display for ErrorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for ErrorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ErrorValue").field(&self.0.to_string()).finish()
    }
}

impl std::error::Error for ErrorValue {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// Identity comparison: two error values are equal when they share the same allocation.
impl PartialEq for ErrorValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A shared value of some type outside the primitive set.
///
/// An opaque created with [Opaque::of_type] records only the name of its type,
/// for arguments that can be neither converted nor cloned.
#[derive(Clone)]
pub struct Opaque(Arc<OpaqueInner>);

struct OpaqueInner {
    type_name: &'static str,
    value: Option<Box<dyn Any + Send + Sync>>,
}

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(OpaqueInner {
            type_name: std::any::type_name::<T>(),
            value: Some(Box::new(value)),
        }))
    }

    /// An opaque carrying no value, only the name of `T`.
    pub fn of_type<T: ?Sized>() -> Self {
        Self(Arc::new(OpaqueInner {
            type_name: std::any::type_name::<T>(),
            value: None,
        }))
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name
    }

    pub fn has_value(&self) -> bool {
        self.0.value.is_some()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.value.as_ref()?.downcast_ref()
    }
}

impl Debug for Opaque {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Opaque(<{}>)", self.0.type_name)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// What a matcher sees of an output slot: its target type and current content.
#[derive(Clone, Debug, PartialEq)]
pub struct RefValue {
    pub target_type: String,
    pub target: Box<Value>,
}

impl RefValue {
    pub fn new(target_type: impl Into<String>, target: Value) -> Self {
        Self {
            target_type: target_type.into(),
            target: Box::new(target),
        }
    }
}

/// Types that can be observed as a [Value] without being consumed.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Types that can be extracted from a [Value] of the exactly matching kind.
pub trait FromValue: Sized {
    /// Canonical type name, matching [Value::type_name] of accepted values.
    fn type_name() -> Cow<'static, str>;

    /// Returns `None` when the kind of `value` does not fit.
    fn from_value(value: &Value) -> Option<Self>;
}

/// A type usable as an output parameter.
pub trait OutValue: ToValue + FromValue + 'static {}

impl<T: ToValue + FromValue + 'static> OutValue for T {}

macro_rules! primitive_value {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }

        impl FromValue for $ty {
            fn type_name() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    };
}

primitive_value!(bool, Bool, "bool");
primitive_value!(String, Str, "String");
primitive_value!(i32, I32, "i32");
primitive_value!(i64, I64, "i64");
primitive_value!(u64, U64, "u64");
primitive_value!(ErrorValue, Error, "Error");

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Nil
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for Opaque {
    fn to_value(&self) -> Value {
        Value::Opaque(self.clone())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Nil,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl FromValue for Value {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Value")
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("Option<{}>", T::type_name()))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Nil => Some(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Nil)
    }
}

/// Build a `Vec<Value>` out of heterogeneous expressions.
///
/// ```rust
/// use callspy::*;
/// let values = values!["ok", 1, true, Value::Nil];
/// assert_eq!(4, values.len());
/// ```
#[macro_export]
macro_rules! values {
    ($($value:expr),* $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),*]
    };
}
