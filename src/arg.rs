use std::any::Any;

use crate::value::{OutValue, RefValue, ToValue, Value};

/// A mutable output slot owned by the caller of a spied method.
///
/// Implemented for every [OutValue], so `&mut i32`, `&mut String`, `&mut Option<u64>`
/// and friends can all be written by [Expect::set](crate::Expect::set).
pub trait OutSlot {
    /// Canonical type name of the slot's target.
    fn target_type(&self) -> String;

    /// The slot's current content.
    fn snapshot(&self) -> Value;

    /// Overwrite the target. Returns `false`, leaving the target untouched,
    /// when `value` is of a kind the target cannot hold.
    fn assign(&mut self, value: &Value) -> bool;
}

impl<T: OutValue> OutSlot for T {
    fn target_type(&self) -> String {
        T::type_name().into_owned()
    }

    fn snapshot(&self) -> Value {
        self.to_value()
    }

    fn assign(&mut self, value: &Value) -> bool {
        match T::from_value(value) {
            Some(value) => {
                *self = value;
                true
            }
            None => false,
        }
    }
}

/// One argument of a spied invocation.
pub enum Arg<'a> {
    /// An argument passed by value or by shared reference.
    Value(Value),
    /// A reference-capable argument that may receive an output value.
    Out(&'a mut dyn OutSlot),
}

impl<'a> Arg<'a> {
    pub fn value<T: ToValue + ?Sized>(value: &T) -> Self {
        Self::Value(value.to_value())
    }

    pub fn out<T: OutValue>(slot: &'a mut T) -> Self {
        Self::Out(slot)
    }

    /// An argument of a type without a [ToValue] conversion, observed as a [Value::Opaque] clone.
    pub fn opaque<T: Any + Clone + Send + Sync>(value: &T) -> Self {
        Self::Value(Value::opaque(value.clone()))
    }

    /// A `&mut` argument the spy cannot write into.
    ///
    /// Matchers see a [Value::Ref] to an opaque snapshot of the target, and
    /// overrides configured for its position are skipped.
    pub fn opaque_out<T: Any + Clone + Send + Sync>(slot: &T) -> Self {
        Self::Value(Value::Ref(RefValue::new(
            std::any::type_name::<T>(),
            Value::opaque(slot.clone()),
        )))
    }

    pub fn is_out(&self) -> bool {
        matches!(self, Self::Out(_))
    }

    /// The value matchers see for this argument.
    pub fn view(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Out(slot) => Value::Ref(RefValue::new(slot.target_type(), slot.snapshot())),
        }
    }

    /// Write `value` into the slot. `None` when this is not an output slot.
    pub(crate) fn assign(&mut self, value: &Value) -> Option<bool> {
        match self {
            Self::Value(_) => None,
            Self::Out(slot) => Some(slot.assign(value)),
        }
    }
}

impl From<Value> for Arg<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl std::fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Out(_) => write!(f, "{}", self.view()),
        }
    }
}
