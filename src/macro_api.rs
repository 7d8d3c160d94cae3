//! Items used by code generated by the `#[spy]` macro. Not public API.
//!
//! Generated methods wrap each parameter in [ArgRef] or [ArgMut] and call
//! `into_arg()` with [ViaValue], [ViaClone] and [ViaTypeName] in scope. Method
//! resolution tries the by-value receiver first, then `&`, then `&mut`, so each
//! parameter gets the strongest representation its type supports:
//!
//! 1. [ToValue] / [OutValue](crate::OutValue): a plain value or a writable slot.
//! 2. `Any + Clone + Send + Sync`: an opaque clone, or a read-only slot view.
//! 3. Anything else: an opaque carrying only the type name.

use std::any::Any;

use crate::call::Call;
use crate::error::induce_panic;
use crate::output::FromReturns;
use crate::value::{Opaque, OutValue, RefValue, ToValue, Value};

pub use crate::arg::Arg;
pub use crate::spy::Spy;

/// Convert a call into the faked method's return type, panicking on a kind mismatch.
#[track_caller]
pub fn unpack<R: FromReturns>(call: Call) -> R {
    induce_panic(R::from_returns(&call))
}

/// A parameter observed through a shared reference.
#[derive(Debug)]
pub struct ArgRef<'a, T: ?Sized>(pub &'a T);

/// A `&mut` parameter.
#[derive(Debug)]
pub struct ArgMut<'a, T: ?Sized>(pub &'a mut T);

pub trait ViaValue<'a> {
    fn into_arg(self) -> Arg<'a>;
}

pub trait ViaClone<'a> {
    fn into_arg(self) -> Arg<'a>;
}

pub trait ViaTypeName<'a> {
    fn into_arg(self) -> Arg<'a>;
}

impl<'a, T: ToValue + ?Sized> ViaValue<'a> for ArgRef<'a, T> {
    fn into_arg(self) -> Arg<'a> {
        Arg::value(self.0)
    }
}

impl<'a, T: OutValue> ViaValue<'a> for ArgMut<'a, T> {
    fn into_arg(self) -> Arg<'a> {
        Arg::out(self.0)
    }
}

impl<'a, T: Any + Clone + Send + Sync> ViaClone<'a> for &ArgRef<'a, T> {
    fn into_arg(self) -> Arg<'a> {
        Arg::opaque(self.0)
    }
}

impl<'a, T: Any + Clone + Send + Sync> ViaClone<'a> for &ArgMut<'a, T> {
    fn into_arg(self) -> Arg<'a> {
        Arg::opaque_out(&*self.0)
    }
}

impl<'a, T: ?Sized> ViaTypeName<'a> for &mut ArgRef<'a, T> {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(Value::Opaque(Opaque::of_type::<T>()))
    }
}

impl<'a, T: ?Sized> ViaTypeName<'a> for &mut ArgMut<'a, T> {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(Value::Ref(RefValue::new(
            std::any::type_name::<T>(),
            Value::Opaque(Opaque::of_type::<T>()),
        )))
    }
}
