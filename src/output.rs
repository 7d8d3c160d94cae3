use crate::call::Call;
use crate::error::SpyResult;
use crate::value::{ErrorValue, FromValue, Value};

/// Conversion from a [Call]'s canned return values into a method's return type.
///
/// Used by the `#[spy]` macro to finish a faked method:
/// * `()` ignores the canned returns.
/// * Single values read return value #0.
/// * Tuples read return values #0, #1, ...
/// * `Result<(), ErrorValue>` reads an optional error at #0.
/// * `Result<T, ErrorValue>` reads the value at #0 and an optional error at #1.
pub trait FromReturns: Sized {
    fn from_returns(call: &Call) -> SpyResult<Self>;
}

impl FromReturns for () {
    fn from_returns(_: &Call) -> SpyResult<Self> {
        Ok(())
    }
}

impl FromReturns for Result<(), ErrorValue> {
    fn from_returns(call: &Call) -> SpyResult<Self> {
        Ok(match call.try_error(0)? {
            Some(error) => Err(error),
            None => Ok(()),
        })
    }
}

impl<T: FromValue> FromReturns for Option<T> {
    fn from_returns(call: &Call) -> SpyResult<Self> {
        call.try_value(0)
    }
}

macro_rules! single_return {
    ($($ty:ty),*) => {
        $(
            impl FromReturns for $ty {
                fn from_returns(call: &Call) -> SpyResult<Self> {
                    call.try_value(0)
                }
            }

            impl FromReturns for Result<$ty, ErrorValue> {
                fn from_returns(call: &Call) -> SpyResult<Self> {
                    if let Some(error) = call.try_error(1)? {
                        return Ok(Err(error));
                    }
                    call.try_value(0).map(Ok)
                }
            }
        )*
    };
}

single_return!(bool, String, i32, i64, u64, Value);

impl FromReturns for ErrorValue {
    fn from_returns(call: &Call) -> SpyResult<Self> {
        call.try_value(0)
    }
}

impl<A: FromValue, B: FromValue> FromReturns for (A, B) {
    fn from_returns(call: &Call) -> SpyResult<Self> {
        Ok((call.try_value(0)?, call.try_value(1)?))
    }
}

impl<A: FromValue, B: FromValue, C: FromValue> FromReturns for (A, B, C) {
    fn from_returns(call: &Call) -> SpyResult<Self> {
        Ok((call.try_value(0)?, call.try_value(1)?, call.try_value(2)?))
    }
}
