use std::fmt::Display;

use crate::mismatch::Mismatches;
use crate::value::Value;

pub type SpyResult<T> = Result<T, SpyError>;

/// Errors raised by the spy engine.
///
/// `UnexpectedCall`, `TypeMismatch` and `IndexOutOfRange` are fatal: the panicking
/// APIs abort the current test with the error's message. The `try_` variants
/// hand them back instead.
#[derive(Clone, Debug, thiserror::Error)]
pub enum SpyError {
    #[error("Unexpected call to {call}.{mismatches}")]
    UnexpectedCall {
        call: ActualCall,
        mismatches: Mismatches,
    },
    #[error("{name}: {slice} #{index} is {actual}, but was accessed as {expected}.")]
    TypeMismatch {
        name: String,
        slice: Slice,
        index: usize,
        expected: String,
        actual: String,
    },
    #[error("{name}: {slice} #{index} is out of range, there are only {len}.")]
    IndexOutOfRange {
        name: String,
        slice: Slice,
        index: usize,
        len: usize,
    },
}

/// The sequence an index refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slice {
    ReturnValue,
    Argument,
    Call,
}

impl Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReturnValue => write!(f, "return value"),
            Self::Argument => write!(f, "argument"),
            Self::Call => write!(f, "call"),
        }
    }
}

/// An invocation as seen by the spy, e.g. `greet("mars")`.
#[derive(Clone, Debug)]
pub struct ActualCall {
    pub name: String,
    pub args: Vec<Value>,
}

impl Display for ActualCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// Abort the current test with the error's message.
#[track_caller]
pub(crate) fn induce_panic<T>(result: SpyResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("{error}"),
    }
}
