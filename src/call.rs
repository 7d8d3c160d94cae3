use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{induce_panic, Slice, SpyError, SpyResult};
use crate::expectation::PatIndex;
use crate::value::{ErrorValue, FromValue, Value};

/// The immutable record of one matched invocation.
///
/// A `Call` is returned from [Spy::called](crate::Spy::called) and gives typed
/// access to the canned return values of the expectation it matched. Cloning is cheap.
#[derive(Clone)]
pub struct Call(Arc<CallInner>);

struct CallInner {
    name: String,
    pat_index: PatIndex,
    sequence: usize,
    args: Vec<Value>,
    returns: Arc<[Value]>,
}

impl Call {
    pub(crate) fn new(
        name: String,
        pat_index: PatIndex,
        sequence: usize,
        args: Vec<Value>,
        returns: Arc<[Value]>,
    ) -> Self {
        Self(Arc::new(CallInner {
            name,
            pat_index,
            sequence,
            args,
            returns,
        }))
    }

    /// Name of the invoked operation.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Position of this call in its spy's chronological call list.
    pub fn sequence(&self) -> usize {
        self.0.sequence
    }

    /// Registration index of the expectation this call matched.
    pub fn expectation_index(&self) -> usize {
        self.0.pat_index.0
    }

    pub fn count_returns(&self) -> usize {
        self.0.returns.len()
    }

    pub fn arg_count(&self) -> usize {
        self.0.args.len()
    }

    pub fn args(&self) -> &[Value] {
        &self.0.args
    }

    pub fn try_get(&self, index: usize) -> SpyResult<&Value> {
        self.0
            .returns
            .get(index)
            .ok_or_else(|| self.out_of_range(Slice::ReturnValue, index, self.0.returns.len()))
    }

    /// The canned return value at `index`, of any kind.
    #[track_caller]
    pub fn get(&self, index: usize) -> &Value {
        induce_panic(self.try_get(index))
    }

    #[track_caller]
    pub fn return_value(&self, index: usize) -> &Value {
        self.get(index)
    }

    pub fn try_arg(&self, index: usize) -> SpyResult<&Value> {
        self.0
            .args
            .get(index)
            .ok_or_else(|| self.out_of_range(Slice::Argument, index, self.0.args.len()))
    }

    /// The actual argument at `index`, as it was when the call was recorded.
    #[track_caller]
    pub fn arg(&self, index: usize) -> &Value {
        induce_panic(self.try_arg(index))
    }

    /// The canned return value at `index`, converted to `T` only if its kind matches exactly.
    pub fn try_value<T: FromValue>(&self, index: usize) -> SpyResult<T> {
        let value = self.try_get(index)?;
        T::from_value(value).ok_or_else(|| SpyError::TypeMismatch {
            name: self.0.name.clone(),
            slice: Slice::ReturnValue,
            index,
            expected: T::type_name().into_owned(),
            actual: value.type_name().into_owned(),
        })
    }

    #[track_caller]
    pub fn value<T: FromValue>(&self, index: usize) -> T {
        induce_panic(self.try_value(index))
    }

    pub fn try_string(&self, index: usize) -> SpyResult<String> {
        self.try_value(index)
    }

    #[track_caller]
    pub fn string(&self, index: usize) -> String {
        induce_panic(self.try_string(index))
    }

    pub fn try_int(&self, index: usize) -> SpyResult<i32> {
        self.try_value(index)
    }

    #[track_caller]
    pub fn int(&self, index: usize) -> i32 {
        induce_panic(self.try_int(index))
    }

    pub fn try_int64(&self, index: usize) -> SpyResult<i64> {
        self.try_value(index)
    }

    #[track_caller]
    pub fn int64(&self, index: usize) -> i64 {
        induce_panic(self.try_int64(index))
    }

    pub fn try_uint64(&self, index: usize) -> SpyResult<u64> {
        self.try_value(index)
    }

    #[track_caller]
    pub fn uint64(&self, index: usize) -> u64 {
        induce_panic(self.try_uint64(index))
    }

    pub fn try_bool(&self, index: usize) -> SpyResult<bool> {
        self.try_value(index)
    }

    #[track_caller]
    pub fn bool(&self, index: usize) -> bool {
        induce_panic(self.try_bool(index))
    }

    /// The canned error at `index`. A stored [Value::Nil] means "no error".
    pub fn try_error(&self, index: usize) -> SpyResult<Option<ErrorValue>> {
        self.try_value::<Option<ErrorValue>>(index)
    }

    #[track_caller]
    pub fn error(&self, index: usize) -> Option<ErrorValue> {
        induce_panic(self.try_error(index))
    }

    fn out_of_range(&self, slice: Slice, index: usize, len: usize) -> SpyError {
        SpyError::IndexOutOfRange {
            name: self.0.name.clone(),
            slice,
            index,
            len,
        }
    }
}

impl Debug for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Call")
            .field("name", &self.0.name)
            .field("sequence", &self.0.sequence)
            .field("args", &self.0.args)
            .field("returns", &self.0.returns)
            .finish()
    }
}
