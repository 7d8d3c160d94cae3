use std::collections::BTreeMap;

use crate::arg::Arg;
use crate::call::Call;
use crate::error::{induce_panic, ActualCall, Slice, SpyError, SpyResult};
use crate::expectation::{Expect, Expectation, PatIndex, Pattern};
use crate::lock::Mutex;
use crate::matcher::Matcher;
use crate::mismatch::Mismatches;
use crate::value::Value;
use crate::verify::{self, FailureSink, Failures};

/// The per-double store of expectations and calls.
///
/// A test double embeds one `Spy` and forwards every method invocation to
/// [Spy::called], passing the method's own name and its arguments. Tests
/// register behavior with [Spy::when] and check at the end with [Spy::verify].
///
/// ```rust
/// use callspy::*;
/// use callspy::matcher::*;
///
/// let spy = Spy::new();
/// spy.when("greet", [string("world")]).returns(["hello world"]);
///
/// let call = spy.called("greet", &mut [Arg::value("world")]);
/// assert_eq!("hello world", call.string(0));
///
/// spy.assert_verified();
/// ```
#[derive(Default)]
pub struct Spy {
    ledger: Mutex<Ledger>,
}

#[derive(Default)]
struct Ledger {
    expectations: Vec<Expectation>,
    calls: Vec<Call>,
}

impl Ledger {
    /// Patterns of every expectation registered under `name`, in registration order.
    fn patterns_of(&self, name: &str) -> Vec<Pattern> {
        self.expectations
            .iter()
            .enumerate()
            .filter(|(_, expectation)| expectation.name == name)
            .map(|(index, expectation)| expectation.pattern(PatIndex(index)))
            .collect()
    }

    fn record(&mut self, pat_index: PatIndex, args: Vec<Value>) -> Call {
        let expectation = &mut self.expectations[pat_index.0];
        let call = Call::new(
            expectation.name.clone(),
            pat_index,
            self.calls.len(),
            args,
            expectation.returns.clone(),
        );
        expectation.calls.push(call.clone());
        self.calls.push(call.clone());
        call
    }
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an expectation for the operation `name` with one matcher per argument position.
    ///
    /// Expectations are never deduplicated. When several accept the same call,
    /// the one registered first wins.
    pub fn when<I>(&self, name: impl Into<String>, matchers: I) -> Expect<'_>
    where
        I: IntoIterator<Item = Matcher>,
    {
        let expectation = Expectation::new(name.into(), matchers.into_iter().collect());
        tracing::debug!(%expectation, "registered expectation");

        let mut ledger = self.ledger.lock();
        ledger.expectations.push(expectation);
        let pat_index = PatIndex(ledger.expectations.len() - 1);

        Expect::new(self, pat_index)
    }

    /// Record an invocation of the operation `name` and return its [Call].
    ///
    /// Called from inside each faked method. Panics when no registered
    /// expectation accepts the invocation.
    #[track_caller]
    pub fn called(&self, name: &str, args: &mut [Arg<'_>]) -> Call {
        induce_panic(self.try_called(name, args))
    }

    /// Like [Spy::called], but returns [SpyError::UnexpectedCall] instead of panicking.
    pub fn try_called(&self, name: &str, args: &mut [Arg<'_>]) -> SpyResult<Call> {
        let actual: Vec<Value> = args.iter().map(Arg::view).collect();

        // Matchers may be user closures that query this spy, so they run unlocked.
        // Expectations are only ever appended, so indexes stay valid in between.
        let patterns = self.ledger.lock().patterns_of(name);
        let Some(pat_index) = patterns
            .iter()
            .find(|pattern| pattern.accepts(&actual))
            .map(|pattern| pattern.pat_index)
        else {
            let mismatches = Mismatches::collect(&patterns, &actual);
            return Err(SpyError::UnexpectedCall {
                call: ActualCall {
                    name: name.to_string(),
                    args: actual,
                },
                mismatches,
            });
        };

        let (call, overrides) = {
            let mut ledger = self.ledger.lock();
            let overrides = ledger.expectations[pat_index.0].overrides.clone();
            (ledger.record(pat_index, actual), overrides)
        };

        tracing::debug!(
            operation = name,
            expectation = call.expectation_index(),
            sequence = call.sequence(),
            "matched call"
        );

        inject_outputs(name, &overrides, args);

        Ok(call)
    }

    /// All calls of `name`, in the order they happened.
    pub fn calls_of(&self, name: &str) -> Vec<Call> {
        self.ledger
            .lock()
            .calls
            .iter()
            .filter(|call| call.name() == name)
            .cloned()
            .collect()
    }

    /// All calls, in the order they happened.
    pub fn calls(&self) -> Vec<Call> {
        self.ledger.lock().calls.clone()
    }

    pub fn try_call(&self, name: &str, index: usize) -> SpyResult<Call> {
        let calls = self.calls_of(name);
        let len = calls.len();
        calls
            .into_iter()
            .nth(index)
            .ok_or_else(|| SpyError::IndexOutOfRange {
                name: name.to_string(),
                slice: Slice::Call,
                index,
                len,
            })
    }

    /// The `index`th call of `name`.
    #[track_caller]
    pub fn call(&self, name: &str, index: usize) -> Call {
        induce_panic(self.try_call(name, index))
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.ledger
            .lock()
            .calls
            .iter()
            .filter(|call| call.name() == name)
            .count()
    }

    pub fn expectation_count(&self) -> usize {
        self.ledger.lock().expectations.len()
    }

    /// Report every expectation that was never matched to `sink`, then mark it failed if there were any.
    ///
    /// Returns the number of unmet expectations. Verification does not change the spy.
    pub fn verify<S: FailureSink + ?Sized>(&self, sink: &mut S) -> usize {
        let failures = verify::unmet_expectations(&self.ledger.lock().expectations);
        verify::report(failures, sink)
    }

    /// Verify, panicking with every failure message if any expectation was never matched.
    #[track_caller]
    pub fn assert_verified(&self) {
        let mut failures = Failures::new();
        if self.verify(&mut failures) > 0 {
            panic!("{}", failures.messages().join("\n"));
        }
    }

    pub(crate) fn with_expectation<R>(
        &self,
        pat_index: PatIndex,
        func: impl FnOnce(&mut Expectation) -> R,
    ) -> R {
        func(&mut self.ledger.lock().expectations[pat_index.0])
    }
}

impl std::fmt::Debug for Spy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ledger = self.ledger.lock();
        f.debug_struct("Spy")
            .field("expectations", &ledger.expectations.len())
            .field("calls", &ledger.calls)
            .finish()
    }
}

/// Write the configured overrides into the output slots of `args`, in increasing position order.
fn inject_outputs(name: &str, overrides: &BTreeMap<usize, Value>, args: &mut [Arg<'_>]) {
    for (&position, value) in overrides {
        let Some(arg) = args.get_mut(position) else {
            continue;
        };

        if arg.assign(value) == Some(false) {
            tracing::warn!(
                operation = name,
                position,
                %value,
                "output slot cannot hold the configured value, leaving it untouched"
            );
        }
    }
}
