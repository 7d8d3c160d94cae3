use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

use crate::call::Call;
use crate::matcher::{matches_all, Matcher};
use crate::value::Value;
use crate::Spy;

/// The matching half of an expectation, copied out of the ledger so that
/// matchers never run while the ledger is locked.
#[derive(Clone)]
pub(crate) struct Pattern {
    pub pat_index: PatIndex,
    pub matchers: Vec<Matcher>,
}

impl Pattern {
    pub fn accepts(&self, args: &[Value]) -> bool {
        matches_all(self.matchers.as_slice(), args)
    }
}

/// Registration index of an expectation within its spy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PatIndex(pub usize);

impl Display for PatIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct InputIndex(pub usize);

/// A registered rule binding an operation name and argument matchers to canned behavior.
pub(crate) struct Expectation {
    pub name: String,
    pub matchers: Vec<Matcher>,
    pub returns: Arc<[Value]>,
    /// Output overrides by argument position, applied in increasing position order.
    pub overrides: BTreeMap<usize, Value>,
    pub calls: Vec<Call>,
}

impl Expectation {
    pub fn new(name: String, matchers: Vec<Matcher>) -> Self {
        Self {
            name,
            matchers,
            returns: Arc::from(Vec::new()),
            overrides: BTreeMap::new(),
            calls: vec![],
        }
    }

    pub fn pattern(&self, pat_index: PatIndex) -> Pattern {
        Pattern {
            pat_index,
            matchers: self.matchers.clone(),
        }
    }

    /// Install canned returns. Once an expectation has returns, an empty list leaves them in place.
    pub fn set_returns(&mut self, values: Vec<Value>) {
        if values.is_empty() && self.has_returns() {
            return;
        }
        self.returns = Arc::from(values);
    }

    pub fn has_returns(&self) -> bool {
        !self.returns.is_empty()
    }

    pub fn count_returns(&self) -> usize {
        self.returns.len()
    }
}

/// Renders as the registered call shape, e.g. `greet(string("world"))`.
impl Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, matcher) in self.matchers.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{matcher:?}")?;
        }
        write!(f, ")")
    }
}

/// Builder for the canned behavior of a registered expectation.
///
/// Returned by [Spy::when]. The expectation is already registered; the builder
/// only refines what happens when it is matched.
#[derive(Debug)]
pub struct Expect<'s> {
    spy: &'s Spy,
    pat_index: PatIndex,
}

impl<'s> Expect<'s> {
    pub(crate) fn new(spy: &'s Spy, pat_index: PatIndex) -> Self {
        Self { spy, pat_index }
    }

    /// Install (or replace) the canned return values.
    ///
    /// ```rust
    /// use callspy::*;
    /// use callspy::matcher::*;
    ///
    /// let spy = Spy::new();
    /// spy.when("lookup", [string("key")]).returns(values!["value", true]);
    /// ```
    pub fn returns<I>(self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.spy
            .with_expectation(self.pat_index, |expectation| expectation.set_returns(values));
        self
    }

    /// On a matching call, overwrite the output slot at argument `position` with `value`.
    ///
    /// Positions outside the actual arguments, and arguments that are not output slots, are skipped.
    pub fn set(self, position: usize, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.spy.with_expectation(self.pat_index, |expectation| {
            expectation.overrides.insert(position, value);
        });
        self
    }

    pub fn has_returns(&self) -> bool {
        self.spy
            .with_expectation(self.pat_index, |expectation| expectation.has_returns())
    }

    pub fn count_returns(&self) -> usize {
        self.spy
            .with_expectation(self.pat_index, |expectation| expectation.count_returns())
    }

    /// Number of calls matched by this expectation so far.
    pub fn call_count(&self) -> usize {
        self.spy
            .with_expectation(self.pat_index, |expectation| expectation.calls.len())
    }
}
