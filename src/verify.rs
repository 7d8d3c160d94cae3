use crate::expectation::Expectation;

/// A test-reporting facility that verification reports into.
pub trait FailureSink {
    /// Report one failure. Called once per unmet expectation.
    fn report_failure(&mut self, message: String);

    /// Mark the test as failed. Called at most once per verification.
    fn mark_failed(&mut self);
}

impl<S: FailureSink + ?Sized> FailureSink for &mut S {
    fn report_failure(&mut self, message: String) {
        (**self).report_failure(message)
    }

    fn mark_failed(&mut self) {
        (**self).mark_failed()
    }
}

/// A sink that collects failures.
#[derive(Clone, Debug, Default)]
pub struct Failures {
    messages: Vec<String>,
    failed: bool,
}

impl Failures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

impl FailureSink for Failures {
    fn report_failure(&mut self, message: String) {
        self.messages.push(message);
    }

    fn mark_failed(&mut self) {
        self.failed = true;
    }
}

/// One message per expectation that was never matched, in registration order.
pub(crate) fn unmet_expectations(expectations: &[Expectation]) -> Vec<String> {
    expectations
        .iter()
        .filter(|expectation| expectation.calls.is_empty())
        .map(|expectation| format!("Expected {expectation} to be called, but it never was."))
        .collect()
}

/// Report `failures` to the sink and mark it failed once if there were any.
pub(crate) fn report(failures: Vec<String>, sink: &mut (impl FailureSink + ?Sized)) -> usize {
    let count = failures.len();

    for message in failures {
        tracing::warn!(%message, "unmet expectation");
        sink.report_failure(message);
    }

    if count > 0 {
        sink.mark_failed();
    }

    count
}
