use callspy::matcher::*;
use callspy::*;

#[test]
fn unmet_expectation_is_reported_once_and_fails_sink() {
    let spy = Spy::new();
    spy.when("ping", []);

    let mut failures = Failures::new();
    assert_eq!(1, spy.verify(&mut failures));

    assert_eq!(
        ["Expected ping() to be called, but it never was."],
        failures.messages()
    );
    assert!(failures.is_failed());
}

#[test]
fn all_met_reports_nothing() {
    let spy = Spy::new();
    spy.when("ping", []);
    spy.called("ping", &mut []);

    let mut failures = Failures::new();
    assert_eq!(0, spy.verify(&mut failures));
    assert!(failures.messages().is_empty());
    assert!(!failures.is_failed());
}

#[test]
fn every_unmet_expectation_is_reported_in_registration_order() {
    let spy = Spy::new();
    spy.when("open", [string("a.txt")]);
    spy.when("read", [anything()]);
    spy.when("close", []);
    spy.called("read", &mut [Arg::value(&3)]);

    let mut failures = Failures::new();
    assert_eq!(2, spy.verify(&mut failures));
    assert_eq!(
        [
            "Expected open(string(\"a.txt\")) to be called, but it never was.",
            "Expected close() to be called, but it never was.",
        ],
        failures.messages()
    );
}

/// A sink that is itself a spy-backed double, checking the sink protocol.
#[spy(name = SinkSpy)]
trait Sink {
    fn report_failure(&self, message: String);
    fn mark_failed(&self);
}

struct SinkAdapter<'a>(&'a SinkSpy);

impl FailureSink for SinkAdapter<'_> {
    fn report_failure(&mut self, message: String) {
        Sink::report_failure(self.0, message)
    }

    fn mark_failed(&mut self) {
        Sink::mark_failed(self.0)
    }
}

#[test]
fn verify_drives_the_sink_protocol() {
    let sink = SinkSpy::default();
    sink.when("report_failure", [anything()]);
    sink.when("mark_failed", []);

    let spy = Spy::new();
    spy.when("a", []);
    spy.when("b", []);
    spy.verify(&mut SinkAdapter(&sink));

    assert_eq!(2, sink.call_count("report_failure"));
    assert_eq!(1, sink.call_count("mark_failed"));
    sink.assert_verified();
}

#[test]
#[should_panic(expected = "Expected ping() to be called, but it never was.")]
fn assert_verified_panics_with_messages() {
    let spy = Spy::new();
    spy.when("ping", []);
    spy.assert_verified();
}
