use callspy::matcher::*;
use callspy::*;

trait Greeter {
    fn greet(&self, who: &str) -> String;
}

#[derive(Default)]
struct GreeterDouble {
    spy: Spy,
}

impl Greeter for GreeterDouble {
    fn greet(&self, who: &str) -> String {
        self.spy.called("greet", &mut [Arg::value(who)]).string(0)
    }
}

#[test]
fn hand_written_double_returns_canned_value() {
    crate::init_tracing();

    let double = GreeterDouble::default();
    double
        .spy
        .when("greet", [string("world")])
        .returns(["hello world"]);

    assert_eq!("hello world", double.greet("world"));
    double.spy.assert_verified();
}

#[test]
#[should_panic(expected = "Unexpected call to greet(\"mars\").")]
fn unregistered_arguments_panic() {
    let double = GreeterDouble::default();
    double
        .spy
        .when("greet", [string("world")])
        .returns(["hello world"]);

    double.greet("mars");
}

#[test]
fn typed_accessors_reproduce_configured_returns() {
    let spy = Spy::new();
    spy.when("everything", [])
        .returns(values!["ok", 1, 2_i64, 3_u64, true, ErrorValue::msg("dummy"), ()]);

    let call = spy.called("everything", &mut []);
    assert_eq!(7, call.count_returns());
    assert_eq!("ok", call.string(0));
    assert_eq!(1, call.int(1));
    assert_eq!(2, call.int64(2));
    assert_eq!(3, call.uint64(3));
    assert!(call.bool(4));
    assert_eq!("dummy", call.error(5).unwrap().to_string());
    assert!(call.error(6).is_none());
    assert_eq!(&Value::Nil, call.return_value(6));
}

#[test]
fn opaque_values_round_trip_through_get() {
    #[derive(Debug, PartialEq)]
    struct Config {
        retries: u8,
    }

    let spy = Spy::new();
    spy.when("config", []).returns([Value::opaque(Config { retries: 3 })]);

    let call = spy.called("config", &mut []);
    match call.get(0) {
        Value::Opaque(opaque) => {
            assert_eq!(Some(&Config { retries: 3 }), opaque.downcast_ref::<Config>())
        }
        other => panic!("expected opaque, got {other}"),
    }
}

#[test]
fn calls_of_preserves_invocation_order() {
    let spy = Spy::new();
    spy.when("log", [anything()]);
    spy.when("flush", []);

    for line in ["a", "b", "c"] {
        spy.called("log", &mut [Arg::value(line)]);
        spy.called("flush", &mut []);
    }

    let lines: Vec<Value> = spy
        .calls_of("log")
        .iter()
        .map(|call| call.arg(0).clone())
        .collect();
    assert_eq!(values!["a", "b", "c"], lines);
    assert_eq!(3, spy.call_count("log"));
    assert_eq!(3, spy.call_count("flush"));
    assert_eq!(0, spy.call_count("never"));
    assert_eq!(&Value::from("b"), spy.call("log", 1).arg(0));
    assert_eq!(6, spy.calls().len());
}

#[test]
fn spy_is_usable_across_threads() {
    let spy = std::sync::Arc::new(Spy::new());
    spy.when("tick", []);

    let handle = {
        let spy = spy.clone();
        std::thread::spawn(move || {
            spy.called("tick", &mut []);
        })
    };
    handle.join().unwrap();

    assert_eq!(1, spy.call_count("tick"));
}
