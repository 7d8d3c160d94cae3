use callspy::matcher::*;
use callspy::*;

#[spy]
trait Directory {
    fn lookup(&self, key: &str, found: &mut i32) -> bool;
    fn insert(&self, key: String, value: i32) -> Result<(), ErrorValue>;
    fn remove(&self, key: &str) -> Result<i32, ErrorValue>;
    fn stats(&self) -> (u64, u64);
    fn clear(&self);
}

fn find(directory: &impl Directory, key: &str) -> Option<i32> {
    let mut found = 0;
    directory.lookup(key, &mut found).then_some(found)
}

#[test]
fn output_parameter_through_generated_method() {
    let directory = DirectorySpy::default();
    directory
        .when("lookup", [string("answer"), type_name("&mut i32")])
        .returns([true])
        .set(1, 42);
    directory
        .when("lookup", [anything(), anything()])
        .returns([false]);

    assert_eq!(Some(42), find(&directory, "answer"));
    assert_eq!(None, find(&directory, "question"));
    directory.assert_verified();
}

#[test]
fn result_returns() {
    let directory = DirectorySpy::new();
    directory
        .when("insert", [string("a"), int(1)])
        .returns([()]);
    directory
        .when("insert", [anything(), anything()])
        .returns([ErrorValue::msg("full")]);
    directory
        .when("remove", [string("a")])
        .returns(values![1, ()]);
    directory
        .when("remove", [anything()])
        .returns(values![(), ErrorValue::msg("missing")]);

    assert!(directory.insert("a".to_string(), 1).is_ok());
    assert_eq!(
        "full",
        directory.insert("b".to_string(), 2).unwrap_err().to_string()
    );
    assert_eq!(1, directory.remove("a").unwrap());
    assert_eq!("missing", directory.remove("z").unwrap_err().to_string());
}

#[test]
fn tuple_and_unit_returns() {
    let directory = DirectorySpy::new();
    directory.when("stats", []).returns([10_u64, 2_u64]);
    directory.when("clear", []);

    assert_eq!((10, 2), directory.stats());
    directory.clear();

    assert_eq!(1, directory.call_count("clear"));
    assert_eq!(0, directory.call("clear", 0).count_returns());
}

#[test]
#[should_panic(expected = "Unexpected call to lookup(\"x\", &mut 0).")]
fn generated_method_panics_when_unexpected() {
    let directory = DirectorySpy::new();
    find(&directory, "x");
}

#[test]
#[should_panic(expected = "stats: return value #0 is i32, but was accessed as u64.")]
fn generated_method_panics_on_kind_mismatch() {
    let directory = DirectorySpy::new();
    directory.when("stats", []).returns([1, 2]);
    directory.stats();
}

#[test]
fn spy_double_in_a_dyn_context() {
    let directory = DirectorySpy::new();
    directory.when("clear", []);

    let as_dyn: &dyn Directory = &directory;
    as_dyn.clear();

    assert_eq!("clear", directory.call("clear", 0).name());
}

#[derive(Clone, Debug, PartialEq)]
struct User {
    name: String,
}

struct Connection;

#[spy]
trait Store {
    fn save(&self, user: &User) -> bool;
    fn fill(&self, buf: &mut Vec<u8>) -> u64;
    fn attach(&self, connection: &Connection, retries: &mut Connection);
}

#[test]
fn user_types_are_forwarded_as_opaque_clones() {
    let store = StoreSpy::new();
    store.when("save", [anything()]).returns([true]);

    let user = User {
        name: "ada".to_string(),
    };
    assert!(store.save(&user));

    match store.call("save", 0).arg(0) {
        Value::Opaque(opaque) => assert_eq!(Some(&user), opaque.downcast_ref::<User>()),
        other => panic!("expected opaque, got {other}"),
    }
}

#[test]
fn unwritable_buffers_are_viewed_and_skipped_by_set() {
    let store = StoreSpy::new();
    store
        .when("fill", [custom(|value| value.type_name().ends_with("Vec<u8>"))])
        .returns([3_u64])
        .set(0, "ignored");

    let mut buf = vec![1_u8, 2];
    assert_eq!(3, store.fill(&mut buf));
    assert_eq!(vec![1_u8, 2], buf);

    match store.call("fill", 0).arg(0) {
        Value::Ref(reference) => match reference.target.as_ref() {
            Value::Opaque(opaque) => {
                assert_eq!(Some(&vec![1_u8, 2]), opaque.downcast_ref::<Vec<u8>>())
            }
            other => panic!("expected opaque target, got {other}"),
        },
        other => panic!("expected reference, got {other}"),
    }
}

#[test]
fn other_types_are_forwarded_by_type_name() {
    let store = StoreSpy::new();
    store.when("attach", [not_nil(), anything()]);

    let mut retries = Connection;
    store.attach(&Connection, &mut retries);

    let call = store.call("attach", 0);
    assert!(call.arg(0).type_name().ends_with("Connection"));
    assert!(call.arg(1).type_name().starts_with("&mut "));
    store.assert_verified();
}
