use callspy::matcher::*;
use callspy::*;

#[test]
fn set_writes_caller_slot() {
    let spy = Spy::new();
    spy.when("lookup", [anything(), anything()]).set(1, 42);

    let mut slot = 0_i32;
    spy.called("lookup", &mut [Arg::value("key"), Arg::out(&mut slot)]);

    assert_eq!(42, slot);
}

#[test]
fn set_applies_every_position() {
    let spy = Spy::new();
    spy.when("split", [anything(), anything(), anything()])
        .set(2, "tail")
        .set(1, "head");

    let mut head = String::new();
    let mut tail = String::new();
    spy.called(
        "split",
        &mut [
            Arg::value("head/tail"),
            Arg::out(&mut head),
            Arg::out(&mut tail),
        ],
    );

    assert_eq!("head", head);
    assert_eq!("tail", tail);
}

#[test]
fn set_skips_values_and_out_of_range_positions() {
    let spy = Spy::new();
    spy.when("lookup", [anything(), anything()])
        .set(0, "ignored")
        .set(7, 1)
        .set(1, 5);

    let mut slot = 0_i32;
    let call = spy.called("lookup", &mut [Arg::value("key"), Arg::out(&mut slot)]);

    assert_eq!(5, slot);
    assert_eq!(&Value::from("key"), call.arg(0));
}

#[test]
fn set_with_incompatible_kind_leaves_slot_untouched() {
    crate::init_tracing();

    let spy = Spy::new();
    spy.when("lookup", [anything()]).set(0, "not a number");

    let mut slot = 7_i32;
    spy.called("lookup", &mut [Arg::out(&mut slot)]);

    assert_eq!(7, slot);
}

#[test]
fn optional_slot_can_be_cleared() {
    let spy = Spy::new();
    spy.when("take", [anything()]).set(0, ());

    let mut slot = Some(3_u64);
    spy.called("take", &mut [Arg::out(&mut slot)]);

    assert_eq!(None, slot);
}

#[test]
fn argument_snapshot_is_taken_before_injection() {
    let spy = Spy::new();
    spy.when("fill", [anything()]).set(0, 9);

    let mut slot = 1_i32;
    let call = spy.called("fill", &mut [Arg::out(&mut slot)]);

    assert_eq!(9, slot);
    assert_eq!(
        &Value::Ref(RefValue::new("i32", Value::I32(1))),
        call.arg(0)
    );
}

/// An output slot that logs its position whenever it is written.
struct OrderedSlot {
    position: usize,
    writes: std::rc::Rc<std::cell::RefCell<Vec<usize>>>,
}

impl OutSlot for OrderedSlot {
    fn target_type(&self) -> String {
        "OrderedSlot".to_string()
    }

    fn snapshot(&self) -> Value {
        Value::Nil
    }

    fn assign(&mut self, _: &Value) -> bool {
        self.writes.borrow_mut().push(self.position);
        true
    }
}

#[test]
fn overrides_are_written_in_increasing_position_order() {
    let writes = std::rc::Rc::new(std::cell::RefCell::new(vec![]));
    let mut slots: Vec<OrderedSlot> = (0..4)
        .map(|position| OrderedSlot {
            position,
            writes: writes.clone(),
        })
        .collect();

    let spy = Spy::new();
    spy.when("scatter", [anything(), anything(), anything(), anything()])
        .set(3, 3)
        .set(0, 0)
        .set(2, 2);

    let mut args: Vec<Arg<'_>> = slots
        .iter_mut()
        .map(|slot| Arg::Out(slot as &mut dyn OutSlot))
        .collect();
    spy.called("scatter", &mut args);

    assert_eq!(vec![0, 2, 3], *writes.borrow());
}
