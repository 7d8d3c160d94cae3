use callspy as spies;

#[spies::spy(name = TestSpy, prefix = spies)]
trait Test {
    fn test(&self);
}

#[test]
fn test() {
    let spy = TestSpy::new();
    spy.when("test", []);

    spy.test();

    spy.assert_verified();
}
