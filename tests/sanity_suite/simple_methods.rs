//! The assertion vocabulary, exercised from inside running tests

use sanetest::{Error, ErrorKind, Outcome, Result, TestClass, UnitTestCase};

use crate::common::{assert_all_passed, Harness};

fn raise_value_error() -> Result<()> {
    Err(Error::invalid_value("raised on purpose"))
}

fn simple_methods() -> TestClass {
    TestClass::new("TestUnitSimpleMethods")
        .test("test_true", |case| case.assert_true(true))
        .test("test_true_false", |case| {
            case.assert_raises(ErrorKind::AssertionFailure, || case.assert_true(false))?;
            Ok(())
        })
        .test("test_raises", |case| {
            let raised = case.assert_raises(ErrorKind::InvalidValue, raise_value_error)?;
            case.assert_true(raised.to_string().contains("raised on purpose"))
        })
        .test("test_raises_raise_assertion", |case| {
            case.assert_raises(ErrorKind::AssertionFailure, || {
                case.assert_raises(ErrorKind::InvalidValue, || Ok("a"))
            })?;
            Ok(())
        })
        .test("test_equals", |case| case.assert_equals(1, 1))
        .test("test_equals_false", |case| {
            case.assert_raises(ErrorKind::AssertionFailure, || case.assert_equals(1, 2))?;
            Ok(())
        })
        .test("test_fail", |case| match case.fail(None) {
            Err(e) if e.kind() == ErrorKind::AssertionFailure => Ok(()),
            _ => Err(Error::assertion("fail() should raise an assertion failure")),
        })
        .test("test_in", |case| {
            case.assert_in(&1, &[1])?;
            case.assert_not_in(&2, &[1])
        })
        .test("test_almost_equals", |case| {
            case.assert_almost_equals(0.1 + 0.2, 0.3)?;
            case.assert_not_almost_equals(0.1, 0.2)
        })
}

#[test]
fn test_simple_methods_all_pass() {
    let harness = Harness::new();
    let report = harness.runner.run(&[simple_methods()]);
    assert_eq!(report.len(), 9);
    assert_all_passed(&report);
}

#[test]
fn test_failing_assertion_reported_as_failure() {
    fn mismatch(case: &mut UnitTestCase) -> Result<()> {
        case.assert_equals("expected", "actual")
    }

    let harness = Harness::new();
    let report = harness
        .runner
        .run(&[TestClass::new("Failing").test("test_mismatch", mismatch)]);

    match report.get("Failing", "test_mismatch").unwrap().outcome() {
        Outcome::Failed(e) => assert_eq!(e.to_string(), "assertion failed: \"expected\" != \"actual\""),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(!report.is_success());
}
