//! camelCase aliases resolve to the very same assertion

use sanetest::{camelize, ErrorKind, Outcome, TestClass, Value};

use crate::common::{assert_all_passed, Harness};

fn aliases() -> TestClass {
    TestClass::new("TestUnitAliases")
        .test("test_camelcase_aliases", |case| {
            for name in [
                "assert_true",
                "assert_equals",
                "assert_false",
                "assert_almost_equals",
            ] {
                let alias = camelize(name)?;
                let by_name = case.aliases().get(name);
                let by_alias = case.aliases().get(alias.as_str());
                case.assert_true(by_name.is_some())?;
                case.assert_true(matches!(
                    (by_name, by_alias),
                    (Some(a), Some(b)) if std::ptr::eq(a, b)
                ))?;
            }
            Ok(())
        })
        .test("test_get_camel", |case| {
            case.assert_equals(camelize("assert_true")?, "assertTrue")
        })
        .test("test_get_camel_invalid_trail", |case| {
            case.assert_raises(ErrorKind::InvalidName, || camelize("some_trailing_test_"))?;
            Ok(())
        })
        .test("test_get_camel_invalid_double_under", |case| {
            case.assert_raises(ErrorKind::InvalidName, || camelize("toomuchtrail__between"))?;
            Ok(())
        })
        .test("test_get_camel_invalid_prefix", |case| {
            case.assert_raises(ErrorKind::InvalidName, || camelize("_prefix"))?;
            Ok(())
        })
        .test("test_alias_call", |case| {
            case.call("assertEquals", &[Value::from(1), Value::from(1)])?;
            case.call("assertAlmostEquals", &[Value::from(1.0), Value::from(1)])?;
            case.call("assertIn", &[Value::from("ell"), Value::from("hello")])
        })
}

#[test]
fn test_aliases_all_pass() {
    let harness = Harness::new();
    assert_all_passed(&harness.runner.run(&[aliases()]));
}

#[test]
fn test_alias_failure_matches_name_failure() {
    let harness = Harness::new();
    let report = harness.runner.run(&[TestClass::new("Mismatch")
        .test("by_name", |case| case.call("assert_equals", &[1.into(), 2.into()]))
        .test("by_alias", |case| case.call("assertEquals", &[1.into(), 2.into()]))]);

    let message = |method: &str| match report.get("Mismatch", method).unwrap().outcome() {
        Outcome::Failed(e) => e.to_string(),
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(message("by_name"), message("by_alias"));
}

#[test]
fn test_unknown_alias_errors() {
    let harness = Harness::new();
    let report = harness.runner.run(&[
        TestClass::new("Unknown").test("test_unknown", |case| case.call("assertSomething", &[]))
    ]);
    match report.get("Unknown", "test_unknown").unwrap().outcome() {
        Outcome::Errored(e) => assert_eq!(e.kind(), ErrorKind::InvalidValue),
        other => panic!("unexpected outcome {:?}", other),
    }
}
