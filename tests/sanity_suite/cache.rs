//! The shared cache never carries values from one test into the next

use sanetest::{CacheBackend, MethodOrder, TestClass, Value};

use crate::common::{assert_all_passed, Harness};

fn cache_clearance() -> TestClass {
    TestClass::new("TestProperCacheClearance")
        .with_order(MethodOrder::Alphabetical)
        .test("test_bbb_cache_retrieval", |case| {
            case.assert_equals(None::<Value>, case.cache().get("test"))
        })
        .test("test_aaa_inserting_cache", |case| {
            case.cache().set("test", Value::from("pwned"));
            case.assert_equals(Some(Value::from("pwned")), case.cache().get("test"))
        })
}

#[test]
fn test_cache_cleared_between_tests() {
    let harness = Harness::new();
    let report = harness.runner.run(&[cache_clearance()]);

    let order: Vec<&str> = report.results().iter().map(|r| r.method()).collect();
    assert_eq!(order, vec!["test_aaa_inserting_cache", "test_bbb_cache_retrieval"]);
    assert_all_passed(&report);
}

#[test]
fn test_stale_entries_cleared_before_first_test() {
    let harness = Harness::new();
    harness.cache.set("stale", Value::Bool(true));

    let report = harness.runner.run(&[TestClass::new("Stale")
        .test("test_nothing_left", |case| case.assert_true(case.cache().is_empty()))]);
    assert_all_passed(&report);
    assert!(harness.cache.is_empty());
}

#[test]
fn test_cache_cleared_after_panic() {
    let harness = Harness::new();
    let report = harness.runner.run(&[TestClass::new("Panicky")
        .test("test_panics", |case| {
            case.cache().set("leak", Value::Int(1));
            panic!("test panicked on purpose");
        })
        .test("test_after", |case| case.assert_true(case.cache().get("leak").is_none()))]);

    assert_eq!(report.panicked(), 1);
    assert_eq!(report.passed(), 1);
    assert!(harness.cache.is_empty());
}
