//! Method order is a declared property of the class
//!
//! Tests that depend on running in a given order declare it; the runner
//! never infers it from method names.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sanetest::{MethodOrder, TestClass};

use crate::common::{assert_all_passed, Harness};

fn counting_class(order: MethodOrder, counter: Arc<AtomicUsize>) -> TestClass {
    let (second, first) = (counter.clone(), counter);
    TestClass::new("TestExplicitOrdering")
        .with_order(order)
        .test("test_bbb_inserting_another", move |case| {
            let seen = second.fetch_add(1, Ordering::SeqCst) + 1;
            case.assert_equals(2usize, seen)
        })
        .test("test_aaa_inserting_first", move |case| {
            let seen = first.fetch_add(1, Ordering::SeqCst) + 1;
            case.assert_equals(1usize, seen)
        })
}

#[test]
fn test_alphabetical_order_is_honored() {
    let harness = Harness::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let report = harness
        .runner
        .run(&[counting_class(MethodOrder::Alphabetical, counter.clone())]);

    assert_all_passed(&report);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_declaration_order_runs_as_added() {
    let harness = Harness::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let report = harness
        .runner
        .run(&[counting_class(MethodOrder::Declaration, counter)]);

    assert_eq!(report.results()[0].method(), "test_bbb_inserting_another");
    assert_eq!(report.failed(), 2);
}
