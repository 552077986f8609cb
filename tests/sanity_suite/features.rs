//! Even unit tests can reach views through the client

use sanetest::TestClass;

use crate::common::{assert_all_passed, Harness};

#[test]
fn test_even_unit_can_access_views() {
    let harness = Harness::new();
    let report = harness.runner.run(&[TestClass::new("TestFeatures")
        .test("test_even_unit_can_access_views", |case| {
            case.assert_equals(200u16, case.client().get("/testtwohundred/").status)
        })
        .test("test_unknown_view_is_404", |case| {
            case.assert_equals(404u16, case.client().get("/nothing-here/").status)
        })]);
    assert_all_passed(&report);
}
