//! Settings overrides are visible inside the test and gone after it

use std::sync::Arc;

use sanetest::{
    mock_settings, settings, with_override, AttributeTarget, ErrorKind, MethodOrder, Outcome,
    Settings, TestClass, TestMethod, Value,
};
use tempfile::TempDir;

use crate::common::{assert_all_passed, fixture_path, Harness, EXISTING, INSANE};

fn mocking() -> TestClass {
    TestClass::new("TestMocking")
        .test("test_sanity_for_missing_setting_present", |case| {
            case.assert_false(case.settings().has_attr(INSANE))
        })
        .test("test_expected_setting_present", |case| {
            case.assert_equals(Some(Value::from("owned")), case.settings().get(EXISTING))
        })
        .method(
            TestMethod::new("test_setting_mocked", |case| {
                case.assert_equals(Some(Value::from("Cthulhed!")), case.settings().get(INSANE))
            })
            .mock_settings(INSANE, "Cthulhed!"),
        )
        .method(
            TestMethod::new("test_existing_setting_mocked", |case| {
                case.assert_equals(Some(Value::from("pwned!")), case.settings().get(EXISTING))
            })
            .mock_settings(EXISTING, "pwned!"),
        )
}

fn mocking_cleans_after_itself() -> TestClass {
    TestClass::new("TestMockingCleansAfterItself")
        .with_order(MethodOrder::Alphabetical)
        .test("test_bbb_attribute_not_present", |case| {
            case.assert_false(case.settings().has_attr(INSANE))
        })
        .method(
            TestMethod::new("test_aaa_mocked", |case| {
                case.assert_equals(Some(Value::from("Cthulhed!")), case.settings().get(INSANE))
            })
            .mock_settings(INSANE, "Cthulhed!"),
        )
}

#[test]
fn test_mocking_classes_pass() {
    let harness = Harness::new();
    let report = harness
        .runner
        .run(&[mocking(), mocking_cleans_after_itself()]);
    assert_eq!(report.len(), 6);
    assert_all_passed(&report);

    assert!(!harness.settings.has_attr(INSANE));
    assert_eq!(harness.settings.get_str(EXISTING).as_deref(), Some("owned"));
}

#[test]
fn test_mocking_against_process_wide_settings() {
    let global = settings();
    global.load_file(&fixture_path("settings.toml")).unwrap();

    let harness = Harness::with_settings(global.clone());
    assert_all_passed(&harness.runner.run(&[mocking(), mocking_cleans_after_itself()]));

    assert!(!global.has_attr(INSANE));
    assert!(Arc::ptr_eq(&global, &settings()));
}

#[test]
fn test_failed_test_still_restores() {
    let harness = Harness::new();
    let report = harness.runner.run(&[TestClass::new("Failing").method(
        TestMethod::new("test_fails_while_mocked", |case| case.fail(Some("on purpose")))
            .mock_settings(INSANE, "Cthulhed!")
            .mock_settings(EXISTING, "pwned!"),
    )]);

    assert_eq!(report.failed(), 1);
    assert!(!harness.settings.has_attr(INSANE));
    assert_eq!(harness.settings.get_str(EXISTING).as_deref(), Some("owned"));
}

#[test]
fn test_frozen_settings_error_the_test() {
    let harness = Harness::new();
    harness.settings.freeze();
    let report = harness.runner.run(&[TestClass::new("Frozen").method(
        TestMethod::new("test_never_runs", |case| case.fail(Some("body must not run")))
            .mock_settings(INSANE, "Cthulhed!"),
    )]);
    harness.settings.thaw();

    match report.get("Frozen", "test_never_runs").unwrap().outcome() {
        Outcome::Errored(e) => assert_eq!(e.kind(), ErrorKind::TargetNotWritable),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(!harness.settings.has_attr(INSANE));
}

#[test]
fn test_closure_and_decorator_forms_agree() {
    let settings = Settings::with_values([(EXISTING, "owned")]);

    let seen = with_override(&settings, INSANE, "Cthulhed!", || Ok(settings.get(INSANE))).unwrap();
    assert_eq!(seen, Some(Value::from("Cthulhed!")));
    assert!(!settings.has_attr(INSANE));

    let seen = mock_settings(EXISTING, "pwned!")
        .apply(&settings, || Ok(settings.get_str(EXISTING)))
        .unwrap();
    assert_eq!(seen.as_deref(), Some("pwned!"));
    assert_eq!(settings.get_str(EXISTING).as_deref(), Some("owned"));
}

#[test]
fn test_settings_file_drives_the_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "LANGUAGE_CODE = \"de\"\nCUSTOM_FLAG = true\n").unwrap();

    let harness = Harness::with_settings(Arc::new(Settings::from_file(&path).unwrap()));
    let report = harness.runner.run(&[TestClass::new("FromFile")
        .test("test_flag", |case| case.assert_equals(Some(Value::Bool(true)), case.settings().get("CUSTOM_FLAG")))
        .test("test_locale_from_file", |case| {
            case.assert_equals(
                crate::common::GERMAN_STRING,
                case.gettext(crate::common::SOURCE_STRING),
            )
        })]);
    assert_all_passed(&report);
}
