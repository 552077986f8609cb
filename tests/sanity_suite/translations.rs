//! Per-class locale activation

use sanetest::{TestClass, Translator};

use crate::common::{assert_all_passed, Harness, CZECH_STRING, GERMAN_STRING, SOURCE_STRING};

#[test]
fn test_czech_string_acquired() {
    let harness = Harness::new();
    let report = harness.runner.run(&[TestClass::new("TestTranslations")
        .test("test_czech_string_acquired", |case| {
            case.assert_equals(CZECH_STRING, case.gettext(SOURCE_STRING))
        })]);
    assert_all_passed(&report);
}

#[test]
fn test_german_translated_string_acquired() {
    let harness = Harness::new();
    let report = harness.runner.run(&[TestClass::new("TestNotDefaultTranslations")
        .with_language("de")
        .test("test_german_translated_string_acquired", |case| {
            case.assert_equals(GERMAN_STRING, case.gettext(SOURCE_STRING))
        })]);
    assert_all_passed(&report);
}

#[test]
fn test_english_string_acquired_without_translations() {
    let harness = Harness::new();
    let report = harness.runner.run(&[TestClass::new("TestSkippedTranslations")
        .without_translations()
        .test("test_english_string_acquired", |case| {
            case.translator().deactivate();
            case.assert_equals(SOURCE_STRING, case.gettext(SOURCE_STRING))
        })]);
    assert_all_passed(&report);
}

#[test]
fn test_locale_does_not_leak_between_classes() {
    let harness = Harness::new();
    let report = harness.runner.run(&[
        TestClass::new("German")
            .with_language("de")
            .test("test_german", |case| case.assert_equals(GERMAN_STRING, case.gettext(SOURCE_STRING))),
        TestClass::new("Default")
            .test("test_czech", |case| case.assert_equals(CZECH_STRING, case.gettext(SOURCE_STRING))),
        TestClass::new("Regional")
            .with_language("de_AT")
            .test("test_language_fallback", |case| {
                case.assert_equals(GERMAN_STRING, case.gettext(SOURCE_STRING))
            }),
    ]);
    assert_all_passed(&report);
    assert!(harness.translation.active_locale().is_none());
}

#[test]
fn test_previous_locale_restored_after_run() {
    let harness = Harness::new();
    harness.translation.activate("de");

    harness.runner.run(&[TestClass::new("Czech")
        .with_language("cs")
        .test("test_czech", |case| case.assert_equals(CZECH_STRING, case.gettext(SOURCE_STRING)))]);

    assert_eq!(harness.translation.active_locale().as_deref(), Some("de"));
}
