//! sanetest - unit test harness core
//!
//! Three pieces of test-harness machinery, plus the test case that composes
//! them:
//!
//! - **Assertion aliases**: every `snake_case` assertion is also reachable by
//!   its camelCase alias, and both names resolve to the same function.
//! - **Scoped overrides**: [`mock_settings`] / [`with_override`] install a
//!   settings value for a bounded region and restore the exact prior state
//!   (including "absent") however the region exits.
//! - **Environment isolation**: the shared cache is cleared around every test
//!   and a test class may declare the locale it runs under.
//!
//! # Quick Start
//!
//! ```ignore
//! use sanetest::prelude::*;
//!
//! let isolation = EnvironmentIsolation::new(settings(), cache, translator);
//! let runner = Runner::new(isolation, Client::new());
//!
//! let report = runner.run(&[TestClass::new("TestAliases")
//!     .test("test_camel_case", |case| {
//!         case.call("assertEquals", &[1.into(), 1.into()])
//!     })
//!     .method(
//!         TestMethod::new("test_mocked", |case| {
//!             case.assert_equals(case.settings().get_str("DEBUG_LEVEL"), Some("high".into()))
//!         })
//!         .mock_settings("DEBUG_LEVEL", "high"),
//!     )]);
//! assert!(report.is_success());
//! ```
//!
//! # Crates
//!
//! The public API is re-exported from the layer crates: `sanetest-core`
//! (errors, values, naming, collaborator traits), `sanetest-settings`,
//! `sanetest-isolation` and `sanetest-case`.

pub use sanetest_case::{
    assertions, unit_test_aliases, AliasTable, AssertionEntry, AssertionFn, Client,
    ClientBuilder, Handler, Method, MethodOrder, Outcome, Request, Response, RunReport, Runner,
    TestClass, TestFn, TestMethod, TestResult, UnitTestCase, RECOGNIZED_ASSERTIONS,
};
pub use sanetest_core::{
    camelize, camelize_with, Alias, AssertionName, AttributeTarget, CacheBackend, Error,
    ErrorKind, InvalidNameReason, Result, Translator, Value, SEPARATOR,
};
pub use sanetest_isolation::{
    language_of, normalize_locale, Catalog, ClassScope, EnvironmentConfig, EnvironmentIsolation,
    IsolationState, LocMemCache, Translation,
};
pub use sanetest_settings::{
    is_setting_name, mock_settings, settings, value_from_toml, with_override, MockSettings,
    OverrideRecord, OverrideScope, Settings, LANGUAGE_CODE, SETTINGS_ENV_VAR,
};

/// Everything a test module usually needs
pub mod prelude {
    pub use crate::{
        camelize, mock_settings, settings, with_override, AttributeTarget, CacheBackend, Catalog,
        Client, EnvironmentConfig, EnvironmentIsolation, Error, ErrorKind, LocMemCache,
        MethodOrder, Response, Result, RunReport, Runner, Settings, TestClass, TestMethod,
        Translation, Translator, UnitTestCase, Value,
    };
}
