//! The unit test case a test method receives
//!
//! [`UnitTestCase`] carries the shared collaborators (settings, cache,
//! translator, client) and exposes the assertion vocabulary twice: as typed
//! methods (`assert_equals`, ...) and by name through [`UnitTestCase::call`],
//! which accepts both the `snake_case` names and their camelCase aliases.

use std::fmt;
use std::sync::Arc;

use sanetest_core::{CacheBackend, Error, ErrorKind, Result, Translator, Value};
use sanetest_isolation::EnvironmentIsolation;
use sanetest_settings::Settings;

use crate::aliases::{unit_test_aliases, AliasTable};
use crate::assertions;
use crate::client::Client;

/// Per-method test context
pub struct UnitTestCase {
    name: String,
    settings: Arc<Settings>,
    cache: Arc<dyn CacheBackend>,
    translator: Arc<dyn Translator>,
    client: Client,
}

impl UnitTestCase {
    /// Test case named `name` over the collaborators of `isolation`
    pub fn new(name: impl Into<String>, isolation: &EnvironmentIsolation, client: Client) -> Self {
        Self {
            name: name.into(),
            settings: isolation.settings(),
            cache: isolation.cache(),
            translator: isolation.translator(),
            client,
        }
    }

    /// Name of the running test method
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Shared cache
    pub fn cache(&self) -> &dyn CacheBackend {
        self.cache.as_ref()
    }

    /// Shared translator
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    /// Test client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Render `message` in the active locale
    pub fn gettext(&self, message: &str) -> String {
        self.translator.gettext(message)
    }

    /// Alias table used by [`UnitTestCase::call`]
    pub fn aliases(&self) -> &'static AliasTable {
        unit_test_aliases()
    }

    /// Invoke an assertion by either of its names
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidValue` for an unknown name or wrong arguments,
    /// and whatever the assertion itself raises.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<()> {
        match self.aliases().get(name) {
            Some(entry) => entry.call(args),
            None => Err(Error::invalid_value(format!("unknown assertion '{}'", name))),
        }
    }

    // ========================================================================
    // Typed assertions
    // ========================================================================

    /// See [`assertions::assert_true`]
    pub fn assert_true(&self, condition: bool) -> Result<()> {
        assertions::assert_true(condition)
    }

    /// See [`assertions::assert_false`]
    pub fn assert_false(&self, condition: bool) -> Result<()> {
        assertions::assert_false(condition)
    }

    /// See [`assertions::assert_equals`]
    pub fn assert_equals<A, B>(&self, first: A, second: B) -> Result<()>
    where
        A: PartialEq<B> + fmt::Debug,
        B: fmt::Debug,
    {
        assertions::assert_equals(first, second)
    }

    /// See [`assertions::assert_not_equals`]
    pub fn assert_not_equals<A, B>(&self, first: A, second: B) -> Result<()>
    where
        A: PartialEq<B> + fmt::Debug,
        B: fmt::Debug,
    {
        assertions::assert_not_equals(first, second)
    }

    /// See [`assertions::assert_almost_equals`]
    pub fn assert_almost_equals(&self, first: f64, second: f64) -> Result<()> {
        assertions::assert_almost_equals(first, second)
    }

    /// See [`assertions::assert_almost_equals_places`]
    pub fn assert_almost_equals_places(&self, first: f64, second: f64, places: u32) -> Result<()> {
        assertions::assert_almost_equals_places(first, second, places)
    }

    /// See [`assertions::assert_not_almost_equals`]
    pub fn assert_not_almost_equals(&self, first: f64, second: f64) -> Result<()> {
        assertions::assert_not_almost_equals(first, second)
    }

    /// See [`assertions::assert_in`]
    pub fn assert_in<T: PartialEq + fmt::Debug>(&self, member: &T, container: &[T]) -> Result<()> {
        assertions::assert_in(member, container)
    }

    /// See [`assertions::assert_not_in`]
    pub fn assert_not_in<T: PartialEq + fmt::Debug>(
        &self,
        member: &T,
        container: &[T],
    ) -> Result<()> {
        assertions::assert_not_in(member, container)
    }

    /// See [`assertions::assert_raises`]
    pub fn assert_raises<T, F>(&self, expected: ErrorKind, f: F) -> Result<Error>
    where
        F: FnOnce() -> Result<T>,
    {
        assertions::assert_raises(expected, f)
    }

    /// See [`assertions::fail`]
    pub fn fail(&self, message: Option<&str>) -> Result<()> {
        assertions::fail(message)
    }

    /// See [`assertions::skip`]
    pub fn skip(&self, reason: impl Into<String>) -> Result<()> {
        assertions::skip(reason)
    }
}

impl fmt::Debug for UnitTestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitTestCase")
            .field("name", &self.name)
            .field("active_locale", &self.translator.active_locale())
            .field("client", &self.client)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanetest_isolation::{Catalog, LocMemCache, Translation};

    fn case() -> UnitTestCase {
        let isolation = EnvironmentIsolation::new(
            Arc::new(Settings::new()),
            Arc::new(LocMemCache::new()),
            Arc::new(Translation::new(
                Catalog::new().with_locale("de", [("hello", "hallo")]),
            )),
        );
        UnitTestCase::new("test_case", &isolation, Client::new())
    }

    #[test]
    fn test_call_by_both_names() {
        let case = case();
        assert!(case.call("assert_true", &[Value::Bool(true)]).is_ok());
        assert!(case.call("assertTrue", &[Value::Bool(true)]).is_ok());
        assert!(case.call("assertEquals", &[1.into(), 1.into()]).is_ok());
        assert_eq!(
            case.call("assertFalse", &[Value::Bool(true)])
                .unwrap_err()
                .kind(),
            ErrorKind::AssertionFailure
        );
    }

    #[test]
    fn test_call_unknown_name() {
        let err = case().call("assertNothing", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("assertNothing"));
    }

    #[test]
    fn test_typed_assertions() {
        let case = case();
        assert!(case.assert_equals(1, 1).is_ok());
        assert!(case.assert_not_equals("a", "b").is_ok());
        assert!(case.assert_almost_equals(1.0, 1.000_000_01).is_ok());
        assert!(case.assert_in(&"x", &["x", "y"]).is_ok());
        assert!(case
            .assert_raises(ErrorKind::AssertionFailure, || case.fail(None))
            .is_ok());
        assert_eq!(case.skip("later").unwrap_err().kind(), ErrorKind::Skipped);
    }

    #[test]
    fn test_collaborators_are_shared() {
        let case = case();
        case.cache().set("k", Value::Int(1));
        assert_eq!(case.cache().get("k"), Some(Value::Int(1)));

        case.translator().activate("de");
        assert_eq!(case.gettext("hello"), "hallo");
        assert_eq!(case.name(), "test_case");
    }
}
