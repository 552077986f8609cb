//! Per-class and per-test environment isolation
//!
//! Two independent guarantees, applied around every test:
//!
//! - **Cache reset**: the shared cache is cleared before each test starts and
//!   again after it ends, however it ends.
//! - **Locale activation**: a test class may declare a locale. It is activated
//!   when the class starts and the previously active locale is put back when
//!   the class finishes, so locale state never crosses a class boundary.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized → LocaleApplied
//!   → { CacheCleared → TestRunning → CacheDiscardedAfter }*
//!   → LocaleRestored
//! ```
//!
//! `LocaleRestored` is reached even when a test panics: [`ClassScope`]
//! restores in `Drop` if [`ClassScope::finish`] was never called.

use std::sync::Arc;

use sanetest_core::{CacheBackend, Translator};
use sanetest_settings::Settings;
use tracing::{debug, info};

/// Per-class environment declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    translation_language_code: Option<String>,
    make_translations: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            translation_language_code: None,
            make_translations: true,
        }
    }
}

impl EnvironmentConfig {
    /// Default declaration: translations on, locale from settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a non-default target locale
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.translation_language_code = Some(code.into());
        self
    }

    /// Leave the translator untouched for this class
    pub fn without_translations(mut self) -> Self {
        self.make_translations = false;
        self
    }

    /// Declared locale, if any
    pub fn language(&self) -> Option<&str> {
        self.translation_language_code.as_deref()
    }

    /// Whether the class engages localization
    pub fn makes_translations(&self) -> bool {
        self.make_translations
    }

    /// Locale to activate for the class
    ///
    /// The declared locale wins; otherwise `LANGUAGE_CODE` from `settings`.
    /// `None` means the translator is left as it is.
    pub fn resolve_locale(&self, settings: &Settings) -> Option<String> {
        if !self.make_translations {
            return None;
        }
        self.translation_language_code
            .clone()
            .or_else(|| settings.language_code())
    }
}

/// Where a class scope is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsolationState {
    /// Scope not yet entered
    Uninitialized,
    /// Class locale active (or deliberately untouched)
    LocaleApplied,
    /// Cache cleared, test about to start
    CacheCleared,
    /// Test body executing
    TestRunning,
    /// Test finished and its cache writes discarded
    CacheDiscardedAfter,
    /// Previous locale restored; terminal
    LocaleRestored,
}

/// Owner of the collaborators the isolation guarantees act on
pub struct EnvironmentIsolation {
    settings: Arc<Settings>,
    cache: Arc<dyn CacheBackend>,
    translator: Arc<dyn Translator>,
}

impl EnvironmentIsolation {
    /// Isolate tests over these collaborators
    pub fn new(
        settings: Arc<Settings>,
        cache: Arc<dyn CacheBackend>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            settings,
            cache,
            translator,
        }
    }

    /// Shared settings
    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    /// Shared cache
    pub fn cache(&self) -> Arc<dyn CacheBackend> {
        Arc::clone(&self.cache)
    }

    /// Shared translator
    pub fn translator(&self) -> Arc<dyn Translator> {
        Arc::clone(&self.translator)
    }

    /// Empty the shared cache
    pub fn reset_cache(&self) {
        self.cache.clear();
        debug!("Cache reset");
    }

    /// Scope for a test class that has not started yet
    ///
    /// Nothing is applied until [`ClassScope::enter`] (or the first
    /// [`ClassScope::run_test`]).
    pub fn class_scope(&self, class_name: &str, config: &EnvironmentConfig) -> ClassScope<'_> {
        ClassScope {
            isolation: self,
            class_name: class_name.to_string(),
            config: config.clone(),
            applied: None,
            previous: None,
            state: IsolationState::Uninitialized,
            tests_run: 0,
        }
    }

    /// Start a test class: apply its locale and return the scope that
    /// restores it
    pub fn enter_class(&self, class_name: &str, config: &EnvironmentConfig) -> ClassScope<'_> {
        let mut scope = self.class_scope(class_name, config);
        scope.enter();
        scope
    }
}

impl std::fmt::Debug for EnvironmentIsolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentIsolation")
            .field("settings", &self.settings)
            .field("active_locale", &self.translator.active_locale())
            .field("cached_entries", &self.cache.len())
            .finish()
    }
}

/// Clears the cache when dropped, so the post-test discard also runs on
/// unwinding
struct CacheDiscard<'a>(&'a dyn CacheBackend);

impl Drop for CacheDiscard<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

/// Active test class
#[must_use = "dropping a class scope immediately restores the previous locale"]
pub struct ClassScope<'a> {
    isolation: &'a EnvironmentIsolation,
    class_name: String,
    config: EnvironmentConfig,
    applied: Option<String>,
    /// `Some(previous)` when a locale was activated; `None` when untouched
    previous: Option<Option<String>>,
    state: IsolationState,
    tests_run: usize,
}

impl<'a> ClassScope<'a> {
    /// Current lifecycle state
    pub fn state(&self) -> IsolationState {
        self.state
    }

    /// Locale this scope activated, if any
    pub fn applied_locale(&self) -> Option<&str> {
        self.applied.as_deref()
    }

    /// Name of the class this scope belongs to
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Number of tests run in this scope
    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    /// Apply the class locale
    ///
    /// Only the first call does anything.
    pub fn enter(&mut self) {
        if self.state != IsolationState::Uninitialized {
            return;
        }
        let isolation = self.isolation;
        self.applied = self.config.resolve_locale(&isolation.settings);
        self.previous = self.applied.as_ref().map(|locale| {
            let previous = isolation.translator.active_locale();
            isolation.translator.activate(locale);
            previous
        });
        self.state = IsolationState::LocaleApplied;
        info!(
            class = %self.class_name,
            locale = self.applied.as_deref().unwrap_or("<unchanged>"),
            "Entered test class"
        );
    }

    /// Run one test between two cache resets, entering the class first if
    /// needed
    pub fn run_test<R>(&mut self, body: impl FnOnce() -> R) -> R {
        self.enter();
        let isolation = self.isolation;
        isolation.reset_cache();
        self.state = IsolationState::CacheCleared;

        let discard = CacheDiscard(isolation.cache.as_ref());
        self.state = IsolationState::TestRunning;
        let outcome = body();
        drop(discard);

        self.state = IsolationState::CacheDiscardedAfter;
        self.tests_run += 1;
        outcome
    }

    /// Restore the previous locale and end the class
    pub fn finish(mut self) -> IsolationState {
        self.restore();
        self.state
    }

    fn restore(&mut self) {
        if self.state == IsolationState::Uninitialized {
            self.state = IsolationState::LocaleRestored;
            return;
        }
        if let Some(previous) = self.previous.take() {
            match previous.as_deref() {
                Some(locale) => self.isolation.translator.activate(locale),
                None => self.isolation.translator.deactivate(),
            }
        }
        self.state = IsolationState::LocaleRestored;
        info!(
            class = %self.class_name,
            tests = self.tests_run,
            "Finished test class"
        );
    }
}

impl Drop for ClassScope<'_> {
    fn drop(&mut self) {
        if self.state != IsolationState::LocaleRestored {
            self.restore();
        }
    }
}
