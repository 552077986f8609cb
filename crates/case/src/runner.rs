//! Test classes and the sequential runner
//!
//! A [`TestClass`] groups [`TestMethod`]s under one [`EnvironmentConfig`].
//! [`Runner::run`] executes classes one after another:
//!
//! ```text
//! for class:
//!     enter class scope (activate locale)
//!     for method in class order:
//!         clear cache
//!         fresh UnitTestCase
//!         set_up → mock_settings(...) { method } → tear_down
//!         clear cache
//!     restore locale
//! ```
//!
//! Panics inside a method are caught and reported as [`Outcome::Panicked`];
//! the override, cache and locale scopes are guards, so they release during
//! unwinding before the runner records the outcome.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use sanetest_core::{Error, ErrorKind, Result, Value};
use sanetest_isolation::{EnvironmentConfig, EnvironmentIsolation};
use sanetest_settings::{mock_settings, MockSettings, Settings};
use tracing::{debug, info, warn};

use crate::case::UnitTestCase;
use crate::client::Client;

/// Body of a test method or hook
pub type TestFn = Arc<dyn Fn(&mut UnitTestCase) -> Result<()> + Send + Sync>;

/// One test method with its settings overrides
#[derive(Clone)]
pub struct TestMethod {
    name: String,
    body: TestFn,
    mocks: Vec<MockSettings>,
}

impl TestMethod {
    /// Test method `name` running `body`
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut UnitTestCase) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
            mocks: Vec::new(),
        }
    }

    /// Override a setting while this method runs
    ///
    /// Repeated calls nest; the first declared override is the outermost.
    pub fn mock_settings(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.mocks.push(mock_settings(attribute, value));
        self
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared overrides, outermost first
    pub fn mocks(&self) -> &[MockSettings] {
        &self.mocks
    }
}

impl fmt::Debug for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestMethod")
            .field("name", &self.name)
            .field("mocks", &self.mocks)
            .finish()
    }
}

/// Order in which a class runs its methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MethodOrder {
    /// The order methods were added
    #[default]
    Declaration,
    /// Sorted by method name
    Alphabetical,
}

/// A group of test methods sharing one environment declaration
#[derive(Clone)]
pub struct TestClass {
    name: String,
    config: EnvironmentConfig,
    order: MethodOrder,
    set_up: Option<TestFn>,
    tear_down: Option<TestFn>,
    methods: Vec<TestMethod>,
}

impl TestClass {
    /// Empty class with the default environment
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: EnvironmentConfig::default(),
            order: MethodOrder::default(),
            set_up: None,
            tear_down: None,
            methods: Vec::new(),
        }
    }

    /// Replace the environment declaration
    pub fn with_config(mut self, config: EnvironmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Activate `code` for this class instead of the settings default
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.config = self.config.with_language(code);
        self
    }

    /// Leave the translator untouched for this class
    pub fn without_translations(mut self) -> Self {
        self.config = self.config.without_translations();
        self
    }

    /// Method ordering
    pub fn with_order(mut self, order: MethodOrder) -> Self {
        self.order = order;
        self
    }

    /// Hook run before every method
    pub fn set_up<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut UnitTestCase) -> Result<()> + Send + Sync + 'static,
    {
        self.set_up = Some(Arc::new(hook));
        self
    }

    /// Hook run after every method whose `set_up` succeeded, even when the
    /// method panics
    pub fn tear_down<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut UnitTestCase) -> Result<()> + Send + Sync + 'static,
    {
        self.tear_down = Some(Arc::new(hook));
        self
    }

    /// Add a method
    pub fn method(mut self, method: TestMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a method without overrides
    pub fn test<F>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut UnitTestCase) -> Result<()> + Send + Sync + 'static,
    {
        self.method(TestMethod::new(name, body))
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Environment declaration
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Declared ordering
    pub fn order(&self) -> MethodOrder {
        self.order
    }

    /// Methods in declaration order
    pub fn methods(&self) -> &[TestMethod] {
        &self.methods
    }

    /// Methods in the order they will run
    pub fn ordered_methods(&self) -> Vec<&TestMethod> {
        let mut methods: Vec<&TestMethod> = self.methods.iter().collect();
        if self.order == MethodOrder::Alphabetical {
            methods.sort_by(|a, b| a.name.cmp(&b.name));
        }
        methods
    }

    fn execute(&self, method: &TestMethod, settings: &Settings, case: &mut UnitTestCase) -> Result<()> {
        if let Some(set_up) = &self.set_up {
            set_up(case)?;
        }
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            MockSettings::apply_all(&method.mocks, settings, || (method.body)(case))
        }));
        let cleanup: Vec<Error> = match &self.tear_down {
            Some(tear_down) => tear_down(case).err().into_iter().collect(),
            None => Vec::new(),
        };
        match outcome {
            Ok(outcome) => Error::with_cleanup(outcome, cleanup),
            Err(payload) => {
                for e in &cleanup {
                    warn!(class = %self.name, test = %method.name, error = %e, "tear_down failed after panic");
                }
                panic::resume_unwind(payload)
            }
        }
    }
}

impl fmt::Debug for TestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestClass")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("order", &self.order)
            .field("methods", &self.methods)
            .finish()
    }
}

/// How one test method ended
#[derive(Debug)]
pub enum Outcome {
    /// Completed without error
    Passed,
    /// An assertion failed
    Failed(Error),
    /// Any other error escaped the method
    Errored(Error),
    /// The method skipped itself
    Skipped(String),
    /// The method panicked
    Panicked(String),
}

impl Outcome {
    /// Classify a method result
    pub fn from_result(result: Result<()>) -> Self {
        match result {
            Ok(()) => Outcome::Passed,
            Err(e) => match e.kind() {
                ErrorKind::AssertionFailure => Outcome::Failed(e),
                ErrorKind::Skipped => Outcome::Skipped(skip_reason(&e)),
                _ => Outcome::Errored(e),
            },
        }
    }

    /// Short label for logs and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed(_) => "failed",
            Outcome::Errored(_) => "errored",
            Outcome::Skipped(_) => "skipped",
            Outcome::Panicked(_) => "panicked",
        }
    }

    /// Whether the outcome counts against the run
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            Outcome::Failed(_) | Outcome::Errored(_) | Outcome::Panicked(_)
        )
    }

    /// The error behind a failed or errored outcome
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Failed(e) | Outcome::Errored(e) => Some(e),
            _ => None,
        }
    }
}

fn skip_reason(error: &Error) -> String {
    match error {
        Error::Skipped(reason) => reason.clone(),
        Error::WithCleanupFailures { primary, .. } => skip_reason(primary),
        other => other.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Result of one test method
#[derive(Debug)]
pub struct TestResult {
    class: String,
    method: String,
    outcome: Outcome,
}

impl TestResult {
    /// Owning class
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// How it ended
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// Results of a run, in execution order
#[derive(Debug, Default)]
pub struct RunReport {
    results: Vec<TestResult>,
}

impl RunReport {
    fn record(&mut self, class: &str, method: &str, outcome: Outcome) {
        self.results.push(TestResult {
            class: class.to_string(),
            method: method.to_string(),
            outcome,
        });
    }

    /// Result of `class::method`, if it ran
    pub fn get(&self, class: &str, method: &str) -> Option<&TestResult> {
        self.results
            .iter()
            .find(|r| r.class == class && r.method == method)
    }

    /// All results in execution order
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Number of methods run
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing ran
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn count(&self, label: &str) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.label() == label)
            .count()
    }

    /// Number of passed methods
    pub fn passed(&self) -> usize {
        self.count("passed")
    }

    /// Number of failed methods
    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    /// Number of errored methods
    pub fn errored(&self) -> usize {
        self.count("errored")
    }

    /// Number of skipped methods
    pub fn skipped(&self) -> usize {
        self.count("skipped")
    }

    /// Number of panicked methods
    pub fn panicked(&self) -> usize {
        self.count("panicked")
    }

    /// No failures, errors or panics
    pub fn is_success(&self) -> bool {
        !self.results.iter().any(|r| r.outcome.is_problem())
    }
}

/// Sequential test runner
#[derive(Debug)]
pub struct Runner {
    isolation: EnvironmentIsolation,
    client: Client,
}

impl Runner {
    /// Runner over `isolation`, handing `client` to every test case
    pub fn new(isolation: EnvironmentIsolation, client: Client) -> Self {
        Self { isolation, client }
    }

    /// Collaborators the runner isolates
    pub fn isolation(&self) -> &EnvironmentIsolation {
        &self.isolation
    }

    /// Run `classes` in order
    ///
    /// Holds the settings session lock for the whole run.
    pub fn run(&self, classes: &[TestClass]) -> RunReport {
        let settings = self.isolation.settings();
        let _session = settings.lock_session();

        let mut report = RunReport::default();
        for class in classes {
            self.run_class(class, &settings, &mut report);
        }

        info!(
            tests = report.len(),
            passed = report.passed(),
            failed = report.failed(),
            errored = report.errored(),
            skipped = report.skipped(),
            panicked = report.panicked(),
            "Test run complete"
        );
        report
    }

    fn run_class(&self, class: &TestClass, settings: &Settings, report: &mut RunReport) {
        let mut scope = self.isolation.enter_class(class.name(), class.config());
        for method in class.ordered_methods() {
            let outcome = scope.run_test(|| self.run_method(class, method, settings));
            match &outcome {
                Outcome::Errored(e) | Outcome::Failed(e) => {
                    warn!(class = class.name(), test = method.name(), error = %e, "Test {}", outcome.label())
                }
                Outcome::Panicked(message) => {
                    warn!(class = class.name(), test = method.name(), message = %message, "Test panicked")
                }
                _ => debug!(class = class.name(), test = method.name(), outcome = outcome.label(), "Test finished"),
            }
            report.record(class.name(), method.name(), outcome);
        }
        scope.finish();
    }

    fn run_method(&self, class: &TestClass, method: &TestMethod, settings: &Settings) -> Outcome {
        let mut case = UnitTestCase::new(method.name(), &self.isolation, self.client.clone());
        let caught = panic::catch_unwind(AssertUnwindSafe(|| {
            class.execute(method, settings, &mut case)
        }));
        match caught {
            Ok(result) => Outcome::from_result(result),
            Err(payload) => Outcome::Panicked(panic_message(payload.as_ref())),
        }
    }
}
