//! Shared fixtures for the integration suites.
//!
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sanetest::{
    Catalog, Client, EnvironmentIsolation, LocMemCache, Outcome, Response, RunReport, Runner,
    Settings, Translation,
};

pub const SOURCE_STRING: &str = "Translatable string";
pub const CZECH_STRING: &str = "Přeložitelný řetězec";
pub const GERMAN_STRING: &str = "Ersetzbare Zeichenkette";

pub const INSANE: &str = "INSANE_ATTRIBUTE_THAT_SHOULD_NOT_BE_PRESENT";
pub const EXISTING: &str = "NONSENSICAL_SETTING_ATTRIBUTE_FOR_MOCK_TESTING";

// ============================================================================
// Initialization
// ============================================================================

/// Install a test-writer subscriber once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_settings() -> Settings {
    Settings::from_file(&fixture_path("settings.toml")).expect("settings fixture loads")
}

pub fn fixture_catalog() -> Catalog {
    Catalog::from_file(&fixture_path("locale.toml")).expect("catalog fixture loads")
}

pub fn fixture_client() -> Client {
    Client::builder()
        .route("/testtwohundred/", |_| Response::ok("OKidoki"))
        .build()
}

// ============================================================================
// Harness
// ============================================================================

/// Runner plus direct handles on the collaborators it isolates
pub struct Harness {
    pub settings: Arc<Settings>,
    pub cache: Arc<LocMemCache>,
    pub translation: Arc<Translation>,
    pub runner: Runner,
}

impl Harness {
    /// Harness over a private settings instance loaded from the fixture
    pub fn new() -> Self {
        Self::with_settings(Arc::new(fixture_settings()))
    }

    pub fn with_settings(settings: Arc<Settings>) -> Self {
        init_tracing();
        let cache = Arc::new(LocMemCache::new());
        let translation = Arc::new(Translation::new(fixture_catalog()));
        let isolation =
            EnvironmentIsolation::new(settings.clone(), cache.clone(), translation.clone());
        Self {
            settings,
            cache,
            translation,
            runner: Runner::new(isolation, fixture_client()),
        }
    }
}

/// Panic with every problem outcome unless the whole report passed
pub fn assert_all_passed(report: &RunReport) {
    let problems: Vec<String> = report
        .results()
        .iter()
        .filter(|r| !matches!(r.outcome(), Outcome::Passed))
        .map(|r| format!("{}::{} {:?}", r.class(), r.method(), r.outcome()))
        .collect();
    assert!(problems.is_empty(), "unexpected outcomes:\n{}", problems.join("\n"));
}
