//! The shared configuration object
//!
//! [`Settings`] is a flat namespace of UPPERCASE attributes. Tests read it,
//! override scopes patch it in place and restore it afterwards.
//!
//! ## The global instance
//!
//! Exactly one process-wide instance exists, reached through [`settings()`].
//! It is created on first access: when `SANETEST_SETTINGS` names a TOML file
//! that file is loaded, otherwise the instance starts empty. Everything else
//! in the harness receives its `Settings` explicitly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard, RwLock};
use rustc_hash::FxHashMap;
use sanetest_core::{AttributeTarget, Error, Result, Value};

/// Environment variable naming the settings file for the global instance
pub const SETTINGS_ENV_VAR: &str = "SANETEST_SETTINGS";

/// Setting holding the default locale code
pub const LANGUAGE_CODE: &str = "LANGUAGE_CODE";

/// Shared configuration object
///
/// All access goes through `&self`; the value map sits behind a `RwLock` so
/// the instance can live in an `Arc` shared by the runner, the isolation
/// layer and the tests themselves.
#[derive(Default)]
pub struct Settings {
    values: RwLock<FxHashMap<String, Value>>,
    frozen: AtomicBool,
    session: Mutex<()>,
}

impl Settings {
    /// Create an empty settings object
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a settings object pre-populated with `values`
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let map = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(map),
            ..Self::default()
        }
    }

    /// Current value of `name`
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.read().get(name).cloned()
    }

    /// Current value of `name` when it is a string
    pub fn get_str(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Configured default locale (`LANGUAGE_CODE`)
    pub fn language_code(&self) -> Option<String> {
        self.get_str(LANGUAGE_CODE)
    }

    /// Sorted names of all present attributes
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of present attributes
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether no attributes are present
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Refuse every subsequent set or delete until [`Settings::thaw`]
    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::SeqCst);
    }

    /// Accept writes again
    pub fn thaw(&self) {
        self.frozen.store(false, Ordering::SeqCst);
    }

    /// Whether writes are currently refused
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::SeqCst)
    }

    /// Exclusive session guard
    ///
    /// Held by the runner for a whole run so two runs sharing this instance
    /// never interleave their overrides.
    pub fn lock_session(&self) -> MutexGuard<'_, ()> {
        self.session.lock()
    }

    fn check_writable(&self, name: &str) -> Result<()> {
        if self.is_frozen() {
            return Err(Error::TargetNotWritable {
                attribute: name.to_string(),
            });
        }
        Ok(())
    }
}

impl AttributeTarget for Settings {
    fn get_attr(&self, name: &str) -> Option<Value> {
        self.get(name)
    }

    fn set_attr(&self, name: &str, value: Value) -> Result<()> {
        self.check_writable(name)?;
        self.values.write().insert(name.to_string(), value);
        Ok(())
    }

    fn del_attr(&self, name: &str) -> Result<()> {
        self.check_writable(name)?;
        self.values.write().remove(name);
        Ok(())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.values.read().contains_key(name)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("names", &self.names())
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

static SETTINGS: Lazy<Arc<Settings>> = Lazy::new(|| Arc::new(Settings::from_env()));

/// The process-wide settings instance
pub fn settings() -> Arc<Settings> {
    Arc::clone(&SETTINGS)
}
