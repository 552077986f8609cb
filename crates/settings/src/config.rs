//! Settings files
//!
//! Settings are loaded from TOML. Only UPPERCASE top-level keys become
//! attributes; anything else in the file is ignored, so helper tables and
//! lowercase scratch keys can live next to real settings.
//!
//! # Example
//!
//! ```toml
//! LANGUAGE_CODE = "cs"
//! DEBUG = false
//! CACHE_TIMEOUT = 300
//!
//! [DATABASES]
//! default = "sqlite::memory:"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use sanetest_core::{AttributeTarget, Error, Result, Value};
use tracing::{info, warn};

use crate::settings::{Settings, SETTINGS_ENV_VAR};

/// Whether a top-level key names a setting
///
/// A setting name holds at least one letter and no lowercase letters.
pub fn is_setting_name(key: &str) -> bool {
    key.chars().any(|c| c.is_alphabetic()) && !key.chars().any(char::is_lowercase)
}

/// Convert a parsed TOML value into a [`Value`]
pub fn value_from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(value_from_toml).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, value_from_toml(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

fn parse_table(content: &str, origin: &str) -> Result<toml::Table> {
    toml::from_str(content)
        .map_err(|e| Error::config(format!("failed to parse settings '{}': {}", origin, e)))
}

impl Settings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings = Settings::new();
        settings.load_toml_str(content)?;
        Ok(settings)
    }

    /// Read and parse settings from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = Settings::new();
        settings.load_file(path)?;
        Ok(settings)
    }

    /// Merge the settings in `content` into this instance
    ///
    /// Returns the number of attributes set.
    pub fn load_toml_str(&self, content: &str) -> Result<usize> {
        self.load_table(parse_table(content, "<string>")?)
    }

    /// Merge the settings in the file at `path` into this instance
    ///
    /// Returns the number of attributes set.
    pub fn load_file(&self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let loaded = self.load_table(parse_table(&content, &path.display().to_string())?)?;
        info!(path = %path.display(), loaded, "Loaded settings file");
        Ok(loaded)
    }

    fn load_table(&self, table: toml::Table) -> Result<usize> {
        let mut loaded = 0;
        for (key, value) in table {
            if is_setting_name(&key) {
                self.set_attr(&key, value_from_toml(value))?;
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    /// Build the global instance from `SANETEST_SETTINGS`
    ///
    /// A missing variable yields an empty instance. A file that cannot be
    /// loaded is logged and also yields an empty instance, since there is no
    /// caller to hand the error to.
    pub(crate) fn from_env() -> Self {
        match std::env::var_os(SETTINGS_ENV_VAR) {
            Some(path) => Settings::from_file(Path::new(&path)).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unreadable settings file");
                Settings::new()
            }),
            None => Settings::new(),
        }
    }
}
