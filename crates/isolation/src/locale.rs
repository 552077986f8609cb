//! Message catalogs and the active-locale translator
//!
//! A [`Catalog`] maps locale codes to message tables. [`Translation`] wraps a
//! catalog with an active locale and renders messages through it.
//!
//! ## Locale codes
//!
//! Codes are normalized before use: lowercase, with `_` turned into `-`
//! (`de_AT` and `de-at` are the same locale). A lookup for a regional code
//! falls back to its language (`de-at` → `de`).
//!
//! ## Catalog files
//!
//! ```toml
//! [cs]
//! "Translatable string" = "Přeložitelný řetězec"
//!
//! [de]
//! "Translatable string" = "Ersetzbare Zeichenkette"
//! ```

use std::path::Path;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use sanetest_core::{Error, Result, Translator};
use tracing::debug;

/// Normalize a locale code: lowercase, `_` → `-`
pub fn normalize_locale(code: &str) -> String {
    code.trim().replace('_', "-").to_lowercase()
}

/// Language part of a normalized locale code (`de-at` → `de`)
pub fn language_of(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// Translations for every known locale
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locales: FxHashMap<String, FxHashMap<String, String>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one translation
    pub fn insert(
        &mut self,
        locale: &str,
        message: impl Into<String>,
        translation: impl Into<String>,
    ) {
        self.locales
            .entry(normalize_locale(locale))
            .or_default()
            .insert(message.into(), translation.into());
    }

    /// Builder form of [`Catalog::insert`] for a whole locale
    pub fn with_locale<I, M, T>(mut self, locale: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (M, T)>,
        M: Into<String>,
        T: Into<String>,
    {
        for (message, translation) in entries {
            self.insert(locale, message, translation);
        }
        self
    }

    /// Parse a catalog from TOML text, one table per locale
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid TOML, a top-level
    /// entry is not a table, or a translation is not a string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| Error::config(format!("failed to parse catalog: {}", e)))?;

        let mut catalog = Catalog::new();
        for (locale, messages) in table {
            let messages = match messages {
                toml::Value::Table(messages) => messages,
                other => {
                    return Err(Error::config(format!(
                        "catalog locale '{}' must be a table, found {}",
                        locale,
                        other.type_str()
                    )))
                }
            };
            for (message, translation) in messages {
                match translation {
                    toml::Value::String(translation) => {
                        catalog.insert(&locale, message, translation)
                    }
                    other => {
                        return Err(Error::config(format!(
                            "translation of '{}' in '{}' must be a string, found {}",
                            message,
                            locale,
                            other.type_str()
                        )))
                    }
                }
            }
        }
        Ok(catalog)
    }

    /// Read and parse a catalog file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "failed to read catalog file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Translation of `message` for `locale`, falling back to its language
    pub fn lookup(&self, locale: &str, message: &str) -> Option<&str> {
        let locale = normalize_locale(locale);
        let in_locale = |code: &str| {
            self.locales
                .get(code)
                .and_then(|messages| messages.get(message))
                .map(String::as_str)
        };
        in_locale(&locale).or_else(|| {
            let language = language_of(&locale);
            if language == locale {
                None
            } else {
                in_locale(language)
            }
        })
    }

    /// Whether any translations exist for `locale`
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(&normalize_locale(locale))
    }

    /// Sorted list of known locales
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.locales.keys().cloned().collect();
        locales.sort();
        locales
    }
}

/// Translator with a switchable active locale
#[derive(Debug, Default)]
pub struct Translation {
    catalog: Catalog,
    active: RwLock<Option<String>>,
}

impl Translation {
    /// Translator over `catalog`, with no locale active
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            active: RwLock::new(None),
        }
    }

    /// The underlying catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Translator for Translation {
    fn activate(&self, locale: &str) {
        let locale = normalize_locale(locale);
        debug!(locale = %locale, "Activated locale");
        *self.active.write() = Some(locale);
    }

    fn deactivate(&self) {
        debug!("Deactivated locale");
        *self.active.write() = None;
    }

    fn active_locale(&self) -> Option<String> {
        self.active.read().clone()
    }

    fn gettext(&self, message: &str) -> String {
        self.active
            .read()
            .as_deref()
            .and_then(|locale| self.catalog.lookup(locale, message))
            .unwrap_or(message)
            .to_string()
    }
}
