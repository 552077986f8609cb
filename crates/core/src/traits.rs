//! Collaborator traits
//!
//! The harness never owns the configuration object, the cache or the
//! localization engine. It reaches them through these narrow traits so any
//! implementation can be swapped in without touching the scoping logic.
//!
//! Thread safety: implementations are shared process-wide behind `Arc`, so
//! every trait requires `Send + Sync` and works through `&self`.

use std::time::Duration;

use crate::error::Result;
use crate::value::Value;

/// Named attributes that can be read, written and removed
///
/// This is the whole surface an override scope needs: the four primitives
/// get / set / delete / has-attribute.
pub trait AttributeTarget: Send + Sync {
    /// Current value of `name`, or `None` when absent
    fn get_attr(&self, name: &str) -> Option<Value>;

    /// Set `name` to `value`, creating it when absent
    ///
    /// # Errors
    ///
    /// Returns `Error::TargetNotWritable` if the target refuses writes.
    fn set_attr(&self, name: &str, value: Value) -> Result<()>;

    /// Remove `name` entirely
    ///
    /// Removing an absent attribute is not an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::TargetNotWritable` if the target refuses writes.
    fn del_attr(&self, name: &str) -> Result<()>;

    /// Whether `name` is currently present
    fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }
}

/// Process-wide key-value cache
pub trait CacheBackend: Send + Sync {
    /// Get the live value stored under `key`
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key` with no expiry
    fn set(&self, key: &str, value: Value) {
        self.set_with_timeout(key, value, None);
    }

    /// Store `value` under `key`, expiring after `timeout` when given
    fn set_with_timeout(&self, key: &str, value: Value, timeout: Option<Duration>);

    /// Remove `key`, returning whether a live entry was removed
    fn delete(&self, key: &str) -> bool;

    /// Remove every key
    fn clear(&self);

    /// Number of live entries
    fn len(&self) -> usize;

    /// Whether no live entries remain
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Localization engine
pub trait Translator: Send + Sync {
    /// Make `locale` the active locale
    fn activate(&self, locale: &str);

    /// Drop back to untranslated output
    fn deactivate(&self);

    /// Currently active locale, if any
    fn active_locale(&self) -> Option<String>;

    /// Render `message` in the active locale
    ///
    /// Falls back to `message` itself when no translation exists.
    fn gettext(&self, message: &str) -> String;
}
