//! Assertion names and their camelCase aliases
//!
//! Assertions are named in `snake_case`. Every recognized name also gets a
//! `camelCase` alias so suites written against either convention resolve to
//! the same callable.
//!
//! ## Transformation
//!
//! Each separator is removed and the character following it is upper-cased:
//! `assert_almost_equals` becomes `assertAlmostEquals`.
//!
//! ## Validation
//!
//! A name is rejected when it:
//! - is empty
//! - begins or ends with a separator
//! - contains two separators in a row

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidNameReason, Result};

/// Separator between words of an assertion name
pub const SEPARATOR: char = '_';

/// Transform a `snake_case` name into its `camelCase` alias
///
/// # Errors
///
/// Returns `Error::InvalidName` for an empty name, a leading or trailing
/// separator, or consecutive separators.
///
/// # Examples
///
/// ```
/// use sanetest_core::camelize;
///
/// assert_eq!(camelize("assert_true").unwrap(), "assertTrue");
/// assert!(camelize("_prefix").is_err());
/// ```
pub fn camelize(name: &str) -> Result<Alias> {
    camelize_with(name, SEPARATOR)
}

/// Transform `name` using an arbitrary separator character
pub fn camelize_with(name: &str, separator: char) -> Result<Alias> {
    validate(name, separator)?;

    let mut camel = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == separator {
            upper_next = true;
        } else if upper_next {
            camel.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            camel.push(ch);
        }
    }
    Ok(Alias(camel))
}

fn validate(name: &str, separator: char) -> Result<()> {
    let reject = |reason| {
        Err(Error::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return reject(InvalidNameReason::Empty);
    }
    if name.starts_with(separator) || name.ends_with(separator) {
        return reject(InvalidNameReason::Boundary);
    }

    let mut previous_was_separator = false;
    for ch in name.chars() {
        let is_separator = ch == separator;
        if is_separator && previous_was_separator {
            return reject(InvalidNameReason::DoubleSeparator);
        }
        previous_was_separator = is_separator;
    }
    Ok(())
}

/// Validated `snake_case` assertion name
///
/// Guarantees the name is non-empty, does not start or end with a
/// separator and holds no consecutive separators, so [`AssertionName::alias`]
/// cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssertionName(String);

impl AssertionName {
    /// Create a new AssertionName, validating the input
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate(&name, SEPARATOR)?;
        Ok(AssertionName(name))
    }

    /// The derived camelCase alias
    pub fn alias(&self) -> Alias {
        let mut camel = String::with_capacity(self.0.len());
        let mut words = self.0.split(SEPARATOR);
        if let Some(first) = words.next() {
            camel.push_str(first);
        }
        for word in words {
            let mut chars = word.chars();
            if let Some(head) = chars.next() {
                camel.extend(head.to_uppercase());
                camel.push_str(chars.as_str());
            }
        }
        Alias(camel)
    }

    /// Get the name as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssertionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssertionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// camelCase alias derived from an [`AssertionName`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Alias(String);

impl Alias {
    /// Get the alias as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Alias {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Alias {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Alias> for &str {
    fn eq(&self, other: &Alias) -> bool {
        *self == other.0
    }
}
