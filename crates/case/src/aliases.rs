//! camelCase alias table for the assertion vocabulary
//!
//! Every recognized assertion is registered once, under its `snake_case`
//! name and its camelCase alias. Both names resolve to the same
//! [`AssertionEntry`], so a lookup through either one yields the identical
//! entry and the identical function pointer.
//!
//! ## Registration
//!
//! ```ignore
//! let mut table = AliasTable::new();
//! table.register("assert_true", assert_true_values)?;
//! assert!(std::ptr::eq(
//!     table.get("assert_true").unwrap(),
//!     table.get("assertTrue").unwrap(),
//! ));
//! ```
//!
//! The table used by `UnitTestCase` is built on first access from
//! [`RECOGNIZED_ASSERTIONS`] and never changes afterwards.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use sanetest_core::{Alias, AssertionName, Error, Result, Value};
use tracing::warn;

use crate::assertions;

/// Assertion callable over dynamically typed arguments
pub type AssertionFn = fn(&[Value]) -> Result<()>;

/// One registered assertion
#[derive(Debug)]
pub struct AssertionEntry {
    name: AssertionName,
    alias: Alias,
    call: AssertionFn,
}

impl AssertionEntry {
    /// Canonical snake_case name
    pub fn name(&self) -> &AssertionName {
        &self.name
    }

    /// camelCase alias
    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    /// The underlying function pointer
    pub fn function(&self) -> AssertionFn {
        self.call
    }

    /// Invoke the assertion
    pub fn call(&self, args: &[Value]) -> Result<()> {
        (self.call)(args)
    }
}

/// Name → assertion mapping covering both naming conventions
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: Vec<AssertionEntry>,
    index: FxHashMap<String, usize>,
}

impl AliasTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, callable)` pairs
    ///
    /// Names rejected by the alias resolver are skipped with a warning.
    pub fn from_entries(entries: &[(&str, AssertionFn)]) -> Self {
        let mut table = Self::new();
        for (name, call) in entries {
            if let Err(e) = table.register(name, *call) {
                warn!(name = *name, error = %e, "Skipping assertion alias");
            }
        }
        table
    }

    /// Register `name` and its alias for `call`
    ///
    /// Registering an already known canonical name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidName` if `name` cannot be camelized, and
    /// `Error::InvalidValue` if `name` or its alias is already bound to
    /// another entry.
    pub fn register(&mut self, name: &str, call: AssertionFn) -> Result<()> {
        let name = AssertionName::new(name)?;
        if let Some(existing) = self.get(name.as_str()) {
            if existing.name() == &name {
                return Ok(());
            }
            return Err(Error::invalid_value(format!(
                "'{}' is already bound as the alias of '{}'",
                name,
                existing.name()
            )));
        }
        let alias = name.alias();
        if let Some(existing) = self.get(alias.as_str()) {
            return Err(Error::invalid_value(format!(
                "alias '{}' of '{}' is already bound to '{}'",
                alias,
                name,
                existing.name()
            )));
        }

        let slot = self.entries.len();
        self.index.insert(name.as_str().to_string(), slot);
        self.index.insert(alias.as_str().to_string(), slot);
        self.entries.push(AssertionEntry { name, alias, call });
        Ok(())
    }

    /// Resolve either naming convention
    pub fn get(&self, name: &str) -> Option<&AssertionEntry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Whether `name` resolves
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of distinct assertions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no assertions are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered assertions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &AssertionEntry> {
        self.entries.iter()
    }
}

// ============================================================================
// Dynamically typed entry points
// ============================================================================

fn check_arity(name: &str, args: &[Value], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{}..={}", min, max)
        };
        return Err(Error::invalid_value(format!(
            "{} takes {} argument(s), got {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}

fn number(name: &str, value: &Value) -> Result<f64> {
    value.as_number().ok_or_else(|| {
        Error::invalid_value(format!(
            "{} expects numbers, got {}",
            name,
            value.type_name()
        ))
    })
}

fn places(name: &str, args: &[Value]) -> Result<u32> {
    match args.get(2) {
        None => Ok(assertions::DEFAULT_PLACES),
        Some(value) => value
            .as_int()
            .and_then(|p| u32::try_from(p).ok())
            .ok_or_else(|| {
                Error::invalid_value(format!("{} places must be a non-negative integer", name))
            }),
    }
}

fn contains(name: &str, member: &Value, container: &Value) -> Result<bool> {
    match (member, container) {
        (_, Value::Array(items)) => Ok(items.contains(member)),
        (Value::String(needle), Value::String(haystack)) => Ok(haystack.contains(needle.as_str())),
        (Value::String(key), Value::Object(entries)) => Ok(entries.contains_key(key)),
        _ => Err(Error::invalid_value(format!(
            "{} cannot look for {} in {}",
            name,
            member.type_name(),
            container.type_name()
        ))),
    }
}

fn assert_true_values(args: &[Value]) -> Result<()> {
    check_arity("assert_true", args, 1, 1)?;
    assertions::assert_true(args[0].is_truthy())
}

fn assert_false_values(args: &[Value]) -> Result<()> {
    check_arity("assert_false", args, 1, 1)?;
    assertions::assert_false(args[0].is_truthy())
}

fn assert_equals_values(args: &[Value]) -> Result<()> {
    check_arity("assert_equals", args, 2, 2)?;
    assertions::assert_equals(&args[0], &args[1])
}

fn assert_not_equals_values(args: &[Value]) -> Result<()> {
    check_arity("assert_not_equals", args, 2, 2)?;
    assertions::assert_not_equals(&args[0], &args[1])
}

fn assert_almost_equals_values(args: &[Value]) -> Result<()> {
    const NAME: &str = "assert_almost_equals";
    check_arity(NAME, args, 2, 3)?;
    assertions::assert_almost_equals_places(
        number(NAME, &args[0])?,
        number(NAME, &args[1])?,
        places(NAME, args)?,
    )
}

fn assert_not_almost_equals_values(args: &[Value]) -> Result<()> {
    const NAME: &str = "assert_not_almost_equals";
    check_arity(NAME, args, 2, 3)?;
    assertions::assert_not_almost_equals_places(
        number(NAME, &args[0])?,
        number(NAME, &args[1])?,
        places(NAME, args)?,
    )
}

fn assert_in_values(args: &[Value]) -> Result<()> {
    check_arity("assert_in", args, 2, 2)?;
    if contains("assert_in", &args[0], &args[1])? {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "{} not found in {}",
            args[0], args[1]
        )))
    }
}

fn assert_not_in_values(args: &[Value]) -> Result<()> {
    check_arity("assert_not_in", args, 2, 2)?;
    if contains("assert_not_in", &args[0], &args[1])? {
        Err(Error::assertion(format!(
            "{} unexpectedly found in {}",
            args[0], args[1]
        )))
    } else {
        Ok(())
    }
}

fn fail_values(args: &[Value]) -> Result<()> {
    check_arity("fail", args, 0, 1)?;
    match args.first() {
        Some(Value::String(message)) => assertions::fail(Some(message)),
        Some(other) => assertions::fail(Some(&other.to_string())),
        None => assertions::fail(None),
    }
}

/// The assertion vocabulary bound onto `UnitTestCase`
pub const RECOGNIZED_ASSERTIONS: &[(&str, AssertionFn)] = &[
    ("assert_true", assert_true_values as AssertionFn),
    ("assert_false", assert_false_values as AssertionFn),
    ("assert_equals", assert_equals_values as AssertionFn),
    ("assert_not_equals", assert_not_equals_values as AssertionFn),
    ("assert_almost_equals", assert_almost_equals_values as AssertionFn),
    (
        "assert_not_almost_equals",
        assert_not_almost_equals_values as AssertionFn,
    ),
    ("assert_in", assert_in_values as AssertionFn),
    ("assert_not_in", assert_not_in_values as AssertionFn),
    ("fail", fail_values as AssertionFn),
];

static UNIT_TEST_ALIASES: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::from_entries(RECOGNIZED_ASSERTIONS));

/// The alias table shared by every `UnitTestCase`
pub fn unit_test_aliases() -> &'static AliasTable {
    &UNIT_TEST_ALIASES
}
