//! Assertion primitives
//!
//! Every assertion returns `Result<()>`: `Ok` when it holds, an
//! `AssertionFailure` when it does not. Failures propagate to the runner
//! with `?`; nothing here recovers locally.

use std::fmt::Debug;

use sanetest_core::{Error, ErrorKind, Result};

/// Default number of decimal places compared by `assert_almost_equals`
pub const DEFAULT_PLACES: u32 = 7;

/// Fails with an assertion error unless `condition` holds
pub fn assert_true(condition: bool) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::assertion("false is not true"))
    }
}

/// Fails with an assertion error if `condition` holds
pub fn assert_false(condition: bool) -> Result<()> {
    if condition {
        Err(Error::assertion("true is not false"))
    } else {
        Ok(())
    }
}

/// Fails unless `first == second`
pub fn assert_equals<A, B>(first: A, second: B) -> Result<()>
where
    A: PartialEq<B> + Debug,
    B: Debug,
{
    if first == second {
        Ok(())
    } else {
        Err(Error::assertion(format!("{:?} != {:?}", first, second)))
    }
}

/// Fails if `first == second`
pub fn assert_not_equals<A, B>(first: A, second: B) -> Result<()>
where
    A: PartialEq<B> + Debug,
    B: Debug,
{
    if first == second {
        Err(Error::assertion(format!("{:?} == {:?}", first, second)))
    } else {
        Ok(())
    }
}

/// Largest power of ten representable as a finite `f64`
const MAX_SCALE_PLACES: u32 = 308;

fn rounds_to_zero(first: f64, second: f64, places: u32) -> bool {
    if first == second {
        return true;
    }
    let scale = 10f64.powi(places.min(MAX_SCALE_PLACES) as i32);
    ((second - first).abs() * scale).round() == 0.0
}

/// Fails unless the difference rounds to zero at `places` decimals
pub fn assert_almost_equals_places(first: f64, second: f64, places: u32) -> Result<()> {
    if rounds_to_zero(first, second, places) {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "{} != {} within {} places",
            first, second, places
        )))
    }
}

/// [`assert_almost_equals_places`] at the default seven places
pub fn assert_almost_equals(first: f64, second: f64) -> Result<()> {
    assert_almost_equals_places(first, second, DEFAULT_PLACES)
}

/// Fails if the difference rounds to zero at `places` decimals
pub fn assert_not_almost_equals_places(first: f64, second: f64, places: u32) -> Result<()> {
    if rounds_to_zero(first, second, places) {
        Err(Error::assertion(format!(
            "{} == {} within {} places",
            first, second, places
        )))
    } else {
        Ok(())
    }
}

/// [`assert_not_almost_equals_places`] at the default seven places
pub fn assert_not_almost_equals(first: f64, second: f64) -> Result<()> {
    assert_not_almost_equals_places(first, second, DEFAULT_PLACES)
}

/// Fails unless `member` is in `container`
pub fn assert_in<T: PartialEq + Debug>(member: &T, container: &[T]) -> Result<()> {
    if container.contains(member) {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "{:?} not found in {:?}",
            member, container
        )))
    }
}

/// Fails if `member` is in `container`
pub fn assert_not_in<T: PartialEq + Debug>(member: &T, container: &[T]) -> Result<()> {
    if container.contains(member) {
        Err(Error::assertion(format!(
            "{:?} unexpectedly found in {:?}",
            member, container
        )))
    } else {
        Ok(())
    }
}

/// Run `f` and require it to fail with an error of kind `expected`
///
/// Returns the raised error so the caller can inspect it. Fails with an
/// assertion error when `f` succeeds, and with `UnexpectedErrorKind` (itself
/// an assertion failure) when `f` fails with some other kind.
pub fn assert_raises<T, F>(expected: ErrorKind, f: F) -> Result<Error>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(_) => Err(Error::assertion(format!("{} not raised", expected))),
        Err(e) if e.kind() == expected => Ok(e),
        Err(e) => Err(Error::UnexpectedErrorKind {
            expected,
            actual: e.kind(),
            message: e.to_string(),
        }),
    }
}

/// Unconditionally fail
pub fn fail(message: Option<&str>) -> Result<()> {
    Err(Error::assertion(message.unwrap_or("explicit failure")))
}

/// Unconditionally skip the running test
pub fn skip(reason: impl Into<String>) -> Result<()> {
    Err(Error::Skipped(reason.into()))
}
