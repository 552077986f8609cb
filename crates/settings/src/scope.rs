//! Scoped attribute overrides
//!
//! An [`OverrideScope`] patches one attribute of a shared target and puts it
//! back when the scope ends. "Back" is exact: an attribute that existed gets
//! its previous value, an attribute that did not exist is removed again, so
//! the target is indistinguishable from one the scope never touched.
//!
//! Release is guaranteed. Explicit [`OverrideScope::exit`] reports restore
//! failures to the caller; a scope that is simply dropped (early return,
//! `?`, panic unwinding) restores in `Drop` and logs any failure.
//!
//! # Forms
//!
//! - Guard: `let _scope = OverrideScope::enter(&settings, "FLAG", "X")?;`
//! - Closure: `with_override(&settings, "FLAG", "X", || { ... })`
//! - Decorator: `mock_settings("FLAG", "X").apply(&settings, || { ... })`
//!
//! Scopes on the same attribute nest: the inner scope records the outer
//! scope's value, so releasing in reverse order walks the values back one
//! layer at a time.
//!
//! Guards can be released in any order, but only last-in-first-out release
//! is correct. Every active override on a target attribute is tracked as a
//! layer; releasing a layer that is not the innermost one fails with
//! `InvalidValue` and leaves the current value alone, handing its saved state
//! to the layer above it. The attribute still ends up exactly as it was once
//! every scope has been released.

use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use sanetest_core::{AttributeTarget, Error, Result, Value};
use tracing::{debug, error};

/// What an attribute looked like before a scope changed it
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRecord {
    attribute: String,
    previous: Option<Value>,
}

impl OverrideRecord {
    /// Snapshot `attribute` on `target`
    pub fn capture<T: AttributeTarget + ?Sized>(target: &T, attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            previous: target.get_attr(attribute),
        }
    }

    /// Name of the recorded attribute
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Value before the override, if the attribute existed
    pub fn previous(&self) -> Option<&Value> {
        self.previous.as_ref()
    }

    /// Whether the attribute existed before the override
    pub fn existed(&self) -> bool {
        self.previous.is_some()
    }

    /// Put `target` back the way this record found it
    pub fn restore<T: AttributeTarget + ?Sized>(self, target: &T) -> Result<()> {
        match self.previous {
            Some(value) => target.set_attr(&self.attribute, value),
            None => target.del_attr(&self.attribute),
        }
    }
}

// ============================================================================
// Active layers
// ============================================================================

/// (target address, attribute)
type LayerKey = (usize, String);

/// One active override: the state to put back when it is released
#[derive(Debug)]
struct Layer {
    id: u64,
    previous: Option<Value>,
}

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Active overrides per target attribute, innermost last
static ACTIVE_LAYERS: Lazy<Mutex<FxHashMap<LayerKey, Vec<Layer>>>> =
    Lazy::new(|| Mutex::new(FxHashMap::default()));

fn layer_key<T: AttributeTarget + ?Sized>(target: &T, attribute: &str) -> LayerKey {
    (target as *const T as *const () as usize, attribute.to_string())
}

fn push_layer(key: LayerKey, previous: Option<Value>) -> u64 {
    let id = NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed);
    ACTIVE_LAYERS
        .lock()
        .entry(key)
        .or_default()
        .push(Layer { id, previous });
    id
}

/// How a released layer relates to the others on its attribute
enum Released {
    /// Innermost layer: restore this state now
    Innermost(Option<Value>),
    /// Released before a scope entered after it; its state moved up
    OutOfOrder,
    /// Not tracked
    Unknown,
}

fn pop_layer(key: &LayerKey, id: u64) -> Released {
    let mut layers = ACTIVE_LAYERS.lock();
    let Some(stack) = layers.get_mut(key) else {
        return Released::Unknown;
    };
    let Some(position) = stack.iter().position(|layer| layer.id == id) else {
        return Released::Unknown;
    };

    let layer = stack.remove(position);
    let released = if position == stack.len() {
        Released::Innermost(layer.previous)
    } else {
        stack[position].previous = layer.previous;
        Released::OutOfOrder
    };
    if stack.is_empty() {
        layers.remove(key);
    }
    released
}

/// Guard holding one active override
#[must_use = "dropping an override scope immediately reverts it"]
pub struct OverrideScope<'a, T: AttributeTarget + ?Sized> {
    target: &'a T,
    record: Option<OverrideRecord>,
    layer: u64,
}

impl<'a, T: AttributeTarget + ?Sized> OverrideScope<'a, T> {
    /// Record `attribute` and set it to `value`
    ///
    /// A missing attribute is fine: it is created now and removed on exit.
    ///
    /// # Errors
    ///
    /// Returns `Error::TargetNotWritable` if `target` refuses the write. No
    /// scope exists in that case and nothing needs restoring.
    pub fn enter(
        target: &'a T,
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let attribute = attribute.into();
        let record = OverrideRecord::capture(target, &attribute);
        target.set_attr(&attribute, value.into())?;
        let layer = push_layer(layer_key(target, &attribute), record.previous.clone());
        debug!(
            attribute = %attribute,
            existed = record.existed(),
            "Entered override scope"
        );
        Ok(Self {
            target,
            record: Some(record),
            layer,
        })
    }

    /// The record this scope will restore from
    pub fn record(&self) -> Option<&OverrideRecord> {
        self.record.as_ref()
    }

    /// Restore the attribute now
    ///
    /// # Errors
    ///
    /// Returns the target's error if it refuses the restoring write, and
    /// `Error::InvalidValue` if a scope entered later on the same attribute
    /// is still active.
    pub fn exit(mut self) -> Result<()> {
        match self.record.take() {
            Some(record) => release(self.target, record, self.layer),
            None => Ok(()),
        }
    }
}

impl<'a, T: AttributeTarget + ?Sized> Drop for OverrideScope<'a, T> {
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            let attribute = record.attribute().to_string();
            if let Err(e) = release(self.target, record, self.layer) {
                error!(attribute = %attribute, error = %e, "Failed to restore overridden attribute");
            }
        }
    }
}

fn release<T: AttributeTarget + ?Sized>(
    target: &T,
    record: OverrideRecord,
    layer: u64,
) -> Result<()> {
    let attribute = record.attribute().to_string();
    let previous = match pop_layer(&layer_key(target, &attribute), layer) {
        Released::Innermost(previous) => previous,
        Released::OutOfOrder => {
            return Err(Error::invalid_value(format!(
                "override of '{}' released out of order; a scope entered after it is still active",
                attribute
            )))
        }
        Released::Unknown => record.previous,
    };

    let existed = previous.is_some();
    match previous {
        Some(value) => target.set_attr(&attribute, value)?,
        None => target.del_attr(&attribute)?,
    }
    debug!(attribute = %attribute, existed, "Exited override scope");
    Ok(())
}

/// Run `body` with `attribute` overridden on `target`
///
/// The override is released after `body` however it ends. When both the body
/// and the release fail, the body's error is returned with the release error
/// attached behind it.
pub fn with_override<T, R, F>(
    target: &T,
    attribute: impl Into<String>,
    value: impl Into<Value>,
    body: F,
) -> Result<R>
where
    T: AttributeTarget + ?Sized,
    F: FnOnce() -> Result<R>,
{
    let scope = OverrideScope::enter(target, attribute, value)?;
    let outcome = body();
    let cleanup = scope.exit().err().into_iter().collect();
    Error::with_cleanup(outcome, cleanup)
}

/// Declarative override applied around a test method
#[derive(Debug, Clone, PartialEq)]
pub struct MockSettings {
    attribute: String,
    value: Value,
}

/// Override `attribute` with `value` for the duration of a test method
pub fn mock_settings(attribute: impl Into<String>, value: impl Into<Value>) -> MockSettings {
    MockSettings {
        attribute: attribute.into(),
        value: value.into(),
    }
}

impl MockSettings {
    /// Overridden attribute name
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Value installed while active
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Run `body` with this override active on `target`
    pub fn apply<T, R, F>(&self, target: &T, body: F) -> Result<R>
    where
        T: AttributeTarget + ?Sized,
        F: FnOnce() -> Result<R>,
    {
        with_override(target, self.attribute.as_str(), self.value.clone(), body)
    }

    /// Run `body` inside every override in `mocks`, first one outermost
    pub fn apply_all<T, R, F>(mocks: &[MockSettings], target: &T, body: F) -> Result<R>
    where
        T: AttributeTarget + ?Sized,
        F: FnOnce() -> Result<R>,
    {
        match mocks.split_first() {
            Some((outer, inner)) => outer.apply(target, || Self::apply_all(inner, target, body)),
            None => body(),
        }
    }
}
