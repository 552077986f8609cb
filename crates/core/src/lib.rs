//! Core types and traits for sanetest
//!
//! This crate defines the foundational types used throughout the harness:
//! - Error: Error type hierarchy and the matchable ErrorKind
//! - Value: Unified value enum for settings, cache entries and assertion arguments
//! - Naming: AssertionName, Alias and the camelize transform
//! - Traits: Collaborator interfaces (AttributeTarget, CacheBackend, Translator)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod naming;
pub mod traits;
pub mod value;

pub use error::{Error, ErrorKind, InvalidNameReason, Result};
pub use naming::{camelize, camelize_with, Alias, AssertionName, SEPARATOR};
pub use traits::{AttributeTarget, CacheBackend, Translator};
pub use value::Value;
