//! Sanity Test Suite
//!
//! Drives whole test classes through the runner and checks the harness
//! guarantees from inside the tests it runs.
//!
//! ## Modules
//!
//! - `simple_methods`: the assertion vocabulary
//! - `aliases`: camelCase aliases and the name transformation
//! - `features`: the test client
//! - `cache`: cache reset between tests
//! - `translations`: per-class locale activation
//! - `mocking`: settings overrides and their cleanup
//! - `ordering`: explicit method ordering
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test sanity_suite
//!
//! # One module
//! cargo test --test sanity_suite mocking::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod aliases;
mod cache;
mod features;
mod mocking;
mod ordering;
mod simple_methods;
mod translations;
