//! Unit test cases and the runner
//!
//! - [`assertions`]: the assertion primitives, each returning `Result<()>`
//! - [`AliasTable`]: both naming conventions bound to the same assertion
//! - [`UnitTestCase`]: per-method context with typed and by-name assertions
//! - [`Client`]: in-process request routing for view tests
//! - [`TestClass`] / [`Runner`] / [`RunReport`]: the test lifecycle

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aliases;
pub mod assertions;
pub mod case;
pub mod client;
pub mod runner;

pub use aliases::{unit_test_aliases, AliasTable, AssertionEntry, AssertionFn, RECOGNIZED_ASSERTIONS};
pub use case::UnitTestCase;
pub use client::{Client, ClientBuilder, Handler, Method, Request, Response};
pub use runner::{MethodOrder, Outcome, RunReport, Runner, TestClass, TestFn, TestMethod, TestResult};
