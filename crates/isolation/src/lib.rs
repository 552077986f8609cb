//! Test environment isolation
//!
//! - [`LocMemCache`]: the shared in-memory cache backend
//! - [`Catalog`] / [`Translation`]: message catalogs and the active-locale translator
//! - [`EnvironmentIsolation`] / [`ClassScope`]: per-class locale activation and
//!   per-test cache reset

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod environment;
pub mod locale;

pub use cache::LocMemCache;
pub use environment::{ClassScope, EnvironmentConfig, EnvironmentIsolation, IsolationState};
pub use locale::{language_of, normalize_locale, Catalog, Translation};
