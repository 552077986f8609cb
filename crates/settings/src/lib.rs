//! Shared configuration and scoped overrides
//!
//! - [`Settings`]: the shared configuration object, plus the one documented
//!   process-wide instance returned by [`settings()`]
//! - TOML settings files ([`Settings::from_file`], `SANETEST_SETTINGS`)
//! - [`OverrideScope`], [`with_override`] and [`mock_settings`]: temporary,
//!   exactly-restored attribute overrides

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod scope;
pub mod settings;

pub use config::{is_setting_name, value_from_toml};
pub use scope::{mock_settings, with_override, MockSettings, OverrideRecord, OverrideScope};
pub use settings::{settings, Settings, LANGUAGE_CODE, SETTINGS_ENV_VAR};
