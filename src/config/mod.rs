//! Logging configuration.
//!
//! # Data Flow
//! ```text
//! LOG_FORMAT / LOG_LEVEL, or a TOML file
//!     → loader.rs (RawLogConfig, unvalidated strings)
//!     → validation.rs (resolve: defaults for empty values, issues for bad ones)
//!     → LogConfig (validated, immutable)
//!     → logging::LoggerBuilder
//! ```
//!
//! # Design Decisions
//! - Bad values never fail resolution; they are replaced by the defaults and
//!   reported as [`ConfigIssue`]s so the logger can warn about them
//! - Environment access is confined to [`RawLogConfig::from_env`]

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, FORMAT_VAR, LEVEL_VAR};
pub use schema::{LogConfig, LogFormat, ParseFormatError, RawLogConfig};
pub use validation::{resolve, ConfigIssue, Resolution};
