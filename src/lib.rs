//! Context-scoped structured logging.
//!
//! # Data Flow
//! ```text
//! LOG_FORMAT / LOG_LEVEL
//!     → config (resolve, fall back to json/info)
//!     → logging::create_logger (Logger, warnings for rejected values)
//!     → logging::attach_logger (Context carrying the logger)
//!     → logging::logger_from / attach_fields further down the call chain
//! ```

pub mod config;
pub mod context;
pub mod http;
pub mod logging;

pub use config::{LogConfig, LogFormat, RawLogConfig};
pub use context::Context;
pub use logging::{
    attach_fields, attach_logger, create_logger, create_logger_from, logger_from, Field, Logger,
    LoggerBuilder, Severity,
};
