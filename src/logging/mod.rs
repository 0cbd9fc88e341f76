//! Structured logging.
//!
//! # Responsibilities
//! - Build a logger from `LOG_FORMAT` / `LOG_LEVEL` ([`create_logger`])
//! - Carry a logger through a [`Context`](crate::context::Context)
//!   ([`attach_logger`], [`logger_from`], [`attach_fields`])
//!
//! # Design Decisions
//! - Each [`Logger`] owns a `tracing` dispatcher; nothing is installed globally
//! - JSON for production, colored console lines for development
//! - Bad configuration is a warning, never a startup failure

mod context;
mod factory;
mod field;
mod layer;
mod level;
mod logger;

pub use context::{attach_fields, attach_logger, logger_from};
pub use factory::{create_logger, create_logger_from, emergency_record};
pub use field::Field;
pub use level::{ParseSeverityError, Severity};
pub use logger::{BuildError, Logger, LoggerBuilder, ISO8601, TARGET};
