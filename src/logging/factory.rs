//! Logger construction from environment configuration.

use std::fmt;
use std::io::{self, Write};
use std::process;

use chrono::{Local, SecondsFormat};
use serde_json::json;

use crate::config::{ConfigIssue, LogFormat, RawLogConfig};
use crate::logging::{Field, Logger, LoggerBuilder, Severity};

/// Build a logger from `LOG_FORMAT` and `LOG_LEVEL`.
///
/// Bad values fall back to `json` and `info` with a warning. If the logger
/// itself cannot be built, a single emergency line is written to standard
/// output and the process exits with status 1.
pub fn create_logger() -> Logger {
    create_logger_from(&RawLogConfig::from_env())
}

/// Same as [`create_logger`], for configuration read by the caller.
pub fn create_logger_from(raw: &RawLogConfig) -> Logger {
    match LoggerBuilder::from_raw(raw).build() {
        Ok(logger) => logger,
        Err(err) => {
            let _ = writeln!(io::stdout(), "{}", emergency_record(&err));
            process::exit(1)
        }
    }
}

/// The line written when no logger could be built.
pub fn emergency_record(cause: &dyn fmt::Display) -> String {
    json!({
        "level": "error",
        "ts": Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "message": format!("failed to create logger: {cause}"),
    })
    .to_string()
}

/// Warn about rejected configuration values through `logger`.
pub(crate) fn report_issues(logger: &Logger, issues: &[ConfigIssue]) {
    for issue in issues {
        match issue {
            ConfigIssue::InvalidFormat { raw } => {
                logger.warn("Invalid log format", &[Field::new("raw_format", raw.as_str())]);
                logger.warn(&format!("Allowed formats: {}", allowed(&LogFormat::ALL)), &[]);
                logger.warn(
                    "Using default format",
                    &[Field::new("default_format", LogFormat::default().as_str())],
                );
            }
            ConfigIssue::InvalidLevel { raw } => {
                logger.warn("Invalid log level", &[Field::new("raw_level", raw.as_str())]);
                logger.warn(&format!("Allowed levels: {}", allowed(&Severity::ALL)), &[]);
                logger.warn(
                    "Using default level",
                    &[Field::new("default_level", Severity::default().as_str())],
                );
            }
        }
    }
}

fn allowed<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
