//! Configuration schema definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::Severity;

/// Encoding of emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line (production style).
    #[default]
    Json,
    /// Human-readable line with colored level names (development style).
    Console,
}

impl LogFormat {
    /// Every accepted format.
    pub const ALL: [LogFormat; 2] = [LogFormat::Json, LogFormat::Console];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Console => "console",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither `json` nor `console`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized log format: {0:?}")]
pub struct ParseFormatError(pub String);

impl FromStr for LogFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ParseFormatError(s.to_string()))
    }
}

/// Validated logging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Record encoding.
    pub format: LogFormat,

    /// Minimum severity that gets emitted.
    pub level: Severity,
}

impl LogConfig {
    pub fn new(format: LogFormat, level: Severity) -> Self {
        Self { format, level }
    }
}

/// Logging configuration as supplied, before validation.
///
/// An empty string means the value was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawLogConfig {
    /// Requested format (`json` or `console`).
    pub format: String,

    /// Requested minimum severity (`debug`, `info`, `warn`, `error`, `fatal`).
    pub level: String,
}

impl RawLogConfig {
    pub fn new(format: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            level: level.into(),
        }
    }

    /// Replace values with the non-empty values of `other`.
    pub fn overlay(mut self, other: RawLogConfig) -> Self {
        if !other.format.is_empty() {
            self.format = other.format;
        }
        if !other.level.is_empty() {
            self.level = other.level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("console".parse::<LogFormat>(), Ok(LogFormat::Console));
        assert!("JSON".parse::<LogFormat>().is_err());
        assert_eq!(
            "xml".parse::<LogFormat>(),
            Err(ParseFormatError("xml".to_string()))
        );
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, Severity::Info);
    }

    #[test]
    fn test_overlay_keeps_unset_values() {
        let file = RawLogConfig::new("console", "debug");

        let merged = file.clone().overlay(RawLogConfig::new("", "warn"));
        assert_eq!(merged, RawLogConfig::new("console", "warn"));

        let untouched = file.clone().overlay(RawLogConfig::default());
        assert_eq!(untouched, file);
    }
}
