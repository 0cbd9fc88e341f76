//! Record severities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Logged, then the process exits.
    Fatal,
}

impl Severity {
    /// Every accepted severity, in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Filter applied to the tracing dispatcher backing a logger.
    ///
    /// `tracing` has no fatal level, so fatal maps onto `ERROR` and the
    /// finer cut is made by [`Logger::enabled`](crate::logging::Logger::enabled).
    pub(crate) fn level_filter(self) -> LevelFilter {
        match self {
            Severity::Debug => LevelFilter::DEBUG,
            Severity::Info => LevelFilter::INFO,
            Severity::Warn => LevelFilter::WARN,
            Severity::Error | Severity::Fatal => LevelFilter::ERROR,
        }
    }

    /// Severity for an event that was not emitted through a [`Logger`](crate::logging::Logger).
    pub(crate) fn from_tracing(level: &Level) -> Self {
        match *level {
            Level::TRACE | Level::DEBUG => Severity::Debug,
            Level::INFO => Severity::Info,
            Level::WARN => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the five severities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized log level: {0:?}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_severities() {
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>(), Ok(severity));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("DEBUG".parse::<Severity>().is_err());
        assert!("Info".parse::<Severity>().is_err());
        assert_eq!(
            "verbose".parse::<Severity>(),
            Err(ParseSeverityError("verbose".to_string()))
        );
    }

    #[test]
    fn test_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(Severity::Debug.level_filter(), LevelFilter::DEBUG);
        assert_eq!(Severity::Fatal.level_filter(), LevelFilter::ERROR);
        assert_eq!(Severity::from_tracing(&Level::TRACE), Severity::Debug);
        assert_eq!(Severity::from_tracing(&Level::ERROR), Severity::Error);
    }
}
