//! Configuration validation.
//!
//! # Responsibilities
//! - Turn a [`RawLogConfig`] into a [`LogConfig`]
//! - Substitute defaults for empty or unrecognized values
//! - Record every rejected value, not just the first
//!
//! # Design Decisions
//! - Resolution is a pure function and never fails: logging configuration
//!   errors must not keep an application from starting

use crate::config::schema::{LogConfig, LogFormat, RawLogConfig};
use crate::logging::Severity;

/// A configuration value that was rejected and replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    /// The format was neither `json` nor `console`.
    InvalidFormat { raw: String },
    /// The level named none of the five severities.
    InvalidLevel { raw: String },
}

impl ConfigIssue {
    /// The value as it was supplied.
    pub fn raw(&self) -> &str {
        match self {
            ConfigIssue::InvalidFormat { raw } | ConfigIssue::InvalidLevel { raw } => raw,
        }
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub config: LogConfig,
    /// Format issues first, then level issues.
    pub issues: Vec<ConfigIssue>,
}

/// Resolve raw values into a usable configuration.
pub fn resolve(raw: &RawLogConfig) -> Resolution {
    let mut issues = Vec::new();

    let format = if raw.format.is_empty() {
        LogFormat::default()
    } else {
        raw.format.parse().unwrap_or_else(|_| {
            issues.push(ConfigIssue::InvalidFormat {
                raw: raw.format.clone(),
            });
            LogFormat::default()
        })
    };

    let level = if raw.level.is_empty() {
        Severity::default()
    } else {
        raw.level.parse().unwrap_or_else(|_| {
            issues.push(ConfigIssue::InvalidLevel {
                raw: raw.level.clone(),
            });
            Severity::default()
        })
    };

    Resolution {
        config: LogConfig::new(format, level),
        issues,
    }
}
