//! Configuration loading from the environment and from disk.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RawLogConfig;

/// Environment variable selecting the record format.
pub const FORMAT_VAR: &str = "LOG_FORMAT";

/// Environment variable selecting the minimum severity.
pub const LEVEL_VAR: &str = "LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl RawLogConfig {
    /// Read `LOG_FORMAT` and `LOG_LEVEL` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| {
            env::var_os(key).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Read the same variables through `lookup` instead of the environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            format: lookup(FORMAT_VAR).unwrap_or_default(),
            level: lookup(LEVEL_VAR).unwrap_or_default(),
        }
    }
}

/// Parse a TOML document with top-level `format` and `level` keys.
pub fn parse_config(content: &str) -> Result<RawLogConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a TOML configuration file.
///
/// Values are not validated here; see [`resolve`](crate::config::resolve).
pub fn load_config(path: &Path) -> Result<RawLogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let vars = HashMap::from([(FORMAT_VAR, "console"), (LEVEL_VAR, "warn")]);
        let raw = RawLogConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(raw, RawLogConfig::new("console", "warn"));
    }

    #[test]
    fn test_from_lookup_unset() {
        let raw = RawLogConfig::from_lookup(|_| None);
        assert_eq!(raw, RawLogConfig::default());
    }

    #[test]
    fn test_parse_config() {
        let raw = parse_config("format = \"console\"\nlevel = \"debug\"\n").unwrap();
        assert_eq!(raw, RawLogConfig::new("console", "debug"));

        // Unvalidated: bad values survive parsing and are dealt with later.
        let raw = parse_config("level = \"verbose\"").unwrap();
        assert_eq!(raw, RawLogConfig::new("", "verbose"));
    }

    #[test]
    fn test_parse_config_rejects_malformed_toml() {
        let err = parse_config("format = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/appkit-logging.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
