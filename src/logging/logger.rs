//! The logger handle and its builder.

use std::fmt;
use std::process;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{dispatcher, Dispatch, Level};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::config::{resolve, ConfigIssue, LogConfig, LogFormat, RawLogConfig};
use crate::logging::factory::report_issues;
use crate::logging::layer::RecordLayer;
use crate::logging::{Field, Severity};

/// Target of every event emitted through a [`Logger`].
pub const TARGET: &str = "appkit_logging";

/// ISO-8601 timestamps with milliseconds and UTC offset.
pub const ISO8601: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Errors raised while constructing a logger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("invalid time format {0:?}")]
    InvalidTimeFormat(String),
}

struct Core {
    dispatch: Dispatch,
    level: Severity,
    format: LogFormat,
}

/// Immutable structured-logging handle.
///
/// Cloning is cheap and clones share the same sink. [`Logger::with`] derives
/// a new logger with extra fields; the logger it was derived from keeps its
/// own fields.
#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    fields: Arc<Vec<Field>>,
}

macro_rules! emit {
    ($level:expr, $severity:expr, $fields:expr, $message:expr) => {
        tracing::event!(
            target: TARGET,
            $level,
            appkit.severity = $severity,
            appkit.fields = $fields,
            "{}",
            $message
        )
    };
}

impl Logger {
    /// A logger that discards everything.
    pub fn nop() -> Self {
        Self {
            core: Arc::new(Core {
                dispatch: Dispatch::none(),
                level: Severity::Fatal,
                format: LogFormat::default(),
            }),
            fields: Arc::new(Vec::new()),
        }
    }

    /// Minimum severity this logger emits.
    pub fn level(&self) -> Severity {
        self.core.level
    }

    pub fn format(&self) -> LogFormat {
        self.core.format
    }

    /// Fields added to every record.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.core.level
    }

    /// Derive a logger that appends `fields` to every record.
    pub fn with<I, F>(&self, fields: I) -> Logger
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let mut extended = Vec::clone(&self.fields);
        extended.extend(fields.into_iter().map(Into::into));
        Logger {
            core: Arc::clone(&self.core),
            fields: Arc::new(extended),
        }
    }

    /// Whether both handles are the same logger, sink and fields alike.
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.core, &b.core) && Arc::ptr_eq(&a.fields, &b.fields)
    }

    /// Emit a record at `severity` if this logger is enabled for it.
    pub fn log(&self, severity: Severity, message: &str, fields: &[Field]) {
        if !self.enabled(severity) {
            return;
        }

        let mut merged = Map::new();
        merged.extend(self.fields.iter().cloned().map(Field::into_pair));
        merged.extend(fields.iter().cloned().map(Field::into_pair));
        let encoded = Value::Object(merged).to_string();
        let encoded = encoded.as_str();

        dispatcher::with_default(&self.core.dispatch, || {
            let name = severity.as_str();
            match severity {
                Severity::Debug => emit!(Level::DEBUG, name, encoded, message),
                Severity::Info => emit!(Level::INFO, name, encoded, message),
                Severity::Warn => emit!(Level::WARN, name, encoded, message),
                Severity::Error | Severity::Fatal => emit!(Level::ERROR, name, encoded, message),
            }
        });
    }

    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Debug, message, fields);
    }

    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Info, message, fields);
    }

    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Warn, message, fields);
    }

    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Error, message, fields);
    }

    /// Emit a record at fatal severity, then exit with status 1.
    pub fn fatal(&self, message: &str, fields: &[Field]) -> ! {
        self.log(Severity::Fatal, message, fields);
        process::exit(1)
    }

    /// Run `f` with this logger's dispatcher as the thread default, so
    /// plain `tracing` macros inside `f` are written by this logger.
    ///
    /// Fields attached with [`Logger::with`] are not added to those events.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.core.dispatch, f)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.core.level)
            .field("format", &self.core.format)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder for [`Logger`].
///
/// Defaults: standard output, ISO-8601 timestamps.
pub struct LoggerBuilder {
    config: LogConfig,
    issues: Vec<ConfigIssue>,
    writer: BoxMakeWriter,
    time_format: String,
}

impl LoggerBuilder {
    pub fn new(config: LogConfig) -> Self {
        Self {
            config,
            issues: Vec::new(),
            writer: BoxMakeWriter::new(std::io::stdout),
            time_format: ISO8601.to_string(),
        }
    }

    /// Start from unvalidated values. Rejected values are replaced by their
    /// defaults and reported as warnings once the logger is built.
    pub fn from_raw(raw: &RawLogConfig) -> Self {
        let resolution = resolve(raw);
        Self {
            issues: resolution.issues,
            ..Self::new(resolution.config)
        }
    }

    /// Write records somewhere other than standard output.
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = BoxMakeWriter::new(writer);
        self
    }

    /// Override the `strftime` timestamp format.
    pub fn with_time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = time_format.into();
        self
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn build(self) -> Result<Logger, BuildError> {
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(BuildError::InvalidTimeFormat(self.time_format));
        }

        let LogConfig { format, level } = self.config;
        let subscriber = tracing_subscriber::registry()
            .with(level.level_filter())
            .with(RecordLayer::new(format, self.time_format, self.writer));

        let logger = Logger {
            core: Arc::new(Core {
                dispatch: Dispatch::new(subscriber),
                level,
                format,
            }),
            fields: Arc::new(Vec::new()),
        };

        report_issues(&logger, &self.issues);
        Ok(logger)
    }
}
