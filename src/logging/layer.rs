//! Record encoding layer.
//!
//! Turns `tracing` events into one line each, either a JSON object
//! (`level`, `ts`, `message`, then structured fields) or a tab-separated
//! console line with a colored level name.

use std::fmt;
use std::io::Write;

use chrono::Local;
use console::Style;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::config::LogFormat;
use crate::logging::Severity;

/// Event field carrying the logger-level severity (tracing has no fatal).
pub(crate) const SEVERITY_FIELD: &str = "appkit.severity";

/// Event field carrying the structured fields, encoded as a JSON object.
pub(crate) const FIELDS_FIELD: &str = "appkit.fields";

const MESSAGE_FIELD: &str = "message";

/// JSON shape of a record.
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    level: &'a str,
    ts: &'a str,
    message: &'a str,
    #[serde(flatten)]
    fields: &'a Map<String, Value>,
}

/// Layer writing every event it sees as a single encoded line.
pub(crate) struct RecordLayer {
    format: LogFormat,
    time_format: String,
    writer: BoxMakeWriter,
}

impl RecordLayer {
    pub(crate) fn new(format: LogFormat, time_format: String, writer: BoxMakeWriter) -> Self {
        Self {
            format,
            time_format,
            writer,
        }
    }

    fn encode(&self, severity: Severity, message: &str, fields: &Map<String, Value>) -> String {
        let ts = Local::now().format(&self.time_format).to_string();

        match self.format {
            LogFormat::Json => {
                let record = JsonRecord {
                    level: severity.as_str(),
                    ts: &ts,
                    message,
                    fields,
                };
                serde_json::to_string(&record).unwrap_or_default()
            }
            LogFormat::Console => {
                let level = level_style(severity).apply_to(severity.as_str());
                let mut line = format!("{ts}\t{level}\t{message}");
                if !fields.is_empty() {
                    if let Ok(encoded) = serde_json::to_string(fields) {
                        line.push('\t');
                        line.push_str(&encoded);
                    }
                }
                line
            }
        }
    }
}

fn level_style(severity: Severity) -> Style {
    let style = Style::new().force_styling(true);
    match severity {
        Severity::Debug => style.magenta(),
        Severity::Info => style.blue(),
        Severity::Warn => style.yellow(),
        Severity::Error | Severity::Fatal => style.red(),
    }
}

impl<S> Layer<S> for RecordLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let severity = visitor
            .severity
            .unwrap_or_else(|| Severity::from_tracing(metadata.level()));
        let message = visitor.message.unwrap_or_default();

        let mut line = self.encode(severity, &message, &visitor.fields);
        line.push('\n');

        let mut writer = self.writer.make_writer_for(metadata);
        let _ = writer.write_all(line.as_bytes());
    }
}

/// Collects the message, severity and fields of an event.
#[derive(Default)]
struct RecordVisitor {
    message: Option<String>,
    severity: Option<Severity>,
    fields: Map<String, Value>,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        match field.name() {
            MESSAGE_FIELD => self.message = Some(value.to_string()),
            SEVERITY_FIELD => self.severity = value.parse().ok(),
            FIELDS_FIELD => {
                if let Ok(Value::Object(fields)) = serde_json::from_str(value) {
                    self.fields.extend(fields);
                }
            }
            name => {
                self.fields.insert(name.to_string(), Value::from(value));
            }
        }
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == MESSAGE_FIELD {
            self.message = Some(rendered);
        } else {
            self.fields
                .insert(field.name().to_string(), Value::String(rendered));
        }
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.fields
                .insert(field.name().to_string(), Value::Number(n));
        }
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.fields.insert(field.name().to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layer(format: LogFormat) -> RecordLayer {
        RecordLayer::new(
            format,
            "%Y-%m-%dT%H:%M:%S%.3f%z".to_string(),
            BoxMakeWriter::new(std::io::sink),
        )
    }

    #[test]
    fn test_json_record_shape() {
        let mut fields = Map::new();
        fields.insert("port".to_string(), json!(8080));

        let line = layer(LogFormat::Json).encode(Severity::Info, "Starting HTTP server", &fields);
        let value: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["level"], "info");
        assert_eq!(value["message"], "Starting HTTP server");
        assert_eq!(value["port"], 8080);
        assert!(value["ts"].as_str().unwrap().contains('T'));

        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["level", "ts", "message", "port"]);
    }

    #[test]
    fn test_console_record_shape() {
        let mut fields = Map::new();
        fields.insert("key".to_string(), json!("value"));

        let line = layer(LogFormat::Console).encode(Severity::Warn, "careful", &fields);
        let parts: Vec<&str> = line.split('\t').collect();

        assert_eq!(parts.len(), 4);
        assert!(parts[1].contains("warn"));
        assert!(parts[1].contains("\u{1b}["), "level name should be colored");
        assert_eq!(parts[2], "careful");
        assert_eq!(parts[3], r#"{"key":"value"}"#);
    }

    #[test]
    fn test_console_record_without_fields() {
        let line = layer(LogFormat::Console).encode(Severity::Debug, "plain", &Map::new());
        assert_eq!(line.split('\t').count(), 3);
    }
}
