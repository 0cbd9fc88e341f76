//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use appkit_logging::{LogConfig, LogFormat, Logger, LoggerBuilder, RawLogConfig, Severity};
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory writer capturing everything a logger writes.
#[derive(Clone, Default)]
pub struct TestWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl TestWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> String {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer).to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_string).collect()
    }

    /// Every captured line parsed as JSON.
    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("Mutex poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for TestWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// A JSON logger at `level` writing into a fresh [`TestWriter`].
#[allow(dead_code)]
pub fn json_logger(level: Severity) -> (Logger, TestWriter) {
    let writer = TestWriter::new();
    let logger = LoggerBuilder::new(LogConfig::new(LogFormat::Json, level))
        .with_writer(writer.clone())
        .build()
        .unwrap();
    (logger, writer)
}

/// A logger built from raw values, writing into a fresh [`TestWriter`].
#[allow(dead_code)]
pub fn raw_logger(format: &str, level: &str) -> (Logger, TestWriter) {
    let writer = TestWriter::new();
    let logger = LoggerBuilder::from_raw(&RawLogConfig::new(format, level))
        .with_writer(writer.clone())
        .build()
        .unwrap();
    (logger, writer)
}
