//! Report events and the sinks they fan out to.
//!
//! The analyzer never writes output directly. It hands [`ReportEvent`]s to a
//! [`Reporter`], which forwards each one to every attached [`ReportSink`].
//! Sinks decide what to keep and where it goes; none of them is ever queried
//! for state by the pipeline.

mod block;
mod console;
mod file;
mod memory;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use self::block::{AnalyzeBlock, AnalyzeRow, RowLayout, Tone};
pub use self::console::ConsoleSink;
pub use self::file::{FileSink, DEFAULT_REPORT_DIR};
pub use self::memory::MemorySink;

/// Message reported when a sink cannot prepare its destination.
pub const DESTINATION_FAILURE: &str = "Create report file is unsuccessful";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create report directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create report file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A message with optional structured payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ReportEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Payload as display text: strings verbatim, everything else as JSON.
    pub fn data_text(&self) -> String {
        match &self.data {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl std::fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.data {
            None => write!(f, "{}", self.message),
            Some(_) => write!(f, "{} => {}", self.message, self.data_text()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Error(ReportEntry),
    Warn(ReportEntry),
    Info(ReportEntry),
    Analyze(AnalyzeBlock),
    Log(String),
}

/// A destination for report events.
pub trait ReportSink: Send {
    fn record(&mut self, event: &ReportEvent);

    /// Called once after the last event of a run.
    fn finish(&mut self) {}

    /// Sinks backed by a file expose it here so the caller can redirect and open it.
    fn destination(&mut self) -> Option<&mut dyn ConfigurableDestination> {
        None
    }
}

/// A sink output location that must be prepared before use.
pub trait ConfigurableDestination {
    fn set_destination(&mut self, dir: &Path, file_name: &str);

    fn path(&self) -> PathBuf;

    fn open(&mut self) -> Result<(), ReportError>;
}

/// Broadcasts every event to every attached sink, in attachment order.
#[derive(Default)]
pub struct Reporter {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.add_sink(sink);
        self
    }

    pub fn add_sink(&mut self, sink: impl ReportSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn emit(&mut self, event: ReportEvent) {
        for sink in self.sinks.iter_mut() {
            sink.record(&event);
        }
    }

    pub fn error(&mut self, entry: ReportEntry) {
        tracing::debug!(message = %entry.message, "report error");
        self.emit(ReportEvent::Error(entry));
    }

    pub fn warn(&mut self, entry: ReportEntry) {
        self.emit(ReportEvent::Warn(entry));
    }

    pub fn info(&mut self, entry: ReportEntry) {
        self.emit(ReportEvent::Info(entry));
    }

    pub fn analyze(&mut self, block: AnalyzeBlock) {
        self.emit(ReportEvent::Analyze(block));
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.emit(ReportEvent::Log(line.into()));
    }

    /// Points every file-backed sink at `dir/file_name`.
    pub fn set_destinations(&mut self, dir: &Path, file_name: &str) {
        for sink in self.sinks.iter_mut() {
            if let Some(dest) = sink.destination() {
                dest.set_destination(dir, file_name);
            }
        }
    }

    /// Opens every file-backed sink. Failures are reported through the sinks
    /// rather than returned; a sink that failed to open stays attached but
    /// writes nothing. Returns the number of failures.
    pub fn open_destinations(&mut self) -> usize {
        let mut failures = Vec::new();
        for sink in self.sinks.iter_mut() {
            if let Some(dest) = sink.destination() {
                if let Err(e) = dest.open() {
                    tracing::warn!("{}", e);
                    failures.push(e);
                }
            }
        }
        let count = failures.len();
        for e in failures {
            self.error(ReportEntry::new(DESTINATION_FAILURE).with_data(e.to_string()));
        }
        count
    }

    pub fn finish(&mut self) {
        for sink in self.sinks.iter_mut() {
            sink.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_display_with_and_without_data() {
        assert_eq!(ReportEntry::new("boom").to_string(), "boom");
        assert_eq!(
            ReportEntry::new("Analyze Exception")
                .with_data("Request failed")
                .to_string(),
            "Analyze Exception => Request failed"
        );
        let entry = ReportEntry::new("bad").with_data(json!({"name": "AAPL"}));
        assert_eq!(entry.to_string(), r#"bad => {"name":"AAPL"}"#);
    }

    #[test]
    fn reporter_fans_out_to_every_sink() {
        let first = MemorySink::new();
        let second = MemorySink::new();
        let mut reporter = Reporter::new()
            .with_sink(first.clone())
            .with_sink(second.clone());

        reporter.error(ReportEntry::new("e"));
        reporter.log("line");
        reporter.analyze(AnalyzeBlock::heading("==== X ===="));

        assert_eq!(first.events().len(), 3);
        assert_eq!(first.events(), second.events());
        assert_eq!(reporter.sink_count(), 2);
    }

    #[test]
    fn destination_failure_is_reported_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the report directory should be.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"x").unwrap();

        let memory = MemorySink::new();
        let mut reporter = Reporter::new()
            .with_sink(FileSink::new())
            .with_sink(memory.clone());
        reporter.set_destinations(&blocker, "report.txt");

        assert_eq!(reporter.open_destinations(), 1);
        let errors = memory.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, DESTINATION_FAILURE);

        // The inert file sink still accepts events.
        reporter.analyze(AnalyzeBlock::heading("after"));
        reporter.finish();
    }
}
