use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{ConfigurableDestination, ReportEntry, ReportError, ReportEvent, ReportSink};

pub const DEFAULT_REPORT_DIR: &str = "./report";

/// Writes plain-text analysis to `<dir>/<YYYY-MM-DD>.txt`.
///
/// Nothing is written until [`ConfigurableDestination::open`] succeeds.
pub struct FileSink {
    dir: PathBuf,
    file_name: String,
    writer: Option<BufWriter<File>>,
    errors: Vec<ReportEntry>,
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSink {
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_REPORT_DIR),
            file_name: default_file_name(),
            writer: None,
            errors: Vec::new(),
        }
    }

    /// A sink writing to the default file name inside `dir`.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::new()
        }
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn write_text(&mut self, text: &str) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", text) {
            tracing::warn!("report file write failed: {}", e);
        }
    }
}

fn default_file_name() -> String {
    format!("{}.txt", chrono::Local::now().format("%Y-%m-%d"))
}

impl ConfigurableDestination for FileSink {
    fn set_destination(&mut self, dir: &Path, file_name: &str) {
        self.dir = dir.to_path_buf();
        if !file_name.is_empty() {
            self.file_name = file_name.to_string();
        }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    fn open(&mut self) -> Result<(), ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path();
        let file = File::create(&path).map_err(|source| ReportError::CreateFile {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("writing report to {}", path.display());
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }
}

impl ReportSink for FileSink {
    fn record(&mut self, event: &ReportEvent) {
        match event {
            ReportEvent::Analyze(block) => {
                let text = block.render(false);
                self.write_text(&text);
            }
            ReportEvent::Error(entry) => self.errors.push(entry.clone()),
            _ => {}
        }
    }

    fn finish(&mut self) {
        if !self.errors.is_empty() {
            let lines: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            self.write_text("Errors");
            for line in lines {
                self.write_text(&line);
            }
        }
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush() {
                tracing::warn!("report file flush failed: {}", e);
            }
        }
    }

    fn destination(&mut self) -> Option<&mut dyn ConfigurableDestination> {
        Some(self)
    }
}
