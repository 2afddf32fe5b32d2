use std::io::{self, IsTerminal, Write};

use tabled::{Table, Tabled};

use super::{ReportEntry, ReportEvent, ReportSink};

#[derive(Tabled)]
struct ErrorRow {
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Data")]
    data: String,
}

/// Prints analysis and log lines as they arrive, then an error table on finish.
pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
    styled: bool,
    errors: Vec<ReportEntry>,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    /// Writes to stdout, with colour only when stdout is a terminal.
    pub fn new() -> Self {
        let styled = io::stdout().is_terminal();
        Self::with_writer(io::stdout(), styled)
    }

    pub fn with_writer(out: impl Write + Send + 'static, styled: bool) -> Self {
        Self {
            out: Box::new(out),
            styled,
            errors: Vec::new(),
        }
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("console write failed: {}", e);
        }
    }
}

impl ReportSink for ConsoleSink {
    fn record(&mut self, event: &ReportEvent) {
        match event {
            ReportEvent::Analyze(block) => {
                let text = block.render(self.styled);
                self.write_line(&text);
            }
            ReportEvent::Log(line) => self.write_line(line),
            ReportEvent::Error(entry) => self.errors.push(entry.clone()),
            ReportEvent::Warn(entry) => tracing::warn!("{}", entry),
            ReportEvent::Info(entry) => tracing::info!("{}", entry),
        }
    }

    fn finish(&mut self) {
        if self.errors.is_empty() {
            return;
        }
        let rows: Vec<ErrorRow> = self
            .errors
            .iter()
            .map(|e| ErrorRow {
                message: e.message.clone(),
                data: e.data_text(),
            })
            .collect();
        let table = Table::new(rows).to_string();
        self.write_line("Errors");
        self.write_line(&table);
        if let Err(e) = self.out.flush() {
            tracing::warn!("console flush failed: {}", e);
        }
    }
}
