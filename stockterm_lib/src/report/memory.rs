use std::sync::{Arc, Mutex, MutexGuard};

use super::{ReportEntry, ReportEvent, ReportSink};

/// Keeps every event in memory. Clones share the same buffer, so a handle
/// kept by the caller sees what the [`Reporter`](super::Reporter) recorded.
#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ReportEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    pub fn errors(&self) -> Vec<ReportEntry> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Error(entry) => Some(entry.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn logs(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Log(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    /// Plain renders of every analysis block, in order.
    pub fn analysis(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Analyze(block) => Some(block.render(false)),
                _ => None,
            })
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn record(&mut self, event: &ReportEvent) {
        self.lock().push(event.clone());
    }
}
