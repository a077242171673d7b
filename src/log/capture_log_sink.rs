use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::log::{
    log_level::LogLevel,
    log_record::{LogRecord, Metadata},
    log_sink::Logger,
};

/// Owned copy of a delivered [`LogRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub module_path: Option<String>,
}

impl From<&LogRecord<'_>> for CapturedRecord {
    fn from(record: &LogRecord<'_>) -> Self {
        Self {
            level: record.level(),
            target: record.target().to_string(),
            message: record.message.clone(),
            file: record.file.to_string(),
            line: record.line,
            module_path: record.module_path.map(str::to_string),
        }
    }
}

/// Backend that keeps every delivered record in memory and counts calls.
///
/// Intended for tests: install it, run the code under test, then inspect
/// [`records`](Self::records) and the call counters.
#[derive(Debug, Default)]
pub struct CaptureLogSink {
    cutoff: Option<LogLevel>,
    records: Mutex<Vec<CapturedRecord>>,
    enable_calls: AtomicUsize,
    log_calls: AtomicUsize,
    flush_calls: AtomicUsize,
}

impl CaptureLogSink {
    /// Accepts every level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts levels at or above `cutoff` in severity.
    pub fn with_cutoff(cutoff: LogLevel) -> Self {
        Self {
            cutoff: Some(cutoff),
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// Removes and returns everything captured so far.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn enable_calls(&self) -> usize {
        self.enable_calls.load(Ordering::SeqCst)
    }

    pub fn log_calls(&self) -> usize {
        self.log_calls.load(Ordering::SeqCst)
    }

    pub fn flush_calls(&self) -> usize {
        self.flush_calls.load(Ordering::SeqCst)
    }
}

impl Logger for CaptureLogSink {
    fn enable(&self, metadata: &Metadata<'_>) -> bool {
        self.enable_calls.fetch_add(1, Ordering::SeqCst);
        self.cutoff.is_none_or(|cutoff| metadata.level <= cutoff)
    }

    fn log(&self, record: &LogRecord<'_>) {
        self.log_calls.fetch_add(1, Ordering::SeqCst);
        self.records.lock().push(record.into());
    }

    fn flush(&self) {
        self.flush_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_owned_copies_and_counts() {
        let sink = CaptureLogSink::with_cutoff(LogLevel::Warn);
        assert!(sink.enable(&Metadata::new(LogLevel::Error, "t")));
        assert!(!sink.enable(&Metadata::new(LogLevel::Info, "t")));

        {
            let target = String::from("scoped");
            let record = LogRecord::new(Metadata::new(LogLevel::Error, &target), "boom", "s.rs", 9)
                .with_module_path("app");
            sink.log(&record);
        }
        sink.flush();

        let records = sink.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, "scoped");
        assert_eq!(records[0].module_path.as_deref(), Some("app"));
        assert!(sink.records().is_empty());
        assert_eq!(
            (sink.enable_calls(), sink.log_calls(), sink.flush_calls()),
            (2, 1, 1)
        );
    }
}
