//! Bridge into the `tracing` ecosystem.

use crate::log::{
    log_level::LogLevel,
    log_record::{LogRecord, Metadata},
    log_sink::Logger,
};

/// Backend that re-emits records as `tracing` events.
///
/// Enablement is delegated to the active `tracing` subscriber. The record's
/// target, file and line travel as `log.*` fields, since `tracing` targets must
/// be static. `Fatal` has no `tracing` equivalent and is emitted at `ERROR`
/// with `fatal = true`.
///
/// ```ignore
/// use std::sync::Arc;
/// use relaylog::TracingLogSink;
///
/// tracing_subscriber::fmt::init();
/// relaylog::set_logger(Some(Arc::new(TracingLogSink)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TracingLogSink {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogSink {
    fn enable(&self, metadata: &Metadata<'_>) -> bool {
        match metadata.level {
            LogLevel::Fatal | LogLevel::Error => tracing::enabled!(tracing::Level::ERROR),
            LogLevel::Warn => tracing::enabled!(tracing::Level::WARN),
            LogLevel::Info => tracing::enabled!(tracing::Level::INFO),
            LogLevel::Debug => tracing::enabled!(tracing::Level::DEBUG),
            LogLevel::Trace => tracing::enabled!(tracing::Level::TRACE),
        }
    }

    fn log(&self, record: &LogRecord<'_>) {
        let target = record.target();
        let (file, line, message) = (record.file, record.line, record.message.as_str());
        match record.level() {
            LogLevel::Fatal => tracing::error!(
                log.target = target,
                log.file = file,
                log.line = line,
                fatal = true,
                "{message}"
            ),
            LogLevel::Error => tracing::error!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{message}"
            ),
            LogLevel::Warn => tracing::warn!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{message}"
            ),
            LogLevel::Info => tracing::info!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{message}"
            ),
            LogLevel::Debug => tracing::debug!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{message}"
            ),
            LogLevel::Trace => tracing::trace!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{message}"
            ),
        }
    }

    fn flush(&self) {}
}
