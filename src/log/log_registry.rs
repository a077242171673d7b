use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use arc_swap::ArcSwap;

use crate::log::{
    log_record::{Location, LogRecord, Metadata},
    log_sink::Logger,
    log_stream::LogStream,
    noop_log_sink::NoopLogSink,
    printf::{PrintfArg, sprintf},
};

/// Holder of the current backend, shared by every call site.
///
/// Reads are lock-free and never observe a missing backend: the registry is
/// seeded with a [`NoopLogSink`]. Installing a backend is a single atomic store,
/// last writer wins. A replaced backend stays alive until every dispatch that
/// loaded it has returned, so the caller may drop its own handle right after
/// swapping.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use relaylog::{CaptureLogSink, LogLevel, LogRegistry, Logger, log_to};
///
/// let registry = LogRegistry::new();
/// let sink = Arc::new(CaptureLogSink::new());
/// assert!(registry.set_logger(Some(sink.clone() as Arc<dyn Logger>)));
///
/// log_to!(&registry, LogLevel::Info, "ready in {}ms", 12);
/// # if relaylog::static_level_enabled(LogLevel::Info) {
/// assert_eq!(sink.messages(), ["ready in 12ms"]);
/// # }
/// ```
pub struct LogRegistry {
    slot: ArcSwap<Arc<dyn Logger>>,
}

impl LogRegistry {
    pub fn new() -> Self {
        Self {
            slot: ArcSwap::from_pointee(noop()),
        }
    }

    /// Installs `logger` as the current backend.
    ///
    /// Returns `false` and leaves the current backend in place when `logger`
    /// is `None`.
    pub fn set_logger(&self, logger: Option<Arc<dyn Logger>>) -> bool {
        match logger {
            Some(logger) => {
                self.slot.store(Arc::new(logger));
                true
            }
            None => false,
        }
    }

    /// Returns the currently installed backend.
    #[must_use]
    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::clone(&**self.slot.load())
    }

    /// Puts the no-op backend back.
    pub fn reset(&self) {
        self.slot.store(Arc::new(noop()));
    }

    /// Runs the backend's run-time gate for `metadata`.
    pub fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        let logger = self.slot.load();
        contained(false, || logger.enable(metadata))
    }

    /// Formatted-arguments entry point behind the logging macros.
    ///
    /// `args` is only rendered when the backend enables `metadata`. A `Display`
    /// impl that fails yields an empty message; the event is still delivered.
    pub fn dispatch(
        &self,
        metadata: Metadata<'_>,
        location: Location<'_>,
        args: fmt::Arguments<'_>,
    ) {
        let logger = self.slot.load();
        if !contained(false, || logger.enable(&metadata)) {
            return;
        }
        let record = LogRecord::at(metadata, render(args), location);
        contained((), || logger.log(&record));
    }

    /// printf-style counterpart of [`dispatch`](Self::dispatch). A malformed
    /// format or mismatched argument yields an empty message.
    pub fn dispatch_printf(
        &self,
        metadata: Metadata<'_>,
        location: Location<'_>,
        format: &str,
        args: &[PrintfArg<'_>],
    ) {
        let logger = self.slot.load();
        if !contained(false, || logger.enable(&metadata)) {
            return;
        }
        let message = sprintf(format, args).unwrap_or_default();
        let record = LogRecord::at(metadata, message, location);
        contained((), || logger.log(&record));
    }

    /// Single-load gate-then-log used by streams. `take_message` always runs,
    /// receiving the gate's verdict, so the caller can release its buffer either
    /// way; the record is only logged when it returns a message.
    pub(crate) fn deliver(
        &self,
        metadata: Metadata<'_>,
        location: Location<'_>,
        take_message: impl FnOnce(bool) -> Option<String>,
    ) {
        let logger = self.slot.load();
        let enabled = contained(false, || logger.enable(&metadata));
        if let Some(message) = take_message(enabled) {
            let record = LogRecord::at(metadata, message, location);
            contained((), || logger.log(&record));
        }
    }

    /// Asks the current backend to flush.
    pub fn flush(&self) {
        let logger = self.slot.load();
        contained((), || logger.flush());
    }

    /// Creates a stream for chained-insertion logging.
    ///
    /// A `Some` target is fixed for every statement on the stream and takes
    /// precedence over the per-statement target.
    pub fn stream<'r>(&'r self, target: Option<&'r str>) -> LogStream<'r> {
        LogStream::new(self, target)
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRegistry").finish_non_exhaustive()
    }
}

fn noop() -> Arc<dyn Logger> {
    Arc::new(NoopLogSink)
}

fn render(args: fmt::Arguments<'_>) -> String {
    if let Some(s) = args.as_str() {
        return s.to_owned();
    }
    let mut message = String::new();
    if fmt::write(&mut message, args).is_err() {
        message.clear();
    }
    message
}

/// Keeps a panicking backend from unwinding into the logging call site.
fn contained<R>(fallback: R, f: impl FnOnce() -> R) -> R {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(fallback)
}
