//! Chained-insertion logging.
//!
//! A statement starts with [`LogStream::log`] (or [`LogStream::reset`]),
//! accumulates values into the calling thread's buffer, and ends with
//! [`LogStream::flush`] or an inserted [`Endl`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use relaylog::{CaptureLogSink, Endl, LogLevel, LogRegistry, Logger};
//!
//! let registry = LogRegistry::new();
//! let sink = Arc::new(CaptureLogSink::new());
//! registry.set_logger(Some(sink.clone() as Arc<dyn Logger>));
//!
//! let mut stream = registry.stream(Some("master"));
//! let _ = stream.log(LogLevel::Info, file!(), line!(), "main") << "test" << 1 + 1 << Endl;
//!
//! # if relaylog::static_level_enabled(LogLevel::Info) {
//! let records = sink.records();
//! assert_eq!(records[0].message, "test2");
//! assert_eq!(records[0].target, "master");
//! # }
//! ```
//!
//! Statements do not nest: starting one discards whatever an unflushed
//! statement left in the same thread's buffer.

use std::{fmt, ops::Shl};

use crate::log::{
    log_buffer,
    log_level::LogLevel,
    log_record::{Location, Metadata, UNKNOWN_TARGET},
    log_registry::LogRegistry,
    static_level::static_level_enabled,
};

/// End-of-statement marker: flushes the statement, then appends a newline to
/// the (now cleared) buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Endl;

/// Stream bound to a registry, carrying the context of the statement in flight.
#[derive(Debug)]
pub struct LogStream<'r> {
    registry: &'r LogRegistry,
    fixed_target: Option<&'r str>,
    statement_target: &'r str,
    level: LogLevel,
    location: Location<'r>,
    compiled_in: bool,
}

impl<'r> LogStream<'r> {
    pub(crate) fn new(registry: &'r LogRegistry, fixed_target: Option<&'r str>) -> Self {
        Self {
            registry,
            fixed_target,
            statement_target: UNKNOWN_TARGET,
            level: LogLevel::Info,
            location: Location::unknown(),
            compiled_in: static_level_enabled(LogLevel::Info),
        }
    }

    /// Starts a statement at `level` from `file:line`, with `target` used
    /// unless the stream has a fixed target.
    pub fn log(&mut self, level: LogLevel, file: &'r str, line: u32, target: &'r str) -> &mut Self {
        self.location = Location::new(file, line, None);
        self.statement_target = target;
        self.reset(level);
        self
    }

    /// Like [`log`](Self::log), also recording the statement's module path.
    pub fn log_in(
        &mut self,
        level: LogLevel,
        location: Location<'r>,
        target: &'r str,
    ) -> &mut Self {
        self.location = location;
        self.statement_target = target;
        self.reset(level);
        self
    }

    /// Begins a new statement at `level`, dropping any unflushed content on
    /// this thread.
    pub fn reset(&mut self, level: LogLevel) {
        self.level = level;
        self.compiled_in = static_level_enabled(level);
        log_buffer::clear();
    }

    /// Appends the textual form of `value`.
    pub fn insert<T: fmt::Display + ?Sized>(&mut self, value: &T) -> &mut Self {
        if self.compiled_in {
            log_buffer::append(&value);
        }
        self
    }

    /// Flushes the statement, then appends a newline to the buffer.
    pub fn endl(&mut self) -> &mut Self {
        self.flush();
        if self.compiled_in {
            log_buffer::push_str("\n");
        }
        self
    }

    /// Delivers the accumulated message if the backend enables it, and clears
    /// the buffer either way.
    pub fn flush(&self) {
        if !self.compiled_in {
            log_buffer::clear();
            return;
        }
        let metadata = Metadata::new(self.level, self.target());
        self.registry.deliver(metadata, self.location, |enabled| {
            let message = if enabled { log_buffer::snapshot() } else { None };
            log_buffer::clear();
            message
        });
    }

    /// Replaces the fixed target; `None` falls back to per-statement targets.
    pub fn set_target(&mut self, target: Option<&'r str>) {
        self.fixed_target = target;
    }

    /// Target the current statement will be delivered under.
    pub fn target(&self) -> &'r str {
        self.fixed_target.unwrap_or(self.statement_target)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Text accumulated so far by this thread's statement.
    pub fn buffered(&self) -> String {
        log_buffer::snapshot().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        log_buffer::len() == 0
    }
}

impl fmt::Write for LogStream<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.compiled_in {
            log_buffer::push_str(s);
        }
        Ok(())
    }
}

impl<'a, 'r, T: fmt::Display> Shl<T> for &'a mut LogStream<'r> {
    type Output = &'a mut LogStream<'r>;

    fn shl(self, value: T) -> Self::Output {
        self.insert(&value)
    }
}

impl<'a, 'r> Shl<Endl> for &'a mut LogStream<'r> {
    type Output = &'a mut LogStream<'r>;

    fn shl(self, _marker: Endl) -> Self::Output {
        self.endl()
    }
}
