//! relaylog is a pluggable logging facade.
//!
//! Call sites log through macros (`log_info!`, `log_warn!`, ...) or through a
//! chained-insertion [`LogStream`]; one process-wide backend implementing
//! [`Logger`] decides what is recorded and where it goes. Until a backend is
//! installed every statement is a cheap no-op.
//!
//! ```rust
//! use std::sync::Arc;
//! use relaylog::{CaptureLogSink, Logger, log_info};
//!
//! let sink = Arc::new(CaptureLogSink::new());
//! relaylog::set_logger(Some(sink.clone() as Arc<dyn Logger>));
//!
//! log_info!(target: "main", "float is : {:.2}", 3.14359);
//! log_info!(target: "main", printf "float is : %.2f", 3.14359);
//!
//! # if relaylog::static_level_enabled(relaylog::LogLevel::Info) {
//! assert_eq!(sink.messages(), ["float is : 3.14", "float is : 3.14"]);
//! # }
//! relaylog::reset_logger();
//! ```
//!
//! The crate is split into:
//! - [`log`](mod@log): the level model, backend contract, registry, streams and
//!   macros, plus ready-made sinks.
//! - [`config`]: INI-style run-time filtering configuration.

use std::sync::{Arc, LazyLock};

/// Handles configuration loading for run-time filtering.
pub mod config;
/// Errors produced while loading configuration.
pub mod config_error;
/// Logging facade: levels, backends, registry, streams and macros.
pub mod log;

pub use config::Config;
pub use config_error::ConfigError;
pub use log::{
    CaptureLogSink, CapturedRecord, Endl, FilterLogSink, LevelFilter, Location, LogLevel,
    LogRecord, LogRegistry, LogStream, Logger, Metadata, NoopLogSink, ParseLevelError, PrintfArg,
    PrintfError, STATIC_MAX_LEVEL, UNKNOWN_TARGET, sprintf, static_level_enabled,
};
#[cfg(feature = "tracing")]
pub use log::TracingLogSink;

static GLOBAL: LazyLock<LogRegistry> = LazyLock::new(LogRegistry::new);

/// The process-wide registry used by the logging macros.
pub fn global() -> &'static LogRegistry {
    &GLOBAL
}

/// Installs the process-wide backend. `None` is rejected and returns `false`.
pub fn set_logger(logger: Option<Arc<dyn Logger>>) -> bool {
    GLOBAL.set_logger(logger)
}

/// Currently installed process-wide backend.
pub fn logger() -> Arc<dyn Logger> {
    GLOBAL.logger()
}

/// Restores the no-op backend.
pub fn reset_logger() {
    GLOBAL.reset();
}

/// Flushes the process-wide backend.
pub fn flush() {
    GLOBAL.flush();
}
