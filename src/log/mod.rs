pub mod capture_log_sink;
pub mod filter_log_sink;
mod log_buffer;
pub mod log_level;
pub mod log_macros;
pub mod log_record;
pub mod log_registry;
pub mod log_sink;
pub mod log_stream;
pub mod noop_log_sink;
pub mod printf;
pub mod static_level;
#[cfg(feature = "tracing")]
pub mod tracing_log_sink;

pub use capture_log_sink::{CaptureLogSink, CapturedRecord};
pub use filter_log_sink::FilterLogSink;
pub use log_level::{LevelFilter, LogLevel, ParseLevelError};
pub use log_record::{Location, LogRecord, Metadata, UNKNOWN_TARGET};
pub use log_registry::LogRegistry;
pub use log_sink::Logger;
pub use log_stream::{Endl, LogStream};
pub use noop_log_sink::NoopLogSink;
pub use printf::{PrintfArg, PrintfError, sprintf};
pub use static_level::{STATIC_MAX_LEVEL, static_level_enabled};
#[cfg(feature = "tracing")]
pub use tracing_log_sink::TracingLogSink;
