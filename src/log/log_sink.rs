use crate::log::log_record::{LogRecord, Metadata};

/// The backend contract every sink implements.
///
/// All three methods may be called concurrently from any thread. A sink that
/// needs ordered output serializes internally. Sinks must not panic; the
/// facade contains panics at its boundary, but a panicking sink loses the
/// event.
pub trait Logger: Send + Sync {
    /// Cheap, side-effect free predicate evaluated before any formatting work.
    /// Returning `false` skips the event entirely.
    fn enable(&self, metadata: &Metadata<'_>) -> bool;

    /// Records an enabled event. The record is only valid for the duration of
    /// the call.
    fn log(&self, record: &LogRecord<'_>);

    /// Externalizes whatever the sink buffers. Best effort.
    fn flush(&self);
}
