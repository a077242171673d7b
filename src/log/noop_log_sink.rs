use crate::log::{
    log_record::{LogRecord, Metadata},
    log_sink::Logger,
};

/// The backend installed until something else is: rejects every event, so no
/// formatting or allocation ever happens on its behalf.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogSink;

impl Logger for NoopLogSink {
    #[inline]
    fn enable(&self, _metadata: &Metadata<'_>) -> bool {
        false
    }

    #[inline]
    fn log(&self, _record: &LogRecord<'_>) {}

    #[inline]
    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::log_level::LogLevel;

    #[test]
    fn noop_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoopLogSink>();
    }

    #[test]
    fn noop_sink_rejects_every_level() {
        let sink: Box<dyn Logger> = Box::new(NoopLogSink);
        for level in LogLevel::ALL {
            assert!(!sink.enable(&Metadata::new(level, "any")));
        }
        let record = LogRecord::new(Metadata::new(LogLevel::Fatal, "any"), "dropped", "f.rs", 1);
        sink.log(&record);
        sink.flush();
    }
}
