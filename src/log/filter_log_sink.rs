use std::{
    cmp::Reverse,
    sync::atomic::{AtomicU8, Ordering},
};

use crate::{
    config::Config,
    config_error::Result,
    log::{
        log_level::{LevelFilter, LogLevel},
        log_record::{LogRecord, Metadata},
        log_sink::Logger,
    },
};

const OFF: u8 = u8::MAX;

/// Wraps a backend with per-target run-time levels.
///
/// A target rule matches the target itself and everything below it on a `::`
/// boundary (`app::net` covers `app::net::tcp` but not `app::network`); the
/// longest matching rule wins, and targets without a rule use the default
/// level. Passing events still go through the inner backend's own `enable`.
///
/// ```rust
/// use relaylog::{CaptureLogSink, FilterLogSink, LogLevel, Logger, Metadata};
///
/// let sink = FilterLogSink::new(CaptureLogSink::new(), LogLevel::Warn)
///     .with_target("app::net", LogLevel::Trace);
///
/// assert!(sink.enable(&Metadata::new(LogLevel::Trace, "app::net::tcp")));
/// assert!(!sink.enable(&Metadata::new(LogLevel::Info, "app::db")));
/// ```
#[derive(Debug)]
pub struct FilterLogSink<L> {
    inner: L,
    default_level: AtomicU8,
    targets: Vec<(String, LevelFilter)>,
}

impl<L: Logger> FilterLogSink<L> {
    pub fn new(inner: L, default_level: impl Into<LevelFilter>) -> Self {
        Self {
            inner,
            default_level: AtomicU8::new(encode(default_level.into())),
            targets: Vec::new(),
        }
    }

    /// Builds the filter from `[Logging] level` and `[Targets]`. Without a
    /// configured default, everything passes.
    pub fn from_config(inner: L, config: &Config) -> Result<Self> {
        let default_level = config
            .default_level()?
            .unwrap_or(LevelFilter::UpTo(LogLevel::Trace));
        let mut sink = Self::new(inner, default_level);
        for (target, level) in config.target_levels()? {
            sink = sink.with_target(target, level);
        }
        Ok(sink)
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>, level: impl Into<LevelFilter>) -> Self {
        let target = target.into();
        let level = level.into();
        match self.targets.iter_mut().find(|(t, _)| *t == target) {
            Some(rule) => rule.1 = level,
            None => self.targets.push((target, level)),
        }
        // Longest prefix first so the first match is the most specific one.
        self.targets.sort_by_key(|(t, _)| Reverse(t.len()));
        self
    }

    /// Changes the default level without reinstalling the backend.
    pub fn set_default_level(&self, level: impl Into<LevelFilter>) {
        let raw = encode(level.into());
        self.default_level.store(raw, Ordering::Release);
    }

    pub fn default_level(&self) -> LevelFilter {
        decode(self.default_level.load(Ordering::Acquire))
    }

    /// Effective threshold for `target`.
    pub fn level_for(&self, target: &str) -> LevelFilter {
        self.targets
            .iter()
            .find(|(prefix, _)| covers(prefix, target))
            .map_or_else(|| self.default_level(), |(_, level)| *level)
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Logger> Logger for FilterLogSink<L> {
    fn enable(&self, metadata: &Metadata<'_>) -> bool {
        self.level_for(metadata.target).allows(metadata.level) && self.inner.enable(metadata)
    }

    fn log(&self, record: &LogRecord<'_>) {
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

fn covers(prefix: &str, target: &str) -> bool {
    match target.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

fn encode(filter: LevelFilter) -> u8 {
    match filter {
        LevelFilter::Off => OFF,
        LevelFilter::UpTo(level) => level as u8,
    }
}

fn decode(raw: u8) -> LevelFilter {
    LogLevel::from_u8(raw).map_or(LevelFilter::Off, LevelFilter::UpTo)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::capture_log_sink::CaptureLogSink;

    fn md(level: LogLevel, target: &str) -> Metadata<'_> {
        Metadata::new(level, target)
    }

    #[test]
    fn most_specific_prefix_wins() {
        let sink = FilterLogSink::new(CaptureLogSink::new(), LogLevel::Info)
            .with_target("app", LogLevel::Warn)
            .with_target("app::net", LogLevel::Trace)
            .with_target("app::net::noisy", LevelFilter::Off);

        assert_eq!(
            sink.level_for("app::net::tcp"),
            LevelFilter::UpTo(LogLevel::Trace)
        );
        assert_eq!(
            sink.level_for("app::network"),
            LevelFilter::UpTo(LogLevel::Warn)
        );
        assert_eq!(sink.level_for("app"), LevelFilter::UpTo(LogLevel::Warn));
        assert_eq!(sink.level_for("app::net::noisy::x"), LevelFilter::Off);
        assert_eq!(sink.level_for("other"), LevelFilter::UpTo(LogLevel::Info));
    }

    #[test]
    fn enable_combines_filter_and_inner() {
        let inner = CaptureLogSink::with_cutoff(LogLevel::Debug);
        let sink = FilterLogSink::new(inner, LogLevel::Trace);
        assert!(sink.enable(&md(LogLevel::Debug, "x")));
        // Filter allows trace, inner backend does not.
        assert!(!sink.enable(&md(LogLevel::Trace, "x")));
    }

    #[test]
    fn default_level_is_adjustable_at_runtime() {
        let sink = FilterLogSink::new(CaptureLogSink::new(), LogLevel::Error);
        assert!(!sink.enable(&md(LogLevel::Info, "x")));
        sink.set_default_level(LogLevel::Info);
        assert!(sink.enable(&md(LogLevel::Info, "x")));
        sink.set_default_level(LevelFilter::Off);
        assert!(!sink.enable(&md(LogLevel::Fatal, "x")));
        assert_eq!(sink.default_level(), LevelFilter::Off);
    }

    #[test]
    fn rule_order_does_not_depend_on_insertion_order() {
        let sink = FilterLogSink::new(CaptureLogSink::new(), LogLevel::Info)
            .with_target("app::net::tcp", LogLevel::Trace)
            .with_target("app", LevelFilter::Off)
            .with_target("app::net", LogLevel::Error);

        assert_eq!(
            sink.level_for("app::net::tcp::conn"),
            LevelFilter::UpTo(LogLevel::Trace)
        );
        assert_eq!(
            sink.level_for("app::net::udp"),
            LevelFilter::UpTo(LogLevel::Error)
        );
        assert_eq!(sink.level_for("app::ui"), LevelFilter::Off);
    }

    #[test]
    fn replacing_a_rule_keeps_one_entry() {
        let sink = FilterLogSink::new(CaptureLogSink::new(), LogLevel::Info)
            .with_target("db", LogLevel::Trace)
            .with_target("db", LogLevel::Error);
        assert_eq!(sink.level_for("db"), LevelFilter::UpTo(LogLevel::Error));
    }

    #[test]
    fn log_and_flush_forward() {
        let sink = FilterLogSink::new(CaptureLogSink::new(), LogLevel::Info);
        let record = LogRecord::new(md(LogLevel::Info, "x"), "hi", "f.rs", 1);
        sink.log(&record);
        sink.flush();
        assert_eq!(sink.inner().messages(), ["hi"]);
        assert_eq!(sink.inner().flush_calls(), 1);
    }

    #[test]
    fn builds_from_config() {
        let text = "[Logging]\nlevel = warn\n[Targets]\napp::db = debug\napp::ui = off\n";
        let config = Config::parse(text).unwrap();
        let sink = FilterLogSink::from_config(CaptureLogSink::new(), &config).unwrap();
        assert_eq!(sink.default_level(), LevelFilter::UpTo(LogLevel::Warn));
        assert!(sink.enable(&md(LogLevel::Debug, "app::db::pool")));
        assert!(!sink.enable(&md(LogLevel::Error, "app::ui")));
        assert!(!sink.enable(&md(LogLevel::Info, "app::core")));
    }

    #[test]
    fn config_without_level_lets_everything_through() {
        let config = Config::parse("").unwrap();
        let sink = FilterLogSink::from_config(CaptureLogSink::new(), &config).unwrap();
        assert!(sink.enable(&md(LogLevel::Trace, "anything")));
    }
}
