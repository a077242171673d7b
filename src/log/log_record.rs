use crate::log::log_level::LogLevel;

/// Target used when a statement carries no target of its own.
pub const UNKNOWN_TARGET: &str = "unknown";

/// The `(level, target)` pair a backend inspects before any formatting happens.
///
/// `target` is borrowed from the call site (usually a string literal or the
/// enclosing function's path); the facade never copies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metadata<'a> {
    pub level: LogLevel,
    pub target: &'a str,
}

impl<'a> Metadata<'a> {
    pub const fn new(level: LogLevel, target: &'a str) -> Self {
        Self { level, target }
    }
}

/// Source position of a log statement, as captured by the call-site macros.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: u32,
    pub module_path: Option<&'a str>,
}

impl<'a> Location<'a> {
    pub const fn new(file: &'a str, line: u32, module_path: Option<&'a str>) -> Self {
        Self {
            file,
            line,
            module_path,
        }
    }

    /// Location used before a stream statement has established one.
    pub const fn unknown() -> Self {
        Self::new(UNKNOWN_TARGET, 0, None)
    }
}

/// Represents a single log event handed to a backend.
///
/// The message is fully formatted and owned by the record. Everything else is
/// borrowed from the call site, so a backend must copy whatever it wants to
/// keep beyond [`Logger::log`](crate::Logger::log).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'a> {
    /// Severity and target of the event.
    pub metadata: Metadata<'a>,
    /// The materialized message text.
    pub message: String,
    /// Source file of the statement.
    pub file: &'a str,
    /// Source line of the statement.
    pub line: u32,
    /// Module of the statement, when the call site knows it.
    pub module_path: Option<&'a str>,
}

impl<'a> LogRecord<'a> {
    /// Creates a new `LogRecord`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use relaylog::{LogLevel, LogRecord, Metadata};
    ///
    /// let record = LogRecord::new(
    ///     Metadata::new(LogLevel::Info, "net"),
    ///     "Connection established",
    ///     file!(),
    ///     line!(),
    /// );
    /// assert_eq!(record.level(), LogLevel::Info);
    /// assert_eq!(record.module_path, None);
    /// ```
    pub fn new(
        metadata: Metadata<'a>,
        message: impl Into<String>,
        file: &'a str,
        line: u32,
    ) -> Self {
        Self {
            metadata,
            message: message.into(),
            file,
            line,
            module_path: None,
        }
    }

    pub(crate) fn at(metadata: Metadata<'a>, message: String, location: Location<'a>) -> Self {
        Self {
            metadata,
            message,
            file: location.file,
            line: location.line,
            module_path: location.module_path,
        }
    }

    #[must_use]
    pub fn with_module_path(mut self, module_path: &'a str) -> Self {
        self.module_path = Some(module_path);
        self
    }

    pub fn level(&self) -> LogLevel {
        self.metadata.level
    }

    pub fn target(&self) -> &'a str {
        self.metadata.target
    }
}

/// Strips the helper item and any closure frames from a `type_name` path,
/// leaving the path of the enclosing function.
#[doc(hidden)]
pub fn enclosing_function(type_path: &'static str) -> &'static str {
    let mut name = type_path
        .strip_suffix("::__relaylog_here")
        .unwrap_or(type_path);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_borrows_context_and_owns_message() {
        let target = String::from("db::pool");
        let record = LogRecord::new(Metadata::new(LogLevel::Warn, &target), "slow", "pool.rs", 7)
            .with_module_path("db::pool");
        assert_eq!(record.level(), LogLevel::Warn);
        assert_eq!(record.target(), "db::pool");
        assert_eq!(record.message, "slow");
        assert_eq!((record.file, record.line), ("pool.rs", 7));
        assert_eq!(record.module_path, Some("db::pool"));
    }

    #[test]
    fn at_copies_location_fields() {
        let loc = Location::new("a.rs", 3, Some("a"));
        let record = LogRecord::at(Metadata::new(LogLevel::Info, "t"), "m".into(), loc);
        assert_eq!(record.file, "a.rs");
        assert_eq!(record.line, 3);
        assert_eq!(record.module_path, Some("a"));
        assert_eq!(Location::unknown().file, UNKNOWN_TARGET);
    }

    #[test]
    fn enclosing_function_trims_helper_and_closures() {
        assert_eq!(
            enclosing_function("app::net::connect::__relaylog_here"),
            "app::net::connect"
        );
        assert_eq!(
            enclosing_function("app::run::{{closure}}::{{closure}}::__relaylog_here"),
            "app::run"
        );
        assert_eq!(enclosing_function("plain"), "plain");
    }
}
