use std::{fmt, str::FromStr};

/// Defines the severity levels for log messages.
///
/// Levels are ordered most severe first: `Fatal < Error < ... < Trace`. A
/// statement at level `L` passes a threshold `T` when `L <= T`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    /// Designates failures the application cannot recover from.
    Fatal = 0,
    /// Designates error events that might still allow the application to continue running.
    Error = 1,
    /// Designates potentially harmful situations.
    Warn = 2,
    /// Designates informational messages that highlight the progress of the
    /// application at coarse-grained level.
    Info = 3,
    /// Designates fine-grained informational events that are most useful to debug an application.
    Debug = 4,
    /// Designates very fine-grained informational events.
    Trace = 5,
}

impl LogLevel {
    /// All levels, most severe first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Fatal => "Fatal",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    pub const fn from_u8(raw: u8) -> Option<LogLevel> {
        match raw {
            0 => Some(LogLevel::Fatal),
            1 => Some(LogLevel::Error),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Info),
            4 => Some(LogLevel::Debug),
            5 => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Renders a raw level value, falling back to `"Unknown"` when out of range.
    pub const fn name_of(raw: u8) -> &'static str {
        match LogLevel::from_u8(raw) {
            Some(level) => level.as_str(),
            None => "Unknown",
        }
    }

    /// `const` form of `self <= max`, usable in static level checks.
    pub const fn at_most(self, max: LogLevel) -> bool {
        self as u8 <= max as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("warning") {
            return Ok(LogLevel::Warn);
        }
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, u8> {
        LogLevel::from_u8(raw).ok_or(raw)
    }
}

/// Run-time threshold: either nothing passes, or levels up to a maximum do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LevelFilter {
    Off,
    UpTo(LogLevel),
}

impl LevelFilter {
    pub fn allows(self, level: LogLevel) -> bool {
        match self {
            LevelFilter::Off => false,
            LevelFilter::UpTo(max) => level <= max,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        LevelFilter::UpTo(level)
    }
}

impl FromStr for LevelFilter {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("off") {
            Ok(LevelFilter::Off)
        } else {
            s.parse().map(LevelFilter::UpTo)
        }
    }
}
