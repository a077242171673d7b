// -----------------------------------------------------------------------------
// COMPILE-TIME CONFIGURATION
// -----------------------------------------------------------------------------
//
// The `log-*` cargo features select the most verbose level compiled into the
// program. Each feature implies the next more severe one, so enabling
// `log-info` also enables warn, error and fatal.

use crate::log::log_level::LogLevel;

/// Most verbose level compiled in, or `None` when every level is compiled out.
#[cfg(feature = "log-trace")]
pub const STATIC_MAX_LEVEL: Option<LogLevel> = Some(LogLevel::Trace);

#[cfg(all(feature = "log-debug", not(feature = "log-trace")))]
pub const STATIC_MAX_LEVEL: Option<LogLevel> = Some(LogLevel::Debug);

#[cfg(all(feature = "log-info", not(feature = "log-debug")))]
pub const STATIC_MAX_LEVEL: Option<LogLevel> = Some(LogLevel::Info);

#[cfg(all(feature = "log-warn", not(feature = "log-info")))]
pub const STATIC_MAX_LEVEL: Option<LogLevel> = Some(LogLevel::Warn);

#[cfg(all(feature = "log-error", not(feature = "log-warn")))]
pub const STATIC_MAX_LEVEL: Option<LogLevel> = Some(LogLevel::Error);

#[cfg(all(feature = "log-fatal", not(feature = "log-error")))]
pub const STATIC_MAX_LEVEL: Option<LogLevel> = Some(LogLevel::Fatal);

#[cfg(not(feature = "log-fatal"))]
pub const STATIC_MAX_LEVEL: Option<LogLevel> = None;

/// Whether statements at `level` survive compilation. Constant-folds at every
/// call site, so a disabled branch is removed together with its arguments.
#[inline(always)]
pub const fn static_level_enabled(level: LogLevel) -> bool {
    match STATIC_MAX_LEVEL {
        Some(max) => level.at_most(max),
        None => false,
    }
}
