//! Leveled logging macros over the global registry, plus `log_to!` for an
//! explicit [`LogRegistry`](crate::LogRegistry).
//!
//! # Feature Flags
//! The most verbose level compiled in is chosen with cargo features:
//! `log-trace`, `log-debug`, `log-info`, `log-warn`, `log-error`, `log-fatal`.
//!
//! If a level's feature is disabled, the corresponding macro expands to `()`,
//! removing all formatting and allocation overhead at compile time. The
//! generic `log!` / `log_to!` and the stream checks the same gate through
//! [`static_level_enabled`](crate::static_level_enabled).
//!
//! # Forms
//! ```text
//! log_info!("connected to {peer} in {}ms", elapsed);
//! log_info!(target: "net", "connected");
//! log_info!(printf "float is : %.2f", 3.14359);
//! log!(LogLevel::Warn, "retrying");
//! log_to!(&registry, target: "db", LogLevel::Error, "pool exhausted");
//! let _ = log_stream!(LogLevel::Info) << "test" << 1 + 1 << Endl;
//! ```
//!
//! Without `target:`, the target is the path of the enclosing function.

// ============================================================================
// 1. INTERNAL MACROS
// ============================================================================

/// Path of the function the macro is expanded in.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __relaylog_here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::log::log_record::enclosing_function(__type_name_of(__relaylog_here))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __location {
    () => {
        $crate::Location::new(file!(), line!(), Some(module_path!()))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_dispatch {
    ($registry:expr, $lvl:expr, $target:expr, printf $fmt:expr $(, $arg:expr)* $(,)?) => {{
        let __lvl: $crate::LogLevel = $lvl;
        if $crate::static_level_enabled(__lvl) {
            ($registry).dispatch_printf(
                $crate::Metadata::new(__lvl, $target),
                $crate::__location!(),
                $fmt,
                &[$($crate::PrintfArg::from($arg)),*],
            );
        }
    }};
    ($registry:expr, $lvl:expr, $target:expr, $($arg:tt)+) => {{
        let __lvl: $crate::LogLevel = $lvl;
        if $crate::static_level_enabled(__lvl) {
            ($registry).dispatch(
                $crate::Metadata::new(__lvl, $target),
                $crate::__location!(),
                format_args!($($arg)+),
            );
        }
    }};
}

// ============================================================================
// 2. GENERIC MACROS
// ============================================================================

/// Logs at a level chosen at run time through the global registry.
#[macro_export]
macro_rules! log {
    (target: $target:expr, $lvl:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($crate::global(), $lvl, $target, $($arg)+)
    };
    ($lvl:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!(
            $crate::global(),
            $lvl,
            $crate::__function_name!(),
            $($arg)+
        )
    };
}

/// Logs through an explicit registry instead of the global one.
#[macro_export]
macro_rules! log_to {
    ($registry:expr, target: $target:expr, $lvl:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($registry, $lvl, $target, $($arg)+)
    };
    ($registry:expr, $lvl:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($registry, $lvl, $crate::__function_name!(), $($arg)+)
    };
}

/// Starts a stream statement on the global registry.
///
/// The stream is a temporary: finish the statement with `<< Endl` in the same
/// expression, or it is discarded by the next statement on this thread.
#[macro_export]
macro_rules! log_stream {
    (target: $target:expr, $lvl:expr) => {
        $crate::global()
            .stream(None)
            .log_in($lvl, $crate::__location!(), $target)
    };
    ($lvl:expr) => {
        $crate::global()
            .stream(None)
            .log_in($lvl, $crate::__location!(), $crate::__function_name!())
    };
}

// ============================================================================
// 3. LEVEL-SPECIFIC MACROS (Feature Gated)
// ============================================================================

// ---------------------- TRACE ----------------------
#[cfg(feature = "log-trace")]
#[macro_export]
macro_rules! log_trace {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($crate::global(), $crate::LogLevel::Trace, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_dispatch!(
            $crate::global(),
            $crate::LogLevel::Trace,
            $crate::__function_name!(),
            $($arg)+
        )
    };
}

#[cfg(not(feature = "log-trace"))]
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- DEBUG ----------------------
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! log_debug {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($crate::global(), $crate::LogLevel::Debug, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_dispatch!(
            $crate::global(),
            $crate::LogLevel::Debug,
            $crate::__function_name!(),
            $($arg)+
        )
    };
}

#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- INFO ----------------------
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! log_info {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($crate::global(), $crate::LogLevel::Info, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_dispatch!(
            $crate::global(),
            $crate::LogLevel::Info,
            $crate::__function_name!(),
            $($arg)+
        )
    };
}

#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- WARN ----------------------
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! log_warn {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($crate::global(), $crate::LogLevel::Warn, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_dispatch!(
            $crate::global(),
            $crate::LogLevel::Warn,
            $crate::__function_name!(),
            $($arg)+
        )
    };
}

#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- ERROR ----------------------
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! log_error {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($crate::global(), $crate::LogLevel::Error, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_dispatch!(
            $crate::global(),
            $crate::LogLevel::Error,
            $crate::__function_name!(),
            $($arg)+
        )
    };
}

#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- FATAL ----------------------
// Only logs. Terminating the process is left to the caller.
#[cfg(feature = "log-fatal")]
#[macro_export]
macro_rules! log_fatal {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!($crate::global(), $crate::LogLevel::Fatal, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_dispatch!(
            $crate::global(),
            $crate::LogLevel::Fatal,
            $crate::__function_name!(),
            $($arg)+
        )
    };
}

#[cfg(not(feature = "log-fatal"))]
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {
        ()
    };
}
