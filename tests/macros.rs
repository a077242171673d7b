#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, const_mutex};
use relaylog::{
    CaptureLogSink, Endl, LogLevel, Logger, log, log_debug, log_error, log_fatal, log_info,
    log_stream, log_trace, log_warn, static_level_enabled,
};

// Every test here drives the process-wide registry.
static SERIAL: Mutex<()> = const_mutex(());

struct Installed {
    sink: Arc<CaptureLogSink>,
    _serial: MutexGuard<'static, ()>,
}

impl Drop for Installed {
    fn drop(&mut self) {
        relaylog::reset_logger();
    }
}

fn install(sink: CaptureLogSink) -> Installed {
    let serial = SERIAL.lock();
    let sink = Arc::new(sink);
    assert!(relaylog::set_logger(Some(sink.clone() as Arc<dyn Logger>)));
    Installed {
        sink,
        _serial: serial,
    }
}

/// Levels surviving the current feature selection, in logging order.
fn compiled_in() -> Vec<LogLevel> {
    LogLevel::ALL
        .into_iter()
        .rev()
        .filter(|level| static_level_enabled(*level))
        .collect()
}

#[cfg(feature = "log-info")]
#[test]
fn formatted_statement_reaches_backend() {
    let env = install(CaptureLogSink::new());
    let line = line!() + 1;
    log_info!(target: "main", "float is : {:.2}", 3.14359);

    let records = env.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "float is : 3.14");
    assert_eq!(records[0].level, LogLevel::Info);
    assert_eq!(records[0].target, "main");
    assert_eq!(records[0].line, line);
    assert!(records[0].file.ends_with("macros.rs"));
    assert_eq!(records[0].module_path.as_deref(), Some("macros"));
}

#[cfg(feature = "log-warn")]
#[test]
fn printf_statement_reaches_backend() {
    let env = install(CaptureLogSink::new());
    log_error!(target: "main", printf "float is : %.2f", 3.14359);
    log_warn!(printf "%s=%5d|%-3c|", "id", 42, 'x');

    assert_eq!(env.sink.messages(), ["float is : 3.14", "id=   42|x  |"]);
}

#[cfg(feature = "log-debug")]
#[test]
fn named_placeholders_capture_locals() {
    let env = install(CaptureLogSink::new());
    let peer = "10.0.0.7";
    let ms = 12;
    log_debug!(target: "net", "connected to {peer} in {ms}ms");
    assert_eq!(env.sink.messages(), ["connected to 10.0.0.7 in 12ms"]);
}

#[cfg(feature = "log-warn")]
#[test]
fn default_target_is_enclosing_function() {
    let env = install(CaptureLogSink::new());
    log_warn!("plain");
    (|| log_warn!("from closure"))();

    let records = env.sink.records();
    assert_eq!(
        records[0].target,
        "macros::default_target_is_enclosing_function"
    );
    assert_eq!(
        records[1].target,
        "macros::default_target_is_enclosing_function"
    );
}

#[test]
fn backend_cutoff_selects_levels() {
    let env = install(CaptureLogSink::with_cutoff(LogLevel::Warn));
    log_trace!(target: "t", "Trace");
    log_debug!(target: "t", "Debug");
    log_info!(target: "t", "Info");
    log_warn!(target: "t", "Warn");
    log_error!(target: "t", "Error");
    log_fatal!(target: "t", "Fatal");

    let levels = compiled_in();
    let expected: Vec<String> = levels
        .iter()
        .filter(|level| **level <= LogLevel::Warn)
        .map(LogLevel::to_string)
        .collect();
    assert_eq!(env.sink.messages(), expected);
    assert_eq!(env.sink.enable_calls(), levels.len());
}

#[cfg(feature = "log-debug")]
#[test]
fn generic_macro_takes_level_at_run_time() {
    let env = install(CaptureLogSink::new());
    for level in [LogLevel::Debug, LogLevel::Error] {
        log!(target: "gen", level, "at {level}");
    }
    log!(LogLevel::Info, "n={}", 5);

    let records = env.sink.records();
    assert_eq!(records[0].message, "at Debug");
    assert_eq!(records[1].level, LogLevel::Error);
    assert_eq!(records[2].message, "n=5");
    assert_eq!(
        records[2].target,
        "macros::generic_macro_takes_level_at_run_time"
    );
}

#[cfg(feature = "log-error")]
#[test]
fn disabled_statements_are_not_formatted() {
    use std::{
        fmt,
        sync::atomic::{AtomicUsize, Ordering},
    };

    struct Counted<'a>(&'a AtomicUsize);

    impl fmt::Display for Counted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fetch_add(1, Ordering::SeqCst);
            f.write_str("counted")
        }
    }

    let env = install(CaptureLogSink::with_cutoff(LogLevel::Error));
    let count = AtomicUsize::new(0);
    log_info!("{}", Counted(&count));
    assert_eq!(count.load(Ordering::SeqCst), 0);
    log_error!("{}", Counted(&count));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(env.sink.messages(), ["counted"]);
}

#[cfg(feature = "log-info")]
#[test]
fn stream_macro_builds_one_message() {
    let env = install(CaptureLogSink::new());
    let _ = log_stream!(target: "master", LogLevel::Info) << "test" << 1 + 1 << Endl;
    let _ = log_stream!(LogLevel::Error) << "code " << 7 << Endl;

    let records = env.sink.records();
    assert_eq!(records[0].message, "test2");
    assert_eq!(records[0].target, "master");
    assert_eq!(records[1].message, "code 7");
    assert_eq!(records[1].target, "macros::stream_macro_builds_one_message");
    assert_eq!(records[1].module_path.as_deref(), Some("macros"));
}

#[test]
fn registry_functions_manage_the_global_backend() {
    let env = install(CaptureLogSink::new());
    assert!(!relaylog::set_logger(None));
    assert!(Arc::ptr_eq(
        &relaylog::logger(),
        &(env.sink.clone() as Arc<dyn Logger>)
    ));

    relaylog::flush();
    assert_eq!(env.sink.flush_calls(), 1);

    relaylog::reset_logger();
    log_fatal!("unheard");
    let _ = log_stream!(LogLevel::Fatal) << "unheard" << Endl;
    relaylog::flush();
    assert_eq!(env.sink.log_calls(), 0);
    assert_eq!(env.sink.flush_calls(), 1);
}

#[test]
fn compiled_out_levels_never_reach_the_backend() {
    let env = install(CaptureLogSink::new());
    for level in LogLevel::ALL {
        log!(target: "gate", level, "formatted {level}");
        let _ = log_stream!(target: "gate", level) << "streamed " << level << Endl;
    }

    let levels = compiled_in();
    assert_eq!(env.sink.enable_calls(), 2 * levels.len());
    assert_eq!(env.sink.log_calls(), 2 * levels.len());
    assert!(env.sink.records().iter().all(|r| levels.contains(&r.level)));
}

#[cfg(not(feature = "log-trace"))]
#[test]
fn trace_is_compiled_out() {
    let env = install(CaptureLogSink::new());
    log_trace!("gone {}", 1);
    let _ = log_stream!(LogLevel::Trace) << "gone" << Endl;
    assert_eq!(env.sink.enable_calls(), 0);
    assert!(env.sink.records().is_empty());
}
