//! Process-wide logging setup.
//!
//! The pipeline crates emit diagnostics through the `tracing` macros and
//! never configure the subscriber themselves; a host binary (or a test that
//! wants log output) calls [`init_logging`] once at startup. Library code
//! keeps working when no subscriber was installed.

use std::io;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Keeps the non-blocking file writer alive. Dropping the guard flushes and
/// stops the background writer thread.
pub struct LoggingGuard {
    _file_guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Initialize the global `tracing` subscriber.
///
/// Installs a human-readable stderr layer filtered by `filter` (an
/// `EnvFilter` directive such as `"info"` or `"scoreprep_ml=debug"`) and a
/// JSON file layer writing daily-rolled files under `log_dir`.
///
/// Calling this twice is harmless: the second call leaves the existing
/// subscriber in place and still returns a guard for its own appender.
pub fn init_logging(log_dir: &Path, filter: &str) -> io::Result<LoggingGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "scoreprep.log");
    let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    // try_init errors if a subscriber is already set; that is not fatal here.
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
