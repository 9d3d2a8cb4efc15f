//! Logging setup for the simulator.
//!
//! Logs go to stderr so they never interleave with command output, or to the
//! file named by `WAYMARK_LOG_PATH`. `RUST_LOG` overrides the default filter;
//! `DEBUG_LOGGING=1` turns on debug output for the waymark crates.

use std::ffi::OsStr;
use std::fs::File;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const LOG_PATH_ENV: &str = "WAYMARK_LOG_PATH";

/// Install the global subscriber.
///
/// With file output, returns a `WorkerGuard` that must be held for the
/// program lifetime so buffered lines are flushed on exit.
pub fn init() -> Option<WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let path = std::env::var_os(LOG_PATH_ENV);
    let Some((path, (non_blocking, guard))) =
        path.and_then(|path| open_log_file(&path).map(|writer| (path, writer)))
    else {
        init_stderr_only(debug_logging);
        return None;
    };

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(log_file = ?path, debug_logging, "waymark logging initialized");
    Some(guard)
}

/// Truncate `path` and put a background writer thread in front of it
fn open_log_file(path: &OsStr) -> Option<(NonBlocking, WorkerGuard)> {
    match File::create(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            // Subscriber not installed yet
            eprintln!("Failed to create log file {path:?}: {e}, using stderr");
            None
        }
    }
}

fn init_stderr_only(debug_logging: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter(debug_logging))
        .init();

    tracing::debug!(debug_logging, "waymark logging initialized (stderr)");
}

fn filter(debug_logging: bool) -> EnvFilter {
    let filter_directive = if debug_logging {
        "info,waymark=debug,waymark_core=debug"
    } else {
        "info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive))
}
