//! File Logging
//!
//! The TUI owns the terminal, so nothing may write to stdout/stderr
//! while it runs. All diagnostics go to JSON log files under the data
//! directory, rotated daily. `log::` macros used throughout the crate
//! are bridged into `tracing` via `LogTracer`.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize file-only logging for the TUI.
///
/// Returns the appender guard; dropping it flushes buffered log lines,
/// so the caller must hold it for the life of the process.
pub fn init_tui(data_dir: &Path) -> WorkerGuard {
    let log_dir = data_dir.join("logs");

    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {e}");
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "grantgen.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer — the TUI owns the terminal
    tracing_subscriber::registry().with(file_layer).init();

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {e}");
    }

    guard
}
