//! Structured logger setup.
//!
//! Console output for humans, daily-rolling NDJSON files for machines,
//! level control via `RUST_LOG` with a configured default.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging<P: AsRef<Path>>(log_dir: P, default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // Rolling file appender: NDJSON under `<log_dir>/notin.log.YYYY-MM-DD`.
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "notin.log");

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
