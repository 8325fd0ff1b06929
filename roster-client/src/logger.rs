//! Logging setup

use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::ClientConfig;

/// Initialize the logger at `info` (or `RUST_LOG`)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger from a client config
pub fn init_from_config(config: &ClientConfig) {
    init_logger_with_file(
        Some(&config.log_level),
        config.log_dir.as_deref().map(Path::new),
    );
}

/// Initialize the logger with optional daily-rolling file output.
///
/// `RUST_LOG` takes precedence over `log_level`. Calling this more than once
/// is harmless; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&Path>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir.filter(|d| d.exists()) {
        let file_appender = tracing_appender::rolling::daily(dir, "roster-client");
        let _ = subscriber.with_writer(file_appender).with_ansi(false).try_init();
        return;
    }

    let _ = subscriber.try_init();
}
