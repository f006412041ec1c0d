use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::LOG_FILE_NAME;

/// Default filter directive when `RUST_LOG` is unset
pub fn default_directive(level: &str) -> String {
    format!("long_id_normalizer={},warn", level)
}

/// Initializes logging: console on stderr, plus a daily JSON file when a log
/// directory is configured. Keep the returned guard alive so the file writer
/// flushes on exit.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    let mut guard = None;
    let file_layer = config.log_dir.as_ref().and_then(|dir| {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("failed to create log directory {}: {}", dir.display(), e);
            return None;
        }
        let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
        let (non_blocking_writer, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);
        Some(fmt::layer().json().with_writer(non_blocking_writer))
    });

    // stdout carries normalized JSON, so the console layer writes to stderr
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
    {
        eprintln!("failed to install log subscriber: {}", e);
    }

    guard
}
