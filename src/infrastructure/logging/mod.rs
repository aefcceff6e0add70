// Logging module - Logging infrastructure
use crate::domain::error::{SchemyError, SchemyResult};
use std::io;
use tracing::Level;

/// Parse a log level name. Only `debug`, `info`, `warn` and `error` are
/// recognized, in any case.
pub fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize logging to stderr. Unknown levels fall back to `info`.
pub fn init_logging(log_level: &str) -> SchemyResult<()> {
    let parsed = parse_log_level(log_level);
    let level = parsed.unwrap_or(Level::INFO);
    let report_caller = level == Level::DEBUG;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(report_caller)
        .with_line_number(report_caller)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SchemyError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    if parsed.is_none() {
        tracing::warn!(passed = %log_level, "Invalid log level passed, using info");
    }
    tracing::debug!("Set log level to debug and enabled caller reporting");
    Ok(())
}
