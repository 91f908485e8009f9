//! Logging for Tokenforge.
//!
//! Built on the `tracing` ecosystem: a console layer (text or JSON) and an optional
//! daily-rolling file layer, both filtered at the level from [`LoggingConfig`].

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the file writer alive so buffered lines are flushed on exit.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Filters on `RUST_LOG`, defaulting to `info`. Errors (e.g. a global subscriber
/// already being set, as happens across tests) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

fn parse_level(level: &str) -> Result<Level, CoreError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        invalid => Err(LoggingError::FilterError(format!("Invalid log level: {}", invalid)).into()),
    }
}

fn create_file_layer(log_path: &Path, format: &str) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    utils::fs::ensure_dir_exists(directory)?;

    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("tokenforge.log"));
    let file_appender = tracing_appender::rolling::daily(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer = match format {
        "json" => fmt::layer().json().with_writer(writer).with_ansi(false).boxed(),
        _ => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
    };
    Ok((layer, guard))
}

/// Initializes the global logging system from a [`LoggingConfig`].
///
/// # Arguments
///
/// * `config`: The logging configuration (level, format, optional file).
/// * `is_reload`: When `true`, an already-installed subscriber is not an error.
///
/// # Errors
///
/// Returns [`LoggingError`] wrapped in [`CoreError`] if the level is invalid or the
/// global subscriber cannot be set on an initial setup.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let level = parse_level(&config.level)?;
    let format = config.format.to_lowercase();

    let stdout_layer: BoxedLayer = match format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_ansi(false)
            .with_filter(EnvFilter::new(level.to_string()))
            .boxed(),
        _ => fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_filter(EnvFilter::new(level.to_string()))
            .boxed(),
    };

    let mut layers: Vec<BoxedLayer> = vec![stdout_layer];
    let mut new_guard = None;
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &format)?;
        layers.push(file_layer.with_filter(EnvFilter::new(level.to_string())).boxed());
        new_guard = Some(guard);
    }

    let result = Registry::default().with(layers).try_init();

    if let Ok(mut slot) = LOG_WORKER_GUARD.lock() {
        *slot = new_guard;
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) if is_reload => {
            tracing::info!("Logging already initialized, keeping existing subscriber: {}", e);
            Ok(())
        }
        Err(e) => Err(LoggingError::InitializationFailure(format!(
            "Failed to set global tracing subscriber: {}",
            e
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_accepts_known_levels() {
        assert_eq!(parse_level("TRACE").unwrap(), Level::TRACE);
        assert_eq!(parse_level("warn").unwrap(), Level::WARN);
    }

    #[test]
    fn test_parse_level_rejects_unknown() {
        assert!(matches!(
            parse_level("verbose"),
            Err(CoreError::Logging(LoggingError::FilterError(_)))
        ));
    }

    #[test]
    fn test_init_minimal_logging_is_idempotent() {
        init_minimal_logging();
        init_minimal_logging();
    }
}
