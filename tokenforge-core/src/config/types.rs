//! Configuration Data Structures for Tokenforge Core.
//!
//! These structs are populated by deserializing a TOML configuration file. Missing
//! fields fall back to the functions in [`super::defaults`], and unknown fields are
//! rejected via `#[serde(deny_unknown_fields)]`.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use tokenforge_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/tokenforge.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/tokenforge.log")));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The minimum log level to record.
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path to a file where logs should be written.
    /// If `None`, file logging is disabled.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// The format for log messages. Valid values (case-insensitive): "text", "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_core_logging_config()
    }
}

/// Root configuration structure for Tokenforge.
///
/// ```
/// use tokenforge_core::config::CoreConfig;
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
/// "#;
/// let loaded_config: CoreConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(loaded_config.logging.level, "warn");
/// assert_eq!(loaded_config.logging.format, "text");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default = "defaults::default_core_logging_config")]
    pub logging: LoggingConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            logging: defaults::default_core_logging_config(),
        }
    }
}
