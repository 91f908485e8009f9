//! Configuration Loading for Tokenforge Core.
//!
//! [`ConfigLoader`] reads a TOML file (or string), applies the serde defaults and
//! validates the result. A missing file is not an error: the defaults are used.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["text", "json"];

/// `ConfigLoader` provides static methods to load and validate `CoreConfig`.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the configuration at `path`, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ReadError`] if the file exists but cannot be read.
    /// - [`ConfigError::ParseError`] if the content is not valid TOML for [`CoreConfig`].
    /// - [`ConfigError::ValidationError`] if a value is outside its allowed set.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::load_from_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No configuration at {:?}, using defaults", path);
                let config = CoreConfig::default();
                Self::validate_config(config)
            }
            Err(e) => Err(CoreError::Config(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })),
        }
    }

    /// Parses and validates a configuration from TOML text.
    pub fn load_from_str(content: &str) -> Result<CoreConfig, CoreError> {
        let config: CoreConfig = if content.trim().is_empty() {
            CoreConfig::default()
        } else {
            toml::from_str(content).map_err(ConfigError::ParseError)?
        };
        Self::validate_config(config)
    }

    /// Normalizes level and format to lowercase and rejects unknown values.
    fn validate_config(mut config: CoreConfig) -> Result<CoreConfig, CoreError> {
        config.logging.level = config.logging.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                config.logging.level
            ))
            .into());
        }
        config.logging.format = config.logging.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log format: {}",
                config.logging.format
            ))
            .into());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn test_load_normalizes_case() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"DEBUG\"\nformat = \"JSON\"").unwrap();
        let config = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let result = ConfigLoader::load_from_str("[logging]\nlevel = \"loud\"");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::ValidationError(msg))) if msg.contains("loud")
        ));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = ConfigLoader::load_from_str("[logging");
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ParseError(_)))));
    }
}
