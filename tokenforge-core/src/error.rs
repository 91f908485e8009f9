//! Error handling for the Tokenforge core layer.
//!
//! This module provides the error types shared by every Tokenforge crate. They are
//! defined with `thiserror` so that callers can propagate them with `?` and still
//! get a readable diagnostic when a build is aborted.
//!
//! The main error type for this crate is [`CoreError`], which encapsulates
//! more specific errors like [`ConfigError`] and [`LoggingError`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use tokenforge_core::error::CoreError;
//!
//! fn load_something() -> Result<(), CoreError> {
//!     let content = tokenforge_core::utils::fs::read_to_string(std::path::Path::new("tokens.json"))?;
//!     tracing::info!("read {} bytes", content.len());
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Tokenforge.
///
/// This enum represents all errors that can occur in the core layer. Higher layers
/// wrap it (see `TokenError::Core` in `tokenforge-domain`) rather than redefining
/// filesystem or configuration failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while initialising the logging system.
    #[error("Logging Error: {0}")]
    Logging(#[from] LoggingError),

    /// Filesystem operations such as reading a token file or creating the output directory.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for configuration-related operations.
///
/// Covers the TOML core configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An error occurred while attempting to read a configuration file.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Parsing succeeded but a value is not acceptable.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Error type for logging-related operations.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Failed to initialize the logging system.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),

    /// Failed to set or parse a log filter.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),
}
