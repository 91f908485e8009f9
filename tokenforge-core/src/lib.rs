//! # Tokenforge Core Library (`tokenforge-core`)
//!
//! `tokenforge-core` is the infrastructure layer of Tokenforge, a design-token build
//! tool. It holds everything the token engine in `tokenforge-domain` needs but which is
//! not about tokens themselves:
//!
//! - **Error Handling**: A unified error system through the `CoreError` enum and its
//!   associated specific error types `ConfigError` and `LoggingError`.
//! - **Core Data Types**: The parsed colour value (`Color`) used when token colours are
//!   re-encoded for a target platform.
//! - **Configuration Management**: TOML-based loading with default fallbacks and
//!   validation through `ConfigLoader` and `CoreConfig`.
//! - **Logging**: A `tracing` based setup for console (text or JSON) and rolling file output.
//! - **Utility Functions**: Filesystem helpers (`utils::fs`) and string helpers
//!   (`utils::string_utils`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tokenforge_core::config::ConfigLoader;
//! use tokenforge_core::logging::init_logging;
//! use tokenforge_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let core_config = ConfigLoader::load_from_path(std::path::Path::new("tokenforge.toml"))?;
//!     init_logging(&core_config.logging, false)?;
//!     tracing::info!("Tokenforge core initialized.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, CoreConfig, LoggingConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{Color, ColorParseError};
