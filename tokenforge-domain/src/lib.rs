//! Domain layer of Tokenforge, a design-token build tool.
//!
//! Everything about tokens lives in [`tokens`]: loading token files, resolving
//! `@references`, re-encoding colours and sizes for a platform, expanding UI states,
//! building per-theme JSON or CSS artifacts, and refreshing local core colours from a
//! vendor export.

// Re-export core module
pub use tokenforge_core as core;

pub mod tokens;

pub use tokens::{BuildTarget, ThemeBuilder, Token, TokenError};

use std::path::{Path, PathBuf};
use tracing::info;

use tokenforge_core::config::ConfigLoader;
use tokenforge_core::error::CoreError;
use tokenforge_core::logging::init_logging;

/// Loads the core configuration at `config_path` (defaults when absent) and installs
/// the logging subscriber it describes.
pub fn initialize(config_path: &Path) -> Result<(), CoreError> {
    let config = ConfigLoader::load_from_path(config_path)?;
    init_logging(&config.logging, true)?;
    info!("Tokenforge initialized with log level {}", config.logging.level);
    Ok(())
}

/// Builds every theme named by the target file at `target_path` from the token root
/// `root` into `out_dir`.
pub fn build_target(target_path: &Path, root: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, TokenError> {
    let target = BuildTarget::load(target_path)?;
    if target.themes.is_empty() {
        return Err(TokenError::Configuration(format!(
            "target {} names no themes to build",
            target_path.display()
        )));
    }
    ThemeBuilder::new(target, root)?.build_all(out_dir)
}
