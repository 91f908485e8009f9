//! Configuration Management for Tokenforge Core.
//!
//! - [`types`]: the configuration schema ([`CoreConfig`], [`LoggingConfig`]).
//! - [`defaults`]: default values used by `serde` when a field is missing.
//! - [`loader`]: [`ConfigLoader`], which reads and validates TOML configuration.
//!
//! The build target describing a token build lives with the token engine in
//! `tokenforge-domain`, since its values select domain behaviour.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig};
