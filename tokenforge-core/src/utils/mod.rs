//! General Utilities for Tokenforge Core.
//!
//! # Submodules
//!
//! - [`fs`]: Filesystem utilities for ensuring directory existence, reading from and
//!   writing to files, and listing token directories.
//! - [`string_utils`]: Case conversion and number formatting.
//!
//! The filesystem helpers are re-exported here; string helpers are accessed through
//! their submodule, e.g. `tokenforge_core::utils::string_utils::to_camel_case`.

pub mod fs;
pub mod string_utils;

pub use fs::{ensure_dir_exists, list_dir_sorted, read_to_string, write_string_to_file};
