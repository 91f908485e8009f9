//! Filesystem Utilities.
//!
//! Helpers for the handful of filesystem operations a token build needs: making sure
//! the output directory exists, reading token files, listing token directories and
//! writing generated artifacts. Every function maps `std::io::Error` into
//! [`CoreError::Filesystem`] so the failing path travels with the error.

use crate::error::CoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// Ensures that a directory exists at the given path.
///
/// Missing parents are created as well. If the path exists but is not a directory,
/// an error is returned.
///
/// # Examples
///
/// ```no_run
/// # use tokenforge_core::utils::fs::ensure_dir_exists;
/// # use tempfile::tempdir;
/// let temp_dir = tempdir().unwrap();
/// let dist = temp_dir.path().join("dist");
/// ensure_dir_exists(&dist).unwrap();
/// assert!(dist.is_dir());
/// ```
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if !path.is_dir() {
            Err(CoreError::Filesystem {
                message: "Path exists but is not a directory".to_string(),
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "Path exists but is not a directory",
                ),
            })
        } else {
            Ok(())
        }
    } else {
        fs::create_dir_all(path).map_err(|e| CoreError::Filesystem {
            message: "Failed to create directory".to_string(),
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Reads the entire contents of a file into a string.
pub fn read_to_string(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|e| CoreError::Filesystem {
        message: "Failed to read file to string".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes a string to a file, creating it if needed and truncating it otherwise.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<(), CoreError> {
    fs::write(path, content).map_err(|e| CoreError::Filesystem {
        message: "Failed to write string to file".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}

/// Lists the entries of a directory, sorted by file name.
///
/// Sorting keeps builds reproducible: `read_dir` order is platform dependent and
/// later files override earlier ones when token directories are merged.
pub fn list_dir_sorted(path: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let map_err = |e| CoreError::Filesystem {
        message: "Failed to list directory".to_string(),
        path: path.to_path_buf(),
        source: e,
    };
    let mut entries = fs::read_dir(path)
        .map_err(map_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_err)?;
    entries.sort();
    Ok(entries)
}
