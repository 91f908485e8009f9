//! Loading token files and directories from disk.
//!
//! Every file goes through a flatten/unflatten pass on the way in, so that a UI-state
//! group written anywhere in a file (`{"#hovered": {"button": {"bg": ..}}}`) ends up as
//! the last segment of each token path (`{"button": {"bg": {"#hovered": ..}}}`).

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use tokenforge_core::utils::fs;

use super::errors::TokenError;
use super::flatten::{flatten_with, unflatten, StateSuffix};
use super::tree::strip_keys;
use super::types::{kind_of, TokenTree};

pub use super::tree::deep_merge;

/// Authoring metadata that never becomes a token.
const METADATA_KEYS: [&str; 2] = ["comment", "figma"];

/// Loads a single JSON token file.
pub fn load_token_file(path: &Path) -> Result<TokenTree, TokenError> {
    info!("Loading file {}", path.display());
    let content = fs::read_to_string(path)?;
    let mut parsed: Value = serde_json::from_str(&content).map_err(|source| TokenError::TokenFileParse {
        path: path.to_path_buf(),
        source,
    })?;
    strip_keys(&mut parsed, &METADATA_KEYS);
    let tokens = match parsed {
        Value::Object(tokens) => tokens,
        other => {
            return Err(TokenError::UnsupportedShape {
                path: path.display().to_string(),
                message: format!("a token file must hold an object, found {}", kind_of(&other)),
            })
        }
    };
    unflatten(&flatten_with(&tokens, StateSuffix::Marked)?)
}

/// Loads every `.json` file below `path`, recursively and in file-name order, and
/// merges them into one tree. Later files win on conflicting leaves.
pub fn load_token_dir(path: &Path) -> Result<TokenTree, TokenError> {
    info!("Loading directory {}", path.display());
    let mut merged = TokenTree::new();
    for entry in fs::list_dir_sorted(path)? {
        let loaded = if entry.is_dir() {
            load_token_dir(&entry)?
        } else if entry.extension().map_or(false, |ext| ext == "json") {
            load_token_file(&entry)?
        } else {
            debug!("Skipping unknown type of file {}", entry.display());
            continue;
        };
        deep_merge(&mut merged, &loaded);
    }
    Ok(merged)
}
