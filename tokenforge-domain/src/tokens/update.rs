//! Refreshing local core colour files from a vendor export.
//!
//! The vendor export is in the `automated` format. Each of its colour collections is
//! normalized and merged over the matching local `standard` file, vendor values
//! winning, and the result is written back in its sorted serial form.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

use tokenforge_core::utils::fs;

use super::errors::TokenError;
use super::model::{Token, TokenKind};
use super::types::{kind_of, TokenCategory, TokenFormat, TokenTree};

/// Vendor collection name and the local file it updates, relative to the token root.
pub const CORE_COLOR_FILES: [(&str, &str); 2] = [
    ("core color", "core/color/functional.json"),
    ("decorative color", "core/color/decorative.json"),
];

/// Merges normalized vendor colour data over local standard colour data and returns the
/// merged token's serial.
pub fn update_color_tokens(vendor: &TokenTree, local: &TokenTree, name: &str) -> Result<String, TokenError> {
    let mut next = Token::new(TokenKind::Color, TokenFormat::Automated, vendor.clone()).with_name(name);
    next.normalize()?;
    let mut merged = Token::new(TokenKind::Color, TokenFormat::Standard, local.clone()).with_name(name);
    merged.merge(&next)?;
    merged.serial()
}

/// Writes a serial to `path`, followed by a newline.
pub fn write_token(path: &Path, serial: &str) -> Result<(), TokenError> {
    fs::write_string_to_file(path, &format!("{}\n", serial))?;
    info!("Written token {}", path.display());
    Ok(())
}

/// Updates every file of [`CORE_COLOR_FILES`] below `root` from the vendor export at
/// `vendor_path`. Returns the written paths.
pub fn update_core_colors(root: &Path, vendor_path: &Path) -> Result<Vec<PathBuf>, TokenError> {
    let vendor = read_object(vendor_path)?;
    let mut written = Vec::with_capacity(CORE_COLOR_FILES.len());
    for (collection, file) in CORE_COLOR_FILES {
        let vendor_colors = object_field(&vendor, collection, vendor_path)?;
        let local_path = root.join(file);
        let local = read_object(&local_path)?;
        let local_colors = object_field(&local, TokenCategory::Color.as_str(), &local_path)?;

        let name = local_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let serial = update_color_tokens(vendor_colors, local_colors, &name)?;
        write_token(&local_path, &serial)?;
        written.push(local_path);
    }
    Ok(written)
}

fn read_object(path: &Path) -> Result<TokenTree, TokenError> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|source| TokenError::TokenFileParse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(TokenError::UnsupportedShape {
            path: path.display().to_string(),
            message: format!("expected an object, found {}", kind_of(&other)),
        }),
    }
}

fn object_field<'a>(tree: &'a TokenTree, field: &str, origin: &Path) -> Result<&'a TokenTree, TokenError> {
    tree.get(field)
        .and_then(Value::as_object)
        .ok_or_else(|| TokenError::UnsupportedShape {
            path: format!("{}:{}", origin.display(), field),
            message: format!("missing '{}' collection", field),
        })
}
