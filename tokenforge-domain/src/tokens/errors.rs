use std::path::PathBuf;
use thiserror::Error;
use tokenforge_core::error::CoreError;

use super::types::TokenFormat;

#[derive(Error, Debug)]
pub enum TokenError {
    /// Unsupported format, category, colour format, size unit or platform tag.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unable to find reference '{reference}'. Tried: {attempted:?}")]
    UnresolvedReference {
        reference: String,
        attempted: Vec<String>,
    },

    #[error("Cyclic token reference detected at '{reference}'. Path: {path:?}")]
    CyclicReference {
        reference: String,
        path: Vec<String>,
    },

    #[error("Malformed token value '{value}': {reason}")]
    MalformedValue { value: String, reason: String },

    #[error("Unable to apply alpha {alpha} to value {value}")]
    InvalidAlphaTarget { value: String, alpha: String },

    #[error("Cannot merge tokens: {field} must be '{expected}' but found '{found}'")]
    MergePrecondition {
        field: &'static str,
        expected: String,
        found: String,
    },

    #[error("Cannot {operation} a token in '{format}' format; normalize it first")]
    Unnormalized {
        operation: &'static str,
        format: TokenFormat,
    },

    #[error("Unknown ui state '{state}' when resolving '{key}'")]
    UnknownUiState { key: String, state: String },

    #[error("Picked up ui state '{state}' at '{path}' while already carrying '{carried}'")]
    NestedUiState {
        path: String,
        state: String,
        carried: String,
    },

    #[error("Invalid ui state group '{key}' at '{path}'")]
    InvalidStateGroup { path: String, key: String },

    #[error("Token path '{path}' collides with an existing {existing}")]
    PathCollision { path: String, existing: &'static str },

    #[error("Unexpected token data shape at '{path}': {message}")]
    UnsupportedShape { path: String, message: String },

    #[error("Failed to parse token file {path:?}: {source}")]
    TokenFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize tokens: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token I/O failed: {0}")]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unresolved_reference_display() {
        let err = TokenError::UnresolvedReference {
            reference: "@button-primary".to_string(),
            attempted: vec!["core".to_string(), "tokens".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unable to find reference '@button-primary'. Tried: [\"core\", \"tokens\"]"
        );
    }

    #[test]
    fn test_merge_precondition_display() {
        let err = TokenError::MergePrecondition {
            field: "format",
            expected: "standard".to_string(),
            found: "automated".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot merge tokens: format must be 'standard' but found 'automated'"
        );
    }

    #[test]
    fn test_core_error_is_source() {
        let core = CoreError::Filesystem {
            message: "Failed to read file to string".to_string(),
            path: PathBuf::from("core/colors.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let err: TokenError = core.into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Token I/O failed"));
    }
}
