use serde_json::Value;
use tracing::debug;

use super::TokenKind;
use crate::tokens::errors::TokenError;
use crate::tokens::sort::to_sorted_json;
use crate::tokens::types::{TokenCategory, TokenFormat, TokenTree};

/// One token document: a kind-specific data tree tagged with its category and format.
///
/// A token starts in whatever format it was read in. [`Token::normalize`] rewrites it
/// into [`TokenFormat::Standard`] in place; only standard tokens can be merged or
/// serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    category: TokenCategory,
    format: TokenFormat,
    data: TokenTree,
    name: Option<String>,
}

impl Token {
    /// Creates a token in the only category every kind currently files under.
    pub fn new(kind: TokenKind, format: TokenFormat, data: TokenTree) -> Self {
        Token {
            kind,
            category: TokenCategory::Color,
            format,
            data,
            name: None,
        }
    }

    /// Creates a token from textual category and format tags, as found in token files
    /// and command arguments. Unknown tags are configuration errors.
    pub fn from_tags(kind: TokenKind, category: &str, format: &str, data: TokenTree) -> Result<Self, TokenError> {
        let category: TokenCategory = category.parse()?;
        let format: TokenFormat = format.parse()?;
        Ok(Token {
            kind,
            category,
            format,
            data,
            name: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn category(&self) -> TokenCategory {
        self.category
    }

    pub fn format(&self) -> TokenFormat {
        self.format
    }

    pub fn data(&self) -> &TokenTree {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Translates the data into the standard shape. Normalizing a standard token is a no-op.
    pub fn normalize(&mut self) -> Result<&mut Self, TokenError> {
        if self.format != TokenFormat::Standard {
            debug!(
                "Normalizing {} token {:?} from '{}' format",
                self.kind.as_str(),
                self.name,
                self.format
            );
            self.data = self.kind.normalize_data(self.format, &self.data)?;
            self.format = TokenFormat::Standard;
        }
        Ok(self)
    }

    /// Merges `source` into this token; values in `source` win.
    ///
    /// Both tokens must be standard, of the same kind and of the same category. On error
    /// neither token is modified.
    pub fn merge(&mut self, source: &Token) -> Result<&mut Self, TokenError> {
        for format in [self.format, source.format] {
            if format != TokenFormat::Standard {
                return Err(TokenError::MergePrecondition {
                    field: "format",
                    expected: TokenFormat::Standard.to_string(),
                    found: format.to_string(),
                });
            }
        }
        if self.category != source.category {
            return Err(TokenError::MergePrecondition {
                field: "category",
                expected: self.category.to_string(),
                found: source.category.to_string(),
            });
        }
        if self.kind != source.kind {
            return Err(TokenError::MergePrecondition {
                field: "kind",
                expected: self.kind.as_str().to_string(),
                found: source.kind.as_str().to_string(),
            });
        }
        self.data = self.kind.merge_data(&self.data, &source.data)?;
        Ok(self)
    }

    /// The persisted form: `{<category>: data}` with sorted keys and a two-space indent.
    pub fn serial(&self) -> Result<String, TokenError> {
        if self.format != TokenFormat::Standard {
            return Err(TokenError::Unnormalized {
                operation: "serialize",
                format: self.format,
            });
        }
        let mut wrapped = TokenTree::new();
        wrapped.insert(self.category.to_string(), Value::Object(self.data.clone()));
        to_sorted_json(&Value::Object(wrapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tree(value: Value) -> TokenTree {
        value.as_object().cloned().unwrap()
    }

    fn automated_colors() -> TokenTree {
        tree(json!({"blue": {
            "color-blue-10": {"rgba": {"r": 0, "g": 0, "b": 255, "a": 1}},
            "color-blue-20": {"rgba": {"r": 0, "g": 0, "b": 200, "a": 0.5}}
        }}))
    }

    #[test]
    fn test_from_tags_validates() {
        let token = Token::from_tags(TokenKind::Color, "color", "automated", TokenTree::new()).unwrap();
        assert_eq!(token.format(), TokenFormat::Automated);
        assert_eq!(token.category(), TokenCategory::Color);

        assert!(matches!(
            Token::from_tags(TokenKind::Color, "size", "standard", TokenTree::new()),
            Err(TokenError::Configuration(_))
        ));
        assert!(matches!(
            Token::from_tags(TokenKind::Color, "color", "figma", TokenTree::new()),
            Err(TokenError::Configuration(_))
        ));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut once = Token::new(TokenKind::Color, TokenFormat::Automated, automated_colors());
        once.normalize().unwrap();
        let mut twice = once.clone();
        twice.normalize().unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.format(), TokenFormat::Standard);
        assert_eq!(
            Value::Object(once.data().clone()),
            json!({"blue": {"10": "rgba(0, 0, 255, 1)", "20": "rgba(0, 0, 200, 0.5)"}})
        );
    }

    #[test]
    fn test_merge_rejects_unnormalized_source_without_mutation() {
        let mut destination = Token::new(TokenKind::Color, TokenFormat::Standard, tree(json!({"blue": {"10": "#00f"}})));
        let source = Token::new(TokenKind::Color, TokenFormat::Automated, automated_colors());
        let destination_before = destination.clone();
        let source_before = source.clone();

        match destination.merge(&source) {
            Err(TokenError::MergePrecondition { field, found, .. }) => {
                assert_eq!(field, "format");
                assert_eq!(found, "automated");
            }
            other => panic!("Expected MergePrecondition, got {:?}", other),
        }
        assert_eq!(destination, destination_before);
        assert_eq!(source, source_before);
    }

    #[test]
    fn test_merge_rejects_kind_mismatch() {
        let mut destination = Token::new(TokenKind::Color, TokenFormat::Standard, TokenTree::new());
        let source = Token::new(TokenKind::Solid, TokenFormat::Standard, TokenTree::new());
        assert!(matches!(
            destination.merge(&source),
            Err(TokenError::MergePrecondition { field: "kind", .. })
        ));
    }

    #[test]
    fn test_merge_source_wins_on_overlap() {
        let mut destination = Token::new(
            TokenKind::Color,
            TokenFormat::Standard,
            tree(json!({"blue": {"10": "#000", "20": "#222"}})),
        );
        let source = Token::new(TokenKind::Color, TokenFormat::Standard, tree(json!({"blue": {"10": "#fff"}})));
        destination.merge(&source).unwrap();
        assert_eq!(destination.data()["blue"]["10"], json!("#fff"));
        assert_eq!(destination.data()["blue"]["20"], json!("#222"));
    }

    #[test]
    fn test_disjoint_merges_commute() {
        let base = Token::new(TokenKind::Color, TokenFormat::Standard, tree(json!({"blue": {"10": "#000"}})));
        let a = Token::new(TokenKind::Color, TokenFormat::Standard, tree(json!({"blue": {"20": "#222"}})));
        let b = Token::new(TokenKind::Color, TokenFormat::Standard, tree(json!({"red": {"10": "#f00"}})));

        let mut ab = base.clone();
        ab.merge(&a).unwrap().merge(&b).unwrap();
        let mut ba = base.clone();
        ba.merge(&b).unwrap().merge(&a).unwrap();

        assert_eq!(ab.serial().unwrap(), ba.serial().unwrap());
    }

    #[test]
    fn test_serial_sorts_and_wraps() {
        let token = Token::new(
            TokenKind::Color,
            TokenFormat::Standard,
            tree(json!({"blue": {"100": "#3", "05": "#2", "00": "#1"}})),
        )
        .with_name("core");
        assert_eq!(token.name(), Some("core"));
        assert_eq!(
            token.serial().unwrap(),
            "{\n  \"color\": {\n    \"blue\": {\n      \"00\": \"#1\",\n      \"05\": \"#2\",\n      \"100\": \"#3\"\n    }\n  }\n}"
        );
    }

    #[test]
    fn test_serial_requires_standard_format() {
        let token = Token::new(TokenKind::Color, TokenFormat::Design, TokenTree::new());
        assert!(matches!(token.serial(), Err(TokenError::Unnormalized { .. })));
    }
}
