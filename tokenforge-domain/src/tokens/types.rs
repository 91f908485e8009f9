//! Vocabulary shared by every token pipeline stage.
//!
//! Token trees are plain `serde_json` maps. `serde_json` is built with `preserve_order`,
//! so a [`TokenTree`] keeps the insertion order of its keys, which is what lets a build
//! emit tokens in authoring order and lets [`super::sort`] impose a deterministic order
//! only where it is wanted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::errors::TokenError;

/// A nested token tree, or a flat `path -> value` map produced by flattening one.
pub type TokenTree = Map<String, Value>;

/// Prefix marking a leaf value as a reference to another token.
pub const REFERENCE_SIGIL: char = '@';
/// Prefix marking a key as a UI-state modifier.
pub const STATE_SIGIL: char = '#';
/// Separates a reference or colour from its alpha multiplier.
pub const ALPHA_SEPARATOR: char = '*';
/// Joins path segments in flattened keys and references.
pub const PATH_SEPARATOR: char = '-';
pub(crate) const PATH_JOINER: &str = "-";

/// Schema dialect a token's data is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    /// The local canonical shape.
    Standard,
    /// Vendor export with `{rgba: {r, g, b, a}}` leaves under composite keys.
    Automated,
    /// Vendor export whose leaves carry a `value` field.
    Design,
}

impl TokenFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenFormat::Standard => "standard",
            TokenFormat::Automated => "automated",
            TokenFormat::Design => "design",
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenFormat {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(TokenFormat::Standard),
            "automated" => Ok(TokenFormat::Automated),
            "design" => Ok(TokenFormat::Design),
            other => Err(TokenError::Configuration(format!("\"{}\" is not a valid format", other))),
        }
    }
}

/// Top-level category a token document is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Color,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Color => "color",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenCategory {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "color" => Ok(TokenCategory::Color),
            other => Err(TokenError::Configuration(format!("\"{}\" is not a valid category", other))),
        }
    }
}

/// The fixed UI-state vocabulary. `Normal` is implied for keys without a state suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiState {
    Normal,
    Hovered,
    Pressed,
    Disabled,
    Focused,
    Active,
    Checked,
}

impl UiState {
    pub const ALL: [UiState; 7] = [
        UiState::Normal,
        UiState::Hovered,
        UiState::Pressed,
        UiState::Disabled,
        UiState::Focused,
        UiState::Active,
        UiState::Checked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UiState::Normal => "normal",
            UiState::Hovered => "hovered",
            UiState::Pressed => "pressed",
            UiState::Disabled => "disabled",
            UiState::Focused => "focused",
            UiState::Active => "active",
            UiState::Checked => "checked",
        }
    }

    pub fn parse(name: &str) -> Option<UiState> {
        UiState::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `@name[*alpha]` reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: String,
    pub alpha: f64,
}

impl Reference {
    /// Parses a reference literal. Returns `Ok(None)` for strings without the sigil.
    pub fn parse(raw: &str) -> Result<Option<Reference>, TokenError> {
        let Some(body) = raw.strip_prefix(REFERENCE_SIGIL) else {
            return Ok(None);
        };
        let (name, alpha) = split_alpha(body)?;
        Ok(Some(Reference { name: name.to_string(), alpha }))
    }

    pub fn parts(&self) -> Vec<&str> {
        self.name.split(PATH_SEPARATOR).collect()
    }
}

/// Splits `value*factor` into the value and its multiplier, `1.0` when absent.
pub fn split_alpha(value: &str) -> Result<(&str, f64), TokenError> {
    match value.split_once(ALPHA_SEPARATOR) {
        None => Ok((value, 1.0)),
        Some((base, factor)) => {
            let alpha = factor.trim().parse::<f64>().map_err(|e| TokenError::MalformedValue {
                value: value.to_string(),
                reason: format!("invalid alpha multiplier '{}': {}", factor, e),
            })?;
            if !alpha.is_finite() {
                return Err(TokenError::MalformedValue {
                    value: value.to_string(),
                    reason: format!("alpha multiplier '{}' is not a finite number", factor),
                });
            }
            Ok((base, alpha))
        }
    }
}

/// Converts a float into a JSON number, integral values without a fraction.
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Renders a JSON number the way token files spell it (`1`, `0.5`).
pub fn number_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().map(tokenforge_core::utils::string_utils::format_number),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Short description of a JSON value kind, for diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
