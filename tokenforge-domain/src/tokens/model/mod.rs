//! Token documents and their per-kind merge and normalization rules.
//!
//! A [`Token`] wraps one document of token data together with its category and the
//! format it is written in. What merging and normalizing mean depends on the shape of
//! the data, which is fixed per [`TokenKind`]:
//!
//! - [`ColorToken`]: `color -> grade -> value`
//! - [`GradientToken`]: `gradation -> gradation name -> theme -> tier -> [colors]`
//! - [`SolidToken`]: `level -> theme -> scheme -> value`
//!
//! Each kind implements [`Normalizable`] (translate vendor formats into the standard
//! shape) and [`Mergeable`] (fold another standard document into this one, the
//! incoming document winning on conflicts).

pub mod color;
pub mod gradient;
pub mod solid;
pub mod token;

pub use color::ColorToken;
pub use gradient::GradientToken;
pub use solid::SolidToken;
pub use token::Token;

use serde_json::Value;

use super::errors::TokenError;
use super::types::{kind_of, number_text, TokenFormat, TokenTree};

/// Translation of a kind's data from any [`TokenFormat`] into the standard shape.
pub trait Normalizable {
    fn normalize_data(format: TokenFormat, data: &TokenTree) -> Result<TokenTree, TokenError>;
}

/// Merging of two standard documents of the same kind.
pub trait Mergeable {
    fn merge_data(destination: &TokenTree, source: &TokenTree) -> Result<TokenTree, TokenError>;
}

/// The closed set of token document shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Color,
    Gradient,
    Solid,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Color => "color",
            TokenKind::Gradient => "gradient",
            TokenKind::Solid => "solid",
        }
    }

    pub(crate) fn normalize_data(&self, format: TokenFormat, data: &TokenTree) -> Result<TokenTree, TokenError> {
        match self {
            TokenKind::Color => ColorToken::normalize_data(format, data),
            TokenKind::Gradient => GradientToken::normalize_data(format, data),
            TokenKind::Solid => SolidToken::normalize_data(format, data),
        }
    }

    pub(crate) fn merge_data(&self, destination: &TokenTree, source: &TokenTree) -> Result<TokenTree, TokenError> {
        match self {
            TokenKind::Color => ColorToken::merge_data(destination, source),
            TokenKind::Gradient => GradientToken::merge_data(destination, source),
            TokenKind::Solid => SolidToken::merge_data(destination, source),
        }
    }
}

pub(crate) fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a TokenTree, TokenError> {
    value.as_object().ok_or_else(|| TokenError::UnsupportedShape {
        path: path.to_string(),
        message: format!("expected an object, found {}", kind_of(value)),
    })
}

/// Renders a vendor `{r, g, b, a}` object as `rgba(r, g, b, a)`.
pub(crate) fn rgba_text(rgba: &Value, path: &str) -> Result<String, TokenError> {
    let components = expect_object(rgba, path)?;
    let channel = |name: &str| {
        components.get(name).and_then(number_text).ok_or_else(|| TokenError::UnsupportedShape {
            path: path.to_string(),
            message: format!("missing numeric '{}' channel", name),
        })
    };
    Ok(format!(
        "rgba({}, {}, {}, {})",
        channel("r")?,
        channel("g")?,
        channel("b")?,
        channel("a")?
    ))
}

/// Reads the `value` field of a design-format leaf.
pub(crate) fn design_value(leaf: &Value, path: &str) -> Result<Value, TokenError> {
    expect_object(leaf, path)?
        .get("value")
        .cloned()
        .ok_or_else(|| TokenError::UnsupportedShape {
            path: path.to_string(),
            message: "design token without a 'value' field".to_string(),
        })
}

pub(crate) fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
