//! Solid colour collections: `level -> theme -> scheme -> value`.

use serde_json::Value;

use super::{child_path, design_value, expect_object, rgba_text, Mergeable, Normalizable};
use crate::tokens::errors::TokenError;
use crate::tokens::tree::deep_merge;
use crate::tokens::types::{TokenFormat, TokenTree, PATH_SEPARATOR};

/// The only level kept from automated vendor exports.
const SOLID_LEVEL: &str = "solid";

/// Merge and normalization rules for solid colour collections.
pub struct SolidToken;

fn entry_object<'a>(tree: &'a mut TokenTree, key: &str, path: &str) -> Result<&'a mut TokenTree, TokenError> {
    tree.entry(key.to_string())
        .or_insert_with(|| Value::Object(TokenTree::new()))
        .as_object_mut()
        .ok_or_else(|| TokenError::PathCollision {
            path: child_path(path, key),
            existing: "leaf",
        })
}

impl SolidToken {
    /// Recursive merge; the source wins on every leaf.
    pub fn merge_tokens(destination: &TokenTree, source: &TokenTree) -> TokenTree {
        let mut merged = destination.clone();
        deep_merge(&mut merged, source);
        merged
    }

    /// Normalizes every vendor group of `colors`.
    ///
    /// Automated exports are split into groups that each normalize to
    /// `{solid: {..}}`; their `solid` levels are combined, later groups winning per theme.
    pub fn normalize_colors(format: TokenFormat, colors: &TokenTree) -> Result<TokenTree, TokenError> {
        match format {
            TokenFormat::Standard => Ok(colors.clone()),
            TokenFormat::Automated => {
                let mut solid = TokenTree::new();
                for (group, tokens) in colors {
                    let tokens = expect_object(tokens, group)?;
                    let normalized = Self::normalize_tokens(format, tokens, group)?;
                    if let Some(Value::Object(themes)) = normalized.get(SOLID_LEVEL) {
                        for (theme, schemes) in themes {
                            solid.insert(theme.clone(), schemes.clone());
                        }
                    }
                }
                let mut normalized = TokenTree::new();
                normalized.insert(SOLID_LEVEL.to_string(), Value::Object(solid));
                Ok(normalized)
            }
            TokenFormat::Design => colors
                .iter()
                .map(|(level, tokens)| {
                    let tokens = expect_object(tokens, level)?;
                    Ok::<_, TokenError>((level.clone(), Value::Object(Self::normalize_tokens(format, tokens, level)?)))
                })
                .collect(),
        }
    }

    /// Automated keys are `<level>-<theme>-<scheme>-<value>` with `{rgba: {..}}` leaves;
    /// design tokens are `theme -> scheme -> {value}`.
    pub fn normalize_tokens(format: TokenFormat, tokens: &TokenTree, path: &str) -> Result<TokenTree, TokenError> {
        match format {
            TokenFormat::Standard => Ok(tokens.clone()),
            TokenFormat::Automated => {
                let mut normalized = TokenTree::new();
                for (key, leaf) in tokens {
                    let key_path = child_path(path, key);
                    let parts: Vec<&str> = key.split(PATH_SEPARATOR).collect();
                    let [level, theme, scheme, value, ..] = parts.as_slice() else {
                        return Err(TokenError::UnsupportedShape {
                            path: key_path,
                            message: "expected a '<level>-<theme>-<scheme>-<value>' key".to_string(),
                        });
                    };
                    let rgba = expect_object(leaf, &key_path)?.get("rgba").ok_or_else(|| {
                        TokenError::UnsupportedShape {
                            path: key_path.clone(),
                            message: "automated solid without an 'rgba' field".to_string(),
                        }
                    })?;
                    let text = rgba_text(rgba, &key_path)?;
                    let themes = entry_object(&mut normalized, level, path)?;
                    let schemes = entry_object(themes, theme, path)?;
                    entry_object(schemes, scheme, path)?.insert(value.to_string(), Value::String(text));
                }
                Ok(normalized)
            }
            TokenFormat::Design => tokens
                .iter()
                .map(|(theme, schemes)| {
                    let theme_path = child_path(path, theme);
                    let scheme = expect_object(schemes, &theme_path)?
                        .iter()
                        .map(|(name, leaf)| {
                            Ok::<_, TokenError>((name.clone(), design_value(leaf, &child_path(&theme_path, name))?))
                        })
                        .collect::<Result<TokenTree, TokenError>>()?;
                    Ok::<_, TokenError>((theme.clone(), Value::Object(scheme)))
                })
                .collect(),
        }
    }
}

impl Normalizable for SolidToken {
    fn normalize_data(format: TokenFormat, data: &TokenTree) -> Result<TokenTree, TokenError> {
        Self::normalize_colors(format, data)
    }
}

impl Mergeable for SolidToken {
    fn merge_data(destination: &TokenTree, source: &TokenTree) -> Result<TokenTree, TokenError> {
        Ok(Self::merge_tokens(destination, source))
    }
}
