//! Gradient collections.
//!
//! Standard data sits under a single `gradation` key:
//! `{"gradation": {<gradation>: {<theme>: {<tier>: [<color>, ..]}}}}`.

use serde_json::Value;

use super::{child_path, design_value, expect_object, rgba_text, Mergeable, Normalizable};
use crate::tokens::errors::TokenError;
use crate::tokens::types::{TokenFormat, TokenTree, PATH_SEPARATOR};

const GRADATION_KEY: &str = "gradation";

/// Merge and normalization rules for gradient collections.
pub struct GradientToken;

fn gradation_of(data: &TokenTree) -> Result<&TokenTree, TokenError> {
    let value = data.get(GRADATION_KEY).ok_or_else(|| TokenError::UnsupportedShape {
        path: GRADATION_KEY.to_string(),
        message: "gradient data without a 'gradation' group".to_string(),
    })?;
    expect_object(value, GRADATION_KEY)
}

/// Merges `source` into the entry `key` of `destination` with `merge`, creating it when absent.
fn merge_nested(
    destination: &TokenTree,
    source: &TokenTree,
    path: &str,
    merge: fn(&TokenTree, &TokenTree, &str) -> Result<TokenTree, TokenError>,
) -> Result<TokenTree, TokenError> {
    let mut merged = destination.clone();
    for (key, value) in source {
        let key_path = child_path(path, key);
        let incoming = expect_object(value, &key_path)?;
        let existing = match destination.get(key) {
            Some(existing) => expect_object(existing, &key_path)?.clone(),
            None => TokenTree::new(),
        };
        merged.insert(key.clone(), Value::Object(merge(&existing, incoming, &key_path)?));
    }
    Ok(merged)
}

impl GradientToken {
    pub fn merge_gradations(destination: &TokenTree, source: &TokenTree) -> Result<TokenTree, TokenError> {
        merge_nested(destination, source, GRADATION_KEY, |d, s, p| merge_nested(d, s, p, Self::merge_tiers))
    }

    /// Merges one theme's tiers, each tier's colour list by position.
    pub fn merge_tiers(destination: &TokenTree, source: &TokenTree, path: &str) -> Result<TokenTree, TokenError> {
        let mut merged = destination.clone();
        for (tier, colors) in source {
            let tier_path = child_path(path, tier);
            let incoming = colors.as_array().ok_or_else(|| TokenError::UnsupportedShape {
                path: tier_path.clone(),
                message: "expected a list of colours".to_string(),
            })?;
            let existing = destination
                .get(tier)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            merged.insert(tier.clone(), Value::Array(Self::merge_colors(&existing, incoming)));
        }
        Ok(merged)
    }

    /// Positional overwrite: element `i` of `source` replaces element `i` of
    /// `destination`; trailing destination elements beyond `source` are kept.
    pub fn merge_colors(destination: &[Value], source: &[Value]) -> Vec<Value> {
        let mut merged = destination.to_vec();
        for (index, color) in source.iter().enumerate() {
            match merged.get_mut(index) {
                Some(slot) => *slot = color.clone(),
                None => merged.push(color.clone()),
            }
        }
        merged
    }

    pub fn normalize_gradations(format: TokenFormat, gradations: &TokenTree) -> Result<TokenTree, TokenError> {
        match format {
            TokenFormat::Standard => Ok(gradations.clone()),
            TokenFormat::Automated | TokenFormat::Design => gradations
                .iter()
                .map(|(name, themes)| {
                    let path = child_path(GRADATION_KEY, name);
                    let themes = expect_object(themes, &path)?;
                    Ok::<_, TokenError>((name.clone(), Value::Object(Self::normalize_themes(format, themes, &path)?)))
                })
                .collect(),
        }
    }

    /// Automated themes are keyed `<type>-<gradation>-<theme>-<tier>` with a two-stop
    /// `colors` object; design themes map `theme -> tier -> {value}`.
    pub fn normalize_themes(format: TokenFormat, themes: &TokenTree, path: &str) -> Result<TokenTree, TokenError> {
        match format {
            TokenFormat::Standard => Ok(themes.clone()),
            TokenFormat::Automated => {
                let mut normalized = TokenTree::new();
                for (key, value) in themes {
                    let key_path = child_path(path, key);
                    let parts: Vec<&str> = key.split(PATH_SEPARATOR).collect();
                    let (theme, tier) = match parts.as_slice() {
                        [_kind, _gradation, theme, tier, ..] => (*theme, *tier),
                        _ => {
                            return Err(TokenError::UnsupportedShape {
                                path: key_path,
                                message: "expected a '<type>-<gradation>-<theme>-<tier>' key".to_string(),
                            })
                        }
                    };
                    let colors = expect_object(value, &key_path)?
                        .get("colors")
                        .ok_or_else(|| TokenError::UnsupportedShape {
                            path: key_path.clone(),
                            message: "automated gradient without 'colors'".to_string(),
                        })?;
                    let stops = ["0", "1"]
                        .iter()
                        .map(|stop| {
                            let stop_path = child_path(&key_path, stop);
                            let rgba = colors
                                .get(*stop)
                                .and_then(|c| c.get("rgba"))
                                .ok_or_else(|| TokenError::UnsupportedShape {
                                    path: stop_path.clone(),
                                    message: "gradient stop without 'rgba'".to_string(),
                                })?;
                            Ok::<_, TokenError>(Value::String(rgba_text(rgba, &stop_path)?))
                        })
                        .collect::<Result<Vec<Value>, TokenError>>()?;

                    let tiers = normalized
                        .entry(theme.to_string())
                        .or_insert_with(|| Value::Object(TokenTree::new()));
                    if let Value::Object(tiers) = tiers {
                        let list = tiers
                            .entry(tier.to_string())
                            .or_insert_with(|| Value::Array(Vec::new()));
                        if let Value::Array(list) = list {
                            list.extend(stops);
                        }
                    }
                }
                Ok(normalized)
            }
            TokenFormat::Design => themes
                .iter()
                .map(|(theme, tiers)| {
                    let theme_path = child_path(path, theme);
                    let scheme = expect_object(tiers, &theme_path)?
                        .iter()
                        .map(|(tier, leaf)| {
                            let value = design_value(leaf, &child_path(&theme_path, tier))?;
                            Ok::<_, TokenError>((tier.clone(), Value::Array(vec![value])))
                        })
                        .collect::<Result<TokenTree, TokenError>>()?;
                    Ok::<_, TokenError>((theme.clone(), Value::Object(scheme)))
                })
                .collect(),
        }
    }
}

impl Normalizable for GradientToken {
    fn normalize_data(format: TokenFormat, data: &TokenTree) -> Result<TokenTree, TokenError> {
        let gradations = Self::normalize_gradations(format, gradation_of(data)?)?;
        let mut normalized = TokenTree::new();
        normalized.insert(GRADATION_KEY.to_string(), Value::Object(gradations));
        Ok(normalized)
    }
}

impl Mergeable for GradientToken {
    fn merge_data(destination: &TokenTree, source: &TokenTree) -> Result<TokenTree, TokenError> {
        let existing = match destination.get(GRADATION_KEY) {
            Some(_) => gradation_of(destination)?.clone(),
            None => TokenTree::new(),
        };
        let gradations = Self::merge_gradations(&existing, gradation_of(source)?)?;
        let mut merged = TokenTree::new();
        merged.insert(GRADATION_KEY.to_string(), Value::Object(gradations));
        Ok(merged)
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

    #[test]
    fn test_merge_colors_positional() {
        let destination = vec![json!("a"), json!("b"), json!("c")];
        assert_eq!(
            GradientToken::merge_colors(&destination, &[json!("x")]),
            vec![json!("x"), json!("b"), json!("c")]
        );
        assert_eq!(
            GradientToken::merge_colors(&[json!("a")], &[json!("x"), json!("y")]),
            vec![json!("x"), json!("y")]
        );
    }

    #[test]
    fn test_merge_tiers() {
        let destination = tree(json!({"tier1": ["#000", "#111"], "tier3": ["#333"]}));
        let source = tree(json!({"tier1": ["#999"], "tier2": ["#aaa"]}));
        let merged = GradientToken::merge_tiers(&destination, &source, "gradation-primary-dark").unwrap();
        assert_eq!(
            Value::Object(merged),
            json!({"tier1": ["#999", "#111"], "tier3": ["#333"], "tier2": ["#aaa"]})
        );

        let bad = tree(json!({"tier1": "#999"}));
        match GradientToken::merge_tiers(&destination, &bad, "gradation-primary-dark") {
            Err(TokenError::UnsupportedShape { path, .. }) => assert!(path.ends_with("tier1")),
            other => panic!("Expected UnsupportedShape, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_data_nested_levels() {
        let destination = tree(json!({"gradation": {
            "primary": {"dark": {"tier1": ["#000", "#111", "#222"]}, "light": {"tier1": ["#fff"]}}
        }}));
        let source = tree(json!({"gradation": {
            "primary": {"dark": {"tier1": ["#999"], "tier2": ["#aaa", "#bbb"]}},
            "secondary": {"dark": {"tier1": ["#ccc"]}}
        }}));
        let merged = GradientToken::merge_data(&destination, &source).unwrap();
        assert_eq!(
            Value::Object(merged),
            json!({"gradation": {
                "primary": {
                    "dark": {"tier1": ["#999", "#111", "#222"], "tier2": ["#aaa", "#bbb"]},
                    "light": {"tier1": ["#fff"]}
                },
                "secondary": {"dark": {"tier1": ["#ccc"]}}
            }})
        );
    }

    #[test]
    fn test_normalize_automated_themes() {
        let data = tree(json!({"gradation": {"primary": {
            "gradient-primary-dark-tier1": {"colors": {
                "0": {"rgba": {"r": 0, "g": 0, "b": 0, "a": 1}},
                "1": {"rgba": {"r": 255, "g": 255, "b": 255, "a": 0.5}}
            }}
        }}}));
        let normalized = GradientToken::normalize_data(TokenFormat::Automated, &data).unwrap();
        assert_eq!(
            Value::Object(normalized),
            json!({"gradation": {"primary": {"dark": {"tier1": [
                "rgba(0, 0, 0, 1)",
                "rgba(255, 255, 255, 0.5)"
            ]}}}})
        );
    }

    #[test]
    fn test_normalize_design_themes() {
        let data = tree(json!({"gradation": {"primary": {"dark": {"tier1": {"value": "linear-gradient(#000, #fff)"}}}}}));
        let normalized = GradientToken::normalize_data(TokenFormat::Design, &data).unwrap();
        assert_eq!(
            Value::Object(normalized),
            json!({"gradation": {"primary": {"dark": {"tier1": ["linear-gradient(#000, #fff)"]}}}})
        );
    }

    #[test]
    fn test_normalize_rejects_short_automated_keys() {
        let data = tree(json!({"gradation": {"primary": {"gradient-dark": {"colors": {}}}}}));
        assert!(matches!(
            GradientToken::normalize_data(TokenFormat::Automated, &data),
            Err(TokenError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_missing_gradation_group() {
        let result = GradientToken::normalize_data(TokenFormat::Standard, &tree(json!({"primary": {}})));
        assert!(matches!(result, Err(TokenError::UnsupportedShape { .. })));
    }
}
