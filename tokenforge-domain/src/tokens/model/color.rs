//! Colour collections: `color name -> grade -> value`.

use serde_json::Value;

use super::{child_path, design_value, expect_object, rgba_text, Mergeable, Normalizable};
use crate::tokens::errors::TokenError;
use crate::tokens::types::{TokenFormat, TokenTree, PATH_SEPARATOR};

/// Merge and normalization rules for colour collections.
pub struct ColorToken;

impl ColorToken {
    /// Merges every colour of `source` into `destination`, grade by grade.
    pub fn merge_colors(destination: &TokenTree, source: &TokenTree) -> Result<TokenTree, TokenError> {
        let mut merged = destination.clone();
        for (color, grades) in source {
            let source_grades = expect_object(grades, color)?;
            let existing = match destination.get(color) {
                Some(value) => expect_object(value, color)?.clone(),
                None => TokenTree::new(),
            };
            merged.insert(
                color.clone(),
                Value::Object(Self::merge_grades(&existing, source_grades)),
            );
        }
        Ok(merged)
    }

    /// Grades present in `source` replace those in `destination`; the rest are kept.
    pub fn merge_grades(destination: &TokenTree, source: &TokenTree) -> TokenTree {
        let mut merged = destination.clone();
        for (grade, value) in source {
            merged.insert(grade.clone(), value.clone());
        }
        merged
    }

    pub fn normalize_colors(format: TokenFormat, colors: &TokenTree) -> Result<TokenTree, TokenError> {
        match format {
            TokenFormat::Standard => Ok(colors.clone()),
            TokenFormat::Automated | TokenFormat::Design => colors
                .iter()
                .map(|(color, grades)| {
                    let grades = expect_object(grades, color)?;
                    Ok::<_, TokenError>((color.clone(), Value::Object(Self::normalize_grades(format, grades, color)?)))
                })
                .collect(),
        }
    }

    /// Automated grades are keyed `<prefix>-<grade>` with `{rgba: {..}}` leaves; design
    /// grades carry their value in a `value` field.
    pub fn normalize_grades(format: TokenFormat, grades: &TokenTree, path: &str) -> Result<TokenTree, TokenError> {
        match format {
            TokenFormat::Standard => Ok(grades.clone()),
            TokenFormat::Automated => grades
                .iter()
                .map(|(key, leaf)| {
                    let leaf_path = child_path(path, key);
                    let rgba = expect_object(leaf, &leaf_path)?.get("rgba").ok_or_else(|| {
                        TokenError::UnsupportedShape {
                            path: leaf_path.clone(),
                            message: "automated colour without an 'rgba' field".to_string(),
                        }
                    })?;
                    let grade = key.rsplit(PATH_SEPARATOR).next().unwrap_or(key);
                    Ok::<_, TokenError>((grade.to_string(), Value::String(rgba_text(rgba, &leaf_path)?)))
                })
                .collect(),
            TokenFormat::Design => grades
                .iter()
                .map(|(grade, leaf)| Ok::<_, TokenError>((grade.clone(), design_value(leaf, &child_path(path, grade))?)))
                .collect(),
        }
    }
}

impl Normalizable for ColorToken {
    fn normalize_data(format: TokenFormat, data: &TokenTree) -> Result<TokenTree, TokenError> {
        Self::normalize_colors(format, data)
    }
}

impl Mergeable for ColorToken {
    fn merge_data(destination: &TokenTree, source: &TokenTree) -> Result<TokenTree, TokenError> {
        Self::merge_colors(destination, source)
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
    fn test_merge_grades_source_wins() {
        let merged = ColorToken::merge_grades(
            &tree(json!({"00": "#111111", "25": "#222222"})),
            &tree(json!({"00": "#000000", "50": "#888888"})),
        );
        assert_eq!(
            Value::Object(merged),
            json!({"00": "#000000", "25": "#222222", "50": "#888888"})
        );
    }

    #[test]
    fn test_merge_colors_adds_and_overrides() {
        let destination = tree(json!({
            "color-a": {"00": "#000", "50": "#555"},
            "color-b": {"00": "#111"}
        }));
        let source = tree(json!({
            "color-a": {"50": "#aaa"},
            "color-c": {"10": "#ccc"}
        }));
        let merged = ColorToken::merge_colors(&destination, &source).unwrap();
        assert_eq!(
            Value::Object(merged),
            json!({
                "color-a": {"00": "#000", "50": "#aaa"},
                "color-b": {"00": "#111"},
                "color-c": {"10": "#ccc"}
            })
        );
    }

    #[test]
    fn test_merge_colors_rejects_non_object_grades() {
        let result = ColorToken::merge_colors(&TokenTree::new(), &tree(json!({"color-a": "#000"})));
        assert!(matches!(result, Err(TokenError::UnsupportedShape { .. })));
    }

    #[test]
    fn test_normalize_automated_grades() {
        let grades = tree(json!({"color-20": {"rgba": {"r": 0, "g": 1, "b": 2, "a": 1}}}));
        let normalized = ColorToken::normalize_grades(TokenFormat::Automated, &grades, "blue").unwrap();
        assert_eq!(Value::Object(normalized), json!({"20": "rgba(0, 1, 2, 1)"}));
    }

    #[test]
    fn test_normalize_design_grades() {
        let colors = tree(json!({"blue": {"10": {"value": "#0000ff", "type": "color"}}}));
        let normalized = ColorToken::normalize_colors(TokenFormat::Design, &colors).unwrap();
        assert_eq!(Value::Object(normalized), json!({"blue": {"10": "#0000ff"}}));
    }

    #[test]
    fn test_normalize_standard_is_identity() {
        let colors = tree(json!({"blue": {"10": "#0000ff"}}));
        assert_eq!(ColorToken::normalize_colors(TokenFormat::Standard, &colors).unwrap(), colors);
    }

    #[test]
    fn test_normalize_automated_requires_rgba() {
        let colors = tree(json!({"blue": {"color-blue-10": {"hex": "#00f"}}}));
        assert!(matches!(
            ColorToken::normalize_colors(TokenFormat::Automated, &colors),
            Err(TokenError::UnsupportedShape { .. })
        ));
    }
}
