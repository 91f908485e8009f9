//! Re-encoding of colour and size leaves for a build target.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use std::str::FromStr;

use tokenforge_core::types::Color;
use tokenforge_core::utils::string_utils::format_number;

use super::errors::TokenError;
use super::target::{BuildTarget, ColorFormat, SizeUnit};
use super::types::{number_value, split_alpha, TokenTree};

/// Prefix of symbolic colour names produced for the `names` colour format.
const COLOR_NAME_PREFIX: &str = "color-";

/// Leading integer of a size, ignoring anything after it (`12.5px` is `12`).
static PX_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid size pattern"));

/// Converts leaf values into a target's colour format and size unit.
#[derive(Debug, Clone, Copy)]
pub struct UnitNormalizer {
    color_format: ColorFormat,
    size_unit: SizeUnit,
    ignore_alpha: bool,
}

impl UnitNormalizer {
    pub fn new(color_format: ColorFormat, size_unit: SizeUnit, ignore_alpha: bool) -> Self {
        UnitNormalizer {
            color_format,
            size_unit,
            ignore_alpha,
        }
    }

    pub fn for_target(target: &BuildTarget) -> Self {
        Self::new(target.color_format, target.size_unit, target.ignore_alpha)
    }

    /// Normalizes every value of a flat map.
    pub fn normalize_all(&self, tokens: &TokenTree) -> Result<TokenTree, TokenError> {
        tokens
            .iter()
            .map(|(key, value)| Ok::<_, TokenError>((key.clone(), self.normalize(value)?)))
            .collect()
    }

    /// Normalizes one leaf: colour literals, symbolic colour names and pixel sizes are
    /// rewritten; anything else is returned unchanged.
    pub fn normalize(&self, value: &Value) -> Result<Value, TokenError> {
        let Value::String(text) = value else {
            return Ok(value.clone());
        };
        if text.starts_with('#') || text.starts_with("rgb") {
            self.normalize_color(text)
        } else if let Some(name) = text.strip_prefix(COLOR_NAME_PREFIX) {
            normalize_color_name(name)
        } else if let Some(size) = text.strip_suffix("px") {
            self.normalize_size(text, size)
        } else {
            Ok(value.clone())
        }
    }

    fn normalize_color(&self, text: &str) -> Result<Value, TokenError> {
        let (literal, alpha) = split_alpha(text)?;
        let padded;
        let parsed = if is_unpadded_hex(literal) {
            padded = format!("#0{}", &literal[1..]);
            padded.as_str()
        } else {
            literal
        };
        let mut color = Color::from_str(parsed).map_err(|e| TokenError::MalformedValue {
            value: text.to_string(),
            reason: e.to_string(),
        })?;
        let scaled = !self.ignore_alpha && alpha != 1.0;
        if scaled {
            color = color.scale_alpha(alpha);
        }
        let color = color.round_alpha();

        Ok(match self.color_format {
            ColorFormat::Rgba => Value::String(color.to_rgba_string()),
            ColorFormat::Object => json!({
                "r": color.r,
                "g": color.g,
                "b": color.b,
                "a": number_value(color.a),
            }),
            ColorFormat::Hex => Value::String(color.to_hex_string()),
            // Core colours were already replaced by names; literals written directly in
            // theme or component files stay as authored unless they carry a multiplier.
            ColorFormat::Names if scaled => Value::String(color.to_rgba_string()),
            ColorFormat::Names => Value::String(literal.to_string()),
        })
    }

    fn normalize_size(&self, text: &str, size: &str) -> Result<Value, TokenError> {
        let px: i64 = PX_SIZE
            .captures(size)
            .and_then(|c| c[1].parse().ok())
            .ok_or_else(|| TokenError::MalformedValue {
                value: text.to_string(),
                reason: "unable to parse size".to_string(),
            })?;
        let px = px as f64;
        Ok(Value::String(match self.size_unit {
            SizeUnit::Px => format!("{}px", format_number(px)),
            SizeUnit::Pt => format!("{}pt", format_number(px * 0.75)),
            SizeUnit::Rem => format!("{}rem", format_number(px / 16.0)),
        }))
    }
}

/// `#` followed by seven hex digits: an eight-digit colour that lost its leading zero.
fn is_unpadded_hex(literal: &str) -> bool {
    literal.len() == 8
        && literal.starts_with('#')
        && literal[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn normalize_color_name(name: &str) -> Result<Value, TokenError> {
    let (name, alpha) = split_alpha(name)?;
    if alpha != 1.0 {
        let percent = (alpha * 100.0 * 100.0).round() / 100.0;
        Ok(Value::String(format!("{}-alpha-{}", name, format_number(percent))))
    } else {
        Ok(Value::String(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::resolve::apply_alpha;
    use rstest::rstest;

    fn rgba() -> UnitNormalizer {
        UnitNormalizer::new(ColorFormat::Rgba, SizeUnit::Px, false)
    }

    #[rstest]
    #[case("#336699*0.5", "rgba(51, 102, 153, 0.5)")]
    #[case("#336699", "rgba(51, 102, 153, 1)")]
    #[case("rgba(0, 0, 0, 0.5)*0.5", "rgba(0, 0, 0, 0.25)")]
    #[case("#1234567", "rgba(1, 35, 69, 0.4)")]
    #[case("#000000*0.333", "rgba(0, 0, 0, 0.33)")]
    fn test_rgba_output(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rgba().normalize(&json!(input)).unwrap(), json!(expected));
    }

    #[rstest]
    #[case("#336699", "#336699")]
    #[case("#336699*0.5", "#33669980")]
    #[case("rgb(255, 0, 0)", "#ff0000")]
    fn test_hex_output(#[case] input: &str, #[case] expected: &str) {
        let normalizer = UnitNormalizer::new(ColorFormat::Hex, SizeUnit::Px, false);
        assert_eq!(normalizer.normalize(&json!(input)).unwrap(), json!(expected));
    }

    #[rstest]
    #[case(ColorFormat::Rgba, "#fff*0.5", json!("rgba(255, 255, 255, 0.5)"))]
    #[case(ColorFormat::Hex, "#fff*0.5", json!("#ffffff80"))]
    #[case(ColorFormat::Object, "#fff*0.5", json!({"r": 255, "g": 255, "b": 255, "a": 0.5}))]
    #[case(ColorFormat::Names, "#fff*0.5", json!("rgba(255, 255, 255, 0.5)"))]
    #[case(ColorFormat::Rgba, "#1234567*0.5", json!("rgba(1, 35, 69, 0.2)"))]
    #[case(ColorFormat::Hex, "#1234567*0.5", json!("#01234533"))]
    #[case(ColorFormat::Object, "#1234567*0.5", json!({"r": 1, "g": 35, "b": 69, "a": 0.2}))]
    #[case(ColorFormat::Names, "#1234567*0.5", json!("rgba(1, 35, 69, 0.2)"))]
    #[case(ColorFormat::Rgba, "#336699*0.25", json!("rgba(51, 102, 153, 0.25)"))]
    #[case(ColorFormat::Hex, "#336699*0.25", json!("#33669940"))]
    #[case(ColorFormat::Object, "#336699*0.25", json!({"r": 51, "g": 102, "b": 153, "a": 0.25}))]
    #[case(ColorFormat::Names, "#336699*0.25", json!("rgba(51, 102, 153, 0.25)"))]
    fn test_hex_literals_with_multipliers(#[case] format: ColorFormat, #[case] input: &str, #[case] expected: Value) {
        let normalizer = UnitNormalizer::new(format, SizeUnit::Px, false);
        assert_eq!(normalizer.normalize(&json!(input)).unwrap(), expected);
    }

    #[test]
    fn test_resolved_short_hex_keeps_its_channels() {
        let scaled = apply_alpha(&json!("#fff"), 0.5).unwrap();
        assert_eq!(rgba().normalize(&scaled).unwrap(), json!("rgba(255, 255, 255, 0.5)"));
    }

    #[test]
    fn test_names_format_keeps_plain_literals() {
        let normalizer = UnitNormalizer::new(ColorFormat::Names, SizeUnit::Px, false);
        assert_eq!(normalizer.normalize(&json!("#336699")).unwrap(), json!("#336699"));
        assert_eq!(normalizer.normalize(&json!("#336699*1")).unwrap(), json!("#336699"));
        assert_eq!(normalizer.normalize(&json!("#1234567")).unwrap(), json!("#1234567"));
    }

    #[test]
    fn test_object_output() {
        let normalizer = UnitNormalizer::new(ColorFormat::Object, SizeUnit::Px, false);
        assert_eq!(
            normalizer.normalize(&json!("#336699*0.5")).unwrap(),
            json!({"r": 51, "g": 102, "b": 153, "a": 0.5})
        );
        assert_eq!(
            normalizer.normalize(&json!("#fff")).unwrap(),
            json!({"r": 255, "g": 255, "b": 255, "a": 1})
        );
    }

    #[test]
    fn test_ignore_alpha() {
        let normalizer = UnitNormalizer::new(ColorFormat::Rgba, SizeUnit::Px, true);
        assert_eq!(
            normalizer.normalize(&json!("#336699*0.5")).unwrap(),
            json!("rgba(51, 102, 153, 1)")
        );
    }

    #[rstest]
    #[case("color-red-50", "red-50")]
    #[case("color-red-50*0.5", "red-50-alpha-50")]
    #[case("color-red-50*1", "red-50")]
    fn test_color_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rgba().normalize(&json!(input)).unwrap(), json!(expected));
    }

    #[rstest]
    #[case(SizeUnit::Px, "12px", "12px")]
    #[case(SizeUnit::Pt, "12px", "9pt")]
    #[case(SizeUnit::Rem, "12px", "0.75rem")]
    #[case(SizeUnit::Px, "12.5px", "12px")]
    #[case(SizeUnit::Rem, "-8px", "-0.5rem")]
    fn test_sizes(#[case] unit: SizeUnit, #[case] input: &str, #[case] expected: &str) {
        let normalizer = UnitNormalizer::new(ColorFormat::Rgba, unit, false);
        assert_eq!(normalizer.normalize(&json!(input)).unwrap(), json!(expected));
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(matches!(rgba().normalize(&json!("widepx")), Err(TokenError::MalformedValue { .. })));
        assert!(matches!(rgba().normalize(&json!("#zzzzzz")), Err(TokenError::MalformedValue { .. })));
        assert!(matches!(rgba().normalize(&json!("rgb(1, 2)")), Err(TokenError::MalformedValue { .. })));
    }

    #[test]
    fn test_other_values_pass_through() {
        assert_eq!(rgba().normalize(&json!("solid")).unwrap(), json!("solid"));
        assert_eq!(rgba().normalize(&json!(400)).unwrap(), json!(400));
        assert_eq!(rgba().normalize(&json!(["#000"])).unwrap(), json!(["#000"]));
    }

    #[test]
    fn test_normalize_all_keeps_keys() {
        let flat: TokenTree = serde_json::from_value(json!({"b-size": "16px", "a-bg": "#000"})).unwrap();
        let normalized = UnitNormalizer::new(ColorFormat::Hex, SizeUnit::Rem, false)
            .normalize_all(&flat)
            .unwrap();
        assert_eq!(Value::Object(normalized), json!({"b-size": "1rem", "a-bg": "#000000"}));
    }
}
