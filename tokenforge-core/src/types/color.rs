//! Colour values as they appear in token files.
//!
//! This module provides the [`Color`] struct, a parsed `#hex`, `rgb(...)` or `rgba(...)`
//! literal, and [`ColorParseError`] for literals that cannot be parsed. Channels are kept
//! as 8-bit integers and the alpha as a float, which is the precision token files are
//! authored in and the precision every output representation needs.
//!
//! # Examples
//!
//! ```
//! use tokenforge_core::types::Color;
//! use std::str::FromStr;
//!
//! let blue = Color::from_str("#336699").unwrap();
//! assert_eq!((blue.r, blue.g, blue.b), (51, 102, 153));
//!
//! let faded = blue.scale_alpha(0.5);
//! assert_eq!(faded.to_rgba_string(), "rgba(51, 102, 153, 0.5)");
//! assert_eq!(faded.to_hex_string(), "#33669980");
//! ```

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::string_utils::format_number;

/// Error type for colour parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The literal is missing its leading `#` or has an unexpected structure.
    #[error("Invalid hex color string format: '{0}'. Expected #RGB, #RGBA, #RRGGBB, or #RRGGBBAA.")]
    InvalidHexFormat(String),

    /// A component contains a character that is not a hex digit.
    #[error("Invalid hex digit in '{input_str}': {source}")]
    InvalidHexDigit {
        input_str: String,
        #[source]
        source: ParseIntError,
    },

    /// Number of digits after `#` is not 3, 4, 6 or 8.
    #[error("Invalid hex color string length: '{0}'. Expected 3, 4, 6, or 8 characters after '#'.")]
    InvalidHexLength(String),

    /// Malformed `rgb()`/`rgba()` literal or an unsupported colour syntax.
    #[error("Invalid color string format: {0}")]
    InvalidFormat(String),
}

/// An sRGB colour with 8-bit channels and a fractional alpha in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha (opacity), `0.0` is fully transparent, `1.0` fully opaque.
    pub a: f64,
}

impl Color {
    /// Creates a new `Color`. The alpha is clamped to `[0.0, 1.0]`.
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color { r, g, b, a: a.clamp(0.0, 1.0) }
    }

    /// Creates an opaque colour.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::new(r, g, b, 1.0)
    }

    /// Creates a new `Color` from a hexadecimal string (e.g., "#RRGGBB", "#RGB", "#RRGGBBAA").
    ///
    /// The parsing is case-insensitive for hex digits.
    ///
    /// # Errors
    ///
    /// Returns a [`ColorParseError`] on a missing `#`, a wrong length or invalid digits.
    pub fn from_hex(hex_str: &str) -> Result<Self, ColorParseError> {
        let input = hex_str
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::InvalidHexFormat(hex_str.to_string()))?;
        if !input.is_ascii() {
            return Err(ColorParseError::InvalidHexFormat(hex_str.to_string()));
        }

        let parse_hex_component = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|e| ColorParseError::InvalidHexDigit {
                input_str: s.to_string(),
                source: e,
            })
        };
        let short = |s: &str| parse_hex_component(s).map(|v| (v << 4) | v);

        match input.len() {
            3 => Ok(Color::rgb(short(&input[0..1])?, short(&input[1..2])?, short(&input[2..3])?)),
            4 => Ok(Color::new(
                short(&input[0..1])?,
                short(&input[1..2])?,
                short(&input[2..3])?,
                f64::from(short(&input[3..4])?) / 255.0,
            )),
            6 => Ok(Color::rgb(
                parse_hex_component(&input[0..2])?,
                parse_hex_component(&input[2..4])?,
                parse_hex_component(&input[4..6])?,
            )),
            8 => Ok(Color::new(
                parse_hex_component(&input[0..2])?,
                parse_hex_component(&input[2..4])?,
                parse_hex_component(&input[4..6])?,
                f64::from(parse_hex_component(&input[6..8])?) / 255.0,
            )),
            _ => Err(ColorParseError::InvalidHexLength(hex_str.to_string())),
        }
    }

    /// Returns this colour with its alpha multiplied by `factor`.
    pub fn scale_alpha(self, factor: f64) -> Self {
        Color::new(self.r, self.g, self.b, self.a * factor)
    }

    /// Returns this colour with its alpha rounded to two decimal places.
    pub fn round_alpha(self) -> Self {
        Color { a: (self.a * 100.0).round() / 100.0, ..self }
    }

    /// Formats as `rgba(r, g, b, a)`.
    pub fn to_rgba_string(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, format_number(self.a))
    }

    /// Formats as lowercase `#rrggbb`, with an `aa` channel appended only when the colour
    /// is not fully opaque.
    pub fn to_hex_string(&self) -> String {
        let mut hex = format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        if self.a != 1.0 {
            hex.push_str(&format!("{:02x}", (self.a * 255.0).round() as u8));
        }
        hex
    }
}

fn functional_components<'a>(s: &'a str, prefix: &str) -> Option<Vec<&'a str>> {
    let content = s.strip_prefix(prefix)?.strip_suffix(')')?;
    Some(content.split(',').map(|p| p.trim()).collect())
}

fn parse_channel(part: &str, s: &str) -> Result<u8, ColorParseError> {
    let value = part
        .parse::<f64>()
        .map_err(|e| ColorParseError::InvalidFormat(format!("Invalid channel '{}' in '{}': {}", part, s, e)))?;
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(part: &str, s: &str) -> Result<f64, ColorParseError> {
    let (number, scale) = match part.strip_suffix('%') {
        Some(p) => (p, 100.0),
        None => (part, 1.0),
    };
    number
        .parse::<f64>()
        .map(|a| a / scale)
        .map_err(|e| ColorParseError::InvalidFormat(format!("Invalid alpha '{}' in '{}': {}", part, s, e)))
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)` literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Color::from_hex(s);
        }
        if let Some(parts) = functional_components(s, "rgba(") {
            if parts.len() != 4 {
                return Err(ColorParseError::InvalidFormat(format!("Invalid RGBA format: {}", s)));
            }
            return Ok(Color::new(
                parse_channel(parts[0], s)?,
                parse_channel(parts[1], s)?,
                parse_channel(parts[2], s)?,
                parse_alpha(parts[3], s)?,
            ));
        }
        if let Some(parts) = functional_components(s, "rgb(") {
            return match parts.len() {
                3 => Ok(Color::rgb(
                    parse_channel(parts[0], s)?,
                    parse_channel(parts[1], s)?,
                    parse_channel(parts[2], s)?,
                )),
                4 => Ok(Color::new(
                    parse_channel(parts[0], s)?,
                    parse_channel(parts[1], s)?,
                    parse_channel(parts[2], s)?,
                    parse_alpha(parts[3], s)?,
                )),
                _ => Err(ColorParseError::InvalidFormat(format!("Invalid RGB format: {}", s))),
            };
        }
        Err(ColorParseError::InvalidFormat(format!("Unsupported color string: {}", s)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rgba_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#fff", Color::rgb(255, 255, 255))]
    #[case("#336699", Color::rgb(51, 102, 153))]
    #[case("#33669900", Color::new(51, 102, 153, 0.0))]
    #[case("rgb(1, 2, 3)", Color::rgb(1, 2, 3))]
    #[case("rgba(1, 2, 3, 0.4)", Color::new(1, 2, 3, 0.4))]
    #[case("rgba(1,2,3,50%)", Color::new(1, 2, 3, 0.5))]
    fn test_color_from_str(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(Color::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_color_from_hex_errors() {
        assert!(matches!(Color::from_hex("336699"), Err(ColorParseError::InvalidHexFormat(_))));
        assert!(matches!(Color::from_hex("#12345"), Err(ColorParseError::InvalidHexLength(_))));
        assert!(matches!(Color::from_hex("#gg0000"), Err(ColorParseError::InvalidHexDigit { .. })));
    }

    #[test]
    fn test_color_from_str_rejects_garbage() {
        assert!(Color::from_str("rgb(1, 2)").is_err());
        assert!(Color::from_str("rgba(a, 2, 3, 1)").is_err());
        assert!(Color::from_str("hsl(0, 0%, 0%)").is_err());
    }

    #[test]
    fn test_color_hex_omits_opaque_alpha() {
        assert_eq!(Color::rgb(255, 0, 16).to_hex_string(), "#ff0010");
        assert_eq!(Color::new(255, 0, 16, 0.5).to_hex_string(), "#ff001080");
    }

    #[test]
    fn test_color_round_alpha() {
        let color = Color::from_hex("#000000AB").unwrap().round_alpha();
        assert_eq!(color.a, 0.67);
        assert_eq!(color.to_rgba_string(), "rgba(0, 0, 0, 0.67)");
    }
}
