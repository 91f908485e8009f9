//! String Utilities.
//!
//! Small pure helpers used when naming and emitting build artifacts.
//!
//! # Key Functions
//!
//! - [`to_camel_case()`]: Builds output file names such as `momentumJadeDark`.
//! - [`format_number()`]: Renders numbers the way token files write them (`1`, `0.5`, `12.75`).

/// Converts a string to `camelCase`.
///
/// Delimiters (`_`, `-`, ` `) are removed and the character following one is
/// uppercased. The first character is lowercased; every other character keeps its case,
/// so already camel- or Pascal-cased segments survive concatenation.
///
/// # Examples
/// ```
/// use tokenforge_core::utils::string_utils::to_camel_case;
/// assert_eq!(to_camel_case("hello_world"), "helloWorld");
/// assert_eq!(to_camel_case("JadeDark"), "jadeDark");
/// assert_eq!(to_camel_case("momentum-Rose Light"), "momentumRoseLight");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;
    let mut first_word_char_processed = false;

    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            capitalize_next = first_word_char_processed;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else if !first_word_char_processed {
            result.extend(c.to_lowercase());
            first_word_char_processed = true;
        } else {
            result.push(c);
        }
    }
    result
}

/// Formats a number without a trailing `.0` for integral values.
///
/// Negative zero is printed as `0`.
///
/// # Examples
/// ```
/// use tokenforge_core::utils::string_utils::format_number;
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(0.25), "0.25");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("momentumJadeDark", "momentumJadeDark")]
    #[case("DarkBronze", "darkBronze")]
    #[case("momentum" , "momentum")]
    #[case("-leading-dash", "leadingDash")]
    #[case("", "")]
    fn test_to_camel_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_camel_case(input), expected);
    }

    #[rstest]
    #[case(12.0, "12")]
    #[case(0.75, "0.75")]
    #[case(9.75, "9.75")]
    #[case(0.0, "0")]
    #[case(-4.5, "-4.5")]
    fn test_format_number(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(format_number(input), expected);
    }
}
