//! Deterministic key ordering for persisted token files.
//!
//! Grade names such as `00`, `05`, `50` and `100` must come out in numeric order, and
//! every other key in a natural, case-insensitive order. Maps keep insertion order, so
//! sorting once before serialization is all that is needed.

use serde_json::Value;
use std::cmp::Ordering;

use super::errors::TokenError;
use super::types::TokenTree;

/// Indentation of serialized token files.
pub const SERIAL_INDENT: usize = 2;

/// Compares two keys the way a reader expects: digit runs by numeric value, other
/// characters case-insensitively, punctuation before digits before letters.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return tie_break(a, b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ordering = compare_digit_runs(&l_run, &r_run);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                let ordering = char_rank(l)
                    .cmp(&char_rank(r))
                    .then_with(|| l.to_lowercase().cmp(r.to_lowercase()));
                if ordering != Ordering::Equal {
                    return ordering;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

fn char_rank(c: char) -> u8 {
    if c.is_whitespace() || c.is_ascii_punctuation() {
        0
    } else if c.is_ascii_digit() {
        1
    } else {
        2
    }
}

/// Keys equal under the natural order: lowercase before uppercase, then fewer
/// leading zeros first, so the result is a total order.
fn tie_break(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| b.cmp(a))
}

/// Returns a copy of `value` with every object's keys sorted by [`compare_keys`].
/// Array order is preserved; objects inside arrays are sorted too.
pub fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sort_tree(map)),
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}

pub fn sort_tree(tree: &TokenTree) -> TokenTree {
    let mut entries: Vec<(&String, &Value)> = tree.iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), sort_value(value)))
        .collect()
}

/// Sorts `value` and renders it as JSON with a two-space indent.
pub fn to_sorted_json(value: &Value) -> Result<String, TokenError> {
    Ok(serde_json::to_string_pretty(&sort_value(value))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_numeric_keys_sort_numerically() {
        let sorted = sort_value(&json!({"100": 1, "00": 2, "50": 3, "05": 4}));
        assert_eq!(keys(&sorted), vec!["00", "05", "50", "100"]);
    }

    #[test]
    fn test_nested_objects_are_sorted() {
        let sorted = sort_value(&json!({
            "c": {"80": "#ddd", "30": "#bbb"},
            "a": {"30": "#888", "10": "#000", "20": "#fff"},
            "b": {"100": "#abc", "00": "#123", "50": "#654"}
        }));
        assert_eq!(keys(&sorted), vec!["a", "b", "c"]);
        assert_eq!(keys(&sorted["a"]), vec!["10", "20", "30"]);
        assert_eq!(keys(&sorted["b"]), vec!["00", "50", "100"]);
    }

    #[test]
    fn test_sorted_json_text() {
        assert_eq!(to_sorted_json(&json!({"b": 1, "a": 2})).unwrap(), "{\n  \"a\": 2,\n  \"b\": 1\n}");
    }

    #[test]
    fn test_arrays_keep_their_order() {
        let sorted = sort_value(&json!({"stops": ["#fff", "#000", {"z": 1, "y": 2}]}));
        assert_eq!(sorted["stops"][0], json!("#fff"));
        assert_eq!(keys(&sorted["stops"][2]), vec!["y", "z"]);
    }

    #[rstest]
    #[case("color-a", "color-b", Ordering::Less)]
    #[case("red-10", "red-9", Ordering::Greater)]
    #[case("Blue", "apple", Ordering::Greater)]
    #[case("a", "A", Ordering::Less)]
    #[case("0", "00", Ordering::Less)]
    #[case("a-b", "ab", Ordering::Less)]
    #[case("x", "x", Ordering::Equal)]
    fn test_compare_keys(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare_keys(a, b), expected);
    }
}
