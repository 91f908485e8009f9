//! Lookup of hyphen-joined token names inside a nested token tree.
//!
//! Token names may themselves contain hyphens, so `button-primary-text` could live at
//! `button.primary.text`, `button-primary.text` or `button.primary-text`. [`find_key`]
//! walks the tree joining segments left to right and descends into the first joined
//! prefix that names a sub-tree. It never backtracks: once a prefix has been consumed
//! at one level, shorter or longer splits at that level are not retried.

use serde_json::Value;

use super::types::{TokenTree, PATH_JOINER, PATH_SEPARATOR};

/// Finds the value addressed by `parts` in `tokens`, or `None` if no path matches.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tokenforge_domain::tokens::key_path::find_key;
///
/// let tree = json!({"button-primary": {"text": "#fff"}});
/// let tree = tree.as_object().unwrap();
/// assert_eq!(find_key(&["button", "primary", "text"], tree), Some(&json!("#fff")));
/// ```
pub fn find_key<'a>(parts: &[&str], tokens: &'a TokenTree) -> Option<&'a Value> {
    for i in 1..=parts.len() {
        let joined = parts[..i].join(PATH_JOINER);
        if i == parts.len() {
            return tokens.get(&joined);
        }
        if let Some(Value::Object(child)) = tokens.get(&joined) {
            return find_key(&parts[i..], child);
        }
    }
    None
}

/// Splits a flattened name and looks it up with [`find_key`].
pub fn find_name<'a>(name: &str, tokens: &'a TokenTree) -> Option<&'a Value> {
    let parts: Vec<&str> = name.split(PATH_SEPARATOR).collect();
    find_key(&parts, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> TokenTree {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_find_key_nested_segments() {
        let tokens = tree(json!({"button": {"primary": {"text": "#fff"}}}));
        assert_eq!(find_name("button-primary-text", &tokens), Some(&json!("#fff")));
    }

    #[test]
    fn test_find_key_hyphenated_names() {
        let tokens = tree(json!({"button": {"primary-text": "#111"}, "icon-size": "16px"}));
        assert_eq!(find_name("button-primary-text", &tokens), Some(&json!("#111")));
        assert_eq!(find_name("icon-size", &tokens), Some(&json!("16px")));
    }

    #[test]
    fn test_find_key_returns_groups() {
        let tokens = tree(json!({"core": {"blue": {"50": "#00f"}}}));
        assert_eq!(find_name("core-blue", &tokens), Some(&json!({"50": "#00f"})));
    }

    #[test]
    fn test_find_key_missing() {
        let tokens = tree(json!({"button": {"primary": "#fff"}}));
        assert_eq!(find_name("button-secondary", &tokens), None);
        assert_eq!(find_key(&[], &tokens), None);
    }

    #[test]
    fn test_find_key_does_not_backtrack() {
        // `a` is consumed as a group, so `a-b.c` is never considered.
        let tokens = tree(json!({"a": {"x": "1"}, "a-b": {"c": "2"}}));
        assert_eq!(find_name("a-b-c", &tokens), None);
    }

    #[test]
    fn test_find_key_skips_leaf_prefixes() {
        // A leaf `a` cannot be descended into, so the longer join `a-b` is tried.
        let tokens = tree(json!({"a": "leaf", "a-b": {"c": "2"}}));
        assert_eq!(find_name("a-b-c", &tokens), Some(&json!("2")));
    }
}
