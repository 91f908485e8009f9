//! Structural helpers over JSON token trees.

use serde_json::Value;
use tracing::debug;

use super::types::TokenTree;

/// Recursively merges `source` into `destination`.
///
/// Objects are merged key by key, arrays element by element (the source element at
/// index `i` is merged into the destination element at `i`, extending the array when
/// needed), and any other source value replaces the destination value.
pub fn deep_merge(destination: &mut TokenTree, source: &TokenTree) {
    for (key, value) in source {
        match destination.get_mut(key) {
            Some(existing) => merge_value(existing, value, key),
            None => {
                destination.insert(key.clone(), value.clone());
            }
        }
    }
}

fn merge_value(destination: &mut Value, source: &Value, key: &str) {
    match (destination, source) {
        (Value::Object(dest), Value::Object(src)) => deep_merge(dest, src),
        (Value::Array(dest), Value::Array(src)) => {
            for (index, item) in src.iter().enumerate() {
                match dest.get_mut(index) {
                    Some(existing) => merge_value(existing, item, key),
                    None => dest.push(item.clone()),
                }
            }
        }
        (dest, src) => {
            if *dest != *src {
                debug!("Overriding token '{}': {} -> {}", key, dest, src);
            }
            *dest = src.clone();
        }
    }
}

/// Whether a lookup result counts as found: `null`, `false`, `0` and `""` do not.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether an object is a structured colour `{r, g, b, a}` with numeric channels.
pub fn is_structured_color(tree: &TokenTree) -> bool {
    tree.len() == 4 && ["r", "g", "b", "a"].iter().all(|k| tree.get(*k).map_or(false, Value::is_number))
}

/// Removes every entry named in `keys` at any depth.
pub fn strip_keys(value: &mut Value, keys: &[&str]) {
    match value {
        Value::Object(map) => {
            for key in keys {
                map.shift_remove(*key);
            }
            map.values_mut().for_each(|child| strip_keys(child, keys));
        }
        Value::Array(items) => items.iter_mut().for_each(|child| strip_keys(child, keys)),
        _ => {}
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
    fn test_deep_merge_source_wins_on_leaves() {
        let mut dest = tree(json!({"button": {"bg": "#000", "fg": "#fff"}}));
        deep_merge(&mut dest, &tree(json!({"button": {"bg": "#111"}, "icon": "16px"})));
        assert_eq!(
            Value::Object(dest),
            json!({"button": {"bg": "#111", "fg": "#fff"}, "icon": "16px"})
        );
    }

    #[test]
    fn test_deep_merge_arrays_by_index() {
        let mut dest = tree(json!({"stops": ["a", "b", "c"]}));
        deep_merge(&mut dest, &tree(json!({"stops": ["x"]})));
        assert_eq!(dest["stops"], json!(["x", "b", "c"]));

        deep_merge(&mut dest, &tree(json!({"stops": ["x", "y", "z", "w"]})));
        assert_eq!(dest["stops"], json!(["x", "y", "z", "w"]));
    }

    #[test]
    fn test_is_present() {
        assert!(is_present(&json!("#fff")));
        assert!(is_present(&json!({})));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&Value::Null));
        assert!(!is_present(&json!(0)));
    }

    #[test]
    fn test_is_structured_color() {
        assert!(is_structured_color(&tree(json!({"r": 1, "g": 2, "b": 3, "a": 0.5}))));
        assert!(!is_structured_color(&tree(json!({"r": 1, "g": 2, "b": 3}))));
        assert!(!is_structured_color(&tree(json!({"r": "1", "g": 2, "b": 3, "a": 1}))));
    }

    #[test]
    fn test_strip_keys_at_every_depth() {
        let mut value = json!({
            "comment": "top",
            "button": {"figma": "id", "bg": "#000", "states": [{"comment": "x", "v": 1}]}
        });
        strip_keys(&mut value, &["comment", "figma"]);
        assert_eq!(value, json!({"button": {"bg": "#000", "states": [{"v": 1}]}}));
    }
}
