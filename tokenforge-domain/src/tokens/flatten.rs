//! Conversion between nested token trees and flat `path -> value` maps.
//!
//! While flattening, a key starting with `#` whose value is an object is not a path
//! segment but a UI-state modifier for every leaf below it; the state is moved to the
//! end of each of those leaves' paths. At most one state may apply to a leaf.

use serde_json::Value;

use super::errors::TokenError;
use super::types::{TokenTree, PATH_JOINER, PATH_SEPARATOR, STATE_SIGIL};

/// How a relocated UI state is spelled at the end of a flattened key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSuffix {
    /// `a-b-hovered`, for output and for callers that do not care about states.
    Bare,
    /// `a-b-#hovered`, so later stages can tell a state from a name segment.
    Marked,
}

/// Flattens `tree` with bare state suffixes.
///
/// ```
/// use serde_json::json;
/// use tokenforge_domain::tokens::flatten::flatten;
///
/// let tree = json!({"a": {"#hovered": {"b": "v"}}});
/// let flat = flatten(tree.as_object().unwrap()).unwrap();
/// assert_eq!(flat.get("a-b-hovered"), Some(&json!("v")));
/// ```
pub fn flatten(tree: &TokenTree) -> Result<TokenTree, TokenError> {
    flatten_with(tree, StateSuffix::Bare)
}

/// Flattens `tree`, spelling state suffixes as requested.
pub fn flatten_with(tree: &TokenTree, suffix: StateSuffix) -> Result<TokenTree, TokenError> {
    let mut flattened = TokenTree::new();
    flatten_into("", tree, &mut flattened, None, suffix)?;
    Ok(flattened)
}

fn flatten_into(
    path: &str,
    node: &TokenTree,
    flattened: &mut TokenTree,
    ui_state: Option<&str>,
    suffix: StateSuffix,
) -> Result<(), TokenError> {
    for (key, value) in node {
        if let Some(state) = key.strip_prefix(STATE_SIGIL) {
            if state.is_empty() {
                return Err(TokenError::InvalidStateGroup {
                    path: path.to_string(),
                    key: key.clone(),
                });
            }
            if let Some(carried) = ui_state {
                return Err(TokenError::NestedUiState {
                    path: path.to_string(),
                    state: key.clone(),
                    carried: carried.to_string(),
                });
            }
            if let Value::Object(child) = value {
                flatten_into(path, child, flattened, Some(key.as_str()), suffix)?;
                continue;
            }
        }

        let child_path = join(path, &segment(key, suffix));
        match value {
            Value::Object(child) => flatten_into(&child_path, child, flattened, ui_state, suffix)?,
            Value::Array(items) => {
                let indexed: TokenTree = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item.clone()))
                    .collect();
                flatten_into(&child_path, &indexed, flattened, ui_state, suffix)?
            }
            Value::Null => {}
            leaf => {
                let flat_key = match ui_state {
                    Some(state) => join(&child_path, &segment(state, suffix)),
                    None => child_path,
                };
                flattened.insert(flat_key, leaf.clone());
            }
        }
    }
    Ok(())
}

fn segment(key: &str, suffix: StateSuffix) -> String {
    match suffix {
        StateSuffix::Bare => key.strip_prefix(STATE_SIGIL).unwrap_or(key).to_string(),
        StateSuffix::Marked => key.to_string(),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", path, PATH_JOINER, key)
    }
}

/// Rebuilds a nested tree from a flat map by splitting every key on `-`.
///
/// A key that would need to descend through an existing leaf, or overwrite an existing
/// group, is a [`TokenError::PathCollision`].
pub fn unflatten(flattened: &TokenTree) -> Result<TokenTree, TokenError> {
    let mut output = TokenTree::new();
    for (key, value) in flattened {
        let parts: Vec<&str> = key.split(PATH_SEPARATOR).collect();
        let (last, parents) = parts.split_last().ok_or_else(|| TokenError::UnsupportedShape {
            path: key.clone(),
            message: "empty token name".to_string(),
        })?;

        let mut current = &mut output;
        for part in parents {
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(TokenTree::new()));
            current = match entry {
                Value::Object(child) => child,
                _ => {
                    return Err(TokenError::PathCollision {
                        path: key.clone(),
                        existing: "token value",
                    })
                }
            };
        }
        if matches!(current.get(*last), Some(Value::Object(_))) {
            return Err(TokenError::PathCollision {
                path: key.clone(),
                existing: "token group",
            });
        }
        current.insert(last.to_string(), value.clone());
    }
    Ok(output)
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
    fn test_flatten_moves_state_to_end() {
        let flat = flatten(&tree(json!({"a": {"#hovered": {"b": "v"}}}))).unwrap();
        assert_eq!(Value::Object(flat), json!({"a-b-hovered": "v"}));
    }

    #[test]
    fn test_flatten_marked_keeps_sigil() {
        let input = tree(json!({"button": {"#pressed": {"bg": {"primary": "#000"}}, "fg": "#fff"}}));
        let flat = flatten_with(&input, StateSuffix::Marked).unwrap();
        assert_eq!(
            Value::Object(flat),
            json!({"button-bg-primary-#pressed": "#000", "button-fg": "#fff"})
        );
    }

    #[test]
    fn test_flatten_accepts_relocated_state_leaf() {
        let input = tree(json!({"a": {"b": {"#hovered": "v", "normal": "w"}}}));
        let flat = flatten_with(&input, StateSuffix::Marked).unwrap();
        assert_eq!(Value::Object(flat), json!({"a-b-#hovered": "v", "a-b-normal": "w"}));
    }

    #[test]
    fn test_flatten_rejects_nested_states() {
        let input = tree(json!({"a": {"#hovered": {"#pressed": {"b": "v"}}}}));
        assert!(matches!(flatten(&input), Err(TokenError::NestedUiState { .. })));
    }

    #[test]
    fn test_flatten_rejects_empty_state() {
        let input = tree(json!({"a": {"#": {"b": "v"}}}));
        assert!(matches!(flatten(&input), Err(TokenError::InvalidStateGroup { .. })));
    }

    #[test]
    fn test_flatten_arrays_and_nulls() {
        let input = tree(json!({"stops": ["#000", "#fff"], "empty": null}));
        let flat = flatten(&input).unwrap();
        assert_eq!(Value::Object(flat), json!({"stops-0": "#000", "stops-1": "#fff"}));
    }

    #[test]
    fn test_flatten_unflatten_round_trip() {
        let input = tree(json!({
            "button": {"primary": {"bg": "#000", "fg": "#fff"}, "radius": "4px"},
            "icon": {"size": "16px"}
        }));
        assert_eq!(unflatten(&flatten(&input).unwrap()).unwrap(), input);
    }

    #[test]
    fn test_unflatten_repositions_state() {
        let flat = flatten_with(&tree(json!({"a": {"#hovered": {"b": "v"}}})), StateSuffix::Marked).unwrap();
        assert_eq!(Value::Object(unflatten(&flat).unwrap()), json!({"a": {"b": {"#hovered": "v"}}}));
    }

    #[test]
    fn test_unflatten_path_collision() {
        let flat = tree(json!({"text": "#000", "text-primary": "#111"}));
        assert!(matches!(unflatten(&flat), Err(TokenError::PathCollision { .. })));

        let flat = tree(json!({"text-primary": "#111", "text": "#000"}));
        assert!(matches!(unflatten(&flat), Err(TokenError::PathCollision { .. })));
    }
}
