//! Whole-tree rewrites applied around resolution: symbolic colour names for core
//! tokens, border expansion and `none` removal.

use serde_json::Value;
use tracing::debug;

use super::errors::TokenError;
use super::types::{kind_of, TokenTree, PATH_JOINER};

const NONE: &str = "none";

/// Replaces every string leaf of `tokens` with its own hyphen-joined path, minus the
/// first `SystemColor` and `hc-` found in it.
///
/// Used for the `names` colour format, where output refers to core colours by name.
pub fn use_colour_names(tokens: &mut TokenTree) -> Result<(), TokenError> {
    rename_leaves(tokens, "")
}

fn rename_leaves(tokens: &mut TokenTree, path: &str) -> Result<(), TokenError> {
    for (key, value) in tokens.iter_mut() {
        let name = if path.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", path, PATH_JOINER, key)
        };
        match value {
            Value::Object(child) => rename_leaves(child, &name)?,
            Value::String(_) => {
                *value = Value::String(name.replacen("SystemColor", "", 1).replacen("hc-", "", 1));
            }
            other => {
                return Err(TokenError::MalformedValue {
                    value: other.to_string(),
                    reason: format!("unexpected type of colour at '{}': {}", name, kind_of(other)),
                })
            }
        }
    }
    Ok(())
}

/// Rewrites every `border` group in `tokens`.
///
/// With `no_border_is_background` a `none` border takes the value of the sibling
/// `background` entry with the same key (and is dropped if there is none). Otherwise
/// the group is replaced by `border-style` (`none` or `solid`) and `border-color`.
pub fn fix_borders(tokens: &mut TokenTree, no_border_is_background: bool) {
    let keys: Vec<String> = tokens.keys().cloned().collect();
    for key in keys {
        if key == "border" {
            if let Some(Value::Object(border)) = tokens.get("border").cloned() {
                if no_border_is_background {
                    use_background_for_none(tokens, &border);
                } else {
                    split_border(tokens, border);
                }
            }
        } else if let Some(Value::Object(child)) = tokens.get_mut(&key) {
            fix_borders(child, no_border_is_background);
        }
    }
}

fn use_background_for_none(tokens: &mut TokenTree, border: &TokenTree) {
    let mut fixed = border.clone();
    for (state, value) in border {
        if value.as_str() != Some(NONE) {
            continue;
        }
        match tokens.get("background").and_then(|background| background.get(state)) {
            Some(background) => {
                fixed.insert(state.clone(), background.clone());
            }
            None => {
                debug!("No background for border '{}', dropping it", state);
                fixed.shift_remove(state);
            }
        }
    }
    tokens.insert("border".to_string(), Value::Object(fixed));
}

fn split_border(tokens: &mut TokenTree, border: TokenTree) {
    let mut style = TokenTree::new();
    let mut color = TokenTree::new();
    for (state, value) in border {
        if value.as_str() == Some(NONE) {
            style.insert(state, Value::from(NONE));
        } else {
            style.insert(state.clone(), Value::from("solid"));
            color.insert(state, value);
        }
    }
    tokens.shift_remove("border");
    tokens.insert("border-style".to_string(), Value::Object(style));
    tokens.insert("border-color".to_string(), Value::Object(color));
}

/// Deletes every leaf equal to `none`, at any depth.
pub fn remove_none_tokens(tokens: &mut TokenTree) {
    tokens.retain(|_, value| value.as_str() != Some(NONE));
    for value in tokens.values_mut() {
        if let Value::Object(child) = value {
            remove_none_tokens(child);
        }
    }
}
