//! Expansion of flattened keys carrying a `#state` suffix.

use serde_json::Value;

use super::errors::TokenError;
use super::target::{BuildTarget, Platform, StateRepresentation};
use super::types::{TokenTree, UiState, PATH_JOINER, PATH_SEPARATOR, STATE_SIGIL};

/// Turns `base-#state` keys into either `{base: {state: value}}` or `base-state` keys.
#[derive(Debug, Clone, Copy)]
pub struct StateFinalizer {
    platform: Platform,
    representation: StateRepresentation,
}

impl StateFinalizer {
    pub fn new(platform: Platform, representation: StateRepresentation) -> Self {
        StateFinalizer {
            platform,
            representation,
        }
    }

    pub fn for_target(target: &BuildTarget) -> Self {
        Self::new(target.platform, target.state_representation())
    }

    /// Finalizes a flat map produced by a marked flatten.
    ///
    /// Keys without a state suffix are treated as `normal`. Desktop platforms have no
    /// `active` state and receive it as `checked`.
    pub fn finalize(&self, tokens: &TokenTree) -> Result<TokenTree, TokenError> {
        let mut finalized = TokenTree::new();
        for (key, value) in tokens {
            let (base, state) = self.split_state(key)?;
            match self.representation {
                StateRepresentation::Object => {
                    let group = finalized
                        .entry(base.to_string())
                        .or_insert_with(|| Value::Object(TokenTree::new()));
                    if let Value::Object(states) = group {
                        states.insert(state.as_str().to_string(), value.clone());
                    }
                }
                StateRepresentation::Suffix => {
                    let name = match state {
                        UiState::Normal => base.to_string(),
                        other => format!("{}{}{}", base, PATH_JOINER, other),
                    };
                    finalized.insert(name, value.clone());
                }
            }
        }
        Ok(finalized)
    }

    fn split_state<'k>(&self, key: &'k str) -> Result<(&'k str, UiState), TokenError> {
        let (base, last) = match key.rsplit_once(PATH_SEPARATOR) {
            Some((base, last)) => (base, last),
            None => ("", key),
        };
        let Some(name) = last.strip_prefix(STATE_SIGIL) else {
            return Ok((key, UiState::Normal));
        };
        let state = UiState::parse(name).ok_or_else(|| TokenError::UnknownUiState {
            key: key.to_string(),
            state: name.to_string(),
        })?;
        let state = match state {
            UiState::Active if self.platform.is_desktop() => UiState::Checked,
            other => other,
        };
        Ok((base, state))
    }
}
