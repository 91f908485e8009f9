//! Replacement of `@reference` leaves with the values they point at.
//!
//! A reference `@name[*alpha]` is looked up, in order:
//!
//! 1. as a literal key of the flattened core tokens (terminal);
//! 2. anywhere in the tree being resolved, via [`find_key`], and then resolved itself;
//! 3. as a whole group of the core tree, with the alpha spread over every leaf;
//! 4. through a group reference: `@button-primary-text` where `button-primary` is
//!    itself `@core-blue` is retried as `core-blue-text`.
//!
//! What happens when all of these fail depends on [`Strictness`].

use serde_json::Value;
use tracing::{debug, warn};

use tokenforge_core::utils::string_utils::format_number;

use super::errors::TokenError;
use super::key_path::{find_key, find_name};
use super::target::Strictness;
use super::tree::{is_present, is_structured_color};
use super::types::{number_value, split_alpha, Reference, TokenTree, ALPHA_SEPARATOR, PATH_JOINER};

/// Resolves references against a fixed set of read-only token trees.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    all_tokens: &'a TokenTree,
    core_tree: &'a TokenTree,
    flat_core: &'a TokenTree,
    strictness: Strictness,
}

impl<'a> ReferenceResolver<'a> {
    /// * `all_tokens` - the tree references are looked up in (usually the tree being resolved)
    /// * `core_tree` - nested core tokens, for whole-group substitution
    /// * `flat_core` - the flattened core tokens
    pub fn new(
        all_tokens: &'a TokenTree,
        core_tree: &'a TokenTree,
        flat_core: &'a TokenTree,
        strictness: Strictness,
    ) -> Self {
        ReferenceResolver {
            all_tokens,
            core_tree,
            flat_core,
            strictness,
        }
    }

    /// Returns a copy of `tree` with every reference resolved.
    pub fn resolve_tree(&self, tree: &TokenTree) -> Result<TokenTree, TokenError> {
        let mut visiting = Vec::new();
        self.resolve_map(tree, &mut visiting)
    }

    pub fn resolve(&self, value: &Value) -> Result<Value, TokenError> {
        let mut visiting = Vec::new();
        self.resolve_value(value, &mut visiting)
    }

    fn resolve_map(&self, tree: &TokenTree, visiting: &mut Vec<String>) -> Result<TokenTree, TokenError> {
        let mut resolved = TokenTree::new();
        for (key, value) in tree {
            resolved.insert(key.clone(), self.resolve_value(value, visiting)?);
        }
        Ok(resolved)
    }

    fn resolve_value(&self, value: &Value, visiting: &mut Vec<String>) -> Result<Value, TokenError> {
        match value {
            Value::Object(map) => Ok(Value::Object(self.resolve_map(map, visiting)?)),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, visiting))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::String(raw) => match Reference::parse(raw)? {
                Some(reference) => self.resolve_reference(raw, &reference, visiting),
                None => Ok(value.clone()),
            },
            other => Ok(other.clone()),
        }
    }

    fn resolve_reference(
        &self,
        raw: &str,
        reference: &Reference,
        visiting: &mut Vec<String>,
    ) -> Result<Value, TokenError> {
        if visiting.contains(&reference.name) {
            let mut path = visiting.clone();
            path.push(reference.name.clone());
            return Err(TokenError::CyclicReference {
                reference: raw.to_string(),
                path,
            });
        }

        if let Some(core) = self.flat_core.get(&reference.name) {
            return apply_alpha(core, reference.alpha);
        }

        let parts = reference.parts();
        let mut attempted = vec![reference.name.clone()];

        if let Some(found) = find_key(&parts, self.all_tokens).filter(|v| is_present(v)) {
            let resolved = self.follow(&reference.name, found, visiting)?;
            return apply_alpha(&resolved, reference.alpha);
        }

        if let Some(group) = find_key(&parts, self.core_tree).filter(|v| is_present(v)) {
            debug!("Substituting core group '{}'", reference.name);
            let scaled = apply_alpha(group, reference.alpha)?;
            return self.follow(&reference.name, &scaled, visiting);
        }

        for dropped in 1..parts.len() {
            let (group_parts, rest) = parts.split_at(parts.len() - dropped);
            let group_name = group_parts.join(PATH_JOINER);
            attempted.push(group_name.clone());
            let Some(group) = find_key(group_parts, self.all_tokens).filter(|v| is_present(v)) else {
                continue;
            };
            let Some(group_reference) = group.as_str().map(Reference::parse).transpose()?.flatten() else {
                return self.unresolved(
                    raw,
                    attempted,
                    &format!("tried resolving via '{}' but that was not a reference", group_name),
                );
            };

            let substitute = format!("{}{}{}", group_reference.name, PATH_JOINER, rest.join(PATH_JOINER));
            let alpha = reference.alpha * group_reference.alpha;
            attempted.push(substitute.clone());
            debug!("Resolving '{}' through group reference as '{}'", raw, substitute);

            if let Some(core) = self.flat_core.get(&substitute) {
                return apply_alpha(core, alpha);
            }
            if let Some(found) = find_name(&substitute, self.all_tokens).filter(|v| is_present(v)) {
                let resolved = self.follow(&reference.name, found, visiting)?;
                return apply_alpha(&resolved, alpha);
            }
            break;
        }

        self.unresolved(raw, attempted, "no matching token")
    }

    /// Resolves `value` with `name` on the breadcrumb trail.
    fn follow(&self, name: &str, value: &Value, visiting: &mut Vec<String>) -> Result<Value, TokenError> {
        visiting.push(name.to_string());
        let resolved = self.resolve_value(value, visiting);
        visiting.pop();
        resolved
    }

    fn unresolved(&self, raw: &str, attempted: Vec<String>, detail: &str) -> Result<Value, TokenError> {
        match self.strictness {
            Strictness::Strict => Err(TokenError::UnresolvedReference {
                reference: raw.to_string(),
                attempted,
            }),
            Strictness::Lenient => {
                warn!("Unable to find {} ({}), keeping it as is", raw, detail);
                Ok(Value::String(raw.to_string()))
            }
        }
    }
}

/// Multiplies `alpha` into every leaf of `value`.
///
/// Strings get a `*alpha` multiplier suffix, combined with one that is already there.
/// Structured colours have their `a` channel scaled. An alpha of `1` leaves any value as is.
pub fn apply_alpha(value: &Value, alpha: f64) -> Result<Value, TokenError> {
    if alpha == 1.0 {
        return Ok(value.clone());
    }
    match value {
        Value::String(text) => {
            let (base, existing) = split_alpha(text)?;
            Ok(Value::String(format!(
                "{}{}{}",
                base,
                ALPHA_SEPARATOR,
                format_number(round_alpha(existing * alpha))
            )))
        }
        Value::Object(map) if is_structured_color(map) => {
            let mut scaled = map.clone();
            let a = map.get("a").and_then(Value::as_f64).unwrap_or(1.0);
            scaled.insert("a".to_string(), number_value(round_alpha(a * alpha)));
            Ok(Value::Object(scaled))
        }
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| Ok::<_, TokenError>((key.clone(), apply_alpha(child, alpha)?)))
            .collect::<Result<TokenTree, _>>()
            .map(Value::Object),
        Value::Array(items) => items
            .iter()
            .map(|item| apply_alpha(item, alpha))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(TokenError::InvalidAlphaTarget {
            value: other.to_string(),
            alpha: format_number(alpha),
        }),
    }
}

/// Drops floating point noise from multiplied factors.
fn round_alpha(alpha: f64) -> f64 {
    (alpha * 10_000.0).round() / 10_000.0
}
