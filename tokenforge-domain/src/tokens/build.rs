//! Per-theme builds.
//!
//! A build loads the core and component token trees once, then for every theme file:
//!
//! 1. loads and merges the theme's files;
//! 2. resolves the theme against itself and the core;
//! 3. resolves the components against themselves and the resolved theme;
//! 4. fixes borders and drops `none` theme tokens;
//! 5. flattens, normalizes units and finalizes UI states;
//! 6. renders the result as JSON or CSS.
//!
//! The core and component trees are only ever read, so every theme of a run starts
//! from the same inputs.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use tokenforge_core::utils::fs;
use tokenforge_core::utils::string_utils::to_camel_case;

use super::adjust::{fix_borders, remove_none_tokens, use_colour_names};
use super::errors::TokenError;
use super::flatten::{flatten, flatten_with, StateSuffix};
use super::loader::{load_token_dir, load_token_file};
use super::resolve::ReferenceResolver;
use super::states::StateFinalizer;
use super::target::{BuildTarget, ColorFormat, FileFormat};
use super::tree::deep_merge;
use super::types::{kind_of, TokenTree};
use super::units::UnitNormalizer;

const CORE_DIR: &str = "core";
const COMPONENTS_DIR: &str = "components";
const PLATFORM_COMPONENTS_DIR: &str = "platformcomponents";
const THEME_GROUP: &str = "theme";
const INDEX_CSS: &str = "index.css";

/// A theme file: which accent and theme it builds and which token files make it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFile {
    #[serde(default)]
    pub accent: String,
    #[serde(default)]
    pub theme: String,
    /// Token files relative to the token root; names ending in `/` are directories.
    #[serde(default)]
    pub files: Vec<String>,
    /// Another theme file whose files are loaded before this one's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PathBuf>,
}

impl ThemeFile {
    /// Loads a theme file and folds in its parent chain. Relative paths are taken
    /// from `root`.
    pub fn load(root: &Path, path: &Path) -> Result<Self, TokenError> {
        Self::load_chain(root, path, &mut Vec::new())
    }

    fn load_chain(root: &Path, path: &Path, seen: &mut Vec<PathBuf>) -> Result<Self, TokenError> {
        let full_path = root.join(path);
        if seen.contains(&full_path) {
            return Err(TokenError::Configuration(format!(
                "theme file {} is its own ancestor",
                full_path.display()
            )));
        }
        seen.push(full_path.clone());
        let content = fs::read_to_string(&full_path)?;
        let theme: ThemeFile = serde_json::from_str(&content).map_err(|source| TokenError::TokenFileParse {
            path: full_path.clone(),
            source,
        })?;
        match theme.parent.clone() {
            None => Ok(theme),
            Some(parent_path) => {
                let parent = Self::load_chain(root, &parent_path, seen)?;
                Ok(theme.with_parent(parent))
            }
        }
    }

    fn with_parent(self, parent: ThemeFile) -> Self {
        let pick = |own: String, inherited: String| if own.is_empty() { inherited } else { own };
        let mut files = parent.files;
        files.extend(self.files);
        ThemeFile {
            accent: pick(self.accent, parent.accent),
            theme: pick(self.theme, parent.theme),
            files,
            parent: self.parent,
        }
    }
}

/// The finalized tokens of one theme, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTheme {
    pub theme: ThemeFile,
    /// Output file name without extension.
    pub name: String,
    pub tokens: TokenTree,
}

/// Builds themes for one [`BuildTarget`] from a token root directory.
#[derive(Debug)]
pub struct ThemeBuilder {
    target: BuildTarget,
    root: PathBuf,
    core: TokenTree,
    flat_core: TokenTree,
    components: TokenTree,
}

impl ThemeBuilder {
    /// Loads `core/`, `components/` and the platform component directories below `root`.
    pub fn new(target: BuildTarget, root: impl Into<PathBuf>) -> Result<Self, TokenError> {
        let root = root.into();

        info!("=== Loading core files ===");
        let mut core = load_token_dir(&root.join(CORE_DIR))?;
        if target.color_format == ColorFormat::Names {
            use_colour_names(&mut core)?;
        }
        let flat_core = flatten(&core)?;

        info!("=== Loading component files ===");
        let mut components = load_token_dir(&root.join(COMPONENTS_DIR))?;
        let platform_dirs = [
            (target.include_mobile_tokens, "mobile"),
            (target.include_desktop_tokens, "desktop"),
            (true, target.platform.as_str()),
        ];
        for (wanted, name) in platform_dirs {
            if !wanted {
                continue;
            }
            let dir = root.join(PLATFORM_COMPONENTS_DIR).join(name);
            if dir.is_dir() {
                deep_merge(&mut components, &load_token_dir(&dir)?);
            } else {
                info!("No platform component tokens for {}", name);
            }
        }

        Ok(ThemeBuilder {
            target,
            root,
            core,
            flat_core,
            components,
        })
    }

    pub fn target(&self) -> &BuildTarget {
        &self.target
    }

    pub fn build_theme(&self, theme: &ThemeFile) -> Result<BuiltTheme, TokenError> {
        info!(
            "Loading theme {} {} for platform {} using color format {:?}",
            theme.accent,
            theme.theme,
            self.target.platform.as_str(),
            self.target.color_format
        );
        let mut theme_data = TokenTree::new();
        for file in &theme.files {
            let loaded = match file.strip_suffix('/') {
                Some(dir) => load_token_dir(&self.root.join(dir))?,
                None => load_token_file(&self.root.join(file))?,
            };
            deep_merge(&mut theme_data, &loaded);
        }

        let strictness = self.target.strictness();
        let mut resolved_theme =
            ReferenceResolver::new(&theme_data, &self.core, &self.flat_core, strictness).resolve_tree(&theme_data)?;
        let flat_theme = flatten_with(&resolved_theme, StateSuffix::Marked)?;
        let mut resolved_components =
            ReferenceResolver::new(&self.components, &resolved_theme, &flat_theme, strictness)
                .resolve_tree(&self.components)?;

        fix_borders(&mut resolved_components, self.target.no_border_is_background_colour);
        remove_none_tokens(&mut resolved_theme);

        let mut tokens = if self.target.component_groups {
            self.finish_groups(&resolved_components)?
        } else {
            self.finish(&resolved_components)?
        };

        if !self.target.omit_theme_tokens {
            if self.target.component_groups {
                let groups = match resolved_theme.get(THEME_GROUP) {
                    Some(Value::Object(groups)) => self.finish_groups(groups)?,
                    _ => {
                        warn!("Theme {} {} has no '{}' group", theme.accent, theme.theme, THEME_GROUP);
                        TokenTree::new()
                    }
                };
                tokens.insert(THEME_GROUP.to_string(), Value::Object(groups));
            } else {
                let normalizer = UnitNormalizer::for_target(&self.target);
                deep_merge(&mut tokens, &normalizer.normalize_all(&flatten(&resolved_theme)?)?);
            }
        }

        Ok(BuiltTheme {
            theme: theme.clone(),
            name: self.output_name(theme),
            tokens,
        })
    }

    /// Flatten, normalize units and finalize states.
    fn finish(&self, tree: &TokenTree) -> Result<TokenTree, TokenError> {
        let flat = flatten_with(tree, StateSuffix::Marked)?;
        let normalized = UnitNormalizer::for_target(&self.target).normalize_all(&flat)?;
        StateFinalizer::for_target(&self.target).finalize(&normalized)
    }

    fn finish_groups(&self, groups: &TokenTree) -> Result<TokenTree, TokenError> {
        let mut finished = TokenTree::new();
        for (name, group) in groups {
            let Value::Object(group) = group else {
                return Err(TokenError::UnsupportedShape {
                    path: name.clone(),
                    message: format!("component groups must be objects, found {}", kind_of(group)),
                });
            };
            finished.insert(name.clone(), Value::Object(self.finish(group)?));
        }
        Ok(finished)
    }

    /// The output file name (without extension) for a theme.
    pub fn output_name(&self, theme: &ThemeFile) -> String {
        match self.target.file_format {
            FileFormat::Css => to_camel_case(&format!("{}{}", theme.theme, theme.accent)),
            FileFormat::Json if self.target.platform.is_desktop() => {
                let (accent, theme_name) = if theme.accent == "Webex" {
                    ("", default_for_light(&theme.theme))
                } else {
                    (theme.accent.as_str(), theme.theme.as_str())
                };
                to_camel_case(&format!("momentum{}{}", accent, theme_name))
            }
            FileFormat::Json => to_camel_case(&format!("{}{}", theme.accent, theme.theme)),
        }
    }

    /// Wraps tokens in the `{name, parent, tokens}` header desktop and mobile clients load.
    pub fn json_header(&self, theme: &ThemeFile, tokens: &TokenTree) -> Value {
        let accent_theme = format!("{}{}", theme.accent, theme.theme);
        if self.target.platform.is_desktop() {
            let mut name = accent_theme.clone();
            let mut parent = accent_theme;
            if matches!(theme.accent.as_str(), "Webex" | "Indigo" | "Rose") {
                parent = default_for_light(&theme.theme).to_string();
                if theme.accent == "Webex" {
                    name = parent.clone();
                }
            }
            json!({"name": format!("Momentum{}", name), "parent": parent, "tokens": tokens})
        } else {
            json!({
                "name": format!("Momentum{}", accent_theme),
                "parent": accent_theme,
                "tokens": tokens,
            })
        }
    }

    pub fn render(&self, built: &BuiltTheme) -> Result<String, TokenError> {
        match self.target.file_format {
            FileFormat::Json => self.render_json(built),
            FileFormat::Css => render_css(&built.name, &built.tokens),
        }
    }

    pub fn render_json(&self, built: &BuiltTheme) -> Result<String, TokenError> {
        let document = if self.target.include_json_header {
            self.json_header(&built.theme, &built.tokens)
        } else {
            Value::Object(built.tokens.clone())
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Renders and writes one theme into `out_dir`, returning the written path.
    pub fn write_theme(&self, built: &BuiltTheme, out_dir: &Path) -> Result<PathBuf, TokenError> {
        fs::ensure_dir_exists(out_dir)?;
        let extension = match self.target.file_format {
            FileFormat::Json => "json",
            FileFormat::Css => "css",
        };
        let path = out_dir.join(format!("{}.{}", built.name, extension));
        fs::write_string_to_file(&path, &self.render(built)?)?;
        info!("Written to {}", path.display());
        Ok(path)
    }

    /// Builds and writes every theme of the target. A CSS build also writes an
    /// `index.css` importing each theme.
    pub fn build_all(&self, out_dir: &Path) -> Result<Vec<PathBuf>, TokenError> {
        let mut written = Vec::with_capacity(self.target.themes.len() + 1);
        let mut imports = Vec::new();
        for theme_path in &self.target.themes {
            info!("=== Processing theme {} ===", theme_path.display());
            let theme = ThemeFile::load(&self.root, theme_path)?;
            let built = self.build_theme(&theme)?;
            imports.push(format!("@import '{}.css';", built.name));
            written.push(self.write_theme(&built, out_dir)?);
        }
        if self.target.file_format == FileFormat::Css {
            let index = out_dir.join(INDEX_CSS);
            fs::ensure_dir_exists(out_dir)?;
            fs::write_string_to_file(&index, &imports.join("\n"))?;
            written.push(index);
        }
        Ok(written)
    }
}

fn default_for_light(theme: &str) -> &str {
    if theme == "Light" {
        "Default"
    } else {
        theme
    }
}

/// `.md-theme-<name> {`, one `--key: value;` line per token, then `}`.
pub fn render_css(name: &str, tokens: &TokenTree) -> Result<String, TokenError> {
    let mut css = format!(".md-theme-{} {{\n", name);
    for (key, value) in tokens {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(TokenError::UnsupportedShape {
                    path: key.clone(),
                    message: format!("CSS custom properties cannot hold a {}", kind_of(other)),
                })
            }
        };
        css.push_str(&format!("  --{}: {};\n", key, text));
    }
    css.push_str("}\n");
    Ok(css)
}
