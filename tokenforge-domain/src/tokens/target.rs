//! Build targets: which platform a build is for and how its output is shaped.
//!
//! A [`BuildTarget`] is read from a JSON target file (camelCase keys) and threaded by
//! reference into every stage that depends on it. Every field has a default, so a
//! target file only needs to name what differs from a web build.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use tokenforge_core::utils::fs;

use super::errors::TokenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    #[default]
    Web,
    Ios,
    Android,
    Macos,
    Qt,
    WinHc,
}

impl Platform {
    /// Desktop clients have no `active` state and use `momentum`-prefixed theme names.
    pub fn is_desktop(&self) -> bool {
        matches!(self, Platform::Macos | Platform::Qt | Platform::WinHc)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Macos => "macos",
            Platform::Qt => "qt",
            Platform::WinHc => "win-hc",
        }
    }
}

/// How colour literals are written in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `rgba(244, 233, 20, 0.8)`
    #[default]
    Rgba,
    /// `#RRGGBB` or `#RRGGBBAA`
    Hex,
    /// `{"r": 244, "g": 233, "b": 20, "a": 0.8}`
    Object,
    /// Symbolic core colour names, e.g. `red-05`.
    Names,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    #[default]
    Px,
    /// Pixels × 0.75.
    Pt,
    /// Pixels ÷ 16.
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Json,
    Css,
}

/// How UI states appear in finalized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRepresentation {
    /// `{"button-bg": {"normal": .., "hovered": ..}}`
    Object,
    /// `{"button-bg": .., "button-bg-hovered": ..}`
    Suffix,
}

/// What happens when a reference cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Abort with [`TokenError::UnresolvedReference`].
    Strict,
    /// Log a warning and keep the literal reference string.
    Lenient,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildTarget {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub color_format: ColorFormat,
    #[serde(default)]
    pub size_unit: SizeUnit,
    /// Emit one finalized map per top-level component instead of a single map.
    #[serde(default)]
    pub component_groups: bool,
    #[serde(default)]
    pub file_format: FileFormat,
    /// Wrap JSON output in `{name, parent, tokens}`.
    #[serde(default)]
    pub include_json_header: bool,
    #[serde(default)]
    pub include_mobile_tokens: bool,
    #[serde(default)]
    pub include_desktop_tokens: bool,
    #[serde(default = "default_true")]
    pub ui_states_as_object: bool,
    #[serde(default)]
    pub omit_theme_tokens: bool,
    /// A `none` border takes the background colour instead of becoming `border-style: none`.
    #[serde(default = "default_true")]
    pub no_border_is_background_colour: bool,
    #[serde(default)]
    pub ignore_alpha: bool,
    #[serde(default)]
    pub strict_references: bool,
    /// Theme files to build, relative to the token root.
    #[serde(default)]
    pub themes: Vec<PathBuf>,
}

impl Default for BuildTarget {
    fn default() -> Self {
        BuildTarget {
            platform: Platform::default(),
            color_format: ColorFormat::default(),
            size_unit: SizeUnit::default(),
            component_groups: false,
            file_format: FileFormat::default(),
            include_json_header: false,
            include_mobile_tokens: false,
            include_desktop_tokens: false,
            ui_states_as_object: true,
            omit_theme_tokens: false,
            no_border_is_background_colour: true,
            ignore_alpha: false,
            strict_references: false,
            themes: Vec::new(),
        }
    }
}

impl BuildTarget {
    /// Parses a target document. Unknown keys and enum tags are configuration errors.
    pub fn from_json_str(content: &str) -> Result<Self, TokenError> {
        serde_json::from_str(content)
            .map_err(|e| TokenError::Configuration(format!("Invalid build target: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, TokenError> {
        info!("Loading target {:?}", path);
        let content = fs::read_to_string(path)?;
        let target = Self::from_json_str(&content)?;
        info!(
            platform = target.platform.as_str(),
            color_format = ?target.color_format,
            size_unit = ?target.size_unit,
            component_groups = target.component_groups,
            file_format = ?target.file_format,
            "Build target loaded"
        );
        Ok(target)
    }

    /// CSS custom properties cannot hold objects, so CSS output always uses suffixes.
    pub fn state_representation(&self) -> StateRepresentation {
        if self.file_format == FileFormat::Css || !self.ui_states_as_object {
            StateRepresentation::Suffix
        } else {
            StateRepresentation::Object
        }
    }

    pub fn strictness(&self) -> Strictness {
        if self.strict_references {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }
}
