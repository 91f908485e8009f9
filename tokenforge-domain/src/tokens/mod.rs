// Design token engine

pub mod adjust;
pub mod build;
pub mod errors;
pub mod flatten;
pub mod key_path;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod sort;
pub mod states;
pub mod target;
pub mod tree;
pub mod types;
pub mod units;
pub mod update;

// Re-exports
pub use build::{BuiltTheme, ThemeBuilder, ThemeFile};
pub use errors::TokenError;
pub use flatten::{flatten, flatten_with, unflatten, StateSuffix};
pub use key_path::find_key;
pub use model::{ColorToken, GradientToken, Mergeable, Normalizable, SolidToken, Token, TokenKind};
pub use resolve::ReferenceResolver;
pub use sort::{sort_value, to_sorted_json};
pub use states::StateFinalizer;
pub use target::{BuildTarget, ColorFormat, FileFormat, Platform, SizeUnit, StateRepresentation, Strictness};
pub use types::{TokenCategory, TokenFormat, TokenTree, UiState};
pub use units::UnitNormalizer;
