//! Core data types shared across Tokenforge crates.
//!
//! - [`color`]: The parsed [`Color`] value and its [`ColorParseError`].

pub mod color;

pub use color::{Color, ColorParseError};
