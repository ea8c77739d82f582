//! Core value types shared across PageForge layers.

pub mod color;

pub use color::{Color, ColorParseError};
