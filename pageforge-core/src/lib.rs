//! Core infrastructure for PageForge.
//!
//! This crate provides the foundational pieces shared by the higher layers:
//!
//! - [`types::Color`]: an RGBA color with hex parsing, WCAG relative luminance
//!   and contrast-ratio math.
//! - [`error::CoreError`]: the infrastructure error type.
//! - [`logging`]: tracing-subscriber bootstrap.
//!
//! Domain logic (token resolution, persistence coordination) lives in
//! `pageforge-domain` and builds on top of these primitives.

pub mod error;
pub mod logging;
pub mod types;

pub use error::CoreError;
pub use types::{Color, ColorParseError};
