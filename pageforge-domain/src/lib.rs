//! Domain logic for PageForge.
//!
//! This crate carries the theming engine behind the visual page builder:
//! reconciling layered token sources into resolved display values, computing
//! contrast-aware text colors, and coordinating debounced persistence of
//! theme edits through an injected [`theming::ThemeApi`].
//!
//! The crate builds on `pageforge-core` for color math, error plumbing and
//! logging setup, and exposes [`theming::ThemeEngine`] as its primary entry
//! point.

pub mod theming;
