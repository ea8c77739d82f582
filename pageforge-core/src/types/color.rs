//! Color representation and manipulation utilities.
//!
//! This module provides the [`Color`] struct for representing RGBA colors and
//! [`ColorParseError`] for handling errors during color string parsing.
//!
//! Beyond parsing and formatting, `Color` carries the perceptual math the
//! theming layer depends on: sRGB relative luminance and the WCAG contrast
//! ratio between two colors.
//!
//! # Examples
//!
//! ```
//! use pageforge_core::types::Color;
//!
//! let red = Color::from_hex("#ff0000").unwrap();
//! assert_eq!(red.to_hex(), "#ff0000");
//!
//! let white = Color::WHITE;
//! let black = Color::BLACK;
//! assert!((white.contrast_ratio(&black) - 21.0).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Error type for color parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string is not a recognizable hex color.
    #[error("Invalid hex color string format: '{0}'. Expected #RGB, #RGBA, #RRGGBB, or #RRGGBBAA.")]
    InvalidHexFormat(String),

    /// A component contained a non-hexadecimal digit.
    #[error("Invalid hex digit in '{input_str}': {source}")]
    InvalidHexDigit {
        input_str: String,
        #[source]
        source: ParseIntError,
    },

    /// The string has an unsupported number of characters after the `#`.
    #[error("Invalid hex color string length: '{0}'. Expected 3, 4, 6, or 8 characters after '#'.")]
    InvalidHexLength(String),
}

/// Represents a color in RGBA format.
///
/// Components are stored as `f32` values in the range `[0.0, 1.0]`; values
/// outside the range are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component in `[0.0, 1.0]`.
    pub r: f32,
    /// Green component in `[0.0, 1.0]`.
    pub g: f32,
    /// Blue component in `[0.0, 1.0]`.
    pub b: f32,
    /// Alpha component in `[0.0, 1.0]`; `0.0` is fully transparent.
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Creates a new `Color`, clamping all components to `[0.0, 1.0]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a new opaque `Color` from components in `[0.0, 1.0]`.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::new(r, g, b, 1.0)
    }

    /// Creates a new opaque `Color` from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Creates a new `Color` from 8-bit RGBA components.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Parses a hex color string.
    ///
    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`, with or without the
    /// leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let s = hex.strip_prefix('#').unwrap_or(hex);
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHexFormat(hex.to_string()));
        }

        let parse_pair = |pair: &str| -> Result<u8, ColorParseError> {
            u8::from_str_radix(pair, 16).map_err(|e| ColorParseError::InvalidHexDigit {
                input_str: pair.to_string(),
                source: e,
            })
        };
        let expand = |c: char| -> String {
            let mut s = String::with_capacity(2);
            s.push(c);
            s.push(c);
            s
        };

        match s.len() {
            3 | 4 => {
                let chars: Vec<char> = s.chars().collect();
                let r = parse_pair(&expand(chars[0]))?;
                let g = parse_pair(&expand(chars[1]))?;
                let b = parse_pair(&expand(chars[2]))?;
                let a = if chars.len() == 4 {
                    parse_pair(&expand(chars[3]))?
                } else {
                    255
                };
                Ok(Color::from_rgba8(r, g, b, a))
            }
            6 | 8 => {
                let r = parse_pair(&s[0..2])?;
                let g = parse_pair(&s[2..4])?;
                let b = parse_pair(&s[4..6])?;
                let a = if s.len() == 8 { parse_pair(&s[6..8])? } else { 255 };
                Ok(Color::from_rgba8(r, g, b, a))
            }
            _ => Err(ColorParseError::InvalidHexLength(hex.to_string())),
        }
    }

    /// Formats the color as a lowercase `#rrggbb` string, discarding alpha.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }

    /// Formats the color as a lowercase `#rrggbbaa` string.
    pub fn to_hex_with_alpha(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8
        )
    }

    /// Returns a copy with the given alpha.
    pub fn with_alpha(&self, a: f32) -> Self {
        Color::new(self.r, self.g, self.b, a)
    }

    /// Computes the sRGB relative luminance of the color.
    ///
    /// Channels are gamma-corrected and weighted per the WCAG definition:
    /// `0.2126 R + 0.7152 G + 0.0722 B`. Returns a value in `[0.0, 1.0]`.
    pub fn relative_luminance(&self) -> f64 {
        fn channel(c: f32) -> f64 {
            let c = f64::from(c);
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// Computes the WCAG contrast ratio against another color.
    ///
    /// The result is in `[1.0, 21.0]`; 4.5 is the AA threshold for normal
    /// text, 3.0 for large text.
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let la = self.relative_luminance();
        let lb = other.relative_luminance();
        let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Whether the color reads as dark (relative luminance below 0.5).
    pub fn is_dark(&self) -> bool {
        self.relative_luminance() < 0.5
    }

    /// Lightens the color by blending it toward white.
    ///
    /// `factor` is clamped to `[0.0, 1.0]`; `0.0` is no change, `1.0` is white.
    pub fn lighten(&self, factor: f32) -> Self {
        self.interpolate(&Color::WHITE, factor.clamp(0.0, 1.0))
    }

    /// Darkens the color by blending it toward black.
    pub fn darken(&self, factor: f32) -> Self {
        self.interpolate(&Color::BLACK, factor.clamp(0.0, 1.0))
    }

    /// Linear interpolation between `self` and `other` at parameter `t`.
    pub fn interpolate(&self, other: &Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a < 1.0 {
            write!(f, "{}", self.to_hex_with_alpha())
        } else {
            write!(f, "{}", self.to_hex())
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}
