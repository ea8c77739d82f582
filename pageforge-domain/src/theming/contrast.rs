//! Contrast-aware color decisions over stored color strings.
//!
//! Stored theme data is untrusted: a "color" may be a 3- or 6-digit hex, a
//! CSS gradient, a full box-shadow declaration, or garbage. Everything here
//! degrades to a neutral default instead of erroring, so the editor never
//! crashes on bad stored data. Strict parsing lives in
//! [`pageforge_core::types::Color`]; this module wraps it leniently.

use once_cell::sync::Lazy;
use pageforge_core::types::Color;
use regex::Regex;

/// WCAG AA contrast threshold for normal text.
pub const CONTRAST_AA: f64 = 4.0;

static HEX_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("valid hex regex"));

static RGB_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rgba?\([^)]*\)").expect("valid rgb regex"));

/// sRGB relative luminance of a hex color string.
///
/// Malformed input yields `0.5`, treated as neither light nor dark so that
/// downstream branching stays stable.
pub fn relative_luminance(color: &str) -> f64 {
    match Color::from_hex(color.trim()) {
        Ok(c) => c.relative_luminance(),
        Err(_) => 0.5,
    }
}

/// WCAG contrast ratio between two color strings.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether a color string reads as dark.
pub fn is_dark(color: &str) -> bool {
    relative_luminance(color) < 0.5
}

/// Extracts the visually dominant color from a background value.
///
/// A two-stop hex linear-gradient yields the higher-luminance stop (the one
/// the eye reads as the backdrop). A solid 3- or 6-digit hex is normalized to
/// 6-digit lowercase. Anything else falls back to white.
pub fn dominant_color(background: &str) -> String {
    let trimmed = background.trim();
    if trimmed.starts_with("linear-gradient(") {
        let stops: Vec<&str> = HEX_TOKEN
            .find_iter(trimmed)
            .map(|m| m.as_str())
            .take(2)
            .collect();
        return match stops.as_slice() {
            [first, second] => {
                if relative_luminance(first) >= relative_luminance(second) {
                    normalize_hex(first)
                } else {
                    normalize_hex(second)
                }
            }
            [only] => normalize_hex(only),
            _ => "#ffffff".to_string(),
        };
    }
    match Color::from_hex(trimmed) {
        Ok(c) => c.to_hex(),
        Err(_) => "#ffffff".to_string(),
    }
}

/// Picks a legible text color for `background`.
///
/// Keeps `preferred` when its contrast against the dominant background color
/// meets [`CONTRAST_AA`]. Otherwise escalates: white over dark dominants,
/// black over light ones, each re-checked against the threshold and relaxed
/// to an off-pure shade when even the extreme fails (mid-gray dominants).
pub fn optimal_text_color(background: &str, preferred: &str) -> String {
    let dominant = dominant_color(background);
    if contrast_ratio(preferred, &dominant) >= CONTRAST_AA {
        return preferred.to_string();
    }
    let candidate = if is_dark(&dominant) {
        if contrast_ratio("#ffffff", &dominant) >= CONTRAST_AA {
            "#ffffff"
        } else {
            "#f0f0f0"
        }
    } else if contrast_ratio("#000000", &dominant) >= CONTRAST_AA {
        "#000000"
    } else {
        "#1a1a1a"
    };
    candidate.to_string()
}

/// Pulls the color component out of a full CSS box-shadow declaration.
///
/// Prefers an `rgb(a)(...)` token, then a hex token, else a translucent black
/// default. Shadow color is stored as a whole shadow string, never as a
/// standalone color, so this is the only way to recover it.
pub fn extract_color_from_shadow(shadow: &str) -> String {
    if let Some(m) = RGB_TOKEN.find(shadow) {
        return m.as_str().to_string();
    }
    if let Some(m) = HEX_TOKEN.find(shadow) {
        return m.as_str().to_lowercase();
    }
    "rgba(0, 0, 0, 0.1)".to_string()
}

fn normalize_hex(s: &str) -> String {
    match Color::from_hex(s) {
        Ok(c) => c.to_hex(),
        Err(_) => "#ffffff".to_string(),
    }
}
