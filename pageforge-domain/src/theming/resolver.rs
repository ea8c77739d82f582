//! Token source aggregation via explicit priority fallback chains.
//!
//! Every derived display value (page background, text colors, icon color,
//! widget shadow color) is produced by an ordered chain of named steps over
//! a [`StyleSources`] context, evaluated by one first-non-empty-wins
//! combinator. Earlier steps are authoritative overrides of later ones, so
//! a theme can ship sensible defaults while a user overrides at increasingly
//! specific granularity: theme column, JSON sub-field, live in-memory edit.
//!
//! All chains degrade to named constants; malformed stored data falls
//! through silently instead of erroring.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use super::contrast;
use super::types::{
    JsonColumn, OverrideMap, PageRecord, ShadowIntensity, ThemeRecord, TokenBundle, WidgetStyles,
};
use super::types::BorderEffect;

/// Default page backdrop when no source provides one.
pub const DEFAULT_PAGE_BACKGROUND: &str = "#ffffff";
/// Default widget surface when no source provides one.
pub const DEFAULT_WIDGET_BACKGROUND: &str = "#ffffff";
/// Default widget border color.
pub const DEFAULT_WIDGET_BORDER: &str = "#e2e8f0";
/// Placeholder canvas value seeded into fresh bundles; ignored by the page
/// background chain so it never masquerades as a real edit.
pub const PLACEHOLDER_CANVAS: &str = "#2563eb";
/// Glow color when the glow effect is on but no color is stored.
pub const DEFAULT_GLOW_COLOR: &str = "#ff00ff";
/// Flat shadow fallback for `none` intensity or unparseable shadow strings.
pub const DEFAULT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.1)";
/// Font used when neither the theme nor the page names one.
pub const DEFAULT_FONT: &str = "Inter";

/// The layered sources a chain may consult, in one borrowed context.
#[derive(Clone, Copy)]
pub struct StyleSources<'a> {
    /// The active theme record, when the page has one selected.
    pub theme: Option<&'a ThemeRecord>,
    /// The page record carrying page-level override scalars.
    pub page: Option<&'a PageRecord>,
    /// The live in-memory token bundle.
    pub bundle: &'a TokenBundle,
    /// Pending column-qualified edits not yet folded into the bundle.
    pub overrides: &'a OverrideMap,
}

/// Evaluates an ordered chain of `(label, step)` pairs.
///
/// The first step yielding a non-empty string wins; otherwise `fallback`.
/// Labels exist so precedence is inspectable in logs rather than buried in
/// nested branching.
fn first_non_empty(
    value_name: &str,
    steps: &[(&'static str, &dyn Fn() -> Option<String>)],
    fallback: &str,
) -> String {
    for (label, step) in steps {
        if let Some(value) = step().filter(|v| !v.trim().is_empty()) {
            debug!(value_name, source = label, %value, "resolved display value");
            return value;
        }
    }
    debug!(value_name, %fallback, "no source yielded a value, using fallback");
    fallback.to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// A scalar theme column, with a pending edit for that column winning over
/// the stored value.
fn theme_scalar(sources: &StyleSources<'_>, name: &str) -> Option<String> {
    non_empty(
        sources
            .overrides
            .get_str(name)
            .map(str::to_string)
            .or_else(|| sources.theme.and_then(|t| t.scalar(name)).map(str::to_string)),
    )
}

/// A page-level override scalar.
fn page_scalar(sources: &StyleSources<'_>, name: &str) -> Option<String> {
    sources
        .page
        .and_then(|p| p.scalar(name))
        .map(str::to_string)
}

/// A sub-field of a theme JSON column, with a pending edit at the
/// column-qualified path winning over the stored column.
fn theme_token(sources: &StyleSources<'_>, column: JsonColumn, path: &str) -> Option<String> {
    let qualified = format!("{}.{}", column.as_str(), path);
    if let Some(edited) = sources.overrides.get_str(&qualified) {
        return Some(edited.to_string());
    }
    let stored = sources.theme?.json_column_object(column)?;
    super::paths::resolve(&stored, path)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// A string out of the live token bundle.
fn bundle_str(sources: &StyleSources<'_>, path: &str) -> Option<String> {
    sources.bundle.get_str(path).map(str::to_string)
}

/// Resolves the page background.
pub fn page_background(sources: &StyleSources<'_>) -> String {
    first_non_empty(
        "page_background",
        &[
            ("theme.page_background", &|| {
                theme_scalar(sources, "page_background")
            }),
            ("page.page_background", &|| {
                page_scalar(sources, "page_background")
            }),
            ("color_tokens.gradient.page", &|| {
                theme_token(sources, JsonColumn::Color, "gradient.page")
            }),
            ("color_tokens.semantic.surface.canvas", &|| {
                theme_token(sources, JsonColumn::Color, "semantic.surface.canvas")
                    .or_else(|| theme_token(sources, JsonColumn::Color, "background.base"))
            }),
            ("bundle.semantic.surface.canvas", &|| {
                bundle_str(sources, "semantic.surface.canvas").filter(|v| v != PLACEHOLDER_CANVAS)
            }),
        ],
        DEFAULT_PAGE_BACKGROUND,
    )
}

/// Resolves the widget background.
pub fn widget_background(sources: &StyleSources<'_>) -> String {
    first_non_empty(
        "widget_background",
        &[
            ("theme.widget_background", &|| {
                theme_scalar(sources, "widget_background")
            }),
            ("color_tokens.background.surface", &|| {
                theme_token(sources, JsonColumn::Color, "background.surface")
            }),
            ("page.widget_background", &|| {
                page_scalar(sources, "widget_background")
            }),
            ("bundle.semantic.surface.base", &|| {
                bundle_str(sources, "semantic.surface.base")
            }),
        ],
        DEFAULT_WIDGET_BACKGROUND,
    )
}

/// Resolves the widget border color.
pub fn widget_border_color(sources: &StyleSources<'_>) -> String {
    first_non_empty(
        "widget_border_color",
        &[
            ("theme.widget_border_color", &|| {
                theme_scalar(sources, "widget_border_color")
            }),
            ("page.widget_border_color", &|| {
                page_scalar(sources, "widget_border_color")
            }),
        ],
        DEFAULT_WIDGET_BORDER,
    )
}

/// Resolves the page heading text color against `page_bg`.
pub fn heading_text_color(sources: &StyleSources<'_>, page_bg: &str) -> String {
    text_color(sources, page_bg, "color.heading", "text.primary", "heading_text_color")
}

/// Resolves the page body text color against `page_bg`.
pub fn body_text_color(sources: &StyleSources<'_>, page_bg: &str) -> String {
    text_color(sources, page_bg, "color.body", "text.secondary", "body_text_color")
}

fn text_color(
    sources: &StyleSources<'_>,
    page_bg: &str,
    typography_path: &str,
    color_token_path: &str,
    value_name: &str,
) -> String {
    first_non_empty(
        value_name,
        &[
            ("typography_tokens.color", &|| {
                theme_token(sources, JsonColumn::Typography, typography_path)
            }),
            ("optimal_vs_page_background", &|| {
                theme_token(sources, JsonColumn::Color, color_token_path)
                    .map(|preferred| contrast::optimal_text_color(page_bg, &preferred))
            }),
            ("color_tokens.text", &|| {
                theme_token(sources, JsonColumn::Color, color_token_path)
            }),
        ],
        &contrast::optimal_text_color(page_bg, "#000000"),
    )
}

/// Resolves the widget heading text color, falling back to the page heading
/// color.
pub fn widget_heading_text_color(sources: &StyleSources<'_>, page_heading: &str) -> String {
    first_non_empty(
        "widget_heading_text_color",
        &[("typography_tokens.color.widget_heading", &|| {
            theme_token(sources, JsonColumn::Typography, "color.widget_heading")
        })],
        page_heading,
    )
}

/// Resolves the widget body text color, falling back to the page body color.
pub fn widget_body_text_color(sources: &StyleSources<'_>, page_body: &str) -> String {
    first_non_empty(
        "widget_body_text_color",
        &[("typography_tokens.color.widget_body", &|| {
            theme_token(sources, JsonColumn::Typography, "color.widget_body")
        })],
        page_body,
    )
}

/// Resolves the social icon color against `page_bg`.
pub fn social_icon_color(sources: &StyleSources<'_>, page_bg: &str) -> String {
    first_non_empty(
        "social_icon_color",
        &[
            ("iconography_tokens.color", &|| {
                theme_token(sources, JsonColumn::Iconography, "color")
            }),
            ("optimal_vs_page_background", &|| {
                theme_token(sources, JsonColumn::Color, "accent.primary")
                    .map(|accent| contrast::optimal_text_color(page_bg, &accent))
            }),
            ("color_tokens.accent.primary", &|| {
                theme_token(sources, JsonColumn::Color, "accent.primary")
            }),
        ],
        &contrast::optimal_text_color(page_bg, "#ffffff"),
    )
}

/// Resolves the effective widget styles.
///
/// A pending `widget_styles` edit wins over the page-level override, which
/// wins over the stored theme column.
pub fn widget_styles(sources: &StyleSources<'_>) -> WidgetStyles {
    if let Some(edited) = sources.overrides.get("widget_styles") {
        let parsed = WidgetStyles::from_value(edited);
        if parsed != WidgetStyles::default() || edited.is_object() {
            return parsed;
        }
    }
    if let Some(page) = sources.page {
        if page.widget_styles.is_object() {
            return WidgetStyles::from_value(&page.widget_styles);
        }
    }
    match sources.theme {
        Some(theme) => WidgetStyles::from_value(&theme.widget_styles),
        None => WidgetStyles::default(),
    }
}

/// Resolves the widget shadow or glow color.
///
/// Branches on the border effect: glow uses the stored glow color (magenta
/// fallback); shadow picks a shadow token level from the stored intensity
/// and extracts the color out of the full CSS shadow declaration.
pub fn widget_shadow_color(sources: &StyleSources<'_>) -> String {
    let styles = widget_styles(sources);
    match styles.border_effect {
        BorderEffect::Glow => {
            let color = non_empty(styles.glow_color)
                .unwrap_or_else(|| DEFAULT_GLOW_COLOR.to_string());
            debug!(value_name = "widget_shadow_color", effect = "glow", %color, "resolved display value");
            color
        }
        BorderEffect::Shadow => {
            let level = match styles.border_shadow_intensity {
                ShadowIntensity::None => {
                    debug!(
                        value_name = "widget_shadow_color",
                        effect = "shadow",
                        intensity = "none",
                        "using flat shadow fallback"
                    );
                    return DEFAULT_SHADOW_COLOR.to_string();
                }
                ShadowIntensity::Subtle => "shadow.level_1",
                ShadowIntensity::Pronounced => "shadow.level_2",
            };
            let declaration =
                theme_token(sources, JsonColumn::Shape, level).unwrap_or_default();
            let color = contrast::extract_color_from_shadow(&declaration);
            debug!(value_name = "widget_shadow_color", effect = "shadow", token = level, %color, "resolved display value");
            color
        }
    }
}

fn font(sources: &StyleSources<'_>, name: &'static str) -> String {
    first_non_empty(
        name,
        &[
            ("theme.font_column", &|| theme_scalar(sources, name)),
            ("page.font_override", &|| page_scalar(sources, name)),
        ],
        DEFAULT_FONT,
    )
}

/// Every derived display value for the page, resolved in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPageStyle {
    pub page_background: String,
    pub widget_background: String,
    pub widget_border_color: String,
    pub heading_text_color: String,
    pub body_text_color: String,
    pub widget_heading_text_color: String,
    pub widget_body_text_color: String,
    pub social_icon_color: String,
    pub widget_shadow_color: String,
    pub page_primary_font: String,
    pub page_secondary_font: String,
    pub widget_primary_font: String,
    pub widget_secondary_font: String,
}

impl ResolvedPageStyle {
    /// Renders the style as the `--`-prefixed CSS custom-property map the
    /// presentation layer consumes.
    pub fn to_css_variable_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("--page-background".to_string(), self.page_background.clone());
        map.insert(
            "--widget-background".to_string(),
            self.widget_background.clone(),
        );
        map.insert(
            "--widget-border-color".to_string(),
            self.widget_border_color.clone(),
        );
        map.insert(
            "--heading-text-color".to_string(),
            self.heading_text_color.clone(),
        );
        map.insert("--body-text-color".to_string(), self.body_text_color.clone());
        map.insert(
            "--widget-heading-text-color".to_string(),
            self.widget_heading_text_color.clone(),
        );
        map.insert(
            "--widget-body-text-color".to_string(),
            self.widget_body_text_color.clone(),
        );
        map.insert(
            "--social-icon-color".to_string(),
            self.social_icon_color.clone(),
        );
        map.insert(
            "--widget-shadow-color".to_string(),
            self.widget_shadow_color.clone(),
        );
        map.insert(
            "--page-primary-font".to_string(),
            self.page_primary_font.clone(),
        );
        map.insert(
            "--page-secondary-font".to_string(),
            self.page_secondary_font.clone(),
        );
        map.insert(
            "--widget-primary-font".to_string(),
            self.widget_primary_font.clone(),
        );
        map.insert(
            "--widget-secondary-font".to_string(),
            self.widget_secondary_font.clone(),
        );
        map
    }
}

/// Runs every chain over the sources and assembles the resolved style.
pub fn resolve_page_style(sources: &StyleSources<'_>) -> ResolvedPageStyle {
    let page_bg = page_background(sources);
    let heading = heading_text_color(sources, &page_bg);
    let body = body_text_color(sources, &page_bg);
    ResolvedPageStyle {
        widget_background: widget_background(sources),
        widget_border_color: widget_border_color(sources),
        widget_heading_text_color: widget_heading_text_color(sources, &heading),
        widget_body_text_color: widget_body_text_color(sources, &body),
        social_icon_color: social_icon_color(sources, &page_bg),
        widget_shadow_color: widget_shadow_color(sources),
        page_primary_font: font(sources, "page_primary_font"),
        page_secondary_font: font(sources, "page_secondary_font"),
        widget_primary_font: font(sources, "widget_primary_font"),
        widget_secondary_font: font(sources, "widget_secondary_font"),
        heading_text_color: heading,
        body_text_color: body,
        page_background: page_bg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn blank_theme() -> ThemeRecord {
        ThemeRecord {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            user_id: Some(Uuid::new_v4()),
            color_tokens: Value::Null,
            typography_tokens: Value::Null,
            spacing_tokens: Value::Null,
            shape_tokens: Value::Null,
            motion_tokens: Value::Null,
            iconography_tokens: Value::Null,
            widget_styles: Value::Null,
            page_background: None,
            widget_background: None,
            widget_border_color: None,
            page_primary_font: None,
            page_secondary_font: None,
            widget_primary_font: None,
            widget_secondary_font: None,
            spatial_effect: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn blank_page() -> PageRecord {
        PageRecord {
            id: Uuid::new_v4(),
            theme_id: None,
            page_background: None,
            widget_background: None,
            widget_border_color: None,
            page_primary_font: None,
            page_secondary_font: None,
            widget_primary_font: None,
            widget_secondary_font: None,
            widget_styles: Value::Null,
            spatial_effect: None,
        }
    }

    struct Fixture {
        theme: ThemeRecord,
        page: PageRecord,
        bundle: TokenBundle,
        overrides: OverrideMap,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                theme: blank_theme(),
                page: blank_page(),
                bundle: TokenBundle::new(),
                overrides: OverrideMap::new(),
            }
        }

        fn sources(&self) -> StyleSources<'_> {
            StyleSources {
                theme: Some(&self.theme),
                page: Some(&self.page),
                bundle: &self.bundle,
                overrides: &self.overrides,
            }
        }
    }

    #[test]
    fn page_background_theme_column_wins_over_everything() {
        let mut fx = Fixture::new();
        fx.theme.page_background = Some("#0f172a".to_string());
        fx.page.page_background = Some("#ff0000".to_string());
        fx.theme.color_tokens = json!({"gradient": {"page": "linear-gradient(#000, #fff)"}});
        assert_eq!(page_background(&fx.sources()), "#0f172a");
    }

    #[test]
    fn page_background_falls_through_to_gradient_token() {
        let mut fx = Fixture::new();
        fx.theme.color_tokens =
            json!({"gradient": {"page": "linear-gradient(180deg, #111111, #222222)"}});
        assert_eq!(
            page_background(&fx.sources()),
            "linear-gradient(180deg, #111111, #222222)"
        );
    }

    #[test]
    fn page_background_ignores_placeholder_canvas() {
        let mut fx = Fixture::new();
        fx.bundle = fx
            .bundle
            .with_value("semantic.surface.canvas", json!(PLACEHOLDER_CANVAS));
        assert_eq!(page_background(&fx.sources()), DEFAULT_PAGE_BACKGROUND);

        fx.bundle = fx
            .bundle
            .with_value("semantic.surface.canvas", json!("#123456"));
        assert_eq!(page_background(&fx.sources()), "#123456");
    }

    #[test]
    fn pending_edit_wins_over_stored_column_value() {
        let mut fx = Fixture::new();
        fx.theme.page_background = Some("#0f172a".to_string());
        fx.overrides.set("page_background", json!("#fafafa"));
        assert_eq!(page_background(&fx.sources()), "#fafafa");
    }

    #[test]
    fn pending_edit_wins_over_stored_token_sub_field() {
        let mut fx = Fixture::new();
        fx.theme.color_tokens = json!({"gradient": {"page": "#111111"}});
        fx.overrides
            .set("color_tokens.gradient.page", json!("#999999"));
        assert_eq!(page_background(&fx.sources()), "#999999");
    }

    #[test]
    fn widget_background_defaults_to_white() {
        let fx = Fixture::new();
        assert_eq!(widget_background(&fx.sources()), "#ffffff");
    }

    #[test]
    fn widget_background_prefers_surface_token_over_page_override() {
        let mut fx = Fixture::new();
        fx.theme.color_tokens = json!({"background": {"surface": "#f1f5f9"}});
        fx.page.widget_background = Some("#333333".to_string());
        assert_eq!(widget_background(&fx.sources()), "#f1f5f9");
    }

    #[test]
    fn widget_border_defaults() {
        let fx = Fixture::new();
        assert_eq!(widget_border_color(&fx.sources()), DEFAULT_WIDGET_BORDER);

        let mut fx = Fixture::new();
        fx.page.widget_border_color = Some("#cccccc".to_string());
        assert_eq!(widget_border_color(&fx.sources()), "#cccccc");
    }

    #[test]
    fn heading_color_prefers_explicit_typography_token() {
        let mut fx = Fixture::new();
        fx.theme.typography_tokens = json!({"color": {"heading": "#222244"}});
        assert_eq!(heading_text_color(&fx.sources(), "#ffffff"), "#222244");
    }

    #[test]
    fn heading_color_escalates_low_contrast_preferred() {
        let mut fx = Fixture::new();
        fx.theme.page_background = Some("#000000".to_string());
        fx.theme.color_tokens = json!({"text": {"primary": "#333333"}});
        let sources = fx.sources();
        let bg = page_background(&sources);
        assert_eq!(heading_text_color(&sources, &bg), "#ffffff");
    }

    #[test]
    fn heading_color_keeps_legible_preferred() {
        let mut fx = Fixture::new();
        fx.theme.page_background = Some("#ffffff".to_string());
        fx.theme.color_tokens = json!({"text": {"primary": "#111827"}});
        let sources = fx.sources();
        let bg = page_background(&sources);
        assert_eq!(heading_text_color(&sources, &bg), "#111827");
    }

    #[test]
    fn widget_text_falls_back_to_page_colors() {
        let mut fx = Fixture::new();
        fx.theme.typography_tokens = json!({"color": {"widget_heading": "#445566"}});
        let sources = fx.sources();
        assert_eq!(
            widget_heading_text_color(&sources, "#000001"),
            "#445566"
        );
        assert_eq!(widget_body_text_color(&sources, "#000002"), "#000002");
    }

    #[test]
    fn social_icon_color_prefers_iconography_then_accent() {
        let mut fx = Fixture::new();
        fx.theme.iconography_tokens = json!({"color": "#ff8800"});
        fx.theme.color_tokens = json!({"accent": {"primary": "#2563eb"}});
        assert_eq!(social_icon_color(&fx.sources(), "#ffffff"), "#ff8800");

        fx.theme.iconography_tokens = Value::Null;
        // #2563eb against white clears 4.0, so the accent survives.
        assert_eq!(social_icon_color(&fx.sources(), "#ffffff"), "#2563eb");
    }

    #[test]
    fn shadow_color_glow_branch() {
        let mut fx = Fixture::new();
        fx.theme.widget_styles = json!({"border_effect": "glow", "glow_color": "#00ffcc"});
        assert_eq!(widget_shadow_color(&fx.sources()), "#00ffcc");

        fx.theme.widget_styles = json!({"border_effect": "glow"});
        assert_eq!(widget_shadow_color(&fx.sources()), DEFAULT_GLOW_COLOR);
    }

    #[test]
    fn shadow_color_intensity_selects_token_level() {
        let mut fx = Fixture::new();
        fx.theme.shape_tokens = json!({
            "shadow": {
                "level_1": "0 1px 2px rgba(15, 23, 42, 0.08)",
                "level_2": "0 8px 24px rgba(15, 23, 42, 0.25)"
            }
        });
        fx.theme.widget_styles =
            json!({"border_effect": "shadow", "border_shadow_intensity": "subtle"});
        assert_eq!(
            widget_shadow_color(&fx.sources()),
            "rgba(15, 23, 42, 0.08)"
        );

        fx.theme.widget_styles =
            json!({"border_effect": "shadow", "border_shadow_intensity": "pronounced"});
        assert_eq!(
            widget_shadow_color(&fx.sources()),
            "rgba(15, 23, 42, 0.25)"
        );

        fx.theme.widget_styles =
            json!({"border_effect": "shadow", "border_shadow_intensity": "none"});
        assert_eq!(widget_shadow_color(&fx.sources()), DEFAULT_SHADOW_COLOR);
    }

    #[test]
    fn shadow_color_survives_malformed_widget_styles() {
        let mut fx = Fixture::new();
        fx.theme.widget_styles = json!("definitely not styles");
        fx.theme.shape_tokens = Value::Null;
        // Defaults: shadow effect, subtle intensity, missing token.
        assert_eq!(widget_shadow_color(&fx.sources()), DEFAULT_SHADOW_COLOR);
    }

    #[test]
    fn fonts_resolve_theme_then_page_then_default() {
        let mut fx = Fixture::new();
        fx.theme.page_primary_font = Some("Playfair Display".to_string());
        fx.page.page_secondary_font = Some("Lora".to_string());
        let style = resolve_page_style(&fx.sources());
        assert_eq!(style.page_primary_font, "Playfair Display");
        assert_eq!(style.page_secondary_font, "Lora");
        assert_eq!(style.widget_primary_font, DEFAULT_FONT);
    }

    #[test]
    fn malformed_columns_fall_through_without_error() {
        let mut fx = Fixture::new();
        fx.theme.color_tokens = json!("{{{ not json");
        fx.theme.typography_tokens = json!([1, 2, 3]);
        let style = resolve_page_style(&fx.sources());
        assert_eq!(style.widget_background, DEFAULT_WIDGET_BACKGROUND);
        assert_eq!(style.widget_border_color, DEFAULT_WIDGET_BORDER);
    }

    #[test]
    fn css_variable_map_covers_every_value() {
        let fx = Fixture::new();
        let style = resolve_page_style(&fx.sources());
        let map = style.to_css_variable_map();
        assert_eq!(map.len(), 13);
        assert_eq!(
            map.get("--widget-background"),
            Some(&style.widget_background)
        );
        assert!(map.keys().all(|k| k.starts_with("--")));
    }

    #[test]
    fn resolves_with_no_theme_and_no_page() {
        let bundle = TokenBundle::new();
        let overrides = OverrideMap::new();
        let sources = StyleSources {
            theme: None,
            page: None,
            bundle: &bundle,
            overrides: &overrides,
        };
        let style = resolve_page_style(&sources);
        assert_eq!(style.page_background, DEFAULT_PAGE_BACKGROUND);
        assert_eq!(style.heading_text_color, "#000000");
    }
}
