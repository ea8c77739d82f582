//! Data shapes for the theming engine.
//!
//! Persisted records mirror the backing store's columns: each theme row
//! carries seven JSON columns and a handful of flat scalar columns. JSON
//! columns are untrusted; they are kept as raw [`serde_json::Value`]s and
//! only ever read through [`ThemeRecord::json_column_object`], which treats
//! anything that is not a JSON object as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::paths;

/// The live, in-memory token tree used for rendering.
///
/// Holds the `semantic.*` and `core.*` namespaces, read and written only
/// through dot-paths. Replaced wholesale when the active theme changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenBundle(Value);

impl Default for TokenBundle {
    fn default() -> Self {
        TokenBundle::new()
    }
}

impl TokenBundle {
    /// Creates an empty bundle (an empty JSON object root).
    pub fn new() -> Self {
        TokenBundle(Value::Object(serde_json::Map::new()))
    }

    /// Wraps a raw value, degrading anything that is not an object to empty.
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            TokenBundle(value)
        } else {
            TokenBundle::new()
        }
    }

    /// Builds a bundle from a theme record's JSON columns.
    ///
    /// The `semantic` subtree comes from `color_tokens`, while
    /// `core.typography` and `core.iconography` come from their respective
    /// columns. Used on theme switch to replace the live bundle wholesale.
    pub fn from_theme(theme: &ThemeRecord) -> Self {
        let mut root = Value::Object(serde_json::Map::new());
        if let Some(color) = theme.json_column_object(JsonColumn::Color) {
            if let Some(semantic) = paths::resolve(&color, "semantic") {
                root = paths::update(&root, "semantic", semantic.clone());
            }
        }
        if let Some(typography) = theme.json_column_object(JsonColumn::Typography) {
            root = paths::update(&root, "core.typography", typography);
        }
        if let Some(iconography) = theme.json_column_object(JsonColumn::Iconography) {
            root = paths::update(&root, "core.iconography", iconography);
        }
        TokenBundle(root)
    }

    /// Resolves a dot-path inside the bundle.
    pub fn get(&self, path: &str) -> Option<&Value> {
        paths::resolve(&self.0, path)
    }

    /// Resolves a dot-path to a non-empty string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Returns a new bundle with `path` set to `value`.
    pub fn with_value(&self, path: &str, value: Value) -> Self {
        TokenBundle(paths::update(&self.0, path, value))
    }

    /// The raw JSON root.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Identifies one of a theme record's JSON columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonColumn {
    Color,
    Typography,
    Spacing,
    Shape,
    Motion,
    Iconography,
    WidgetStyles,
}

impl JsonColumn {
    /// All JSON columns, in payload order.
    pub const ALL: [JsonColumn; 7] = [
        JsonColumn::Color,
        JsonColumn::Typography,
        JsonColumn::Spacing,
        JsonColumn::Shape,
        JsonColumn::Motion,
        JsonColumn::Iconography,
        JsonColumn::WidgetStyles,
    ];

    /// The column name as it appears in payloads and override paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonColumn::Color => "color_tokens",
            JsonColumn::Typography => "typography_tokens",
            JsonColumn::Spacing => "spacing_tokens",
            JsonColumn::Shape => "shape_tokens",
            JsonColumn::Motion => "motion_tokens",
            JsonColumn::Iconography => "iconography_tokens",
            JsonColumn::WidgetStyles => "widget_styles",
        }
    }
}

/// A persisted theme row.
///
/// `user_id == None` marks a shared system theme, immutable by convention;
/// edits to one fork a user-owned clone instead of updating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(default)]
    pub color_tokens: Value,
    #[serde(default)]
    pub typography_tokens: Value,
    #[serde(default)]
    pub spacing_tokens: Value,
    #[serde(default)]
    pub shape_tokens: Value,
    #[serde(default)]
    pub motion_tokens: Value,
    #[serde(default)]
    pub iconography_tokens: Value,
    #[serde(default)]
    pub widget_styles: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_secondary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_secondary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_effect: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ThemeRecord {
    /// Whether this is a shared system theme (not owned by any user).
    pub fn is_system(&self) -> bool {
        self.user_id.is_none()
    }

    /// The raw value stored in a JSON column.
    pub fn json_column(&self, column: JsonColumn) -> &Value {
        match column {
            JsonColumn::Color => &self.color_tokens,
            JsonColumn::Typography => &self.typography_tokens,
            JsonColumn::Spacing => &self.spacing_tokens,
            JsonColumn::Shape => &self.shape_tokens,
            JsonColumn::Motion => &self.motion_tokens,
            JsonColumn::Iconography => &self.iconography_tokens,
            JsonColumn::WidgetStyles => &self.widget_styles,
        }
    }

    /// Reads a JSON column leniently.
    ///
    /// Returns the column as an object when it is one, parses it when it is
    /// a string holding a JSON object, and treats everything else (null,
    /// arrays, numbers, unparseable strings) as absent.
    pub fn json_column_object(&self, column: JsonColumn) -> Option<Value> {
        lenient_object(self.json_column(column))
    }

    /// The value a scalar style column holds, if non-empty.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        let value = match name {
            "page_background" => &self.page_background,
            "widget_background" => &self.widget_background,
            "widget_border_color" => &self.widget_border_color,
            "page_primary_font" => &self.page_primary_font,
            "page_secondary_font" => &self.page_secondary_font,
            "widget_primary_font" => &self.widget_primary_font,
            "widget_secondary_font" => &self.widget_secondary_font,
            "spatial_effect" => &self.spatial_effect,
            _ => &None,
        };
        value.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Lenient object extraction shared by theme columns and snapshots.
pub(crate) fn lenient_object(value: &Value) -> Option<Value> {
    match value {
        Value::Object(_) => Some(value.clone()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed @ Value::Object(_)) => Some(parsed),
            _ => None,
        },
        _ => None,
    }
}

/// Pending edits keyed by dot-path, the single source of truth at save time.
///
/// Paths are column-qualified (`"spacing_tokens.density"`) for JSON
/// sub-fields, or bare column names (`"page_background"`) for scalars.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideMap {
    entries: BTreeMap<String, Value>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    /// Resolves a path to a non-empty string value.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn set(&mut self, path: impl Into<String>, value: Value) {
        self.entries.insert(path.into(), value);
    }

    pub fn remove(&mut self, path: &str) -> Option<Value> {
        self.entries.remove(path)
    }

    /// A point-in-time copy of the pending edits, for payload assembly.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.entries.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

/// The page being edited.
///
/// Page-level override scalars shadow the active theme's values until a
/// theme save succeeds, at which point they are cleared so the theme's own
/// values show through again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_secondary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_secondary_font: Option<String>,
    #[serde(default)]
    pub widget_styles: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_effect: Option<String>,
}

impl PageRecord {
    /// The value a page-level override scalar holds, if non-empty.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        let value = match name {
            "page_background" => &self.page_background,
            "widget_background" => &self.widget_background,
            "widget_border_color" => &self.widget_border_color,
            "page_primary_font" => &self.page_primary_font,
            "page_secondary_font" => &self.page_secondary_font,
            "widget_primary_font" => &self.widget_primary_font,
            "widget_secondary_font" => &self.widget_secondary_font,
            "spatial_effect" => &self.spatial_effect,
            _ => &None,
        };
        value.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Clears every page-level style override, leaving `theme_id` alone.
    pub fn clear_style_overrides(&mut self) {
        self.page_background = None;
        self.widget_background = None;
        self.widget_border_color = None;
        self.page_primary_font = None;
        self.page_secondary_font = None;
        self.widget_primary_font = None;
        self.widget_secondary_font = None;
        self.widget_styles = Value::Null;
        self.spatial_effect = None;
    }
}

/// How a widget's border is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderEffect {
    #[default]
    Shadow,
    Glow,
}

/// Strength of the widget shadow, mapped to a shadow token level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShadowIntensity {
    None,
    #[default]
    Subtle,
    Pronounced,
}

/// Typed view of the `widget_styles` column.
///
/// Deserialized leniently: absent or unrecognizable data falls back to the
/// defaults rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WidgetStyles {
    pub border_effect: BorderEffect,
    pub border_shadow_intensity: ShadowIntensity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_glow_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl WidgetStyles {
    /// Parses a stored `widget_styles` value, defaulting on any failure.
    pub fn from_value(value: &Value) -> Self {
        lenient_object(value)
            .and_then(|obj| serde_json::from_value(obj).ok())
            .unwrap_or_default()
    }
}

/// Outgoing save shape, mirroring a theme row's JSON and scalar columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ThemePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub color_tokens: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub typography_tokens: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub spacing_tokens: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub shape_tokens: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub motion_tokens: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub iconography_tokens: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub widget_styles: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_secondary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_secondary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_effect: Option<String>,
}

impl ThemePayload {
    /// Mutable access to a JSON column slot by identifier.
    pub fn json_column_mut(&mut self, column: JsonColumn) -> &mut Value {
        match column {
            JsonColumn::Color => &mut self.color_tokens,
            JsonColumn::Typography => &mut self.typography_tokens,
            JsonColumn::Spacing => &mut self.spacing_tokens,
            JsonColumn::Shape => &mut self.shape_tokens,
            JsonColumn::Motion => &mut self.motion_tokens,
            JsonColumn::Iconography => &mut self.iconography_tokens,
            JsonColumn::WidgetStyles => &mut self.widget_styles,
        }
    }

    /// Read access to a JSON column slot by identifier.
    pub fn json_column(&self, column: JsonColumn) -> &Value {
        match column {
            JsonColumn::Color => &self.color_tokens,
            JsonColumn::Typography => &self.typography_tokens,
            JsonColumn::Spacing => &self.spacing_tokens,
            JsonColumn::Shape => &self.shape_tokens,
            JsonColumn::Motion => &self.motion_tokens,
            JsonColumn::Iconography => &self.iconography_tokens,
            JsonColumn::WidgetStyles => &self.widget_styles,
        }
    }

    /// Sets a scalar column slot by name; unknown names are ignored.
    pub fn set_scalar(&mut self, name: &str, value: String) {
        let slot = match name {
            "page_background" => &mut self.page_background,
            "widget_background" => &mut self.widget_background,
            "widget_border_color" => &mut self.widget_border_color,
            "page_primary_font" => &mut self.page_primary_font,
            "page_secondary_font" => &mut self.page_secondary_font,
            "widget_primary_font" => &mut self.widget_primary_font,
            "widget_secondary_font" => &mut self.widget_secondary_font,
            "spatial_effect" => &mut self.spatial_effect,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// Names of the scalar style columns shared by themes, pages and payloads.
pub const SCALAR_COLUMNS: [&str; 8] = [
    "page_background",
    "widget_background",
    "widget_border_color",
    "page_primary_font",
    "page_secondary_font",
    "widget_primary_font",
    "widget_secondary_font",
    "spatial_effect",
];

/// Page-level override scalars accepted by the page-theme update call.
///
/// `None` for the whole struct (at the API level) clears every override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PageOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_secondary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_secondary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub widget_styles: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_effect: Option<String>,
}

/// The theme library split into shared system themes and user-owned ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ThemeLibrary {
    #[serde(default)]
    pub system: Vec<ThemeRecord>,
    #[serde(default)]
    pub user: Vec<ThemeRecord>,
}

impl ThemeLibrary {
    /// Looks a theme up by id across both halves of the library.
    pub fn find(&self, theme_id: Uuid) -> Option<&ThemeRecord> {
        self.system
            .iter()
            .chain(self.user.iter())
            .find(|t| t.id == theme_id)
    }
}

/// Everything the editor needs about the current page, fetched in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub page: PageRecord,
    #[serde(default)]
    pub tokens: TokenBundle,
    #[serde(default)]
    pub token_overrides: OverrideMap,
    #[serde(default)]
    pub social_icons: Value,
    #[serde(default)]
    pub widgets: Value,
}

/// Response from creating a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateThemeResponse {
    pub theme_id: Uuid,
    pub success: bool,
}

/// Where the persistence coordinator currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    /// An edit is waiting out the debounce window.
    Pending,
    /// A save is in flight.
    Saving,
    /// The last save failed; edits are retained and retried on the next
    /// edit or explicit save.
    Failed(String),
}
