//! Save payload assembly and fork-on-write planning.
//!
//! The pure half of the persistence coordinator: given the active theme, the
//! live bundle and the pending edits, build the full outgoing payload and
//! decide whether the save updates the theme in place, updates an existing
//! fork, or creates a new one. The async orchestration (debounce,
//! single-flight, API calls) lives in [`super::service`].

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::paths;
use super::types::{
    JsonColumn, OverrideMap, ThemePayload, ThemeRecord, TokenBundle, SCALAR_COLUMNS,
};

/// The name given to a user-owned clone of a system theme.
pub fn fork_name(original: &str) -> String {
    format!("Custom - {original}")
}

/// How a save should be dispatched for the active theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePlan {
    /// The theme is user-owned; update it in place.
    UpdateInPlace { theme_id: Uuid },
    /// The theme is a system theme and a fork already exists for this user;
    /// update the fork and make sure the page points at it.
    UpdateFork { theme_id: Uuid, name: String },
    /// The theme is a system theme with no existing fork; create one and
    /// repoint the page.
    CreateFork { name: String },
}

/// Decides the save plan for `theme` given the user's theme list.
///
/// System themes are never written to; their edits land on a fork named
/// `"Custom - <name>"`, reusing an existing fork of the same name rather
/// than accumulating duplicates.
pub fn plan_save(theme: &ThemeRecord, user_themes: &[ThemeRecord]) -> SavePlan {
    if !theme.is_system() {
        return SavePlan::UpdateInPlace { theme_id: theme.id };
    }
    let name = fork_name(&theme.name);
    match user_themes.iter().find(|t| t.name == name) {
        Some(existing) => {
            debug!(theme = %theme.name, fork_id = %existing.id, "reusing existing fork for system theme");
            SavePlan::UpdateFork {
                theme_id: existing.id,
                name,
            }
        }
        None => {
            debug!(theme = %theme.name, "system theme has no fork yet, will create one");
            SavePlan::CreateFork { name }
        }
    }
}

/// Assembles the complete outgoing payload for a save.
///
/// Each JSON column is re-derived by deep-merging the stored column (lenient
/// read, base) with the pending edits for that column (bundle subtree plus
/// column-qualified override entries, overlay). Keys never touched by an
/// edit keep their stored value, so a save from one editor panel cannot
/// silently discard fields edited through another. Scalar columns carry the
/// pending edit when one exists, else the stored value.
pub fn build_theme_payload(
    theme: &ThemeRecord,
    bundle: &TokenBundle,
    overrides: &OverrideMap,
) -> ThemePayload {
    let mut payload = ThemePayload::default();

    for column in JsonColumn::ALL {
        let base = theme.json_column_object(column).unwrap_or(Value::Null);
        let mut overlay = bundle_overlay(bundle, column);
        for (path, value) in overrides.iter() {
            if let Some(sub_path) = column_sub_path(path, column) {
                overlay = paths::update(&overlay, sub_path, value.clone());
            }
        }
        let merged = paths::deep_merge(&base, &overlay);
        if !merged.is_null() {
            *payload.json_column_mut(column) = merged;
        }
    }

    for name in SCALAR_COLUMNS {
        let value = overrides
            .get_str(name)
            .map(str::to_string)
            .or_else(|| theme.scalar(name).map(str::to_string));
        if let Some(value) = value {
            payload.set_scalar(name, value);
        }
    }

    payload
}

/// The slice of the live bundle that belongs to `column`.
///
/// The bundle's `semantic` namespace maps onto `color_tokens`, and the
/// `core.typography` / `core.iconography` namespaces onto their columns;
/// the remaining columns have no bundle-resident representation and are
/// edited through the override map only.
fn bundle_overlay(bundle: &TokenBundle, column: JsonColumn) -> Value {
    match column {
        JsonColumn::Color => bundle
            .get("semantic")
            .map(|semantic| paths::update(&Value::Null, "semantic", semantic.clone()))
            .unwrap_or(Value::Null),
        JsonColumn::Typography => bundle
            .get("core.typography")
            .cloned()
            .unwrap_or(Value::Null),
        JsonColumn::Iconography => bundle
            .get("core.iconography")
            .cloned()
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Strips the `<column>.` prefix off a column-qualified override path.
fn column_sub_path<'a>(path: &'a str, column: JsonColumn) -> Option<&'a str> {
    path.strip_prefix(column.as_str())
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|rest| !rest.is_empty())
}
