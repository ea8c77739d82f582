//! Dot-path access over nested JSON token trees.
//!
//! Token bundles and theme JSON columns are addressed by dot-paths such as
//! `"semantic.text.primary"`. [`resolve`] walks a tree without ever failing
//! loudly, [`update`] rebuilds only the nodes along the edited path, and
//! [`deep_merge`] combines a stored column with pending edits at save time.

use serde_json::{Map, Value};

/// Resolves `path` against `root`, splitting on `.`.
///
/// Returns `None` as soon as a segment is missing or the current node is not
/// an object. Never panics.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Returns a new tree equal to `root` except that `path` now holds `value`.
///
/// Intermediate nodes along the path are rebuilt; a missing or non-object
/// intermediate is replaced by a fresh object. Sibling branches are carried
/// over unchanged, so for any other path the resolved value is identical
/// before and after.
pub fn update(root: &Value, path: &str, value: Value) -> Value {
    fn set(node: &Value, segments: &[&str], value: Value) -> Value {
        let (head, rest) = match segments.split_first() {
            Some(split) => split,
            None => return value,
        };
        let mut map = match node.as_object() {
            Some(obj) => obj.clone(),
            None => Map::new(),
        };
        let child = map.get(*head).cloned().unwrap_or(Value::Null);
        map.insert((*head).to_string(), set(&child, rest, value));
        Value::Object(map)
    }

    let segments: Vec<&str> = path.split('.').collect();
    set(root, &segments, value)
}

/// Deep-merges `overlay` onto `base`.
///
/// Objects are merged key by key with `overlay` winning on leaves; keys
/// absent from `overlay` keep their `base` value. A `Null` overlay leaves
/// `base` untouched, and any other non-object overlay replaces `base`
/// wholesale.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (_, Value::Null) => base.clone(),
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let next = match merged.get(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        _ => overlay.clone(),
    }
}
