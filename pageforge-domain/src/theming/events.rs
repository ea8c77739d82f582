//! Events broadcast by the theming engine.

use uuid::Uuid;

use super::resolver::ResolvedPageStyle;

/// Broadcast on the engine's event channel so the presentation layer can
/// react to edits and completed saves.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeEditorEvent {
    /// The resolved page style changed (token edit, override edit, or theme
    /// switch). Carries the freshly resolved style.
    StyleChanged { style: ResolvedPageStyle },
    /// A save completed successfully for the given theme. After a
    /// fork-on-write this is the id of the new user-owned clone.
    Saved { theme_id: Uuid },
}
