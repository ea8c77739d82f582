// Main module file for theming

pub mod api;
pub mod contrast;
pub mod coordinator;
pub mod errors;
pub mod events;
pub mod paths;
pub mod resolver;
pub mod service;
pub mod types;

// Re-exports
pub use api::ThemeApi;
pub use errors::ThemingError;
pub use events::ThemeEditorEvent;
pub use resolver::{ResolvedPageStyle, StyleSources};
pub use service::{ThemeEngine, SAVE_DEBOUNCE};
pub use types::{
    BorderEffect, CreateThemeResponse, JsonColumn, OverrideMap, PageOverrides, PageRecord,
    PageSnapshot, SaveStatus, ShadowIntensity, ThemeLibrary, ThemePayload, ThemeRecord,
    TokenBundle, WidgetStyles,
};
