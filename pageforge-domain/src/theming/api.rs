//! Boundary trait for the backing theme CRUD service.
//!
//! The engine never talks to storage directly; everything goes through
//! [`ThemeApi`], injected at construction. Production wires an HTTP client
//! behind it, tests wire a mock.

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::ThemingError;
use super::types::{
    CreateThemeResponse, PageOverrides, PageSnapshot, ThemeLibrary, ThemePayload, ThemeRecord,
};

/// The persistence operations the theming engine consumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThemeApi: Send + Sync {
    /// Updates an existing theme in place and returns the persisted row.
    async fn update_theme(
        &self,
        theme_id: Uuid,
        payload: ThemePayload,
    ) -> Result<ThemeRecord, ThemingError>;

    /// Creates a new theme from the payload.
    async fn create_theme(
        &self,
        payload: ThemePayload,
    ) -> Result<CreateThemeResponse, ThemingError>;

    /// Points the page at `theme_id`.
    ///
    /// `overrides: None` clears every page-level style override so the
    /// theme's own values become visible.
    async fn update_page_theme(
        &self,
        theme_id: Uuid,
        overrides: Option<PageOverrides>,
    ) -> Result<(), ThemingError>;

    /// Fetches the system and user theme lists.
    async fn fetch_theme_library(&self) -> Result<ThemeLibrary, ThemingError>;

    /// Fetches the page plus its tokens, overrides and widget data.
    async fn fetch_page_snapshot(&self) -> Result<PageSnapshot, ThemingError>;
}
