//! The theming engine driving the page editor.
//!
//! `ThemeEngine` owns the editing session state behind an `Arc<Mutex<...>>`:
//! the theme library, the page, the live token bundle and the pending edit
//! map. Edits update state, re-resolve the page style, broadcast a
//! [`ThemeEditorEvent::StyleChanged`], and arm a debounced save. Saves are
//! strictly single-flight: a timer firing while a save is in flight defers
//! instead of overlapping, so the payload of every save reflects the latest
//! edit at the moment its timer expired.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{broadcast, Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::api::ThemeApi;
use super::coordinator::{self, SavePlan};
use super::errors::ThemingError;
use super::events::ThemeEditorEvent;
use super::resolver::{self, ResolvedPageStyle, StyleSources};
use super::types::{
    OverrideMap, PageRecord, SaveStatus, ThemeLibrary, ThemePayload, ThemeRecord, TokenBundle,
};

/// How long a burst of edits is allowed to settle before a save fires.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Mutable session state guarded by the engine's mutex.
struct ThemeEngineInternalState {
    library: ThemeLibrary,
    page: PageRecord,
    bundle: TokenBundle,
    overrides: OverrideMap,
    social_icons: Value,
    widgets: Value,
    save_status: SaveStatus,
    /// Single-flight guard: true while a save is on the wire.
    is_saving: bool,
    /// Set when a debounce timer fired during an in-flight save; the save
    /// is re-armed as soon as the current one completes.
    deferred_save: bool,
    pending_save: Option<JoinHandle<()>>,
    resolved_cache: Option<ResolvedPageStyle>,
}

impl ThemeEngineInternalState {
    fn active_theme(&self) -> Option<&ThemeRecord> {
        self.page.theme_id.and_then(|id| self.library.find(id))
    }
}

/// The engine coordinating token edits, style resolution and persistence.
#[derive(Clone)]
pub struct ThemeEngine {
    api: Arc<dyn ThemeApi>,
    internal_state: Arc<Mutex<ThemeEngineInternalState>>,
    event_sender: broadcast::Sender<ThemeEditorEvent>,
    /// Signalled when a save cycle finishes, so explicit saves can wait out
    /// an in-flight one instead of silently deferring.
    save_complete: Arc<Notify>,
}

impl ThemeEngine {
    /// Builds an engine for the current page by fetching the theme library
    /// and the page snapshot through `api`.
    pub async fn new(
        api: Arc<dyn ThemeApi>,
        broadcast_capacity: usize,
    ) -> Result<Self, ThemingError> {
        let (event_sender, _) = broadcast::channel(broadcast_capacity);
        let library = api.fetch_theme_library().await?;
        let snapshot = api.fetch_page_snapshot().await?;
        debug!(
            system_themes = library.system.len(),
            user_themes = library.user.len(),
            "theming engine initialized"
        );
        let internal_state = ThemeEngineInternalState {
            library,
            page: snapshot.page,
            bundle: snapshot.tokens,
            overrides: snapshot.token_overrides,
            social_icons: snapshot.social_icons,
            widgets: snapshot.widgets,
            save_status: SaveStatus::Idle,
            is_saving: false,
            deferred_save: false,
            pending_save: None,
            resolved_cache: None,
        };
        Ok(ThemeEngine {
            api,
            internal_state: Arc::new(Mutex::new(internal_state)),
            event_sender,
            save_complete: Arc::new(Notify::new()),
        })
    }

    /// Subscribes to style-change and save events.
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeEditorEvent> {
        self.event_sender.subscribe()
    }

    /// The fully resolved page style for the current state.
    pub async fn resolved_style(&self) -> ResolvedPageStyle {
        let mut state = self.internal_state.lock().await;
        Self::resolve_locked(&mut state)
    }

    /// Where the persistence coordinator currently stands.
    pub async fn save_status(&self) -> SaveStatus {
        self.internal_state.lock().await.save_status.clone()
    }

    /// A copy of the current theme library.
    pub async fn theme_library(&self) -> ThemeLibrary {
        self.internal_state.lock().await.library.clone()
    }

    /// A copy of the current page record.
    pub async fn page(&self) -> PageRecord {
        self.internal_state.lock().await.page.clone()
    }

    /// A copy of the pending, not-yet-persisted edits.
    pub async fn pending_edits(&self) -> OverrideMap {
        self.internal_state.lock().await.overrides.clone()
    }

    /// The page's social icon records, as fetched with the snapshot.
    pub async fn social_icons(&self) -> Value {
        self.internal_state.lock().await.social_icons.clone()
    }

    /// The page's widget records, as fetched with the snapshot.
    pub async fn widgets(&self) -> Value {
        self.internal_state.lock().await.widgets.clone()
    }

    /// Reads a token out of the live bundle.
    pub async fn token_value(&self, path: &str) -> Option<Value> {
        self.internal_state.lock().await.bundle.get(path).cloned()
    }

    /// Sets a token in the live bundle, re-resolves the style and arms the
    /// debounced save.
    pub async fn set_token(&self, path: &str, value: Value) {
        let style = {
            let mut state = self.internal_state.lock().await;
            state.bundle = state.bundle.with_value(path, value);
            state.resolved_cache = None;
            let style = Self::resolve_locked(&mut state);
            self.schedule_save_locked(&mut state);
            style
        };
        let _ = self
            .event_sender
            .send(ThemeEditorEvent::StyleChanged { style });
    }

    /// Records a column-qualified edit in the override map and arms the
    /// debounced save.
    pub async fn set_override(&self, path: &str, value: Value) {
        let style = {
            let mut state = self.internal_state.lock().await;
            state.overrides.set(path, value);
            state.resolved_cache = None;
            let style = Self::resolve_locked(&mut state);
            self.schedule_save_locked(&mut state);
            style
        };
        let _ = self
            .event_sender
            .send(ThemeEditorEvent::StyleChanged { style });
    }

    /// Drops a pending edit without persisting anything.
    pub async fn remove_override(&self, path: &str) {
        let style = {
            let mut state = self.internal_state.lock().await;
            if state.overrides.remove(path).is_none() {
                return;
            }
            state.resolved_cache = None;
            Self::resolve_locked(&mut state)
        };
        let _ = self
            .event_sender
            .send(ThemeEditorEvent::StyleChanged { style });
    }

    /// Switches the page to another theme from the library.
    ///
    /// Cancels any pending save, persists the selection (clearing page-level
    /// overrides), and replaces the live bundle wholesale from the selected
    /// record.
    pub async fn select_theme(&self, theme_id: Uuid) -> Result<(), ThemingError> {
        let theme = {
            let mut state = self.internal_state.lock().await;
            if let Some(handle) = state.pending_save.take() {
                handle.abort();
            }
            state.deferred_save = false;
            if matches!(state.save_status, SaveStatus::Pending) {
                state.save_status = SaveStatus::Idle;
            }
            state
                .library
                .find(theme_id)
                .cloned()
                .ok_or(ThemingError::ThemeNotFound { theme_id })?
        };

        self.api.update_page_theme(theme_id, None).await?;

        let style = {
            let mut state = self.internal_state.lock().await;
            state.page.theme_id = Some(theme_id);
            state.page.clear_style_overrides();
            state.bundle = TokenBundle::from_theme(&theme);
            state.overrides.clear();
            state.resolved_cache = None;
            Self::resolve_locked(&mut state)
        };
        debug!(%theme_id, "switched active theme");
        let _ = self
            .event_sender
            .send(ThemeEditorEvent::StyleChanged { style });
        Ok(())
    }

    /// Saves immediately, bypassing the debounce. Single-flight still holds:
    /// if a save is already on the wire this waits for it to finish and then
    /// dispatches, so `Ok` means the current edits really went out.
    pub async fn save_now(&self) -> Result<(), ThemingError> {
        loop {
            let in_flight = {
                let mut state = self.internal_state.lock().await;
                if let Some(handle) = state.pending_save.take() {
                    handle.abort();
                }
                state.is_saving
            };
            if !in_flight {
                break;
            }
            self.save_complete.notified().await;
        }
        self.execute_save().await
    }

    /// Cancels any pending or deferred save without side effects.
    pub async fn shutdown(&self) {
        let mut state = self.internal_state.lock().await;
        if let Some(handle) = state.pending_save.take() {
            handle.abort();
        }
        state.deferred_save = false;
        if matches!(state.save_status, SaveStatus::Pending) {
            state.save_status = SaveStatus::Idle;
        }
    }

    fn resolve_locked(state: &mut ThemeEngineInternalState) -> ResolvedPageStyle {
        if let Some(cached) = &state.resolved_cache {
            return cached.clone();
        }
        let style = {
            let sources = StyleSources {
                theme: state.active_theme(),
                page: Some(&state.page),
                bundle: &state.bundle,
                overrides: &state.overrides,
            };
            resolver::resolve_page_style(&sources)
        };
        state.resolved_cache = Some(style.clone());
        style
    }

    /// (Re)arms the debounce timer. An existing timer is aborted first, so
    /// a burst of edits coalesces into one save carrying the last value.
    fn schedule_save_locked(&self, state: &mut ThemeEngineInternalState) {
        if let Some(handle) = state.pending_save.take() {
            handle.abort();
        }
        if !matches!(state.save_status, SaveStatus::Saving) {
            state.save_status = SaveStatus::Pending;
        }
        let engine = self.clone();
        state.pending_save = Some(tokio::spawn(async move {
            tokio::time::sleep(SAVE_DEBOUNCE).await;
            if let Err(err) = engine.execute_save().await {
                error!("Debounced theme save failed: {err}");
            }
        }));
    }

    /// Runs one save cycle: snapshot state, assemble the payload, dispatch
    /// per the fork-on-write plan, then refresh caches on success.
    async fn execute_save(&self) -> Result<(), ThemingError> {
        let (theme, bundle, overrides, user_themes) = {
            let mut state = self.internal_state.lock().await;
            state.pending_save = None;
            if state.is_saving {
                state.deferred_save = true;
                debug!("save requested while one is in flight, deferring");
                return Ok(());
            }
            let theme = match state.active_theme().cloned() {
                Some(theme) => theme,
                None => {
                    state.save_status = SaveStatus::Idle;
                    return Err(ThemingError::NoActiveTheme);
                }
            };
            state.is_saving = true;
            state.save_status = SaveStatus::Saving;
            (
                theme,
                state.bundle.clone(),
                state.overrides.clone(),
                state.library.user.clone(),
            )
        };

        let payload = coordinator::build_theme_payload(&theme, &bundle, &overrides);
        let plan = coordinator::plan_save(&theme, &user_themes);
        let result = self.dispatch_save(plan, payload).await;

        match result {
            Ok(saved_theme_id) => {
                self.refresh_after_save(saved_theme_id, &overrides).await;
                Ok(())
            }
            Err(err) => {
                error!("Theme save failed, keeping edits for retry: {err}");
                {
                    let mut state = self.internal_state.lock().await;
                    state.is_saving = false;
                    state.save_status = SaveStatus::Failed(err.to_string());
                    if std::mem::take(&mut state.deferred_save) {
                        self.schedule_save_locked(&mut state);
                    }
                }
                self.save_complete.notify_one();
                Err(err)
            }
        }
    }

    /// Sends the payload per the plan and returns the id the page now points
    /// at. Fork partial failures (clone committed, page not repointed) are
    /// reported without reverting the committed half.
    async fn dispatch_save(
        &self,
        plan: SavePlan,
        mut payload: ThemePayload,
    ) -> Result<Uuid, ThemingError> {
        match plan {
            SavePlan::UpdateInPlace { theme_id } => {
                self.api.update_theme(theme_id, payload).await?;
                self.api.update_page_theme(theme_id, None).await?;
                Ok(theme_id)
            }
            SavePlan::UpdateFork { theme_id, name } => {
                payload.name = Some(name.clone());
                self.api.update_theme(theme_id, payload).await?;
                if let Err(err) = self.api.update_page_theme(theme_id, None).await {
                    warn!(fork = %name, "fork updated but page repoint failed, state may be inconsistent");
                    return Err(ThemingError::api(format!(
                        "fork '{name}' was updated but the page could not be repointed: {err}"
                    )));
                }
                Ok(theme_id)
            }
            SavePlan::CreateFork { name } => {
                payload.name = Some(name.clone());
                let response = self.api.create_theme(payload).await?;
                if !response.success {
                    return Err(ThemingError::api(format!(
                        "backend rejected creation of fork '{name}'"
                    )));
                }
                if let Err(err) = self.api.update_page_theme(response.theme_id, None).await {
                    warn!(fork = %name, fork_id = %response.theme_id, "fork created but page repoint failed, state may be inconsistent");
                    return Err(ThemingError::api(format!(
                        "theme '{name}' was created but the page could not be repointed: {err}"
                    )));
                }
                Ok(response.theme_id)
            }
        }
    }

    /// Refetches the theme library and page snapshot after a successful
    /// save, drops the edits that were just persisted, and broadcasts.
    ///
    /// Edits made while the save was in flight stay pending; only entries
    /// still holding the exact value that was saved are removed.
    async fn refresh_after_save(&self, saved_theme_id: Uuid, saved: &OverrideMap) {
        let library = self.api.fetch_theme_library().await;
        let snapshot = self.api.fetch_page_snapshot().await;

        let style = {
            let mut state = self.internal_state.lock().await;
            state.is_saving = false;
            match (library, snapshot) {
                (Ok(library), Ok(snapshot)) => {
                    state.library = library;
                    state.page = snapshot.page;
                    state.social_icons = snapshot.social_icons;
                    state.widgets = snapshot.widgets;
                }
                (library, snapshot) => {
                    if let Err(err) = library {
                        warn!("post-save theme library refresh failed: {err}");
                    }
                    if let Err(err) = snapshot {
                        warn!("post-save page snapshot refresh failed: {err}");
                    }
                }
            }
            for (path, value) in saved.iter() {
                if state.overrides.get(path) == Some(value) {
                    state.overrides.remove(path);
                }
            }
            state.save_status = SaveStatus::Idle;
            state.resolved_cache = None;
            if std::mem::take(&mut state.deferred_save) {
                self.schedule_save_locked(&mut state);
            }
            Self::resolve_locked(&mut state)
        };

        self.save_complete.notify_one();
        debug!(theme_id = %saved_theme_id, "theme saved");
        let _ = self.event_sender.send(ThemeEditorEvent::Saved {
            theme_id: saved_theme_id,
        });
        let _ = self
            .event_sender
            .send(ThemeEditorEvent::StyleChanged { style });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theming::api::MockThemeApi;
    use crate::theming::paths;
    use crate::theming::types::PageSnapshot;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn theme(name: &str, user_id: Option<Uuid>) -> ThemeRecord {
        ThemeRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            user_id,
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

    fn page_for(theme_id: Option<Uuid>) -> PageRecord {
        PageRecord {
            id: Uuid::new_v4(),
            theme_id,
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

    fn snapshot_for(theme_id: Option<Uuid>) -> PageSnapshot {
        PageSnapshot {
            page: page_for(theme_id),
            tokens: TokenBundle::new(),
            token_overrides: OverrideMap::new(),
            social_icons: Value::Null,
            widgets: Value::Null,
        }
    }

    fn expect_fetches(api: &mut MockThemeApi, library: ThemeLibrary, snapshot: PageSnapshot) {
        api.expect_fetch_theme_library()
            .returning(move || Ok(library.clone()));
        api.expect_fetch_page_snapshot()
            .returning(move || Ok(snapshot.clone()));
    }

    async fn settle() {
        tokio::time::sleep(SAVE_DEBOUNCE * 2).await;
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_edits_coalesces_into_one_save_with_last_value() {
        let owner = Uuid::new_v4();
        let mine = theme("Mine", Some(owner));
        let library = ThemeLibrary {
            system: vec![],
            user: vec![mine.clone()],
        };
        let mut api = MockThemeApi::new();
        expect_fetches(&mut api, library, snapshot_for(Some(mine.id)));

        let persisted = mine.clone();
        api.expect_update_theme()
            .withf(|_, payload| {
                paths::resolve(&payload.color_tokens, "semantic.surface.canvas")
                    == Some(&json!("#333333"))
            })
            .times(1)
            .returning(move |_, _| Ok(persisted.clone()));
        api.expect_update_page_theme()
            .times(1)
            .returning(|_, _| Ok(()));

        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();
        engine
            .set_token("semantic.surface.canvas", json!("#111111"))
            .await;
        tokio::time::sleep(Duration::from_millis(300)).await;
        engine
            .set_token("semantic.surface.canvas", json!("#222222"))
            .await;
        tokio::time::sleep(Duration::from_millis(300)).await;
        engine
            .set_token("semantic.surface.canvas", json!("#333333"))
            .await;
        assert_eq!(engine.save_status().await, SaveStatus::Pending);

        settle().await;
        assert_eq!(engine.save_status().await, SaveStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn editing_system_theme_forks_instead_of_updating() {
        let ocean = theme("Ocean", None);
        let library = ThemeLibrary {
            system: vec![ocean.clone()],
            user: vec![],
        };
        let mut api = MockThemeApi::new();
        expect_fetches(&mut api, library, snapshot_for(Some(ocean.id)));

        let fork_id = Uuid::new_v4();
        api.expect_create_theme()
            .withf(|payload| payload.name.as_deref() == Some("Custom - Ocean"))
            .times(1)
            .returning(move |_| {
                Ok(crate::theming::types::CreateThemeResponse {
                    theme_id: fork_id,
                    success: true,
                })
            });
        api.expect_update_page_theme()
            .withf(move |id, overrides| *id == fork_id && overrides.is_none())
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_update_theme().never();

        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();
        engine
            .set_override("color_tokens.accent.primary", json!("#dc2626"))
            .await;
        engine.save_now().await.unwrap();
        assert_eq!(engine.save_status().await, SaveStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn editing_system_theme_reuses_existing_fork() {
        let ocean = theme("Ocean", None);
        let fork = theme("Custom - Ocean", Some(Uuid::new_v4()));
        let fork_id = fork.id;
        let library = ThemeLibrary {
            system: vec![ocean.clone()],
            user: vec![fork.clone()],
        };
        let mut api = MockThemeApi::new();
        expect_fetches(&mut api, library, snapshot_for(Some(ocean.id)));

        api.expect_update_theme()
            .withf(move |id, payload| {
                *id == fork_id && payload.name.as_deref() == Some("Custom - Ocean")
            })
            .times(1)
            .returning(move |_, _| Ok(fork.clone()));
        api.expect_update_page_theme()
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_create_theme().never();

        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();
        engine.set_override("page_background", json!("#0f172a")).await;
        engine.save_now().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_save_keeps_edits_and_reports_status() {
        let mine = theme("Mine", Some(Uuid::new_v4()));
        let library = ThemeLibrary {
            system: vec![],
            user: vec![mine.clone()],
        };
        let mut api = MockThemeApi::new();
        expect_fetches(&mut api, library, snapshot_for(Some(mine.id)));
        api.expect_update_theme()
            .times(1)
            .returning(|_, _| Err(ThemingError::api("network down")));
        api.expect_update_page_theme().never();

        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();
        engine.set_override("page_background", json!("#222222")).await;
        let err = engine.save_now().await.unwrap_err();
        assert!(matches!(err, ThemingError::Api { .. }));

        match engine.save_status().await {
            SaveStatus::Failed(message) => assert!(message.contains("network down")),
            other => panic!("expected failed status, got {other:?}"),
        }
        // Edits survive for retry.
        assert_eq!(
            engine.pending_edits().await.get_str("page_background"),
            Some("#222222")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn switching_theme_cancels_pending_save() {
        let owner = Uuid::new_v4();
        let mine = theme("Mine", Some(owner));
        let other = theme("Other", Some(owner));
        let other_id = other.id;
        let library = ThemeLibrary {
            system: vec![],
            user: vec![mine.clone(), other],
        };
        let mut api = MockThemeApi::new();
        expect_fetches(&mut api, library, snapshot_for(Some(mine.id)));
        api.expect_update_theme().never();
        api.expect_create_theme().never();
        // Only the selection itself goes to the API.
        api.expect_update_page_theme()
            .withf(move |id, overrides| *id == other_id && overrides.is_none())
            .times(1)
            .returning(|_, _| Ok(()));

        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();
        engine.set_token("semantic.text.primary", json!("#111111")).await;
        engine.select_theme(other_id).await.unwrap();

        settle().await;
        assert_eq!(engine.save_status().await, SaveStatus::Idle);
        assert_eq!(engine.page().await.theme_id, Some(other_id));
        assert!(engine.pending_edits().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn events_are_broadcast_for_edits_and_saves() {
        let mine = theme("Mine", Some(Uuid::new_v4()));
        let library = ThemeLibrary {
            system: vec![],
            user: vec![mine.clone()],
        };
        let mut api = MockThemeApi::new();
        expect_fetches(&mut api, library, snapshot_for(Some(mine.id)));
        let mine_id = mine.id;
        let persisted = mine.clone();
        api.expect_update_theme()
            .returning(move |_, _| Ok(persisted.clone()));
        api.expect_update_page_theme().returning(|_, _| Ok(()));

        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();
        let mut events = engine.subscribe();

        engine.set_override("page_background", json!("#334455")).await;
        match events.recv().await.unwrap() {
            ThemeEditorEvent::StyleChanged { style } => {
                assert_eq!(style.page_background, "#334455");
            }
            other => panic!("expected StyleChanged, got {other:?}"),
        }

        engine.save_now().await.unwrap();
        match events.recv().await.unwrap() {
            ThemeEditorEvent::Saved { theme_id } => assert_eq!(theme_id, mine_id),
            other => panic!("expected Saved, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resolved_style_reflects_pending_edits() {
        let mine = theme("Mine", Some(Uuid::new_v4()));
        let library = ThemeLibrary {
            system: vec![],
            user: vec![mine.clone()],
        };
        let mut api = MockThemeApi::new();
        expect_fetches(&mut api, library, snapshot_for(Some(mine.id)));

        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();
        engine.set_override("page_background", json!("#123456")).await;
        let style = engine.resolved_style().await;
        assert_eq!(style.page_background, "#123456");

        engine.shutdown().await;
        assert_eq!(engine.save_status().await, SaveStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn saving_without_active_theme_is_an_error() {
        let mut api = MockThemeApi::new();
        expect_fetches(&mut api, ThemeLibrary::default(), snapshot_for(None));

        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();
        engine.set_override("page_background", json!("#123456")).await;
        let err = engine.save_now().await.unwrap_err();
        assert!(matches!(err, ThemingError::NoActiveTheme));
    }

    /// Test double whose first `update_theme` call parks until released,
    /// holding a save in flight for as long as the test needs.
    struct StallingApi {
        theme: ThemeRecord,
        library: ThemeLibrary,
        release: Arc<Notify>,
        update_calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl ThemeApi for StallingApi {
        async fn update_theme(
            &self,
            _theme_id: Uuid,
            _payload: ThemePayload,
        ) -> Result<ThemeRecord, ThemingError> {
            if self.update_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.release.notified().await;
            }
            Ok(self.theme.clone())
        }

        async fn create_theme(
            &self,
            _payload: ThemePayload,
        ) -> Result<crate::theming::types::CreateThemeResponse, ThemingError> {
            Err(ThemingError::api("unexpected create_theme"))
        }

        async fn update_page_theme(
            &self,
            _theme_id: Uuid,
            _overrides: Option<crate::theming::types::PageOverrides>,
        ) -> Result<(), ThemingError> {
            Ok(())
        }

        async fn fetch_theme_library(&self) -> Result<ThemeLibrary, ThemingError> {
            Ok(self.library.clone())
        }

        async fn fetch_page_snapshot(&self) -> Result<PageSnapshot, ThemingError> {
            Ok(snapshot_for(Some(self.theme.id)))
        }
    }

    fn stalling_engine_parts() -> (ThemeRecord, Arc<Notify>, Arc<AtomicUsize>, StallingApi) {
        let mine = theme("Mine", Some(Uuid::new_v4()));
        let release = Arc::new(Notify::new());
        let update_calls = Arc::new(AtomicUsize::new(0));
        let api = StallingApi {
            theme: mine.clone(),
            library: ThemeLibrary {
                system: vec![],
                user: vec![mine.clone()],
            },
            release: release.clone(),
            update_calls: update_calls.clone(),
        };
        (mine, release, update_calls, api)
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_discards_save_deferred_behind_in_flight_one() {
        let (_mine, release, update_calls, api) = stalling_engine_parts();
        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();

        engine.set_override("page_background", json!("#111111")).await;
        tokio::time::sleep(SAVE_DEBOUNCE + Duration::from_millis(100)).await;
        // The first save is now parked inside update_theme.
        assert_eq!(update_calls.load(Ordering::SeqCst), 1);

        // A second edit's timer fires while the first save is in flight.
        engine.set_override("page_background", json!("#222222")).await;
        tokio::time::sleep(SAVE_DEBOUNCE + Duration::from_millis(100)).await;

        engine.shutdown().await;
        release.notify_one();
        settle().await;

        // Teardown dropped the deferred save; nothing fired after shutdown.
        assert_eq!(update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.save_status().await, SaveStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn save_now_waits_for_in_flight_save_before_dispatching() {
        let (_mine, release, update_calls, api) = stalling_engine_parts();
        let engine = ThemeEngine::new(Arc::new(api), 16).await.unwrap();

        engine.set_override("page_background", json!("#111111")).await;
        tokio::time::sleep(SAVE_DEBOUNCE + Duration::from_millis(100)).await;
        assert_eq!(update_calls.load(Ordering::SeqCst), 1);

        engine.set_override("page_background", json!("#333333")).await;
        let waiter = tokio::spawn({
            let engine = engine.clone();
            async move { engine.save_now().await }
        });
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        // The explicit save is queued behind the stalled one, not dropped
        // and not reported done.
        assert_eq!(update_calls.load(Ordering::SeqCst), 1);
        assert!(!waiter.is_finished());

        release.notify_one();
        waiter.await.unwrap().unwrap();
        assert_eq!(update_calls.load(Ordering::SeqCst), 2);
        assert_eq!(engine.save_status().await, SaveStatus::Idle);
    }
}
