//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use chrono::{DateTime, Utc};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::apps;
use crate::config::NOTICE_LIFETIME_MS;
use crate::tracker::{earnings_for, TrackerState};
use crate::window_manager::{WindowId, WindowManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
            NoticeKind::Info => "notice notice-info",
        }
    }
}

/// Transient toast
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub text: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Open windows and focus order
    pub windows: WindowManager,
    /// Start menu visibility
    pub launcher_open: bool,
    /// Visible notices, oldest first
    pub notices: Vec<Notice>,
    pub next_notice_id: u32,
    /// Mirror of the tracker state machine
    pub tracker: TrackerState,
    /// Last tick
    pub now: DateTime<Utc>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            now: Utc::now(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Append a notice and return its id
pub fn store_add_notice(store: &AppStore, kind: NoticeKind, text: impl Into<String>) -> u32 {
    let id = store.next_notice_id().get_untracked() + 1;
    store.next_notice_id().set(id);
    store.notices().write().push(Notice { id, kind, text: text.into() });
    id
}

/// Show a notice that dismisses itself
pub fn store_push_notice(store: &AppStore, kind: NoticeKind, text: impl Into<String>) {
    let id = store_add_notice(store, kind, text);
    let store = *store;
    Timeout::new(NOTICE_LIFETIME_MS, move || store_dismiss_notice(&store, id)).forget();
}

pub fn store_dismiss_notice(store: &AppStore, id: u32) {
    if let Some(mut notices) = store.notices().try_write() {
        notices.retain(|n| n.id != id);
    }
}

/// Drop the signed-out user's windows, launcher and notices
pub fn store_reset_desktop(store: &AppStore) {
    store.windows().set(WindowManager::new());
    store.launcher_open().set(false);
    store.notices().write().clear();
}

/// Open a catalog app and close the launcher
pub fn store_launch(store: &AppStore, app_id: &str) -> Option<WindowId> {
    let id = apps::launch(&mut store.windows().write(), app_id);
    store.launcher_open().set(false);
    id
}

pub fn store_toggle_launcher(store: &AppStore) {
    store.launcher_open().update(|open| *open = !*open);
}

pub fn store_set_tracker(store: &AppStore, state: TrackerState) {
    store.tracker().set(state);
    store.now().set(Utc::now());
}

/// Reactive elapsed seconds, re-evaluated on every tick
pub fn store_elapsed(store: &AppStore) -> Option<f64> {
    let now = store.now().get();
    store.tracker().with(|t| t.elapsed_seconds(now))
}

pub fn store_elapsed_untracked(store: &AppStore) -> Option<f64> {
    store.tracker().with_untracked(|t| t.elapsed_seconds(Utc::now()))
}

/// Live earnings for the running entry
pub fn store_live_earnings(store: &AppStore, hourly_rate: f64) -> f64 {
    store_elapsed(store)
        .map(|secs| earnings_for(secs, hourly_rate))
        .unwrap_or(0.0)
}
