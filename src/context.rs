//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, SupabaseClient};
use crate::config::AppConfig;
use crate::format::format_money;
use crate::models::{Profile, Session};
use crate::repository::SupabaseStore;
use crate::session::{self, guard, LiveSession, Route};
use crate::store::{
    store_push_notice, store_reset_desktop, store_set_tracker, AppStateStoreFields, AppStore, NoticeKind,
};
use crate::tracker::{StartOutcome, TimeTracker, TrackerState};

/// Session-scoped signals provided at the app root
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Current auth session - read
    pub session: ReadSignal<Option<Session>>,
    /// Current auth session - write
    set_session: WriteSignal<Option<Session>>,
    /// Profile of the signed-in user - read
    pub profile: ReadSignal<Option<Profile>>,
    /// Profile of the signed-in user - write
    set_profile: WriteSignal<Option<Profile>>,
    /// Active view - read
    pub route: ReadSignal<Route>,
    /// Active view - write
    set_route: WriteSignal<Route>,
    /// Startup restore finished
    pub ready: RwSignal<bool>,
    pub config: StoredValue<AppConfig>,
    client: StoredValue<SupabaseClient, LocalStorage>,
    /// Token holder shared with the stores
    live: StoredValue<Option<SharedSession>, LocalStorage>,
    pub tracker: TrackerHandle,
}

pub type SharedSession = Rc<LiveSession<SupabaseClient>>;

impl SessionContext {
    pub fn new(config: AppConfig, initial_route: Route) -> Self {
        let (session, set_session) = signal(None);
        let (profile, set_profile) = signal(None);
        let (route, set_route) = signal(initial_route);
        let client = SupabaseClient::new(&config);
        Self {
            session,
            set_session,
            profile,
            set_profile,
            route,
            set_route,
            ready: RwSignal::new(false),
            config: StoredValue::new(config),
            client: StoredValue::new_local(client),
            live: StoredValue::new_local(None),
            tracker: TrackerHandle::new(),
        }
    }

    pub fn client(&self) -> SupabaseClient {
        self.client.get_value()
    }

    pub fn live(&self) -> Option<SharedSession> {
        self.live.try_get_value().flatten()
    }

    pub fn has_session(&self) -> bool {
        self.session.with_untracked(Option::is_some)
    }

    /// Navigate through the guard and mirror to `location.hash`
    pub fn navigate(&self, route: Route) {
        let target = guard(route, self.has_session());
        if target != route {
            tracing::debug!(?route, ?target, "route redirected");
        }
        if self.route.get_untracked() != target {
            self.set_route.set(target);
        }
        if let Some(location) = web_sys::window().map(|w| w.location()) {
            if location.hash().ok().as_deref() != Some(target.as_hash()) {
                let _ = location.set_hash(target.as_hash());
            }
        }
    }

    /// Adopt a fresh or restored session
    pub fn sign_in(&self, session: Session) {
        session::persist(&session);
        tracing::info!(user = %session.user.id, "session active");
        match self.live() {
            Some(live) if live.user_id() == session.user.id => live.replace(session.clone()),
            _ => {
                let set_session = self.set_session;
                let live = LiveSession::new(self.client(), session.clone()).with_refresh_hook(move |s| {
                    session::persist(s);
                    set_session.set(Some(s.clone()));
                });
                self.live.set_value(Some(Rc::new(live)));
            }
        }
        self.set_session.set(Some(session));
    }

    /// Refresh ahead of expiry; failures are left to the next request
    pub fn refresh_now(&self) {
        let Some(live) = self.live() else { return };
        spawn_local(async move {
            if let Err(e) = live.refresh().await {
                tracing::warn!(error = %e, "scheduled token refresh failed");
            }
        });
    }

    pub fn set_profile(&self, profile: Option<Profile>) {
        self.set_profile.set(profile);
    }

    /// Profile rate, or the configured default
    pub fn hourly_rate(&self) -> f64 {
        let rate = self.profile.with(|p| p.as_ref().and_then(|p| p.hourly_rate));
        self.config.with_value(|c| c.rate_or_default(rate))
    }

    pub fn display_name(&self) -> String {
        let name = self.profile.with(|p| p.as_ref().and_then(|p| p.full_name.clone()));
        name.filter(|n| !n.trim().is_empty())
            .or_else(|| self.session.with(|s| s.as_ref().and_then(|s| s.user.email.clone())))
            .unwrap_or_else(|| "Usuário".to_string())
    }

    /// Stop tracking if possible, then drop the session everywhere
    pub fn sign_out(&self, store: AppStore) {
        let ctx = *self;
        store_reset_desktop(&store);
        spawn_local(async move {
            ctx.tracker.stop_if_active(store).await;
            if let Some(live) = ctx.live() {
                if let Err(e) = commands::sign_out(live.auth(), &live.access_token()).await {
                    tracing::warn!(error = %e, "remote sign-out failed");
                }
            }
            session::clear_persisted();
            ctx.live.set_value(None);
            ctx.tracker.clear();
            store_set_tracker(&store, TrackerState::Idle);
            ctx.set_profile.set(None);
            ctx.set_session.set(None);
            tracing::info!("signed out");
            ctx.navigate(Route::Auth);
        });
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

type SharedTracker = Rc<TimeTracker<SupabaseStore>>;

/// Owner of the session's [`TimeTracker`]
#[derive(Clone, Copy)]
pub struct TrackerHandle {
    inner: StoredValue<Option<SharedTracker>, LocalStorage>,
    /// A tracker is installed - read
    pub installed: RwSignal<bool>,
}

impl TrackerHandle {
    fn new() -> Self {
        Self {
            inner: StoredValue::new_local(None),
            installed: RwSignal::new(false),
        }
    }

    /// Build the tracker for a session; state changes mirror into the store
    pub fn install(&self, store: AppStore, live: SharedSession, hourly_rate: f64) {
        let user_id = live.user_id();
        let tracker = TimeTracker::new(SupabaseStore::new(live), user_id, hourly_rate)
            .with_observer(move |state| store_set_tracker(&store, state.clone()));
        self.inner.set_value(Some(Rc::new(tracker)));
        self.installed.set(true);
    }

    pub fn clear(&self) {
        self.inner.set_value(None);
        self.installed.set(false);
    }

    fn current(&self) -> Option<SharedTracker> {
        self.inner.try_get_value().flatten()
    }

    /// Resume or create an entry
    pub fn start(&self, store: AppStore) {
        let Some(tracker) = self.current() else { return };
        spawn_local(async move {
            match tracker.start(Utc::now()).await {
                Ok(StartOutcome::Resumed(_)) => {
                    store_push_notice(&store, NoticeKind::Info, "Timer já estava ativo!");
                }
                Ok(StartOutcome::Created(_)) => {
                    store_push_notice(&store, NoticeKind::Success, "Timer iniciado!");
                }
                Ok(StartOutcome::AlreadyActive | StartOutcome::NothingOpen | StartOutcome::Queued) => {}
                Err(_) => {
                    store_push_notice(&store, NoticeKind::Error, "Erro ao iniciar timer");
                }
            }
        });
    }

    /// Pick up an open entry without creating one
    pub fn resume(&self, store: AppStore) {
        let Some(tracker) = self.current() else { return };
        spawn_local(async move {
            match tracker.resume().await {
                // a start queued behind this lookup created the entry
                Ok(StartOutcome::Created(_)) => {
                    store_push_notice(&store, NoticeKind::Success, "Timer iniciado!");
                }
                Ok(_) => {}
                Err(e) => {
                    store_push_notice(&store, NoticeKind::Error, format!("Erro ao carregar timer: {}", e));
                }
            }
        });
    }

    pub fn stop(&self, store: AppStore) {
        let Some(tracker) = self.current() else { return };
        spawn_local(async move {
            stop_with_notice(&tracker, store).await;
        });
    }

    /// Start when idle, stop when running or pending
    pub fn toggle(&self, store: AppStore) {
        match store.tracker().get_untracked() {
            TrackerState::Idle => self.start(store),
            TrackerState::Running(_) | TrackerState::StopPending(_) => self.stop(store),
            TrackerState::Starting | TrackerState::Stopping(_) => {}
        }
    }

    async fn stop_if_active(&self, store: AppStore) {
        let Some(tracker) = self.current() else { return };
        if matches!(tracker.state(), TrackerState::Running(_) | TrackerState::StopPending(_)) {
            stop_with_notice(&tracker, store).await;
        }
    }
}

async fn stop_with_notice(tracker: &SharedTracker, store: AppStore) {
    match tracker.stop(Utc::now()).await {
        Ok(settlement) => store_push_notice(
            &store,
            NoticeKind::Success,
            format!("Timer parado! Ganho: {}", format_money(settlement.earnings)),
        ),
        Err(e) => store_push_notice(&store, NoticeKind::Error, format!("Erro ao parar timer: {}", e)),
    }
}
