//! Workhour Desktop App
//!
//! Root component: session restore, route guard, per-session profile and
//! tracker setup, and the elapsed-time tick.

use chrono::Utc;
use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::NoticeHost;
use crate::config::{AppConfig, TICK_INTERVAL_MS};
use crate::context::SessionContext;
use crate::pages::{AuthPage, DashboardPage, DesktopPage, LandingPage};
use crate::repository::{ProfileStore, SupabaseStore};
use crate::session::{self, refresh_delay_ms, restore_session, Route};
use crate::store::{AppState, AppStateStoreFields};

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "configuration incomplete");
    }

    let ctx = SessionContext::new(config, Route::from_hash(&current_hash()));
    let store = Store::new(AppState::new());
    provide_context(ctx);
    provide_context(store);

    // Restore the persisted session before routing
    spawn_local(async move {
        if let Some(stored) = session::load_persisted() {
            match restore_session(&ctx.client(), stored, Utc::now()).await {
                Ok(restored) => ctx.sign_in(restored),
                Err(e) => {
                    tracing::warn!(error = %e, "stored session rejected");
                    session::clear_persisted();
                }
            }
        }
        ctx.ready.set(true);
    });

    let _ = window_event_listener(leptos::ev::hashchange, move |_| {
        if ctx.ready.get_untracked() {
            ctx.navigate(Route::from_hash(&current_hash()));
        }
    });

    // Guard: re-evaluate the route whenever the session changes
    Effect::new(move |_| {
        let ready = ctx.ready.get();
        ctx.session.track();
        if ready {
            ctx.navigate(ctx.route.get_untracked());
        }
    });

    // Per-user profile load and tracker install; token refreshes keep both
    Effect::new(move |prev: Option<Option<String>>| {
        let user_id = ctx.session.with(|s| s.as_ref().map(|s| s.user.id.clone()));
        if prev.as_ref() == Some(&user_id) {
            return user_id;
        }
        if let (Some(id), Some(live)) = (user_id.clone(), ctx.live()) {
            spawn_local(async move {
                let backend = SupabaseStore::new(live.clone());
                let profile = match backend.find_profile(&id).await {
                    Ok(profile) => profile,
                    Err(e) => {
                        tracing::warn!(error = %e, "profile unavailable, using default rate");
                        None
                    }
                };
                let rate = ctx
                    .config
                    .with_value(|c| c.rate_or_default(profile.as_ref().and_then(|p| p.hourly_rate)));
                ctx.set_profile(profile);
                ctx.tracker.install(store, live, rate);
                tracing::info!(rate, "tracker ready");
            });
        }
        user_id
    });

    // Refresh the access token shortly before it expires
    let refresh_timer = StoredValue::new_local(None::<Timeout>);
    Effect::new(move |_| {
        let expires_at = ctx.session.with(|s| s.as_ref().map(|s| s.expires_at));
        refresh_timer.set_value(None);
        if expires_at.is_none() {
            return;
        }
        let delay = ctx
            .session
            .with_untracked(|s| s.as_ref().map(|s| refresh_delay_ms(s, Utc::now())))
            .unwrap_or_default();
        tracing::debug!(delay_ms = delay, "token refresh scheduled");
        refresh_timer.set_value(Some(Timeout::new(delay, move || ctx.refresh_now())));
    });

    // 1 s tick while an entry is running; dropping the Interval cancels it
    let ticker = StoredValue::new_local(None::<Interval>);
    Effect::new(move |_| {
        let running = store.tracker().with(|t| t.is_running());
        let ticking = ticker.with_value(Option::is_some);
        if running && !ticking {
            store.now().set(Utc::now());
            ticker.set_value(Some(Interval::new(TICK_INTERVAL_MS, move || store.now().set(Utc::now()))));
        } else if !running && ticking {
            ticker.set_value(None);
        }
    });

    view! {
        <NoticeHost />
        <Show
            when=move || ctx.ready.get()
            fallback=|| view! { <div class="splash muted">"Carregando..."</div> }
        >
            {move || match ctx.route.get() {
                Route::Landing => view! { <LandingPage /> }.into_any(),
                Route::Auth => view! { <AuthPage /> }.into_any(),
                Route::Dashboard => view! { <DashboardPage /> }.into_any(),
                Route::Desktop => view! { <DesktopPage /> }.into_any(),
            }}
        </Show>
    }
}
