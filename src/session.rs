//! Session Gate
//!
//! Hash routes, the route guard, the persisted auth session, and the
//! live session that keeps its access token fresh.

use std::cell::RefCell;
use std::future::Future;

use chrono::{DateTime, Utc};

use crate::config::{SESSION_REFRESH_MARGIN_SECS, SESSION_STORAGE_KEY};
use crate::error::AppResult;
use crate::models::Session;
use crate::repository::AuthGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    Auth,
    Dashboard,
    Desktop,
}

impl Route {
    /// Parse `location.hash`; anything unrecognized is the landing page
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_start_matches('/');
        let path = path.split(['?', '/']).next().unwrap_or_default();
        match path {
            "auth" => Route::Auth,
            "dashboard" => Route::Dashboard,
            "desktop" => Route::Desktop,
            _ => Route::Landing,
        }
    }

    pub fn as_hash(self) -> &'static str {
        match self {
            Route::Landing => "#/",
            Route::Auth => "#/auth",
            Route::Dashboard => "#/dashboard",
            Route::Desktop => "#/desktop",
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Dashboard | Route::Desktop)
    }
}

/// Where a navigation actually lands
pub fn guard(route: Route, has_session: bool) -> Route {
    match (route, has_session) {
        (r, false) if r.requires_session() => Route::Auth,
        (Route::Auth, true) => Route::Dashboard,
        (r, _) => r,
    }
}

pub fn decode_session(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable persisted session");
            None
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_persisted() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
    decode_session(&raw)
}

pub fn persist(session: &Session) {
    let Some(storage) = local_storage() else { return };
    match serde_json::to_string(session) {
        Ok(raw) => {
            if storage.set_item(SESSION_STORAGE_KEY, &raw).is_err() {
                tracing::warn!("could not persist session");
            }
        }
        Err(e) => tracing::warn!(error = %e, "could not serialize session"),
    }
}

pub fn clear_persisted() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_STORAGE_KEY);
    }
}

/// Validate a stored session, refreshing the access token at most once
pub async fn restore_session<A: AuthGateway>(auth: &A, stored: Session, now: DateTime<Utc>) -> AppResult<Session> {
    if stored.is_expired(now) {
        tracing::info!("stored session expired, refreshing");
        return auth.refresh(&stored.refresh_token).await;
    }
    match auth.current_user(&stored.access_token).await {
        Ok(user) => Ok(Session { user, ..stored }),
        Err(e) if e.is_auth() => {
            tracing::info!("access token rejected, refreshing");
            auth.refresh(&stored.refresh_token).await
        }
        Err(e) => Err(e),
    }
}

/// Milliseconds until a session should be refreshed ahead of expiry
pub fn refresh_delay_ms(session: &Session, now: DateTime<Utc>) -> u32 {
    let secs = (session.expires_at - SESSION_REFRESH_MARGIN_SECS - now.timestamp()).max(0);
    u32::try_from(secs.saturating_mul(1000)).unwrap_or(u32::MAX)
}

type RefreshHook = Box<dyn Fn(&Session)>;

/// The signed-in session, shared by every authenticated request.
///
/// A request rejected as unauthorized triggers one refresh and one retry.
pub struct LiveSession<A> {
    auth: A,
    current: RefCell<Session>,
    on_refresh: Option<RefreshHook>,
}

impl<A: AuthGateway> LiveSession<A> {
    pub fn new(auth: A, session: Session) -> Self {
        Self {
            auth,
            current: RefCell::new(session),
            on_refresh: None,
        }
    }

    /// Called with every session obtained by a refresh
    pub fn with_refresh_hook(mut self, hook: impl Fn(&Session) + 'static) -> Self {
        self.on_refresh = Some(Box::new(hook));
        self
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn session(&self) -> Session {
        self.current.borrow().clone()
    }

    pub fn access_token(&self) -> String {
        self.current.borrow().access_token.clone()
    }

    pub fn user_id(&self) -> String {
        self.current.borrow().user.id.clone()
    }

    /// Adopt a session obtained elsewhere, e.g. a second sign-in
    pub fn replace(&self, session: Session) {
        *self.current.borrow_mut() = session;
    }

    /// Trade the refresh token for a new pair
    pub async fn refresh(&self) -> AppResult<Session> {
        let refresh_token = self.current.borrow().refresh_token.clone();
        let session = self.auth.refresh(&refresh_token).await?;
        tracing::info!(user = %session.user.id, expires_at = session.expires_at, "access token refreshed");
        self.replace(session.clone());
        if let Some(hook) = &self.on_refresh {
            hook(&session);
        }
        Ok(session)
    }

    /// Run `call` with the current access token, refreshing once on 401
    pub async fn authorized<T, F, Fut>(&self, call: F) -> AppResult<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let token = self.access_token();
        match call(token.clone()).await {
            Err(e) if e.is_auth() => {
                // a concurrent request may already have refreshed
                if self.access_token() == token {
                    tracing::info!("request unauthorized, refreshing session");
                    self.refresh().await?;
                }
                call(self.access_token()).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::User;
    use crate::repository::memory::{MemoryAuth, MemoryStore, TokenGatedStore};
    use crate::tracker::{StartOutcome, TimeTracker, TrackerState};
    use chrono::{Duration, TimeZone};
    use std::rc::Rc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn valid_until(hours: i64) -> i64 {
        (now() + Duration::hours(hours)).timestamp()
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::from_hash(""), Route::Landing);
        assert_eq!(Route::from_hash("#/"), Route::Landing);
        assert_eq!(Route::from_hash("#/auth"), Route::Auth);
        assert_eq!(Route::from_hash("#/dashboard"), Route::Dashboard);
        assert_eq!(Route::from_hash("#desktop"), Route::Desktop);
        assert_eq!(Route::from_hash("#/desktop?x=1"), Route::Desktop);
        assert_eq!(Route::from_hash("#/nowhere"), Route::Landing);
    }

    #[test]
    fn test_hash_roundtrip() {
        for route in [Route::Landing, Route::Auth, Route::Dashboard, Route::Desktop] {
            assert_eq!(Route::from_hash(route.as_hash()), route);
        }
    }

    #[test]
    fn test_guard_without_session() {
        assert_eq!(guard(Route::Desktop, false), Route::Auth);
        assert_eq!(guard(Route::Dashboard, false), Route::Auth);
        assert_eq!(guard(Route::Auth, false), Route::Auth);
        assert_eq!(guard(Route::Landing, false), Route::Landing);
    }

    #[test]
    fn test_guard_with_session() {
        assert_eq!(guard(Route::Auth, true), Route::Dashboard);
        assert_eq!(guard(Route::Desktop, true), Route::Desktop);
        assert_eq!(guard(Route::Landing, true), Route::Landing);
    }

    #[test]
    fn test_decode_session() {
        let session = Session {
            access_token: "at".into(),
            refresh_token: "rt".into(),
            expires_at: 1_700_000_000,
            token_type: "bearer".into(),
            user: User { id: "u-1".into(), email: Some("ana@example.com".into()) },
        };
        let raw = serde_json::to_string(&session).unwrap();
        assert_eq!(decode_session(&raw), Some(session));
        assert_eq!(decode_session("{not json"), None);
    }

    #[tokio::test]
    async fn test_restore_valid_session_checks_user_only() {
        let auth = MemoryAuth::new("at");
        let stored = auth.session("at", valid_until(1));

        let restored = restore_session(&auth, stored.clone(), now()).await.unwrap();
        assert_eq!(restored, stored);
        assert_eq!(auth.user_calls.get(), 1);
        assert_eq!(auth.refresh_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_restore_expired_session_refreshes_once() {
        let auth = MemoryAuth::new("at");
        let stored = auth.session("at", valid_until(-1));

        let restored = restore_session(&auth, stored, now()).await.unwrap();
        assert_eq!(restored.access_token, "access-1");
        assert_eq!(auth.refresh_calls.get(), 1);
        assert_eq!(auth.user_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_restore_rejected_token_refreshes_once() {
        let auth = MemoryAuth::new("at");
        let stored = auth.session("at", valid_until(1));
        auth.expire_tokens();

        let restored = restore_session(&auth, stored, now()).await.unwrap();
        assert_eq!(restored.access_token, "access-1");
        assert_eq!(auth.user_calls.get(), 1);
        assert_eq!(auth.refresh_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_restore_gives_up_on_other_errors() {
        let auth = MemoryAuth::new("at");
        *auth.user_error.borrow_mut() = Some(AppError::Network("offline".into()));
        let stored = auth.session("at", valid_until(1));

        let err = restore_session(&auth, stored, now()).await.unwrap_err();
        assert_eq!(err, AppError::Network("offline".into()));
        assert_eq!(auth.refresh_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_restore_fails_when_refresh_is_rejected() {
        let auth = MemoryAuth::new("at");
        auth.fail_refresh.set(true);
        let stored = auth.session("at", valid_until(-1));

        assert!(restore_session(&auth, stored, now()).await.unwrap_err().is_auth());
        assert_eq!(auth.refresh_calls.get(), 1);
    }

    #[test]
    fn test_refresh_delay() {
        let auth = MemoryAuth::new("at");
        let session = auth.session("at", valid_until(1));
        assert_eq!(refresh_delay_ms(&session, now()), (3600 - 60) * 1000);

        let stale = auth.session("at", valid_until(-1));
        assert_eq!(refresh_delay_ms(&stale, now()), 0);
    }

    #[tokio::test]
    async fn test_authorized_refreshes_stale_token_and_retries() {
        let auth = MemoryAuth::new("at");
        let session = auth.session("at", valid_until(1));
        let refreshed: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = refreshed.clone();
        let live = LiveSession::new(auth, session).with_refresh_hook(move |s| sink.borrow_mut().push(s.access_token.clone()));

        live.auth().expire_tokens();
        let seen: RefCell<Vec<String>> = RefCell::default();
        let result = live
            .authorized(|token| {
                seen.borrow_mut().push(token.clone());
                let check = live.auth().check(&token);
                async move { check.map(|_| token) }
            })
            .await;

        assert_eq!(result.unwrap(), "access-1");
        assert_eq!(*seen.borrow(), vec!["at".to_string(), "access-1".to_string()]);
        assert_eq!(*refreshed.borrow(), vec!["access-1".to_string()]);
        assert_eq!(live.session().refresh_token, "refresh-1");
    }

    #[tokio::test]
    async fn test_authorized_does_not_refresh_other_errors() {
        let live = LiveSession::new(MemoryAuth::new("at"), MemoryAuth::new("at").session("at", valid_until(1)));
        let result: AppResult<()> = live
            .authorized(|_| async { Err(AppError::Storage { status: 500, message: "boom".into() }) })
            .await;

        assert!(matches!(result, Err(AppError::Storage { status: 500, .. })));
        assert_eq!(live.auth().refresh_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_authorized_gives_up_when_refresh_fails() {
        let auth = MemoryAuth::new("at");
        auth.fail_refresh.set(true);
        auth.expire_tokens();
        let live = LiveSession::new(auth, MemoryAuth::new("at").session("at", valid_until(1)));

        let gate = live.auth();
        let result = live.authorized(|token| async move { gate.check(&token) }).await;
        assert!(result.unwrap_err().is_auth());
        assert_eq!(live.auth().refresh_calls.get(), 1);
        assert_eq!(live.access_token(), "at");
    }

    #[tokio::test]
    async fn test_tracker_stops_after_token_expires_mid_session() {
        let auth = MemoryAuth::new("at");
        let session = auth.session("at", valid_until(1));
        let store = TokenGatedStore {
            live: Rc::new(LiveSession::new(auth, session)),
            inner: MemoryStore::new(),
        };
        let tracker = TimeTracker::new(store, "user-1", 25.0);

        assert!(matches!(tracker.start(now()).await.unwrap(), StartOutcome::Created(_)));

        // two hours later the original token is long dead
        tracker.store().live.auth().expire_tokens();
        let settlement = tracker.stop(now() + Duration::hours(2)).await.unwrap();

        assert_eq!(settlement.earnings, 50.0);
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.store().inner.open_entries("user-1"), 0);
        assert_eq!(tracker.store().live.auth().refresh_calls.get(), 1);
        assert_eq!(tracker.store().live.access_token(), "access-1");
    }
}
