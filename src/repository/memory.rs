//! In-memory store and auth server used by tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::traits::{AuthGateway, ProfileStore, TimeEntryStore};
use crate::error::{AppError, AppResult};
use crate::models::{Profile, Session, Settlement, TimeEntry, User};
use crate::session::LiveSession;

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<TimeEntry>>,
    profiles: RefCell<Vec<Profile>>,
    next_id: Cell<u32>,
    pub fail_lookup: Cell<bool>,
    pub fail_create: Cell<bool>,
    pub fail_settle: Cell<bool>,
    /// Suspend once inside `find_open`, like a network round trip
    pub yield_on_lookup: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_entry(&self, entry: TimeEntry) {
        self.entries.borrow_mut().push(entry);
    }

    pub fn insert_profile(&self, profile: Profile) {
        self.profiles.borrow_mut().push(profile);
    }

    pub fn entries(&self) -> Vec<TimeEntry> {
        self.entries.borrow().clone()
    }

    pub fn open_entries(&self, user_id: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.user_id == user_id && e.is_open())
            .count()
    }
}

fn unavailable() -> AppError {
    AppError::Storage { status: 503, message: "unavailable".to_string() }
}

#[async_trait(?Send)]
impl TimeEntryStore for MemoryStore {
    async fn find_open(&self, user_id: &str) -> AppResult<Option<TimeEntry>> {
        if self.yield_on_lookup.get() {
            tokio::task::yield_now().await;
        }
        if self.fail_lookup.get() {
            return Err(unavailable());
        }
        let open: Vec<TimeEntry> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.user_id == user_id && e.is_open())
            .cloned()
            .collect();
        match open.len() {
            0 => Ok(None),
            1 => Ok(open.into_iter().next()),
            n => Err(AppError::Conflict(format!("{} open entries", n))),
        }
    }

    async fn create(&self, user_id: &str, started_at: DateTime<Utc>) -> AppResult<TimeEntry> {
        if self.fail_create.get() {
            return Err(unavailable());
        }
        self.next_id.set(self.next_id.get() + 1);
        let entry = TimeEntry {
            id: format!("entry-{}", self.next_id.get()),
            user_id: user_id.to_string(),
            started_at,
            ended_at: None,
            duration_seconds: None,
            earnings: None,
        };
        self.entries.borrow_mut().push(entry.clone());
        Ok(entry)
    }

    async fn settle(&self, entry_id: &str, settlement: &Settlement) -> AppResult<TimeEntry> {
        if self.fail_settle.get() {
            return Err(unavailable());
        }
        let mut entries = self.entries.borrow_mut();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| AppError::NotFound(entry_id.to_string()))?;
        entry.ended_at = Some(settlement.ended_at);
        entry.duration_seconds = Some(settlement.duration_seconds);
        entry.earnings = Some(settlement.earnings);
        Ok(entry.clone())
    }
}

#[async_trait(?Send)]
impl ProfileStore for MemoryStore {
    async fn find_profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        Ok(self.profiles.borrow().iter().find(|p| p.id == user_id).cloned())
    }
}

/// GoTrue stand-in that accepts exactly one access token at a time
pub struct MemoryAuth {
    valid_token: RefCell<String>,
    user: User,
    pub refresh_calls: Cell<u32>,
    pub user_calls: Cell<u32>,
    pub fail_refresh: Cell<bool>,
    /// Returned by `current_user` instead of checking the token
    pub user_error: RefCell<Option<AppError>>,
}

impl MemoryAuth {
    pub fn new(valid_token: &str) -> Self {
        Self {
            valid_token: RefCell::new(valid_token.to_string()),
            user: User { id: "user-1".into(), email: Some("ana@example.com".into()) },
            refresh_calls: Cell::new(0),
            user_calls: Cell::new(0),
            fail_refresh: Cell::new(false),
            user_error: RefCell::new(None),
        }
    }

    pub fn session(&self, access_token: &str, expires_at: i64) -> Session {
        Session {
            access_token: access_token.to_string(),
            refresh_token: "refresh-0".into(),
            expires_at,
            token_type: "bearer".into(),
            user: self.user.clone(),
        }
    }

    /// Invalidate every token issued so far
    pub fn expire_tokens(&self) {
        *self.valid_token.borrow_mut() = "nobody-has-this".into();
    }

    pub fn check(&self, access_token: &str) -> AppResult<()> {
        if *self.valid_token.borrow() == access_token {
            Ok(())
        } else {
            Err(AppError::Auth("JWT expired".into()))
        }
    }
}

#[async_trait(?Send)]
impl AuthGateway for MemoryAuth {
    async fn current_user(&self, access_token: &str) -> AppResult<User> {
        self.user_calls.set(self.user_calls.get() + 1);
        if let Some(e) = self.user_error.borrow().clone() {
            return Err(e);
        }
        self.check(access_token)?;
        Ok(self.user.clone())
    }

    async fn refresh(&self, _refresh_token: &str) -> AppResult<Session> {
        let n = self.refresh_calls.get() + 1;
        self.refresh_calls.set(n);
        if self.fail_refresh.get() {
            return Err(AppError::Auth("refresh token revoked".into()));
        }
        let token = format!("access-{}", n);
        *self.valid_token.borrow_mut() = token.clone();
        Ok(Session {
            access_token: token,
            refresh_token: format!("refresh-{}", n),
            expires_at: i64::MAX,
            token_type: "bearer".into(),
            user: self.user.clone(),
        })
    }
}

/// [`MemoryStore`] behind a bearer check, driven through a [`LiveSession`]
pub struct TokenGatedStore {
    pub live: Rc<LiveSession<MemoryAuth>>,
    pub inner: MemoryStore,
}

#[async_trait(?Send)]
impl TimeEntryStore for TokenGatedStore {
    async fn find_open(&self, user_id: &str) -> AppResult<Option<TimeEntry>> {
        self.live
            .authorized(|token| async move {
                self.live.auth().check(&token)?;
                self.inner.find_open(user_id).await
            })
            .await
    }

    async fn create(&self, user_id: &str, started_at: DateTime<Utc>) -> AppResult<TimeEntry> {
        self.live
            .authorized(|token| async move {
                self.live.auth().check(&token)?;
                self.inner.create(user_id, started_at).await
            })
            .await
    }

    async fn settle(&self, entry_id: &str, settlement: &Settlement) -> AppResult<TimeEntry> {
        self.live
            .authorized(|token| async move {
                self.live.auth().check(&token)?;
                self.inner.settle(entry_id, settlement).await
            })
            .await
    }
}
