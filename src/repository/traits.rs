//! Repository Layer - Core Traits
//!
//! Abstract interfaces for the rows the UI reads and writes.
//! Futures are not `Send`: everything runs on the browser event loop.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppResult;
use crate::models::{Profile, Session, Settlement, TimeEntry, User};

/// Storage for `time_entries`
#[async_trait(?Send)]
pub trait TimeEntryStore {
    /// The user's entry with `ended_at` unset, if any.
    ///
    /// More than one open entry is reported as a conflict.
    async fn find_open(&self, user_id: &str) -> AppResult<Option<TimeEntry>>;

    /// Insert a new open entry
    async fn create(&self, user_id: &str, started_at: DateTime<Utc>) -> AppResult<TimeEntry>;

    /// Write the stop values onto an existing entry
    async fn settle(&self, entry_id: &str, settlement: &Settlement) -> AppResult<TimeEntry>;
}

/// Read-only access to `profiles`
#[async_trait(?Send)]
pub trait ProfileStore {
    async fn find_profile(&self, user_id: &str) -> AppResult<Option<Profile>>;
}

/// Token endpoints needed to keep a session alive
#[async_trait(?Send)]
pub trait AuthGateway {
    /// The user behind an access token; rejects expired tokens
    async fn current_user(&self, access_token: &str) -> AppResult<User>;

    /// Exchange a refresh token for a new session
    async fn refresh(&self, refresh_token: &str) -> AppResult<Session>;
}
