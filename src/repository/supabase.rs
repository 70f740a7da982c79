//! Supabase-backed store for the signed-in user.
//!
//! Every call goes through the shared [`LiveSession`], so a token refreshed
//! by one request is picked up by the next.

use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::traits::{AuthGateway, ProfileStore, TimeEntryStore};
use crate::commands::{self, SupabaseClient};
use crate::error::AppResult;
use crate::models::{NewTimeEntry, Profile, Session, Settlement, TimeEntry, User};
use crate::session::LiveSession;

#[async_trait(?Send)]
impl AuthGateway for SupabaseClient {
    async fn current_user(&self, access_token: &str) -> AppResult<User> {
        commands::get_user(self, access_token).await
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<Session> {
        commands::refresh_session(self, refresh_token).await
    }
}

#[derive(Clone)]
pub struct SupabaseStore {
    live: Rc<LiveSession<SupabaseClient>>,
}

impl SupabaseStore {
    pub fn new(live: Rc<LiveSession<SupabaseClient>>) -> Self {
        Self { live }
    }

    fn client(&self) -> &SupabaseClient {
        self.live.auth()
    }
}

#[async_trait(?Send)]
impl TimeEntryStore for SupabaseStore {
    async fn find_open(&self, user_id: &str) -> AppResult<Option<TimeEntry>> {
        let client = self.client();
        self.live
            .authorized(|token| async move { commands::find_open_entry(client, &token, user_id).await })
            .await
    }

    async fn create(&self, user_id: &str, started_at: DateTime<Utc>) -> AppResult<TimeEntry> {
        let client = self.client();
        let entry = &NewTimeEntry { user_id, started_at };
        self.live
            .authorized(|token| async move { commands::insert_entry(client, &token, entry).await })
            .await
    }

    async fn settle(&self, entry_id: &str, settlement: &Settlement) -> AppResult<TimeEntry> {
        let client = self.client();
        self.live
            .authorized(|token| async move { commands::update_entry(client, &token, entry_id, settlement).await })
            .await
    }
}

#[async_trait(?Send)]
impl ProfileStore for SupabaseStore {
    async fn find_profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        let client = self.client();
        self.live
            .authorized(|token| async move { commands::fetch_profile(client, &token, user_id).await })
            .await
    }
}
