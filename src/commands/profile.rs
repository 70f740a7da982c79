//! Profile Commands

use reqwest::Method;

use super::client::{send_json, SupabaseClient};
use crate::error::AppResult;
use crate::models::Profile;

/// The user's profile row, if one exists
pub async fn fetch_profile(client: &SupabaseClient, access_token: &str, user_id: &str) -> AppResult<Option<Profile>> {
    let request = client
        .request(Method::GET, &client.rest_url("profiles"), Some(access_token))
        .query(&[("id", format!("eq.{}", user_id)), ("select", "*".to_string())]);
    let rows: Vec<Profile> = send_json(request).await?;
    Ok(rows.into_iter().next())
}
