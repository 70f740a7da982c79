//! Auth Commands
//!
//! GoTrue endpoints: password sign-in, sign-up, refresh, logout, user lookup.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{send_empty, send_json, SupabaseClient};
use crate::error::{AppError, AppResult};
use crate::models::{Session, User};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct SignUpArgs<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
}

// ========================
// Responses
// ========================

/// Token grant response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub token_type: String,
    pub user: User,
}

impl AuthResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| now.timestamp() + self.expires_in);
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            token_type: self.token_type,
            user: self.user,
        }
    }
}

/// Sign-up returns a session, or only the user when e-mail confirmation is on
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(AuthResponse),
    User(User),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationRequired(User),
}

fn require_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Auth("e-mail e senha são obrigatórios".to_string()));
    }
    Ok(())
}

// ========================
// Commands
// ========================

pub async fn sign_in_with_password(client: &SupabaseClient, email: &str, password: &str) -> AppResult<Session> {
    require_credentials(email, password)?;
    let request = client
        .request(Method::POST, &client.auth_url("token"), None)
        .query(&[("grant_type", "password")])
        .json(&PasswordGrant { email: email.trim(), password });
    let response: AuthResponse = send_json(request).await?;
    tracing::info!(user = %response.user.id, "signed in");
    Ok(response.into_session(Utc::now()))
}

pub async fn sign_up(
    client: &SupabaseClient,
    email: &str,
    password: &str,
    full_name: &str,
) -> AppResult<SignUpOutcome> {
    require_credentials(email, password)?;
    let request = client
        .request(Method::POST, &client.auth_url("signup"), None)
        .json(&SignUpArgs {
            email: email.trim(),
            password,
            data: SignUpMetadata { full_name: full_name.trim() },
        });
    let outcome = match send_json::<SignUpResponse>(request).await? {
        SignUpResponse::Session(response) => SignUpOutcome::SignedIn(response.into_session(Utc::now())),
        SignUpResponse::User(user) => SignUpOutcome::ConfirmationRequired(user),
    };
    Ok(outcome)
}

pub async fn refresh_session(client: &SupabaseClient, refresh_token: &str) -> AppResult<Session> {
    let request = client
        .request(Method::POST, &client.auth_url("token"), None)
        .query(&[("grant_type", "refresh_token")])
        .json(&RefreshGrant { refresh_token });
    let response: AuthResponse = send_json(request).await?;
    Ok(response.into_session(Utc::now()))
}

pub async fn sign_out(client: &SupabaseClient, access_token: &str) -> AppResult<()> {
    let request = client.request(Method::POST, &client.auth_url("logout"), Some(access_token));
    send_empty(request).await
}

pub async fn get_user(client: &SupabaseClient, access_token: &str) -> AppResult<User> {
    let request = client.request(Method::GET, &client.auth_url("user"), Some(access_token));
    send_json(request).await
}
