//! Shared HTTP plumbing for GoTrue and PostgREST.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::{extract_error_message, AppError, AppResult, Service};

#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    http: reqwest::Client,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            http: reqwest::Client::new(),
        }
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Request carrying `apikey`, plus the bearer token when signed in
    pub(crate) fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, url).header("apikey", &self.anon_key);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn check(builder: RequestBuilder) -> AppResult<reqwest::Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let service = Service::from_path(response.url().path());
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body);
    tracing::warn!(status = status.as_u16(), ?service, %message, "supabase request failed");
    Err(AppError::from_status(service, status.as_u16(), message))
}

/// Send and decode a JSON body
pub(crate) async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> AppResult<T> {
    let response = check(builder).await?;
    Ok(response.json::<T>().await?)
}

/// Send and discard the body
pub(crate) async fn send_empty(builder: RequestBuilder) -> AppResult<()> {
    check(builder).await.map(|_| ())
}
