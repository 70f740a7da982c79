//! Application Configuration
//!
//! Values are baked in at build time from the environment
//! (`SUPABASE_URL`, `SUPABASE_ANON_KEY`, `WORKHOUR_DEFAULT_RATE`).

use crate::error::{AppError, AppResult};

/// Elapsed-time tick period
pub const TICK_INTERVAL_MS: u32 = 1_000;

/// How long a notice stays on screen
pub const NOTICE_LIFETIME_MS: u32 = 4_000;

/// Maximum number of terminal history lines
pub const TERMINAL_HISTORY_CAP: usize = 500;

/// Hourly rate used when the profile has none
pub const DEFAULT_HOURLY_RATE: f64 = 25.0;

/// Refresh the access token this long before it expires
pub const SESSION_REFRESH_MARGIN_SECS: i64 = 60;

/// localStorage key holding the serialized session
pub const SESSION_STORAGE_KEY: &str = "workhour.session";

const DEV_SUPABASE_URL: &str = "http://localhost:54321";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub default_hourly_rate: f64,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("SUPABASE_URL"),
            option_env!("SUPABASE_ANON_KEY"),
            option_env!("WORKHOUR_DEFAULT_RATE"),
        )
    }

    pub fn from_values(url: Option<&str>, anon_key: Option<&str>, default_rate: Option<&str>) -> Self {
        let supabase_url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEV_SUPABASE_URL)
            .trim_end_matches('/')
            .to_string();

        let default_hourly_rate = match default_rate.map(|r| r.trim().parse::<f64>()) {
            Some(Ok(rate)) if rate.is_finite() && rate >= 0.0 => rate,
            Some(_) => {
                tracing::warn!("ignoring invalid WORKHOUR_DEFAULT_RATE, using {}", DEFAULT_HOURLY_RATE);
                DEFAULT_HOURLY_RATE
            }
            None => DEFAULT_HOURLY_RATE,
        };

        Self {
            supabase_url,
            supabase_anon_key: anon_key.unwrap_or_default().trim().to_string(),
            default_hourly_rate,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.supabase_anon_key.is_empty() {
            return Err(AppError::Config("SUPABASE_ANON_KEY não definido".to_string()));
        }
        if !(self.supabase_url.starts_with("http://") || self.supabase_url.starts_with("https://")) {
            return Err(AppError::Config(format!("SUPABASE_URL inválido: {}", self.supabase_url)));
        }
        Ok(())
    }

    /// The profile's rate, or the configured default when unset
    pub fn rate_or_default(&self, rate: Option<f64>) -> f64 {
        rate.filter(|r| r.is_finite() && *r >= 0.0)
            .unwrap_or(self.default_hourly_rate)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}
