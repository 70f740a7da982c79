//! Frontend Models
//!
//! Rows and auth payloads exchanged with Supabase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds before expiry at which a session is treated as expired
const EXPIRY_LEEWAY_SECS: i64 = 30;

/// `time_entries` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub earnings: Option<f64>,
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// Insert payload for a new entry
#[derive(Debug, Clone, Serialize)]
pub struct NewTimeEntry<'a> {
    pub user_id: &'a str,
    pub started_at: DateTime<Utc>,
}

/// Values written when an entry stops
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Settlement {
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: i64,
    pub earnings: f64,
}

/// `profiles` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Authenticated user as returned by GoTrue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Persisted auth session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub token_type: String,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() + EXPIRY_LEEWAY_SECS >= self.expires_at
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_entry_from_postgrest_row() {
        let raw = r#"{
            "id": "0b6f3a52-8f1e-4d0e-9a43-3c3c8b2c1f10",
            "user_id": "u-1",
            "started_at": "2024-05-01T12:00:00.123456+00:00",
            "ended_at": null,
            "duration_seconds": null,
            "earnings": null
        }"#;
        let entry: TimeEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.is_open());
        assert_eq!(entry.started_at.timestamp(), Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap().timestamp());
    }

    #[test]
    fn test_profile_without_rate() {
        let profile: Profile = serde_json::from_str(r#"{"id":"u-1"}"#).unwrap();
        assert_eq!(profile.hourly_rate, None);
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: now.timestamp() + 3600,
            token_type: "bearer".into(),
            user: User { id: "u-1".into(), email: None },
        };
        assert!(!session.is_expired(now));
        session.expires_at = now.timestamp() + 10;
        assert!(session.is_expired(now));
    }
}
