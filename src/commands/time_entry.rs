//! Time Entry Commands
//!
//! PostgREST access to `time_entries`. Writes ask for
//! `Prefer: return=representation` so the stored row comes back.

use reqwest::Method;

use super::client::{send_json, SupabaseClient};
use crate::error::{AppError, AppResult};
use crate::models::{NewTimeEntry, Settlement, TimeEntry};

const TABLE: &str = "time_entries";
const RETURN_ROW: (&str, &str) = ("Prefer", "return=representation");

/// Zero or one open row; more is a conflict
fn single_open(rows: Vec<TimeEntry>, user_id: &str) -> AppResult<Option<TimeEntry>> {
    if rows.len() > 1 {
        return Err(AppError::Conflict(format!(
            "{} entradas abertas para o usuário {}",
            rows.len(),
            user_id
        )));
    }
    Ok(rows.into_iter().next())
}

/// First returned row of a write; an empty result means nothing matched
fn written_row(rows: Vec<TimeEntry>, what: &str) -> AppResult<TimeEntry> {
    rows.into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(what.to_string()))
}

pub async fn find_open_entry(client: &SupabaseClient, access_token: &str, user_id: &str) -> AppResult<Option<TimeEntry>> {
    let request = client
        .request(Method::GET, &client.rest_url(TABLE), Some(access_token))
        .query(&[
            ("user_id", format!("eq.{}", user_id)),
            ("ended_at", "is.null".to_string()),
            ("select", "*".to_string()),
        ]);
    let rows: Vec<TimeEntry> = send_json(request).await?;
    single_open(rows, user_id)
}

pub async fn insert_entry(client: &SupabaseClient, access_token: &str, entry: &NewTimeEntry<'_>) -> AppResult<TimeEntry> {
    let request = client
        .request(Method::POST, &client.rest_url(TABLE), Some(access_token))
        .header(RETURN_ROW.0, RETURN_ROW.1)
        .json(entry);
    let rows: Vec<TimeEntry> = send_json(request).await?;
    written_row(rows, "entrada criada não retornada")
}

pub async fn update_entry(
    client: &SupabaseClient,
    access_token: &str,
    entry_id: &str,
    settlement: &Settlement,
) -> AppResult<TimeEntry> {
    let request = client
        .request(Method::PATCH, &client.rest_url(TABLE), Some(access_token))
        .query(&[("id", format!("eq.{}", entry_id))])
        .header(RETURN_ROW.0, RETURN_ROW.1)
        .json(settlement);
    let rows: Vec<TimeEntry> = send_json(request).await?;
    written_row(rows, &format!("entrada {}", entry_id))
}
