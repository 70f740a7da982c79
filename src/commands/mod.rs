//! Supabase Command Wrappers
//!
//! Frontend bindings to the hosted auth and row APIs, organized by domain.

mod auth;
mod client;
mod profile;
mod time_entry;

// Re-export all public items
pub use auth::*;
pub use client::SupabaseClient;
pub use profile::*;
pub use time_entry::*;
