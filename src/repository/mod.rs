//! Repository Layer
//!
//! Store seams used by the tracker and session code.

mod supabase;
mod traits;

#[cfg(test)]
pub mod memory;

pub use supabase::SupabaseStore;
pub use traits::{AuthGateway, ProfileStore, TimeEntryStore};
