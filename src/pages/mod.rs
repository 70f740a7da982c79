//! Top-level views, one per route.

mod auth;
mod dashboard;
mod desktop;
mod landing;

pub use auth::AuthPage;
pub use dashboard::DashboardPage;
pub use desktop::DesktopPage;
pub use landing::LandingPage;
