//! UI Components
//!
//! Reusable Leptos components.

mod app_launcher;
mod notice_host;
mod taskbar;
mod time_tracker_widget;
mod window_frame;

pub use app_launcher::AppLauncher;
pub use notice_host::NoticeHost;
pub use taskbar::Taskbar;
pub use time_tracker_widget::TimeTrackerWidget;
pub use window_frame::{WindowFrame, DESKTOP_AREA_ID};
