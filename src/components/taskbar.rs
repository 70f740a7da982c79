//! Taskbar Component
//!
//! Launcher button, open-window list, clock with live earnings, tracker
//! toggle and logout.

use leptos::prelude::*;

use crate::context::use_session;
use crate::format::{format_elapsed, format_money};
use crate::store::{store_elapsed, store_live_earnings, store_toggle_launcher, use_app_store, AppStateStoreFields};
use crate::tracker::TrackerState;
use crate::window_manager::WindowId;

#[component]
pub fn Taskbar() -> impl IntoView {
    let store = use_app_store();
    let session = use_session();

    let entries = move || {
        store.windows().with(|wm| {
            wm.windows()
                .iter()
                .map(|w| (w.id, w.icon, w.title.clone(), w.is_minimized, wm.is_focused(w.id)))
                .collect::<Vec<_>>()
        })
    };

    let on_window_click = move |id: WindowId| {
        store.windows().update(|wm| {
            wm.toggle_from_taskbar(id);
        });
    };

    let clock = move || format_elapsed(store_elapsed(&store).unwrap_or(0.0));
    let earnings = move || format_money(store_live_earnings(&store, session.hourly_rate()));
    let tracker_label = move || match store.tracker().get() {
        TrackerState::Running(_) => "⏸",
        TrackerState::StopPending(_) => "⟳",
        TrackerState::Starting | TrackerState::Stopping(_) => "…",
        TrackerState::Idle => "▶",
    };

    view! {
        <footer class="taskbar">
            <div class="taskbar-left">
                <button
                    class="taskbar-btn"
                    class:active=move || store.launcher_open().get()
                    on:click=move |_| store_toggle_launcher(&store)
                >
                    "▦ Apps"
                </button>
                <div class="taskbar-windows">
                    <For
                        each=entries
                        key=|(id, _, title, minimized, focused)| (*id, title.clone(), *minimized, *focused)
                        children=move |(id, icon, title, minimized, focused)| view! {
                            <button
                                class="taskbar-btn taskbar-window"
                                class:minimized=minimized
                                class:focused=focused
                                title=title.clone()
                                on:click=move |_| on_window_click(id)
                            >
                                <span>{icon}</span>
                                <span class="taskbar-window-title">{title.clone()}</span>
                            </button>
                        }
                    />
                </div>
            </div>
            <div class="taskbar-right">
                <button
                    class="taskbar-btn"
                    title="Iniciar/Pausar timer"
                    disabled=move || store.tracker().with(TrackerState::is_busy)
                    on:click=move |_| session.tracker.toggle(store)
                >
                    {tracker_label}
                </button>
                <div class="taskbar-clock">
                    <span>"🕒"</span>
                    <span class="mono">{clock}</span>
                    <span class="taskbar-earnings">{earnings}</span>
                </div>
                <button class="taskbar-btn" title="Sair" on:click=move |_| session.sign_out(store)>"⏻"</button>
            </div>
        </footer>
    }
}
