//! Time Tracker Widget
//!
//! Elapsed time, rate and live earnings with a start/pause button.

use leptos::prelude::*;

use crate::context::use_session;
use crate::format::{format_elapsed, format_money};
use crate::store::{store_elapsed, store_live_earnings, use_app_store, AppStateStoreFields};
use crate::tracker::TrackerState;

#[component]
pub fn TimeTrackerWidget() -> impl IntoView {
    let store = use_app_store();
    let session = use_session();

    let button_label = move || match store.tracker().get() {
        TrackerState::Idle => "▶ Iniciar",
        TrackerState::Starting => "Iniciando…",
        TrackerState::Running(_) => "⏸ Pausar",
        TrackerState::Stopping(_) => "Parando…",
        TrackerState::StopPending(_) => "⟳ Tentar parar novamente",
    };

    view! {
        <div class="card tracker-widget">
            <h3 class="tracker-title">"🕒 Time Tracker"</h3>
            <div class="tracker-grid">
                <div>
                    <p class="muted">"Tempo"</p>
                    <p class="tracker-value mono">{move || format_elapsed(store_elapsed(&store).unwrap_or(0.0))}</p>
                </div>
                <div>
                    <p class="muted">"Valor/Hora"</p>
                    <p class="tracker-value">{move || format_money(session.hourly_rate())}</p>
                </div>
                <div class="span-2">
                    <p class="muted">"Ganho"</p>
                    <p class="tracker-value">{move || format_money(store_live_earnings(&store, session.hourly_rate()))}</p>
                </div>
            </div>
            <button
                class="btn btn-primary btn-block"
                disabled=move || store.tracker().with(TrackerState::is_busy)
                on:click=move |_| session.tracker.toggle(store)
            >
                {button_label}
            </button>
        </div>
    }
}
