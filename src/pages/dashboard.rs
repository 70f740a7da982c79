//! Dashboard: stat cards and the tracker widget outside the desktop.

use leptos::prelude::*;

use crate::components::TimeTrackerWidget;
use crate::context::use_session;
use crate::format::{format_elapsed, format_money};
use crate::session::Route;
use crate::store::{store_elapsed, store_live_earnings, use_app_store};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let store = use_app_store();

    // Pick up an entry left open elsewhere, without creating one
    Effect::new(move |resumed: Option<bool>| {
        if resumed == Some(true) {
            return true;
        }
        if !session.tracker.installed.get() {
            return false;
        }
        session.tracker.resume(store);
        true
    });

    let elapsed = move || format_elapsed(store_elapsed(&store).unwrap_or(0.0));
    let rate = move || format_money(session.hourly_rate());
    let earnings = move || format_money(store_live_earnings(&store, session.hourly_rate()));

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <div class="dashboard-brand">
                    <span>"🕒"</span>
                    <h1>"Workhour Cloud"</h1>
                </div>
                <div class="dashboard-user muted">{move || session.display_name()}</div>
                <div class="dashboard-actions">
                    <button class="btn btn-primary" on:click=move |_| session.navigate(Route::Desktop)>
                        "🖥 Área de Trabalho"
                    </button>
                    <button class="btn btn-outline" on:click=move |_| session.sign_out(store)>"Sair"</button>
                </div>
            </header>
            <section class="stat-grid">
                <div class="card stat-card">
                    <p class="muted">"Tempo Total"</p>
                    <p class="stat-value mono">{elapsed}</p>
                </div>
                <div class="card stat-card">
                    <p class="muted">"Valor/Hora"</p>
                    <p class="stat-value">{rate}</p>
                </div>
                <div class="card stat-card">
                    <p class="muted">"Ganho Atual"</p>
                    <p class="stat-value">{earnings}</p>
                </div>
            </section>
            <section class="dashboard-control">
                <TimeTrackerWidget />
            </section>
        </div>
    }
}
