//! App Launcher Component

use leptos::prelude::*;

use crate::apps::list_apps;
use crate::store::{store_launch, use_app_store, AppStateStoreFields};

#[component]
pub fn AppLauncher() -> impl IntoView {
    let store = use_app_store();
    let close = move |_| store.launcher_open().set(false);

    view! {
        <Show when=move || store.launcher_open().get()>
            <div class="launcher-backdrop" on:click=close>
                <div class="launcher-panel" on:click=|ev| ev.stop_propagation()>
                    <div class="launcher-header">
                        <h2>"Aplicativos"</h2>
                        <button class="window-btn" on:click=close>"✕"</button>
                    </div>
                    <div class="launcher-grid">
                        {list_apps().into_iter().map(|app| view! {
                            <div
                                class="launcher-card"
                                on:click=move |_| {
                                    store_launch(&store, app.id.as_str());
                                }
                            >
                                <div class="launcher-icon">{app.icon}</div>
                                <div class="launcher-name">{app.name}</div>
                                <div class="launcher-description">{app.description}</div>
                            </div>
                        }).collect_view()}
                    </div>
                </div>
            </div>
        </Show>
    }
}
