//! Virtual desktop: window area, launcher and taskbar.

use leptos::prelude::*;

use crate::components::{AppLauncher, Taskbar, WindowFrame, DESKTOP_AREA_ID};
use crate::context::use_session;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DesktopPage() -> impl IntoView {
    let session = use_session();
    let store = use_app_store();

    // Entering the desktop resumes or starts tracking once per visit
    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        if !session.tracker.installed.get() {
            return false;
        }
        session.tracker.start(store);
        true
    });

    let windows = move || {
        store
            .windows()
            .with(|wm| wm.windows().iter().map(|w| (w.id, w.app_id)).collect::<Vec<_>>())
    };

    view! {
        <div class="desktop">
            <div id=DESKTOP_AREA_ID class="desktop-area">
                <For
                    each=windows
                    key=|(id, _)| *id
                    children=move |(id, app_id)| view! { <WindowFrame id=id app_id=app_id /> }
                />
                <Show when=move || store.windows().with(|wm| wm.is_empty())>
                    <div class="desktop-hint muted">"Abra um aplicativo pelo botão Apps na barra de tarefas"</div>
                </Show>
            </div>
            <AppLauncher />
            <Taskbar />
        </div>
    }
}
