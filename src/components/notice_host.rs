//! Toast stack for transient notices.

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="notice-host">
            <For
                each=move || store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() on:click=move |_| store_dismiss_notice(&store, id)>
                            {notice.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
