//! Text Editor App

use leptos::prelude::*;

use crate::markdown::render_markdown;
use crate::store::{store_push_notice, use_app_store, NoticeKind};

#[component]
pub fn TextEditor() -> impl IntoView {
    let store = use_app_store();
    let (content, set_content) = signal(String::new());
    let (preview, set_preview) = signal(false);

    let on_save = move |_| {
        let len = content.with_untracked(|c| c.chars().count());
        tracing::info!(chars = len, "document saved");
        store_push_notice(&store, NoticeKind::Success, "Documento salvo!");
    };

    view! {
        <div class="text-editor-app">
            <div class="editor-toolbar">
                <button class="btn btn-primary" on:click=on_save>"💾 Salvar"</button>
                <button
                    class="btn"
                    class:active=move || preview.get()
                    on:click=move |_| set_preview.update(|p| *p = !*p)
                >
                    {move || if preview.get() { "Editar" } else { "Visualizar" }}
                </button>
            </div>
            <Show
                when=move || preview.get()
                fallback=move || view! {
                    <textarea
                        class="editor-textarea"
                        placeholder="Digite seu texto aqui..."
                        prop:value=move || content.get()
                        on:input=move |ev| set_content.set(event_target_value(&ev))
                    ></textarea>
                }
            >
                <div class="editor-preview markdown-body" inner_html=move || render_markdown(&content.get())></div>
            </Show>
        </div>
    }
}
