//! Word Processor App: a fixed document rendered from markdown.

use leptos::prelude::*;

use crate::markdown::render_markdown;

const DOCUMENT: &str = "\
# Documento sem título

Bem-vindo ao Microsoft Word integrado ao Workhour Cloud!

Este é um editor de texto simulado que permite criar e editar documentos.

Recursos disponíveis:

- Formatação de texto
- Listas e tabelas
- Inserção de imagens
- Verificação ortográfica
";

#[component]
pub fn WordApp() -> impl IntoView {
    let html = render_markdown(DOCUMENT);

    view! {
        <div class="word-app">
            <div class="app-chrome-bar">
                <div class="traffic-lights">
                    <span class="light light-red"></span>
                    <span class="light light-yellow"></span>
                    <span class="light light-green"></span>
                </div>
                <div class="app-chrome-address">"Documento1.docx"</div>
            </div>
            <div class="word-page">
                <article class="word-document markdown-body" inner_html=html></article>
            </div>
        </div>
    }
}
