use leptos::prelude::*;

use crate::context::use_session;
use crate::session::Route;

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "📊",
        "Time Tracking",
        "Rastreie seu tempo de trabalho com precisão e calcule seus ganhos automaticamente.",
    ),
    (
        "🌐",
        "Workspace Virtual",
        "Área de trabalho completa no navegador com aplicativos integrados e janelas arrastáveis.",
    ),
    (
        "⚡",
        "Modo Foco",
        "Aumente sua produtividade com timer Pomodoro e relatórios detalhados.",
    ),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = use_session();
    let go_auth = move |_| session.navigate(Route::Auth);

    view! {
        <div class="landing">
            <section class="landing-hero">
                <div class="landing-logo">"🕒"</div>
                <h1 class="gradient-text">"Workhour Cloud"</h1>
                <p class="landing-tagline">
                    "Plataforma completa para trabalho remoto com área de trabalho virtual, "
                    "rastreamento de tempo e cálculo automático de ganhos."
                </p>
                <div class="landing-actions">
                    <button class="btn btn-primary btn-lg" on:click=go_auth>"Começar Agora"</button>
                    <button class="btn btn-outline btn-lg" on:click=go_auth>"Fazer Login"</button>
                </div>
            </section>
            <section class="landing-features">
                {FEATURES.iter().map(|(icon, title, text)| view! {
                    <div class="card feature-card">
                        <div class="feature-icon">{*icon}</div>
                        <h3>{*title}</h3>
                        <p class="muted">{*text}</p>
                    </div>
                }).collect_view()}
            </section>
        </div>
    }
}
