//! Chrome mock: static start page.

use leptos::prelude::*;

#[component]
pub fn ChromeApp() -> impl IntoView {
    view! {
        <div class="chrome-app">
            <div class="app-chrome-bar">
                <div class="traffic-lights">
                    <span class="light light-red"></span>
                    <span class="light light-yellow"></span>
                    <span class="light light-green"></span>
                </div>
                <div class="app-chrome-address">"https://www.google.com"</div>
            </div>
            <div class="chrome-page">
                <div class="chrome-logo">"🧭"</div>
                <h2>"Google Chrome"</h2>
                <p>"Navegador Web"</p>
            </div>
        </div>
    }
}
