//! Web Browser App
//!
//! Address bar with back/forward history. The page area is a placeholder.

use leptos::prelude::*;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

const HOME: &str = "https://example.com";
const SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Turn address bar input into a URL.
///
/// Schemes are kept, host-like input gets `https://`, anything else becomes
/// a search. Blank input yields `None`.
pub fn normalize_address(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(trimmed.to_string());
    }
    let looks_like_host = !trimmed.contains(char::is_whitespace)
        && (trimmed.contains('.') || lower.starts_with("localhost"));
    if looks_like_host {
        return Some(format!("https://{}", trimmed));
    }
    Some(format!("{}{}", SEARCH_URL, utf8_percent_encode(trimmed, NON_ALPHANUMERIC)))
}

/// Visited addresses with a cursor
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl BrowserHistory {
    pub fn new(home: impl Into<String>) -> Self {
        Self {
            entries: vec![home.into()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Visit drops any forward entries. Revisiting the current page is a no-op.
    pub fn visit(&mut self, url: String) {
        if self.current() == url {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url);
        self.cursor += 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

#[component]
pub fn WebBrowser() -> impl IntoView {
    let history = RwSignal::new(BrowserHistory::new(HOME));
    let (address, set_address) = signal(HOME.to_string());

    let sync_address = move || set_address.set(history.with_untracked(|h| h.current().to_string()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(url) = normalize_address(&address.get_untracked()) {
            tracing::debug!(%url, "browser navigate");
            history.update(|h| h.visit(url));
        }
        sync_address();
    };

    view! {
        <div class="browser-app">
            <form class="browser-toolbar" on:submit=on_submit>
                <button
                    type="button"
                    class="browser-nav"
                    disabled=move || !history.with(BrowserHistory::can_go_back)
                    on:click=move |_| {
                        history.update(|h| { h.back(); });
                        sync_address();
                    }
                >"←"</button>
                <button
                    type="button"
                    class="browser-nav"
                    disabled=move || !history.with(BrowserHistory::can_go_forward)
                    on:click=move |_| {
                        history.update(|h| { h.forward(); });
                        sync_address();
                    }
                >"→"</button>
                <button type="button" class="browser-nav" on:click=move |_| sync_address()>"⟳"</button>
                <input
                    type="text"
                    class="browser-address"
                    placeholder="Digite uma URL..."
                    prop:value=move || address.get()
                    on:input=move |ev| set_address.set(event_target_value(&ev))
                />
            </form>
            <div class="browser-page">
                <div class="browser-placeholder">
                    <div class="browser-globe">"🌐"</div>
                    <p>"Navegador Web Simulado"</p>
                    <p class="browser-current">{move || history.with(|h| h.current().to_string())}</p>
                    <p class="browser-hint">"Em produção, você pode integrar com iframe ou webview"</p>
                </div>
            </div>
        </div>
    }
}
