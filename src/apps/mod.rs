//! Simulated Applications
//!
//! Static catalog of launchable apps and the dispatch from an [`AppId`] to
//! its rendering surface. Adding an app means adding a variant; the `match`
//! in [`AppSurface`] will not compile until it is handled.

mod browser;
mod chrome;
mod excel;
mod ide;
mod terminal;
mod text_editor;
mod word;

use leptos::prelude::*;

use crate::window_manager::{WindowId, WindowManager};

pub use browser::{normalize_address, BrowserHistory, WebBrowser};
pub use chrome::ChromeApp;
pub use excel::{sheet_cell, ExcelApp};
pub use ide::IdeApp;
pub use terminal::{Command, Terminal, TerminalSession};
pub use text_editor::TextEditor;
pub use word::WordApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppId {
    TextEditor,
    Browser,
    Terminal,
    Word,
    Excel,
    Ide,
    Chrome,
}

/// Launcher entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppMeta {
    pub id: AppId,
    pub name: &'static str,
    /// Window title bar text
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl AppId {
    /// Launcher order
    pub const ALL: &'static [AppId] = &[
        AppId::TextEditor,
        AppId::Browser,
        AppId::Terminal,
        AppId::Word,
        AppId::Excel,
        AppId::Ide,
        AppId::Chrome,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppId::TextEditor => "text-editor",
            AppId::Browser => "browser",
            AppId::Terminal => "terminal",
            AppId::Word => "word",
            AppId::Excel => "excel",
            AppId::Ide => "ide",
            AppId::Chrome => "chrome",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }

    pub fn meta(self) -> AppMeta {
        let (name, title, description, icon) = match self {
            AppId::TextEditor => ("Editor de Texto", "Editor de Texto", "Editor de texto simples", "📝"),
            AppId::Browser => ("Navegador", "Navegador Web", "Navegador web simulado", "🌐"),
            AppId::Terminal => ("Terminal", "Terminal", "Terminal de comandos", "💻"),
            AppId::Word => ("Word", "Documento1.docx", "Processador de texto", "📄"),
            AppId::Excel => ("Excel", "Planilha1.xlsx", "Planilha de horas e ganhos", "📊"),
            AppId::Ide => ("IDE", "workhour-cloud - IDE", "Ambiente de desenvolvimento", "🧑‍💻"),
            AppId::Chrome => ("Chrome", "Google Chrome", "Navegador Chrome", "🧭"),
        };
        AppMeta { id: self, name, title, description, icon }
    }
}

/// Ordered launcher catalog
pub fn list_apps() -> Vec<AppMeta> {
    AppId::ALL.iter().map(|id| id.meta()).collect()
}

/// Open a window for a catalog id; unknown ids are logged and ignored
pub fn launch(manager: &mut WindowManager, app_id: &str) -> Option<WindowId> {
    match AppId::parse(app_id) {
        Some(id) => {
            let window = manager.open(id);
            tracing::info!(app = id.as_str(), %window, "launched app");
            Some(window)
        }
        None => {
            tracing::warn!(app = app_id, "ignoring launch of unknown app");
            None
        }
    }
}

/// Rendering surface for one app instance
#[component]
pub fn AppSurface(app_id: AppId) -> impl IntoView {
    match app_id {
        AppId::TextEditor => view! { <TextEditor /> }.into_any(),
        AppId::Browser => view! { <WebBrowser /> }.into_any(),
        AppId::Terminal => view! { <Terminal /> }.into_any(),
        AppId::Word => view! { <WordApp /> }.into_any(),
        AppId::Excel => view! { <ExcelApp /> }.into_any(),
        AppId::Ide => view! { <IdeApp /> }.into_any(),
        AppId::Chrome => view! { <ChromeApp /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_ids() {
        let ids: Vec<&str> = list_apps().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["text-editor", "browser", "terminal", "word", "excel", "ide", "chrome"]);
    }

    #[test]
    fn test_parse_roundtrips_catalog() {
        for meta in list_apps() {
            assert_eq!(AppId::parse(meta.id.as_str()), Some(meta.id));
        }
        assert_eq!(AppId::parse("minesweeper"), None);
        assert_eq!(AppId::parse("Terminal"), None);
    }

    #[test]
    fn test_launch_known_app_opens_window() {
        let mut wm = WindowManager::new();
        let id = launch(&mut wm, "browser").expect("known app");
        let window = wm.get(id).unwrap();
        assert_eq!(window.app_id, AppId::Browser);
        assert_eq!(window.title, "Navegador Web");
        assert_eq!(wm.focused(), Some(id));
    }

    #[test]
    fn test_launch_unknown_app_is_ignored() {
        let mut wm = WindowManager::new();
        assert_eq!(launch(&mut wm, "calculator"), None);
        assert!(wm.is_empty());
    }

    #[test]
    fn test_same_app_can_open_twice() {
        let mut wm = WindowManager::new();
        let a = launch(&mut wm, "terminal").unwrap();
        let b = launch(&mut wm, "terminal").unwrap();
        assert_ne!(a, b);
        assert_eq!(wm.len(), 2);
    }
}
