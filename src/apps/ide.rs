//! IDE App
//!
//! Explorer tree, one highlighted source file and a status bar.

use leptos::prelude::*;

use crate::markdown::highlight_code;

const FILE_NAME: &str = "main.rs";
const LANGUAGE: &str = "Rust";

const SOURCE: &str = r#"use leptos::prelude::*;

mod app;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(app::App);
}
"#;

/// (depth, label, is_folder)
const EXPLORER: &[(usize, &str, bool)] = &[
    (0, "workhour-cloud", true),
    (1, "src", true),
    (2, "components", true),
    (2, "pages", true),
    (2, "main.rs", false),
    (2, "styles", true),
    (1, "public", true),
    (1, "Cargo.toml", false),
];

/// Cursor position at the end of the buffer, 1-based
pub fn cursor_at_end(source: &str) -> (usize, usize) {
    let trimmed = source.trim_end_matches('\n');
    let line = trimmed.lines().count().max(1);
    let col = trimmed.lines().last().map(|l| l.chars().count()).unwrap_or(0) + 1;
    (line, col)
}

#[component]
pub fn IdeApp() -> impl IntoView {
    let highlighted = highlight_code(SOURCE, Some("rs"));
    let (line, col) = cursor_at_end(SOURCE);

    view! {
        <div class="ide-app">
            <div class="ide-titlebar">
                <div class="traffic-lights">
                    <span class="light light-red"></span>
                    <span class="light light-yellow"></span>
                    <span class="light light-green"></span>
                </div>
                <div class="ide-path">
                    <span class="ide-dir">"src/"</span>
                    <span class="ide-file">{FILE_NAME}</span>
                </div>
            </div>
            <div class="ide-body">
                <aside class="ide-explorer">
                    <div class="ide-explorer-title">"EXPLORER"</div>
                    {EXPLORER.iter().map(|(depth, label, folder)| view! {
                        <div
                            class="ide-explorer-item"
                            class:folder=*folder
                            style=format!("padding-left: {}rem", depth)
                        >
                            {*label}
                        </div>
                    }).collect_view()}
                </aside>
                <div class="ide-editor">
                    <div class="ide-tab">{FILE_NAME}</div>
                    <div class="ide-code" inner_html=highlighted></div>
                </div>
            </div>
            <div class="ide-statusbar">
                <span>{format!("Ln {}, Col {}", line, col)}</span>
                <span>{LANGUAGE}</span>
                <span>"UTF-8"</span>
            </div>
        </div>
    }
}
