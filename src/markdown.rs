//! Markdown Rendering
//!
//! pulldown-cmark with syntect highlighting for fenced code blocks.
//! Used by the document apps and the text editor preview.

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

const THEME_NAME: &str = "InspiredGitHub";

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> Option<&'static Theme> {
    let themes = &THEME_SET.get_or_init(ThemeSet::load_defaults).themes;
    themes.get(THEME_NAME).or_else(|| themes.values().next())
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render markdown to HTML
pub fn render_markdown(text: &str) -> String {
    let events = highlight_code_blocks(Parser::new_ext(text, get_options()));
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Replace fenced/indented code blocks with highlighted HTML
fn highlight_code_blocks<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut block: Option<(Option<String>, String)> = None;

    for event in parser {
        if let Some((lang, content)) = block.as_mut() {
            match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    block = None;
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                    _ => None,
                };
                block = Some((lang, String::new()));
            }
            other => events.push(other),
        }
    }

    events
}

/// Highlight source for a language token (`rs`, `rust`, `ts`...).
/// Unknown languages render as plain text.
pub fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = get_syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    get_theme()
        .and_then(|theme| highlighted_html_for_string(code, ss, syntax, theme).ok())
        .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
