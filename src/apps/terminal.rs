//! Terminal App
//!
//! Read-eval-print loop over a fixed command set with a capped history.

use std::collections::VecDeque;

use leptos::prelude::*;

use crate::config::TERMINAL_HISTORY_CAP;
use crate::format::format_elapsed;
use crate::store::{store_elapsed_untracked, use_app_store};

const BANNER: &[&str] = &[
    "Workhour Cloud Terminal v1.0.0",
    "Digite 'help' para ver os comandos disponíveis",
];

const HELP_TEXT: &str = "Comandos disponíveis:
  help    - Mostra esta mensagem
  clear   - Limpa o terminal
  time    - Mostra o tempo trabalhado
  about   - Sobre o Workhour Cloud";

const ABOUT_TEXT: &str = "Workhour Cloud - Plataforma de trabalho remoto";

const TIME_HINT: &str = "Tempo trabalhado: verificar no dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Time,
    About,
    /// Trimmed input as typed
    Unknown(String),
}

impl Command {
    /// `None` for blank input
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let cmd = match trimmed.to_lowercase().as_str() {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "time" => Command::Time,
            "about" => Command::About,
            _ => Command::Unknown(trimmed.to_string()),
        };
        Some(cmd)
    }

    fn output(&self, elapsed: Option<f64>) -> String {
        match self {
            Command::Help => HELP_TEXT.to_string(),
            Command::Clear => String::new(),
            Command::Time => match elapsed {
                Some(secs) => format!("Tempo trabalhado: {}", format_elapsed(secs)),
                None => TIME_HINT.to_string(),
            },
            Command::About => ABOUT_TEXT.to_string(),
            Command::Unknown(input) => format!("Comando não encontrado: {}", input),
        }
    }
}

/// History of display lines, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSession {
    history: VecDeque<String>,
    cap: usize,
}

impl TerminalSession {
    pub fn new(cap: usize) -> Self {
        let mut session = Self {
            history: VecDeque::new(),
            cap: cap.max(1),
        };
        for line in BANNER {
            session.push(line.to_string());
        }
        session.push(String::new());
        session
    }

    /// Run one input line. `elapsed` feeds the `time` command.
    pub fn execute(&mut self, input: &str, elapsed: Option<f64>) -> Option<Command> {
        let cmd = Command::parse(input)?;
        if cmd == Command::Clear {
            self.history.clear();
            return Some(cmd);
        }
        let output = cmd.output(elapsed);
        self.push(format!("$ {}", input.trim()));
        self.push(output);
        self.push(String::new());
        Some(cmd)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    fn push(&mut self, line: String) {
        if self.history.len() == self.cap {
            self.history.pop_front();
        }
        self.history.push_back(line);
    }
}

#[component]
pub fn Terminal() -> impl IntoView {
    let store = use_app_store();
    let session = RwSignal::new(TerminalSession::new(TERMINAL_HISTORY_CAP));
    let (input, set_input) = signal(String::new());
    let bottom_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest line in view
    Effect::new(move |_| {
        session.track();
        if let Some(el) = bottom_ref.get() {
            el.scroll_into_view();
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let line = input.get_untracked();
        if line.trim().is_empty() {
            return;
        }
        let elapsed = store_elapsed_untracked(&store);
        session.update(|s| {
            s.execute(&line, elapsed);
        });
        set_input.set(String::new());
    };

    view! {
        <div class="terminal-app">
            <div class="terminal-output">
                {move || session.with(|s| {
                    s.lines()
                        .map(|line| view! { <div class="terminal-line">{line.to_string()}</div> })
                        .collect_view()
                })}
                <div node_ref=bottom_ref></div>
            </div>
            <form class="terminal-input-row" on:submit=on_submit>
                <span class="terminal-prompt">"$"</span>
                <input
                    type="text"
                    class="terminal-input"
                    autofocus=true
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                />
            </form>
        </div>
    }
}
