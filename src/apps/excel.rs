//! Spreadsheet App
//!
//! Fixed 20x4 grid. Row 1 holds headers, row 2 a sample job priced at the
//! user's hourly rate.

use leptos::prelude::*;

use crate::context::use_session;
use crate::format::format_money;

pub const ROWS: usize = 20;
pub const COLUMNS: [&str; 4] = ["A", "B", "C", "D"];

const HEADERS: [&str; 4] = ["Nome", "Valor/Hora", "Horas Trabalhadas", "Total"];
const SAMPLE_HOURS: f64 = 8.0;

/// Text of a zero-based cell
pub fn sheet_cell(row: usize, col: usize, hourly_rate: f64) -> String {
    match (row, col) {
        (0, c) if c < HEADERS.len() => HEADERS[c].to_string(),
        (1, 0) => "Trabalho 1".to_string(),
        (1, 1) => format_money(hourly_rate),
        (1, 2) => format!("{}", SAMPLE_HOURS),
        (1, 3) => format_money(SAMPLE_HOURS * hourly_rate),
        _ => String::new(),
    }
}

#[component]
pub fn ExcelApp() -> impl IntoView {
    let session = use_session();
    let rate = Signal::derive(move || session.hourly_rate());

    view! {
        <div class="excel-app">
            <div class="app-chrome-bar">
                <div class="traffic-lights">
                    <span class="light light-red"></span>
                    <span class="light light-yellow"></span>
                    <span class="light light-green"></span>
                </div>
                <div class="app-chrome-address">"Planilha1.xlsx"</div>
            </div>
            <div class="sheet-scroll">
                <table class="sheet">
                    <thead>
                        <tr>
                            <th class="sheet-corner"></th>
                            {COLUMNS.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {(0..ROWS).map(|row| view! {
                            <tr>
                                <td class="sheet-row-header">{row + 1}</td>
                                {(0..COLUMNS.len())
                                    .map(|col| view! { <td>{move || sheet_cell(row, col, rate.get())}</td> })
                                    .collect_view()}
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
