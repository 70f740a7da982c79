#![allow(warnings)]
//! Workhour Desktop Entry Point

mod app;
mod apps;
mod commands;
mod components;
mod config;
mod context;
mod error;
mod format;
mod markdown;
mod models;
mod pages;
mod repository;
mod session;
mod store;
mod tracker;
mod window_manager;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let _ = rolling_logger::init_logger("workhour", rolling_logger::DEFAULT_CAPACITY);
    tracing::info!("starting workhour desktop");
    mount_to_body(App);
}
