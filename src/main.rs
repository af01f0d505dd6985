//! Kontrola Frontend Entry Point

mod api;
mod app;
mod checklist;
mod components;
mod config;
mod context;
mod download;
mod models;
mod route;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::load();
    if let Err(err) = console_logger::init(config.log_level) {
        web_sys::console::warn_1(&format!("logger already installed: {}", err).into());
    }
    log::info!("starting, API at {}", config.api_url);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
