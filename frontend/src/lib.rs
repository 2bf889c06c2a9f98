//! Browser client for the Finanças Pessoais backend: income, installment
//! expenses and savings goals, rendered with Yew and kept in sync with the
//! server by re-fetching after every change.

pub mod actions;
pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod format;
pub mod forms;
pub mod icons;
pub mod modal;
pub mod models;
pub mod sections;
pub mod toast;

pub fn run() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    log::info!("starting against {}", config::API_BASE_URL);
    yew::Renderer::<app::App>::new().render();
}
