pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;

use shared::config::AppConfig;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    let config = AppConfig::get();
    _ = console_log::init_with_level(config.log_level);
    console_error_panic_hook::set_once();
    log::info!("POS admin starting, backend at {}", config.api_base);

    leptos::mount::mount_to_body(app::App);
}
