//! WebAssembly entry point.

use crate::Dashboard;
use dashdeck_core::{open_platform_store, StoreConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    // Fails only when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Starting Dashdeck (WASM)");

    let store = match open_platform_store(&StoreConfig::default()) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open dashboard storage: {}", e);
            return;
        }
    };

    let dashboard = Dashboard::new(store);
    for line in dashboard.summary_lines() {
        log::info!("{}", line);
    }
}
