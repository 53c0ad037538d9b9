//! Native entry point: opens the dashboard and logs its contents.

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Dashdeck");

    let config = dashdeck_core::StoreConfig::from_env();
    let store = match dashdeck_core::open_platform_store(&config) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open dashboard storage: {}", e);
            std::process::exit(1);
        }
    };

    let mut dashboard = dashdeck_app::Dashboard::new(store);
    for line in dashboard.summary_lines() {
        log::info!("{}", line);
    }
    dashboard.flush();
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
