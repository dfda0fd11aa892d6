mod domain;
mod infrastructure;
mod presentation;

use domain::settings::SettingsService;
use eframe::egui;
use std::path::PathBuf;

fn main() -> Result<(), eframe::Error> {
    let settings = SettingsService::new().unwrap_or_else(|e| {
        eprintln!("Failed to locate settings ({}), using defaults", e);
        SettingsService::load_from(PathBuf::from("settings.json"))
    });

    let logging_guard = infrastructure::logging::init_logger(&settings.get().log_settings)
        .map_err(|e| eprintln!("Failed to initialize logging: {}", e))
        .ok();

    tracing::info!("Starting BLE Time Sync");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 560.0])
            .with_title("BLE Time Sync"),
        ..Default::default()
    };

    eframe::run_native(
        "BLE Time Sync",
        options,
        Box::new(|cc| {
            Ok(Box::new(presentation::app::TimeSyncApp::new(
                cc,
                settings,
                logging_guard,
            )))
        }),
    )
}
