// src/main.rs
use eframe::egui;
use anyhow::Result;

mod analysis;
mod app;
mod charts;
mod config;
mod file;
mod state;
mod ui;

use app::DashboardApp;
use config::Settings;

fn main() -> Result<()> {
    let settings = Settings::load();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();
    log::info!("Starting with settings {:?}", settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_title("Analytics Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Analytics Dashboard",
        options,
        Box::new(move |cc| Box::new(DashboardApp::new(cc, settings))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
