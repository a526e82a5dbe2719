// src/ui/mod.rs
use eframe::egui;
use rfd::FileDialog;

use crate::charts::Rgb;
use crate::file::{PAYLOAD_EXTENSIONS, TABLE_EXTENSIONS};
use crate::state::AppState;

pub mod charts;
pub mod dashboard;
pub mod home;
pub mod table;

pub fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Placeholder for a panel whose sub-report has not been computed.
pub fn waiting(ui: &mut egui::Ui, what: &str) {
    ui.label(egui::RichText::new(format!("Waiting for {}...", what)).weak().italics());
}

pub fn open_file_dialog(state: &mut AppState) {
    let mut dialog = FileDialog::new()
        .add_filter("Data files", &TABLE_EXTENSIONS)
        .add_filter("Analysis files", &PAYLOAD_EXTENSIONS)
        .set_title("Open Data File");
    if let Some(dir) = state.file_manager.last_dir() {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.pick_file() {
        if let Err(e) = state.open_file(&path) {
            log::error!("Failed to open {}: {:#}", path.display(), e);
            state.error_message = Some(format!("Error opening file: {:#}", e));
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let mut dialog = FileDialog::new()
        .add_filter("JSON", &["json"])
        .add_filter("RON", &["ron"])
        .set_file_name("analysis.json")
        .set_title("Export Analysis");
    if let Some(dir) = state.file_manager.last_dir() {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.save_file() {
        match state.export_analysis(&path) {
            Ok(()) => log::info!("Exported analysis to {}", path.display()),
            Err(e) => state.error_message = Some(format!("Error exporting analysis: {:#}", e)),
        }
    }
}
