// src/ui/home.rs
use eframe::egui;

use crate::file::{PAYLOAD_EXTENSIONS, TABLE_EXTENSIONS};
use crate::state::{AppState, Screen};

pub fn show_home_view(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.heading("Analytics Dashboard");
        ui.label("Profile a CSV or TSV file, or open an analysis exported earlier.");
        ui.add_space(16.0);

        if ui.button("📂 Open Data File...").clicked() {
            super::open_file_dialog(state);
        }

        if state.store.read().is_loaded() {
            ui.add_space(8.0);
            if ui.button("Go to Dashboard").clicked() {
                state.current_screen = Screen::Dashboard;
            }
        }
    });

    ui.add_space(32.0);
    ui.group(|ui| {
        ui.heading("Supported files");
        egui::Grid::new("home_formats")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                ui.label("Tables");
                ui.label(TABLE_EXTENSIONS.map(|e| format!(".{}", e)).join(", "));
                ui.end_row();
                ui.label("Analyses");
                ui.label(PAYLOAD_EXTENSIONS.map(|e| format!(".{}", e)).join(", "));
                ui.end_row();
            });
    });

    ui.group(|ui| {
        ui.heading("Analysis settings");
        let analysis = &state.settings.analysis;
        egui::Grid::new("home_settings")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                ui.label("Distribution buckets");
                ui.label(analysis.distribution_buckets.to_string());
                ui.end_row();
                ui.label("Preview rows");
                ui.label(analysis.preview_rows.to_string());
                ui.end_row();
                ui.label("High-cardinality threshold");
                ui.label(analysis.high_cardinality_threshold.to_string());
                ui.end_row();
                ui.label("Date detection ratio");
                ui.label(format!("{:.0}%", analysis.date_detection_ratio * 100.0));
                ui.end_row();
                ui.label("Correlation columns");
                ui.label(analysis.max_correlation_columns.to_string());
                ui.end_row();
            });
    });
}
