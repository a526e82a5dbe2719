// src/ui/dashboard.rs
use eframe::egui;

use crate::analysis::{AnalysisResult, DataDictionary, DataHealth, KpiData, Report};
use crate::charts::{
    delta_arrow, health::status_color, health_view, kpi_cards, ColumnActivated, HealthView,
};
use crate::state::{AppState, Navigation};
use super::{charts, color, table, waiting};

pub fn show_dashboard_view(ui: &mut egui::Ui, state: &mut AppState) {
    if state.dashboard_navigation() == Navigation::RedirectHome {
        ui.centered_and_justified(|ui| {
            ui.label("Loading Analysis Data...");
        });
        ui.ctx().request_repaint();
        return;
    }

    let snapshot = state.store.read();
    let selected = state.selected_column();
    let mut activated: Option<ColumnActivated> = None;

    show_header(ui, state, &snapshot);

    egui::ScrollArea::vertical()
        .id_source("dashboard_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if let Report::Present(kpi) = &snapshot.kpi {
                show_kpi_cards(ui, kpi);
            }
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                cols[0].group(|ui| match &snapshot.column_distribution {
                    Report::Present(dist) => {
                        if let Some(event) = charts::show_distribution(ui, dist, selected.as_deref()) {
                            activated = Some(event);
                        }
                    }
                    Report::Absent => waiting(ui, "the column distribution"),
                });
                cols[1].group(|ui| match &snapshot.time_series {
                    Report::Present(ts) => charts::show_trend(ui, ts),
                    Report::Absent => waiting(ui, "the trend analysis"),
                });
            });

            ui.columns(2, |cols| {
                cols[0].group(|ui| show_insights(ui, &snapshot.insights));
                cols[1].group(|ui| show_health(ui, &snapshot.data_health));
            });

            ui.columns(2, |cols| {
                cols[0].group(|ui| {
                    if let Some(event) = show_dictionary(ui, &snapshot.dictionary, selected.as_deref()) {
                        activated = Some(event);
                    }
                });
                cols[1].group(|ui| match &snapshot.correlation_matrix {
                    Report::Present(matrix) => {
                        if let Some(event) = charts::show_heatmap(ui, matrix) {
                            activated = Some(event);
                        }
                    }
                    Report::Absent => {
                        ui.heading("Correlation Matrix");
                        ui.label("No numeric columns to correlate.");
                    }
                });
            });

            ui.group(|ui| match &snapshot.table_data {
                Report::Present(data) => {
                    let (event, sort) = table::show_table(ui, data, selected.as_deref(), state.table_sort);
                    state.table_sort = sort;
                    if event.is_some() {
                        activated = event;
                    }
                }
                Report::Absent => waiting(ui, "the data preview"),
            });
        });

    if let Some(event) = activated {
        state.activate_column(event);
    }
}

fn show_header(ui: &mut egui::Ui, state: &mut AppState, snapshot: &AnalysisResult) {
    ui.horizontal(|ui| {
        ui.heading("Dashboard");
        if let Some(run) = &state.last_run {
            ui.label(egui::RichText::new(format!(
                "{} | run {} | {}",
                run.source,
                &run.id.to_string()[..8],
                run.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
            )).weak());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let selected = state.selected_column();
            let can_rerun = state.dataset.is_some()
                && selected.is_some()
                && selected.as_deref() != snapshot.selected_distribution_column();
            let can_retime = state.dataset.is_some()
                && selected.is_some()
                && selected != state.request.time_column;
            if ui.add_enabled(can_retime, egui::Button::new("Use as time column")).clicked() {
                if let Err(e) = state.rerun_with_time_column() {
                    state.error_message = Some(format!("{:#}", e));
                }
            }
            if ui.add_enabled(can_rerun, egui::Button::new("Re-run for selected column")).clicked() {
                if let Err(e) = state.rerun_for_selection() {
                    state.error_message = Some(format!("{:#}", e));
                }
            }
            if let Some(column) = selected {
                ui.label(format!("Selected column: {}", column));
            }
        });
    });
    ui.separator();
}

fn show_kpi_cards(ui: &mut egui::Ui, kpi: &KpiData) {
    let cards = kpi_cards(kpi);
    ui.columns(cards.len(), |cols| {
        for (col, card) in cols.iter_mut().zip(cards.iter()) {
            col.group(|ui| {
                ui.label(egui::RichText::new(card.title).weak());
                ui.label(egui::RichText::new(&card.value).size(24.0).strong());
                ui.colored_label(
                    color(card.polarity.color()),
                    format!("{} {}", delta_arrow(card.delta), card.delta_label),
                );
            });
        }
    });
}

fn show_insights(ui: &mut egui::Ui, insights: &Report<Vec<String>>) {
    ui.heading("Insights");
    match insights {
        Report::Present(items) if items.is_empty() => {
            ui.label("No findings.");
        }
        Report::Present(items) => {
            for item in items {
                ui.label(format!("• {}", item));
            }
        }
        Report::Absent => waiting(ui, "insights"),
    }
}

fn show_health(ui: &mut egui::Ui, health: &Report<DataHealth>) {
    ui.heading("Data Health");
    let Report::Present(health) = health else {
        waiting(ui, "the health summary");
        return;
    };

    match health_view(health) {
        HealthView::Metrics(metrics) => {
            egui::Grid::new("health_grid")
                .num_columns(2)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    for metric in &metrics {
                        ui.label(&metric.metric);
                        ui.colored_label(color(status_color(metric.status)), &metric.value);
                        ui.end_row();
                    }
                });
        }
        HealthView::Raw(text) => {
            ui.label(egui::RichText::new(text).monospace());
        }
    }
}

/// Column list; a click on a row activates that column.
fn show_dictionary(
    ui: &mut egui::Ui,
    dictionary: &Report<DataDictionary>,
    selected: Option<&str>,
) -> Option<ColumnActivated> {
    ui.heading("Data Dictionary");
    let Report::Present(dictionary) = dictionary else {
        waiting(ui, "the data dictionary");
        return None;
    };
    if dictionary.is_empty() {
        ui.label("No columns.");
        return None;
    }

    let mut activated = None;
    egui::ScrollArea::vertical()
        .id_source("dictionary_scroll")
        .max_height(360.0)
        .show(ui, |ui| {
            egui::Grid::new("dictionary_grid")
                .num_columns(4)
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Column");
                    ui.strong("Type");
                    ui.strong("Unique");
                    ui.strong("Description");
                    ui.end_row();

                    for entry in dictionary.entries() {
                        let is_selected = selected == Some(entry.column_name.as_str());
                        if ui.selectable_label(is_selected, &entry.column_name).clicked() {
                            activated = Some(ColumnActivated(entry.column_name.clone()));
                        }
                        ui.label(entry.column_type.label());
                        ui.label(entry.unique_count.to_string());
                        ui.label(&entry.description);
                        ui.end_row();
                    }
                });
        });
    activated
}
