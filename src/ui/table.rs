// src/ui/table.rs
use eframe::egui;

use crate::analysis::TableData;
use crate::charts::{table_config, ColumnActivated, SortKey};

/// Data preview grid. Header clicks sort the rows and activate the column;
/// the updated sort is returned alongside.
pub fn show_table(
    ui: &mut egui::Ui,
    table: &TableData,
    selected_column: Option<&str>,
    sort: Option<SortKey>,
) -> (Option<ColumnActivated>, Option<SortKey>) {
    let mut config = table_config(table, selected_column);
    if let Some(key) = sort {
        config.apply_sort(key);
    }

    ui.heading("Data Preview");
    if config.is_empty() {
        ui.label("No columns to preview.");
        return (None, config.sort);
    }
    ui.label(egui::RichText::new(format!("{} rows", config.rows.len())).weak());

    let mut clicked = None;
    egui::ScrollArea::both()
        .id_source("preview_scroll")
        .max_height(320.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("preview_grid")
                .striped(true)
                .min_col_width(60.0)
                .show(ui, |ui| {
                    for (i, header) in config.headers.iter().enumerate() {
                        let marker = match config.sort {
                            Some(SortKey { column, descending }) if column == i => {
                                if descending { " ⏷" } else { " ⏶" }
                            }
                            _ => "",
                        };
                        let text = egui::RichText::new(format!("{}{}", header.label, marker)).strong();
                        if ui.selectable_label(header.active, text).clicked() {
                            clicked = Some(i);
                        }
                    }
                    ui.end_row();

                    for row in 0..config.rows.len() {
                        for cell in config.display_row(row) {
                            ui.label(cell);
                        }
                        ui.end_row();
                    }
                });
        });

    match clicked {
        Some(index) => {
            config.toggle_sort(index);
            (config.header_clicked(index), config.sort)
        }
        None => (None, config.sort),
    }
}
