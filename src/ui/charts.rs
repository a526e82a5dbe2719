// src/ui/charts.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};

use crate::analysis::{ColumnDistribution, CorrelationMatrix, TimeSeries};
use crate::charts::{
    distribution_config, heatmap_config, trend_config, ColumnActivated, Rgb, TrendView,
    NO_TREND_MESSAGE,
};
use super::color;

const SERIES_COLORS: [Rgb; 5] = [
    Rgb(37, 99, 235),
    Rgb(234, 88, 12),
    Rgb(22, 163, 74),
    Rgb(147, 51, 234),
    Rgb(219, 39, 119),
];

/// Bar chart of the distribution. A click on a bar returns the charted column.
pub fn show_distribution(
    ui: &mut egui::Ui,
    distribution: &ColumnDistribution,
    selected_column: Option<&str>,
) -> Option<ColumnActivated> {
    let config = distribution_config(distribution, selected_column);
    ui.heading(&config.title);
    if selected_column != Some(config.charted_column.as_str()) {
        ui.label(egui::RichText::new(format!("Counts for {}", config.charted_column)).weak());
    }
    if config.is_empty() {
        ui.label("No values to chart.");
        return None;
    }

    let (x_min, x_max) = config.viewport.x_range(config.categories.len());
    let response = Plot::new("distribution_chart")
        .height(240.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_axes([false, true])
        .include_x(x_min)
        .include_x(x_max)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            let pointer = plot_ui.pointer_coordinate();
            let hovered = pointer.and_then(|p| config.bucket_at(p.x));
            let bars: Vec<Bar> = config.categories.iter()
                .zip(&config.values)
                .enumerate()
                .map(|(i, (name, value))| {
                    let fill = if hovered == Some(i) { config.hover_color } else { config.color };
                    Bar::new(i as f64, *value)
                        .name(name)
                        .width(config.bar_width)
                        .fill(color(fill))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name(config.series_name));
            pointer
        });

    ui.horizontal_wrapped(|ui| {
        for (name, value) in config.categories.iter().zip(&config.values) {
            ui.small(format!("{}: {}", name, value));
        }
    });

    if response.response.clicked() {
        return response.inner.and_then(|p| config.bar_clicked(p.x));
    }
    None
}

pub fn show_trend(ui: &mut egui::Ui, time_series: &TimeSeries) {
    let config = match trend_config(time_series) {
        TrendView::NoTrendData => {
            ui.heading("Trend Analysis");
            ui.label(NO_TREND_MESSAGE);
            return;
        }
        TrendView::Chart(config) => config,
    };

    ui.heading(&config.title);
    let labels = config.x_axis.clone();
    Plot::new("trend_chart")
        .height(240.0)
        .legend(Legend::default())
        .include_y(0.0)
        .label_formatter(move |name, value| {
            let index = value.x.round();
            let label = if index >= 0.0 {
                labels.get(index as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            };
            if name.is_empty() {
                label
            } else {
                format!("{}\n{}: {:.1}", label, name, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for (i, line) in config.lines.iter().enumerate() {
                let stroke = color(SERIES_COLORS[i % SERIES_COLORS.len()]);
                for segment in line.segments() {
                    // egui draws straight segments, so unsmoothed series get markers
                    if segment.len() == 1 || !line.smooth {
                        plot_ui.points(
                            Points::new(segment.clone())
                                .radius(3.0)
                                .color(stroke)
                                .name(&line.name),
                        );
                    }
                    plot_ui.line(Line::new(segment).color(stroke).width(2.0).name(&line.name));
                }
            }
        });

    if let (Some(first), Some(last)) = (config.x_axis.first(), config.x_axis.last()) {
        ui.horizontal(|ui| {
            ui.small(first);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(last);
            });
        });
    }
}

/// Painted correlation grid. A click on a row header returns that column.
pub fn show_heatmap(ui: &mut egui::Ui, matrix: &CorrelationMatrix) -> Option<ColumnActivated> {
    let Some(config) = heatmap_config(matrix) else {
        ui.heading("Correlation Matrix");
        ui.label("Not enough numeric columns for correlations.");
        return None;
    };

    ui.heading(config.title);
    let n = config.size();
    let cell_size = 44.0;
    let header_width = 120.0;
    let header_height = 24.0;
    let size = egui::Vec2::new(
        header_width + n as f32 * cell_size,
        header_height + n as f32 * cell_size,
    );

    let mut activated = None;
    egui::ScrollArea::both()
        .id_source("heatmap_scroll")
        .max_height(360.0)
        .show(ui, |ui| {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            if !ui.is_rect_visible(rect) {
                return;
            }
            let painter = ui.painter();
            let text_color = ui.style().visuals.text_color();
            let hover = ui.ctx().input(|i| i.pointer.hover_pos());
            let clicked_at = response.clicked().then(|| response.interact_pointer_pos()).flatten();

            for (i, name) in config.columns.iter().enumerate() {
                let row_header = egui::Rect::from_min_size(
                    rect.left_top() + egui::Vec2::new(0.0, header_height + i as f32 * cell_size),
                    egui::Vec2::new(header_width, cell_size),
                );
                if hover.is_some_and(|p| row_header.contains(p)) {
                    painter.rect_filled(row_header, 0.0, ui.style().visuals.widgets.hovered.bg_fill);
                }
                if clicked_at.is_some_and(|p| row_header.contains(p)) {
                    activated = config.row_clicked(i);
                }
                painter.text(
                    row_header.left_center() + egui::Vec2::new(6.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    truncate(name, 14),
                    egui::FontId::default(),
                    text_color,
                );
                painter.text(
                    rect.left_top() + egui::Vec2::new(
                        header_width + (i as f32 + 0.5) * cell_size,
                        header_height / 2.0,
                    ),
                    egui::Align2::CENTER_CENTER,
                    truncate(name, 5),
                    egui::FontId::proportional(11.0),
                    text_color,
                );
            }

            for cell in &config.cells {
                let cell_rect = egui::Rect::from_min_size(
                    rect.left_top() + egui::Vec2::new(
                        header_width + cell.col as f32 * cell_size,
                        header_height + cell.row as f32 * cell_size,
                    ),
                    egui::Vec2::splat(cell_size - 2.0),
                );
                painter.rect_filled(cell_rect, 2.0, color(cell.color));
                let ink = if cell.value.abs() > 0.6 {
                    egui::Color32::WHITE
                } else {
                    egui::Color32::BLACK
                };
                painter.text(
                    cell_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    &cell.label,
                    egui::FontId::proportional(11.0),
                    ink,
                );
            }
        });

    activated
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
