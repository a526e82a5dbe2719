// src/charts/heatmap.rs
use crate::analysis::CorrelationMatrix;
use super::{ColumnActivated, Rgb, ACCENT, NEGATIVE};

const WHITE: Rgb = Rgb(255, 255, 255);

#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    pub title: &'static str,
    pub columns: Vec<String>,
    pub cells: Vec<HeatCell>,
}

impl HeatmapConfig {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn row_clicked(&self, row: usize) -> Option<ColumnActivated> {
        self.columns.get(row).cloned().map(ColumnActivated)
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Diverging scale: -1 red, 0 white, +1 blue. Values are clamped to [-1, 1].
pub fn heat_color(value: f64) -> Rgb {
    let v = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };
    let (target, t) = if v >= 0.0 { (ACCENT, v) } else { (NEGATIVE, -v) };
    Rgb(
        lerp(WHITE.0, target.0, t),
        lerp(WHITE.1, target.1, t),
        lerp(WHITE.2, target.2, t),
    )
}

/// `None` when the matrix is empty or not square over its column list.
pub fn heatmap_config(matrix: &CorrelationMatrix) -> Option<HeatmapConfig> {
    if matrix.columns.is_empty() {
        return None;
    }
    if !matrix.is_well_formed() {
        log::warn!(
            "Ignoring malformed correlation matrix over {} columns",
            matrix.columns.len()
        );
        return None;
    }

    let cells = matrix.values.iter()
        .enumerate()
        .flat_map(|(row, values)| {
            values.iter().enumerate().map(move |(col, &value)| HeatCell {
                row,
                col,
                value,
                label: format!("{:.2}", value),
                color: heat_color(value),
            })
        })
        .collect();

    Some(HeatmapConfig {
        title: "Correlation Matrix",
        columns: matrix.columns.clone(),
        cells,
    })
}
