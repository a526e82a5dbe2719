// src/charts/distribution.rs
use crate::analysis::ColumnDistribution;
use super::{ColumnActivated, Rgb, ACCENT, ACCENT_DARK};

/// Visible window over the category axis, in percent of the full range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub start_percent: f64,
    pub end_percent: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            start_percent: 0.0,
            end_percent: 100.0,
        }
    }
}

impl Viewport {
    /// Plot-space x range for `len` categories centred on 0, 1, ...
    pub fn x_range(&self, len: usize) -> (f64, f64) {
        let lo = -0.5;
        let span = len.max(1) as f64;
        (
            lo + span * self.start_percent / 100.0,
            lo + span * self.end_percent / 100.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionConfig {
    pub title: String,
    /// Column whose counts the bars show.
    pub charted_column: String,
    pub categories: Vec<String>,
    pub series_name: &'static str,
    pub values: Vec<f64>,
    pub bar_width: f64,
    pub color: Rgb,
    pub hover_color: Rgb,
    pub viewport: Viewport,
}

impl DistributionConfig {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Bucket index under a plot x coordinate, if any.
    pub fn bucket_at(&self, x: f64) -> Option<usize> {
        let index = x.round();
        if index < 0.0 || (x - index).abs() > self.bar_width / 2.0 {
            return None;
        }
        let index = index as usize;
        (index < self.categories.len()).then_some(index)
    }

    /// A bar belongs to the charted column, so clicking it activates that
    /// column whatever is selected.
    pub fn bar_clicked(&self, x: f64) -> Option<ColumnActivated> {
        self.bucket_at(x)?;
        Some(ColumnActivated(self.charted_column.clone()))
    }
}

pub fn distribution_config(
    distribution: &ColumnDistribution,
    selected_column: Option<&str>,
) -> DistributionConfig {
    let chart_data = &distribution.chart_data;
    let title = match selected_column {
        Some(column) => format!("Distribution of: {}", column),
        None => "Distribution".to_string(),
    };

    DistributionConfig {
        title,
        charted_column: distribution.column_name.clone(),
        categories: chart_data.iter().map(|b| b.name.clone()).collect(),
        series_name: "Count",
        values: chart_data.iter().map(|b| b.value).collect(),
        bar_width: 0.6,
        color: ACCENT,
        hover_color: ACCENT_DARK,
        viewport: Viewport::default(),
    }
}
