// src/charts/mod.rs
//! Renderer-agnostic chart and table configurations. Every function here is
//! pure: the same sub-report and selection always give the same config.

pub mod distribution;
pub mod health;
pub mod heatmap;
pub mod kpi;
pub mod table;
pub mod trend;

pub use distribution::{distribution_config, DistributionConfig, Viewport};
pub use health::{health_view, HealthView};
pub use heatmap::{heatmap_config, HeatmapConfig};
pub use kpi::{delta_arrow, delta_polarity, kpi_cards, KpiCard, Polarity};
pub use table::{format_cell, table_config, SortKey, TableConfig, NULL_PLACEHOLDER};
pub use trend::{trend_config, TrendConfig, TrendView, NO_TREND_MESSAGE};

/// A column was chosen by a bar click, a header click or a list click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnActivated(pub String);

/// Plain sRGB triple so configs stay independent of the GUI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const ACCENT: Rgb = Rgb(37, 99, 235);
pub const ACCENT_DARK: Rgb = Rgb(30, 64, 175);
pub const POSITIVE: Rgb = Rgb(22, 163, 74);
pub const NEGATIVE: Rgb = Rgb(220, 38, 38);
pub const NEUTRAL: Rgb = Rgb(107, 114, 128);
