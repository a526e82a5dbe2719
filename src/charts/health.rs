// src/charts/health.rs
use crate::analysis::{DataHealth, HealthMetric, HealthStatus};
use super::{Rgb, NEGATIVE, NEUTRAL, POSITIVE};

/// The health summary is opaque; it is shown as a metric list when it has
/// that shape and as pretty-printed JSON otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthView {
    Metrics(Vec<HealthMetric>),
    Raw(String),
}

pub fn status_color(status: HealthStatus) -> Rgb {
    match status {
        HealthStatus::Positive => POSITIVE,
        HealthStatus::Neutral => NEUTRAL,
        HealthStatus::Negative => NEGATIVE,
    }
}

pub fn health_view(health: &DataHealth) -> HealthView {
    match health.metrics() {
        Some(metrics) => HealthView::Metrics(metrics),
        None => HealthView::Raw(
            serde_json::to_string_pretty(&health.0).unwrap_or_else(|_| health.0.to_string()),
        ),
    }
}
