// src/analysis/mod.rs
pub mod correlation;
pub mod dataset;
pub mod distribution;
pub mod profile;
pub mod result;
pub mod timeseries;

use std::time::Instant;
use thiserror::Error;

use crate::config::AnalysisSettings;

// Re-export commonly used types
pub use dataset::Dataset;
pub use result::{
    AnalysisPayload,
    AnalysisResult,
    Bucket,
    CellValue,
    ColumnDef,
    ColumnDistribution,
    ColumnType,
    CorrelationMatrix,
    DataDictionary,
    DataHealth,
    DeltaType,
    DictionaryEntry,
    HealthMetric,
    HealthStatus,
    KpiData,
    Report,
    Row,
    SubReport,
    TableData,
    TimeSeries,
};

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("{role} column '{column}' not found in file")]
    ColumnNotFound { role: &'static str, column: String },
    #[error("dataset has no columns")]
    EmptyDataset,
}

/// Per-run choices on top of the configured tuning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisRequest {
    pub distribution_column: Option<String>,
    pub time_column: Option<String>,
}

/// Runs every deriver over `dataset` and assembles the producer payload.
pub fn run_analysis(
    dataset: &Dataset,
    request: &AnalysisRequest,
    settings: &AnalysisSettings,
    baseline: Option<&KpiData>,
) -> Result<AnalysisPayload, AnalysisError> {
    let started = Instant::now();

    let kpi = profile::kpis(dataset, baseline);
    let payload = AnalysisPayload {
        insights: Some(profile::insights(dataset, &kpi, settings.high_cardinality_threshold)),
        dictionary: Some(profile::dictionary(dataset)),
        column_dist: Some(distribution::column_distribution(
            dataset,
            request.distribution_column.as_deref(),
            settings.distribution_buckets,
        )?),
        time_series: Some(timeseries::time_series(
            dataset,
            request.time_column.as_deref(),
            settings.date_detection_ratio,
        )?),
        table_data: Some(profile::table_data(dataset, settings.preview_rows)),
        data_health: Some(profile::data_health(dataset)),
        correlation_matrix: correlation::correlation_matrix(dataset, settings.max_correlation_columns),
        kpi_data: Some(kpi),
    };

    log::info!(
        "Analyzed '{}' ({} rows x {} columns) in {:?}",
        dataset.name,
        dataset.row_count(),
        dataset.column_count(),
        started.elapsed()
    );

    Ok(payload)
}
