// src/analysis/distribution.rs

use std::collections::HashMap;

use super::dataset::Dataset;
use super::result::{Bucket, ColumnDistribution, ColumnType};
use super::AnalysisError;

/// Column used when the caller does not name one: the first text column,
/// otherwise the first column.
pub fn default_distribution_column(dataset: &Dataset) -> Option<usize> {
    if dataset.column_count() == 0 {
        return None;
    }
    let types = dataset.column_types();
    types.iter()
        .position(|t| *t == ColumnType::Text)
        .or(Some(0))
}

/// Top `limit` value counts of a column, largest first. Ties keep the order in
/// which the values first appear; missing cells are not counted.
pub fn value_counts(dataset: &Dataset, index: usize, limit: usize) -> Vec<Bucket> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for value in dataset.present_values(index) {
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order.into_iter()
        .map(|value| (value, counts[value]))
        .collect();
    // stable: equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked.into_iter()
        .take(limit)
        .map(|(name, count)| Bucket {
            name: name.to_string(),
            value: count as f64,
        })
        .collect()
}

pub fn column_distribution(
    dataset: &Dataset,
    target: Option<&str>,
    limit: usize,
) -> Result<ColumnDistribution, AnalysisError> {
    if dataset.is_empty() || dataset.column_count() == 0 {
        return Ok(ColumnDistribution {
            column_name: "N/A".to_string(),
            chart_data: Vec::new(),
        });
    }

    let index = match target {
        Some(name) => dataset.column_index(name).ok_or_else(|| AnalysisError::ColumnNotFound {
            role: "distribution",
            column: name.to_string(),
        })?,
        None => default_distribution_column(dataset).ok_or(AnalysisError::EmptyDataset)?,
    };

    log::debug!("Computing distribution for column '{}'", dataset.headers[index]);

    Ok(ColumnDistribution {
        column_name: dataset.headers[index].clone(),
        chart_data: value_counts(dataset, index, limit),
    })
}
