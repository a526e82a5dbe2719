// src/analysis/timeseries.rs

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashSet};

use super::dataset::{parse_date, Dataset};
use super::result::{Series, SeriesPoint, TimeSeries};
use super::AnalysisError;

pub const RECORD_COUNT_SERIES: &str = "Record Count";

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// First column where at least `min_ratio` of the present values parse as
/// dates and more than one distinct date occurs.
pub fn detect_time_column(dataset: &Dataset, min_ratio: f64) -> Option<usize> {
    (0..dataset.column_count()).find(|&index| {
        let present: Vec<&str> = dataset.present_values(index).collect();
        if present.is_empty() {
            return false;
        }
        let parsed: Vec<NaiveDate> = present.iter().filter_map(|v| parse_date(v)).collect();
        let ratio = parsed.len() as f64 / present.len() as f64;
        let distinct: HashSet<&NaiveDate> = parsed.iter().collect();
        ratio >= min_ratio && distinct.len() > 1
    })
}

/// Rows per calendar month, labelled by month-end date. Months without rows
/// between the first and last month are reported as zero.
pub fn monthly_counts(dates: &[NaiveDate]) -> Vec<(NaiveDate, usize)> {
    let mut buckets: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for date in dates {
        *buckets.entry((date.year(), date.month())).or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let (mut year, mut month) = first;
    while (year, month) <= last {
        if let Some(end) = month_end(year, month) {
            out.push((end, buckets.get(&(year, month)).copied().unwrap_or(0)));
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    out
}

pub fn time_series(
    dataset: &Dataset,
    target: Option<&str>,
    min_ratio: f64,
) -> Result<TimeSeries, AnalysisError> {
    if dataset.is_empty() {
        return Ok(TimeSeries::without_time_column());
    }

    let index = match target {
        Some(name) => Some(dataset.column_index(name).ok_or_else(|| AnalysisError::ColumnNotFound {
            role: "time",
            column: name.to_string(),
        })?),
        None => detect_time_column(dataset, min_ratio),
    };

    let Some(index) = index else {
        log::debug!("No time column detected in '{}'", dataset.name);
        return Ok(TimeSeries::without_time_column());
    };

    let dates: Vec<NaiveDate> = dataset.present_values(index).filter_map(parse_date).collect();
    if dates.is_empty() {
        // an explicit target that never parses
        return Ok(TimeSeries::without_time_column());
    }

    let column = dataset.headers[index].clone();
    log::debug!("Using '{}' as time column ({} dated rows)", column, dates.len());

    let data = monthly_counts(&dates)
        .into_iter()
        .map(|(end, count)| SeriesPoint::Labeled {
            name: end.format("%Y-%m-%d").to_string(),
            value: Some(count as f64),
        })
        .collect();

    Ok(TimeSeries {
        time_column: Some(column),
        series_data: vec![Series {
            name: RECORD_COUNT_SERIES.to_string(),
            data,
        }],
        x_axis_data: None,
    })
}
