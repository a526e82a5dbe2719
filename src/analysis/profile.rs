// src/analysis/profile.rs

use super::dataset::{parse_bool, Dataset};
use super::result::{
    CellValue, ColumnDef, ColumnType, DataDictionary, DataHealth, DeltaType, DictionaryEntry,
    HealthMetric, HealthStatus, KpiData, Row, TableData,
};

fn percent(part: usize, whole: usize) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64 * 100.0
    } else {
        0.0
    }
}

/// Groups digits in threes: 1234567 -> "1,234,567".
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Summary metrics. Deltas are measured against `baseline` when one exists.
pub fn kpis(dataset: &Dataset, baseline: Option<&KpiData>) -> KpiData {
    let total_records = dataset.row_count() as f64;
    let data_quality = if dataset.total_cells() > 0 {
        percent(dataset.total_cells() - dataset.total_missing(), dataset.total_cells())
    } else {
        0.0
    };
    let columns = dataset.column_count() as f64;
    let anomalies = dataset.duplicate_rows() as f64;

    let delta = |current: f64, previous: fn(&KpiData) -> f64| {
        baseline.map(|b| current - previous(b)).unwrap_or(0.0)
    };

    KpiData {
        total_records,
        total_records_delta: delta(total_records, |b| b.total_records),
        data_quality,
        data_quality_delta: delta(data_quality, |b| b.data_quality),
        columns,
        columns_delta: delta(columns, |b| b.columns),
        anomalies,
        anomalies_delta: delta(anomalies, |b| b.anomalies),
        anomalies_delta_type: Some(DeltaType::IncreaseIsBad),
    }
}

pub fn insights(dataset: &Dataset, kpi: &KpiData, high_cardinality: usize) -> Vec<String> {
    let mut out = vec![
        format!("Analysis complete for {} records.", thousands(dataset.row_count())),
        format!(
            "Data Quality Score is {:.1}%. Check 'Data Health' for details on missing values.",
            kpi.data_quality
        ),
    ];

    let duplicates = dataset.duplicate_rows();
    if duplicates > 0 {
        out.push(format!(
            "Found {} duplicate rows. Recommend running 'Deduplication' process.",
            thousands(duplicates)
        ));
    }

    let types = dataset.column_types();
    let wide = types.iter()
        .enumerate()
        .filter(|(_, t)| **t == ColumnType::Text)
        .map(|(i, _)| (i, dataset.unique_count(i)))
        .find(|(_, unique)| *unique > high_cardinality);
    if let Some((index, unique)) = wide {
        out.push(format!(
            "Column '{}' has high cardinality ({} unique values). May be difficult to visualize.",
            dataset.headers[index], unique
        ));
    }

    out
}

pub fn dictionary(dataset: &Dataset) -> DataDictionary {
    let mut dictionary = DataDictionary::default();
    for (index, column_type) in dataset.column_types().into_iter().enumerate() {
        let missing = dataset.missing_count(index);
        let missing_percent = percent(missing, dataset.row_count());
        dictionary.insert(DictionaryEntry {
            column_name: dataset.headers[index].clone(),
            column_type,
            description: format!("{:.1}% missing", missing_percent),
            null_rate: missing_percent / 100.0,
            unique_count: dataset.unique_count(index),
        });
    }
    dictionary
}

fn typed_cell(raw: Option<&str>, column_type: ColumnType) -> CellValue {
    let Some(raw) = raw else {
        return CellValue::Null;
    };
    let parsed = match column_type {
        ColumnType::Integer | ColumnType::Float => raw.trim().parse::<f64>().ok().map(CellValue::Number),
        ColumnType::Boolean => parse_bool(raw).map(CellValue::Bool),
        _ => None,
    };
    parsed.unwrap_or_else(|| CellValue::Text(raw.to_string()))
}

/// Preview of the first `limit` rows. Every row carries every column key.
pub fn table_data(dataset: &Dataset, limit: usize) -> TableData {
    let types = dataset.column_types();
    let column_defs = dataset.headers.iter().map(|h| ColumnDef::new(h)).collect();

    let row_data = dataset.rows.iter()
        .take(limit)
        .map(|row| {
            dataset.headers.iter()
                .enumerate()
                .map(|(i, header)| {
                    let raw = row.get(i).and_then(|c| c.as_deref());
                    (header.clone(), typed_cell(raw, types[i]))
                })
                .collect::<Row>()
        })
        .collect();

    TableData { column_defs, row_data }
}

pub fn health_metrics(dataset: &Dataset) -> Vec<HealthMetric> {
    let metric = |name: &str, value: String, status: HealthStatus| HealthMetric {
        metric: name.to_string(),
        value,
        status,
    };

    if dataset.is_empty() {
        return vec![
            metric("Completeness", "0%".into(), HealthStatus::Negative),
            metric("Uniqueness", "0%".into(), HealthStatus::Negative),
        ];
    }

    let missing = dataset.total_missing();
    let completeness = percent(dataset.total_cells() - missing, dataset.total_cells());
    let duplicates = dataset.duplicate_rows();
    let duplicate_percent = percent(duplicates, dataset.row_count());

    let ok_if = |clean: bool| if clean { HealthStatus::Positive } else { HealthStatus::Negative };

    vec![
        metric(
            "Completeness",
            format!("{:.1}%", completeness),
            if completeness > 95.0 { HealthStatus::Positive } else { HealthStatus::Neutral },
        ),
        metric("Uniqueness", format!("{:.1}%", 100.0 - duplicate_percent), ok_if(duplicates == 0)),
        metric("Total Duplicates", thousands(duplicates), ok_if(duplicates == 0)),
        metric("Missing Values", thousands(missing), ok_if(missing == 0)),
    ]
}

pub fn data_health(dataset: &Dataset) -> DataHealth {
    DataHealth::from_metrics(&health_metrics(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::dataset::tests::dataset;

    fn sample() -> Dataset {
        dataset(
            &["id", "region", "score"],
            &[
                &["1", "EU", "0.5"],
                &["2", "US", ""],
                &["2", "US", ""],
                &["3", "EU", "1.5"],
            ],
        )
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_kpis_without_baseline() {
        let kpi = kpis(&sample(), None);
        assert_eq!(kpi.total_records, 4.0);
        assert_eq!(kpi.columns, 3.0);
        assert_eq!(kpi.anomalies, 1.0);
        assert!((kpi.data_quality - 10.0 / 12.0 * 100.0).abs() < 1e-9);
        assert_eq!(kpi.total_records_delta, 0.0);
        assert_eq!(kpi.anomalies_delta_type, Some(DeltaType::IncreaseIsBad));
    }

    #[test]
    fn test_kpi_deltas_against_baseline() {
        let previous = kpis(&dataset(&["id"], &[&["1"]]), None);
        let kpi = kpis(&sample(), Some(&previous));
        assert_eq!(kpi.total_records_delta, 3.0);
        assert_eq!(kpi.columns_delta, 2.0);
        assert_eq!(kpi.anomalies_delta, 1.0);
    }

    #[test]
    fn test_insights_mention_duplicates() {
        let ds = sample();
        let kpi = kpis(&ds, None);
        let found = insights(&ds, &kpi, 50);
        assert_eq!(found[0], "Analysis complete for 4 records.");
        assert!(found.iter().any(|i| i.starts_with("Found 1 duplicate rows")));
    }

    #[test]
    fn test_insights_flag_high_cardinality_text() {
        let ds = sample();
        let found = insights(&ds, &kpis(&ds, None), 1);
        assert!(found.last().unwrap().contains("Column 'region' has high cardinality (2 unique values)"));
    }

    #[test]
    fn test_dictionary_in_column_order() {
        let dict = dictionary(&sample());
        let names: Vec<&str> = dict.entries().iter().map(|e| e.column_name.as_str()).collect();
        assert_eq!(names, vec!["id", "region", "score"]);
        let score = dict.get("score").unwrap();
        assert_eq!(score.column_type, ColumnType::Float);
        assert_eq!(score.description, "50.0% missing");
        assert_eq!(score.null_rate, 0.5);
    }

    #[test]
    fn test_table_rows_have_every_key() {
        let table = table_data(&sample(), 3);
        assert_eq!(table.row_data.len(), 3);
        for row in &table.row_data {
            for def in &table.column_defs {
                assert!(row.contains_key(&def.field));
            }
        }
        assert_eq!(table.row_data[0]["id"], CellValue::Number(1.0));
        assert_eq!(table.row_data[0]["region"], CellValue::Text("EU".into()));
        assert_eq!(table.row_data[1]["score"], CellValue::Null);
    }

    #[test]
    fn test_health_metrics() {
        let metrics = health_metrics(&sample());
        let names: Vec<&str> = metrics.iter().map(|m| m.metric.as_str()).collect();
        assert_eq!(names, vec!["Completeness", "Uniqueness", "Total Duplicates", "Missing Values"]);
        assert_eq!(metrics[0].status, HealthStatus::Neutral);
        assert_eq!(metrics[1].value, "75.0%");
        assert_eq!(metrics[3].value, "2");
        assert_eq!(metrics[3].status, HealthStatus::Negative);
    }

    #[test]
    fn test_health_for_empty_dataset() {
        let metrics = health_metrics(&dataset(&["a"], &[]));
        assert_eq!(metrics.len(), 2);
        assert!(metrics.iter().all(|m| m.status == HealthStatus::Negative));
    }
}
