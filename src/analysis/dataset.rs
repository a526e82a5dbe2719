// src/analysis/dataset.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use super::result::ColumnType;

/// Raw tabular data as read from a file. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y-%m",
    "%b %d %Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parses the date part of a cell. Plain numbers are never treated as dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() || s.parse::<f64>().is_ok() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        // "%Y-%m" has no day; pin it to the first.
        let parsed = if fmt == "%Y-%m" {
            NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        } else {
            NaiveDate::parse_from_str(s, fmt)
        };
        if let Ok(date) = parsed {
            return Some(date);
        }
    }
    None
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl Dataset {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell values of one column, `None` where missing.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows.iter().map(move |row| row.get(index).and_then(|c| c.as_deref()))
    }

    pub fn present_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.column(index).flatten()
    }

    pub fn missing_count(&self, index: usize) -> usize {
        self.column(index).filter(Option::is_none).count()
    }

    pub fn total_missing(&self) -> usize {
        (0..self.column_count()).map(|i| self.missing_count(i)).sum()
    }

    pub fn total_cells(&self) -> usize {
        self.row_count() * self.column_count()
    }

    pub fn unique_count(&self, index: usize) -> usize {
        self.present_values(index).collect::<HashSet<_>>().len()
    }

    /// Rows identical to an earlier row.
    pub fn duplicate_rows(&self) -> usize {
        let mut seen = HashSet::new();
        self.rows.iter().filter(|row| !seen.insert(row.as_slice())).count()
    }

    pub fn infer_type(&self, index: usize) -> ColumnType {
        let values: Vec<&str> = self.present_values(index).map(str::trim).collect();
        if values.is_empty() {
            return ColumnType::Empty;
        }
        if values.iter().all(|v| v.parse::<i64>().is_ok()) {
            ColumnType::Integer
        } else if values.iter().all(|v| v.parse::<f64>().is_ok()) {
            ColumnType::Float
        } else if values.iter().all(|v| parse_bool(v).is_some()) {
            ColumnType::Boolean
        } else if values.iter().all(|v| parse_date(v).is_some()) {
            ColumnType::Date
        } else {
            ColumnType::Text
        }
    }

    pub fn column_types(&self) -> Vec<ColumnType> {
        (0..self.column_count()).map(|i| self.infer_type(i)).collect()
    }

    /// Per-row numeric values of a column; unparseable cells count as missing.
    pub fn numeric_column(&self, index: usize) -> Vec<Option<f64>> {
        self.column(index)
            .map(|cell| cell.and_then(|v| v.trim().parse::<f64>().ok()))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn dataset(headers: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::new(
            "test.csv",
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter()
                    .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                    .collect())
                .collect(),
        )
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_date("2024-03-15"), expected);
        assert_eq!(parse_date("2024/03/15"), expected);
        assert_eq!(parse_date("03/15/2024"), expected);
        assert_eq!(parse_date("2024-03-15 10:30:00"), expected);
        assert_eq!(parse_date("2024-03-15T10:30:00Z"), expected);
        assert_eq!(parse_date("2024-03"), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_numbers_are_not_dates() {
        assert_eq!(parse_date("20240315"), None);
        assert_eq!(parse_date("42"), None);
        assert_eq!(parse_date("hello"), None);
    }

    #[test]
    fn test_infer_types() {
        let ds = dataset(
            &["int", "float", "flag", "when", "name", "blank"],
            &[
                &["1", "1.5", "true", "2024-01-01", "a", ""],
                &["2", "", "False", "2024-02-01", "b", ""],
                &["", "3", "true", "", "3", ""],
            ],
        );
        assert_eq!(
            ds.column_types(),
            vec![
                ColumnType::Integer,
                ColumnType::Float,
                ColumnType::Boolean,
                ColumnType::Date,
                ColumnType::Text,
                ColumnType::Empty,
            ]
        );
    }

    #[test]
    fn test_missing_and_duplicates() {
        let ds = dataset(&["a", "b"], &[&["1", "x"], &["1", "x"], &["2", ""], &["1", "x"]]);
        assert_eq!(ds.total_missing(), 1);
        assert_eq!(ds.total_cells(), 8);
        assert_eq!(ds.duplicate_rows(), 2);
        assert_eq!(ds.unique_count(0), 2);
    }
}
