// src/charts/table.rs
use std::cmp::Ordering;

use crate::analysis::{CellValue, TableData};
use super::ColumnActivated;

/// Shown for null and missing cells.
pub const NULL_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub field: String,
    pub label: String,
    pub sortable: bool,
    pub resizable: bool,
    /// Header of the currently selected column.
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub headers: Vec<HeaderCell>,
    /// Raw cells aligned with `headers`; missing keys are already `Null`.
    pub rows: Vec<Vec<CellValue>>,
    pub sort: Option<SortKey>,
}

impl TableConfig {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn display_row(&self, row: usize) -> Vec<String> {
        self.rows.get(row)
            .map(|cells| cells.iter().map(format_cell).collect())
            .unwrap_or_default()
    }

    /// Clicking a header activates its column. Out-of-range indices are ignored.
    pub fn header_clicked(&self, index: usize) -> Option<ColumnActivated> {
        self.headers.get(index).map(|h| ColumnActivated(h.field.clone()))
    }

    /// Sorts rows by one column; a second call on the same column flips the
    /// direction. Unsortable columns are left alone.
    pub fn toggle_sort(&mut self, column: usize) {
        let descending = matches!(self.sort, Some(SortKey { column: c, descending: false }) if c == column);
        self.apply_sort(SortKey { column, descending });
    }

    /// Re-applies a sort remembered from an earlier frame.
    pub fn apply_sort(&mut self, key: SortKey) {
        if !self.headers.get(key.column).is_some_and(|h| h.sortable) {
            return;
        }
        self.rows.sort_by(|a, b| {
            let ordering = compare_cells(&a[key.column], &b[key.column]);
            if key.descending { ordering.reverse() } else { ordering }
        });
        self.sort = Some(key);
    }
}

/// Nulls sort last, then booleans, numbers and text each in natural order.
fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    fn rank(cell: &CellValue) -> u8 {
        match cell {
            CellValue::Bool(_) => 0,
            CellValue::Number(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::Null => 3,
        }
    }
    match (a, b) {
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

pub fn format_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => NULL_PLACEHOLDER.to_string(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{:.0}", n),
        CellValue::Number(n) => {
            let text = format!("{:.4}", n);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        CellValue::Text(s) => s.clone(),
    }
}

pub fn table_config(table: &TableData, selected_column: Option<&str>) -> TableConfig {
    let headers = table.column_defs.iter()
        .map(|def| HeaderCell {
            field: def.field.clone(),
            label: def.header_name.clone(),
            sortable: def.sortable,
            resizable: def.resizable,
            active: selected_column == Some(def.field.as_str()),
        })
        .collect();

    let rows = table.row_data.iter()
        .map(|row| {
            table.column_defs.iter()
                .map(|def| table.cell(row, &def.field).clone())
                .collect()
        })
        .collect();

    TableConfig { headers, rows, sort: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ColumnDef, Row};

    fn table() -> TableData {
        let mut first = Row::new();
        first.insert("region".into(), CellValue::Text("EU".into()));
        first.insert("sales".into(), CellValue::Number(12.5));
        let mut second = Row::new();
        second.insert("region".into(), CellValue::Null);
        second.insert("sales".into(), CellValue::Number(3.0));
        let mut third = Row::new();
        third.insert("region".into(), CellValue::Text("APAC".into()));

        TableData {
            column_defs: vec![ColumnDef::new("region"), ColumnDef::new("sales")],
            row_data: vec![first, second, third],
        }
    }

    #[test]
    fn test_header_click_emits_field() {
        let config = table_config(&table(), None);
        assert_eq!(config.header_clicked(0), Some(ColumnActivated("region".into())));
        assert_eq!(config.header_clicked(9), None);
    }

    #[test]
    fn test_active_header_follows_selection() {
        let config = table_config(&table(), Some("sales"));
        let active: Vec<bool> = config.headers.iter().map(|h| h.active).collect();
        assert_eq!(active, vec![false, true]);
    }

    #[test]
    fn test_nulls_and_missing_keys_use_placeholder() {
        let config = table_config(&table(), None);
        assert_eq!(config.display_row(0), vec!["EU", "12.5"]);
        assert_eq!(config.display_row(1), vec![NULL_PLACEHOLDER, "3"]);
        assert_eq!(config.display_row(2), vec!["APAC", NULL_PLACEHOLDER]);
        for row in 0..config.rows.len() {
            for text in config.display_row(row) {
                assert_ne!(text, "null");
                assert_ne!(text, "undefined");
            }
        }
    }

    #[test]
    fn test_format_cell_by_type() {
        assert_eq!(format_cell(&CellValue::Bool(true)), "true");
        assert_eq!(format_cell(&CellValue::Number(1200.0)), "1200");
        assert_eq!(format_cell(&CellValue::Number(0.123456)), "0.1235");
        assert_eq!(format_cell(&CellValue::Number(-2.5)), "-2.5");
        assert_eq!(format_cell(&CellValue::Text(String::new())), "");
    }

    #[test]
    fn test_sort_toggles_and_keeps_nulls_last() {
        let mut config = table_config(&table(), None);
        config.toggle_sort(1);
        assert_eq!(config.display_row(0)[1], "3");
        assert_eq!(config.display_row(2)[1], NULL_PLACEHOLDER);

        config.toggle_sort(1);
        assert_eq!(config.sort, Some(SortKey { column: 1, descending: true }));
        assert_eq!(config.display_row(0)[1], NULL_PLACEHOLDER);
        assert_eq!(config.display_row(1)[1], "12.5");
    }

    #[test]
    fn test_remembered_sort_is_reapplied() {
        let mut config = table_config(&table(), None);
        config.apply_sort(SortKey { column: 0, descending: false });
        assert_eq!(config.display_row(0)[0], "APAC");
        assert_eq!(config.display_row(2)[0], NULL_PLACEHOLDER);

        let mut out_of_range = table_config(&table(), None);
        out_of_range.apply_sort(SortKey { column: 5, descending: false });
        assert_eq!(out_of_range.sort, None);
    }

    #[test]
    fn test_unsortable_column_is_left_alone() {
        let mut data = table();
        data.column_defs[0].sortable = false;
        let mut config = table_config(&data, None);
        let before = config.rows.clone();
        config.toggle_sort(0);
        assert_eq!(config.rows, before);
        assert_eq!(config.sort, None);
    }
}
