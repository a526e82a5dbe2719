// src/analysis/result.rs

use serde::{Serialize, Deserialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// A sub-report slot. `Absent` means "not yet computed", never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Report<T> {
    Absent,
    Present(T),
}

impl<T> Default for Report<T> {
    fn default() -> Self {
        Report::Absent
    }
}

impl<T> From<Option<T>> for Report<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(report) => Report::Present(report),
            None => Report::Absent,
        }
    }
}

impl<T> Report<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Report::Present(_))
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            Report::Present(report) => Some(report),
            Report::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Report::Present(report) => Some(report),
            Report::Absent => None,
        }
    }
}

/// The recognized sub-reports, in producer key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubReport {
    Kpi,
    Insights,
    Dictionary,
    ColumnDistribution,
    TimeSeries,
    TableData,
    DataHealth,
    CorrelationMatrix,
}

impl SubReport {
    pub const ALL: [SubReport; 8] = [
        SubReport::Kpi,
        SubReport::Insights,
        SubReport::Dictionary,
        SubReport::ColumnDistribution,
        SubReport::TimeSeries,
        SubReport::TableData,
        SubReport::DataHealth,
        SubReport::CorrelationMatrix,
    ];

    /// Key used by the analysis producer for this sub-report.
    pub fn key(self) -> &'static str {
        match self {
            SubReport::Kpi => "kpiData",
            SubReport::Insights => "insights",
            SubReport::Dictionary => "dictionary",
            SubReport::ColumnDistribution => "columnDist",
            SubReport::TimeSeries => "timeSeries",
            SubReport::TableData => "tableData",
            SubReport::DataHealth => "dataHealth",
            SubReport::CorrelationMatrix => "correlationMatrix",
        }
    }
}

// --- KPI ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DeltaType {
    #[serde(alias = "positive")]
    IncreaseIsGood,
    #[serde(alias = "negative")]
    IncreaseIsBad,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    pub total_records: f64,
    #[serde(default)]
    pub total_records_delta: f64,
    pub data_quality: f64,
    #[serde(default)]
    pub data_quality_delta: f64,
    pub columns: f64,
    #[serde(default)]
    pub columns_delta: f64,
    pub anomalies: f64,
    #[serde(default)]
    pub anomalies_delta: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomalies_delta_type: Option<DeltaType>,
}

// --- Dictionary ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Date,
    Text,
    Empty,
    #[serde(other)]
    Other,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
            ColumnType::Empty => "empty",
            ColumnType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub column_name: String,
    pub column_type: ColumnType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub null_rate: f64,
    #[serde(default)]
    pub unique_count: usize,
}

/// Column metadata keyed by column name, in column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<DictionaryEntry>", into = "Vec<DictionaryEntry>")]
pub struct DataDictionary {
    entries: Vec<DictionaryEntry>,
}

impl From<Vec<DictionaryEntry>> for DataDictionary {
    fn from(entries: Vec<DictionaryEntry>) -> Self {
        let mut dictionary = DataDictionary::default();
        for entry in entries {
            dictionary.insert(entry);
        }
        dictionary
    }
}

impl From<DataDictionary> for Vec<DictionaryEntry> {
    fn from(dictionary: DataDictionary) -> Self {
        dictionary.entries
    }
}

impl DataDictionary {
    /// Adds an entry; the first entry for a column name wins.
    pub fn insert(&mut self, entry: DictionaryEntry) -> bool {
        if self.get(&entry.column_name).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn get(&self, column_name: &str) -> Option<&DictionaryEntry> {
        self.entries.iter().find(|e| e.column_name == column_name)
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// --- Column distribution ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDistribution {
    pub column_name: String,
    #[serde(default)]
    pub chart_data: Vec<Bucket>,
}

// --- Time series ---

/// A point is either self-describing or a bare value aligned to a shared x-axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SeriesPoint {
    Labeled { name: String, value: Option<f64> },
    Bare(Option<f64>),
}

impl SeriesPoint {
    pub fn label(&self) -> Option<&str> {
        match self {
            SeriesPoint::Labeled { name, .. } => Some(name),
            SeriesPoint::Bare(_) => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            SeriesPoint::Labeled { value, .. } => *value,
            SeriesPoint::Bare(value) => *value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub name: String,
    #[serde(default)]
    pub data: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub time_column: Option<String>,
    #[serde(default)]
    pub series_data: Vec<Series>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_data: Option<Vec<String>>,
}

impl TimeSeries {
    /// The result when no usable time column exists.
    pub fn without_time_column() -> Self {
        Self {
            time_column: None,
            series_data: Vec::new(),
            x_axis_data: None,
        }
    }
}

// --- Table preview ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

pub type Row = BTreeMap<String, CellValue>;

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub header_name: String,
    pub field: String,
    #[serde(default = "enabled")]
    pub sortable: bool,
    #[serde(default = "enabled")]
    pub filter: bool,
    #[serde(default = "enabled")]
    pub resizable: bool,
}

impl ColumnDef {
    pub fn new(field: &str) -> Self {
        Self {
            header_name: field.to_string(),
            field: field.to_string(),
            sortable: true,
            filter: true,
            resizable: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    #[serde(default)]
    pub column_defs: Vec<ColumnDef>,
    #[serde(default)]
    pub row_data: Vec<Row>,
}

impl TableData {
    /// Cell lookup that treats an omitted key like the null sentinel.
    pub fn cell<'a>(&'a self, row: &'a Row, field: &str) -> &'a CellValue {
        const NULL: &CellValue = &CellValue::Null;
        row.get(field).unwrap_or(NULL)
    }
}

// --- Data health ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthMetric {
    pub metric: String,
    pub value: String,
    pub status: HealthStatus,
}

/// Health summary; its shape belongs to the producer and is kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DataHealth(pub Value);

impl DataHealth {
    pub fn from_metrics(metrics: &[HealthMetric]) -> Self {
        let items = metrics.iter()
            .map(|m| serde_json::json!({
                "metric": m.metric,
                "value": m.value,
                "status": m.status,
            }))
            .collect();
        DataHealth(Value::Array(items))
    }

    /// Interprets the summary as a metric list when it has that shape.
    pub fn metrics(&self) -> Option<Vec<HealthMetric>> {
        serde_json::from_value(self.0.clone()).ok()
    }
}

// --- Correlation ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values.get(i)?.get(j).copied()
    }

    /// Square, matching the column list, and without duplicate column names.
    pub fn is_well_formed(&self) -> bool {
        let n = self.columns.len();
        let unique: HashSet<&String> = self.columns.iter().collect();
        unique.len() == n
            && self.values.len() == n
            && self.values.iter().all(|row| row.len() == n)
    }
}

// --- Producer payload and store snapshot ---

/// What an analysis producer hands to the store. Missing keys stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub kpi_data: Option<KpiData>,
    pub insights: Option<Vec<String>>,
    pub dictionary: Option<DataDictionary>,
    pub column_dist: Option<ColumnDistribution>,
    pub time_series: Option<TimeSeries>,
    pub table_data: Option<TableData>,
    pub data_health: Option<DataHealth>,
    pub correlation_matrix: Option<CorrelationMatrix>,
}

impl AnalysisPayload {
    /// Reads a producer object key by key. Unknown keys are ignored and a
    /// malformed key only drops that sub-report.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(map) = value else {
            log::warn!("Analysis payload is not an object; treating every sub-report as absent");
            return Self::default();
        };

        fn field<T: serde::de::DeserializeOwned>(
            map: &serde_json::Map<String, Value>,
            report: SubReport,
        ) -> Option<T> {
            let raw = map.get(report.key())?;
            if raw.is_null() {
                return None;
            }
            match serde_json::from_value(raw.clone()) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    log::warn!("Ignoring malformed '{}' in analysis payload: {}", report.key(), e);
                    None
                }
            }
        }

        Self {
            kpi_data: field(&map, SubReport::Kpi),
            insights: field(&map, SubReport::Insights),
            dictionary: field(&map, SubReport::Dictionary),
            column_dist: field(&map, SubReport::ColumnDistribution),
            time_series: field(&map, SubReport::TimeSeries),
            table_data: field(&map, SubReport::TableData),
            data_health: field(&map, SubReport::DataHealth),
            correlation_matrix: field(&map, SubReport::CorrelationMatrix),
        }
    }
}

/// One generation of analysis output as held by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    pub kpi: Report<KpiData>,
    pub insights: Report<Vec<String>>,
    pub dictionary: Report<DataDictionary>,
    pub column_distribution: Report<ColumnDistribution>,
    pub time_series: Report<TimeSeries>,
    pub table_data: Report<TableData>,
    pub data_health: Report<DataHealth>,
    pub correlation_matrix: Report<CorrelationMatrix>,
}

impl From<AnalysisPayload> for AnalysisResult {
    fn from(payload: AnalysisPayload) -> Self {
        Self {
            kpi: payload.kpi_data.into(),
            insights: payload.insights.into(),
            dictionary: payload.dictionary.into(),
            column_distribution: payload.column_dist.into(),
            time_series: payload.time_series.into(),
            table_data: payload.table_data.into(),
            data_health: payload.data_health.into(),
            correlation_matrix: payload.correlation_matrix.into(),
        }
    }
}

impl AnalysisResult {
    /// A dashboard is only shown once the KPI summary exists.
    pub fn is_loaded(&self) -> bool {
        self.kpi.is_present()
    }

    pub fn is_present(&self, report: SubReport) -> bool {
        match report {
            SubReport::Kpi => self.kpi.is_present(),
            SubReport::Insights => self.insights.is_present(),
            SubReport::Dictionary => self.dictionary.is_present(),
            SubReport::ColumnDistribution => self.column_distribution.is_present(),
            SubReport::TimeSeries => self.time_series.is_present(),
            SubReport::TableData => self.table_data.is_present(),
            SubReport::DataHealth => self.data_health.is_present(),
            SubReport::CorrelationMatrix => self.correlation_matrix.is_present(),
        }
    }

    /// Sub-reports whose value differs between `self` and `other`.
    pub fn changed_reports(&self, other: &AnalysisResult) -> Vec<SubReport> {
        SubReport::ALL.iter()
            .copied()
            .filter(|report| match report {
                SubReport::Kpi => self.kpi != other.kpi,
                SubReport::Insights => self.insights != other.insights,
                SubReport::Dictionary => self.dictionary != other.dictionary,
                SubReport::ColumnDistribution => self.column_distribution != other.column_distribution,
                SubReport::TimeSeries => self.time_series != other.time_series,
                SubReport::TableData => self.table_data != other.table_data,
                SubReport::DataHealth => self.data_health != other.data_health,
                SubReport::CorrelationMatrix => self.correlation_matrix != other.correlation_matrix,
            })
            .collect()
    }

    /// The producer form of this snapshot, for export.
    pub fn to_payload(&self) -> AnalysisPayload {
        AnalysisPayload {
            kpi_data: self.kpi.present().cloned(),
            insights: self.insights.present().cloned(),
            dictionary: self.dictionary.present().cloned(),
            column_dist: self.column_distribution.present().cloned(),
            time_series: self.time_series.present().cloned(),
            table_data: self.table_data.present().cloned(),
            data_health: self.data_health.present().cloned(),
            correlation_matrix: self.correlation_matrix.present().cloned(),
        }
    }

    pub fn selected_distribution_column(&self) -> Option<&str> {
        self.column_distribution.present().map(|d| d.column_name.as_str())
    }
}
