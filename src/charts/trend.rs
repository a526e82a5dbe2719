// src/charts/trend.rs
use crate::analysis::TimeSeries;

pub const NO_TREND_MESSAGE: &str = "No valid time/date column found for trend analysis.";

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    /// Aligned 1:1 with the x-axis; `None` is a gap.
    pub values: Vec<Option<f64>>,
    pub smooth: bool,
}

impl LineSeries {
    /// Contiguous runs of present values as plot points. A gap ends a run, so
    /// nothing is ever drawn through a missing value.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (i, value) in self.values.iter().enumerate() {
            match value {
                Some(v) => current.push([i as f64, *v]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendConfig {
    pub title: String,
    pub x_axis: Vec<String>,
    pub lines: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendView {
    NoTrendData,
    Chart(TrendConfig),
}

/// Fallback when there is no time column, no series, or the first series is
/// empty. The x-axis comes from `x_axis_data` when supplied, otherwise from the
/// first series' point labels. Series are fitted to the axis length: shorter
/// ones are padded with gaps, longer ones are cut.
pub fn trend_config(time_series: &TimeSeries) -> TrendView {
    let Some(time_column) = time_series.time_column.as_deref() else {
        return TrendView::NoTrendData;
    };
    let Some(first) = time_series.series_data.first() else {
        return TrendView::NoTrendData;
    };
    if first.data.is_empty() {
        return TrendView::NoTrendData;
    }

    let x_axis: Vec<String> = match &time_series.x_axis_data {
        Some(axis) => axis.clone(),
        None => first.data.iter()
            .enumerate()
            .map(|(i, p)| p.label().map(str::to_string).unwrap_or_else(|| (i + 1).to_string()))
            .collect(),
    };

    let lines = time_series.series_data.iter()
        .map(|series| {
            let mut values: Vec<Option<f64>> = series.data.iter()
                .take(x_axis.len())
                .map(|p| p.value())
                .collect();
            values.resize(x_axis.len(), None);
            LineSeries {
                name: series.name.clone(),
                values,
                smooth: true,
            }
        })
        .collect();

    TrendView::Chart(TrendConfig {
        title: format!("Trend Analysis: {}", time_column),
        x_axis,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::{Series, SeriesPoint};

    fn labeled(name: &str, value: Option<f64>) -> SeriesPoint {
        SeriesPoint::Labeled { name: name.into(), value }
    }

    fn sales() -> TimeSeries {
        TimeSeries {
            time_column: Some("date".into()),
            series_data: vec![Series {
                name: "sales".into(),
                data: vec![labeled("2024-01", Some(10.0)), labeled("2024-02", None)],
            }],
            x_axis_data: None,
        }
    }

    #[test]
    fn test_missing_time_column_always_falls_back() {
        let mut ts = sales();
        ts.time_column = None;
        assert_eq!(trend_config(&ts), TrendView::NoTrendData);
    }

    #[test]
    fn test_empty_series_fall_back() {
        let mut ts = sales();
        ts.series_data.clear();
        assert_eq!(trend_config(&ts), TrendView::NoTrendData);

        let mut ts = sales();
        ts.series_data[0].data.clear();
        assert_eq!(trend_config(&ts), TrendView::NoTrendData);
    }

    #[test]
    fn test_labels_from_first_series_and_null_is_a_gap() {
        let TrendView::Chart(config) = trend_config(&sales()) else {
            panic!("expected a chart");
        };
        assert_eq!(config.x_axis, vec!["2024-01", "2024-02"]);
        assert_eq!(config.lines.len(), 1);
        assert_eq!(config.lines[0].values, vec![Some(10.0), None]);
        assert!(config.lines[0].smooth);
        assert_eq!(config.lines[0].segments(), vec![vec![[0.0, 10.0]]]);
        assert_eq!(config.title, "Trend Analysis: date");
    }

    #[test]
    fn test_explicit_axis_with_bare_values() {
        let ts = TimeSeries {
            time_column: Some("month".into()),
            series_data: vec![
                Series {
                    name: "a".into(),
                    data: vec![SeriesPoint::Bare(Some(1.0)), SeriesPoint::Bare(Some(2.0)), SeriesPoint::Bare(Some(3.0))],
                },
                Series {
                    name: "b".into(),
                    data: vec![SeriesPoint::Bare(Some(5.0))],
                },
            ],
            x_axis_data: Some(vec!["Jan".into(), "Feb".into()]),
        };
        let TrendView::Chart(config) = trend_config(&ts) else {
            panic!("expected a chart");
        };
        assert_eq!(config.x_axis, vec!["Jan", "Feb"]);
        assert_eq!(config.lines[0].values, vec![Some(1.0), Some(2.0)]);
        assert_eq!(config.lines[1].values, vec![Some(5.0), None]);
    }

    #[test]
    fn test_segments_split_at_gaps() {
        let line = LineSeries {
            name: "x".into(),
            values: vec![Some(1.0), Some(2.0), None, None, Some(0.0), None, Some(4.0)],
            smooth: true,
        };
        assert_eq!(
            line.segments(),
            vec![
                vec![[0.0, 1.0], [1.0, 2.0]],
                vec![[4.0, 0.0]],
                vec![[6.0, 4.0]],
            ]
        );
    }
}
