// src/analysis/correlation.rs

use statrs::statistics::Statistics;

use super::dataset::Dataset;
use super::result::CorrelationMatrix;

/// Pearson correlation over rows where both values are present.
/// Undefined correlations (fewer than two pairs, zero variance) are 0.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x.iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    if xs.len() < 2 {
        return 0.0;
    }

    let covariance = xs.iter().covariance(ys.iter());
    let x_std = xs.iter().std_dev();
    let y_std = ys.iter().std_dev();

    let r = covariance / (x_std * y_std);
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Correlation matrix of the numeric columns, capped at `max_columns`.
/// `None` when the dataset has no numeric column.
pub fn correlation_matrix(dataset: &Dataset, max_columns: usize) -> Option<CorrelationMatrix> {
    let numeric: Vec<usize> = dataset.column_types()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_numeric())
        .map(|(i, _)| i)
        .take(max_columns)
        .collect();

    if numeric.is_empty() {
        return None;
    }

    let values: Vec<Vec<Option<f64>>> = numeric.iter().map(|&i| dataset.numeric_column(i)).collect();
    let n = numeric.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(&values[i], &values[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    Some(CorrelationMatrix {
        columns: numeric.iter().map(|&i| dataset.headers[i].clone()).collect(),
        values: matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::dataset::tests::dataset;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let up = [Some(2.0), Some(4.0), Some(6.0)];
        let down = [Some(3.0), Some(2.0), Some(1.0)];
        assert!(close(pearson(&x, &up), 1.0));
        assert!(close(pearson(&x, &down), -1.0));
    }

    #[test]
    fn test_undefined_correlation_is_zero() {
        let x = [Some(1.0), Some(2.0), None];
        let flat = [Some(5.0), Some(5.0), Some(5.0)];
        assert_eq!(pearson(&x, &flat), 0.0);
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), 0.0);
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let ds = dataset(
            &["a", "label", "b", "c"],
            &[
                &["1", "x", "10", "3"],
                &["2", "y", "19", "1"],
                &["3", "z", "31", "2"],
                &["4", "w", "", "5"],
            ],
        );
        let m = correlation_matrix(&ds, 20).unwrap();
        assert_eq!(m.columns, vec!["a", "b", "c"]);
        assert!(m.is_well_formed());
        for i in 0..3 {
            assert_eq!(m.values[i][i], 1.0);
            for j in 0..3 {
                assert_eq!(m.values[i][j], m.values[j][i]);
                assert!((-1.0..=1.0).contains(&m.values[i][j]));
            }
        }
        assert!(m.get("a", "b").unwrap() > 0.9);
    }

    #[test]
    fn test_no_numeric_columns() {
        let ds = dataset(&["name"], &[&["a"], &["b"]]);
        assert!(correlation_matrix(&ds, 20).is_none());
    }
}
