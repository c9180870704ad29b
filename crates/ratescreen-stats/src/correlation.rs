//! Pearson correlation over pairwise-complete observations.
//!
//! Missing values (`None` or NaN) are skipped pair by pair, so each entry of
//! a correlation matrix may rest on a different sample. Fewer than two
//! complete pairs, or a zero variance, yields NaN.

use ndarray::Array2;

/// Pearson correlation of two aligned series.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Full pairwise correlation matrix of aligned columns.
///
/// The diagonal is 1 for any column with at least two observations and
/// non-zero variance, NaN otherwise.
pub fn correlation_matrix(columns: &[Vec<Option<f64>>]) -> Array2<f64> {
    let k = columns.len();
    let mut corr = Array2::<f64>::from_elem((k, k), f64::NAN);

    for i in 0..k {
        for j in i..k {
            let value = pearson(&columns[i], &columns[j]);
            corr[[i, j]] = value;
            corr[[j, i]] = value;
        }
    }

    corr
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_correlation() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let y = some(&[2.0, 4.0, 6.0, 8.0]);
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);

        let z = some(&[4.0, 3.0, 2.0, 1.0]);
        assert_relative_eq!(pearson(&x, &z), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_known_value() {
        // sums of cross products: sxy = 2.5, sxx = 5, syy = 2.75
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let y = some(&[1.0, 3.0, 2.0, 3.0]);
        let expected = 2.5 / (5.0_f64.sqrt() * 2.75_f64.sqrt());
        assert_relative_eq!(pearson(&x, &y), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pairwise_complete() {
        let x = vec![Some(1.0), None, Some(3.0), Some(4.0), Some(f64::NAN)];
        let y = vec![Some(2.0), Some(100.0), Some(6.0), Some(8.0), Some(-50.0)];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(pearson(&some(&[1.0]), &some(&[2.0])).is_nan());
        assert!(pearson(&some(&[1.0, 1.0, 1.0]), &some(&[1.0, 2.0, 3.0])).is_nan());
        assert!(pearson(&[None, None], &[Some(1.0), Some(2.0)]).is_nan());
    }

    #[test]
    fn test_matrix_symmetry() {
        let columns = vec![
            some(&[1.0, 2.0, 3.0, 4.0]),
            some(&[1.0, 3.0, 2.0, 3.0]),
            vec![None, Some(1.0), Some(0.0), Some(2.0)],
        ];
        let corr = correlation_matrix(&columns);

        assert_eq!(corr.shape(), &[3, 3]);
        for i in 0..3 {
            assert_relative_eq!(corr[[i, i]], 1.0, epsilon = 1e-12);
            for j in 0..3 {
                assert_relative_eq!(corr[[i, j]], corr[[j, i]]);
            }
        }
    }
}
