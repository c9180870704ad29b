//! Lagged correlation between GDP growth and the rate.
//!
//! For each label the complete-case table is augmented with shifted copies of
//! `rate`, one per lag `k ∈ [-max_lag, max_lag]`, named `rate_lag={k}`.
//! Shifting follows polars: `rate_lag={k}[t] = rate[t-k]`, so a positive lag
//! pairs growth with an earlier rate and a negative lag with a later one.
//! The correlation matrix of every numeric column is computed pairwise
//! complete, and the `dgdp` row is read off against each shifted column.

use ndarray::Array2;
use polars::prelude::*;
use ratescreen_data::{PanelStore, SeriesTable, columns};
use ratescreen_stats::correlation_matrix;
use tracing::debug;

use crate::error::Result;

/// Name of the lag index column in the correlation table.
pub const LAG_COLUMN: &str = "lag";

/// Name of the rate column shifted by `lag`.
pub fn lag_column(lag: i64) -> String {
    format!("{}_lag={lag}", columns::RATE)
}

/// Correlations of growth with the lagged rate, across labels.
#[derive(Debug, Clone)]
pub struct LagCorrelations {
    /// `lag` (i64) followed by one f64 column per label
    pub table: DataFrame,
    /// Augmented frame of the last processed label
    pub last_frame: Option<SeriesTable>,
    max_lag: usize,
}

impl LagCorrelations {
    /// Largest lag in both directions.
    pub const fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Lags in row order.
    pub fn lags(&self) -> Vec<i64> {
        let max_lag = self.max_lag as i64;
        (-max_lag..=max_lag).collect()
    }

    /// Labels in column order.
    pub fn labels(&self) -> Vec<String> {
        self.table
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != LAG_COLUMN)
            .map(|name| name.to_string())
            .collect()
    }

    /// Correlation of `label`'s growth with its rate shifted by `lag`.
    pub fn correlation(&self, label: &str, lag: i64) -> Option<f64> {
        let max_lag = self.max_lag as i64;
        if lag.abs() > max_lag {
            return None;
        }
        let row = (lag + max_lag) as usize;
        self.table.column(label).ok()?.f64().ok()?.get(row)
    }
}

/// Complete-case table of `table` with every shifted rate column appended.
///
/// # Errors
/// Fails when `dgdp` or `rate` is absent.
pub fn lagged_frame(table: &SeriesTable, max_lag: usize) -> Result<SeriesTable> {
    table.require_columns(&[columns::GROWTH, columns::RATE])?;

    let mut complete = table.complete_cases()?;
    let max_lag = max_lag as i64;
    let shifted: Vec<Expr> = (-max_lag..=max_lag)
        .map(|lag| col(columns::RATE).shift(lit(lag)).alias(lag_column(lag)))
        .collect();

    let frame = complete.frame().clone().lazy().with_columns(shifted).collect()?;
    complete.set_frame(frame);
    Ok(complete)
}

/// Correlate growth with the rate at every lag in `[-max_lag, max_lag]`.
///
/// Labels are processed in the given order; the returned `last_frame` is the
/// augmented table of the last one, `None` for an empty label list.
///
/// # Errors
/// Fails on an unknown label or a table lacking `dgdp` or `rate`.
pub fn correlate_with_lags(
    store: &PanelStore,
    labels: &[String],
    max_lag: usize,
) -> Result<LagCorrelations> {
    let lags: Vec<i64> = {
        let max_lag = max_lag as i64;
        (-max_lag..=max_lag).collect()
    };

    let mut output: Vec<Column> = vec![Series::new(LAG_COLUMN.into(), lags.clone()).into()];
    let mut last_frame = None;

    for label in labels {
        let augmented = lagged_frame(store.get(label)?, max_lag)?;

        let names = augmented.numeric_column_names();
        let values = names
            .iter()
            .map(|name| augmented.float_column(name))
            .collect::<ratescreen_data::Result<Vec<_>>>()?;
        let corr: Array2<f64> = correlation_matrix(&values);

        let position = |name: &str| names.iter().position(|n| n == name);
        let growth = position(columns::GROWTH);
        let correlations: Vec<f64> = lags
            .iter()
            .map(|&lag| match (growth, position(&lag_column(lag))) {
                (Some(i), Some(j)) => corr[[i, j]],
                _ => f64::NAN,
            })
            .collect();

        debug!(
            label = label.as_str(),
            rows = augmented.height(),
            "lag correlations"
        );
        output.push(Series::new(label.as_str().into(), correlations).into());
        last_frame = Some(augmented);
    }

    Ok(LagCorrelations {
        table: DataFrame::new(output)?,
        last_frame,
        max_lag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table(dgdp: &[f64], rate: &[f64]) -> SeriesTable {
        let dates: Vec<String> = (0..dgdp.len()).map(|i| format!("t{i}")).collect();
        let frame = df!(
            "date" => dates,
            "dgdp" => dgdp,
            "rate" => rate,
        )
        .unwrap();
        SeriesTable::new("x", frame)
    }

    #[test]
    fn test_lag_column_name() {
        assert_eq!(lag_column(-2), "rate_lag=-2");
        assert_eq!(lag_column(0), "rate_lag=0");
        assert_eq!(lag_column(3), "rate_lag=3");
    }

    #[test]
    fn test_shift_direction() {
        let augmented = lagged_frame(
            &table(&[0.0, 0.0, 0.0, 0.0, 0.0], &[1.0, 2.0, 3.0, 4.0, 5.0]),
            1,
        )
        .unwrap();

        assert_eq!(
            augmented.float_column("rate_lag=1").unwrap(),
            vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
        );
        assert_eq!(
            augmented.float_column("rate_lag=0").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]
        );
        assert_eq!(
            augmented.float_column("rate_lag=-1").unwrap(),
            vec![Some(2.0), Some(3.0), Some(4.0), Some(5.0), None]
        );
    }

    #[test]
    fn test_lagged_frame_drops_incomplete_rows_first() {
        let frame = df!(
            "date" => &["a", "b", "c", "d"],
            "dgdp" => &[Some(0.1), None, Some(0.3), Some(0.4)],
            "rate" => &[1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let augmented = lagged_frame(&SeriesTable::new("x", frame), 1).unwrap();

        assert_eq!(augmented.height(), 3);
        assert_eq!(
            augmented.float_column("rate_lag=1").unwrap(),
            vec![None, Some(1.0), Some(3.0)]
        );
    }

    #[test]
    fn test_correlation_accessor() {
        let store: PanelStore = [table(
            &[0.5, 0.1, 0.4, 0.2, 0.3, 0.9],
            &[1.0, 5.0, 1.0, 4.0, 2.0, 3.0],
        )]
        .into_iter()
        .collect();
        let result = correlate_with_lags(&store, &["x".to_string()], 2).unwrap();

        assert_eq!(result.table.height(), 5);
        assert_eq!(result.lags(), vec![-2, -1, 0, 1, 2]);
        assert_eq!(result.labels(), vec!["x"]);
        assert!(result.correlation("x", 3).is_none());
        assert!(result.correlation("y", 0).is_none());

        let expected = ratescreen_stats::pearson(
            &[Some(0.5), Some(0.1), Some(0.4), Some(0.2), Some(0.3), Some(0.9)],
            &[Some(1.0), Some(5.0), Some(1.0), Some(4.0), Some(2.0), Some(3.0)],
        );
        assert_relative_eq!(result.correlation("x", 0).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_labels() {
        let store = PanelStore::new();
        let result = correlate_with_lags(&store, &[], 4).unwrap();

        assert!(result.last_frame.is_none());
        assert_eq!(result.table.height(), 9);
        assert_eq!(result.table.width(), 1);
    }
}
