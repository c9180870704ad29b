//! Augmented Dickey-Fuller unit-root test.
//!
//! Estimates
//! ```text
//! Δx_t = ρ·x_{t-1} + Σ_{i=1}^{p} γ_i·Δx_{t-i} [+ α] + ε_t
//! ```
//! and reports the t-value of `ρ`. H0: the series has a unit root.
//!
//! With [`Autolag::Aic`] every `p ∈ 0..=maxlag` is fitted on the common sample
//! of `len(Δx) - maxlag` rows; the lag with the lowest AIC (ties go to the
//! shorter lag) is then re-estimated on its own maximal sample.
//!
//! The default `maxlag` is Schwert's rule `ceil(12·(n/100)^(1/4))`, capped at
//! `n/2 - ntrend - 1`.

use crate::mackinnon::{CriticalValues, Trend, mackinnon_critical_values, mackinnon_p_value};
use crate::ols::ols;
use crate::{Result, StatsError};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lag-order selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Autolag {
    /// Minimise the Akaike information criterion
    Aic,
    /// Use `maxlag` lags as given
    Fixed,
}

/// ADF test configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdfConfig {
    /// Maximum number of lagged differences (None = Schwert's rule)
    pub max_lag: Option<usize>,

    /// Deterministic terms (default: constant)
    pub trend: Trend,

    /// Lag selection (default: AIC)
    pub autolag: Autolag,
}

impl Default for AdfConfig {
    fn default() -> Self {
        Self {
            max_lag: None,
            trend: Trend::Constant,
            autolag: Autolag::Aic,
        }
    }
}

/// Outcome of an ADF test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdfResult {
    /// t-value of the lagged level
    pub statistic: f64,
    /// MacKinnon approximate p-value
    pub p_value: f64,
    /// Number of lagged differences used
    pub used_lag: usize,
    /// Observations in the final regression
    pub nobs: usize,
    /// Finite-sample critical values at `nobs`
    pub critical_values: CriticalValues,
    /// Best information criterion when lags were selected automatically
    pub ic_best: Option<f64>,
}

/// Augmented Dickey-Fuller test
#[derive(Debug, Default)]
pub struct AugmentedDickeyFuller {
    config: AdfConfig,
}

impl AugmentedDickeyFuller {
    /// Create a test with the given configuration
    pub const fn new(config: AdfConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub const fn config(&self) -> &AdfConfig {
        &self.config
    }

    /// Resolve the maximum lag for a series of length `n`.
    fn max_lag(&self, n: usize) -> Result<usize> {
        let ntrend = self.config.trend.n_terms();
        let cap = (n / 2) as i64 - ntrend as i64 - 1;
        if cap < 0 {
            return Err(StatsError::InsufficientData {
                required: 2 * (ntrend + 1),
                actual: n,
            });
        }
        let cap = cap as usize;

        match self.config.max_lag {
            None => {
                let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
                Ok(schwert.min(cap))
            }
            Some(lag) if lag > cap => Err(StatsError::InvalidParameter(format!(
                "max_lag must be at most n/2 - 1 - ntrend = {cap}, got {lag}"
            ))),
            Some(lag) => Ok(lag),
        }
    }

    /// Run the test on a complete series.
    ///
    /// # Errors
    /// * [`StatsError::InvalidParameter`] if the series holds NaN or `max_lag` is too large
    /// * [`StatsError::ConstantSeries`] if all values are equal
    /// * [`StatsError::InsufficientData`] if the series is too short
    pub fn test(&self, series: &[f64]) -> Result<AdfResult> {
        if series.iter().any(|v| v.is_nan()) {
            return Err(StatsError::InvalidParameter(
                "series contains NaN".to_string(),
            ));
        }
        let n = series.len();
        let (min, max) = series
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if n > 0 && min == max {
            return Err(StatsError::ConstantSeries);
        }

        let max_lag = self.max_lag(n)?;
        let trend = self.config.trend;
        let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

        let (used_lag, ic_best) = match self.config.autolag {
            Autolag::Aic => {
                let (lag, aic) = select_lag_by_aic(series, &diffs, max_lag, trend)?;
                (lag, Some(aic))
            }
            Autolag::Fixed => (max_lag, None),
        };

        let nobs = diffs.len() - used_lag;
        let (y, x) = lagged_design(series, &diffs, used_lag, nobs, trend);
        let fit = ols(&y, &x)?;

        let statistic = fit
            .t_value(0)
            .ok_or_else(|| StatsError::InvalidParameter("empty ADF design".to_string()))?;
        let p_value = mackinnon_p_value(statistic, trend, 1)?;
        let critical_values = mackinnon_critical_values(trend, 1, nobs as f64)?;

        debug!(statistic, p_value, used_lag, nobs, "adf");

        Ok(AdfResult {
            statistic,
            p_value,
            used_lag,
            nobs,
            critical_values,
            ic_best,
        })
    }
}

/// Pick the lag in `0..=max_lag` with the smallest AIC on the common sample.
fn select_lag_by_aic(
    levels: &[f64],
    diffs: &[f64],
    max_lag: usize,
    trend: Trend,
) -> Result<(usize, f64)> {
    let nobs = diffs.len() - max_lag;
    let criteria = (0..=max_lag)
        .map(|lag| {
            let (y, x) = lagged_design(levels, diffs, lag, nobs, trend);
            Ok((lag, ols(&y, &x)?.aic()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(lowest_criterion(&criteria))
}

/// Entry with the smallest criterion. Ties keep the earlier, shorter lag.
fn lowest_criterion(criteria: &[(usize, f64)]) -> (usize, f64) {
    criteria
        .iter()
        .copied()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, f64::INFINITY))
}

/// Build the ADF regression on the last `nobs` differences.
///
/// Row `r` regresses `Δx_t` (with `t = len(Δx) - nobs + r`) on
/// `[x_t, Δx_{t-1}, …, Δx_{t-lags}, 1?]`.
fn lagged_design(
    levels: &[f64],
    diffs: &[f64],
    lags: usize,
    nobs: usize,
    trend: Trend,
) -> (Vec<f64>, DMatrix<f64>) {
    let start = diffs.len() - nobs;
    let n_cols = 1 + lags + trend.n_terms();

    let y = diffs[start..].to_vec();
    let x = DMatrix::from_fn(nobs, n_cols, |r, c| {
        let t = start + r;
        match c {
            0 => levels[t],
            c if c <= lags => diffs[t - c],
            _ => 1.0,
        }
    });

    (y, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_config_default() {
        let config = AdfConfig::default();
        assert!(config.max_lag.is_none());
        assert_eq!(config.trend, Trend::Constant);
        assert_eq!(config.autolag, Autolag::Aic);
    }

    #[test]
    fn test_schwert_max_lag() {
        let adf = AugmentedDickeyFuller::default();
        // ceil(12 * 1) = 12, cap = 50 - 1 - 1
        assert_eq!(adf.max_lag(100).unwrap(), 12);
        // ceil(12 * 0.4^0.25) = ceil(9.54) = 10, cap = 20 - 2
        assert_eq!(adf.max_lag(40).unwrap(), 10);
        // ceil(12 * 0.1^0.25) = 7, cap = 5 - 2 = 3
        assert_eq!(adf.max_lag(10).unwrap(), 3);
    }

    #[test]
    fn test_max_lag_cap_without_constant() {
        let adf = AugmentedDickeyFuller::new(AdfConfig {
            trend: Trend::NoConstant,
            ..Default::default()
        });
        assert_eq!(adf.max_lag(10).unwrap(), 4);
        assert_eq!(adf.max_lag(2).unwrap(), 0);
    }

    #[test]
    fn test_explicit_max_lag_too_large() {
        let adf = AugmentedDickeyFuller::new(AdfConfig {
            max_lag: Some(10),
            ..Default::default()
        });
        assert!(matches!(
            adf.max_lag(12),
            Err(StatsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_lagged_design_layout() {
        let levels = [1.0, 3.0, 6.0, 10.0, 15.0];
        let diffs = [2.0, 3.0, 4.0, 5.0];

        let (y, x) = lagged_design(&levels, &diffs, 1, 3, Trend::Constant);

        // t = 1, 2, 3
        assert_eq!(y, vec![3.0, 4.0, 5.0]);
        assert_eq!(x.shape(), (3, 3));
        assert_relative_eq!(x[(0, 0)], 3.0);
        assert_relative_eq!(x[(0, 1)], 2.0);
        assert_relative_eq!(x[(0, 2)], 1.0);
        assert_relative_eq!(x[(2, 0)], 10.0);
        assert_relative_eq!(x[(2, 1)], 4.0);
    }

    #[test]
    fn test_fixed_lag_sample_size() {
        let series: Vec<f64> = (0..60)
            .map(|i| ((i * 37 % 11) as f64) - 5.0 + 0.1 * i as f64)
            .collect();
        let adf = AugmentedDickeyFuller::new(AdfConfig {
            max_lag: Some(2),
            autolag: Autolag::Fixed,
            ..Default::default()
        });

        let result = adf.test(&series).unwrap();
        assert_eq!(result.used_lag, 2);
        assert_eq!(result.nobs, 60 - 1 - 2);
        assert!(result.ic_best.is_none());
    }

    #[test]
    fn test_aic_picks_lowest_criterion_on_common_sample() {
        // differences follow an AR(2)
        let mut rng = StdRng::seed_from_u64(23);
        let mut diffs = vec![0.0, 0.0];
        for _ in 0..120 {
            let n = diffs.len();
            let next = 0.5 * diffs[n - 1] + 0.3 * diffs[n - 2] + rng.gen_range(-1.0..1.0);
            diffs.push(next);
        }
        let series: Vec<f64> = std::iter::once(0.0)
            .chain(diffs.iter().scan(0.0, |level, d| {
                *level += d;
                Some(*level)
            }))
            .collect();
        assert_eq!(series.len(), 123);

        let adf = AugmentedDickeyFuller::default();
        let max_lag = adf.max_lag(series.len()).unwrap();
        assert_eq!(max_lag, 13);
        let result = adf.test(&series).unwrap();

        let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
        let nobs = diffs.len() - max_lag;
        let aics: Vec<f64> = (0..=max_lag)
            .map(|lag| {
                let (y, x) = lagged_design(&series, &diffs, lag, nobs, Trend::Constant);
                assert_eq!(y.len(), nobs);
                ols(&y, &x).unwrap().aic()
            })
            .collect();
        let best = aics.iter().copied().fold(f64::INFINITY, f64::min);

        assert_relative_eq!(aics[result.used_lag], best, epsilon = 1e-12);
        assert!(aics[..result.used_lag].iter().all(|aic| *aic > best));
        assert_relative_eq!(result.ic_best.unwrap(), best, epsilon = 1e-12);
        // the chosen lag is refitted on its own, longer sample
        assert_eq!(result.nobs, diffs.len() - result.used_lag);
    }

    #[test]
    fn test_criterion_ties_keep_shorter_lag() {
        assert_eq!(lowest_criterion(&[(0, 5.0), (1, 3.0), (2, 3.0)]), (1, 3.0));
        assert_eq!(lowest_criterion(&[(0, 2.0), (1, 2.0)]), (0, 2.0));
        assert_eq!(lowest_criterion(&[(0, f64::NAN), (1, 4.0)]), (1, 4.0));
    }

    #[test]
    fn test_matches_reference_values() {
        let series = [
            0.0, 0.0, 0.31, -0.204, 0.305, -0.654, -0.283, -0.354, -0.078, -0.395, -0.743,
            -0.796, -0.012, -0.861, -0.924, -0.483, 0.059, 0.89, 1.15, 0.841, 0.87, 0.983,
            0.307, 0.838, 1.012, 1.776, 0.977, 0.921, 1.214, 1.438, 0.512, -0.302, 0.512,
            -0.686, -0.089, -0.734, -0.35, -0.363, -0.51, -1.032, -0.455, -0.098, -0.563,
            0.581, 0.877, 0.452, 0.9, -0.096, 0.383, 0.304,
        ];

        let result = AugmentedDickeyFuller::default().test(&series).unwrap();

        assert_eq!(result.used_lag, 1);
        assert_eq!(result.nobs, 48);
        assert_relative_eq!(result.statistic, -2.028_320_000_414_149, epsilon = 1e-8);
        assert_relative_eq!(result.p_value, 0.274_295_445_679_459_4, epsilon = 1e-8);
        assert_relative_eq!(result.ic_best.unwrap(), 64.089_341_919_417_5, epsilon = 1e-8);
        assert_relative_eq!(
            result.critical_values.one_pct,
            -3.574_589_259_620_949,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            result.critical_values.five_pct,
            -2.923_954_308_449_074,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            result.critical_values.ten_pct,
            -2.600_039_184_027_778,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_constant_series() {
        let adf = AugmentedDickeyFuller::default();
        assert!(matches!(
            adf.test(&[2.0; 20]),
            Err(StatsError::ConstantSeries)
        ));
    }

    #[test]
    fn test_too_short() {
        let adf = AugmentedDickeyFuller::default();
        assert!(matches!(
            adf.test(&[1.0, 2.0, 4.0]),
            Err(StatsError::InsufficientData { required: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let adf = AugmentedDickeyFuller::default();
        assert!(matches!(
            adf.test(&[1.0, f64::NAN, 2.0, 3.0, 1.0]),
            Err(StatsError::InvalidParameter(_))
        ));
    }
}
