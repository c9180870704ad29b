//! Engle-Granger two-step cointegration test.
//!
//! 1. Regress `y0` on `[y1, 1]` by OLS.
//! 2. Run an ADF test without deterministic terms on the residuals.
//!
//! H0: no cointegration. The residual statistic is compared against the
//! MacKinnon surface for two variables with a constant. When the first-step
//! fit is perfect (R² ≥ 1 - 100·√ε) the statistic is `-∞`.

use crate::adf::{AdfConfig, Autolag, AugmentedDickeyFuller};
use crate::mackinnon::{CriticalValues, Trend, mackinnon_critical_values, mackinnon_p_value};
use crate::ols::ols;
use crate::{Result, StatsError};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of integrated variables in the bivariate test.
const N_VARIABLES: usize = 2;

/// Engle-Granger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngleGrangerConfig {
    /// Maximum lag of the residual ADF regression (None = Schwert's rule)
    pub max_lag: Option<usize>,
    /// Lag selection for the residual ADF regression (default: AIC)
    pub autolag: Autolag,
}

impl Default for EngleGrangerConfig {
    fn default() -> Self {
        Self {
            max_lag: None,
            autolag: Autolag::Aic,
        }
    }
}

/// Outcome of an Engle-Granger test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngleGrangerResult {
    /// ADF t-value of the first-step residuals
    pub statistic: f64,
    /// MacKinnon approximate p-value
    pub p_value: f64,
    /// Finite-sample critical values at `nobs - 1`
    pub critical_values: CriticalValues,
    /// Slope of `y0` on `y1`
    pub hedge_ratio: f64,
    /// Lags used in the residual regression (None when the fit was perfect)
    pub used_lag: Option<usize>,
}

/// Engle-Granger cointegration test
#[derive(Debug, Default)]
pub struct EngleGranger {
    config: EngleGrangerConfig,
}

impl EngleGranger {
    /// Create a test with the given configuration
    pub const fn new(config: EngleGrangerConfig) -> Self {
        Self { config }
    }

    /// Test whether `y0` and `y1` are cointegrated.
    ///
    /// # Errors
    /// * [`StatsError::DimensionMismatch`] if the series differ in length
    /// * any error of the first-step regression or the residual ADF test
    pub fn test(&self, y0: &[f64], y1: &[f64]) -> Result<EngleGrangerResult> {
        let n = y0.len();
        if y1.len() != n {
            return Err(StatsError::DimensionMismatch {
                expected: n,
                actual: y1.len(),
            });
        }

        let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { y1[i] } else { 1.0 });
        let fit = ols(y0, &design)?;

        let collinear = 1.0 - 100.0 * f64::EPSILON.sqrt();
        let (statistic, used_lag) = if fit.r_squared() < collinear {
            let adf = AugmentedDickeyFuller::new(AdfConfig {
                max_lag: self.config.max_lag,
                trend: Trend::NoConstant,
                autolag: self.config.autolag,
            });
            let residual_test = adf.test(&fit.residuals)?;
            (residual_test.statistic, Some(residual_test.used_lag))
        } else {
            warn!(r_squared = fit.r_squared(), "series are (nearly) perfectly collinear");
            (f64::NEG_INFINITY, None)
        };

        let p_value = mackinnon_p_value(statistic, Trend::Constant, N_VARIABLES)?;
        let critical_values =
            mackinnon_critical_values(Trend::Constant, N_VARIABLES, (n - 1) as f64)?;

        debug!(statistic, p_value, hedge_ratio = fit.params[0], "engle-granger");

        Ok(EngleGrangerResult {
            statistic,
            p_value,
            critical_values,
            hedge_ratio: fit.params[0],
            used_lag,
        })
    }
}
