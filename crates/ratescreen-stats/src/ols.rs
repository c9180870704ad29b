//! Ordinary least squares for the small dense designs used by the
//! unit-root and cointegration regressions.
//!
//! Solves the normal equations `β = (X'X)⁻¹ X'y` and keeps enough of the fit
//! to report t-values, the Gaussian log-likelihood and AIC.

use crate::{Result, StatsError};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;

/// Result of an OLS fit.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficient estimates, one per design column
    pub params: Vec<f64>,
    /// Homoskedastic standard errors
    pub std_errors: Vec<f64>,
    /// Residuals `y - Xβ`
    pub residuals: Vec<f64>,
    /// Residual sum of squares
    pub ssr: f64,
    /// Total sum of squares around the mean of `y`
    pub centered_tss: f64,
    /// Number of observations
    pub nobs: usize,
}

impl OlsFit {
    /// Number of estimated parameters.
    pub fn n_params(&self) -> usize {
        self.params.len()
    }

    /// t-value of coefficient `i`, or `None` if the design has no such column.
    pub fn t_value(&self, i: usize) -> Option<f64> {
        Some(self.params.get(i)? / self.std_errors.get(i)?)
    }

    /// Gaussian log-likelihood evaluated at the MLE of the error variance.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -n / 2.0 * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion: `-2 llf + 2k`.
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.n_params() as f64
    }

    /// Centered R².
    pub fn r_squared(&self) -> f64 {
        1.0 - self.ssr / self.centered_tss
    }
}

/// Fit `y = Xβ + ε` by least squares.
///
/// # Errors
/// * [`StatsError::DimensionMismatch`] if `y` and `x` disagree on rows
/// * [`StatsError::InsufficientData`] if there are no residual degrees of freedom
/// * [`StatsError::SingularMatrix`] if `X'X` cannot be inverted
pub fn ols(y: &[f64], x: &DMatrix<f64>) -> Result<OlsFit> {
    let (n, k) = x.shape();
    if y.len() != n {
        return Err(StatsError::DimensionMismatch {
            expected: n,
            actual: y.len(),
        });
    }
    if n <= k {
        return Err(StatsError::InsufficientData {
            required: k + 1,
            actual: n,
        });
    }

    let y_vec = DVector::from_column_slice(y);
    let xtx = x.transpose() * x;
    let xtx_inv = xtx.try_inverse().ok_or(StatsError::SingularMatrix)?;
    let beta = &xtx_inv * (x.transpose() * &y_vec);

    let residuals = &y_vec - x * &beta;
    let ssr = residuals.dot(&residuals);

    let mean = y.iter().sum::<f64>() / n as f64;
    let centered_tss = y.iter().map(|v| (v - mean).powi(2)).sum();

    let sigma2 = ssr / (n - k) as f64;
    let std_errors = (0..k).map(|i| (sigma2 * xtx_inv[(i, i)]).sqrt()).collect();

    Ok(OlsFit {
        params: beta.iter().copied().collect(),
        std_errors,
        residuals: residuals.iter().copied().collect(),
        ssr,
        centered_tss,
        nobs: n,
    })
}
