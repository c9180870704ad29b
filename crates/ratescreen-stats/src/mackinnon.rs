//! MacKinnon response surfaces for Dickey-Fuller type statistics.
//!
//! Approximate asymptotic p-values follow MacKinnon (1994): the statistic is
//! mapped through a polynomial and the standard normal CDF, using a quadratic
//! below `tau_star` and a cubic above it, clamped to 0 below `tau_min` and to
//! 1 above `tau_max`.
//!
//! Finite-sample critical values follow MacKinnon (2010):
//! ```text
//! cv(T) = b0 + b1/T + b2/T² + b3/T³
//! ```
//!
//! `n` counts the integrated variables: 1 for a plain ADF test, 2 for an
//! Engle-Granger test with one regressor.
//!
//! # References
//! - MacKinnon, J. G. (1994). "Approximate asymptotic distribution functions
//!   for unit-root and cointegration tests." JBES, 12(2), 167-176.
//! - MacKinnon, J. G. (2010). "Critical values for cointegration tests."
//!   Queen's Economics Department Working Paper No. 1227.

use crate::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Deterministic terms in the test regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// No constant
    NoConstant,
    /// Constant only
    Constant,
}

impl Trend {
    /// Number of deterministic regressors.
    pub const fn n_terms(self) -> usize {
        match self {
            Self::NoConstant => 0,
            Self::Constant => 1,
        }
    }
}

/// Critical values at the 1%, 5% and 10% levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalValues {
    /// 1% critical value
    pub one_pct: f64,
    /// 5% critical value
    pub five_pct: f64,
    /// 10% critical value
    pub ten_pct: f64,
}

struct Surface {
    tau_max: f64,
    tau_min: f64,
    tau_star: f64,
    small_p: [f64; 3],
    large_p: [f64; 4],
    // rows: 1%, 5%, 10%
    critical: [[f64; 4]; 3],
}

const CONSTANT: [Surface; 2] = [
    Surface {
        tau_max: 2.74,
        tau_min: -18.83,
        tau_star: -1.61,
        small_p: [2.1659, 1.4412, 0.038269],
        large_p: [1.7339, 0.93202, -0.12745, -0.010368],
        critical: [
            [-3.43035, -6.5393, -16.786, -79.433],
            [-2.86154, -2.8903, -4.234, -40.040],
            [-2.56677, -1.5384, -2.809, 0.0],
        ],
    },
    Surface {
        tau_max: 0.92,
        tau_min: -18.86,
        tau_star: -2.62,
        small_p: [2.92, 1.5012, 0.039796],
        large_p: [2.1945, 0.64695, -0.29198, -0.042377],
        critical: [
            [-3.89644, -10.9519, -33.527, 0.0],
            [-3.33613, -6.1101, -6.823, 0.0],
            [-3.04445, -4.2412, -2.720, 0.0],
        ],
    },
];

const NO_CONSTANT: [Surface; 1] = [Surface {
    tau_max: f64::INFINITY,
    tau_min: -19.04,
    tau_star: -1.04,
    small_p: [0.6344, 1.2378, 0.032496],
    large_p: [0.4797, 0.93557, -0.06999, 0.033066],
    critical: [
        [-2.56574, -2.2358, -3.627, 0.0],
        [-1.94100, -0.2686, -3.365, 31.223],
        [-1.61682, 0.2656, -2.714, 25.364],
    ],
}];

fn surface(trend: Trend, n: usize) -> Result<&'static Surface> {
    let table: &'static [Surface] = match trend {
        Trend::Constant => &CONSTANT,
        Trend::NoConstant => &NO_CONSTANT,
    };
    n.checked_sub(1)
        .and_then(|i| table.get(i))
        .ok_or_else(|| {
            StatsError::Unsupported(format!(
                "no MacKinnon surface for {trend:?} with {n} variable(s)"
            ))
        })
}

/// Evaluate `c0 + c1 x + c2 x² + …`.
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn normal_cdf(x: f64) -> f64 {
    0.5 * statrs::function::erf::erfc(-x / SQRT_2)
}

/// Approximate asymptotic p-value of a Dickey-Fuller type statistic.
pub fn mackinnon_p_value(statistic: f64, trend: Trend, n: usize) -> Result<f64> {
    let s = surface(trend, n)?;
    if statistic > s.tau_max {
        return Ok(1.0);
    }
    if statistic < s.tau_min {
        return Ok(0.0);
    }
    let z = if statistic <= s.tau_star {
        polyval(&s.small_p, statistic)
    } else {
        polyval(&s.large_p, statistic)
    };
    Ok(normal_cdf(z))
}

/// Finite-sample critical values for a regression with `nobs` observations.
pub fn mackinnon_critical_values(trend: Trend, n: usize, nobs: f64) -> Result<CriticalValues> {
    if nobs <= 0.0 {
        return Err(StatsError::InvalidParameter(format!(
            "nobs must be positive, got {nobs}"
        )));
    }
    let s = surface(trend, n)?;
    let at = |row: &[f64; 4]| polyval(row, 1.0 / nobs);
    Ok(CriticalValues {
        one_pct: at(&s.critical[0]),
        five_pct: at(&s.critical[1]),
        ten_pct: at(&s.critical[2]),
    })
}
