#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratescreen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod adf;
pub mod coint;
pub mod correlation;
pub mod mackinnon;
pub mod ols;

pub use adf::{AdfConfig, AdfResult, Autolag, AugmentedDickeyFuller};
pub use coint::{EngleGranger, EngleGrangerConfig, EngleGrangerResult};
pub use correlation::{correlation_matrix, pearson};
pub use mackinnon::{CriticalValues, Trend, mackinnon_critical_values, mackinnon_p_value};
pub use ols::{OlsFit, ols};

use thiserror::Error;

/// Result type for statistical routines.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur in statistical routines
#[derive(Debug, Error)]
pub enum StatsError {
    /// Insufficient data for estimation
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Series has a single distinct value
    #[error("Invalid input, series is constant")]
    ConstantSeries,

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Normal equations could not be inverted
    #[error("Design matrix is singular")]
    SingularMatrix,

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No response surface for the requested configuration
    #[error("Unsupported configuration: {0}")]
    Unsupported(String),
}
