//! Error types for the screening pipeline.

use polars::prelude::PolarsError;
use ratescreen_data::DataError;
use ratescreen_stats::StatsError;
use thiserror::Error;

/// Result type for screening operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised while screening a panel
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Panel access failed (unknown label, missing column, ...)
    #[error(transparent)]
    Data(#[from] DataError),

    /// A statistical routine failed
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Polars operation failed
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}
