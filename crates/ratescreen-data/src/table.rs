//! Per-label time series tables.
//!
//! A [`SeriesTable`] wraps the `DataFrame` loaded for one label. The date key
//! is kept as an ordinary column and never takes part in numeric work.
//! Missing values are polars nulls or floating NaN; both count as missing.

use crate::error::{DataError, Result};
use polars::prelude::*;

/// Default name of the date index column.
pub const DEFAULT_INDEX_COLUMN: &str = "date";

/// Well-known column names.
pub mod columns {
    /// GDP level
    pub const GDP: &str = "gdp";
    /// Interest rate level
    pub const RATE: &str = "rate";
    /// Forward GDP growth derived from [`GDP`]
    pub const GROWTH: &str = "dgdp";
}

/// Time-indexed table for a single label.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    label: String,
    index_column: String,
    frame: DataFrame,
}

impl SeriesTable {
    /// Wrap a frame whose index column is [`DEFAULT_INDEX_COLUMN`].
    pub fn new(label: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            label: label.into(),
            index_column: DEFAULT_INDEX_COLUMN.to_string(),
            frame,
        }
    }

    /// Use a different index column name.
    pub fn with_index_column(mut self, index_column: impl Into<String>) -> Self {
        self.index_column = index_column.into();
        self
    }

    /// Label this table belongs to.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the date index column.
    pub fn index_column(&self) -> &str {
        &self.index_column
    }

    /// Underlying frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Replace the frame, keeping label and index column.
    pub fn set_frame(&mut self, frame: DataFrame) {
        self.frame = frame;
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Whether the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    /// Fail with [`DataError::MissingColumn`] on the first absent column.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        names
            .iter()
            .find(|name| !self.has_column(name))
            .map_or(Ok(()), |name| Err(self.missing(name)))
    }

    /// Read a column as `f64`, mapping NaN to `None`.
    ///
    /// # Errors
    /// Returns [`DataError::MissingColumn`] if the column does not exist.
    pub fn float_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if !self.has_column(name) {
            return Err(self.missing(name));
        }
        let values = self.frame.column(name)?.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Insert or overwrite a `f64` column. NaN values are stored as null.
    pub fn set_float_column(&mut self, name: &str, values: Vec<Option<f64>>) -> Result<()> {
        if values.len() != self.frame.height() {
            return Err(DataError::LengthMismatch {
                label: self.label.clone(),
                column: name.to_string(),
                expected: self.frame.height(),
                actual: values.len(),
            });
        }
        let values: Vec<Option<f64>> = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        let column: Column = Series::new(name.into(), values).into();
        self.frame.with_column(column)?;
        Ok(())
    }

    /// Names of the numeric (integer or float) columns, index excluded,
    /// in frame order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .filter(|c| c.name().as_str() != self.index_column)
            .filter(|c| c.dtype().is_float() || c.dtype().is_integer())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Drop every row holding a missing value in any non-index column.
    pub fn complete_cases(&self) -> Result<Self> {
        let mut keep = vec![true; self.frame.height()];

        for column in self.frame.get_columns() {
            if column.name().as_str() == self.index_column {
                continue;
            }
            if column.dtype().is_float() {
                let values = column.cast(&DataType::Float64)?;
                for (flag, value) in keep.iter_mut().zip(values.f64()?.into_iter()) {
                    if !value.is_some_and(|v| !v.is_nan()) {
                        *flag = false;
                    }
                }
            } else {
                for (flag, missing) in keep.iter_mut().zip(column.is_null().into_iter()) {
                    if missing.unwrap_or(false) {
                        *flag = false;
                    }
                }
            }
        }

        let mask = BooleanChunked::from_slice("complete".into(), &keep);
        Ok(Self {
            label: self.label.clone(),
            index_column: self.index_column.clone(),
            frame: self.frame.filter(&mask)?,
        })
    }

    fn missing(&self, column: &str) -> DataError {
        DataError::MissingColumn {
            label: self.label.clone(),
            column: column.to_string(),
        }
    }
}
