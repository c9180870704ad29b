//! Loading panels from external sources.
//!
//! The analysis core only sees [`PanelLoader`]; [`CsvPanelLoader`] is the
//! file-backed implementation used by the command-line tool.

use crate::error::{DataError, Result};
use crate::panel::PanelStore;
use crate::table::{DEFAULT_INDEX_COLUMN, SeriesTable};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of per-label tables.
pub trait PanelLoader {
    /// Load one table per label, preserving the order of `labels`.
    fn load(&self, labels: &[String]) -> Result<PanelStore>;
}

/// Placeholder substituted with the label in [`CsvLoaderConfig::file_template`].
pub const LABEL_PLACEHOLDER: &str = "{label}";

/// Configuration for [`CsvPanelLoader`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvLoaderConfig {
    /// Directory holding the per-label files
    pub root: PathBuf,
    /// Path of each file relative to `root` (default: `{label}/{label}_data.csv`)
    pub file_template: String,
    /// Name of the date column (default: `date`)
    pub index_column: String,
}

impl Default for CsvLoaderConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            file_template: format!("{LABEL_PLACEHOLDER}/{LABEL_PLACEHOLDER}_data.csv"),
            index_column: DEFAULT_INDEX_COLUMN.to_string(),
        }
    }
}

impl CsvLoaderConfig {
    /// Default layout under the given root directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Resolve the file path for a label.
    pub fn path_for(&self, label: &str) -> PathBuf {
        self.root
            .join(self.file_template.replace(LABEL_PLACEHOLDER, label))
    }
}

/// Reads one CSV file per label.
#[derive(Debug, Clone, Default)]
pub struct CsvPanelLoader {
    config: CsvLoaderConfig,
}

impl CsvPanelLoader {
    /// Create a loader with the given configuration.
    pub const fn new(config: CsvLoaderConfig) -> Self {
        Self { config }
    }

    /// Loader configuration.
    pub const fn config(&self) -> &CsvLoaderConfig {
        &self.config
    }

    fn read_table(&self, label: &str, path: &Path) -> Result<SeriesTable> {
        if !path.exists() {
            return Err(DataError::FileNotFound(path.to_path_buf()));
        }

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        let table = SeriesTable::new(label, frame).with_index_column(&self.config.index_column);
        if !table.has_column(&self.config.index_column) {
            return Err(DataError::MissingColumn {
                label: label.to_string(),
                column: self.config.index_column.clone(),
            });
        }

        debug!(label, path = %path.display(), rows = table.height(), "loaded table");
        Ok(table)
    }
}

impl PanelLoader for CsvPanelLoader {
    fn load(&self, labels: &[String]) -> Result<PanelStore> {
        let mut store = PanelStore::new();
        for label in labels {
            let path = self.config.path_for(label);
            store.insert(self.read_table(label, &path)?);
        }
        Ok(store)
    }
}
