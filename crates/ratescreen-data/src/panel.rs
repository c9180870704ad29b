//! Label-keyed panel of series tables.

use crate::error::{DataError, Result};
use crate::table::SeriesTable;
use std::collections::HashMap;

/// One [`SeriesTable`] per label, in insertion order.
///
/// The store is owned by the pipeline and passed explicitly; components that
/// mutate it take `&mut PanelStore`.
#[derive(Debug, Clone, Default)]
pub struct PanelStore {
    order: Vec<String>,
    tables: HashMap<String, SeriesTable>,
}

impl PanelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table under its own label. Replacing an existing label keeps
    /// its position and returns the previous table.
    pub fn insert(&mut self, table: SeriesTable) -> Option<SeriesTable> {
        let label = table.label().to_string();
        let previous = self.tables.insert(label.clone(), table);
        if previous.is_none() {
            self.order.push(label);
        }
        previous
    }

    /// Look up a table.
    pub fn get(&self, label: &str) -> Result<&SeriesTable> {
        self.tables
            .get(label)
            .ok_or_else(|| DataError::UnknownLabel(label.to_string()))
    }

    /// Look up a table for mutation.
    pub fn get_mut(&mut self, label: &str) -> Result<&mut SeriesTable> {
        self.tables
            .get_mut(label)
            .ok_or_else(|| DataError::UnknownLabel(label.to_string()))
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.order
    }

    /// Tables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SeriesTable> {
        self.order.iter().filter_map(|label| self.tables.get(label))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<SeriesTable> for PanelStore {
    fn from_iter<I: IntoIterator<Item = SeriesTable>>(iter: I) -> Self {
        let mut store = Self::new();
        for table in iter {
            store.insert(table);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn table(label: &str, gdp: f64) -> SeriesTable {
        let frame = df!("date" => &["2021-01"], "gdp" => &[gdp], "rate" => &[0.5]).unwrap();
        SeriesTable::new(label, frame)
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let store: PanelStore = vec![table("uk", 1.0), table("de", 2.0), table("us", 3.0)]
            .into_iter()
            .collect();
        assert_eq!(store.labels(), &["uk", "de", "us"]);
        let iterated: Vec<&str> = store.iter().map(|t| t.label()).collect();
        assert_eq!(iterated, vec!["uk", "de", "us"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = PanelStore::new();
        store.insert(table("uk", 1.0));
        store.insert(table("us", 2.0));
        let previous = store.insert(table("uk", 9.0));

        assert!(previous.is_some());
        assert_eq!(store.len(), 2);
        assert_eq!(store.labels(), &["uk", "us"]);
        assert_eq!(
            store.get("uk").unwrap().float_column("gdp").unwrap(),
            vec![Some(9.0)]
        );
    }

    #[test]
    fn test_unknown_label() {
        let store = PanelStore::new();
        assert!(store.is_empty());
        assert!(matches!(store.get("jp"), Err(DataError::UnknownLabel(l)) if l == "jp"));
    }
}
