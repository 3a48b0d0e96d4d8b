//! In-memory tabular data.
//!
//! A [`Table`] is the unit the pipeline consumes: named columns over rows of
//! JSON values, the shape an external loader hands us. `null` cells are the
//! missing-value marker for both numeric and categorical columns.

use crate::error::PrepError;
use serde::{Deserialize, Serialize};

/// A table of rows with named columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Extract a numeric column. `null` becomes `None`; any other non-number
    /// cell is a schema violation.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, PrepError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PrepError::missing_column(name, "input"))?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| match cells.get(idx) {
                None | Some(serde_json::Value::Null) => Ok(None),
                Some(serde_json::Value::Number(n)) => Ok(n.as_f64()),
                Some(_) => Err(PrepError::invalid_value(name, row)),
            })
            .collect()
    }

    /// Extract a categorical column. `null` becomes `None`; any non-string
    /// cell is a schema violation.
    pub fn categorical_column(&self, name: &str) -> Result<Vec<Option<String>>, PrepError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PrepError::missing_column(name, "input"))?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| match cells.get(idx) {
                None | Some(serde_json::Value::Null) => Ok(None),
                Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(PrepError::invalid_value(name, row)),
            })
            .collect()
    }

    /// Split off the target column: the remaining feature table plus the
    /// target values in row order. `role` names the table ("train"/"test")
    /// in the error when the target is absent or non-numeric.
    pub fn split_target(&self, target: &str, role: &str) -> Result<(Table, Vec<f64>), PrepError> {
        let idx = self
            .column_index(target)
            .ok_or_else(|| PrepError::missing_column(target, role))?;

        let mut targets = Vec::with_capacity(self.rows.len());
        let mut feature_rows = Vec::with_capacity(self.rows.len());
        for (row, cells) in self.rows.iter().enumerate() {
            let value = cells
                .get(idx)
                .and_then(serde_json::Value::as_f64)
                .ok_or_else(|| PrepError::invalid_value(target, row))?;
            targets.push(value);

            let mut features = cells.clone();
            features.remove(idx);
            feature_rows.push(features);
        }

        let mut feature_columns = self.columns.clone();
        feature_columns.remove(idx);

        Ok((Table::new(feature_columns, feature_rows), targets))
    }
}
