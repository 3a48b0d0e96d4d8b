//! Missing-value imputation.
//!
//! One imputer instance per column; the fill statistic is learned at fit time
//! and frozen. A column with no observed values at fit time has no defined
//! median or mode, so fitting fails with `DegenerateColumn` rather than
//! guessing.

use crate::error::PrepError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Replaces missing numeric values with the fit-time median.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedianImputer {
    fill: Option<f64>,
}

impl MedianImputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.fill.is_some()
    }

    /// The learned median, once fitted.
    pub fn fill_value(&self) -> Option<f64> {
        self.fill
    }

    /// Learn the median of the non-missing values. Even-length inputs take
    /// the midpoint of the two central values.
    pub fn fit(&mut self, column: &str, values: &[Option<f64>]) -> Result<(), PrepError> {
        let mut observed: Vec<f64> = values.iter().flatten().copied().collect();
        if observed.is_empty() {
            return Err(PrepError::degenerate_column(column));
        }
        observed.sort_by(f64::total_cmp);

        let mid = observed.len() / 2;
        let median = if observed.len() % 2 == 0 {
            (observed[mid - 1] + observed[mid]) / 2.0
        } else {
            observed[mid]
        };
        self.fill = Some(median);
        Ok(())
    }

    pub fn transform(&self, values: &[Option<f64>]) -> Result<Vec<f64>, PrepError> {
        let fill = self.fill.ok_or(PrepError::NotFitted)?;
        Ok(values.iter().map(|v| v.unwrap_or(fill)).collect())
    }
}

/// Replaces missing categorical values with the fit-time most frequent
/// category. Ties break toward the category seen earliest in the training
/// data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MostFrequentImputer {
    fill: Option<String>,
}

impl MostFrequentImputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.fill.is_some()
    }

    /// The learned mode, once fitted.
    pub fn fill_value(&self) -> Option<&str> {
        self.fill.as_deref()
    }

    pub fn fit(&mut self, column: &str, values: &[Option<String>]) -> Result<(), PrepError> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (idx, value) in values.iter().enumerate() {
            if let Some(v) = value {
                let entry = counts.entry(v.as_str()).or_insert((0, idx));
                entry.0 += 1;
            }
        }

        let mode = counts
            .into_iter()
            .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
                // Higher count wins; on a tie, the earlier first occurrence.
                count_a.cmp(count_b).then(first_b.cmp(first_a))
            })
            .map(|(value, _)| value.to_string())
            .ok_or_else(|| PrepError::degenerate_column(column))?;

        self.fill = Some(mode);
        Ok(())
    }

    pub fn transform(&self, values: &[Option<String>]) -> Result<Vec<String>, PrepError> {
        let fill = self.fill.as_ref().ok_or(PrepError::NotFitted)?;
        Ok(values
            .iter()
            .map(|v| v.clone().unwrap_or_else(|| fill.clone()))
            .collect())
    }
}
