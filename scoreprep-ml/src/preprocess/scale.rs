//! Feature scaling.

use crate::error::PrepError;
use serde::{Deserialize, Serialize};

/// Standard scaler for one column: subtract the fit-time mean (unless
/// centering is disabled) and divide by the fit-time standard deviation.
///
/// The deviation is the population one (divisor `n`). A zero-deviation
/// column gets a scale factor of 1.0, so with centering the output is all
/// zeros and without centering the values pass through unchanged.
///
/// Centering is disabled for one-hot indicator columns, where subtracting
/// the mean would destroy the indicator semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    with_mean: bool,
    mean: Option<f64>,
    scale: Option<f64>,
}

impl StandardScaler {
    /// Scaler that centers to zero mean and rescales to unit variance.
    pub fn new() -> Self {
        Self {
            with_mean: true,
            mean: None,
            scale: None,
        }
    }

    /// Scaler that rescales without subtracting the mean.
    pub fn without_centering() -> Self {
        Self {
            with_mean: false,
            ..Self::new()
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.scale.is_some()
    }

    pub fn fit(&mut self, column: &str, values: &[f64]) -> Result<(), PrepError> {
        if values.is_empty() {
            return Err(PrepError::degenerate_column(column));
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        self.mean = Some(mean);
        self.scale = Some(if std_dev == 0.0 { 1.0 } else { std_dev });
        Ok(())
    }

    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, PrepError> {
        let (mean, scale) = match (self.mean, self.scale) {
            (Some(mean), Some(scale)) => (mean, scale),
            _ => return Err(PrepError::NotFitted),
        };
        let center = if self.with_mean { mean } else { 0.0 };
        Ok(values.iter().map(|v| (v - center) / scale).collect())
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}
