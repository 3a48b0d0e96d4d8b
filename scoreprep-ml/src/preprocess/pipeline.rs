//! Column-routed preprocessing pipeline.
//!
//! [`ColumnPreprocessor`] routes every configured column to exactly one of
//! two sub-pipelines:
//!
//! - numeric: median-impute, then standardize to zero mean / unit variance
//! - categorical: most-frequent-impute, then one-hot encode, then scale the
//!   indicator columns without centering
//!
//! Columns present in an input table but listed in neither group are dropped
//! from the output. That is a deliberate, logged policy: the partition is
//! the schema contract, and an unlisted column means the config was not
//! updated for it.

use crate::config::TransformConfig;
use crate::data::Table;
use crate::error::PrepError;
use crate::preprocess::encode::OneHotEncoder;
use crate::preprocess::impute::{MedianImputer, MostFrequentImputer};
use crate::preprocess::scale::StandardScaler;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-column numeric sub-pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NumericPipeline {
    column: String,
    imputer: MedianImputer,
    scaler: StandardScaler,
}

impl NumericPipeline {
    fn unfitted(column: String) -> Self {
        Self {
            column,
            imputer: MedianImputer::new(),
            scaler: StandardScaler::new(),
        }
    }

    fn fit(&mut self, table: &Table) -> Result<(), PrepError> {
        let raw = table.numeric_column(&self.column)?;
        self.imputer.fit(&self.column, &raw)?;
        let filled = self.imputer.transform(&raw)?;
        self.scaler.fit(&self.column, &filled)
    }

    fn transform(&self, table: &Table) -> Result<Vec<f64>, PrepError> {
        let raw = table.numeric_column(&self.column)?;
        let filled = self.imputer.transform(&raw)?;
        self.scaler.transform(&filled)
    }
}

/// Per-column categorical sub-pipeline. One scaler per indicator column,
/// all without centering.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoricalPipeline {
    column: String,
    imputer: MostFrequentImputer,
    encoder: OneHotEncoder,
    scalers: Vec<StandardScaler>,
}

impl CategoricalPipeline {
    fn unfitted(column: String, policy: crate::preprocess::UnseenCategoryPolicy) -> Self {
        Self {
            column,
            imputer: MostFrequentImputer::new(),
            encoder: OneHotEncoder::new(policy),
            scalers: Vec::new(),
        }
    }

    fn width(&self) -> usize {
        self.encoder.width()
    }

    fn fit(&mut self, table: &Table) -> Result<(), PrepError> {
        let raw = table.categorical_column(&self.column)?;
        self.imputer.fit(&self.column, &raw)?;
        let filled = self.imputer.transform(&raw)?;
        self.encoder.fit(&self.column, &filled)?;

        let encoded = self.encoder.transform(&self.column, &filled)?;
        let levels = self.encoder.levels().unwrap_or_default().to_vec();
        self.scalers = Vec::with_capacity(levels.len());
        for (j, level) in levels.iter().enumerate() {
            let indicator: Vec<f64> = encoded.iter().map(|row| row[j]).collect();
            let mut scaler = StandardScaler::without_centering();
            scaler.fit(&format!("{}={}", self.column, level), &indicator)?;
            self.scalers.push(scaler);
        }
        Ok(())
    }

    /// Encoded and scaled rows, each of width [`width`](Self::width).
    fn transform(&self, table: &Table) -> Result<Vec<Vec<f64>>, PrepError> {
        let raw = table.categorical_column(&self.column)?;
        let filled = self.imputer.transform(&raw)?;
        let encoded = self.encoder.transform(&self.column, &filled)?;

        let mut scaled_columns = Vec::with_capacity(self.scalers.len());
        for (j, scaler) in self.scalers.iter().enumerate() {
            let indicator: Vec<f64> = encoded.iter().map(|row| row[j]).collect();
            scaled_columns.push(scaler.transform(&indicator)?);
        }

        let mut rows = Vec::with_capacity(encoded.len());
        for i in 0..encoded.len() {
            rows.push(scaled_columns.iter().map(|col| col[i]).collect());
        }
        Ok(rows)
    }
}

/// Fit-time provenance embedded in the persisted artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitMetadata {
    pub fitted_at: DateTime<Utc>,
    pub train_rows: usize,
}

/// The combined column-routed transformer. Built unfitted from a
/// [`TransformConfig`], fitted exactly once on training features, then
/// applied read-only to any table carrying the same columns.
///
/// Serializes with all learned statistics plus the column partition it was
/// built from, so a loaded artifact can be checked against the current
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnPreprocessor {
    target_column: String,
    numeric: Vec<NumericPipeline>,
    categorical: Vec<CategoricalPipeline>,
    metadata: Option<FitMetadata>,
}

impl ColumnPreprocessor {
    /// Build the unfitted transformer for the configured column partition.
    pub fn new(config: &TransformConfig) -> Self {
        tracing::info!(
            numerical = ?config.numerical_columns,
            categorical = ?config.categorical_columns,
            "built column preprocessor"
        );
        Self {
            target_column: config.target_column.clone(),
            numeric: config
                .numerical_columns
                .iter()
                .cloned()
                .map(NumericPipeline::unfitted)
                .collect(),
            categorical: config
                .categorical_columns
                .iter()
                .cloned()
                .map(|c| CategoricalPipeline::unfitted(c, config.unseen_category))
                .collect(),
            metadata: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn metadata(&self) -> Option<&FitMetadata> {
        self.metadata.as_ref()
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    pub fn numerical_columns(&self) -> impl Iterator<Item = &str> {
        self.numeric.iter().map(|p| p.column.as_str())
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &str> {
        self.categorical.iter().map(|p| p.column.as_str())
    }

    /// Width of the transformed feature matrix (target column not included).
    /// `None` until fitted, since the one-hot width depends on the observed
    /// level sets.
    pub fn output_width(&self) -> Option<usize> {
        self.metadata.as_ref()?;
        Some(
            self.numeric.len()
                + self
                    .categorical
                    .iter()
                    .map(CategoricalPipeline::width)
                    .sum::<usize>(),
        )
    }

    /// Learn all per-column statistics from `table`. Test data must never
    /// reach this method; fit once on training features and reuse.
    pub fn fit(&mut self, table: &Table) -> Result<(), PrepError> {
        let listed: HashSet<&str> = self
            .numeric
            .iter()
            .map(|p| p.column.as_str())
            .chain(self.categorical.iter().map(|p| p.column.as_str()))
            .collect();
        let dropped: Vec<&str> = table
            .columns
            .iter()
            .map(String::as_str)
            .filter(|c| !listed.contains(c))
            .collect();
        if !dropped.is_empty() {
            tracing::warn!(
                columns = ?dropped,
                "columns not in the partition will be dropped from the output"
            );
        }

        for pipeline in &mut self.numeric {
            pipeline.fit(table)?;
        }
        for pipeline in &mut self.categorical {
            pipeline.fit(table)?;
        }
        self.metadata = Some(FitMetadata {
            fitted_at: Utc::now(),
            train_rows: table.row_count(),
        });
        tracing::info!(rows = table.row_count(), "fitted preprocessor");
        Ok(())
    }

    /// Apply the fitted transformation. Output rows are, in order, the
    /// standardized numeric columns followed by the scaled one-hot blocks in
    /// partition order.
    pub fn transform(&self, table: &Table) -> Result<Vec<Vec<f64>>, PrepError> {
        if !self.is_fitted() {
            return Err(PrepError::NotFitted);
        }

        let numeric_columns: Vec<Vec<f64>> = self
            .numeric
            .iter()
            .map(|p| p.transform(table))
            .collect::<Result<_, _>>()?;
        let categorical_blocks: Vec<Vec<Vec<f64>>> = self
            .categorical
            .iter()
            .map(|p| p.transform(table))
            .collect::<Result<_, _>>()?;

        let mut rows = Vec::with_capacity(table.row_count());
        for i in 0..table.row_count() {
            let mut row: Vec<f64> = numeric_columns.iter().map(|col| col[i]).collect();
            for block in &categorical_blocks {
                row.extend_from_slice(&block[i]);
            }
            rows.push(row);
        }
        Ok(rows)
    }

    pub fn fit_transform(&mut self, table: &Table) -> Result<Vec<Vec<f64>>, PrepError> {
        self.fit(table)?;
        self.transform(table)
    }

    /// Whether this (possibly loaded) preprocessor was built from the same
    /// column partition as `config`.
    pub fn matches_partition(&self, config: &TransformConfig) -> bool {
        self.target_column == config.target_column
            && self.numerical_columns().eq(config.numerical_columns.iter().map(String::as_str))
            && self
                .categorical_columns()
                .eq(config.categorical_columns.iter().map(String::as_str))
    }

    /// Human-readable partition summary, used in mismatch errors.
    pub fn partition_summary(&self) -> String {
        format!(
            "numerical={:?} categorical={:?} target={:?}",
            self.numeric.iter().map(|p| &p.column).collect::<Vec<_>>(),
            self.categorical.iter().map(|p| &p.column).collect::<Vec<_>>(),
            self.target_column,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::UnseenCategoryPolicy;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config() -> TransformConfig {
        TransformConfig {
            numerical_columns: vec!["writing_score".into(), "reading_score".into()],
            categorical_columns: vec!["gender".into(), "lunch".into()],
            target_column: "math_score".into(),
            ..TransformConfig::default()
        }
    }

    fn train_features() -> Table {
        Table::new(
            vec![
                "gender".into(),
                "lunch".into(),
                "writing_score".into(),
                "reading_score".into(),
            ],
            vec![
                vec![json!("female"), json!("standard"), json!(72.0), json!(74.0)],
                vec![json!("male"), json!("free_reduced"), json!(60.0), json!(58.0)],
                vec![json!("female"), json!("standard"), json!(null), json!(90.0)],
                vec![json!("male"), json!("standard"), json!(44.0), json!(66.0)],
            ],
        )
    }

    #[test]
    fn test_output_width_counts_levels_after_fit() {
        let mut pre = ColumnPreprocessor::new(&config());
        assert_eq!(pre.output_width(), None);
        pre.fit(&train_features()).unwrap();
        // 2 numeric + 2 gender levels + 2 lunch levels
        assert_eq!(pre.output_width(), Some(6));
    }

    #[test]
    fn test_transform_before_fit_is_rejected() {
        let pre = ColumnPreprocessor::new(&config());
        let err = pre.transform(&train_features()).unwrap_err();
        assert!(matches!(err, PrepError::NotFitted));
    }

    #[test]
    fn test_fit_transform_has_standardized_numeric_columns() {
        let mut pre = ColumnPreprocessor::new(&config());
        let out = pre.fit_transform(&train_features()).unwrap();
        assert_eq!(out.len(), 4);
        for col in 0..2 {
            let values: Vec<f64> = out.iter().map(|row| row[col]).collect();
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            assert!(mean.abs() < 1e-9, "column {col} mean {mean}");
            assert!((var - 1.0).abs() < 1e-9, "column {col} variance {var}");
        }
    }

    #[test]
    fn test_missing_numeric_cell_gets_training_median() {
        let mut pre = ColumnPreprocessor::new(&config());
        pre.fit(&train_features()).unwrap();

        // Median of observed writing scores {72, 60, 44} is 60: the row with
        // the missing cell must transform identically to an explicit 60.
        let missing = Table::new(
            vec!["gender".into(), "lunch".into(), "writing_score".into(), "reading_score".into()],
            vec![vec![json!("female"), json!("standard"), json!(null), json!(74.0)]],
        );
        let explicit = Table::new(
            vec!["gender".into(), "lunch".into(), "writing_score".into(), "reading_score".into()],
            vec![vec![json!("female"), json!("standard"), json!(60.0), json!(74.0)]],
        );
        assert_eq!(
            pre.transform(&missing).unwrap(),
            pre.transform(&explicit).unwrap()
        );
    }

    #[test]
    fn test_unlisted_columns_are_dropped() {
        let mut table = train_features();
        table.columns.push("study_hours".into());
        for row in &mut table.rows {
            row.push(json!(3.0));
        }

        let mut pre = ColumnPreprocessor::new(&config());
        let out = pre.fit_transform(&table).unwrap();
        assert_eq!(out[0].len(), 6);
    }

    #[test]
    fn test_missing_listed_column_fails() {
        let table = Table::new(
            vec!["writing_score".into(), "reading_score".into()],
            vec![vec![json!(70.0), json!(71.0)]],
        );
        let mut pre = ColumnPreprocessor::new(&config());
        let err = pre.fit(&table).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            PrepError::MissingColumn { column, .. } if column == "gender"
        ));
    }

    #[test]
    fn test_unseen_level_zero_policy_keeps_width() {
        let mut cfg = config();
        cfg.unseen_category = UnseenCategoryPolicy::Zero;
        let mut pre = ColumnPreprocessor::new(&cfg);
        pre.fit(&train_features()).unwrap();

        let apply = Table::new(
            vec!["gender".into(), "lunch".into(), "writing_score".into(), "reading_score".into()],
            vec![vec![json!("other"), json!("standard"), json!(55.0), json!(61.0)]],
        );
        let out = pre.transform(&apply).unwrap();
        assert_eq!(out[0].len(), 6);
        // The gender block (columns 2 and 3) is all zeros.
        assert_eq!(out[0][2], 0.0);
        assert_eq!(out[0][3], 0.0);
    }

    #[test]
    fn test_serde_roundtrip_preserves_fitted_state() {
        let mut pre = ColumnPreprocessor::new(&config());
        let table = train_features();
        let before = pre.fit_transform(&table).unwrap();

        let json = serde_json::to_string(&pre).unwrap();
        let restored: ColumnPreprocessor = serde_json::from_str(&json).unwrap();
        assert!(restored.is_fitted());
        assert_eq!(restored.transform(&table).unwrap(), before);
    }

    #[test]
    fn test_matches_partition() {
        let pre = ColumnPreprocessor::new(&config());
        assert!(pre.matches_partition(&config()));

        let mut other = config();
        other.categorical_columns.pop();
        assert!(!pre.matches_partition(&other));
    }
}
