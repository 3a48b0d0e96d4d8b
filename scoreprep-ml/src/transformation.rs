//! Fit-and-apply orchestration.
//!
//! [`DataTransformation::run`] is the one blocking entry point: split
//! targets off both tables, fit the preprocessor on training features only,
//! transform both feature tables, reattach each table's own target as the
//! final column, and persist the fitted preprocessor. Either all of that
//! succeeds, or the caller gets an error and no output matrices.

use crate::config::TransformConfig;
use crate::data::Table;
use crate::error::{PrepError, ResultExt};
use crate::origin;
use crate::preprocess::ColumnPreprocessor;
use std::path::{Path, PathBuf};

/// Output of a successful fit-and-transform run. Each matrix carries the
/// transformed features with that table's target appended as the last
/// column.
#[derive(Debug, Clone)]
pub struct TransformationOutput {
    pub train: Vec<Vec<f64>>,
    pub test: Vec<Vec<f64>>,
    pub preprocessor_path: PathBuf,
}

/// Orchestrates fit on train, apply to train and test, persist the artifact.
#[derive(Debug, Clone, Default)]
pub struct DataTransformation {
    config: TransformConfig,
}

impl DataTransformation {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Fit on `train`, transform `train` and `test`, write the artifact.
    ///
    /// Test features never influence fit-time statistics. The artifact at
    /// the configured path is overwritten on success; a failure anywhere
    /// leaves no new artifact behind.
    pub fn run(&self, train: &Table, test: &Table) -> Result<TransformationOutput, PrepError> {
        let target = &self.config.target_column;
        let (train_features, train_target) =
            train.split_target(target, "train").at(origin!())?;
        let (test_features, test_target) = test.split_target(target, "test").at(origin!())?;
        tracing::info!(
            train_rows = train_features.row_count(),
            test_rows = test_features.row_count(),
            "split feature and target columns"
        );

        let mut preprocessor = ColumnPreprocessor::new(&self.config);
        let train_arr = preprocessor.fit_transform(&train_features).at(origin!())?;
        let test_arr = preprocessor.transform(&test_features).at(origin!())?;
        tracing::info!("applied preprocessing to train and test features");

        let train_matrix = append_target(train_arr, &train_target);
        let test_matrix = append_target(test_arr, &test_target);

        let path = &self.config.preprocessor_path;
        scoreprep_core::persistence::atomic_write_json(path, &preprocessor).at(origin!())?;
        match scoreprep_core::hash::hash_file(path) {
            Ok(digest) => {
                tracing::info!(path = %path.display(), sha256 = %digest, "saved preprocessor artifact")
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "artifact written but could not be fingerprinted"),
        }

        Ok(TransformationOutput {
            train: train_matrix,
            test: test_matrix,
            preprocessor_path: path.clone(),
        })
    }
}

/// Load a previously persisted preprocessor and verify it was built from the
/// same column partition as `config`.
pub fn load_preprocessor(
    path: &Path,
    config: &TransformConfig,
) -> Result<ColumnPreprocessor, PrepError> {
    let preprocessor: ColumnPreprocessor = scoreprep_core::persistence::load_json(path)
        .at(origin!())?
        .ok_or_else(|| PrepError::ArtifactMissing(path.to_path_buf()))?;

    if !preprocessor.matches_partition(config) {
        return Err(PrepError::SchemaMismatch(preprocessor.partition_summary()));
    }
    Ok(preprocessor)
}

fn append_target(mut matrix: Vec<Vec<f64>>, target: &[f64]) -> Vec<Vec<f64>> {
    for (row, value) in matrix.iter_mut().zip(target) {
        row.push(*value);
    }
    matrix
}
