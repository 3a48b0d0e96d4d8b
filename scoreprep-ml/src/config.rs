//! Configuration types for the scoreprep-ml crate.

use crate::preprocess::UnseenCategoryPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Column partition and artifact settings for the preprocessing pipeline.
///
/// The partition is a fixed declaration, never inferred from data: columns
/// present in an input table but listed in neither group are dropped from the
/// transformed output. Changing the dataset schema means changing this
/// config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Columns routed through median-impute + standardize.
    #[serde(default = "default_numerical_columns")]
    pub numerical_columns: Vec<String>,
    /// Columns routed through most-frequent-impute + one-hot + scale.
    #[serde(default = "default_categorical_columns")]
    pub categorical_columns: Vec<String>,
    /// Numeric target column, excluded from the feature set and reattached
    /// as the last output column.
    #[serde(default = "default_target_column")]
    pub target_column: String,
    /// Where the fitted preprocessor artifact is persisted.
    #[serde(default = "default_preprocessor_path")]
    pub preprocessor_path: PathBuf,
    /// What to do with a category observed at apply time but not at fit time.
    #[serde(default)]
    pub unseen_category: UnseenCategoryPolicy,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            numerical_columns: default_numerical_columns(),
            categorical_columns: default_categorical_columns(),
            target_column: default_target_column(),
            preprocessor_path: default_preprocessor_path(),
            unseen_category: UnseenCategoryPolicy::default(),
        }
    }
}

fn default_numerical_columns() -> Vec<String> {
    vec!["writing_score".to_string(), "reading_score".to_string()]
}

fn default_categorical_columns() -> Vec<String> {
    vec![
        "gender".to_string(),
        "race_ethnicity".to_string(),
        "parental_level_of_education".to_string(),
        "lunch".to_string(),
        "test_preparation_course".to_string(),
    ]
}

fn default_target_column() -> String {
    "math_score".to_string()
}

fn default_preprocessor_path() -> PathBuf {
    PathBuf::from("artifacts/preprocessor.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_partition() {
        let config = TransformConfig::default();
        assert_eq!(config.numerical_columns.len(), 2);
        assert_eq!(config.categorical_columns.len(), 5);
        assert_eq!(config.target_column, "math_score");
        assert_eq!(
            config.preprocessor_path,
            PathBuf::from("artifacts/preprocessor.json")
        );
        assert_eq!(config.unseen_category, UnseenCategoryPolicy::Error);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = TransformConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TransformConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.numerical_columns, config.numerical_columns);
        assert_eq!(parsed.target_column, config.target_column);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: TransformConfig =
            serde_json::from_str(r#"{"target_column": "final_grade"}"#).unwrap();
        assert_eq!(parsed.target_column, "final_grade");
        assert_eq!(parsed.numerical_columns, default_numerical_columns());
    }
}
