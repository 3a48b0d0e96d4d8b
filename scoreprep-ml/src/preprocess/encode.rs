//! Categorical encoding.

use crate::error::PrepError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What to do when a category shows up at apply time that was absent from
/// the fit-time training data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnseenCategoryPolicy {
    /// Fail the transform naming the offending column and value.
    #[default]
    Error,
    /// Emit an all-zero indicator row for the unseen value.
    Zero,
}

/// One-hot encoder for one categorical column.
///
/// The level set is fixed at fit time and sorted lexicographically, so the
/// output width and column order are reproducible across runs. Values seen
/// at apply time but not at fit time are handled per
/// [`UnseenCategoryPolicy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    policy: UnseenCategoryPolicy,
    levels: Option<Vec<String>>,
}

impl OneHotEncoder {
    pub fn new(policy: UnseenCategoryPolicy) -> Self {
        Self {
            policy,
            levels: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.levels.is_some()
    }

    /// The observed level set, once fitted.
    pub fn levels(&self) -> Option<&[String]> {
        self.levels.as_deref()
    }

    /// Number of indicator columns this encoder produces.
    pub fn width(&self) -> usize {
        self.levels.as_ref().map_or(0, Vec::len)
    }

    pub fn fit(&mut self, column: &str, values: &[String]) -> Result<(), PrepError> {
        if values.is_empty() {
            return Err(PrepError::degenerate_column(column));
        }
        let levels: BTreeSet<&str> = values.iter().map(String::as_str).collect();
        self.levels = Some(levels.into_iter().map(str::to_string).collect());
        Ok(())
    }

    /// Encode each value as an indicator row of width [`width`](Self::width).
    pub fn transform(&self, column: &str, values: &[String]) -> Result<Vec<Vec<f64>>, PrepError> {
        let levels = self.levels.as_ref().ok_or(PrepError::NotFitted)?;

        let mut rows = Vec::with_capacity(values.len());
        for value in values {
            let mut row = vec![0.0; levels.len()];
            match levels.binary_search_by(|level| level.as_str().cmp(value.as_str())) {
                Ok(idx) => row[idx] = 1.0,
                Err(_) => match self.policy {
                    UnseenCategoryPolicy::Error => {
                        return Err(PrepError::unseen_category(column, value));
                    }
                    UnseenCategoryPolicy::Zero => {}
                },
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_levels_are_sorted_and_deduped() {
        let mut encoder = OneHotEncoder::new(UnseenCategoryPolicy::Error);
        encoder
            .fit("lunch", &strings(&["standard", "free_reduced", "standard"]))
            .unwrap();
        assert_eq!(encoder.levels().unwrap(), &strings(&["free_reduced", "standard"]));
        assert_eq!(encoder.width(), 2);
    }

    #[test]
    fn test_one_indicator_per_row() {
        let mut encoder = OneHotEncoder::new(UnseenCategoryPolicy::Error);
        encoder.fit("gender", &strings(&["female", "male"])).unwrap();
        let rows = encoder
            .transform("gender", &strings(&["male", "female"]))
            .unwrap();
        assert_eq!(rows, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_unseen_category_errors_by_default() {
        let mut encoder = OneHotEncoder::new(UnseenCategoryPolicy::Error);
        encoder.fit("gender", &strings(&["female", "male"])).unwrap();
        let err = encoder
            .transform("gender", &strings(&["nonbinary"]))
            .unwrap_err();
        assert!(matches!(
            err,
            PrepError::UnseenCategory { ref value, .. } if value == "nonbinary"
        ));
    }

    #[test]
    fn test_unseen_category_zero_policy() {
        let mut encoder = OneHotEncoder::new(UnseenCategoryPolicy::Zero);
        encoder.fit("gender", &strings(&["female", "male"])).unwrap();
        let rows = encoder
            .transform("gender", &strings(&["nonbinary"]))
            .unwrap();
        assert_eq!(rows, vec![vec![0.0, 0.0]]);
    }

    #[test]
    fn test_transform_before_fit() {
        let encoder = OneHotEncoder::new(UnseenCategoryPolicy::Error);
        assert!(matches!(
            encoder.transform("gender", &strings(&["female"])).unwrap_err(),
            PrepError::NotFitted
        ));
    }
}
