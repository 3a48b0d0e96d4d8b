//! Preprocessing steps — imputation, scaling, encoding, and the combined
//! column-routed pipeline.

pub mod encode;
pub mod impute;
pub mod pipeline;
pub mod scale;

pub use encode::{OneHotEncoder, UnseenCategoryPolicy};
pub use impute::{MedianImputer, MostFrequentImputer};
pub use pipeline::{ColumnPreprocessor, FitMetadata};
pub use scale::StandardScaler;
