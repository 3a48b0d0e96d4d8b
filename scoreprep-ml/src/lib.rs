//! # scoreprep-ml — Preprocessing Pipeline for Educational-Performance Data
//!
//! Fits column-wise preprocessing on a training split and applies the
//! identical transformation to a test split, persisting the fitted state for
//! reuse at inference time:
//!
//! - numeric columns: median imputation, then standardization
//! - categorical columns: most-frequent imputation, one-hot encoding, then
//!   scaling without centering
//!
//! The fitted transformer is immutable after `fit` and round-trips through
//! JSON, so a later process can load the artifact and apply exactly the
//! transformation the training run learned.
//!
//! ```no_run
//! use scoreprep_ml::{DataTransformation, Table, TransformConfig};
//!
//! # fn load(_: &str) -> Table { Table::default() }
//! let train = load("train.csv");
//! let test = load("test.csv");
//!
//! let transformation = DataTransformation::new(TransformConfig::default());
//! let output = transformation.run(&train, &test)?;
//! assert_eq!(output.train[0].len(), output.test[0].len());
//! # Ok::<(), scoreprep_ml::PrepError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod preprocess;
pub mod transformation;

pub use config::TransformConfig;
pub use data::Table;
pub use error::{PrepError, ResultExt};
pub use preprocess::{ColumnPreprocessor, UnseenCategoryPolicy};
pub use transformation::{DataTransformation, TransformationOutput, load_preprocessor};
