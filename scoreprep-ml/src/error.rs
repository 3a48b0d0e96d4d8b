//! Error types for the scoreprep-ml crate.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for preprocessing operations.
///
/// Nothing is recovered locally: every failure inside the pipeline surfaces
/// to the caller as one of these variants, usually wrapped in [`Context`]
/// with the file/line it was raised from (see [`ResultExt::at`] and
/// [`origin!`](crate::origin)).
///
/// [`Context`]: PrepError::Context
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("column `{column}` missing from {table} table")]
    MissingColumn { column: String, table: String },

    #[error("preprocessor has not been fitted")]
    NotFitted,

    #[error("column `{column}` has no non-missing values to learn from")]
    DegenerateColumn { column: String },

    #[error("category `{value}` in column `{column}` was not seen during fit")]
    UnseenCategory { column: String, value: String },

    #[error("non-numeric value in column `{column}` at row {row}")]
    InvalidValue { column: String, row: usize },

    #[error("artifact does not match configured column partition: {0}")]
    SchemaMismatch(String),

    #[error("no preprocessor artifact at {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("[{origin}] {source}")]
    Context {
        origin: String,
        #[source]
        source: Box<PrepError>,
    },
}

impl PrepError {
    pub fn missing_column(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            table: table.into(),
        }
    }

    pub fn degenerate_column(column: impl Into<String>) -> Self {
        Self::DegenerateColumn {
            column: column.into(),
        }
    }

    pub fn unseen_category(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnseenCategory {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn invalid_value(column: impl Into<String>, row: usize) -> Self {
        Self::InvalidValue {
            column: column.into(),
            row,
        }
    }

    /// Wrap this error with the location it was raised from.
    pub fn at(self, origin: impl Into<String>) -> Self {
        Self::Context {
            origin: origin.into(),
            source: Box::new(self),
        }
    }

    /// Strip any [`Context`](PrepError::Context) wrapping and return the
    /// underlying cause.
    pub fn root_cause(&self) -> &PrepError {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Attach an origin to the error side of a `Result`.
pub trait ResultExt<T> {
    fn at(self, origin: &str) -> Result<T, PrepError>;
}

impl<T, E: Into<PrepError>> ResultExt<T> for Result<T, E> {
    fn at(self, origin: &str) -> Result<T, PrepError> {
        self.map_err(|e| e.into().at(origin))
    }
}

/// Expands to a `"file:line"` literal for [`ResultExt::at`].
#[macro_export]
macro_rules! origin {
    () => {
        concat!(file!(), ":", line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_carries_origin_and_cause() {
        let err = PrepError::missing_column("math_score", "train").at("data.rs:42");
        let msg = err.to_string();
        assert!(msg.contains("data.rs:42"), "{msg}");
        assert!(msg.contains("math_score"), "{msg}");
        assert!(matches!(
            err.root_cause(),
            PrepError::MissingColumn { column, .. } if column == "math_score"
        ));
    }

    #[test]
    fn test_result_ext_wraps_io_errors() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::other("disk gone"));
        let err = res.at(origin!()).unwrap_err();
        assert!(matches!(err.root_cause(), PrepError::Io(_)));
        assert!(err.to_string().contains("error.rs"));
    }

    #[test]
    fn test_nested_context_root_cause() {
        let err = PrepError::NotFitted.at("a.rs:1").at("b.rs:2");
        assert!(matches!(err.root_cause(), PrepError::NotFitted));
    }
}
