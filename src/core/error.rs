use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building, normalizing or predicting from windows.
///
/// Every variant is fatal for a forecasting run; there is no partial-output mode.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load configuration from {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("training set is empty: no window fits in the training series")]
    EmptyTrainingSet,

    #[error("training matrix has {rows} rows but {targets} targets were supplied")]
    TargetLengthMismatch { rows: usize, targets: usize },

    #[error("feature column mismatch: training windows have {train} columns, test windows have {test}")]
    ColumnMismatch { train: usize, test: usize },

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: `{token}` is not a finite real number", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{} contains no values", path.display())]
    EmptySeries { path: PathBuf },
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, ForecastError>;
