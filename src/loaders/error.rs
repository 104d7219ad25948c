use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write file '{0}'")]
    FileWrite(PathBuf, #[source] std::io::Error),

    #[error("Parsing error processing CSV file '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Encoding error writing CSV file '{path}'")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Column '{column}' in '{path}' has an unexpected type")]
    ColumnType {
        path: PathBuf,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to parse measures JSON")]
    JsonParse(#[from] serde_json::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
