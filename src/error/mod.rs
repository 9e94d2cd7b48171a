//! Error handling for the TFT pipeline.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Specialized error type for the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Error opening, reading or writing a file
    #[error("IO error at {}: {message}", path.display())]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: io::Error,
    },

    /// Error raised by an Arrow kernel or the CSV codec
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error (de)serialising JSON configuration or reports
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A column is missing or has an unexpected type
    #[error("Schema error: {0}")]
    Schema(String),

    /// A request identifier occurs more than once within one measurement
    #[error(
        "Request number '{request_number}' occurs {count} times in {measurement} records; \
         pairing by request number would be ambiguous"
    )]
    DuplicateRequestNumber {
        measurement: String,
        request_number: String,
        count: usize,
    },

    /// A statistical computation could not be carried out
    #[error("Statistics error: {0}")]
    Statistics(String),
}

impl PipelineError {
    /// Create an IO error that remembers which path it concerned
    pub fn io(path: impl AsRef<Path>, message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            source,
        }
    }

    /// Create a schema error for a column that is not present
    pub fn column_not_found(column: &str) -> Self {
        Self::Schema(format!("Column '{column}' not found"))
    }

    /// Create a schema error for a column of the wrong type
    pub fn column_type(column: &str, expected: &str) -> Self {
        Self::Schema(format!("Column '{column}' is not a {expected} array"))
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
