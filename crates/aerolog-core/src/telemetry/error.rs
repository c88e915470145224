//! Ingestion errors

use thiserror::Error;

use crate::config::ConfigError;

/// Structural errors that abort ingestion of a telemetry file.
///
/// Value-level problems (blank or non-numeric cells) never show up here; they
/// are carried in-band as `f64::NAN` so that columns stay index-aligned.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Input has no data rows")]
    EmptyInput,

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Names of the absent required columns, if this is a `MissingColumns` error
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            IngestError::MissingColumns { missing } => Some(missing),
            _ => None,
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Csv(err.to_string())
    }
}
