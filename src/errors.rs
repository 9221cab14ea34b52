use thiserror::Error;

/// Error type for the ingest, config, and CLI boundary. The recurrence
/// engine itself is total and never produces these.
#[derive(Debug, Error)]
pub enum SubcalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("sheet is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("sheet contains no data rows")]
    EmptySheet,
    #[error("no valid subscription rows found")]
    NoSubscriptions,
    #[error("{0}")]
    Invalid(String),
}
