//! Error handling for the resume scorer

use std::path::PathBuf;
use thiserror::Error;

/// Why a document could not be turned into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("extraction error: {detail}")]
    Extraction { detail: String },
}

/// Returned by the evaluator when no result can be produced.
///
/// Carries no partial scores: the caller either gets a full
/// `EvaluationResult` or this. `path` is `None` for in-memory documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("resume evaluation failed: {source}")]
pub struct EvaluationFailure {
    pub path: Option<PathBuf>,
    #[source]
    pub source: ExtractionError,
}

impl EvaluationFailure {
    pub fn new(path: Option<PathBuf>, source: ExtractionError) -> Self {
        Self { path, source }
    }

    pub fn kind(&self) -> &ExtractionError {
        &self.source
    }
}

#[derive(Error, Debug)]
pub enum ResumeScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Evaluation(#[from] EvaluationFailure),

    #[error("Keyword table error: {0}")]
    KeywordTables(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeScorerError>;

impl From<csv::Error> for ResumeScorerError {
    fn from(err: csv::Error) -> Self {
        ResumeScorerError::OutputFormatting(err.to_string())
    }
}
