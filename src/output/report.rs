//! Report data handed to the formatters

use crate::error::EvaluationFailure;
use crate::processing::EvaluationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
    pub grammar_backend: String,
    pub keyword_tables_version: String,
    pub job_description_source: Option<String>,
}

impl ReportMetadata {
    pub fn new(
        grammar_backend: &str,
        keyword_tables_version: &str,
        job_description_source: Option<String>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            scorer_version: env!("CARGO_PKG_VERSION").to_string(),
            grammar_backend: grammar_backend.to_string(),
            keyword_tables_version: keyword_tables_version.to_string(),
            job_description_source,
        }
    }
}

/// One evaluated resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metadata: ReportMetadata,
    pub resume_file: String,
    pub result: EvaluationResult,
}

impl EvaluationReport {
    pub fn new(metadata: ReportMetadata, resume_file: &Path, result: EvaluationResult) -> Self {
        Self {
            metadata,
            resume_file: resume_file.display().to_string(),
            result,
        }
    }
}

/// Outcome for one file of a batch. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub resume_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<EvaluationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn from_outcome(
        resume_file: &Path,
        outcome: std::result::Result<EvaluationResult, EvaluationFailure>,
    ) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(failure) => (None, Some(failure.to_string())),
        };
        Self {
            resume_file: resume_file.display().to_string(),
            result,
            error,
        }
    }

    pub fn failed(resume_file: &Path, error: String) -> Self {
        Self {
            resume_file: resume_file.display().to_string(),
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub metadata: ReportMetadata,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn new(metadata: ReportMetadata, entries: Vec<BatchEntry>) -> Self {
        Self { metadata, entries }
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    /// Successful entries, best overall score first.
    pub fn ranked(&self) -> Vec<(&str, &EvaluationResult)> {
        let mut ranked: Vec<(&str, &EvaluationResult)> = self
            .entries
            .iter()
            .filter_map(|e| e.result.as_ref().map(|r| (e.resume_file.as_str(), r)))
            .collect();
        ranked.sort_by(|a, b| b.1.overall_score.total_cmp(&a.1.overall_score));
        ranked
    }
}
