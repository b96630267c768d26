//! Resume scorer library
//!
//! Extracts text from PDF and DOCX resumes and scores it for ATS compliance,
//! keyword coverage, grammar, structure and skills, optionally against a job
//! description.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{EvaluationFailure, ExtractionError, Result, ResumeScorerError};
pub use processing::{EvaluationResult, Evaluator};
