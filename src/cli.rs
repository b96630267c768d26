//! CLI interface for the resume scorer

use crate::config::{GrammarBackend, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Score PDF and DOCX resumes for ATS compliance, keywords, grammar, structure and skills")]
#[command(long_about = "Extract text from a resume, compute five sub-scores and a weighted overall score, \
    and optionally compare it against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a single resume
    Evaluate {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include supplemental analysis in console output
        #[arg(short, long)]
        detailed: bool,

        /// Grammar backend: heuristic, fixed
        #[arg(short, long)]
        grammar: Option<String>,
    },

    /// Evaluate several resumes against the same job description
    Batch {
        /// Resume files (PDF, DOCX)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Output format: console, json, csv
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Inspect the keyword tables in use
    Keywords {
        #[command(subcommand)]
        action: Option<KeywordsAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

#[derive(Subcommand)]
pub enum KeywordsAction {
    /// Summarize the active keyword tables
    Show,

    /// Write the active keyword tables as TOML
    Export {
        /// Destination file
        path: PathBuf,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, csv",
            format
        )),
    }
}

pub fn parse_grammar_backend(backend: &str) -> Result<GrammarBackend, String> {
    match backend.to_lowercase().as_str() {
        "heuristic" => Ok(GrammarBackend::Heuristic),
        "fixed" | "none" => Ok(GrammarBackend::Fixed),
        _ => Err(format!(
            "Invalid grammar backend: {}. Supported: heuristic, fixed",
            backend
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
