//! Report rendering for the terminal and for export

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, OutputFormatter, ReportGenerator};
pub use report::{BatchEntry, BatchReport, EvaluationReport, ReportMetadata};
