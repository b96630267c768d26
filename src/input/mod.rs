//! Input processing module
//! Handles format detection and text extraction from PDF and DOCX documents

pub mod document;
pub mod file_detector;
pub mod text_extractor;

pub use document::{extract, extract_document, Document};
pub use file_detector::DocumentFormat;
