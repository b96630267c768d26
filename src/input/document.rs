//! Documents handed to the extractor

use crate::error::ExtractionError;
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, TextExtractor};
use log::info;
use std::io::ErrorKind;
use std::path::Path;

/// Raw document bytes plus their declared format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    bytes: Vec<u8>,
    format: DocumentFormat,
}

impl Document {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self { bytes, format }
    }

    /// Read a document from disk.
    ///
    /// The format is `declared` when given, otherwise inferred from the
    /// file extension.
    pub fn open(path: &Path, declared: Option<DocumentFormat>) -> Result<Self, ExtractionError> {
        if !path.is_file() {
            return Err(ExtractionError::FileNotFound(path.to_path_buf()));
        }

        let format = declared
            .or_else(|| DocumentFormat::from_path(path))
            .ok_or_else(|| {
                ExtractionError::UnsupportedFormat(match path.extension() {
                    Some(ext) => format!(".{}", ext.to_string_lossy()),
                    None => format!("no extension on '{}'", path.display()),
                })
            })?;

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                ExtractionError::FileNotFound(path.to_path_buf())
            }
            _ => ExtractionError::Extraction {
                detail: format!("Failed to read '{}': {}", path.display(), e),
            },
        })?;

        Ok(Self::new(bytes, format))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }
}

/// Extract plain text from the file at `path`.
pub fn extract(path: &Path, declared: Option<DocumentFormat>) -> Result<String, ExtractionError> {
    let document = Document::open(path, declared)?;
    info!("Extracting text from {} document: {}", document.format(), path.display());
    extract_document(&document)
}

/// Extract plain text from an in-memory document.
pub fn extract_document(document: &Document) -> Result<String, ExtractionError> {
    match document.format {
        DocumentFormat::Pdf => PdfExtractor.extract(&document.bytes),
        DocumentFormat::Docx => DocxExtractor.extract(&document.bytes),
    }
}
