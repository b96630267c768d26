//! Text extraction from PDF and DOCX documents

use crate::error::ExtractionError;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::any::Any;
use std::io::{BufRead, BufReader, Cursor};
use std::panic::{self, AssertUnwindSafe};

/// Main document part inside a DOCX package.
const DOCX_DOCUMENT_PART: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

fn extraction_error(detail: impl Into<String>) -> ExtractionError {
    ExtractionError::Extraction {
        detail: detail.into(),
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|payload| {
            extraction_error(format!("PDF parser aborted: {}", panic_message(payload.as_ref())))
        })?
        .map_err(|e| extraction_error(format!("Failed to extract text from PDF: {}", e)))?;

        let empty_pages = pages.iter().filter(|p| p.trim().is_empty()).count();
        debug!(
            "Extracted {} PDF pages ({} without text)",
            pages.len(),
            empty_pages
        );

        Ok(pages.concat())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| extraction_error(format!("Failed to open DOCX package: {}", e)))?;

        let part = archive.by_name(DOCX_DOCUMENT_PART).map_err(|e| {
            extraction_error(format!("DOCX package has no {}: {}", DOCX_DOCUMENT_PART, e))
        })?;

        let paragraphs = read_paragraphs(BufReader::new(part))?;
        debug!("Extracted {} DOCX paragraphs", paragraphs.len());

        Ok(paragraphs.join("\n"))
    }
}

/// Collect the text of every body-level `w:p`, in document order.
///
/// Paragraphs inside tables and text boxes are skipped. Runs are
/// concatenated; `w:tab` becomes a tab and `w:br`/`w:cr` a newline.
fn read_paragraphs<R: BufRead>(reader: R) -> Result<Vec<String>, ExtractionError> {
    let mut xml_reader = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth: usize = 0;
    let mut table_depth: usize = 0;
    let mut in_text = false;

    loop {
        let collecting = table_depth == 0 && paragraph_depth == 1;

        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" if table_depth == 0 && paragraph_depth == 0 => {
                    paragraphs.push(String::new());
                }
                b"w:tab" if collecting => current.push('\t'),
                b"w:br" | b"w:cr" if collecting => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text && collecting => {
                let text = e
                    .unescape()
                    .map_err(|err| extraction_error(format!("Malformed DOCX text: {}", err)))?;
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" => {
                    if table_depth == 0 && paragraph_depth == 1 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(extraction_error(format!(
                    "Malformed DOCX XML at byte {}: {}",
                    xml_reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
