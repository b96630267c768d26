//! Fixture builders shared by the integration tests
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub const SAMPLE_RESUME: &[&str] = &[
    "John Doe",
    "email: john.doe@example.com | 555-123-4567",
    "Summary",
    "Software engineer building data platforms with Python & SQL.",
    "Experience",
    "• Developed REST APIs in Python and Flask for 2M users.",
    "• Managed a team of five engineers using agile practices.",
    "• Implemented CI/CD pipelines with Docker on AWS.",
    "Education",
    "BSc Computer Science, State University",
    "Skills",
    "Python, Java, SQL, Docker, AWS, Git, leadership, teamwork, communication",
];

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Write a minimal DOCX with one paragraph per line.
pub fn write_docx(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let body: String = lines
        .iter()
        .map(|line| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, escape(line)))
        .collect();

    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
        W_NS, body
    )
    .unwrap();
    zip.finish().unwrap();
    path
}

/// A PDF with one page per entry, each showing its text in Helvetica.
/// An empty entry produces a page with an empty content stream.
pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3 font, then a page and its content stream per entry
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        let content = if text.is_empty() {
            String::new()
        } else {
            format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text)
        };
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    out.extend_from_slice(xref.as_bytes());
    out
}

pub fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(pages)).unwrap();
    path
}
