//! Integration tests for the resume scorer

mod common;

use common::{write_docx, write_pdf, SAMPLE_RESUME};
use resume_scorer::batch::evaluate_batch;
use resume_scorer::config::Config;
use resume_scorer::input::{extract_document, Document, DocumentFormat};
use resume_scorer::processing::keywords::{KeywordCategory, KeywordTables};
use resume_scorer::processing::sections::SectionName;
use resume_scorer::{Evaluator, ExtractionError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn sample(dir: &TempDir) -> PathBuf {
    write_docx(dir.path(), "john_doe.docx", SAMPLE_RESUME)
}

#[test]
fn test_scores_stay_in_range() {
    let dir = TempDir::new().unwrap();
    let path = sample(&dir);
    let evaluator = Evaluator::with_defaults().unwrap();

    for jd in [None, Some("Senior Python engineer, Kubernetes and Terraform a plus")] {
        let result = evaluator.evaluate(&path, jd).unwrap();
        for score in [
            result.overall_score,
            result.ats_score,
            result.keyword_score,
            result.grammar_score,
            result.structure_score,
            result.skills_score,
            result.jd_match_percentage,
        ] {
            assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
        }
        assert!((1..=3).contains(&result.suggested_roles.len()));
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = sample(&dir);
    let evaluator = Evaluator::with_defaults().unwrap();
    let jd = Some("Python developer with Flask experience");

    let first = evaluator.evaluate(&path, jd).unwrap();
    let second = evaluator.evaluate(&path, jd).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_extracted_text_reaches_result() {
    let dir = TempDir::new().unwrap();
    let result = Evaluator::with_defaults()
        .unwrap()
        .evaluate(&sample(&dir), None)
        .unwrap();
    assert_eq!(result.resume_text, SAMPLE_RESUME.join("\n"));
    assert_eq!(result.jd_match_percentage, 0.0);
    assert!(result.suggested_roles.contains(&"Software Developer".to_string()));
}

#[test]
fn test_ats_scenario_contact_and_headers() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        dir.path(),
        "ats.docx",
        &[
            "email: a@b.com",
            "555-123-4567",
            "Experience",
            "Developed, managed and designed internal tools",
            "Education",
            "Skills",
        ],
    );
    let result = Evaluator::with_defaults().unwrap().evaluate(&path, None).unwrap();
    assert!(result.ats_score >= 50.0, "ats score {}", result.ats_score);
}

#[test]
fn test_keyword_scenario_full_match() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        dir.path(),
        "match.docx",
        &["Built REST services in Python and Flask backed by SQL.", "API design and teamwork."],
    );
    let result = Evaluator::with_defaults()
        .unwrap()
        .evaluate(&path, Some("Python Flask SQL REST API teamwork"))
        .unwrap();
    assert_eq!(result.keyword_score, 100.0);
    assert_eq!(result.jd_match_percentage, 100.0);
    assert!(result.missing_keywords.is_empty());
}

#[test]
fn test_keyword_scenario_no_known_keywords() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "hobbies.docx", &["I enjoy gardening and baking."]);
    let result = Evaluator::with_defaults().unwrap().evaluate(&path, Some("")).unwrap();
    assert_eq!(result.keyword_score, 0.0);
    assert_eq!(result.jd_match_percentage, 0.0);
    assert_eq!(result.suggested_roles, vec!["General Professional"]);
}

#[test]
fn test_txt_file_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.txt");
    std::fs::write(&path, "Experience\nPython").unwrap();

    let failure = Evaluator::with_defaults().unwrap().evaluate(&path, None).unwrap_err();
    assert_eq!(failure.kind(), &ExtractionError::UnsupportedFormat(".txt".to_string()));
    assert_eq!(failure.path.as_deref(), Some(path.as_path()));
}

#[test]
fn test_nonexistent_file() {
    let path = Path::new("tests/fixtures/nonexistent.pdf");
    let failure = Evaluator::with_defaults().unwrap().evaluate(path, None).unwrap_err();
    assert!(matches!(failure.kind(), ExtractionError::FileNotFound(_)));
}

#[test]
fn test_corrupt_pdf_is_extraction_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.4 this is not really a pdf").unwrap();

    let failure = Evaluator::with_defaults().unwrap().evaluate(&path, None).unwrap_err();
    assert!(matches!(failure.kind(), ExtractionError::Extraction { .. }));
}

#[test]
fn test_pdf_pages_concatenated_in_order() {
    let bytes = common::pdf_bytes(&["Experience Python", "", "Skills Docker"]);
    let text = extract_document(&Document::new(bytes, DocumentFormat::Pdf)).unwrap();
    // the empty middle page adds no text
    assert_eq!(
        text.split_whitespace().collect::<Vec<_>>(),
        vec!["Experience", "Python", "Skills", "Docker"]
    );
}

#[test]
fn test_pdf_resume_is_evaluated() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "resume.pdf", &["Experience Python", "", "Skills Docker"]);
    let result = Evaluator::with_defaults().unwrap().evaluate(&path, None).unwrap();

    assert_eq!(result.sections, vec![SectionName::Experience, SectionName::Skills]);
    assert_eq!(
        result.missing_sections,
        vec![SectionName::Education, SectionName::Projects]
    );
    // python and docker: 2 * 5
    assert_eq!(result.skills_score, 10.0);
}

#[test]
fn test_extension_is_case_insensitive_and_overridable() {
    let dir = TempDir::new().unwrap();
    let evaluator = Evaluator::with_defaults().unwrap();

    let upper = write_docx(dir.path(), "RESUME.DOCX", &["Experience"]);
    assert!(evaluator.evaluate(&upper, None).is_ok());

    let bare = write_docx(dir.path(), "upload-1234", &["Experience"]);
    assert!(evaluator.evaluate(&bare, None).is_err());
    let result = evaluator
        .evaluate_as(&bare, Some(DocumentFormat::Docx), None)
        .unwrap();
    assert_eq!(result.resume_text, "Experience");
}

#[test]
fn test_custom_keyword_tables_from_config() {
    let dir = TempDir::new().unwrap();
    let mut tables = KeywordTables::default();
    tables.version = "nursing-1".to_string();
    tables.roles = vec![KeywordCategory {
        name: "Registered Nurse".to_string(),
        keywords: vec!["triage".to_string(), "patient care".to_string()],
    }];
    let tables_path = dir.path().join("tables.toml");
    std::fs::write(&tables_path, tables.to_toml_string().unwrap()).unwrap();

    let mut config = Config::default();
    config.keywords.tables_path = Some(tables_path);
    let evaluator = Evaluator::from_config(&config).unwrap();
    assert_eq!(evaluator.lexicon().version(), "nursing-1");

    let resume = write_docx(dir.path(), "nurse.docx", &["ER triage and patient care"]);
    let result = evaluator.evaluate(&resume, None).unwrap();
    assert_eq!(result.suggested_roles, vec!["Registered Nurse"]);
}

#[tokio::test]
async fn test_concurrent_batch_evaluation() {
    let dir = TempDir::new().unwrap();
    let good = sample(&dir);
    let other = write_docx(dir.path(), "other.docx", &["Figma wireframe prototype"]);
    let missing = dir.path().join("missing.pdf");
    let paths = vec![good.clone(), missing, other];

    let evaluator = Arc::new(Evaluator::with_defaults().unwrap());
    let jd: Option<Arc<str>> = Some(Arc::from("Python developer"));
    let entries = evaluate_batch(Arc::clone(&evaluator), &paths, jd.clone(), None)
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].resume_file, good.display().to_string());
    assert!(entries[0].result.is_some());
    assert!(entries[1].result.is_none());
    assert!(entries[1].error.as_deref().unwrap().contains("file not found"));
    assert_eq!(
        entries[2].result.as_ref().unwrap().suggested_roles,
        vec!["UI/UX Designer"]
    );

    // Concurrent results match a sequential run
    let sequential = evaluator.evaluate(&good, jd.as_deref()).unwrap();
    assert_eq!(entries[0].result.as_ref().unwrap(), &sequential);
}
