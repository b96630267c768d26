//! Evaluation orchestrator: document in, scored result out

use crate::config::Config;
use crate::error::{EvaluationFailure, Result};
use crate::input::{self, Document, DocumentFormat};
use crate::processing::feedback::{
    self, ActionVerbSuggestion, ImprovementSuggestion, ScoreGap,
};
use crate::processing::grammar::{grammar_scorer_for, GrammarScorer};
use crate::processing::keywords::{KeywordTables, Lexicon};
use crate::processing::matching;
use crate::processing::scoring::{ScoreSet, Scorer};
use crate::processing::sections::{parse_sections, SectionName};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sections whose absence is reported back to the user.
pub const EXPECTED_SECTIONS: [SectionName; 4] = [
    SectionName::Education,
    SectionName::Experience,
    SectionName::Projects,
    SectionName::Skills,
];

/// Complete evaluation of one resume. Every number is rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub overall_score: f64,
    pub ats_score: f64,
    pub keyword_score: f64,
    pub grammar_score: f64,
    pub structure_score: f64,
    pub skills_score: f64,
    pub jd_match_percentage: f64,
    pub suggested_roles: Vec<String>,
    pub feedback: Vec<String>,
    pub sections: Vec<SectionName>,
    pub missing_sections: Vec<SectionName>,
    pub missing_keywords: Vec<String>,
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
    pub score_gaps: Vec<ScoreGap>,
    pub action_verb_suggestions: Vec<ActionVerbSuggestion>,
    /// Example bullets for the top suggested role.
    pub example_phrases: Vec<String>,
    pub resume_text: String,
}

impl EvaluationResult {
    pub fn scores(&self) -> ScoreSet {
        ScoreSet::new(
            self.ats_score,
            self.keyword_score,
            self.grammar_score,
            self.structure_score,
            self.skills_score,
        )
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Blank job descriptions count as no job description.
fn normalize_job_description(job_description: Option<&str>) -> Option<&str> {
    job_description.filter(|jd| !jd.trim().is_empty())
}

/// Stateless once built; share it behind an `Arc` to evaluate concurrently.
pub struct Evaluator {
    scorer: Scorer,
    grammar: Box<dyn GrammarScorer>,
}

impl Evaluator {
    pub fn new(tables: KeywordTables, grammar: Box<dyn GrammarScorer>) -> Result<Self> {
        Ok(Self {
            scorer: Scorer::new(tables)?,
            grammar,
        })
    }

    /// Built-in tables and the heuristic grammar backend.
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let tables = match &config.keywords.tables_path {
            Some(path) => {
                info!("Loading keyword tables from {}", path.display());
                KeywordTables::load(path)?
            }
            None => KeywordTables::default(),
        };
        let grammar = grammar_scorer_for(config.grammar.backend);
        debug!(
            "Evaluator using keyword tables v{} and {} grammar backend",
            tables.version,
            grammar.name()
        );
        Self::new(tables, grammar)
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.scorer.lexicon()
    }

    pub fn grammar_backend(&self) -> &'static str {
        self.grammar.name()
    }

    /// Extract the file at `path` and evaluate it.
    pub fn evaluate(
        &self,
        path: &Path,
        job_description: Option<&str>,
    ) -> std::result::Result<EvaluationResult, EvaluationFailure> {
        self.evaluate_as(path, None, job_description)
    }

    /// Like [`Evaluator::evaluate`] with the format given instead of inferred.
    pub fn evaluate_as(
        &self,
        path: &Path,
        format: Option<DocumentFormat>,
        job_description: Option<&str>,
    ) -> std::result::Result<EvaluationResult, EvaluationFailure> {
        info!("Evaluating resume: {}", path.display());
        let text = input::extract(path, format)
            .map_err(|e| EvaluationFailure::new(Some(path.to_path_buf()), e))?;
        Ok(self.evaluate_text(&text, job_description))
    }

    pub fn evaluate_document(
        &self,
        document: &Document,
        job_description: Option<&str>,
    ) -> std::result::Result<EvaluationResult, EvaluationFailure> {
        let text = input::extract_document(document).map_err(|e| EvaluationFailure::new(None, e))?;
        Ok(self.evaluate_text(&text, job_description))
    }

    /// The five sub-scores for already extracted text.
    pub fn score(&self, text: &str, job_description: Option<&str>) -> ScoreSet {
        let jd = normalize_job_description(job_description);
        ScoreSet::new(
            self.scorer.ats_score(text),
            self.scorer.keyword_score(text, jd),
            self.grammar.score(text),
            self.scorer.structure_score(text),
            self.scorer.skills_score(text),
        )
    }

    pub fn evaluate_text(&self, text: &str, job_description: Option<&str>) -> EvaluationResult {
        let jd = normalize_job_description(job_description);
        let lexicon = self.scorer.lexicon();
        let processor = self.scorer.processor();

        let scores = self.score(text, jd);
        let overall = scores.overall();
        debug!(
            "Scores: ats={:.1} keyword={:.1} grammar={:.1} structure={:.1} skills={:.1} overall={:.1}",
            scores.ats, scores.keyword, scores.grammar, scores.structure, scores.skills, overall
        );

        let jd_match = matching::jd_match_percentage(processor, text, jd);
        let suggested_roles = matching::suggest_roles(lexicon, text);
        let example_phrases = suggested_roles
            .first()
            .map(|role| lexicon.example_phrases(role).to_vec())
            .unwrap_or_default();

        let sections = parse_sections(text, lexicon);
        let missing_sections = EXPECTED_SECTIONS
            .into_iter()
            .filter(|name| !sections.contains(*name))
            .collect();

        let score_gaps = feedback::score_gaps(&scores)
            .into_iter()
            .map(|gap| ScoreGap {
                current_score: round2(gap.current_score),
                gap: round2(gap.gap),
                ..gap
            })
            .collect();

        let result = EvaluationResult {
            overall_score: round2(overall),
            ats_score: round2(scores.ats),
            keyword_score: round2(scores.keyword),
            grammar_score: round2(scores.grammar),
            structure_score: round2(scores.structure),
            skills_score: round2(scores.skills),
            jd_match_percentage: round2(jd_match),
            suggested_roles,
            feedback: feedback::generate_feedback(&scores),
            sections: sections.names(),
            missing_sections,
            missing_keywords: matching::missing_keywords(lexicon, processor, text, jd),
            improvement_suggestions: feedback::improvement_suggestions(&scores, jd.is_some()),
            score_gaps,
            action_verb_suggestions: feedback::action_verb_suggestions(lexicon, text),
            example_phrases,
            resume_text: text.to_string(),
        };

        info!(
            "Evaluation complete: overall {:.2}, roles [{}]",
            result.overall_score,
            result.suggested_roles.join(", ")
        );
        result
    }
}
