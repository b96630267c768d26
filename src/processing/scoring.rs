//! The five resume sub-scores
//!
//! Each scorer is a pure function of the extracted text (and, for the
//! keyword score, the job description) returning a value in `[0, 100]`.
//! Grammar lives behind [`crate::processing::grammar::GrammarScorer`].

use crate::error::Result;
use crate::processing::keywords::{KeywordTables, Lexicon};
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Clamp to `[0, 100]`; non-finite values become 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_SCORE, MAX_SCORE)
    } else {
        MIN_SCORE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreArea {
    Ats,
    Keyword,
    Grammar,
    Structure,
    Skills,
}

impl ScoreArea {
    pub const ALL: [ScoreArea; 5] = [
        ScoreArea::Ats,
        ScoreArea::Keyword,
        ScoreArea::Grammar,
        ScoreArea::Structure,
        ScoreArea::Skills,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoreArea::Ats => "ATS Compliance",
            ScoreArea::Keyword => "Keyword Optimization",
            ScoreArea::Grammar => "Grammar Quality",
            ScoreArea::Structure => "Resume Structure",
            ScoreArea::Skills => "Skills Assessment",
        }
    }
}

impl fmt::Display for ScoreArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five sub-scores, always finite and within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub ats: f64,
    pub keyword: f64,
    pub grammar: f64,
    pub structure: f64,
    pub skills: f64,
}

impl ScoreSet {
    pub fn new(ats: f64, keyword: f64, grammar: f64, structure: f64, skills: f64) -> Self {
        Self {
            ats: clamp_score(ats),
            keyword: clamp_score(keyword),
            grammar: clamp_score(grammar),
            structure: clamp_score(structure),
            skills: clamp_score(skills),
        }
    }

    pub fn get(&self, area: ScoreArea) -> f64 {
        match area {
            ScoreArea::Ats => self.ats,
            ScoreArea::Keyword => self.keyword,
            ScoreArea::Grammar => self.grammar,
            ScoreArea::Structure => self.structure,
            ScoreArea::Skills => self.skills,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoreArea, f64)> + '_ {
        ScoreArea::ALL.into_iter().map(move |area| (area, self.get(area)))
    }

    /// Weighted overall score with the standard weights.
    pub fn overall(&self) -> f64 {
        ScoreWeights::STANDARD.combine(self)
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub ats: f64,
    pub keyword: f64,
    pub grammar: f64,
    pub structure: f64,
    pub skills: f64,
}

impl ScoreWeights {
    /// Fixed weights; they sum to 1.0.
    pub const STANDARD: ScoreWeights = ScoreWeights {
        ats: 0.25,
        keyword: 0.25,
        grammar: 0.15,
        structure: 0.20,
        skills: 0.15,
    };

    pub fn get(&self, area: ScoreArea) -> f64 {
        match area {
            ScoreArea::Ats => self.ats,
            ScoreArea::Keyword => self.keyword,
            ScoreArea::Grammar => self.grammar,
            ScoreArea::Structure => self.structure,
            ScoreArea::Skills => self.skills,
        }
    }

    pub fn combine(&self, scores: &ScoreSet) -> f64 {
        clamp_score(
            ScoreArea::ALL
                .iter()
                .map(|area| self.get(*area) * scores.get(*area))
                .sum(),
        )
    }
}

/// Keyword score when the job description has no qualifying words.
pub const NEUTRAL_KEYWORD_SCORE: f64 = 50.0;
/// How many of the job description's most frequent words are checked.
pub const JD_TOP_WORDS: usize = 20;

/// Owns the compiled tables and text patterns the scorers share.
pub struct Scorer {
    lexicon: Lexicon,
    processor: TextProcessor,
}

impl Scorer {
    pub fn new(tables: KeywordTables) -> Result<Self> {
        Ok(Self {
            lexicon: Lexicon::new(tables)?,
            processor: TextProcessor::new()?,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(KeywordTables::default())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }

    pub fn ats_score(&self, text: &str) -> f64 {
        let mut score = 0.0;

        if self.processor.has_email(text) {
            score += 10.0;
        }
        if self.processor.has_phone(text) {
            score += 10.0;
        }

        let headers = self.lexicon.ats_headers().count_distinct(text);
        score += (headers as f64 * 10.0).min(30.0);

        let verbs = self.lexicon.action_verbs().count_distinct(text);
        score += (verbs as f64 * 2.0).min(20.0);

        let technical = self.lexicon.technical().count_distinct(text);
        score += (technical as f64 * 2.0).min(20.0);

        if self.processor.line_count(text) > 10 {
            score += 10.0;
        }

        clamp_score(score)
    }

    /// Coverage of the job description's top words, or of the built-in
    /// keyword list when there is no job description.
    pub fn keyword_score(&self, text: &str, job_description: Option<&str>) -> f64 {
        match job_description {
            Some(jd) => {
                let top = self.processor.top_words(jd, JD_TOP_WORDS);
                if top.is_empty() {
                    return NEUTRAL_KEYWORD_SCORE;
                }
                let resume = text.to_lowercase();
                let matches = top
                    .iter()
                    .filter(|(word, _)| resume.contains(word.as_str()))
                    .count();
                clamp_score(matches as f64 / top.len() as f64 * 100.0)
            }
            None => {
                let total = self.lexicon.technical().len() + self.lexicon.soft_skills().len();
                if total == 0 {
                    return MIN_SCORE;
                }
                let found = self.lexicon.technical().count_distinct(text)
                    + self.lexicon.soft_skills().count_distinct(text);
                clamp_score(found as f64 / total as f64 * 200.0)
            }
        }
    }

    pub fn structure_score(&self, text: &str) -> f64 {
        let categories = self
            .lexicon
            .structure_categories()
            .iter()
            .filter(|c| c.matcher.any(text))
            .count();
        let mut score = (categories as f64 * 20.0).min(100.0);

        let words = self.processor.word_count(text);
        if (300..=800).contains(&words) {
            score += 10.0;
        } else if (200..=1000).contains(&words) {
            score += 5.0;
        }

        if self.processor.has_list_markers(text) {
            score += 10.0;
        }

        clamp_score(score)
    }

    pub fn skills_score(&self, text: &str) -> f64 {
        let technical = self.lexicon.technical().count_distinct(text);
        let soft = self.lexicon.soft_skills().count_distinct(text);
        clamp_score(technical as f64 * 5.0 + soft as f64 * 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> Scorer {
        Scorer::builtin().unwrap()
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(140.0), 100.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 0.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = ScoreWeights::STANDARD;
        let sum = w.ats + w.keyword + w.grammar + w.structure + w.skills;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overall_is_weighted_combination() {
        let scores = ScoreSet::new(80.0, 60.0, 75.0, 90.0, 40.0);
        let expected = 0.25 * 80.0 + 0.25 * 60.0 + 0.15 * 75.0 + 0.20 * 90.0 + 0.15 * 40.0;
        assert!((scores.overall() - expected).abs() < 1e-9);
        assert_eq!(ScoreSet::new(100.0, 100.0, 100.0, 100.0, 100.0).overall(), 100.0);
    }

    #[test]
    fn test_score_set_clamps_inputs() {
        let scores = ScoreSet::new(-5.0, 150.0, f64::NAN, 50.0, 100.0);
        assert_eq!(scores.ats, 0.0);
        assert_eq!(scores.keyword, 100.0);
        assert_eq!(scores.grammar, 0.0);
    }

    #[test]
    fn test_ats_contact_headers_and_verbs() {
        let text = "email: a@b.com\n555-123-4567\nExperience\nDeveloped, managed and designed things\nEducation\nSkills";
        // 10 + 10 + 30 headers + 3 verbs * 2 + "ai" inside "email" * 2
        assert_eq!(scorer().ats_score(text), 58.0);
    }

    #[test]
    fn test_keywords_count_inside_longer_words() {
        let s = scorer();
        let text = "email me; database admin; javascript";
        // ai, data, java, javascript
        assert_eq!(s.skills_score(text), 20.0);
        assert_eq!(s.ats_score(text), 8.0);
        assert_eq!(s.keyword_score("database engineer", Some("data")), 100.0);
    }

    #[test]
    fn test_ats_caps() {
        let verbs = "developed managed led created implemented designed achieved improved optimized delivered coordinated";
        let tech = "python java javascript sql aws docker kubernetes react git agile api data";
        let headers = "experience education skills summary objective";
        let lines = "\n".repeat(11);
        let text = format!("a@b.com 555.123.4567 {} {} {} {}", verbs, tech, headers, lines);
        assert_eq!(scorer().ats_score(&text), 100.0);
    }

    #[test]
    fn test_keyword_score_with_job_description() {
        let s = scorer();
        let jd = "Python Flask SQL REST API teamwork";
        let resume = "Built REST services in Python and Flask with SQL, API design and teamwork.";
        assert_eq!(s.keyword_score(resume, Some(jd)), 100.0);

        let partial = "Python and Flask only.";
        assert_eq!(s.keyword_score(partial, Some(jd)), 50.0);
    }

    #[test]
    fn test_keyword_score_without_qualifying_jd_words() {
        assert_eq!(scorer().keyword_score("anything", Some("a to be, or not!")), 50.0);
    }

    #[test]
    fn test_keyword_score_without_job_description() {
        let s = scorer();
        assert_eq!(s.keyword_score("I enjoy gardening and baking.", None), 0.0);
        // 3 of 30 keywords -> 3 / 30 * 200 = 20
        assert!((s.keyword_score("python sql leadership", None) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_structure_score() {
        let s = scorer();
        let text = "Email me\nSummary\nExperience\nEducation\nSkills\n- Rust";
        // 5 categories (capped 100) + list marker 10, clamped
        assert_eq!(s.structure_score(text), 100.0);

        let sparse = "Education at a university.";
        assert_eq!(s.structure_score(sparse), 20.0);

        // any hyphen counts as a list marker
        assert_eq!(s.structure_score("Jane Smith-Jones, 2019-2021"), 10.0);
    }

    #[test]
    fn test_structure_word_count_bands() {
        let s = scorer();
        let filler = |n: usize| vec!["lorem"; n].join(" ");
        assert_eq!(s.structure_score(&filler(350)), 10.0);
        assert_eq!(s.structure_score(&filler(250)), 5.0);
        assert_eq!(s.structure_score(&filler(1200)), 0.0);
    }

    #[test]
    fn test_skills_score() {
        let s = scorer();
        assert_eq!(s.skills_score("python docker leadership"), 13.0);
        let everything = format!(
            "{} {}",
            KeywordTables::default().technical.join(", "),
            KeywordTables::default().soft_skills.join(", ")
        );
        assert_eq!(s.skills_score(&everything), 100.0);
    }
}
