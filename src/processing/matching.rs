//! Job-description matching and role suggestions

use crate::processing::keywords::Lexicon;
use crate::processing::scoring::clamp_score;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};

/// Returned when no role keyword appears in the resume.
pub const SENTINEL_ROLE: &str = "General Professional";
pub const MAX_SUGGESTED_ROLES: usize = 3;
pub const MAX_MISSING_KEYWORDS: usize = 20;

/// Share of the job description's distinct significant words that also
/// appear in the resume, as a percentage. 0 without a job description.
pub fn jd_match_percentage(
    processor: &TextProcessor,
    resume_text: &str,
    job_description: Option<&str>,
) -> f64 {
    let Some(jd) = job_description else {
        return 0.0;
    };

    let jd_words = processor.significant_word_set(jd);
    if jd_words.is_empty() {
        return 0.0;
    }

    let resume_words = processor.significant_word_set(resume_text);
    let common = jd_words.intersection(&resume_words).count();
    clamp_score(common as f64 / jd_words.len() as f64 * 100.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleScore {
    pub role: String,
    pub score: usize,
}

/// Every role with the number of its keywords found, best first.
/// Ties keep table order.
pub fn rank_roles(lexicon: &Lexicon, resume_text: &str) -> Vec<RoleScore> {
    let mut ranked: Vec<RoleScore> = lexicon
        .roles()
        .iter()
        .map(|role| RoleScore {
            role: role.name.clone(),
            score: role.matcher.count_distinct(resume_text),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Up to three roles with a positive score, or the sentinel role.
pub fn suggest_roles(lexicon: &Lexicon, resume_text: &str) -> Vec<String> {
    let roles: Vec<String> = rank_roles(lexicon, resume_text)
        .into_iter()
        .filter(|r| r.score > 0)
        .take(MAX_SUGGESTED_ROLES)
        .map(|r| r.role)
        .collect();

    if roles.is_empty() {
        vec![SENTINEL_ROLE.to_string()]
    } else {
        roles
    }
}

/// Job-description words absent from the resume, most frequent first.
pub fn missing_keywords(
    lexicon: &Lexicon,
    processor: &TextProcessor,
    resume_text: &str,
    job_description: Option<&str>,
) -> Vec<String> {
    let Some(jd) = job_description else {
        return Vec::new();
    };

    let resume_words = processor.alpha_word_set(resume_text);
    processor
        .top_alpha_words(jd, usize::MAX)
        .into_iter()
        .map(|(word, _)| word)
        .filter(|word| !resume_words.contains(word) && !lexicon.is_common_word(word))
        .take(MAX_MISSING_KEYWORDS)
        .collect()
}
