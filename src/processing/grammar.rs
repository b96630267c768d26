//! Grammar quality scoring
//!
//! The evaluator depends only on [`GrammarScorer`]. Two backends exist: a
//! segmentation heuristic and a fixed default for deployments that want
//! no grammar signal at all.

use crate::config::GrammarBackend;
use unicode_segmentation::UnicodeSegmentation;

/// Score assigned when no grammar backend is in use.
pub const DEFAULT_GRAMMAR_SCORE: f64 = 75.0;

pub trait GrammarScorer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Score in `[0, 100]`.
    fn score(&self, text: &str) -> f64;
}

/// Backend that is "not available": always the same score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGrammarScorer {
    score: f64,
}

impl FixedGrammarScorer {
    pub fn new(score: f64) -> Self {
        Self {
            score: score.clamp(0.0, 100.0),
        }
    }
}

impl Default for FixedGrammarScorer {
    fn default() -> Self {
        Self::new(DEFAULT_GRAMMAR_SCORE)
    }
}

impl GrammarScorer for FixedGrammarScorer {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn score(&self, _text: &str) -> f64 {
        self.score
    }
}

/// Penalties computed over Unicode sentence and word segmentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicGrammarScorer;

impl HeuristicGrammarScorer {
    const MIN_SENTENCES: usize = 5;
    const FEW_SENTENCES_PENALTY: f64 = 20.0;
    const LONG_SENTENCE_TOKENS: usize = 50;
    const LONG_SENTENCE_PENALTY: f64 = 5.0;
    const LONG_SENTENCE_PENALTY_CAP: f64 = 20.0;
    const NO_CAPITALS_PENALTY: f64 = 10.0;

    fn sentences(text: &str) -> Vec<&str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Words and punctuation, whitespace excluded.
    fn token_count(sentence: &str) -> usize {
        sentence
            .split_word_bounds()
            .filter(|t| !t.trim().is_empty())
            .count()
    }

    fn has_capitalized_word(text: &str) -> bool {
        text.unicode_words().any(|word| {
            word.chars().all(char::is_alphabetic)
                && word.chars().next().is_some_and(char::is_uppercase)
        })
    }
}

impl GrammarScorer for HeuristicGrammarScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn score(&self, text: &str) -> f64 {
        let sentences = Self::sentences(text);
        let mut score = 100.0;

        if sentences.len() < Self::MIN_SENTENCES {
            score -= Self::FEW_SENTENCES_PENALTY;
        }

        let long_sentences = sentences
            .iter()
            .filter(|s| Self::token_count(s) > Self::LONG_SENTENCE_TOKENS)
            .count();
        score -= (long_sentences as f64 * Self::LONG_SENTENCE_PENALTY)
            .min(Self::LONG_SENTENCE_PENALTY_CAP);

        if !Self::has_capitalized_word(text) {
            score -= Self::NO_CAPITALS_PENALTY;
        }

        f64::max(score, 0.0)
    }
}

pub fn grammar_scorer_for(backend: GrammarBackend) -> Box<dyn GrammarScorer> {
    match backend {
        GrammarBackend::Heuristic => Box::new(HeuristicGrammarScorer),
        GrammarBackend::Fixed => Box::new(FixedGrammarScorer::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Jane Doe is a backend engineer. She builds payment systems. \
        She mentors two juniors. She writes Rust daily. She enjoys code review.";

    #[test]
    fn test_fixed_backend_ignores_text() {
        let scorer = FixedGrammarScorer::default();
        assert_eq!(scorer.score(""), DEFAULT_GRAMMAR_SCORE);
        assert_eq!(scorer.score(WELL_FORMED), DEFAULT_GRAMMAR_SCORE);
    }

    #[test]
    fn test_well_formed_text_scores_full() {
        assert_eq!(HeuristicGrammarScorer.score(WELL_FORMED), 100.0);
    }

    #[test]
    fn test_few_sentences_penalized() {
        assert_eq!(HeuristicGrammarScorer.score("One sentence. Two sentences."), 80.0);
    }

    #[test]
    fn test_no_capitals_penalized() {
        // line breaks end sentences even without punctuation
        let text = "one\ntwo\nthree\nfour\nfive";
        assert_eq!(HeuristicGrammarScorer.score(text), 90.0);
    }

    #[test]
    fn test_long_sentence_penalty_is_capped() {
        let long = format!("{}.", vec!["Word"; 60].join(" "));
        let text = vec![long; 6].join(" ");
        // six long sentences: -30 capped at -20
        assert_eq!(HeuristicGrammarScorer.score(&text), 80.0);
    }

    #[test]
    fn test_empty_text_never_negative() {
        let score = HeuristicGrammarScorer.score("");
        assert_eq!(score, 70.0);
    }

    #[test]
    fn test_backend_selection() {
        assert_eq!(grammar_scorer_for(GrammarBackend::Fixed).name(), "fixed");
        assert_eq!(grammar_scorer_for(GrammarBackend::Heuristic).name(), "heuristic");
    }
}
