//! Text patterns and word statistics shared by the scorers

use crate::error::{Result, ResumeScorerError};
use regex::Regex;
use std::collections::{HashMap, HashSet};

pub struct TextProcessor {
    email_regex: Regex,
    phone_regex: Regex,
    significant_word_regex: Regex,
    alpha_word_regex: Regex,
    numbered_list_regex: Regex,
}

fn compile(pattern: &str, name: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ResumeScorerError::Processing(format!("Invalid {} regex: {}", name, e)))
}

impl TextProcessor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email_regex: compile(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b", "email")?,
            phone_regex: compile(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b", "phone")?,
            significant_word_regex: compile(r"\b\w{4,}\b", "significant word")?,
            alpha_word_regex: compile(r"\b[a-z]{4,}\b", "alphabetic word")?,
            numbered_list_regex: compile(r"\n\s*\d+\.", "numbered list")?,
        })
    }

    pub fn has_email(&self, text: &str) -> bool {
        self.email_regex.is_match(text)
    }

    pub fn has_phone(&self, text: &str) -> bool {
        self.phone_regex.is_match(text)
    }

    /// A bullet or hyphen anywhere, or a line starting with `N.`.
    pub fn has_list_markers(&self, text: &str) -> bool {
        text.contains('•') || text.contains('-') || self.numbered_list_regex.is_match(text)
    }

    pub fn line_count(&self, text: &str) -> usize {
        text.split('\n').count()
    }

    pub fn word_count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Lower-cased words of four or more word characters, in order.
    pub fn significant_words(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.significant_word_regex
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn significant_word_set(&self, text: &str) -> HashSet<String> {
        self.significant_words(text).into_iter().collect()
    }

    /// The `limit` most frequent significant words, most frequent first.
    /// Equal counts keep first-appearance order.
    pub fn top_words(&self, text: &str, limit: usize) -> Vec<(String, usize)> {
        rank_by_frequency(self.significant_words(text), limit)
    }

    /// Lower-cased runs of four or more ASCII letters, ranked like `top_words`.
    pub fn top_alpha_words(&self, text: &str, limit: usize) -> Vec<(String, usize)> {
        let lower = text.to_lowercase();
        let words = self
            .alpha_word_regex
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect();
        rank_by_frequency(words, limit)
    }

    pub fn alpha_word_set(&self, text: &str) -> HashSet<String> {
        let lower = text.to_lowercase();
        self.alpha_word_regex
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

fn rank_by_frequency(words: Vec<String>, limit: usize) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for word in words {
        let count = counts.entry(word.clone()).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            (word, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}
