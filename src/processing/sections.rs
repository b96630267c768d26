//! Section detection over extracted resume text
//!
//! Sections are found by the first whole-word, case-insensitive occurrence
//! of any of their header keywords. This is a heuristic: a header keyword
//! used in prose ("five years of experience leading ...") also starts a
//! section. Such false positives are accepted; there is no precision target
//! that would justify stricter rules.

use crate::processing::keywords::Lexicon;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionName {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Achievements,
    Publications,
    Volunteering,
    Contact,
    Links,
    /// The whole document, used when no header was found.
    Full,
}

impl SectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Summary => "summary",
            SectionName::Experience => "experience",
            SectionName::Education => "education",
            SectionName::Skills => "skills",
            SectionName::Projects => "projects",
            SectionName::Certifications => "certifications",
            SectionName::Achievements => "achievements",
            SectionName::Publications => "publications",
            SectionName::Volunteering => "volunteering",
            SectionName::Contact => "contact",
            SectionName::Links => "links",
            SectionName::Full => "full",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte range of one section in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpan {
    pub name: SectionName,
    pub start: usize,
    pub end: usize,
}

/// Sections of a document in order of appearance.
///
/// Spans never overlap and tile the text from the first header to the end;
/// text before the first header belongs to no section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap<'a> {
    text: &'a str,
    spans: Vec<SectionSpan>,
}

impl<'a> SectionMap<'a> {
    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// True when no header matched and the map holds only `full`.
    pub fn is_fallback(&self) -> bool {
        matches!(self.spans.as_slice(), [span] if span.name == SectionName::Full)
    }

    pub fn contains(&self, name: SectionName) -> bool {
        self.spans.iter().any(|s| s.name == name)
    }

    pub fn get(&self, name: SectionName) -> Option<&'a str> {
        self.spans
            .iter()
            .find(|s| s.name == name)
            .map(|s| &self.text[s.start..s.end])
    }

    pub fn names(&self) -> Vec<SectionName> {
        self.spans.iter().map(|s| s.name).collect()
    }
}

pub fn parse_sections<'a>(text: &'a str, lexicon: &Lexicon) -> SectionMap<'a> {
    let mut found: Vec<(usize, SectionName)> = lexicon
        .section_headers()
        .iter()
        .filter_map(|h| h.matcher.first_offset(text).map(|offset| (offset, h.name)))
        .collect();

    // stable: equal offsets keep table order
    found.sort_by_key(|(offset, _)| *offset);

    if found.is_empty() {
        return SectionMap {
            text,
            spans: vec![SectionSpan {
                name: SectionName::Full,
                start: 0,
                end: text.len(),
            }],
        };
    }

    let spans = found
        .iter()
        .enumerate()
        .map(|(i, (start, name))| SectionSpan {
            name: *name,
            start: *start,
            end: found.get(i + 1).map_or(text.len(), |(next, _)| *next),
        })
        .collect();

    SectionMap { text, spans }
}
