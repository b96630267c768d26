//! Human-readable feedback derived from the score set

use crate::processing::keywords::Lexicon;
use crate::processing::scoring::{ScoreArea, ScoreSet};
use serde::{Deserialize, Serialize};

/// Below this a score area gets a warning instead of an affirmation.
pub fn feedback_threshold(area: ScoreArea) -> f64 {
    match area {
        ScoreArea::Ats => 70.0,
        ScoreArea::Keyword => 60.0,
        ScoreArea::Grammar => 70.0,
        ScoreArea::Structure => 70.0,
        ScoreArea::Skills => 60.0,
    }
}

fn warning(area: ScoreArea) -> &'static str {
    match area {
        ScoreArea::Ats => {
            "⚠️ ATS Compliance: Add clear sections (Experience, Education, Skills) and contact info."
        }
        ScoreArea::Keyword => {
            "⚠️ Keywords: Include more role-specific keywords and technical skills."
        }
        ScoreArea::Grammar => "⚠️ Grammar: Review grammar, punctuation, and sentence structure.",
        ScoreArea::Structure => "⚠️ Structure: Add clear sections and use bullet points.",
        ScoreArea::Skills => {
            "⚠️ Skills: Include more technical and soft skills relevant to your field."
        }
    }
}

fn affirmation(area: ScoreArea) -> &'static str {
    match area {
        ScoreArea::Ats => "✓ ATS Compliance: Well-structured for ATS systems.",
        ScoreArea::Keyword => "✓ Keywords: Good keyword optimization.",
        ScoreArea::Grammar => "✓ Grammar: Language quality is good.",
        ScoreArea::Structure => "✓ Structure: Resume layout is good.",
        ScoreArea::Skills => "✓ Skills: Skills coverage is good.",
    }
}

pub const GENERAL_RECOMMENDATIONS: [&str; 5] = [
    "• Keep your resume concise (1-2 pages)",
    "• Use action verbs to describe achievements",
    "• Quantify your accomplishments with numbers/metrics",
    "• Tailor your resume to match the job description",
    "• Ensure consistent formatting throughout",
];

/// One line per score area, then the general recommendations.
pub fn generate_feedback(scores: &ScoreSet) -> Vec<String> {
    scores
        .iter()
        .map(|(area, score)| {
            if score < feedback_threshold(area) {
                warning(area)
            } else {
                affirmation(area)
            }
        })
        .chain(GENERAL_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub category: String,
    pub priority: Priority,
    pub suggestions: Vec<String>,
}

fn suggestion(category: &str, priority: Priority, items: [&str; 5]) -> ImprovementSuggestion {
    ImprovementSuggestion {
        category: category.to_string(),
        priority,
        suggestions: items.iter().map(|s| s.to_string()).collect(),
    }
}

/// Concrete improvement blocks for weak areas, a job-matching block when a
/// job description was given, and general best practices last.
pub fn improvement_suggestions(scores: &ScoreSet, has_job_description: bool) -> Vec<ImprovementSuggestion> {
    let mut out = Vec::new();

    if scores.ats < 80.0 {
        out.push(suggestion(
            "ATS Compliance",
            Priority::High,
            [
                "Add clear section headers: EXPERIENCE, EDUCATION, SKILLS, SUMMARY",
                "Ensure your contact information (email, phone) is prominently displayed",
                "Use standard fonts like Arial, Calibri, or Times New Roman",
                "Avoid tables, text boxes, and columns that ATS systems struggle with",
                "Save your resume as a .docx or .pdf file for maximum compatibility",
            ],
        ));
    }

    if scores.keyword < 70.0 {
        out.push(suggestion(
            "Keyword Optimization",
            Priority::High,
            [
                "Include more industry-specific technical keywords",
                "Match the job description language exactly when describing your skills",
                "Add action verbs like: developed, managed, implemented, designed, optimized",
                "Include both acronyms and full terms (e.g., \"AI (Artificial Intelligence)\")",
                "Mention specific tools, technologies, and methodologies you've used",
            ],
        ));
    }

    if scores.grammar < 75.0 {
        out.push(suggestion(
            "Grammar & Language",
            Priority::Medium,
            [
                "Proofread for spelling and grammatical errors",
                "Use consistent verb tenses (past tense for previous roles, present for current)",
                "Keep sentences concise and professional",
                "Avoid first-person pronouns (I, me, my)",
                "Use bullet points to improve readability",
            ],
        ));
    }

    if scores.structure < 75.0 {
        out.push(suggestion(
            "Resume Structure",
            Priority::High,
            [
                "Organize sections in this order: Summary, Experience, Education, Skills",
                "Use bullet points to list achievements and responsibilities",
                "Keep your resume to 1-2 pages maximum",
                "Ensure consistent formatting (font sizes, spacing, alignment)",
                "Add white space to make the document easier to scan",
            ],
        ));
    }

    if scores.skills < 70.0 {
        out.push(suggestion(
            "Skills Section",
            Priority::Medium,
            [
                "Create a dedicated \"Skills\" or \"Technical Skills\" section",
                "List both technical skills (programming languages, software) and soft skills",
                "Group skills by category (e.g., Programming, Data Analysis, Leadership)",
                "Include proficiency levels if relevant (Expert, Advanced, Intermediate)",
                "Add certifications or training related to key skills",
            ],
        ));
    }

    if has_job_description {
        out.push(suggestion(
            "Job Description Matching",
            Priority::Critical,
            [
                "Tailor your resume to match the specific job requirements",
                "Mirror the language and terminology used in the job posting",
                "Highlight experiences that directly relate to the role",
                "Quantify your achievements with numbers and metrics",
                "Address all required qualifications mentioned in the posting",
            ],
        ));
    }

    out.push(suggestion(
        "General Best Practices",
        Priority::Low,
        [
            "Lead with accomplishments, not just responsibilities",
            "Use numbers and metrics to quantify your impact (e.g., \"Increased sales by 25%\")",
            "Focus on the last 10-15 years of experience",
            "Include a professional summary or objective at the top",
            "Tailor each resume version to the specific job application",
        ],
    ));

    out
}

pub const GAP_TARGET_SCORE: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreGap {
    pub area: ScoreArea,
    pub current_score: f64,
    pub target_score: f64,
    pub gap: f64,
    pub priority: Priority,
}

/// Areas under the target score, weakest first.
pub fn score_gaps(scores: &ScoreSet) -> Vec<ScoreGap> {
    let mut areas: Vec<(ScoreArea, f64)> = scores.iter().collect();
    areas.sort_by(|a, b| a.1.total_cmp(&b.1));

    areas
        .into_iter()
        .filter(|(_, score)| *score < GAP_TARGET_SCORE)
        .map(|(area, score)| {
            let gap = GAP_TARGET_SCORE - score;
            ScoreGap {
                area,
                current_score: score,
                target_score: GAP_TARGET_SCORE,
                gap,
                priority: if gap > 20.0 {
                    Priority::High
                } else {
                    Priority::Medium
                },
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionVerbSuggestion {
    pub category: String,
    pub verbs: Vec<String>,
}

/// For each verb category used fewer than twice, up to three unused verbs.
pub fn action_verb_suggestions(lexicon: &Lexicon, resume_text: &str) -> Vec<ActionVerbSuggestion> {
    lexicon
        .action_verb_categories()
        .iter()
        .filter(|c| c.matcher.count_distinct(resume_text) < 2)
        .map(|c| ActionVerbSuggestion {
            category: c.name.clone(),
            verbs: c
                .matcher
                .unmatched(resume_text)
                .into_iter()
                .take(3)
                .map(str::to_string)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_lines_follow_thresholds() {
        let scores = ScoreSet::new(69.9, 60.0, 70.0, 10.0, 59.0);
        let feedback = generate_feedback(&scores);

        assert_eq!(feedback.len(), 10);
        assert!(feedback[0].starts_with("⚠️ ATS Compliance"));
        assert!(feedback[1].starts_with("✓ Keywords"));
        assert!(feedback[2].starts_with("✓ Grammar"));
        assert!(feedback[3].starts_with("⚠️ Structure"));
        assert!(feedback[4].starts_with("⚠️ Skills"));
        assert_eq!(&feedback[5..], &GENERAL_RECOMMENDATIONS.map(str::to_string));
    }

    #[test]
    fn test_feedback_is_deterministic() {
        let scores = ScoreSet::new(50.0, 50.0, 50.0, 50.0, 50.0);
        assert_eq!(generate_feedback(&scores), generate_feedback(&scores));
    }

    #[test]
    fn test_strong_resume_gets_only_general_and_jd_blocks() {
        let scores = ScoreSet::new(95.0, 90.0, 100.0, 100.0, 85.0);
        let blocks = improvement_suggestions(&scores, true);
        let categories: Vec<&str> = blocks.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(categories, vec!["Job Description Matching", "General Best Practices"]);
        assert_eq!(blocks[0].priority, Priority::Critical);
    }

    #[test]
    fn test_weak_resume_gets_every_block() {
        let scores = ScoreSet::new(0.0, 0.0, 0.0, 0.0, 0.0);
        let blocks = improvement_suggestions(&scores, false);
        assert_eq!(blocks.len(), 6);
        assert!(blocks.iter().all(|b| b.suggestions.len() == 5));
        assert_eq!(blocks.last().unwrap().priority, Priority::Low);
    }

    #[test]
    fn test_score_gaps_weakest_first() {
        let scores = ScoreSet::new(75.0, 40.0, 65.0, 90.0, 10.0);
        let gaps = score_gaps(&scores);
        let areas: Vec<ScoreArea> = gaps.iter().map(|g| g.area).collect();
        assert_eq!(areas, vec![ScoreArea::Skills, ScoreArea::Keyword, ScoreArea::Grammar]);
        assert_eq!(gaps[0].gap, 60.0);
        assert_eq!(gaps[0].priority, Priority::High);
        assert_eq!(gaps[2].priority, Priority::Medium);
    }

    #[test]
    fn test_action_verb_suggestions() {
        let lexicon = Lexicon::builtin().unwrap();
        let text = "Led the team and managed budgets. Created tools.";
        let suggestions = action_verb_suggestions(&lexicon, text);

        // Leadership already uses two verbs
        assert!(suggestions.iter().all(|s| s.category != "Leadership"));
        let innovation = suggestions.iter().find(|s| s.category == "Innovation").unwrap();
        assert_eq!(innovation.verbs, vec!["developed", "designed", "pioneered"]);
        assert_eq!(suggestions.len(), 5);
    }
}
