//! Keyword tables and keyword matching
//!
//! Every list the scorers consult (technical and soft skills, action verbs,
//! section headers, role keywords) lives in a versioned [`KeywordTables`]
//! value that can be swapped for a TOML file. [`Lexicon`] compiles the
//! tables once into Aho-Corasick automata.
//!
//! Keyword presence is a case-insensitive substring test, so `data` counts
//! inside `database`. Section headers are the exception and only match as
//! whole words.

use crate::error::{Result, ResumeScorerError};
use crate::processing::sections::SectionName;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const BUILTIN_TABLES_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordTables {
    pub version: String,
    pub technical: Vec<String>,
    pub soft_skills: Vec<String>,
    pub action_verbs: Vec<String>,
    /// Headers the ATS score rewards.
    pub ats_headers: Vec<String>,
    /// Words that are never reported as missing job-description keywords.
    pub common_words: Vec<String>,
    /// Example bullets offered when the top role has no phrases of its own.
    #[serde(default)]
    pub default_example_phrases: Vec<String>,
    pub section_headers: Vec<SectionHeaders>,
    pub structure_categories: Vec<KeywordCategory>,
    /// Role labels in ranking tie-break order.
    pub roles: Vec<KeywordCategory>,
    pub action_verb_categories: Vec<KeywordCategory>,
    #[serde(default)]
    pub example_phrases: Vec<RolePhrases>,
}

/// Example resume bullets for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePhrases {
    pub role: String,
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionHeaders {
    pub section: SectionName,
    pub keywords: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn category(name: &str, keywords: &[&str]) -> KeywordCategory {
    KeywordCategory {
        name: name.to_string(),
        keywords: words(keywords),
    }
}

fn phrases(role: &str, list: &[&str]) -> RolePhrases {
    RolePhrases {
        role: role.to_string(),
        phrases: words(list),
    }
}

fn headers(section: SectionName, keywords: &[&str]) -> SectionHeaders {
    SectionHeaders {
        section,
        keywords: words(keywords),
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            version: BUILTIN_TABLES_VERSION.to_string(),
            technical: words(&[
                "python", "java", "javascript", "sql", "aws", "docker", "kubernetes", "react",
                "node.js", "git", "agile", "api", "data", "analytics", "machine learning",
                "ai", "cloud", "devops", "ci/cd", "testing",
            ]),
            soft_skills: words(&[
                "leadership", "communication", "teamwork", "problem-solving", "management",
                "collaboration", "analytical", "creative", "organized", "adaptable",
            ]),
            action_verbs: words(&[
                "developed", "managed", "led", "created", "implemented", "designed",
                "achieved", "improved", "optimized", "delivered", "coordinated",
            ]),
            ats_headers: words(&["experience", "education", "skills", "summary", "objective"]),
            common_words: words(&[
                "will", "with", "have", "from", "this", "that", "your", "about", "into", "than",
                "them", "these", "those", "could", "would", "should", "there", "their", "where",
                "which", "while", "other", "more", "some", "such", "only", "also", "both",
                "been", "were", "when", "what",
            ]),
            default_example_phrases: words(&[
                "Achieved measurable results in your previous role",
                "Collaborated effectively with team members and stakeholders",
                "Demonstrated expertise in relevant tools and technologies",
            ]),
            section_headers: vec![
                headers(SectionName::Summary, &["summary", "objective"]),
                headers(SectionName::Experience, &["experience", "work experience"]),
                headers(SectionName::Education, &["education"]),
                headers(SectionName::Skills, &["skills"]),
                headers(SectionName::Projects, &["projects"]),
                headers(SectionName::Certifications, &["certifications"]),
                headers(SectionName::Achievements, &["achievements"]),
                headers(SectionName::Publications, &["publications"]),
                headers(SectionName::Volunteering, &["volunteering"]),
                headers(SectionName::Contact, &["contact"]),
                headers(SectionName::Links, &["links"]),
            ],
            structure_categories: vec![
                category("contact", &["email", "phone", "linkedin"]),
                category("summary", &["summary", "objective", "profile"]),
                category("experience", &["experience", "work history", "employment"]),
                category("education", &["education", "degree", "university", "college"]),
                category("skills", &["skills", "technical skills", "competencies"]),
            ],
            roles: vec![
                category(
                    "Software Developer",
                    &["python", "java", "javascript", "programming", "development", "coding", "software", "git"],
                ),
                category(
                    "Data Analyst",
                    &["data", "analytics", "sql", "excel", "statistics", "visualization", "tableau", "power bi"],
                ),
                category(
                    "Data Scientist",
                    &["machine learning", "ai", "python", "data science", "statistics", "modeling", "algorithms"],
                ),
                category(
                    "DevOps Engineer",
                    &["devops", "aws", "docker", "kubernetes", "ci/cd", "jenkins", "terraform", "cloud"],
                ),
                category(
                    "Product Manager",
                    &["product", "management", "agile", "scrum", "roadmap", "stakeholder", "strategy"],
                ),
                category(
                    "UI/UX Designer",
                    &["design", "ui", "ux", "figma", "wireframe", "prototype", "user experience", "adobe"],
                ),
                category(
                    "Marketing Manager",
                    &["marketing", "campaign", "seo", "analytics", "social media", "brand", "strategy"],
                ),
                category(
                    "Business Analyst",
                    &["business", "analysis", "requirements", "stakeholder", "process", "documentation"],
                ),
            ],
            action_verb_categories: vec![
                category("Leadership", &["led", "managed", "directed", "coordinated", "supervised", "mentored"]),
                category("Achievement", &["achieved", "accomplished", "exceeded", "surpassed", "delivered", "completed"]),
                category("Innovation", &["created", "developed", "designed", "pioneered", "launched", "introduced"]),
                category("Improvement", &["improved", "enhanced", "optimized", "streamlined", "upgraded", "transformed"]),
                category("Analysis", &["analyzed", "evaluated", "assessed", "researched", "identified", "investigated"]),
                category("Communication", &["presented", "communicated", "collaborated", "negotiated", "facilitated", "consulted"]),
            ],
            example_phrases: vec![
                phrases(
                    "Software Developer",
                    &[
                        "Developed and maintained scalable web applications using Python and JavaScript",
                        "Implemented RESTful APIs serving 100K+ daily requests with 99.9% uptime",
                        "Collaborated with cross-functional teams to deliver features ahead of schedule",
                    ],
                ),
                phrases(
                    "Data Analyst",
                    &[
                        "Analyzed large datasets using SQL and Python to uncover business insights",
                        "Created interactive dashboards in Tableau, improving decision-making speed by 40%",
                        "Presented data-driven recommendations to executive leadership",
                    ],
                ),
                phrases(
                    "Data Scientist",
                    &[
                        "Built machine learning models achieving 95% accuracy in customer churn prediction",
                        "Developed predictive analytics solutions that increased revenue by $2M annually",
                        "Automated data pipelines processing 10TB+ of data daily",
                    ],
                ),
                phrases(
                    "Product Manager",
                    &[
                        "Led product roadmap for 3 major features, resulting in 50% user growth",
                        "Conducted user research and A/B testing to validate product hypotheses",
                        "Coordinated with engineering, design, and marketing teams to launch on schedule",
                    ],
                ),
                phrases(
                    "DevOps Engineer",
                    &[
                        "Implemented CI/CD pipelines reducing deployment time from hours to minutes",
                        "Managed cloud infrastructure on AWS, optimizing costs by 30%",
                        "Automated infrastructure provisioning using Terraform and Kubernetes",
                    ],
                ),
            ],
        }
    }
}

impl KeywordTables {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let tables: KeywordTables = toml::from_str(content).map_err(|e| {
            ResumeScorerError::KeywordTables(format!("Failed to parse keyword tables: {}", e))
        })?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ResumeScorerError::KeywordTables(format!("Failed to serialize keyword tables: {}", e))
        })
    }

    /// Reject tables the matchers cannot use. An empty keyword would match
    /// at every position.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(ResumeScorerError::KeywordTables(
                "Keyword tables must declare a version".to_string(),
            ));
        }

        let flat = [
            ("technical", &self.technical),
            ("soft_skills", &self.soft_skills),
            ("action_verbs", &self.action_verbs),
            ("ats_headers", &self.ats_headers),
            ("common_words", &self.common_words),
        ];
        for (name, list) in flat {
            check_keywords(name, list)?;
        }
        check_keywords("default_example_phrases", &self.default_example_phrases)?;
        for entry in &self.example_phrases {
            check_keywords(&format!("example_phrases.{}", entry.role), &entry.phrases)?;
        }

        for entry in &self.section_headers {
            check_keywords(&format!("section_headers.{}", entry.section), &entry.keywords)?;
        }
        for (table, categories) in [
            ("structure_categories", &self.structure_categories),
            ("roles", &self.roles),
            ("action_verb_categories", &self.action_verb_categories),
        ] {
            for category in categories {
                if category.name.trim().is_empty() {
                    return Err(ResumeScorerError::KeywordTables(format!(
                        "Unnamed entry in {}",
                        table
                    )));
                }
                check_keywords(&format!("{}.{}", table, category.name), &category.keywords)?;
            }
        }

        Ok(())
    }
}

fn check_keywords(table: &str, keywords: &[String]) -> Result<()> {
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ResumeScorerError::KeywordTables(format!(
            "Empty keyword in {}",
            table
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Any occurrence counts.
    Substring,
    /// The occurrence must not be glued to neighbouring word characters.
    WholeWord,
}

/// Case-insensitive matcher over a fixed keyword list.
pub struct KeywordMatcher {
    keywords: Vec<String>,
    automaton: AhoCorasick,
    mode: MatchMode,
}

impl KeywordMatcher {
    /// Substring matcher.
    pub fn new(keywords: &[String]) -> Result<Self> {
        Self::with_mode(keywords, MatchMode::Substring)
    }

    pub fn whole_words(keywords: &[String]) -> Result<Self> {
        Self::with_mode(keywords, MatchMode::WholeWord)
    }

    pub fn with_mode(keywords: &[String], mode: MatchMode) -> Result<Self> {
        let mut seen = HashSet::new();
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| seen.insert(k.clone()))
            .collect();

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| {
                ResumeScorerError::Processing(format!("Failed to build keyword matcher: {}", e))
            })?;

        Ok(Self {
            keywords,
            automaton,
            mode,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Earliest accepted occurrence of each keyword, indexed like `keywords()`.
    fn first_positions(&self, text: &str) -> Vec<Option<usize>> {
        let mut positions = vec![None; self.keywords.len()];

        for mat in self.automaton.find_overlapping_iter(text) {
            let idx = mat.pattern().as_usize();
            if positions[idx].is_some() {
                continue;
            }
            let accepted = match self.mode {
                MatchMode::Substring => true,
                MatchMode::WholeWord => {
                    is_whole_word(text, &self.keywords[idx], mat.start(), mat.end())
                }
            };
            if accepted {
                positions[idx] = Some(mat.start());
            }
        }

        positions
    }

    /// Distinct keywords present in `text`, in table order.
    pub fn matched<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.first_positions(text)
            .into_iter()
            .zip(&self.keywords)
            .filter_map(|(pos, keyword)| pos.map(|_| keyword.as_str()))
            .collect()
    }

    /// Keywords absent from `text`, in table order.
    pub fn unmatched<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.first_positions(text)
            .into_iter()
            .zip(&self.keywords)
            .filter_map(|(pos, keyword)| match pos {
                None => Some(keyword.as_str()),
                Some(_) => None,
            })
            .collect()
    }

    pub fn count_distinct(&self, text: &str) -> usize {
        self.first_positions(text).iter().flatten().count()
    }

    pub fn any(&self, text: &str) -> bool {
        self.count_distinct(text) > 0
    }

    /// Byte offset of the earliest match of any keyword.
    pub fn first_offset(&self, text: &str) -> Option<usize> {
        self.first_positions(text).into_iter().flatten().min()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A match is a whole word when it is not glued to a word character on a
/// side where the keyword itself starts or ends with one. Keywords such as
/// `ci/cd` or `node.js` only need boundaries at their outer edges.
fn is_whole_word(text: &str, keyword: &str, start: usize, end: usize) -> bool {
    let needs_left = keyword.chars().next().is_some_and(is_word_char);
    let needs_right = keyword.chars().next_back().is_some_and(is_word_char);

    let left_ok = !needs_left || !text[..start].chars().next_back().is_some_and(is_word_char);
    let right_ok = !needs_right || !text[end..].chars().next().is_some_and(is_word_char);

    left_ok && right_ok
}

/// A named group of keywords compiled into one matcher.
pub struct CategoryMatcher<N> {
    pub name: N,
    pub matcher: KeywordMatcher,
}

/// Keyword tables compiled for matching.
pub struct Lexicon {
    tables: KeywordTables,
    technical: KeywordMatcher,
    soft_skills: KeywordMatcher,
    action_verbs: KeywordMatcher,
    ats_headers: KeywordMatcher,
    common_words: HashSet<String>,
    sections: Vec<CategoryMatcher<SectionName>>,
    structure: Vec<CategoryMatcher<String>>,
    roles: Vec<CategoryMatcher<String>>,
    verb_categories: Vec<CategoryMatcher<String>>,
}

fn compile_categories(categories: &[KeywordCategory]) -> Result<Vec<CategoryMatcher<String>>> {
    categories
        .iter()
        .map(|c| {
            Ok(CategoryMatcher {
                name: c.name.clone(),
                matcher: KeywordMatcher::new(&c.keywords)?,
            })
        })
        .collect()
}

impl Lexicon {
    pub fn new(tables: KeywordTables) -> Result<Self> {
        tables.validate()?;

        let sections = tables
            .section_headers
            .iter()
            .map(|h| {
                Ok(CategoryMatcher {
                    name: h.section,
                    matcher: KeywordMatcher::whole_words(&h.keywords)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            technical: KeywordMatcher::new(&tables.technical)?,
            soft_skills: KeywordMatcher::new(&tables.soft_skills)?,
            action_verbs: KeywordMatcher::new(&tables.action_verbs)?,
            ats_headers: KeywordMatcher::new(&tables.ats_headers)?,
            common_words: tables.common_words.iter().map(|w| w.to_lowercase()).collect(),
            sections,
            structure: compile_categories(&tables.structure_categories)?,
            roles: compile_categories(&tables.roles)?,
            verb_categories: compile_categories(&tables.action_verb_categories)?,
            tables,
        })
    }

    /// Lexicon over the built-in tables.
    pub fn builtin() -> Result<Self> {
        Self::new(KeywordTables::default())
    }

    pub fn tables(&self) -> &KeywordTables {
        &self.tables
    }

    pub fn version(&self) -> &str {
        &self.tables.version
    }

    pub fn technical(&self) -> &KeywordMatcher {
        &self.technical
    }

    pub fn soft_skills(&self) -> &KeywordMatcher {
        &self.soft_skills
    }

    pub fn action_verbs(&self) -> &KeywordMatcher {
        &self.action_verbs
    }

    pub fn ats_headers(&self) -> &KeywordMatcher {
        &self.ats_headers
    }

    pub fn is_common_word(&self, word: &str) -> bool {
        self.common_words.contains(word)
    }

    pub fn section_headers(&self) -> &[CategoryMatcher<SectionName>] {
        &self.sections
    }

    pub fn structure_categories(&self) -> &[CategoryMatcher<String>] {
        &self.structure
    }

    pub fn roles(&self) -> &[CategoryMatcher<String>] {
        &self.roles
    }

    pub fn action_verb_categories(&self) -> &[CategoryMatcher<String>] {
        &self.verb_categories
    }

    /// Example bullets for `role`, or the default phrases for roles without any.
    pub fn example_phrases(&self, role: &str) -> &[String] {
        self.tables
            .example_phrases
            .iter()
            .find(|entry| entry.role == role)
            .map_or(&self.tables.default_example_phrases, |entry| &entry.phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(keywords: &[&str]) -> KeywordMatcher {
        KeywordMatcher::new(&words(keywords)).unwrap()
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let m = matcher(&["python", "machine learning"]);
        assert_eq!(m.matched("PYTHON and Machine Learning"), vec!["python", "machine learning"]);
    }

    #[test]
    fn test_presence_is_substring() {
        let m = matcher(&["ai", "data", "led", "java"]);
        assert_eq!(m.mode(), MatchMode::Substring);
        assert_eq!(m.matched("Email the database team, called JavaScript"), vec!["ai", "data", "led", "java"]);
        assert_eq!(m.unmatched("AI and data"), vec!["led", "java"]);
    }

    #[test]
    fn test_whole_word_mode_rejects_embedded_matches() {
        let m = KeywordMatcher::whole_words(&words(&["ai", "data", "led"])).unwrap();
        assert_eq!(m.count_distinct("email database called"), 0);
        assert_eq!(m.matched("AI-driven data, led"), vec!["ai", "data", "led"]);
    }

    #[test]
    fn test_punctuated_keywords() {
        let m = matcher(&["node.js", "ci/cd", "problem-solving"]);
        assert_eq!(
            m.matched("Built CI/CD for Node.js; strong problem-solving."),
            vec!["node.js", "ci/cd", "problem-solving"]
        );
    }

    #[test]
    fn test_overlapping_keywords_are_all_found() {
        let m = matcher(&["experience", "work experience"]);
        let text = "Work Experience";
        assert_eq!(m.count_distinct(text), 2);
        assert_eq!(m.first_offset(text), Some(0));
    }

    #[test]
    fn test_later_whole_word_occurrence_is_found() {
        let m = KeywordMatcher::whole_words(&words(&["skills"])).unwrap();
        assert_eq!(m.first_offset("softskills\nSkills"), Some(11));
        assert_eq!(matcher(&["skills"]).first_offset("softskills\nSkills"), Some(4));
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let m = matcher(&["Kafka", "kafka", "spark"]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.unmatched("kafka"), vec!["spark"]);
    }

    #[test]
    fn test_builtin_tables_validate_and_compile() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(lexicon.version(), BUILTIN_TABLES_VERSION);
        assert_eq!(lexicon.technical().len(), 20);
        assert_eq!(lexicon.soft_skills().len(), 10);
        assert_eq!(lexicon.roles().len(), 8);
        assert_eq!(lexicon.section_headers().len(), 11);
        assert!(lexicon
            .section_headers()
            .iter()
            .all(|h| h.matcher.mode() == MatchMode::WholeWord));
        assert_eq!(lexicon.technical().mode(), MatchMode::Substring);
        assert!(lexicon.is_common_word("with"));
    }

    #[test]
    fn test_example_phrases_by_role() {
        let lexicon = Lexicon::builtin().unwrap();
        let devops = lexicon.example_phrases("DevOps Engineer");
        assert_eq!(devops.len(), 3);
        assert!(devops[0].starts_with("Implemented CI/CD pipelines"));

        // no phrases of its own
        let designer = lexicon.example_phrases("UI/UX Designer");
        assert_eq!(designer, KeywordTables::default().default_example_phrases.as_slice());
        assert_eq!(designer[0], "Achieved measurable results in your previous role");
    }

    #[test]
    fn test_tables_without_example_phrases_still_parse() {
        let mut tables = KeywordTables::default();
        tables.example_phrases.clear();
        tables.default_example_phrases.clear();
        let parsed = KeywordTables::from_toml_str(&tables.to_toml_string().unwrap()).unwrap();
        assert!(Lexicon::new(parsed).unwrap().example_phrases("Software Developer").is_empty());
    }

    #[test]
    fn test_tables_round_trip_through_toml() {
        let tables = KeywordTables::default();
        let text = tables.to_toml_string().unwrap();
        assert_eq!(KeywordTables::from_toml_str(&text).unwrap(), tables);
    }

    #[test]
    fn test_empty_keyword_is_rejected() {
        let mut tables = KeywordTables::default();
        tables.roles[0].keywords.push("  ".to_string());
        assert!(matches!(
            Lexicon::new(tables),
            Err(ResumeScorerError::KeywordTables(_))
        ));
    }

    #[test]
    fn test_custom_tables_from_toml() {
        let mut tables = KeywordTables::default();
        tables.version = "2-nursing".to_string();
        tables.roles = vec![category("Registered Nurse", &["patient care", "triage"])];
        let parsed = KeywordTables::from_toml_str(&tables.to_toml_string().unwrap()).unwrap();

        let lexicon = Lexicon::new(parsed).unwrap();
        assert_eq!(lexicon.version(), "2-nursing");
        assert_eq!(lexicon.roles()[0].name, "Registered Nurse");
    }
}
