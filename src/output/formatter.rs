//! Output formatters for single evaluations and batches

use crate::config::OutputFormat;
use crate::error::{Result, ResumeScorerError};
use crate::output::report::{BatchReport, EvaluationReport};
use crate::processing::feedback::Priority;
use crate::processing::scoring::{ScoreArea, ScoreWeights};
use crate::processing::EvaluationResult;
use colored::{Color, Colorize};
use serde::Serialize;
use std::path::Path;

/// Trait for rendering evaluation reports
pub trait OutputFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String>;
    fn format_batch(&self, batch: &BatchReport) -> Result<String>;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// One row per resume, for spreadsheets
pub struct CsvFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const TEXT_PREVIEW_CHARS: usize = 300;

fn score_rating(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "EXCELLENT",
        s if s >= 80.0 => "VERY GOOD",
        s if s >= 70.0 => "GOOD",
        s if s >= 60.0 => "FAIR",
        s if s >= 50.0 => "BELOW AVG",
        _ => "POOR",
    }
}

fn area_score(result: &EvaluationResult, area: ScoreArea) -> f64 {
    match area {
        ScoreArea::Ats => result.ats_score,
        ScoreArea::Keyword => result.keyword_score,
        ScoreArea::Grammar => result.grammar_score,
        ScoreArea::Structure => result.structure_score,
        ScoreArea::Skills => result.skills_score,
    }
}

/// Truncate on a character boundary, preferring the last space.
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let head = &text[..cut];
            let end = head.rfind(' ').unwrap_or(cut);
            format!("{}...", &text[..end])
        }
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let badge = score_rating(score);
        let color = match badge {
            "EXCELLENT" => Color::Green,
            "VERY GOOD" => Color::BrightGreen,
            "GOOD" => Color::Yellow,
            "FAIR" => Color::BrightYellow,
            "BELOW AVG" => Color::Red,
            _ => Color::BrightRed,
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority_icon(&self, priority: Priority) -> &'static str {
        match (self.use_colors, priority) {
            (true, Priority::Critical) => "🚨 ",
            (true, Priority::High) => "⚠️ ",
            (true, Priority::Medium) => "📋 ",
            (true, Priority::Low) => "💡 ",
            (false, Priority::Critical) => "[!] ",
            (false, Priority::High) => "[*] ",
            (false, Priority::Medium) => "[-] ",
            (false, Priority::Low) => "[+] ",
        }
    }

    fn format_feedback_line(&self, line: &str) -> String {
        if line.starts_with('✓') {
            self.colorize(line, Color::Green)
        } else if line.starts_with('⚠') {
            self.colorize(line, Color::Yellow)
        } else {
            line.to_string()
        }
    }

    fn format_detailed(&self, result: &EvaluationResult, output: &mut String) {
        output.push_str(&self.format_header("📊 Detailed Analysis", 2));

        let sections: Vec<&str> = result.sections.iter().map(|s| s.as_str()).collect();
        output.push_str(&format!("Sections detected: {}\n", sections.join(", ")));
        if !result.missing_sections.is_empty() {
            let missing: Vec<&str> = result.missing_sections.iter().map(|s| s.as_str()).collect();
            output.push_str(&format!(
                "Missing sections: {}\n",
                self.colorize(&missing.join(", "), Color::Yellow)
            ));
        }

        if !result.missing_keywords.is_empty() {
            output.push_str(&self.format_header("Missing Keywords", 3));
            output.push_str(&format!("  {}\n", result.missing_keywords.join(", ")));
        }

        if !result.score_gaps.is_empty() {
            output.push_str(&self.format_header("Score Gaps", 3));
            for gap in &result.score_gaps {
                output.push_str(&format!(
                    "  {}{}: {:.1} (target {:.0}, gap {:.1})\n",
                    self.format_priority_icon(gap.priority),
                    gap.area,
                    gap.current_score,
                    gap.target_score,
                    gap.gap
                ));
            }
        }

        output.push_str(&self.format_header("Improvement Suggestions", 3));
        for block in &result.improvement_suggestions {
            output.push_str(&format!(
                "{}{} {}\n",
                self.format_priority_icon(block.priority),
                self.colorize(&block.category, Color::White),
                self.colorize(&format!("(Priority: {:?})", block.priority), Color::BrightBlack)
            ));
            for suggestion in &block.suggestions {
                output.push_str(&format!("   - {}\n", suggestion));
            }
        }

        if !result.action_verb_suggestions.is_empty() {
            output.push_str(&self.format_header("Action Verbs To Try", 3));
            for verbs in &result.action_verb_suggestions {
                output.push_str(&format!("  • {}: {}\n", verbs.category, verbs.verbs.join(", ")));
            }
        }

        if let (Some(role), false) = (result.suggested_roles.first(), result.example_phrases.is_empty()) {
            output.push_str(&self.format_header(&format!("Example Phrases ({})", role), 3));
            for phrase in &result.example_phrases {
                output.push_str(&format!("  • {}\n", self.colorize(phrase, Color::Cyan)));
            }
        }

        output.push_str(&self.format_header("Text Preview", 3));
        output.push_str(&truncate_text(&result.resume_text, TEXT_PREVIEW_CHARS));
        output.push('\n');
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME EVALUATION", 1));
        output.push_str(&format!(
            "Generated: {} | Resume: {}\n",
            report.metadata.generated_at.format(TIMESTAMP_FORMAT),
            report.resume_file
        ));

        output.push_str(&self.format_header("Overall", 2));
        output.push_str(&format!(
            "Overall Score: {:.1} {}\n",
            result.overall_score,
            self.format_score_badge(result.overall_score)
        ));
        if let Some(source) = &report.metadata.job_description_source {
            output.push_str(&format!(
                "Job Match: {:.1}% {}\n",
                result.jd_match_percentage,
                self.colorize(&format!("({})", source), Color::BrightBlack)
            ));
        }

        output.push_str(&self.format_header("Score Breakdown", 3));
        for area in ScoreArea::ALL {
            let score = area_score(result, area);
            output.push_str(&format!(
                "  {:<22} {:>6.1} (weight: {:.0}%) {}\n",
                area.label(),
                score,
                ScoreWeights::STANDARD.get(area) * 100.0,
                self.format_score_badge(score)
            ));
        }

        output.push_str(&self.format_header("🎯 Suggested Roles", 3));
        for role in &result.suggested_roles {
            output.push_str(&format!("  • {}\n", self.colorize(role, Color::Cyan)));
        }

        output.push_str(&self.format_header("📋 Feedback", 2));
        for line in &result.feedback {
            output.push_str(&format!("{}\n", self.format_feedback_line(line)));
        }

        if self.detailed {
            self.format_detailed(result, &mut output);
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Scorer v{} | Grammar: {} | Keyword tables v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.scorer_version,
            report.metadata.grammar_backend,
            report.metadata.keyword_tables_version
        ));

        Ok(output)
    }

    fn format_batch(&self, batch: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 BATCH EVALUATION", 1));
        output.push_str(&format!(
            "Generated: {} | Evaluated: {} | Failed: {}\n",
            batch.metadata.generated_at.format(TIMESTAMP_FORMAT),
            batch.succeeded(),
            batch.failed()
        ));

        output.push_str(&self.format_header("Ranking", 2));
        for (i, (file, result)) in batch.ranked().iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {:>6.1} {} {}\n",
                i + 1,
                result.overall_score,
                self.format_score_badge(result.overall_score),
                file
            ));
            output.push_str(&format!(
                "       {}\n",
                self.colorize(&result.suggested_roles.join(", "), Color::BrightBlack)
            ));
        }

        if batch.failed() > 0 {
            output.push_str(&self.format_header("❌ Failed", 2));
            for entry in batch.entries.iter().filter(|e| e.result.is_none()) {
                output.push_str(&format!(
                    "  • {}: {}\n",
                    entry.resume_file,
                    self.colorize(entry.error.as_deref().unwrap_or("unknown error"), Color::Red)
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        self.render(report)
    }

    fn format_batch(&self, batch: &BatchReport) -> Result<String> {
        self.render(batch)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        match score_rating(score) {
            "EXCELLENT" => "🟢 Excellent",
            "VERY GOOD" => "🟡 Very Good",
            "GOOD" => "🟠 Good",
            "FAIR" => "🔴 Fair",
            "BELOW AVG" => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# 📊 Resume Evaluation Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Scorer:** v{} | **Grammar:** {}\n",
                report.metadata.generated_at.format(TIMESTAMP_FORMAT),
                report.metadata.scorer_version,
                report.metadata.grammar_backend
            ));
            let file_name = Path::new(&report.resume_file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| report.resume_file.clone());
            output.push_str(&format!("**Resume:** `{}`", file_name));
            if let Some(source) = &report.metadata.job_description_source {
                output.push_str(&format!(" | **Job:** `{}`", source));
            }
            output.push_str("\n\n");
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {:.1} {}\n\n",
            result.overall_score,
            Self::markdown_score_badge(result.overall_score)
        ));
        if report.metadata.job_description_source.is_some() {
            output.push_str(&format!("**Job Match:** {:.1}%\n\n", result.jd_match_percentage));
        }
        output.push_str(&format!(
            "**Suggested Roles:** {}\n\n",
            result.suggested_roles.join(", ")
        ));

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Area | Score | Weight | Rating |\n|---|---:|---:|---|\n");
        for area in ScoreArea::ALL {
            let score = area_score(result, area);
            output.push_str(&format!(
                "| {} | {:.1} | {:.0}% | {} |\n",
                area.label(),
                score,
                ScoreWeights::STANDARD.get(area) * 100.0,
                Self::markdown_score_badge(score)
            ));
        }
        output.push('\n');

        output.push_str("## Feedback\n\n");
        for line in &result.feedback {
            let line = line.trim_start_matches("• ");
            output.push_str(&format!("- {}\n", line));
        }
        output.push('\n');

        if !result.missing_sections.is_empty() || !result.missing_keywords.is_empty() {
            output.push_str("## Gaps\n\n");
            if !result.missing_sections.is_empty() {
                let missing: Vec<&str> = result.missing_sections.iter().map(|s| s.as_str()).collect();
                output.push_str(&format!("**Missing sections:** {}\n\n", missing.join(", ")));
            }
            if !result.missing_keywords.is_empty() {
                output.push_str(&format!(
                    "**Missing keywords:** `{}`\n\n",
                    result.missing_keywords.join("`, `")
                ));
            }
        }

        output.push_str("## Improvement Suggestions\n\n");
        for (i, block) in result.improvement_suggestions.iter().enumerate() {
            output.push_str(&format!(
                "### {}. {} ({:?})\n\n",
                i + 1,
                block.category,
                block.priority
            ));
            for suggestion in &block.suggestions {
                output.push_str(&format!("- {}\n", suggestion));
            }
            output.push('\n');
        }

        if !result.action_verb_suggestions.is_empty() {
            output.push_str("## Action Verbs To Try\n\n");
            for verbs in &result.action_verb_suggestions {
                output.push_str(&format!("- **{}:** {}\n", verbs.category, verbs.verbs.join(", ")));
            }
            output.push('\n');
        }

        if let (Some(role), false) = (result.suggested_roles.first(), result.example_phrases.is_empty()) {
            output.push_str(&format!("## Example Phrases: {}\n\n", role));
            for phrase in &result.example_phrases {
                output.push_str(&format!("- {}\n", phrase));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn format_batch(&self, batch: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Batch Evaluation Report\n\n");
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Evaluated:** {} | **Failed:** {}\n\n",
                batch.metadata.generated_at.format(TIMESTAMP_FORMAT),
                batch.succeeded(),
                batch.failed()
            ));
        }

        output.push_str("| Rank | Resume | Overall | ATS | Keywords | Grammar | Structure | Skills | Roles |\n");
        output.push_str("|---:|---|---:|---:|---:|---:|---:|---:|---|\n");
        for (i, (file, r)) in batch.ranked().iter().enumerate() {
            output.push_str(&format!(
                "| {} | `{}` | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {} |\n",
                i + 1,
                file,
                r.overall_score,
                r.ats_score,
                r.keyword_score,
                r.grammar_score,
                r.structure_score,
                r.skills_score,
                r.suggested_roles.join(", ")
            ));
        }

        if batch.failed() > 0 {
            output.push_str("\n## Failed\n\n");
            for entry in batch.entries.iter().filter(|e| e.result.is_none()) {
                output.push_str(&format!(
                    "- `{}`: {}\n",
                    entry.resume_file,
                    entry.error.as_deref().unwrap_or("unknown error")
                ));
            }
        }

        Ok(output)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    resume_file: &'a str,
    overall_score: Option<f64>,
    ats_score: Option<f64>,
    keyword_score: Option<f64>,
    grammar_score: Option<f64>,
    structure_score: Option<f64>,
    skills_score: Option<f64>,
    jd_match_percentage: Option<f64>,
    suggested_roles: String,
    error: Option<&'a str>,
}

impl<'a> CsvRow<'a> {
    fn new(resume_file: &'a str, result: Option<&EvaluationResult>, error: Option<&'a str>) -> Self {
        Self {
            resume_file,
            overall_score: result.map(|r| r.overall_score),
            ats_score: result.map(|r| r.ats_score),
            keyword_score: result.map(|r| r.keyword_score),
            grammar_score: result.map(|r| r.grammar_score),
            structure_score: result.map(|r| r.structure_score),
            skills_score: result.map(|r| r.skills_score),
            jd_match_percentage: result.map(|r| r.jd_match_percentage),
            suggested_roles: result.map(|r| r.suggested_roles.join("; ")).unwrap_or_default(),
            error,
        }
    }
}

impl CsvFormatter {
    fn write_rows<'a>(rows: impl IntoIterator<Item = CsvRow<'a>>) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ResumeScorerError::OutputFormatting(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ResumeScorerError::OutputFormatting(e.to_string()))
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        Self::write_rows([CsvRow::new(&report.resume_file, Some(&report.result), None)])
    }

    fn format_batch(&self, batch: &BatchReport) -> Result<String> {
        Self::write_rows(
            batch
                .entries
                .iter()
                .map(|e| CsvRow::new(&e.resume_file, e.result.as_ref(), e.error.as_deref())),
        )
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            csv_formatter: CsvFormatter,
        }
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Csv => &self.csv_formatter,
        }
    }

    pub fn generate_report(&self, report: &EvaluationReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_batch(&self, batch: &BatchReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_batch(batch)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
