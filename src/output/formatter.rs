//! Match report formatters for console, JSON and Markdown output

use crate::catalog::role::Importance;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::matcher::{MatchResult, ScoreTier};
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A match result together with the role it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub role: String,
    pub importance: Importance,
    pub percentage: u8,
    pub tier: ScoreTier,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl MatchReport {
    pub fn new(role: impl Into<String>, importance: Importance, result: MatchResult) -> Self {
        Self {
            role: role.into(),
            importance,
            percentage: result.percentage(),
            tier: result.tier(),
            result,
        }
    }
}

pub trait OutputFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Picks the formatter for a configured output format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n{} {}\n", "█", title)
        }
    }

    fn format_score_badge(&self, tier: ScoreTier) -> String {
        let (badge, color) = match tier {
            ScoreTier::Strong => ("STRONG", Color::Green),
            ScoreTier::Fair => ("PARTIAL", Color::Yellow),
            ScoreTier::Weak => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let (matched, total) = report.result.coverage();

        output.push_str(&self.format_header(&format!("KEYWORD MATCH: {}", report.role)));
        output.push_str(&format!("Importance: {}\n", report.importance));
        output.push_str(&format!(
            "Score: {}% {}\n",
            report.percentage,
            self.format_score_badge(report.tier)
        ));
        output.push_str(&format!("Coverage: {} of {} keywords\n", matched, total));

        output.push_str(&self.format_header("Matched"));
        if report.result.matched.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("none", Color::BrightBlack)));
        }
        for keyword in &report.result.matched {
            output.push_str(&format!("  + {}\n", self.colorize(keyword, Color::Green)));
        }

        output.push_str(&self.format_header("Missing"));
        if report.result.missing.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("none", Color::BrightBlack)));
        }
        for keyword in &report.result.missing {
            output.push_str(&format!("  - {}\n", self.colorize(keyword, Color::Yellow)));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let (matched, total) = report.result.coverage();

        output.push_str(&format!("# Keyword Match: {}\n\n", report.role));
        output.push_str(&format!(
            "**Score:** {}% ({}) | **Importance:** {} | **Coverage:** {} of {}\n\n",
            report.percentage,
            report.tier.label(),
            report.importance,
            matched,
            total
        ));

        output.push_str("## Matched Keywords\n\n");
        output.push_str(&markdown_list(&report.result.matched));
        output.push_str("\n## Missing Keywords\n\n");
        output.push_str(&markdown_list(&report.result.missing));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn markdown_list(keywords: &[String]) -> String {
    if keywords.is_empty() {
        return "_None_\n".to_string();
    }
    keywords.iter().map(|k| format!("- {}\n", k)).collect()
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_match(report),
            OutputFormat::Json => self.json_formatter.format_match(report),
            OutputFormat::Markdown => self.markdown_formatter.format_match(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    save_bytes_to_file(content.as_bytes(), file_path)
}

pub fn save_bytes_to_file(bytes: &[u8], file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, bytes)?;
    Ok(())
}

/// `<prefix>_<Name_With_Underscores>.pdf`, keeping only filename-safe characters.
pub fn suggest_filename(prefix: &str, name: &str) -> String {
    let stem = name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    match (prefix.trim(), stem.as_str()) {
        (p, "") if p.is_empty() => "report.pdf".to_string(),
        (p, "") => format!("{}.pdf", p),
        ("", s) => format!("{}.pdf", s),
        (p, s) => format!("{}_{}.pdf", p, s),
    }
}
