//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use credence_domain::traits::TestScenarios;
use credence_domain::{
    scenario_title, BatchReport, CredibilityLevel, EvaluationResult, HistoryEntry, KnowledgeFact,
    Submission, ValidationReport,
};
use credence_knowledge::{DisplayFact, ScoreBand};
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Preview length for history and batch rows
const ROW_PREVIEW: usize = 100;

/// Preview length for scenario rows
const SCENARIO_PREVIEW: usize = 120;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a single evaluation result.
    pub fn format_result(&self, result: &EvaluationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(format!("{}", result.score.round())),
            OutputFormat::Table => Ok(self.format_result_table(result)),
        }
    }

    fn format_result_table(&self, result: &EvaluationResult) -> String {
        let mut lines = vec![
            format!(
                "Score: {} {}",
                result.score.round(),
                self.level(result.level)
            ),
            format!("Confidence: {}%", result.confidence.round()),
        ];

        let mut builder = Builder::default();
        builder.push_record(["Category", "Score", "Weight"]);
        for (name, score, weight) in result.breakdown.categories() {
            builder.push_record([name.to_string(), format!("{}", score.round()), weight.to_string()]);
        }
        lines.push(self.table(builder));

        if !result.reasoning.is_empty() {
            lines.push("Reasoning:".to_string());
            lines.extend(result.reasoning.iter().map(|r| format!("  - {}", r)));
        }
        if !result.timestamp.is_empty() {
            lines.push(format!("Evaluated at: {}", result.timestamp));
        }

        lines.join("\n")
    }

    /// Format validation failures, one line per field.
    pub fn format_validation(&self, report: &ValidationReport) -> String {
        report
            .field_errors
            .iter()
            .map(|(field, message)| self.error(&format!("{}: {}", field, message)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a batch report; `items` are the submissions that were sent.
    pub fn format_batch(&self, report: &BatchReport, items: &[Submission]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report
                .results
                .iter()
                .map(|r| match &r.data {
                    Some(data) if r.success => format!("{}\t{}", r.index, data.score.round()),
                    _ => format!("{}\tfailed", r.index),
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let summary = format!(
                    "Processed {} items with {} successful and {} failed evaluations.",
                    report.total, report.successful, report.failed
                );

                let mut builder = Builder::default();
                builder.push_record(["#", "Content", "Status", "Score", "Level / Error"]);
                for outcome in &report.results {
                    let content = items
                        .get(outcome.index)
                        .map(|s| s.preview(ROW_PREVIEW))
                        .unwrap_or_default();
                    let (status, score, detail) = match (&outcome.data, outcome.success) {
                        (Some(data), true) => (
                            self.colorize("ok", "green"),
                            format!("{}", data.score.round()),
                            self.level(data.level),
                        ),
                        _ => (
                            self.colorize("failed", "red"),
                            "-".to_string(),
                            outcome.error.clone().unwrap_or_default(),
                        ),
                    };
                    builder.push_record([
                        (outcome.index + 1).to_string(),
                        content,
                        status,
                        score,
                        detail,
                    ]);
                }

                Ok(format!("{}\n{}", summary, self.table(builder)))
            }
        }
    }

    /// Format the canned test scenarios.
    pub fn format_scenarios(&self, scenarios: &TestScenarios) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(scenarios)?),
            OutputFormat::Quiet => Ok(scenarios.keys().cloned().collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if scenarios.is_empty() {
                    return Ok(self.colorize("No test scenarios available.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "Title", "Source", "Content"]);
                for (name, submission) in scenarios {
                    builder.push_record([
                        name.clone(),
                        scenario_title(name),
                        submission.source.kind.label().to_string(),
                        submission.preview(SCENARIO_PREVIEW),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format history entries.
    pub fn format_history(&self, entries: &[HistoryEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.id.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No evaluations in history.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Time", "Content", "Score", "Level"]);
                for entry in entries {
                    let (score, level) = match &entry.result {
                        Some(result) => (format!("{}", result.score.round()), self.level(result.level)),
                        None => ("-".to_string(), self.colorize("no result", "red")),
                    };
                    builder.push_record([
                        entry.id.clone(),
                        entry.timestamp.clone(),
                        entry.input.preview(ROW_PREVIEW),
                        score,
                        level,
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format one history entry in full.
    pub fn format_entry(&self, entry: &HistoryEntry) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entry)?),
            OutputFormat::Quiet => Ok(entry.id.clone()),
            OutputFormat::Table => {
                let input = &entry.input;
                let mut lines = vec![
                    format!("ID: {}", entry.id),
                    format!("Recorded: {}", entry.timestamp),
                    format!("Content: {}", input.content),
                    format!(
                        "Source: {} (reputation {:.2})",
                        input.source.kind.label(),
                        input.source.reputation()
                    ),
                ];
                if let Some(url) = &input.source.url {
                    lines.push(format!("URL: {}", url));
                }
                if let Some(name) = &input.author.name {
                    lines.push(format!("Author: {}", name));
                }
                lines.push(String::new());

                match &entry.result {
                    Some(result) => lines.push(self.format_result_table(result)),
                    None => lines.push(self.warning("The evaluation failed; no result was recorded")),
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format decoded evaluation facts.
    pub fn format_facts(&self, facts: &[DisplayFact]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_facts: Vec<serde_json::Value> = facts
                    .iter()
                    .map(|f| {
                        json!({
                            "content": f.content,
                            "level": f.level,
                            "score": f.score_percent,
                            "points": f.points.iter().map(|p| json!({
                                "text": p.text,
                                "score": p.score,
                            })).collect::<Vec<_>>(),
                            "evaluatedAt": f.evaluated_at.map(|t| t.to_rfc3339()),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_facts)?)
            }
            OutputFormat::Quiet => Ok(facts
                .iter()
                .map(|f| f.content.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if facts.is_empty() {
                    return Ok(self.colorize("No evaluations in the knowledge base.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Content", "Level", "Score", "Evaluated", "Reasoning"]);
                for fact in facts {
                    let score = match fact.score_percent {
                        Some(percent) => self.band(percent, fact.score_band()),
                        None => "-".to_string(),
                    };
                    let evaluated = match (&fact.evaluated_at, &fact.evaluated_at_raw) {
                        (Some(at), _) => at.format("%Y-%m-%d %H:%M").to_string(),
                        (None, Some(raw)) => raw.clone(),
                        (None, None) => "-".to_string(),
                    };
                    let reasoning = fact
                        .points
                        .iter()
                        .map(|p| format!("- {}", p.text))
                        .collect::<Vec<_>>()
                        .join("\n");
                    builder.push_record([
                        fact.content.clone(),
                        match fact.level_kind {
                            Some(level) => self.level(level),
                            None => fact.level.clone(),
                        },
                        score,
                        evaluated,
                        reasoning,
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format facts as stored.
    pub fn format_raw_facts(&self, facts: &[KnowledgeFact]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(facts)?),
            OutputFormat::Quiet => Ok(facts
                .iter()
                .map(|f| f.predicate.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if facts.is_empty() {
                    return Ok(self.colorize("No facts found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Predicate", "Arguments", "Comment"]);
                for fact in facts {
                    builder.push_record([
                        fact.predicate.clone(),
                        fact.arguments.join(", "),
                        fact.comment.clone().unwrap_or_default(),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn level(&self, level: CredibilityLevel) -> String {
        let label = level.as_str().to_uppercase();
        match level {
            CredibilityLevel::Credible => self.colorize(&label, "green"),
            CredibilityLevel::Doubtful => self.colorize(&label, "yellow"),
            CredibilityLevel::Suspect => self.colorize(&label, "red"),
        }
    }

    fn band(&self, percent: i64, band: Option<ScoreBand>) -> String {
        let text = format!("{}%", percent);
        match band {
            Some(ScoreBand::High) => self.colorize(&text, "green"),
            Some(ScoreBand::Medium) => self.colorize(&text, "yellow"),
            Some(ScoreBand::Low) => self.colorize(&text, "red"),
            None => text,
        }
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
