//! Output formatters for parsed candidates

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ResumeParserError};
use crate::output::report::{record_to_json, CandidateRow, DisplayLimits, PARSED_AT_FORMAT};
use crate::processing::scoring::ScoreBand;
use crate::processing::ParsedResume;
use crate::storage::{SkillSummary, StoreStats};
use chrono::{DateTime, Local};
use colored::{Color, Colorize};
use serde_json::Value;
use std::path::Path;

const CONSOLE_EXPERIENCE_LINES: usize = 8;

/// Trait for rendering a set of candidate records
pub trait OutputFormatter {
    fn format_records(&self, records: &[&ParsedResume]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Coloured per-candidate cards for the terminal
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// Lossless JSON, one object per record
pub struct JsonFormatter {
    pretty: bool,
    include_raw_text: bool,
}

/// One CSV row per record with the list columns truncated
pub struct CsvFormatter {
    limits: DisplayLimits,
}

/// Dispatches to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    csv_formatter: CsvFormatter,
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
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match ScoreBand::from_score(score) {
            ScoreBand::Strong => ("STRONG", Color::Green),
            ScoreBand::Partial => ("PARTIAL", Color::Yellow),
            ScoreBand::Weak => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("{}% [{}]", score.to_string().color(color).bold(), badge.color(color).bold())
        } else {
            format!("{}% [{}]", score, badge)
        }
    }

    fn field_line(&self, label: &str, value: &str) -> String {
        let shown = if value.is_empty() { "—" } else { value };
        format!("  {:<10} {}\n", self.colorize(label, Color::Cyan), shown)
    }

    fn format_card(&self, record: &ParsedResume) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("📋 {}", record.display_name())));
        output.push_str(&format!("  Completeness: {}\n\n", self.format_score_badge(record.score())));

        output.push_str(&self.field_line("Name", record.name()));
        output.push_str(&self.field_line("Email", record.email()));
        output.push_str(&self.field_line("Phone", record.phone()));
        output.push_str(&self.field_line("LinkedIn", record.linkedin()));
        output.push_str(&self.field_line("GitHub", record.github()));
        output.push_str(&self.field_line("File", record.filename()));
        output.push_str(&self.field_line("ID", record.id()));
        output.push_str(&self.field_line(
            "Parsed",
            &record.parsed_at().format(PARSED_AT_FORMAT).to_string(),
        ));

        output.push_str(&format!("\n  {} ({})\n", self.colorize("⚡ Skills", Color::Yellow), record.skills().len()));
        if record.skills().is_empty() {
            output.push_str("    No skills detected\n");
        } else {
            output.push_str(&format!("    {}\n", record.skills().join(", ")));
        }

        output.push_str(&format!("\n  {}\n", self.colorize("🎓 Education", Color::Yellow)));
        self.push_bullets(&mut output, record.education(), usize::MAX);

        output.push_str(&format!("\n  {}\n", self.colorize("💼 Experience", Color::Yellow)));
        self.push_bullets(&mut output, record.experience(), CONSOLE_EXPERIENCE_LINES);

        output
    }

    fn push_bullets(&self, output: &mut String, items: &[String], limit: usize) {
        if items.is_empty() {
            output.push_str("    Not detected\n");
            return;
        }
        for item in items.iter().take(limit) {
            output.push_str(&format!("    • {}\n", item));
        }
    }

    /// Database overview: totals, average completeness and skill frequencies
    pub fn format_summary(&self, stats: &StoreStats, skills: &SkillSummary) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("🗄️  Candidate Database"));
        output.push_str(&format!("  Total candidates:   {}\n", stats.total));
        output.push_str(&format!("  Avg completeness:   {}\n", self.format_score_badge(stats.avg_score)));
        output.push_str(&format!("  Avg skills/resume:  {}\n", skills.average_skills));
        output.push_str(&format!(
            "  Top skill:          {}\n",
            skills.top_skill.as_deref().unwrap_or("—")
        ));

        if !skills.top_skills.is_empty() {
            output.push_str(&self.format_header("📊 Top Skills"));
            let widest = skills.top_skills.iter().map(|(_, count)| *count).max().unwrap_or(1);
            for (skill, count) in &skills.top_skills {
                let bar = "▇".repeat((count * 20).div_ceil(widest));
                output.push_str(&format!("  {:<16} {} {}\n", skill, self.colorize(&bar, Color::Magenta), count));
            }
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_records(&self, records: &[&ParsedResume]) -> Result<String> {
        if records.is_empty() {
            return Ok("No candidates to show.\n".to_string());
        }

        let mut output = String::new();
        for record in records {
            output.push_str(&self.format_card(record));
        }
        output.push_str(&format!("\n{} candidate(s)\n", records.len()));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool, include_raw_text: bool) -> Self {
        Self { pretty, include_raw_text }
    }

    /// Always an array, whatever the number of records
    pub fn to_value(&self, records: &[&ParsedResume]) -> Result<Value> {
        let values = records
            .iter()
            .map(|record| record_to_json(record, self.include_raw_text))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Array(values))
    }

    /// A lone record as a bare object
    pub fn format_record(&self, record: &ParsedResume) -> Result<String> {
        let value = record_to_json(record, self.include_raw_text)?;
        self.render(&value)
    }

    fn render(&self, value: &Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_records(&self, records: &[&ParsedResume]) -> Result<String> {
        let value = self.to_value(records)?;
        self.render(&value)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl CsvFormatter {
    pub fn new(limits: DisplayLimits) -> Self {
        Self { limits }
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_records(&self, records: &[&ParsedResume]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            writer.serialize(CandidateRow::from_record(record, &self.limits))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ResumeParserError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ResumeParserError::OutputFormatting(format!("CSV output is not UTF-8: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default())
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output),
            json_formatter: JsonFormatter::new(true, config.include_raw_text),
            csv_formatter: CsvFormatter::new(DisplayLimits::from(config)),
        }
    }

    pub fn generate_report(&self, records: &[&ParsedResume], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_records(records),
            OutputFormat::Json => self.json_formatter.format_records(records),
            OutputFormat::Csv => self.csv_formatter.format_records(records),
        }
    }

    /// Like [`generate_report`](Self::generate_report) for one record, but
    /// JSON comes out as an object rather than a one-element array
    pub fn generate_record(&self, record: &ParsedResume, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.json_formatter.format_record(record),
            _ => self.generate_report(&[record], format),
        }
    }

    pub fn generate_summary(&self, stats: &StoreStats, skills: &SkillSummary) -> String {
        self.console_formatter.format_summary(stats, skills)
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

/// e.g. `all_candidates_20250101_1200.csv`
pub fn suggest_filename(format: OutputFormat, stem: &str, at: DateTime<Local>) -> String {
    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    };
    format!("{}_{}.{}", stem, at.format("%Y%m%d_%H%M"), extension)
}
