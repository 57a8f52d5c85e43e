//! CLI interface for the resume parser

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-parser")]
#[command(about = "Extract structured candidate records from resumes")]
#[command(long_about = "Parse PDF, DOCX, text and Markdown resumes into candidate records (contact details, skills, education, experience), store them in a local database and export them as JSON or CSV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one or more resumes
    Parse {
        /// Resume files (PDF, DOCX, TXT, MD)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: console, json, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Do not write parsed records to the database
        #[arg(long)]
        no_store: bool,

        /// Include the source text excerpt in JSON output
        #[arg(long)]
        include_raw: bool,
    },

    /// List every stored candidate, newest first
    List {
        /// Output format: console, json, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Search stored candidates
    Search {
        /// Match against name or email (case-insensitive)
        #[arg(short, long)]
        query: Option<String>,

        /// Match against any skill (case-insensitive)
        #[arg(long)]
        skill: Option<String>,

        /// Minimum completeness score (0-100)
        #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
        min_score: u8,

        /// Output format: console, json, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show one stored candidate
    Show {
        /// Record id
        id: String,

        /// Output format: console, json, csv
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Delete one stored candidate
    Delete {
        /// Record id
        id: String,
    },

    /// Delete every stored candidate
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Database statistics and skill frequencies
    Stats,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, csv", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::SUPPORTED_EXTENSIONS;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("csv"), Ok(OutputFormat::Csv));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.Docx"), SUPPORTED_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.rtf"), SUPPORTED_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), SUPPORTED_EXTENSIONS).is_err());
    }

    #[test]
    fn test_parse_command_line() {
        let cli = Cli::try_parse_from([
            "resume-parser", "parse", "a.pdf", "b.docx", "--output", "csv", "--no-store",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse { files, output, no_store, include_raw, .. } => {
                assert_eq!(files.len(), 2);
                assert_eq!(output.as_deref(), Some("csv"));
                assert!(no_store);
                assert!(!include_raw);
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_search_rejects_out_of_range_score() {
        assert!(Cli::try_parse_from(["resume-parser", "search", "--min-score", "101"]).is_err());
    }
}
