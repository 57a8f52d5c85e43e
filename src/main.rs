//! Resume parser: structured candidate records from resume documents

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_parser::cli::{self, Cli, Commands, ConfigAction};
use resume_parser::config::{Config, OutputFormat};
use resume_parser::error::{Result, ResumeParserError};
use resume_parser::input::file_detector::SUPPORTED_EXTENSIONS;
use resume_parser::input::InputManager;
use resume_parser::output::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_parser::processing::{ParsedResume, ResumeParser, SourceDocument};
use resume_parser::storage::{ResumeStore, SearchFilter, SkillSummary};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> anyhow::Result<()> {
    let db_path = config.database_path().to_path_buf();
    match command {
        Commands::Parse {
            files,
            output,
            save,
            no_store,
            include_raw,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            if include_raw {
                config.output.include_raw_text = true;
            }
            // keep stdout clean for machine-readable output
            let to_stderr = format != OutputFormat::Console && save.is_none();

            let (documents, failed) = load_documents(&files, &config).await?;
            if documents.is_empty() {
                anyhow::bail!("None of the {} file(s) produced any text", files.len());
            }

            let parser =
                ResumeParser::new(&config.processing).context("Failed to initialise the parser")?;
            let records = parser.parse_batch(&documents);
            info!("Parsed {} document(s)", records.len());

            if !no_store {
                let store = open_store(&db_path)?;
                for record in &records {
                    store
                        .upsert(record)
                        .with_context(|| format!("Failed to store {}", record.filename()))?;
                }
                status(
                    to_stderr,
                    &format!("💾 Stored {} record(s) in {}", records.len(), db_path.display()),
                );
            }

            let refs: Vec<&ParsedResume> = records.iter().collect();
            emit(&refs, format, &config, save.as_deref(), "parsed_resumes")?;

            status(to_stderr, &format!("✅ Parsed {} resume(s) successfully!", records.len()));
            if failed > 0 {
                status(to_stderr, &format!("⚠️  {} file(s) skipped", failed));
            }
        }

        Commands::List { output, save } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let store = open_store(&db_path)?;
            let records = store.list_all()?;

            let refs: Vec<&ParsedResume> = records.iter().collect();
            emit(&refs, format, &config, save.as_deref(), "all_candidates")?;
        }

        Commands::Search {
            query,
            skill,
            min_score,
            output,
            save,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let store = open_store(&db_path)?;
            let records = store.list_all()?;

            let filter = SearchFilter {
                query,
                skill,
                min_score,
            };
            let hits = filter.apply(&records);

            let to_stderr = format != OutputFormat::Console && save.is_none();
            status(
                to_stderr,
                &format!("🔍 Showing {} of {} candidates", hits.len(), records.len()),
            );
            if hits.is_empty() {
                status(to_stderr, "No candidates match your filters.");
                return Ok(());
            }

            emit(&hits, format, &config, save.as_deref(), "candidates_filtered")?;
        }

        Commands::Show { id, output } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let store = open_store(&db_path)?;
            let record = store.require(&id)?;

            let generator = ReportGenerator::from_config(&config.output);
            print_content(&generator.generate_record(&record, format)?);
        }

        Commands::Delete { id } => {
            let store = open_store(&db_path)?;
            if store.delete(&id)? {
                println!("🗑️  Deleted record {}", id);
            } else {
                return Err(ResumeParserError::NotFound(id).into());
            }
        }

        Commands::Clear { yes } => {
            if !yes && !confirm("Delete every stored candidate?")? {
                println!("Aborted.");
                return Ok(());
            }
            let store = open_store(&db_path)?;
            let removed = store.clear()?;
            println!("🗑️  Removed {} record(s)", removed);
        }

        Commands::Stats => {
            let store = open_store(&db_path)?;
            let stats = store.stats()?;
            let records = store.list_all()?;
            let skills = SkillSummary::from_records(&records);

            let generator = ReportGenerator::from_config(&config.output);
            print!("{}", generator.generate_summary(&stats, &skills));
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeParserError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default()
                    .save_to(config_path)
                    .with_context(|| format!("Failed to write {}", config_path.display()))?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(ResumeParserError::InvalidInput),
        None => Ok(config.output.format),
    }
}

/// Extract every file, reporting and skipping the ones that fail to decode.
///
/// Returns the extracted documents and the number of skipped files.
async fn load_documents(files: &[PathBuf], config: &Config) -> Result<(Vec<SourceDocument>, usize)> {
    let mut manager = InputManager::new().with_cache(config.processing.enable_caching);
    let mut documents = Vec::with_capacity(files.len());
    let mut failed = 0usize;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| ResumeParserError::OutputFormatting(e.to_string()))?
            .progress_chars("#>-"),
    );

    for path in files {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        pb.set_message(filename.clone());

        if let Err(e) = cli::validate_file_extension(path, SUPPORTED_EXTENSIONS) {
            pb.suspend(|| warn!("Skipping {}: {}", path.display(), e));
            failed += 1;
            pb.inc(1);
            continue;
        }

        match manager.extract_text(path).await {
            Ok(text) => documents.push(SourceDocument::new(filename, text)),
            Err(e) if e.is_extraction_failure() => {
                pb.suspend(|| warn!("⚠️  Could not extract text from {}: {}", path.display(), e));
                failed += 1;
            }
            Err(ResumeParserError::InvalidInput(msg)) => {
                pb.suspend(|| warn!("Skipping {}: {}", path.display(), msg));
                failed += 1;
            }
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok((documents, failed))
}

/// Render records and print them, or write them to `save`.
///
/// A directory as `save` gets a timestamped file name built from `stem`.
fn emit(
    records: &[&ParsedResume],
    format: OutputFormat,
    config: &Config,
    save: Option<&Path>,
    stem: &str,
) -> anyhow::Result<()> {
    let generator = ReportGenerator::from_config(&config.output);
    let content = generator.generate_report(records, format)?;

    match save {
        Some(path) => {
            let target = if path.is_dir() {
                path.join(suggest_filename(format, stem, Local::now()))
            } else {
                path.to_path_buf()
            };
            save_report_to_file(&content, &target)
                .with_context(|| format!("Failed to save report to {}", target.display()))?;
            println!("📁 Saved {} record(s) to {}", records.len(), target.display());
        }
        None => print_content(&content),
    }
    Ok(())
}

fn print_content(content: &str) {
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
}

fn open_store(path: &Path) -> anyhow::Result<ResumeStore> {
    ResumeStore::open(path).with_context(|| format!("Failed to open database {}", path.display()))
}

fn status(to_stderr: bool, message: &str) {
    if to_stderr {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_store_error_names_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();

        let err = open_store(&blocker.join("resumes.db")).err().unwrap();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to open database"));
        assert!(message.contains("resumes.db"));
        assert!(err.downcast_ref::<ResumeParserError>().is_some());
    }
}
