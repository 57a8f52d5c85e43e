//! Configuration management for the resume parser

use crate::error::{Result, ResumeParserError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Characters of source text handed to the entity recognizer
    pub entity_text_limit: usize,
    /// Characters of source text kept on the record for re-display
    pub excerpt_chars: usize,
    pub enable_entity_recognition: bool,
    pub enable_caching: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub include_raw_text: bool,
    pub skills_display: usize,
    pub education_display: usize,
    pub experience_display: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            entity_text_limit: 50_000,
            excerpt_chars: 3_000,
            enable_entity_recognition: true,
            enable_caching: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            include_raw_text: false,
            skills_display: 8,
            education_display: 2,
            experience_display: 2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let database_path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-parser")
            .join("resumes.db");

        Self {
            processing: ProcessingConfig::default(),
            storage: StorageConfig { database_path },
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeParserError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-parser")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.processing.entity_text_limit == 0 {
            return Err(ResumeParserError::Configuration(
                "processing.entity_text_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn database_path(&self) -> &Path {
        &self.storage.database_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.processing.entity_text_limit, 50_000);
        assert_eq!(config.processing.excerpt_chars, 3_000);
        assert_eq!(config.output.skills_display, 8);
        assert_eq!(config.output.format, OutputFormat::Console);
        assert!(config.database_path().ends_with("resumes.db"));
    }

    #[test]
    fn test_load_writes_defaults_then_reads_them_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let second = Config::load_from(&path).unwrap();
        assert_eq!(first.processing.excerpt_chars, second.processing.excerpt_chars);
        assert_eq!(first.storage.database_path, second.storage.database_path);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ResumeParserError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_entity_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.processing.entity_text_limit = 0;
        config.save_to(&path).unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
