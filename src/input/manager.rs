//! Input manager for handling different file types

use crate::error::{Result, ResumeParserError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeParserError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        let text = self.extract_bytes(&bytes, &path_str)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Decode an uploaded document, routed by the extension of `filename`.
    ///
    /// Returns the trimmed text; a document with no text is `EmptyDocument`.
    pub fn extract_bytes(&self, bytes: &[u8], filename: &str) -> Result<String> {
        let text = match self.detect_file_type(filename) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", filename);
                PdfExtractor.extract(bytes, filename)?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", filename);
                DocxExtractor.extract(bytes, filename)?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", filename);
                PlainTextExtractor.extract(bytes, filename)?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", filename);
                MarkdownExtractor.extract(bytes, filename)?
            }
            FileType::Unknown => {
                return Err(ResumeParserError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    filename
                )));
            }
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ResumeParserError::EmptyDocument(filename.to_string()));
        }

        debug!("Extracted {} characters from {}", trimmed.chars().count(), filename);
        Ok(trimmed.to_string())
    }

    pub fn detect_file_type(&self, filename: &str) -> FileType {
        FileType::from_filename(filename)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::text_extractor::tests::docx_bytes;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_extract_bytes_routes_by_extension() {
        let manager = InputManager::new();
        assert_eq!(manager.extract_bytes(b"  Jane Doe \n", "cv.txt").unwrap(), "Jane Doe");

        let docx = docx_bytes("<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>");
        assert_eq!(manager.extract_bytes(&docx, "cv.DOCX").unwrap(), "Jane Doe");
    }

    #[test]
    fn test_empty_and_unsupported_documents() {
        let manager = InputManager::new();
        assert!(matches!(
            manager.extract_bytes(b" \n\t ", "blank.txt"),
            Err(ResumeParserError::EmptyDocument(_))
        ));
        assert!(matches!(
            manager.extract_bytes(b"text", "cv.rtf"),
            Err(ResumeParserError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_text_caches_by_path() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Jane Doe").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_text(file.path()).await.unwrap(), "Jane Doe");
        assert_eq!(manager.cache_size(), 1);

        manager.clear_cache();
        assert_eq!(manager.cache_size(), 0);

        let mut uncached = InputManager::new().with_cache(false);
        uncached.extract_text(file.path()).await.unwrap();
        assert_eq!(uncached.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_invalid_input() {
        let mut manager = InputManager::new();
        let result = manager.extract_text(Path::new("does/not/exist.pdf")).await;
        assert!(matches!(result, Err(ResumeParserError::InvalidInput(_))));
    }
}
