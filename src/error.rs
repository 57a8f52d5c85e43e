//! Error handling for the resume parser

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text decoding error: {0}")]
    TextDecoding(String),

    #[error("No text could be extracted from: {0}")]
    EmptyDocument(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Entity recognition error: {0}")]
    EntityRecognition(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeParserError>;

impl ResumeParserError {
    /// Whether the error comes from decoding a source document.
    ///
    /// Batch callers use this to report the document as skipped and carry on.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            ResumeParserError::PdfExtraction(_)
                | ResumeParserError::DocxExtraction(_)
                | ResumeParserError::TextDecoding(_)
                | ResumeParserError::EmptyDocument(_)
                | ResumeParserError::UnsupportedFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failure_classification() {
        assert!(ResumeParserError::EmptyDocument("a.pdf".into()).is_extraction_failure());
        assert!(ResumeParserError::UnsupportedFormat("a.xyz".into()).is_extraction_failure());
        assert!(!ResumeParserError::Configuration("bad".into()).is_extraction_failure());
    }
}
