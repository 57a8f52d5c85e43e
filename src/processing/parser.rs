//! Resume parsing orchestrator
//!
//! Runs every field extractor over a document and assembles the
//! [`ParsedResume`]. Parsing never fails: missing signal leaves the
//! corresponding field empty.

use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::processing::contact;
use crate::processing::names::{self, shared_recognizer, EntityHint, EntityRecognizer};
use crate::processing::record::{CandidateFields, ParsedResume};
use crate::processing::sections;
use crate::processing::skills::SkillMatcher;
use chrono::Utc;
use log::{debug, warn};
use rayon::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

const ID_LENGTH: usize = 8;

/// Plain text of one document together with its source name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub filename: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

pub struct ResumeParser {
    skill_matcher: SkillMatcher,
    recognizer: Option<Arc<dyn EntityRecognizer>>,
    entity_text_limit: usize,
    excerpt_chars: usize,
}

impl ResumeParser {
    pub fn new(config: &ProcessingConfig) -> Result<Self> {
        let recognizer = if config.enable_entity_recognition {
            Some(shared_recognizer())
        } else {
            None
        };

        Ok(Self {
            skill_matcher: SkillMatcher::new()?,
            recognizer,
            entity_text_limit: config.entity_text_limit,
            excerpt_chars: config.excerpt_chars,
        })
    }

    /// Replace the entity recognizer; `None` disables the entity tier
    pub fn with_recognizer(mut self, recognizer: Option<Arc<dyn EntityRecognizer>>) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn parse(&self, text: &str, filename: &str) -> ParsedResume {
        let fields = self.extract_fields(text);

        debug!(
            "Parsed {}: name={:?} skills={} education={} experience={}",
            filename,
            fields.name,
            fields.skills.len(),
            fields.education.len(),
            fields.experience.len()
        );

        ParsedResume::new(
            new_record_id(),
            filename.to_string(),
            fields,
            Utc::now(),
            char_prefix(text, self.excerpt_chars).to_string(),
        )
    }

    /// Parse independent documents in parallel; output order matches input order
    pub fn parse_batch(&self, documents: &[SourceDocument]) -> Vec<ParsedResume> {
        documents
            .par_iter()
            .map(|doc| self.parse(&doc.text, &doc.filename))
            .collect()
    }

    pub fn extract_fields(&self, text: &str) -> CandidateFields {
        let hints = self.entity_hints(text);

        CandidateFields {
            name: names::resolve_name(text, &hints),
            email: contact::extract_email(text),
            phone: contact::extract_phone(text),
            linkedin: contact::extract_linkedin(text),
            github: contact::extract_github(text),
            skills: self.skill_matcher.find_skills(text),
            education: sections::extract_education(text),
            experience: sections::extract_experience(text),
        }
    }

    fn entity_hints(&self, text: &str) -> Vec<EntityHint> {
        let Some(recognizer) = &self.recognizer else {
            return Vec::new();
        };

        let bounded = char_prefix(text, self.entity_text_limit);
        match recognizer.recognize(bounded) {
            Ok(hints) => hints,
            Err(e) => {
                warn!(
                    "Entity recognizer '{}' failed, using line heuristic: {}",
                    recognizer.name(),
                    e
                );
                Vec::new()
            }
        }
    }
}

fn new_record_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LENGTH);
    id
}

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
