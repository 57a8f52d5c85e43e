//! Candidate name resolution
//!
//! Two tiers: person entities supplied by an [`EntityRecognizer`], then a
//! heuristic over the first lines of the document.

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock, OnceLock};

const MAX_NAME_CHARS: usize = 50;
const MIN_NAME_TOKENS: usize = 2;
const MAX_NAME_TOKENS: usize = 4;
const HEURISTIC_LINE_WINDOW: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHint {
    pub label: EntityLabel,
    pub text: String,
}

impl EntityHint {
    pub fn person(text: impl Into<String>) -> Self {
        Self {
            label: EntityLabel::Person,
            text: text.into(),
        }
    }
}

/// Named-entity recognition over a bounded prefix of the document
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<EntityHint>>;

    fn name(&self) -> &str;
}

static LABELED_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(full[ \t]+name|candidate[ \t]+name|candidate|name|company|employer|organi[sz]ation)[ \t]*[:\-–][ \t]*(\S.*?)[ \t]*$",
    )
    .expect("valid labeled field regex")
});

/// Rule-based recognizer for labelled lines such as `Name: Jane Doe`
/// or `Employer - Initech`.
#[derive(Debug, Default)]
pub struct LabeledFieldRecognizer;

impl EntityRecognizer for LabeledFieldRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<EntityHint>> {
        let hints = LABELED_FIELD_REGEX
            .captures_iter(text)
            .map(|caps| {
                let label = match caps[1].to_lowercase().split_whitespace().next() {
                    Some("company") | Some("employer") | Some("organization") | Some("organisation") => {
                        EntityLabel::Organization
                    }
                    _ => EntityLabel::Person,
                };
                EntityHint {
                    label,
                    text: caps[2].to_string(),
                }
            })
            .collect();
        Ok(hints)
    }

    fn name(&self) -> &str {
        "labeled-field"
    }
}

static SHARED_RECOGNIZER: OnceLock<Arc<dyn EntityRecognizer>> = OnceLock::new();

/// Process-wide recognizer, initialised on first use
pub fn shared_recognizer() -> Arc<dyn EntityRecognizer> {
    SHARED_RECOGNIZER
        .get_or_init(|| {
            log::debug!("Initializing shared entity recognizer");
            Arc::new(LabeledFieldRecognizer)
        })
        .clone()
}

fn token_count_ok(candidate: &str) -> bool {
    let tokens = candidate.split_whitespace().count();
    (MIN_NAME_TOKENS..=MAX_NAME_TOKENS).contains(&tokens)
}

/// First acceptable person entity, in the order given
pub fn name_from_entities(hints: &[EntityHint]) -> Option<String> {
    hints
        .iter()
        .filter(|hint| hint.label == EntityLabel::Person)
        .map(|hint| hint.text.trim())
        .find(|name| token_count_ok(name) && name.chars().count() < MAX_NAME_CHARS)
        .map(str::to_string)
}

/// First of the leading lines that reads like a personal name
pub fn name_from_leading_lines(text: &str) -> Option<String> {
    text.split('\n')
        .take(HEURISTIC_LINE_WINDOW)
        .map(str::trim)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

fn looks_like_name(line: &str) -> bool {
    let mut letters = line.chars().filter(|c| *c != ' ' && *c != '.').peekable();
    let only_letters = letters.peek().is_some() && letters.all(char::is_alphabetic);

    token_count_ok(line)
        && only_letters
        && line.chars().count() < MAX_NAME_CHARS
        && line.chars().next().is_some_and(char::is_uppercase)
}

/// Resolve the display name, or an empty string when neither tier finds one
pub fn resolve_name(text: &str, hints: &[EntityHint]) -> String {
    name_from_entities(hints)
        .or_else(|| name_from_leading_lines(text))
        .unwrap_or_default()
}
