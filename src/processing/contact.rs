//! Contact handle extraction (email, phone, LinkedIn, GitHub)
//!
//! Every extractor returns the first match in the document, or an empty
//! string when nothing matches.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

static LINKEDIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w\-]+").expect("valid linkedin regex"));

static GITHUB_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)github\.com/[\w\-]+").expect("valid github regex"));

/// Phone patterns in priority order; the first pattern that matches anywhere wins.
static PHONE_PATTERNS: LazyLock<Vec<PhonePattern>> = LazyLock::new(|| {
    vec![
        PhonePattern {
            kind: PhoneKind::Mobile,
            regex: Regex::new(r"(?:\+91[\s\-]?)?[6-9]\d{9}").expect("valid mobile phone regex"),
        },
        PhonePattern {
            kind: PhoneKind::International,
            regex: Regex::new(r"\+?\d[\d\s\-\(\)]{8,15}\d").expect("valid international phone regex"),
        },
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneKind {
    /// Ten digits starting 6-9, optionally prefixed with +91
    Mobile,
    /// Optional `+`, then 10 to 17 digits/separators
    International,
}

pub struct PhonePattern {
    pub kind: PhoneKind,
    pub regex: Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMatch {
    pub kind: PhoneKind,
    pub value: String,
}

/// Ordered phone patterns, highest priority first
pub fn phone_patterns() -> &'static [PhonePattern] {
    &PHONE_PATTERNS
}

pub fn extract_email(text: &str) -> String {
    EMAIL_REGEX
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First phone number by pattern priority, with the pattern that produced it
pub fn find_phone(text: &str) -> Option<PhoneMatch> {
    PHONE_PATTERNS.iter().find_map(|pattern| {
        pattern.regex.find(text).map(|m| PhoneMatch {
            kind: pattern.kind,
            value: m.as_str().trim().to_string(),
        })
    })
}

pub fn extract_phone(text: &str) -> String {
    find_phone(text).map(|m| m.value).unwrap_or_default()
}

pub fn extract_linkedin(text: &str) -> String {
    absolute_url(&LINKEDIN_REGEX, text)
}

pub fn extract_github(text: &str) -> String {
    absolute_url(&GITHUB_REGEX, text)
}

fn absolute_url(regex: &Regex, text: &str) -> String {
    regex
        .find(text)
        .map(|m| format!("https://{}", m.as_str()))
        .unwrap_or_default()
}
