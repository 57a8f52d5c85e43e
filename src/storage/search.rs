//! Candidate search and database summaries

use crate::processing::ParsedResume;
use std::collections::HashMap;

const TOP_SKILLS_LIMIT: usize = 15;

/// Criteria for narrowing stored candidates. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring of the name or email
    pub query: Option<String>,
    /// Case-insensitive substring of any skill
    pub skill: Option<String>,
    /// Minimum completeness score; 0 disables
    pub min_score: u8,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn is_empty(&self) -> bool {
        needle(&self.query).is_none() && needle(&self.skill).is_none() && self.min_score == 0
    }

    pub fn matches(&self, record: &ParsedResume) -> bool {
        if let Some(q) = needle(&self.query) {
            if !record.name().to_lowercase().contains(&q) && !record.email().to_lowercase().contains(&q) {
                return false;
            }
        }

        if let Some(s) = needle(&self.skill) {
            if !record.skills().iter().any(|skill| skill.to_lowercase().contains(&s)) {
                return false;
            }
        }

        self.min_score == 0 || record.score() >= self.min_score
    }

    /// Keep matching records, preserving order
    pub fn apply<'a>(&self, records: &'a [ParsedResume]) -> Vec<&'a ParsedResume> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Blank criteria count as unset
fn needle(criterion: &Option<String>) -> Option<String> {
    criterion
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSummary {
    /// Mean number of skills per record, rounded
    pub average_skills: usize,
    pub top_skill: Option<String>,
    /// Most common skills with their record counts, most frequent first
    pub top_skills: Vec<(String, usize)>,
}

impl SkillSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ParsedResume>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut record_count = 0usize;
        let mut skill_total = 0usize;

        for record in records {
            record_count += 1;
            skill_total += record.skills().len();
            for skill in record.skills() {
                *counts.entry(skill.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(skill, count)| (skill.to_string(), count))
            .collect();
        // ties broken alphabetically so the ranking is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(TOP_SKILLS_LIMIT);

        let average_skills = if record_count == 0 {
            0
        } else {
            (skill_total as f64 / record_count as f64).round() as usize
        };

        Self {
            average_skills,
            top_skill: ranked.first().map(|(skill, _)| skill.clone()),
            top_skills: ranked,
        }
    }
}
