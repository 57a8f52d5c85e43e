//! Completeness scoring

use crate::processing::record::CandidateFields;
use serde::{Deserialize, Serialize};

/// Name, email, phone, skills, education, experience
pub const TRACKED_FIELD_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Strong,
    Partial,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            70..=u8::MAX => ScoreBand::Strong,
            40..=69 => ScoreBand::Partial,
            _ => ScoreBand::Weak,
        }
    }
}

pub fn filled_field_count(fields: &CandidateFields) -> usize {
    [
        !fields.name.is_empty(),
        !fields.email.is_empty(),
        !fields.phone.is_empty(),
        !fields.skills.is_empty(),
        !fields.education.is_empty(),
        !fields.experience.is_empty(),
    ]
    .into_iter()
    .filter(|filled| *filled)
    .count()
}

/// `round(100 * filled / 6)`, always in 0..=100
pub fn completeness_score(fields: &CandidateFields) -> u8 {
    let filled = filled_field_count(fields) as f64;
    (100.0 * filled / TRACKED_FIELD_COUNT as f64).round() as u8
}
