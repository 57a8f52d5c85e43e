//! Report projections of parsed records

use crate::config::OutputConfig;
use crate::error::Result;
use crate::processing::ParsedResume;
use serde::Serialize;
use serde_json::Value;

pub const PARSED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How many list entries a tabular row shows per column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    pub skills: usize,
    pub education: usize,
    pub experience: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for DisplayLimits {
    fn from(config: &OutputConfig) -> Self {
        Self {
            skills: config.skills_display,
            education: config.education_display,
            experience: config.experience_display,
        }
    }
}

/// One flattened table row per candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Education")]
    pub education: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde(rename = "Score %")]
    pub score: u8,
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "Parsed At")]
    pub parsed_at: String,
}

impl CandidateRow {
    pub fn from_record(record: &ParsedResume, limits: &DisplayLimits) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
            email: record.email().to_string(),
            phone: record.phone().to_string(),
            skills: join_first(record.skills(), limits.skills, ", "),
            education: join_first(record.education(), limits.education, " | "),
            experience: join_first(record.experience(), limits.experience, " | "),
            score: record.score(),
            file: record.filename().to_string(),
            parsed_at: record.parsed_at().format(PARSED_AT_FORMAT).to_string(),
        }
    }
}

fn join_first(items: &[String], limit: usize, separator: &str) -> String {
    items
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Full JSON form of a record; the source excerpt is dropped unless requested
pub fn record_to_json(record: &ParsedResume, include_raw_text: bool) -> Result<Value> {
    let mut value = serde_json::to_value(record)?;
    if !include_raw_text {
        if let Value::Object(map) = &mut value {
            map.remove("raw_text_excerpt");
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::CandidateFields;
    use chrono::{TimeZone, Utc};

    fn record() -> ParsedResume {
        ParsedResume::new(
            "abcd1234".into(),
            "jane.pdf".into(),
            CandidateFields {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                skills: (1..=10).map(|i| format!("Skill{}", i)).collect(),
                education: vec!["B.Sc 2015".into(), "M.Sc 2017".into(), "PhD 2021".into()],
                experience: vec!["Initech 2018".into()],
                ..Default::default()
            },
            Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap(),
            "Jane Doe".into(),
        )
    }

    #[test]
    fn test_row_projection_truncates_lists() {
        let row = CandidateRow::from_record(&record(), &DisplayLimits::default());
        assert_eq!(
            row.skills,
            "Skill1, Skill2, Skill3, Skill4, Skill5, Skill6, Skill7, Skill8"
        );
        assert_eq!(row.education, "B.Sc 2015 | M.Sc 2017");
        assert_eq!(row.experience, "Initech 2018");
        assert_eq!(row.score, 83);
        assert_eq!(row.parsed_at, "2025-03-04 05:06:07");
    }

    #[test]
    fn test_json_keeps_lists_and_hides_excerpt() {
        let value = record_to_json(&record(), false).unwrap();
        assert_eq!(value["skills"].as_array().unwrap().len(), 10);
        assert_eq!(value["education"][2], "PhD 2021");
        assert!(value.get("raw_text_excerpt").is_none());

        let with_raw = record_to_json(&record(), true).unwrap();
        assert_eq!(with_raw["raw_text_excerpt"], "Jane Doe");
    }
}
