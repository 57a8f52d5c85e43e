//! Parsed resume record

use crate::processing::scoring::completeness_score;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extracted candidate fields. Empty string / empty list means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
}

impl CandidateFields {
    pub fn is_empty(&self) -> bool {
        self == &CandidateFields::default()
    }
}

/// One structured record per source document.
///
/// Immutable once built; the score is always derived from the fields and
/// is recomputed on construction and deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordData")]
pub struct ParsedResume {
    id: String,
    filename: String,
    #[serde(flatten)]
    fields: CandidateFields,
    score: u8,
    parsed_at: DateTime<Utc>,
    raw_text_excerpt: String,
}

/// Serialized shape of a record, minus the derived score
#[derive(Deserialize)]
struct RecordData {
    id: String,
    filename: String,
    #[serde(flatten)]
    fields: CandidateFields,
    parsed_at: DateTime<Utc>,
    #[serde(default)]
    raw_text_excerpt: String,
}

impl From<RecordData> for ParsedResume {
    fn from(data: RecordData) -> Self {
        ParsedResume::new(
            data.id,
            data.filename,
            data.fields,
            data.parsed_at,
            data.raw_text_excerpt,
        )
    }
}

impl ParsedResume {
    pub fn new(
        id: String,
        filename: String,
        fields: CandidateFields,
        parsed_at: DateTime<Utc>,
        raw_text_excerpt: String,
    ) -> Self {
        let score = completeness_score(&fields);
        Self {
            id,
            filename,
            fields,
            score,
            parsed_at,
            raw_text_excerpt,
        }
    }

    /// Replacement record with new fields under the same identity
    pub fn with_fields(self, fields: CandidateFields) -> Self {
        Self::new(self.id, self.filename, fields, self.parsed_at, self.raw_text_excerpt)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn fields(&self) -> &CandidateFields {
        &self.fields
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn email(&self) -> &str {
        &self.fields.email
    }

    pub fn phone(&self) -> &str {
        &self.fields.phone
    }

    pub fn linkedin(&self) -> &str {
        &self.fields.linkedin
    }

    pub fn github(&self) -> &str {
        &self.fields.github
    }

    pub fn skills(&self) -> &[String] {
        &self.fields.skills
    }

    pub fn education(&self) -> &[String] {
        &self.fields.education
    }

    pub fn experience(&self) -> &[String] {
        &self.fields.experience
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn parsed_at(&self) -> DateTime<Utc> {
        self.parsed_at
    }

    pub fn raw_text_excerpt(&self) -> &str {
        &self.raw_text_excerpt
    }

    /// Name if resolved, otherwise the source filename
    pub fn display_name(&self) -> &str {
        if self.fields.name.is_empty() {
            &self.filename
        } else {
            &self.fields.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedResume {
        ParsedResume::new(
            "abcd1234".into(),
            "jane.pdf".into(),
            CandidateFields {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                skills: vec!["Rust".into()],
                ..Default::default()
            },
            Utc::now(),
            "Jane Doe\njane@example.com".into(),
        )
    }

    #[test]
    fn test_score_is_derived_on_construction() {
        assert_eq!(sample().score(), 50);
    }

    #[test]
    fn test_with_fields_recomputes_score() {
        let record = sample();
        let id = record.id().to_string();
        let replaced = record.with_fields(CandidateFields::default());
        assert_eq!(replaced.score(), 0);
        assert_eq!(replaced.id(), id);
    }

    #[test]
    fn test_deserialization_ignores_stored_score() {
        let original = sample();
        let mut value = serde_json::to_value(&original).unwrap();
        value["score"] = serde_json::json!(99);

        let restored: ParsedResume = serde_json::from_value(value).unwrap();
        assert_eq!(restored.score(), 50);
        assert_eq!(restored, original);
    }

    #[test]
    fn test_flat_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["skills"][0], "Rust");
        assert_eq!(value["score"], 50);
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_missing_excerpt_defaults_to_empty() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value.as_object_mut().unwrap().remove("raw_text_excerpt");
        let restored: ParsedResume = serde_json::from_value(value).unwrap();
        assert_eq!(restored.raw_text_excerpt(), "");
    }

    #[test]
    fn test_display_name_falls_back_to_filename() {
        let record = sample().with_fields(CandidateFields::default());
        assert_eq!(record.display_name(), "jane.pdf");
    }
}
