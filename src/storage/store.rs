//! SQLite-backed record store

use crate::error::{Result, ResumeParserError};
use crate::processing::{CandidateFields, ParsedResume};
use chrono::{NaiveDateTime, Utc};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// Timestamp layout on disk; lexicographic order equals chronological order
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SELECT_COLUMNS: &str = "id, filename, name, email, phone, linkedin, github, \
     skills, education, experience, score, parsed_at, raw_text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub total: usize,
    /// Mean completeness score, rounded; 0 for an empty store
    pub avg_score: u8,
}

pub struct ResumeStore {
    conn: Connection,
}

impl ResumeStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        info!("Opened resume store at {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS resumes (
                id          TEXT PRIMARY KEY,
                filename    TEXT,
                name        TEXT,
                email       TEXT,
                phone       TEXT,
                linkedin    TEXT,
                github      TEXT,
                skills      TEXT,
                education   TEXT,
                experience  TEXT,
                score       INTEGER,
                parsed_at   TEXT,
                raw_text    TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_resumes_parsed_at ON resumes(parsed_at);
            ",
        )?;
        Ok(Self { conn })
    }

    /// Insert a record, replacing any stored record with the same id
    pub fn upsert(&self, record: &ParsedResume) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO resumes
             (id, filename, name, email, phone, linkedin, github, skills, education, experience, score, parsed_at, raw_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                record.id(),
                record.filename(),
                record.name(),
                record.email(),
                record.phone(),
                record.linkedin(),
                record.github(),
                serde_json::to_string(record.skills())?,
                serde_json::to_string(record.education())?,
                serde_json::to_string(record.experience())?,
                record.score(),
                record.parsed_at().format(TIMESTAMP_FORMAT).to_string(),
                record.raw_text_excerpt(),
            ],
        )?;
        debug!("Stored record {} ({})", record.id(), record.filename());
        Ok(())
    }

    /// Returns whether a record was removed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM resumes WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// Remove every record, returning how many were dropped
    pub fn clear(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM resumes", [])?;
        info!("Cleared {} records from the store", removed);
        Ok(removed)
    }

    /// All records, most recently parsed first
    pub fn list_all(&self) -> Result<Vec<ParsedResume>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM resumes ORDER BY parsed_at DESC, rowid DESC",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map([], StoredRow::from_row)?;
        rows.map(|row| row?.into_record()).collect()
    }

    pub fn get(&self, id: &str) -> Result<Option<ParsedResume>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM resumes WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                StoredRow::from_row,
            )
            .optional()?;

        row.map(StoredRow::into_record).transpose()
    }

    /// Like [`get`](Self::get) but a missing id is an error
    pub fn require(&self, id: &str) -> Result<ParsedResume> {
        self.get(id)?
            .ok_or_else(|| ResumeParserError::NotFound(id.to_string()))
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let (total, avg): (i64, Option<f64>) = self.conn.query_row(
            "SELECT COUNT(*), AVG(score) FROM resumes",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(StoreStats {
            total: total as usize,
            avg_score: avg.unwrap_or(0.0).round() as u8,
        })
    }
}

/// Raw column values of one `resumes` row
struct StoredRow {
    id: String,
    filename: Option<String>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    linkedin: Option<String>,
    github: Option<String>,
    skills: Option<String>,
    education: Option<String>,
    experience: Option<String>,
    parsed_at: Option<String>,
    raw_text: Option<String>,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            filename: row.get(1)?,
            name: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            linkedin: row.get(5)?,
            github: row.get(6)?,
            skills: row.get(7)?,
            education: row.get(8)?,
            experience: row.get(9)?,
            // column 10 (score) is derived from the fields and never read back
            parsed_at: row.get(11)?,
            raw_text: row.get(12)?,
        })
    }

    fn into_record(self) -> Result<ParsedResume> {
        let fields = CandidateFields {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            linkedin: self.linkedin.unwrap_or_default(),
            github: self.github.unwrap_or_default(),
            skills: decode_list(self.skills.as_deref())?,
            education: decode_list(self.education.as_deref())?,
            experience: decode_list(self.experience.as_deref())?,
        };

        let parsed_at = match self.parsed_at.as_deref() {
            Some(raw) => NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
                .map_err(|e| {
                    ResumeParserError::InvalidInput(format!(
                        "Record {} has a malformed timestamp '{}': {}",
                        self.id, raw, e
                    ))
                })?
                .and_utc(),
            None => Utc::now(),
        };

        Ok(ParsedResume::new(
            self.id,
            self.filename.unwrap_or_default(),
            fields,
            parsed_at,
            self.raw_text.unwrap_or_default(),
        ))
    }
}

fn decode_list(raw: Option<&str>) -> Result<Vec<String>> {
    match raw {
        Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(json)?),
        _ => Ok(Vec::new()),
    }
}
