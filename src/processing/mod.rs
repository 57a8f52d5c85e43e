//! Resume field extraction
//!
//! Pure, synchronous extractors over plain document text, composed by
//! [`parser::ResumeParser`].

pub mod skills;
pub mod contact;
pub mod sections;
pub mod names;
pub mod scoring;
pub mod record;
pub mod parser;

pub use parser::{ResumeParser, SourceDocument};
pub use record::{CandidateFields, ParsedResume};
