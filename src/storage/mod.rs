//! Record persistence and candidate search

pub mod store;
pub mod search;

pub use search::{SearchFilter, SkillSummary};
pub use store::{ResumeStore, StoreStats};
