//! Education and experience section extraction
//!
//! Each section is read by a small line scanner with two states. A header
//! line (one containing a start keyword) switches the scanner to
//! [`CaptureState::Capturing`]; a line naming a different section switches it
//! back. While capturing, every line longer than three characters is kept.
//! Independently of the state, a per-section recovery rule picks up lines
//! outside any labelled block: degree mentions for education, dated lines for
//! experience. Degree keywords match as plain substrings, so short ones such
//! as `be` and `me` also fire inside ordinary words.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const DEGREE_KEYWORDS: &[&str] = &[
    "b.tech", "m.tech", "b.e", "m.e", "bsc", "msc", "b.sc", "m.sc", "bca", "mca", "bba", "mba",
    "phd", "ph.d", "bachelor", "master", "diploma", "10th", "12th", "b.com", "m.com", "be", "me",
    "b.a", "m.a", "llb", "mbbs", "engineering",
];

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

/// Minimum length (exclusive) of a line kept while capturing
const MIN_CAPTURED_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    NotCapturing,
    Capturing,
}

/// Line-level rule that keeps a line regardless of capture state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryRule {
    /// Line mentions a degree or qualification
    DegreeKeyword { max_chars: usize },
    /// Line contains a year between 1900 and 2099
    YearToken { max_chars: usize },
}

impl RecoveryRule {
    pub fn matches(&self, line: &str) -> bool {
        match *self {
            RecoveryRule::DegreeKeyword { max_chars } => {
                line.chars().count() < max_chars
                    && SectionScanner::contains_any(&line.to_lowercase(), DEGREE_KEYWORDS)
            }
            RecoveryRule::YearToken { max_chars } => {
                line.chars().count() < max_chars && YEAR_REGEX.is_match(line)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionRules {
    pub name: &'static str,
    pub start_keywords: &'static [&'static str],
    pub stop_keywords: &'static [&'static str],
    pub recovery: RecoveryRule,
    /// Whether header lines are also offered to the recovery rule
    pub recover_headers: bool,
    pub cap: usize,
}

pub const EDUCATION_RULES: SectionRules = SectionRules {
    name: "education",
    start_keywords: &["education", "academic", "qualification", "schooling"],
    stop_keywords: &["experience", "project", "skill", "certification", "work", "employment"],
    recovery: RecoveryRule::DegreeKeyword { max_chars: 200 },
    recover_headers: false,
    cap: 6,
};

pub const EXPERIENCE_RULES: SectionRules = SectionRules {
    name: "experience",
    start_keywords: &["experience", "employment", "work history", "career", "professional"],
    stop_keywords: &["education", "skill", "project", "certification", "academic"],
    recovery: RecoveryRule::YearToken { max_chars: 120 },
    recover_headers: true,
    cap: 10,
};

/// What the scanner did with a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line, ignored
    Blank,
    /// Section header; consumed, capture starts on the next line
    Header,
    /// Section header that the recovery rule also kept
    RecoveredHeader,
    /// Kept because the scanner is capturing
    Captured,
    /// Kept by the recovery rule
    Recovered,
    /// Not kept
    Skipped,
}

pub struct SectionScanner<'a> {
    rules: &'a SectionRules,
    state: CaptureState,
    lines: Vec<String>,
}

impl<'a> SectionScanner<'a> {
    pub fn new(rules: &'a SectionRules) -> Self {
        Self {
            rules,
            state: CaptureState::NotCapturing,
            lines: Vec::new(),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    fn contains_any(line: &str, keywords: &[&str]) -> bool {
        keywords.iter().any(|kw| line.contains(kw))
    }

    fn keep(&mut self, line: &str) {
        if !self.lines.iter().any(|l| l == line) {
            self.lines.push(line.to_string());
        }
    }

    /// Advance the scanner by one raw line
    pub fn feed(&mut self, raw_line: &str) -> LineOutcome {
        let line = raw_line.trim();
        if line.is_empty() {
            return LineOutcome::Blank;
        }
        let lowered = line.to_lowercase();

        if Self::contains_any(&lowered, self.rules.start_keywords) {
            self.state = CaptureState::Capturing;
            if self.rules.recover_headers && self.rules.recovery.matches(line) {
                self.keep(line);
                return LineOutcome::RecoveredHeader;
            }
            return LineOutcome::Header;
        }

        if self.state == CaptureState::Capturing
            && Self::contains_any(&lowered, self.rules.stop_keywords)
        {
            self.state = CaptureState::NotCapturing;
        }

        if self.state == CaptureState::Capturing && line.chars().count() > MIN_CAPTURED_CHARS {
            self.lines.push(line.to_string());
            LineOutcome::Captured
        } else if self.rules.recovery.matches(line) {
            self.keep(line);
            LineOutcome::Recovered
        } else {
            LineOutcome::Skipped
        }
    }

    /// Deduplicate in first-seen order and apply the section cap
    pub fn finish(self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut result: Vec<String> = self
            .lines
            .into_iter()
            .filter(|line| seen.insert(line.clone()))
            .collect();
        result.truncate(self.rules.cap);
        result
    }
}

pub fn extract_section(text: &str, rules: &SectionRules) -> Vec<String> {
    let mut scanner = SectionScanner::new(rules);
    for line in text.split('\n') {
        scanner.feed(line);
    }
    scanner.finish()
}

pub fn extract_education(text: &str) -> Vec<String> {
    extract_section(text, &EDUCATION_RULES)
}

pub fn extract_experience(text: &str) -> Vec<String> {
    extract_section(text, &EXPERIENCE_RULES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_capture_stops_at_next_section() {
        let text = "EDUCATION\nB.Tech CS\nEXPERIENCE\nInitech 2020-2022";
        assert_eq!(extract_education(text), vec!["B.Tech CS"]);
    }

    #[test]
    fn test_experience_block_capture() {
        let text = "Summary\nBackend engineer\n\nWork Experience\nSenior Engineer at Initech\nBuilt billing services\nEducation\nB.Sc Physics";
        assert_eq!(
            extract_experience(text),
            vec!["Senior Engineer at Initech", "Built billing services"]
        );
    }

    #[test]
    fn test_year_recovery_without_header() {
        let text = "Jane Doe\nAcme Corp, 2021 - 2023\nLoves hiking";
        assert_eq!(extract_experience(text), vec!["Acme Corp, 2021 - 2023"]);
    }

    #[test]
    fn test_year_recovery_respects_length_limit() {
        let long_line = format!("Acme Corp 2021 {}", "x".repeat(120));
        assert!(extract_experience(&long_line).is_empty());
    }

    #[test]
    fn test_year_token_range() {
        let rule = EXPERIENCE_RULES.recovery;
        assert!(rule.matches("Joined in 1999"));
        assert!(rule.matches("2099 plans"));
        assert!(!rule.matches("Room 2150"));
        assert!(!rule.matches("Order 120201"));
    }

    #[test]
    fn test_degree_recovery_outside_section() {
        let text = "Jane Doe\nMBA, Wharton\nSkills\nPython";
        assert_eq!(extract_education(text), vec!["MBA, Wharton"]);
    }

    #[test]
    fn test_bare_degree_abbreviation_recovered() {
        let text = "Priya Raman\nBE (CSE), Anna University\nSkills\nPython";
        assert_eq!(extract_education(text), vec!["BE (CSE), Anna University"]);
    }

    #[test]
    fn test_degree_keywords_match_as_substrings() {
        let rule = EDUCATION_RULES.recovery;
        assert!(rule.matches("Bachelor's in Economics"));
        assert!(rule.matches("Masters of Science"));
        assert!(rule.matches("Completed 12th grade"));
        assert!(rule.matches("ME Mechanical"));
        assert!(rule.matches("Member of the chess club"));
        assert!(rule.matches("Acme Corp 2020-2022"));
        assert!(!rule.matches("Python, Go, Rust"));
    }

    #[test]
    fn test_degree_rule_skips_education_headers() {
        let mut scanner = SectionScanner::new(&EDUCATION_RULES);
        assert_eq!(scanner.feed("Academic Background (B.Tech)"), LineOutcome::Header);
        assert!(scanner.finish().is_empty());
    }

    #[test]
    fn test_dated_experience_header_is_recovered() {
        let text = "Jane Doe\nProfessional Experience (2019 - 2023)\nBuilt billing services";
        assert_eq!(
            extract_experience(text),
            vec!["Professional Experience (2019 - 2023)", "Built billing services"]
        );

        let mut scanner = SectionScanner::new(&EXPERIENCE_RULES);
        assert_eq!(
            scanner.feed("Senior Consultant, Professional Services, 2019-2022"),
            LineOutcome::RecoveredHeader
        );
        assert_eq!(scanner.state(), CaptureState::Capturing);
        assert_eq!(scanner.feed("Work Experience"), LineOutcome::Header);
    }

    #[test]
    fn test_header_line_is_consumed() {
        let mut scanner = SectionScanner::new(&EDUCATION_RULES);
        assert_eq!(scanner.feed("Education & Qualifications"), LineOutcome::Header);
        assert_eq!(scanner.state(), CaptureState::Capturing);
        assert_eq!(scanner.feed("   "), LineOutcome::Blank);
        assert_eq!(scanner.feed("State University"), LineOutcome::Captured);
        assert_eq!(scanner.feed("Projects"), LineOutcome::Skipped);
        assert_eq!(scanner.state(), CaptureState::NotCapturing);
        assert_eq!(scanner.finish(), vec!["State University"]);
    }

    #[test]
    fn test_short_lines_not_captured() {
        let mut scanner = SectionScanner::new(&EXPERIENCE_RULES);
        scanner.feed("Experience");
        assert_eq!(scanner.feed("n/a"), LineOutcome::Skipped);
        assert!(scanner.finish().is_empty());
    }

    #[test]
    fn test_recovery_applies_while_capturing_short_lines() {
        let mut scanner = SectionScanner::new(&EDUCATION_RULES);
        scanner.feed("Education");
        assert_eq!(scanner.feed("MBA"), LineOutcome::Recovered);
        assert_eq!(scanner.finish(), vec!["MBA"]);
    }

    #[test]
    fn test_education_cap_keeps_first_six() {
        let lines: Vec<String> = (1..=20).map(|i| format!("Diploma course number {}", i)).collect();
        let result = extract_education(&lines.join("\n"));
        assert_eq!(result.len(), 6);
        assert_eq!(result, lines[..6].to_vec());
    }

    #[test]
    fn test_experience_cap_and_dedup() {
        let mut lines = vec!["Experience".to_string()];
        for i in 0..15 {
            lines.push(format!("Role {} at Company", i));
            lines.push(format!("Role {} at Company", i));
        }
        let result = extract_experience(&lines.join("\n"));
        assert_eq!(result.len(), 10);
        assert_eq!(result[0], "Role 0 at Company");
        assert_eq!(result[9], "Role 9 at Company");
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_education("").is_empty());
        assert!(extract_experience("").is_empty());
    }
}
