//! Fixed-vocabulary skill matching

use crate::error::{Result, ResumeParserError};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::BTreeSet;

/// Technology terms recognised in resumes, stored lower-case.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Languages
    "python", "java", "javascript", "typescript", "c++", "c#", "c", "ruby", "go", "rust",
    "kotlin", "swift", "php", "scala", "r", "matlab", "perl", "bash", "shell", "dart", "lua",
    "haskell", "elixir", "clojure",
    // Web
    "html", "css", "react", "angular", "vue", "next.js", "nuxt", "svelte", "jquery",
    "bootstrap", "tailwind", "sass", "less", "webpack", "vite", "node.js", "express",
    "django", "flask", "fastapi", "spring", "rails", "asp.net", "laravel", "gatsby", "remix",
    "redux",
    // Data / ML / AI
    "machine learning", "deep learning", "nlp", "computer vision", "tensorflow", "pytorch",
    "keras", "scikit-learn", "pandas", "numpy", "matplotlib", "seaborn", "plotly", "opencv",
    "huggingface", "langchain", "openai", "transformers", "xgboost", "lightgbm",
    "random forest", "neural network", "data analysis", "data science",
    "feature engineering", "model deployment",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "redis", "sqlite", "cassandra", "oracle",
    "dynamodb", "firebase", "elasticsearch", "neo4j", "influxdb", "supabase", "snowflake",
    "bigquery", "databricks",
    // Cloud / DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "jenkins", "ci/cd",
    "github actions", "linux", "nginx", "apache", "heroku", "vercel", "netlify", "cloudflare",
    "helm", "openshift",
    // Tools
    "git", "github", "gitlab", "bitbucket", "jira", "confluence", "figma", "postman",
    "swagger", "grafana", "prometheus", "airflow", "spark", "hadoop", "kafka", "rabbitmq",
    "celery", "selenium", "jest", "cypress", "pytest", "junit",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin",
    // Other
    "rest api", "graphql", "microservices", "agile", "scrum", "devops", "mlops", "llm",
    "excel", "power bi", "tableau", "looker", "dbt", "kanban",
];

/// Matches [`SKILL_VOCABULARY`] against free text on whole-token boundaries
pub struct SkillMatcher {
    automaton: AhoCorasick,
}

impl SkillMatcher {
    pub fn new() -> Result<Self> {
        // Overlapping search needs the standard match semantics; "react" and
        // "react native" must both be reported when both occur.
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(SKILL_VOCABULARY)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { automaton })
    }

    /// Canonical labels of every skill found in `text`, sorted and unique
    pub fn find_skills(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut found = BTreeSet::new();

        for mat in self.automaton.find_overlapping_iter(&lowered) {
            if is_token_bounded(&lowered, mat.start(), mat.end()) {
                found.insert(title_case(SKILL_VOCABULARY[mat.pattern().as_usize()]));
            }
        }

        found.into_iter().collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        SKILL_VOCABULARY.len()
    }
}

/// Every label [`SkillMatcher::find_skills`] can produce
pub fn canonical_vocabulary() -> BTreeSet<String> {
    SKILL_VOCABULARY.iter().map(|term| title_case(term)).collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when the span is not glued to a neighbouring word character
fn is_token_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Upper-case every letter that follows a non-letter, lower-case the rest.
///
/// `"node.js"` becomes `"Node.Js"`, `"ci/cd"` becomes `"Ci/Cd"`.
pub fn title_case(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut prev_alpha = false;
    for c in term.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new().unwrap()
    }

    #[test]
    fn test_finds_multi_word_and_single_word_terms() {
        let skills = matcher().find_skills("Built ML pipelines in Python using Machine Learning and AWS.");
        assert_eq!(skills, vec!["Aws", "Machine Learning", "Python"]);
    }

    #[test]
    fn test_single_letter_term_respects_word_boundaries() {
        let m = matcher();
        assert!(!m.find_skills("Experienced programmer, love your work").contains(&"R".to_string()));
        assert!(m.find_skills("Languages: Python, R, SQL").contains(&"R".to_string()));
        assert!(m.find_skills("(r)").contains(&"R".to_string()));
    }

    #[test]
    fn test_output_sorted_and_deduplicated() {
        let skills = matcher().find_skills("docker DOCKER Docker kubernetes docker");
        assert_eq!(skills, vec!["Docker", "Kubernetes"]);
    }

    #[test]
    fn test_symbolic_terms() {
        let skills = matcher().find_skills("Stack: C++, C#, Node.js, CI/CD with GitHub Actions");
        assert!(skills.contains(&"C++".to_string()));
        assert!(skills.contains(&"C#".to_string()));
        assert!(skills.contains(&"Node.Js".to_string()));
        assert!(skills.contains(&"Ci/Cd".to_string()));
        assert!(skills.contains(&"Github Actions".to_string()));
        assert!(skills.contains(&"Github".to_string()));
    }

    #[test]
    fn test_overlapping_terms_both_reported() {
        let skills = matcher().find_skills("Mobile apps with React Native");
        assert!(skills.contains(&"React".to_string()));
        assert!(skills.contains(&"React Native".to_string()));
    }

    #[test]
    fn test_every_match_is_in_vocabulary() {
        let vocabulary = canonical_vocabulary();
        let text = "Python pandas numpy Tableau Power BI sql Neo4j scikit-learn golang gopher";
        for skill in matcher().find_skills(text) {
            assert!(vocabulary.contains(&skill), "unexpected label {}", skill);
        }
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(matcher().find_skills("").is_empty());
        assert!(matcher().find_skills("Gardening and cooking").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("scikit-learn"), "Scikit-Learn");
        assert_eq!(title_case("neo4j"), "Neo4J");
        assert_eq!(title_case("power bi"), "Power Bi");
        assert_eq!(title_case("c++"), "C++");
    }

    #[test]
    fn test_vocabulary_is_large_and_unique() {
        let unique: BTreeSet<_> = SKILL_VOCABULARY.iter().collect();
        assert_eq!(unique.len(), SKILL_VOCABULARY.len());
        assert!(matcher().vocabulary_size() >= 150);
    }
}
