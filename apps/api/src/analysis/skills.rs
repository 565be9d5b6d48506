//! Finds known skill keywords in free resume text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// The fixed skill vocabulary. Multi-word entries match literally.
pub const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "sql",
    "excel",
    "tableau",
    "powerbi",
    "django",
    "tensorflow",
    "pytorch",
    "machine learning",
    "deep learning",
    "rest api",
    "docker",
    "mysql",
    "pandas",
    "numpy",
];

static SKILL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = SKILL_KEYWORDS.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
        .expect("skill vocabulary is a valid regex")
});

/// Returns every vocabulary skill appearing in `text` as a whole word, case-insensitively.
/// Each skill appears once, lower-cased, in alphabetical order.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    SKILL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
