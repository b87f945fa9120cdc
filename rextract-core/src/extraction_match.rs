// rextract-core/src/extraction_match.rs
//! Data structures and logging helpers for extraction results.
//!
//! Extracted values often come out of logs or system files that carry
//! sensitive content, so debug logging of matched text is elided unless
//! explicitly allowed via `REXTRACT_ALLOW_DEBUG_CONTENT`.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Initialized once to decide whether matched content may appear in
    /// debug logs.
    static ref CONTENT_DEBUG_ALLOWED: bool = {
        std::env::var("REXTRACT_ALLOW_DEBUG_CONTENT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Record of one successful extraction: which query matched, where, and what
/// it rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExtractionMatch {
    pub query_name: String,
    /// The expanded output value.
    pub value: String,
    /// The whole-match text of the selected occurrence.
    pub whole_match: String,
    /// 1-based line number of the selected occurrence.
    pub line_number: u64,
    /// Which match occurrence (1-based) was selected.
    pub occurrence: u64,
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Replacement text for content that must not reach the logs.
pub fn elide_content(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[ELIDED]".to_string()
    } else {
        format!("[ELIDED: {} chars]", s.len())
    }
}

fn loggable(content: &str) -> String {
    if *CONTENT_DEBUG_ALLOWED {
        content.to_string()
    } else {
        elide_content(content)
    }
}

pub fn log_extraction_debug(module_path: &str, query_name: &str, value: &str, line_number: u64) {
    debug!(
        "{} Extracted value for query '{}' at line {}: '{}'",
        module_path,
        query_name,
        line_number,
        loggable(value)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elide_content_short_string() {
        assert_eq!(elide_content("abc"), "[ELIDED]".to_string());
    }

    #[test]
    fn elide_content_long_string() {
        assert_eq!(elide_content("123456789"), "[ELIDED: 9 chars]".to_string());
    }
}
