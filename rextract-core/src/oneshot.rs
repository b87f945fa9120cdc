// rextract-core/src/oneshot.rs

//! `oneshot.rs`
//! Convenience wrapper for a full, one-shot extraction without building a
//! `QueryConfig`: compile one pattern, decode, select, expand. This is the
//! path the CLI uses when a pattern is given directly on the command line.

use regex::RegexBuilder;

use crate::config::MAX_PATTERN_LENGTH;
use crate::decode::decode;
use crate::errors::ExtractError;
use crate::lines::split_lines;
use crate::selector::{select_match, OccurrenceWindow, Selection};

/// Extracts a single value from `raw` bytes.
///
/// # Arguments
///
/// * `raw` - The undecoded source content.
/// * `pattern` - The regular expression to match per line.
/// * `encoding` - Encoding label of `raw`; empty means UTF-8.
/// * `start` / `end` - The 1-indexed, inclusive occurrence window.
/// * `template` - The output template; empty returns the whole matching line.
///
/// `Ok(None)` means no occurrence fell inside the window; errors are limited
/// to an invalid pattern or undecodable input.
pub fn extract_once(
    raw: &[u8],
    pattern: &str,
    encoding: &str,
    start: Option<u64>,
    end: Option<u64>,
    template: &str,
) -> Result<Option<String>, ExtractError> {
    Ok(extract_selection(raw, pattern, encoding, start, end, template)?.map(|s| s.value))
}

/// Like [`extract_once`], but returns the full [`Selection`] (line number,
/// occurrence index, whole-match text) for callers that report context.
pub fn extract_selection(
    raw: &[u8],
    pattern: &str,
    encoding: &str,
    start: Option<u64>,
    end: Option<u64>,
    template: &str,
) -> Result<Option<Selection>, ExtractError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(ExtractError::PatternLengthExceeded(
            "<ad hoc>".to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }
    let regex = RegexBuilder::new(pattern)
        .size_limit(10 * (1 << 20))
        .build()
        .map_err(|e| ExtractError::PatternCompilation("<ad hoc>".to_string(), e))?;

    let text = decode(raw, encoding)?;
    Ok(select_match(
        split_lines(&text),
        &regex,
        OccurrenceWindow::new(start, end),
        template,
    ))
}
