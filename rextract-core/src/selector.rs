//! Occurrence counting and selection over an ordered sequence of lines.
//!
//! The selector walks decoded lines in file order, counts the lines on which
//! the pattern matches (one occurrence per line, first match only), and picks
//! the first occurrence that falls inside an inclusive 1-indexed window. The
//! selected occurrence is rendered through the template expander. Every input
//! combination yields a well-defined outcome; an empty window or a window
//! past the last match is simply "no match", never an error.
//!
//! License: MIT OR Apache-2.0

use log::{debug, trace};
use regex::Regex;

use crate::template::{expand, MatchResult};

/// An inclusive, 1-indexed range of match occurrences. `None` on either side
/// means unbounded. A window where `start > end` cannot contain any
/// occurrence and selects nothing; it is not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OccurrenceWindow {
    pub start: Option<u64>,
    pub end: Option<u64>,
}

impl OccurrenceWindow {
    /// The window that selects the first occurrence in the input.
    pub const UNBOUNDED: Self = Self { start: None, end: None };

    pub fn new(start: Option<u64>, end: Option<u64>) -> Self {
        Self { start, end }
    }

    fn contains(&self, occurrence: u64) -> bool {
        self.start.map_or(true, |s| occurrence >= s) && self.end.map_or(true, |e| occurrence <= e)
    }

    fn is_past(&self, occurrence: u64) -> bool {
        self.end.map_or(false, |e| occurrence > e)
    }
}

/// The occurrence picked by [`select_match`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The expanded output for the selected occurrence.
    pub value: String,
    /// The whole-match text of the selected occurrence.
    pub whole_match: String,
    /// 1-based position of the selected line in the input sequence.
    pub line_number: u64,
    /// Which occurrence (1-based) was selected.
    pub occurrence: u64,
}

/// Scans `lines` in order and returns the first occurrence inside `window`,
/// rendered through `template`. Lines are taken exactly as supplied; the
/// selector never re-splits or re-joins them, so a pattern embedding a line
/// terminator only matches if the caller kept terminators in its units.
///
/// Scanning stops at the first selected occurrence, or early once the
/// occurrence count exceeds the window's end bound.
pub fn select_match<'a, I>(
    lines: I,
    pattern: &Regex,
    window: OccurrenceWindow,
    template: &str,
) -> Option<Selection>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut occurrence = 0u64;
    for (idx, line) in lines.into_iter().enumerate() {
        let caps = match pattern.captures(line) {
            Some(caps) => caps,
            None => continue,
        };
        occurrence += 1;
        trace!("occurrence {} at line {}", occurrence, idx + 1);
        if window.contains(occurrence) {
            let m = MatchResult::from_captures(&caps);
            let whole_match = m.whole().to_owned();
            let value = expand(line, &m, template).into_string();
            debug!(
                "selected occurrence {} at line {} ({} byte output)",
                occurrence,
                idx + 1,
                value.len()
            );
            return Some(Selection {
                value,
                whole_match,
                line_number: idx as u64 + 1,
                occurrence,
            });
        }
        if window.is_past(occurrence) {
            debug!("occurrence {} past window end, stopping scan", occurrence);
            return None;
        }
    }
    None
}

/// Single entry point combining occurrence selection and template expansion:
/// the first occurrence inside `[start, end]` (1-indexed, inclusive,
/// unbounded where `None`) is rendered through `template`. `None` means no
/// occurrence fell inside the window.
pub fn extract_match<'a, I>(
    lines: I,
    pattern: &Regex,
    start: Option<u64>,
    end: Option<u64>,
    template: &str,
) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    select_match(lines, pattern, OccurrenceWindow::new(start, end), template).map(|s| s.value)
}
