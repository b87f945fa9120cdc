//! Output-template expansion with backreference substitution.
//!
//! A template is a plain string mixing literal text with backreference tokens:
//! `\0` stands for the whole regex match, `\1`..`\9` for numbered capture
//! groups, and `\\N` for a literal backslash followed by the digit `N`. Any
//! other backslash sequence makes the template invalid as a whole, in which
//! case expansion degrades to the whole-match text rather than failing.
//!
//! License: MIT OR Apache-2.0

use regex::Captures;

/// A match decomposed into the whole matched text and its capture groups.
///
/// `groups[i]` corresponds to capture group `i + 1` and is `None` when the
/// group did not participate in the match (e.g. an unmatched alternation
/// branch). This keeps "matched but empty" distinguishable from "did not
/// participate".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'t> {
    whole: &'t str,
    groups: Vec<Option<&'t str>>,
}

impl<'t> MatchResult<'t> {
    pub fn new(whole: &'t str, groups: Vec<Option<&'t str>>) -> Self {
        Self { whole, groups }
    }

    /// Builds a `MatchResult` from the captures of a `regex` crate match.
    pub fn from_captures(caps: &Captures<'t>) -> Self {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let groups = (1..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str()))
            .collect();
        Self { whole, groups }
    }

    /// The whole matched text (`\0`).
    pub fn whole(&self) -> &'t str {
        self.whole
    }

    /// Capture group `n` (1-indexed). `None` if the group does not exist in
    /// the pattern or did not participate in the match.
    pub fn group(&self, n: usize) -> Option<&'t str> {
        if n == 0 {
            return Some(self.whole);
        }
        self.groups.get(n - 1).copied().flatten()
    }
}

/// Outcome of expanding a template against a match.
///
/// Both variants are successes at the boundary; the distinction only records
/// whether the template was rendered token by token or degraded because it
/// was malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// The template was valid and rendered via substitution.
    Rendered(String),
    /// The template was malformed; the whole-match text is returned instead.
    Fallback(String),
}

impl Expansion {
    pub fn into_string(self) -> String {
        match self {
            Expansion::Rendered(s) | Expansion::Fallback(s) => s,
        }
    }
}

/// One token of a parsed output template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// A run of literal text, copied verbatim.
    Literal(&'a str),
    /// `\N`: substitute the whole match (0) or capture group `N`.
    Backref(u8),
    /// `\\N`: emit a literal backslash followed by the digit.
    EscapedDigit(char),
}

/// Parses a template into tokens with a forward scan over three states
/// (literal, backslash seen, double backslash seen). Returns `None` when the
/// template contains a backslash sequence that is neither `\N` nor `\\N`,
/// including a trailing lone backslash.
fn tokenize(template: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut chars = template.char_indices().peekable();
    let mut run_start = 0;

    while let Some((idx, ch)) = chars.next() {
        if ch != '\\' {
            continue;
        }
        if run_start < idx {
            tokens.push(Token::Literal(&template[run_start..idx]));
        }
        match chars.next() {
            Some((_, d)) if d.is_ascii_digit() => {
                tokens.push(Token::Backref(d as u8 - b'0'));
            }
            Some((_, '\\')) => match chars.next() {
                Some((_, d)) if d.is_ascii_digit() => {
                    tokens.push(Token::EscapedDigit(d));
                }
                _ => return None,
            },
            _ => return None,
        }
        run_start = chars.peek().map_or(template.len(), |&(i, _)| i);
    }
    if run_start < template.len() {
        tokens.push(Token::Literal(&template[run_start..]));
    }
    Some(tokens)
}

/// Expands `template` against a match found in `text`.
///
/// An empty template short-circuits to the full input text (terminator
/// included when the caller kept it), bypassing token parsing entirely. A
/// malformed template degrades to the whole-match text. Out-of-range and
/// non-participating backreferences substitute the empty string. Expansion
/// never fails.
pub fn expand(text: &str, m: &MatchResult<'_>, template: &str) -> Expansion {
    if template.is_empty() {
        return Expansion::Rendered(text.to_owned());
    }
    let tokens = match tokenize(template) {
        Some(tokens) => tokens,
        None => return Expansion::Fallback(m.whole().to_owned()),
    };
    let mut out = String::with_capacity(template.len());
    for token in tokens {
        match token {
            Token::Literal(run) => out.push_str(run),
            Token::Backref(n) => out.push_str(m.group(n as usize).unwrap_or("")),
            Token::EscapedDigit(d) => {
                out.push('\\');
                out.push(d);
            }
        }
    }
    Expansion::Rendered(out)
}

/// Scans a template for the backreference numbers it substitutes.
///
/// Used by config validation to flag references beyond a pattern's group
/// count. Returns `None` for malformed templates, which are legal at runtime
/// (they degrade to whole-match output) but worth a warning at load time.
pub fn referenced_groups(template: &str) -> Option<Vec<u8>> {
    tokenize(template).map(|tokens| {
        tokens
            .into_iter()
            .filter_map(|t| match t {
                Token::Backref(n) => Some(n),
                _ => None,
            })
            .collect()
    })
}
