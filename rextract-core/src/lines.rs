//! Line segmentation of decoded text.
//!
//! Units keep their trailing terminator (`\n`, including a preceding `\r`),
//! so an empty output template reproduces the matched line exactly as it
//! appears in the file. A final unterminated line is its own unit.
//!
//! License: MIT OR Apache-2.0

/// Splits `text` into line units in file order, terminators preserved.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

/// Returns `line` without its trailing `\n` / `\r\n`, for callers that match
/// against terminator-stripped units.
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
