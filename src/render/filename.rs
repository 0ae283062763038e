//! Output filename construction.

use once_cell::sync::Lazy;
use regex::Regex;

use super::options::DEFAULT_MAX_TITLE_CHARS;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Title used when sanitizing leaves nothing.
pub const UNTITLED: &str = "untitled";

/// Make a title safe for use as a filename component.
///
/// Removes `< > : " / \ | ? *` and control characters, turns whitespace
/// runs into `_`, and truncates to `max_chars` characters.
pub fn sanitize_title(title: &str, max_chars: usize) -> String {
    let kept: String = title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();

    let joined = WHITESPACE_RUN.replace_all(kept.trim(), "_");
    let truncated: String = joined.chars().take(max_chars).collect();

    if truncated.is_empty() {
        UNTITLED.to_string()
    } else {
        truncated
    }
}

/// Filename for a sub-topic: `{chapter}_{index:02}_{sanitized title}.pdf`.
pub fn output_filename(chapter: &str, index: usize, title: &str, max_chars: usize) -> String {
    format!("{}_{:02}_{}.pdf", chapter, index, sanitize_title(title, max_chars))
}

/// Filename with the default title length cap.
pub fn default_output_filename(chapter: &str, index: usize, title: &str) -> String {
    output_filename(chapter, index, title, DEFAULT_MAX_TITLE_CHARS)
}
