//! Partitioning of the line sequence into sub-topics.
//!
//! Each heading owns the lines strictly between itself and the next heading
//! (or the end of the document). Lines before the first heading belong to
//! no sub-topic and are dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{HeadingMatch, SubTopic};

/// Body length below which a warning is logged.
pub const DEFAULT_SHORT_BODY_WARNING: usize = 200;

/// Word count required of a heading line by [`SegmentOptions::strict_headings`].
pub const STRICT_MIN_HEADING_WORDS: usize = 2;

/// Heading line length cap used by [`SegmentOptions::strict_headings`].
pub const STRICT_MAX_HEADING_CHARS: usize = 120;

/// Capitals-and-spaces runs this long are map labels, not headings.
static MAP_LABEL_CAPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z\s]{15,}$").expect("map label pattern is valid"));

/// Options for segmentation.
///
/// The heading checks validate the whole trimmed heading line (prefix
/// included) and are all off by default.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Drop sub-topics whose body has fewer characters (0 = keep all)
    pub min_body_chars: usize,

    /// Log a warning for bodies shorter than this (0 = never)
    pub short_body_warning: usize,

    /// Drop headings with fewer whitespace-separated words (0 = off)
    pub min_heading_words: usize,

    /// Drop headings longer than this many characters (0 = off)
    pub max_heading_chars: usize,

    /// Drop headings that contain no alphabetic character
    pub require_letter: bool,

    /// Drop headings that look like map labels
    pub reject_map_labels: bool,
}

impl SegmentOptions {
    /// Create default segmentation options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop sub-topics with fewer body characters than `chars`.
    pub fn with_min_body_chars(mut self, chars: usize) -> Self {
        self.min_body_chars = chars;
        self
    }

    /// Set the short-body warning threshold.
    pub fn with_short_body_warning(mut self, chars: usize) -> Self {
        self.short_body_warning = chars;
        self
    }

    /// Drop headings with fewer than `words` words.
    pub fn with_min_heading_words(mut self, words: usize) -> Self {
        self.min_heading_words = words;
        self
    }

    /// Drop headings longer than `chars` characters.
    pub fn with_max_heading_chars(mut self, chars: usize) -> Self {
        self.max_heading_chars = chars;
        self
    }

    /// Enable or disable map-label rejection.
    pub fn with_map_label_rejection(mut self, enabled: bool) -> Self {
        self.reject_map_labels = enabled;
        self
    }

    /// Enable every heading check with the stock thresholds: at least two
    /// words, at most 120 characters, a letter somewhere, no map labels.
    pub fn strict_headings(mut self) -> Self {
        self.min_heading_words = STRICT_MIN_HEADING_WORDS;
        self.max_heading_chars = STRICT_MAX_HEADING_CHARS;
        self.require_letter = true;
        self.reject_map_labels = true;
        self
    }

    /// Why `heading` fails the enabled checks, or `None` if it passes.
    pub fn reject_reason(&self, heading: &str) -> Option<&'static str> {
        let words: Vec<&str> = heading.split_whitespace().collect();

        if words.len() < self.min_heading_words {
            return Some("too few words");
        }
        if self.max_heading_chars > 0 && heading.chars().count() > self.max_heading_chars {
            return Some("too long");
        }
        if self.require_letter && !heading.chars().any(char::is_alphabetic) {
            return Some("no letters");
        }
        if self.reject_map_labels && is_map_label(heading, &words) {
            return Some("map label");
        }
        None
    }
}

/// Spaced capitals (`GUINEA    SOMALILAND`) or three or more short words
/// with no digits (`Aleppo Bukhara Wall`).
fn is_map_label(heading: &str, words: &[&str]) -> bool {
    if MAP_LABEL_CAPS.is_match(heading) {
        return true;
    }
    words.len() >= 3
        && words.iter().all(|w| w.chars().count() < 8)
        && !heading.chars().any(|c| c.is_ascii_digit())
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            min_body_chars: 0,
            short_body_warning: DEFAULT_SHORT_BODY_WARNING,
            min_heading_words: 0,
            max_heading_chars: 0,
            require_letter: false,
            reject_map_labels: false,
        }
    }
}

/// Build sub-topics from lines and the headings detected in them.
///
/// Fails with [`Error::NoSubtopics`] when `headings` is empty. With default
/// options the result has exactly one sub-topic per heading, indexed 1..N.
pub fn segment<S: AsRef<str>>(lines: &[S], headings: &[HeadingMatch]) -> Result<Vec<SubTopic>> {
    segment_with_options(lines, headings, &SegmentOptions::default())
}

/// Build sub-topics with custom options.
///
/// When `min_body_chars` or a heading check drops sections, the survivors
/// are re-indexed so indices still run 1..N without gaps. If every section is dropped the
/// result is [`Error::NoSubtopics`].
pub fn segment_with_options<S: AsRef<str>>(
    lines: &[S],
    headings: &[HeadingMatch],
    options: &SegmentOptions,
) -> Result<Vec<SubTopic>> {
    if headings.is_empty() {
        return Err(Error::NoSubtopics);
    }

    let mut subtopics = Vec::with_capacity(headings.len());

    for (i, heading) in headings.iter().enumerate() {
        let start = (heading.line_index + 1).min(lines.len());
        let end = headings
            .get(i + 1)
            .map(|next| next.line_index)
            .unwrap_or(lines.len())
            .clamp(start, lines.len());

        let body = trim_blank_edges(&lines[start..end]);
        let body_chars: usize = body.iter().map(|l| l.chars().count()).sum();

        if let Some(reason) = options.reject_reason(&heading.raw_text) {
            log::info!("Skipped '{}' ({})", heading.raw_text, reason);
            continue;
        }
        if body_chars < options.min_body_chars {
            log::info!(
                "Skipped '{}' ({} chars < {})",
                heading.title,
                body_chars,
                options.min_body_chars
            );
            continue;
        }
        if body_chars < options.short_body_warning {
            log::warn!(
                "'{}' has minimal content ({} chars)",
                heading.title,
                body_chars
            );
        }

        subtopics.push(SubTopic {
            index: subtopics.len() + 1,
            title: heading.title.clone(),
            body,
            kind: heading.pattern_kind,
            label: heading.label.clone(),
            line_index: heading.line_index,
        });
    }

    if subtopics.is_empty() {
        return Err(Error::NoSubtopics);
    }

    Ok(subtopics)
}

/// Copy a line range, dropping leading and trailing blank lines.
fn trim_blank_edges<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let is_blank = |l: &S| l.as_ref().trim().is_empty();
    let start = match lines.iter().position(|l| !is_blank(l)) {
        Some(start) => start,
        None => return Vec::new(),
    };
    let end = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(start);

    lines[start..=end]
        .iter()
        .map(|l| l.as_ref().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::HeadingDetector;

    fn run(lines: &[&str]) -> Result<Vec<SubTopic>> {
        let headings = HeadingDetector::new().detect_lines(lines);
        segment(lines, &headings)
    }

    #[test]
    fn test_preface_dropped_and_bodies_bounded() {
        let lines = ["Preface text", "1. Intro", "Body A", "2. Next", "Body B"];
        let subtopics = run(&lines).unwrap();

        assert_eq!(subtopics.len(), 2);
        assert_eq!(subtopics[0].index, 1);
        assert_eq!(subtopics[0].title, "Intro");
        assert_eq!(subtopics[0].body, vec!["Body A"]);
        assert_eq!(subtopics[1].index, 2);
        assert_eq!(subtopics[1].title, "Next");
        assert_eq!(subtopics[1].body, vec!["Body B"]);

        for st in &subtopics {
            assert!(st.body.iter().all(|l| !l.contains("Preface")));
        }
    }

    #[test]
    fn test_no_headings_is_error() {
        let lines = ["nothing here", "at all."];
        assert!(matches!(run(&lines), Err(Error::NoSubtopics)));
    }

    #[test]
    fn test_blank_edges_trimmed_inner_breaks_kept() {
        let lines = ["I. Origins", "", "Para one.", "", "Para two.", "", "", "II. Growth"];
        let subtopics = run(&lines).unwrap();
        assert_eq!(subtopics[0].body, vec!["Para one.", "", "Para two."]);
        assert!(subtopics[1].body.is_empty());
    }

    #[test]
    fn test_adjacent_headings_give_empty_body() {
        let lines = ["1. First", "2. Second", "text"];
        let subtopics = run(&lines).unwrap();
        assert!(subtopics[0].body.is_empty());
        assert_eq!(subtopics[1].body, vec!["text"]);
    }

    #[test]
    fn test_count_and_indices_match_headings() {
        let lines = [
            "A. Alpha",
            "x",
            "THE SECOND PART",
            "y",
            "Third Part Here",
            "z",
            "4. Fourth",
        ];
        let headings = HeadingDetector::new().detect_lines(&lines);
        let subtopics = segment(&lines, &headings).unwrap();
        assert_eq!(subtopics.len(), headings.len());
        let indices: Vec<usize> = subtopics.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_heading_line_excluded_from_bodies() {
        let lines = ["1. One", "a", "2. Two", "b"];
        let subtopics = run(&lines).unwrap();
        for st in &subtopics {
            assert!(!st.body.iter().any(|l| l.starts_with("1.") || l.starts_with("2.")));
        }
    }

    #[test]
    fn test_min_body_chars_reindexes() {
        let lines = ["1. Short", "x", "2. Long", "a fairly long body line"];
        let headings = HeadingDetector::new().detect_lines(&lines);
        let options = SegmentOptions::new().with_min_body_chars(5);
        let subtopics = segment_with_options(&lines, &headings, &options).unwrap();

        assert_eq!(subtopics.len(), 1);
        assert_eq!(subtopics[0].index, 1);
        assert_eq!(subtopics[0].title, "Long");
    }

    #[test]
    fn test_min_body_chars_dropping_all_is_error() {
        let lines = ["1. Short", "x"];
        let headings = HeadingDetector::new().detect_lines(&lines);
        let options = SegmentOptions::new().with_min_body_chars(100);
        assert!(matches!(
            segment_with_options(&lines, &headings, &options),
            Err(Error::NoSubtopics)
        ));
    }

    #[test]
    fn test_default_options_check_nothing() {
        let options = SegmentOptions::default();
        assert_eq!(options.reject_reason("World"), None);
        assert_eq!(options.reject_reason("GUINEA    SOMALILAND"), None);
    }

    #[test]
    fn test_strict_heading_checks() {
        let options = SegmentOptions::new().strict_headings();
        assert_eq!(options.reject_reason("World"), Some("too few words"));
        assert_eq!(options.reject_reason(&"Long ".repeat(30)), Some("too long"));
        assert_eq!(options.reject_reason("1. 2."), Some("no letters"));
        assert_eq!(options.reject_reason("GUINEA    SOMALILAND"), Some("map label"));
        assert_eq!(options.reject_reason("Aleppo Bukhara Wall"), Some("map label"));

        assert_eq!(options.reject_reason("I. Origins"), None);
        assert_eq!(options.reject_reason("EARLY KINGDOMS"), None);
        assert_eq!(options.reject_reason("3. The Two Rivers"), None);
        assert_eq!(options.reject_reason("Mediterranean Commerce"), None);
    }

    #[test]
    fn test_strict_headings_drop_and_reindex() {
        let lines = [
            "I. Origins",
            "text about origins",
            "Aleppo Bukhara Wall",
            "map noise",
            "II. Growth",
            "text about growth",
        ];
        let headings = HeadingDetector::new().detect_lines(&lines);
        assert_eq!(headings.len(), 3);

        let options = SegmentOptions::new().strict_headings();
        let subtopics = segment_with_options(&lines, &headings, &options).unwrap();
        let titles: Vec<&str> = subtopics.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Origins", "Growth"]);
        assert_eq!(subtopics[1].index, 2);
    }

    #[test]
    fn test_label_and_kind_carried() {
        let lines = ["III. Decline", "text"];
        let subtopics = run(&lines).unwrap();
        assert_eq!(subtopics[0].label.as_deref(), Some("III"));
        assert_eq!(subtopics[0].kind, crate::model::HeadingKind::Roman);
        assert_eq!(subtopics[0].line_index, 0);
    }
}
