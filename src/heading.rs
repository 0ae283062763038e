//! Regex-based heading detection.
//!
//! Each line is tested against an ordered list of rules and classified by
//! the first rule it satisfies:
//!
//! 1. numbered: `1. Title`
//! 2. roman numeral: `IV. Title`
//! 3. alphabetic: `B. Title`
//! 4. all caps: a 10 to 80 character line of capitals and spaces
//! 5. title case: two or more `Capitalized` words and nothing else
//!
//! Lines are classified without looking at their neighbours. A body
//! sentence such as `Rome Was Not Built` therefore satisfies the title-case
//! rule and becomes a heading. That rule is a tunable heuristic: disable it
//! with [`HeadingConfig::without`] when it produces false positives.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{HeadingKind, HeadingMatch, LineClass};

/// A single heading rule: a kind plus the pattern that recognizes it.
///
/// Prefixed rules capture `label` and `title` groups so the same pattern
/// both classifies the line and strips its numbering.
#[derive(Debug)]
pub struct HeadingRule {
    kind: HeadingKind,
    pattern: Regex,
}

impl HeadingRule {
    fn new(kind: HeadingKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("heading pattern is valid"),
        }
    }

    /// The kind this rule assigns.
    pub fn kind(&self) -> HeadingKind {
        self.kind
    }

    /// Classify a trimmed line, returning `None` when the rule does not apply.
    pub fn apply(&self, line: &str) -> Option<LineClass> {
        let caps = self.pattern.captures(line)?;
        let (label, title) = if self.kind.has_prefix() {
            (
                caps.name("label").map(|m| m.as_str().to_string()),
                caps.name("title")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            )
        } else {
            (None, line.to_string())
        };

        Some(LineClass::Heading {
            kind: self.kind,
            label,
            title,
        })
    }
}

/// The five rules, in priority order.
static RULES: Lazy<Vec<HeadingRule>> = Lazy::new(|| {
    vec![
        HeadingRule::new(
            HeadingKind::Numbered,
            r"^(?P<label>[0-9]+)\.\s+(?P<title>[A-Z].*)$",
        ),
        HeadingRule::new(
            HeadingKind::Roman,
            r"^(?P<label>[IVX]+)\.\s+(?P<title>[A-Z].*)$",
        ),
        HeadingRule::new(
            HeadingKind::Alphabetic,
            r"^(?P<label>[A-Z])\.\s+(?P<title>[A-Z].*)$",
        ),
        // 10 to 80 characters in total: one leading capital plus 9..=79 more.
        HeadingRule::new(HeadingKind::AllCaps, r"^[A-Z][A-Z\s]{9,79}$"),
        HeadingRule::new(
            HeadingKind::TitleCase,
            r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+$",
        ),
    ]
});

/// Which heading rules are active.
///
/// Rule order is fixed; disabling a rule lets lines fall through to the
/// next enabled one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingConfig {
    enabled: Vec<HeadingKind>,
}

impl HeadingConfig {
    /// All five rules enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable a rule.
    pub fn without(mut self, kind: HeadingKind) -> Self {
        self.enabled.retain(|k| *k != kind);
        self
    }

    /// Re-enable a rule.
    pub fn with(mut self, kind: HeadingKind) -> Self {
        if !self.enabled.contains(&kind) {
            self.enabled.push(kind);
        }
        self
    }

    /// Check if a rule is enabled.
    pub fn is_enabled(&self, kind: HeadingKind) -> bool {
        self.enabled.contains(&kind)
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            enabled: HeadingKind::ALL.to_vec(),
        }
    }
}

/// Line-by-line heading detector.
#[derive(Debug, Clone, Default)]
pub struct HeadingDetector {
    config: HeadingConfig,
}

impl HeadingDetector {
    /// Create a detector with all rules enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a custom rule selection.
    pub fn with_config(config: HeadingConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &HeadingConfig {
        &self.config
    }

    /// Classify one line by the first enabled rule it satisfies.
    pub fn classify(&self, line: &str) -> LineClass {
        let line = line.trim();
        if line.is_empty() {
            return LineClass::NotAHeading;
        }

        RULES
            .iter()
            .filter(|rule| self.config.is_enabled(rule.kind()))
            .find_map(|rule| rule.apply(line))
            .unwrap_or(LineClass::NotAHeading)
    }

    /// Scan lines in order and return every heading.
    ///
    /// `line_index` values are strictly increasing. An empty result is a
    /// valid outcome, not an error.
    pub fn detect_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<HeadingMatch> {
        let mut matches = Vec::new();

        for (line_index, line) in lines.iter().enumerate() {
            if let LineClass::Heading { kind, label, title } = self.classify(line.as_ref()) {
                log::debug!("line {}: {} heading {:?}", line_index, kind, title);
                matches.push(HeadingMatch {
                    line_index,
                    raw_text: line.as_ref().trim().to_string(),
                    pattern_kind: kind,
                    label,
                    title,
                });
            }
        }

        matches
    }

    /// Detect headings in cleaned text.
    pub fn detect(&self, clean_text: &str) -> Vec<HeadingMatch> {
        self.detect_lines(&split_lines(clean_text))
    }
}

/// Split cleaned text into the line sequence that `line_index` refers to.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Detect headings with the default rule set.
pub fn detect(clean_text: &str) -> Vec<HeadingMatch> {
    HeadingDetector::new().detect(clean_text)
}
