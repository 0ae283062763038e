//! Heading classification types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which heading rule classified a line.
///
/// Variants are listed in evaluation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingKind {
    /// `1. Title`
    Numbered,
    /// `IV. Title`
    Roman,
    /// `B. Title`
    Alphabetic,
    /// `A LINE IN CAPITALS`
    AllCaps,
    /// `Every Word Capitalized`
    TitleCase,
}

impl HeadingKind {
    /// All kinds, in priority order.
    pub const ALL: [HeadingKind; 5] = [
        HeadingKind::Numbered,
        HeadingKind::Roman,
        HeadingKind::Alphabetic,
        HeadingKind::AllCaps,
        HeadingKind::TitleCase,
    ];

    /// Whether headings of this kind carry a numbering/lettering prefix.
    pub fn has_prefix(self) -> bool {
        matches!(
            self,
            HeadingKind::Numbered | HeadingKind::Roman | HeadingKind::Alphabetic
        )
    }

    /// Short lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingKind::Numbered => "numbered",
            HeadingKind::Roman => "roman",
            HeadingKind::Alphabetic => "alphabetic",
            HeadingKind::AllCaps => "all_caps",
            HeadingKind::TitleCase => "title_case",
        }
    }
}

impl fmt::Display for HeadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// The line is a heading.
    Heading {
        /// Rule that matched first
        kind: HeadingKind,
        /// Numbering prefix without the trailing period (`"3"`, `"IV"`, `"B"`)
        label: Option<String>,
        /// Descriptive title with any prefix stripped
        title: String,
    },
    /// Ordinary body content.
    NotAHeading,
}

impl LineClass {
    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, LineClass::Heading { .. })
    }

    /// The heading kind, if any.
    pub fn kind(&self) -> Option<HeadingKind> {
        match self {
            LineClass::Heading { kind, .. } => Some(*kind),
            LineClass::NotAHeading => None,
        }
    }
}

/// A line recognized as a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingMatch {
    /// 0-based position in the cleaned line sequence
    pub line_index: usize,
    /// The matched line, trimmed
    pub raw_text: String,
    /// Rule that classified the line
    pub pattern_kind: HeadingKind,
    /// Numbering prefix for numbered/roman/alphabetic headings
    pub label: Option<String>,
    /// Title with any numbering prefix stripped
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_priority_order() {
        assert_eq!(HeadingKind::ALL[0], HeadingKind::Numbered);
        assert_eq!(HeadingKind::ALL[4], HeadingKind::TitleCase);
    }

    #[test]
    fn test_has_prefix() {
        assert!(HeadingKind::Roman.has_prefix());
        assert!(!HeadingKind::AllCaps.has_prefix());
        assert!(!HeadingKind::TitleCase.has_prefix());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&HeadingKind::AllCaps).unwrap();
        assert_eq!(json, "\"all_caps\"");
    }

    #[test]
    fn test_line_class_kind() {
        let class = LineClass::Heading {
            kind: HeadingKind::Numbered,
            label: Some("1".into()),
            title: "Intro".into(),
        };
        assert!(class.is_heading());
        assert_eq!(class.kind(), Some(HeadingKind::Numbered));
        assert_eq!(LineClass::NotAHeading.kind(), None);
    }
}
