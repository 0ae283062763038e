//! Sub-topic record produced by segmentation.

use serde::{Deserialize, Serialize};

use super::HeadingKind;

/// A titled section of the chapter, from one heading to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTopic {
    /// 1-based position among detected sub-topics
    pub index: usize,

    /// Heading text with any numbering prefix stripped
    pub title: String,

    /// Body lines between this heading and the next, edge blank lines trimmed
    pub body: Vec<String>,

    /// Rule that detected the heading
    pub kind: HeadingKind,

    /// Original numbering prefix (`"2"`, `"III"`, `"C"`), if any
    pub label: Option<String>,

    /// Line index of the heading in the cleaned text
    pub line_index: usize,
}

impl SubTopic {
    /// Body as a single string, lines joined with newlines.
    pub fn body_text(&self) -> String {
        self.body.join("\n")
    }

    /// Body paragraphs: blank-line separated blocks with inner line
    /// breaks folded into spaces.
    pub fn paragraphs(&self) -> Vec<String> {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in &self.body {
            let line = line.trim();
            if line.is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join(" "));
        }

        paragraphs
    }

    /// Character count of the body.
    pub fn body_chars(&self) -> usize {
        self.body_text().chars().count()
    }

    /// Check if the body has no content.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(|l| l.trim().is_empty())
    }

    /// Heading as originally numbered, for display (`"[III] Decline"`).
    pub fn display_heading(&self) -> String {
        match &self.label {
            Some(label) => format!("[{}] {}", label, self.title),
            None => format!("[{}] {}", self.index, self.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtopic(body: &[&str]) -> SubTopic {
        SubTopic {
            index: 1,
            title: "Origins".into(),
            body: body.iter().map(|s| s.to_string()).collect(),
            kind: HeadingKind::Roman,
            label: Some("I".into()),
            line_index: 0,
        }
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let st = subtopic(&["First line", "continues here.", "", "Second para."]);
        assert_eq!(
            st.paragraphs(),
            vec!["First line continues here.", "Second para."]
        );
    }

    #[test]
    fn test_paragraphs_collapse_multiple_blanks() {
        let st = subtopic(&["A", "", "", "B"]);
        assert_eq!(st.paragraphs(), vec!["A", "B"]);
    }

    #[test]
    fn test_body_text_and_chars() {
        let st = subtopic(&["ab", "cd"]);
        assert_eq!(st.body_text(), "ab\ncd");
        assert_eq!(st.body_chars(), 5);
        assert!(!st.is_empty());
        assert!(subtopic(&[]).is_empty());
    }

    #[test]
    fn test_display_heading() {
        assert_eq!(subtopic(&[]).display_heading(), "[I] Origins");
    }
}
