//! Text cleanup applied between extraction and heading detection.
//!
//! The default pipeline only touches whitespace: line endings, trailing
//! blanks, runs of blank lines, and blank edges. Case and punctuation are
//! never changed, so a line that was heading-shaped before cleaning is still
//! heading-shaped afterwards. The optional stages are off by default.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Maximum number of consecutive blank lines kept by [`clean`].
pub const MAX_BLANK_LINES: usize = 2;

/// A line holding only a page number, optionally dash-wrapped (`- 12 -`).
static PAGE_NUMBER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*[-–—]?[ \t]*\d+[ \t]*[-–—]?[ \t]*$")
        .expect("page number pattern is valid")
});

/// Textbook reprint stamp (`Reprint 2025-26`).
static REPRINT_MARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Reprint\s+\d{4}-\d{2}").expect("reprint pattern is valid"));

/// Options for text cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Remove lines that only contain a page number
    pub remove_page_numbers: bool,

    /// Remove textbook reprint stamps such as "Reprint 2025-26"
    pub remove_reprint_marks: bool,

    /// Maximum consecutive blank lines
    pub max_blank_lines: usize,
}

impl CleanupOptions {
    /// Create whitespace-only cleanup options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Enable or disable ligature replacement.
    pub fn with_ligature_fix(mut self, enabled: bool) -> Self {
        self.fix_ligatures = enabled;
        self
    }

    /// Enable or disable page-number line removal.
    pub fn with_page_number_removal(mut self, enabled: bool) -> Self {
        self.remove_page_numbers = enabled;
        self
    }

    /// Enable or disable reprint stamp removal.
    pub fn with_reprint_mark_removal(mut self, enabled: bool) -> Self {
        self.remove_reprint_marks = enabled;
        self
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: false,
            fix_ligatures: false,
            remove_page_numbers: false,
            remove_reprint_marks: false,
            max_blank_lines: MAX_BLANK_LINES,
        }
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            ligature_map: vec![
                ("\u{FB00}", "ff"),  // ﬀ
                ("\u{FB01}", "fi"),  // ﬁ
                ("\u{FB02}", "fl"),  // ﬂ
                ("\u{FB03}", "ffi"), // ﬃ
                ("\u{FB04}", "ffl"), // ﬄ
                ("\u{FB05}", "st"),  // ﬅ
                ("\u{FB06}", "st"),  // ﬆ
            ],
        }
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = normalize_line_endings(text);

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.remove_reprint_marks {
            result = REPRINT_MARK.replace_all(&result, "").to_string();
        }

        if self.options.remove_page_numbers {
            result = PAGE_NUMBER_LINE.replace_all(&result, "").to_string();
        }

        collapse_blank_lines(&result, self.options.max_blank_lines)
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

/// Clean text with the default, whitespace-only pipeline.
///
/// Total and idempotent: `clean(&clean(t)) == clean(t)`.
pub fn clean(text: &str) -> String {
    collapse_blank_lines(&normalize_line_endings(text), MAX_BLANK_LINES)
}

/// Convert `\r\n`, lone `\r` and form feeds to `\n`.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace(|c: char| c == '\r' || c == '\u{000C}', "\n")
}

/// Trim trailing whitespace per line, cap runs of blank lines at `max`, and
/// drop blank lines at both ends of the document.
fn collapse_blank_lines(text: &str, max: usize) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.split('\n').map(str::trim_end) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run <= max {
                lines.push(line);
            }
        } else {
            blank_run = 0;
            lines.push(line);
        }
    }

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings_normalized() {
        assert_eq!(clean("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        assert_eq!(clean("Title   \nbody\t"), "Title\nbody");
    }

    #[test]
    fn test_blank_runs_capped_at_two() {
        assert_eq!(clean("a\n\n\n\n\nb"), "a\n\n\nb");
        assert_eq!(clean("a\n\nb"), "a\n\nb");
        assert_eq!(clean("a\n\n\nb"), "a\n\n\nb");
        assert_eq!(clean("a\n  \n \t \n   \n\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_edges_stripped() {
        assert_eq!(clean("\n\n  \nBody\n\n\n"), "Body");
        assert_eq!(clean("   \n\n"), "");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "  \r\n\r\n1. Intro  \r\n\n\n\n\nText here\t\n\u{000C}II. Growth\n\n",
            "NO HEADINGS AT ALL\n\n\n\n\n\n",
            "a\rb\r\rc",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn test_case_and_punctuation_untouched() {
        let text = "I. Origins\nTHE EARLY YEARS OF IT\nSome Title Case";
        assert_eq!(clean(text), text);
    }

    #[test]
    fn test_leading_indentation_kept() {
        assert_eq!(clean("    indented"), "    indented");
    }

    #[test]
    fn test_pipeline_default_matches_clean() {
        let text = "x\r\n\n\n\n\ny  ";
        assert_eq!(CleanupPipeline::default().process(text), clean(text));
    }

    #[test]
    fn test_page_number_removal() {
        let pipeline =
            CleanupPipeline::new(CleanupOptions::new().with_page_number_removal(true));
        let result = pipeline.process("Body text\n- 12 -\nMore text\n13");
        assert_eq!(result, "Body text\n\nMore text");
    }

    #[test]
    fn test_reprint_mark_removal() {
        let pipeline =
            CleanupPipeline::new(CleanupOptions::new().with_reprint_mark_removal(true));
        let result = pipeline.process("Body text Reprint 2025-26\nNext");
        assert_eq!(result, "Body text\nNext");
    }

    #[test]
    fn test_pipelines_share_patterns() {
        let options = CleanupOptions::new()
            .with_page_number_removal(true)
            .with_reprint_mark_removal(true);
        let first = CleanupPipeline::new(options.clone());
        let second = CleanupPipeline::new(options);
        let text = "Intro Reprint 2024-25\n7\nOutro";
        assert_eq!(first.process(text), "Intro\n\nOutro");
        assert_eq!(second.process(text), first.process(text));
    }

    #[test]
    fn test_ligature_fix() {
        let pipeline = CleanupPipeline::new(CleanupOptions::new().with_ligature_fix(true));
        assert_eq!(pipeline.process("ﬁnding ﬂowers"), "finding flowers");
    }

    #[test]
    fn test_unicode_normalization() {
        let pipeline =
            CleanupPipeline::new(CleanupOptions::new().with_unicode_normalization(true));
        let decomposed = "cafe\u{0301}";
        assert_eq!(pipeline.process(decomposed), "caf\u{00E9}");
    }

    #[test]
    fn test_optional_stages_idempotent() {
        let pipeline = CleanupPipeline::new(
            CleanupOptions::new()
                .with_page_number_removal(true)
                .with_reprint_mark_removal(true)
                .with_ligature_fix(true),
        );
        let text = "Reprint 2025-26\n\n42\n\n\n\nBody ﬁne\n";
        let once = pipeline.process(text);
        assert_eq!(pipeline.process(&once), once);
    }
}
