//! Extraction options and configuration.

/// Minimum number of characters a chapter must yield.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 100;

/// Options for extracting text from input files.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Minimum trimmed character count; shorter PDF backend output is
    /// treated as a backend failure
    pub min_text_chars: usize,

    /// Separator inserted between PDF pages
    pub page_separator: String,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (Latin-1 fallback for undecodable text files).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the minimum character threshold.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }

    /// Set the page separator.
    pub fn with_page_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = separator.into();
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            page_separator: "\n\n".to_string(),
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on undecodable input
    #[default]
    Strict,
    /// Decode what can be decoded and continue
    Lenient,
}
