//! Page geometry and typography for generated documents.

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Default cap on the sanitized title part of a filename.
pub const DEFAULT_MAX_TITLE_CHARS: usize = 50;

/// Options for rendering sub-topic documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Margin on all four sides, in points
    pub margin: f32,

    /// Title font size
    pub title_size: f32,

    /// Distance between wrapped title lines
    pub title_leading: f32,

    /// Vertical space after the title block
    pub title_space_after: f32,

    /// Body font size
    pub body_size: f32,

    /// Distance between body lines
    pub body_leading: f32,

    /// Vertical space after each paragraph
    pub paragraph_space_after: f32,

    /// Draw a centred "Page N" footer
    pub page_numbers: bool,

    /// Footer font size
    pub footer_size: f32,

    /// Maximum characters kept from the title in the filename
    pub max_title_chars: usize,

    /// Producer string stored in the document info dictionary
    pub producer: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size in points.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the margin in points.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable page-number footers.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }

    /// Set the body font size and leading.
    pub fn with_body_size(mut self, size: f32, leading: f32) -> Self {
        self.body_size = size;
        self.body_leading = leading;
        self
    }

    /// Set the filename title length cap.
    pub fn with_max_title_chars(mut self, chars: usize) -> Self {
        self.max_title_chars = chars;
        self
    }

    /// Width available for text.
    pub fn text_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Baseline-independent top of the text area.
    pub fn top(&self) -> f32 {
        self.page_height - self.margin
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_width: 8.5 * POINTS_PER_INCH,
            page_height: 11.0 * POINTS_PER_INCH,
            margin: 0.75 * POINTS_PER_INCH,
            title_size: 16.0,
            title_leading: 20.0,
            title_space_after: 20.0 + 0.3 * POINTS_PER_INCH,
            body_size: 11.0,
            body_leading: 16.0,
            paragraph_space_after: 12.0 + 0.15 * POINTS_PER_INCH,
            page_numbers: true,
            footer_size: 9.0,
            max_title_chars: DEFAULT_MAX_TITLE_CHARS,
            producer: format!("chapsplit {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.page_width, 612.0);
        assert_eq!(options.page_height, 792.0);
        assert_eq!(options.margin, 54.0);
        assert_eq!(options.text_width(), 504.0);
        assert!(options.page_numbers);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .with_page_size(595.0, 842.0)
            .with_margin(36.0)
            .with_page_numbers(false)
            .with_max_title_chars(20);
        assert_eq!(options.text_width(), 523.0);
        assert_eq!(options.top(), 806.0);
        assert!(!options.page_numbers);
        assert_eq!(options.max_title_chars, 20);
    }
}
