//! # chapsplit
//!
//! Split a textbook chapter into one PDF per sub-topic.
//!
//! The input (PDF or plain text) is reduced to text, cleaned, scanned for
//! heading lines, and partitioned at those headings. Each section is
//! written as a standalone PDF named after the chapter, its position, and
//! its title.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chapsplit::split;
//!
//! fn main() -> chapsplit::Result<()> {
//!     let report = split("chapter3.pdf", "output_subtopics")?;
//!     for file in &report.files {
//!         println!("{}", file.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Stages
//!
//! - **extract**: PDF text via lopdf, falling back to pdf-extract
//! - **clean**: whitespace normalization, optional Unicode and artifact cleanup
//! - **heading**: five ordered regex rules (numbered, roman, alphabetic,
//!   all caps, title case)
//! - **segment**: one sub-topic per heading
//! - **render**: justified Helvetica PDFs written with lopdf

pub mod clean;
pub mod detect;
pub mod error;
pub mod extract;
pub mod heading;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod segment;

// Re-export commonly used types
pub use clean::{clean, CleanupOptions, CleanupPipeline};
pub use detect::{chapter_name, detect_format_from_path, is_pdf_bytes, InputFormat};
pub use error::{BackendFailure, Error, RenderFailure, Result};
pub use extract::{ErrorMode, ExtractOptions, Extracted, TextExtractor, TextSource};
pub use heading::{HeadingConfig, HeadingDetector};
pub use model::{HeadingKind, HeadingMatch, LineClass, SubTopic};
pub use pipeline::{
    no_progress, Analysis, Pipeline, ProgressEvent, SplitOptions, SplitReport, SplitStats,
    DEFAULT_OUTPUT_DIR,
};
pub use render::{PdfRenderer, RenderOptions};
pub use segment::{segment, SegmentOptions};

use std::path::Path;

/// Split a chapter file into sub-topic PDFs with default settings.
///
/// # Example
///
/// ```no_run
/// use chapsplit::split;
///
/// let report = split("chapter3.txt", "out").unwrap();
/// println!("{} files", report.stats.files_written);
/// ```
pub fn split<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> Result<SplitReport> {
    Splitter::new().run(input, output_dir, &mut no_progress)
}

/// Detect sub-topics in a chapter file without writing anything.
///
/// # Example
///
/// ```no_run
/// use chapsplit::detect_subtopics;
///
/// for st in detect_subtopics("chapter3.pdf").unwrap() {
///     println!("{}", st.display_heading());
/// }
/// ```
pub fn detect_subtopics<P: AsRef<Path>>(input: P) -> Result<Vec<SubTopic>> {
    Splitter::new().detect(input)
}

/// Extract and clean the text of a chapter file.
pub fn extract_clean_text<P: AsRef<Path>>(input: P) -> Result<String> {
    let extracted = TextExtractor::with_defaults().extract(input)?;
    Ok(clean(&extracted.text))
}

/// Builder for configuring and running a split.
///
/// # Example
///
/// ```no_run
/// use chapsplit::Splitter;
///
/// let report = Splitter::new()
///     .lenient()
///     .without_title_case()
///     .with_min_body_chars(100)
///     .save_extracted_text()
///     .run("chapter3.pdf", "out", &mut |event| println!("{:?}", event))?;
/// # Ok::<(), chapsplit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    options: SplitOptions,
}

impl Splitter {
    /// Create a new splitter builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter from complete options.
    pub fn with_options(options: SplitOptions) -> Self {
        Self { options }
    }

    /// Decode undecodable text files as Latin-1 instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options.extract = self.options.extract.lenient();
        self
    }

    /// Disable the title-case heading rule.
    pub fn without_title_case(mut self) -> Self {
        self.options.headings = self.options.headings.without(HeadingKind::TitleCase);
        self
    }

    /// Set which heading rules are active.
    pub fn with_heading_config(mut self, config: HeadingConfig) -> Self {
        self.options.headings = config;
        self
    }

    /// Drop sub-topics with fewer body characters than `chars`.
    pub fn with_min_body_chars(mut self, chars: usize) -> Self {
        self.options.segment = self.options.segment.with_min_body_chars(chars);
        self
    }

    /// Set segmentation options.
    pub fn with_segment_options(mut self, segment: SegmentOptions) -> Self {
        self.options.segment = segment;
        self
    }

    /// Drop headings that fail the word-count, length, letter and
    /// map-label checks.
    pub fn strict_headings(mut self) -> Self {
        self.options.segment = self.options.segment.strict_headings();
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.options.cleanup = cleanup;
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.options.render = render;
        self
    }

    /// Enable or disable page-number footers.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.options.render = self.options.render.with_page_numbers(enabled);
        self
    }

    /// Also write the raw extracted text next to the PDFs.
    pub fn save_extracted_text(mut self) -> Self {
        self.options.save_extracted_text = true;
        self
    }

    /// The configured options.
    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Build the pipeline.
    pub fn build(self) -> Pipeline {
        Pipeline::new(self.options)
    }

    /// Split `input` into sub-topic PDFs under `output_dir`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        self,
        input: P,
        output_dir: Q,
        progress: &mut dyn FnMut(&ProgressEvent),
    ) -> Result<SplitReport> {
        self.build()
            .run(input.as_ref(), output_dir.as_ref(), progress)
    }

    /// Dry run: return the sub-topics without writing files.
    pub fn detect<P: AsRef<Path>>(self, input: P) -> Result<Vec<SubTopic>> {
        let analysis = self.build().analyze(input.as_ref(), &mut no_progress)?;
        Ok(analysis.subtopics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitter_builder() {
        let splitter = Splitter::new()
            .lenient()
            .without_title_case()
            .with_min_body_chars(50)
            .strict_headings()
            .with_page_numbers(false)
            .save_extracted_text();

        let options = splitter.options();
        assert_eq!(options.extract.error_mode, ErrorMode::Lenient);
        assert!(!options.headings.is_enabled(HeadingKind::TitleCase));
        assert!(options.headings.is_enabled(HeadingKind::Roman));
        assert_eq!(options.segment.min_body_chars, 50);
        assert_eq!(options.segment.min_heading_words, 2);
        assert!(options.segment.reject_map_labels);
        assert!(!options.render.page_numbers);
        assert!(options.save_extracted_text);
    }

    #[test]
    fn test_splitter_builder_default() {
        let options = Splitter::default().options().clone();
        assert_eq!(options.extract.error_mode, ErrorMode::Strict);
        assert_eq!(options.segment.min_body_chars, 0);
        assert_eq!(options.segment.min_heading_words, 0);
        assert!(!options.segment.reject_map_labels);
        assert!(options.render.page_numbers);
        assert!(!options.save_extracted_text);
    }

    #[test]
    fn test_split_missing_input() {
        let result = split("/definitely/missing/chapter.pdf", "out");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_detect_unsupported_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chapter.docx");
        std::fs::write(&path, "I. Origins").unwrap();
        assert!(matches!(
            detect_subtopics(&path),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_extract_clean_text_normalizes_whitespace() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chapter.txt");
        std::fs::write(&path, "I. Origins   \r\n\r\n\r\n\r\nBody\r\n").unwrap();
        assert_eq!(extract_clean_text(&path).unwrap(), "I. Origins\n\n\nBody");
    }
}
