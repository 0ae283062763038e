//! Text extraction with a registry of sources keyed by file extension.
//!
//! # Example
//!
//! ```no_run
//! use chapsplit::extract::TextExtractor;
//!
//! fn main() -> chapsplit::Result<()> {
//!     let extractor = TextExtractor::with_defaults();
//!     let extracted = extractor.extract("chapter1.pdf")?;
//!     println!("{} chars via {}", extracted.char_count(), extracted.backend);
//!     Ok(())
//! }
//! ```

mod backend;
mod options;
mod source;

pub use backend::{default_backends, run_guarded, LopdfBackend, PdfBackend, PdfExtractBackend};
pub use options::{ErrorMode, ExtractOptions, DEFAULT_MIN_TEXT_CHARS};
pub use source::{PdfSource, PlainTextSource};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};

/// Raw text pulled from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Extracted text, pages joined by the page separator
    pub text: String,

    /// Name of the source or backend that produced the text
    pub backend: String,
}

impl Extracted {
    /// Create a new extraction result.
    pub fn new(text: impl Into<String>, backend: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            backend: backend.into(),
        }
    }

    /// Character count of the text with surrounding whitespace trimmed.
    pub fn char_count(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// Trait for input sources.
///
/// Implement this trait to accept a new input format.
pub trait TextSource: Send + Sync {
    /// Lowercase extensions without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Name of this source.
    fn name(&self) -> &str;

    /// Extract raw text from the file at `path`.
    fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<Extracted>;

    /// Check if this source handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry mapping file extensions to text sources.
pub struct TextExtractor {
    sources: HashMap<String, Arc<dyn TextSource>>,
    options: ExtractOptions,
}

impl TextExtractor {
    /// Create an empty registry with default options.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            options: ExtractOptions::default(),
        }
    }

    /// Create a registry with the plain-text and PDF sources.
    pub fn with_defaults() -> Self {
        let mut extractor = Self::new();
        extractor.register(Arc::new(PlainTextSource::new()));
        extractor.register(Arc::new(PdfSource::new()));
        extractor
    }

    /// Replace the extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// The active extraction options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Register a source for all its supported extensions.
    pub fn register(&mut self, source: Arc<dyn TextSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.sources.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Extract raw text from a chapter file.
    ///
    /// Checks that the file exists and that its extension is known before
    /// reading anything.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Extracted> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let format = detect_format_from_path(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let source = self
            .sources
            .get(&ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!(".{}", ext)))?;

        log::debug!(
            "Extracting {} with the {} source",
            format,
            source.name()
        );
        source.extract(path, &self.options)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Extract raw text from a chapter file with default settings.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<Extracted> {
    TextExtractor::with_defaults().extract(path)
}
