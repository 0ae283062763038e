//! Text sources for the supported input formats.

use std::fs;
use std::path::Path;

use crate::detect::is_pdf_bytes;
use crate::error::{BackendFailure, Error, Result};

use super::backend::{default_backends, run_guarded, PdfBackend};
use super::{ErrorMode, ExtractOptions, Extracted, TextSource};

/// Reads plain-text chapters directly.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSource {
    _private: (),
}

impl PlainTextSource {
    /// Create a new plain-text source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextSource for PlainTextSource {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<Extracted> {
        let bytes = fs::read(path)?;
        let text = decode_text(&bytes, options.error_mode)
            .map_err(|e| Error::Encoding(format!("{}: {}", path.display(), e)))?;
        Ok(Extracted::new(text, self.name()))
    }
}

/// Decode file bytes as UTF-8, or as Latin-1 in lenient mode.
fn decode_text(bytes: &[u8], mode: ErrorMode) -> std::result::Result<String, String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(e) => match mode {
            ErrorMode::Strict => Err(format!(
                "invalid UTF-8 at byte {}",
                e.valid_up_to()
            )),
            ErrorMode::Lenient => {
                log::warn!("Input is not valid UTF-8; decoding as Latin-1");
                Ok(bytes.iter().map(|&b| b as char).collect())
            }
        },
    }
}

/// Extracts PDF text through an ordered chain of backends.
pub struct PdfSource {
    backends: Vec<Box<dyn PdfBackend>>,
}

impl PdfSource {
    /// Create a PDF source with the default lopdf → pdf-extract chain.
    pub fn new() -> Self {
        Self::with_backends(default_backends())
    }

    /// Create a PDF source with a custom backend chain, tried in order.
    pub fn with_backends(backends: Vec<Box<dyn PdfBackend>>) -> Self {
        Self { backends }
    }

    /// Names of the configured backends, in order.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Run the backend chain over in-memory PDF data.
    ///
    /// A backend fails when it errors, returns no pages, or returns fewer
    /// than `min_text_chars` characters. The first success wins.
    pub fn extract_bytes(&self, data: &[u8], options: &ExtractOptions) -> Result<Extracted> {
        if !is_pdf_bytes(data) {
            log::warn!("Input does not start with a %PDF- header");
        }

        let mut attempts = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            let name = backend.name();
            let reason = match run_guarded(backend.as_ref(), data) {
                Ok(pages) if pages.is_empty() => "returned no pages".to_string(),
                Ok(pages) => {
                    let text = pages.join(&options.page_separator);
                    let chars = text.trim().chars().count();
                    if chars >= options.min_text_chars {
                        if !attempts.is_empty() {
                            log::info!(
                                "Using {} extraction ({} chars) after fallback",
                                name,
                                chars
                            );
                        } else {
                            log::debug!("Using {} extraction ({} chars)", name, chars);
                        }
                        return Ok(Extracted::new(text, name));
                    }
                    format!(
                        "only {} chars extracted (minimum {})",
                        chars, options.min_text_chars
                    )
                }
                Err(e) => e,
            };

            log::warn!("{} extraction failed: {}", name, reason);
            attempts.push(BackendFailure::new(name, reason));
        }

        Err(Error::Extraction { attempts })
    }
}

impl Default for PdfSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfSource {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<Extracted> {
        let data = fs::read(path)?;
        self.extract_bytes(&data, options)
    }
}
