//! PDF text extraction backends.
//!
//! Provides a trait-based interface so the PDF source can try an ordered
//! chain of libraries without depending on any one of them.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document as LopdfDocument;

/// A library able to pull plain text out of PDF pages.
pub trait PdfBackend: Send + Sync {
    /// Backend name used in logs and error messages.
    fn name(&self) -> &str;

    /// Return the text of every page, in page order.
    ///
    /// Errors are reported as plain messages; the caller decides whether to
    /// fall back to the next backend.
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, String>;
}

/// Run a backend, converting panics on malformed input into errors.
pub fn run_guarded(backend: &dyn PdfBackend, data: &[u8]) -> Result<Vec<String>, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| backend.page_texts(data))) {
        Ok(result) => result,
        Err(_) => Err("panicked (malformed document)".to_string()),
    }
}

// ---------------------------------------------------------------------------
// LopdfBackend: primary backend
// ---------------------------------------------------------------------------

/// Primary backend: per-page extraction with `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfBackend {
    _private: (),
}

impl LopdfBackend {
    /// Create a new lopdf backend.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl PdfBackend for LopdfBackend {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, String> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| e.to_string())?;
        if doc.is_encrypted() {
            return Err("document is encrypted".to_string());
        }

        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            let text = doc
                .extract_text(&[*page_num])
                .map_err(|e| format!("page {}: {}", page_num, e))?;
            texts.push(text);
        }
        Ok(texts)
    }
}

// ---------------------------------------------------------------------------
// PdfExtractBackend: secondary backend
// ---------------------------------------------------------------------------

/// Secondary backend: `pdf-extract`, which copes with some font encodings
/// that lopdf decodes poorly.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractBackend {
    _private: (),
}

impl PdfExtractBackend {
    /// Create a new pdf-extract backend.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl PdfBackend for PdfExtractBackend {
    fn name(&self) -> &str {
        "pdf-extract"
    }

    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, String> {
        pdf_extract::extract_text_from_mem_by_pages(data).map_err(|e| e.to_string())
    }
}

/// The default backend chain: lopdf first, then pdf-extract.
pub fn default_backends() -> Vec<Box<dyn PdfBackend>> {
    vec![
        Box::new(LopdfBackend::new()),
        Box::new(PdfExtractBackend::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PanickingBackend;

    impl PdfBackend for PanickingBackend {
        fn name(&self) -> &str {
            "panicky"
        }

        fn page_texts(&self, _data: &[u8]) -> Result<Vec<String>, String> {
            panic!("broken font table")
        }
    }

    #[test]
    fn test_default_chain_order() {
        let names: Vec<String> = default_backends()
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, vec!["lopdf", "pdf-extract"]);
    }

    #[test]
    fn test_lopdf_rejects_garbage() {
        let result = run_guarded(&LopdfBackend::new(), b"definitely not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_pdf_extract_rejects_garbage() {
        let result = run_guarded(&PdfExtractBackend::new(), b"definitely not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_panics_become_errors() {
        let result = run_guarded(&PanickingBackend, b"%PDF-1.4");
        assert_eq!(result, Err("panicked (malformed document)".to_string()));
    }
}
