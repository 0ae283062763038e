//! Input format detection.
//!
//! The input kind is decided by file extension alone; the `%PDF-` header is
//! only sniffed to warn about mislabeled files.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Kind of chapter document accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputFormat {
    /// PDF document
    Pdf,
    /// Plain text file
    PlainText,
}

impl InputFormat {
    /// Lowercase extensions (without the dot) that map to this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            InputFormat::Pdf => &["pdf"],
            InputFormat::PlainText => &["txt", "text"],
        }
    }

    /// Resolve a format from an extension (case-insensitive, no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        [InputFormat::Pdf, InputFormat::PlainText]
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Pdf => write!(f, "PDF"),
            InputFormat::PlainText => write!(f, "plain text"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Detect the input format of a path from its extension.
///
/// Fails with [`Error::UnsupportedFormat`] when the extension is missing or
/// unknown. The file itself is not touched.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    InputFormat::from_extension(ext).ok_or_else(|| {
        if ext.is_empty() {
            Error::UnsupportedFormat("(no extension)".to_string())
        } else {
            Error::UnsupportedFormat(format!(".{}", ext))
        }
    })
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Chapter name used in output filenames: the input file stem.
pub fn chapter_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "chapter".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf_extension() {
        assert_eq!(
            detect_format_from_path("chapter1.pdf").unwrap(),
            InputFormat::Pdf
        );
        assert_eq!(
            detect_format_from_path("CHAPTER1.PDF").unwrap(),
            InputFormat::Pdf
        );
    }

    #[test]
    fn test_detect_text_extension() {
        assert_eq!(
            detect_format_from_path("notes/chapter1.txt").unwrap(),
            InputFormat::PlainText
        );
        assert_eq!(
            detect_format_from_path("chapter1.text").unwrap(),
            InputFormat::PlainText
        );
    }

    #[test]
    fn test_detect_unsupported() {
        let result = detect_format_from_path("chapter1.docx");
        assert!(matches!(result, Err(Error::UnsupportedFormat(ref e)) if e == ".docx"));

        let result = detect_format_from_path("README");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
        assert!(!is_pdf_bytes(b""));
    }

    #[test]
    fn test_chapter_name() {
        assert_eq!(chapter_name("books/history_ch3.pdf"), "history_ch3");
        assert_eq!(chapter_name("notes.txt"), "notes");
    }
}
