//! Error types for the chapsplit library.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for chapsplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A single failed attempt of a PDF text extraction backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendFailure {
    /// Backend name (e.g., "lopdf")
    pub backend: String,
    /// Reason the attempt was rejected
    pub reason: String,
}

impl BackendFailure {
    /// Create a new failure record.
    pub fn new(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.backend, self.reason)
    }
}

/// A sub-topic that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFailure {
    /// 1-based sub-topic index
    pub index: usize,
    /// Underlying error message
    pub message: String,
}

/// Error types that can occur while splitting a chapter.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist.
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input extension is neither PDF nor plain text.
    #[error("Unsupported file format: {0} (use .pdf or .txt)")]
    UnsupportedFormat(String),

    /// A plain-text input could not be decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Every PDF text extraction backend failed.
    #[error("Text extraction failed: {}", join_failures(.attempts))]
    Extraction {
        /// One entry per backend, in the order they were tried
        attempts: Vec<BackendFailure>,
    },

    /// Extracted or cleaned text is below the minimum length.
    #[error("Extracted text is too short or empty ({chars} chars, need at least {min})")]
    EmptyContent {
        /// Characters found
        chars: usize,
        /// Required minimum
        min: usize,
    },

    /// No heading matched any rule.
    #[error("No sub-topics detected in the document")]
    NoSubtopics,

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error from the PDF generation backend.
    #[error("PDF generation error: {0}")]
    Pdf(String),

    /// Some sub-topics were written, others failed.
    #[error(
        "Rendered {written} of {} sub-topics; failed: {}",
        .written + .failed.len(),
        join_render_failures(.failed)
    )]
    PartialRender {
        /// Number of files written successfully
        written: usize,
        /// Sub-topics that failed, in index order
        failed: Vec<RenderFailure>,
    },
}

impl Error {
    /// Short remediation hint shown to the user alongside the error.
    pub fn hint(&self) -> &'static str {
        match self {
            Error::FileNotFound(_) => "check the input path",
            Error::UnsupportedFormat(_) => "convert the chapter to .pdf or .txt first",
            Error::Encoding(_) => "save the file as UTF-8 or retry with --lenient",
            Error::Extraction { .. } => {
                "the PDF may be scanned or corrupted; try exporting it as text"
            }
            Error::EmptyContent { .. } => "the file may be empty, scanned, or corrupted",
            Error::NoSubtopics => "no sub-topics detected, check heading formatting",
            Error::Io(_) => "check that the output directory is writable",
            Error::Pdf(_) => "the sub-topic text could not be laid out as PDF",
            Error::PartialRender { .. } => {
                "files already written were kept; fix the error and rerun"
            }
        }
    }

    /// Indices of sub-topics that failed to render, if any.
    pub fn failed_indices(&self) -> Vec<usize> {
        match self {
            Error::PartialRender { failed, .. } => failed.iter().map(|f| f.index).collect(),
            _ => Vec::new(),
        }
    }
}

fn join_failures(attempts: &[BackendFailure]) -> String {
    if attempts.is_empty() {
        return "no backend available".to_string();
    }
    attempts
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_render_failures(failed: &[RenderFailure]) -> String {
    failed
        .iter()
        .map(|f| format!("#{} ({})", f.index, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoSubtopics;
        assert_eq!(err.to_string(), "No sub-topics detected in the document");

        let err = Error::EmptyContent { chars: 12, min: 100 };
        assert_eq!(
            err.to_string(),
            "Extracted text is too short or empty (12 chars, need at least 100)"
        );
    }

    #[test]
    fn test_extraction_error_carries_both_messages() {
        let err = Error::Extraction {
            attempts: vec![
                BackendFailure::new("lopdf", "invalid xref"),
                BackendFailure::new("pdf-extract", "panicked"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("lopdf: invalid xref"));
        assert!(msg.contains("pdf-extract: panicked"));
    }

    #[test]
    fn test_partial_render_lists_indices() {
        let err = Error::PartialRender {
            written: 2,
            failed: vec![RenderFailure {
                index: 3,
                message: "disk full".into(),
            }],
        };
        assert_eq!(err.failed_indices(), vec![3]);
        assert!(err.to_string().contains("Rendered 2 of 3"));
        assert!(err.to_string().contains("#3 (disk full)"));
    }

    #[test]
    fn test_hint_for_no_subtopics() {
        assert!(Error::NoSubtopics.hint().contains("heading formatting"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
