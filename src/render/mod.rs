//! Rendering of sub-topics as standalone PDF documents.

mod filename;
mod fonts;
mod layout;
mod options;
mod pdf;

pub use filename::{default_output_filename, output_filename, sanitize_title, UNTITLED};
pub use fonts::{encode_win_ansi, Font};
pub use layout::{wrap_paragraph, Line};
pub use options::{RenderOptions, DEFAULT_MAX_TITLE_CHARS, POINTS_PER_INCH};
pub use pdf::PdfRenderer;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::SubTopic;

/// Render one sub-topic with default options and return the written path.
pub fn render(subtopic: &SubTopic, out_dir: &Path, chapter: &str) -> Result<PathBuf> {
    PdfRenderer::new().render(subtopic, out_dir, chapter)
}
