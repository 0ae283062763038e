//! PDF generation for a single sub-topic.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::model::SubTopic;

use super::filename::output_filename;
use super::fonts::{encode_win_ansi, Font};
use super::layout::{wrap_paragraph, Line};
use super::options::RenderOptions;

/// Renders sub-topics as standalone PDF documents.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    options: RenderOptions,
}

impl PdfRenderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The active render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Path the sub-topic will be written to.
    pub fn output_path(&self, subtopic: &SubTopic, out_dir: &Path, chapter: &str) -> PathBuf {
        out_dir.join(output_filename(
            chapter,
            subtopic.index,
            &subtopic.title,
            self.options.max_title_chars,
        ))
    }

    /// Write one sub-topic to `out_dir` and return the file path.
    ///
    /// An existing file at the same path is overwritten.
    pub fn render(&self, subtopic: &SubTopic, out_dir: &Path, chapter: &str) -> Result<PathBuf> {
        let path = self.output_path(subtopic, out_dir, chapter);
        let bytes = self.render_bytes(subtopic)?;
        fs::write(&path, bytes)?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Render a sub-topic into PDF bytes.
    pub fn render_bytes(&self, subtopic: &SubTopic) -> Result<Vec<u8>> {
        let mut doc = self.build_document(subtopic)?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| Error::Pdf(e.to_string()))?;
        Ok(buffer)
    }

    /// Lay out a sub-topic and build the document object graph.
    pub fn build_document(&self, subtopic: &SubTopic) -> Result<Document> {
        let pages = self.layout_pages(subtopic);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for operations in pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(self.options.page_width),
                    Object::Real(self.options.page_height),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(encode_win_ansi(&subtopic.title)),
            "Producer" => Object::string_literal(self.options.producer.as_str()),
            "CreationDate" => Object::string_literal(pdf_date(chrono::Utc::now())),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        Ok(doc)
    }

    /// Produce the content-stream operations of every page.
    fn layout_pages(&self, subtopic: &SubTopic) -> Vec<Vec<Operation>> {
        let opts = &self.options;
        let width = opts.text_width();
        let mut pages = PageCursor::new(opts);

        for line in wrap_paragraph(&subtopic.title, Font::Bold, opts.title_size, width) {
            pages.line(&line, Font::Bold, opts.title_size, opts.title_leading, false);
        }
        pages.space(opts.title_space_after);

        for paragraph in subtopic.paragraphs() {
            for line in wrap_paragraph(&paragraph, Font::Regular, opts.body_size, width) {
                pages.line(&line, Font::Regular, opts.body_size, opts.body_leading, true);
            }
            pages.space(opts.paragraph_space_after);
        }

        pages.finish()
    }
}

/// Tracks the write position while filling pages top to bottom.
struct PageCursor<'a> {
    options: &'a RenderOptions,
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            pages: Vec::new(),
            current: Vec::new(),
            y: options.top(),
        }
    }

    fn line(&mut self, line: &Line, font: Font, size: f32, leading: f32, justify: bool) {
        if self.y - leading < self.options.margin {
            self.break_page();
        }

        let baseline = self.y - size;
        let spacing = if justify {
            line.word_spacing(self.options.text_width())
        } else {
            0.0
        };

        self.current.extend(text_ops(
            font,
            size,
            self.options.margin,
            baseline,
            spacing,
            &line.text(),
        ));
        self.y -= leading;
    }

    fn space(&mut self, amount: f32) {
        self.y -= amount;
    }

    fn break_page(&mut self) {
        let ops = std::mem::take(&mut self.current);
        self.push_page(ops);
        self.y = self.options.top();
    }

    fn push_page(&mut self, mut ops: Vec<Operation>) {
        if self.options.page_numbers {
            let label = format!("Page {}", self.pages.len() + 1);
            let size = self.options.footer_size;
            let x = (self.options.page_width - Font::Regular.text_width(&label, size)) / 2.0;
            let y = self.options.margin / 1.5;
            ops.extend(text_ops(Font::Regular, size, x, y, 0.0, &label));
        }
        self.pages.push(ops);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        let ops = std::mem::take(&mut self.current);
        self.push_page(ops);
        self.pages
    }
}

/// Operations drawing one line of text at (`x`, `y`).
fn text_ops(
    font: Font,
    size: f32,
    x: f32,
    y: f32,
    word_spacing: f32,
    text: &str,
) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.resource_name().into(), Object::Real(size)]),
        Operation::new("Tw", vec![Object::Real(word_spacing)]),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Format a timestamp as a PDF date string.
fn pdf_date(time: chrono::DateTime<chrono::Utc>) -> String {
    time.format("D:%Y%m%d%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingKind;
    use tempfile::TempDir;

    fn subtopic(index: usize, title: &str, body: &[&str]) -> SubTopic {
        SubTopic {
            index,
            title: title.to_string(),
            body: body.iter().map(|s| s.to_string()).collect(),
            kind: HeadingKind::Roman,
            label: Some("I".to_string()),
            line_index: 0,
        }
    }

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn test_render_writes_named_file() {
        let dir = TempDir::new().unwrap();
        let st = subtopic(1, "Origins", &["Text about origins."]);
        let path = PdfRenderer::new().render(&st, dir.path(), "ch3").unwrap();

        assert_eq!(path, dir.path().join("ch3_01_Origins.pdf"));
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_title_text_is_extractable() {
        let st = subtopic(2, "Growth", &["Text about growth."]);
        let bytes = PdfRenderer::new().render_bytes(&st).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Growth"));
    }

    #[test]
    fn test_empty_body_renders_title_only() {
        let st = subtopic(1, "Empty Section", &[]);
        let bytes = PdfRenderer::new().render_bytes(&st).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_long_body_breaks_pages() {
        let line = "The settlement expanded along the river as trade in grain, salt and \
                    timber drew merchants from distant towns and villages.";
        let body: Vec<&str> = std::iter::repeat([line, ""]).take(80).flatten().collect();
        let st = subtopic(1, "Growth", &body);
        let bytes = PdfRenderer::new().render_bytes(&st).unwrap();
        assert!(page_count(&bytes) > 1);
    }

    #[test]
    fn test_non_win_ansi_text_does_not_fail() {
        let st = subtopic(1, "Mixed \u{4E2D} Title", &["Body with \u{1F600} emoji."]);
        assert!(PdfRenderer::new().render_bytes(&st).is_ok());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let st = subtopic(1, "Origins", &["Text."]);
        let existing = dir.path().join("ch_01_Origins.pdf");
        fs::write(&existing, b"stale").unwrap();

        let path = PdfRenderer::new().render(&st, dir.path(), "ch").unwrap();
        assert_eq!(path, existing);
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn test_missing_output_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let st = subtopic(1, "Origins", &["Text."]);
        let result = PdfRenderer::new().render(&st, &missing, "ch");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_pdf_date_format() {
        use chrono::TimeZone;
        let time = chrono::Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(pdf_date(time), "D:20240305140709Z");
    }
}
