//! End-to-end chapter splitting: extract, clean, detect, segment, render.
//!
//! All validation and analysis happens before the output directory is
//! touched, so a failing run leaves the filesystem unchanged. Rendering is
//! the only stage with side effects.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::clean::{CleanupOptions, CleanupPipeline};
use crate::detect::chapter_name;
use crate::error::{Error, RenderFailure, Result};
use crate::extract::{ExtractOptions, Extracted, TextExtractor};
use crate::heading::{split_lines, HeadingConfig, HeadingDetector};
use crate::model::{HeadingKind, HeadingMatch, SubTopic};
use crate::render::{PdfRenderer, RenderOptions};
use crate::segment::{segment_with_options, SegmentOptions};

/// Default output directory used by the command-line tool.
pub const DEFAULT_OUTPUT_DIR: &str = "output_subtopics";

/// Stage notification sent to the progress sink.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Raw text was extracted.
    Extracted {
        /// Trimmed character count
        chars: usize,
        /// Source or backend that produced the text
        backend: String,
    },
    /// Text was cleaned.
    Cleaned {
        /// Trimmed character count after cleanup
        chars: usize,
    },
    /// Heading detection finished.
    HeadingsDetected {
        /// Number of headings found
        count: usize,
    },
    /// Segmentation finished.
    Segmented {
        /// Number of sub-topics produced
        count: usize,
    },
    /// A sub-topic was kept by segmentation; sent once per sub-topic, in
    /// index order, right after [`ProgressEvent::Segmented`].
    SubTopicFound {
        /// 1-based sub-topic index
        index: usize,
        /// Heading with its original label (`"[III] Decline"`)
        heading: String,
        /// Rule that detected the heading
        kind: HeadingKind,
        /// Body character count
        body_chars: usize,
    },
    /// One sub-topic file was written.
    Rendered {
        /// 1-based sub-topic index
        index: usize,
        /// Total number of sub-topics
        total: usize,
        /// Path of the written file
        path: PathBuf,
    },
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitStats {
    /// Characters in the extracted text
    pub chars_extracted: usize,

    /// Characters in the cleaned text
    pub chars_cleaned: usize,

    /// Headings detected
    pub headings: usize,

    /// Sub-topics produced by segmentation
    pub subtopics: usize,

    /// PDF files written
    pub files_written: usize,
}

/// Summary of a successful split.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    /// Chapter name used as the filename prefix
    pub chapter: String,

    /// Directory the files were written to
    pub output_dir: PathBuf,

    /// Run statistics
    pub stats: SplitStats,

    /// Written files, in sub-topic order
    pub files: Vec<PathBuf>,
}

/// Everything computed before rendering.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Chapter name derived from the input file
    pub chapter: String,

    /// Raw extraction result
    pub extracted: Extracted,

    /// Cleaned text the headings were detected in
    pub clean_text: String,

    /// Detected headings, in line order
    pub headings: Vec<HeadingMatch>,

    /// Sub-topics, indexed 1..N
    pub subtopics: Vec<SubTopic>,

    /// Statistics so far (nothing written yet)
    pub stats: SplitStats,
}

/// Options for a full split, one group per stage.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Text extraction
    pub extract: ExtractOptions,

    /// Text cleanup
    pub cleanup: CleanupOptions,

    /// Heading rules
    pub headings: HeadingConfig,

    /// Segmentation
    pub segment: SegmentOptions,

    /// PDF rendering
    pub render: RenderOptions,

    /// Also write `{chapter}_extracted.txt` into the output directory
    pub save_extracted_text: bool,
}

/// Runs the split pipeline with a fixed set of options.
pub struct Pipeline {
    options: SplitOptions,
    extractor: TextExtractor,
    cleanup: CleanupPipeline,
    detector: HeadingDetector,
    renderer: PdfRenderer,
}

impl Pipeline {
    /// Create a pipeline from options.
    pub fn new(options: SplitOptions) -> Self {
        Self {
            extractor: TextExtractor::with_defaults().with_options(options.extract.clone()),
            cleanup: CleanupPipeline::new(options.cleanup.clone()),
            detector: HeadingDetector::with_config(options.headings.clone()),
            renderer: PdfRenderer::with_options(options.render.clone()),
            options,
        }
    }

    /// Replace the text extractor (for custom sources or backends).
    pub fn with_extractor(mut self, extractor: TextExtractor) -> Self {
        self.extractor = extractor.with_options(self.options.extract.clone());
        self
    }

    /// The active options.
    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Extract, clean, detect and segment without writing anything.
    pub fn analyze(
        &self,
        input: &Path,
        progress: &mut dyn FnMut(&ProgressEvent),
    ) -> Result<Analysis> {
        let chapter = chapter_name(input);
        let min = self.options.extract.min_text_chars;

        let extracted = self.extractor.extract(input)?;
        let chars_extracted = extracted.char_count();
        if chars_extracted < min {
            return Err(Error::EmptyContent {
                chars: chars_extracted,
                min,
            });
        }
        log::debug!("Extracted {} chars via {}", chars_extracted, extracted.backend);
        progress(&ProgressEvent::Extracted {
            chars: chars_extracted,
            backend: extracted.backend.clone(),
        });

        let clean_text = self.cleanup.process(&extracted.text);
        let chars_cleaned = clean_text.chars().count();
        if chars_cleaned < min {
            return Err(Error::EmptyContent {
                chars: chars_cleaned,
                min,
            });
        }
        log::debug!("Cleaned to {} chars", chars_cleaned);
        progress(&ProgressEvent::Cleaned {
            chars: chars_cleaned,
        });

        let lines = split_lines(&clean_text);
        let headings = self.detector.detect_lines(&lines);
        log::debug!("Detected {} headings", headings.len());
        progress(&ProgressEvent::HeadingsDetected {
            count: headings.len(),
        });

        let subtopics = segment_with_options(&lines, &headings, &self.options.segment)?;
        log::debug!("Segmented into {} sub-topics", subtopics.len());
        progress(&ProgressEvent::Segmented {
            count: subtopics.len(),
        });
        for subtopic in &subtopics {
            progress(&ProgressEvent::SubTopicFound {
                index: subtopic.index,
                heading: subtopic.display_heading(),
                kind: subtopic.kind,
                body_chars: subtopic.body_chars(),
            });
        }

        let stats = SplitStats {
            chars_extracted,
            chars_cleaned,
            headings: headings.len(),
            subtopics: subtopics.len(),
            files_written: 0,
        };

        Ok(Analysis {
            chapter,
            extracted,
            clean_text,
            headings,
            subtopics,
            stats,
        })
    }

    /// Split `input` into one PDF per sub-topic under `output_dir`.
    ///
    /// The output directory is created only after analysis succeeds.
    /// Rendering continues past individual failures; if any sub-topic
    /// fails, [`Error::PartialRender`] lists them and the files already
    /// written stay on disk.
    pub fn run(
        &self,
        input: &Path,
        output_dir: &Path,
        progress: &mut dyn FnMut(&ProgressEvent),
    ) -> Result<SplitReport> {
        let analysis = self.analyze(input, progress)?;

        fs::create_dir_all(output_dir)?;

        if self.options.save_extracted_text {
            let debug_path = output_dir.join(format!("{}_extracted.txt", analysis.chapter));
            fs::write(&debug_path, &analysis.extracted.text)?;
            log::info!("Saved extracted text to {}", debug_path.display());
        }

        let total = analysis.subtopics.len();
        let mut files = Vec::with_capacity(total);
        let mut failed = Vec::new();

        for subtopic in &analysis.subtopics {
            match self.renderer.render(subtopic, output_dir, &analysis.chapter) {
                Ok(path) => {
                    progress(&ProgressEvent::Rendered {
                        index: subtopic.index,
                        total,
                        path: path.clone(),
                    });
                    files.push(path);
                }
                Err(e) => {
                    log::error!("Failed to render sub-topic {}: {}", subtopic.index, e);
                    failed.push(RenderFailure {
                        index: subtopic.index,
                        message: e.to_string(),
                    });
                }
            }
        }

        if !failed.is_empty() {
            return Err(Error::PartialRender {
                written: files.len(),
                failed,
            });
        }

        let stats = SplitStats {
            files_written: files.len(),
            ..analysis.stats
        };
        log::info!(
            "Wrote {} sub-topic PDFs to {}",
            stats.files_written,
            output_dir.display()
        );

        Ok(SplitReport {
            chapter: analysis.chapter,
            output_dir: output_dir.to_path_buf(),
            stats,
            files,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(SplitOptions::default())
    }
}

/// Progress sink that ignores every event.
pub fn no_progress(_: &ProgressEvent) {}
