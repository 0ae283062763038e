//! chapsplit CLI - split a chapter into one PDF per sub-topic

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use chapsplit::{
    CleanupOptions, HeadingKind, ProgressEvent, SegmentOptions, SplitReport, Splitter,
    DEFAULT_OUTPUT_DIR,
};

/// Heading characters shown in previews.
const PREVIEW_CHARS: usize = 60;

#[derive(Parser)]
#[command(name = "chapsplit")]
#[command(version)]
#[command(about = "Split a textbook chapter into one PDF per sub-topic", long_about = None)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Input chapter (.pdf or .txt)
    #[arg(value_name = "INPUT", required = true)]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR", env = "CHAPSPLIT_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    #[command(flatten)]
    flags: SplitFlags,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a chapter into sub-topic PDFs
    Split {
        /// Input chapter (.pdf or .txt)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(
            short,
            long,
            value_name = "DIR",
            env = "CHAPSPLIT_OUTPUT_DIR",
            default_value = DEFAULT_OUTPUT_DIR
        )]
        output: PathBuf,

        #[command(flatten)]
        flags: SplitFlags,
    },

    /// List detected sub-topics without writing files
    Detect {
        /// Input chapter (.pdf or .txt)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print sub-topics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        flags: SplitFlags,
    },

    /// Show version information
    Version,
}

/// Options shared by every command that runs the pipeline.
#[derive(Args, Clone, Default)]
struct SplitFlags {
    /// Decode non-UTF-8 text files as Latin-1 instead of failing
    #[arg(long)]
    lenient: bool,

    /// Disable the title-case heading rule
    #[arg(long)]
    no_title_case: bool,

    /// Skip sub-topics with fewer body characters than this
    #[arg(long, value_name = "N", default_value_t = 0)]
    min_body_chars: usize,

    /// Skip headings that are single words, over 120 characters, have no
    /// letters, or look like map labels
    #[arg(long)]
    strict_headings: bool,

    /// Skip headings with fewer words than this
    #[arg(long, value_name = "N")]
    min_heading_words: Option<usize>,

    /// Skip headings longer than this many characters
    #[arg(long, value_name = "N")]
    max_heading_chars: Option<usize>,

    /// Also write the raw extracted text to the output directory
    #[arg(long)]
    save_extracted: bool,

    /// Omit "Page N" footers
    #[arg(long)]
    no_page_numbers: bool,

    /// Normalize Unicode to NFC and replace ligatures
    #[arg(long)]
    normalize_unicode: bool,

    /// Remove lines that contain only a page number
    #[arg(long)]
    strip_page_numbers: bool,

    /// Remove "Reprint YYYY-YY" stamps
    #[arg(long)]
    strip_reprint_marks: bool,
}

impl SplitFlags {
    fn splitter(&self) -> Splitter {
        let cleanup = CleanupOptions::new()
            .with_unicode_normalization(self.normalize_unicode)
            .with_ligature_fix(self.normalize_unicode)
            .with_page_number_removal(self.strip_page_numbers)
            .with_reprint_mark_removal(self.strip_reprint_marks);

        let mut segment = SegmentOptions::new().with_min_body_chars(self.min_body_chars);
        if self.strict_headings {
            segment = segment.strict_headings();
        }
        if let Some(words) = self.min_heading_words {
            segment = segment.with_min_heading_words(words);
        }
        if let Some(chars) = self.max_heading_chars {
            segment = segment.with_max_heading_chars(chars);
        }

        let mut splitter = Splitter::new()
            .with_cleanup(cleanup)
            .with_segment_options(segment)
            .with_page_numbers(!self.no_page_numbers);

        if self.lenient {
            splitter = splitter.lenient();
        }
        if self.no_title_case {
            splitter = splitter.without_title_case();
        }
        if self.save_extracted {
            splitter = splitter.save_extracted_text();
        }
        splitter
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Some(Commands::Split {
            input,
            output,
            flags,
        }) => cmd_split(&input, &output, &flags),
        Some(Commands::Detect { input, json, flags }) => cmd_detect(&input, json, &flags),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            Some(input) => cmd_split(&input, &cli.output, &cli.flags),
            None => Err("missing INPUT; run chapsplit --help for usage".into()),
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        if let Some(err) = e.downcast_ref::<chapsplit::Error>() {
            eprintln!("{}: {}", "Hint".yellow(), err.hint());
        }
        std::process::exit(1);
    }
}

fn cmd_split(
    input: &Path,
    output: &Path,
    flags: &SplitFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} {}", "Splitting".cyan().bold(), input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message("Extracting text...");

    let bar_style = ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
        .progress_chars("#>-");

    let result = flags.splitter().run(input, output, &mut |event| match event {
        ProgressEvent::Extracted { chars, backend } => {
            pb.suspend(|| {
                println!(
                    "  {} Extracted {} characters ({})",
                    "✓".green(),
                    chars,
                    backend
                )
            });
            pb.set_message("Cleaning text...");
        }
        ProgressEvent::Cleaned { chars } => {
            pb.suspend(|| println!("  {} Cleaned to {} characters", "✓".green(), chars));
            pb.set_message("Detecting headings...");
        }
        ProgressEvent::HeadingsDetected { count } => {
            pb.suspend(|| println!("  {} Found {} headings", "✓".green(), count));
        }
        ProgressEvent::Segmented { count } => {
            pb.suspend(|| println!("  {} Found {} sub-topics", "✓".green(), count));
            pb.set_length(*count as u64);
            pb.set_style(bar_style.clone());
            pb.set_message("Rendering PDFs...");
        }
        ProgressEvent::SubTopicFound {
            heading,
            kind,
            body_chars,
            ..
        } => {
            pb.suspend(|| print_preview(heading, *body_chars, *kind));
        }
        ProgressEvent::Rendered { index, total, path } => {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            pb.suspend(|| println!("  [{}/{}] {}", index, total, name));
            pb.inc(1);
        }
    });

    match result {
        Ok(report) => {
            pb.finish_and_clear();
            print_summary(&report);
            Ok(())
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}

fn cmd_detect(
    input: &Path,
    json: bool,
    flags: &SplitFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let subtopics = flags.splitter().detect(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&subtopics)?);
        return Ok(());
    }

    println!("{}", "Detected Sub-topics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for st in &subtopics {
        print_preview(&st.display_heading(), st.body_chars(), st.kind);
    }
    println!();
    println!("{}: {}", "Total".bold(), subtopics.len());

    Ok(())
}

fn print_preview(heading: &str, body_chars: usize, kind: HeadingKind) {
    let shown: String = heading.chars().take(PREVIEW_CHARS).collect();
    let ellipsis = if heading.chars().count() > PREVIEW_CHARS { "..." } else { "" };
    let kind_label = if kind == HeadingKind::TitleCase {
        kind.as_str().yellow()
    } else {
        kind.as_str().dimmed()
    };
    println!(
        "    {}{} {} {}",
        shown,
        ellipsis,
        format!("({} chars)", body_chars).dimmed(),
        kind_label
    );
}

fn print_summary(report: &SplitReport) {
    println!(
        "\n{} Created {} PDFs in {}",
        "Done!".green().bold(),
        report.stats.files_written,
        report.output_dir.display()
    );

    let count = report.files.len();
    for (i, file) in report.files.iter().enumerate() {
        let branch = if i + 1 == count { "└─" } else { "├─" };
        let name = file.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }
}

fn cmd_version() {
    println!("{} {}", "chapsplit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Split textbook chapters into per-sub-topic PDFs");
    println!();
    println!("License: MIT");
}
