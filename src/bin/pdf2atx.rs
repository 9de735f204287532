//! CLI binary for pdf-atx.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_atx::{
    convert, convert_to_file, inspect, ConversionConfig, ConversionProgressCallback,
    DocumentMetadata, PageSelection, PageSeparator, ProgressCallback, Vocabulary,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── Terminal styling ─────────────────────────────────────────────────────────

const GREEN: u8 = 32;
const RED: u8 = 31;
const DIM: u8 = 2;
const BOLD: u8 = 1;

/// Wrap `s` in one SGR escape sequence.
fn paint(code: u8, s: &str) -> String {
    format!("\x1b[{code}m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Progress bar over the selected pages. Pages arrive strictly in order, so
/// a single bar and a running position are all the state needed.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_conversion_start
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix("Opening");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Converting");
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, _page_num: usize, _total: usize, _markdown_len: usize) {
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            paint(RED, "✗"),
            page_num,
            total,
            paint(RED, error)
        ));
        self.bar.abandon();
    }

    fn on_conversion_complete(&self, total_pages: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages converted",
            paint(GREEN, "✔"),
            paint(BOLD, &total_pages.to_string())
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (stdout)
  pdf2atx handout.pdf

  # Convert to file
  pdf2atx handout.pdf -o handout.md

  # Specific pages, HTML comment between pages
  pdf2atx --pages 2-4 --separator comment handout.pdf

  # Dump the built-in rule table, edit it, convert with it
  pdf2atx --print-vocabulary > rules.json
  pdf2atx --vocabulary rules.json handout.pdf

  # Inspect PDF metadata
  pdf2atx --inspect-only handout.pdf

  # JSON output with metadata
  pdf2atx --json --metadata handout.pdf > output.json

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   libpdfium file, or the directory containing it
  RUST_LOG          tracing filter, overrides -v / -q
"#;

/// Convert text-layer PDF files to ATX Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2atx",
    version,
    about = "Convert text-layer PDF files to ATX Markdown",
    long_about = "Convert text-layer PDF documents to ATX Markdown. Multi-column pages are put \
back into reading order, footer noise is dropped, wrap hyphens are repaired, and lines are \
classified into headings, citations and body text by an ordered rule table.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    #[arg(required_unless_present = "print_vocabulary")]
    input: Option<PathBuf>,

    /// Write Markdown to this file instead of stdout.
    #[arg(short, long, env = "PDF2ATX_OUTPUT")]
    output: Option<PathBuf>,

    /// JSON rule table replacing the built-in vocabulary.
    #[arg(long, env = "PDF2ATX_VOCABULARY")]
    vocabulary: Option<PathBuf>,

    /// Print the built-in vocabulary as JSON and exit.
    #[arg(long)]
    print_vocabulary: bool,

    /// Page selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "PDF2ATX_PAGES", default_value = "all")]
    pages: String,

    /// Page separator: none, hr, comment, or custom string.
    #[arg(long, env = "PDF2ATX_SEPARATOR", default_value = "none")]
    separator: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2ATX_PASSWORD")]
    password: Option<String>,

    /// Document title. Defaults to the file name without its extension.
    #[arg(long, env = "PDF2ATX_TITLE")]
    title: Option<String>,

    /// Prepend YAML front-matter with document metadata.
    #[arg(long, env = "PDF2ATX_METADATA")]
    metadata: bool,

    /// Output structured JSON (ConversionOutput) instead of Markdown.
    #[arg(long, env = "PDF2ATX_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2ATX_NO_PROGRESS")]
    no_progress: bool,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2ATX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2ATX_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs unless -v asks for everything.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.print_vocabulary {
        let json = Vocabulary::default()
            .to_json_pretty()
            .context("Failed to serialise vocabulary")?;
        println!("{json}");
        return Ok(());
    }

    let input = cli
        .input
        .clone()
        .context("An input PDF path is required")?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&input).context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            for (label, value) in metadata_rows(&input, &meta) {
                println!("{:<13} {}", format!("{label}:"), value);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats = convert_to_file(&input, output_path, &config).context("Conversion failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {}/{} pages  {} headings  {} citations  {}ms  →  {}",
                paint(GREEN, "✔"),
                stats.processed_pages,
                stats.total_pages,
                stats.heading_lines,
                stats.citation_lines,
                stats.total_duration_ms,
                paint(BOLD, &output_path.display().to_string()),
            );
        }
    } else {
        let output = convert(&input, &config).context("Conversion failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.markdown.as_bytes())
                .context("Failed to write to stdout")?;
            if !output.markdown.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "   {} blocks ({} filtered)  {}ms total",
                paint(DIM, &output.stats.total_blocks.to_string()),
                paint(DIM, &output.stats.filtered_blocks.to_string()),
                output.stats.total_duration_ms,
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let pages = parse_pages(&cli.pages)?;
    let separator = parse_separator(&cli.separator);

    let mut builder = ConversionConfig::builder()
        .pages(pages)
        .page_separator(separator)
        .include_metadata(cli.metadata);

    if let Some(ref path) = cli.vocabulary {
        builder = builder.vocabulary(load_vocabulary(path)?);
    }
    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Rule table from a `--vocabulary` JSON file.
fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    Vocabulary::from_path(path).with_context(|| {
        format!(
            "Could not use --vocabulary {} (run --print-vocabulary for a valid template)",
            path.display()
        )
    })
}

/// Label/value pairs shown by `--inspect-only`; absent fields are skipped.
fn metadata_rows(path: &Path, meta: &DocumentMetadata) -> Vec<(&'static str, String)> {
    let optional = [
        ("Title", &meta.title),
        ("Author", &meta.author),
        ("Subject", &meta.subject),
        ("Creator", &meta.creator),
        ("Producer", &meta.producer),
        ("Created", &meta.creation_date),
        ("Modified", &meta.modification_date),
    ];

    let mut rows = vec![("File", path.display().to_string())];
    rows.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| value.clone().map(|v| (label, v))),
    );
    rows.push(("Pages", meta.page_count.to_string()));
    rows.push(("PDF version", meta.pdf_version.clone()));
    rows
}

/// Parse `--pages`: `all`, `5`, `3-15`, or a comma list such as `1,4-6,9`.
fn parse_pages(s: &str) -> Result<PageSelection> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("all") {
        return Ok(PageSelection::All);
    }

    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if let [only] = parts.as_slice() {
        return Ok(match page_span(only)? {
            (start, end) if start == end => PageSelection::Single(start),
            (start, end) => PageSelection::Range(start, end),
        });
    }

    let mut pages = Vec::new();
    for part in parts {
        let (start, end) = page_span(part)?;
        pages.extend(start..=end);
    }
    Ok(PageSelection::Set(pages))
}

/// One `--pages` item, `n` or `a-b`, as an inclusive 1-indexed span.
fn page_span(item: &str) -> Result<(usize, usize)> {
    let number = |t: &str| -> Result<usize> {
        let n: usize = t
            .trim()
            .parse()
            .with_context(|| format!("Invalid page number '{}' in --pages", t.trim()))?;
        anyhow::ensure!(n >= 1, "Pages are 1-indexed; '{item}' contains page 0");
        Ok(n)
    };

    match item.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (number(start)?, number(end)?);
            anyhow::ensure!(start <= end, "Page range '{item}' runs backwards");
            Ok((start, end))
        }
        None => {
            let n = number(item)?;
            Ok((n, n))
        }
    }
}

/// Parse `--separator` string into `PageSeparator`.
fn parse_separator(s: &str) -> PageSeparator {
    match s.to_lowercase().as_str() {
        "none" => PageSeparator::None,
        "hr" | "---" => PageSeparator::HorizontalRule,
        "comment" => PageSeparator::Comment,
        _ => PageSeparator::Custom(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_all_single_range_set() {
        assert_eq!(parse_pages("ALL").unwrap(), PageSelection::All);
        assert_eq!(parse_pages(" 5 ").unwrap(), PageSelection::Single(5));
        assert_eq!(parse_pages("3-15").unwrap(), PageSelection::Range(3, 15));
        assert_eq!(parse_pages("4-4").unwrap(), PageSelection::Single(4));
        assert_eq!(
            parse_pages("1,3,5").unwrap(),
            PageSelection::Set(vec![1, 3, 5])
        );
        assert_eq!(
            parse_pages("1, 4-6").unwrap(),
            PageSelection::Set(vec![1, 4, 5, 6])
        );
    }

    #[test]
    fn pages_rejects_zero_and_inverted() {
        for bad in ["0", "0-3", "9-2", "1,0", "x", "2,3-1", ""] {
            assert!(parse_pages(bad).is_err(), "accepted {bad:?}");
        }
        let msg = format!("{:#}", parse_pages("9-2").unwrap_err());
        assert!(msg.contains("backwards"), "got: {msg}");
    }

    #[test]
    fn vocabulary_error_names_flag_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, "{ not json").unwrap();

        let msg = format!("{:#}", load_vocabulary(&path).unwrap_err());
        assert!(msg.contains("--vocabulary"), "got: {msg}");
        assert!(msg.contains("rules.json"), "got: {msg}");
        assert!(msg.contains("--print-vocabulary"), "got: {msg}");
    }

    #[test]
    fn vocabulary_loads_printed_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, Vocabulary::default().to_json_pretty().unwrap()).unwrap();
        assert_eq!(load_vocabulary(&path).unwrap(), Vocabulary::default());
    }

    #[test]
    fn metadata_rows_skip_missing_fields() {
        let meta = DocumentMetadata {
            author: Some("ICPA".into()),
            page_count: 4,
            pdf_version: "Pdf1_6".into(),
            ..DocumentMetadata::default()
        };
        let rows = metadata_rows(Path::new("handout.pdf"), &meta);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["File", "Author", "Pages", "PDF version"]);
        assert_eq!(rows[2].1, "4");
    }

    #[test]
    fn paint_wraps_in_sgr_codes() {
        assert_eq!(paint(BOLD, "x"), "\x1b[1mx\x1b[0m");
    }

    #[test]
    fn separator_keeps_custom_case() {
        assert_eq!(parse_separator("HR"), PageSeparator::HorizontalRule);
        assert_eq!(parse_separator("none"), PageSeparator::None);
        assert_eq!(
            parse_separator("<!-- Break -->"),
            PageSeparator::Custom("<!-- Break -->".into())
        );
    }

    #[test]
    fn cli_parses_print_vocabulary_without_input() {
        let cli = Cli::try_parse_from(["pdf2atx", "--print-vocabulary"]).unwrap();
        assert!(cli.print_vocabulary);
        assert!(cli.input.is_none());
    }
}
