//! Document assembly: the conversion entry points.
//!
//! Every entry point ends in [`convert_source`], which walks the selected
//! pages strictly in order, runs each through
//! [`crate::pipeline::page::process_page`], and joins the results under a
//! `# <title>` header. Pages never share classification state.
//!
//! The pdfium-backed entry points open the document inside a scope that
//! ends before they return, so the handle is released on success and on
//! every early error return alike.

use crate::config::{ConversionConfig, PageSelection};
use crate::error::PdfAtxError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata, PageResult};
use crate::pdfium::bind_pdfium;
use crate::pipeline::classify::Classifier;
use crate::pipeline::extract::{BlockSource, PdfiumSource};
use crate::pipeline::{input, page};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a local PDF file to ATX Markdown.
///
/// The title is the file name without its last extension unless
/// [`ConversionConfig::title`] is set.
///
/// # Errors
/// Any failure is fatal and no partial document is returned:
/// - File not found / permission denied / not a PDF
/// - Corrupt or encrypted PDF
/// - A page whose text cannot be extracted
pub fn convert(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, PdfAtxError> {
    let resolved = input::resolve_input(input_path)?;
    info!("Starting conversion: {}", resolved.path.display());
    convert_bytes(&resolved.bytes, &resolved.display_name, config)
}

/// Convert PDF bytes held in memory.
///
/// `display_name` plays the role of the uploaded file's name: it names the
/// document in errors and, minus its last extension, becomes the title.
///
/// # Example
/// ```rust,no_run
/// use pdf_atx::{convert_bytes, ConversionConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes: Vec<u8> = std::fs::read("handout.pdf")?;
/// let output = convert_bytes(&bytes, "handout.pdf", &ConversionConfig::default())?;
/// println!("{}", output.markdown);
/// # Ok(())
/// # }
/// ```
pub fn convert_bytes(
    bytes: &[u8],
    display_name: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, PdfAtxError> {
    input::check_pdf_magic(bytes, display_name)?;

    let title = config
        .title
        .clone()
        .unwrap_or_else(|| title_from_file_name(display_name));

    let pdfium = bind_pdfium()?;
    let source = PdfiumSource::open(&pdfium, bytes, config.password.as_deref(), display_name)?;
    let metadata = source.metadata();
    convert_with_metadata(&source, &title, metadata, config)
}

/// Convert pages from any [`BlockSource`].
///
/// Metadata carries only the page count, since a generic source has no
/// document information dictionary.
pub fn convert_source(
    source: &dyn BlockSource,
    title: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, PdfAtxError> {
    let metadata = DocumentMetadata {
        page_count: source.page_count(),
        ..DocumentMetadata::default()
    };
    convert_with_metadata(source, title, metadata, config)
}

/// Convert a PDF and write the Markdown to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, PdfAtxError> {
    let output = convert(input_path, config)?;
    write_markdown(output_path, &output.markdown)?;
    Ok(output.stats)
}

/// Extract PDF metadata without converting content.
pub fn inspect(input_path: impl AsRef<Path>) -> Result<DocumentMetadata, PdfAtxError> {
    let resolved = input::resolve_input(input_path)?;
    let pdfium = bind_pdfium()?;
    let source = PdfiumSource::open(&pdfium, &resolved.bytes, None, &resolved.display_name)?;
    Ok(source.metadata())
}

/// Document title for an uploaded file: everything before the last `.`.
///
/// A name without a `.` is used whole.
pub fn title_from_file_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _ext)) => stem.to_string(),
        None => name.to_string(),
    }
}

/// Write `markdown` to `path` through a sibling temp file and a rename.
pub fn write_markdown(path: impl AsRef<Path>, markdown: &str) -> Result<(), PdfAtxError> {
    let path = path.as_ref();
    let write_err = |source| PdfAtxError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp_path = path.with_extension("md.tmp");
    std::fs::write(&tmp_path, markdown).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;
    Ok(())
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn convert_with_metadata(
    source: &dyn BlockSource,
    title: &str,
    mut metadata: DocumentMetadata,
    config: &ConversionConfig,
) -> Result<ConversionOutput, PdfAtxError> {
    let start = Instant::now();
    let classifier = Classifier::new(&config.vocabulary)?;

    let total_pages = source.page_count();
    metadata.page_count = total_pages;

    let page_indices = config.pages.to_indices(total_pages);
    if page_indices.is_empty() && config.pages != PageSelection::All {
        return Err(PdfAtxError::PageOutOfRange {
            page: first_requested_page(&config.pages),
            total: total_pages,
        });
    }
    if let Some(last) = last_requested_page(&config.pages) {
        if last > total_pages {
            warn!(
                "Page selection reaches page {} but the document has {} pages; extra pages skipped",
                last, total_pages
            );
        }
    }
    debug!(
        "Selected {} of {} pages for conversion",
        page_indices.len(),
        total_pages
    );

    let selected = page_indices.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(selected);
    }

    let mut pages: Vec<PageResult> = Vec::with_capacity(selected);
    for idx in page_indices {
        let page_num = idx + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, selected);
        }

        let extracted = match source.page(idx) {
            Ok(p) => p,
            Err(e) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_error(page_num, selected, &e.to_string());
                }
                return Err(e);
            }
        };

        let result = page::process_page(extracted, &classifier, &config.noise);
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, selected, result.markdown.len());
        }
        pages.push(result);
    }

    let markdown = assemble_document(title, &pages, config, &metadata);
    let stats = ConversionStats::from_pages(
        total_pages,
        &pages,
        start.elapsed().as_millis() as u64,
    );

    info!(
        "Conversion complete: {}/{} pages, {} headings, {} citations, {}ms",
        stats.processed_pages,
        total_pages,
        stats.heading_lines,
        stats.citation_lines,
        stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(selected);
    }

    Ok(ConversionOutput {
        markdown,
        pages,
        metadata,
        stats,
    })
}

fn first_requested_page(selection: &PageSelection) -> usize {
    match selection {
        PageSelection::All => 0,
        PageSelection::Single(p) => *p,
        PageSelection::Range(start, _) => *start,
        PageSelection::Set(pages) => pages.iter().copied().min().unwrap_or(0),
    }
}

fn last_requested_page(selection: &PageSelection) -> Option<usize> {
    match selection {
        PageSelection::All => None,
        PageSelection::Single(p) => Some(*p),
        PageSelection::Range(_, end) => Some(*end),
        PageSelection::Set(pages) => pages.iter().copied().max(),
    }
}

/// Title header, then each page's Markdown in order.
fn assemble_document(
    title: &str,
    pages: &[PageResult],
    config: &ConversionConfig,
    metadata: &DocumentMetadata,
) -> String {
    let mut out = String::new();

    if config.include_metadata {
        out.push_str(&format_yaml_front_matter(title, metadata));
    }

    out.push_str("# ");
    out.push_str(title);
    out.push_str("\n\n");

    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            out.push_str(&config.page_separator.render(page.page_num));
        }
        out.push_str(&page.markdown);
    }

    out
}

/// Format document metadata as YAML front matter.
fn format_yaml_front_matter(title: &str, meta: &DocumentMetadata) -> String {
    let quote = |s: &str| s.replace('\\', "\\\\").replace('"', "\\\"");
    let mut yaml = String::from("---\n");

    yaml.push_str(&format!("title: \"{}\"\n", quote(title)));
    if let Some(ref t) = meta.title {
        yaml.push_str(&format!("pdf_title: \"{}\"\n", quote(t)));
    }
    if let Some(ref a) = meta.author {
        yaml.push_str(&format!("author: \"{}\"\n", quote(a)));
    }
    if let Some(ref s) = meta.subject {
        yaml.push_str(&format!("subject: \"{}\"\n", quote(s)));
    }
    if let Some(ref c) = meta.creator {
        yaml.push_str(&format!("creator: \"{}\"\n", quote(c)));
    }
    if let Some(ref p) = meta.producer {
        yaml.push_str(&format!("producer: \"{}\"\n", quote(p)));
    }
    yaml.push_str(&format!("pages: {}\n", meta.page_count));
    if !meta.pdf_version.is_empty() {
        yaml.push_str(&format!("pdf_version: \"{}\"\n", meta.pdf_version));
    }

    yaml.push_str("---\n\n");
    yaml
}
