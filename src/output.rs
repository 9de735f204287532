//! Result types returned by the conversion entry points.

use serde::{Deserialize, Serialize};

/// Everything a conversion produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The assembled ATX Markdown document.
    pub markdown: String,
    /// Per-page results in page order.
    pub pages: Vec<PageResult>,
    pub metadata: DocumentMetadata,
    pub stats: ConversionStats,
}

/// Outcome of running one page through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Markdown for this page alone (no title header, no separator).
    pub markdown: String,
    /// Blocks reported by the extractor.
    pub block_count: usize,
    /// Blocks dropped by the noise filter.
    pub filtered_blocks: usize,
    pub heading_lines: usize,
    pub citation_lines: usize,
    pub body_lines: usize,
}

/// Aggregate counters for a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the source document.
    pub total_pages: usize,
    /// Pages that went through the pipeline.
    pub processed_pages: usize,
    /// Pages left out by the page selection.
    pub skipped_pages: usize,
    pub total_blocks: usize,
    pub filtered_blocks: usize,
    pub heading_lines: usize,
    pub citation_lines: usize,
    pub body_lines: usize,
    pub total_duration_ms: u64,
}

impl ConversionStats {
    /// Sum the per-page counters of `pages`.
    pub fn from_pages(total_pages: usize, pages: &[PageResult], total_duration_ms: u64) -> Self {
        Self {
            total_pages,
            processed_pages: pages.len(),
            skipped_pages: total_pages.saturating_sub(pages.len()),
            total_blocks: pages.iter().map(|p| p.block_count).sum(),
            filtered_blocks: pages.iter().map(|p| p.filtered_blocks).sum(),
            heading_lines: pages.iter().map(|p| p.heading_lines).sum(),
            citation_lines: pages.iter().map(|p| p.citation_lines).sum(),
            body_lines: pages.iter().map(|p| p.body_lines).sum(),
            total_duration_ms,
        }
    }
}

/// PDF document information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    /// Empty when the source is not a real PDF.
    pub pdf_version: String,
}
