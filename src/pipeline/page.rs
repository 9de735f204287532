//! Per-page driver: filter → reassemble → repair → classify → render.

use super::classify::Classifier;
use super::extract::Page;
use super::noise::NoiseFilterConfig;
use super::{columns, hyphenation, render};
use crate::output::PageResult;
use crate::vocabulary::Role;
use tracing::debug;

/// Run one extracted page through the pipeline.
///
/// Pure and self-contained: nothing computed for one page is visible to the
/// next.
pub fn process_page(page: Page, classifier: &Classifier, noise: &NoiseFilterConfig) -> PageResult {
    let page_num = page.index + 1;
    let block_count = page.blocks.len();

    let kept = noise.filter(page.blocks);
    let filtered_blocks = block_count - kept.len();

    let stream = columns::reassemble(&kept, page.width);
    let repaired = hyphenation::repair(&stream);
    let lines = classifier.classify_text(&repaired);
    let markdown = render::render_page(&lines);

    let count = |role: Role| lines.iter().filter(|l| l.role == role).count();
    let citation_lines = count(Role::Citation);
    let body_lines = count(Role::Body);
    let heading_lines = lines.len() - citation_lines - body_lines;

    debug!(
        "Page {}: {} blocks ({} filtered), {} lines ({} headings, {} citations)",
        page_num,
        block_count,
        filtered_blocks,
        lines.len(),
        heading_lines,
        citation_lines
    );

    PageResult {
        page_num,
        markdown,
        block_count,
        filtered_blocks,
        heading_lines,
        citation_lines,
        body_lines,
    }
}
