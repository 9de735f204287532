//! Segment grouping: rebuild text blocks from pdfium's text segments.
//!
//! pdfium reports a page's text as segments, each a run of characters
//! sharing one baseline and style. A visual line is often split into several
//! segments at a font change or a kerning gap, and the pieces carry slightly
//! different `top` values. Fed to the column sort directly, those pieces
//! would be ordered by sub-point jitter instead of by `left`.
//!
//! Grouping runs in two passes, all in top-left page coordinates:
//!
//! 1. [`group_lines`] merges segments that overlap vertically and sit close
//!    horizontally into one line, pieces ordered by `left`;
//! 2. [`group_blocks`] stacks consecutive lines of the same column into one
//!    block, joined by `\n`.
//!
//! All thresholds scale with line height, so the same ratios work for any
//! font size.

use super::extract::Block;

/// Two runs are on the same line when they overlap vertically by at least
/// this share of the shorter run's height.
pub const LINE_OVERLAP_RATIO: f32 = 0.5;

/// Runs further apart horizontally than this many line heights stay
/// separate, which keeps column gutters intact.
pub const MAX_RUN_GAP_RATIO: f32 = 1.0;

/// A horizontal gap wider than this share of the line height becomes a space.
pub const WORD_GAP_RATIO: f32 = 0.15;

/// Lines whose vertical gap is at most this share of the line height belong
/// to the same block.
pub const LINE_GAP_RATIO: f32 = 0.6;

/// Segments → lines → blocks.
pub fn group_segments(segments: Vec<Block>) -> Vec<Block> {
    group_blocks(group_lines(segments))
}

/// Merge same-line segments into one block per visual line.
///
/// Blank segments are dropped; spacing is rebuilt from the gaps between
/// runs. The result is sorted by `(top, left)`.
pub fn group_lines(segments: Vec<Block>) -> Vec<Block> {
    let mut runs: Vec<Block> = segments
        .into_iter()
        .filter(|s| !s.text.trim().is_empty())
        .collect();
    runs.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.left.total_cmp(&b.left)));

    let mut lines: Vec<Vec<Block>> = Vec::new();
    for run in runs {
        let target = lines
            .iter()
            .rposition(|pieces| same_line(&bounds(pieces), &run));
        match target {
            Some(i) => lines[i].push(run),
            None => lines.push(vec![run]),
        }
    }

    let mut merged: Vec<Block> = lines.into_iter().map(join_line).collect();
    merged.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.left.total_cmp(&b.left)));
    merged
}

/// Stack consecutive lines of one column into blocks.
pub fn group_blocks(lines: Vec<Block>) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    for line in lines {
        match blocks.iter().rposition(|b| continues_block(b, &line)) {
            Some(i) => {
                let block = &mut blocks[i];
                block.text.push('\n');
                block.text.push_str(&line.text);
                extend(block, &line);
            }
            None => blocks.push(line),
        }
    }
    blocks
}

// ── Geometry helpers ─────────────────────────────────────────────────────

fn height(b: &Block) -> f32 {
    (b.bottom - b.top).max(0.0)
}

fn horizontal_gap(a: &Block, b: &Block) -> f32 {
    (b.left - a.right).max(a.left - b.right)
}

fn same_line(line: &Block, run: &Block) -> bool {
    let overlap = line.bottom.min(run.bottom) - line.top.max(run.top);
    let shorter = height(line).min(height(run));
    let taller = height(line).max(height(run));
    overlap > 0.0
        && overlap >= LINE_OVERLAP_RATIO * shorter
        && horizontal_gap(line, run) <= MAX_RUN_GAP_RATIO * taller
}

fn continues_block(block: &Block, line: &Block) -> bool {
    let gap = line.top - block.bottom;
    let shared_width = block.right.min(line.right) - block.left.max(line.left);
    gap >= -LINE_GAP_RATIO * height(line)
        && gap <= LINE_GAP_RATIO * height(line)
        && shared_width > 0.0
}

fn extend(target: &mut Block, other: &Block) {
    target.left = target.left.min(other.left);
    target.top = target.top.min(other.top);
    target.right = target.right.max(other.right);
    target.bottom = target.bottom.max(other.bottom);
}

fn bounds(pieces: &[Block]) -> Block {
    let mut acc = Block::new(
        f32::INFINITY,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NEG_INFINITY,
        String::new(),
    );
    for piece in pieces {
        extend(&mut acc, piece);
    }
    acc
}

/// Order a line's pieces by `left` and join them, inserting a space only
/// where the gap between runs is wide enough to be one.
fn join_line(mut pieces: Vec<Block>) -> Block {
    pieces.sort_by(|a, b| a.left.total_cmp(&b.left));
    let mut line = bounds(&pieces);
    let word_gap = WORD_GAP_RATIO * height(&line);

    let mut prev_right: Option<f32> = None;
    for piece in &pieces {
        if let Some(right) = prev_right {
            if piece.left - right > word_gap {
                line.text.push(' ');
            }
        }
        line.text.push_str(piece.text.trim());
        prev_right = Some(prev_right.map_or(piece.right, |r| r.max(piece.right)));
    }
    line
}
