//! Column reassembly: turn a page of positioned blocks into one text stream.
//!
//! The page is split into three equal vertical zones. Ordering is two-stage:
//!
//! 1. every block on the page is stably sorted by `(top, left)`;
//! 2. the sorted sequence is partitioned by zone, and the zones are emitted
//!    left, middle, right, each keeping the order from step 1.
//!
//! Zones inherit their order from the global sort and are never re-sorted.
//! Thirds-of-width is a strong layout assumption; it holds for the two- and
//! three-column handouts this was tuned on and nothing more.

use super::extract::Block;

/// Separator placed between consecutive blocks (and zones) in the stream.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// One third of the page width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Left,
    Middle,
    Right,
}

impl Zone {
    /// Zone of a block whose left edge is at `left` on a page `width` wide.
    ///
    /// Only the left edge matters. Anything at or past `2 * width / 3`,
    /// including blocks starting beyond the right edge, is [`Zone::Right`].
    pub fn of(left: f32, width: f32) -> Zone {
        if left < width / 3.0 {
            Zone::Left
        } else if left < 2.0 * width / 3.0 {
            Zone::Middle
        } else {
            Zone::Right
        }
    }
}

/// Blocks in linear reading order.
pub fn reading_order(blocks: &[Block], width: f32) -> Vec<&Block> {
    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.left.total_cmp(&b.left)));

    let mut left = Vec::new();
    let mut middle = Vec::new();
    let mut right = Vec::new();
    for block in sorted {
        match Zone::of(block.left, width) {
            Zone::Left => left.push(block),
            Zone::Middle => middle.push(block),
            Zone::Right => right.push(block),
        }
    }

    left.extend(middle);
    left.extend(right);
    left
}

/// Reading-order text of the page, blocks separated by a blank line.
pub fn reassemble(blocks: &[Block], width: f32) -> String {
    reading_order(blocks, width)
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
