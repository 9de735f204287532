//! Noise filtering: drop running footers and stray bullet glyphs.
//!
//! Filtering is block-granular. A block is either kept verbatim or removed
//! entirely; text inside a kept block is never redacted.

use super::extract::Block;
use serde::{Deserialize, Serialize};

/// Which blocks count as non-content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseFilterConfig {
    /// A block whose trimmed text contains any of these (case-sensitive) is dropped.
    pub footer_phrases: Vec<String>,

    /// A block whose trimmed text consists only of these glyphs (and
    /// whitespace) is dropped.
    pub bullet_glyphs: Vec<char>,
}

impl Default for NoiseFilterConfig {
    fn default() -> Self {
        Self {
            footer_phrases: vec![
                "ICPA4Kids.org".to_string(),
                "International Chiropractic Pediatric Association".to_string(),
            ],
            bullet_glyphs: vec!['•', '●', '○', '◦', '▪', '■', '‣', '∙', '·', '-', '*'],
        }
    }
}

impl NoiseFilterConfig {
    /// A filter that only drops empty blocks.
    pub fn disabled() -> Self {
        Self {
            footer_phrases: Vec::new(),
            bullet_glyphs: Vec::new(),
        }
    }

    /// `true` when `text` is a footer or a bullet-only artifact.
    ///
    /// Blank blocks are noise too: they contribute nothing but separators.
    pub fn is_noise(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return true;
        }
        if self
            .footer_phrases
            .iter()
            .any(|phrase| !phrase.is_empty() && trimmed.contains(phrase.as_str()))
        {
            return true;
        }
        trimmed
            .chars()
            .all(|c| c.is_whitespace() || self.bullet_glyphs.contains(&c))
    }

    /// Keep only content blocks, preserving their order.
    pub fn filter(&self, blocks: Vec<Block>) -> Vec<Block> {
        blocks
            .into_iter()
            .filter(|b| !self.is_noise(&b.text))
            .collect()
    }
}
