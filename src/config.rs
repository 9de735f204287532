//! Configuration types for PDF-to-ATX conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the plain
//! pipeline exactly: default vocabulary and noise filter, every page, pages
//! concatenated with no separator, no front matter.

use crate::error::PdfAtxError;
use crate::pipeline::classify::Classifier;
use crate::pipeline::noise::NoiseFilterConfig;
use crate::progress::ProgressCallback;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a PDF-to-ATX conversion.
///
/// # Example
/// ```rust
/// use pdf_atx::{ConversionConfig, PageSelection, Vocabulary};
///
/// let config = ConversionConfig::builder()
///     .vocabulary(Vocabulary::default())
///     .pages(PageSelection::Range(1, 3))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Ordered classification rules. Default: [`Vocabulary::chiropractic_adhd`].
    pub vocabulary: Vocabulary,

    /// Footer phrases and bullet glyphs dropped before reassembly.
    pub noise: NoiseFilterConfig,

    /// Page selection. Default: all pages.
    pub pages: PageSelection,

    /// Inserted between consecutive pages. Default: nothing.
    pub page_separator: PageSeparator,

    /// Document title. If None, derived from the input file name.
    pub title: Option<String>,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Prepend YAML front-matter with document metadata. Default: false.
    pub include_metadata: bool,

    /// Per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("vocabulary_rules", &self.vocabulary.rules.len())
            .field("noise", &self.noise)
            .field("pages", &self.pages)
            .field("page_separator", &self.page_separator)
            .field("title", &self.title)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("include_metadata", &self.include_metadata)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.config.vocabulary = vocabulary;
        self
    }

    pub fn noise(mut self, noise: NoiseFilterConfig) -> Self {
        self.config.noise = noise;
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn page_separator(mut self, sep: PageSeparator) -> Self {
        self.config.page_separator = sep;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn include_metadata(mut self, v: bool) -> Self {
        self.config.include_metadata = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// The vocabulary is compiled once here so a bad regex or depth is
    /// reported before any PDF is opened.
    pub fn build(self) -> Result<ConversionConfig, PdfAtxError> {
        let c = &self.config;
        Classifier::new(&c.vocabulary)?;
        if let PageSelection::Range(start, end) = c.pages {
            if start == 0 || start > end {
                return Err(PdfAtxError::InvalidConfig(format!(
                    "Page range must be 1-indexed with start <= end, got {start}-{end}"
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Specifies which pages of the PDF to convert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Convert all pages (default).
    #[default]
    All,
    /// Convert a single page (1-indexed).
    Single(usize),
    /// Convert a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Convert specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

/// How to separate pages in the assembled Markdown output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSeparator {
    /// Plain concatenation. (default)
    #[default]
    None,
    /// Horizontal rule: "\n\n---\n\n"
    HorizontalRule,
    /// HTML comment with page number: "<!-- page N -->"
    Comment,
    /// Custom string inserted between pages.
    Custom(String),
}

impl PageSeparator {
    /// Render the separator placed before page `page_num` (1-indexed).
    pub fn render(&self, page_num: usize) -> String {
        match self {
            PageSeparator::None => String::new(),
            PageSeparator::HorizontalRule => "\n\n---\n\n".to_string(),
            PageSeparator::Comment => format!("\n\n<!-- page {} -->\n\n", page_num),
            PageSeparator::Custom(s) => format!("\n\n{}\n\n", s),
        }
    }
}
