//! # pdf-atx
//!
//! Convert text-layer PDF documents to ATX-style Markdown.
//!
//! Each page's positioned text blocks are put back into reading order
//! across up to three columns. Footer and bullet noise is dropped, words
//! split by a wrap hyphen are rejoined, and every line is classified by an
//! ordered, data-driven rule table into title, section, subsection,
//! citation or body text. The result is rendered as `#`-prefixed headings
//! with body text coalesced into running paragraphs.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     read the file, check the %PDF magic
//!  ├─ 2. Extract   positioned text blocks per page via pdfium
//!  ├─ 3. Noise     drop footer phrases and bullet glyphs
//!  ├─ 4. Columns   (top, left) sort, then left/middle/right thirds
//!  ├─ 5. Hyphens   "exam- ple" → "example"
//!  ├─ 6. Classify  first matching rule wins, else body
//!  └─ 7. Render    "# title" + per-page ATX Markdown
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_atx::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let output = convert("handout.pdf", &ConversionConfig::default())?;
//!     println!("{}", output.markdown);
//!     eprintln!(
//!         "{} headings, {} citations",
//!         output.stats.heading_lines, output.stats.citation_lines
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Custom vocabularies
//!
//! The default rule table targets one family of chiropractic/ADHD
//! handouts. Any other corpus supplies its own [`Vocabulary`], built in code
//! or loaded from JSON:
//!
//! ```rust
//! use pdf_atx::{Classifier, Role, RuleSpec, Vocabulary};
//!
//! let vocab = Vocabulary::empty()
//!     .rule(RuleSpec::prefix(Role::Section, ["Chapter "]))
//!     .rule(RuleSpec::suffix(Role::Citation, [")"]));
//! let classifier = Classifier::new(&vocab).unwrap();
//! assert_eq!(classifier.classify("Chapter 2 Methods").role, Role::Section);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2atx` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! The pdfium shared library is loaded at runtime: set `PDFIUM_LIB_PATH` or
//! install it on the system library path.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pdfium;
pub mod pipeline;
pub mod progress;
pub mod vocabulary;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PageSelection, PageSeparator};
pub use convert::{
    convert, convert_bytes, convert_source, convert_to_file, inspect, title_from_file_name,
};
pub use error::PdfAtxError;
pub use output::{ConversionOutput, ConversionStats, DocumentMetadata, PageResult};
pub use pipeline::classify::{ClassifiedLine, Classifier};
pub use pipeline::extract::{Block, BlockSource, Page, PdfiumSource};
pub use pipeline::noise::NoiseFilterConfig;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use vocabulary::{LineTest, Role, RuleSpec, Vocabulary};
