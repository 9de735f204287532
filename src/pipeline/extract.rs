//! Block geometry extraction: the boundary between the pipeline and the PDF.
//!
//! The rest of the pipeline never looks at PDF bytes. It asks a
//! [`BlockSource`] for one [`Page`] at a time and works on the returned
//! blocks. [`PdfiumSource`] is the production implementation; a plain
//! `Vec<Page>` is a source too, which is what the tests use.
//!
//! ## Coordinates
//!
//! Blocks use a top-left origin: `top` grows downwards the page, so sorting
//! by ascending `top` reads the page from top to bottom. pdfium reports
//! bottom-left-origin rectangles; [`PdfiumSource`] flips them using the page
//! height, then hands its per-run segments to [`super::layout`] so each
//! block is a stack of whole lines.

use super::layout;
use crate::error::PdfAtxError;
use crate::output::DocumentMetadata;
use pdfium_render::prelude::*;
use tracing::{debug, info};

/// A positioned run of text reported by the extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub text: String,
}

impl Block {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32, text: impl Into<String>) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            text: text.into(),
        }
    }
}

/// All blocks of one page, in extraction order (which carries no meaning).
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 0-based page index.
    pub index: usize,
    /// Page width in points; drives the column zones.
    pub width: f32,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(index: usize, width: f32, blocks: Vec<Block>) -> Self {
        Self {
            index,
            width,
            blocks,
        }
    }
}

/// Anything that can hand out pages of positioned text blocks.
pub trait BlockSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract page `index` (0-based).
    fn page(&self, index: usize) -> Result<Page, PdfAtxError>;
}

impl BlockSource for Vec<Page> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&self, index: usize) -> Result<Page, PdfAtxError> {
        self.get(index)
            .cloned()
            .ok_or(PdfAtxError::PageOutOfRange {
                page: index + 1,
                total: self.len(),
            })
    }
}

/// A PDF opened through pdfium.
///
/// The underlying document handle lives exactly as long as this value, so
/// dropping the source (on success or on an early `?` return) closes it.
pub struct PdfiumSource<'a> {
    document: PdfDocument<'a>,
    name: String,
}

impl<'a> PdfiumSource<'a> {
    /// Open a PDF held in memory.
    ///
    /// `name` is only used in error messages.
    pub fn open(
        pdfium: &'a Pdfium,
        bytes: &'a [u8],
        password: Option<&'a str>,
        name: &str,
    ) -> Result<Self, PdfAtxError> {
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, password)
            .map_err(|e| {
                let err_str = format!("{:?}", e);
                if err_str.contains("Password") || err_str.contains("password") {
                    if password.is_some() {
                        PdfAtxError::WrongPassword {
                            name: name.to_string(),
                        }
                    } else {
                        PdfAtxError::PasswordRequired {
                            name: name.to_string(),
                        }
                    }
                } else {
                    PdfAtxError::CorruptPdf {
                        name: name.to_string(),
                        detail: err_str,
                    }
                }
            })?;

        info!("PDF loaded: '{}', {} pages", name, document.pages().len());

        Ok(Self {
            document,
            name: name.to_string(),
        })
    }

    /// Document information dictionary plus page count and version.
    pub fn metadata(&self) -> DocumentMetadata {
        let metadata = self.document.metadata();

        let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
            metadata.get(tag).and_then(|t| {
                let v = t.value().trim().to_string();
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            })
        };

        DocumentMetadata {
            title: get_meta(PdfDocumentMetadataTagType::Title),
            author: get_meta(PdfDocumentMetadataTagType::Author),
            subject: get_meta(PdfDocumentMetadataTagType::Subject),
            creator: get_meta(PdfDocumentMetadataTagType::Creator),
            producer: get_meta(PdfDocumentMetadataTagType::Producer),
            creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
            modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
            page_count: self.page_count(),
            pdf_version: format!("{:?}", self.document.version()),
        }
    }
}

impl BlockSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page(&self, index: usize) -> Result<Page, PdfAtxError> {
        let total = self.page_count();
        if index >= total {
            return Err(PdfAtxError::PageOutOfRange {
                page: index + 1,
                total,
            });
        }

        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| PdfAtxError::ExtractionFailed {
                page: index + 1,
                detail: format!("{:?}", e),
            })?;

        let width = page.width().value;
        let height = page.height().value;

        let text = page.text().map_err(|e| PdfAtxError::ExtractionFailed {
            page: index + 1,
            detail: format!("{:?}", e),
        })?;

        let segments: Vec<Block> = text
            .segments()
            .iter()
            .map(|segment| {
                let rect = segment.bounds();
                Block {
                    left: rect.left().value,
                    top: height - rect.top().value,
                    right: rect.right().value,
                    bottom: height - rect.bottom().value,
                    text: segment.text(),
                }
            })
            .collect();
        let segment_count = segments.len();
        let blocks = layout::group_segments(segments);

        debug!(
            "'{}' page {}: {} segments grouped into {} blocks, width {:.1}pt",
            self.name,
            index + 1,
            segment_count,
            blocks.len(),
            width
        );

        Ok(Page::new(index, width, blocks))
    }
}
