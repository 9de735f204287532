//! Pipeline stages for PDF-to-ATX conversion.
//!
//! Each submodule implements exactly one transformation step, so every stage
//! can be tested on plain data without a PDF in sight.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ noise ──▶ columns ──▶ hyphenation ──▶ classify ──▶ render
//! (bytes)   (blocks)   (filter)  (order)     (rejoin)        (roles)      (ATX)
//! ```
//!
//! 1. [`input`]      : read a local file, check the `%PDF` magic, name it
//! 2. [`extract`]    : one [`extract::Page`] of positioned blocks per page, the
//!    pdfium segments regrouped into lines and blocks by [`layout`]
//! 3. [`noise`]      : drop footer and bullet-artifact blocks
//! 4. [`columns`]    : global `(top, left)` sort, then left/middle/right zones
//! 5. [`hyphenation`]: rejoin words split by a wrap hyphen
//! 6. [`classify`]   : first-match rule table over each trimmed line
//! 7. [`render`]     : ATX headings and coalesced body runs
//!
//! [`page::process_page`] strings steps 3–7 together for one page.

pub mod classify;
pub mod columns;
pub mod extract;
pub mod hyphenation;
pub mod input;
pub mod layout;
pub mod noise;
pub mod page;
pub mod render;
