//! Hyphenation repair: rejoin words split across a line wrap.
//!
//! `"exam-\nple"` and `"exam- ple"` become `"example"`. A hyphen only goes
//! when a word character precedes it and whitespace followed by a word
//! character follows it, so `"well-known"` and `"pre- "` at the end of the
//! text are left alone.
//!
//! Both word boundaries are zero-width, so the match consumes only the hyphen
//! and the whitespace. Chains like `"a- b- c"` are therefore fully joined in a
//! single pass, which makes [`repair`] idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static RE_WRAPPED_HYPHEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b-\s+\b").unwrap());

/// Remove line-wrap hyphens from `text`.
pub fn repair(text: &str) -> Cow<'_, str> {
    RE_WRAPPED_HYPHEN.replace_all(text, "")
}
