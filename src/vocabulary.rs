//! Classification vocabulary: the ordered rule table behind the line classifier.
//!
//! A [`Vocabulary`] is pure data: an ordered list of [`RuleSpec`] entries,
//! each pairing a line test (prefix, suffix, regex pattern or short marker)
//! with the [`Role`] and ATX depth it assigns. Rules are evaluated top to
//! bottom and the first match wins; a line no rule matches is body text.
//!
//! The vocabulary is serialisable, so supporting a new document family means
//! shipping a new JSON file rather than touching the classifier:
//!
//! ```json
//! {
//!   "rules": [
//!     { "role": "section", "test": { "kind": "prefix", "values": ["Results"] } },
//!     { "role": "citation", "unless_prefix": "#####",
//!       "test": { "kind": "suffix", "values": [")"] } }
//!   ]
//! }
//! ```
//!
//! [`Vocabulary::default`] is tuned for the chiropractic/ADHD research
//! brochures this tool was first written for.

use crate::error::PdfAtxError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Semantic role of a classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Document title line.
    Title,
    /// Top-level section heading.
    Section,
    /// Subsection heading.
    Subsection,
    /// Bibliographic reference line.
    Citation,
    /// Running paragraph text.
    Body,
}

impl Role {
    /// ATX depth used when a rule does not set one explicitly.
    ///
    /// `None` for [`Role::Body`], which is never rendered as a heading.
    pub fn default_depth(self) -> Option<u8> {
        match self {
            Role::Title => Some(1),
            Role::Section => Some(2),
            Role::Subsection => Some(3),
            Role::Citation => Some(5),
            Role::Body => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Title => "title",
            Role::Section => "section",
            Role::Subsection => "subsection",
            Role::Citation => "citation",
            Role::Body => "body",
        };
        f.write_str(s)
    }
}

/// The test a rule applies to a trimmed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineTest {
    /// Line starts with any of `values` (case-sensitive).
    Prefix { values: Vec<String> },
    /// Line ends with any of `values` (case-sensitive).
    Suffix { values: Vec<String> },
    /// Regular expression; anchor it with `^`/`$` to test line start/end.
    Pattern { regex: String },
    /// Line starts with `marker` and is at most `max_chars` characters long.
    ShortMarker { marker: String, max_chars: usize },
}

/// One entry of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Role assigned when the rule fires.
    pub role: Role,

    /// ATX depth (1–6). Falls back to [`Role::default_depth`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,

    /// What the line must look like.
    pub test: LineTest,

    /// Guard: the rule never fires on lines starting with this text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless_prefix: Option<String>,
}

impl RuleSpec {
    pub fn prefix<I, S>(role: Role, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            role,
            LineTest::Prefix {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn suffix<I, S>(role: Role, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            role,
            LineTest::Suffix {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn pattern(role: Role, regex: impl Into<String>) -> Self {
        Self::new(
            role,
            LineTest::Pattern {
                regex: regex.into(),
            },
        )
    }

    pub fn short_marker(role: Role, marker: impl Into<String>, max_chars: usize) -> Self {
        Self::new(
            role,
            LineTest::ShortMarker {
                marker: marker.into(),
                max_chars,
            },
        )
    }

    fn new(role: Role, test: LineTest) -> Self {
        Self {
            role,
            depth: None,
            test,
            unless_prefix: None,
        }
    }

    /// Override the rendered ATX depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Suppress the rule on lines starting with `prefix`.
    pub fn unless_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.unless_prefix = Some(prefix.into());
        self
    }

    /// Depth this rule renders at, after applying the role default.
    pub fn effective_depth(&self) -> Option<u8> {
        match self.role {
            Role::Body => None,
            role => self.depth.or(role.default_depth()),
        }
    }
}

/// Ordered classification rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub rules: Vec<RuleSpec>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::chiropractic_adhd()
    }
}

impl Vocabulary {
    /// An empty table: every line is body text.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule at the lowest priority.
    pub fn rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules for the ICPA "ADHD - Research Chiro May Alleviate ADHD" handout family.
    pub fn chiropractic_adhd() -> Self {
        Self::empty()
            .rule(RuleSpec::prefix(
                Role::Title,
                ["ADHD - Research Chiro May Alleviate ADHD"],
            ))
            .rule(RuleSpec::prefix(
                Role::Section,
                ["Research Shows Chiropractic", "Help a Child in Your Life"],
            ))
            .rule(RuleSpec::prefix(
                Role::Subsection,
                [
                    "The Latest Research",
                    "Previous Research",
                    "Case Studies",
                    "Theories on How Chiropractic",
                ],
            ))
            .rule(RuleSpec::pattern(Role::Section, r"^#\d+:"))
            .rule(RuleSpec::short_marker(Role::Section, "#", 4))
            .rule(RuleSpec::prefix(Role::Subsection, ["ADHD"]).unless_prefix("#"))
            .rule(RuleSpec::suffix(Role::Citation, [")"]).unless_prefix("#####"))
    }

    /// Parse a vocabulary from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a vocabulary from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PdfAtxError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| PdfAtxError::VocabularyReadFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::from_json_str(&raw).map_err(|e| PdfAtxError::VocabularyReadFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Pretty-printed JSON, suitable as a starting point for a custom file.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
