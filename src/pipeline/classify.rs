//! Line classification: assign every line exactly one role.
//!
//! A [`Classifier`] is a compiled [`Vocabulary`]. Rules are tried in table
//! order and the first match wins; a line nothing matches is body text, so
//! classification never fails. The classifier holds no state between lines
//! and does not check heading hierarchy (an H3 may appear with no H2 above).

use crate::error::PdfAtxError;
use crate::vocabulary::{LineTest, Role, RuleSpec, Vocabulary};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A trimmed line tagged with its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub text: String,
    pub role: Role,
    /// ATX depth; `None` for body lines.
    pub depth: Option<u8>,
    /// Index of the rule that fired; `None` when the line fell through to body.
    pub rule: Option<usize>,
}

#[derive(Debug)]
enum Test {
    Prefix(Vec<String>),
    Suffix(Vec<String>),
    Pattern(Regex),
    ShortMarker { marker: String, max_chars: usize },
}

impl Test {
    fn matches(&self, line: &str) -> bool {
        match self {
            Test::Prefix(values) => values.iter().any(|v| line.starts_with(v.as_str())),
            Test::Suffix(values) => values.iter().any(|v| line.ends_with(v.as_str())),
            Test::Pattern(re) => re.is_match(line),
            Test::ShortMarker { marker, max_chars } => {
                line.starts_with(marker.as_str()) && line.chars().count() <= *max_chars
            }
        }
    }
}

#[derive(Debug)]
struct Rule {
    test: Test,
    unless_prefix: Option<String>,
    role: Role,
    depth: Option<u8>,
}

impl Rule {
    fn compile(index: usize, spec: &RuleSpec) -> Result<Self, PdfAtxError> {
        let invalid = |detail: String| PdfAtxError::InvalidVocabulary {
            rule: index,
            detail,
        };

        let test = match &spec.test {
            LineTest::Prefix { values } | LineTest::Suffix { values } => {
                if values.is_empty() {
                    return Err(invalid("no values to match".into()));
                }
                if values.iter().any(|v| v.is_empty()) {
                    return Err(invalid("empty value would match every line".into()));
                }
                if matches!(spec.test, LineTest::Prefix { .. }) {
                    Test::Prefix(values.clone())
                } else {
                    Test::Suffix(values.clone())
                }
            }
            LineTest::Pattern { regex } => {
                Test::Pattern(Regex::new(regex).map_err(|e| invalid(e.to_string()))?)
            }
            LineTest::ShortMarker { marker, max_chars } => {
                if marker.is_empty() {
                    return Err(invalid("empty marker would match every short line".into()));
                }
                Test::ShortMarker {
                    marker: marker.clone(),
                    max_chars: *max_chars,
                }
            }
        };

        let depth = spec.effective_depth();
        if let Some(d) = depth {
            if !(1..=6).contains(&d) {
                return Err(invalid(format!("depth {d} is not an ATX level (1–6)")));
            }
        }

        Ok(Self {
            test,
            unless_prefix: spec.unless_prefix.clone(),
            role: spec.role,
            depth,
        })
    }

    fn fires(&self, line: &str) -> bool {
        if let Some(ref guard) = self.unless_prefix {
            if line.starts_with(guard.as_str()) {
                return false;
            }
        }
        self.test.matches(line)
    }
}

/// Compiled, ordered rule table.
#[derive(Debug)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Compile `vocabulary`, rejecting bad regexes, empty matchers and
    /// depths outside 1–6.
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, PdfAtxError> {
        let rules = vocabulary
            .rules
            .iter()
            .enumerate()
            .map(|(i, spec)| Rule::compile(i, spec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Classify one line. Surrounding whitespace is trimmed first.
    pub fn classify(&self, line: &str) -> ClassifiedLine {
        let text = line.trim();
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.fires(text) {
                return ClassifiedLine {
                    text: text.to_string(),
                    role: rule.role,
                    depth: rule.depth,
                    rule: Some(i),
                };
            }
        }
        ClassifiedLine {
            text: text.to_string(),
            role: Role::Body,
            depth: None,
            rule: None,
        }
    }

    /// Classify every non-blank line of `text`, in order.
    pub fn classify_text(&self, text: &str) -> Vec<ClassifiedLine> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| self.classify(l))
            .collect()
    }
}
