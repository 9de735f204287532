//! Markdown rendering of classified lines.
//!
//! Headings are emitted as `"#" * depth + " " + text + "\n\n"`. Body lines
//! are appended as `text + " "`, so consecutive body lines run together into
//! one paragraph until the next heading (whose output follows directly) or
//! the end of the page. No de-duplication or hierarchy fixing happens here.

use super::classify::ClassifiedLine;

/// Render one ATX heading line, including its trailing blank line.
pub fn render_heading(depth: u8, text: &str) -> String {
    let mut out = String::with_capacity(depth as usize + text.len() + 3);
    for _ in 0..depth {
        out.push('#');
    }
    out.push(' ');
    out.push_str(text);
    out.push_str("\n\n");
    out
}

/// Render a page worth of classified lines.
pub fn render_page(lines: &[ClassifiedLine]) -> String {
    let mut out = String::new();
    for line in lines {
        match line.depth {
            Some(depth) => out.push_str(&render_heading(depth, &line.text)),
            None => {
                out.push_str(&line.text);
                out.push(' ');
            }
        }
    }
    out
}
