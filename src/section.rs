//! Section segmentation.
//!
//! Splits a Markdown document into `##`/`###`-headed sections. Deeper
//! headings nest inside the enclosing section and text before the first
//! section heading belongs to no section.

use crate::markdown::{heading_level, heading_text};

/// A contiguous, heading-delimited line range of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Position among the document's sections.
    pub index: usize,
    /// First line (the heading line).
    pub start_line: usize,
    /// Last line, inclusive.
    pub end_line: usize,
    /// Heading without its hashes.
    pub heading_text: String,
    /// 2 or 3.
    pub heading_level: usize,
    /// Lines `start_line..=end_line` joined with `'\n'`.
    pub content: String,
}

impl Section {
    /// Number of lines covered.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// True for the headings that open a section.
#[must_use]
pub fn is_section_heading(line: &str) -> bool {
    matches!(heading_level(line), Some(2 | 3))
}

/// Segment `lines` into sections.
///
/// An empty result means the document has no section structure and the
/// caller should use the line-window fallback.
#[must_use]
pub fn segment(lines: &[&str]) -> Vec<Section> {
    let starts: Vec<(usize, usize)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| match heading_level(line) {
            Some(level @ (2 | 3)) => Some((i, level)),
            _ => None,
        })
        .collect();

    let mut sections = Vec::with_capacity(starts.len());
    for (index, &(start_line, heading_level)) in starts.iter().enumerate() {
        let end_line = starts
            .get(index + 1)
            .map_or(lines.len() - 1, |&(next, _)| next - 1);

        sections.push(Section {
            index,
            start_line,
            end_line,
            heading_text: heading_text(lines[start_line]).to_string(),
            heading_level,
            content: lines[start_line..=end_line].join("\n"),
        });
    }

    sections
}
