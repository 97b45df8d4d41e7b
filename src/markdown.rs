//! Line-level Markdown utilities.
//!
//! The boundary detector works on the document as a sequence of lines and
//! only needs to recognise ATX headings, inline links and blank lines; no
//! Markdown parser is involved.

use crate::patterns::{INLINE_MARKUP, MARKDOWN_LINK};

/// Split a document into lines, keeping a trailing empty line if present.
///
/// Unlike [`str::lines`], a final `'\n'` produces a final empty line, so line
/// indices stay stable when the document is re-joined with `'\n'`.
#[must_use]
pub fn split_lines(markdown: &str) -> Vec<&str> {
    markdown.split('\n').collect()
}

/// ATX heading level of a line (`# ` is 1, `## ` is 2, ...).
///
/// Leading and trailing whitespace is ignored. The hashes must be followed
/// by a space, so `#tag` and `####` alone are not headings.
///
/// # Examples
///
/// ```
/// use rs_mdclean::markdown::heading_level;
///
/// assert_eq!(heading_level("## Setup"), Some(2));
/// assert_eq!(heading_level("  ### Details"), Some(3));
/// assert_eq!(heading_level("#hashtag"), None);
/// ```
#[must_use]
pub fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    trimmed[hashes..].starts_with(' ').then_some(hashes)
}

/// Heading text without the leading hashes.
#[must_use]
pub fn heading_text(line: &str) -> &str {
    line.trim().trim_start_matches('#').trim()
}

/// Number of `[label](target)` constructs in `text`.
#[must_use]
pub fn count_links(text: &str) -> usize {
    MARKDOWN_LINK.find_iter(text).count()
}

#[must_use]
pub fn has_link(line: &str) -> bool {
    MARKDOWN_LINK.is_match(line)
}

#[inline]
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Number of non-blank lines.
#[must_use]
pub fn count_non_empty(lines: &[&str]) -> usize {
    lines.iter().filter(|l| !is_blank(l)).count()
}

/// Replace every link with its label: `[docs](url)` becomes `docs`.
#[must_use]
pub fn strip_link_markup(text: &str) -> String {
    MARKDOWN_LINK.replace_all(text, "$1").into_owned()
}

/// Remove emphasis, strike-through and code markers.
#[must_use]
pub fn strip_inline_markup(text: &str) -> String {
    INLINE_MARKUP.replace_all(text, "").into_owned()
}

/// Keep at most `max_run` consecutive blank lines.
#[must_use]
pub fn collapse_blank_runs<'a>(lines: &[&'a str], max_run: usize) -> Vec<&'a str> {
    let mut out = Vec::with_capacity(lines.len());
    let mut run = 0;

    for &line in lines {
        if is_blank(line) {
            run += 1;
            if run <= max_run {
                out.push(line);
            }
        } else {
            run = 0;
            out.push(line);
        }
    }

    out
}

/// Drop blank lines from the end of `lines`.
pub fn trim_trailing_blank(lines: &mut Vec<&str>) {
    while lines.last().is_some_and(|l| is_blank(l)) {
        lines.pop();
    }
}
