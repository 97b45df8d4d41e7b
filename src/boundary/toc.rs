//! Pass B: table-of-contents removal.

use crate::diagnostics::DiagnosticLog;
use crate::markdown::{count_links, count_non_empty, heading_level, heading_text, strip_inline_markup};
use crate::patterns::{TOC_LABELS, TOC_PHRASE};
use crate::thresholds::{TOC_MAX_ITERATIONS, TOC_MIN_LINKS, TOC_MIN_NON_EMPTY_LINES, TOC_WINDOW_LINES};

/// A removed table of contents, in the coordinates of the document it was
/// removed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocBlock {
    /// The "Contents" label line.
    pub start: usize,
    /// The `##` heading that ends the block; not removed.
    pub end: usize,
}

/// True for "Contents", "Table of contents" and lines mentioning the latter.
///
/// Heading hashes and emphasis are ignored, so `## **Contents**` counts.
#[must_use]
pub fn is_toc_label(line: &str) -> bool {
    let text = strip_inline_markup(heading_text(line)).trim().to_lowercase();
    TOC_LABELS.contains(&text.as_str()) || text.contains(TOC_PHRASE)
}

/// Find the first TOC block in `lines`.
///
/// A label qualifies when its window holds enough links and lines; the block
/// ends at the first `##` heading inside the window. A qualifying label with
/// no closing heading in the window is skipped.
#[must_use]
pub fn find_toc_block(lines: &[&str]) -> Option<TocBlock> {
    for (i, line) in lines.iter().enumerate() {
        if !is_toc_label(line) {
            continue;
        }

        let window_end = (i + TOC_WINDOW_LINES).min(lines.len());
        let window = &lines[i..window_end];
        if count_links(&window.join("\n")) <= TOC_MIN_LINKS
            || count_non_empty(window) <= TOC_MIN_NON_EMPTY_LINES
        {
            continue;
        }

        let close = (i + 1..window_end).find(|&j| heading_level(lines[j]) == Some(2));
        if let Some(end) = close {
            return Some(TocBlock { start: i, end });
        }
    }
    None
}

/// Remove up to `TOC_MAX_ITERATIONS` TOC blocks, rescanning after each.
pub fn remove_toc_blocks<'a>(
    mut lines: Vec<&'a str>,
    log: &mut DiagnosticLog,
) -> (Vec<&'a str>, Vec<TocBlock>) {
    let mut removed = Vec::new();

    for _ in 0..TOC_MAX_ITERATIONS {
        let Some(block) = find_toc_block(&lines) else {
            break;
        };
        log.record(format!(
            "Detected TOC at line {}, ends at line {} ({} lines removed)",
            block.start,
            block.end,
            block.end - block.start
        ));
        lines.drain(block.start..block.end);
        removed.push(block);
    }

    (lines, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toc_document() -> Vec<String> {
        let mut lines: Vec<String> = (0..5).map(|i| format!("intro line {i}")).collect();
        lines.push("Contents".to_string());
        for i in 0..20 {
            lines.push(format!("- [Chapter {i}](#chapter-{i})"));
        }
        lines.push("## Chapter 0".to_string());
        lines.push("Real text.".to_string());
        lines
    }

    #[test]
    fn test_toc_label_variants() {
        assert!(is_toc_label("Contents"));
        assert!(is_toc_label("  TABLE OF CONTENTS "));
        assert!(is_toc_label("## Table of contents"));
        assert!(is_toc_label("**On this page: table of contents**"));
        assert!(!is_toc_label("Contents of the box"));
    }

    #[test]
    fn test_toc_block_removed_up_to_h2() {
        let owned = toc_document();
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();
        assert_eq!(find_toc_block(&lines), Some(TocBlock { start: 5, end: 26 }));

        let (out, removed) = remove_toc_blocks(lines, &mut DiagnosticLog::disabled());
        assert_eq!(removed.len(), 1);
        assert_eq!(out.len(), 5 + 2);
        assert_eq!(out[4], "intro line 4");
        assert_eq!(out[5], "## Chapter 0");
    }

    #[test]
    fn test_label_without_links_is_kept() {
        let lines = vec!["Contents", "a", "b", "c", "d", "e", "f", "## Next"];
        assert_eq!(find_toc_block(&lines), None);
    }

    #[test]
    fn test_h3_does_not_close_toc() {
        let mut owned = vec!["Contents".to_string()];
        owned.extend((0..10).map(|i| format!("[s{i}](#s{i})")));
        owned.push("### Sub".to_string());
        owned.push("## Main".to_string());
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();
        assert_eq!(find_toc_block(&lines), Some(TocBlock { start: 0, end: 12 }));
    }

    #[test]
    fn test_multiple_tocs_removed() {
        let mut owned = Vec::new();
        for round in 0..2 {
            owned.push("Table of contents".to_string());
            owned.extend((0..10).map(|i| format!("[r{round} s{i}](#s{i})")));
            owned.push(format!("## Part {round}"));
            owned.push("text".to_string());
        }
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();
        let (out, removed) = remove_toc_blocks(lines, &mut DiagnosticLog::disabled());
        assert_eq!(removed.len(), 2);
        assert_eq!(out, vec!["## Part 0", "text", "## Part 1", "text"]);
    }
}
