//! Line-window boundary detection for documents without `##`/`###`
//! sections, and for Markdown produced by the HTML-only extraction path.

use crate::diagnostics::DiagnosticLog;
use crate::markdown::{count_links, count_non_empty, has_link};
use crate::thresholds::{
    FALLBACK_END_MIN_OFFSET, FALLBACK_GUARD_LOOKBACK, FALLBACK_GUARD_MARKER_LINKS,
    FALLBACK_GUARD_MARKER_WINDOW, FALLBACK_GUARD_RESCAN, FALLBACK_HEADING_DENSE_RATIO,
    FALLBACK_HEADING_LINK_RATIO, FALLBACK_HEADING_LOOKAHEAD, FALLBACK_HEADING_MIN_NON_EMPTY,
    FALLBACK_HEADING_MIN_SUBHEADINGS, FALLBACK_HEADING_WINDOW, FALLBACK_LIST_MIN_NON_EMPTY,
    FALLBACK_LIST_MIN_OFFSET, FALLBACK_LIST_RATIO, FALLBACK_LIST_WINDOW, FALLBACK_LOOKBACK,
    FALLBACK_MIN_SHORT_LINES, FALLBACK_PARAGRAPH_MAX_LINKS, FALLBACK_PARAGRAPH_MIN_CHARS,
    FALLBACK_PROSE_MAX_LINKS, FALLBACK_PROSE_MIN_CHARS, FALLBACK_SHORT_LINE,
};

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// A long line with few links.
fn is_paragraph(line: &str) -> bool {
    char_len(line) > FALLBACK_PARAGRAPH_MIN_CHARS && count_links(line) < FALLBACK_PARAGRAPH_MAX_LINKS
}

/// A long line that is almost link-free.
fn is_prose(line: &str) -> bool {
    char_len(line) > FALLBACK_PROSE_MIN_CHARS && count_links(line) <= FALLBACK_PROSE_MAX_LINKS
}

/// Short non-empty lines in the `FALLBACK_LOOKBACK` lines before `at`.
fn short_lines_before(lines: &[&str], at: usize) -> usize {
    let from = at.saturating_sub(FALLBACK_LOOKBACK);
    lines[from..at]
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && char_len(l) < FALLBACK_SHORT_LINE)
        .count()
}

/// First line of the main content, or 0.
///
/// A content-like paragraph, or a heading with such a paragraph shortly
/// after it, starts the content when enough short navigation lines precede
/// it.
#[must_use]
pub fn find_content_start(lines: &[&str]) -> usize {
    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let nav_above = || short_lines_before(lines, i) >= FALLBACK_MIN_SHORT_LINES;

        if is_paragraph(line) && !line.starts_with('[') && !line.starts_with('*') && nav_above() {
            return i;
        }

        if line.starts_with('#') {
            let window_end = (i + FALLBACK_HEADING_LOOKAHEAD).min(lines.len());
            let paragraph_follows = lines[i + 1..window_end].iter().any(|l| is_paragraph(l.trim()));
            if paragraph_follows && nav_above() {
                return i;
            }
        }
    }
    0
}

/// A `##` heading opening a link-dense window.
fn heading_opens_links(lines: &[&str], i: usize) -> bool {
    let window = &lines[i..(i + FALLBACK_HEADING_WINDOW).min(lines.len())];
    let non_empty = count_non_empty(window);
    if non_empty <= FALLBACK_HEADING_MIN_NON_EMPTY {
        return false;
    }
    let link_lines = window.iter().filter(|l| !l.trim().is_empty() && has_link(l)).count();
    let subheadings = window.iter().filter(|l| l.trim().starts_with("###")).count();
    let ratio = link_lines as f64 / non_empty as f64;

    (ratio > FALLBACK_HEADING_LINK_RATIO && subheadings >= FALLBACK_HEADING_MIN_SUBHEADINGS)
        || ratio > FALLBACK_HEADING_DENSE_RATIO
}

/// The window `[from, i]` is mostly lines with two or more links.
fn is_link_list_window(window: &[&str]) -> bool {
    let non_empty = count_non_empty(window);
    if non_empty <= FALLBACK_LIST_MIN_NON_EMPTY {
        return false;
    }
    let multi = window
        .iter()
        .filter(|l| !l.trim().is_empty() && count_links(l) >= 2)
        .count();
    multi as f64 / non_empty as f64 > FALLBACK_LIST_RATIO
}

/// Where to cut for a link-list window `[from, cut]`.
///
/// Substantial prose inside the window is kept. Without any, the cut backs
/// up over link-list lines directly above the window.
fn list_window_cut(lines: &[&str], start: usize, from: usize, cut: usize) -> usize {
    if let Some(k) = (from..=cut).rev().find(|&k| is_prose(lines[k].trim())) {
        return k + 1;
    }
    let mut at = from;
    while at > start {
        let above = lines[at - 1].trim();
        if !above.is_empty() && count_links(above) < 2 {
            break;
        }
        at -= 1;
    }
    at
}

/// End of the main content (exclusive), never before `start`.
#[must_use]
pub fn find_content_end(lines: &[&str], start: usize) -> usize {
    let len = lines.len();
    let floor = start + FALLBACK_END_MIN_OFFSET;
    let mut end = len;

    for i in (floor + 1..len).rev() {
        if lines[i].trim().starts_with("##") && heading_opens_links(lines, i) {
            end = i;
            break;
        }

        if i > start + FALLBACK_LIST_MIN_OFFSET {
            let from = i.saturating_sub(FALLBACK_LIST_WINDOW).max(start);
            if is_link_list_window(&lines[from..=i]) {
                end = list_window_cut(lines, start, from, i);
                break;
            }
        }
    }

    if end < len {
        end = rescan_after_prose(lines, start, end);
    }
    end.max(start)
}

/// If prose sits just above the cut, look past it for a clearer footer
/// heading: a `##` line followed by a link-heavy window.
fn rescan_after_prose(lines: &[&str], start: usize, end: usize) -> usize {
    let len = lines.len();
    let from = end.saturating_sub(FALLBACK_GUARD_LOOKBACK).max(start);
    let Some(prose) = (from..end).find(|&i| is_prose(lines[i].trim())) else {
        return end;
    };

    for j in prose + 1..(prose + FALLBACK_GUARD_RESCAN).min(len) {
        if !lines[j].trim().starts_with("##") || j + 5 >= len {
            continue;
        }
        let window = &lines[j..(j + FALLBACK_GUARD_MARKER_WINDOW).min(len)];
        let link_lines = window.iter().filter(|l| has_link(l)).count();
        if link_lines >= FALLBACK_GUARD_MARKER_LINKS {
            return j;
        }
    }
    end
}

/// Content range `[start, end)` of a section-less document.
pub fn detect_range(lines: &[&str], log: &mut DiagnosticLog) -> (usize, usize) {
    let start = find_content_start(lines);
    let end = find_content_end(lines, start);
    log.record(format!(
        "Line-window fallback: content lines {start}-{end} of {}",
        lines.len()
    ));
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(n: usize) -> String {
        format!("Paragraph {n} explains the subject in detail. ").repeat(6)
    }

    fn owned_lines(parts: &[String]) -> Vec<&str> {
        parts.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_start_after_short_navigation_lines() {
        let mut parts: Vec<String> = (0..12).map(|i| format!("Menu {i}")).collect();
        parts.push(para(0));
        parts.push(para(1));
        let lines = owned_lines(&parts);
        assert_eq!(find_content_start(&lines), 12);
    }

    #[test]
    fn test_start_on_heading_before_paragraph() {
        let mut parts: Vec<String> = (0..12).map(|i| format!("Menu {i}")).collect();
        parts.push("# Title".to_string());
        parts.push(String::new());
        parts.push(para(0));
        let lines = owned_lines(&parts);
        assert_eq!(find_content_start(&lines), 12);
    }

    #[test]
    fn test_start_zero_without_navigation() {
        let parts = vec![para(0), para(1)];
        assert_eq!(find_content_start(&owned_lines(&parts)), 0);
    }

    #[test]
    fn test_end_at_link_heavy_heading() {
        let mut parts: Vec<String> = (0..25).map(para).collect();
        parts.push("## More from us".to_string());
        for i in 0..10 {
            parts.push(format!("[Link {i}](/l/{i})"));
        }
        let lines = owned_lines(&parts);
        assert_eq!(find_content_end(&lines, 0), 25);
    }

    #[test]
    fn test_end_after_prose_in_list_window() {
        let mut parts: Vec<String> = (0..40).map(para).collect();
        for i in 0..12 {
            parts.push(format!("[A{i}](/a/{i}) | [B{i}](/b/{i})"));
        }
        let lines = owned_lines(&parts);
        let end = find_content_end(&lines, 0);
        assert_eq!(end, 40);
        assert!(lines[..end].iter().all(|l| count_links(l) == 0));
    }

    #[test]
    fn test_end_keeps_prose_inside_list_window() {
        let mut parts: Vec<String> = (0..40).map(para).collect();
        for i in 0..6 {
            parts.push(format!("[A{i}](/a/{i}) | [B{i}](/b/{i})"));
        }
        parts.push(para(99));
        for i in 0..6 {
            parts.push(format!("[C{i}](/c/{i}) | [D{i}](/d/{i})"));
        }
        let lines = owned_lines(&parts);
        assert_eq!(find_content_end(&lines, 0), 47);
    }

    #[test]
    fn test_short_document_is_kept() {
        let parts: Vec<String> = (0..5).map(para).collect();
        let lines = owned_lines(&parts);
        assert_eq!(detect_range(&lines, &mut DiagnosticLog::disabled()), (0, 5));
    }
}
