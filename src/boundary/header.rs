//! Pass A: header/navigation trim.
//!
//! A `# ` heading is taken as proof of the article start. Without one, the
//! first `## ` heading is a weaker proxy and the preamble above it is only
//! dropped when it looks like navigation.

use crate::diagnostics::{truncate, DiagnosticLog};
use crate::markdown::{count_links, count_non_empty, heading_level};
use crate::thresholds::{HEADER_MIN_START_LINE, HEADER_NAV_MIN_LINES, HEADER_NAV_MIN_LINKS};

/// Why the preamble was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderReason {
    /// A level-1 heading marks the article start.
    TitleHeading,
    /// The preamble above the first `##` is link- or line-heavy.
    NavigationDensity,
}

/// A header trim that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderTrim {
    /// Lines removed from the top.
    pub removed_lines: usize,
    pub reason: HeaderReason,
}

/// Index of the first level-1 heading.
#[must_use]
pub fn find_title_heading(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|l| heading_level(l) == Some(1))
}

/// Index of the first level-2 heading.
#[must_use]
pub fn find_first_h2(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|l| heading_level(l) == Some(2))
}

/// Decide whether the lines above the article start are header/navigation.
///
/// Returns `None` when nothing should be removed: no heading was found, the
/// start is within the first lines, or a `##`-proxied preamble is short and
/// link-light (it may be a genuine lead-in).
#[must_use]
pub fn detect_header(lines: &[&str], log: &mut DiagnosticLog) -> Option<HeaderTrim> {
    let title = find_title_heading(lines);
    let (start, reason) = match title {
        Some(line) => {
            log.record(format!("Found H1 title at line {line}: {}", truncate(lines[line].trim(), 50)));
            (line, HeaderReason::TitleHeading)
        }
        None => {
            let line = find_first_h2(lines)?;
            log.record(format!("First ## heading at line {line}: {}", truncate(lines[line].trim(), 50)));
            (line, HeaderReason::NavigationDensity)
        }
    };

    if start <= HEADER_MIN_START_LINE {
        return None;
    }

    let preamble = &lines[..start];
    let links = count_links(&preamble.join("\n"));
    let non_empty = count_non_empty(preamble);
    log.record(format!(
        "    Header region (lines 0-{start}): non-empty lines {non_empty}, links {links}"
    ));

    let navigation_like = links > HEADER_NAV_MIN_LINKS || non_empty > HEADER_NAV_MIN_LINES;
    if reason == HeaderReason::NavigationDensity && !navigation_like {
        log.record("    -> Keeping header (low navigation content)");
        return None;
    }

    log.record(format!("    >>> REMOVING header navigation ({reason:?})"));
    Some(HeaderTrim {
        removed_lines: start,
        reason,
    })
}
