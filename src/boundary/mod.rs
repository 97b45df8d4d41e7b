//! Content boundary detection.
//!
//! Given crawler Markdown and, optionally, the page's HTML, find the line
//! range that holds the article body:
//!
//! 1. Pass A drops header/navigation lines above the title ([`header`]).
//! 2. Pass B removes table-of-contents link blocks ([`toc`]).
//! 3. Pass C classifies each `##`/`###` section with the footer rules,
//!    corroborated against the HTML ([`classify`]).
//! 4. Pass D marks the trailing footer cascade ([`cascade`]) and explicit
//!    footer markers move the end cutoff earlier ([`markers`]).
//!
//! Documents without section headings use the line-window heuristics in
//! [`fallback`]. Every decision is written to the [`DiagnosticLog`].

pub mod cascade;
pub mod classify;
pub mod fallback;
pub mod header;
pub mod markers;
pub mod toc;

use tracing::debug;

use crate::cross_validate::{AncestorWalkFinder, ContainerFinder, CrossValidator};
use crate::diagnostics::{truncate, DiagnosticLog};
use crate::markdown::{collapse_blank_runs, heading_level, split_lines, trim_trailing_blank};
use crate::options::Options;
use crate::section::segment;
use crate::thresholds::MAX_BLANK_RUN;

pub use cascade::Cascade;
pub use classify::ClassifiedSection;
pub use header::{HeaderReason, HeaderTrim};
pub use markers::{MarkerHit, MarkerKind};
pub use toc::TocBlock;

/// Lines shown in the input preview of the diagnostic log.
const PREVIEW_LINES: usize = 60;

/// The detected content range.
///
/// Line numbers refer to the document after Pass A and Pass B, which is the
/// document the sections were segmented from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundaries {
    /// First content line.
    pub content_start_line: usize,
    /// One past the last content line.
    pub content_end_line: usize,
    /// Lines in the document after Pass A and Pass B.
    pub total_lines: usize,
}

/// How the content range was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Section classification with cascade and markers.
    Sections,
    /// Line-window heuristics for a section-less document.
    LineWindow,
    /// Footer trimming disabled; only Pass A and Pass B ran.
    Untrimmed,
}

/// Everything one cleaning run decided.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// The cleaned Markdown.
    pub markdown: String,
    pub boundaries: Boundaries,
    pub method: Method,
    pub header: Option<HeaderTrim>,
    pub toc_blocks: Vec<TocBlock>,
    pub sections: Vec<ClassifiedSection>,
    pub cascade: Cascade,
    pub marker: Option<MarkerHit>,
}

/// Clean crawler Markdown, corroborating against `html` when non-empty.
///
/// Never fails: missing HTML, missing headings and empty input all degrade
/// to less aggressive trimming.
///
/// # Examples
///
/// ```
/// use rs_mdclean::boundary::clean;
/// use rs_mdclean::{DiagnosticLog, Options};
///
/// let md = "# Title\n\nSome text.\n";
/// let outcome = clean(md, "", &Options::default(), &mut DiagnosticLog::disabled());
/// assert_eq!(outcome.markdown, "# Title\n\nSome text.");
/// ```
pub fn clean(
    markdown: &str,
    html: &str,
    options: &Options,
    log: &mut DiagnosticLog,
) -> CleanOutcome {
    let validator = if options.cross_validate {
        CrossValidator::new(html)
    } else {
        CrossValidator::disabled(AncestorWalkFinder)
    };
    clean_with_validator(markdown, &validator, options, log)
}

/// [`clean`] with a caller-supplied cross-validator.
pub fn clean_with_validator<F: ContainerFinder>(
    markdown: &str,
    validator: &CrossValidator<F>,
    options: &Options,
    log: &mut DiagnosticLog,
) -> CleanOutcome {
    let mut lines = split_lines(markdown);
    log.heading(&format!("Input: {} lines", lines.len()));
    log.preview(&lines, PREVIEW_LINES);

    let header = if options.strip_header {
        log.heading("Pass A: header navigation");
        let trim = header::detect_header(&lines, log);
        if let Some(trim) = trim {
            lines.drain(..trim.removed_lines);
        }
        trim
    } else {
        None
    };

    let toc_blocks = if options.remove_toc {
        log.heading("Pass B: table of contents");
        let (kept, removed) = toc::remove_toc_blocks(lines, log);
        lines = kept;
        removed
    } else {
        Vec::new()
    };

    let total_lines = lines.len();
    let title_line = lines.iter().position(|l| heading_level(l) == Some(1));

    let mut sections = Vec::new();
    let mut cascade = Cascade::default();
    let mut marker = None;

    let (method, start, end) = if !options.trim_footer {
        (Method::Untrimmed, 0, total_lines)
    } else {
        log.heading("Pass C: section classification");
        if !validator.has_document() {
            log.record("No HTML available; classifying on Markdown metrics only");
        }
        sections = classify::classify_sections(segment(&lines), validator, log);

        if sections.is_empty() {
            log.record("No ## or ### sections; using line-window fallback");
            let (start, end) = fallback::detect_range(&lines, log);
            (Method::LineWindow, start, end)
        } else {
            log.heading("Pass D: footer cascade");
            cascade = cascade::propagate(&mut sections, log);

            let start = content_start(title_line, &sections);
            let mut end = cascade_end(&sections, total_lines);

            log.heading("Footer markers");
            marker = markers::find_marker(&lines, &sections, start, log);
            if let Some(hit) = &marker {
                if hit.line < end {
                    log.record(format!(
                        "  >>> Marker cut at line {}: {} ({})",
                        hit.line,
                        truncate(&hit.text, 60),
                        hit.kind
                    ));
                    end = hit.line;
                }
            }
            (Method::Sections, start, end.max(start))
        }
    };

    let boundaries = Boundaries {
        content_start_line: start,
        content_end_line: end,
        total_lines,
    };
    log.heading("Result");
    log.record(format!(
        "Content lines {start}-{end} of {total_lines} ({method:?})"
    ));
    debug!(start, end, total_lines, ?method, "content boundaries");

    let markdown = render_range(&lines[start..end], method == Method::LineWindow);

    CleanOutcome {
        markdown,
        boundaries,
        method,
        header,
        toc_blocks,
        sections,
        cascade,
        marker,
    }
}

/// Clean Markdown with the line-window heuristics only.
///
/// Used for Markdown converted from extracted HTML, whose section headings
/// are not trusted.
pub fn clean_line_window(markdown: &str, log: &mut DiagnosticLog) -> CleanOutcome {
    let lines = split_lines(markdown);
    log.heading(&format!("Line-window cleaning: {} lines", lines.len()));
    let (start, end) = fallback::detect_range(&lines, log);

    CleanOutcome {
        markdown: render_range(&lines[start..end], true),
        boundaries: Boundaries {
            content_start_line: start,
            content_end_line: end,
            total_lines: lines.len(),
        },
        method: Method::LineWindow,
        header: None,
        toc_blocks: Vec::new(),
        sections: Vec::new(),
        cascade: Cascade::default(),
        marker: None,
    }
}

/// First content line of a sectioned document.
///
/// The title heading wins. Otherwise leading footer sections are skipped;
/// text above the first section is kept when that section is content.
fn content_start(title_line: Option<usize>, sections: &[ClassifiedSection]) -> usize {
    if let Some(line) = title_line {
        return line;
    }
    match sections.iter().position(|s| !s.is_footer) {
        Some(0) | None => 0,
        Some(i) => sections[i].section.start_line,
    }
}

/// End cutoff from the trailing cascade: the start of the earliest cascade
/// section in the uninterrupted tail.
fn cascade_end(sections: &[ClassifiedSection], total_lines: usize) -> usize {
    let mut end = total_lines;
    for section in sections.iter().rev() {
        if !(section.is_footer && section.in_footer_cascade) {
            break;
        }
        end = section.section.start_line;
    }
    end
}

/// Join the kept lines, dropping trailing blank lines and collapsing blank
/// runs. Leading blank lines are dropped too for line-window output.
fn render_range(lines: &[&str], trim_leading: bool) -> String {
    let mut kept = lines;
    if trim_leading {
        while let Some((first, rest)) = kept.split_first() {
            if !first.trim().is_empty() {
                break;
            }
            kept = rest;
        }
    }
    let mut collapsed = collapse_blank_runs(kept, MAX_BLANK_RUN);
    trim_trailing_blank(&mut collapsed);
    collapsed.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(md: &str) -> CleanOutcome {
        clean(md, "", &Options::default(), &mut DiagnosticLog::new())
    }

    fn prose(words: usize) -> String {
        "The quick brown fox studies distributed systems carefully. ".repeat(words)
    }

    fn link_block(prefix: &str, n: usize) -> String {
        (0..n)
            .map(|i| format!("- [{prefix} {i}](https://example.com/{prefix}/{i})"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_input() {
        let outcome = run("");
        assert_eq!(outcome.markdown, "");
        assert_eq!(outcome.boundaries.content_start_line, 0);
        assert!(outcome.boundaries.content_end_line <= outcome.boundaries.total_lines);
    }

    #[test]
    fn test_trailing_cascade_is_removed() {
        let md = format!(
            "# Article\n\n## Intro\n{}\n\n## Details\n{}\n\n## Products\n{}\n\n## Company\n{}\n",
            prose(20),
            prose(20),
            link_block("product", 10),
            link_block("company", 10)
        );
        let outcome = run(&md);
        assert_eq!(outcome.method, Method::Sections);
        assert_eq!(outcome.cascade.start, Some(2));
        assert!(outcome.markdown.contains("## Details"));
        assert!(!outcome.markdown.contains("## Products"));
        assert!(!outcome.markdown.contains("## Company"));
        assert!(outcome.markdown.ends_with(&prose(20)));
    }

    #[test]
    fn test_isolated_reference_list_is_kept() {
        let md = format!(
            "# Article\n\n## Intro\n{}\n\n## References\n{}\n\n## Conclusion\n{}\n",
            prose(20),
            link_block("ref", 20),
            prose(20)
        );
        let outcome = run(&md);
        assert_eq!(outcome.cascade.start, None);
        assert!(outcome.markdown.contains("## References"));
        assert!(outcome.markdown.contains("## Conclusion"));
    }

    #[test]
    fn test_disabled_footer_trim_keeps_everything_after_header() {
        let md = format!("## A\n{}\n## B\n{}", link_block("a", 10), link_block("b", 10));
        let options = Options {
            trim_footer: false,
            ..Options::default()
        };
        let outcome = clean(&md, "", &options, &mut DiagnosticLog::disabled());
        assert_eq!(outcome.method, Method::Untrimmed);
        assert_eq!(outcome.markdown, md);
    }

    #[test]
    fn test_section_less_document_uses_line_window() {
        let outcome = run(&prose(3));
        assert_eq!(outcome.method, Method::LineWindow);
        assert_eq!(outcome.markdown, prose(3));
    }

    #[test]
    fn test_diagnostics_record_each_pass() {
        let mut log = DiagnosticLog::new();
        let md = format!("# T\n## S\n{}", prose(3));
        let _ = clean(&md, "", &Options::default(), &mut log);
        let text = log.render(None);
        for pass in ["Pass A", "Pass B", "Pass C", "Pass D", "Result"] {
            assert!(text.contains(pass), "missing {pass}");
        }
        assert!(text.contains("Section 0 [S]"));
    }

    #[test]
    fn test_render_range_collapses_blank_runs() {
        let lines = ["a", "", "", "", "", "b", "", ""];
        assert_eq!(render_range(&lines, false), "a\n\n\nb");
        assert_eq!(render_range(&["", "x"], true), "x");
    }
}
