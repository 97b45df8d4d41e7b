//! Explicit footer markers.
//!
//! Slogan headings, footer category labels, article-closing headings,
//! author dividers and standalone labels such as "Tags". A marker moves the
//! end cutoff earlier when what follows it is link-heavy, or unconditionally
//! for author/topic markers.

use std::collections::BTreeSet;
use std::fmt;

use crate::diagnostics::{truncate, DiagnosticLog};
use crate::markdown::{count_links, heading_level, heading_text, strip_inline_markup};
use crate::patterns::{
    DIVIDER_INDICATORS, DIVIDER_LINES, FOOTER_LABELS, H2_SLOGAN_MARKERS, H3_CATEGORY_MARKERS,
    H4_ARTICLE_FOOTER_MARKERS, LENIENT_MARKER_WORDS,
};
use crate::thresholds::{MARKER_DIVIDER_LOOKAHEAD, MARKER_MIN_REMAINING_LINKS, MARKER_TAIL_SECTIONS};

use super::classify::ClassifiedSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `##` marketing slogan ("Ready to...", "Try ...").
    Slogan,
    /// `###` site-footer category ("Products", "Resources").
    FooterCategory,
    /// `####` article closer ("Related posts", "Subscribe").
    ArticleFooter,
    /// Horizontal rule followed by an author or topics block.
    Divider,
    /// Standalone "Author", "Tags", "Share this", ...
    Label,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slogan => "H2 slogan",
            Self::FooterCategory => "H3 footer category",
            Self::ArticleFooter => "H4 article footer",
            Self::Divider => "Divider + author info",
            Self::Label => "Footer label",
        })
    }
}

/// An accepted footer marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerHit {
    /// Line the content ends before.
    pub line: usize,
    pub section_index: usize,
    pub kind: MarkerKind,
    /// The marker line, trimmed.
    pub text: String,
    /// Links from the marker to the end of its section.
    pub remaining_links: usize,
}

impl MarkerHit {
    /// Accepted without link evidence.
    #[must_use]
    pub fn is_lenient(&self) -> bool {
        is_lenient(self.kind, &self.text)
    }
}

fn is_lenient(kind: MarkerKind, text: &str) -> bool {
    if kind == MarkerKind::Divider {
        return true;
    }
    let lower = text.to_lowercase();
    LENIENT_MARKER_WORDS.iter().any(|w| lower.contains(w))
}

/// True if `phrase` occurs in `haystack` starting at a word boundary.
///
/// Keeps short phrases like "try" from matching inside "industry".
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(at, _)| {
        haystack[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Classify a single line of a section.
///
/// `following` holds the lines after it within the same section, used for
/// the divider lookahead.
#[must_use]
pub fn marker_kind(line: &str, following: &[&str]) -> Option<MarkerKind> {
    let stripped = line.trim();

    if let Some(level) = heading_level(stripped) {
        let heading = strip_inline_markup(heading_text(stripped)).trim().to_lowercase();
        let hit = match level {
            2 => H2_SLOGAN_MARKERS.iter().any(|m| contains_phrase(&heading, m)).then_some(MarkerKind::Slogan),
            3 => H3_CATEGORY_MARKERS.contains(&heading.as_str()).then_some(MarkerKind::FooterCategory),
            4 => H4_ARTICLE_FOOTER_MARKERS
                .iter()
                .any(|m| contains_phrase(&heading, m))
                .then_some(MarkerKind::ArticleFooter),
            _ => None,
        };
        return hit;
    }

    if DIVIDER_LINES.contains(&stripped) {
        let indicated = following.iter().take(MARKER_DIVIDER_LOOKAHEAD).any(|next| {
            let lower = next.to_lowercase();
            DIVIDER_INDICATORS.iter().any(|ind| lower.contains(ind))
        });
        return indicated.then_some(MarkerKind::Divider);
    }

    let label = strip_inline_markup(stripped).trim().to_lowercase();
    FOOTER_LABELS.contains(&label.as_str()).then_some(MarkerKind::Label)
}

/// Find the earliest accepted marker.
///
/// Scans the rule-flagged sections outside the cascade together with the
/// last `MARKER_TAIL_SECTIONS` sections, in document order, skipping
/// cascade sections. Markers before `content_start` are ignored.
pub fn find_marker(
    lines: &[&str],
    sections: &[ClassifiedSection],
    content_start: usize,
    log: &mut DiagnosticLog,
) -> Option<MarkerHit> {
    let tail_from = sections.len().saturating_sub(MARKER_TAIL_SECTIONS);
    let candidates: BTreeSet<usize> = sections
        .iter()
        .enumerate()
        .filter(|(i, s)| (s.is_footer && !s.in_footer_cascade) || *i >= tail_from)
        .map(|(i, _)| i)
        .collect();

    for idx in candidates {
        let section = &sections[idx];
        if section.in_footer_cascade {
            continue;
        }
        let start = section.section.start_line;
        let end = section.section.end_line.min(lines.len().saturating_sub(1));
        if start > end {
            continue;
        }
        let body = &lines[start..=end];

        for (offset, line) in body.iter().enumerate() {
            let line_number = start + offset;
            if line_number < content_start {
                continue;
            }
            let Some(kind) = marker_kind(line, &body[offset + 1..]) else {
                continue;
            };

            let text = line.trim().to_string();
            let remaining_links = count_links(&body[offset..].join("\n"));
            log.record(format!(
                "  Marker in section {idx} at line {line_number}: {kind}: {} ({remaining_links} links after)",
                truncate(&text, 60)
            ));

            if remaining_links > MARKER_MIN_REMAINING_LINKS || is_lenient(kind, &text) {
                return Some(MarkerHit {
                    line: line_number,
                    section_index: idx,
                    kind,
                    text,
                    remaining_links,
                });
            }
        }
    }
    None
}
