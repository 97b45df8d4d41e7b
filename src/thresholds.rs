//! Tuned constants for the boundary detector.
//!
//! These numbers were tuned by hand against a small set of blog and
//! documentation sites. They are a baseline, not a law: change them here
//! rather than inline so the passes keep reading the same names.

// =============================================================================
// Pass A: header/navigation trim
// =============================================================================

/// An article-start heading at or before this line leaves the preamble alone.
pub const HEADER_MIN_START_LINE: usize = 10;

/// Preamble link count above which a first-`##` proxy start is trusted.
pub const HEADER_NAV_MIN_LINKS: usize = 15;

/// Preamble non-empty line count above which a first-`##` proxy start is trusted.
pub const HEADER_NAV_MIN_LINES: usize = 20;

// =============================================================================
// Pass B: table-of-contents removal
// =============================================================================

pub const TOC_MAX_ITERATIONS: usize = 5;

/// Lines inspected after a "Contents" label, label included.
pub const TOC_WINDOW_LINES: usize = 50;

pub const TOC_MIN_LINKS: usize = 8;

pub const TOC_MIN_NON_EMPTY_LINES: usize = 5;

// =============================================================================
// Pass C: section classification
// =============================================================================

/// Rule 1.
pub const DENSE_LINKS_PER_100: f64 = 3.0;

/// Rule 2.
pub const LINK_LIST_RATIO: f64 = 0.7;
pub const LINK_LIST_MIN_LINKS: usize = 10;

/// Rule 3.
pub const SHORT_CONTEXT_MIN_LINKS: usize = 12;
pub const SHORT_CONTEXT_MAX_CHARS_PER_LINK: f64 = 80.0;

/// Rule 4: corroborated by the HTML and short.
pub const CORROBORATED_MAX_TEXT: usize = 400;

/// Markdown "high-link pattern" used by rule 4.
pub const MD_HIGH_LINK_RATIO: f64 = 0.6;
pub const MD_HIGH_LINKS_PER_100: f64 = 1.5;
pub const MD_HIGH_SHORT_MIN_LINKS: usize = 5;
pub const MD_HIGH_SHORT_MAX_TEXT: usize = 300;
pub const MD_HIGH_MIN_LINKS: usize = 8;

/// Rule 5.
pub const SHORT_SECTION_MAX_TEXT: usize = 200;
pub const SHORT_SECTION_LINKS_PER_100: f64 = 1.5;

/// Rule 6.
pub const MASS_LINK_COUNT: usize = 50;

/// Rule 9.
pub const HIGH_DENSITY_LINKS_PER_100: f64 = 0.8;
pub const HIGH_DENSITY_MIN_LINKS: usize = 5;

/// Rule 10.
pub const MEDIUM_DENSITY_LINKS_PER_100: f64 = 0.6;
pub const MEDIUM_DENSITY_MIN_LINKS: usize = 3;

// =============================================================================
// HTML cross-validation
// =============================================================================

/// Ancestor levels walked from a matched element towards a container.
pub const HTML_MAX_ANCESTOR_LEVELS: usize = 3;

/// Container text must be longer than this to count as a match.
pub const HTML_MIN_CONTAINER_TEXT: usize = 50;

pub const HTML_HIGH_LINKS_PER_100: f64 = 1.5;
pub const HTML_HIGH_LINK_COUNT: usize = 8;

// =============================================================================
// Pass D: footer cascade
// =============================================================================

pub const CASCADE_LINKS_PER_100: f64 = 1.0;
pub const CASCADE_MIN_LINKS: usize = 5;
/// An all-link section needs more than this many links to be link-rich.
pub const CASCADE_LIST_MIN_LINKS: usize = 2;

/// A section longer than this (link labels excluded) always stops the cascade.
pub const SUBSTANTIAL_TEXT: usize = 800;

/// Medium sections stop the cascade when they are also sparse in links.
pub const SUBSTANTIAL_SPARSE_TEXT: usize = 400;
pub const SUBSTANTIAL_SPARSE_LINKS_PER_100: f64 = 0.4;

/// Consecutive link-rich tail sections needed to commit a cascade.
pub const CASCADE_MIN_RUN: usize = 2;

// =============================================================================
// Footer marker scan
// =============================================================================

/// Trailing sections scanned for explicit markers regardless of density.
pub const MARKER_TAIL_SECTIONS: usize = 10;

/// Lines after a horizontal rule searched for an author/topics indicator.
pub const MARKER_DIVIDER_LOOKAHEAD: usize = 5;

/// Links in the remaining tail that confirm a heading marker.
pub const MARKER_MIN_REMAINING_LINKS: usize = 5;

// =============================================================================
// Line-window fallback (documents without `##`/`###` sections)
// =============================================================================

pub const FALLBACK_SHORT_LINE: usize = 100;
pub const FALLBACK_LOOKBACK: usize = 30;
pub const FALLBACK_MIN_SHORT_LINES: usize = 10;
pub const FALLBACK_PARAGRAPH_MIN_CHARS: usize = 150;
pub const FALLBACK_PARAGRAPH_MAX_LINKS: usize = 3;

/// Lines after a heading searched for the paragraph that confirms it.
pub const FALLBACK_HEADING_LOOKAHEAD: usize = 10;

/// The end scan never looks above `content_start + FALLBACK_END_MIN_OFFSET`.
pub const FALLBACK_END_MIN_OFFSET: usize = 20;

pub const FALLBACK_HEADING_WINDOW: usize = 25;
pub const FALLBACK_HEADING_MIN_NON_EMPTY: usize = 5;
pub const FALLBACK_HEADING_LINK_RATIO: f64 = 0.4;
pub const FALLBACK_HEADING_MIN_SUBHEADINGS: usize = 2;
pub const FALLBACK_HEADING_DENSE_RATIO: f64 = 0.5;

/// The multi-link window only applies this far below `content_start`.
pub const FALLBACK_LIST_MIN_OFFSET: usize = 30;
pub const FALLBACK_LIST_WINDOW: usize = 10;
pub const FALLBACK_LIST_MIN_NON_EMPTY: usize = 5;
pub const FALLBACK_LIST_RATIO: f64 = 0.7;

/// Paragraphs this long with at most `FALLBACK_PROSE_MAX_LINKS` links are never cut.
pub const FALLBACK_PROSE_MIN_CHARS: usize = 200;
pub const FALLBACK_PROSE_MAX_LINKS: usize = 1;
pub const FALLBACK_GUARD_LOOKBACK: usize = 10;
pub const FALLBACK_GUARD_RESCAN: usize = 30;
pub const FALLBACK_GUARD_MARKER_WINDOW: usize = 10;
pub const FALLBACK_GUARD_MARKER_LINKS: usize = 5;

// =============================================================================
// HTML-only extraction
// =============================================================================

pub const HTML_PRUNE_MAX_REMOVALS: usize = 5;
pub const HTML_PRUNE_MIN_TEXT: usize = 10;
pub const HTML_PRUNE_MAX_NESTED: usize = 3;
pub const HTML_NAV_LINKS: usize = 15;
pub const HTML_NAV_DENSITY: f64 = 0.4;
pub const HTML_NAV_DENSITY_MIN_LINKS: usize = 8;
pub const HTML_NAV_SHORT_MIN_LINKS: usize = 12;
pub const HTML_NAV_SHORT_CHARS_PER_LINK: f64 = 80.0;
pub const HTML_NAV_HIGH_DENSITY: f64 = 0.6;
pub const HTML_CONTENT_MIN_TEXT: usize = 500;
pub const HTML_CONTENT_MAX_DENSITY: f64 = 0.3;

// =============================================================================
// Output
// =============================================================================

/// Longest run of blank lines kept in the cleaned Markdown.
pub const MAX_BLANK_RUN: usize = 2;

/// Lines scanned for a `# ` title.
pub const TITLE_SCAN_LINES: usize = 50;
