//! Compiled regex patterns and phrase tables for boundary detection.
//!
//! Regexes are compiled once using `LazyLock`. Phrase tables are plain
//! slices so new site patterns can be added without touching the passes.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Markdown Patterns
// =============================================================================

/// Matches an inline Markdown link `[label](target)`.
///
/// Group 1 is the label, group 2 the target. Labels cannot contain `]` and
/// targets cannot contain `)`; nested brackets are not parsed.
pub static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("MARKDOWN_LINK regex")
});

/// Inline emphasis/code characters removed from titles.
pub static INLINE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_~`]").expect("INLINE_MARKUP regex"));

/// Characters that are invalid in file names on common platforms.
pub static INVALID_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("INVALID_FILENAME_CHARS regex"));

pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

pub static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("UNDERSCORE_RUN regex"));

// =============================================================================
// Table of Contents
// =============================================================================

/// Lines that label a table of contents when they match exactly.
pub const TOC_LABELS: &[&str] = &["contents", "table of contents"];

/// Phrase that labels a table of contents anywhere in a line.
pub const TOC_PHRASE: &str = "table of contents";

// =============================================================================
// Section Headings
// =============================================================================

/// Heading phrases of promotional or navigational sections.
pub const PROMO_HEADINGS: &[&str] = &[
    "training more people",
    "get your team",
    "for business",
    "develop ai applications",
    "start upskilling",
    "learn more",
    "related",
    "recommended",
    "you might also like",
    "see more",
    "browse courses",
    "grow your",
];

// =============================================================================
// Footer Markers
// =============================================================================

/// `##` headings containing these phrases are marketing slogans.
pub const H2_SLOGAN_MARKERS: &[&str] = &[
    "less structure",
    "more intelligence",
    "get started",
    "start free",
    "ready to",
    "join us",
    "try",
    "free trial",
];

/// `###` headings equal to one of these are site-footer category labels.
pub const H3_CATEGORY_MARKERS: &[&str] = &[
    "产品", "product", "products",
    "资源", "resource", "resources",
    "社区", "community",
    "公司", "company", "about",
    "下载", "download", "downloads",
    "比较", "compare", "comparison",
    "联系", "contact", "contact us",
    "支持", "support",
    "法律", "legal",
    "关注", "follow", "follow us",
    "get started", "quick links",
    "服务", "service", "services",
];

/// `####` headings containing these phrases close an article.
pub const H4_ARTICLE_FOOTER_MARKERS: &[&str] = &[
    "related post",
    "related article",
    "related content",
    "stay updated",
    "subscribe",
    "newsletter",
    "more from",
    "you might also like",
    "recommended",
    "about the author",
    "follow us",
    "learn more about",
];

/// Horizontal rules recognised as a footer divider.
pub const DIVIDER_LINES: &[&str] = &["* * *", "---", "***", "* * * *"];

/// Text after a divider that marks an author box or topic list.
pub const DIVIDER_INDICATORS: &[&str] = &["author", "topics", "categories"];

/// Standalone lines that start an article footer.
pub const FOOTER_LABELS: &[&str] = &["author", "topics", "categories", "tags", "share this"];

/// Marker words that make a cut trustworthy without further link evidence.
pub const LENIENT_MARKER_WORDS: &[&str] = &["author", "topics"];

// =============================================================================
// HTML-only Extraction
// =============================================================================

/// Main-content selectors tried in order.
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[role=\"main\"]",
    "main",
    ".post-content",
    ".article-content",
    ".article-body",
    ".blog-content",
    ".entry-content",
    ".post-body",
    ".markdown-body",
    "[class*=\"blog-post\"]",
    "[class*=\"article-container\"]",
];

/// Elements that never carry article text.
pub const NOISE_TAGS: &[&str] = &["script", "style", "iframe", "nav", "header", "footer", "aside"];

/// Class fragments of advertising and promotion blocks.
pub const AD_CLASS_FRAGMENTS: &[&str] = &["advertisement", "ad-", "promo"];
