//! # rs-mdclean
//!
//! Clean the Markdown a crawler produced for a web page: drop the site
//! header and navigation above the article, tables of contents, and the
//! trailing cascade of footer link sections below it.
//!
//! Sections are classified with link-density rules and, when the page's
//! HTML is available, corroborated against the DOM block each heading came
//! from. Trimming is biased towards keeping content: an isolated link-heavy
//! section inside an article survives unless it is part of the footer run
//! at the end of the document.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_mdclean::convert;
//!
//! let markdown = format!(
//!     "# My Article\n\n## Introduction\n{}\n",
//!     "Real article text that explains the topic in some detail. ".repeat(10),
//! );
//! let result = convert("", &markdown)?;
//! assert_eq!(result.title, "My Article");
//! println!("{}", result.render_document("https://example.com/post"));
//! # Ok::<(), rs_mdclean::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Header trimming**: removes navigation above the `# ` title
//! - **TOC removal**: strips "Contents" link blocks
//! - **Footer cascade**: removes runs of link-heavy sections at the tail
//! - **Footer markers**: cuts at "Related posts", author boxes, footer
//!   category headings and similar markers
//! - **HTML fallback**: extracts the main container when the crawler
//!   Markdown is unusable
//! - **Translation** (feature `translate`): chunked LLM translation of the
//!   result

mod error;
mod options;

/// Compiled regexes and phrase tables.
pub mod patterns;

/// Tuned heuristic thresholds.
pub mod thresholds;

/// Line-level Markdown helpers.
pub mod markdown;

/// Section segmentation.
pub mod section;

/// Link density metrics for Markdown sections and DOM containers.
pub mod link_density;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// HTML cross-validation of Markdown sections.
pub mod cross_validate;

/// Footer classification rules.
pub mod rules;

/// Content boundary detection.
pub mod boundary;

/// Diagnostic log of boundary decisions.
pub mod diagnostics;

/// HTML-only main content extraction.
pub mod html_processing;

/// Page title derivation.
pub mod title;

/// End-to-end page conversion.
pub mod convert;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Output file naming and URL validation.
pub mod output;

/// Chunked LLM translation.
#[cfg(feature = "translate")]
pub mod translate;

// Public API - re-exports
pub use boundary::{Boundaries, CleanOutcome};
pub use convert::{ConvertResult, Strategy};
pub use diagnostics::DiagnosticLog;
pub use error::{Error, Result};
pub use options::Options;

/// Convert a captured page with default options.
///
/// `crawler_markdown` is the crawler's own Markdown rendering of `html`; pass
/// an empty string to extract from the HTML alone.
///
/// # Example
///
/// ```rust
/// use rs_mdclean::convert;
///
/// let html = format!(
///     "<html><head><title>Notes</title></head><body><article><p>{}</p></article></body></html>",
///     "Some article text. ".repeat(20),
/// );
/// let result = convert(&html, "")?;
/// assert_eq!(result.title, "Notes");
/// # Ok::<(), rs_mdclean::Error>(())
/// ```
pub fn convert(html: &str, crawler_markdown: &str) -> Result<ConvertResult> {
    convert::convert(html, crawler_markdown, &Options::default())
}

/// Convert a captured page with custom options.
///
/// # Example
///
/// ```rust
/// use rs_mdclean::{convert_with_options, Options};
///
/// let options = Options {
///     cross_validate: false,
///     ..Options::default()
/// };
/// let markdown = format!("# Title\n\n{}", "Plenty of article text here. ".repeat(10));
/// let result = convert_with_options("", &markdown, &options)?;
/// assert!(result.markdown.starts_with("# Title"));
/// # Ok::<(), rs_mdclean::Error>(())
/// ```
pub fn convert_with_options(
    html: &str,
    crawler_markdown: &str,
    options: &Options,
) -> Result<ConvertResult> {
    convert::convert(html, crawler_markdown, options)
}

/// Convert a page whose HTML is still raw bytes in an unknown encoding.
pub fn convert_bytes(
    html: &[u8],
    crawler_markdown: &str,
    options: &Options,
) -> Result<ConvertResult> {
    let html = encoding::decode_html(html);
    convert::convert(&html, crawler_markdown, options)
}

/// Clean crawler Markdown against its HTML and return only the Markdown.
///
/// Never fails; pass an empty `html` to classify on Markdown alone.
///
/// # Example
///
/// ```rust
/// use rs_mdclean::{clean_markdown, Options};
///
/// let cleaned = clean_markdown("# Title\n\nBody\n\n\n\n", "", &Options::default());
/// assert_eq!(cleaned, "# Title\n\nBody");
/// ```
#[must_use]
pub fn clean_markdown(markdown: &str, html: &str, options: &Options) -> String {
    let mut log = if options.collect_diagnostics {
        DiagnosticLog::new()
    } else {
        DiagnosticLog::disabled()
    };
    boundary::clean(markdown, html, options, &mut log).markdown
}
