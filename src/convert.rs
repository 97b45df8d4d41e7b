//! End-to-end conversion of a captured page.
//!
//! Chooses between cleaning the crawler's Markdown and extracting from the
//! HTML, derives the title and renders the document header.

use std::fmt;

use tracing::{info, warn};

use crate::boundary::{self, CleanOutcome};
use crate::diagnostics::DiagnosticLog;
use crate::error::{Error, Result};
use crate::html_processing::{extract_main_content, html_to_markdown};
use crate::options::Options;
use crate::title::derive_title;

/// Which input the cleaned Markdown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The crawler's Markdown, cleaned with HTML cross-validation.
    CrawlerMarkdown,
    /// Markdown converted from the extracted main HTML container.
    HtmlExtraction,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CrawlerMarkdown => "crawler markdown + cross-validation",
            Self::HtmlExtraction => "HTML extraction",
        })
    }
}

/// Result of converting one page.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Cleaned article body, without the document header.
    pub markdown: String,
    pub title: String,
    pub strategy: Strategy,
    /// Boundary decisions of the cleaning run.
    pub outcome: CleanOutcome,
    pub diagnostics: DiagnosticLog,
}

impl ConvertResult {
    /// The full document: header followed by the cleaned body.
    #[must_use]
    pub fn render_document(&self, source_url: &str) -> String {
        render_document(&self.title, source_url, &self.markdown)
    }
}

/// Prepend the `# title` / `**Source:**` / `---` header to `body`.
///
/// # Examples
///
/// ```
/// use rs_mdclean::convert::render_document;
///
/// let doc = render_document("Title", "https://example.com", "Body");
/// assert_eq!(doc, "# Title\n\n**Source:** https://example.com\n\n---\n\nBody");
/// ```
#[must_use]
pub fn render_document(title: &str, source_url: &str, body: &str) -> String {
    format!("# {title}\n\n**Source:** {source_url}\n\n---\n\n{body}")
}

/// Whether the crawler's Markdown is long enough to clean.
#[must_use]
pub fn crawler_markdown_usable(markdown: &str, options: &Options) -> bool {
    markdown.trim().chars().count() > options.min_crawler_markdown_len
}

/// Convert a captured page.
///
/// `crawler_markdown` is the crawler's own rendering and may be empty.
///
/// # Errors
///
/// Returns [`Error::NoContent`] when both inputs are blank.
pub fn convert(html: &str, crawler_markdown: &str, options: &Options) -> Result<ConvertResult> {
    if html.trim().is_empty() && crawler_markdown.trim().is_empty() {
        return Err(Error::NoContent);
    }

    let mut diagnostics = if options.collect_diagnostics {
        DiagnosticLog::new()
    } else {
        DiagnosticLog::disabled()
    };

    let (strategy, outcome) = if crawler_markdown_usable(crawler_markdown, options) {
        diagnostics.record("Strategy: crawler markdown with HTML cross-validation");
        let outcome = boundary::clean(crawler_markdown, html, options, &mut diagnostics);
        (Strategy::CrawlerMarkdown, outcome)
    } else {
        warn!(
            chars = crawler_markdown.trim().chars().count(),
            "crawler markdown unusable; extracting from HTML"
        );
        diagnostics.record("Strategy: HTML extraction");
        let main_html = extract_main_content(html);
        let markdown = html_to_markdown(&main_html);
        let outcome = boundary::clean_line_window(&markdown, &mut diagnostics);
        (Strategy::HtmlExtraction, outcome)
    };

    let title = derive_title(&outcome.markdown, html);
    info!(
        %strategy,
        title = %title,
        chars = outcome.markdown.chars().count(),
        "converted page"
    );

    Ok(ConvertResult {
        markdown: outcome.markdown.clone(),
        title,
        strategy,
        outcome,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_markdown() -> String {
        format!(
            "# Understanding Ownership\n\n## Moves\n{}\n",
            "Ownership rules decide when values are dropped and who may use them. ".repeat(10)
        )
    }

    #[test]
    fn test_blank_inputs_are_no_content() {
        let result = convert("  ", "\n", &Options::default());
        assert!(matches!(result, Err(Error::NoContent)));
    }

    #[test]
    fn test_usable_markdown_is_cleaned() {
        let result = match convert("", &article_markdown(), &Options::default()) {
            Ok(result) => result,
            Err(err) => panic!("conversion failed: {err}"),
        };
        assert_eq!(result.strategy, Strategy::CrawlerMarkdown);
        assert_eq!(result.title, "Understanding Ownership");
        assert!(result.markdown.starts_with("# Understanding Ownership"));
    }

    #[test]
    fn test_short_markdown_falls_back_to_html() {
        let html = format!(
            "<html><head><title>HTML Title</title></head><body><article><p>{}</p></article></body></html>",
            "Body text from the article element. ".repeat(10)
        );
        let result = match convert(&html, "too short", &Options::default()) {
            Ok(result) => result,
            Err(err) => panic!("conversion failed: {err}"),
        };
        assert_eq!(result.strategy, Strategy::HtmlExtraction);
        assert_eq!(result.title, "HTML Title");
        assert!(result.markdown.contains("Body text from the article element."));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let options = Options {
            min_crawler_markdown_len: 5,
            ..Options::default()
        };
        assert!(!crawler_markdown_usable("  12345 ", &options));
        assert!(crawler_markdown_usable("123456", &options));
    }

    #[test]
    fn test_render_document_uses_title() {
        let result = match convert("", &article_markdown(), &Options::default()) {
            Ok(result) => result,
            Err(err) => panic!("conversion failed: {err}"),
        };
        let doc = result.render_document("https://example.com/ownership");
        assert!(doc.starts_with("# Understanding Ownership\n\n**Source:** https://example.com/ownership\n\n---\n\n"));
    }
}
