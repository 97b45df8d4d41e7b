//! Page title derivation.

use crate::dom;
use crate::markdown::{heading_level, heading_text, strip_inline_markup, strip_link_markup};
use crate::thresholds::TITLE_SCAN_LINES;

/// Title used when neither the Markdown nor the HTML has one.
pub const UNTITLED: &str = "Untitled";

/// First level-1 heading within the first lines of `markdown`, with link
/// markup reduced to labels and emphasis removed.
#[must_use]
pub fn title_from_markdown(markdown: &str) -> Option<String> {
    let line = markdown
        .split('\n')
        .take(TITLE_SCAN_LINES)
        .find(|line| heading_level(line) == Some(1))?;

    let title = strip_inline_markup(&strip_link_markup(heading_text(line)));
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Trimmed text of the HTML `<title>` element.
#[must_use]
pub fn title_from_html(html: &str) -> Option<String> {
    let doc = dom::parse(html)?;
    let title = doc.select("title");
    let text = dom::text_content(&title);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Title of a converted page: Markdown heading, then HTML `<title>`, then
/// [`UNTITLED`].
///
/// # Examples
///
/// ```
/// use rs_mdclean::title::derive_title;
///
/// assert_eq!(derive_title("# [Guide](/g) to *Rust*", ""), "Guide to Rust");
/// assert_eq!(derive_title("no heading", "<title> Page </title>"), "Page");
/// assert_eq!(derive_title("", ""), "Untitled");
/// ```
#[must_use]
pub fn derive_title(markdown: &str, html: &str) -> String {
    title_from_markdown(markdown)
        .or_else(|| title_from_html(html))
        .unwrap_or_else(|| UNTITLED.to_string())
}
