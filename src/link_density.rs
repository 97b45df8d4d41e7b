//! Link density metrics.
//!
//! The same questions are asked of Markdown sections and of DOM containers:
//! how many links are there, and how much readable text surrounds them?
//! Markdown text is measured with link *labels* removed, since link markup
//! is navigation rather than prose.

use dom_query::Selection;

use crate::markdown::{count_non_empty, has_link, split_lines};
use crate::patterns::MARKDOWN_LINK;

/// Link metrics of one Markdown section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionMetrics {
    /// `[label](target)` constructs in the section.
    pub link_count: usize,
    /// Trimmed character count minus link label characters, at least 1.
    pub text_length_no_links: usize,
    pub non_empty_lines: usize,
    /// Non-empty lines containing at least one link.
    pub link_lines: usize,
    /// `link_lines / max(1, non_empty_lines)`.
    pub link_ratio: f64,
    /// `link_count / max(1, text_length_no_links / 100)`.
    pub links_per_100_chars: f64,
    /// `text_length_no_links / link_count`, infinite without links.
    pub avg_chars_per_link: f64,
}

impl SectionMetrics {
    /// Measure a section's raw Markdown.
    #[must_use]
    pub fn from_markdown(text: &str) -> Self {
        let (text_length_no_links, link_count) = text_length_without_links(text);
        let lines = split_lines(text);
        let non_empty_lines = count_non_empty(&lines);
        let link_lines = lines.iter().filter(|l| has_link(l)).count();

        Self::from_counts(link_count, text_length_no_links, non_empty_lines, link_lines)
    }

    /// Build metrics from raw counts.
    ///
    /// Useful when the counts come from somewhere other than a Markdown
    /// string, and for exercising classification rules in isolation.
    #[must_use]
    pub fn from_counts(
        link_count: usize,
        text_length_no_links: usize,
        non_empty_lines: usize,
        link_lines: usize,
    ) -> Self {
        let text_length_no_links = text_length_no_links.max(1);
        let link_ratio = link_lines as f64 / non_empty_lines.max(1) as f64;
        let avg_chars_per_link = if link_count > 0 {
            text_length_no_links as f64 / link_count as f64
        } else {
            f64::INFINITY
        };

        Self {
            link_count,
            text_length_no_links,
            non_empty_lines,
            link_lines,
            link_ratio,
            links_per_100_chars: links_per_100(link_count, text_length_no_links),
            avg_chars_per_link,
        }
    }
}

/// Links per 100 characters, never dividing by less than 1.
#[must_use]
pub fn links_per_100(link_count: usize, text_length: usize) -> f64 {
    link_count as f64 / (text_length as f64 / 100.0).max(1.0)
}

/// Text length excluding link labels, and the number of links.
///
/// The total is the character count of the trimmed text; only the label
/// characters of each link are subtracted, not the brackets or the target.
/// The length is never less than 1.
///
/// # Examples
///
/// ```
/// use rs_mdclean::link_density::text_length_without_links;
///
/// let text = "See [this](url) and [that](url2) for details.";
/// assert_eq!(text_length_without_links(text), (45 - 8, 2));
/// ```
#[must_use]
pub fn text_length_without_links(text: &str) -> (usize, usize) {
    let mut link_count = 0;
    let mut label_length = 0;

    for caps in MARKDOWN_LINK.captures_iter(text) {
        link_count += 1;
        label_length += caps.get(1).map_or(0, |m| m.as_str().chars().count());
    }

    let total = text.trim().chars().count();
    (total.saturating_sub(label_length).max(1), link_count)
}

/// Link metrics of a DOM container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerDensity {
    /// `<a>` elements inside the container.
    pub link_count: usize,
    /// Characters of whitespace-trimmed text nodes.
    pub text_length: usize,
    /// Characters of whitespace-trimmed text inside links.
    pub link_text_length: usize,
}

impl ContainerDensity {
    /// Measure `container` and every descendant.
    #[must_use]
    pub fn measure(container: &Selection) -> Self {
        let links = container.select("a");
        let link_text_length = links.iter().map(|link| stripped_text_length(&link)).sum();

        Self {
            link_count: links.length(),
            text_length: stripped_text_length(container),
            link_text_length,
        }
    }

    #[must_use]
    pub fn links_per_100_chars(&self) -> f64 {
        links_per_100(self.link_count, self.text_length)
    }

    /// Share of the text that sits inside links.
    #[must_use]
    pub fn link_density(&self) -> f64 {
        if self.text_length == 0 {
            return 0.0;
        }
        self.link_text_length as f64 / self.text_length as f64
    }

    /// Text characters per link, infinite without links.
    #[must_use]
    pub fn avg_chars_per_link(&self) -> f64 {
        if self.link_count == 0 {
            return f64::INFINITY;
        }
        self.text_length as f64 / self.link_count as f64
    }
}

/// Sum of the trimmed lengths of every text node under `sel`.
///
/// Matches what a "get text, strip each string" extraction would measure:
/// indentation and newlines between tags do not count.
#[must_use]
pub fn stripped_text_length(sel: &Selection) -> usize {
    let mut total = 0;
    for node in sel.nodes() {
        for descendant in node.descendants() {
            if descendant.is_text() {
                total += descendant.text().trim().chars().count();
            }
        }
    }
    total
}
