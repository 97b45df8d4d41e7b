//! HTML cross-validation of Markdown sections.
//!
//! A Markdown section that looks like navigation is more convincing when the
//! DOM block it came from is also link-heavy. The validator locates that
//! block by fuzzy heading-text matching and measures it with the same
//! density metrics. A missing match means "no corroboration", never failure.

use dom_query::{Document, NodeRef, Selection};
use tracing::debug;

use crate::dom;
use crate::link_density::ContainerDensity;
use crate::markdown::{strip_inline_markup, strip_link_markup};
use crate::thresholds::{
    HTML_HIGH_LINKS_PER_100, HTML_HIGH_LINK_COUNT, HTML_MAX_ANCESTOR_LEVELS,
    HTML_MIN_CONTAINER_TEXT,
};

/// Elements whose text is searched for a section heading.
const MATCH_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, div, section";

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Tags accepted as a section's containing block.
const CONTAINER_TAGS: &[&str] = &["section", "div", "footer"];

/// Strategy for locating the DOM block that corresponds to a heading.
///
/// The classification rules only consume the boolean verdict, so matching
/// can be swapped without touching them.
pub trait ContainerFinder {
    /// Every candidate container for `heading_text`, in document order.
    ///
    /// Candidates are not yet filtered for size; the validator discards
    /// near-empty wrappers itself.
    fn candidates<'a>(&self, heading_text: &str, document: &'a Document) -> Vec<Selection<'a>>;
}

/// Case-insensitive substring match on headings and block text, then a
/// walk of up to three ancestors towards a `section`/`div`/`footer`.
///
/// Matches with no such ancestor are dropped rather than measured against
/// `body`, which would make every heading look link-heavy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AncestorWalkFinder;

impl ContainerFinder for AncestorWalkFinder {
    fn candidates<'a>(&self, heading_text: &str, document: &'a Document) -> Vec<Selection<'a>> {
        let needle = normalize_heading(heading_text);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for node in document.select(MATCH_SELECTOR).nodes() {
            if !node_mentions(node, &needle) {
                continue;
            }
            if let Some(container) = climb_to_container(node) {
                out.push(Selection::from(container));
            }
        }
        out
    }
}

/// Result of cross-validating one section.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Corroboration {
    /// The HTML confirms a link-heavy block for this heading.
    pub html_high_links: bool,
    /// Density of the deciding container, or of the first valid one.
    pub container: Option<ContainerDensity>,
}

/// Cross-validates section headings against one parsed page.
pub struct CrossValidator<F = AncestorWalkFinder> {
    document: Option<Document>,
    finder: F,
}

impl CrossValidator<AncestorWalkFinder> {
    /// Parse `html` for validation with the default matching strategy.
    #[must_use]
    pub fn new(html: &str) -> Self {
        Self::with_finder(html, AncestorWalkFinder)
    }
}

impl<F: ContainerFinder> CrossValidator<F> {
    #[must_use]
    pub fn with_finder(html: &str, finder: F) -> Self {
        let document = dom::parse(html);
        if document.is_none() {
            debug!("no HTML to cross-validate against; using Markdown metrics only");
        }
        Self { document, finder }
    }

    /// A validator that never corroborates.
    #[must_use]
    pub fn disabled(finder: F) -> Self {
        Self {
            document: None,
            finder,
        }
    }

    /// Whether a parsed document is available.
    #[must_use]
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Corroborate a section heading.
    #[must_use]
    pub fn corroborate(&self, heading_text: &str) -> Corroboration {
        let Some(document) = self.document.as_ref() else {
            return Corroboration::default();
        };

        let mut first_valid = None;
        for container in self.finder.candidates(heading_text, document) {
            let density = ContainerDensity::measure(&container);
            if density.text_length <= HTML_MIN_CONTAINER_TEXT {
                continue;
            }
            if is_high_link(&density) {
                return Corroboration {
                    html_high_links: true,
                    container: Some(density),
                };
            }
            first_valid.get_or_insert(density);
        }

        Corroboration {
            html_high_links: false,
            container: first_valid,
        }
    }
}

/// First container large enough to measure for `heading_text`.
#[must_use]
pub fn find_corroborating_container<'a>(
    heading_text: &str,
    document: &'a Document,
) -> Option<Selection<'a>> {
    AncestorWalkFinder
        .candidates(heading_text, document)
        .into_iter()
        .find(|c| ContainerDensity::measure(c).text_length > HTML_MIN_CONTAINER_TEXT)
}

fn is_high_link(density: &ContainerDensity) -> bool {
    density.links_per_100_chars() > HTML_HIGH_LINKS_PER_100
        || density.link_count > HTML_HIGH_LINK_COUNT
}

/// Lowercased heading with link and emphasis markup removed.
fn normalize_heading(heading_text: &str) -> String {
    strip_inline_markup(&strip_link_markup(heading_text))
        .trim()
        .to_lowercase()
}

/// Headings match on their full text; blocks only on their own text nodes,
/// otherwise every page wrapper would match every heading.
fn node_mentions(node: &NodeRef, needle: &str) -> bool {
    let is_heading = dom::node_tag_name(node).is_some_and(|t| HEADING_TAGS.contains(&t.as_str()));
    let haystack = if is_heading {
        node.text().to_string()
    } else {
        dom::own_text(node)
    };
    haystack.to_lowercase().contains(needle)
}

/// Nearest `section`/`div`/`footer` among the first three ancestors.
fn climb_to_container<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut current = *node;
    for _ in 0..HTML_MAX_ANCESTOR_LEVELS {
        current = dom::parent_element(&current)?;
        if dom::node_tag_name(&current).is_some_and(|t| CONTAINER_TAGS.contains(&t.as_str())) {
            return Some(current);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footer_html() -> String {
        let links = (0..12)
            .map(|i| format!("<li><a href='/p/{i}'>Product page number {i}</a></li>"))
            .collect::<String>();
        format!(
            r#"<html><body>
                <article><h2>Installation</h2>
                <p>Install the package with your package manager and then configure
                the service by editing the configuration file in your home directory.</p></article>
                <footer><div><h3>Products</h3><ul>{links}</ul></div></footer>
            </body></html>"#
        )
    }

    #[test]
    fn test_link_heavy_footer_is_corroborated() {
        let validator = CrossValidator::new(&footer_html());
        let result = validator.corroborate("Products");
        assert!(result.html_high_links);
        assert!(result.container.is_some_and(|c| c.link_count == 12));
    }

    #[test]
    fn test_prose_section_is_not_corroborated() {
        let validator = CrossValidator::new(&footer_html());
        assert!(!validator.corroborate("Installation").html_high_links);
    }

    #[test]
    fn test_match_is_case_insensitive_and_ignores_markup() {
        let validator = CrossValidator::new(&footer_html());
        assert!(validator.corroborate("**PRODUCTS**").html_high_links);
    }

    #[test]
    fn test_unknown_heading_is_no_corroboration() {
        let validator = CrossValidator::new(&footer_html());
        assert_eq!(validator.corroborate("Nowhere to be found"), Corroboration::default());
    }

    #[test]
    fn test_blank_html_degrades_silently() {
        let validator = CrossValidator::new("");
        assert!(!validator.has_document());
        assert!(!validator.corroborate("Products").html_high_links);
    }

    #[test]
    fn test_small_containers_are_ignored() {
        let html = "<div><h2>Tiny</h2><a href='/'>x</a></div>";
        let validator = CrossValidator::new(html);
        let result = validator.corroborate("Tiny");
        assert!(!result.html_high_links);
        assert!(result.container.is_none());
    }

    #[test]
    fn test_find_corroborating_container_climbs_to_block() {
        let html = footer_html();
        let doc = Document::from(html.as_str());
        let container = find_corroborating_container("Products", &doc);
        let tag = container.as_ref().and_then(dom::tag_name);
        assert_eq!(tag.as_deref(), Some("div"));
    }

    struct NeverFinds;

    impl ContainerFinder for NeverFinds {
        fn candidates<'a>(&self, _: &str, _: &'a Document) -> Vec<Selection<'a>> {
            Vec::new()
        }
    }

    #[test]
    fn test_finder_is_swappable() {
        let validator = CrossValidator::with_finder(&footer_html(), NeverFinds);
        assert!(!validator.corroborate("Products").html_high_links);
    }
}
