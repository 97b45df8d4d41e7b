//! HTML-only extraction.
//!
//! Used when the crawler's Markdown is missing or too short. The main
//! container is located, obvious noise is removed, link-heavy blocks are
//! pruned from the bottom up and the remainder is converted to Markdown.

use dom_query::{Document, NodeRef, Selection};
use quick_html2md::{html_to_markdown_with_options, MarkdownOptions};
use tracing::{debug, warn};

use crate::dom;
use crate::link_density::ContainerDensity;
use crate::markdown::{collapse_blank_runs, split_lines};
use crate::patterns::{AD_CLASS_FRAGMENTS, CONTENT_SELECTORS, NOISE_TAGS};
use crate::thresholds::{
    HTML_CONTENT_MAX_DENSITY, HTML_CONTENT_MIN_TEXT, HTML_NAV_DENSITY, HTML_NAV_DENSITY_MIN_LINKS,
    HTML_NAV_HIGH_DENSITY, HTML_NAV_LINKS, HTML_NAV_SHORT_CHARS_PER_LINK, HTML_NAV_SHORT_MIN_LINKS,
    HTML_PRUNE_MAX_NESTED, HTML_PRUNE_MAX_REMOVALS, HTML_PRUNE_MIN_TEXT, MAX_BLANK_RUN,
};

/// Block elements considered by the link-heavy pruning pass.
const CONTAINER_SELECTOR: &str = "section, div, footer";

/// Extract the main content of `html` as an HTML string.
///
/// Returns `html` unchanged when nothing could be extracted.
#[must_use]
pub fn extract_main_content(html: &str) -> String {
    let Some(page) = dom::parse(html) else {
        return html.to_string();
    };

    let container = CONTENT_SELECTORS.iter().find_map(|selector| {
        let found = page.select(selector);
        found.nodes().first().map(|node| {
            debug!(selector, "main content container");
            dom::outer_html(&Selection::from(*node)).to_string()
        })
    });

    // Work on a copy so the caller's page is never mutated.
    let doc = match container {
        Some(fragment) => Document::from(fragment.as_str()),
        None => {
            debug!("no main content container; using the whole page");
            Document::from(html)
        }
    };

    remove_noise(&doc);
    let body = doc.select("body");
    let root = if body.length() > 0 { body } else { doc.select("html") };
    let removed = prune_link_heavy_blocks(&root);
    debug!(removed, "pruned link-heavy blocks");

    let result = dom::inner_html(&root).to_string();
    if result.trim().is_empty() {
        warn!("HTML extraction produced nothing; keeping the original page");
        return html.to_string();
    }
    result
}

/// Remove noise tags and blocks whose class or id marks them as navigation,
/// sidebars, comments, advertising or share widgets.
pub fn remove_noise(doc: &Document) {
    doc.select(&NOISE_TAGS.join(", ")).remove();

    let flagged: Vec<NodeRef> = doc
        .select("[class], [id]")
        .nodes()
        .iter()
        .copied()
        .filter(|node| is_noise_block(&Selection::from(*node)))
        .collect();

    for node in flagged.iter().rev() {
        dom::remove(&Selection::from(*node));
    }
}

fn is_noise_block(sel: &Selection) -> bool {
    let class = dom::class_name(sel).unwrap_or_default().to_lowercase();
    let id = dom::id(sel).unwrap_or_default().to_lowercase();
    let tokens: Vec<&str> = class.split_whitespace().collect();
    let token_has = |needle: &str| tokens.iter().any(|t| t.contains(needle));
    let is_block = dom::tag_name(sel).is_some_and(|t| t == "div" || t == "section");

    (is_block && (token_has("nav") || id.contains("nav")))
        || token_has("sidebar")
        || id.contains("sidebar")
        || token_has("comment")
        || id.contains("comment")
        || AD_CLASS_FRAGMENTS.iter().any(|f| class.contains(f))
        || token_has("share")
}

/// A measured block reads like navigation or a footer.
#[must_use]
pub fn is_navigation_block(density: &ContainerDensity) -> bool {
    let link_density = density.link_density();
    density.link_count > HTML_NAV_LINKS
        || (link_density > HTML_NAV_DENSITY && density.link_count > HTML_NAV_DENSITY_MIN_LINKS)
        || (density.link_count > HTML_NAV_SHORT_MIN_LINKS
            && density.avg_chars_per_link() < HTML_NAV_SHORT_CHARS_PER_LINK)
        || link_density > HTML_NAV_HIGH_DENSITY
}

/// Remove link-heavy leaf containers, scanning backward from the end.
///
/// Only containers with fewer than `HTML_PRUNE_MAX_NESTED` nested containers
/// are considered. The scan stops at the first substantial content block or
/// after the removal budget is spent. Returns the number removed.
pub fn prune_link_heavy_blocks(root: &Selection) -> usize {
    let candidates: Vec<NodeRef> = root
        .select(CONTAINER_SELECTOR)
        .nodes()
        .iter()
        .copied()
        .filter(|node| Selection::from(*node).select(CONTAINER_SELECTOR).length() < HTML_PRUNE_MAX_NESTED)
        .collect();

    let mut removed = 0;
    for node in candidates.iter().rev() {
        if removed > HTML_PRUNE_MAX_REMOVALS {
            break;
        }
        let block = Selection::from(*node);
        let density = ContainerDensity::measure(&block);
        if density.text_length < HTML_PRUNE_MIN_TEXT {
            continue;
        }

        if is_navigation_block(&density) {
            dom::remove(&block);
            removed += 1;
        } else if density.text_length > HTML_CONTENT_MIN_TEXT
            && density.link_density() < HTML_CONTENT_MAX_DENSITY
        {
            break;
        }
    }
    removed
}

/// Convert HTML to Markdown, keeping links, images and tables, with blank
/// runs collapsed.
#[must_use]
pub fn html_to_markdown(html: &str) -> String {
    let options = MarkdownOptions::new()
        .include_links(true)
        .include_images(true)
        .preserve_tables(true);
    let raw = html_to_markdown_with_options(html, &options);

    let lines = split_lines(&raw);
    collapse_blank_runs(&lines, MAX_BLANK_RUN)
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(n: usize, prefix: &str) -> String {
        (0..n)
            .map(|i| format!("<li><a href='/{prefix}/{i}'>{prefix} {i}</a></li>"))
            .collect()
    }

    fn prose() -> String {
        "<p>Rust programs are compiled ahead of time and the borrow checker verifies memory safety without a garbage collector. </p>"
            .repeat(6)
    }

    #[test]
    fn test_article_is_preferred_over_body() {
        let html = format!(
            "<html><body><nav><ul>{}</ul></nav><article><h1>Title</h1>{}</article><div>unrelated sidebar text</div></body></html>",
            links(5, "nav"),
            prose()
        );
        let out = extract_main_content(&html);
        assert!(out.contains("<h1>Title</h1>"));
        assert!(!out.contains("unrelated sidebar text"));
        assert!(!out.contains("/nav/0"));
    }

    #[test]
    fn test_noise_tags_and_classes_removed() {
        let html = format!(
            "<html><body><main>{}<script>var x = 1;</script>\
             <div class='share-buttons'><a href='/s'>Share</a></div>\
             <div id='comments'>Great post!</div>\
             <section class='promo-box'>Buy now</section>\
             <p class='navigation'>kept, not a block</p></main></body></html>",
            prose()
        );
        let out = extract_main_content(&html);
        assert!(!out.contains("var x"));
        assert!(!out.contains("Share"));
        assert!(!out.contains("Great post"));
        assert!(!out.contains("Buy now"));
        assert!(out.contains("kept, not a block"));
    }

    #[test]
    fn test_trailing_link_blocks_pruned() {
        let html = format!(
            "<html><body><div class='content'>{}</div><div><ul>{}</ul></div><div><ul>{}</ul></div></body></html>",
            prose(),
            links(20, "products"),
            links(20, "company")
        );
        let out = extract_main_content(&html);
        assert!(out.contains("borrow checker"));
        assert!(!out.contains("/products/"));
        assert!(!out.contains("/company/"));
    }

    #[test]
    fn test_pruning_stops_at_substantial_content() {
        let html = format!(
            "<html><body><div><ul>{}</ul></div><div>{}</div><div><ul>{}</ul></div></body></html>",
            links(20, "early"),
            prose(),
            links(20, "late")
        );
        let out = extract_main_content(&html);
        assert!(!out.contains("/late/"));
        assert!(out.contains("/early/"));
    }

    #[test]
    fn test_navigation_block_thresholds() {
        let nav = ContainerDensity {
            link_count: 16,
            text_length: 2000,
            link_text_length: 100,
        };
        assert!(is_navigation_block(&nav));
        let prose = ContainerDensity {
            link_count: 2,
            text_length: 800,
            link_text_length: 40,
        };
        assert!(!is_navigation_block(&prose));
        let dense = ContainerDensity {
            link_count: 1,
            text_length: 20,
            link_text_length: 15,
        };
        assert!(is_navigation_block(&dense));
    }

    #[test]
    fn test_blank_html_is_returned_unchanged() {
        assert_eq!(extract_main_content("   "), "   ");
    }

    #[test]
    fn test_html_to_markdown_collapses_blank_runs() {
        let md = html_to_markdown("<h1>Title</h1><p>One</p><br><br><br><br><p>Two</p>");
        assert!(md.starts_with("# Title"));
        assert!(!md.contains("\n\n\n\n"));
        assert!(md.contains("One"));
        assert!(md.contains("Two"));
    }
}
