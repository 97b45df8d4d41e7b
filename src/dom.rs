//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate so the cross-validator and the
//! HTML-only extraction path share one vocabulary for parsing, text and
//! tree navigation.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML string.
///
/// The HTML5 parser recovers from any markup, so the only input treated as
/// unparseable is one with no markup at all: `None` for blank strings.
#[must_use]
pub fn parse(html: &str) -> Option<Document> {
    if html.trim().is_empty() {
        return None;
    }
    Some(Document::from(html))
}

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(node_tag_name)
}

/// Tag name of a single node, `None` for text and comment nodes.
#[must_use]
pub fn node_tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Concatenated text of a node's direct text children.
///
/// Text inside child elements is excluded, so a wrapper `<div>` around a
/// whole page does not "contain" every phrase on it.
#[must_use]
pub fn own_text(node: &NodeRef) -> String {
    let mut out = String::new();
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
        }
    }
    out
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Tree Navigation ===

/// Nearest ancestor element, `None` at the document root.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.is_element() {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

// === Tree Manipulation ===

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}
