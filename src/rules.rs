//! Footer classification rules.
//!
//! Each rule is an independent predicate over a section's metrics, its HTML
//! corroboration and its heading. A section is a footer candidate when any
//! rule fires. The rules overlap on purpose: recall matters more here,
//! because isolated false positives are discarded later unless they sit in
//! the trailing cascade.

use crate::link_density::SectionMetrics;
use crate::patterns::PROMO_HEADINGS;
use crate::thresholds::{
    CORROBORATED_MAX_TEXT, DENSE_LINKS_PER_100, HIGH_DENSITY_LINKS_PER_100,
    HIGH_DENSITY_MIN_LINKS, LINK_LIST_MIN_LINKS, LINK_LIST_RATIO, MASS_LINK_COUNT,
    MD_HIGH_LINKS_PER_100, MD_HIGH_LINK_RATIO, MD_HIGH_MIN_LINKS, MD_HIGH_SHORT_MAX_TEXT,
    MD_HIGH_SHORT_MIN_LINKS, MEDIUM_DENSITY_LINKS_PER_100, MEDIUM_DENSITY_MIN_LINKS,
    SHORT_CONTEXT_MAX_CHARS_PER_LINK, SHORT_CONTEXT_MIN_LINKS, SHORT_SECTION_LINKS_PER_100,
    SHORT_SECTION_MAX_TEXT,
};

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub metrics: &'a SectionMetrics,
    /// The HTML cross-validator found a link-heavy block for this heading.
    pub html_high_links: bool,
    pub heading_text: &'a str,
}

/// A footer predicate.
pub type Rule = fn(&RuleInput<'_>) -> bool;

/// A named footer predicate, so diagnostics can say which rule fired.
#[derive(Debug, Clone, Copy)]
pub struct FooterRule {
    pub name: &'static str,
    pub test: Rule,
}

/// The rule table, evaluated in order.
pub const FOOTER_RULES: &[FooterRule] = &[
    FooterRule { name: "dense-links", test: dense_links },
    FooterRule { name: "link-list", test: link_list },
    FooterRule { name: "short-context", test: short_context },
    FooterRule { name: "html-corroborated", test: html_corroborated },
    FooterRule { name: "short-section", test: short_section },
    FooterRule { name: "mass-links", test: mass_links },
    FooterRule { name: "promo-heading", test: promo_heading },
    FooterRule { name: "all-link-lines", test: all_link_lines },
    FooterRule { name: "high-density", test: high_density },
    FooterRule { name: "medium-density", test: medium_density },
];

/// Classify a section as footer/navigation.
///
/// # Examples
///
/// ```
/// use rs_mdclean::link_density::SectionMetrics;
/// use rs_mdclean::rules::classify;
///
/// let prose = SectionMetrics::from_counts(1, 900, 4, 1);
/// assert!(!classify(&prose, false, "Background"));
///
/// let nav = SectionMetrics::from_counts(6, 150, 7, 6);
/// assert!(classify(&nav, false, "More links"));
/// ```
#[must_use]
pub fn classify(metrics: &SectionMetrics, html_high_links: bool, heading_text: &str) -> bool {
    first_matching_rule(metrics, html_high_links, heading_text).is_some()
}

/// The first rule that fires, if any.
#[must_use]
pub fn first_matching_rule(
    metrics: &SectionMetrics,
    html_high_links: bool,
    heading_text: &str,
) -> Option<&'static FooterRule> {
    let input = RuleInput {
        metrics,
        html_high_links,
        heading_text,
    };
    FOOTER_RULES.iter().find(|rule| (rule.test)(&input))
}

/// Markdown-only evidence of a link-heavy section, used by the
/// corroboration rule.
#[must_use]
pub fn md_high_links(m: &SectionMetrics) -> bool {
    m.link_ratio > MD_HIGH_LINK_RATIO
        || m.links_per_100_chars > MD_HIGH_LINKS_PER_100
        || (m.link_count > MD_HIGH_SHORT_MIN_LINKS && m.text_length_no_links < MD_HIGH_SHORT_MAX_TEXT)
        || m.link_count > MD_HIGH_MIN_LINKS
}

/// Heading reads like a promotion or a "related" block.
#[must_use]
pub fn is_promo_heading(heading_text: &str) -> bool {
    let lower = heading_text.to_lowercase();
    PROMO_HEADINGS.iter().any(|p| lower.contains(p))
}

fn dense_links(i: &RuleInput<'_>) -> bool {
    i.metrics.links_per_100_chars > DENSE_LINKS_PER_100
}

fn link_list(i: &RuleInput<'_>) -> bool {
    i.metrics.link_ratio > LINK_LIST_RATIO && i.metrics.link_count > LINK_LIST_MIN_LINKS
}

fn short_context(i: &RuleInput<'_>) -> bool {
    i.metrics.link_count > SHORT_CONTEXT_MIN_LINKS
        && i.metrics.avg_chars_per_link < SHORT_CONTEXT_MAX_CHARS_PER_LINK
}

fn html_corroborated(i: &RuleInput<'_>) -> bool {
    md_high_links(i.metrics)
        && i.html_high_links
        && i.metrics.text_length_no_links < CORROBORATED_MAX_TEXT
}

fn short_section(i: &RuleInput<'_>) -> bool {
    i.metrics.text_length_no_links < SHORT_SECTION_MAX_TEXT
        && i.metrics.links_per_100_chars > SHORT_SECTION_LINKS_PER_100
}

fn mass_links(i: &RuleInput<'_>) -> bool {
    i.metrics.link_count > MASS_LINK_COUNT
}

fn promo_heading(i: &RuleInput<'_>) -> bool {
    i.metrics.link_count > 0 && is_promo_heading(i.heading_text)
}

fn all_link_lines(i: &RuleInput<'_>) -> bool {
    i.metrics.link_ratio >= 1.0 && i.metrics.link_count > 0
}

fn high_density(i: &RuleInput<'_>) -> bool {
    i.metrics.links_per_100_chars > HIGH_DENSITY_LINKS_PER_100
        && i.metrics.link_count > HIGH_DENSITY_MIN_LINKS
}

fn medium_density(i: &RuleInput<'_>) -> bool {
    i.metrics.links_per_100_chars > MEDIUM_DENSITY_LINKS_PER_100
        && i.metrics.link_count > MEDIUM_DENSITY_MIN_LINKS
}
