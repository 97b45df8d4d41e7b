//! Pass C: per-section footer classification.

use std::fmt;

use crate::cross_validate::{ContainerFinder, Corroboration, CrossValidator};
use crate::diagnostics::{truncate, DiagnosticLog};
use crate::link_density::SectionMetrics;
use crate::rules::{first_matching_rule, md_high_links};
use crate::section::Section;

/// A section with its metrics and footer verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSection {
    pub section: Section,
    pub metrics: SectionMetrics,
    pub corroboration: Corroboration,
    /// Name of the first rule that fired.
    pub fired_rule: Option<&'static str>,
    pub is_footer: bool,
    /// Set by the cascade propagator; implies `is_footer`.
    pub in_footer_cascade: bool,
}

impl ClassifiedSection {
    /// Measure and classify one section.
    #[must_use]
    pub fn classify(section: Section, corroboration: Corroboration) -> Self {
        let metrics = SectionMetrics::from_markdown(&section.content);
        Self::with_metrics(section, metrics, corroboration)
    }

    /// Classify a section whose metrics are already known.
    #[must_use]
    pub fn with_metrics(section: Section, metrics: SectionMetrics, corroboration: Corroboration) -> Self {
        let fired_rule = first_matching_rule(
            &metrics,
            corroboration.html_high_links,
            &section.heading_text,
        )
        .map(|rule| rule.name);

        Self {
            section,
            metrics,
            corroboration,
            fired_rule,
            is_footer: fired_rule.is_some(),
            in_footer_cascade: false,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.section.index
    }
}

impl fmt::Display for ClassifiedSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        write!(
            f,
            "Section {} [{}] lines {}-{}: links={} text={} ratio={:.2} per100={:.2} avg={:.1} md_high={} html_high={}",
            self.section.index,
            truncate(&self.section.heading_text, 60),
            self.section.start_line,
            self.section.end_line,
            m.link_count,
            m.text_length_no_links,
            m.link_ratio,
            m.links_per_100_chars,
            m.avg_chars_per_link,
            md_high_links(m),
            self.corroboration.html_high_links,
        )?;
        match self.fired_rule {
            Some(rule) => write!(f, " -> FOOTER ({rule})"),
            None => f.write_str(" -> content"),
        }
    }
}

/// Classify every section, corroborating each heading against the HTML.
pub fn classify_sections<F: ContainerFinder>(
    sections: Vec<Section>,
    validator: &CrossValidator<F>,
    log: &mut DiagnosticLog,
) -> Vec<ClassifiedSection> {
    sections
        .into_iter()
        .map(|section| {
            let corroboration = validator.corroborate(&section.heading_text);
            let classified = ClassifiedSection::classify(section, corroboration);
            log.record(classified.to_string());
            classified
        })
        .collect()
}
