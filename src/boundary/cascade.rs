//! Pass D: trailing footer cascade.
//!
//! Isolated link-heavy sections inside an article are usually reference
//! lists, not footers. Only a run of link-rich sections at the tail of the
//! document is trusted, and a substantial section ends the backward scan.

use crate::diagnostics::DiagnosticLog;
use crate::link_density::SectionMetrics;
use crate::thresholds::{
    CASCADE_LINKS_PER_100, CASCADE_LIST_MIN_LINKS, CASCADE_MIN_LINKS, CASCADE_MIN_RUN,
    SUBSTANTIAL_SPARSE_LINKS_PER_100, SUBSTANTIAL_SPARSE_TEXT, SUBSTANTIAL_TEXT,
};

use super::classify::ClassifiedSection;

/// A section that can extend the cascade.
///
/// Rule-flagged footers always qualify. Otherwise the section needs many
/// links at high density, or nothing but link lines.
#[must_use]
pub fn is_link_rich(section: &ClassifiedSection) -> bool {
    let m = &section.metrics;
    section.is_footer
        || (m.links_per_100_chars > CASCADE_LINKS_PER_100 && m.link_count > CASCADE_MIN_LINKS)
        || (m.link_ratio >= 1.0 && m.link_count > CASCADE_LIST_MIN_LINKS)
}

/// A section with enough prose to stop the backward scan.
#[must_use]
pub fn is_substantial(metrics: &SectionMetrics) -> bool {
    metrics.text_length_no_links > SUBSTANTIAL_TEXT
        || (metrics.text_length_no_links > SUBSTANTIAL_SPARSE_TEXT
            && metrics.links_per_100_chars < SUBSTANTIAL_SPARSE_LINKS_PER_100)
}

/// Outcome of the backward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cascade {
    /// Earliest section index of the committed cascade.
    pub start: Option<usize>,
    /// Length of the link-rich run open when the scan ended.
    pub run: usize,
    /// The substantial section that stopped the scan.
    pub stopped_at: Option<usize>,
}

/// Scan backward from the last section and mark the trailing cascade.
///
/// Link-rich sections extend the current run, ambiguous ones reset it
/// without ending the scan, and a substantial section ends the scan. Only
/// the run still open at that point is considered: it is committed when it
/// holds at least `CASCADE_MIN_RUN` sections, and every section from its
/// first member to the end becomes a footer with `in_footer_cascade`.
pub fn propagate(sections: &mut [ClassifiedSection], log: &mut DiagnosticLog) -> Cascade {
    let mut cascade = Cascade::default();
    let mut run_start = None;

    for (i, section) in sections.iter().enumerate().rev() {
        if is_link_rich(section) {
            cascade.run += 1;
            run_start = Some(i);
            log.record(format!("  Section {i}: link-rich, cascade run {}", cascade.run));
        } else if is_substantial(&section.metrics) {
            log.record(format!(
                "  Section {i}: substantial content ({} chars), stopping",
                section.metrics.text_length_no_links
            ));
            cascade.stopped_at = Some(i);
            break;
        } else {
            if cascade.run > 0 {
                log.record(format!("  Section {i}: ambiguous, run reset"));
            }
            cascade.run = 0;
            run_start = None;
        }
    }

    let start = match run_start {
        Some(start) if cascade.run >= CASCADE_MIN_RUN => start,
        _ => {
            log.record(format!(
                "  No cascade: {} consecutive link-rich sections at the tail",
                cascade.run
            ));
            return cascade;
        }
    };

    for section in &mut sections[start..] {
        section.is_footer = true;
        section.in_footer_cascade = true;
    }
    log.record(format!("  Footer cascade starts at section {start}"));
    cascade.start = Some(start);
    cascade
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross_validate::Corroboration;
    use crate::section::Section;

    fn section(index: usize, metrics: SectionMetrics) -> ClassifiedSection {
        let section = Section {
            index,
            start_line: index * 10,
            end_line: index * 10 + 9,
            heading_text: format!("S{index}"),
            heading_level: 2,
            content: String::new(),
        };
        ClassifiedSection::with_metrics(section, metrics, Corroboration::default())
    }

    fn prose(index: usize) -> ClassifiedSection {
        section(index, SectionMetrics::from_counts(0, 1200, 6, 0))
    }

    fn links(index: usize) -> ClassifiedSection {
        section(index, SectionMetrics::from_counts(20, 300, 20, 20))
    }

    fn ambiguous(index: usize) -> ClassifiedSection {
        section(index, SectionMetrics::from_counts(0, 150, 2, 0))
    }

    #[test]
    fn test_substantial_and_link_rich_are_disjoint_for_fixtures() {
        assert!(is_substantial(&prose(0).metrics));
        assert!(is_link_rich(&links(0)));
        assert!(!is_link_rich(&ambiguous(0)));
        assert!(!is_substantial(&ambiguous(0).metrics));
    }

    #[test]
    fn test_trailing_run_is_committed() {
        let mut sections = vec![prose(0), prose(1), links(2), links(3)];
        let cascade = propagate(&mut sections, &mut DiagnosticLog::disabled());
        assert_eq!(cascade.start, Some(2));
        assert_eq!(cascade.stopped_at, Some(1));
        assert!(sections[2].in_footer_cascade && sections[3].in_footer_cascade);
        assert!(!sections[1].is_footer);
    }

    #[test]
    fn test_isolated_link_section_is_not_a_cascade() {
        let mut sections = vec![prose(0), links(1), prose(2)];
        let cascade = propagate(&mut sections, &mut DiagnosticLog::disabled());
        assert_eq!(cascade.start, None);
        assert!(!sections[1].in_footer_cascade);
        // the rule verdict is kept for the marker scan
        assert!(sections[1].is_footer);
    }

    #[test]
    fn test_single_trailing_link_section_is_not_a_cascade() {
        let mut sections = vec![prose(0), links(1)];
        assert_eq!(propagate(&mut sections, &mut DiagnosticLog::disabled()).start, None);
    }

    #[test]
    fn test_run_behind_ambiguous_gap_does_not_count() {
        let mut sections = vec![prose(0), links(1), ambiguous(2), links(3), links(4)];
        let cascade = propagate(&mut sections, &mut DiagnosticLog::disabled());
        assert_eq!(cascade.run, 1);
        assert_eq!(cascade.start, None);
        assert!(sections.iter().all(|s| !s.in_footer_cascade));
        assert!(!sections[2].is_footer);
    }

    #[test]
    fn test_ambiguous_gap_inside_final_run_is_swept_in() {
        let mut sections = vec![prose(0), links(1), links(2), ambiguous(3), links(4)];
        let cascade = propagate(&mut sections, &mut DiagnosticLog::disabled());
        assert_eq!((cascade.start, cascade.run), (Some(1), 2));
        assert!(sections[3].is_footer && sections[3].in_footer_cascade);
    }

    #[test]
    fn test_link_rich_thresholds() {
        // (link_count, text_length, non_empty_lines, link_lines, expected)
        let cases = [
            // dense and many links
            (6, 500, 8, 6, true),
            // many links but sparse: citations in prose
            (6, 1040, 8, 3, false),
            (20, 2000, 30, 10, false),
            // dense but too few links
            (5, 100, 8, 4, false),
            // all-link lists need more than two links
            (3, 200, 3, 3, true),
            (2, 200, 2, 2, false),
            (3, 200, 4, 3, false),
        ];
        for (links, text, lines, link_lines, expected) in cases {
            let metrics = SectionMetrics::from_counts(links, text, lines, link_lines);
            let s = ClassifiedSection {
                is_footer: false,
                ..section(0, metrics)
            };
            assert_eq!(
                is_link_rich(&s),
                expected,
                "links={links} text={text} lines={lines} link_lines={link_lines}"
            );
        }
    }

    #[test]
    fn test_rule_flagged_footer_is_link_rich() {
        let metrics = SectionMetrics::from_counts(0, 150, 2, 0);
        let s = ClassifiedSection {
            is_footer: true,
            ..section(0, metrics)
        };
        assert!(is_link_rich(&s));
    }

    #[test]
    fn test_substantial_thresholds() {
        // (link_count, text_length, expected)
        let cases = [
            (0, 801, true),
            (4, 800, false),
            (6, 1040, true),
            // medium length counts only when sparse in links
            (1, 401, true),
            (0, 400, false),
            (2, 450, false),
            (1, 450, true),
        ];
        for (links, text, expected) in cases {
            let metrics = SectionMetrics::from_counts(links, text, 4, links.min(4));
            assert_eq!(is_substantial(&metrics), expected, "links={links} text={text}");
        }
    }

    #[test]
    fn test_cited_prose_stops_the_scan() {
        let cited = || section(0, SectionMetrics::from_counts(6, 1040, 8, 3));
        let mut sections = vec![prose(0), cited(), cited()];
        let cascade = propagate(&mut sections, &mut DiagnosticLog::disabled());
        assert_eq!(cascade.start, None);
        assert_eq!(cascade.stopped_at, Some(2));
    }

    #[test]
    fn test_cascade_covers_a_suffix() {
        let mut sections = vec![prose(0), links(1), links(2), ambiguous(3), links(4)];
        let cascade = propagate(&mut sections, &mut DiagnosticLog::disabled());
        let Some(start) = cascade.start else {
            panic!("expected a cascade");
        };
        assert!(sections[start..].iter().all(|s| s.in_footer_cascade));
        assert!(sections[..start].iter().all(|s| !s.in_footer_cascade));
    }
}
