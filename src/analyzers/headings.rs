// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading structure - WCAG 1.3.1 Info and Relationships (technique H42)
//!
//! - Exactly one `<h1>` per page (missing and multiple are separate findings)
//! - Heading levels never jump down by more than one (h2 -> h4)

use crate::analyzers::Rule;
use crate::document::{snippet, Document};
use crate::finding::{Finding, FindingKind};
use scraper::ElementRef;

const WCAG_REF: &str = "1.3.1 H42";

/// Numeric level of an `h1`..`h6` element
fn heading_level(element: &ElementRef<'_>) -> Option<u8> {
    element
        .value()
        .name()
        .strip_prefix('h')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
}

/// The page has exactly one `<h1>`
pub struct HeadingPresenceRule;

impl Rule for HeadingPresenceRule {
    fn name(&self) -> &str {
        "Heading Presence"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        if document.root().is_none() {
            return Vec::new();
        }

        match document.select("h1").len() {
            0 => vec![Finding::warning(WCAG_REF, FindingKind::MissingH1, "Page has no H1 heading")],
            1 => Vec::new(),
            count => vec![Finding::warning(
                WCAG_REF,
                FindingKind::MultipleH1,
                format!("Page has {} H1 headings (should typically have one)", count),
            )],
        }
    }
}

/// Headings do not skip levels when going deeper
pub struct HeadingOrderRule;

impl Rule for HeadingOrderRule {
    fn name(&self) -> &str {
        "Heading Order"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();
        // 0 until the first heading is seen
        let mut previous: u8 = 0;

        for heading in document.select("h1, h2, h3, h4, h5, h6") {
            let Some(level) = heading_level(&heading) else {
                continue;
            };

            if previous > 0 && level > previous + 1 {
                findings.push(
                    Finding::warning(
                        WCAG_REF,
                        FindingKind::HeadingSkip,
                        format!("Heading level skipped from H{} to H{}", previous, level),
                    )
                    .with_element(snippet(&heading)),
                );
            }
            previous = level;
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(levels: &[u8]) -> Document {
        let body: String = levels
            .iter()
            .map(|l| format!("<h{0}>Heading {0}</h{0}>", l))
            .collect();
        Document::parse(&format!("<html lang=\"en\"><body>{}</body></html>", body))
    }

    #[test]
    fn test_single_h1() {
        assert!(HeadingPresenceRule.check(&page(&[1, 2])).is_empty());
    }

    #[test]
    fn test_missing_h1() {
        let findings = HeadingPresenceRule.check(&page(&[2, 3]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::MissingH1);
    }

    #[test]
    fn test_multiple_h1() {
        let findings = HeadingPresenceRule.check(&page(&[1, 1, 1]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::MultipleH1);
        assert_eq!(findings[0].message, "Page has 3 H1 headings (should typically have one)");
    }

    #[test]
    fn test_blank_document_has_no_heading_finding() {
        assert!(HeadingPresenceRule.check(&Document::parse("")).is_empty());
        assert!(HeadingPresenceRule.check(&Document::parse("<!DOCTYPE html>")).is_empty());
    }

    #[test]
    fn test_heading_skip() {
        let findings = HeadingOrderRule.check(&page(&[1, 3]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Heading level skipped from H1 to H3");
    }

    #[test]
    fn test_multiple_heading_skips() {
        let findings = HeadingOrderRule.check(&page(&[1, 3, 6]));
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1].message, "Heading level skipped from H3 to H6");
    }

    #[test]
    fn test_heading_order_correct() {
        assert!(HeadingOrderRule.check(&page(&[1, 2, 3, 2])).is_empty());
    }

    #[test]
    fn test_going_back_up_is_allowed() {
        assert!(HeadingOrderRule.check(&page(&[1, 2, 3, 4, 1, 2])).is_empty());
    }

    #[test]
    fn test_first_heading_may_start_deep() {
        assert!(HeadingOrderRule.check(&page(&[3, 4])).is_empty());
    }

    #[test]
    fn test_skip_after_decrease_is_measured_from_last_heading() {
        let findings = HeadingOrderRule.check(&page(&[1, 2, 3, 2, 4]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Heading level skipped from H2 to H4");
    }
}
