// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document language - WCAG 3.1.1 Language of Page (technique H57)
//!
//! The document element must carry a non-empty `lang` attribute. Blank
//! markup has no document element and is reported the same way.

use crate::analyzers::Rule;
use crate::document::{has_value, Document};
use crate::finding::{Finding, FindingKind};

const WCAG_REF: &str = "3.1.1 H57";

/// Checks the `lang` attribute on `<html>`
pub struct LanguageRule;

impl Rule for LanguageRule {
    fn name(&self) -> &str {
        "Document Language"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let declared = document
            .root()
            .is_some_and(|root| has_value(&root, "lang"));

        if declared {
            Vec::new()
        } else {
            vec![Finding::error(
                WCAG_REF,
                FindingKind::MissingLang,
                "HTML element missing lang attribute",
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> Vec<Finding> {
        LanguageRule.check(&Document::parse(html))
    }

    #[test]
    fn test_lang_present() {
        assert!(check(r#"<html lang="en"><body></body></html>"#).is_empty());
    }

    #[test]
    fn test_lang_missing() {
        let findings = check("<html><body></body></html>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].wcag, "3.1.1 H57");
        assert_eq!(findings[0].kind, FindingKind::MissingLang);
    }

    #[test]
    fn test_lang_empty_counts_as_missing() {
        assert_eq!(check(r#"<html lang=""><body></body></html>"#).len(), 1);
    }

    #[test]
    fn test_fragment_without_html_tag() {
        assert_eq!(check("<p>Just a paragraph</p>").len(), 1);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(check("").len(), 1);
    }
}
