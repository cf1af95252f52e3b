// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessible names for buttons and links - WCAG 1.1.1 / 2.4.4 (G91, H30)
//!
//! A `<button>` or an `<a href>` is named by any of: non-blank text content,
//! `aria-label`, `aria-labelledby`, `title`, or a descendant `<img>` with a
//! non-empty `alt`. Anchors without `href` are not links and are skipped.

use crate::analyzers::Rule;
use crate::document::{has_named_image, has_value, snippet, trimmed_text, Document};
use crate::finding::{Finding, FindingKind};
use scraper::ElementRef;

const BUTTON_WCAG_REF: &str = "1.1.1 & 2.4.4";
const LINK_WCAG_REF: &str = "2.4.4 G91/H30";

fn has_accessible_name(element: &ElementRef<'_>) -> bool {
    !trimmed_text(element).is_empty()
        || has_value(element, "aria-label")
        || has_value(element, "aria-labelledby")
        || has_value(element, "title")
        || has_named_image(element)
}

/// `<button>` elements need an accessible name
pub struct ButtonNameRule;

impl Rule for ButtonNameRule {
    fn name(&self) -> &str {
        "Button Name"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        document
            .select("button")
            .iter()
            .filter(|button| !has_accessible_name(button))
            .map(|button| {
                Finding::error(BUTTON_WCAG_REF, FindingKind::EmptyButton, "Button has no accessible name")
                    .with_element(snippet(button))
            })
            .collect()
    }
}

/// `<a href>` elements need an accessible name
pub struct LinkNameRule;

impl Rule for LinkNameRule {
    fn name(&self) -> &str {
        "Link Name"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        document
            .select("a[href]")
            .iter()
            .filter(|link| !has_accessible_name(link))
            .map(|link| {
                Finding::error(LINK_WCAG_REF, FindingKind::EmptyLink, "Link has no accessible name")
                    .with_element(snippet(link))
            })
            .collect()
    }
}
