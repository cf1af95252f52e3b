// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text - WCAG 1.1.1 Non-text Content (technique H37)
//!
//! Every `<img>` needs an `alt` attribute. `alt=""` marks a decorative image
//! and passes; only a missing attribute is reported.

use crate::analyzers::Rule;
use crate::document::{attr, snippet, Document};
use crate::finding::{Finding, FindingKind};

const WCAG_REF: &str = "1.1.1 H37";

/// Checks `<img>` elements for an `alt` attribute
pub struct ImageAltRule;

impl Rule for ImageAltRule {
    fn name(&self) -> &str {
        "Image Alternative Text"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        document
            .select("img")
            .iter()
            .filter(|img| attr(img, "alt").is_none())
            .map(|img| {
                Finding::error(WCAG_REF, FindingKind::ImageAltMissing, "Image missing alt attribute")
                    .with_element(snippet(img))
            })
            .collect()
    }
}
