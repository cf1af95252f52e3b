// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility rule engine implementing a fixed set of WCAG checks.
//!
//! Each rule is a stateless unit struct that turns a parsed document into
//! zero or more findings. [`evaluate`] runs them in a fixed order and tallies
//! the result once at the end, so the same document always yields the same
//! findings in the same order.

pub mod alt_text;
pub mod forms;
pub mod headings;
pub mod language;
pub mod names;
pub mod tables;

use crate::document::Document;
use crate::finding::{Finding, RuleResult};

/// Trait implemented by all accessibility rules
pub trait Rule: Send + Sync {
    /// Human-readable name of this rule
    fn name(&self) -> &str;

    /// Inspect the document and return findings in document order
    fn check(&self, document: &Document) -> Vec<Finding>;
}

/// All rules, in the order their findings are reported
pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(language::LanguageRule),
        Box::new(alt_text::ImageAltRule),
        Box::new(forms::InputLabelRule),
        Box::new(forms::SelectLabelRule),
        Box::new(forms::TextareaLabelRule),
        Box::new(names::ButtonNameRule),
        Box::new(forms::InputButtonNameRule),
        Box::new(names::LinkNameRule),
        Box::new(headings::HeadingPresenceRule),
        Box::new(headings::HeadingOrderRule),
        Box::new(tables::TableHeadersRule),
    ]
}

/// Run every rule over a parsed document
pub fn evaluate(document: &Document) -> RuleResult {
    let findings: Vec<Finding> = rules()
        .iter()
        .flat_map(|rule| rule.check(document))
        .collect();

    RuleResult::from_findings(findings)
}

/// Parse markup and run every rule over it
pub fn check_accessibility(markup: &str) -> RuleResult {
    evaluate(&Document::parse(markup))
}
