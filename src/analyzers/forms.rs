// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form control labels - WCAG 1.3.1 Info and Relationships (H44, ARIA16)
//! and accessible names for input buttons - WCAG 1.1.1 / 2.4.4
//!
//! Checks form element accessibility:
//! - Text-like inputs need a `<label for>`, `aria-label`, `aria-labelledby` or `title`
//! - `<select>` and `<textarea>` need a `<label for>`, `aria-label` or `aria-labelledby`
//! - `<input type="submit|button|reset">` needs a `value`, `aria-label`,
//!   `aria-labelledby` or `title`
//!
//! `title` is accepted for inputs but not for select/textarea. The rule set
//! has always treated them differently; keep it that way unless the rule
//! set itself changes.

use crate::analyzers::Rule;
use crate::document::{attr, has_value, snippet, Document};
use crate::finding::{Finding, FindingKind};
use scraper::ElementRef;
use std::collections::HashSet;

const LABEL_WCAG_REF: &str = "1.3.1 H44/ARIA16";
const NAME_WCAG_REF: &str = "1.1.1 & 2.4.4";

/// Input types that never need a label
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

/// Input types rendered as buttons, named by their `value`
const BUTTON_INPUT_TYPES: &[&str] = &["submit", "button", "reset"];

/// `for` targets of every `<label>` in the document
struct LabelIndex<'a> {
    targets: HashSet<&'a str>,
}

impl<'a> LabelIndex<'a> {
    fn build(document: &'a Document) -> Self {
        let targets = document
            .select("label")
            .into_iter()
            .filter_map(|label| attr(&label, "for"))
            .collect();
        Self { targets }
    }

    /// Whether some `<label for>` points at this element's non-empty `id`
    fn labels(&self, element: &ElementRef<'_>) -> bool {
        match attr(element, "id") {
            Some(id) if !id.is_empty() => self.targets.contains(id),
            _ => false,
        }
    }
}

/// Lowercased `type`, defaulting to `text` when absent
fn input_type(input: &ElementRef<'_>) -> String {
    attr(input, "type").unwrap_or("text").to_ascii_lowercase()
}

fn has_aria_name(element: &ElementRef<'_>) -> bool {
    has_value(element, "aria-label") || has_value(element, "aria-labelledby")
}

/// Text-like `<input>` elements need a label
pub struct InputLabelRule;

impl Rule for InputLabelRule {
    fn name(&self) -> &str {
        "Input Label"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let labels = LabelIndex::build(document);
        let mut findings = Vec::new();

        for input in document.select("input") {
            if EXEMPT_INPUT_TYPES.contains(&input_type(&input).as_str()) {
                continue;
            }

            let labelled = labels.labels(&input) || has_aria_name(&input) || has_value(&input, "title");
            if !labelled {
                let shown_type = attr(&input, "type").unwrap_or("text");
                findings.push(
                    Finding::error(
                        LABEL_WCAG_REF,
                        FindingKind::InputMissingLabel,
                        format!("Input ({}) has no associated label", shown_type),
                    )
                    .with_element(snippet(&input)),
                );
            }
        }

        findings
    }
}

/// Check a label-only control (`<select>`, `<textarea>`)
fn check_label_only(
    document: &Document,
    tag: &str,
    kind: FindingKind,
    message: &str,
) -> Vec<Finding> {
    let labels = LabelIndex::build(document);

    document
        .select(tag)
        .iter()
        .filter(|element| !labels.labels(element) && !has_aria_name(element))
        .map(|element| Finding::error(LABEL_WCAG_REF, kind, message).with_element(snippet(element)))
        .collect()
}

/// `<select>` elements need a label; `title` does not count
pub struct SelectLabelRule;

impl Rule for SelectLabelRule {
    fn name(&self) -> &str {
        "Select Label"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        check_label_only(
            document,
            "select",
            FindingKind::SelectMissingLabel,
            "Select element has no associated label",
        )
    }
}

/// `<textarea>` elements need a label; `title` does not count
pub struct TextareaLabelRule;

impl Rule for TextareaLabelRule {
    fn name(&self) -> &str {
        "Textarea Label"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        check_label_only(
            document,
            "textarea",
            FindingKind::TextareaMissingLabel,
            "Textarea has no associated label",
        )
    }
}

/// Button-like `<input>` elements need an accessible name
pub struct InputButtonNameRule;

impl Rule for InputButtonNameRule {
    fn name(&self) -> &str {
        "Input Button Name"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        for input in document.select("input") {
            if !BUTTON_INPUT_TYPES.contains(&input_type(&input).as_str()) {
                continue;
            }

            let named = has_value(&input, "value") || has_aria_name(&input) || has_value(&input, "title");
            if !named {
                findings.push(
                    Finding::error(
                        NAME_WCAG_REF,
                        FindingKind::EmptyInputButton,
                        format!("Input type={} has no accessible name", attr(&input, "type").unwrap_or_default()),
                    )
                    .with_element(snippet(&input)),
                );
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(rule: &dyn Rule, html: &str) -> Vec<FindingKind> {
        rule.check(&Document::parse(html)).into_iter().map(|f| f.kind).collect()
    }

    #[test]
    fn test_input_with_label_for() {
        let html = r#"<label for="name">Name</label><input type="text" id="name">"#;
        assert!(kinds(&InputLabelRule, html).is_empty());
    }

    #[test]
    fn test_label_lookup_spans_the_document() {
        let html = r#"
            <form><input type="text" id="q"></form>
            <footer><label for="q">Search</label></footer>
        "#;
        assert!(kinds(&InputLabelRule, html).is_empty());
    }

    #[test]
    fn test_label_for_other_id_does_not_count() {
        let html = r#"<label for="other">Name</label><input type="text" id="name">"#;
        assert_eq!(kinds(&InputLabelRule, html), vec![FindingKind::InputMissingLabel]);
    }

    #[test]
    fn test_empty_id_never_matches_empty_for() {
        let html = r#"<label for="">Name</label><input type="text" id="">"#;
        assert_eq!(kinds(&InputLabelRule, html).len(), 1);
    }

    #[test]
    fn test_input_substitute_names() {
        for attr in [r#"aria-label="Search""#, r#"aria-labelledby="lbl""#, r#"title="Search""#] {
            let html = format!(r#"<input type="search" {}>"#, attr);
            assert!(kinds(&InputLabelRule, &html).is_empty(), "{} should label the input", attr);
        }
    }

    #[test]
    fn test_input_without_label() {
        let findings = InputLabelRule.check(&Document::parse(r#"<input type="text">"#));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Input (text) has no associated label");
        assert_eq!(findings[0].wcag, "1.3.1 H44/ARIA16");
    }

    #[test]
    fn test_input_without_type_is_text() {
        let findings = InputLabelRule.check(&Document::parse("<input name=\"q\">"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Input (text) has no associated label");
    }

    #[test]
    fn test_exempt_input_types_never_need_labels() {
        for ty in ["hidden", "submit", "button", "reset", "image", "SUBMIT"] {
            let html = format!(r#"<input type="{}">"#, ty);
            assert!(kinds(&InputLabelRule, &html).is_empty(), "type={} should be exempt", ty);
        }
    }

    #[test]
    fn test_select_with_label() {
        let html = r#"<label for="country">Country</label><select id="country"><option>NL</option></select>"#;
        assert!(kinds(&SelectLabelRule, html).is_empty());
    }

    #[test]
    fn test_select_title_is_not_a_label() {
        let html = r#"<select title="Country"><option>NL</option></select>"#;
        assert_eq!(kinds(&SelectLabelRule, html), vec![FindingKind::SelectMissingLabel]);
    }

    #[test]
    fn test_select_aria_label() {
        let html = r#"<select aria-label="Country"><option>NL</option></select>"#;
        assert!(kinds(&SelectLabelRule, html).is_empty());
    }

    #[test]
    fn test_textarea_with_label() {
        let html = r#"<label for="msg">Message</label><textarea id="msg"></textarea>"#;
        assert!(kinds(&TextareaLabelRule, html).is_empty());
    }

    #[test]
    fn test_textarea_without_label() {
        let html = r#"<textarea title="Message"></textarea><textarea aria-labelledby="x"></textarea>"#;
        assert_eq!(kinds(&TextareaLabelRule, html), vec![FindingKind::TextareaMissingLabel]);
    }

    #[test]
    fn test_submit_with_value() {
        assert!(kinds(&InputButtonNameRule, r#"<input type="submit" value="Send">"#).is_empty());
    }

    #[test]
    fn test_submit_without_value() {
        let findings = InputButtonNameRule.check(&Document::parse(r#"<input type="submit">"#));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::EmptyInputButton);
        assert_eq!(findings[0].message, "Input type=submit has no accessible name");
    }

    #[test]
    fn test_button_input_with_aria_label() {
        assert!(kinds(&InputButtonNameRule, r#"<input type="button" aria-label="Open menu">"#).is_empty());
    }

    #[test]
    fn test_reset_without_value() {
        assert_eq!(
            kinds(&InputButtonNameRule, r#"<input type="reset" value="">"#),
            vec![FindingKind::EmptyInputButton]
        );
    }

    #[test]
    fn test_image_and_text_inputs_are_not_input_buttons() {
        assert!(kinds(&InputButtonNameRule, r#"<input type="image" src="go.png"><input type="text">"#).is_empty());
    }
}
