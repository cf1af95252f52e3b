// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for the rule engine, metadata checks and reports

use pagebot::metadata::{CheckStatus, MetadataReport};
use pagebot::report::{generate_report, OutputFormat};
use pagebot::{check_accessibility, document::Document, structured_data, FindingKind, RuleStatus};
use std::path::Path;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(Path::new("tests/fixtures").join(name)).expect("fixture should exist")
}

#[test]
fn test_accessible_fixture_has_no_findings() {
    let result = check_accessibility(&fixture("accessible.html"));

    assert_eq!(
        result.status(),
        RuleStatus::Pass,
        "unexpected findings: {:?}",
        result.findings()
    );
    assert!(result.findings().is_empty());
    assert_eq!(result.message(), "No issues found");
}

#[test]
fn test_inaccessible_fixture() {
    let result = check_accessibility(&fixture("inaccessible.html"));

    assert_eq!(result.status(), RuleStatus::Fail);
    assert_eq!(result.error_count(), 9);
    assert_eq!(result.warning_count(), 3);
    assert_eq!(result.message(), "Found 9 errors, 3 warnings");

    let kinds: Vec<FindingKind> = result.findings().iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FindingKind::MissingLang,
            FindingKind::ImageAltMissing,
            FindingKind::InputMissingLabel,
            FindingKind::InputMissingLabel,
            FindingKind::SelectMissingLabel,
            FindingKind::TextareaMissingLabel,
            FindingKind::EmptyButton,
            FindingKind::EmptyInputButton,
            FindingKind::EmptyLink,
            FindingKind::MissingH1,
            FindingKind::HeadingSkip,
            FindingKind::TableMissingHeaders,
        ]
    );

    let inputs = result.of_kind(FindingKind::InputMissingLabel);
    assert_eq!(inputs[0].message, "Input (text) has no associated label");
    assert_eq!(inputs[1].message, "Input (email) has no associated label");
    assert_eq!(
        result.of_kind(FindingKind::HeadingSkip)[0].message,
        "Heading level skipped from H2 to H4"
    );
}

#[test]
fn test_evaluation_is_repeatable() {
    let markup = fixture("inaccessible.html");
    assert_eq!(check_accessibility(&markup), check_accessibility(&markup));
}

#[test]
fn test_accessible_fixture_metadata() {
    let url = "https://early-testimony.ehri-project.eu/";
    let document = Document::parse(&fixture("accessible.html"));
    let json_ld = structured_data::extract_from(&document, url);
    let report = MetadataReport::collect(url, &document, json_ld);

    assert!(!report.has_failures());
    assert_eq!(report.html_lang.value.as_deref(), Some("en"));
    assert_eq!(report.json_ld.len(), 1);
    assert_eq!(structured_data::record_type(&report.json_ld[0]), "WebSite");
}

#[test]
fn test_inaccessible_fixture_metadata() {
    let url = "https://example.org/";
    let document = Document::parse(&fixture("inaccessible.html"));
    let report = MetadataReport::collect(url, &document, structured_data::extract_from(&document, url));

    assert_eq!(report.html_lang.status, CheckStatus::Fail);
    assert!(report.meta_tags.iter().all(|t| t.status == CheckStatus::Fail));
    assert_eq!(report.open_graph.missing, vec!["og:type", "og:image", "og:url"]);
    assert!(report.json_ld.is_empty());
}

#[test]
fn test_empty_results_report_formats() {
    let results = Default::default();
    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Sarif] {
        assert!(!generate_report(&results, format).is_empty(), "{} report", format);
    }
}
