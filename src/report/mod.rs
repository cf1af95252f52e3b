// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for validation results.
//!
//! Supports multiple output formats:
//! - Text: per-URL summary of every check, with a social preview
//! - JSON: the full result map for programmatic consumption
//! - SARIF: accessibility findings for IDE/CI integration

use crate::conformance::{ConformanceReport, ConformanceStatus};
use crate::finding::{RuleResult, Severity};
use crate::metadata::MetadataReport;
use crate::orchestrator::UrlReport;
use crate::structured_data::record_type;
use serde::Serialize;
use std::collections::BTreeMap;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// How a page would look when shared on social media
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialPreview {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub domain: Option<String>,
}

impl SocialPreview {
    pub fn from_metadata(metadata: &MetadataReport) -> Self {
        let og = &metadata.open_graph;
        Self {
            title: og.get("og:title").unwrap_or("No Title").to_string(),
            description: og.get("og:description").map(str::to_string),
            image: og.get("og:image").map(str::to_string),
            domain: og
                .get("og:url")
                .and_then(|u| url::Url::parse(u).ok())
                .and_then(|u| u.host_str().map(str::to_string)),
        }
    }
}

/// Generate a report for a set of validated URLs
pub fn generate_report(results: &BTreeMap<String, UrlReport>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(results),
        OutputFormat::Json => generate_json_report(results),
        OutputFormat::Sarif => generate_sarif_report(results),
    }
}

/// Generate human-readable text report
fn generate_text_report(results: &BTreeMap<String, UrlReport>) -> String {
    let mut output = String::new();

    output.push_str("=== Pagebot Validation Report ===\n\n");

    if results.is_empty() {
        output.push_str("No URLs validated.\n");
        return output;
    }

    for report in results.values() {
        let status = report.overall_status();
        output.push_str(&format!("{} {} [{}]\n", status.icon(), report.url, status));
        output.push_str(&format!(
            "  Checked: {}\n",
            report.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        match report.metadata.report() {
            Some(metadata) => write_metadata(&mut output, metadata),
            None => {
                output.push_str(&format!(
                    "  Error: {}\n\n",
                    report.fetch_error().unwrap_or("unknown")
                ));
                continue;
            }
        }

        match &report.conformance {
            Some(conformance) => write_conformance(&mut output, conformance),
            None => output.push_str("--- HTML Conformance ---\n  Skipped\n"),
        }

        if let Some(accessibility) = &report.accessibility {
            write_accessibility(&mut output, accessibility);
        }

        output.push('\n');
    }

    let blocked = results.values().filter(|r| r.blocks()).count();
    if blocked > 0 {
        output.push_str(&format!("RESULT: {} of {} URL(s) FAILED\n", blocked, results.len()));
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

fn write_metadata(output: &mut String, metadata: &MetadataReport) {
    output.push_str("--- Metadata ---\n");
    output.push_str(&format!(
        "  [{}] {}\n",
        metadata.html_lang.status, metadata.html_lang.message
    ));

    for tag in &metadata.meta_tags {
        output.push_str(&format!(
            "  [{}] {}: {}\n",
            tag.status,
            tag.tag,
            tag.content.as_deref().unwrap_or("N/A")
        ));
    }

    let og = &metadata.open_graph;
    output.push_str(&format!("  [{}] Open Graph: {}\n", og.status, og.message));
    for (property, content) in &og.found {
        output.push_str(&format!(
            "    {}: {}\n",
            property,
            content.as_deref().unwrap_or("N/A")
        ));
    }

    if metadata.json_ld.is_empty() {
        output.push_str("  JSON-LD: none\n");
    } else {
        let types: Vec<String> = metadata.json_ld.iter().map(record_type).collect();
        output.push_str(&format!(
            "  JSON-LD: {} item(s) ({})\n",
            metadata.json_ld.len(),
            types.join("; ")
        ));
    }

    let preview = SocialPreview::from_metadata(metadata);
    output.push_str("--- Social Preview ---\n");
    output.push_str(&format!("  Title: {}\n", preview.title));
    if let Some(description) = &preview.description {
        output.push_str(&format!("  Description: {}\n", description));
    }
    if let Some(image) = &preview.image {
        output.push_str(&format!("  Image: {}\n", image));
    }
    if let Some(domain) = &preview.domain {
        output.push_str(&format!("  Domain: {}\n", domain));
    }
}

fn write_conformance(output: &mut String, conformance: &ConformanceReport) {
    output.push_str("--- HTML Conformance ---\n");
    match conformance.status {
        ConformanceStatus::Error => output.push_str(&format!(
            "  [ERROR] {}\n",
            conformance.message.as_deref().unwrap_or("Validator unavailable")
        )),
        status => output.push_str(&format!(
            "  [{}] {} error(s), {} warning(s)\n",
            status, conformance.error_count, conformance.warning_count
        )),
    }
}

fn write_accessibility(output: &mut String, accessibility: &RuleResult) {
    output.push_str("--- Accessibility ---\n");
    output.push_str(&format!(
        "  [{}] {}\n",
        accessibility.status(),
        accessibility.message()
    ));

    for finding in accessibility.findings() {
        output.push_str(&format!(
            "  {} [{}] {}\n",
            finding.severity, finding.wcag, finding.message
        ));
        if let Some(element) = &finding.element {
            output.push_str(&format!("    Element: {}\n", element));
        }
    }
}

/// Generate JSON report
fn generate_json_report(results: &BTreeMap<String, UrlReport>) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize results: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    properties: SarifProperties,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifProperties {
    wcag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    snippet: Option<String>,
}

/// Generate SARIF report of accessibility findings
fn generate_sarif_report(results: &BTreeMap<String, UrlReport>) -> String {
    let sarif_results: Vec<SarifResult> = results
        .values()
        .filter_map(|report| report.accessibility.as_ref().map(|a| (report, a)))
        .flat_map(|(report, accessibility)| {
            accessibility.findings().iter().map(move |f| SarifResult {
                rule_id: f.kind.to_string(),
                level: match f.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                }
                .to_string(),
                message: SarifMessage {
                    text: f.message.clone(),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: report.url.clone(),
                        },
                    },
                }],
                properties: SarifProperties {
                    wcag: f.wcag.clone(),
                    snippet: f.element.clone(),
                },
            })
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "pagebot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/pagebot".to_string(),
                },
            },
            results: sarif_results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
