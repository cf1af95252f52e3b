// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility findings and the aggregated rule result.

use serde::{Deserialize, Serialize};

/// Severity levels for accessibility findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the page
    Error,
    /// Reported, never fails the page
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Machine-readable finding type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    MissingLang,
    ImageAltMissing,
    InputMissingLabel,
    SelectMissingLabel,
    TextareaMissingLabel,
    EmptyButton,
    EmptyInputButton,
    EmptyLink,
    MissingH1,
    MultipleH1,
    HeadingSkip,
    TableMissingHeaders,
}

impl FindingKind {
    /// Identifier as serialized (e.g. `image_alt_missing`)
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::MissingLang => "missing_lang",
            FindingKind::ImageAltMissing => "image_alt_missing",
            FindingKind::InputMissingLabel => "input_missing_label",
            FindingKind::SelectMissingLabel => "select_missing_label",
            FindingKind::TextareaMissingLabel => "textarea_missing_label",
            FindingKind::EmptyButton => "empty_button",
            FindingKind::EmptyInputButton => "empty_input_button",
            FindingKind::EmptyLink => "empty_link",
            FindingKind::MissingH1 => "missing_h1",
            FindingKind::MultipleH1 => "multiple_h1",
            FindingKind::HeadingSkip => "heading_skip",
            FindingKind::TableMissingHeaders => "table_missing_headers",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single accessibility finding. Built by rules, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// WCAG success criterion / technique reference (e.g. "1.1.1 H37")
    pub wcag: String,
    /// Finding type
    #[serde(rename = "type")]
    pub kind: FindingKind,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Truncated markup of the offending element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl Finding {
    /// Create an error-level finding
    pub fn error(wcag: &str, kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(wcag, kind, Severity::Error, message)
    }

    /// Create a warning-level finding
    pub fn warning(wcag: &str, kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(wcag, kind, Severity::Warning, message)
    }

    fn new(wcag: &str, kind: FindingKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            wcag: wcag.to_string(),
            kind,
            severity,
            message: message.into(),
            element: None,
        }
    }

    /// Attach an element snippet
    pub fn with_element(mut self, element: String) -> Self {
        self.element = Some(element);
        self
    }
}

/// PASS/FAIL verdict of a rule run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleStatus::Pass => write!(f, "PASS"),
            RuleStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Outcome of running every accessibility rule over one document.
///
/// Counts and status are derived from `findings` at construction; there is
/// no way to set them independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    status: RuleStatus,
    error_count: usize,
    warning_count: usize,
    findings: Vec<Finding>,
    message: String,
}

impl RuleResult {
    /// Tally findings and derive the verdict
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let error_count = findings.iter().filter(|f| f.severity == Severity::Error).count();
        let warning_count = findings.iter().filter(|f| f.severity == Severity::Warning).count();

        let status = if error_count > 0 { RuleStatus::Fail } else { RuleStatus::Pass };
        let message = if findings.is_empty() {
            "No issues found".to_string()
        } else {
            format!("Found {} errors, {} warnings", error_count, warning_count)
        };

        Self {
            status,
            error_count,
            warning_count,
            findings,
            message,
        }
    }

    pub fn status(&self) -> RuleStatus {
        self.status
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Findings in rule order, document order within each rule
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Summary message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn passed(&self) -> bool {
        self.status == RuleStatus::Pass
    }

    /// Findings of one type
    pub fn of_kind(&self, kind: FindingKind) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.kind == kind).collect()
    }
}

impl<'de> Deserialize<'de> for RuleResult {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Stored counts are ignored and re-derived.
        #[derive(Deserialize)]
        struct Raw {
            findings: Vec<Finding>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(RuleResult::from_findings(raw.findings))
    }
}
