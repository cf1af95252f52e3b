// SPDX-License-Identifier: PMPL-1.0-or-later
//! Client for the external HTML conformance checker (Nu HTML Checker).
//!
//! The service judges the markup (PASS/FAIL). When it cannot be reached or
//! refuses the request, the outcome is ERROR with a reason; ERROR is never
//! reported as FAIL.

use crate::config::ConformanceConfig;
use crate::error::{PagebotError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Verdict of a conformance check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConformanceStatus {
    Pass,
    Fail,
    Error,
}

impl std::fmt::Display for ConformanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConformanceStatus::Pass => write!(f, "PASS"),
            ConformanceStatus::Fail => write!(f, "FAIL"),
            ConformanceStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// A message from the checker. Unknown fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorMessage {
    /// Empty when the checker sent no `type`; such messages are not counted
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ValidatorResponse {
    #[serde(default)]
    messages: Vec<ValidatorMessage>,
}

/// Conformance results for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub status: ConformanceStatus,
    pub error_count: usize,
    pub warning_count: usize,
    pub messages: Vec<ValidatorMessage>,
    /// Reason, set only for ERROR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConformanceReport {
    /// Classify checker messages: `error` fails the page, `info` counts as a warning
    pub fn from_messages(messages: Vec<ValidatorMessage>) -> Self {
        let error_count = messages.iter().filter(|m| m.kind == "error").count();
        let warning_count = messages.iter().filter(|m| m.kind == "info").count();

        Self {
            status: if error_count > 0 {
                ConformanceStatus::Fail
            } else {
                ConformanceStatus::Pass
            },
            error_count,
            warning_count,
            messages,
            message: None,
        }
    }

    /// The checker could not produce a verdict
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: ConformanceStatus::Error,
            error_count: 0,
            warning_count: 0,
            messages: Vec::new(),
            message: Some(reason.into()),
        }
    }
}

/// HTTP client for the conformance service
#[derive(Clone)]
pub struct ConformanceClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
    delay: Duration,
}

impl ConformanceClient {
    pub fn new(client: Client, config: &ConformanceConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            delay: Duration::from_millis(config.delay_ms),
        }
    }

    /// Check markup. Never fails; problems become an ERROR report.
    pub async fn check(&self, markup: &str) -> ConformanceReport {
        match self.request(markup).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Conformance check failed: {}", e);
                ConformanceReport::error(e.to_string())
            }
        }
    }

    async fn request(&self, markup: &str) -> Result<ConformanceReport> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        debug!("Posting {} bytes to {}", markup.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(markup.to_string())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.describe(e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PagebotError::Conformance(
                "Validator rate limited (429). Try again later.".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(PagebotError::Conformance(format!("Validator returned {}", status)));
        }

        let body: ValidatorResponse = response.json().await.map_err(|e| self.describe(e))?;
        Ok(ConformanceReport::from_messages(body.messages))
    }

    fn describe(&self, e: reqwest::Error) -> PagebotError {
        if e.is_timeout() {
            PagebotError::Conformance(format!(
                "Validator request timed out ({}s)",
                self.timeout.as_secs()
            ))
        } else if e.is_decode() {
            PagebotError::Conformance(format!("Validator response could not be read: {}", e))
        } else {
            PagebotError::Conformance(format!("Validator request failed: {}", e))
        }
    }
}
