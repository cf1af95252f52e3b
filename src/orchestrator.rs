// SPDX-License-Identifier: PMPL-1.0-or-later
//! Per-URL validation pipeline and the concurrent runner.
//!
//! Each URL is fetched once; metadata, JSON-LD and accessibility run on the
//! fetched markup, and the markup is posted to the conformance service. A
//! failure in one URL or one sub-check never affects another.

use crate::analyzers;
use crate::config::Config;
use crate::conformance::{ConformanceClient, ConformanceReport, ConformanceStatus};
use crate::document::Document;
use crate::error::Result;
use crate::fetch::{http_client, PageFetcher};
use crate::finding::RuleResult;
use crate::metadata::MetadataReport;
use crate::store::ResultStore;
use crate::structured_data;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Metadata results, or the reason the page could not be examined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataOutcome {
    Report(Box<MetadataReport>),
    Error { error: String },
}

impl MetadataOutcome {
    pub fn report(&self) -> Option<&MetadataReport> {
        match self {
            MetadataOutcome::Report(r) => Some(&**r),
            MetadataOutcome::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MetadataOutcome::Report(_) => None,
            MetadataOutcome::Error { error } => Some(error),
        }
    }
}

/// Everything known about one validated URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlReport {
    pub url: String,
    pub checked_at: DateTime<Utc>,
    pub metadata: MetadataOutcome,
    /// Absent when the page could not be fetched or the check was disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conformance: Option<ConformanceReport>,
    /// Absent when the page could not be fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<RuleResult>,
}

/// Summary classification shown next to each URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Pass,
    Warn,
    Error,
    Pending,
    Running,
}

impl OverallStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            OverallStatus::Pass => "✅",
            OverallStatus::Warn => "⚠️",
            OverallStatus::Error => "❌",
            OverallStatus::Pending => "⏳",
            OverallStatus::Running => "🔄",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallStatus::Pass => write!(f, "PASS"),
            OverallStatus::Warn => write!(f, "WARN"),
            OverallStatus::Error => write!(f, "ERROR"),
            OverallStatus::Pending => write!(f, "PENDING"),
            OverallStatus::Running => write!(f, "RUNNING"),
        }
    }
}

impl UrlReport {
    /// Bundle for a page that could not be fetched
    pub fn fetch_failed(url: &str, reason: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            checked_at: Utc::now(),
            metadata: MetadataOutcome::Error {
                error: reason.into(),
            },
            conformance: None,
            accessibility: None,
        }
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.metadata.error()
    }

    /// Classification of a completed bundle
    pub fn overall_status(&self) -> OverallStatus {
        if self.metadata.error().is_some() {
            return OverallStatus::Error;
        }
        if let Some(conformance) = &self.conformance {
            if conformance.status != ConformanceStatus::Pass {
                return OverallStatus::Warn;
            }
        }
        match &self.accessibility {
            Some(a) if !a.passed() || !a.findings().is_empty() => OverallStatus::Warn,
            _ => OverallStatus::Pass,
        }
    }

    /// Whether this URL should fail a CI run
    pub fn blocks(&self) -> bool {
        self.fetch_error().is_some() || self.accessibility.as_ref().is_some_and(|a| !a.passed())
    }
}

/// Runs the validation pipeline for one or many URLs
#[derive(Clone)]
pub struct Orchestrator {
    fetcher: PageFetcher,
    conformance: Option<ConformanceClient>,
    concurrency: usize,
}

impl Orchestrator {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = http_client(&config.fetch)?;

        let conformance = config
            .conformance
            .enabled
            .then(|| ConformanceClient::new(client.clone(), &config.conformance));

        Ok(Self {
            fetcher: PageFetcher::new(client, &config.fetch),
            conformance,
            concurrency: config.concurrency,
        })
    }

    /// Override the number of URLs validated at once (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Turn the conformance check off
    pub fn without_conformance(mut self) -> Self {
        self.conformance = None;
        self
    }

    /// Fetch and validate a single URL
    pub async fn validate_url(&self, url: &str) -> UrlReport {
        match self.fetcher.fetch(url).await {
            Ok(body) => self.validate_markup(url, &body).await,
            Err(e) => {
                info!("Could not fetch {}: {}", url, e);
                UrlReport::fetch_failed(url, e.to_string())
            }
        }
    }

    /// Validate markup obtained elsewhere, attributing it to `url`
    pub async fn validate_markup(&self, url: &str, markup: &str) -> UrlReport {
        // Document is not Send; keep it out of scope across the await below
        let (metadata, accessibility) = {
            let document = Document::parse(markup);
            let json_ld = structured_data::extract_from(&document, url);
            (
                MetadataReport::collect(url, &document, json_ld),
                analyzers::evaluate(&document),
            )
        };

        let conformance = match &self.conformance {
            Some(client) => Some(client.check(markup).await),
            None => None,
        };

        debug!(
            "Validated {}: accessibility {}, {} finding(s)",
            url,
            accessibility.status(),
            accessibility.findings().len()
        );

        UrlReport {
            url: url.to_string(),
            checked_at: Utc::now(),
            metadata: MetadataOutcome::Report(Box::new(metadata)),
            conformance,
            accessibility: Some(accessibility),
        }
    }

    /// Validate every URL concurrently; duplicates are validated once
    pub async fn validate_all(&self, urls: &[String]) -> BTreeMap<String, UrlReport> {
        self.run(urls, None).await
    }

    /// Like [`validate_all`](Self::validate_all), recording progress in `store`
    pub async fn validate_all_into(
        &self,
        store: &ResultStore,
        urls: &[String],
    ) -> BTreeMap<String, UrlReport> {
        self.run(urls, Some(store)).await
    }

    async fn run(&self, urls: &[String], store: Option<&ResultStore>) -> BTreeMap<String, UrlReport> {
        let unique: BTreeSet<String> = urls.iter().cloned().collect();
        info!(
            "Validating {} URL(s), concurrency {}",
            unique.len(),
            self.concurrency
        );

        if let Some(store) = store {
            store.mark_pending(unique.iter());
        }

        let limiter = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut task_urls = HashMap::new();

        for url in unique {
            let this = self.clone();
            let limiter = Arc::clone(&limiter);
            let store = store.cloned();
            let task_url = url.clone();

            let handle = tasks.spawn(async move {
                // Only fails if the semaphore is closed, which never happens here
                let _permit = limiter.acquire_owned().await.ok();
                if let Some(store) = &store {
                    store.mark_running(&task_url);
                }
                this.validate_url(&task_url).await
            });
            task_urls.insert(handle.id(), url);
        }

        let mut results = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            let report = match joined {
                Ok(report) => report,
                Err(e) => {
                    let Some(url) = task_urls.get(&e.id()) else {
                        error!("Validation task failed: {}", e);
                        continue;
                    };
                    error!("Validation of {} aborted: {}", url, e);
                    UrlReport::fetch_failed(url, format!("Validation task failed: {}", e))
                }
            };

            if let Some(store) = store {
                store.complete(report.clone());
            }
            results.insert(report.url.clone(), report);
        }

        results
    }
}
