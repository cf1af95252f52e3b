// SPDX-License-Identifier: PMPL-1.0-or-later
//! Shared, observable validation state.
//!
//! A cheaply clonable handle a front end can poll while the orchestrator
//! works through its URLs.

use crate::orchestrator::{OverallStatus, UrlReport};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Where a URL is in the pipeline
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "report", rename_all = "lowercase")]
pub enum UrlState {
    Pending,
    Running,
    Done(Box<UrlReport>),
}

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    inner: Arc<RwLock<HashMap<String, UrlState>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer cannot leave a half-updated entry, so poisoning is ignored
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, UrlState>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, UrlState>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue URLs, replacing any earlier result for them
    pub fn mark_pending<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut states = self.write();
        for url in urls {
            states.insert(url.as_ref().to_string(), UrlState::Pending);
        }
    }

    pub fn mark_running(&self, url: &str) {
        self.write().insert(url.to_string(), UrlState::Running);
    }

    pub fn complete(&self, report: UrlReport) {
        self.write()
            .insert(report.url.clone(), UrlState::Done(Box::new(report)));
    }

    /// Completed result for a URL
    pub fn get(&self, url: &str) -> Option<UrlReport> {
        match self.read().get(url) {
            Some(UrlState::Done(report)) => Some(report.as_ref().clone()),
            _ => None,
        }
    }

    pub fn state(&self, url: &str) -> Option<UrlState> {
        self.read().get(url).cloned()
    }

    /// Status icon classification, including in-flight URLs
    pub fn status(&self, url: &str) -> OverallStatus {
        match self.read().get(url) {
            Some(UrlState::Running) => OverallStatus::Running,
            Some(UrlState::Done(report)) => report.overall_status(),
            Some(UrlState::Pending) | None => OverallStatus::Pending,
        }
    }

    /// Whether any URL is still queued or running
    pub fn is_validating(&self) -> bool {
        self.read()
            .values()
            .any(|s| !matches!(s, UrlState::Done(_)))
    }

    /// URLs queued or running, sorted
    pub fn urls_in_progress(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .read()
            .iter()
            .filter(|(_, s)| !matches!(s, UrlState::Done(_)))
            .map(|(url, _)| url.clone())
            .collect();
        urls.sort();
        urls
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    /// All completed results, keyed by URL
    pub fn snapshot(&self) -> BTreeMap<String, UrlReport> {
        self.read()
            .iter()
            .filter_map(|(url, state)| match state {
                UrlState::Done(report) => Some((url.clone(), report.as_ref().clone())),
                _ => None,
            })
            .collect()
    }
}
