// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page fetching

use crate::config::FetchConfig;
use crate::error::{PagebotError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Build the HTTP client shared by the fetcher and the conformance client
pub fn http_client(config: &FetchConfig) -> Result<Client> {
    Ok(Client::builder().user_agent(config.user_agent.clone()).build()?)
}

/// Retrieves page markup over HTTP
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new(client: Client, config: &FetchConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// GET a page and return its decoded body. Network failures, timeouts
    /// and non-2xx responses all come back as [`PagebotError::Fetch`].
    pub async fn fetch(&self, url: &str) -> Result<String> {
        Url::parse(url).map_err(|e| PagebotError::Fetch(format!("Invalid URL '{}': {}", url, e)))?;

        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.describe(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PagebotError::Fetch(format!("HTTP {} from {}", status, url)));
        }

        let body = response.text().await.map_err(|e| self.describe(e))?;
        debug!("Fetched {} ({}, {} bytes)", url, status, body.len());

        Ok(body)
    }

    fn describe(&self, e: reqwest::Error) -> PagebotError {
        if e.is_timeout() {
            PagebotError::Fetch(format!("Request timed out ({}s)", self.timeout.as_secs()))
        } else {
            PagebotError::Fetch(format!("Client error: {}", e))
        }
    }
}
