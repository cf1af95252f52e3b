// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for pagebot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PagebotError>;

#[derive(Error, Debug)]
pub enum PagebotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Page could not be retrieved; terminal for that URL only
    #[error("{0}")]
    Fetch(String),

    /// Conformance service could not produce a verdict
    #[error("{0}")]
    Conformance(String),

    /// Structured data could not be read; never leaves the extractor
    #[error("Extraction error: {0}")]
    Extraction(String),
}
