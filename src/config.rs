// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for pagebot

use crate::error::{PagebotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sites checked when no URLs are given
pub const DEFAULT_URLS: &[&str] = &[
    "https://blog.ehri-project.eu",
    "https://training.ehri-project.eu",
    "https://diplomatic-reports.ehri-project.eu",
    "https://early-testimony.ehri-project.eu",
    "https://the-sunflower.ehri-project.eu",
    "https://documentation-campaign.ehri-project.eu",
    "https://nisko-transports.ehri-project.eu",
    "https://ehri-nl.org",
    "https://ehri-kg.ehri-project.eu",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pages to validate
    pub urls: Vec<String>,
    /// Maximum number of URLs validated at the same time
    pub concurrency: usize,
    pub fetch: FetchConfig,
    pub conformance: ConformanceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    /// Skip the external validator entirely when false
    pub enabled: bool,
    /// Nu HTML Checker endpoint returning JSON
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Pause before each request, for the service's rate limits
    pub delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: DEFAULT_URLS.iter().map(|u| u.to_string()).collect(),
            concurrency: 4,
            fetch: FetchConfig::default(),
            conformance: ConformanceConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: format!("pagebot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://validator.w3.org/nu/?out=json".to_string(),
            timeout_secs: 30,
            delay_ms: 500,
        }
    }
}

impl Config {
    /// Reject values the orchestrator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(PagebotError::Config("concurrency must be at least 1".to_string()));
        }
        if self.fetch.timeout_secs == 0 || self.conformance.timeout_secs == 0 {
            return Err(PagebotError::Config("timeouts must be at least 1 second".to_string()));
        }
        url::Url::parse(&self.conformance.endpoint).map_err(|e| {
            PagebotError::Config(format!(
                "invalid conformance endpoint '{}': {}",
                self.conformance.endpoint, e
            ))
        })?;
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pagebot")
        .join("config.toml")
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("toml")
}

/// Load configuration; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if is_toml(path) {
        toml::from_str(&content)
            .map_err(|e| PagebotError::Config(format!("TOML parse error: {}", e)))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| PagebotError::Config(format!("YAML parse error: {}", e)))?
    };

    config.validate()?;
    Ok(config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if is_toml(path) {
        toml::to_string_pretty(&config)
            .map_err(|e| PagebotError::Config(format!("TOML serialize error: {}", e)))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.urls.len(), DEFAULT_URLS.len());
        assert_eq!(config.fetch.timeout_secs, 15);
        assert_eq!(config.conformance.timeout_secs, 30);
        assert_eq!(config.conformance.delay_ms, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "urls = [\"https://example.org\"]\n\n[conformance]\nenabled = false\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.urls, vec!["https://example.org"]);
        assert!(!config.conformance.enabled);
        assert_eq!(config.conformance.timeout_secs, 30);
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "concurrency = 0\n").unwrap();
        assert!(matches!(load_config(&path), Err(PagebotError::Config(_))));

        std::fs::write(&path, "[conformance]\nendpoint = \"not a url\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(PagebotError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "urls = [").unwrap();
        assert!(matches!(load_config(&path), Err(PagebotError::Config(_))));
    }
}
