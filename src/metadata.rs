// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page metadata checks: document language, required meta tags and
//! Open Graph completeness.
//!
//! Every check is an independent presence/content lookup reported as
//! PASS/FAIL; none of them looks at another's outcome.

use crate::document::{attr, has_value, Document};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `<meta name>` values that must be present with content
pub const REQUIRED_META_NAMES: &[&str] = &["description", "viewport"];

/// Open Graph properties a page must declare
pub const REQUIRED_OG_PROPERTIES: &[&str] = &["og:title", "og:type", "og:image", "og:url"];

/// Outcome of a single metadata check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    fn from_bool(passed: bool) -> Self {
        if passed {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// `<html lang>` check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangCheck {
    pub status: CheckStatus,
    pub value: Option<String>,
    pub message: String,
}

/// One required meta tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTagCheck {
    /// Display name, e.g. `meta name='viewport'`
    pub tag: String,
    pub status: CheckStatus,
    pub content: Option<String>,
    pub message: String,
}

/// Open Graph completeness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraphCheck {
    pub status: CheckStatus,
    /// Every `og:*` property found, with its `content`
    pub found: BTreeMap<String, Option<String>>,
    /// Required properties that were not found
    pub missing: Vec<String>,
    pub message: String,
}

impl OpenGraphCheck {
    /// Content of a found property, if it has any
    pub fn get(&self, property: &str) -> Option<&str> {
        self.found.get(property).and_then(|c| c.as_deref())
    }
}

/// All metadata results for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataReport {
    pub url: String,
    pub html_lang: LangCheck,
    pub meta_tags: Vec<MetaTagCheck>,
    pub open_graph: OpenGraphCheck,
    /// JSON-LD records embedded in the page
    pub json_ld: Vec<serde_json::Value>,
}

impl MetadataReport {
    /// Run every metadata check. `json_ld` is supplied by the caller.
    pub fn collect(url: &str, document: &Document, json_ld: Vec<serde_json::Value>) -> Self {
        Self {
            url: url.to_string(),
            html_lang: validate_html_lang(document),
            meta_tags: validate_meta_tags(document),
            open_graph: validate_opengraph(document),
            json_ld,
        }
    }

    /// Whether any metadata check failed
    pub fn has_failures(&self) -> bool {
        self.html_lang.status == CheckStatus::Fail
            || self.meta_tags.iter().any(|t| t.status == CheckStatus::Fail)
            || self.open_graph.status == CheckStatus::Fail
    }
}

/// Check that `<html>` declares a non-empty language
pub fn validate_html_lang(document: &Document) -> LangCheck {
    let lang = document
        .root()
        .filter(|root| has_value(root, "lang"))
        .and_then(|root| attr(&root, "lang"))
        .map(str::to_string);

    let message = match &lang {
        Some(l) => format!("HTML lang attribute is '{}'", l),
        None => "HTML lang attribute is missing".to_string(),
    };

    LangCheck {
        status: CheckStatus::from_bool(lang.is_some()),
        value: lang,
        message,
    }
}

/// Check the required `<meta name>` tags and the charset declaration
pub fn validate_meta_tags(document: &Document) -> Vec<MetaTagCheck> {
    let named = document.select("meta[name]");
    let mut results = Vec::with_capacity(REQUIRED_META_NAMES.len() + 1);

    for name in REQUIRED_META_NAMES {
        let content = named
            .iter()
            .find(|meta| attr(meta, "name").is_some_and(|n| n.eq_ignore_ascii_case(name)))
            .and_then(|meta| attr(meta, "content"))
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        results.push(presence_check(format!("meta name='{}'", name), content));
    }

    let charset = document
        .find("meta[charset]")
        .and_then(|meta| attr(&meta, "charset"))
        .map(str::to_string);
    results.push(presence_check("meta charset".to_string(), charset));

    results
}

fn presence_check(tag: String, content: Option<String>) -> MetaTagCheck {
    let found = content.is_some();
    MetaTagCheck {
        tag,
        status: CheckStatus::from_bool(found),
        content,
        message: if found { "Found" } else { "Missing" }.to_string(),
    }
}

/// Collect `og:*` properties and report the required ones that are absent
pub fn validate_opengraph(document: &Document) -> OpenGraphCheck {
    let found: BTreeMap<String, Option<String>> = document
        .select("meta[property]")
        .iter()
        .filter_map(|meta| {
            let property = attr(meta, "property")?;
            property
                .starts_with("og:")
                .then(|| (property.to_string(), attr(meta, "content").map(str::to_string)))
        })
        .collect();

    let missing: Vec<String> = REQUIRED_OG_PROPERTIES
        .iter()
        .filter(|p| !found.contains_key(**p))
        .map(|p| p.to_string())
        .collect();

    let message = if missing.is_empty() {
        "All required Open Graph tags found".to_string()
    } else {
        format!("Missing properties: {}", missing.join(", "))
    };

    OpenGraphCheck {
        status: CheckStatus::from_bool(missing.is_empty()),
        found,
        missing,
        message,
    }
}
