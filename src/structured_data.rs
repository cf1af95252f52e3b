// SPDX-License-Identifier: PMPL-1.0-or-later
//! JSON-LD structured data extraction.
//!
//! Best-effort enrichment: any failure yields an empty list and is only
//! logged at debug level.

use crate::document::Document;
use crate::error::{PagebotError, Result};
use serde_json::Value;
use tracing::debug;
use url::Url;

const JSON_LD_MIME: &str = "application/ld+json";

/// Extract JSON-LD records from raw markup
pub fn extract(markup: &str, base_url: &str) -> Vec<Value> {
    extract_from(&Document::parse(markup), base_url)
}

/// Extract JSON-LD records from an already parsed document
pub fn extract_from(document: &Document, base_url: &str) -> Vec<Value> {
    match try_extract(document, base_url) {
        Ok(records) => records,
        Err(e) => {
            debug!("JSON-LD extraction failed for {}: {}", base_url, e);
            Vec::new()
        }
    }
}

fn try_extract(document: &Document, base_url: &str) -> Result<Vec<Value>> {
    Url::parse(base_url)?;

    let mut records = Vec::new();
    for script in document.select("script[type]") {
        let is_json_ld = script
            .value()
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_MIME));
        if !is_json_ld {
            continue;
        }

        let body: String = script.text().collect();
        if body.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(&body)? {
            Value::Array(items) => records.extend(items),
            Value::Object(map) => records.push(Value::Object(map)),
            other => {
                return Err(PagebotError::Extraction(format!(
                    "JSON-LD block is not an object or array: {}",
                    other
                )))
            }
        }
    }

    Ok(records)
}

/// The `@type` of a record, joined when it lists several types
pub fn record_type(record: &Value) -> String {
    match record.get("@type") {
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.org/";

    #[test]
    fn test_single_object() {
        let html = r#"
            <head>
            <script type="application/ld+json">
                {"@context": "https://schema.org", "@type": "Organization", "name": "EHRI"}
            </script>
            </head>
        "#;
        let records = extract(html, BASE);
        assert_eq!(records.len(), 1);
        assert_eq!(record_type(&records[0]), "Organization");
        assert_eq!(records[0]["name"], "EHRI");
    }

    #[test]
    fn test_array_and_multiple_blocks() {
        let html = r#"
            <script type="application/ld+json">[{"@type": "WebSite"}, {"@type": "BreadcrumbList"}]</script>
            <script type="Application/LD+JSON ">{"@type": ["Article", "BlogPosting"]}</script>
            <script type="text/javascript">var x = 1;</script>
        "#;
        let records = extract(html, BASE);
        assert_eq!(records.len(), 3);
        assert_eq!(record_type(&records[2]), "Article, BlogPosting");
    }

    #[test]
    fn test_no_structured_data() {
        assert!(extract("<html><body><p>plain</p></body></html>", BASE).is_empty());
    }

    #[test]
    fn test_invalid_json_yields_empty() {
        let html = r#"
            <script type="application/ld+json">{"@type": "WebSite"}</script>
            <script type="application/ld+json">{ not json </script>
        "#;
        assert!(extract(html, BASE).is_empty());
    }

    #[test]
    fn test_invalid_base_url_yields_empty() {
        let html = r#"<script type="application/ld+json">{"@type": "WebSite"}</script>"#;
        assert!(extract(html, "not a url").is_empty());
    }

    #[test]
    fn test_record_without_type() {
        assert_eq!(record_type(&serde_json::json!({"name": "x"})), "Unknown");
    }
}
