// SPDX-License-Identifier: PMPL-1.0-or-later
//! Table headers - WCAG 1.3.1 Info and Relationships (technique H51)

use crate::analyzers::Rule;
use crate::document::{snippet, Document};
use crate::finding::{Finding, FindingKind};
use scraper::Selector;

const WCAG_REF: &str = "1.3.1 H51";

/// Every `<table>` contains at least one `<th>`
pub struct TableHeadersRule;

impl Rule for TableHeadersRule {
    fn name(&self) -> &str {
        "Table Headers"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let Ok(th) = Selector::parse("th") else {
            return Vec::new();
        };

        document
            .select("table")
            .iter()
            .filter(|table| table.select(&th).next().is_none())
            .map(|table| {
                Finding::warning(
                    WCAG_REF,
                    FindingKind::TableMissingHeaders,
                    "Data table has no header cells (th)",
                )
                .with_element(snippet(table))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> Vec<Finding> {
        TableHeadersRule.check(&Document::parse(html))
    }

    #[test]
    fn test_table_with_headers() {
        let html = r#"
            <table>
                <thead><tr><th>Name</th><th>Age</th></tr></thead>
                <tbody><tr><td>Anna</td><td>30</td></tr></tbody>
            </table>
        "#;
        assert!(check(html).is_empty());
    }

    #[test]
    fn test_table_without_headers() {
        let findings = check("<table><tr><td>No headers</td></tr></table>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::TableMissingHeaders);
        assert_eq!(findings[0].wcag, "1.3.1 H51");
    }

    #[test]
    fn test_multiple_tables_mixed() {
        let html = r#"
            <table><tr><th>H</th></tr><tr><td>1</td></tr></table>
            <table><tr><td>a</td></tr></table>
            <table><tr><td>b</td></tr></table>
        "#;
        assert_eq!(check(html).len(), 2);
    }

    #[test]
    fn test_header_row_without_thead() {
        assert!(check("<table><tr><th scope=\"col\">Year</th></tr></table>").is_empty());
    }
}
