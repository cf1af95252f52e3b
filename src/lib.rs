// SPDX-License-Identifier: PMPL-1.0-or-later
//! Pagebot - static validation of public web pages
//!
//! Fetches a set of pages and checks each one for document metadata, HTML
//! conformance (via an external Nu HTML Checker) and a fixed set of WCAG
//! accessibility rules. URLs are validated concurrently and independently;
//! one broken page or unavailable service never hides the other results.
//!
//! ## Checks
//!
//! - **Metadata**: `<html lang>`, required meta tags, Open Graph completeness
//! - **Structured data**: embedded JSON-LD records
//! - **Conformance** (optional): markup validity as judged by the checker
//! - **Accessibility**: language, alt text, labels, accessible names,
//!   heading structure and table headers

pub mod analyzers;
pub mod config;
pub mod conformance;
pub mod document;
pub mod error;
pub mod fetch;
pub mod finding;
pub mod metadata;
pub mod orchestrator;
pub mod report;
pub mod store;
pub mod structured_data;

pub use analyzers::check_accessibility;
pub use config::Config;
pub use error::{PagebotError, Result};
pub use finding::{Finding, FindingKind, RuleResult, RuleStatus, Severity};
pub use orchestrator::{Orchestrator, OverallStatus, UrlReport};
pub use store::ResultStore;
