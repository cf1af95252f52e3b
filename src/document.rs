// SPDX-License-Identifier: PMPL-1.0-or-later
//! Parsed page markup and the element queries the checks rely on.
//!
//! Wraps a `scraper` tree. Tag names are lowercase and attribute values are
//! exposed exactly as written: absent and empty-string attributes stay
//! distinct. The parser keeps each attribute as a single string, so values
//! that other parsers split into lists (`class`, `rel`) arrive already joined
//! by the markup's own whitespace.

use scraper::{ElementRef, Html, Node, Selector};

/// Maximum length of an element snippet attached to a finding
pub const SNIPPET_LIMIT: usize = 80;

/// A parsed HTML document
pub struct Document {
    html: Html,
    has_root: bool,
}

impl Document {
    /// Parse markup permissively. Never fails.
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        let has_root = !is_synthesized_only(&html);
        Self { html, has_root }
    }

    /// The document element, or `None` when the markup has none
    pub fn root(&self) -> Option<ElementRef<'_>> {
        if self.has_root {
            Some(self.html.root_element())
        } else {
            None
        }
    }

    /// All elements matching a CSS selector, in document order
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// First element matching a CSS selector
    pub fn find(&self, css: &str) -> Option<ElementRef<'_>> {
        self.select(css).into_iter().next()
    }
}

/// html5ever builds `<html><head></head><body></body></html>` for any input,
/// including "", a lone doctype or a comment. A tree that is nothing but that
/// empty, attribute-less skeleton had no root element in the markup.
fn is_synthesized_only(html: &Html) -> bool {
    let root = html.root_element();
    if root.value().attrs().next().is_some() {
        return false;
    }

    root.descendants().skip(1).all(|node| match node.value() {
        Node::Element(element) => {
            matches!(element.name(), "head" | "body") && element.attrs().next().is_none()
        }
        Node::Text(text) => text
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
            .is_empty(),
        _ => true,
    })
}

/// Raw attribute value, `None` when the attribute is absent
pub fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Attribute present with a non-empty value
pub fn has_value(element: &ElementRef<'_>, name: &str) -> bool {
    attr(element, name).is_some_and(|v| !v.is_empty())
}

/// Concatenated descendant text with surrounding whitespace stripped
pub fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Whether any descendant `<img>` carries a non-empty `alt`
pub fn has_named_image(element: &ElementRef<'_>) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "img")
        .any(|img| has_value(&img, "alt"))
}

/// Outer HTML cut to [`SNIPPET_LIMIT`] characters, for diagnostics only
pub fn snippet(element: &ElementRef<'_>) -> String {
    element.html().chars().take(SNIPPET_LIMIT).collect()
}
