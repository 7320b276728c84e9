//! HTML parsing and DOM queries.
//!
//! This module provides the [`Markup`] and [`Element`] types used to read
//! markup-embedded metadata (title, meta fields, headings, links, images).
//! Any text can be parsed: markdown with embedded tags simply yields a tree
//! whose text nodes hold the markdown.
//!
//! # Example
//!
//! ```rust
//! use sitelex_core::parse::Markup;
//!
//! let markup = Markup::parse("<html><head><title>Test</title></head><body><h1>Hi</h1></body></html>");
//! assert_eq!(markup.title(), Some("Test".to_string()));
//! assert_eq!(markup.select("h1").unwrap().len(), 1);
//! ```

use scraper::{Html, Selector};

use crate::{Result, SitelexError};

/// A parsed HTML (or HTML-bearing) document.
pub struct Markup {
    html: Html,
}

impl Markup {
    /// Parses a document. Parsing is lenient and never fails.
    pub fn parse(source: &str) -> Self {
        Self { html: Html::parse_document(source) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SitelexError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| SitelexError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Text of the `<title>` element, whitespace-collapsed.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|title| !title.is_empty())
    }

    /// Content attribute of a `<meta>` tag matched by `name` or `property`.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        for attr in ["name", "property"] {
            let selector = format!("meta[{}=\"{}\"]", attr, key);
            if let Ok(elements) = self.select(&selector)
                && let Some(content) = elements.iter().find_map(|el| el.attr("content"))
            {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }
        None
    }

    /// Text of the `<body>`, or of the whole tree when there is no body.
    pub fn body_text(&self) -> String {
        if let Ok(bodies) = self.select("body")
            && let Some(body) = bodies.first()
        {
            return body.text_with_breaks();
        }
        self.html.root_element().text().collect::<Vec<_>>().join(" ")
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Descendant text nodes joined with spaces so adjacent blocks stay separate words.
    pub fn text_with_breaks(&self) -> String {
        self.element.text().collect::<Vec<_>>().join(" ")
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }
}

/// Collapses runs of whitespace into single spaces and trims.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the common HTML entities left in text extracted by pattern matching.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>  Test
                Page </title>
            <meta name="description" content="A page">
            <meta property="og:title" content="OG">
        </head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph 1</p><p class="content">Paragraph 2</p>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_title_is_collapsed() {
        let markup = Markup::parse(SAMPLE_HTML);
        assert_eq!(markup.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_meta_content_by_name_and_property() {
        let markup = Markup::parse(SAMPLE_HTML);
        assert_eq!(markup.meta_content("description"), Some("A page".to_string()));
        assert_eq!(markup.meta_content("og:title"), Some("OG".to_string()));
        assert_eq!(markup.meta_content("twitter:title"), None);
    }

    #[test]
    fn test_select_elements() {
        let markup = Markup::parse(SAMPLE_HTML);
        let elements = markup.select("p.content").unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[0].tag_name(), "p");
    }

    #[test]
    fn test_invalid_selector() {
        let markup = Markup::parse(SAMPLE_HTML);
        assert!(matches!(markup.select("[[invalid"), Err(SitelexError::HtmlParseError(_))));
    }

    #[test]
    fn test_body_text_separates_blocks() {
        let markup = Markup::parse(SAMPLE_HTML);
        let text = markup.body_text();
        assert!(text.contains("Paragraph 1 Paragraph 2"));
        assert!(!text.contains("Test"));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Fish &amp; Chips &lt;3 &quot;hi&quot; it&#39;s"), "Fish & Chips <3 \"hi\" it's");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }
}
