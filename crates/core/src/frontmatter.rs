//! Minimal front-matter support.
//!
//! Only flat `key: value` scalar lines are understood. Nested maps, lists and
//! multi-line values are skipped rather than interpreted.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A\u{feff}?\s*---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)").unwrap());

/// Flat scalar fields of a front-matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: HashMap<String, String>,
}

impl FrontMatter {
    /// Parses the lines of a front-matter block (without the fences).
    pub fn parse(block: &str) -> Self {
        let mut fields = HashMap::new();

        for line in block.lines() {
            if line.starts_with([' ', '\t', '-', '#']) {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = unquote(value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            fields.insert(key.to_string(), value.to_string());
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Splits a leading front-matter block from the rest of the document.
///
/// Returns the block contents (without fences) and the remaining body.
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    match FENCE.captures(source) {
        Some(caps) => {
            let block = caps.get(1).map(|m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (block, &source[end..])
        }
        None => (None, source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let source = "---\ntitle: Hello\n---\n# Body\n";
        let (block, body) = split_front_matter(source);
        assert_eq!(block, Some("title: Hello"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        let source = "# Just a heading\n---\nnot front matter\n";
        let (block, body) = split_front_matter(source);
        assert!(block.is_none());
        assert_eq!(body, source);
    }

    #[test]
    fn test_parse_unquotes_values() {
        let fm = FrontMatter::parse("title: \"Quoted: Title\"\ndescription: 'single'\ndate: 2024-01-01");
        assert_eq!(fm.get("title"), Some("Quoted: Title"));
        assert_eq!(fm.get("description"), Some("single"));
        assert_eq!(fm.get("date"), Some("2024-01-01"));
    }

    #[test]
    fn test_parse_skips_nested_structures() {
        let fm = FrontMatter::parse("author:\n  name: Someone\ntags:\n  - rust\n- loose\ntitle: Top");
        assert_eq!(fm.get("author"), None);
        assert_eq!(fm.get("name"), None);
        assert_eq!(fm.get("title"), Some("Top"));
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let fm = FrontMatter::parse("no colon here\n: empty key\n");
        assert!(fm.is_empty());
    }
}
