use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::config::AuditConfig;
use crate::frontmatter::{FrontMatter, split_front_matter};
use crate::loader::{DocumentKind, SourceFile};
use crate::parse::{Markup, collapse_whitespace, decode_entities};
use crate::preprocess::blank_inline_code;

static ATX_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,3})[ \t]+(.+?)[ \t#]*$").unwrap());
static MD_LINK_OR_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(!?)\[([^\]]*)\]\(\s*<?([^)\s>]*)>?(?:\s+"[^"]*")?\s*\)"#).unwrap());

/// Headings grouped by level, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

impl Headings {
    fn push(&mut self, level: usize, text: String) {
        if text.is_empty() {
            return;
        }
        match level {
            1 => self.h1.push(text),
            2 => self.h2.push(text),
            3 => self.h3.push(text),
            _ => {}
        }
    }
}

/// Link targets split by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

/// Represents all extracted metadata from a document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub headings: Headings,
    pub links: Links,
    pub images_without_alt: usize,
}

impl Markup {
    /// Extract title with priority fallback:
    /// 1. `<title>` element
    /// 2. Meta `title`
    /// 3. Open Graph `og:title`
    /// 4. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(title) = self.title() {
            return Some(title);
        }

        if let Some(title) = self.meta_content("title") {
            return Some(collapse_whitespace(&title));
        }

        if let Some(title) = self.meta_content("og:title") {
            return Some(collapse_whitespace(&title));
        }

        self.extract_headings().h1.into_iter().next()
    }

    /// Extract description with priority fallback:
    /// 1. Meta `description`
    /// 2. Open Graph `og:description`
    pub fn extract_description(&self) -> Option<String> {
        if let Some(desc) = self.meta_content("description") {
            return Some(collapse_whitespace(&desc));
        }

        self.meta_content("og:description").map(|desc| collapse_whitespace(&desc))
    }

    /// `<h1>`, `<h2>` and `<h3>` texts, whitespace-collapsed.
    pub fn extract_headings(&self) -> Headings {
        let mut headings = Headings::default();
        if let Ok(elements) = self.select("h1, h2, h3") {
            for el in elements {
                let level = match el.tag_name().as_str() {
                    "h1" => 1,
                    "h2" => 2,
                    _ => 3,
                };
                headings.push(level, clean_heading(&el.text()));
            }
        }
        headings
    }

    /// `href` values of anchors.
    pub fn extract_hrefs(&self) -> Vec<String> {
        self.select("a[href]")
            .map(|elements| elements.iter().filter_map(|el| el.attr("href")).map(|h| h.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Images whose `alt` is missing or blank.
    pub fn count_images_without_alt(&self) -> usize {
        self.select("img")
            .map(|elements| elements.iter().filter(|el| el.attr("alt").is_none_or(|alt| alt.trim().is_empty())).count())
            .unwrap_or(0)
    }
}

fn clean_heading(text: &str) -> String {
    collapse_whitespace(&decode_entities(text))
}

/// Extracts metadata from a loaded file.
///
/// Title and description come from front matter when the file has it, from
/// top-level fields for records, and from markup otherwise. A title that is
/// still missing falls back to the first H1. When no H1 is found the resolved
/// title stands in for it; records may fall back to their top-level `name`.
///
/// Markdown is read without its front matter and code, with ATX headings
/// turned into heading elements so that all headings keep source order.
pub fn extract_metadata(source: &SourceFile, config: &AuditConfig) -> Metadata {
    let (front_matter, body) = split_front_matter(&source.raw);
    let scan_source = match source.kind {
        DocumentKind::Markdown | DocumentKind::Mdx => Cow::Owned(markdown_markup(body)),
        _ => Cow::Borrowed(source.raw.as_str()),
    };
    let markup = if source.kind.is_record() { None } else { Some(Markup::parse(&scan_source)) };
    let record =
        if source.kind.is_record() { serde_json::from_str::<serde_json::Value>(&source.raw).ok() } else { None };

    let (title, description) = if let Some(block) = front_matter {
        let fm = FrontMatter::parse(block);
        (fm.get("title").map(collapse_whitespace), fm.get("description").map(collapse_whitespace))
    } else if let Some(record) = &record {
        (record_string(record, "title"), record_string(record, "description"))
    } else if let Some(markup) = &markup {
        (markup.extract_title(), markup.extract_description())
    } else {
        (None, None)
    };
    let description = description.filter(|d| !d.is_empty());

    let mut headings = markup.as_ref().map(Markup::extract_headings).unwrap_or_default();
    let title = title.filter(|t| !t.is_empty()).or_else(|| headings.h1.first().cloned());

    if headings.h1.is_empty()
        && let Some(title) = &title
    {
        headings.h1 = vec![title.clone()];
    }
    if headings.h1.is_empty()
        && let Some(name) = record.as_ref().and_then(|r| record_string(r, "name"))
    {
        headings.h1 = vec![name];
    }

    let (links, images_without_alt) = match &markup {
        Some(markup) => scan_links(markup, &scan_source, config.site_host()),
        None => (Links::default(), 0),
    };

    Metadata { title, description, headings, links, images_without_alt }
}

fn record_string(record: &serde_json::Value, key: &str) -> Option<String> {
    record.get(key).and_then(|v| v.as_str()).map(collapse_whitespace).filter(|s| !s.is_empty())
}

/// Markdown body rewritten as markup.
///
/// Fenced blocks become blank lines and inline code is blanked. ATX headings
/// (`#`, `##`, `###`) become `<h1>`-`<h3>` elements in place.
fn markdown_markup(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_fence = false;

    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        } else if !in_fence {
            match ATX_HEADING.captures(line) {
                Some(caps) => {
                    let level = caps[1].len();
                    let text = caps[2].replace('<', "&lt;").replace('>', "&gt;");
                    out.push_str(&format!("<h{level}>{text}</h{level}>"));
                }
                None => out.push_str(&blank_inline_code(line)),
            }
        }
        out.push('\n');
    }

    out
}

/// Scans anchors, images and markdown inline links.
fn scan_links(markup: &Markup, text: &str, site_host: Option<&str>) -> (Links, usize) {
    let mut internal = BTreeSet::new();
    let mut external = BTreeSet::new();
    let mut missing_alt = markup.count_images_without_alt();

    let mut classify = |href: String| {
        if href.is_empty() {
            return;
        }
        if is_external(&href, site_host) {
            external.insert(href);
        } else {
            internal.insert(href);
        }
    };

    for href in markup.extract_hrefs() {
        classify(href);
    }

    for caps in MD_LINK_OR_IMAGE.captures_iter(text) {
        if caps[1].is_empty() {
            classify(caps[3].to_string());
        } else if caps[2].trim().is_empty() {
            missing_alt += 1;
        }
    }

    (Links { internal: internal.into_iter().collect(), external: external.into_iter().collect() }, missing_alt)
}

/// A URL is external when it is absolute with a host other than the site's own.
///
/// Root-relative, fragment and dot-relative URLs are always internal.
pub fn is_external(href: &str, site_host: Option<&str>) -> bool {
    if href.starts_with(['/', '#', '.']) {
        return false;
    }
    match Url::parse(href) {
        Ok(url) => match url.host_str() {
            Some(host) if !host.is_empty() => site_host.is_none_or(|own| !own.eq_ignore_ascii_case(host)),
            _ => false,
        },
        Err(_) => false,
    }
}

/// Metadata checks, in fixed order: title, description, H1, description length, title length.
pub fn metadata_warnings(metadata: &Metadata, config: &AuditConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if metadata.title.is_none() {
        warnings.push("Missing title".to_string());
    }
    if metadata.description.is_none() {
        warnings.push("Missing description".to_string());
    }
    if metadata.headings.h1.is_empty() {
        warnings.push("Missing H1 heading".to_string());
    }
    if let Some(description) = &metadata.description {
        let len = description.chars().count();
        if !config.description_length.contains(&len) {
            warnings.push(format!(
                "Description length {} is outside the recommended {}-{} characters",
                len,
                config.description_length.start(),
                config.description_length.end()
            ));
        }
    }
    if let Some(title) = &metadata.title {
        let len = title.chars().count();
        if !config.title_length.contains(&len) {
            warnings.push(format!(
                "Title length {} is outside the recommended {}-{} characters",
                len,
                config.title_length.start(),
                config.title_length.end()
            ));
        }
    }

    warnings
}
