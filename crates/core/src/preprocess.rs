//! Body stripping: turns a raw source file into analysable prose.
//!
//! Metadata extraction reads the markup of a source. The functions here
//! produce the second, body-only view: front matter removed, code and
//! markup blanked out, record files flattened to their string values.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::split_front_matter;
use crate::loader::DocumentKind;
use crate::parse::Markup;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?ms)^[ \t]*(```|~~~).*?^[ \t]*(```|~~~)[ \t]*$").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`\n]*`").unwrap());
static HTML_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").unwrap());
static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^{}]*\}").unwrap());
static MODULE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(import|export)\s.*$").unwrap());
static MD_IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
static MD_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

/// Nested `{ ... }` blocks are peeled from the inside out at most this many times.
const MAX_EXPRESSION_DEPTH: usize = 16;

/// Produces the body text of a document of the given kind.
///
/// Never fails: malformed records yield an empty string.
pub fn strip_body(kind: DocumentKind, source: &str) -> String {
    match kind {
        DocumentKind::Json => record_text(source),
        DocumentKind::Html => html_text(source),
        DocumentKind::Markdown => markdown_text(source, false),
        DocumentKind::Mdx => markdown_text(source, true),
    }
}

/// Collects every string leaf of a JSON record, newline-joined.
pub fn record_text(source: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(source) {
        Ok(value) => {
            let mut leaves = Vec::new();
            collect_strings(&value, &mut leaves);
            leaves.join("\n")
        }
        Err(e) => {
            tracing::debug!(error = %e, "record is not valid JSON, treating body as empty");
            String::new()
        }
    }
}

fn collect_strings<'a>(value: &'a serde_json::Value, out: &mut Vec<&'a str>) {
    match value {
        serde_json::Value::String(s) => out.push(s),
        serde_json::Value::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        serde_json::Value::Object(map) => map.values().for_each(|item| collect_strings(item, out)),
        _ => {}
    }
}

/// Replaces inline code spans with a space.
pub fn blank_inline_code(text: &str) -> Cow<'_, str> {
    INLINE_CODE.replace_all(text, " ")
}

/// Markdown and MDX prose with code, markup and expressions blanked.
fn markdown_text(source: &str, mdx: bool) -> String {
    let (_, body) = split_front_matter(source);

    let mut text = CODE_FENCE.replace_all(body, " ").into_owned();
    text = blank_inline_code(&text).into_owned();
    text = HTML_COMMENT.replace_all(&text, " ").into_owned();
    if mdx {
        text = MODULE_LINE.replace_all(&text, " ").into_owned();
        text = strip_expressions(&text);
    }
    text = MD_IMAGE.replace_all(&text, " ").into_owned();
    text = MD_LINK.replace_all(&text, "$1").into_owned();
    TAG.replace_all(&text, " ").into_owned()
}

fn strip_expressions(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_EXPRESSION_DEPTH {
        let next = EXPRESSION.replace_all(&current, " ").into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Visible body text of an HTML page.
fn html_text(source: &str) -> String {
    let cleaned = remove_non_prose(source);
    let markup = Markup::parse(&cleaned);
    markup.body_text()
}

/// Removes script, style, noscript and template elements.
pub fn remove_non_prose(html: &str) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("noscript", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("template", |el| {
                    el.remove();
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() {
        return html.to_string();
    }

    output
}
