//! Document discovery and loading.
//!
//! Discovery walks a root directory and returns the sorted list of files whose
//! extension is on the allow-list. Loading a file yields two views: the raw
//! source (for metadata) and the stripped body (for lexical analysis).

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::AuditConfig;
use crate::preprocess::strip_body;
use crate::{Result, SitelexError};

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Markdown with optional front matter.
    Markdown,
    /// Markdown with embedded components and expressions.
    Mdx,
    Html,
    /// A data record.
    Json,
}

impl DocumentKind {
    /// Detects the kind from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "mdx" => Some(Self::Mdx),
            "html" | "htm" => Some(Self::Html),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn is_record(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// A loaded file: raw source plus body-stripped text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: DocumentKind,
    /// Original file contents.
    pub raw: String,
    /// Body text with front matter, code and markup removed.
    pub body: String,
}

/// Lists eligible files under `root`, sorted by path.
///
/// A missing root, or one that is not a directory, yields an empty list.
/// Unreadable subdirectories are skipped.
pub fn discover(root: &Path, config: &AuditConfig) -> Vec<PathBuf> {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "root is not a directory, nothing to analyse");
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_allowed_extension(path, config))
        .collect();

    files.sort();
    files
}

fn has_allowed_extension(path: &Path, config: &AuditConfig) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    config.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)) && DocumentKind::from_path(path).is_some()
}

/// Reads a file and produces both text views.
pub fn load(path: &Path) -> Result<SourceFile> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| SitelexError::UnsupportedFormat(path.to_path_buf()))?;

    if !path.exists() {
        return Err(SitelexError::FileNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    let raw = String::from_utf8(bytes).map_err(|_| SitelexError::InvalidEncoding(path.to_path_buf()))?;
    let body = strip_body(kind, &raw);

    Ok(SourceFile { path: path.to_path_buf(), kind, raw, body })
}

/// Derives the logical route of a file relative to `root`.
///
/// Files under the pages directory map to URL paths: `pages/index.md` is `/`,
/// `pages/blog/post.mdx` is `/blog/post`. Anything else maps to a dotted
/// content path such as `content.blog.post`.
pub fn route_hint(path: &Path, root: &Path, pages_dir: &str) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = parts.last_mut() {
        *last = strip_extension(last);
    }

    let parents = parts.len().saturating_sub(1);
    match parts[..parents].iter().position(|part| part == pages_dir) {
        Some(pos) => {
            let mut segments: Vec<String> = parts.split_off(pos + 1);
            if segments.last().is_some_and(|name| name == "index") {
                segments.pop();
            }
            format!("/{}", segments.join("/"))
        }
        None => parts.join("."),
    }
}

fn strip_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

/// Whether a record sits in one of the data-only directories.
pub fn is_data_record(path: &Path, root: &Path, kind: DocumentKind, data_dirs: &[String]) -> bool {
    if !kind.is_record() {
        return false;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parent = relative.parent().unwrap_or(Path::new(""));
    parent.components().any(|c| match c {
        Component::Normal(part) => data_dirs.iter().any(|dir| part.to_str() == Some(dir.as_str())),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_route_hint_pages_index() {
        let root = Path::new("/site/src");
        assert_eq!(route_hint(Path::new("/site/src/pages/index.mdx"), root, "pages"), "/");
        assert_eq!(route_hint(Path::new("/site/src/pages/blog/index.md"), root, "pages"), "/blog");
    }

    #[test]
    fn test_route_hint_nested_page() {
        let root = Path::new("/site/src");
        assert_eq!(route_hint(Path::new("/site/src/pages/blog/first-post.mdx"), root, "pages"), "/blog/first-post");
    }

    #[test]
    fn test_route_hint_content_path() {
        let root = Path::new("/site/src");
        assert_eq!(route_hint(Path::new("/site/src/content/notes/rust.md"), root, "pages"), "content.notes.rust");
    }

    #[test]
    fn test_route_hint_file_named_like_pages_dir() {
        let root = Path::new("/site");
        assert_eq!(route_hint(Path::new("/site/blog/pages.md"), root, "pages"), "blog.pages");
        assert_eq!(route_hint(Path::new("/site/pages/pages.md"), root, "pages"), "/pages");
    }

    #[test]
    fn test_document_kind() {
        assert_eq!(DocumentKind::from_path(Path::new("a/b.MDX")), Some(DocumentKind::Mdx));
        assert_eq!(DocumentKind::from_path(Path::new("a/b.htm")), Some(DocumentKind::Html));
        assert_eq!(DocumentKind::from_path(Path::new("a/b.rs")), None);
        assert_eq!(DocumentKind::from_path(Path::new("a/README")), None);
    }

    #[test]
    fn test_is_data_record() {
        let root = Path::new("/site");
        let dirs = vec!["data".to_string(), "authors".to_string()];
        assert!(is_data_record(Path::new("/site/data/team.json"), root, DocumentKind::Json, &dirs));
        assert!(is_data_record(Path::new("/site/content/authors/ada.json"), root, DocumentKind::Json, &dirs));
        assert!(!is_data_record(Path::new("/site/data/team.md"), root, DocumentKind::Markdown, &dirs));
        assert!(!is_data_record(Path::new("/site/pages/data.json"), root, DocumentKind::Json, &dirs));
    }

    #[test]
    fn test_discover_missing_root() {
        let config = AuditConfig::default();
        assert!(discover(Path::new("/definitely/not/here"), &config).is_empty());
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("pages/blog")).unwrap();
        fs::write(tmp.path().join("pages/blog/b.md"), "# B").unwrap();
        fs::write(tmp.path().join("pages/a.mdx"), "# A").unwrap();
        fs::write(tmp.path().join("pages/logo.png"), "png").unwrap();
        fs::write(tmp.path().join("notes.txt"), "txt").unwrap();

        let files = discover(tmp.path(), &AuditConfig::default());
        let names: Vec<String> =
            files.iter().map(|p| p.strip_prefix(tmp.path()).unwrap().display().to_string()).collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("a.mdx"));
        assert!(names[1].ends_with("b.md"));
    }

    #[test]
    fn test_discover_root_is_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("single.md");
        fs::write(&file, "# Single").unwrap();
        assert!(discover(&file, &AuditConfig::default()).is_empty());
    }

    #[test]
    fn test_load_produces_both_views() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("post.md");
        fs::write(&file, "---\ntitle: Post\n---\nBody words").unwrap();

        let source = load(&file).unwrap();
        assert_eq!(source.kind, DocumentKind::Markdown);
        assert!(source.raw.contains("title: Post"));
        assert!(!source.body.contains("title: Post"));
        assert!(source.body.contains("Body words"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load(Path::new("/nonexistent/post.md"));
        assert!(matches!(result, Err(SitelexError::FileNotFound(_))));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bad.md");
        fs::write(&file, [0xff, 0xfe, 0x00, 0x41]).unwrap();
        assert!(matches!(load(&file), Err(SitelexError::InvalidEncoding(_))));
    }
}
