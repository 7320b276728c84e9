//! Corpus aggregation.
//!
//! The summary is derived data: it is always recomputed from the current set
//! of documents and the n-gram rankings of the TF-IDF pass.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::document::Document;
use crate::lexical::vocabulary;
use crate::tfidf::RankedTerm;

/// Ranked terms for each n-gram order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NgramRankings {
    pub unigrams: Vec<RankedTerm>,
    pub bigrams: Vec<RankedTerm>,
    pub trigrams: Vec<RankedTerm>,
}

/// Corpus-wide statistics and metadata checks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusSummary {
    pub document_count: usize,
    /// Distinct normalised body tokens across all documents.
    pub vocabulary_size: usize,
    pub total_words: usize,
    pub average_reading_ease: f64,
    pub average_grade_level: f64,
    pub internal_link_count: usize,
    pub external_link_count: usize,
    pub images_without_alt: usize,

    pub top_terms: NgramRankings,

    pub missing_titles: Vec<PathBuf>,
    pub missing_descriptions: Vec<PathBuf>,
    pub missing_h1: Vec<PathBuf>,
    /// Titles shared by two or more distinct files.
    pub duplicate_titles: BTreeMap<String, BTreeSet<PathBuf>>,
}

/// Merges per-document results into a corpus summary.
///
/// Records from data-only directories are left out of the three missing
/// metadata lists: they describe entities rather than standalone pages.
pub fn summarize(documents: &[Document], top_terms: NgramRankings) -> CorpusSummary {
    let mut vocab: HashSet<String> = HashSet::new();
    let mut missing_titles = Vec::new();
    let mut missing_descriptions = Vec::new();
    let mut missing_h1 = Vec::new();
    let mut titles: BTreeMap<String, BTreeSet<PathBuf>> = BTreeMap::new();

    for doc in documents {
        vocab.extend(vocabulary(&doc.tokens));

        if let Some(title) = &doc.title {
            titles.entry(title.clone()).or_default().insert(doc.path.clone());
        }

        if doc.data_record {
            continue;
        }
        if doc.title.is_none() {
            missing_titles.push(doc.path.clone());
        }
        if doc.description.is_none() {
            missing_descriptions.push(doc.path.clone());
        }
        if doc.headings.h1.is_empty() {
            missing_h1.push(doc.path.clone());
        }
    }

    titles.retain(|_, paths| paths.len() >= 2);

    let count = documents.len();
    let average = |f: fn(&Document) -> f64| {
        if count == 0 { 0.0 } else { documents.iter().map(f).sum::<f64>() / count as f64 }
    };

    CorpusSummary {
        document_count: count,
        vocabulary_size: vocab.len(),
        total_words: documents.iter().map(|d| d.word_count).sum(),
        average_reading_ease: average(|d| d.flesch_reading_ease),
        average_grade_level: average(|d| d.flesch_kincaid_grade),
        internal_link_count: documents.iter().map(|d| d.internal_links.len()).sum(),
        external_link_count: documents.iter().map(|d| d.external_links.len()).sum(),
        images_without_alt: documents.iter().map(|d| d.images_without_alt).sum(),
        top_terms,
        missing_titles,
        missing_descriptions,
        missing_h1,
        duplicate_titles: titles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::loader::{DocumentKind, SourceFile};
    use crate::preprocess::strip_body;
    use std::path::Path;

    fn doc(path: &str, raw: &str) -> Document {
        let path = PathBuf::from(path);
        let kind = DocumentKind::from_path(&path).unwrap();
        let source = SourceFile { path, kind, raw: raw.to_string(), body: strip_body(kind, raw) };
        Document::analyze(&source, Path::new("/site"), &AuditConfig::default())
    }

    #[test]
    fn test_duplicate_titles() {
        let docs = vec![
            doc("/site/pages/a.md", "---\ntitle: Shared Title Here\n---\nBody a"),
            doc("/site/pages/b.md", "---\ntitle: Shared Title Here\n---\nBody b"),
            doc("/site/pages/c.md", "---\ntitle: Unique Title Here\n---\nBody c"),
        ];
        let summary = summarize(&docs, NgramRankings::default());

        assert_eq!(summary.duplicate_titles.len(), 1);
        let paths = &summary.duplicate_titles["Shared Title Here"];
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&PathBuf::from("/site/pages/a.md")));
        assert!(paths.contains(&PathBuf::from("/site/pages/b.md")));
    }

    #[test]
    fn test_missing_metadata_lists() {
        let docs = vec![
            doc("/site/pages/bare.md", "words only"),
            doc("/site/pages/titled.md", "---\ntitle: Has A Title Only\n---\nwords"),
        ];
        let summary = summarize(&docs, NgramRankings::default());

        assert_eq!(summary.missing_titles, vec![PathBuf::from("/site/pages/bare.md")]);
        assert_eq!(summary.missing_descriptions.len(), 2);
        assert_eq!(summary.missing_h1, vec![PathBuf::from("/site/pages/bare.md")]);
    }

    #[test]
    fn test_data_records_are_not_flagged() {
        let record = doc("/site/data/team.json", r#"{"members": ["Ada"]}"#);
        assert_eq!(record.warnings.len(), 3);

        let summary = summarize(&[record], NgramRankings::default());
        assert!(summary.missing_titles.is_empty());
        assert!(summary.missing_descriptions.is_empty());
        assert!(summary.missing_h1.is_empty());
    }

    #[test]
    fn test_records_outside_data_dirs_are_flagged() {
        let record = doc("/site/content/team.json", r#"{"members": ["Ada"]}"#);
        let summary = summarize(&[record], NgramRankings::default());
        assert_eq!(summary.missing_titles.len(), 1);
    }

    #[test]
    fn test_vocabulary_counts_distinct_normalized_tokens() {
        let docs = vec![doc("/site/pages/a.md", "pages cache"), doc("/site/pages/b.md", "page caches compiler")];
        let summary = summarize(&docs, NgramRankings::default());
        assert_eq!(summary.vocabulary_size, 3);
        assert_eq!(summary.total_words, 5);
    }

    #[test]
    fn test_empty_corpus() {
        let summary = summarize(&[], NgramRankings::default());
        assert_eq!(summary.document_count, 0);
        assert_eq!(summary.average_reading_ease, 0.0);
    }
}
