//! The per-document analysis record.
//!
//! A [`Document`] is a pure function of one file's contents plus the audit
//! configuration. Everything except `keywords` is filled in by
//! [`Document::analyze`]; keywords need corpus-wide IDF and are attached once
//! every document has been analysed.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::AuditConfig;
use crate::lexical::{ngrams, tokenize, weighted_terms};
use crate::loader::{DocumentKind, SourceFile, is_data_record, load, route_hint};
use crate::metadata::{Headings, extract_metadata, metadata_warnings};
use crate::readability;
use crate::tfidf::RankedTerm;
use crate::Result;

/// One analysed document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub path: PathBuf,
    /// Logical route derived from the path and the audit root.
    pub route: String,
    pub kind: DocumentKind,
    /// Whether this is a record in a data-only directory.
    pub data_record: bool,

    pub title: Option<String>,
    pub description: Option<String>,
    pub headings: Headings,

    /// Filtered body tokens in document order.
    pub tokens: Vec<String>,
    pub bigrams: Vec<String>,
    pub trigrams: Vec<String>,
    /// Body tokens preceded by weighted title, description and heading tokens.
    pub weighted_terms: Vec<String>,

    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,

    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    pub images_without_alt: usize,

    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub reading_time_minutes: f64,

    pub warnings: Vec<String>,

    /// TF-IDF keywords, filled in after the corpus pass.
    pub keywords: Vec<RankedTerm>,
}

impl Document {
    /// Reads and analyses a single file.
    pub fn from_path(path: &Path, root: &Path, config: &AuditConfig) -> Result<Self> {
        let source = load(path)?;
        Ok(Self::analyze(&source, root, config))
    }

    /// Analyses an already loaded file.
    pub fn analyze(source: &SourceFile, root: &Path, config: &AuditConfig) -> Self {
        let metadata = extract_metadata(source, config);
        let warnings = metadata_warnings(&metadata, config);

        let tokens = tokenize(&source.body, &config.stopwords);
        let bigrams = ngrams(&tokens, 2);
        let trigrams = ngrams(&tokens, 3);
        let weighted_terms = weighted_terms(
            metadata.title.as_deref(),
            metadata.description.as_deref(),
            &metadata.headings,
            &tokens,
            &config.weights,
            &config.stopwords,
        );

        let scores = readability::score(&source.body);
        let reading_time_minutes =
            if config.words_per_minute > 0.0 { scores.words as f64 / config.words_per_minute } else { 0.0 };

        Self {
            path: source.path.clone(),
            route: route_hint(&source.path, root, &config.pages_dir),
            kind: source.kind,
            data_record: is_data_record(&source.path, root, source.kind, &config.data_dirs),
            title: metadata.title,
            description: metadata.description,
            headings: metadata.headings,
            tokens,
            bigrams,
            trigrams,
            weighted_terms,
            internal_links: metadata.links.internal,
            external_links: metadata.links.external,
            word_count: scores.words,
            sentence_count: scores.sentences,
            syllable_count: scores.syllables,
            images_without_alt: metadata.images_without_alt,
            flesch_reading_ease: scores.flesch_reading_ease,
            flesch_kincaid_grade: scores.flesch_kincaid_grade,
            reading_time_minutes,
            warnings,
            keywords: Vec::new(),
        }
    }
}
