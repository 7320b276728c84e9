//! Audit entry points.
//!
//! A run has three stages:
//!
//! 1. per-document analysis, in parallel on a bounded worker pool;
//! 2. the corpus TF-IDF pass, one [`CorpusStats`] per n-gram order;
//! 3. aggregation into a [`CorpusSummary`].
//!
//! Stages 2 and 3 start only once every document of stage 1 is available.
//!
//! # Example
//!
//! ```rust,no_run
//! use sitelex_core::{AuditConfig, audit};
//!
//! let config = AuditConfig::builder().origin("https://example.com").build()?;
//! let report = audit("site/src", &config)?;
//! println!("{} documents, vocabulary {}", report.documents.len(), report.summary.vocabulary_size);
//! # Ok::<(), sitelex_core::SitelexError>(())
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::AuditConfig;
use crate::corpus::{CorpusSummary, NgramRankings, summarize};
use crate::document::Document;
use crate::lexical::ngrams;
use crate::loader::discover;
use crate::report::AuditReport;
use crate::tfidf::CorpusStats;
use crate::{Result, SitelexError};

/// Audits every eligible document under `root`.
///
/// Document paths are absolute when the root exists. A missing root produces
/// an empty report. Files that fail to load are logged and left out.
#[tracing::instrument(skip_all, fields(root = %root.as_ref().display()))]
pub fn audit(root: impl AsRef<Path>, config: &AuditConfig) -> Result<AuditReport> {
    let root = root.as_ref();
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let paths = discover(&root, config);
    tracing::debug!(files = paths.len(), "discovered documents");

    let documents = analyze_files(&paths, &root, config)?;
    let (documents, summary) = analyze_corpus(documents, config);

    tracing::info!(
        documents = summary.document_count,
        vocabulary = summary.vocabulary_size,
        "corpus analysed"
    );

    AuditReport::new(&root, documents, summary)
}

/// Analyses files on a pool of `config.workers` threads.
///
/// The result is sorted by path regardless of completion order.
pub fn analyze_files(paths: &[PathBuf], root: &Path, config: &AuditConfig) -> Result<Vec<Document>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers.max(1))
        .build()
        .map_err(|e| SitelexError::WorkerPool(e.to_string()))?;

    let mut documents: Vec<Document> = pool.install(|| {
        paths
            .par_iter()
            .filter_map(|path| match Document::from_path(path, root, config) {
                Ok(doc) => {
                    tracing::debug!(path = %path.display(), words = doc.word_count, "analysed document");
                    Some(doc)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping document");
                    None
                }
            })
            .collect()
    });

    documents.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(documents)
}

/// Runs the corpus TF-IDF pass and aggregation over analysed documents.
///
/// Attaches per-document keywords and returns the documents with the summary.
pub fn analyze_corpus(mut documents: Vec<Document>, config: &AuditConfig) -> (Vec<Document>, CorpusSummary) {
    let unigram_docs: Vec<Vec<String>> = documents.iter().map(|d| d.weighted_terms.clone()).collect();
    let bigram_docs: Vec<Vec<String>> = documents.iter().map(|d| ngrams(&d.weighted_terms, 2)).collect();
    let trigram_docs: Vec<Vec<String>> = documents.iter().map(|d| ngrams(&d.weighted_terms, 3)).collect();

    let unigrams = CorpusStats::build(&unigram_docs, config.min_doc_freq);
    let bigrams = CorpusStats::build(&bigram_docs, config.min_doc_freq);
    let trigrams = CorpusStats::build(&trigram_docs, config.min_doc_freq);

    let rankings = NgramRankings {
        unigrams: unigrams.rank_corpus(config.top_terms),
        bigrams: bigrams.rank_corpus(config.top_terms),
        trigrams: trigrams.rank_corpus(config.top_terms),
    };

    for (index, doc) in documents.iter_mut().enumerate() {
        doc.keywords = unigrams.rank_document(index, config.keywords_per_document);
    }

    let summary = summarize(&documents, rankings);
    (documents, summary)
}
