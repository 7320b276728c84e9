//! TF-IDF engine.
//!
//! Scoring is a two-phase batch computation over an immutable collection of
//! term sequences (one per document):
//!
//! 1. [`CorpusStats::build`] normalises every term, counts document
//!    frequencies and per-document term frequencies, and records the surface
//!    forms behind each normalised key.
//! 2. [`CorpusStats::rank_corpus`] and [`CorpusStats::rank_document`] read
//!    those statistics. Per-document ranking reuses the corpus IDF, so a
//!    keyword is one that is distinctive within the corpus and prominent
//!    within the document.
//!
//! Each n-gram order is scored as its own corpus.
//!
//! The score of a term in a document is
//! `(1 + ln f) * (ln((N + 1) / (df + 1)) + 1)`
//! with `f` the raw count in the document, `df` the number of documents
//! containing it and `N` the document count. Terms with `df` below the
//! configured minimum are not scored at all.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::lexical::normalize_term;

/// A scored term with its readable display form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTerm {
    /// Most frequent original surface form.
    pub term: String,
    /// Normalised (stemmed) statistical key.
    pub normalized: String,
    pub score: f64,
    pub doc_freq: usize,
}

/// Occurrence counts of the original strings behind each normalised term.
#[derive(Debug, Clone, Default)]
pub struct SurfaceForms {
    forms: HashMap<String, HashMap<String, usize>>,
}

impl SurfaceForms {
    pub fn record(&mut self, normalized: &str, surface: &str) {
        *self.forms.entry(normalized.to_string()).or_default().entry(surface.to_string()).or_insert(0) += 1;
    }

    /// The most frequent surface form; ties go to the shorter string, then lexical order.
    pub fn canonical(&self, normalized: &str) -> Option<&str> {
        self.forms
            .get(normalized)?
            .iter()
            .max_by(|(a, a_count), (b, b_count)| {
                a_count.cmp(b_count).then_with(|| b.len().cmp(&a.len())).then_with(|| b.cmp(a))
            })
            .map(|(surface, _)| surface.as_str())
    }

    /// Display form for a key, falling back to the key itself.
    pub fn display(&self, normalized: &str) -> String {
        self.canonical(normalized).unwrap_or(normalized).to_string()
    }
}

/// Corpus-wide term statistics for one n-gram order.
#[derive(Debug, Clone)]
pub struct CorpusStats {
    doc_count: usize,
    min_doc_freq: usize,
    doc_freq: HashMap<String, usize>,
    term_freqs: Vec<HashMap<String, usize>>,
    surfaces: SurfaceForms,
}

impl CorpusStats {
    /// First phase: gathers document and term frequencies.
    ///
    /// Terms whose normalisation is empty are discarded.
    pub fn build<S: AsRef<str>>(documents: &[Vec<S>], min_doc_freq: usize) -> Self {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut term_freqs = Vec::with_capacity(documents.len());
        let mut surfaces = SurfaceForms::default();

        for terms in documents {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for raw in terms {
                let raw = raw.as_ref();
                let normalized = normalize_term(raw);
                if normalized.is_empty() {
                    continue;
                }
                surfaces.record(&normalized, raw);
                *counts.entry(normalized).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            term_freqs.push(counts);
        }

        Self { doc_count: documents.len(), min_doc_freq, doc_freq, term_freqs, surfaces }
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    pub fn doc_freq(&self, normalized: &str) -> usize {
        self.doc_freq.get(normalized).copied().unwrap_or(0)
    }

    pub fn surfaces(&self) -> &SurfaceForms {
        &self.surfaces
    }

    /// Smoothed IDF, or `None` when the term falls below the document frequency floor.
    pub fn idf(&self, normalized: &str) -> Option<f64> {
        let df = self.doc_freq(normalized);
        if df == 0 || df < self.min_doc_freq {
            return None;
        }
        Some(((self.doc_count as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
    }

    /// Score of a normalised term within one document.
    pub fn score_in_document(&self, index: usize, normalized: &str) -> Option<f64> {
        let f = *self.term_freqs.get(index)?.get(normalized)?;
        let idf = self.idf(normalized)?;
        Some(sublinear_tf(f) * idf)
    }

    /// Second phase, corpus view: scores summed across all documents, top `k`.
    pub fn rank_corpus(&self, k: usize) -> Vec<RankedTerm> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for counts in &self.term_freqs {
            for (term, &f) in counts {
                if let Some(idf) = self.idf(term) {
                    *totals.entry(term.as_str()).or_insert(0.0) += sublinear_tf(f) * idf;
                }
            }
        }
        self.ranked(totals, k)
    }

    /// Second phase, document view: the document's own frequencies against the corpus IDF, top `n`.
    pub fn rank_document(&self, index: usize, n: usize) -> Vec<RankedTerm> {
        let Some(counts) = self.term_freqs.get(index) else {
            return Vec::new();
        };
        let scores: HashMap<&str, f64> = counts
            .iter()
            .filter_map(|(term, &f)| self.idf(term).map(|idf| (term.as_str(), sublinear_tf(f) * idf)))
            .collect();
        self.ranked(scores, n)
    }

    fn ranked(&self, scores: HashMap<&str, f64>, limit: usize) -> Vec<RankedTerm> {
        let mut entries: Vec<(&str, f64)> = scores.into_iter().collect();
        entries.sort_by(|(a_term, a), (b_term, b)| compare_scores(*a, *b).then_with(|| a_term.cmp(b_term)));
        entries
            .into_iter()
            .take(limit)
            .map(|(term, score)| RankedTerm {
                term: self.surfaces.display(term),
                normalized: term.to_string(),
                score,
                doc_freq: self.doc_freq(term),
            })
            .collect()
    }
}

fn sublinear_tf(f: usize) -> f64 {
    1.0 + (f as f64).ln()
}

/// Descending by score.
fn compare_scores(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &str) -> Vec<String> {
        words.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_document_frequency_counts_documents_once() {
        let stats = CorpusStats::build(&[doc("cache cache cache"), doc("cache layer"), doc("layer")], 1);
        assert_eq!(stats.doc_count(), 3);
        assert_eq!(stats.doc_freq("cach"), 2);
        assert_eq!(stats.doc_freq("layer"), 2);
    }

    #[test]
    fn test_score_formula() {
        let stats = CorpusStats::build(&[doc("rust rust rust"), doc("rust go"), doc("python")], 1);
        let expected = (1.0 + 3f64.ln()) * ((4.0f64 / 3.0).ln() + 1.0);
        let actual = stats.score_in_document(0, "rust").unwrap();
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_concentrated_term_ranks_host_document_higher() {
        let stats = CorpusStats::build(
            &[
                doc("borrow borrow borrow borrow borrow checker lifetimes"),
                doc("borrow threads async await tasks executor runtime spawn"),
                doc("gardening tomatoes soil compost"),
            ],
            1,
        );
        let concentrated = stats.score_in_document(0, "borrow").unwrap();
        let diluted = stats.score_in_document(1, "borrow").unwrap();
        assert!(concentrated > diluted);
        assert_eq!(stats.score_in_document(2, "borrow"), None);
    }

    #[test]
    fn test_min_doc_freq_filters_single_document_terms() {
        let corpus = [doc("alpha shared"), doc("beta shared"), doc("gamma shared")];

        let strict = CorpusStats::build(&corpus, 2);
        let strict_terms: Vec<String> = strict.rank_corpus(10).into_iter().map(|t| t.normalized).collect();
        assert!(!strict_terms.contains(&"alpha".to_string()));
        assert!(strict_terms.contains(&"share".to_string()));

        let loose = CorpusStats::build(&corpus, 1);
        let loose_terms: Vec<String> = loose.rank_corpus(10).into_iter().map(|t| t.normalized).collect();
        assert!(loose_terms.contains(&"alpha".to_string()));
    }

    #[test]
    fn test_rank_corpus_sums_and_truncates() {
        let stats = CorpusStats::build(&[doc("deploy deploy build"), doc("deploy build"), doc("deploy test")], 1);
        let ranked = stats.rank_corpus(2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].normalized, "deploi");
        assert_eq!(ranked[0].term, "deploy");
        assert_eq!(ranked[0].doc_freq, 3);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_rank_document_uses_corpus_idf() {
        let stats = CorpusStats::build(&[doc("shared unique unique"), doc("shared other"), doc("other")], 1);
        let keywords = stats.rank_document(0, 12);
        assert_eq!(keywords[0].normalized, "uniqu");
        let expected = stats.score_in_document(0, "uniqu").unwrap();
        assert!((keywords[0].score - expected).abs() < 1e-12);
        assert!(stats.rank_document(7, 12).is_empty());
    }

    #[test]
    fn test_canonical_surface_form() {
        let stats = CorpusStats::build(&[doc("pages pages page"), doc("pages paged")], 1);
        let canonical = stats.surfaces().canonical("page").unwrap();
        assert_eq!(canonical, "pages");
        assert!(canonical.contains("page"));
    }

    #[test]
    fn test_canonical_ties_prefer_shorter() {
        let mut forms = SurfaceForms::default();
        forms.record("connect", "connecting");
        forms.record("connect", "connect");
        assert_eq!(forms.canonical("connect"), Some("connect"));
        assert_eq!(forms.canonical("missing"), None);
    }

    #[test]
    fn test_bigram_corpus_normalizes_each_word() {
        let stats = CorpusStats::build(&[doc("x"), doc("x")], 1);
        assert_eq!(stats.doc_freq("x"), 2);

        let bigrams = vec![vec!["static sites".to_string()], vec!["static site".to_string()]];
        let stats = CorpusStats::build(&bigrams, 2);
        let ranked = stats.rank_corpus(5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].normalized, "static site");
        assert_eq!(ranked[0].term, "static site");
    }

    #[test]
    fn test_empty_corpus() {
        let stats = CorpusStats::build::<String>(&[], 2);
        assert!(stats.rank_corpus(10).is_empty());
    }
}
