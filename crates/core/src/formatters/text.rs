use std::fmt::Write;
use std::path::Path;

use crate::config::AuditConfig;
use crate::document::Document;
use crate::report::AuditReport;
use crate::tfidf::RankedTerm;
use crate::{Result, SitelexError};

/// Configuration for the human-readable report
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Minimum word count for a page to appear in the keyword samples
    pub min_sample_words: usize,

    /// Maximum number of pages in the keyword samples
    pub max_samples: usize,

    /// Keywords listed per sampled page
    pub keywords_per_sample: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { min_sample_words: 150, max_samples: 25, keywords_per_sample: 12 }
    }
}

impl From<&AuditConfig> for TextConfig {
    fn from(config: &AuditConfig) -> Self {
        Self {
            min_sample_words: config.min_sample_words,
            keywords_per_sample: config.keywords_per_document,
            ..Default::default()
        }
    }
}

/// Plain text formatter for audit reports
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, report: &AuditReport) -> Result<String> {
        convert_to_text(report, &self.config)
    }
}

/// Render a report as sectioned plain text
pub fn convert_to_text(report: &AuditReport, config: &TextConfig) -> Result<String> {
    render(report, config).map_err(|e| SitelexError::RenderError(e.to_string()))
}

fn render(report: &AuditReport, config: &TextConfig) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    let summary = &report.summary;

    heading(&mut out, "Content Audit", '=')?;
    writeln!(out, "Generated: {}", report.generated_at)?;
    writeln!(out, "Root: {}", report.root.display())?;
    writeln!(out, "Documents: {}", summary.document_count)?;
    writeln!(out, "Vocabulary: {}", summary.vocabulary_size)?;
    writeln!(out, "Total words: {}", summary.total_words)?;
    writeln!(out, "Average reading ease: {:.1}", summary.average_reading_ease)?;
    writeln!(out, "Average grade level: {:.1}", summary.average_grade_level)?;
    writeln!(out, "Links: {} internal, {} external", summary.internal_link_count, summary.external_link_count)?;
    writeln!(out, "Images without alt text: {}", summary.images_without_alt)?;

    term_table(&mut out, "Top Terms", &summary.top_terms.unigrams)?;
    term_table(&mut out, "Top Bigrams", &summary.top_terms.bigrams)?;
    term_table(&mut out, "Top Trigrams", &summary.top_terms.trigrams)?;

    heading(&mut out, "Page Keywords", '-')?;
    let samples = keyword_samples(&report.documents, config);
    if samples.is_empty() {
        writeln!(out, "  (no pages with at least {} words)", config.min_sample_words)?;
    }
    for doc in samples {
        writeln!(out, "{} ({} words, {})", doc.route, doc.word_count, doc.path.display())?;
        let keywords: Vec<&str> =
            doc.keywords.iter().take(config.keywords_per_sample).map(|k| k.term.as_str()).collect();
        if keywords.is_empty() {
            writeln!(out, "  -")?;
        } else {
            writeln!(out, "  {}", keywords.join(", "))?;
        }
    }

    path_list(&mut out, "Missing Titles", &summary.missing_titles)?;
    path_list(&mut out, "Missing Descriptions", &summary.missing_descriptions)?;
    path_list(&mut out, "Missing H1", &summary.missing_h1)?;

    heading(&mut out, &format!("Duplicate Titles ({})", summary.duplicate_titles.len()), '-')?;
    if summary.duplicate_titles.is_empty() {
        writeln!(out, "  none")?;
    }
    for (title, paths) in &summary.duplicate_titles {
        writeln!(out, "\"{title}\"")?;
        for path in paths {
            writeln!(out, "  - {}", path.display())?;
        }
    }

    let flagged: Vec<&Document> = report.documents.iter().filter(|d| !d.warnings.is_empty()).collect();
    heading(&mut out, &format!("Page Warnings ({})", flagged.len()), '-')?;
    if flagged.is_empty() {
        writeln!(out, "  none")?;
    }
    for doc in flagged {
        writeln!(out, "{}", doc.path.display())?;
        for warning in &doc.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    Ok(out)
}

/// Pages at or above the word threshold, longest first.
fn keyword_samples<'a>(documents: &'a [Document], config: &TextConfig) -> Vec<&'a Document> {
    let mut samples: Vec<&Document> =
        documents.iter().filter(|d| d.word_count >= config.min_sample_words).collect();
    samples.sort_by(|a, b| b.word_count.cmp(&a.word_count).then_with(|| a.path.cmp(&b.path)));
    samples.truncate(config.max_samples);
    samples
}

fn heading(out: &mut String, title: &str, underline: char) -> std::fmt::Result {
    if !out.is_empty() {
        out.push('\n');
    }
    writeln!(out, "{title}")?;
    writeln!(out, "{}", underline.to_string().repeat(title.chars().count()))
}

fn term_table(out: &mut String, title: &str, terms: &[RankedTerm]) -> std::fmt::Result {
    heading(out, title, '-')?;
    if terms.is_empty() {
        return writeln!(out, "  none");
    }
    let width = terms.iter().map(|t| t.term.chars().count()).max().unwrap_or(0);
    for (rank, term) in terms.iter().enumerate() {
        writeln!(out, "{:>3}. {:<width$}  {:>8.3}  df {}", rank + 1, term.term, term.score, term.doc_freq)?;
    }
    Ok(())
}

fn path_list<P: AsRef<Path>>(out: &mut String, title: &str, paths: &[P]) -> std::fmt::Result {
    heading(out, &format!("{title} ({})", paths.len()), '-')?;
    if paths.is_empty() {
        return writeln!(out, "  none");
    }
    for path in paths {
        writeln!(out, "  - {}", path.as_ref().display())?;
    }
    Ok(())
}
