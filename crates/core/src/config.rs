//! Audit configuration.
//!
//! Every tuning constant of the pipeline lives here as explicit, immutable
//! configuration that is passed through the run. Nothing in the crate reads
//! process-wide state.
//!
//! # Example
//!
//! ```rust
//! use sitelex_core::AuditConfig;
//!
//! let config = AuditConfig::builder()
//!     .origin("https://blog.example.org")
//!     .min_doc_freq(1)
//!     .top_terms(20)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.min_doc_freq, 1);
//! ```

use std::collections::HashSet;
use std::ops::RangeInclusive;

use url::Url;

use crate::{Result, SitelexError};

/// English function words plus markup, format and tooling noise.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    // articles, pronouns, determiners
    "a", "an", "the", "this", "that", "these", "those", "i", "me", "my", "mine", "myself", "we", "us", "our", "ours",
    "ourselves", "you", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom",
    "whose", "each", "every", "either", "neither", "some", "any", "all", "both", "few", "more", "most", "other",
    "another", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "much", "many",
    // auxiliaries and common verbs
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does", "did",
    "doing", "done", "can", "could", "will", "would", "shall", "should", "may", "might", "must", "get", "gets", "got",
    "make", "makes", "made", "let", "lets", "use", "used", "using", "uses", "go", "goes", "going", "see", "say",
    "says", "said", "like", "just", "also", "still", "even", "ever", "never", "well", "way",
    // prepositions and conjunctions
    "about", "above", "across", "after", "again", "against", "along", "among", "around", "at", "before", "behind",
    "below", "beneath", "beside", "between", "beyond", "by", "down", "during", "except", "for", "from", "in",
    "inside", "into", "near", "of", "off", "on", "onto", "out", "outside", "over", "past", "since", "through",
    "throughout", "to", "toward", "towards", "under", "until", "up", "upon", "with", "within", "without", "and",
    "but", "or", "if", "then", "else", "because", "as", "while", "whereas", "although", "though", "unless", "whether",
    "yet", "once",
    // adverbs and question words
    "here", "there", "when", "where", "why", "how", "now", "always", "often", "sometimes", "already", "soon",
    "really", "quite", "rather", "almost", "perhaps", "maybe", "however", "therefore", "thus", "etc", "via", "per",
    "vs", "ok", "yes", "one", "two", "three", "first", "new", "s", "t", "don", "doesn", "didn", "isn", "aren", "wasn",
    "weren", "won", "ll", "re", "ve",
    // format extensions and markup noise
    "md", "mdx", "markdown", "html", "htm", "json", "yaml", "yml", "toml", "xml", "txt", "csv", "js", "jsx", "ts",
    "tsx", "mjs", "cjs", "css", "scss", "svg", "png", "jpg", "jpeg", "gif", "webp", "avif", "ico", "pdf", "div",
    "span", "href", "src", "alt", "img", "classname", "class", "style", "props", "http", "https", "www", "com", "org",
    "net", "io", "dev", "nbsp", "amp", "quot", "lt", "gt",
    // tooling terms
    "import", "export", "default", "const", "function", "return", "true", "false", "null", "undefined", "npm",
    "pnpm", "yarn", "npx", "node", "nextjs", "next", "astro", "vite", "webpack", "eslint", "prettier", "tsconfig",
    "package", "config",
];

/// Fixed integer weights applied when building a document's weighted term bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldWeights {
    pub title: usize,
    pub description: usize,
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self { title: 5, description: 4, h1: 4, h2: 3, h3: 2 }
    }
}

/// Immutable stopword set used by the lexical pipeline.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Builds the default English and markup-noise stopword set.
    pub fn english() -> Self {
        Self { words: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect() }
    }

    /// Returns a copy extended with additional (lowercased) words.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(extra.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

/// Configuration for a corpus audit.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// File extensions (without the dot) eligible for analysis.
    pub extensions: Vec<String>,

    /// Directory name whose files map to site routes (default: `pages`).
    pub pages_dir: String,

    /// Directory names holding descriptive records rather than pages (default: `data`, `authors`).
    pub data_dirs: Vec<String>,

    /// The audited site's own origin, used to classify links.
    pub origin: Url,

    /// Weights for title, description and heading tokens.
    pub weights: FieldWeights,

    /// Minimum document frequency for a term to be scored (default: 2).
    pub min_doc_freq: usize,

    /// Entries kept per n-gram order in the corpus ranking (default: 40).
    pub top_terms: usize,

    /// Keywords kept per document (default: 12).
    pub keywords_per_document: usize,

    /// Size of the analysis worker pool (default: 8).
    pub workers: usize,

    /// Minimum word count for a page to appear in keyword samples (default: 150).
    pub min_sample_words: usize,

    /// Acceptable title length in characters (default: 15..=65).
    pub title_length: RangeInclusive<usize>,

    /// Acceptable description length in characters (default: 50..=160).
    pub description_length: RangeInclusive<usize>,

    /// Reading speed used for reading time estimates (default: 200).
    pub words_per_minute: f64,

    pub stopwords: Stopwords,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            extensions: ["md", "mdx", "markdown", "html", "htm", "json"].iter().map(|e| e.to_string()).collect(),
            pages_dir: "pages".to_string(),
            data_dirs: vec!["data".to_string(), "authors".to_string()],
            origin: Url::parse("https://example.com").expect("static origin is a valid URL"),
            weights: FieldWeights::default(),
            min_doc_freq: 2,
            top_terms: 40,
            keywords_per_document: 12,
            workers: 8,
            min_sample_words: 150,
            title_length: 15..=65,
            description_length: 50..=160,
            words_per_minute: 200.0,
            stopwords: Stopwords::english(),
        }
    }
}

impl AuditConfig {
    /// Creates a new builder for AuditConfig.
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::new()
    }

    /// Host of the audited origin, if it has one.
    pub fn site_host(&self) -> Option<&str> {
        self.origin.host_str()
    }
}

/// Builder for AuditConfig.
///
/// Invalid values (an unparseable origin) are reported by [`AuditConfigBuilder::build`].
pub struct AuditConfigBuilder {
    config: AuditConfig,
    origin: Option<String>,
}

impl AuditConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AuditConfig::default(), origin: None }
    }

    /// Sets the audited site's origin.
    pub fn origin(mut self, value: impl Into<String>) -> Self {
        self.origin = Some(value.into());
        self
    }

    /// Sets the file extension allow-list.
    pub fn extensions<I, S>(mut self, value: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = value.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the pages root directory name.
    pub fn pages_dir(mut self, value: impl Into<String>) -> Self {
        self.config.pages_dir = value.into();
        self
    }

    /// Sets the data-only record directory names.
    pub fn data_dirs<I, S>(mut self, value: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.data_dirs = value.into_iter().map(Into::into).collect();
        self
    }

    pub fn weights(mut self, value: FieldWeights) -> Self {
        self.config.weights = value;
        self
    }

    /// Sets the minimum document frequency for scored terms.
    pub fn min_doc_freq(mut self, value: usize) -> Self {
        self.config.min_doc_freq = value;
        self
    }

    /// Sets the number of ranked entries per n-gram order.
    pub fn top_terms(mut self, value: usize) -> Self {
        self.config.top_terms = value;
        self
    }

    /// Sets the number of keywords kept per document.
    pub fn keywords_per_document(mut self, value: usize) -> Self {
        self.config.keywords_per_document = value;
        self
    }

    /// Sets the worker pool size (at least one worker is always used).
    pub fn workers(mut self, value: usize) -> Self {
        self.config.workers = value.max(1);
        self
    }

    /// Sets the minimum word count for keyword samples.
    pub fn min_sample_words(mut self, value: usize) -> Self {
        self.config.min_sample_words = value;
        self
    }

    pub fn stopwords(mut self, value: Stopwords) -> Self {
        self.config.stopwords = value;
        self
    }

    /// Builds the config.
    pub fn build(mut self) -> Result<AuditConfig> {
        if let Some(origin) = self.origin {
            let url = Url::parse(&origin).map_err(|e| SitelexError::InvalidOrigin(format!("{}: {}", origin, e)))?;
            if url.host_str().is_none_or(str::is_empty) {
                return Err(SitelexError::InvalidOrigin(origin));
            }
            self.config.origin = url;
        }
        Ok(self.config)
    }
}

impl Default for AuditConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
