pub mod analyze;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod formatters;
pub mod frontmatter;
pub mod lexical;
pub mod loader;
pub mod metadata;
pub mod parse;
pub mod preprocess;
pub mod readability;
pub mod report;
pub mod stem;
pub mod tfidf;

pub use analyze::{analyze_corpus, analyze_files, audit};
pub use config::{AuditConfig, AuditConfigBuilder, DEFAULT_STOPWORDS, FieldWeights, Stopwords};
pub use corpus::{CorpusSummary, NgramRankings, summarize};
pub use document::Document;
pub use error::{Result, SitelexError};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_json, convert_to_text};
#[doc(hidden)]
pub use frontmatter::{FrontMatter, split_front_matter};
pub use lexical::{ngrams, normalize_term, tokenize, weighted_terms};
pub use loader::{DocumentKind, SourceFile, discover, load, route_hint};
pub use metadata::{Headings, Links, Metadata, extract_metadata, metadata_warnings};
#[doc(hidden)]
pub use parse::Markup;
pub use preprocess::strip_body;
pub use readability::ReadabilityScores;
pub use report::AuditReport;
pub use stem::porter_stem;
pub use tfidf::{CorpusStats, RankedTerm, SurfaceForms};
