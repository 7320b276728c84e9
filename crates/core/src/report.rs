//! The serialisable result of an audit run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::corpus::CorpusSummary;
use crate::document::Document;
use crate::{Result, SitelexError};

/// Documents and corpus summary for one audited root.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// RFC 3339 timestamp in UTC.
    pub generated_at: String,
    pub root: PathBuf,
    pub summary: CorpusSummary,
    pub documents: Vec<Document>,
}

impl AuditReport {
    /// Stamps a report with the current time.
    pub fn new(root: &Path, documents: Vec<Document>, summary: CorpusSummary) -> Result<Self> {
        let generated_at =
            OffsetDateTime::now_utc().format(&Rfc3339).map_err(|e| SitelexError::RenderError(e.to_string()))?;
        Ok(Self { generated_at, root: root.to_path_buf(), summary, documents })
    }

    /// Finds a document by its route.
    pub fn document(&self, route: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.route == route)
    }
}
