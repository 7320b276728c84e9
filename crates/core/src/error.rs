//! Error types for sitelex operations.
//!
//! This module defines the main error type [`SitelexError`] which represents
//! everything that can go wrong while loading, parsing and reporting on a
//! content corpus.
//!
//! Most failures inside a run are not fatal: a file that cannot be read or
//! parsed is logged and left out of the corpus. Only errors raised before any
//! document is processed, or while writing the primary report, reach the caller.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use sitelex_core::{Result, SitelexError};
//!
//! fn require_markdown(path: &Path) -> Result<()> {
//!     if path.extension().is_none_or(|ext| ext != "md") {
//!         return Err(SitelexError::UnsupportedFormat(path.to_path_buf()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for corpus analysis.
#[derive(Error, Debug)]
pub enum SitelexError {
    /// File not found.
    ///
    /// Returned when a document path disappears between discovery and reading.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Invalid character encoding.
    ///
    /// Returned when a document is not valid UTF-8.
    #[error("Invalid character encoding in {0}")]
    InvalidEncoding(PathBuf),

    /// The file extension is not one of the supported document formats.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(PathBuf),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Invalid site origin URL.
    #[error("Invalid origin URL: {0}")]
    InvalidOrigin(String),

    /// The analysis worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),

    /// Report serialization errors.
    #[error("Failed to render report: {0}")]
    RenderError(String),

    /// File read and write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SitelexError.
pub type Result<T> = std::result::Result<T, SitelexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SitelexError::InvalidOrigin("not a url".to_string());
        assert!(err.to_string().contains("Invalid origin URL"));
    }

    #[test]
    fn test_file_not_found_mentions_path() {
        let err = SitelexError::FileNotFound(PathBuf::from("/tmp/missing.md"));
        assert!(err.to_string().contains("missing.md"));
    }
}
