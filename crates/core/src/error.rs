//! Error types for Quire operations.
//!
//! This module defines the main error type [`QuireError`] which represents
//! all possible errors that can occur while loading pages, converting them,
//! writing output, and talking to the remote export API.
//!
//! # Example
//!
//! ```rust
//! use quire_core::{QuireError, Result};
//!
//! fn load(html: Option<&str>) -> Result<&str> {
//!     html.ok_or_else(|| QuireError::SourceNotFound("html_pages".into()))
//! }
//! # assert!(load(None).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for conversion operations.
///
/// Only [`QuireError::SourceNotFound`] aborts a batch. Page-level failures are
/// collected into a [`crate::ConversionReport`] instead of being returned.
#[derive(Error, Debug)]
pub enum QuireError {
    /// Input directory or file does not exist.
    ///
    /// Nothing can be converted, so the whole run is aborted.
    #[error("Source not found: {0}")]
    SourceNotFound(PathBuf),

    /// A single page could not be converted.
    ///
    /// Returned by [`crate::convert_page`]; batch conversion records it and
    /// moves on to the next page.
    #[error("Failed to convert page '{title}': {reason}")]
    PageConversionFailed { title: String, reason: String },

    /// A page file is not valid UTF-8.
    #[error("Invalid character encoding in {0}")]
    InvalidEncoding(PathBuf),

    /// File read and write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// HTTP request errors from reqwest.
    #[cfg(feature = "remote")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL provided.
    #[cfg(feature = "remote")]
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request timeout.
    #[cfg(feature = "remote")]
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The remote API reported a terminal, non-complete export status.
    #[cfg(feature = "remote")]
    #[error("Export of page {page} failed with status '{status}'")]
    ExportFailed { page: String, status: String },

    /// The export did not complete within the configured number of polls.
    #[cfg(feature = "remote")]
    #[error("Export of page {page} still pending after {attempts} attempts")]
    ExportPending { page: String, attempts: u32 },
}

impl QuireError {
    /// Builds a [`QuireError::PageConversionFailed`] for the given page title.
    pub fn page(title: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        QuireError::PageConversionFailed { title: title.into(), reason: reason.to_string() }
    }
}

/// Result type alias for QuireError.
pub type Result<T> = std::result::Result<T, QuireError>;
