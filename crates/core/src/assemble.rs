//! Page assembly and batch conversion.
//!
//! # Example
//!
//! ```rust
//! use quire_core::{ConvertConfig, PageSource, convert_all};
//!
//! let pages = vec![
//!     PageSource::new("Intro", "<h1>Welcome</h1><p>Hello</p>"),
//!     PageSource::new("FAQ?", "<ul><li>One</li><li>Two</li></ul>"),
//! ];
//! let report = convert_all(pages, &ConvertConfig::default());
//!
//! assert_eq!(report.pages.len(), 2);
//! assert_eq!(report.pages[1].slug, "faq");
//! ```

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::builder::BlockBuilder;
use crate::config::ConvertConfig;
use crate::model::PageRecord;
use crate::parse::Document;
use crate::{QuireError, Result};

/// Raw input for one logical page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    pub title: String,
    pub html: String,
}

impl PageSource {
    pub fn new(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self { title: title.into(), html: html.into() }
    }
}

/// A page that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub title: String,
    pub reason: String,
}

impl From<QuireError> for PageFailure {
    fn from(err: QuireError) -> Self {
        match err {
            QuireError::PageConversionFailed { title, reason } => Self { title, reason },
            other => Self { title: String::new(), reason: other.to_string() },
        }
    }
}

/// Outcome of a batch conversion.
///
/// `pages` keeps the input order of every page that converted; `failures`
/// lists the ones that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub pages: Vec<PageRecord>,
    pub failures: Vec<PageFailure>,
}

impl ConversionReport {
    /// True when no page was offered for conversion.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.failures.is_empty()
    }

    /// Records a failure that happened before conversion, e.g. while reading.
    pub fn push_failure(&mut self, failure: PageFailure) {
        self.failures.push(failure);
    }
}

/// Converts one page into a record.
///
/// # Errors
///
/// Returns [`QuireError::PageConversionFailed`] when the page cannot be
/// converted.
pub fn convert_page(source: &PageSource, config: &ConvertConfig) -> Result<PageRecord> {
    let doc = Document::parse(&source.html).map_err(|e| QuireError::page(&source.title, e))?;
    let roots = doc.root_elements();

    let blocks = BlockBuilder::new(config)
        .build_blocks(&roots)
        .map_err(|e| QuireError::page(&source.title, e))?;

    let record = PageRecord::new(source.title.clone(), blocks);
    debug!(title = %record.title, slug = %record.slug, blocks = record.blocks().len(), "converted page");
    Ok(record)
}

/// Converts every page independently.
///
/// A failing page is logged, recorded in the report and left out of
/// `pages`; the others are unaffected. Output order equals input order
/// whether or not pages run in parallel.
pub fn convert_all(pages: Vec<PageSource>, config: &ConvertConfig) -> ConversionReport {
    let results: Vec<Result<PageRecord>> = if config.parallel {
        pages.into_par_iter().map(|page| convert_page(&page, config)).collect()
    } else {
        pages.into_iter().map(|page| convert_page(&page, config)).collect()
    };

    let mut report = ConversionReport::default();
    for result in results {
        match result {
            Ok(record) => report.pages.push(record),
            Err(err) => {
                warn!(error = %err, "skipping page");
                report.failures.push(err.into());
            }
        }
    }

    info!(converted = report.pages.len(), skipped = report.failures.len(), "conversion finished");
    report
}
