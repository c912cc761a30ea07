//! Page loading from the filesystem.
//!
//! A page is one HTML file; its file stem is the page title. A directory is
//! read in file-name order so repeated runs produce identical output.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::assemble::{ConversionReport, PageFailure, PageSource, convert_all};
use crate::config::ConvertConfig;
use crate::{QuireError, Result};

/// Pages read from disk, plus the files that could not be read.
#[derive(Debug, Clone, Default)]
pub struct LoadedPages {
    pub pages: Vec<PageSource>,
    pub failures: Vec<PageFailure>,
}

/// Reads one page file.
///
/// # Errors
///
/// [`QuireError::SourceNotFound`] when the file is missing,
/// [`QuireError::InvalidEncoding`] when it is not UTF-8.
pub fn read_page(path: &Path) -> Result<PageSource> {
    if !path.exists() {
        return Err(QuireError::SourceNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    let html = String::from_utf8(bytes).map_err(|_| QuireError::InvalidEncoding(path.to_path_buf()))?;

    Ok(PageSource::new(page_title(path), html))
}

/// The page title for a file: its name without the extension.
pub fn page_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lists the page files of a directory, sorted by file name.
pub fn page_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(QuireError::SourceNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Loads pages from a directory, or a single file.
///
/// Unreadable files are recorded as failures and skipped. An empty directory
/// is not an error.
///
/// # Errors
///
/// Returns [`QuireError::SourceNotFound`] when `input` does not exist.
pub fn load_pages(input: &Path, config: &ConvertConfig) -> Result<LoadedPages> {
    if input.is_file() {
        let page = read_page(input)?;
        return Ok(LoadedPages { pages: vec![page], failures: Vec::new() });
    }

    let files = page_files(input, &config.extension)?;
    if files.is_empty() {
        warn!(dir = %input.display(), extension = %config.extension, "no page files found");
        return Ok(LoadedPages::default());
    }

    info!(dir = %input.display(), count = files.len(), "found page files");

    let mut loaded = LoadedPages::default();
    for path in files {
        match read_page(&path) {
            Ok(page) => {
                debug!(path = %path.display(), bytes = page.html.len(), "read page");
                loaded.pages.push(page);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable page");
                loaded.failures.push(PageFailure { title: page_title(&path), reason: err.to_string() });
            }
        }
    }

    Ok(loaded)
}

/// Loads and converts every page under `input`.
///
/// Read failures and conversion failures both end up in the report's
/// `failures`; only a missing input aborts.
pub fn convert_dir(input: &Path, config: &ConvertConfig) -> Result<ConversionReport> {
    let loaded = load_pages(input, config)?;

    let mut report = convert_all(loaded.pages, config);
    for failure in loaded.failures {
        report.push_failure(failure);
    }

    Ok(report)
}
