//! JSON output for converted pages.

use std::fs;
use std::path::Path;

use crate::Result;
use crate::model::PageRecord;

/// Serializes the page records as one JSON array.
///
/// Non-ASCII text is written as UTF-8, not escaped.
pub fn to_json(pages: &[PageRecord], pretty: bool) -> Result<String> {
    let json = if pretty { serde_json::to_string_pretty(pages)? } else { serde_json::to_string(pages)? };
    Ok(json)
}

/// Writes the page records to `path` as one JSON array.
pub fn write_json(pages: &[PageRecord], path: &Path, pretty: bool) -> Result<()> {
    let mut json = to_json(pages, pretty)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Reads page records previously written with [`write_json`].
pub fn read_json(path: &Path) -> Result<Vec<PageRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mark, Node};
    use tempfile::TempDir;

    fn sample() -> Vec<PageRecord> {
        vec![PageRecord::new(
            "Café",
            vec![Node::paragraph(Default::default(), vec![Node::text("déjà vu", vec![Mark::Bold])])],
        )]
    }

    #[test]
    fn test_compact_output() {
        let json = to_json(&sample(), false).unwrap();

        assert!(json.starts_with("[{"));
        assert!(!json.contains('\n'));
        assert!(json.contains("déjà vu"));
        assert!(json.contains(r#""slug":"caf""#));
    }

    #[test]
    fn test_pretty_output() {
        let json = to_json(&sample(), true).unwrap();
        assert!(json.contains("\n  {"));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(to_json(&[], false).unwrap(), "[]");
    }

    #[test]
    fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("posts.json");

        write_json(&sample(), &path, true).unwrap();
        let pages = read_json(&path).unwrap();

        assert_eq!(pages, sample());
    }
}
