use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("slug pattern is valid"));

/// Derives the page slug from its title.
///
/// The title is lowercased, spaces become hyphens, and anything outside
/// `[a-z0-9-]` is stripped. Distinct titles may share a slug.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase().replace(' ', "-");
    DISALLOWED.replace_all(&lowered, "").into_owned()
}
