//! Inline style inspection.
//!
//! Only the `style` attribute of the element itself is read. Declarations are
//! parsed into property/value pairs, so a property is recognized by its exact
//! name rather than by a substring anywhere in the attribute.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{BlockAttrs, Mark};
use crate::parse::Element;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|;)\s*([A-Za-z-]+)\s*:\s*([^;]*)").expect("declaration pattern is valid")
});

/// The declarations of one inline `style` attribute, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parses a raw `style` attribute.
    ///
    /// Property names are lowercased; values are trimmed and lose a trailing
    /// `!important`. Malformed segments without a `:` are skipped.
    pub fn parse(style: &str) -> Self {
        let declarations = DECLARATION
            .captures_iter(style)
            .map(|caps| (caps[1].to_ascii_lowercase(), declared_value(&caps[2]).to_string()))
            .collect();

        Self { declarations }
    }

    /// Parses the `style` attribute of `element`, empty when absent.
    pub fn of(element: &Element<'_>) -> Self {
        element.style().map(Self::parse).unwrap_or_default()
    }

    /// Returns the first non-empty value declared for `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, value)| name == property && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    fn is_bold(&self) -> bool {
        match self.get("font-weight") {
            Some(weight) => {
                weight.eq_ignore_ascii_case("bold")
                    || weight.eq_ignore_ascii_case("bolder")
                    || weight.parse::<u16>().is_ok_and(|w| w >= 700)
            }
            None => false,
        }
    }

    fn is_italic(&self) -> bool {
        self.get("font-style").is_some_and(|s| s.eq_ignore_ascii_case("italic"))
    }

    fn is_underline(&self) -> bool {
        self.get("text-decoration")
            .is_some_and(|d| d.split_whitespace().any(|v| v.eq_ignore_ascii_case("underline")))
    }
}

fn declared_value(raw: &str) -> &str {
    let value = raw.trim();
    match value.rfind('!') {
        Some(bang) if value[bang + 1..].trim().eq_ignore_ascii_case("important") => value[..bang].trim_end(),
        _ => value,
    }
}

/// Reads block presentation attributes from the element's inline style.
///
/// `textAlign` is stored verbatim, without validating the keyword. A missing
/// declaration leaves it unset.
pub fn extract_block_attrs(element: &Element<'_>) -> BlockAttrs {
    block_attrs_from(&InlineStyle::of(element))
}

fn block_attrs_from(style: &InlineStyle) -> BlockAttrs {
    BlockAttrs { text_align: style.get("text-align").map(str::to_string) }
}

/// Derives the marks of a text run from the element's tag and inline style.
///
/// Rules are independent and compose; the result is ordered bold, italic,
/// underline, textStyle.
pub fn extract_marks(element: &Element<'_>) -> Vec<Mark> {
    marks_from(element.tag_name(), &InlineStyle::of(element))
}

fn marks_from(tag: &str, style: &InlineStyle) -> Vec<Mark> {
    let mut marks = Vec::new();

    if matches!(tag, "strong" | "b") || style.is_bold() {
        marks.push(Mark::Bold);
    }
    if matches!(tag, "em" | "i") || style.is_italic() {
        marks.push(Mark::Italic);
    }
    if tag == "u" || style.is_underline() {
        marks.push(Mark::Underline);
    }
    if let Some(size) = style.get("font-size") {
        marks.push(Mark::font_size(size));
    }

    marks
}
