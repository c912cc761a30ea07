//! HTML parsing and element access.
//!
//! This module provides the [`Document`] and [`Element`] types that the
//! converter walks. A page is parsed as a fragment, so elements written at the
//! top of the file are the document's root-level elements.
//!
//! # Example
//!
//! ```rust
//! use quire_core::parse::Document;
//!
//! let doc = Document::parse("<h1>Title</h1><p style=\"text-align: center\">Body</p>").unwrap();
//! let roots = doc.root_elements();
//!
//! assert_eq!(roots.len(), 2);
//! assert_eq!(roots[0].tag_name(), "h1");
//! assert_eq!(roots[1].style(), Some("text-align: center"));
//! ```

use scraper::{ElementRef, Html, Node};

use crate::Result;

/// Represents one parsed HTML page.
///
/// Parsing never fails on malformed markup: html5ever recovers the same way a
/// browser does. Wrapping `<html>`, `<head>` and `<body>` tags are dropped by
/// fragment parsing, so full documents and bare fragments behave alike.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quire_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><body><p>Hello</p></body></html>").unwrap();
    /// assert_eq!(doc.root_elements()[0].tag_name(), "p");
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_fragment(html);
        Ok(Self { html })
    }

    /// Gets the elements at the root of the page, in document order.
    ///
    /// Descendants are not included; they are reached through the block
    /// builders.
    pub fn root_elements(&self) -> Vec<Element<'_>> {
        Element { element: self.html.root_element() }.child_elements().collect()
    }
}

/// A direct child of an element: either a nested element or a run of text.
#[derive(Clone, Copy, Debug)]
pub enum Child<'a> {
    Element(Element<'a>),
    Text(&'a str),
}

/// A wrapper around scraper's ElementRef exposing what the converter reads.
///
/// # Example
///
/// ```rust
/// use quire_core::parse::Document;
///
/// let doc = Document::parse(r#"<p><span style="font-size: 12px">a</span>b</p>"#).unwrap();
/// let p = doc.root_elements()[0];
///
/// assert_eq!(p.text(), "ab");
/// assert_eq!(p.child_elements_named("span").count(), 1);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the tag name of this element.
    ///
    /// html5ever normalizes HTML tag names to lowercase.
    pub fn tag_name(&self) -> &'a str {
        self.element.value().name()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the raw inline `style` attribute.
    pub fn style(&self) -> Option<&'a str> {
        self.attr("style")
    }

    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all descendant text nodes, tags stripped.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Iterates over direct children that are elements or text.
    ///
    /// Comments, doctypes and processing instructions are skipped.
    pub fn children(self) -> impl Iterator<Item = Child<'a>> {
        self.element.children().filter_map(|node| match node.value() {
            Node::Element(_) => ElementRef::wrap(node).map(|element| Child::Element(Element { element })),
            Node::Text(text) => Some(Child::Text(&**text)),
            _ => None,
        })
    }

    /// Iterates over direct child elements.
    pub fn child_elements(self) -> impl Iterator<Item = Element<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(|element| Element { element })
    }

    /// Iterates over direct child elements with the given tag name.
    pub fn child_elements_named(self, tag: &'a str) -> impl Iterator<Item = Element<'a>> {
        self.child_elements().filter(move |el| el.tag_name() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph <b>1</b></p>
            <ul><li>One</li><li>Two</li></ul>
        </body>
        </html>
    "#;

    fn tags(doc: &Document) -> Vec<String> {
        doc.root_elements().iter().map(|el| el.tag_name().to_string()).collect()
    }

    #[test]
    fn test_full_document_roots() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let tags = tags(&doc);

        assert!(tags.contains(&"h1".to_string()));
        assert!(tags.contains(&"p".to_string()));
        assert!(tags.contains(&"ul".to_string()));
        assert!(!tags.contains(&"body".to_string()));
        assert!(!tags.contains(&"li".to_string()));
    }

    #[test]
    fn test_fragment_roots_in_order() {
        let doc = Document::parse("<p>a</p><table><tr><td>x</td></tr></table><br><h2>b</h2>").unwrap();
        assert_eq!(tags(&doc), vec!["p", "table", "br", "h2"]);
    }

    #[test]
    fn test_element_attributes() {
        let doc = Document::parse(r#"<p style="text-align: right" id="x">Hi</p>"#).unwrap();
        let p = doc.root_elements()[0];

        assert_eq!(p.attr("id"), Some("x"));
        assert_eq!(p.style(), Some("text-align: right"));
        assert_eq!(p.attr("class"), None);
        assert_eq!(p.text(), "Hi");
    }

    #[test]
    fn test_children_mix_text_and_elements() {
        let doc = Document::parse("<p>a<!-- note --><span>b</span>c</p>").unwrap();
        let p = doc.root_elements()[0];
        let children: Vec<_> = p.children().collect();

        assert_eq!(children.len(), 3);
        assert!(matches!(children[0], Child::Text("a")));
        assert!(matches!(children[1], Child::Element(el) if el.tag_name() == "span"));
        assert!(matches!(children[2], Child::Text("c")));
    }

    #[test]
    fn test_child_elements_named_is_shallow() {
        let doc = Document::parse("<p><span>a</span><b><span>nested</span></b><span>c</span></p>").unwrap();
        let p = doc.root_elements()[0];
        let spans: Vec<String> = p.child_elements_named("span").map(|s| s.text()).collect();

        assert_eq!(spans, vec!["a", "c"]);
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let doc = Document::parse("<p>open <b>bold <i>both</p><div>after").unwrap();
        let tags = tags(&doc);

        assert_eq!(tags.first().map(String::as_str), Some("p"));
        assert!(tags.contains(&"div".to_string()));
    }
}
