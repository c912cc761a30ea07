//! Rich-text document model.
//!
//! These types serialize to the JSON shape consumed by document-import APIs:
//! every node carries a `type` key, block nodes carry `content`, text nodes
//! carry `text` and `marks`.
//!
//! # Example
//!
//! ```rust
//! use quire_core::{Mark, Node};
//!
//! let node = Node::text("hi", vec![Mark::Bold]);
//! let json = serde_json::to_value(&node).unwrap();
//!
//! assert_eq!(json, serde_json::json!({"type": "text", "text": "hi", "marks": [{"type": "bold"}]}));
//! ```

use serde::{Deserialize, Serialize};

/// A node in the output document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// Page envelope holding the block sequence.
    Doc { content: Vec<Node> },

    /// A paragraph. The synthetic paragraph inside a list item has no attrs.
    Paragraph {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<BlockAttrs>,
        content: Vec<Node>,
    },

    /// A heading of level 1 to 6.
    Heading { attrs: HeadingAttrs, content: Vec<Node> },

    BulletList { content: Vec<Node> },

    OrderedList { content: Vec<Node> },

    /// A list entry, always wrapping exactly one paragraph.
    ListItem { content: Vec<Node> },

    HardBreak,

    /// A run of text with its marks.
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
}

impl Node {
    /// Creates a text node.
    pub fn text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text { text: text.into(), marks }
    }

    /// Creates a block paragraph; its attrs always serialize, possibly as `{}`.
    pub fn paragraph(attrs: BlockAttrs, content: Vec<Node>) -> Self {
        Node::Paragraph { attrs: Some(attrs), content }
    }

    /// Creates a heading.
    pub fn heading(level: u8, attrs: BlockAttrs, content: Vec<Node>) -> Self {
        Node::Heading { attrs: HeadingAttrs { level, text_align: attrs.text_align }, content }
    }

    /// Creates a list item wrapping `inline` in a single attribute-less paragraph.
    pub fn list_item(inline: Vec<Node>) -> Self {
        Node::ListItem { content: vec![Node::Paragraph { attrs: None, content: inline }] }
    }

    /// Returns the wire name of this node's `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Doc { .. } => "doc",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem { .. } => "listItem",
            Node::HardBreak => "hardBreak",
            Node::Text { .. } => "text",
        }
    }

    /// Returns the child nodes, empty for leaves.
    pub fn content(&self) -> &[Node] {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content, .. }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content } => content,
            Node::HardBreak | Node::Text { .. } => &[],
        }
    }
}

/// Presentation attributes read from a block element's inline style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

/// Heading attributes: level plus block attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingAttrs {
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

/// An inline style mark on a text node. Each kind appears at most once per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    TextStyle { attrs: TextStyleAttrs },
}

impl Mark {
    /// Creates a `textStyle` mark carrying a font size.
    pub fn font_size(size: impl Into<String>) -> Self {
        Mark::TextStyle { attrs: TextStyleAttrs { font_size: size.into() } }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleAttrs {
    pub font_size: String,
}

/// One converted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,
    pub slug: String,
    /// Always a [`Node::Doc`].
    pub content: Node,
}

impl PageRecord {
    /// Wraps the block sequence of a page into a `doc` envelope.
    pub fn new(title: impl Into<String>, blocks: Vec<Node>) -> Self {
        let title = title.into();
        let slug = crate::slug::slugify(&title);
        Self { title, slug, content: Node::Doc { content: blocks } }
    }

    /// Returns the top-level blocks of the page.
    pub fn blocks(&self) -> &[Node] {
        self.content.content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paragraph_with_empty_attrs() {
        let node = Node::paragraph(BlockAttrs::default(), vec![]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, json!({"type": "paragraph", "attrs": {}, "content": []}));
    }

    #[test]
    fn test_heading_attrs() {
        let node = Node::heading(2, BlockAttrs { text_align: Some("center".into()) }, vec![Node::text("T", vec![])]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "heading",
                "attrs": {"level": 2, "textAlign": "center"},
                "content": [{"type": "text", "text": "T"}]
            })
        );
    }

    #[test]
    fn test_list_item_wraps_bare_paragraph() {
        let node = Node::list_item(vec![Node::text("x", vec![])]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "listItem",
                "content": [{"type": "paragraph", "content": [{"type": "text", "text": "x"}]}]
            })
        );
        assert_eq!(node.content().len(), 1);
    }

    #[test]
    fn test_hard_break_and_font_size() {
        assert_eq!(serde_json::to_value(Node::HardBreak).unwrap(), json!({"type": "hardBreak"}));
        assert_eq!(
            serde_json::to_value(Mark::font_size("14px")).unwrap(),
            json!({"type": "textStyle", "attrs": {"fontSize": "14px"}})
        );
    }

    #[test]
    fn test_page_record_shape() {
        let record = PageRecord::new("Getting Started", vec![Node::HardBreak]);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["slug"], "getting-started");
        assert_eq!(json["content"]["type"], "doc");
        assert_eq!(json["content"]["content"][0]["type"], "hardBreak");
    }

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{"type": "bulletList", "content": [
            {"type": "listItem", "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "a", "marks": [{"type": "italic"}]}
            ]}]}
        ]}"#;
        let node: Node = serde_json::from_str(json).unwrap();

        assert_eq!(node.kind(), "bulletList");
        let item = Node::list_item(vec![Node::text("a", vec![Mark::Italic])]);
        assert_eq!(node, Node::BulletList { content: vec![item] });
    }
}
