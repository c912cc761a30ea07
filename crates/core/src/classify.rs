//! Tag name to node kind mapping.

use crate::parse::Element;

/// The document node kinds an HTML element can become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Paragraph,
    Heading(u8),
    BulletList,
    OrderedList,
    ListItem,
    HardBreak,
}

/// Maps an element to the node kind it becomes.
///
/// Returns `None` when the element is not representable; callers drop it
/// together with its subtree unless configured to descend.
pub fn classify(element: &Element<'_>) -> Option<NodeKind> {
    classify_tag(element.tag_name())
}

/// Maps a lowercase tag name to a node kind.
pub fn classify_tag(tag: &str) -> Option<NodeKind> {
    match tag {
        "div" | "p" => Some(NodeKind::Paragraph),
        "h1" => Some(NodeKind::Heading(1)),
        "h2" => Some(NodeKind::Heading(2)),
        "h3" => Some(NodeKind::Heading(3)),
        "h4" => Some(NodeKind::Heading(4)),
        "h5" => Some(NodeKind::Heading(5)),
        "h6" => Some(NodeKind::Heading(6)),
        "ul" => Some(NodeKind::BulletList),
        "ol" => Some(NodeKind::OrderedList),
        "li" => Some(NodeKind::ListItem),
        "br" => Some(NodeKind::HardBreak),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use rstest::rstest;

    #[rstest]
    #[case("div", Some(NodeKind::Paragraph))]
    #[case("p", Some(NodeKind::Paragraph))]
    #[case("ul", Some(NodeKind::BulletList))]
    #[case("ol", Some(NodeKind::OrderedList))]
    #[case("li", Some(NodeKind::ListItem))]
    #[case("br", Some(NodeKind::HardBreak))]
    #[case("table", None)]
    #[case("span", None)]
    #[case("h7", None)]
    #[case("h0", None)]
    #[case("P", None)]
    fn test_classify_tag(#[case] tag: &str, #[case] expected: Option<NodeKind>) {
        assert_eq!(classify_tag(tag), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(6)]
    fn test_heading_level_matches_suffix(#[case] level: u8) {
        let html = format!("<h{level}>Title</h{level}>");
        let doc = Document::parse(&html).unwrap();
        let el = doc.root_elements()[0];

        assert_eq!(classify(&el), Some(NodeKind::Heading(level)));
    }

    #[test]
    fn test_uppercase_markup_is_normalized_by_parser() {
        let doc = Document::parse("<DIV>x</DIV><H3>y</H3>").unwrap();
        let kinds: Vec<_> = doc.root_elements().iter().map(classify).collect();

        assert_eq!(kinds, vec![Some(NodeKind::Paragraph), Some(NodeKind::Heading(3))]);
    }
}
