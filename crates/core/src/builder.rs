//! Text run and block builders.
//!
//! Builders walk the element tree depth-first in document order. Only the
//! root-level elements of a page are handed to [`BlockBuilder::build_block`];
//! anything below is reached through the builders' own recursion.

use thiserror::Error;

use crate::classify::{NodeKind, classify};
use crate::config::{ConvertConfig, InlineMode, UnknownElements};
use crate::model::Node;
use crate::parse::{Child, Element};
use crate::style::{extract_block_attrs, extract_marks};

/// Raised when element nesting exceeds the configured limit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("element nesting exceeds {limit} levels")]
pub struct NestingTooDeep {
    pub limit: usize,
}

/// Converts the text content of an element into at most one text node.
///
/// Whitespace-only content produces nothing. Otherwise the node keeps the
/// untrimmed text and carries the marks derived from this element.
pub fn build_text_run(element: &Element<'_>) -> Option<Node> {
    let text = element.text();
    if text.trim().is_empty() {
        return None;
    }

    let marks = extract_marks(element);
    Some(Node::text(text, marks))
}

/// Assembles block nodes according to the conversion policies.
#[derive(Debug, Clone, Copy)]
pub struct BlockBuilder {
    unknown_elements: UnknownElements,
    inline_mode: InlineMode,
    max_depth: usize,
}

impl BlockBuilder {
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            unknown_elements: config.unknown_elements,
            inline_mode: config.inline_mode,
            max_depth: config.max_depth,
        }
    }

    /// Builds the block sequence for a page's root-level elements.
    ///
    /// # Errors
    ///
    /// [`NestingTooDeep`] when descending into unsupported elements goes
    /// deeper than the configured limit.
    pub fn build_blocks(&self, roots: &[Element<'_>]) -> Result<Vec<Node>, NestingTooDeep> {
        let mut blocks = Vec::with_capacity(roots.len());
        for root in roots {
            blocks.extend(self.build_block(root, 0)?);
        }
        Ok(blocks)
    }

    /// Builds the nodes for one element.
    ///
    /// A representable element yields exactly one node. An unrepresentable one
    /// yields nothing, or the blocks of its children under
    /// [`UnknownElements::Descend`].
    pub fn build_block(&self, element: &Element<'_>, depth: usize) -> Result<Vec<Node>, NestingTooDeep> {
        if depth > self.max_depth {
            return Err(NestingTooDeep { limit: self.max_depth });
        }

        let node = match classify(element) {
            Some(NodeKind::Paragraph) => self.build_paragraph(element),
            Some(NodeKind::Heading(level)) => self.build_heading(element, level),
            Some(NodeKind::BulletList) => self.build_list(element, false),
            Some(NodeKind::OrderedList) => self.build_list(element, true),
            Some(NodeKind::ListItem) => self.build_list_item(element),
            Some(NodeKind::HardBreak) => Node::HardBreak,
            None => return self.build_unknown(element, depth),
        };

        Ok(vec![node])
    }

    fn build_unknown(&self, element: &Element<'_>, depth: usize) -> Result<Vec<Node>, NestingTooDeep> {
        match self.unknown_elements {
            UnknownElements::Drop => Ok(Vec::new()),
            UnknownElements::Descend => {
                let mut blocks = Vec::new();
                for child in element.child_elements() {
                    blocks.extend(self.build_block(&child, depth + 1)?);
                }
                Ok(blocks)
            }
        }
    }

    pub fn build_paragraph(&self, element: &Element<'_>) -> Node {
        let attrs = extract_block_attrs(element);
        Node::paragraph(attrs, self.inline_content(element))
    }

    /// Builds a heading; `level` comes from the tag suffix.
    pub fn build_heading(&self, element: &Element<'_>, level: u8) -> Node {
        let attrs = extract_block_attrs(element);
        Node::heading(level, attrs, self.inline_content(element))
    }

    /// Builds a bullet or ordered list from its direct `li` children.
    pub fn build_list(&self, element: &Element<'_>, ordered: bool) -> Node {
        let content = element
            .child_elements_named("li")
            .map(|li| self.build_list_item(&li))
            .collect();

        if ordered { Node::OrderedList { content } } else { Node::BulletList { content } }
    }

    /// Builds a list item around one synthetic paragraph. The item's own
    /// style is not read.
    pub fn build_list_item(&self, element: &Element<'_>) -> Node {
        Node::list_item(self.inline_content(element))
    }

    /// Collects the inline nodes of a paragraph, heading or list item.
    pub fn inline_content(&self, element: &Element<'_>) -> Vec<Node> {
        match self.inline_mode {
            InlineMode::Spans => span_runs(element),
            InlineMode::AllChildren => child_runs(element),
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new(&ConvertConfig::default())
    }
}

fn span_runs(element: &Element<'_>) -> Vec<Node> {
    let spans: Vec<Element<'_>> = element.child_elements_named("span").collect();
    if spans.is_empty() {
        return build_text_run(element).into_iter().collect();
    }

    spans.iter().filter_map(build_text_run).collect()
}

fn child_runs(element: &Element<'_>) -> Vec<Node> {
    element
        .children()
        .filter_map(|child| match child {
            Child::Text(text) if text.trim().is_empty() => None,
            Child::Text(text) => Some(Node::text(text, Vec::new())),
            Child::Element(el) if el.tag_name() == "br" => Some(Node::HardBreak),
            Child::Element(el) => build_text_run(&el),
        })
        .collect()
}
