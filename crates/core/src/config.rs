//! Conversion configuration.
//!
//! # Example
//!
//! ```rust
//! use quire_core::{ConvertConfig, InlineMode, UnknownElements};
//!
//! let config = ConvertConfig::builder()
//!     .parallel(false)
//!     .unknown_elements(UnknownElements::Descend)
//!     .inline_mode(InlineMode::AllChildren)
//!     .build();
//!
//! assert_eq!(config.extension, "html");
//! ```

/// What to do with an element the classifier cannot represent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownElements {
    /// Drop the element and its whole subtree.
    #[default]
    Drop,
    /// Drop the element itself but convert its child elements in place.
    Descend,
}

/// How the inline content of a paragraph, heading or list item is collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InlineMode {
    /// One run per direct `span` child, or a single run over the whole element
    /// when it has none. Bare text next to spans is not emitted.
    #[default]
    Spans,
    /// One run per direct child: text nodes, elements, and `br` as hard breaks.
    AllChildren,
}

/// Configuration for converting a batch of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// File extension of page files, compared case-insensitively (default: "html").
    pub extension: String,

    /// Convert pages on the rayon thread pool (default: true).
    pub parallel: bool,

    /// Pretty-print the JSON output (default: true).
    pub pretty: bool,

    /// Policy for unrepresentable elements (default: drop).
    pub unknown_elements: UnknownElements,

    /// Inline content collection (default: spans).
    pub inline_mode: InlineMode,

    /// Maximum element nesting the builders follow before failing the page (default: 256).
    pub max_depth: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            extension: "html".to_string(),
            parallel: true,
            pretty: true,
            unknown_elements: UnknownElements::default(),
            inline_mode: InlineMode::default(),
            max_depth: 256,
        }
    }
}

impl ConvertConfig {
    /// Creates a new builder for ConvertConfig.
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder::new()
    }
}

/// Builder for ConvertConfig.
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ConvertConfig::default() }
    }

    /// Sets the page file extension, with or without a leading dot.
    pub fn extension(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.config.extension = value.trim_start_matches('.').to_string();
        self
    }

    /// Sets whether pages are converted in parallel.
    pub fn parallel(mut self, value: bool) -> Self {
        self.config.parallel = value;
        self
    }

    /// Sets whether the JSON output is pretty-printed.
    pub fn pretty(mut self, value: bool) -> Self {
        self.config.pretty = value;
        self
    }

    /// Sets the policy for unrepresentable elements.
    pub fn unknown_elements(mut self, value: UnknownElements) -> Self {
        self.config.unknown_elements = value;
        self
    }

    /// Sets the inline content mode.
    pub fn inline_mode(mut self, value: InlineMode) -> Self {
        self.config.inline_mode = value;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.config.max_depth = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ConvertConfig {
        self.config
    }
}

impl Default for ConvertConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
