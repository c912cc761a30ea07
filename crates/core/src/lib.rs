//! Conversion of HTML pages into a typed rich-text document model.
//!
//! A page's root-level elements are classified by tag, styled from their
//! inline `style` attribute, and assembled into a `doc` node wrapped in a
//! [`PageRecord`]. Batches isolate per-page failures.

pub mod assemble;
pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parse;
#[cfg(feature = "remote")]
pub mod remote;
pub mod slug;
pub mod source;
pub mod style;

pub use assemble::{ConversionReport, PageFailure, PageSource, convert_all, convert_page};
pub use builder::{BlockBuilder, NestingTooDeep, build_text_run};
pub use classify::{NodeKind, classify};
pub use config::{ConvertConfig, ConvertConfigBuilder, InlineMode, UnknownElements};
pub use error::{QuireError, Result};
pub use model::{BlockAttrs, HeadingAttrs, Mark, Node, PageRecord, TextStyleAttrs};
pub use output::{read_json, to_json, write_json};
pub use parse::{Document, Element};
#[cfg(feature = "remote")]
pub use remote::{ExportClient, ExportSummary, RemoteConfig};
pub use slug::slugify;
pub use source::{LoadedPages, convert_dir, load_pages, read_page};
pub use style::{InlineStyle, extract_block_attrs, extract_marks};
