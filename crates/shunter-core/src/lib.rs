#![forbid(unsafe_code)]

//! Combinator tree, loader, and embedder services for railroad diagrams.
//!
//! Design goals:
//! - rendering is a pure function of the input tree and settings
//! - deterministic, testable outputs (byte-stable SVG and grid strings)
//! - embedder hooks (text measurement, hyperlink resolution) are injected
//!   capabilities, never globals
//!
//! The layout engine itself lives in `shunter-render`; this crate owns the
//! public node algebra ([`Element`]), the data-literal loader ([`load`]),
//! and the error surface shared by both.

pub mod element;
pub mod error;
pub mod load;
pub mod measure;
pub mod resolver;

pub use element::{
    Element, LineBreak, LineBreaks, NodeKind, TextNode, barrier, choice, comment, group,
    no_break, non_terminal, one_or_more, optional, sequence, skip, stack, terminal,
    zero_or_more,
};
pub use error::{EmbedderError, Error, PathSegment, Result, TreePath};
pub use measure::{
    CellTextMeasure, GlyphTableTextMeasure, SimpleTextMeasure, TextMeasure, TextMetrics,
};
pub use resolver::{DefaultHrefResolver, HrefResolver, ResolvedRef};

#[cfg(test)]
mod tests;
