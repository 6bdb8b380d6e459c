//! Hyperlink resolution.
//!
//! Embedders can pre-process all hyperlinks (and node texts) by supplying an
//! [`HrefResolver`]; documentation generators typically map rule names to
//! anchor URLs here. The default implementation passes everything through.

use crate::element::NodeKind;
use crate::error::EmbedderError;

/// Resolved presentation of a text node: possibly rewritten text, hyperlink
/// and hover title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub text: String,
    pub href: Option<String>,
    pub title: Option<String>,
}

/// An interface that allows pre-processing all hyperlinks in nodes.
///
/// Called once per text node during layout; must not mutate the input tree
/// and must be confined to the rendering thread.
pub trait HrefResolver {
    fn resolve(
        &self,
        kind: NodeKind,
        text: &str,
        href: Option<&str>,
        title: Option<&str>,
        resolver_data: Option<&serde_json::Value>,
    ) -> Result<ResolvedRef, EmbedderError> {
        let _ = (kind, resolver_data);
        Ok(ResolvedRef {
            text: text.to_string(),
            href: href.map(str::to_string),
            title: title.map(str::to_string),
        })
    }
}

/// The passthrough resolver used when the embedder doesn't supply one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHrefResolver;

impl HrefResolver for DefaultHrefResolver {}
