//! Canonical layout tree.
//!
//! Lowering reduces the ten public combinators to the variants below, so the
//! later passes dispatch over one small set. Each node carries a transient
//! [`Metrics`] record that is owned by the render call and discarded when it
//! returns.

use shunter_core::NodeKind;

/// Layout record of a node.
///
/// `up` is the extent above the entry line, `down` the extent below the exit
/// line, and `height` the offset of the exit line below the entry line
/// (nonzero only for stack-shaped nodes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Metrics {
    pub width: f64,
    pub up: f64,
    pub down: f64,
    pub height: f64,
}

/// Which side of the main line a bypass rail sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Top,
    Bottom,
}

/// Join kind between two sequence children, after linebreak normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Join {
    Hard,
    Soft,
    Default,
    NoBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerRole {
    Start,
    End,
}

/// A text node with its hyperlink already resolved.
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: NodeKind,
    pub text: String,
    pub href: Option<String>,
    pub title: Option<String>,
    pub css_class: Option<String>,
    /// Filled in by the measurement pass.
    pub text_height: f64,
}

/// A group caption with its hyperlink already resolved.
#[derive(Debug, Clone)]
pub(crate) struct Caption {
    pub text: String,
    pub href: Option<String>,
    pub title: Option<String>,
    /// Filled in by the measurement pass.
    pub width: f64,
    pub height: f64,
}

#[derive(Debug)]
pub(crate) struct LayoutNode {
    pub kind: Kind,
    pub m: Metrics,
}

impl LayoutNode {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            m: Metrics::default(),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    /// A bare horizontal line; drawn entirely by the surrounding combinator.
    Skip,
    Token(Token),
    Seq {
        children: Vec<LayoutNode>,
        /// One join per adjacent pair; length is `children.len() - 1`
        /// (empty for fewer than two children).
        joins: Vec<Join>,
    },
    Stack {
        rows: Vec<LayoutNode>,
        /// Entry-line drop between consecutive rows; filled by measurement.
        drops: Vec<f64>,
    },
    Choice {
        children: Vec<LayoutNode>,
        default: usize,
        /// Entry-line offset of each alternative relative to the choice
        /// entry line; filled by measurement. `offsets[default] == 0`.
        offsets: Vec<f64>,
    },
    /// A one-or-more loop: forward body plus a return line carrying the
    /// separator.
    Loop {
        body: Box<LayoutNode>,
        repeat: Box<LayoutNode>,
        repeat_top: bool,
        /// Return-line offset relative to the loop entry line; filled by
        /// measurement.
        rail_y: f64,
    },
    /// A fused skip rail spanning several bypassed bodies; produced by the
    /// optimization pass, never by lowering.
    Bypass {
        children: Vec<LayoutNode>,
        side: Side,
        /// Rail offset relative to the entry line; filled by measurement.
        rail_y: f64,
    },
    Barrier {
        child: Box<LayoutNode>,
    },
    Group {
        child: Box<LayoutNode>,
        caption: Option<Caption>,
        css_class: Option<String>,
    },
    Marker {
        role: MarkerRole,
    },
}

/// True if the subtree contains a choice-shaped construct; used to pick the
/// `_outer` vertical choice separation.
pub(crate) fn contains_choices(node: &LayoutNode) -> bool {
    match &node.kind {
        Kind::Skip | Kind::Token(_) | Kind::Marker { .. } => false,
        Kind::Seq { children, .. } => children.iter().any(contains_choices),
        Kind::Stack { rows, .. } => rows.iter().any(contains_choices),
        Kind::Choice { .. } | Kind::Loop { .. } | Kind::Bypass { .. } => true,
        Kind::Barrier { child } | Kind::Group { child, .. } => contains_choices(child),
    }
}
