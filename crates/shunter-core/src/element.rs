//! The public combinator algebra.
//!
//! A diagram is a tree of [`Element`] values. Strings, lists and `None`
//! shorthands from the data-literal form have typed counterparts here via
//! `From` impls, so embedders can mix builder calls and plain literals:
//!
//! ```
//! use shunter_core::{optional, sequence, terminal};
//!
//! let tree = sequence([optional("DISTINCT"), terminal("x")]);
//! ```

use serde::{Deserialize, Serialize};

/// Kind of a text node; used to pick per-kind paddings, measures and styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Terminal,
    NonTerminal,
    Comment,
}

/// Payload shared by the three text-node kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    pub href: Option<String>,
    pub title: Option<String>,
    pub css_class: Option<String>,
    /// When `false`, the node is not passed to the `HrefResolver`.
    pub resolve: bool,
    /// Additional data forwarded to the `HrefResolver`.
    pub resolver_data: Option<serde_json::Value>,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
            title: None,
            css_class: None,
            resolve: true,
            resolver_data: None,
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = Some(css_class.into());
        self
    }
}

/// Type of a line break between two sequence items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineBreak {
    /// Always breaks a line in this position.
    Hard,
    /// Breaks a line in this position if the sequence doesn't fit.
    Soft,
    /// Like `Soft` at the top level; never breaks inside choices, loops, or
    /// already wrapped rows.
    Default,
    /// Disables breaking in this position.
    NoBreak,
}

impl LineBreak {
    /// Parses the data-literal spelling (`"HARD"`, `"SOFT"`, ...).
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "HARD" => Some(Self::Hard),
            "SOFT" => Some(Self::Soft),
            "DEFAULT" => Some(Self::Default),
            "NO_BREAK" => Some(Self::NoBreak),
            _ => None,
        }
    }
}

/// Line-break hints of a sequence: absent, one hint for every join, or one
/// hint per join (length must be `items.len() - 1`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum LineBreaks {
    #[default]
    Unspecified,
    Uniform(LineBreak),
    PerJoin(Vec<LineBreak>),
}

/// A node of the diagram tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    /// A bare horizontal line without content.
    Skip,
    /// A literal token, drawn as a rounded box.
    Terminal(TextNode),
    /// A grammar rule reference, drawn as a rectangular box.
    NonTerminal(TextNode),
    /// A low-profile caption box.
    Comment(TextNode),
    /// Horizontal concatenation with per-join break hints.
    Sequence {
        items: Vec<Element>,
        linebreaks: LineBreaks,
    },
    /// A sequence that breaks after every item.
    Stack { items: Vec<Element> },
    /// A sequence that never breaks.
    NoBreak { items: Vec<Element> },
    /// One of several alternatives; `default` sits on the main line.
    Choice { items: Vec<Element>, default: usize },
    /// An element that may be skipped via a bypass rail.
    Optional {
        item: Box<Element>,
        /// When `true`, the element is rendered off the main line.
        skip: bool,
        /// When `true`, the skip rail is rendered below the element.
        skip_bottom: bool,
    },
    /// A repeated element with an optional separator on the return path.
    OneOrMore {
        item: Box<Element>,
        repeat: Option<Box<Element>>,
        /// When `true`, the return line is rendered above the repeated item.
        repeat_top: bool,
    },
    /// An optional repeated element.
    ZeroOrMore {
        item: Box<Element>,
        repeat: Option<Box<Element>>,
        repeat_top: bool,
        skip: bool,
        skip_bottom: bool,
    },
    /// Transparent wrapper that keeps rail-merging optimizations from
    /// crossing into (or out of) its child.
    Barrier(Box<Element>),
    /// A captioned rectangle drawn around its child.
    Group {
        item: Box<Element>,
        text: Option<String>,
        href: Option<String>,
        title: Option<String>,
        css_class: Option<String>,
    },
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Element::Terminal(TextNode::new(text))
    }
}

impl From<String> for Element {
    fn from(text: String) -> Self {
        Element::Terminal(TextNode::new(text))
    }
}

impl From<Vec<Element>> for Element {
    fn from(items: Vec<Element>) -> Self {
        Element::Sequence {
            items,
            linebreaks: LineBreaks::Unspecified,
        }
    }
}

impl From<Option<Element>> for Element {
    fn from(item: Option<Element>) -> Self {
        item.unwrap_or(Element::Skip)
    }
}

/// Creates an element that renders as a single line without content.
pub fn skip() -> Element {
    Element::Skip
}

/// Creates a terminal node.
pub fn terminal(text: impl Into<String>) -> Element {
    Element::Terminal(TextNode::new(text))
}

/// Creates a non-terminal node.
pub fn non_terminal(text: impl Into<String>) -> Element {
    Element::NonTerminal(TextNode::new(text))
}

/// Creates a comment node.
pub fn comment(text: impl Into<String>) -> Element {
    Element::Comment(TextNode::new(text))
}

/// Creates an automatically wrapped sequence of elements.
pub fn sequence<I, E>(items: I) -> Element
where
    I: IntoIterator<Item = E>,
    E: Into<Element>,
{
    Element::Sequence {
        items: items.into_iter().map(Into::into).collect(),
        linebreaks: LineBreaks::Unspecified,
    }
}

/// Creates a sequence of elements that wraps after each element.
pub fn stack<I, E>(items: I) -> Element
where
    I: IntoIterator<Item = E>,
    E: Into<Element>,
{
    Element::Stack {
        items: items.into_iter().map(Into::into).collect(),
    }
}

/// Creates a sequence of elements that doesn't wrap.
pub fn no_break<I, E>(items: I) -> Element
where
    I: IntoIterator<Item = E>,
    E: Into<Element>,
{
    Element::NoBreak {
        items: items.into_iter().map(Into::into).collect(),
    }
}

/// Creates a choice between several elements; `default` is the index of the
/// alternative placed on the main line.
pub fn choice<I, E>(items: I, default: usize) -> Element
where
    I: IntoIterator<Item = E>,
    E: Into<Element>,
{
    Element::Choice {
        items: items.into_iter().map(Into::into).collect(),
        default,
    }
}

/// Creates an optional element with the skip rail above.
pub fn optional(item: impl Into<Element>) -> Element {
    Element::Optional {
        item: Box::new(item.into()),
        skip: false,
        skip_bottom: false,
    }
}

/// Creates a repeated element; `repeat` is placed on the return path.
pub fn one_or_more(item: impl Into<Element>, repeat: Option<Element>) -> Element {
    Element::OneOrMore {
        item: Box::new(item.into()),
        repeat: repeat.map(Box::new),
        repeat_top: false,
    }
}

/// Creates an optional repeated element.
pub fn zero_or_more(item: impl Into<Element>, repeat: Option<Element>) -> Element {
    Element::ZeroOrMore {
        item: Box::new(item.into()),
        repeat: repeat.map(Box::new),
        repeat_top: false,
        skip: false,
        skip_bottom: false,
    }
}

/// Creates a barrier element.
pub fn barrier(item: impl Into<Element>) -> Element {
    Element::Barrier(Box::new(item.into()))
}

/// Creates a group element with an optional caption.
pub fn group(item: impl Into<Element>, text: Option<&str>) -> Element {
    Element::Group {
        item: Box::new(item.into()),
        text: text.map(str::to_string),
        href: None,
        title: None,
        css_class: None,
    }
}
