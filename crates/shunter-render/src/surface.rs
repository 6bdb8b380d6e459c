//! The drawing-surface abstraction shared by both back-ends.
//!
//! The emission pass produces segments, quarter-turn corners, boxes and
//! markers; a [`Surface`] realizes them. Corners are identified by their
//! logical corner point (where the two tangent lines would meet) plus the
//! travel headings, which maps to a single quarter-circle path segment on
//! the SVG canvas and to a single rounded glyph on the character grid.

use shunter_core::NodeKind;

/// Horizontal travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HDir {
    East,
    West,
}

/// Vertical travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VDir {
    Up,
    Down,
}

/// A quarter turn, named by incoming and outgoing travel headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Turn {
    EastToSouth,
    EastToNorth,
    WestToSouth,
    WestToNorth,
    SouthToEast,
    SouthToWest,
    NorthToEast,
    NorthToWest,
}

pub(crate) struct NodeBoxSpec<'a> {
    pub kind: NodeKind,
    /// Top-left corner of the box.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    /// Y of the main line through the box.
    pub line_y: f64,
    /// X of the text anchor (box center).
    pub center_x: f64,
    /// Absolute text baseline for vector output.
    pub baseline: f64,
    pub horizontal_padding: f64,
    pub text: &'a str,
    pub href: Option<&'a str>,
    pub title: Option<&'a str>,
    pub css_class: Option<&'a str>,
}

pub(crate) struct CaptionSpec<'a> {
    /// Left edge of the caption text.
    pub x: f64,
    /// Top of the caption band.
    pub top: f64,
    pub ascent: f64,
    pub text: &'a str,
    pub width: f64,
    pub href: Option<&'a str>,
    pub title: Option<&'a str>,
}

pub(crate) struct GroupBoxSpec<'a> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub caption: Option<CaptionSpec<'a>>,
    pub css_class: Option<&'a str>,
}

pub(crate) trait Surface {
    fn hseg(&mut self, x1: f64, x2: f64, y: f64);
    fn vseg(&mut self, x: f64, y1: f64, y2: f64);
    fn corner(&mut self, x: f64, y: f64, turn: Turn);
    /// A direction arrow on a horizontal run; tip at `(x, y)`.
    fn arrow_h(&mut self, x: f64, y: f64, toward: HDir);
    /// A direction arrow on a vertical run; tip at `(x, y)`.
    fn arrow_v(&mut self, x: f64, y: f64, toward: VDir);
    fn node_box(&mut self, spec: &NodeBoxSpec<'_>);
    fn group_box(&mut self, spec: &GroupBoxSpec<'_>);
    /// A diagram start/end marker; `left_shape` picks the opening variant.
    fn marker(&mut self, x: f64, y: f64, left_shape: bool, width: f64, projected: f64);
    /// Opens a structural group for the node being emitted. `debug_id` is
    /// empty unless debug output was requested.
    fn push_group(&mut self, label: &'static str, debug_id: &str);
    fn pop_group(&mut self);
}
