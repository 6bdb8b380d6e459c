//! Rendering settings for both back-ends.
//!
//! Field sets and defaults mirror the reference profile: SVG geometry is in
//! pixels, character-grid geometry in cells. Everything is optional with a
//! named default, so `SvgRenderSettings::default()` produces a usable
//! diagram out of the box.

use std::sync::Arc;

use indexmap::IndexMap;
use shunter_core::{DefaultHrefResolver, HrefResolver, SimpleTextMeasure, TextMeasure};

/// Controls how diagram start and end markers look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndClass {
    /// A simple `T`-shaped ending.
    Simple,
    /// A `T`-shaped ending with the vertical line doubled.
    Complex,
}

/// Arrow-head shapes for SVG diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowStyle {
    /// Arrows are not rendered.
    None,
    /// Simple triangle arrows.
    Triangle,
    /// Pointier triangle arrows.
    Stealth,
    /// An arrow that consists of two lines.
    Barb,
    /// Half of a triangle arrow.
    Harpoon,
    /// The other half of a triangle arrow.
    HarpoonUp,
}

/// CSS embedded into the SVG document.
#[derive(Debug, Clone, PartialEq)]
pub enum CssStyle {
    /// An ordered rule map, flattened into a `<style>` element.
    Rules(IndexMap<String, IndexMap<String, String>>),
    /// A raw stylesheet string, embedded as-is.
    Raw(String),
}

/// The stylesheet embedded by default: monospace bold labels, round line
/// caps, muted group captions.
pub fn default_css() -> IndexMap<String, IndexMap<String, String>> {
    fn rule(decls: &[(&str, &str)]) -> IndexMap<String, String> {
        decls
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    let mut css = IndexMap::new();
    css.insert(
        "path".to_string(),
        rule(&[
            ("stroke-width", "1.5"),
            ("stroke", "black"),
            ("fill", "none"),
            ("stroke-linecap", "round"),
        ]),
    );
    css.insert(
        ".arrow".to_string(),
        rule(&[("stroke", "none"), ("fill", "black")]),
    );
    css.insert(
        ".arrow.arrow-barb".to_string(),
        rule(&[("stroke", "black"), ("fill", "none")]),
    );
    css.insert("a".to_string(), rule(&[("text-decoration", "none")]));
    css.insert(
        "rect".to_string(),
        rule(&[
            ("stroke-width", "1.5"),
            ("stroke", "black"),
            ("fill", "none"),
        ]),
    );
    css.insert("g.comment rect".to_string(), rule(&[("stroke", "none")]));
    css.insert(
        "text".to_string(),
        rule(&[
            ("font-family", "Consolas, Menlo, monospace"),
            ("text-anchor", "middle"),
            ("font-weight", "bold"),
        ]),
    );
    css.insert(
        "tspan".to_string(),
        rule(&[("font-family", "Consolas, Menlo, monospace")]),
    );
    css.insert(
        ".group text".to_string(),
        rule(&[
            ("text-anchor", "start"),
            ("opacity", "0.5"),
            ("font-weight", "normal"),
            ("font-style", "italic"),
        ]),
    );
    css.insert(".group rect".to_string(), rule(&[("opacity", "0.3")]));
    css.insert(
        "g.comment text".to_string(),
        rule(&[("font-weight", "normal"), ("font-style", "italic")]),
    );
    css
}

/// Settings for the SVG rendering engine.
#[derive(Clone)]
pub struct SvgRenderSettings {
    /// Top, right, bottom and left padding between the diagram and its
    /// container.
    pub padding: [f64; 4],
    /// Text for the `<title>` element and `aria-label` attribute.
    pub title: Option<String>,
    /// Text for the `<desc>` element.
    pub description: Option<String>,
    /// Vertical space between choice alternatives when one of them contains
    /// another choice block.
    pub vertical_choice_separation_outer: f64,
    /// Vertical space between choice alternatives.
    pub vertical_choice_separation: f64,
    /// Vertical space between stack rows outside of any choice block.
    pub vertical_seq_separation_outer: f64,
    /// Vertical space between stack rows.
    pub vertical_seq_separation: f64,
    /// Horizontal space between adjacent nodes.
    pub horizontal_seq_separation: f64,
    pub end_class: EndClass,
    pub arrow_style: ArrowStyle,
    /// Length of an arrow along its line.
    pub arrow_length: f64,
    /// Length of an arrow across its line.
    pub arrow_cross_length: f64,
    /// Advisory width after which sequences wrap. There is no guarantee the
    /// diagram fits.
    pub max_width: f64,
    /// Arc radius of railroads.
    pub arc_radius: f64,
    /// Margin around arcs.
    pub arc_margin: f64,
    pub terminal_text_measure: Arc<dyn TextMeasure + Send + Sync>,
    pub terminal_horizontal_padding: f64,
    pub terminal_vertical_padding: f64,
    pub terminal_radius: f64,
    pub non_terminal_text_measure: Arc<dyn TextMeasure + Send + Sync>,
    pub non_terminal_horizontal_padding: f64,
    pub non_terminal_vertical_padding: f64,
    pub non_terminal_radius: f64,
    pub comment_text_measure: Arc<dyn TextMeasure + Send + Sync>,
    pub comment_horizontal_padding: f64,
    pub comment_vertical_padding: f64,
    pub comment_radius: f64,
    pub group_text_measure: Arc<dyn TextMeasure + Send + Sync>,
    pub group_vertical_padding: f64,
    pub group_horizontal_padding: f64,
    pub group_vertical_margin: f64,
    pub group_horizontal_margin: f64,
    pub group_radius: f64,
    /// Offset from the group rectangle to its caption.
    pub group_text_vertical_offset: f64,
    pub group_text_horizontal_offset: f64,
    /// Class attribute for the `<svg>` element.
    pub css_class: String,
    /// Stylesheet embedded into the diagram; `None` embeds nothing.
    pub css_style: Option<CssStyle>,
    /// Renders the diagram right-to-left.
    pub reverse: bool,
    /// Tags every emitted node group with a stable `data-dbg-id`.
    pub debug: bool,
    pub href_resolver: Arc<dyn HrefResolver + Send + Sync>,
}

impl Default for SvgRenderSettings {
    fn default() -> Self {
        let measure: Arc<dyn TextMeasure + Send + Sync> = Arc::new(SimpleTextMeasure::menlo_14());
        Self {
            padding: [1.0, 1.0, 1.0, 1.0],
            title: None,
            description: None,
            vertical_choice_separation_outer: 9.0,
            vertical_choice_separation: 9.0,
            vertical_seq_separation_outer: 18.0,
            vertical_seq_separation: 18.0,
            horizontal_seq_separation: 10.0,
            end_class: EndClass::Complex,
            arrow_style: ArrowStyle::None,
            arrow_length: 10.0,
            arrow_cross_length: 4.0,
            max_width: 600.0,
            arc_radius: 10.0,
            arc_margin: 5.0,
            terminal_text_measure: Arc::clone(&measure),
            terminal_horizontal_padding: 10.0,
            terminal_vertical_padding: 3.0,
            terminal_radius: 10.0,
            non_terminal_text_measure: Arc::clone(&measure),
            non_terminal_horizontal_padding: 10.0,
            non_terminal_vertical_padding: 3.0,
            non_terminal_radius: 0.0,
            comment_text_measure: Arc::clone(&measure),
            comment_horizontal_padding: 3.0,
            comment_vertical_padding: 3.0,
            comment_radius: 0.0,
            group_text_measure: measure,
            group_vertical_padding: 10.0,
            group_horizontal_padding: 10.0,
            group_vertical_margin: 5.0,
            group_horizontal_margin: 10.0,
            group_radius: 0.0,
            group_text_vertical_offset: 0.0,
            group_text_horizontal_offset: 10.0,
            css_class: String::new(),
            css_style: Some(CssStyle::Rules(default_css())),
            reverse: false,
            debug: false,
            href_resolver: Arc::new(DefaultHrefResolver),
        }
    }
}

impl std::fmt::Debug for SvgRenderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRenderSettings")
            .field("max_width", &self.max_width)
            .field("end_class", &self.end_class)
            .field("arrow_style", &self.arrow_style)
            .field("reverse", &self.reverse)
            .finish_non_exhaustive()
    }
}

/// Settings for the character-grid rendering engine. All units are cells.
#[derive(Clone)]
pub struct TextRenderSettings {
    /// Top, right, bottom and left padding between the diagram and its
    /// container.
    pub padding: [f64; 4],
    pub vertical_choice_separation_outer: f64,
    pub vertical_choice_separation: f64,
    pub vertical_seq_separation_outer: f64,
    pub vertical_seq_separation: f64,
    pub horizontal_seq_separation: f64,
    pub group_vertical_padding: f64,
    pub group_horizontal_padding: f64,
    pub group_vertical_margin: f64,
    pub group_horizontal_margin: f64,
    pub group_text_vertical_offset: f64,
    pub group_text_horizontal_offset: f64,
    pub end_class: EndClass,
    /// Advisory width after which sequences wrap.
    pub max_width: f64,
    /// Renders the diagram right-to-left.
    pub reverse: bool,
    /// Appends a footer listing emitted node groups with stable ids.
    pub debug: bool,
    pub href_resolver: Arc<dyn HrefResolver + Send + Sync>,
}

impl Default for TextRenderSettings {
    fn default() -> Self {
        Self {
            padding: [0.0, 0.0, 0.0, 0.0],
            vertical_choice_separation_outer: 1.0,
            vertical_choice_separation: 1.0,
            vertical_seq_separation_outer: 1.0,
            vertical_seq_separation: 1.0,
            horizontal_seq_separation: 2.0,
            group_vertical_padding: 1.0,
            group_horizontal_padding: 2.0,
            group_vertical_margin: 0.0,
            group_horizontal_margin: 2.0,
            group_text_vertical_offset: -1.0,
            group_text_horizontal_offset: 2.0,
            end_class: EndClass::Complex,
            max_width: 80.0,
            reverse: false,
            debug: false,
            href_resolver: Arc::new(DefaultHrefResolver),
        }
    }
}

impl std::fmt::Debug for TextRenderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderSettings")
            .field("max_width", &self.max_width)
            .field("end_class", &self.end_class)
            .field("reverse", &self.reverse)
            .finish_non_exhaustive()
    }
}
