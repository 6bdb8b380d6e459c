//! The metric profile: unit-size constants plus injected services, shared by
//! every pass. Built once per render call from the back-end's settings.

use std::sync::Arc;

use shunter_core::{CellTextMeasure, HrefResolver, NodeKind, TextMeasure};

use crate::settings::{SvgRenderSettings, TextRenderSettings};

#[derive(Clone)]
pub(crate) struct TokenStyle {
    pub measure: Arc<dyn TextMeasure + Send + Sync>,
    pub horizontal_padding: f64,
    pub vertical_padding: f64,
    pub radius: f64,
}

#[derive(Clone)]
pub(crate) struct GroupStyle {
    pub measure: Arc<dyn TextMeasure + Send + Sync>,
    pub vertical_padding: f64,
    pub horizontal_padding: f64,
    pub vertical_margin: f64,
    pub horizontal_margin: f64,
    /// Border thickness in layout units; one cell on the grid, zero for SVG
    /// where the stroke does not consume layout space.
    pub thickness: f64,
    pub radius: f64,
    pub text_vertical_offset: f64,
    pub text_horizontal_offset: f64,
}

#[derive(Clone)]
pub(crate) struct Profile {
    pub horizontal_seq_separation: f64,
    pub vertical_choice_separation: f64,
    pub vertical_choice_separation_outer: f64,
    pub vertical_seq_separation: f64,
    pub vertical_seq_separation_outer: f64,
    pub arc_radius: f64,
    pub arc_margin: f64,
    /// Advisory wrap width, outer padding already subtracted.
    pub max_width: f64,
    pub terminal: TokenStyle,
    pub non_terminal: TokenStyle,
    pub comment: TokenStyle,
    pub group: GroupStyle,
    pub marker_width: f64,
    pub marker_projected_height: f64,
    pub reverse: bool,
    pub debug: bool,
    /// Minimal segment length that gets a direction arrow.
    pub arrow_min_run: f64,
    /// Snap mid-line coordinates to whole units (the character grid).
    pub integral: bool,
    pub resolver: Arc<dyn HrefResolver + Send + Sync>,
}

impl Profile {
    /// Horizontal footprint of a quarter-turn pair.
    pub fn arc_span(&self) -> f64 {
        (2.0 * self.arc_radius).ceil()
    }

    pub fn token_style(&self, kind: NodeKind) -> &TokenStyle {
        match kind {
            NodeKind::Terminal => &self.terminal,
            NodeKind::NonTerminal => &self.non_terminal,
            NodeKind::Comment => &self.comment,
        }
    }

    /// Snaps a derived coordinate (e.g. a return-rail midpoint) to the
    /// profile's native unit.
    pub fn snap(&self, v: f64) -> f64 {
        if self.integral { v.floor() } else { v }
    }

    pub fn from_svg(settings: &SvgRenderSettings) -> Self {
        Self {
            horizontal_seq_separation: settings.horizontal_seq_separation,
            vertical_choice_separation: settings.vertical_choice_separation,
            vertical_choice_separation_outer: settings.vertical_choice_separation_outer,
            vertical_seq_separation: settings.vertical_seq_separation,
            vertical_seq_separation_outer: settings.vertical_seq_separation_outer,
            arc_radius: settings.arc_radius,
            arc_margin: settings.arc_margin,
            max_width: (settings.max_width - settings.padding[1] - settings.padding[3]).max(0.0),
            terminal: TokenStyle {
                measure: Arc::clone(&settings.terminal_text_measure),
                horizontal_padding: settings.terminal_horizontal_padding,
                vertical_padding: settings.terminal_vertical_padding,
                radius: settings.terminal_radius,
            },
            non_terminal: TokenStyle {
                measure: Arc::clone(&settings.non_terminal_text_measure),
                horizontal_padding: settings.non_terminal_horizontal_padding,
                vertical_padding: settings.non_terminal_vertical_padding,
                radius: settings.non_terminal_radius,
            },
            comment: TokenStyle {
                measure: Arc::clone(&settings.comment_text_measure),
                horizontal_padding: settings.comment_horizontal_padding,
                vertical_padding: settings.comment_vertical_padding,
                radius: settings.comment_radius,
            },
            group: GroupStyle {
                measure: Arc::clone(&settings.group_text_measure),
                vertical_padding: settings.group_vertical_padding,
                horizontal_padding: settings.group_horizontal_padding,
                vertical_margin: settings.group_vertical_margin,
                horizontal_margin: settings.group_horizontal_margin,
                thickness: 0.0,
                radius: settings.group_radius,
                text_vertical_offset: settings.group_text_vertical_offset,
                text_horizontal_offset: settings.group_text_horizontal_offset,
            },
            marker_width: 20.0,
            marker_projected_height: 10.0,
            reverse: settings.reverse,
            debug: settings.debug,
            arrow_min_run: settings.arrow_length * 2.0,
            integral: false,
            resolver: Arc::clone(&settings.href_resolver),
        }
    }

    pub fn from_text(settings: &TextRenderSettings) -> Self {
        let cell: Arc<dyn TextMeasure + Send + Sync> = Arc::new(CellTextMeasure);
        let token = |horizontal_padding: f64| TokenStyle {
            measure: Arc::clone(&cell),
            horizontal_padding,
            vertical_padding: 0.0,
            radius: 0.0,
        };
        Self {
            horizontal_seq_separation: settings.horizontal_seq_separation,
            vertical_choice_separation: settings.vertical_choice_separation,
            vertical_choice_separation_outer: settings.vertical_choice_separation_outer,
            vertical_seq_separation: settings.vertical_seq_separation,
            vertical_seq_separation_outer: settings.vertical_seq_separation_outer,
            arc_radius: 0.5,
            arc_margin: 1.0,
            max_width: (settings.max_width - settings.padding[1] - settings.padding[3]).max(0.0),
            terminal: token(2.0),
            non_terminal: token(2.0),
            comment: token(2.0),
            group: GroupStyle {
                measure: Arc::clone(&cell),
                vertical_padding: settings.group_vertical_padding,
                horizontal_padding: settings.group_horizontal_padding,
                vertical_margin: settings.group_vertical_margin,
                horizontal_margin: settings.group_horizontal_margin,
                thickness: 1.0,
                radius: 0.0,
                text_vertical_offset: settings.group_text_vertical_offset,
                text_horizontal_offset: settings.group_text_horizontal_offset,
            },
            marker_width: 4.0,
            marker_projected_height: 0.0,
            reverse: settings.reverse,
            debug: settings.debug,
            arrow_min_run: 4.0,
            integral: true,
            resolver: Arc::clone(&settings.href_resolver),
        }
    }
}
