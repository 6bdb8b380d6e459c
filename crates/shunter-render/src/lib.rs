#![forbid(unsafe_code)]

//! Railroad / syntax diagram layout engine with SVG and character-grid
//! back-ends.
//!
//! Rendering is a pure function of the input tree and the settings record:
//! no globals, no I/O, byte-identical output across runs. The pipeline is
//! shared by both back-ends; only emission dispatches on the surface.
//!
//! ```
//! use shunter_core::{optional, sequence};
//! use shunter_render::{TextRenderSettings, render_text};
//!
//! let tree = sequence([optional("DISTINCT"), "expr".into()]);
//! let drawing = render_text(&tree, &TextRenderSettings::default()).unwrap();
//! assert!(drawing.contains("DISTINCT"));
//! ```

pub mod geom;
pub mod settings;

mod backend;
mod layout;
mod surface;

use shunter_core::Element;
pub use shunter_core::{Error, Result};

pub use settings::{
    ArrowStyle, CssStyle, EndClass, SvgRenderSettings, TextRenderSettings, default_css,
};

use crate::backend::svg::SvgSurface;
use crate::backend::text::TextSurface;
use crate::layout::emit::{Cursor, emit};
use crate::layout::profile::Profile;

/// Renders a diagram as a complete SVG document.
pub fn render_svg(element: &Element, settings: &SvgRenderSettings) -> Result<String> {
    let profile = Profile::from_svg(settings);
    let tree = layout::build(element, &profile)?;

    let width = settings.padding[3] + tree.m.width + settings.padding[1];
    let height =
        settings.padding[0] + tree.m.up + tree.m.height + tree.m.down + settings.padding[2];
    let mut surface = SvgSurface::new(width, height, settings);

    let entry_x = if profile.reverse {
        settings.padding[3] + tree.m.width
    } else {
        settings.padding[3]
    };
    emit(
        &tree,
        &profile,
        &mut surface,
        Cursor::new(
            entry_x,
            settings.padding[0] + tree.m.up,
            if profile.reverse { -1.0 } else { 1.0 },
        ),
    );
    Ok(surface.finish())
}

/// Renders a diagram as a character grid, rows joined by newlines.
pub fn render_text(element: &Element, settings: &TextRenderSettings) -> Result<String> {
    let profile = Profile::from_text(settings);
    let tree = layout::build(element, &profile)?;

    let cols = (settings.padding[3] + tree.m.width + settings.padding[1]).ceil() as usize;
    // the bottom extent is an inclusive row on the grid
    let rows = (settings.padding[0] + tree.m.up + tree.m.height + tree.m.down
        + settings.padding[2])
        .ceil() as usize
        + 1;
    let mut surface = TextSurface::new(cols, rows, settings.end_class, settings.debug);

    let entry_x = if profile.reverse {
        settings.padding[3] + tree.m.width
    } else {
        settings.padding[3]
    };
    emit(
        &tree,
        &profile,
        &mut surface,
        Cursor::new(
            entry_x,
            settings.padding[0] + tree.m.up,
            if profile.reverse { -1.0 } else { 1.0 },
        ),
    );
    Ok(surface.finish())
}

/// Renders a data-literal diagram description as SVG.
pub fn render_svg_value(value: &serde_json::Value, settings: &SvgRenderSettings) -> Result<String> {
    render_svg(&shunter_core::load::from_value(value)?, settings)
}

/// Renders a data-literal diagram description as a character grid.
pub fn render_text_value(
    value: &serde_json::Value,
    settings: &TextRenderSettings,
) -> Result<String> {
    render_text(&shunter_core::load::from_value(value)?, settings)
}
