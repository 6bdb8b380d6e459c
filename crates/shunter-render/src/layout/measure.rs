//! Measurement: one post-order visit computing each node's intrinsic
//! extents and the derived placement offsets (choice lanes, loop rails,
//! stack drops) the emitter reads back.

use shunter_core::{Error, Result, TextMeasure as _};

use crate::layout::profile::Profile;
use crate::layout::tree::{Kind, LayoutNode, Metrics, Side, contains_choices};

/// Measures `node` and its subtree. `outer` is true outside of any choice or
/// loop; it selects the `_outer` vertical separations for stacks.
pub(crate) fn measure(node: &mut LayoutNode, p: &Profile, outer: bool) -> Result<()> {
    match &mut node.kind {
        Kind::Skip => {
            node.m = Metrics::default();
        }
        Kind::Marker { .. } => {
            node.m = Metrics {
                width: p.marker_width,
                up: p.marker_projected_height,
                down: p.marker_projected_height,
                height: 0.0,
            };
        }
        Kind::Token(token) => {
            let style = p.token_style(token.kind);
            let metrics = style.measure.measure(&token.text).map_err(Error::embedder)?;
            token.text_height = metrics.height;
            let half = (metrics.height / 2.0).ceil() + style.vertical_padding;
            let mut width = metrics.width + 2.0 * style.horizontal_padding;
            if style.radius >= half {
                // rounded ends eat into the padding; reserve them explicitly
                width += 2.0 * half;
            }
            node.m = Metrics {
                width,
                up: half,
                down: half,
                height: 0.0,
            };
        }
        Kind::Seq { children, .. } => {
            for child in children.iter_mut() {
                measure(child, p, outer)?;
            }
            let mut width = 0.0;
            let mut up = 0.0f64;
            let mut bottom = 0.0f64;
            let mut y = 0.0;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    width += p.horizontal_seq_separation;
                }
                width += child.m.width;
                up = up.max(child.m.up - y);
                bottom = bottom.max(y + child.m.height + child.m.down);
                y += child.m.height;
            }
            node.m = Metrics {
                width,
                up,
                down: (bottom - y).max(0.0),
                height: y,
            };
        }
        Kind::Stack { rows, drops } => {
            for row in rows.iter_mut() {
                measure(row, p, outer)?;
            }
            let span = p.arc_span();
            let vsep = if outer {
                p.vertical_seq_separation_outer
            } else {
                p.vertical_seq_separation
            };
            let inner = rows.iter().map(|r| r.m.width).fold(0.0, f64::max);
            drops.clear();
            let mut height = 0.0;
            for i in 0..rows.len().saturating_sub(1) {
                let drop = (rows[i].m.down + vsep + rows[i + 1].m.up).max(2.0 * span);
                drops.push(drop);
                height += rows[i].m.height + drop;
            }
            height += rows.last().map(|r| r.m.height).unwrap_or(0.0);
            node.m = Metrics {
                width: inner + 2.0 * span,
                up: rows.first().map(|r| r.m.up).unwrap_or(0.0),
                down: rows.last().map(|r| r.m.down).unwrap_or(0.0),
                height,
            };
        }
        Kind::Choice {
            children,
            default,
            offsets,
        } => {
            for child in children.iter_mut() {
                measure(child, p, false)?;
            }
            let d = *default;
            let vsep = if children.iter().any(contains_choices) {
                p.vertical_choice_separation_outer
            } else {
                p.vertical_choice_separation
            };
            let span = p.arc_span();
            let side = span + p.arc_margin;
            let inner = children.iter().map(|c| c.m.width).fold(0.0, f64::max);

            offsets.clear();
            offsets.resize(children.len(), 0.0);
            for i in (0..d).rev() {
                let below = offsets[i + 1];
                let y = below
                    - children[i + 1].m.up
                    - vsep
                    - children[i].m.down
                    - children[i].m.height;
                // keep room for the branch arcs next to the lane below
                offsets[i] = y.min(below - span);
            }
            for i in d + 1..children.len() {
                let above = offsets[i - 1];
                let y = above
                    + children[i - 1].m.height
                    + children[i - 1].m.down
                    + vsep
                    + children[i].m.up;
                offsets[i] = y.max(above + span);
            }

            let height = children[d].m.height;
            let mut up = children[d].m.up;
            for i in 0..d {
                up = up.max(children[i].m.up - offsets[i]);
            }
            let mut down = children[d].m.down;
            for i in d + 1..children.len() {
                down = down.max(offsets[i] + children[i].m.height + children[i].m.down - height);
            }
            node.m = Metrics {
                width: inner + 2.0 * side,
                up,
                down,
                height,
            };
        }
        Kind::Loop {
            body,
            repeat,
            repeat_top,
            rail_y,
        } => {
            measure(body, p, false)?;
            measure(repeat, p, false)?;
            let span = p.arc_span();
            let vsep = p.vertical_seq_separation;
            let inner = body.m.width.max(repeat.m.width);
            if *repeat_top {
                let y = -(body.m.up + vsep + repeat.m.height + repeat.m.down);
                *rail_y = y.min(-span);
                node.m = Metrics {
                    width: inner + 2.0 * span,
                    up: -*rail_y + repeat.m.up,
                    down: body.m.down,
                    height: body.m.height,
                };
            } else {
                let y = (body.m.height + body.m.down + vsep + repeat.m.up)
                    .max(body.m.height + span);
                *rail_y = y;
                node.m = Metrics {
                    width: inner + 2.0 * span,
                    up: body.m.up,
                    down: *rail_y + repeat.m.height + repeat.m.down - body.m.height,
                    height: body.m.height,
                };
            }
        }
        Kind::Bypass {
            children,
            side,
            rail_y,
        } => {
            for child in children.iter_mut() {
                measure(child, p, false)?;
            }
            let span = p.arc_span();
            let side_w = span + p.arc_margin;
            let mut bodies = 0.0;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    bodies += p.horizontal_seq_separation;
                }
                bodies += child.m.width;
            }
            let vsep = p.vertical_choice_separation;
            let max_up = children.iter().map(|c| c.m.up).fold(0.0, f64::max);
            let max_down = children.iter().map(|c| c.m.down).fold(0.0, f64::max);
            let width = bodies + 2.0 * side_w;
            match side {
                Side::Top => {
                    *rail_y = -(max_up + vsep).max(span);
                    node.m = Metrics {
                        width,
                        up: -*rail_y,
                        down: max_down,
                        height: 0.0,
                    };
                }
                Side::Bottom => {
                    *rail_y = (max_down + vsep).max(span);
                    node.m = Metrics {
                        width,
                        up: max_up,
                        down: *rail_y,
                        height: 0.0,
                    };
                }
            }
        }
        Kind::Barrier { child } => {
            measure(child, p, outer)?;
            node.m = child.m;
        }
        Kind::Group {
            child,
            caption,
            ..
        } => {
            measure(child, p, outer)?;
            let g = &p.group;
            if let Some(cap) = caption.as_mut() {
                let metrics = g.measure.measure(&cap.text).map_err(Error::embedder)?;
                cap.width = metrics.width;
                cap.height = metrics.height;
            }
            let caption_extra = caption
                .as_ref()
                .map(|c| g.text_vertical_offset + c.height)
                .unwrap_or(0.0);
            let caption_width = caption
                .as_ref()
                .map(|c| c.width + g.text_horizontal_offset)
                .unwrap_or(0.0);
            let content = child.m.width.max(caption_width)
                + 2.0 * (g.horizontal_padding + g.thickness);
            node.m = Metrics {
                width: content + 2.0 * g.horizontal_margin,
                up: child.m.up + g.vertical_padding + g.thickness + caption_extra + g.vertical_margin,
                down: child.m.down + g.vertical_padding + g.thickness + g.vertical_margin,
                height: child.m.height,
            };
        }
    }
    Ok(())
}
