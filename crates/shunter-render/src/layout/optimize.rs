//! Optimization: fuses adjacent bypass rails.
//!
//! Two consecutive optionals whose skip branches sit on the same side can
//! share one continuous rail instead of two parallel ones, saving a pair of
//! arcs at the join. The rewrite is structural: eligible runs become a
//! single [`Kind::Bypass`] node that measurement and emission handle like
//! any other variant. A [`Kind::Barrier`] is opaque to this pass, and a body
//! whose entry and exit lines differ is never fused (the shared rail would
//! cross its return path). The accepted language of the diagram is
//! unchanged; only its visual shape is.

use crate::layout::tree::{Join, Kind, LayoutNode, Side};

pub(crate) fn optimize(node: &mut LayoutNode) {
    match &mut node.kind {
        Kind::Seq { children, joins } => {
            for child in children.iter_mut() {
                optimize(child);
            }
            fuse_adjacent(children, joins);
        }
        Kind::Stack { rows, .. } => {
            for row in rows {
                optimize(row);
            }
        }
        Kind::Choice { children, .. } | Kind::Bypass { children, .. } => {
            for child in children {
                optimize(child);
            }
        }
        Kind::Loop { body, repeat, .. } => {
            optimize(body);
            optimize(repeat);
        }
        Kind::Barrier { child } | Kind::Group { child, .. } => optimize(child),
        Kind::Skip | Kind::Token(_) | Kind::Marker { .. } => {}
    }
}

/// The side a choice would expose as a fused bypass rail, if it is shaped
/// like an optional: exactly one skip branch off the main line, the body on
/// it, and the body confined to a single line.
fn bypass_side(node: &LayoutNode) -> Option<Side> {
    let Kind::Choice {
        children, default, ..
    } = &node.kind
    else {
        return None;
    };
    if children.len() != 2 {
        return None;
    }
    let skip_index = if matches!(children[0].kind, Kind::Skip) {
        0
    } else if matches!(children[1].kind, Kind::Skip) {
        1
    } else {
        return None;
    };
    let body_index = 1 - skip_index;
    if *default != body_index {
        // the body is off the main line; there is no rail to share
        return None;
    }
    if children[body_index].m.height != 0.0 {
        return None;
    }
    Some(if skip_index < body_index {
        Side::Top
    } else {
        Side::Bottom
    })
}

fn take_body(node: LayoutNode) -> LayoutNode {
    let Kind::Choice {
        mut children,
        default,
        ..
    } = node.kind
    else {
        unreachable!("bypass_side accepted a non-choice");
    };
    children.remove(default)
}

fn push_with_join(pre: Option<Join>, child: LayoutNode, out: &mut Vec<LayoutNode>, out_joins: &mut Vec<Join>) {
    if !out.is_empty() {
        out_joins.push(pre.unwrap_or(Join::NoBreak));
    }
    out.push(child);
}

fn flush_run(
    pending: &mut Vec<(Option<Join>, LayoutNode)>,
    side: Option<Side>,
    out: &mut Vec<LayoutNode>,
    out_joins: &mut Vec<Join>,
) {
    if pending.len() >= 2 {
        let side = side.expect("a run implies a side");
        let pre = pending[0].0;
        let bodies: Vec<LayoutNode> = pending.drain(..).map(|(_, node)| take_body(node)).collect();
        push_with_join(
            pre,
            LayoutNode::new(Kind::Bypass {
                children: bodies,
                side,
                rail_y: 0.0,
            }),
            out,
            out_joins,
        );
    } else {
        for (pre, child) in pending.drain(..) {
            push_with_join(pre, child, out, out_joins);
        }
    }
}

fn fuse_adjacent(children: &mut Vec<LayoutNode>, joins: &mut Vec<Join>) {
    let old_children = std::mem::take(children);
    let old_joins = std::mem::take(joins);

    let mut out: Vec<LayoutNode> = Vec::new();
    let mut out_joins: Vec<Join> = Vec::new();
    let mut pending: Vec<(Option<Join>, LayoutNode)> = Vec::new();
    let mut pending_side: Option<Side> = None;

    for (i, child) in old_children.into_iter().enumerate() {
        let pre = if i == 0 { None } else { Some(old_joins[i - 1]) };
        match bypass_side(&child) {
            Some(side) if pending_side == Some(side) => pending.push((pre, child)),
            Some(side) => {
                flush_run(&mut pending, pending_side, &mut out, &mut out_joins);
                pending_side = Some(side);
                pending.push((pre, child));
            }
            None => {
                flush_run(&mut pending, pending_side, &mut out, &mut out_joins);
                pending_side = None;
                push_with_join(pre, child, &mut out, &mut out_joins);
            }
        }
    }
    flush_run(&mut pending, pending_side, &mut out, &mut out_joins);

    *children = out;
    *joins = out_joins;
}
