//! Wrapping: resolves soft line breaks against the advisory width.
//!
//! A sequence whose joins still carry `Hard` or `Soft` breaks after
//! normalization is split greedily left-to-right and rewritten into a stack
//! of single-line rows. `Default` joins soften at the top level only; inside
//! choices, loops, and already wrapped rows they are final `NoBreak` joins.
//! The advisory width is a preference: a single over-wide child is emitted
//! on its own row without error.

use crate::layout::profile::Profile;
use crate::layout::tree::{Join, Kind, LayoutNode};

pub(crate) fn wrap(node: &mut LayoutNode, p: &Profile, nested: bool) {
    match &mut node.kind {
        Kind::Seq { .. } => wrap_seq(node, p, nested),
        Kind::Stack { rows, .. } => {
            for row in rows {
                wrap(row, p, true);
            }
        }
        Kind::Choice { children, .. } | Kind::Bypass { children, .. } => {
            for child in children {
                wrap(child, p, true);
            }
        }
        Kind::Loop { body, repeat, .. } => {
            wrap(body, p, true);
            wrap(repeat, p, true);
        }
        Kind::Barrier { child } | Kind::Group { child, .. } => wrap(child, p, nested),
        Kind::Skip | Kind::Token(_) | Kind::Marker { .. } => {}
    }
}

fn wrap_seq(node: &mut LayoutNode, p: &Profile, nested: bool) {
    let Kind::Seq { children, joins } = &mut node.kind else {
        unreachable!("wrap_seq called on a non-sequence");
    };

    let effective: Vec<Join> = joins
        .iter()
        .map(|join| match join {
            Join::Default if nested => Join::NoBreak,
            Join::Default => Join::Soft,
            other => *other,
        })
        .collect();

    if !effective
        .iter()
        .any(|join| matches!(join, Join::Hard | Join::Soft))
    {
        *joins = effective;
        for child in children {
            wrap(child, p, nested);
        }
        return;
    }

    let kids = std::mem::take(children);
    let mut rows: Vec<Vec<LayoutNode>> = vec![Vec::new()];
    let mut running = 0.0f64;
    for (i, child) in kids.into_iter().enumerate() {
        let join = if i == 0 { None } else { Some(effective[i - 1]) };
        let break_here = match join {
            Some(Join::Hard) => true,
            Some(Join::Soft) => {
                !rows.last().is_some_and(|row| row.is_empty())
                    && running + p.horizontal_seq_separation + child.m.width > p.max_width
            }
            _ => false,
        };
        if break_here {
            rows.push(Vec::new());
            running = 0.0;
        }
        let row = rows.last_mut().expect("rows is never empty");
        if !row.is_empty() {
            running += p.horizontal_seq_separation;
        }
        running += child.m.width;
        row.push(child);
    }

    let wrapped = rows.len() > 1;
    let mut row_nodes: Vec<LayoutNode> = rows
        .into_iter()
        .map(|row| {
            let joins = vec![Join::NoBreak; row.len().saturating_sub(1)];
            LayoutNode::new(Kind::Seq {
                children: row,
                joins,
            })
        })
        .collect();
    for row in &mut row_nodes {
        if let Kind::Seq { children, .. } = &mut row.kind {
            for child in children {
                wrap(child, p, wrapped || nested);
            }
        }
    }

    if wrapped {
        node.kind = Kind::Stack {
            rows: row_nodes,
            drops: Vec::new(),
        };
    } else {
        let row = row_nodes.pop().expect("a single row exists");
        node.kind = row.kind;
    }
}
