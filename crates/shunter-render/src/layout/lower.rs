//! Lowering: public [`Element`] combinators to the canonical layout tree.
//!
//! `Optional` and `ZeroOrMore` reduce to choices over a skip branch before
//! measurement, so the later passes handle one canonical set of variants.
//! Hyperlinks are resolved here so that measurement sees final node text.
//! Hand-built trees are validated with the same diagnostics as the loader.

use shunter_core::{
    Element, Error, HrefResolver, LineBreak, LineBreaks, NodeKind, Result, TextNode, TreePath,
};

use crate::layout::profile::Profile;
use crate::layout::tree::{Caption, Join, Kind, LayoutNode, MarkerRole, Token};

/// Lowers the whole diagram, wrapping it between start and end markers.
pub(crate) fn lower_root(element: &Element, profile: &Profile) -> Result<LayoutNode> {
    let inner = lower(element, profile, &TreePath::root())?;
    Ok(LayoutNode::new(Kind::Seq {
        children: vec![
            LayoutNode::new(Kind::Marker {
                role: MarkerRole::Start,
            }),
            inner,
            LayoutNode::new(Kind::Marker {
                role: MarkerRole::End,
            }),
        ],
        joins: vec![Join::NoBreak; 2],
    }))
}

fn lower(element: &Element, profile: &Profile, path: &TreePath) -> Result<LayoutNode> {
    match element {
        Element::Skip => Ok(LayoutNode::new(Kind::Skip)),
        Element::Terminal(node) => lower_token(NodeKind::Terminal, node, profile, path),
        Element::NonTerminal(node) => lower_token(NodeKind::NonTerminal, node, profile, path),
        Element::Comment(node) => lower_token(NodeKind::Comment, node, profile, path),
        Element::Sequence { items, linebreaks } => {
            let joins = lower_joins(linebreaks, items.len(), path)?;
            Ok(LayoutNode::new(Kind::Seq {
                children: lower_items(items, profile, path)?,
                joins,
            }))
        }
        Element::Stack { items } => Ok(LayoutNode::new(Kind::Seq {
            joins: vec![Join::Hard; items.len().saturating_sub(1)],
            children: lower_items(items, profile, path)?,
        })),
        Element::NoBreak { items } => Ok(LayoutNode::new(Kind::Seq {
            joins: vec![Join::NoBreak; items.len().saturating_sub(1)],
            children: lower_items(items, profile, path)?,
        })),
        Element::Choice { items, default } => {
            if items.is_empty() {
                return Err(Error::loading(
                    path.clone(),
                    "choice requires at least one alternative",
                ));
            }
            if *default >= items.len() {
                return Err(Error::loading(
                    path.clone(),
                    format!(
                        "choice default should be an index in 0..{}, got {default}",
                        items.len()
                    ),
                ));
            }
            Ok(LayoutNode::new(Kind::Choice {
                children: lower_items(items, profile, path)?,
                default: *default,
                offsets: Vec::new(),
            }))
        }
        Element::Optional {
            item,
            skip,
            skip_bottom,
        } => {
            let item = lower(item, profile, path)?;
            Ok(optional_choice(item, *skip, *skip_bottom))
        }
        Element::OneOrMore {
            item,
            repeat,
            repeat_top,
        } => Ok(LayoutNode::new(Kind::Loop {
            body: Box::new(lower(item, profile, path)?),
            repeat: Box::new(lower_repeat(repeat.as_deref(), profile, path)?),
            repeat_top: *repeat_top,
            rail_y: 0.0,
        })),
        Element::ZeroOrMore {
            item,
            repeat,
            repeat_top,
            skip,
            skip_bottom,
        } => {
            if *repeat_top && !*skip_bottom {
                return Err(Error::loading(
                    path.clone(),
                    "repeat_top conflicts with a top-side skip rail; set skip_bottom",
                ));
            }
            let body = LayoutNode::new(Kind::Loop {
                body: Box::new(lower(item, profile, path)?),
                repeat: Box::new(lower_repeat(repeat.as_deref(), profile, path)?),
                repeat_top: *repeat_top,
                rail_y: 0.0,
            });
            Ok(optional_choice(body, *skip, *skip_bottom))
        }
        Element::Barrier(item) => Ok(LayoutNode::new(Kind::Barrier {
            child: Box::new(lower(item, profile, path)?),
        })),
        Element::Group {
            item,
            text,
            href,
            title,
            css_class,
        } => Ok(LayoutNode::new(Kind::Group {
            // a group isolates its child from rail merging on both sides
            child: Box::new(LayoutNode::new(Kind::Barrier {
                child: Box::new(lower(item, profile, path)?),
            })),
            caption: text.as_ref().map(|text| Caption {
                text: text.clone(),
                href: href.clone(),
                title: title.clone(),
                width: 0.0,
                height: 0.0,
            }),
            css_class: css_class.clone(),
        })),
    }
}

/// Places the skip branch of an optional exactly where the loader's reduction
/// rules put it: above the body unless `skip_bottom`, with `skip` moving the
/// body off the main line.
fn optional_choice(item: LayoutNode, skip: bool, skip_bottom: bool) -> LayoutNode {
    let skip_node = LayoutNode::new(Kind::Skip);
    let (children, default) = if skip_bottom {
        (vec![item, skip_node], if skip { 1 } else { 0 })
    } else {
        (vec![skip_node, item], if skip { 0 } else { 1 })
    };
    LayoutNode::new(Kind::Choice {
        children,
        default,
        offsets: Vec::new(),
    })
}

fn lower_items(
    items: &[Element],
    profile: &Profile,
    path: &TreePath,
) -> Result<Vec<LayoutNode>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| lower(item, profile, &path.index(i)))
        .collect()
}

fn lower_repeat(
    repeat: Option<&Element>,
    profile: &Profile,
    path: &TreePath,
) -> Result<LayoutNode> {
    match repeat {
        None => Ok(LayoutNode::new(Kind::Skip)),
        Some(repeat) => lower(repeat, profile, &path.key("repeat")),
    }
}

fn lower_joins(linebreaks: &LineBreaks, items: usize, path: &TreePath) -> Result<Vec<Join>> {
    let joins = items.saturating_sub(1);
    match linebreaks {
        LineBreaks::Unspecified => Ok(vec![Join::Default; joins]),
        LineBreaks::Uniform(linebreak) => Ok(vec![lower_join(*linebreak); joins]),
        LineBreaks::PerJoin(linebreaks) => {
            if linebreaks.len() != joins {
                return Err(Error::loading(
                    path.clone(),
                    format!(
                        "linebreaks should have one entry per join ({joins}), got {}",
                        linebreaks.len()
                    ),
                ));
            }
            Ok(linebreaks.iter().map(|lb| lower_join(*lb)).collect())
        }
    }
}

fn lower_join(linebreak: LineBreak) -> Join {
    match linebreak {
        LineBreak::Hard => Join::Hard,
        LineBreak::Soft => Join::Soft,
        LineBreak::Default => Join::Default,
        LineBreak::NoBreak => Join::NoBreak,
    }
}

fn lower_token(
    kind: NodeKind,
    node: &TextNode,
    profile: &Profile,
    path: &TreePath,
) -> Result<LayoutNode> {
    if node.text.contains('\n') {
        return Err(Error::loading(
            path.clone(),
            "node text should be a single line",
        ));
    }

    let (text, href, title) = if node.resolve {
        let resolved = profile
            .resolver
            .resolve(
                kind,
                &node.text,
                node.href.as_deref(),
                node.title.as_deref(),
                node.resolver_data.as_ref(),
            )
            .map_err(Error::embedder)?;
        (resolved.text, resolved.href, resolved.title)
    } else {
        (node.text.clone(), node.href.clone(), node.title.clone())
    };

    Ok(LayoutNode::new(Kind::Token(Token {
        kind,
        text,
        href,
        title,
        css_class: node.css_class.clone(),
        text_height: 0.0,
    })))
}
