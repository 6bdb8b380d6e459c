//! Loader for the data-literal diagram form.
//!
//! A description is a `serde_json::Value` tree where `null` is a skip,
//! a string is a terminal, an array is a sequence, and an object carries
//! exactly one constructor key (`terminal`, `choice`, `optional`, ...) plus
//! that constructor's optional parameters. Malformed descriptions are
//! rejected with [`Error::Loading`] carrying a path into the tree; no partial
//! trees are produced.

use serde_json::Value;

use crate::element::{Element, LineBreak, LineBreaks, TextNode};
use crate::error::{Error, Result, TreePath};

/// Parses a diagram description from a JSON string.
pub fn from_json_str(text: &str) -> Result<Element> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| Error::loading(TreePath::root(), format!("invalid JSON: {err}")))?;
    from_value(&value)
}

/// Loads a diagram description from an already parsed [`Value`].
pub fn from_value(value: &Value) -> Result<Element> {
    load(value, &TreePath::root())
}

const CTORS: &[&str] = &[
    "sequence",
    "stack",
    "no_break",
    "choice",
    "optional",
    "one_or_more",
    "zero_or_more",
    "barrier",
    "terminal",
    "non_terminal",
    "comment",
    "group",
];

fn load(value: &Value, path: &TreePath) -> Result<Element> {
    match value {
        Value::Null => Ok(Element::Skip),
        Value::String(text) => {
            ensure_single_line(text, path)?;
            Ok(Element::Terminal(TextNode::new(text.clone())))
        }
        Value::Array(items) => Ok(Element::Sequence {
            items: load_items(items, path)?,
            linebreaks: LineBreaks::Unspecified,
        }),
        Value::Object(map) => {
            let mut ctors_found = CTORS.iter().copied().filter(|name| map.contains_key(*name));
            let ctor = match (ctors_found.next(), ctors_found.next()) {
                (Some(ctor), None) => ctor,
                _ => {
                    return Err(Error::loading(
                        path.clone(),
                        "cannot determine element type: expected exactly one constructor key",
                    ));
                }
            };

            for key in map.keys() {
                if key != ctor && !allowed_keys(ctor).contains(&key.as_str()) {
                    return Err(Error::loading(
                        path.clone(),
                        format!("{ctor} got unexpected parameter: {key}"),
                    ));
                }
            }

            let arg = &map[ctor];
            let path = path.key(ctor);
            match ctor {
                "terminal" => Ok(Element::Terminal(load_text_node(arg, map, &path)?)),
                "non_terminal" => Ok(Element::NonTerminal(load_text_node(arg, map, &path)?)),
                "comment" => Ok(Element::Comment(load_text_node(arg, map, &path)?)),
                "sequence" => {
                    let items = load_items(expect_array(arg, &path)?, &path)?;
                    let linebreaks = load_linebreaks(map.get("linebreaks"), items.len(), &path)?;
                    Ok(Element::Sequence { items, linebreaks })
                }
                "stack" => Ok(Element::Stack {
                    items: load_items(expect_array(arg, &path)?, &path)?,
                }),
                "no_break" => Ok(Element::NoBreak {
                    items: load_items(expect_array(arg, &path)?, &path)?,
                }),
                "choice" => {
                    let items = load_items(expect_array(arg, &path)?, &path)?;
                    if items.is_empty() {
                        return Err(Error::loading(
                            path,
                            "choice requires at least one alternative",
                        ));
                    }
                    let default = match map.get("default") {
                        None | Some(Value::Null) => 0,
                        Some(Value::Number(n)) => match n.as_u64() {
                            Some(d) if (d as usize) < items.len() => d as usize,
                            _ => {
                                return Err(Error::loading(
                                    path.key("default"),
                                    format!(
                                        "default should be an index in 0..{}, got {n}",
                                        items.len()
                                    ),
                                ));
                            }
                        },
                        Some(other) => {
                            return Err(Error::loading(
                                path.key("default"),
                                format!("default should be an integer, got {}", kind_name(other)),
                            ));
                        }
                    };
                    Ok(Element::Choice { items, default })
                }
                "optional" => Ok(Element::Optional {
                    item: Box::new(load(arg, &path)?),
                    skip: load_bool(map.get("skip"), &path.key("skip"))?,
                    skip_bottom: load_bool(map.get("skip_bottom"), &path.key("skip_bottom"))?,
                }),
                "one_or_more" => Ok(Element::OneOrMore {
                    item: Box::new(load(arg, &path)?),
                    repeat: load_repeat(map.get("repeat"), &path)?,
                    repeat_top: load_bool(map.get("repeat_top"), &path.key("repeat_top"))?,
                }),
                "zero_or_more" => {
                    let repeat_top = load_bool(map.get("repeat_top"), &path.key("repeat_top"))?;
                    let skip_bottom =
                        load_bool(map.get("skip_bottom"), &path.key("skip_bottom"))?;
                    if repeat_top && !skip_bottom {
                        return Err(Error::loading(
                            path,
                            "repeat_top conflicts with a top-side skip rail; set skip_bottom",
                        ));
                    }
                    Ok(Element::ZeroOrMore {
                        item: Box::new(load(arg, &path)?),
                        repeat: load_repeat(map.get("repeat"), &path)?,
                        repeat_top,
                        skip: load_bool(map.get("skip"), &path.key("skip"))?,
                        skip_bottom,
                    })
                }
                "barrier" => Ok(Element::Barrier(Box::new(load(arg, &path)?))),
                "group" => Ok(Element::Group {
                    item: Box::new(load(arg, &path)?),
                    text: load_opt_str(map.get("text"), &path.key("text"))?,
                    href: load_opt_str(map.get("href"), &path.key("href"))?,
                    title: load_opt_str(map.get("title"), &path.key("title"))?,
                    css_class: load_opt_str(map.get("css_class"), &path.key("css_class"))?,
                }),
                _ => unreachable!("constructor table out of sync"),
            }
        }
        other => Err(Error::loading(
            path.clone(),
            format!(
                "diagram item should be null, string, list or object, got {}",
                kind_name(other)
            ),
        )),
    }
}

fn allowed_keys(ctor: &str) -> &'static [&'static str] {
    match ctor {
        "terminal" | "non_terminal" | "comment" => {
            &["href", "title", "css_class", "resolve", "resolver_data"]
        }
        "sequence" => &["linebreaks"],
        "stack" | "no_break" | "barrier" => &[],
        "choice" => &["default"],
        "optional" => &["skip", "skip_bottom"],
        "one_or_more" => &["repeat", "repeat_top"],
        "zero_or_more" => &["repeat", "repeat_top", "skip", "skip_bottom"],
        "group" => &["text", "href", "title", "css_class"],
        _ => &[],
    }
}

fn load_items(items: &[Value], path: &TreePath) -> Result<Vec<Element>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| load(item, &path.index(i)))
        .collect()
}

fn load_text_node(
    arg: &Value,
    map: &serde_json::Map<String, Value>,
    path: &TreePath,
) -> Result<TextNode> {
    let text = expect_str(arg, path)?;
    ensure_single_line(text, path)?;
    Ok(TextNode {
        text: text.to_string(),
        href: load_opt_str(map.get("href"), &path.key("href"))?,
        title: load_opt_str(map.get("title"), &path.key("title"))?,
        css_class: load_opt_str(map.get("css_class"), &path.key("css_class"))?,
        resolve: match map.get("resolve") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(resolve)) => *resolve,
            Some(other) => {
                return Err(Error::loading(
                    path.key("resolve"),
                    format!("resolve should be a boolean, got {}", kind_name(other)),
                ));
            }
        },
        resolver_data: match map.get("resolver_data") {
            None | Some(Value::Null) => None,
            Some(data) => Some(data.clone()),
        },
    })
}

fn load_repeat(value: Option<&Value>, path: &TreePath) -> Result<Option<Box<Element>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(Box::new(load(value, &path.key("repeat"))?))),
    }
}

fn load_linebreaks(value: Option<&Value>, items: usize, path: &TreePath) -> Result<LineBreaks> {
    let path = path.key("linebreaks");
    match value {
        None | Some(Value::Null) => Ok(LineBreaks::Unspecified),
        Some(Value::String(text)) => match LineBreak::parse(text) {
            Some(linebreak) => Ok(LineBreaks::Uniform(linebreak)),
            None => Err(Error::loading(
                path,
                format!("unknown line break kind: {text:?}"),
            )),
        },
        Some(Value::Array(entries)) => {
            let expected = items.saturating_sub(1);
            if entries.len() != expected {
                return Err(Error::loading(
                    path,
                    format!(
                        "linebreaks should have one entry per join ({expected}), got {}",
                        entries.len()
                    ),
                ));
            }
            let mut breaks = Vec::with_capacity(entries.len());
            for (i, entry) in entries.iter().enumerate() {
                let text = expect_str(entry, &path.index(i))?;
                match LineBreak::parse(text) {
                    Some(linebreak) => breaks.push(linebreak),
                    None => {
                        return Err(Error::loading(
                            path.index(i),
                            format!("unknown line break kind: {text:?}"),
                        ));
                    }
                }
            }
            Ok(LineBreaks::PerJoin(breaks))
        }
        Some(other) => Err(Error::loading(
            path,
            format!(
                "linebreaks should be a string or a list of strings, got {}",
                kind_name(other)
            ),
        )),
    }
}

fn load_bool(value: Option<&Value>, path: &TreePath) -> Result<bool> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(Error::loading(
            path.clone(),
            format!("expected a boolean, got {}", kind_name(other)),
        )),
    }
}

fn load_opt_str(value: Option<&Value>, path: &TreePath) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(Error::loading(
            path.clone(),
            format!("expected a string, got {}", kind_name(other)),
        )),
    }
}

fn expect_str<'v>(value: &'v Value, path: &TreePath) -> Result<&'v str> {
    value.as_str().ok_or_else(|| {
        Error::loading(
            path.clone(),
            format!("expected a string, got {}", kind_name(value)),
        )
    })
}

fn expect_array<'v>(value: &'v Value, path: &TreePath) -> Result<&'v [Value]> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| {
        Error::loading(
            path.clone(),
            format!("expected a list, got {}", kind_name(value)),
        )
    })
}

fn ensure_single_line(text: &str, path: &TreePath) -> Result<()> {
    if text.contains('\n') {
        return Err(Error::loading(
            path.clone(),
            "node text should be a single line",
        ));
    }
    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
