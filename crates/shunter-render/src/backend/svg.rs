//! The vector back-end: accumulates an SVG element tree and serializes it
//! to a byte-stable string.
//!
//! Arcs are single quarter-circle path segments; arrow heads live in
//! `<defs>` and are stamped with `<use>`; an optional stylesheet is
//! flattened from the ordered rule map. Numbers go through a trailing-zero
//! trimming formatter so repeated renders are byte-identical.

use std::fmt::Write as _;

use shunter_core::NodeKind;

use crate::settings::{ArrowStyle, CssStyle, EndClass, SvgRenderSettings};
use crate::surface::{GroupBoxSpec, HDir, NodeBoxSpec, Surface, Turn, VDir};

const ARROW_ID: &str = "sd-arrow";

pub(crate) struct SvgSurface {
    root: SvgElement,
    stack: Vec<SvgElement>,
    arrow_style: ArrowStyle,
    end_class: EndClass,
    arc_radius: f64,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64, settings: &SvgRenderSettings) -> Self {
        let mut root = SvgElement::new("svg");
        root.attr("xmlns", "http://www.w3.org/2000/svg");
        root.attr("xmlns:xlink", "http://www.w3.org/1999/xlink");
        root.attr("width", &fmt(width));
        root.attr("height", &fmt(height));
        if !settings.css_class.is_empty() {
            root.attr("class", &settings.css_class);
        }
        root.attr("viewBox", &format!("0 0 {} {}", fmt(width), fmt(height)));
        root.attr("role", "img");
        if let Some(title) = &settings.title {
            root.attr("aria-label", title);
            let mut elem = SvgElement::new("title");
            elem.text(title);
            root.push(elem);
        }
        if let Some(description) = &settings.description {
            let mut elem = SvgElement::new("desc");
            elem.text(description);
            root.push(elem);
        }

        let mut defs = SvgElement::new("defs");
        if let Some(d) = arrow_path(
            settings.arrow_style,
            settings.arrow_length,
            settings.arrow_cross_length,
        ) {
            let mut path = SvgElement::new("path");
            path.attr("id", ARROW_ID);
            path.attr("class", &arrow_class(settings.arrow_style));
            path.attr("d", &d);
            defs.push(path);
        }
        root.push(defs);

        if let Some(css) = &settings.css_style {
            let flat = match css {
                CssStyle::Raw(text) => text.clone(),
                CssStyle::Rules(rules) => {
                    let mut out = String::new();
                    for (selector, decls) in rules {
                        out.push_str(selector);
                        out.push('{');
                        for (name, value) in decls {
                            let _ = write!(&mut out, "{name}:{value};");
                        }
                        out.push('}');
                    }
                    out
                }
            };
            let mut style = SvgElement::new("style");
            style.text(&flat);
            root.push(style);
        }

        Self {
            root,
            stack: vec![SvgElement::new("g")],
            arrow_style: settings.arrow_style,
            end_class: settings.end_class,
            arc_radius: settings.arc_radius,
        }
    }

    pub fn finish(mut self) -> String {
        while self.stack.len() > 1 {
            let elem = self.stack.pop().expect("stack underflow");
            self.top().push(elem);
        }
        let body = self.stack.pop().expect("base group exists");
        self.root.push(body);
        let mut out = String::new();
        self.root.write(&mut out);
        out
    }

    fn top(&mut self) -> &mut SvgElement {
        self.stack.last_mut().expect("group stack is never empty")
    }

    fn path(&mut self, d: String) {
        let mut elem = SvgElement::new("path");
        elem.attr("d", &d);
        self.top().push(elem);
    }

    fn stamp_arrow(&mut self, transform: String) {
        if matches!(self.arrow_style, ArrowStyle::None) {
            return;
        }
        let class = arrow_class(self.arrow_style);
        let mut elem = SvgElement::new("use");
        elem.attr("href", &format!("#{ARROW_ID}"));
        elem.attr("class", &class);
        elem.attr("transform", &transform);
        self.top().push(elem);
    }
}

impl Surface for SvgSurface {
    fn hseg(&mut self, x1: f64, x2: f64, y: f64) {
        self.path(format!("M{} {}H{}", fmt(x1), fmt(y), fmt(x2)));
    }

    fn vseg(&mut self, x: f64, y1: f64, y2: f64) {
        let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        self.path(format!("M{} {}V{}", fmt(x), fmt(lo), fmt(hi)));
    }

    fn corner(&mut self, x: f64, y: f64, turn: Turn) {
        let r = self.arc_radius;
        // Start point, end point, and sweep per turn; sweep 1 is a right
        // (clockwise on a y-down canvas) turn.
        let (sx, sy, ex, ey, sweep) = match turn {
            Turn::EastToSouth => (x - r, y, x, y + r, 1),
            Turn::EastToNorth => (x - r, y, x, y - r, 0),
            Turn::WestToSouth => (x + r, y, x, y + r, 0),
            Turn::WestToNorth => (x + r, y, x, y - r, 1),
            Turn::SouthToEast => (x, y - r, x + r, y, 0),
            Turn::SouthToWest => (x, y - r, x - r, y, 1),
            Turn::NorthToEast => (x, y + r, x + r, y, 1),
            Turn::NorthToWest => (x, y + r, x - r, y, 0),
        };
        self.path(format!(
            "M{} {}a{} {} 0 0 {} {} {}",
            fmt(sx),
            fmt(sy),
            fmt(r),
            fmt(r),
            sweep,
            fmt(ex - sx),
            fmt(ey - sy),
        ));
    }

    fn arrow_h(&mut self, x: f64, y: f64, toward: HDir) {
        let mut transform = format!("translate({} {})", fmt(x), fmt(y));
        if matches!(toward, HDir::West) {
            transform.push_str(" scale(-1 1)");
        }
        self.stamp_arrow(transform);
    }

    fn arrow_v(&mut self, x: f64, y: f64, toward: VDir) {
        let mut transform = format!("translate({} {})", fmt(x), fmt(y));
        match toward {
            VDir::Down => transform.push_str(" rotate(90)"),
            VDir::Up => transform.push_str(" rotate(-90)"),
        }
        self.stamp_arrow(transform);
    }

    fn node_box(&mut self, spec: &NodeBoxSpec<'_>) {
        let base = match spec.kind {
            NodeKind::Terminal => "node terminal",
            NodeKind::NonTerminal => "node non-terminal",
            NodeKind::Comment => "node comment",
        };
        let class = match spec.css_class {
            Some(custom) => format!("{custom} {base}"),
            None => base.to_string(),
        };
        let mut g = SvgElement::new("g");
        g.attr("class", &class);

        let mut rect = SvgElement::new("rect");
        rect.attr("x", &fmt(spec.x));
        rect.attr("y", &fmt(spec.y));
        rect.attr("width", &fmt(spec.width));
        rect.attr("height", &fmt(spec.height));
        rect.attr("rx", &fmt(spec.radius));
        rect.attr("ry", &fmt(spec.radius));
        g.push(rect);

        let mut text = SvgElement::new("text");
        let mut tspan = SvgElement::new("tspan");
        tspan.attr("x", &fmt(spec.center_x));
        tspan.attr("y", &fmt(spec.baseline));
        tspan.text(spec.text);
        text.push(tspan);

        if let Some(href) = spec.href {
            let mut a = SvgElement::new("a");
            a.attr("xlink:href", href);
            if let Some(title) = spec.title {
                a.attr("title", title);
            }
            a.push(text);
            g.push(a);
        } else {
            g.push(text);
        }
        self.top().push(g);
    }

    fn group_box(&mut self, spec: &GroupBoxSpec<'_>) {
        let class = match spec.css_class {
            Some(custom) => format!("{custom} group"),
            None => "group".to_string(),
        };
        let mut g = SvgElement::new("g");
        g.attr("class", &class);

        let mut rect = SvgElement::new("rect");
        rect.attr("x", &fmt(spec.x));
        rect.attr("y", &fmt(spec.y));
        rect.attr("width", &fmt(spec.width));
        rect.attr("height", &fmt(spec.height));
        rect.attr("rx", &fmt(spec.radius));
        rect.attr("ry", &fmt(spec.radius));
        g.push(rect);

        if let Some(caption) = &spec.caption {
            let mut text = SvgElement::new("text");
            let mut tspan = SvgElement::new("tspan");
            tspan.attr("x", &fmt(caption.x));
            tspan.attr("y", &fmt(caption.top + caption.ascent));
            tspan.text(caption.text);
            text.push(tspan);
            if let Some(href) = caption.href {
                let mut a = SvgElement::new("a");
                a.attr("xlink:href", href);
                if let Some(title) = caption.title {
                    a.attr("title", title);
                }
                a.push(text);
                g.push(a);
            } else {
                g.push(text);
            }
        }
        self.top().push(g);
    }

    fn marker(&mut self, x: f64, y: f64, left_shape: bool, width: f64, projected: f64) {
        let dh = 2.0 * projected;
        let d = match (left_shape, self.end_class) {
            (true, EndClass::Simple) => format!(
                "M{} {}h{}m{} {}v{}",
                fmt(x),
                fmt(y),
                fmt(width),
                fmt(-dh),
                fmt(-projected),
                fmt(dh),
            ),
            (true, EndClass::Complex) => format!(
                "M{} {}h{}m{} {}v{}m{} {}v{}",
                fmt(x),
                fmt(y),
                fmt(width),
                fmt(-dh),
                fmt(-projected),
                fmt(dh),
                fmt(projected),
                fmt(-dh),
                fmt(dh),
            ),
            (false, EndClass::Simple) => format!(
                "M{} {}h{}m0 {}v{}",
                fmt(x),
                fmt(y),
                fmt(width),
                fmt(-projected),
                fmt(dh),
            ),
            (false, EndClass::Complex) => format!(
                "M{} {}h{}m0 {}v{}m{} {}v{}",
                fmt(x),
                fmt(y),
                fmt(width),
                fmt(-projected),
                fmt(dh),
                fmt(-projected),
                fmt(-dh),
                fmt(dh),
            ),
        };
        self.path(d);
    }

    fn push_group(&mut self, label: &'static str, debug_id: &str) {
        let mut g = SvgElement::new("g");
        g.attr("class", "elem");
        if !debug_id.is_empty() {
            g.attr("data-dbg-id", debug_id);
            g.attr("data-dbg-kind", label);
        }
        self.stack.push(g);
    }

    fn pop_group(&mut self) {
        let elem = self.stack.pop().expect("unbalanced group stack");
        self.top().push(elem);
    }
}

fn arrow_class(style: ArrowStyle) -> String {
    let name = match style {
        ArrowStyle::None => "none",
        ArrowStyle::Triangle => "triangle",
        ArrowStyle::Stealth => "stealth",
        ArrowStyle::Barb => "barb",
        ArrowStyle::Harpoon => "harpoon",
        ArrowStyle::HarpoonUp => "harpoon-up",
    };
    format!("arrow arrow-{name}")
}

/// Arrow-head path pointing east with the tip at the origin.
fn arrow_path(style: ArrowStyle, length: f64, cross: f64) -> Option<String> {
    let l = fmt(length);
    let c = fmt(cross);
    let notch = fmt(3.0 * length / 4.0);
    match style {
        ArrowStyle::None => None,
        ArrowStyle::Triangle => Some(format!("M 0 0 L -{l} -{c} L -{l} {c} z")),
        ArrowStyle::Stealth => Some(format!("M 0 0 L -{l} -{c} L -{notch} 0 L -{l} {c} z")),
        ArrowStyle::Barb => Some(format!("M 0 0 L -{l} -{c} M 0 0 L -{l} {c}")),
        ArrowStyle::Harpoon => Some(format!("M 0 0 L -{l} {c} L -{notch} 0 z")),
        ArrowStyle::HarpoonUp => Some(format!("M 0 0 L -{l} -{c} L -{notch} 0 z")),
    }
}

struct SvgElement {
    name: &'static str,
    attrs: Vec<(String, String)>,
    children: Vec<SvgNode>,
}

enum SvgNode {
    Element(SvgElement),
    Text(String),
}

impl SvgElement {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.attrs.push((name.to_string(), value.to_string()));
    }

    fn push(&mut self, child: SvgElement) {
        self.children.push(SvgNode::Element(child));
    }

    fn text(&mut self, text: &str) {
        self.children.push(SvgNode::Text(text.to_string()));
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_xml_into(out, value);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            match child {
                SvgNode::Element(elem) => elem.write(out),
                SvgNode::Text(text) => escape_xml_into(out, text),
            }
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

/// Formats a coordinate the way SVG viewers expect numbers: round-trippable,
/// without `-0` or tiny float noise.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = if v == v.trunc() {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    };
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::fmt;

    #[test]
    fn fmt_trims_float_noise() {
        assert_eq!(fmt(10.0), "10");
        assert_eq!(fmt(10.000000001), "10");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(10.5), "10.5");
    }
}
