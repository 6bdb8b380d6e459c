//! Placement and emission: a pre-order traversal carrying an absolute
//! cursor positioned at each node's entry connector.
//!
//! Every variant knows where to draw its own shape, where to place each
//! child, and how to route the connecting rails. Right-to-left rendering
//! mirrors the cursor direction at emission only; measurement never sees it.

use shunter_core::{NodeKind, TextMeasure as _};

use crate::geom::{Point, point};
use crate::layout::profile::Profile;
use crate::layout::tree::{Caption, Kind, LayoutNode, MarkerRole, Token};
use crate::surface::{CaptionSpec, GroupBoxSpec, HDir, NodeBoxSpec, Surface, Turn, VDir};

const EPS: f64 = 1e-6;

/// Absolute position of a node's entry connector plus the travel direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor {
    pub pos: Point,
    pub dir: f64,
}

impl Cursor {
    pub fn new(x: f64, y: f64, dir: f64) -> Self {
        Self {
            pos: point(x, y),
            dir,
        }
    }

    /// The cursor moved `dx` units along the travel direction and `dy` down.
    fn advanced(self, dx: f64, dy: f64) -> Self {
        Self {
            pos: point(self.pos.x + self.dir * dx, self.pos.y + dy),
            dir: self.dir,
        }
    }

    fn reversed(self) -> Self {
        Self {
            pos: self.pos,
            dir: -self.dir,
        }
    }
}

pub(crate) fn emit(root: &LayoutNode, profile: &Profile, surface: &mut dyn Surface, entry: Cursor) {
    let mut emitter = Emitter {
        p: profile,
        s: surface,
        trail: Vec::new(),
    };
    emitter.node(root, entry);
}

struct Emitter<'a> {
    p: &'a Profile,
    s: &'a mut dyn Surface,
    trail: Vec<usize>,
}

impl Emitter<'_> {
    fn debug_id(&self) -> String {
        if !self.p.debug {
            return String::new();
        }
        let mut id = String::from("0");
        for index in &self.trail {
            id.push('.');
            id.push_str(&index.to_string());
        }
        id
    }

    fn child(&mut self, index: usize, node: &LayoutNode, cur: Cursor) {
        self.trail.push(index);
        self.node(node, cur);
        self.trail.pop();
    }

    fn node(&mut self, node: &LayoutNode, cur: Cursor) {
        let id = self.debug_id();
        self.s.push_group(label(node), &id);
        match &node.kind {
            Kind::Skip => {}
            Kind::Token(token) => self.token(node, token, cur),
            Kind::Seq { children, .. } => self.seq(children, cur),
            Kind::Stack { rows, drops } => self.stack(node, rows, drops, cur),
            Kind::Choice {
                children,
                default,
                offsets,
            } => self.choice(node, children, *default, offsets, cur),
            Kind::Loop {
                body,
                repeat,
                rail_y,
                ..
            } => self.repeat_loop(node, body, repeat, *rail_y, cur),
            Kind::Bypass {
                children, rail_y, ..
            } => self.bypass(node, children, *rail_y, cur),
            Kind::Barrier { child } => self.child(0, child, cur),
            Kind::Group {
                child,
                caption,
                css_class,
            } => self.group(node, child, caption.as_ref(), css_class.as_deref(), cur),
            Kind::Marker { role } => {
                let left = cur.pos.x.min(cur.pos.x + cur.dir * node.m.width);
                let left_shape = matches!(role, MarkerRole::Start) != self.p.reverse;
                self.s.marker(
                    left,
                    cur.pos.y,
                    left_shape,
                    self.p.marker_width,
                    self.p.marker_projected_height,
                );
            }
        }
        self.s.pop_group();
    }

    fn token(&mut self, node: &LayoutNode, token: &Token, cur: Cursor) {
        let style = self.p.token_style(token.kind);
        let left = cur.pos.x.min(cur.pos.x + cur.dir * node.m.width);
        self.s.node_box(&NodeBoxSpec {
            kind: token.kind,
            x: left,
            y: cur.pos.y - node.m.up,
            width: node.m.width,
            height: node.m.up + node.m.down,
            radius: style.radius,
            line_y: cur.pos.y,
            center_x: left + node.m.width / 2.0,
            baseline: cur.pos.y + style.measure.ascent() - token.text_height / 2.0,
            horizontal_padding: style.horizontal_padding,
            text: &token.text,
            href: token.href.as_deref(),
            title: token.title.as_deref(),
            css_class: token.css_class.as_deref(),
        });
    }

    fn seq(&mut self, children: &[LayoutNode], cur: Cursor) {
        let mut c = cur;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                let next = c.advanced(self.p.horizontal_seq_separation, 0.0);
                self.s.hseg(c.pos.x, next.pos.x, c.pos.y);
                c = next;
            }
            self.child(i, child, c);
            c = c.advanced(child.m.width, child.m.height);
        }
    }

    fn stack(&mut self, node: &LayoutNode, rows: &[LayoutNode], drops: &[f64], cur: Cursor) {
        let span = self.p.arc_span();
        let r = self.p.arc_radius;
        let right = cur.pos.x + cur.dir * node.m.width;
        let x_rows = cur.pos.x + cur.dir * span;
        self.s.hseg(cur.pos.x, x_rows, cur.pos.y);
        let mut y = cur.pos.y;
        for (i, row) in rows.iter().enumerate() {
            self.child(i, row, Cursor::new(x_rows, y, cur.dir));
            let exit_x = x_rows + cur.dir * row.m.width;
            let exit_y = y + row.m.height;
            if i + 1 < rows.len() {
                let mid = self.p.snap(exit_y + drops[i] / 2.0);
                let next = exit_y + drops[i];
                Path::new(self.s, r, exit_x, exit_y, cur.dir)
                    .h_to(right - cur.dir * span)
                    .bend_backward(mid, false)
                    .h_to_arrow(x_rows, self.p.arrow_min_run)
                    .bend_backward(next, false);
                y = next;
            } else {
                self.s.hseg(exit_x, right, exit_y);
            }
        }
    }

    fn choice(
        &mut self,
        node: &LayoutNode,
        children: &[LayoutNode],
        default: usize,
        offsets: &[f64],
        cur: Cursor,
    ) {
        let span = self.p.arc_span();
        let r = self.p.arc_radius;
        let side = span + self.p.arc_margin;
        let right = cur.pos.x + cur.dir * node.m.width;
        let x_alt = cur.pos.x + cur.dir * side;
        let exit_y = cur.pos.y + node.m.height;
        for (i, alt) in children.iter().enumerate() {
            let alt_y = cur.pos.y + offsets[i];
            let alt_cur = Cursor::new(x_alt, alt_y, cur.dir);
            if i == default {
                self.s.hseg(cur.pos.x, x_alt, cur.pos.y);
                self.child(i, alt, alt_cur);
                let end_x = x_alt + cur.dir * alt.m.width;
                if matches!(alt.kind, Kind::Skip) {
                    Path::new(self.s, r, end_x, exit_y, cur.dir)
                        .h_to_arrow(right, self.p.arrow_min_run);
                } else {
                    self.s.hseg(end_x, right, exit_y);
                }
            } else {
                let entry = Path::new(self.s, r, cur.pos.x, cur.pos.y, cur.dir)
                    .bend_forward(alt_y, true);
                if matches!(alt.kind, Kind::Skip) {
                    entry
                        .h_to_arrow(right - cur.dir * span, self.p.arrow_min_run)
                        .bend_forward(exit_y, true);
                    self.child(i, alt, alt_cur);
                } else {
                    entry.h_to(x_alt);
                    self.child(i, alt, alt_cur);
                    Path::new(
                        self.s,
                        r,
                        x_alt + cur.dir * alt.m.width,
                        alt_y + alt.m.height,
                        cur.dir,
                    )
                    .h_to(right - cur.dir * span)
                    .bend_forward(exit_y, true);
                }
            }
        }
    }

    fn repeat_loop(
        &mut self,
        node: &LayoutNode,
        body: &LayoutNode,
        repeat: &LayoutNode,
        rail_y: f64,
        cur: Cursor,
    ) {
        let span = self.p.arc_span();
        let r = self.p.arc_radius;
        let right = cur.pos.x + cur.dir * node.m.width;
        let x_body = cur.pos.x + cur.dir * span;
        let inner = node.m.width - 2.0 * span;

        self.s.hseg(cur.pos.x, x_body, cur.pos.y);
        self.child(0, body, Cursor::new(x_body, cur.pos.y, cur.dir));
        let body_exit_y = cur.pos.y + body.m.height;
        self.s
            .hseg(x_body + cur.dir * body.m.width, right, body_exit_y);

        // The return line is traveled backward; the separator reads in the
        // travel direction.
        let rail = cur.pos.y + rail_y;
        let lead = self.p.snap((inner - repeat.m.width) / 2.0);
        let rep_entry_x = right - cur.dir * (span + lead);
        Path::new(self.s, r, right - cur.dir * span, body_exit_y, cur.dir)
            .bend_backward(rail, true)
            .h_to_arrow(rep_entry_x, self.p.arrow_min_run);
        self.child(1, repeat, Cursor::new(rep_entry_x, rail, cur.dir).reversed());
        Path::new(
            self.s,
            r,
            rep_entry_x - cur.dir * repeat.m.width,
            rail + repeat.m.height,
            -cur.dir,
        )
        .h_to(x_body)
        .bend_backward(cur.pos.y, true);
    }

    fn bypass(&mut self, node: &LayoutNode, children: &[LayoutNode], rail_y: f64, cur: Cursor) {
        let span = self.p.arc_span();
        let r = self.p.arc_radius;
        let side = span + self.p.arc_margin;
        let right = cur.pos.x + cur.dir * node.m.width;
        let rail = cur.pos.y + rail_y;

        Path::new(self.s, r, cur.pos.x, cur.pos.y, cur.dir)
            .bend_forward(rail, true)
            .h_to_arrow(right - cur.dir * span, self.p.arrow_min_run)
            .bend_forward(cur.pos.y, true);

        let mut x = cur.pos.x;
        self.s.hseg(x, cur.pos.x + cur.dir * side, cur.pos.y);
        x = cur.pos.x + cur.dir * side;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                let gap_end = x + cur.dir * self.p.horizontal_seq_separation;
                self.s.hseg(x, gap_end, cur.pos.y);
                let xj = self.p.snap((x + gap_end) / 2.0);
                self.junction(xj, rail, cur.pos.y, cur.dir);
                x = gap_end;
            }
            self.child(i, child, Cursor::new(x, cur.pos.y, cur.dir));
            x += cur.dir * child.m.width;
        }
        self.s.hseg(x, right, cur.pos.y);
    }

    /// A T-connector between a shared rail and the main line.
    fn junction(&mut self, x: f64, rail: f64, main: f64, dir: f64) {
        let r = self.p.arc_radius;
        let down = main > rail;
        let (t1, t2) = match (dir > 0.0, down) {
            (true, true) => (Turn::EastToSouth, Turn::SouthToEast),
            (true, false) => (Turn::EastToNorth, Turn::NorthToEast),
            (false, true) => (Turn::WestToSouth, Turn::SouthToWest),
            (false, false) => (Turn::WestToNorth, Turn::NorthToWest),
        };
        self.s.corner(x, rail, t1);
        if (main - rail).abs() > 2.0 * r + EPS {
            let lo = rail.min(main) + r;
            let hi = rail.max(main) - r;
            self.s.vseg(x, lo, hi);
        }
        self.s.corner(x, main, t2);
    }

    fn group(
        &mut self,
        node: &LayoutNode,
        child: &LayoutNode,
        caption: Option<&Caption>,
        css_class: Option<&str>,
        cur: Cursor,
    ) {
        let g = &self.p.group;
        let inset = g.horizontal_margin + g.horizontal_padding + g.thickness;
        let x_child = cur.pos.x + cur.dir * inset;
        self.s.hseg(cur.pos.x, x_child, cur.pos.y);
        self.child(0, child, Cursor::new(x_child, cur.pos.y, cur.dir));
        let end_x = x_child + cur.dir * child.m.width;
        let end_y = cur.pos.y + child.m.height;
        self.s
            .hseg(end_x, cur.pos.x + cur.dir * node.m.width, end_y);

        let left = cur.pos.x.min(cur.pos.x + cur.dir * node.m.width);
        let box_x = left + g.horizontal_margin;
        let box_y = cur.pos.y - child.m.up - g.vertical_padding - g.thickness;
        let caption_spec = caption.map(|c| CaptionSpec {
            x: box_x + g.thickness + g.text_horizontal_offset,
            top: box_y - g.text_vertical_offset - c.height,
            ascent: g.measure.ascent(),
            text: &c.text,
            width: c.width,
            href: c.href.as_deref(),
            title: c.title.as_deref(),
        });
        self.s.group_box(&GroupBoxSpec {
            x: box_x,
            y: box_y,
            width: node.m.width - 2.0 * g.horizontal_margin,
            height: child.m.up + child.m.height + child.m.down
                + 2.0 * (g.vertical_padding + g.thickness),
            radius: g.radius,
            caption: caption_spec,
            css_class,
        });
    }
}

fn label(node: &LayoutNode) -> &'static str {
    match &node.kind {
        Kind::Skip => "skip",
        Kind::Token(token) => match token.kind {
            NodeKind::Terminal => "terminal",
            NodeKind::NonTerminal => "non-terminal",
            NodeKind::Comment => "comment",
        },
        Kind::Seq { .. } => "sequence",
        Kind::Stack { .. } => "stack",
        Kind::Choice { .. } => "choice",
        Kind::Loop { .. } => "loop",
        Kind::Bypass { .. } => "bypass",
        Kind::Barrier { .. } => "barrier",
        Kind::Group { .. } => "group",
        Kind::Marker { .. } => "marker",
    }
}

/// Fluent rail builder over a [`Surface`]: horizontal segments plus S- and
/// U-bends assembled from quarter-turn corners.
struct Path<'a> {
    s: &'a mut dyn Surface,
    r: f64,
    x: f64,
    y: f64,
    d: f64,
}

impl<'a> Path<'a> {
    fn new(s: &'a mut dyn Surface, r: f64, x: f64, y: f64, d: f64) -> Self {
        Self { s, r, x, y, d }
    }

    fn h_to(mut self, x: f64) -> Self {
        if (x - self.x).abs() > EPS {
            self.s.hseg(self.x, x, self.y);
            self.d = if x > self.x { 1.0 } else { -1.0 };
            self.x = x;
        }
        self
    }

    /// Like [`Path::h_to`], with a direction arrow at the segment midpoint
    /// when the run is long enough to carry one.
    fn h_to_arrow(self, x: f64, min_run: f64) -> Self {
        let run = (x - self.x).abs();
        let mid = (self.x + x) / 2.0;
        let y = self.y;
        let toward = if x >= self.x { HDir::East } else { HDir::West };
        let mut this = self.h_to(x);
        if run >= min_run {
            this.s.arrow_h(mid, y, toward);
        }
        this
    }

    /// S-bend to another line, exiting with the same horizontal heading.
    fn bend_forward(mut self, y: f64, arrow: bool) -> Self {
        if (y - self.y).abs() < EPS {
            return self;
        }
        let down = y > self.y;
        let xc = self.x + self.d * self.r;
        let (t1, t2) = match (self.d > 0.0, down) {
            (true, true) => (Turn::EastToSouth, Turn::SouthToEast),
            (true, false) => (Turn::EastToNorth, Turn::NorthToEast),
            (false, true) => (Turn::WestToSouth, Turn::SouthToWest),
            (false, false) => (Turn::WestToNorth, Turn::NorthToWest),
        };
        self.run_vertical(xc, y, t1, t2, arrow);
        self.x = xc + self.d * self.r;
        self.y = y;
        self
    }

    /// U-turn to another line, exiting with the opposite heading.
    fn bend_backward(mut self, y: f64, arrow: bool) -> Self {
        if (y - self.y).abs() < EPS {
            self.d = -self.d;
            return self;
        }
        let down = y > self.y;
        let xc = self.x + self.d * self.r;
        let (t1, t2) = match (self.d > 0.0, down) {
            (true, true) => (Turn::EastToSouth, Turn::SouthToWest),
            (true, false) => (Turn::EastToNorth, Turn::NorthToWest),
            (false, true) => (Turn::WestToSouth, Turn::SouthToEast),
            (false, false) => (Turn::WestToNorth, Turn::NorthToEast),
        };
        self.run_vertical(xc, y, t1, t2, arrow);
        self.d = -self.d;
        self.y = y;
        self
    }

    fn run_vertical(&mut self, xc: f64, y: f64, t1: Turn, t2: Turn, arrow: bool) {
        let down = y > self.y;
        self.s.corner(xc, self.y, t1);
        if (y - self.y).abs() > 2.0 * self.r + EPS {
            let lo = self.y.min(y) + self.r;
            let hi = self.y.max(y) - self.r;
            self.s.vseg(xc, lo, hi);
            if arrow {
                let ay = if down {
                    self.y + self.r + 0.5
                } else {
                    self.y - self.r - 0.5
                };
                self.s
                    .arrow_v(xc, ay, if down { VDir::Down } else { VDir::Up });
            }
        }
        self.s.corner(xc, y, t2);
    }
}
