//! The character-grid back-end.
//!
//! A fixed-size grid of cells with deterministic collision behavior:
//! box-drawing rails merge by edge-set union (a `─` meeting a `│` becomes a
//! `┼`), while box borders, label text, markers and arrows are stamped raw
//! and win over rails. Continuous coordinates floor to cells; the text
//! profile keeps every line on a whole cell, so only quarter-turn corners
//! land on half-cells and they floor onto the intended column.

use shunter_core::NodeKind;

use crate::settings::EndClass;
use crate::surface::{GroupBoxSpec, HDir, NodeBoxSpec, Surface, Turn, VDir};

const EDGE_N: u8 = 1;
const EDGE_S: u8 = 2;
const EDGE_E: u8 = 4;
const EDGE_W: u8 = 8;

/// Second cell of a wide glyph; skipped when serializing.
const WIDE_SHADOW: char = '\u{0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Raw(char),
    Edges(u8),
}

fn edge_glyph(edges: u8) -> char {
    match edges {
        0 => ' ',
        EDGE_E => '╶',
        EDGE_W => '╴',
        EDGE_N => '╵',
        EDGE_S => '╷',
        e if e == EDGE_E | EDGE_W => '─',
        e if e == EDGE_N | EDGE_S => '│',
        e if e == EDGE_E | EDGE_S => '╭',
        e if e == EDGE_S | EDGE_W => '╮',
        e if e == EDGE_N | EDGE_E => '╰',
        e if e == EDGE_N | EDGE_W => '╯',
        e if e == EDGE_N | EDGE_E | EDGE_S => '├',
        e if e == EDGE_N | EDGE_S | EDGE_W => '┤',
        e if e == EDGE_E | EDGE_S | EDGE_W => '┬',
        e if e == EDGE_N | EDGE_E | EDGE_W => '┴',
        _ => '┼',
    }
}

struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    fn index(&self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    fn set_edges(&mut self, col: i64, row: i64, edges: u8) {
        let Some(i) = self.index(col, row) else {
            return;
        };
        match self.cells[i] {
            Cell::Empty => self.cells[i] = Cell::Edges(edges),
            Cell::Edges(existing) => self.cells[i] = Cell::Edges(existing | edges),
            // raw glyphs (box borders, text) win over rails
            Cell::Raw(_) => {}
        }
    }

    fn set_raw(&mut self, col: i64, row: i64, ch: char) {
        let Some(i) = self.index(col, row) else {
            return;
        };
        self.cells[i] = Cell::Raw(ch);
    }

    fn write_text(&mut self, col: i64, row: i64, text: &str) {
        let mut col = col;
        for ch in text.chars() {
            self.set_raw(col, row, ch);
            col += 1;
            if unicode_cells(ch) == 2 {
                self.set_raw(col, row, WIDE_SHADOW);
                col += 1;
            }
        }
    }

    fn to_string_trimmed(&self) -> String {
        let mut out = String::new();
        for row in 0..self.height {
            let mut line = String::with_capacity(self.width);
            for col in 0..self.width {
                match self.cells[row * self.width + col] {
                    Cell::Empty => line.push(' '),
                    Cell::Raw(WIDE_SHADOW) => {}
                    Cell::Raw(ch) => line.push(ch),
                    Cell::Edges(edges) => line.push(edge_glyph(edges)),
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn unicode_cells(ch: char) -> usize {
    use shunter_core::{CellTextMeasure, TextMeasure};
    let mut buf = [0u8; 4];
    CellTextMeasure
        .measure(ch.encode_utf8(&mut buf))
        .map(|m| m.width as usize)
        .unwrap_or(1)
}

fn col(x: f64) -> i64 {
    x.floor() as i64
}

fn row(y: f64) -> i64 {
    y.floor() as i64
}

pub(crate) struct TextSurface {
    grid: Grid,
    end_class: EndClass,
    debug: bool,
    debug_entries: Vec<String>,
}

impl TextSurface {
    pub fn new(width: usize, height: usize, end_class: EndClass, debug: bool) -> Self {
        Self {
            grid: Grid::new(width, height),
            end_class,
            debug,
            debug_entries: Vec::new(),
        }
    }

    pub fn finish(self) -> String {
        let mut out = self.grid.to_string_trimmed();
        if self.debug {
            for entry in &self.debug_entries {
                out.push_str("~ ");
                out.push_str(entry);
                out.push('\n');
            }
        }
        out
    }
}

impl Surface for TextSurface {
    fn hseg(&mut self, x1: f64, x2: f64, y: f64) {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let r = row(y);
        for c in col(lo)..col(hi) {
            self.grid.set_edges(c, r, EDGE_E | EDGE_W);
        }
    }

    fn vseg(&mut self, x: f64, y1: f64, y2: f64) {
        let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let c = col(x);
        let mut r = lo.ceil() as i64;
        while (r as f64) <= hi {
            self.grid.set_edges(c, r, EDGE_N | EDGE_S);
            r += 1;
        }
    }

    fn corner(&mut self, x: f64, y: f64, turn: Turn) {
        // Edge set: the side the line comes in from, plus the outgoing side.
        let edges = match turn {
            Turn::EastToSouth => EDGE_W | EDGE_S,
            Turn::EastToNorth => EDGE_W | EDGE_N,
            Turn::WestToSouth => EDGE_E | EDGE_S,
            Turn::WestToNorth => EDGE_E | EDGE_N,
            Turn::SouthToEast => EDGE_N | EDGE_E,
            Turn::SouthToWest => EDGE_N | EDGE_W,
            Turn::NorthToEast => EDGE_S | EDGE_E,
            Turn::NorthToWest => EDGE_S | EDGE_W,
        };
        self.grid.set_edges(col(x), row(y), edges);
    }

    fn arrow_h(&mut self, x: f64, y: f64, toward: HDir) {
        let glyph = match toward {
            HDir::East => '→',
            HDir::West => '←',
        };
        self.grid.set_raw(col(x), row(y), glyph);
    }

    fn arrow_v(&mut self, x: f64, y: f64, toward: VDir) {
        let glyph = match toward {
            VDir::Down => '↓',
            VDir::Up => '↑',
        };
        self.grid.set_raw(col(x), row(y), glyph);
    }

    fn node_box(&mut self, spec: &NodeBoxSpec<'_>) {
        // left, right, top-left, top-right, bottom-left, bottom-right,
        // horizontal, vertical
        let ch: [char; 8] = match spec.kind {
            NodeKind::Terminal => ['┤', '├', '┌', '┐', '└', '┘', '─', '│'],
            NodeKind::NonTerminal => ['╢', '╟', '╔', '╗', '╚', '╝', '═', '║'],
            NodeKind::Comment => ['╴', '╶', ' ', ' ', ' ', ' ', ' ', ' '],
        };
        let x0 = col(spec.x);
        let x1 = x0 + spec.width as i64 - 1;
        let top = row(spec.y);
        let bottom = row(spec.y + spec.height);
        let line = row(spec.line_y);

        self.grid.set_raw(x0, top, ch[2]);
        self.grid.set_raw(x1, top, ch[3]);
        self.grid.set_raw(x0, bottom, ch[4]);
        self.grid.set_raw(x1, bottom, ch[5]);
        for c in x0 + 1..x1 {
            self.grid.set_raw(c, top, ch[6]);
            self.grid.set_raw(c, bottom, ch[6]);
        }
        for r in top + 1..bottom {
            self.grid.set_raw(x0, r, ch[7]);
            self.grid.set_raw(x1, r, ch[7]);
            for c in x0 + 1..x1 {
                self.grid.set_raw(c, r, ' ');
            }
        }
        self.grid.set_raw(x0, line, ch[0]);
        self.grid.set_raw(x1, line, ch[1]);
        self.grid
            .write_text(x0 + spec.horizontal_padding as i64, line, spec.text);
    }

    fn group_box(&mut self, spec: &GroupBoxSpec<'_>) {
        let x0 = col(spec.x);
        let x1 = x0 + spec.width as i64 - 1;
        let top = row(spec.y);
        let bottom = row(spec.y + spec.height);

        self.grid.set_edges(x0, top, EDGE_E | EDGE_S);
        self.grid.set_edges(x1, top, EDGE_S | EDGE_W);
        self.grid.set_edges(x0, bottom, EDGE_N | EDGE_E);
        self.grid.set_edges(x1, bottom, EDGE_N | EDGE_W);
        for c in x0 + 1..x1 {
            self.grid.set_edges(c, top, EDGE_E | EDGE_W);
            self.grid.set_edges(c, bottom, EDGE_E | EDGE_W);
        }
        for r in top + 1..bottom {
            self.grid.set_edges(x0, r, EDGE_N | EDGE_S);
            self.grid.set_edges(x1, r, EDGE_N | EDGE_S);
        }

        if let Some(caption) = &spec.caption {
            let cx = col(caption.x);
            let cy = row(caption.top);
            self.grid.write_text(cx, cy, caption.text);
            if cy == top {
                // caption sits on the border row; detach it visually
                self.grid.set_raw(cx - 1, cy, '╸');
                self.grid.set_raw(cx + caption.width as i64, cy, '╺');
            }
        }
    }

    fn marker(&mut self, x: f64, y: f64, left_shape: bool, width: f64, _projected: f64) {
        let x0 = col(x);
        let r = row(y);
        let w = width as i64;
        for c in x0..x0 + w {
            self.grid.set_raw(c, r, '─');
        }
        if left_shape {
            self.grid.set_raw(x0, r, '├');
            if matches!(self.end_class, EndClass::Complex) {
                self.grid.set_raw(x0 + 1, r, '┼');
            }
        } else {
            self.grid.set_raw(x0 + w - 1, r, '┤');
            if matches!(self.end_class, EndClass::Complex) {
                self.grid.set_raw(x0 + w - 2, r, '┼');
            }
        }
    }

    fn push_group(&mut self, label: &'static str, debug_id: &str) {
        if self.debug && !debug_id.is_empty() {
            self.debug_entries.push(format!("{debug_id} {label}"));
        }
    }

    fn pop_group(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rails_merge_into_junctions() {
        let mut grid = Grid::new(5, 3);
        for c in 0..5 {
            grid.set_edges(c, 1, EDGE_E | EDGE_W);
        }
        for r in 0..3 {
            grid.set_edges(2, r, EDGE_N | EDGE_S);
        }
        let out = grid.to_string_trimmed();
        assert_eq!(out, "  │\n──┼──\n  │\n");
    }

    #[test]
    fn raw_glyphs_win_over_rails() {
        let mut grid = Grid::new(3, 1);
        grid.set_raw(1, 0, 'A');
        grid.set_edges(1, 0, EDGE_E | EDGE_W);
        assert_eq!(grid.to_string_trimmed(), " A\n");
    }

    #[test]
    fn corners_render_rounded() {
        let mut grid = Grid::new(2, 2);
        grid.set_edges(0, 0, EDGE_E | EDGE_S);
        grid.set_edges(1, 1, EDGE_N | EDGE_W);
        assert_eq!(grid.to_string_trimmed(), "╭\n ╯\n");
    }

    #[test]
    fn wide_text_occupies_two_cells() {
        let mut grid = Grid::new(4, 1);
        grid.write_text(0, 0, "\u{6f22}x");
        assert_eq!(grid.to_string_trimmed(), "\u{6f22}x\n");
    }
}
