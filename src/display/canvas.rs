//! In-memory character-cell display.
//!
//! [`TextCanvas`] implements [`Display`] over a grid of base glyph cells so the
//! engine can be driven and inspected without hardware. It keeps enough
//! bookkeeping (commits, clears, rows touched) to assert how much of the
//! screen a gesture repainted.

#![allow(missing_docs)]

use std::collections::BTreeSet;
use std::fmt::Write as _;

use super::{BASE_GLYPH_HEIGHT, BASE_GLYPH_WIDTH, Color, Display, Rect};

/// One base glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    /// Drawn ink-on-paper reversed (paper text on an ink background).
    pub inverted: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            inverted: false,
        }
    }
}

/// Kind of rectangle primitive recorded by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    FillRect,
    DrawRect,
    FillRoundRect { radius: u16 },
    DrawRoundRect { radius: u16 },
}

/// A rectangle primitive as issued by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub rect: Rect,
    pub color: Color,
}

/// Character-cell display backed by memory.
#[derive(Debug, Clone)]
pub struct TextCanvas {
    width_px: u16,
    height_px: u16,
    columns: u16,
    rows: u16,
    cells: Vec<Cell>,
    cursor: (u16, u16),
    fg: Color,
    bg: Color,
    scale: u8,
    shapes: Vec<Shape>,
    commits: usize,
    clears: usize,
    touched_rows: BTreeSet<u16>,
}

impl TextCanvas {
    /// Create a canvas for a panel of `width_px` × `height_px` pixels.
    #[must_use]
    pub fn new(width_px: u16, height_px: u16) -> Self {
        let columns = width_px / BASE_GLYPH_WIDTH;
        let rows = height_px / BASE_GLYPH_HEIGHT;
        Self {
            width_px,
            height_px,
            columns,
            rows,
            cells: vec![Cell::default(); usize::from(columns) * usize::from(rows)],
            cursor: (0, 0),
            fg: Color::Ink,
            bg: Color::Paper,
            scale: 1,
            shapes: Vec::new(),
            commits: 0,
            clears: 0,
            touched_rows: BTreeSet::new(),
        }
    }

    /// Base-cell grid size as `(columns, rows)`.
    #[must_use]
    pub const fn grid_size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    #[must_use]
    pub fn cell(&self, column: u16, row: u16) -> Option<Cell> {
        self.index(column, row).map(|i| self.cells[i])
    }

    /// Text of one base-cell row, trailing blanks included.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        (0..self.columns)
            .filter_map(|c| self.cell(c, row))
            .map(|cell| cell.ch)
            .collect()
    }

    /// Whether any cell of the row is inverted.
    #[must_use]
    pub fn row_inverted(&self, row: u16) -> bool {
        (0..self.columns)
            .filter_map(|c| self.cell(c, row))
            .any(|cell| cell.inverted)
    }

    /// Whole grid, one line per base-cell row.
    #[must_use]
    pub fn frame(&self) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            let _ = writeln!(out, "{}", self.row_text(row).trim_end());
        }
        out
    }

    /// Rectangle primitives issued since the last clear.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub const fn commits(&self) -> usize {
        self.commits
    }

    #[must_use]
    pub const fn clears(&self) -> usize {
        self.clears
    }

    /// Base-cell rows that received text since the last [`Self::reset_stats`].
    #[must_use]
    pub fn touched_rows(&self) -> Vec<u16> {
        self.touched_rows.iter().copied().collect()
    }

    /// Forget commit/clear counts and touched rows. Cell contents are kept.
    pub fn reset_stats(&mut self) {
        self.commits = 0;
        self.clears = 0;
        self.touched_rows.clear();
    }

    fn index(&self, column: u16, row: u16) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| usize::from(row) * usize::from(self.columns) + usize::from(column))
    }

    fn cell_width(&self) -> u16 {
        BASE_GLYPH_WIDTH * u16::from(self.scale)
    }

    fn cell_height(&self) -> u16 {
        BASE_GLYPH_HEIGHT * u16::from(self.scale)
    }

    fn put_char(&mut self, ch: char) {
        if ch == '\n' {
            self.cursor = (0, self.cursor.1.saturating_add(self.cell_height()));
            return;
        }
        let column = self.cursor.0 / BASE_GLYPH_WIDTH;
        let row = self.cursor.1 / BASE_GLYPH_HEIGHT;
        let inverted = self.fg == Color::Paper && self.bg == Color::Ink;
        let span = u16::from(self.scale);
        for dy in 0..span {
            for dx in 0..span {
                let glyph = if dx == 0 && dy == 0 { ch } else { ' ' };
                if let Some(i) = self.index(column + dx, row + dy) {
                    self.cells[i] = Cell {
                        ch: glyph,
                        inverted,
                    };
                    self.touched_rows.insert(row + dy);
                }
            }
        }
        self.cursor.0 = self.cursor.0.saturating_add(self.cell_width());
    }

    fn cells_in(&self, rect: Rect) -> Vec<usize> {
        let mut out = Vec::new();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let x = column * BASE_GLYPH_WIDTH;
                let y = row * BASE_GLYPH_HEIGHT;
                if x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom() {
                    if let Some(i) = self.index(column, row) {
                        out.push(i);
                    }
                }
            }
        }
        out
    }

    fn mark_indicator(&mut self, rect: Rect, ch: char) {
        let column = rect.x / BASE_GLYPH_WIDTH;
        let row = rect.y / BASE_GLYPH_HEIGHT;
        if let Some(i) = self.index(column, row) {
            self.cells[i].ch = ch;
        }
    }
}

impl Display for TextCanvas {
    fn width(&self) -> u16 {
        self.width_px
    }

    fn height(&self) -> u16 {
        self.height_px
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.shapes.clear();
        self.cursor = (0, 0);
        self.clears += 1;
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = (x, y);
    }

    fn set_text_color(&mut self, fg: Color, bg: Color) {
        self.fg = fg;
        self.bg = bg;
    }

    fn set_text_size(&mut self, scale: u8) {
        self.scale = scale.max(1);
    }

    fn print(&mut self, text: &str) {
        for ch in text.chars() {
            self.put_char(ch);
        }
    }

    fn write_glyph(&mut self, code: u8) {
        self.put_char(cp437_char(code));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.shapes.push(Shape {
            kind: ShapeKind::FillRect,
            rect,
            color,
        });
        let inverted = color == Color::Ink;
        for i in self.cells_in(rect) {
            self.cells[i] = Cell { ch: ' ', inverted };
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.shapes.push(Shape {
            kind: ShapeKind::DrawRect,
            rect,
            color,
        });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: u16, color: Color) {
        self.shapes.push(Shape {
            kind: ShapeKind::FillRoundRect { radius },
            rect,
            color,
        });
        self.mark_indicator(rect, '●');
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: u16, color: Color) {
        self.shapes.push(Shape {
            kind: ShapeKind::DrawRoundRect { radius },
            rect,
            color,
        });
        self.mark_indicator(rect, '○');
    }

    fn commit(&mut self) {
        self.commits += 1;
    }
}

/// Map the code-page-437 glyphs the engine uses onto Unicode.
#[must_use]
pub fn cp437_char(code: u8) -> char {
    match code {
        0x20..=0x7e => char::from(code),
        4 => '♦',
        7 => '•',
        9 => '○',
        16 => '►',
        17 => '◄',
        26 => '→',
        175 => '»',
        176 => '░',
        177 => '▒',
        178 => '▓',
        219 => '█',
        220 => '▄',
        223 => '▀',
        254 => '■',
        _ => '?',
    }
}
