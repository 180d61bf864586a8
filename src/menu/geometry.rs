//! Presentation geometry derived from the panel size and text scale.

#![allow(missing_docs)]

use crate::display::{BASE_GLYPH_HEIGHT, BASE_GLYPH_WIDTH, Rect};

/// Fewest text rows a usable geometry has: a header plus one item.
pub const MIN_SCREEN_LINES: u16 = 2;
/// Fewest text columns a usable geometry has: both margins plus one character.
pub const MIN_SCREEN_COLUMNS: u16 = 3;

/// Pixel and cell geometry for one text scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub text_scale: u8,
    /// Glyph cell width in pixels at this scale.
    pub letter_w: u16,
    /// Glyph cell height in pixels at this scale.
    pub letter_h: u16,
    pub screen_columns: u16,
    pub screen_lines: u16,
    /// Modal box outline.
    pub modal: Rect,
    pub box_lines: u16,
    pub box_columns: u16,
    /// Left pixel of the box's text grid.
    pub box_text_x: u16,
    /// Top pixel of the box's text grid.
    pub box_text_y: u16,
    /// Gap between a toggle indicator and its cell edge.
    pub toggle_margin: u16,
    /// Side of the square toggle indicator.
    pub toggle_size: u16,
    /// Left pixel of the toggle indicator in the last column.
    pub toggle_x: u16,
}

impl Geometry {
    /// Derive the geometry for a `width` × `height` panel.
    ///
    /// The glyph cell doubles with each scale step. The modal box covers
    /// `box_area` of each dimension, centered; its text grid is centered in
    /// the box and shrunk by a row or column whenever that leaves less than
    /// `min_margin` pixels to the box edge. Returns `None` for scale 0 or a
    /// cell size that overflows.
    #[must_use]
    pub fn compute(
        width: u16,
        height: u16,
        text_scale: u8,
        box_area: f32,
        min_margin: u16,
    ) -> Option<Self> {
        let multiplier = 1u16.checked_shl(u32::from(text_scale.checked_sub(1)?))?;
        let letter_w = BASE_GLYPH_WIDTH.checked_mul(multiplier)?;
        let letter_h = BASE_GLYPH_HEIGHT.checked_mul(multiplier)?;

        let screen_lines = height / letter_h;
        let screen_columns = width / letter_w;

        let box_w = scale_dimension(width, box_area);
        let box_h = scale_dimension(height, box_area);
        let box_x = (width - box_w) / 2;
        let box_y = (height - box_h) / 2;

        let (box_lines, box_text_y) = fit_grid(box_y, box_h, letter_h, min_margin);
        let (box_columns, box_text_x) = fit_grid(box_x, box_w, letter_w, min_margin);

        let toggle_margin = letter_w / 5;
        let toggle_size = letter_w - 2 * toggle_margin;
        let toggle_x = screen_columns.saturating_sub(1) * letter_w + toggle_margin;

        Some(Self {
            text_scale,
            letter_w,
            letter_h,
            screen_columns,
            screen_lines,
            modal: Rect::new(box_x, box_y, box_w, box_h),
            box_lines,
            box_columns,
            box_text_x,
            box_text_y,
            toggle_margin,
            toggle_size,
            toggle_x,
        })
    }

    /// Whether a menu can be laid out at all.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.screen_lines >= MIN_SCREEN_LINES && self.screen_columns >= MIN_SCREEN_COLUMNS
    }

    /// Factor by which the display enlarges its base glyph at this scale.
    #[must_use]
    pub fn glyph_multiplier(&self) -> u8 {
        u8::try_from(self.letter_w / BASE_GLYPH_WIDTH).unwrap_or(u8::MAX)
    }

    /// Top pixel of screen row `row`.
    #[must_use]
    pub const fn row_y(&self, row: u16) -> u16 {
        row.saturating_mul(self.letter_h)
    }

    /// Top pixel of box text line `line`.
    #[must_use]
    pub const fn box_line_y(&self, line: u16) -> u16 {
        self.box_text_y.saturating_add(line.saturating_mul(self.letter_h))
    }

    /// Toggle indicator square for screen row `row`.
    #[must_use]
    pub const fn toggle_rect(&self, row: u16) -> Rect {
        let y = self.row_y(row) + (self.letter_h - self.toggle_size) / 2;
        Rect::new(self.toggle_x, y, self.toggle_size, self.toggle_size)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_dimension(pixels: u16, fraction: f32) -> u16 {
    let scaled = f32::from(pixels) * fraction.clamp(0.0, 1.0);
    (scaled as u16).min(pixels)
}

/// Cells of `cell` pixels that fit in `span` starting at `start`, and the
/// pixel where the centered grid begins.
fn fit_grid(start: u16, span: u16, cell: u16, min_margin: u16) -> (u16, u16) {
    let mut count = span / cell;
    let mut offset = start + (span - count * cell) / 2;
    if offset - start < min_margin && count > 0 {
        count -= 1;
        offset = start + (span - count * cell) / 2;
    }
    (count, offset)
}
