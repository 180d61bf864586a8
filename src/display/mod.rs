//! Display collaborator contract.
//!
//! The engine draws exclusively through [`Display`]. Drivers for real panels
//! (PCD8544, ST7735, SSD1306, ...) implement it over their bus; host tests and
//! the simulator use the in-memory [`canvas::TextCanvas`].

#![allow(missing_docs)]

pub mod canvas;

/// Width in pixels of one glyph cell at text scale 1.
pub const BASE_GLYPH_WIDTH: u16 = 6;
/// Height in pixels of one glyph cell at text scale 1.
pub const BASE_GLYPH_HEIGHT: u16 = 8;

/// The two symbolic colors the engine uses. Pixel encoding is up to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Foreground: text and outlines.
    Ink,
    /// Background.
    Paper,
}

impl Color {
    /// The other color.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Ink => Self::Paper,
            Self::Paper => Self::Ink,
        }
    }
}

/// Pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }
}

/// Capabilities the menu engine needs from a display driver.
///
/// Text is drawn at the cursor with the current text color and size; the
/// cursor advances one glyph cell per character. Nothing is guaranteed to
/// reach the panel until [`Display::commit`].
pub trait Display {
    /// Width in pixels.
    fn width(&self) -> u16;
    /// Height in pixels.
    fn height(&self) -> u16;
    /// Clear the whole surface to paper.
    fn clear(&mut self);
    /// Move the text cursor to a pixel position.
    fn set_cursor(&mut self, x: u16, y: u16);
    /// Set text foreground and background colors.
    fn set_text_color(&mut self, fg: Color, bg: Color);
    /// Set the text scale factor (1 = base glyph cell).
    fn set_text_size(&mut self, scale: u8);
    /// Print text at the cursor.
    fn print(&mut self, text: &str);
    /// Print text and move the cursor to the start of the next text line.
    fn println(&mut self, text: &str) {
        self.print(text);
        self.print("\n");
    }
    /// Write one glyph by its code in the display font.
    fn write_glyph(&mut self, code: u8);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn fill_round_rect(&mut self, rect: Rect, radius: u16, color: Color);
    fn draw_round_rect(&mut self, rect: Rect, radius: u16, color: Color);
    /// Flush buffered drawing to the physical device. No-op for unbuffered panels.
    fn commit(&mut self);
}

impl<D: Display + ?Sized> Display for &mut D {
    fn width(&self) -> u16 {
        (**self).width()
    }
    fn height(&self) -> u16 {
        (**self).height()
    }
    fn clear(&mut self) {
        (**self).clear();
    }
    fn set_cursor(&mut self, x: u16, y: u16) {
        (**self).set_cursor(x, y);
    }
    fn set_text_color(&mut self, fg: Color, bg: Color) {
        (**self).set_text_color(fg, bg);
    }
    fn set_text_size(&mut self, scale: u8) {
        (**self).set_text_size(scale);
    }
    fn print(&mut self, text: &str) {
        (**self).print(text);
    }
    fn println(&mut self, text: &str) {
        (**self).println(text);
    }
    fn write_glyph(&mut self, code: u8) {
        (**self).write_glyph(code);
    }
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color);
    }
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        (**self).draw_rect(rect, color);
    }
    fn fill_round_rect(&mut self, rect: Rect, radius: u16, color: Color) {
        (**self).fill_round_rect(rect, radius, color);
    }
    fn draw_round_rect(&mut self, rect: Rect, radius: u16, color: Color) {
        (**self).draw_round_rect(rect, radius, color);
    }
    fn commit(&mut self) {
        (**self).commit();
    }
}
