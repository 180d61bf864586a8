//! Row, modal box, and meter painting.
//!
//! Functions here take the display, geometry, and style by reference so the
//! engine can lend them out alongside a mutable item borrow.

#![allow(missing_docs)]

use log::trace;
use serde::{Deserialize, Serialize};

use crate::display::{Color, Display};

use super::geometry::Geometry;
use super::item::{ItemKind, MenuItem, ToggleAction};
use super::text::{center_number, center_text, format_row};

/// How the selected row is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStyle {
    /// Overwrite the row's first column with this glyph.
    Icon(u8),
    /// Swap ink and paper for the whole row.
    Inverted,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self::Icon(16)
    }
}

/// Glyph codes, in the display font's code page, used for row decorations
/// and the meter. Read from the `[glyphs]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub header: u8,
    pub submenu: u8,
    pub meter_filled: u8,
    pub meter_empty: u8,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            header: 4,
            submenu: 175,
            meter_filled: 220,
            meter_empty: 219,
        }
    }
}

/// Presentation choices that do not depend on geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub selection: SelectionStyle,
    pub glyphs: Glyphs,
    pub disabled_text: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            selection: SelectionStyle::default(),
            glyphs: Glyphs::default(),
            disabled_text: "Disabled".to_string(),
        }
    }
}

/// Paint one menu row at screen row `row`.
///
/// Toggle rows query their callback for the indicator state, hence `&mut`.
pub(crate) fn draw_row<D: Display>(
    display: &mut D,
    geometry: &Geometry,
    style: &RenderStyle,
    item: &mut MenuItem,
    row: u16,
    selected: bool,
) {
    let columns = usize::from(geometry.screen_columns);
    let y = geometry.row_y(row);
    let last_x = geometry.screen_columns.saturating_sub(1) * geometry.letter_w;
    let is_header = item.is_header();

    let text = if is_header {
        format_row(&center_text(&item.text, columns.saturating_sub(2)), columns)
    } else {
        format_row(&item.text, columns)
    };

    let (fg, bg) = if selected && !is_header && style.selection == SelectionStyle::Inverted {
        (Color::Paper, Color::Ink)
    } else {
        (Color::Ink, Color::Paper)
    };
    trace!("row {row}: {text:?} selected={selected}");

    display.set_text_color(fg, bg);
    display.set_cursor(0, y);
    display.print(&text);

    if is_header {
        display.set_cursor(0, y);
        display.write_glyph(style.glyphs.header);
        display.set_cursor(last_x, y);
        display.write_glyph(style.glyphs.header);
    } else if let (true, SelectionStyle::Icon(glyph)) = (selected, style.selection) {
        display.set_cursor(0, y);
        display.write_glyph(glyph);
    }

    match &mut item.kind {
        ItemKind::Menu(_) => {
            display.set_cursor(last_x, y);
            display.write_glyph(style.glyphs.submenu);
        }
        ItemKind::Toggle(manage) => {
            let on = manage(ToggleAction::Query);
            let rect = geometry.toggle_rect(row);
            let radius = geometry.toggle_size / 2;
            if on {
                display.fill_round_rect(rect, radius, fg);
            } else {
                display.draw_round_rect(rect, radius, fg);
            }
        }
        _ => {}
    }
}

/// Paper-filled, ink-outlined box; leaves text colors set for box content.
pub(crate) fn draw_modal<D: Display>(display: &mut D, geometry: &Geometry) {
    display.fill_rect(geometry.modal, Color::Paper);
    display.draw_rect(geometry.modal, Color::Ink);
    display.set_text_color(Color::Ink, Color::Paper);
}

/// Centered text on box text line `line`.
pub(crate) fn draw_box_line<D: Display>(display: &mut D, geometry: &Geometry, line: u16, text: &str) {
    display.set_cursor(geometry.box_text_x, geometry.box_line_y(line));
    display.print(&center_text(text, usize::from(geometry.box_columns)));
}

/// Centered text on the box's vertical middle.
pub(crate) fn draw_box_notice<D: Display>(display: &mut D, geometry: &Geometry, text: &str) {
    let y = geometry.modal.y + geometry.modal.h.saturating_sub(geometry.letter_h) / 2;
    display.set_cursor(geometry.box_text_x, y);
    display.print(&center_text(text, usize::from(geometry.box_columns)));
}

/// Box line holding the range value.
pub(crate) const fn value_line(geometry: &Geometry) -> u16 {
    geometry.box_lines / 2
}

/// Box line holding the meter, if the box is tall enough for one.
pub(crate) const fn meter_line(geometry: &Geometry) -> Option<u16> {
    let line = value_line(geometry) + 1;
    if line < geometry.box_lines {
        Some(line)
    } else {
        None
    }
}

pub(crate) fn draw_range_value<D: Display>(display: &mut D, geometry: &Geometry, value: i16) {
    display.set_text_color(Color::Ink, Color::Paper);
    display.set_cursor(geometry.box_text_x, geometry.box_line_y(value_line(geometry)));
    display.print(&center_number(i32::from(value), usize::from(geometry.box_columns)));
}

/// Repaint meter cells `from..to`; cells below `filled` get the filled glyph.
pub(crate) fn draw_meter_cells<D: Display>(
    display: &mut D,
    geometry: &Geometry,
    glyphs: &Glyphs,
    from: u16,
    to: u16,
    filled: u16,
) {
    let Some(line) = meter_line(geometry) else {
        return;
    };
    trace!("meter cells {from}..{to}, filled={filled}");
    display.set_text_color(Color::Ink, Color::Paper);
    display.set_cursor(
        geometry.box_text_x + from * geometry.letter_w,
        geometry.box_line_y(line),
    );
    for cell in from..to {
        display.write_glyph(if cell < filled {
            glyphs.meter_filled
        } else {
            glyphs.meter_empty
        });
    }
}
