//! Navigation state machine: interprets down/up/enter against the current
//! table and repaints what changed.
//!
//! Gestures never fail. Misconfigured tables (a submenu item without a child,
//! a back item with no recorded parent, a table missing its terminator) are
//! logged at debug level and leave the state untouched.

#![allow(missing_docs)]

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::core::config::MenuConfig;
use crate::core::errors::{MenuError, Result};
use crate::display::Display;

use super::geometry::Geometry;
use super::history::{ReturnStack, SavedPosition};
use super::item::{
    CommandOutcome, ItemKind, ItemRef, ItemType, MenuItem, MeterBounds, RangeAdjust, ToggleAction,
};
use super::render::{self, RenderStyle, SelectionStyle};
use super::tree::{MenuTree, TableId};

/// What up/down currently mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Up/down move the cursor.
    Navigate,
    /// Up/down step the selected range item.
    RangeEdit {
        /// Filled meter cells last painted; `None` until the first paint.
        meter_level: Option<u16>,
        /// Meter span chosen when edit mode was entered.
        bounds: Option<MeterBounds>,
    },
    /// A disabled item's notice is shown; only enter (to dismiss) is honoured.
    DisabledNotice,
}

impl EditMode {
    #[must_use]
    pub const fn is_navigating(&self) -> bool {
        matches!(self, Self::Navigate)
    }
}

/// Optional per-gesture range parameters.
///
/// Unset fields fall back to the bounds chosen on entering edit mode, then
/// to the range item's own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeHint {
    pub bounds: Option<MeterBounds>,
    pub step: Option<i16>,
}

impl RangeHint {
    #[must_use]
    pub const fn bounds(min: i16, max: i16) -> Self {
        Self {
            bounds: Some(MeterBounds::new(min, max)),
            step: None,
        }
    }

    #[must_use]
    pub const fn step(step: i16) -> Self {
        Self {
            bounds: None,
            step: Some(step),
        }
    }

    #[must_use]
    pub const fn with_step(mut self, step: i16) -> Self {
        self.step = Some(step);
        self
    }
}

/// Cursor position and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub table: TableId,
    pub index: usize,
    /// First item index drawn below the (optional) header row.
    pub scroll_offset: usize,
    /// 1 when the table starts with a header, else 0.
    pub base_offset: usize,
    pub edit_mode: EditMode,
}

impl NavigationState {
    const fn at(table: TableId) -> Self {
        Self {
            table,
            index: 0,
            scroll_offset: 0,
            base_offset: 0,
            edit_mode: EditMode::Navigate,
        }
    }

    const fn saved(&self) -> SavedPosition {
        SavedPosition {
            table: self.table,
            index: self.index,
            scroll_offset: self.scroll_offset,
            base_offset: self.base_offset,
        }
    }
}

/// Geometry inputs kept so the text scale can be changed later.
#[derive(Debug, Clone, Copy)]
struct BoxSettings {
    area: f32,
    min_margin: u16,
}

/// Menu navigation and rendering over a [`Display`].
pub struct MenuEngine<D: Display> {
    tree: MenuTree,
    display: D,
    state: NavigationState,
    geometry: Geometry,
    style: RenderStyle,
    box_settings: BoxSettings,
    scan_limit: usize,
    returns: ReturnStack,
    /// Table a child was last entered from; where its back item leads.
    back_links: HashMap<TableId, TableId>,
}

impl<D: Display> MenuEngine<D> {
    /// Bind `tree` to `display`, starting at the tree's root.
    ///
    /// Nothing is drawn until [`Self::draw_menu`] is called.
    pub fn new(tree: MenuTree, display: D, config: &MenuConfig) -> Result<Self> {
        let root = tree.root().ok_or_else(|| MenuError::InvalidLayout {
            details: "menu tree has no tables".to_string(),
        })?;
        if tree.table(root).is_none() {
            return Err(MenuError::InvalidTable {
                table: root.index(),
                details: "root table does not exist".to_string(),
            });
        }

        let scale = config.display.text_scale;
        let geometry = Geometry::compute(
            display.width(),
            display.height(),
            scale,
            config.display.box_area,
            config.display.min_box_margin_px,
        )
        .filter(Geometry::is_usable)
        .ok_or_else(|| MenuError::InvalidConfig {
            details: format!(
                "display.text_scale {scale} leaves no usable rows on a {}x{} display",
                display.width(),
                display.height()
            ),
        })?;

        let mut display = display;
        display.set_text_size(geometry.glyph_multiplier());

        Ok(Self {
            tree,
            display,
            state: NavigationState::at(root),
            geometry,
            style: RenderStyle {
                selection: config.selection_style(),
                glyphs: config.glyphs(),
                disabled_text: config.text.disabled.clone(),
            },
            box_settings: BoxSettings {
                area: config.display.box_area,
                min_margin: config.display.min_box_margin_px,
            },
            scan_limit: config.navigation.scan_limit.max(1),
            returns: ReturnStack::new(config.navigation.return_depth),
            back_links: HashMap::new(),
        })
    }

    // ──────────────────── accessors ────────────────────

    #[must_use]
    pub const fn current_table(&self) -> TableId {
        self.state.table
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.state.index
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.state.scroll_offset
    }

    #[must_use]
    pub const fn base_offset(&self) -> usize {
        self.state.base_offset
    }

    #[must_use]
    pub const fn edit_mode(&self) -> EditMode {
        self.state.edit_mode
    }

    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub const fn selection_style(&self) -> SelectionStyle {
        self.style.selection
    }

    /// Text rows on screen, header row included.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        usize::from(self.geometry.screen_lines)
    }

    /// Remembered callers for commands that return.
    #[must_use]
    pub const fn return_stack(&self) -> &ReturnStack {
        &self.returns
    }

    /// Where the back item of `table` currently leads.
    #[must_use]
    pub fn back_link(&self, table: TableId) -> Option<TableId> {
        self.back_links.get(&table).copied()
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MenuItem> {
        self.tree
            .table(self.state.table)?
            .items
            .get(self.state.index)
    }

    #[must_use]
    pub fn current_item_type(&self) -> Option<ItemType> {
        self.current_item().map(MenuItem::item_type)
    }

    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    #[must_use]
    pub const fn tree(&self) -> &MenuTree {
        &self.tree
    }

    #[must_use]
    pub fn into_parts(self) -> (MenuTree, D) {
        (self.tree, self.display)
    }

    // ──────────────────── gestures ────────────────────

    pub fn down(&mut self) {
        self.down_with(RangeHint::default());
    }

    pub fn up(&mut self) {
        self.up_with(RangeHint::default());
    }

    pub fn enter(&mut self) {
        self.enter_with(RangeHint::default());
    }

    /// Move the cursor down, or step the edited range value down.
    pub fn down_with(&mut self, hint: RangeHint) {
        match self.state.edit_mode {
            EditMode::DisabledNotice => trace!("down ignored while notice is shown"),
            EditMode::RangeEdit { .. } => self.adjust_range(hint, -1),
            EditMode::Navigate => self.move_down(),
        }
    }

    /// Move the cursor up, or step the edited range value up.
    pub fn up_with(&mut self, hint: RangeHint) {
        match self.state.edit_mode {
            EditMode::DisabledNotice => trace!("up ignored while notice is shown"),
            EditMode::RangeEdit { .. } => self.adjust_range(hint, 1),
            EditMode::Navigate => self.move_up(),
        }
    }

    /// Activate the selected item.
    pub fn enter_with(&mut self, hint: RangeHint) {
        let table = self.state.table;
        let index = self.state.index;
        let navigating = self.state.edit_mode.is_navigating();
        let Some(item) = self.item_mut(table, index) else {
            debug!("enter: no item at {}:{index}", table.index());
            return;
        };

        if item.disabled {
            self.toggle_disabled_notice();
            return;
        }

        match &mut item.kind {
            ItemKind::Header => trace!("enter on header ignored"),
            ItemKind::Menu(child) => {
                let child = *child;
                self.descend(child);
            }
            ItemKind::Range(range) => {
                let bounds = hint.bounds.or(range.bounds);
                if navigating {
                    let value = (range.manage)(RangeAdjust::Query);
                    self.open_range_editor(value, bounds);
                } else {
                    (range.manage)(RangeAdjust::Commit);
                    self.state.edit_mode = EditMode::Navigate;
                    self.draw_menu();
                }
            }
            ItemKind::Toggle(manage) => {
                let on = manage(ToggleAction::Flip);
                trace!("toggle {}:{index} -> {on}", table.index());
                self.draw_item(index);
                self.display.commit();
            }
            ItemKind::Command(action) => {
                let outcome = action(&ItemRef {
                    table,
                    index,
                    text: &item.text,
                });
                self.finish_command(outcome);
            }
            ItemKind::EndOfMenu(hook) => {
                if let Some(hook) = hook {
                    hook(&ItemRef {
                        table,
                        index,
                        text: &item.text,
                    });
                }
                self.go_back();
            }
        }
    }

    // ──────────────────── navigation ────────────────────

    fn move_down(&mut self) {
        let index = self.state.index;
        let Some(table) = self.tree.table(self.state.table) else {
            return;
        };
        let Some(item) = table.items.get(index) else {
            return;
        };
        if item.is_terminator() {
            return;
        }
        if index + 1 >= table.items.len().min(self.scan_limit) {
            debug!(
                "table {} has no end-of-menu item within {} items",
                self.state.table.index(),
                self.scan_limit
            );
            return;
        }

        self.state.index += 1;
        if self.state.index - self.state.scroll_offset >= self.visible_rows() {
            self.state.scroll_offset += 1;
            self.draw_menu();
        } else {
            self.draw_item(index);
            self.draw_item(index + 1);
            self.display.commit();
        }
    }

    fn move_up(&mut self) {
        let index = self.state.index;
        if index == 0 {
            return;
        }
        let Some(table) = self.tree.table(self.state.table) else {
            return;
        };
        if table.items.get(index - 1).is_none_or(MenuItem::is_header) {
            return;
        }

        self.state.index -= 1;
        if self.state.base_offset + self.state.scroll_offset > self.state.index {
            self.state.scroll_offset = self.state.scroll_offset.saturating_sub(1);
            self.draw_menu();
        } else {
            self.draw_item(index - 1);
            self.draw_item(index);
            self.display.commit();
        }
    }

    fn descend(&mut self, child: Option<TableId>) {
        let Some(child) = child.filter(|id| self.tree.table(*id).is_some()) else {
            debug!(
                "menu item {}:{} has no child table",
                self.state.table.index(),
                self.state.index
            );
            return;
        };
        self.returns.push(self.state.saved());
        self.back_links.insert(child, self.state.table);
        trace!("descend {} -> {}", self.state.table.index(), child.index());
        self.switch_to(child);
    }

    fn go_back(&mut self) {
        self.returns.clear();
        match self.back_links.get(&self.state.table).copied() {
            Some(parent) => {
                trace!("back {} -> {}", self.state.table.index(), parent.index());
                self.switch_to(parent);
            }
            None => debug!(
                "back item of table {} has no parent to return to",
                self.state.table.index()
            ),
        }
    }

    fn finish_command(&mut self, outcome: CommandOutcome) {
        match outcome {
            CommandOutcome::Stay => self.returns.clear(),
            CommandOutcome::Return => match self.returns.pop() {
                Some(saved) => {
                    self.state.table = saved.table;
                    self.state.index = saved.index;
                    self.state.scroll_offset = saved.scroll_offset;
                    self.state.base_offset = saved.base_offset;
                    self.draw_menu();
                }
                None => debug!("command asked to return but no caller is remembered"),
            },
        }
    }

    fn switch_to(&mut self, table: TableId) {
        self.state = NavigationState::at(table);
        self.draw_menu();
    }

    // ──────────────────── modal editors ────────────────────

    fn toggle_disabled_notice(&mut self) {
        if self.state.edit_mode == EditMode::DisabledNotice {
            self.state.edit_mode = EditMode::Navigate;
            self.draw_menu();
        } else {
            self.state.edit_mode = EditMode::DisabledNotice;
            self.paint_disabled_notice();
        }
    }

    fn paint_disabled_notice(&mut self) {
        let Self {
            tree,
            display,
            state,
            geometry,
            style,
            ..
        } = self;
        let notice = tree
            .table(state.table)
            .and_then(|t| t.items.get(state.index))
            .and_then(|item| item.disabled_text.as_deref())
            .unwrap_or(style.disabled_text.as_str());
        render::draw_modal(display, geometry);
        if geometry.box_lines >= 1 {
            render::draw_box_notice(display, geometry, notice);
        }
        display.commit();
    }

    fn open_range_editor(&mut self, value: i16, bounds: Option<MeterBounds>) {
        self.state.edit_mode = EditMode::RangeEdit {
            meter_level: None,
            bounds,
        };
        self.paint_range_editor(value);
    }

    /// Box with label, value and meter. Forgets the painted meter level.
    fn paint_range_editor(&mut self, value: i16) {
        if let EditMode::RangeEdit { meter_level, .. } = &mut self.state.edit_mode {
            *meter_level = None;
        }
        let label = self
            .current_item()
            .map(|item| item.text.to_string())
            .unwrap_or_default();
        render::draw_modal(&mut self.display, &self.geometry);
        render::draw_box_line(&mut self.display, &self.geometry, 0, &label);
        self.show_range_value(value);
        self.display.commit();
    }

    fn adjust_range(&mut self, hint: RangeHint, direction: i16) {
        let table = self.state.table;
        let index = self.state.index;
        let Some(ItemKind::Range(range)) = self.item_mut(table, index).map(|item| &mut item.kind)
        else {
            debug!("range edit on a non-range item at {}:{index}", table.index());
            self.state.edit_mode = EditMode::Navigate;
            return;
        };
        let step = hint.step.unwrap_or(range.step);
        let value = (range.manage)(RangeAdjust::Step(step.saturating_mul(direction)));
        let item_bounds = range.bounds;
        if let EditMode::RangeEdit { bounds, .. } = &mut self.state.edit_mode {
            if hint.bounds.is_some() {
                *bounds = hint.bounds;
            } else if bounds.is_none() {
                *bounds = item_bounds;
            }
        }
        self.show_range_value(value);
        self.display.commit();
    }

    fn show_range_value(&mut self, value: i16) {
        render::draw_range_value(&mut self.display, &self.geometry, value);
        let EditMode::RangeEdit {
            meter_level,
            bounds: Some(bounds),
        } = self.state.edit_mode
        else {
            return;
        };
        if !bounds.is_drawable() {
            return;
        }
        let cells = self.geometry.box_columns;
        let filled = bounds.fill_cells(value, cells);
        let (from, to) = match meter_level {
            None => (0, cells),
            Some(previous) if previous == filled => return,
            Some(previous) => (previous.min(filled), previous.max(filled)),
        };
        render::draw_meter_cells(
            &mut self.display,
            &self.geometry,
            &self.style.glyphs,
            from,
            to,
            filled,
        );
        self.state.edit_mode = EditMode::RangeEdit {
            meter_level: Some(filled),
            bounds: Some(bounds),
        };
    }

    // ──────────────────── drawing ────────────────────

    /// Clear the display and paint the visible window of the current table.
    pub fn draw_menu(&mut self) {
        self.display.clear();
        self.display.set_text_size(self.geometry.glyph_multiplier());

        let Some(table) = self.tree.table(self.state.table) else {
            debug!("current table {} does not exist", self.state.table.index());
            self.display.commit();
            return;
        };
        let has_header = table.has_header();
        let len = table.items.len();
        if has_header {
            self.state.base_offset = 1;
            if self.state.index == 0 {
                self.state.index = 1;
            }
        } else {
            self.state.base_offset = 0;
        }

        let first = self.state.scroll_offset + self.state.base_offset;
        let end = (self.visible_rows() + self.state.scroll_offset)
            .min(len)
            .min(self.scan_limit);
        for i in 0..end {
            if (i == 0 && has_header) || i >= first {
                self.draw_item(i);
            } else {
                trace!("item {i} scrolled out");
            }
            if self.item_mut(self.state.table, i).is_some_and(|item| item.is_terminator()) {
                break;
            }
        }
        self.display.commit();
    }

    /// Repaint item `index` of the current table if it is on screen.
    fn draw_item(&mut self, index: usize) {
        let Self {
            tree,
            display,
            state,
            geometry,
            style,
            ..
        } = self;
        let Some(table) = tree.table_mut(state.table) else {
            return;
        };
        let has_header = table.has_header();
        let Some(item) = table.items.get_mut(index) else {
            return;
        };
        let row = if index == 0 && has_header {
            0
        } else if index >= state.scroll_offset {
            index - state.scroll_offset
        } else {
            return;
        };
        let Ok(row) = u16::try_from(row) else {
            return;
        };
        if row >= geometry.screen_lines {
            return;
        }
        render::draw_row(display, geometry, style, item, row, index == state.index);
    }

    fn item_mut(&mut self, table: TableId, index: usize) -> Option<&mut MenuItem> {
        self.tree.table_mut(table)?.items.get_mut(index)
    }

    // ──────────────────── presentation ────────────────────

    /// Switch between icon and inverted selection; redraws when navigating.
    pub fn set_selection_style(&mut self, selection: SelectionStyle) {
        self.style.selection = selection;
        if self.state.edit_mode.is_navigating() {
            self.draw_menu();
        }
    }

    /// Change the text scale and recompute all geometry.
    ///
    /// A scale that leaves fewer than two rows or three columns is rejected
    /// with a warning and the current geometry is kept.
    pub fn set_text_scale(&mut self, scale: u8) {
        let Some(geometry) = Geometry::compute(
            self.display.width(),
            self.display.height(),
            scale,
            self.box_settings.area,
            self.box_settings.min_margin,
        )
        .filter(Geometry::is_usable) else {
            warn!(
                "text scale {scale} leaves no usable rows on a {}x{} display; keeping {}",
                self.display.width(),
                self.display.height(),
                self.geometry.text_scale
            );
            return;
        };
        trace!(
            "text scale {scale}: {}x{} cells, box {}x{}",
            geometry.screen_columns, geometry.screen_lines, geometry.box_columns, geometry.box_lines
        );
        self.display.set_text_size(geometry.glyph_multiplier());
        self.geometry = geometry;
        self.reconcile_viewport();

        match self.state.edit_mode {
            EditMode::Navigate => self.draw_menu(),
            EditMode::RangeEdit { .. } => {
                let table = self.state.table;
                let index = self.state.index;
                if let Some(ItemKind::Range(range)) =
                    self.item_mut(table, index).map(|item| &mut item.kind)
                {
                    let value = (range.manage)(RangeAdjust::Query);
                    self.paint_range_editor(value);
                }
            }
            EditMode::DisabledNotice => self.paint_disabled_notice(),
        }
    }

    /// Restore `scroll_offset + base_offset <= index < scroll_offset + rows`.
    fn reconcile_viewport(&mut self) {
        let rows = self.visible_rows();
        let state = &mut self.state;
        if state.index >= state.scroll_offset + rows {
            state.scroll_offset = state.index + 1 - rows;
        }
        if state.scroll_offset + state.base_offset > state.index {
            state.scroll_offset = state.index.saturating_sub(state.base_offset);
        }
    }
}
