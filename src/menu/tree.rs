//! Menu tables stored in an index-addressed arena.
//!
//! Tables reference their children by [`TableId`] instead of pointers. The
//! engine never rewrites items to remember where "back" leads; it keeps that
//! link itself (see [`crate::menu::engine`]).

#![allow(missing_docs)]

use crate::core::errors::{MenuError, Result};

use super::item::{ItemKind, MenuItem};

/// Handle to a table inside a [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub(crate) usize);

impl TableId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One sibling sequence, terminated by an end-of-menu item.
#[derive(Debug, Default)]
pub struct MenuTable {
    pub items: Vec<MenuItem>,
}

impl MenuTable {
    #[must_use]
    pub fn has_header(&self) -> bool {
        self.items.first().is_some_and(MenuItem::is_header)
    }

    /// Index of the first terminator within the first `limit` items.
    #[must_use]
    pub fn terminator(&self, limit: usize) -> Option<usize> {
        self.items.iter().take(limit).position(MenuItem::is_terminator)
    }
}

/// All tables of a menu, plus the root the engine starts in.
#[derive(Debug, Default)]
pub struct MenuTree {
    tables: Vec<MenuTable>,
    root: Option<TableId>,
}

impl MenuTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an empty table; fill it later with [`Self::set_items`].
    ///
    /// Lets a parent reference a child (or a child its sibling) before the
    /// child's items exist.
    pub fn reserve(&mut self) -> TableId {
        self.tables.push(MenuTable::default());
        TableId(self.tables.len() - 1)
    }

    /// Add a table and return its handle. The first table added is the root
    /// unless [`Self::set_root`] says otherwise.
    pub fn push_table(&mut self, items: Vec<MenuItem>) -> TableId {
        let id = self.reserve();
        self.tables[id.0].items = items;
        id
    }

    /// Replace the items of an existing table.
    ///
    /// Returns `false` if `id` does not belong to this tree.
    pub fn set_items(&mut self, id: TableId, items: Vec<MenuItem>) -> bool {
        match self.tables.get_mut(id.0) {
            Some(table) => {
                table.items = items;
                true
            }
            None => false,
        }
    }

    pub fn set_root(&mut self, id: TableId) {
        self.root = Some(id);
    }

    /// The root table; defaults to the first table added.
    #[must_use]
    pub fn root(&self) -> Option<TableId> {
        self.root
            .or_else(|| (!self.tables.is_empty()).then_some(TableId(0)))
    }

    #[must_use]
    pub fn table(&self, id: TableId) -> Option<&MenuTable> {
        self.tables.get(id.0)
    }

    #[must_use]
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut MenuTable> {
        self.tables.get_mut(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Check every table's shape.
    ///
    /// Each table must end with exactly one end-of-menu item, may only carry a
    /// header at index 0, and may only reference tables of this tree. Menu
    /// items without a child are allowed; the engine logs and ignores them.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = self.root {
            if root.0 >= self.tables.len() {
                return Err(MenuError::InvalidTable {
                    table: root.0,
                    details: "root table does not exist".to_string(),
                });
            }
        }
        for (table_idx, table) in self.tables.iter().enumerate() {
            let invalid = |details: String| MenuError::InvalidTable {
                table: table_idx,
                details,
            };
            let terminators = table.items.iter().filter(|i| i.is_terminator()).count();
            if terminators != 1 {
                return Err(invalid(format!(
                    "expected exactly one end-of-menu item, found {terminators}"
                )));
            }
            if !table.items.last().is_some_and(MenuItem::is_terminator) {
                return Err(invalid(
                    "end-of-menu item must be the last item".to_string(),
                ));
            }
            if let Some(pos) = table.items.iter().skip(1).position(MenuItem::is_header) {
                return Err(invalid(format!(
                    "header at index {} (only index 0 may be a header)",
                    pos + 1
                )));
            }
            for (item_idx, item) in table.items.iter().enumerate() {
                if let ItemKind::Menu(Some(child)) = &item.kind {
                    if child.0 >= self.tables.len() {
                        return Err(invalid(format!(
                            "item {item_idx} ({}) references missing table {}",
                            item.text, child.0
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
