//! Bounded memory of the tables a command may return to.

#![allow(missing_docs)]

use std::collections::VecDeque;

use super::tree::TableId;

/// Cursor state remembered when descending into a submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedPosition {
    pub table: TableId,
    pub index: usize,
    pub scroll_offset: usize,
    pub base_offset: usize,
}

/// Most recent callers first; the oldest entry is dropped once `depth` is reached.
#[derive(Debug, Clone)]
pub struct ReturnStack {
    entries: VecDeque<SavedPosition>,
    depth: usize,
}

impl ReturnStack {
    /// A depth of zero is treated as one.
    #[must_use]
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            entries: VecDeque::with_capacity(depth),
            depth,
        }
    }

    pub fn push(&mut self, position: SavedPosition) {
        if self.entries.len() == self.depth {
            self.entries.pop_front();
        }
        self.entries.push_back(position);
    }

    pub fn pop(&mut self) -> Option<SavedPosition> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn peek(&self) -> Option<&SavedPosition> {
        self.entries.back()
    }
}
