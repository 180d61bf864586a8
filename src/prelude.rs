//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use lcd_menu::prelude::*;
//! ```

// Core
pub use crate::core::config::MenuConfig;
pub use crate::core::errors::{MenuError, Result};

// Display
pub use crate::display::canvas::TextCanvas;
pub use crate::display::{Color, Display, Rect};

// Menu model
pub use crate::menu::item::{
    CommandOutcome, ItemKind, ItemRef, ItemType, MenuItem, MeterBounds, RangeAdjust, ToggleAction,
};
pub use crate::menu::tree::{MenuTable, MenuTree, TableId};

// Engine
pub use crate::menu::engine::{EditMode, MenuEngine, RangeHint};
pub use crate::menu::geometry::Geometry;
pub use crate::menu::render::{Glyphs, SelectionStyle};

// Layouts
pub use crate::menu::layout::{LayoutValues, MenuLayout};
