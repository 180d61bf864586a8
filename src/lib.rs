#![forbid(unsafe_code)]

//! LCD menu engine: hierarchical menu navigation and rendering for small
//! character and pixel displays.
//!
//! A [`menu::tree::MenuTree`] holds tables of items (headers, submenus,
//! commands, ranges, toggles, and a terminating back item). A
//! [`menu::engine::MenuEngine`] keeps the cursor, scrolls the viewport, and
//! paints through any [`display::Display`] implementation in response to
//! three gestures: `down`, `up`, and `enter`.
//!
//! # Library usage
//!
//! ```rust,no_run
//! use lcd_menu::prelude::*;
//!
//! let mut tree = MenuTree::new();
//! tree.push_table(vec![
//!     MenuItem::header("Main"),
//!     MenuItem::command("Save", |_| false),
//!     MenuItem::back("Exit"),
//! ]);
//! let mut engine = MenuEngine::new(tree, TextCanvas::new(84, 48), &MenuConfig::default())?;
//! engine.draw_menu();
//! engine.down();
//! # Ok::<(), MenuError>(())
//! ```

pub mod prelude;

#[cfg(feature = "cli")]
pub mod cli;
pub mod core;
pub mod display;
pub mod menu;
