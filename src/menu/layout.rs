//! Declarative menu layouts in TOML.
//!
//! ```toml
//! root = "main"
//!
//! [[tables]]
//! name = "main"
//! items = [
//!     { type = "header", text = "Main" },
//!     { type = "menu", text = "Settings", table = "settings" },
//!     { type = "range", text = "Volume", min = 0, max = 100, value = 50 },
//!     { type = "toggle", text = "Wifi", value = true },
//!     { type = "command", text = "Save" },
//!     { type = "back", text = "Exit" },
//! ]
//! ```
//!
//! [`MenuLayout::build`] turns a layout into a validated [`MenuTree`] whose
//! callbacks keep their state in a shared [`LayoutValues`] store.

#![allow(missing_docs)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::errors::{MenuError, Result};

use super::item::{CommandOutcome, MenuItem, MeterBounds, RangeAdjust, ToggleAction};
use super::tree::{MenuTree, TableId};

/// Item kinds a layout can declare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemSpecKind {
    Header,
    Menu,
    Command,
    Range,
    Toggle,
    Back,
}

/// Initial value of a range (number) or toggle (flag).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ItemValue {
    Flag(bool),
    Number(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemSpec {
    #[serde(rename = "type")]
    pub kind: ItemSpecKind,
    pub text: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub disabled_text: Option<String>,
    /// Child table name, for menus.
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub min: Option<i16>,
    #[serde(default)]
    pub max: Option<i16>,
    #[serde(default)]
    pub step: Option<i16>,
    #[serde(default)]
    pub value: Option<ItemValue>,
    /// Commands only: ask the engine to return to the caller afterwards.
    #[serde(default)]
    pub returns: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub items: Vec<ItemSpec>,
}

/// A whole menu as written in a layout file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuLayout {
    /// Table the engine starts in; defaults to the first table.
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub tables: Vec<TableSpec>,
}

/// Current values behind a built layout, keyed `"<table>/<item text>"`.
#[derive(Debug, Default)]
pub struct ValueStore {
    pub ranges: BTreeMap<String, i16>,
    pub toggles: BTreeMap<String, bool>,
    pub commands: BTreeMap<String, u32>,
    pub exits: BTreeMap<String, u32>,
}

/// Shared handle to a layout's [`ValueStore`].
#[derive(Debug, Clone, Default)]
pub struct LayoutValues(Rc<RefCell<ValueStore>>);

impl LayoutValues {
    #[must_use]
    pub fn range(&self, key: &str) -> Option<i16> {
        self.0.borrow().ranges.get(key).copied()
    }

    #[must_use]
    pub fn toggle(&self, key: &str) -> Option<bool> {
        self.0.borrow().toggles.get(key).copied()
    }

    /// Times the command was run.
    #[must_use]
    pub fn command_count(&self, key: &str) -> u32 {
        self.0.borrow().commands.get(key).copied().unwrap_or(0)
    }

    /// Times the back item was entered.
    #[must_use]
    pub fn exit_count(&self, key: &str) -> u32 {
        self.0.borrow().exits.get(key).copied().unwrap_or(0)
    }

    /// One `key = value` line per range and toggle, sorted by key.
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        let store = self.0.borrow();
        let ranges = store.ranges.iter().map(|(k, v)| format!("{k} = {v}"));
        let toggles = store
            .toggles
            .iter()
            .map(|(k, v)| format!("{k} = {}", if *v { "on" } else { "off" }));
        ranges.chain(toggles).collect()
    }
}

impl MenuLayout {
    /// Parse a layout document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|error| MenuError::ConfigParse {
            context: "layout",
            details: error.to_string(),
        })
    }

    /// Read and parse a layout file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| MenuError::io(path, source))?;
        Self::from_toml_str(&raw)
    }

    /// Build a validated tree and the value store its callbacks share.
    pub fn build(&self) -> Result<(MenuTree, LayoutValues)> {
        let Some(first) = self.tables.first() else {
            return Err(layout_error("layout declares no tables"));
        };

        let mut tree = MenuTree::new();
        let mut ids: HashMap<&str, TableId> = HashMap::with_capacity(self.tables.len());
        for table in &self.tables {
            if ids.insert(table.name.as_str(), tree.reserve()).is_some() {
                return Err(layout_error(format!("duplicate table name {:?}", table.name)));
            }
        }

        let root_name = self.root.as_deref().unwrap_or(first.name.as_str());
        let root = *ids
            .get(root_name)
            .ok_or_else(|| layout_error(format!("root table {root_name:?} is not declared")))?;
        tree.set_root(root);

        let values = LayoutValues::default();
        for table in &self.tables {
            let items = table
                .items
                .iter()
                .map(|spec| build_item(&table.name, spec, &ids, &values))
                .collect::<Result<Vec<_>>>()?;
            if let Some(&id) = ids.get(table.name.as_str()) {
                tree.set_items(id, items);
            }
        }

        tree.validate()?;
        Ok((tree, values))
    }
}

fn layout_error(details: impl Into<String>) -> MenuError {
    MenuError::InvalidLayout {
        details: details.into(),
    }
}

fn build_item(
    table: &str,
    spec: &ItemSpec,
    ids: &HashMap<&str, TableId>,
    values: &LayoutValues,
) -> Result<MenuItem> {
    let key = format!("{table}/{}", spec.text);
    let text = spec.text.clone();

    let item = match spec.kind {
        ItemSpecKind::Header => MenuItem::header(text),
        ItemSpecKind::Menu => match &spec.table {
            Some(child) => {
                let id = ids.get(child.as_str()).ok_or_else(|| {
                    layout_error(format!("{key}: unknown table {child:?}"))
                })?;
                MenuItem::menu(text, *id)
            }
            None => MenuItem::unlinked_menu(text),
        },
        ItemSpecKind::Command => {
            let store = values.clone();
            let outcome = CommandOutcome::from(spec.returns);
            MenuItem::command(text, move |item| {
                *store.0.borrow_mut().commands.entry(key.clone()).or_default() += 1;
                info!("command {:?} ran", item.text);
                outcome
            })
        }
        ItemSpecKind::Range => build_range(text, key, spec, values)?,
        ItemSpecKind::Toggle => {
            let initial = match spec.value {
                None => false,
                Some(ItemValue::Flag(on)) => on,
                Some(ItemValue::Number(_)) => {
                    return Err(layout_error(format!("{key}: toggle value must be a boolean")));
                }
            };
            values.0.borrow_mut().toggles.insert(key.clone(), initial);
            let store = values.clone();
            MenuItem::toggle(text, move |action| {
                let mut store = store.0.borrow_mut();
                let state = store.toggles.entry(key.clone()).or_default();
                if action == ToggleAction::Flip {
                    *state = !*state;
                    info!("toggle {key:?} is now {}", if *state { "on" } else { "off" });
                }
                *state
            })
        }
        ItemSpecKind::Back => {
            let store = values.clone();
            MenuItem::back_with(text, move |item| {
                *store.0.borrow_mut().exits.entry(key.clone()).or_default() += 1;
                info!("back {:?} entered", item.text);
            })
        }
    };

    Ok(match (spec.disabled, &spec.disabled_text) {
        (_, Some(notice)) => item.disabled_with(notice.clone()),
        (true, None) => item.disabled(),
        (false, None) => item,
    })
}

fn build_range(text: String, key: String, spec: &ItemSpec, values: &LayoutValues) -> Result<MenuItem> {
    let bounds = match (spec.min, spec.max) {
        (Some(min), Some(max)) if min <= max => Some(MeterBounds::new(min, max)),
        (Some(min), Some(max)) => {
            return Err(layout_error(format!("{key}: min {min} exceeds max {max}")));
        }
        (None, None) => None,
        _ => return Err(layout_error(format!("{key}: min and max go together"))),
    };
    let initial = match spec.value {
        None => bounds.map_or(0, |b| b.min),
        Some(ItemValue::Number(n)) => i16::try_from(n)
            .map_err(|_| layout_error(format!("{key}: value {n} out of range")))?,
        Some(ItemValue::Flag(_)) => {
            return Err(layout_error(format!("{key}: range value must be a number")));
        }
    };
    let initial = bounds.map_or(initial, |b| initial.clamp(b.min, b.max));
    values.0.borrow_mut().ranges.insert(key.clone(), initial);

    let store = values.clone();
    let item = MenuItem::range(text, move |adjust| {
        let mut store = store.0.borrow_mut();
        let value = store.ranges.entry(key.clone()).or_default();
        match adjust {
            RangeAdjust::Query => {}
            RangeAdjust::Step(delta) => {
                let next = value.saturating_add(delta);
                *value = bounds.map_or(next, |b| next.clamp(b.min, b.max));
            }
            RangeAdjust::Commit => info!("range {key:?} committed at {value}"),
        }
        *value
    });
    let item = match bounds {
        Some(b) => item.with_bounds(b.min, b.max),
        None => item,
    };
    Ok(match spec.step {
        Some(step) => item.with_step(step),
        None => item,
    })
}
