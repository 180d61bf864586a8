//! Menu items and the callback contracts bound to them.

#![allow(missing_docs)]

use std::borrow::Cow;
use std::fmt;

use super::tree::TableId;

/// Identifies the item a callback was invoked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRef<'a> {
    pub table: TableId,
    pub index: usize,
    pub text: &'a str,
}

/// What the engine should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Stay in the current table. Forgets the remembered callers.
    Stay,
    /// Pop back to the most recently remembered caller, if any.
    Return,
}

impl From<bool> for CommandOutcome {
    fn from(pop: bool) -> Self {
        if pop { Self::Return } else { Self::Stay }
    }
}

/// Request passed to a range callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAdjust {
    /// Report the current value without changing it.
    Query,
    /// Add a signed step; negative values decrement.
    Step(i16),
    /// The user left edit mode; persist the value.
    Commit,
}

/// Request passed to a toggle callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Query,
    Flip,
}

pub type CommandFn = Box<dyn FnMut(&ItemRef<'_>) -> CommandOutcome>;
pub type RangeFn = Box<dyn FnMut(RangeAdjust) -> i16>;
pub type ToggleFn = Box<dyn FnMut(ToggleAction) -> bool>;
pub type ExitHookFn = Box<dyn FnMut(&ItemRef<'_>)>;

/// Meter span for a range item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterBounds {
    pub min: i16,
    pub max: i16,
}

impl MeterBounds {
    #[must_use]
    pub const fn new(min: i16, max: i16) -> Self {
        Self { min, max }
    }

    /// A degenerate span draws no meter.
    #[must_use]
    pub const fn is_drawable(&self) -> bool {
        self.min != self.max
    }

    /// Filled cells out of `cells` for `value`, clamped to `0..=cells`.
    #[must_use]
    pub fn fill_cells(&self, value: i16, cells: u16) -> u16 {
        let span = i32::from(self.max) - i32::from(self.min);
        if span == 0 {
            return 0;
        }
        let offset = i32::from(value) - i32::from(self.min);
        let filled = offset * i32::from(cells) / span;
        u16::try_from(filled.clamp(0, i32::from(cells))).unwrap_or(0)
    }
}

/// Payload of a range item.
pub struct RangeItem {
    pub manage: RangeFn,
    /// Meter span used when a gesture does not supply one.
    pub bounds: Option<MeterBounds>,
    /// Step used when a gesture does not supply one.
    pub step: i16,
}

/// Per-type behavior of an item.
pub enum ItemKind {
    /// Title row; pinned at the top and never selectable.
    Header,
    /// Descends into a child table. `None` is a configuration error.
    Menu(Option<TableId>),
    Command(CommandFn),
    Range(RangeItem),
    Toggle(ToggleFn),
    /// Terminates a table and acts as "back".
    EndOfMenu(Option<ExitHookFn>),
}

/// Fieldless mirror of [`ItemKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Header,
    Menu,
    Command,
    Range,
    Toggle,
    EndOfMenu,
}

impl ItemKind {
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Header => ItemType::Header,
            Self::Menu(_) => ItemType::Menu,
            Self::Command(_) => ItemType::Command,
            Self::Range(_) => ItemType::Range,
            Self::Toggle(_) => ItemType::Toggle,
            Self::EndOfMenu(_) => ItemType::EndOfMenu,
        }
    }
}

/// A node in a menu table.
pub struct MenuItem {
    pub text: Cow<'static, str>,
    pub kind: ItemKind,
    pub disabled: bool,
    /// Notice shown instead of the default when a disabled item is entered.
    pub disabled_text: Option<Cow<'static, str>>,
}

impl MenuItem {
    fn with_kind(text: impl Into<Cow<'static, str>>, kind: ItemKind) -> Self {
        Self {
            text: text.into(),
            kind,
            disabled: false,
            disabled_text: None,
        }
    }

    #[must_use]
    pub fn header(text: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(text, ItemKind::Header)
    }

    #[must_use]
    pub fn menu(text: impl Into<Cow<'static, str>>, child: TableId) -> Self {
        Self::with_kind(text, ItemKind::Menu(Some(child)))
    }

    /// A submenu entry whose table is not wired up yet.
    #[must_use]
    pub fn unlinked_menu(text: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(text, ItemKind::Menu(None))
    }

    #[must_use]
    pub fn command<F, R>(text: impl Into<Cow<'static, str>>, mut action: F) -> Self
    where
        F: FnMut(&ItemRef<'_>) -> R + 'static,
        R: Into<CommandOutcome>,
    {
        Self::with_kind(
            text,
            ItemKind::Command(Box::new(move |item: &ItemRef<'_>| action(item).into())),
        )
    }

    #[must_use]
    pub fn range<F>(text: impl Into<Cow<'static, str>>, manage: F) -> Self
    where
        F: FnMut(RangeAdjust) -> i16 + 'static,
    {
        Self::with_kind(
            text,
            ItemKind::Range(RangeItem {
                manage: Box::new(manage),
                bounds: None,
                step: 1,
            }),
        )
    }

    #[must_use]
    pub fn toggle<F>(text: impl Into<Cow<'static, str>>, manage: F) -> Self
    where
        F: FnMut(ToggleAction) -> bool + 'static,
    {
        Self::with_kind(text, ItemKind::Toggle(Box::new(manage)))
    }

    /// Terminator / "back" item without an exit hook.
    #[must_use]
    pub fn back(text: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(text, ItemKind::EndOfMenu(None))
    }

    /// Terminator / "back" item that runs `hook` whenever it is entered.
    #[must_use]
    pub fn back_with<F>(text: impl Into<Cow<'static, str>>, hook: F) -> Self
    where
        F: FnMut(&ItemRef<'_>) + 'static,
    {
        Self::with_kind(text, ItemKind::EndOfMenu(Some(Box::new(hook))))
    }

    /// Attach default meter bounds to a range item. No-op for other kinds.
    #[must_use]
    pub fn with_bounds(mut self, min: i16, max: i16) -> Self {
        if let ItemKind::Range(range) = &mut self.kind {
            range.bounds = Some(MeterBounds::new(min, max));
        }
        self
    }

    /// Set the default step of a range item. No-op for other kinds.
    #[must_use]
    pub fn with_step(mut self, step: i16) -> Self {
        if let ItemKind::Range(range) = &mut self.kind {
            range.step = step;
        }
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    #[must_use]
    pub fn disabled_with(mut self, notice: impl Into<Cow<'static, str>>) -> Self {
        self.disabled = true;
        self.disabled_text = Some(notice.into());
        self
    }

    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(self.kind, ItemKind::EndOfMenu(_))
    }

    #[must_use]
    pub const fn is_header(&self) -> bool {
        matches!(self.kind, ItemKind::Header)
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MenuItem");
        s.field("text", &self.text)
            .field("type", &self.item_type())
            .field("disabled", &self.disabled);
        if let Some(notice) = &self.disabled_text {
            s.field("disabled_text", notice);
        }
        match &self.kind {
            ItemKind::Menu(child) => {
                s.field("child", child);
            }
            ItemKind::Range(range) => {
                s.field("bounds", &range.bounds).field("step", &range.step);
            }
            ItemKind::EndOfMenu(hook) => {
                s.field("exit_hook", &hook.is_some());
            }
            _ => {}
        }
        s.finish()
    }
}
