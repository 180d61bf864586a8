//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{MenuError, Result};
use crate::menu::render::{Glyphs, SelectionStyle};

/// Largest text scale accepted; glyph cells double per step.
pub const MAX_TEXT_SCALE: u8 = 8;

/// Full menu engine configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MenuConfig {
    pub display: DisplayConfig,
    pub navigation: NavigationConfig,
    pub selection: SelectionConfig,
    pub glyphs: Glyphs,
    pub text: TextConfig,
}

/// Text scale and modal box geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub text_scale: u8,
    /// Fraction of each display dimension covered by the modal box.
    pub box_area: f32,
    /// Smallest gap between the box text grid and the box edge, in pixels.
    pub min_box_margin_px: u16,
}

/// Navigation bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Levels remembered for commands that ask to return to their caller.
    pub return_depth: usize,
    /// Upper bound on items inspected while looking for a table terminator.
    pub scan_limit: usize,
}

/// Which presentation marks the selected row.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Icon,
    Inverted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectionConfig {
    pub style: SelectionMode,
    /// Glyph code written in the first column when `style = "icon"`.
    pub glyph: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TextConfig {
    /// Notice shown for disabled items without their own text.
    pub disabled: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            text_scale: 1,
            box_area: 0.9,
            min_box_margin_px: 2,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            return_depth: 1,
            scan_limit: 99,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            style: SelectionMode::Icon,
            glyph: 16,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            disabled: "Disabled".to_string(),
        }
    }
}

impl MenuConfig {
    /// Config file consulted when no explicit path is given.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from("lcdmenu.toml")
    }

    /// Load config from `path` (or the default path), apply env overrides, validate.
    ///
    /// A missing file is only an error when the path was given explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| MenuError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(MenuError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a TOML document without touching the filesystem or environment.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Selection presentation described by `[selection]`.
    #[must_use]
    pub const fn selection_style(&self) -> SelectionStyle {
        match self.selection.style {
            SelectionMode::Icon => SelectionStyle::Icon(self.selection.glyph),
            SelectionMode::Inverted => SelectionStyle::Inverted,
        }
    }

    /// Glyph codes described by `[glyphs]`.
    #[must_use]
    pub const fn glyphs(&self) -> Glyphs {
        self.glyphs
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_from(env_var)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("LCDMENU_TEXT_SCALE") {
            self.display.text_scale = parse_env("LCDMENU_TEXT_SCALE", &raw)?;
        }
        if let Some(raw) = lookup("LCDMENU_BOX_AREA") {
            self.display.box_area = parse_env("LCDMENU_BOX_AREA", &raw)?;
        }
        if let Some(raw) = lookup("LCDMENU_RETURN_DEPTH") {
            self.navigation.return_depth = parse_env("LCDMENU_RETURN_DEPTH", &raw)?;
        }
        if let Some(raw) = lookup("LCDMENU_SCAN_LIMIT") {
            self.navigation.scan_limit = parse_env("LCDMENU_SCAN_LIMIT", &raw)?;
        }
        if let Some(raw) = lookup("LCDMENU_SELECTION_STYLE") {
            self.selection.style = match raw.trim().to_ascii_lowercase().as_str() {
                "icon" => SelectionMode::Icon,
                "inverted" => SelectionMode::Inverted,
                _ => {
                    return Err(MenuError::ConfigParse {
                        context: "env",
                        details: format!(
                            "LCDMENU_SELECTION_STYLE={raw:?}: expected \"icon\" or \"inverted\""
                        ),
                    });
                }
            };
        }
        if let Some(raw) = lookup("LCDMENU_SELECTION_GLYPH") {
            self.selection.glyph = parse_env("LCDMENU_SELECTION_GLYPH", &raw)?;
        }
        if let Some(raw) = lookup("LCDMENU_DISABLED_TEXT") {
            self.text.disabled = raw;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_TEXT_SCALE).contains(&self.display.text_scale) {
            return Err(MenuError::InvalidConfig {
                details: format!(
                    "display.text_scale must be in [1, {MAX_TEXT_SCALE}], got {}",
                    self.display.text_scale
                ),
            });
        }
        if !(self.display.box_area > 0.0 && self.display.box_area <= 1.0) {
            return Err(MenuError::InvalidConfig {
                details: format!(
                    "display.box_area must be in (0, 1], got {}",
                    self.display.box_area
                ),
            });
        }
        if self.navigation.return_depth == 0 {
            return Err(MenuError::InvalidConfig {
                details: "navigation.return_depth must be >= 1".to_string(),
            });
        }
        if self.navigation.scan_limit == 0 {
            return Err(MenuError::InvalidConfig {
                details: "navigation.scan_limit must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|error| MenuError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}
