//! LCDM-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, MenuError>;

/// Top-level error type for configuration, table validation, and layouts.
///
/// The navigation engine itself never returns these: once a [`MenuEngine`]
/// exists, misconfiguration is logged and the gesture is ignored.
///
/// [`MenuEngine`]: crate::menu::engine::MenuEngine
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("[LCDM-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[LCDM-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[LCDM-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[LCDM-2001] invalid menu table {table}: {details}")]
    InvalidTable { table: usize, details: String },

    #[error("[LCDM-2002] invalid menu layout: {details}")]
    InvalidLayout { details: String },

    #[error("[LCDM-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MenuError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "LCDM-1001",
            Self::MissingConfig { .. } => "LCDM-1002",
            Self::ConfigParse { .. } => "LCDM-1003",
            Self::InvalidTable { .. } => "LCDM-2001",
            Self::InvalidLayout { .. } => "LCDM-2002",
            Self::Io { .. } => "LCDM-3001",
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<toml::de::Error> for MenuError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
