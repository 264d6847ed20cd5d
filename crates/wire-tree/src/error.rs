//! Error types for wire-tree

use std::path::PathBuf;

/// Result type for wire-tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or loading configuration trees
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Path absent from the tree
    #[error("No configuration value found at '{path}'")]
    Missing { path: String },

    /// Value present but of the wrong kind for the requested access
    #[error("Value at '{path}' is {found}, expected {expected}")]
    WrongKind {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Null has no tree representation
    #[error("Null configuration values are not supported")]
    Null,

    /// Unknown config file extension
    #[error("Unsupported configuration format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Environment variable required for layering was not set
    #[error("Environment variable '{var}' was not set")]
    EnvironmentNotSet { var: &'static str },

    /// JSON parse error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
