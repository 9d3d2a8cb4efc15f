//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Diagnostics raised while loading the alert-rule and ignore files.
///
/// None of these abort a load: a missing or unreadable file yields an empty
/// table and a bad line is skipped.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} does not exist")]
    FileMissing { path: PathBuf },

    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {kind}")]
    LineParse {
        path: PathBuf,
        line: usize,
        kind: LineError,
    },
}

/// Why a single alert-rule line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected 3 `;`-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("empty path fragment")]
    EmptyKey,

    #[error("expected `width,height`, found `{value}`")]
    DimensionFormat { value: String },

    #[error("invalid dimension `{value}`")]
    InvalidDimension { value: String },
}

/// Errors loading the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
