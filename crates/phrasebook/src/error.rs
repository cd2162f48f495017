//! Error types for loading catalogs and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading catalogs or engine configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading or writing a catalog file.
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON, or does not have the expected shape.
    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog JSON is valid but its top level is not an object.
    #[error("{path}: expected a JSON object of phrases")]
    NotAnObject { path: PathBuf },

    /// Attempted to reload a locale that was not loaded from a file.
    #[error("cannot reload '{locale}': was not loaded from a file")]
    NoPathForLocale { locale: String },
}

impl LoadError {
    /// Line and column of a JSON syntax error, both 1-based.
    pub fn json_position(&self) -> Option<(usize, usize)> {
        match self {
            LoadError::Json { source, .. } => Some((source.line(), source.column())),
            LoadError::Io { .. } | LoadError::NotAnObject { .. } | LoadError::NoPathForLocale { .. } => {
                None
            }
        }
    }
}
