//! Loading of the editable JSON data tables (lexicons, site selectors).
//!
//! Each table ships embedded in the binary; a deployment can point at an
//! edited copy on disk instead without rebuilding.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pattern {pattern:?} in {category}: {source}")]
    Pattern {
        category: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Parse a table from `path` if given, otherwise from the embedded JSON.
pub fn load_table<T: DeserializeOwned>(
    path: Option<&Path>,
    embedded: &str,
    name: &str,
) -> Result<T, TableError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| TableError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!(table = name, path = %path.display(), "loading table override");
            parse_table(&raw, &path.display().to_string())
        }
        None => parse_table(embedded, name),
    }
}

pub fn parse_table<T: DeserializeOwned>(raw: &str, name: &str) -> Result<T, TableError> {
    serde_json::from_str(raw).map_err(|source| TableError::Json {
        name: name.to_string(),
        source,
    })
}
