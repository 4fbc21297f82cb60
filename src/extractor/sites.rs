//! Per-site CSS selectors for article bodies.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::tables::{TableError, load_table};

const EMBEDDED_SITE_SELECTORS: &str = include_str!("../../data/site_selectors.json");

/// Domain substring to ordered selector list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SiteSelectors(BTreeMap<String, Vec<String>>);

impl SiteSelectors {
    pub fn load(path: Option<&Path>) -> Result<Self, TableError> {
        load_table(path, EMBEDDED_SITE_SELECTORS, "site_selectors.json")
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        Self(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Selectors for `domain`. When several keys match, the longest (most
    /// specific) one wins.
    pub fn selectors_for(&self, domain: &str) -> &[String] {
        let domain = domain.to_ascii_lowercase();
        self.0
            .iter()
            .filter(|(key, _)| domain.contains(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, selectors)| selectors.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
