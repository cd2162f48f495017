//! Per-locale phrase storage.
//!
//! The catalog owns one [`Tree`] per locale. Removing a locale leaves a
//! tombstone behind so the locale reads as not loaded while its slot stays
//! visible in introspection.

mod node;
mod path;

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

pub use node::{Node, PLURAL_CATEGORIES, Tree};
pub use path::{KeyPath, Lookup, WriteMode, WriteOutcome};

/// The state of one locale in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    /// The locale is loaded with this tree.
    Loaded(Tree),
    /// The locale was removed and behaves as not loaded.
    Removed,
}

impl Serialize for CatalogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CatalogEntry::Loaded(tree) => tree.serialize(serializer),
            CatalogEntry::Removed => serializer.serialize_bool(false),
        }
    }
}

/// Locale trees keyed by locale code.
///
/// Serializes as a JSON object with removed locales written as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    locales: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `locale` currently has a tree.
    pub fn is_loaded(&self, locale: &str) -> bool {
        self.tree(locale).is_some()
    }

    /// The tree for a loaded locale.
    pub fn tree(&self, locale: &str) -> Option<&Tree> {
        match self.locales.get(locale) {
            Some(CatalogEntry::Loaded(tree)) => Some(tree),
            _ => None,
        }
    }

    pub(crate) fn tree_mut(&mut self, locale: &str) -> Option<&mut Tree> {
        match self.locales.get_mut(locale) {
            Some(CatalogEntry::Loaded(tree)) => Some(tree),
            _ => None,
        }
    }

    /// The raw entry for a locale, including tombstones.
    pub fn entry(&self, locale: &str) -> Option<&CatalogEntry> {
        self.locales.get(locale)
    }

    /// Register a tree for a locale, replacing any previous tree or tombstone.
    pub fn insert(&mut self, locale: impl Into<String>, tree: Tree) {
        self.locales
            .insert(locale.into(), CatalogEntry::Loaded(tree));
    }

    /// Mark a locale as removed.
    pub fn remove(&mut self, locale: impl Into<String>) {
        self.locales.insert(locale.into(), CatalogEntry::Removed);
    }

    /// Loaded locale codes in sorted order.
    pub fn loaded_locales(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().filter_map(|(locale, entry)| match entry {
            CatalogEntry::Loaded(_) => Some(locale.as_str()),
            CatalogEntry::Removed => None,
        })
    }

    /// All entries, including tombstones, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.locales
            .iter()
            .map(|(locale, entry)| (locale.as_str(), entry))
    }

    /// Number of entries, including tombstones.
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl FromIterator<(String, Tree)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Tree)>>(iter: I) -> Self {
        Catalog {
            locales: iter
                .into_iter()
                .map(|(locale, tree)| (locale, CatalogEntry::Loaded(tree)))
                .collect(),
        }
    }
}
