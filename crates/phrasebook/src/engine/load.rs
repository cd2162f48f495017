//! Loading locale trees from JSON and writing seeded trees back.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::Tree;
use crate::engine::Engine;
use crate::error::LoadError;

impl Engine {
    // =========================================================================
    // Catalog Loading
    // =========================================================================

    /// Load a locale from a JSON file.
    ///
    /// The file path is stored for later [`Engine::reload_locale`] and
    /// [`Engine::save_locale`]. Loading the same locale twice **replaces**
    /// its previous tree. Returns the number of top-level entries.
    pub fn load_locale_file(&mut self, locale: &str, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let tree = parse_tree(&content, path)?;
        let count = tree.len();
        self.catalog.insert(locale, tree);
        self.loaded_paths
            .insert(locale.to_string(), path.to_path_buf());
        debug!(locale, path = %path.display(), entries = count, "loaded locale file");
        Ok(count)
    }

    /// Load a locale from a JSON string.
    ///
    /// Locales loaded this way cannot be reloaded or saved. Loading the same
    /// locale twice **replaces** its previous tree.
    ///
    /// # Example
    ///
    /// ```
    /// use phrasebook::Engine;
    ///
    /// let mut engine = Engine::new();
    /// let count = engine.load_locale_str("en", r#"{
    ///     "Hello": "Hello!",
    ///     "%s cat": { "one": "%s cat", "other": "%s cats" }
    /// }"#).unwrap();
    /// assert_eq!(count, 2);
    /// assert_eq!(engine.tn("%s cat", "%s cats", 2), "2 cats");
    /// ```
    pub fn load_locale_str(&mut self, locale: &str, content: &str) -> Result<usize, LoadError> {
        let tree = parse_tree(content, &PathBuf::from(format!("<{locale}>")))?;
        let count = tree.len();
        self.loaded_paths.remove(locale);
        self.catalog.insert(locale, tree);
        Ok(count)
    }

    /// Load every `*.json` file in `dir` as the locale named by its file
    /// stem. Returns the loaded locale codes, sorted.
    pub fn load_catalog_dir(&mut self, dir: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
        let dir = dir.as_ref();
        let io_error = |e| LoadError::Io {
            path: dir.to_path_buf(),
            source: e,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(OsStr::to_str) {
                    files.push((stem.to_string(), path.clone()));
                }
            }
        }
        files.sort();

        let mut locales = Vec::with_capacity(files.len());
        for (locale, path) in files {
            self.load_locale_file(&locale, &path)?;
            locales.push(locale);
        }
        Ok(locales)
    }

    /// Reload a locale from the file it was loaded from.
    ///
    /// Returns an error if the locale was not loaded from a file.
    pub fn reload_locale(&mut self, locale: &str) -> Result<usize, LoadError> {
        let path = self.source_path(locale)?;
        self.load_locale_file(locale, path)
    }

    /// Write a locale tree, including any seeded phrases, back to the file
    /// it was loaded from. Returns that path.
    pub fn save_locale(&self, locale: &str) -> Result<PathBuf, LoadError> {
        let path = self.source_path(locale)?;
        let tree = self
            .catalog
            .tree(locale)
            .ok_or_else(|| LoadError::NoPathForLocale {
                locale: locale.to_string(),
            })?;
        let mut content = serde_json::to_string_pretty(tree).map_err(|e| LoadError::Json {
            path: path.clone(),
            source: e,
        })?;
        content.push('\n');
        fs::write(&path, content).map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        })?;
        debug!(locale, path = %path.display(), "saved locale file");
        Ok(path)
    }

    /// The file a locale was loaded from, if any.
    pub fn locale_path(&self, locale: &str) -> Option<&Path> {
        self.loaded_paths.get(locale).map(PathBuf::as_path)
    }

    fn source_path(&self, locale: &str) -> Result<PathBuf, LoadError> {
        self.loaded_paths
            .get(locale)
            .cloned()
            .ok_or_else(|| LoadError::NoPathForLocale {
                locale: locale.to_string(),
            })
    }
}

/// Parse catalog JSON, requiring an object at the top level.
pub(crate) fn parse_tree(content: &str, path: &Path) -> Result<Tree, LoadError> {
    let json: serde_json::Value = serde_json::from_str(content).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !json.is_object() {
        return Err(LoadError::NotAnObject {
            path: path.to_path_buf(),
        });
    }
    serde_json::from_value(json).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}
