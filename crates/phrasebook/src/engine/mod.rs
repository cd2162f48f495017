//! The translation engine.
//!
//! [`Engine`] owns every piece of mutable state: the catalog, the default
//! locale, fallbacks, the object-notation separator and the plural rule
//! cache. Translation seeds missing keys into the catalog, so every
//! translating method takes `&mut self`. The engine is `Send`; hosts that
//! translate from several threads share it behind a `Mutex`.

mod load;
mod request;
mod translate;

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;

use bon::Builder;
use tracing::{debug, trace};

use crate::catalog::{Catalog, Tree};
use crate::config::EngineConfig;
use crate::plural::PluralRulesCache;

pub use request::{PhraseRequest, PluralRequest};

/// Callback invoked with the new default locale after a successful
/// [`Engine::set_locale`].
pub type LocaleListener = Box<dyn FnMut(&str) + Send>;

/// Phrase resolution and rendering over a multi-locale catalog.
///
/// # Example
///
/// ```
/// use phrasebook::{Engine, Node, Tree};
///
/// let mut engine = Engine::builder()
///     .default_locale("de")
///     .object_notation(".".to_string())
///     .build();
/// engine.add_locale("de", Tree::from([("Hello".to_string(), Node::from("Hallo"))]));
///
/// assert_eq!(engine.t("Hello"), "Hallo");
/// assert_eq!(engine.t("menu.open:Öffnen"), "Öffnen");
/// assert!(engine.catalog(Some("de")).is_some_and(|tree| tree.contains_key("menu")));
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Engine {
    /// Locale used by every call that does not name one.
    #[builder(default = "en".to_string())]
    default_locale: String,

    /// Separator for nested keys, or `None` for flat keys only.
    object_notation: Option<String>,

    /// Single-hop fallbacks consulted when a locale is not loaded.
    #[builder(default)]
    fallbacks: HashMap<String, String>,

    /// Locale trees.
    #[builder(default)]
    catalog: Catalog,

    #[builder(skip)]
    plurals: PluralRulesCache,

    #[builder(skip)]
    listener: Option<LocaleListener>,

    /// File paths for reload support: locale -> path.
    /// Only populated for file-loaded locales.
    #[builder(skip)]
    loaded_paths: HashMap<String, PathBuf>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}

impl Debug for Engine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("default_locale", &self.default_locale)
            .field("object_notation", &self.object_notation)
            .field("fallbacks", &self.fallbacks)
            .field("catalog", &self.catalog)
            .field("plurals", &self.plurals)
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Create an engine with an empty catalog, default locale `"en"` and
    /// flat keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from configuration, as [`Engine::configure`] would
    /// apply it to a fresh engine.
    pub fn from_config(config: EngineConfig) -> Self {
        let mut engine = Self::new();
        engine.configure(config);
        engine
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Apply the options present in `config`, leaving the others unchanged.
    ///
    /// A `locales` entry replaces the whole catalog.
    pub fn configure(&mut self, config: EngineConfig) {
        if let Some(locales) = config.locales {
            self.catalog = locales.into_iter().collect();
            self.loaded_paths.clear();
        }
        if let Some(locale) = config.default_locale {
            self.default_locale = locale;
        }
        if let Some(notation) = config.object_notation {
            self.object_notation = notation.separator();
        }
        if let Some(fallbacks) = config.fallbacks {
            self.fallbacks = fallbacks;
        }
        debug!(
            default_locale = %self.default_locale,
            object_notation = ?self.object_notation,
            locales = self.catalog.len(),
            "engine configured"
        );
    }

    /// The object-notation separator, if nested keys are enabled.
    pub fn object_notation(&self) -> Option<&str> {
        self.object_notation.as_deref()
    }

    /// Enable nested keys with `separator`, or disable them with `None`.
    pub fn set_object_notation(&mut self, separator: Option<impl Into<String>>) {
        self.object_notation = separator.map(Into::into);
    }

    /// Register a single-hop fallback from `locale` to `target`.
    pub fn set_fallback(&mut self, locale: impl Into<String>, target: impl Into<String>) {
        self.fallbacks.insert(locale.into(), target.into());
    }

    // =========================================================================
    // Locale Management
    // =========================================================================

    /// Resolve a requested locale to the one a call will read from.
    ///
    /// `None` means the default locale. An unloaded locale follows its
    /// fallback one hop; if that is still unloaded, the default locale is
    /// used even when it is not loaded either.
    pub fn resolve_locale(&self, requested: Option<&str>) -> String {
        let mut locale = requested.unwrap_or(&self.default_locale);
        if !self.catalog.is_loaded(locale) {
            if let Some(fallback) = self.fallbacks.get(locale) {
                trace!(from = locale, to = %fallback, "following locale fallback");
                locale = fallback;
            }
        }
        if !self.catalog.is_loaded(locale) {
            locale = &self.default_locale;
        }
        locale.to_string()
    }

    /// Change the default locale.
    ///
    /// The fallback is applied first and only loaded locales are accepted.
    /// On success the locale-change listener is called. Returns the default
    /// locale after the call, changed or not.
    pub fn set_locale(&mut self, locale: &str) -> &str {
        let mut target = locale;
        if !self.catalog.is_loaded(target) {
            if let Some(fallback) = self.fallbacks.get(target) {
                target = fallback;
            }
        }
        if self.catalog.is_loaded(target) {
            self.default_locale = target.to_string();
            debug!(locale = %self.default_locale, "default locale changed");
            if let Some(listener) = self.listener.as_mut() {
                listener(&self.default_locale);
            }
        }
        &self.default_locale
    }

    /// The current default locale.
    pub fn locale(&self) -> &str {
        &self.default_locale
    }

    /// Loaded locale codes, sorted.
    pub fn locales(&self) -> Vec<String> {
        self.catalog.loaded_locales().map(str::to_string).collect()
    }

    /// Set the function called after the default locale changes, replacing
    /// any previous listener.
    pub fn on_locale_change(&mut self, listener: impl FnMut(&str) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Register a locale tree, replacing any existing tree or tombstone.
    pub fn add_locale(&mut self, locale: impl Into<String>, tree: Tree) {
        let locale = locale.into();
        self.loaded_paths.remove(&locale);
        self.catalog.insert(locale, tree);
    }

    /// Mark a locale as removed. It stops being loaded but keeps its slot
    /// in [`Engine::catalogs`].
    pub fn remove_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        self.loaded_paths.remove(&locale);
        debug!(locale = %locale, "locale removed");
        self.catalog.remove(locale);
    }

    // =========================================================================
    // Catalog Access
    // =========================================================================

    /// The tree for `locale` after applying its fallback, or for the
    /// default locale when `None`. Returns `None` if that locale is not
    /// loaded.
    pub fn catalog(&self, locale: Option<&str>) -> Option<&Tree> {
        let mut target = locale.unwrap_or(&self.default_locale);
        if !self.catalog.is_loaded(target) {
            if let Some(fallback) = self.fallbacks.get(target) {
                target = fallback;
            }
        }
        self.catalog.tree(target)
    }

    /// Every catalog entry, including removed locales.
    pub fn catalogs(&self) -> &Catalog {
        &self.catalog
    }

    // =========================================================================
    // Plural Rules
    // =========================================================================

    /// Drop cached plural evaluators; they are rebuilt on next use.
    pub fn clear_plural_cache(&mut self) {
        self.plurals.clear();
    }

    /// Number of locales with a cached plural evaluator.
    pub fn plural_cache_len(&self) -> usize {
        self.plurals.len()
    }
}
