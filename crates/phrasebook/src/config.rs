//! Engine configuration.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::catalog::Tree;
use crate::error::LoadError;

/// Options applied by [`Engine::configure`](crate::Engine::configure).
///
/// Every field is optional; absent fields leave the engine unchanged. JSON
/// keys are camelCase:
///
/// ```
/// use phrasebook::{EngineConfig, Engine};
///
/// let config = EngineConfig::from_json_str(r#"{
///     "locales": { "en": { "Hello": "Hello" }, "de": { "Hello": "Hallo" } },
///     "defaultLocale": "de",
///     "objectNotation": true,
///     "fallbacks": { "at": "de" }
/// }"#).unwrap();
///
/// let mut engine = Engine::from_config(config);
/// assert_eq!(engine.locale(), "de");
/// assert_eq!(engine.object_notation(), Some("."));
/// assert_eq!(engine.set_locale("at"), "de");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Locale trees; replaces the whole catalog when present.
    pub locales: Option<BTreeMap<String, Tree>>,

    /// The default locale.
    #[builder(into)]
    pub default_locale: Option<String>,

    /// Enables nested keys.
    #[builder(into)]
    pub object_notation: Option<ObjectNotation>,

    /// Single-hop locale fallbacks.
    pub fallbacks: Option<HashMap<String, String>>,
}

/// The `objectNotation` option: a flag or an explicit separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectNotation {
    /// `true` enables the `.` separator; `false` disables nested keys.
    Enabled(bool),
    /// A custom separator.
    Separator(String),
}

impl ObjectNotation {
    /// The separator this option selects, if any.
    ///
    /// An empty separator disables nested keys.
    pub fn separator(&self) -> Option<String> {
        match self {
            ObjectNotation::Enabled(true) => Some(".".to_string()),
            ObjectNotation::Enabled(false) => None,
            ObjectNotation::Separator(separator) if separator.is_empty() => None,
            ObjectNotation::Separator(separator) => Some(separator.clone()),
        }
    }
}

impl From<bool> for ObjectNotation {
    fn from(enabled: bool) -> Self {
        ObjectNotation::Enabled(enabled)
    }
}

impl From<&str> for ObjectNotation {
    fn from(separator: &str) -> Self {
        ObjectNotation::Separator(separator.to_string())
    }
}

impl From<String> for ObjectNotation {
    fn from(separator: String) -> Self {
        ObjectNotation::Separator(separator)
    }
}

impl EngineConfig {
    /// Parse configuration from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        serde_json::from_str(content).map_err(|e| LoadError::Json {
            path: "<config>".into(),
            source: e,
        })
    }

    /// Read configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| LoadError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
