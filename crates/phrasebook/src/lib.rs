pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
#[cfg(feature = "global")]
pub mod global;
pub mod interval;
pub mod plural;
pub mod render;

pub use catalog::{Catalog, CatalogEntry, KeyPath, Lookup, Node, PLURAL_CATEGORIES, Tree, WriteMode, WriteOutcome};
pub use config::{EngineConfig, ObjectNotation};
pub use engine::{Engine, LocaleListener, PhraseRequest, PluralRequest};
pub use error::LoadError;
pub use phrasebook_format::{IntervalError, NamedValues, Value};
pub use plural::PluralRulesCache;
pub use render::render;

/// Creates a `HashMap<String, Value>` of named values from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// booleans, integers, floats, strings, or nested `Value`s directly.
///
/// # Example
///
/// ```
/// use phrasebook::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_number(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
