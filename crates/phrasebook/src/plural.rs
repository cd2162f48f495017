//! CLDR plural category resolution.
//!
//! English has "one" and "other", Russian adds "few" and "many", and Arabic
//! uses all six categories. Rules are built lazily for each locale code the
//! engine sees and cached until [`PluralRulesCache::clear`].
//!
//! Evaluators are `Send` only with the `sync` feature of `icu_provider`,
//! which this crate enables so an engine can move between threads.

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};
use tracing::warn;

/// Per-locale cache of CLDR plural evaluators.
#[derive(Default)]
pub struct PluralRulesCache {
    rules: HashMap<String, PluralRules>,
}

impl PluralRulesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The CLDR category tag for `count` in `locale`.
    ///
    /// Locale codes may use `_` or `-` as subtag separator. Codes that do
    /// not parse, or that CLDR has no data for, use root rules, where every
    /// count is "other".
    ///
    /// ```
    /// use phrasebook::PluralRulesCache;
    ///
    /// let mut cache = PluralRulesCache::new();
    /// assert_eq!(cache.category("en", 1), "one");
    /// assert_eq!(cache.category("ru", 3), "few");
    /// assert_eq!(cache.category("ru_RU", 5), "many");
    /// ```
    pub fn category(&mut self, locale: &str, count: i64) -> &'static str {
        let rules = self
            .rules
            .entry(locale.to_string())
            .or_insert_with(|| build_rules(locale));
        category_str(rules.category_for(count))
    }

    /// Drop all cached evaluators.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Number of locales with cached evaluators.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Debug for PluralRulesCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut locales: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        locales.sort_unstable();
        f.debug_struct("PluralRulesCache")
            .field("locales", &locales)
            .finish()
    }
}

fn build_rules(code: &str) -> PluralRules {
    let loc = Locale::try_from_str(&code.replace('_', "-")).unwrap_or_else(|_| {
        warn!(locale = code, "unparseable locale code, using root plural rules");
        locale!("und")
    });
    PluralRules::try_new(loc.clone().into(), PluralRuleType::Cardinal.into()).unwrap_or_else(|_| {
        warn!(locale = %loc, "no plural rules for locale, using root rules");
        root_rules()
    })
}

fn root_rules() -> PluralRules {
    PluralRules::try_new(locale!("und").into(), PluralRuleType::Cardinal.into())
        .unwrap_or_else(|_| unreachable!("root plural rules are compiled in"))
}

fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}
