//! Phrase lookup with auto-seeding, and the public translation calls.

use phrasebook_format::Value;
use tracing::debug;

use crate::catalog::{KeyPath, Node};
use crate::engine::{Engine, PhraseRequest, PluralRequest};
use crate::render::render;

/// A phrase key split into the key to look up and the text to seed.
struct SplitKey<'a> {
    key: &'a str,
    default: &'a str,
}

impl Engine {
    /// Look up `singular` in `locale`, seeding the catalog on a miss.
    ///
    /// With object notation enabled, a key of the form `key:default text`
    /// looks up `key` and seeds `default text`; an empty default seeds the
    /// key itself. When `plural` is given and nothing is stored, a plural
    /// value `{ one, other }` is seeded; an empty plural key seeds plain text.
    /// Returns the value stored after seeding, or `None` when the resolved
    /// locale is not loaded.
    ///
    /// ```
    /// use phrasebook::{Engine, Node, Tree};
    ///
    /// let mut engine = Engine::new();
    /// engine.add_locale("en", Tree::new());
    ///
    /// let seeded = engine.translate(None, "%s cat", Some("%s cats"));
    /// assert_eq!(seeded, Some(Node::plural("%s cat", "%s cats")));
    /// ```
    pub fn translate(
        &mut self,
        locale: Option<&str>,
        singular: &str,
        plural: Option<&str>,
    ) -> Option<Node> {
        let locale = self.resolve_locale(locale);
        self.lookup_or_seed(&locale, singular, plural)
    }

    fn lookup_or_seed(&mut self, locale: &str, singular: &str, plural: Option<&str>) -> Option<Node> {
        let singular = self.split_key(singular);
        let plural = plural
            .filter(|plural| !plural.is_empty())
            .map(|plural| self.split_key(plural));
        let path = KeyPath::parse(singular.key, self.object_notation.as_deref());

        if let Some(plural) = plural {
            if !self.is_present(locale, &path) {
                debug!(locale, key = singular.key, "seeding missing plural phrase");
                let node = Node::plural(singular.default, plural.default);
                self.catalog.assign(locale, &path, node);
            }
        }

        if !self.is_present(locale, &path) {
            debug!(locale, key = singular.key, "seeding missing phrase");
            self.catalog
                .assign(locale, &path, Node::from(singular.default));
        }

        self.catalog.lookup(locale, &path).value().cloned()
    }

    fn is_present(&self, locale: &str, path: &KeyPath) -> bool {
        self.catalog
            .lookup(locale, path)
            .value()
            .is_some_and(Node::is_present)
    }

    fn split_key<'a>(&self, raw: &'a str) -> SplitKey<'a> {
        let split = self
            .object_notation
            .as_ref()
            .and_then(|_| raw.find(':'))
            .filter(|&position| position > 0);
        match split {
            Some(position) => {
                let key = &raw[..position];
                let default = &raw[position + 1..];
                SplitKey {
                    key,
                    default: if default.is_empty() { key } else { default },
                }
            }
            None => SplitKey {
                key: raw,
                default: raw,
            },
        }
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate a single phrase.
    ///
    /// A plural value stored under the key yields its `one` form, else its
    /// `other` form. The text is then rendered without a count.
    ///
    /// ```
    /// use phrasebook::{Engine, Node, PhraseRequest, Tree, params};
    ///
    /// let mut engine = Engine::new();
    /// engine.add_locale("en", Tree::new());
    /// engine.add_locale("de", Tree::from([("Hello %s".to_string(), Node::from("Hallo %s"))]));
    ///
    /// let request = PhraseRequest::builder()
    ///     .phrase("Hello %s")
    ///     .locale("de")
    ///     .params(vec!["Ann".into()])
    ///     .build();
    /// assert_eq!(engine.translate_phrase(&request), "Hallo Ann");
    /// ```
    pub fn translate_phrase(&mut self, request: &PhraseRequest) -> String {
        let locale = self.resolve_locale(request.locale.as_deref());
        let text = match self.lookup_or_seed(&locale, &request.phrase, None) {
            Some(node) => node.singular_text().to_string(),
            None => self.split_key(&request.phrase).default.to_string(),
        };
        render(&text, &request.named, &request.params, None)
    }

    /// Translate `phrase` into the default locale with no values.
    pub fn t(&mut self, phrase: &str) -> String {
        self.translate_phrase(&PhraseRequest::new(phrase))
    }

    /// Translate a count-dependent phrase.
    ///
    /// The CLDR category of the count in the resolved locale picks the form
    /// of a stored plural value, falling back to `other`. The count is then
    /// substituted for the first placeholder before any other rendering.
    ///
    /// ```
    /// use phrasebook::{Engine, PluralRequest, Tree};
    ///
    /// let mut engine = Engine::new();
    /// engine.add_locale("en", Tree::new());
    ///
    /// let request = PluralRequest::builder()
    ///     .singular("%s cat")
    ///     .plural("%s cats")
    ///     .count(1)
    ///     .build();
    /// assert_eq!(engine.translate_plural(&request), "1 cat");
    /// assert_eq!(engine.tn("%s cat", "%s cats", 3), "3 cats");
    /// ```
    pub fn translate_plural(&mut self, request: &PluralRequest) -> String {
        let locale = self.resolve_locale(request.locale.as_deref());
        let plural = request.plural.as_deref().unwrap_or(&request.singular);
        let count = request.count_value();

        let text = match self.lookup_or_seed(&locale, &request.singular, Some(plural)) {
            Some(node @ Node::Map(_)) => {
                let category = match count {
                    Some(count) => self.plurals.category(&locale, count),
                    None => "other",
                };
                node.plural_form(category).to_string()
            }
            Some(Node::Text(text)) => text,
            None => self.split_key(&request.singular).default.to_string(),
        };
        render(&text, &request.named, &request.params, count)
    }

    /// Translate a singular/plural pair with `count` into the default
    /// locale.
    pub fn tn(&mut self, singular: &str, plural: &str, count: impl Into<Value>) -> String {
        let request = PluralRequest::builder()
            .singular(singular)
            .plural(plural)
            .count(count)
            .build();
        self.translate_plural(&request)
    }

    /// Translate `phrase` into every loaded locale, sorted by locale code.
    pub fn translate_all(&mut self, phrase: &str) -> Vec<String> {
        self.translate_map(phrase)
            .into_iter()
            .map(|(_, text)| text)
            .collect()
    }

    /// Translate `phrase` into every loaded locale, paired with the locale
    /// code and sorted by it.
    pub fn translate_map(&mut self, phrase: &str) -> Vec<(String, String)> {
        self.locales()
            .into_iter()
            .map(|locale| {
                let request = PhraseRequest::builder()
                    .phrase(phrase)
                    .locale(locale.clone())
                    .build();
                let text = self.translate_phrase(&request);
                (locale, text)
            })
            .collect()
    }
}
