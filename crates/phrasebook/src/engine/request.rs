use bon::Builder;
use phrasebook_format::{NamedValues, Value};

/// A single-phrase translation request.
///
/// # Example
///
/// ```
/// use phrasebook::{PhraseRequest, params};
///
/// let request = PhraseRequest::builder()
///     .phrase("Hello {{name}}")
///     .locale("de")
///     .named(params! { "name" => "Ann" })
///     .build();
/// assert_eq!(request.locale.as_deref(), Some("de"));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct PhraseRequest {
    /// Phrase key; with object notation, `key:default text` also names the
    /// text to seed on a miss.
    #[builder(into)]
    pub phrase: String,

    /// Locale to translate into; the default locale when `None`.
    #[builder(into)]
    pub locale: Option<String>,

    /// Values for `{{name}}` template tags.
    #[builder(default)]
    pub named: NamedValues,

    /// Positional values for `%` placeholders.
    #[builder(default)]
    pub params: Vec<Value>,
}

impl PhraseRequest {
    /// A request for `phrase` in the default locale with no values.
    pub fn new(phrase: impl Into<String>) -> Self {
        PhraseRequest::builder().phrase(phrase.into()).build()
    }
}

impl From<&str> for PhraseRequest {
    fn from(phrase: &str) -> Self {
        PhraseRequest::new(phrase)
    }
}

/// A count-dependent translation request.
///
/// Without a `plural` key the singular key doubles as the plural default.
/// Without a `count`, a `count` entry in `named` is used.
///
/// # Example
///
/// ```
/// use phrasebook::PluralRequest;
///
/// let request = PluralRequest::builder()
///     .singular("%s cat")
///     .plural("%s cats")
///     .count(3)
///     .build();
/// assert_eq!(request.count_value(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct PluralRequest {
    /// Singular key, also the default `one` form.
    #[builder(into)]
    pub singular: String,

    /// Plural key, also the default `other` form.
    #[builder(into)]
    pub plural: Option<String>,

    /// The count selecting the plural form.
    #[builder(into)]
    pub count: Option<Value>,

    /// Locale to translate into; the default locale when `None`.
    #[builder(into)]
    pub locale: Option<String>,

    /// Values for `{{name}}` template tags.
    #[builder(default)]
    pub named: NamedValues,

    /// Positional values for `%` placeholders after the count.
    #[builder(default)]
    pub params: Vec<Value>,
}

impl PluralRequest {
    /// A request for `singular` with `count`, using the singular key as the
    /// plural default.
    pub fn new(singular: impl Into<String>, count: impl Into<Value>) -> Self {
        PluralRequest::builder()
            .singular(singular.into())
            .count(count)
            .build()
    }

    /// The count as an integer.
    ///
    /// Floats are truncated and numeric strings contribute their leading
    /// integer. Falls back to the `count` named value; `None` when neither
    /// yields an integer.
    pub fn count_value(&self) -> Option<i64> {
        self.count
            .as_ref()
            .or_else(|| self.named.get("count"))
            .and_then(Value::to_integer)
    }
}
