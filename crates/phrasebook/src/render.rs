//! The post-lookup substitution chain.

use phrasebook_format::{NamedValues, Value, render_template, sprintf};

use crate::interval::select_segment;

/// Render a translated phrase.
///
/// Stages run in a fixed order, each only when triggered:
/// 1. a `|` selects a variant by `count`
/// 2. a `count` is substituted as the first printf argument
/// 3. a `{{...}}` tag renders the text as a template against `named`
/// 4. a `%` with non-empty `params` substitutes them printf style
///
/// ```
/// use phrasebook::render;
/// use phrasebook::{NamedValues, Value};
///
/// let named = NamedValues::from([("name".to_string(), Value::from("Ann"))]);
/// let text = render("[0] nobody|{{name}} has %s cats", &named, &[], Some(3));
/// assert_eq!(text, "Ann has 3 cats");
/// ```
pub fn render(phrase: &str, named: &NamedValues, params: &[Value], count: Option<i64>) -> String {
    let mut text = if phrase.contains('|') {
        select_segment(phrase, count)
    } else {
        phrase.to_string()
    };

    if let Some(count) = count {
        text = sprintf(&text, &[Value::Number(count)]);
    }

    if has_template_tag(&text) {
        text = render_template(&text, named);
    }

    if text.contains('%') && !params.is_empty() {
        text = sprintf(&text, params);
    }

    text
}

/// Whether some line holds a `{{` followed later on the same line by `}}`.
fn has_template_tag(text: &str) -> bool {
    text.lines().any(|line| {
        line.find("{{")
            .is_some_and(|start| line[start + 2..].contains("}}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_tag_must_close_on_the_same_line() {
        assert!(has_template_tag("a {{b}} c"));
        assert!(has_template_tag("first\n{{x}}"));
        assert!(!has_template_tag("{{a\n}}"));
        assert!(!has_template_tag("}} before {{"));
    }
}
