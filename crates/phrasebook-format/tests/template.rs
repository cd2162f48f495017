//! Integration tests for double-brace template rendering.

use std::collections::BTreeMap;

use phrasebook_format::{NamedValues, Template, TemplateError, Value, render_template};

fn named(pairs: &[(&str, Value)]) -> NamedValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// =========================================================================
// Variables
// =========================================================================

#[test]
fn variable_is_substituted() {
    let values = named(&[("name", Value::from("Marcus"))]);
    assert_eq!(render_template("Hello {{name}}", &values), "Hello Marcus");
}

#[test]
fn whitespace_inside_tag_is_ignored() {
    let values = named(&[("name", Value::from("Marcus"))]);
    assert_eq!(render_template("Hello {{ name }}", &values), "Hello Marcus");
}

#[test]
fn undefined_variable_renders_empty() {
    assert_eq!(render_template("Hello {{name}}!", &NamedValues::new()), "Hello !");
}

#[test]
fn variables_are_html_escaped() {
    let values = named(&[("tag", Value::from("<b>&'\"</b>"))]);
    assert_eq!(
        render_template("{{tag}}", &values),
        "&lt;b&gt;&amp;&#39;&quot;&lt;&#x2F;b&gt;"
    );
}

#[test]
fn triple_brace_and_ampersand_are_raw() {
    let values = named(&[("tag", Value::from("<b>"))]);
    assert_eq!(render_template("{{{tag}}}", &values), "<b>");
    assert_eq!(render_template("{{& tag}}", &values), "<b>");
}

#[test]
fn numbers_render_plainly() {
    let values = named(&[("n", Value::from(3)), ("x", Value::from(2.5))]);
    assert_eq!(render_template("{{n}} / {{x}}", &values), "3 / 2.5");
}

#[test]
fn dotted_names_walk_nested_maps() {
    let user = BTreeMap::from([("name".to_string(), Value::from("Ann"))]);
    let values = named(&[("user", Value::from(user))]);
    assert_eq!(render_template("Hi {{user.name}}", &values), "Hi Ann");
    assert_eq!(render_template("Hi {{user.missing}}", &values), "Hi ");
}

// =========================================================================
// Sections
// =========================================================================

#[test]
fn truthy_section_renders() {
    let values = named(&[("admin", Value::from(true))]);
    assert_eq!(render_template("{{#admin}}yes{{/admin}}", &values), "yes");
    assert_eq!(render_template("{{#guest}}yes{{/guest}}", &values), "");
}

#[test]
fn list_section_repeats_with_item_context() {
    let values = named(&[(
        "items",
        Value::from(vec![Value::from("a"), Value::from("b")]),
    )]);
    assert_eq!(render_template("{{#items}}[{{.}}]{{/items}}", &values), "[a][b]");
}

#[test]
fn map_section_pushes_context() {
    let user = BTreeMap::from([("name".to_string(), Value::from("Ann"))]);
    let values = named(&[("user", Value::from(user)), ("site", Value::from("x"))]);
    assert_eq!(
        render_template("{{#user}}{{name}}@{{site}}{{/user}}", &values),
        "Ann@x"
    );
}

#[test]
fn inverted_section_renders_when_empty() {
    let values = named(&[("items", Value::from(Vec::<Value>::new()))]);
    assert_eq!(render_template("{{^items}}none{{/items}}", &values), "none");
    assert_eq!(render_template("{{^missing}}none{{/missing}}", &values), "none");
}

#[test]
fn comments_are_dropped() {
    assert_eq!(render_template("a{{! note }}b", &NamedValues::new()), "ab");
}

// =========================================================================
// Malformed Templates
// =========================================================================

#[test]
fn unterminated_tag_is_literal() {
    let values = named(&[("a", Value::from("x"))]);
    assert_eq!(render_template("{{a}} and {{b", &values), "x and {{b");
}

#[test]
fn unclosed_section_is_an_error() {
    assert_eq!(
        Template::parse("{{#a}}text"),
        Err(TemplateError::UnclosedSection {
            name: "a".to_string()
        })
    );
}

#[test]
fn mismatched_section_is_an_error() {
    assert_eq!(
        Template::parse("{{#a}}text{{/b}}"),
        Err(TemplateError::MismatchedSection {
            expected: Some("a".to_string()),
            found: "b".to_string(),
        })
    );
}

#[test]
fn render_template_falls_back_to_source_on_error() {
    assert_eq!(
        render_template("{{#a}}{{b}}", &NamedValues::new()),
        "{{#a}}{{b}}"
    );
}
