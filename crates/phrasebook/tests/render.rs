//! Integration tests for the render pipeline.

use phrasebook::{NamedValues, Value, params, render};

fn none() -> NamedValues {
    NamedValues::new()
}

#[test]
fn plain_text_is_unchanged() {
    assert_eq!(render("Hello", &none(), &[], None), "Hello");
}

#[test]
fn count_fills_first_placeholder() {
    assert_eq!(render("%s items", &none(), &[], Some(5)), "5 items");
}

#[test]
fn count_selects_interval_before_substitution() {
    let phrase = "[0] no items|[1] one item|%s items";
    assert_eq!(render(phrase, &none(), &[], Some(0)), "no items");
    assert_eq!(render(phrase, &none(), &[], Some(1)), "one item");
    assert_eq!(render(phrase, &none(), &[], Some(12)), "12 items");
}

#[test]
fn template_uses_named_values() {
    let named = params! { "name" => "Ann", "city" => "Paris" };
    assert_eq!(render("{{name}} lives in {{city}}", &named, &[], None), "Ann lives in Paris");
}

#[test]
fn template_escapes_html() {
    let named = params! { "tag" => "<b>" };
    assert_eq!(render("{{tag}} {{{tag}}}", &named, &[], None), "&lt;b&gt; <b>");
}

#[test]
fn positional_params_run_last() {
    let named = params! { "name" => "Ann" };
    let params: [Value; 1] = ["Paris".into()];
    assert_eq!(render("{{name}} in %s", &named, &params, None), "Ann in Paris");
}

#[test]
fn params_without_percent_are_ignored() {
    assert_eq!(render("No placeholders", &none(), &["x".into()], None), "No placeholders");
}

#[test]
fn count_then_params() {
    let params: [Value; 1] = ["Paris".into()];
    assert_eq!(render("%s cats in %s", &none(), &params, Some(3)), "3 cats in Paris");
}

#[test]
fn count_can_be_used_by_index() {
    assert_eq!(render("%1$s of %1$s", &none(), &[], Some(2)), "2 of 2");
}

#[test]
fn template_can_produce_placeholders_for_params() {
    let named = params! { "unit" => "%s kg" };
    let params: [Value; 1] = [7.into()];
    assert_eq!(render("{{unit}}", &named, &params, None), "7 kg");
}
