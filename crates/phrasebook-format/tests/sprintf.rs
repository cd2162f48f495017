//! Integration tests for positional substitution.

use phrasebook_format::{Value, sprintf};

fn args(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

// =========================================================================
// Basic Substitution
// =========================================================================

#[test]
fn string_placeholders_in_order() {
    assert_eq!(
        sprintf("%s and %s", &args(&["cats", "dogs"])),
        "cats and dogs"
    );
}

#[test]
fn number_into_string_placeholder() {
    assert_eq!(sprintf("%s items", &[Value::from(5)]), "5 items");
}

#[test]
fn integer_placeholder_truncates() {
    assert_eq!(sprintf("%d", &[Value::from(3.9)]), "3");
    assert_eq!(sprintf("%i", &[Value::from("12px")]), "12");
}

#[test]
fn integer_placeholder_with_non_numeric_argument() {
    assert_eq!(sprintf("%d", &[Value::from("many")]), "NaN");
}

#[test]
fn percent_escape() {
    assert_eq!(sprintf("100%%", &[]), "100%");
    assert_eq!(sprintf("%d%%", &[Value::from(50)]), "50%");
}

// =========================================================================
// Missing Arguments and Stray Percent Signs
// =========================================================================

#[test]
fn missing_argument_keeps_placeholder() {
    assert_eq!(
        sprintf("%s cats and %s dogs", &[Value::from(3)]),
        "3 cats and %s dogs"
    );
}

#[test]
fn lone_percent_is_copied() {
    assert_eq!(sprintf("50% off %s", &args(&["today"])), "50% off today");
    assert_eq!(sprintf("trailing %", &args(&["x"])), "trailing %");
}

#[test]
fn empty_arguments_leave_text_unchanged() {
    assert_eq!(sprintf("%s and %d", &[]), "%s and %d");
}

// =========================================================================
// Argument Index
// =========================================================================

#[test]
fn explicit_index_reorders() {
    assert_eq!(sprintf("%2$s %1$s", &args(&["world", "hello"])), "hello world");
}

#[test]
fn explicit_index_does_not_advance_cursor() {
    assert_eq!(sprintf("%2$s %s %s", &args(&["a", "b"])), "b a b");
}

// =========================================================================
// Flags, Width and Precision
// =========================================================================

#[test]
fn zero_padding_keeps_sign_in_front() {
    assert_eq!(sprintf("%05d", &[Value::from(-42)]), "-0042");
}

#[test]
fn plus_flag_on_positive_numbers() {
    assert_eq!(sprintf("%+d", &[Value::from(7)]), "+7");
    assert_eq!(sprintf("%+d", &[Value::from(-7)]), "-7");
}

#[test]
fn custom_pad_and_left_alignment() {
    assert_eq!(sprintf("%'*6s", &args(&["ab"])), "****ab");
    assert_eq!(sprintf("%-6s|", &args(&["ab"])), "ab    |");
}

#[test]
fn fixed_precision() {
    assert_eq!(sprintf("%.2f", &[Value::from(3.14159)]), "3.14");
    assert_eq!(sprintf("%f", &[Value::from(2.5)]), "2.5");
}

#[test]
fn string_precision_truncates() {
    assert_eq!(sprintf("%.3s", &args(&["abcdef"])), "abc");
}

#[test]
fn exponent_notation() {
    assert_eq!(sprintf("%.1e", &[Value::from(1500)]), "1.5e+3");
}

// =========================================================================
// Other Types
// =========================================================================

#[test]
fn radix_placeholders() {
    assert_eq!(sprintf("%b", &[Value::from(5)]), "101");
    assert_eq!(sprintf("%o", &[Value::from(8)]), "10");
    assert_eq!(sprintf("%x", &[Value::from(255)]), "ff");
    assert_eq!(sprintf("%X", &[Value::from(255)]), "FF");
}

#[test]
fn unsigned_wraps_negative() {
    assert_eq!(sprintf("%u", &[Value::from(-1)]), "4294967295");
}

#[test]
fn char_boolean_and_json() {
    assert_eq!(sprintf("%c", &[Value::from(65)]), "A");
    assert_eq!(sprintf("%t", &[Value::from("")]), "false");
    assert_eq!(
        sprintf("%j", &[Value::from(vec![Value::from(1), Value::from("a")])]),
        r#"[1,"a"]"#
    );
}
