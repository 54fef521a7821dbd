use crate::native_throw_map::{lookup_native_call, lookup_native_construct};
use esc_solver::{TypeFormatter, TypeInterner};

#[test]
fn test_json_parse_throws_syntax_error() {
    let effect = lookup_native_call("JSON.parse").expect("JSON.parse is mapped");
    assert_eq!(effect.throws, &["SyntaxError"]);
    assert!(effect.rejects.is_empty());
}

#[test]
fn test_unmapped_calls_have_no_entry() {
    assert!(lookup_native_call("Math.max").is_none());
    assert!(lookup_native_call("parse").is_none());
}

#[test]
fn test_constructors_are_keyed_separately() {
    assert!(lookup_native_construct("URL").is_some());
    assert!(lookup_native_call("URL").is_none());
    assert!(lookup_native_construct("Date").is_none());
}

#[test]
fn test_fetch_rejects_rather_than_throws() {
    let effect = lookup_native_call("fetch").expect("fetch is mapped");
    assert!(effect.throws.is_empty());
    assert_eq!(effect.rejects, &["TypeError"]);
}

#[test]
fn test_to_effect_resolves_builtin_error_types() {
    let types = TypeInterner::new();
    let effect = lookup_native_call("BigInt")
        .expect("BigInt is mapped")
        .to_effect(&types);
    let formatter = TypeFormatter::new(&types);
    assert_eq!(formatter.format(effect.throws.type_id()), "SyntaxError | RangeError");
    assert!(effect.rejects.is_empty());
}
