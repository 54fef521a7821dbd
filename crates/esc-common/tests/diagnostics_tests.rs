use super::*;

#[test]
fn test_format_message_replaces_positional_args() {
    let text = format_message(diagnostic_messages::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE, &["void", "number"]);
    assert_eq!(text, "Type 'void' is not assignable to type 'number'.");
}

#[test]
fn test_every_code_has_a_message() {
    for code in [
        diagnostic_codes::UNHANDLED_THROWN_TYPE,
        diagnostic_codes::UNHANDLED_PROMISE_REJECTION_TYPE,
        diagnostic_codes::INFERRED_THROWN_TYPE_NOT_ASSIGNABLE_TO_DECLARED,
        diagnostic_codes::INFERRED_REJECTION_TYPE_NOT_ASSIGNABLE_TO_DECLARED,
        diagnostic_codes::UNUSED_EXPECT_EXCEPTION_DIRECTIVE,
        diagnostic_codes::EXPECTED,
    ] {
        assert!(
            get_message_template(code).is_some(),
            "missing template for TS{code}"
        );
    }
}

#[test]
fn test_unhandled_throw_message_shape() {
    let msg = get_diagnostic_message(diagnostic_codes::UNHANDLED_THROWN_TYPE).unwrap();
    let diag = Diagnostic::from_message("a.ts".to_string(), 3, 4, msg, &["Error"]);
    assert_eq!(diag.message_text, "Unhandled thrown type: Error.");
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.code, 18063);
}

#[test]
fn test_sort_and_deduplicate_orders_by_position() {
    let mut diags = vec![
        Diagnostic::error("a.ts".into(), 10, 1, "b".into(), 2322),
        Diagnostic::error("a.ts".into(), 2, 1, "a".into(), 18063),
        Diagnostic::error("a.ts".into(), 10, 1, "b".into(), 2322),
    ];
    sort_and_deduplicate(&mut diags);
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].start, 2);
    assert_eq!(diags[1].start, 10);
}

#[test]
fn test_diagnostic_serializes_category_and_omits_empty_related() {
    let diag = Diagnostic::error("a.ts".into(), 0, 5, "Unhandled thrown type: Error.".into(), 18063);
    let value = serde_json::to_value(&diag).unwrap();
    assert_eq!(value["file"], "a.ts");
    assert_eq!(value["category"], "Error");
    assert_eq!(value["code"], 18063);
    assert!(value.get("related_information").is_none());
}
