//! TS2322 for annotated variable initializers.

use crate::context::CheckerOptions;
use crate::diagnostics::diagnostic_codes;
use crate::test_utils::{check, check_with_options};

#[test]
fn test_string_initializer_for_number_is_reported() {
    assert_eq!(
        check("let x: number = \"s\";"),
        vec![(
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            "Type 'string' is not assignable to type 'number'.".to_string()
        )]
    );
}

#[test]
fn test_matching_primitive_is_accepted() {
    assert!(check("let x: number = 1;\nconst s: string = \"a\";\nlet b: boolean = true;").is_empty());
}

#[test]
fn test_object_types_are_not_checked() {
    assert!(check("class A { }\nlet a: A = 1 as any;\nlet e: Error = new Error(\"e\");").is_empty());
}

#[test]
fn test_reported_even_when_effect_checking_is_off() {
    let options = CheckerOptions {
        checked_throws: false,
        ..CheckerOptions::default()
    };
    assert_eq!(
        check_with_options("let x: string = 1;", options),
        vec![(
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            "Type 'number' is not assignable to type 'string'.".to_string()
        )]
    );
}
