//! Overload-directed effect selection.

use crate::diagnostics::diagnostic_codes;
use crate::test_utils::{check, codes};

const PARSE_OVERLOADS: &str = "function p(x: string): number throws SyntaxError;\n\
                               function p(x: number): number;\n\
                               function p(x: any): number { return 1; }\n";

fn thrown(types: &str) -> (u32, String) {
    (
        diagnostic_codes::UNHANDLED_THROWN_TYPE,
        format!("Unhandled thrown type: {types}."),
    )
}

#[test]
fn test_selected_overload_clause_is_used() {
    let source = format!("{PARSE_OVERLOADS}p(\"1\");");
    assert_eq!(check(&source), vec![thrown("SyntaxError")]);
}

#[test]
fn test_overload_without_clause_contributes_nothing() {
    let source = format!("{PARSE_OVERLOADS}p(1);");
    assert!(check(&source).is_empty());
}

#[test]
fn test_literal_parameter_types_select_by_value() {
    let source = "function q(kind: \"a\"): void throws TypeError;\n\
                  function q(kind: \"b\"): void throws RangeError;\n\
                  function q(kind: string): void { }\n\
                  q(\"b\");";
    assert_eq!(check(source), vec![thrown("RangeError")]);
}

#[test]
fn test_arity_selects_overload() {
    let source = "function r(a: number): void throws TypeError;\n\
                  function r(a: number, b: number): void throws RangeError;\n\
                  function r(a: number, b?: number): void { }\n\
                  r(1, 2);";
    assert_eq!(check(source), vec![thrown("RangeError")]);
}

#[test]
fn test_no_matching_overload_unions_all() {
    let source = "function r(a: number): void throws TypeError;\n\
                  function r(a: string): void throws RangeError;\n\
                  function r(a: any): void { }\n\
                  r(true);";
    assert_eq!(check(source), vec![thrown("TypeError | RangeError")]);
}

#[test]
fn test_method_overloads() {
    let source = "class Codec {\n\
                    decode(x: string): number throws SyntaxError;\n\
                    decode(x: number): number;\n\
                    decode(x: any): number { return 0; }\n\
                  }\n\
                  const c = new Codec();\n\
                  c.decode(2);\n\
                  c.decode(\"2\");";
    assert_eq!(codes(source), vec![diagnostic_codes::UNHANDLED_THROWN_TYPE]);
}
