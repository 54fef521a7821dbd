//! Effect inference and call-site enforcement.

use crate::context::CheckerOptions;
use crate::diagnostics::diagnostic_codes;
use crate::test_utils::{TestProgram, check, check_with_options, codes, effect_of_function};
use esc_parser::syntax_kind_ext;

const THROW_ERROR: &str = "function f() { throw new Error(\"e\"); }\n";

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_top_level_call_to_throwing_function_is_unhandled() {
    let diagnostics = check(&format!("{THROW_ERROR}f();"));
    assert_eq!(
        diagnostics,
        vec![(
            diagnostic_codes::UNHANDLED_THROWN_TYPE,
            "Unhandled thrown type: Error.".to_string()
        )]
    );
}

#[test]
fn test_try_catch_handles_call_and_types_catch_variable() {
    let source = format!("{THROW_ERROR}try {{ f(); }} catch (e) {{ e.message; }}");
    assert!(check(&source).is_empty());

    let program = TestProgram::new(&source);
    let clause = program.find_all(syntax_kind_ext::CATCH_CLAUSE)[0];
    let mut checker = program.checker(CheckerOptions::default());
    let catch_type = checker.get_catch_variable_type(clause);
    assert_eq!(catch_type, program.types.builtin_type("Error"));
}

#[test]
fn test_rethrow_from_catch_escapes_the_enclosing_function() {
    let source = format!("{THROW_ERROR}function g() {{ try {{ f(); }} catch (e) {{ throw e; }} }}\ng();");
    assert_eq!(
        check(&source),
        vec![(
            diagnostic_codes::UNHANDLED_THROWN_TYPE,
            "Unhandled thrown type: Error.".to_string()
        )]
    );
}

#[test]
fn test_async_throw_becomes_unhandled_rejection() {
    let diagnostics = check("async function h() { throw \"x\"; }\nh();");
    assert_eq!(
        diagnostics,
        vec![(
            diagnostic_codes::UNHANDLED_PROMISE_REJECTION_TYPE,
            "Unhandled promise rejection type: string.".to_string()
        )]
    );
}

#[test]
fn test_voided_and_caught_promises_are_handled() {
    let source = "async function h() { throw \"x\"; }\nvoid h();\nh().catch(() => {});";
    assert!(check(source).is_empty());
}

#[test]
fn test_mutual_recursion_reports_unknown_once() {
    let source = "function a() { b(); }\nfunction b() { a(); }\na();";
    assert_eq!(
        check(source),
        vec![(
            diagnostic_codes::UNHANDLED_THROWN_TYPE,
            "Unhandled thrown type: unknown.".to_string()
        )]
    );
}

#[test]
fn test_declared_clause_accepts_subtype_of_inferred_effect() {
    let source = "declare function k(): number throws RangeError;\n\
                  function m(): number throws Error { return k(); }";
    assert!(check(source).is_empty());
}

#[test]
fn test_declared_clause_narrower_than_inferred_effect_is_reported() {
    let source = "declare function k(): number throws RangeError;\n\
                  function m(): number throws TypeError { return k(); }";
    assert_eq!(
        check(source),
        vec![(
            diagnostic_codes::INFERRED_THROWN_TYPE_NOT_ASSIGNABLE_TO_DECLARED,
            "Inferred thrown type 'RangeError' is not assignable to declared thrown type 'TypeError'."
                .to_string()
        )]
    );
}

// =============================================================================
// Composition laws
// =============================================================================

#[test]
fn test_absorption_keeps_only_catch_and_finally_effects() {
    let source = format!(
        "{THROW_ERROR}\
         function g() {{\n\
           try {{ f(); }} catch (e) {{ throw new TypeError(\"c\"); }} finally {{ JSON.parse(\"{{}}\"); }}\n\
         }}"
    );
    let (throws, rejects) = effect_of_function(&source, "g");
    assert_eq!(throws, "TypeError | SyntaxError");
    assert_eq!(rejects, "never");
}

#[test]
fn test_finally_that_always_throws_replaces_try_and_catch_effects() {
    let source = format!(
        "{THROW_ERROR}\
         function g(x: boolean) {{\n\
           try {{ if (x) {{ f(); }} JSON.parse(\"1\"); }} catch (e) {{ throw new RangeError(\"c\"); }} finally {{ throw new TypeError(\"f\"); }}\n\
         }}\n\
         function h() {{\n\
           try {{ f(); }} finally {{ throw new TypeError(\"f\"); }}\n\
         }}"
    );
    assert_eq!(effect_of_function(&source, "g").0, "TypeError");
    assert_eq!(effect_of_function(&source, "h").0, "TypeError");
}

#[test]
fn test_return_in_finally_swallows_pending_throw() {
    let source = format!("{THROW_ERROR}function g() {{ try {{ f(); }} finally {{ return; }} }}");
    assert_eq!(effect_of_function(&source, "g").0, "never");
}

#[test]
fn test_rethrow_produces_exactly_the_try_union() {
    let source = "function a() { throw new TypeError(\"a\"); }\n\
                  function b() { throw new RangeError(\"b\"); }\n\
                  function g(x: boolean) { try { if (x) { a(); } b(); } catch (e) { throw e; } }";
    assert_eq!(effect_of_function(source, "g").0, "TypeError | RangeError");
}

#[test]
fn test_try_without_catch_does_not_absorb() {
    let source = format!("{THROW_ERROR}function g() {{ try {{ f(); }} finally {{ }} }}");
    assert_eq!(effect_of_function(&source, "g").0, "Error");
}

#[test]
fn test_empty_try_gives_never_catch_variable() {
    let program = TestProgram::new("try { let x = 1; } catch (e) { }");
    let clause = program.find_all(syntax_kind_ext::CATCH_CLAUSE)[0];
    let mut checker = program.checker(CheckerOptions::default());
    let catch_type = checker.get_catch_variable_type(clause);
    assert_eq!(catch_type.map(|t| program.format(t)), Some("never".to_string()));
}

#[test]
fn test_statements_after_throw_are_unreachable() {
    let source = format!("{THROW_ERROR}function g() {{ throw new TypeError(\"a\"); f(); }}");
    assert_eq!(effect_of_function(&source, "g").0, "TypeError");
}

#[test]
fn test_if_else_unions_both_branches() {
    let source = "function g(x: boolean) {\n\
                    if (x) { throw new TypeError(\"a\"); } else { throw new RangeError(\"b\"); }\n\
                    JSON.parse(\"1\");\n\
                  }";
    // Both branches leave, so the parse is unreachable.
    assert_eq!(effect_of_function(source, "g").0, "TypeError | RangeError");
}

#[test]
fn test_loop_body_counts_even_if_it_may_not_run() {
    let source = "function g(n: number) { while (n > 0) { throw new RangeError(\"r\"); } }";
    assert_eq!(effect_of_function(source, "g").0, "RangeError");
}

#[test]
fn test_thrown_literals_are_widened() {
    assert_eq!(effect_of_function("function g() { throw 42; }", "g").0, "number");
}

#[test]
fn test_idempotent_diagnostics() {
    let source = format!("{THROW_ERROR}f();\nasync function h() {{ throw 1; }}\nh();");
    assert_eq!(check(&source), check(&source));
}

#[test]
fn test_cycle_members_get_unknown() {
    let source = "function a() { b(); }\nfunction b() { a(); }";
    assert_eq!(effect_of_function(source, "a").0, "unknown");
    assert_eq!(effect_of_function(source, "b").0, "unknown");
}

// =============================================================================
// Call sites
// =============================================================================

#[test]
fn test_calls_inside_function_bodies_propagate() {
    let source = format!("{THROW_ERROR}function g() {{ f(); }}");
    assert!(check(&source).is_empty());
}

#[test]
fn test_unknown_is_not_handled_by_top_level_try() {
    let source = "function a() { b(); }\nfunction b() { a(); }\ntry { a(); } catch (e) { }";
    assert_eq!(codes(source), vec![diagnostic_codes::UNHANDLED_THROWN_TYPE]);
}

#[test]
fn test_constructor_effect_is_enforced_at_new() {
    let source = "class C { constructor() { throw new RangeError(\"c\"); } }\nnew C();";
    assert_eq!(
        check(source),
        vec![(
            diagnostic_codes::UNHANDLED_THROWN_TYPE,
            "Unhandled thrown type: RangeError.".to_string()
        )]
    );
}

#[test]
fn test_inherited_constructor_effect() {
    let source = "class C { constructor() { throw new RangeError(\"c\"); } }\n\
                  class D extends C { }\n\
                  new D();";
    assert_eq!(codes(source), vec![diagnostic_codes::UNHANDLED_THROWN_TYPE]);
}

#[test]
fn test_method_call_through_instance() {
    let source = "class S { run(): void { throw new TypeError(\"t\"); } }\n\
                  const s = new S();\n\
                  s.run();";
    assert_eq!(
        check(source),
        vec![(
            diagnostic_codes::UNHANDLED_THROWN_TYPE,
            "Unhandled thrown type: TypeError.".to_string()
        )]
    );
}

#[test]
fn test_getter_read_is_a_call_site() {
    let source = "class G { get v(): number { throw new RangeError(\"r\"); } }\n\
                  const g = new G();\n\
                  g.v;";
    assert_eq!(codes(source), vec![diagnostic_codes::UNHANDLED_THROWN_TYPE]);
}

#[test]
fn test_native_library_call() {
    assert_eq!(
        check("JSON.parse(\"{\");"),
        vec![(
            diagnostic_codes::UNHANDLED_THROWN_TYPE,
            "Unhandled thrown type: SyntaxError.".to_string()
        )]
    );
}

#[test]
fn test_const_alias_of_function_resolves() {
    let source = format!("{THROW_ERROR}const g = f;\ng();");
    assert_eq!(codes(&source), vec![diagnostic_codes::UNHANDLED_THROWN_TYPE]);
}

#[test]
fn test_object_literal_method_uses_last_definition() {
    let source = "const api = {\n\
                      run() { throw new TypeError(\"a\"); },\n\
                      run() { throw new RangeError(\"b\"); },\n\
                  };\n\
                  function g() { api.run(); }";
    assert_eq!(effect_of_function(source, "g").0, "RangeError");
}

#[test]
fn test_array_type_annotation_resolves_element_type() {
    let source = "let errors: RangeError[] = [];";
    let program = TestProgram::new(source);
    let annotation = program.find_all(syntax_kind_ext::ARRAY_TYPE)[0];
    let mut checker = program.checker(CheckerOptions::default());
    let ty = checker.get_type_from_type_node(annotation);
    assert_eq!(program.format(ty), "RangeError[]");
}

#[test]
fn test_function_typed_parameter_contributes_only_its_clause() {
    let source = "function apply(cb: () => void) { cb(); }\n\
                  function strict(cb: () => void throws RangeError) { cb(); }";
    assert_eq!(effect_of_function(source, "apply").0, "never");
    assert_eq!(effect_of_function(source, "strict").0, "RangeError");
}

#[test]
fn test_checked_throws_off_produces_no_effect_diagnostics() {
    let options = CheckerOptions {
        checked_throws: false,
        ..CheckerOptions::default()
    };
    let source = format!("{THROW_ERROR}f();");
    assert!(check_with_options(&source, options).is_empty());
}

// =============================================================================
// Declared clauses
// =============================================================================

#[test]
fn test_callers_see_declared_clause() {
    let source = "function f(): void throws TypeError { throw new TypeError(\"a\"); }\n\
                  function g(): void throws Error { throw new Error(\"b\"); }";
    assert_eq!(effect_of_function(source, "f").0, "TypeError");
    assert_eq!(effect_of_function(source, "g").0, "Error");
}

#[test]
fn test_declared_clause_wins_even_when_too_narrow() {
    let source = "function f(): void throws TypeError { throw new RangeError(\"a\"); }";
    assert_eq!(effect_of_function(source, "f").0, "TypeError");
    assert_eq!(
        codes(source),
        vec![diagnostic_codes::INFERRED_THROWN_TYPE_NOT_ASSIGNABLE_TO_DECLARED]
    );
}

#[test]
fn test_declared_rejection_too_narrow() {
    let source =
        "async function r(): Promise<void> rejects TypeError { throw new RangeError(\"x\"); }";
    assert_eq!(
        check(source),
        vec![(
            diagnostic_codes::INFERRED_REJECTION_TYPE_NOT_ASSIGNABLE_TO_DECLARED,
            "Inferred rejection type 'RangeError' is not assignable to declared rejection type 'TypeError'."
                .to_string()
        )]
    );
}
