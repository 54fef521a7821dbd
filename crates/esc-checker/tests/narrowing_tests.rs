//! Catch variables narrowed by `instanceof` and `typeof` guards.

use crate::context::CheckerOptions;
use crate::test_utils::{TestProgram, check, effect_of_function};
use esc_parser::syntax_kind_ext;

const PRELUDE: &str = "class ParseError extends Error { }\n\
                       class ValidationError extends Error { }\n\
                       function assertNever(x: never): never { throw new Error(\"unreachable\"); }\n\
                       function parse(s: string): number {\n\
                           if (s.length === 0) throw new ParseError(\"empty\");\n\
                           if (s.length > 9) throw new ValidationError(\"long\");\n\
                           return 1;\n\
                       }\n";

#[test]
fn test_else_branch_of_covering_instanceof_is_unreachable() {
    let source = "function throwsError() { throw new Error(\"x\"); }\n\
                  function assertNever(x: never): never { throw new Error(\"unreachable\"); }\n\
                  try {\n\
                      throwsError();\n\
                  } catch (e) {\n\
                      if (e instanceof Error) {\n\
                      } else {\n\
                          assertNever(e);\n\
                      }\n\
                  }";
    assert!(check(source).is_empty(), "{:?}", check(source));
}

#[test]
fn test_exhaustive_instanceof_returns_leave_nothing_to_throw() {
    let source = format!(
        "{PRELUDE}function shard(s: string) {{\n\
             try {{\n\
                 return parse(s);\n\
             }} catch (e) {{\n\
                 if (e instanceof ParseError) return 0;\n\
                 if (e instanceof ValidationError) return 1;\n\
                 assertNever(e);\n\
             }}\n\
         }}\n\
         shard(\"a\");"
    );
    assert_eq!(effect_of_function(&source, "shard").0, "never");
    assert!(check(&source).is_empty(), "{:?}", check(&source));
}

#[test]
fn test_partial_instanceof_chain_still_reaches_assert_never() {
    let source = format!(
        "{PRELUDE}function shard(s: string) {{\n\
             try {{\n\
                 return parse(s);\n\
             }} catch (e) {{\n\
                 if (e instanceof ParseError) return 0;\n\
                 assertNever(e);\n\
             }}\n\
         }}"
    );
    assert_eq!(effect_of_function(&source, "shard").0, "Error");
}

#[test]
fn test_rethrow_inside_guard_throws_the_narrowed_type() {
    let source = format!(
        "{PRELUDE}function g(s: string) {{\n\
             try {{\n\
                 return parse(s);\n\
             }} catch (e) {{\n\
                 if (e instanceof ParseError) throw e;\n\
                 return 0;\n\
             }}\n\
         }}"
    );
    assert_eq!(effect_of_function(&source, "g").0, "ParseError");
}

#[test]
fn test_negated_guard_rethrows_the_remainder() {
    let source = format!(
        "{PRELUDE}function g(s: string) {{\n\
             try {{\n\
                 return parse(s);\n\
             }} catch (e) {{\n\
                 if (!(e instanceof ParseError)) throw e;\n\
                 return 0;\n\
             }}\n\
         }}"
    );
    assert_eq!(effect_of_function(&source, "g").0, "ValidationError");
}

#[test]
fn test_typeof_guard_splits_primitive_throws() {
    let source = "function risky(n: number) {\n\
                      if (n > 1) throw \"bad\";\n\
                      throw new RangeError(\"r\");\n\
                  }\n\
                  function g(n: number) {\n\
                      try {\n\
                          risky(n);\n\
                      } catch (e) {\n\
                          if (typeof e === \"string\") return e;\n\
                          throw e;\n\
                      }\n\
                  }";
    assert_eq!(effect_of_function(source, "g").0, "RangeError");
}

#[test]
fn test_narrowing_leaves_catch_variable_type_unchanged() {
    let source = format!(
        "{PRELUDE}try {{\n\
             parse(\"a\");\n\
         }} catch (e) {{\n\
             if (e instanceof ParseError) {{ }}\n\
         }}"
    );
    let program = TestProgram::new(&source);
    let clause = program.find_all(syntax_kind_ext::CATCH_CLAUSE)[0];
    let mut checker = program.checker(CheckerOptions::default());
    checker.check_source_file(program.root);
    let catch_type = checker
        .get_catch_variable_type(clause)
        .expect("catch clause has a type");
    assert_eq!(program.format(catch_type), "ParseError | ValidationError");
}

#[test]
fn test_guard_inside_nested_function_does_not_narrow() {
    let source = format!(
        "{PRELUDE}function g(s: string) {{\n\
             try {{\n\
                 return parse(s);\n\
             }} catch (e) {{\n\
                 const check = () => e instanceof ParseError;\n\
                 if (check()) return 0;\n\
                 throw e;\n\
             }}\n\
         }}"
    );
    assert_eq!(effect_of_function(&source, "g").0, "ParseError | ValidationError");
}
