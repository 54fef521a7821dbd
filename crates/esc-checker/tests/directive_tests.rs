//! `@ts-expect-exception` suppression.

use crate::DirectiveTable;
use crate::context::CheckerOptions;
use crate::diagnostics::diagnostic_codes;
use crate::test_utils::{TestProgram, check, check_with_options, codes};
use esc_common::position::LineMap;

const THROW_ERROR: &str = "function f() { throw new Error(\"e\"); }\n";

fn report_unused() -> CheckerOptions {
    CheckerOptions {
        report_unused_exception_directives: true,
        ..CheckerOptions::default()
    }
}

#[test]
fn test_directive_suppresses_unhandled_throw() {
    let source = format!("{THROW_ERROR}// @ts-expect-exception\nf();");
    assert!(check(&source).is_empty());
}

#[test]
fn test_directive_with_trailing_text() {
    let source = format!("{THROW_ERROR}// @ts-expect-exception startup may fail\nf();");
    assert!(check(&source).is_empty());
}

#[test]
fn test_directive_binds_only_the_next_statement() {
    let source = format!("{THROW_ERROR}// @ts-expect-exception\nf();\nf();");
    assert_eq!(codes(&source), vec![diagnostic_codes::UNHANDLED_THROWN_TYPE]);
}

#[test]
fn test_directive_must_be_on_the_preceding_line() {
    let source = format!("{THROW_ERROR}// @ts-expect-exception\n\nf();");
    assert_eq!(codes(&source), vec![diagnostic_codes::UNHANDLED_THROWN_TYPE]);
}

#[test]
fn test_trailing_comment_is_not_a_directive() {
    let source = format!("{THROW_ERROR}f(); // @ts-expect-exception\nf();");
    assert_eq!(
        codes(&source),
        vec![
            diagnostic_codes::UNHANDLED_THROWN_TYPE,
            diagnostic_codes::UNHANDLED_THROWN_TYPE
        ]
    );
    let program = TestProgram::new(&source);
    let checker = program.checker(CheckerOptions::default());
    assert!(checker.ctx.directives.is_empty());
}

#[test]
fn test_indented_directive_binds_next_statement() {
    let source = format!("{THROW_ERROR}function g() {{\n    // @ts-expect-exception\n    f();\n}}\n// @ts-expect-exception\ng();");
    assert!(check(&source).is_empty());
}

#[test]
fn test_directive_suppresses_floating_promise() {
    let source = "async function h() { throw 1; }\n// @ts-expect-exception\nh();";
    assert!(check(source).is_empty());
}

#[test]
fn test_directive_does_not_suppress_type_errors() {
    let source = format!("{THROW_ERROR}// @ts-expect-exception\nlet x: number = (f(), \"s\");");
    assert_eq!(
        check(&source),
        vec![(
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            "Type 'string' is not assignable to type 'number'.".to_string()
        )]
    );
}

#[test]
fn test_directive_does_not_suppress_declared_effect_errors() {
    let source = "// @ts-expect-exception\n\
                  function m(): void throws TypeError { throw new RangeError(\"r\"); }";
    assert_eq!(
        codes(source),
        vec![diagnostic_codes::INFERRED_THROWN_TYPE_NOT_ASSIGNABLE_TO_DECLARED]
    );
}

#[test]
fn test_unused_directive_is_silent_by_default() {
    assert!(check("// @ts-expect-exception\nlet x = 1;").is_empty());
}

#[test]
fn test_unused_directive_reported_when_enabled() {
    let diagnostics = check_with_options("// @ts-expect-exception\nlet x = 1;", report_unused());
    assert_eq!(
        diagnostics,
        vec![(
            diagnostic_codes::UNUSED_EXPECT_EXCEPTION_DIRECTIVE,
            "Unused '@ts-expect-exception' directive.".to_string()
        )]
    );
}

#[test]
fn test_used_directive_not_reported() {
    let source = format!("{THROW_ERROR}// @ts-expect-exception\nf();");
    assert!(check_with_options(&source, report_unused()).is_empty());
}

#[test]
fn test_directive_table_binds_statement() {
    let program = TestProgram::new("let a = 1;\n// @ts-expect-exception\nlet b = 2;");
    let text = program
        .arena
        .get_source_file_at(program.root)
        .map(|sf| sf.text.to_string())
        .unwrap_or_default();
    let line_map = LineMap::build(&text);
    let table = DirectiveTable::build(&program.arena, program.root, &line_map);
    assert_eq!(table.len(), 1);
    let directive = table.get(0).copied().expect("one directive");
    assert!(directive.statement.is_some());
    assert_eq!(table.directive_for(directive.statement), Some(0));
    let stmt_pos = program.arena.get(directive.statement).map(|n| n.pos);
    assert_eq!(line_map.line_of(stmt_pos.unwrap_or(0)), 2);
}

#[test]
fn test_block_comment_is_not_a_directive() {
    let source = format!("{THROW_ERROR}/* @ts-expect-exception */\nf();");
    assert_eq!(codes(&source), vec![diagnostic_codes::UNHANDLED_THROWN_TYPE]);
}
