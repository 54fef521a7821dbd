//! End-to-end scenarios through the public `Project` surface.

use errorscript::{CheckerOptions, Diagnostic, Project, check_source};

const THROW_ERROR: &str = "function f(){ throw new Error(\"e\"); }\n";
const REJECT_STRING: &str = "async function h(){ throw \"x\"; }\n";

fn check(source: &str) -> Vec<Diagnostic> {
    check_source("scenario.ts", source.to_string(), CheckerOptions::default())
}

fn summary(diagnostics: &[Diagnostic]) -> Vec<(u32, &str)> {
    diagnostics
        .iter()
        .map(|d| (d.code, d.message_text.as_str()))
        .collect()
}

#[test]
fn unhandled_throw_is_reported_at_the_call() {
    let source = format!("{THROW_ERROR}f();");
    let diagnostics = check(&source);
    assert_eq!(summary(&diagnostics), vec![(18063, "Unhandled thrown type: Error.")]);
    let call_start = source.find("f();").expect("call present") as u32;
    assert_eq!(diagnostics[0].start, call_start);
}

#[test]
fn try_catch_handles_and_types_the_catch_variable() {
    let source = format!("{THROW_ERROR}try {{ f(); }} catch(e) {{ e.message; }}");
    assert!(check(&source).is_empty());

    let mut project = Project::new(CheckerOptions::default());
    project.set_file("scenario.ts".to_string(), source.clone());
    let offset = source.find("e.message").expect("catch body present") as u32;
    let catch_type = project
        .get_catch_variable_type("scenario.ts", offset)
        .expect("catch clause at offset");
    assert_eq!(catch_type.value, "Error");
}

#[test]
fn rethrow_escapes_to_the_outer_call() {
    let source = format!("{THROW_ERROR}function g(){{ try {{ f(); }} catch(e){{ throw e; }} }} g();");
    let diagnostics = check(&source);
    assert_eq!(summary(&diagnostics), vec![(18063, "Unhandled thrown type: Error.")]);
    let call_start = source.rfind("g();").expect("call present") as u32;
    assert_eq!(diagnostics[0].start, call_start);
}

#[test]
fn floating_async_call_is_an_unhandled_rejection() {
    let diagnostics = check(&format!("{REJECT_STRING}h();"));
    assert_eq!(
        summary(&diagnostics),
        vec![(18064, "Unhandled promise rejection type: string.")]
    );
}

#[test]
fn voided_and_caught_promises_are_fine() {
    assert!(check(&format!("{REJECT_STRING}void h();\nh().catch(()=>{{}});")).is_empty());
}

#[test]
fn mutual_recursion_reports_unknown_at_the_outer_call() {
    let diagnostics = check("function a(){ b(); }\nfunction b(){ a(); }\na();");
    assert_eq!(summary(&diagnostics), vec![(18063, "Unhandled thrown type: unknown.")]);
}

#[test]
fn declared_clause_checks() {
    let k = "declare function k(): number throws RangeError;\n";
    assert!(check(&format!("{k}function m(): number throws Error {{ return k(); }}")).is_empty());

    let diagnostics = check(&format!("{k}function m(): number throws TypeError {{ return k(); }}"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 18065);
}

#[test]
fn suppression_leaves_type_errors_alone() {
    let source = format!("{THROW_ERROR}// @ts-expect-exception\nlet x: number = (f(), \"s\");");
    assert_eq!(
        summary(&check(&source)),
        vec![(2322, "Type 'string' is not assignable to type 'number'.")]
    );
}

#[test]
fn rerunning_is_idempotent() {
    let source = format!("{THROW_ERROR}{REJECT_STRING}f();\nh();");
    assert_eq!(check(&source), check(&source));
}

#[test]
fn disabling_checked_throws_silences_the_subsystem() {
    let options = CheckerOptions {
        checked_throws: false,
        ..CheckerOptions::default()
    };
    let source = format!("{THROW_ERROR}f();\nfunction m(): void throws TypeError {{ f(); }}");
    assert!(check_source("scenario.ts", source, options).is_empty());
}
