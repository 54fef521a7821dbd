use esc_common::Diagnostic;

use crate::reporter::Reporter;

const SOURCE: &str = "function f() { throw new Error(\"e\"); }\nf();\n";

fn unhandled_at_call() -> Diagnostic {
    let start = SOURCE.find("f();").expect("call present") as u32;
    Diagnostic::error(
        "src/a.ts".to_string(),
        start,
        3,
        "Unhandled thrown type: Error.".to_string(),
        18063,
    )
}

#[test]
fn test_plain_format_matches_tsc() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("src/a.ts", SOURCE);
    assert_eq!(
        reporter.render(&[unhandled_at_call()]),
        "src/a.ts(2,1): error TS18063: Unhandled thrown type: Error."
    );
}

#[test]
fn test_unknown_file_prints_name_only() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_diagnostic(&unhandled_at_call()),
        "src/a.ts: error TS18063: Unhandled thrown type: Error."
    );
}

#[test]
fn test_pretty_format_includes_snippet() {
    colored::control::set_override(false);
    let mut reporter = Reporter::new(true);
    reporter.add_source("src/a.ts", SOURCE);
    let rendered = reporter.format_diagnostic(&unhandled_at_call());
    assert!(rendered.starts_with("src/a.ts:2:1 - error TS18063: Unhandled thrown type: Error."));
    assert!(rendered.contains("    2   f();"), "missing source line in {rendered:?}");
    assert!(rendered.ends_with("        ~~~"), "missing underline in {rendered:?}");
}

#[test]
fn test_multiple_diagnostics_are_line_separated() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("src/a.ts", SOURCE);
    let rendered = reporter.render(&[unhandled_at_call(), unhandled_at_call()]);
    assert_eq!(rendered.lines().count(), 2);
}

#[test]
fn test_summary_wording() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.format_summary(0), "Found 0 errors.");
    assert_eq!(reporter.format_summary(1), "Found 1 error.");
    assert_eq!(reporter.format_summary(3), "Found 3 errors.");
}

#[test]
fn test_json_report() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("src/a.ts", SOURCE);
    let json = reporter
        .render_json(&[unhandled_at_call()])
        .expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["errorCount"], 1);
    let entry = &value["diagnostics"][0];
    assert_eq!(entry["line"], 2);
    assert_eq!(entry["column"], 1);
    assert_eq!(entry["code"], 18063);
    assert_eq!(entry["file"], "src/a.ts");
    assert_eq!(entry["message_text"], "Unhandled thrown type: Error.");
}
