use crate::project::{EffectSummary, Project, check_source};
use crate::tracing_config::LogFormat;
use esc_checker::CheckerOptions;

const SOURCE: &str = "function f() { throw new Error(\"e\"); }\n\
                      try { f(); } catch (e) { e.message; }\n\
                      async function h() { throw new RangeError(\"r\"); }\n";

fn offset_of(source: &str, needle: &str) -> u32 {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not in source")) as u32
}

#[test]
fn test_versions_increase_per_update() {
    let mut project = Project::new(CheckerOptions::default());
    assert_eq!(project.set_file("a.ts".to_string(), "let x = 1;".to_string()), 1);
    assert_eq!(project.set_file("a.ts".to_string(), "let x = 2;".to_string()), 2);
    assert_eq!(project.set_file("b.ts".to_string(), String::new()), 1);
    assert_eq!(project.file_version("a.ts"), Some(2));
    assert_eq!(project.file_count(), 2);
}

#[test]
fn test_stale_results_are_detectable() {
    let mut project = Project::new(CheckerOptions::default());
    project.set_file("a.ts".to_string(), "JSON.parse(\"{\");".to_string());
    let before = project.get_diagnostics("a.ts").expect("file is open");
    assert!(project.is_current("a.ts", &before));

    project.set_file("a.ts".to_string(), "let x = 1;".to_string());
    assert!(!project.is_current("a.ts", &before));
    let after = project.get_diagnostics("a.ts").expect("file is open");
    assert_eq!(after.version, 2);
    assert!(after.value.is_empty());
}

#[test]
fn test_diagnostics_for_unknown_file() {
    let project = Project::new(CheckerOptions::default());
    assert!(project.get_diagnostics("missing.ts").is_none());
}

#[test]
fn test_effect_of_declaration_at_offset() {
    let mut project = Project::new(CheckerOptions::default());
    project.set_file("a.ts".to_string(), SOURCE.to_string());

    let in_f = offset_of(SOURCE, "throw new Error");
    let effect = project
        .get_effect_of_declaration("a.ts", in_f)
        .expect("offset is inside f");
    assert_eq!(
        effect.value,
        EffectSummary {
            throws: "Error".to_string(),
            rejects: "never".to_string(),
        }
    );

    let in_h = offset_of(SOURCE, "throw new RangeError");
    let effect = project
        .get_effect_of_declaration("a.ts", in_h)
        .expect("offset is inside h");
    assert_eq!(effect.value.throws, "never");
    assert_eq!(effect.value.rejects, "RangeError");
}

#[test]
fn test_no_declaration_at_top_level_offset() {
    let mut project = Project::new(CheckerOptions::default());
    project.set_file("a.ts".to_string(), SOURCE.to_string());
    let top_level = offset_of(SOURCE, "try {");
    assert!(project.get_effect_of_declaration("a.ts", top_level).is_none());
}

#[test]
fn test_catch_variable_type_at_offset() {
    let mut project = Project::new(CheckerOptions::default());
    project.set_file("a.ts".to_string(), SOURCE.to_string());
    let in_catch = offset_of(SOURCE, "e.message");
    let catch_type = project
        .get_catch_variable_type("a.ts", in_catch)
        .expect("offset is inside the catch clause");
    assert_eq!(catch_type.value, "Error");
    assert_eq!(catch_type.version, 1);
}

#[test]
fn test_queries_do_not_change_diagnostics() {
    let mut project = Project::new(CheckerOptions::default());
    project.set_file("a.ts".to_string(), format!("{SOURCE}f();\nh();"));
    let first = project.get_diagnostics("a.ts").expect("file is open").value;
    let _ = project.get_effect_of_declaration("a.ts", offset_of(SOURCE, "throw new Error"));
    let second = project.get_diagnostics("a.ts").expect("file is open").value;
    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![18063, 18064]
    );
}

#[test]
fn test_options_apply_to_later_queries() {
    let mut project = Project::new(CheckerOptions::default());
    project.set_file("a.ts".to_string(), "JSON.parse(\"{\");".to_string());
    project.set_options(CheckerOptions {
        checked_throws: false,
        ..CheckerOptions::default()
    });
    let diagnostics = project.get_diagnostics("a.ts").expect("file is open");
    assert!(diagnostics.value.is_empty());
}

#[test]
fn test_parse_errors_are_reported_alongside_checker_diagnostics() {
    let diagnostics = check_source("a.ts", "let = ;".to_string(), CheckerOptions::default());
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.file == "a.ts"));
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("verbose"), LogFormat::Text);
}

#[test]
fn test_versioned_results_serialize_for_hosts() {
    let mut project = Project::new(CheckerOptions::default());
    project.set_file("a.ts".to_string(), SOURCE.to_string());
    let effect = project
        .get_effect_of_declaration("a.ts", offset_of(SOURCE, "function h"))
        .expect("declaration at offset");
    let json = serde_json::to_value(&effect).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["value"]["throws"], "never");
    assert_eq!(json["value"]["rejects"], "RangeError");
}
