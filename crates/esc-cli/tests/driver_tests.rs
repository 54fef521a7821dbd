use clap::Parser;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::args::CliArgs;
use crate::driver::{compile, display_name, resolve_inputs};

const THROWING: &str = "function f() { throw new Error(\"e\"); }\nf();\n";
const CLEAN: &str = "let x: number = 1;\n";

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write file");
}

fn parse_args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["esc"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("args parse")
}

#[test]
fn test_checks_named_files() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "bad.ts", THROWING);
    write(dir.path(), "good.ts", CLEAN);

    let result = compile(&parse_args(&["bad.ts", "good.ts"]), dir.path()).expect("compiles");
    assert_eq!(result.files.len(), 2);
    assert_eq!(result.files[0].file_name, "bad.ts");
    assert_eq!(result.files[0].diagnostics.len(), 1);
    assert_eq!(result.files[0].diagnostics[0].code, 18063);
    assert_eq!(result.files[0].diagnostics[0].file, "bad.ts");
    assert!(result.files[1].diagnostics.is_empty());
    assert_eq!(result.diagnostic_count(), 1);
}

#[test]
fn test_project_config_supplies_files_and_options() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "tsconfig.json",
        r#"{"compilerOptions": {"checkedThrows": "false"}, "include": ["src"]}"#,
    );
    write(dir.path(), "src/a.ts", THROWING);
    write(dir.path(), "scripts/b.ts", THROWING);

    let inputs = resolve_inputs(&parse_args(&[]), dir.path()).expect("inputs resolve");
    assert!(!inputs.options.checked_throws);
    assert_eq!(inputs.files, vec![dir.path().join("src").join("a.ts")]);

    let result = compile(&parse_args(&[]), dir.path()).expect("compiles");
    assert_eq!(result.diagnostic_count(), 0);
}

#[test]
fn test_flags_override_config() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "tsconfig.json",
        r#"{"compilerOptions": {"checkedThrows": true}}"#,
    );
    write(dir.path(), "a.ts", "// @ts-expect-exception\nlet x = 1;\n");

    let inputs = resolve_inputs(
        &parse_args(&["--noCheckedThrows", "--reportUnusedExceptionDirectives"]),
        dir.path(),
    )
    .expect("inputs resolve");
    assert!(!inputs.options.checked_throws);
    assert!(inputs.options.report_unused_exception_directives);

    let result = compile(&parse_args(&["--reportUnusedExceptionDirectives"]), dir.path())
        .expect("compiles");
    let codes: Vec<u32> = result.diagnostics().map(|d| d.code).collect();
    assert_eq!(codes, vec![18067]);
}

#[test]
fn test_project_flag_points_at_subdirectory() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "app/tsconfig.json", "{}");
    write(dir.path(), "app/main.ts", THROWING);

    let result = compile(&parse_args(&["--project", "app"]), dir.path()).expect("compiles");
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].file_name, "app/main.ts");
    assert_eq!(result.diagnostic_count(), 1);
}

#[test]
fn test_no_inputs_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    assert!(compile(&parse_args(&[]), dir.path()).is_err());
}

#[test]
fn test_unreadable_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = compile(&parse_args(&["missing.ts"]), dir.path()).expect_err("missing file");
    assert!(format!("{err:#}").contains("missing.ts"));
}

#[test]
fn test_display_name_is_relative_to_cwd() {
    let cwd = Path::new("/work/project");
    assert_eq!(display_name(&cwd.join("src/a.ts"), cwd), "src/a.ts");
    assert_eq!(display_name(Path::new("/elsewhere/b.ts"), cwd), "/elsewhere/b.ts");
}
