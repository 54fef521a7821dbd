use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::config::{
    CompilerOptions, TsConfig, discover_files, load_tsconfig, parse_tsconfig,
    resolve_tsconfig_path,
};

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write file");
}

fn relative_names(base: &Path, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            f.strip_prefix(base)
                .expect("file under base")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_parse_boolean_true() {
    let opts: CompilerOptions =
        serde_json::from_str(r#"{"checkedThrows": true}"#).expect("valid options");
    assert_eq!(opts.checked_throws, Some(true));
}

#[test]
fn test_parse_string_false() {
    let opts: CompilerOptions =
        serde_json::from_str(r#"{"checkedThrows": "false"}"#).expect("valid options");
    assert_eq!(opts.checked_throws, Some(false));
    assert!(!opts.resolve().checked_throws);
}

#[test]
fn test_parse_invalid_string() {
    let result: Result<CompilerOptions, _> =
        serde_json::from_str(r#"{"reportUnusedExceptionDirectives": "maybe"}"#);
    assert!(result.is_err());
}

#[test]
fn test_missing_options_use_defaults() {
    let resolved = CompilerOptions::default().resolve();
    assert!(resolved.checked_throws);
    assert!(!resolved.report_unused_exception_directives);
}

#[test]
fn test_parse_tsconfig_with_comments_and_trailing_commas() {
    let source = r#"{
        // analysis settings
        "compilerOptions": {
            "checkedThrows": true, /* on */
            "reportUnusedExceptionDirectives": "true",
        },
        "include": ["src/**/*.ts",],
    }"#;
    let config = parse_tsconfig(source).expect("jsonc config should parse");
    let options = config.compiler_options.expect("compilerOptions present");
    assert_eq!(options.report_unused_exception_directives, Some(true));
    assert_eq!(config.include, Some(vec!["src/**/*.ts".to_string()]));
}

#[test]
fn test_comment_markers_inside_strings_are_kept() {
    let config = parse_tsconfig(r#"{"include": ["src//*.ts", "a/*b*/c"]}"#).expect("parses");
    assert_eq!(
        config.include,
        Some(vec!["src//*.ts".to_string(), "a/*b*/c".to_string()])
    );
}

#[test]
fn test_extends_merges_child_over_base() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "base.json",
        r#"{"compilerOptions": {"checkedThrows": false, "reportUnusedExceptionDirectives": true}, "include": ["lib"]}"#,
    );
    write(
        dir.path(),
        "tsconfig.json",
        r#"{"extends": "./base", "compilerOptions": {"checkedThrows": true}}"#,
    );
    let config = load_tsconfig(&dir.path().join("tsconfig.json")).expect("config loads");
    let options = config.compiler_options.expect("merged options").resolve();
    assert!(options.checked_throws);
    assert!(options.report_unused_exception_directives);
    assert_eq!(config.include, Some(vec!["lib".to_string()]));
}

#[test]
fn test_extends_cycle_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "a.json", r#"{"extends": "./b.json"}"#);
    write(dir.path(), "b.json", r#"{"extends": "./a.json"}"#);
    assert!(load_tsconfig(&dir.path().join("a.json")).is_err());
}

#[test]
fn test_resolve_project_directory_and_missing_path() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "app/tsconfig.json", "{}");
    let resolved = resolve_tsconfig_path(dir.path(), Some(Path::new("app"))).expect("resolves");
    assert_eq!(resolved, Some(dir.path().join("app").join("tsconfig.json")));
    assert!(resolve_tsconfig_path(dir.path(), Some(Path::new("nope"))).is_err());
    assert_eq!(resolve_tsconfig_path(dir.path(), None).expect("no project"), None);
}

#[test]
fn test_discovery_applies_include_exclude_and_extensions() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "src/a.ts", "");
    write(dir.path(), "src/nested/b.tsx", "");
    write(dir.path(), "src/readme.md", "");
    write(dir.path(), "src/gen/c.ts", "");
    write(dir.path(), "other/d.ts", "");

    let config = TsConfig {
        include: Some(vec!["src".to_string()]),
        exclude: Some(vec!["src/gen".to_string()]),
        ..TsConfig::default()
    };
    let files = discover_files(dir.path(), &config).expect("discovery works");
    assert_eq!(
        relative_names(dir.path(), &files),
        vec!["src/a.ts".to_string(), "src/nested/b.tsx".to_string()]
    );
}

#[test]
fn test_default_discovery_skips_node_modules() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "index.ts", "");
    write(dir.path(), "node_modules/pkg/index.ts", "");
    let files = discover_files(dir.path(), &TsConfig::default()).expect("discovery works");
    assert_eq!(relative_names(dir.path(), &files), vec!["index.ts".to_string()]);
}

#[test]
fn test_explicit_files_without_include() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "main.ts", "");
    write(dir.path(), "other.ts", "");
    let config = TsConfig {
        files: Some(vec!["main.ts".to_string()]),
        ..TsConfig::default()
    };
    let files = discover_files(dir.path(), &config).expect("discovery works");
    assert_eq!(relative_names(dir.path(), &files), vec!["main.ts".to_string()]);
}
