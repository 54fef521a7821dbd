use clap::Parser;
use std::path::{Path, PathBuf};

use crate::args::{CliArgs, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["esc"]).expect("default args should parse");
    assert!(args.project.is_none());
    assert!(!args.watch);
    assert!(!args.no_checked_throws);
    assert!(!args.report_unused_exception_directives);
    assert_eq!(args.pretty, None);
    assert_eq!(args.format, OutputFormat::Text);
    assert!(args.files.is_empty());
}

#[test]
fn parses_all_flags() {
    let args = CliArgs::try_parse_from([
        "esc",
        "--project",
        "configs/tsconfig.json",
        "--noCheckedThrows",
        "--reportUnusedExceptionDirectives",
        "--pretty",
        "--format",
        "json",
        "--watch",
        "src/index.ts",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.project.as_deref(), Some(Path::new("configs/tsconfig.json")));
    assert!(args.no_checked_throws);
    assert!(args.report_unused_exception_directives);
    assert_eq!(args.pretty, Some(true));
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.watch);
    assert_eq!(args.files, vec![PathBuf::from("src/index.ts")]);
}

#[test]
fn accepts_kebab_case_aliases() {
    let args = CliArgs::try_parse_from(["esc", "--no-checked-throws", "-p", "."])
        .expect("aliases should parse");
    assert!(args.no_checked_throws);
    assert_eq!(args.project.as_deref(), Some(Path::new(".")));
}

#[test]
fn pretty_accepts_explicit_false() {
    let args = CliArgs::try_parse_from(["esc", "--pretty", "false", "a.ts"])
        .expect("explicit pretty value should parse");
    assert_eq!(args.pretty, Some(false));
    assert_eq!(args.files, vec![PathBuf::from("a.ts")]);
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["esc", "--format", "xml"]).is_err());
}
