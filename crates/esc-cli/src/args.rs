use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the esc binary.
#[derive(Parser, Debug)]
#[command(
    name = "esc",
    version,
    about = "ErrorScript - checked throws and promise rejections for TypeScript"
)]
pub struct CliArgs {
    /// Path to tsconfig.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Watch input files and re-check on changes.
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Disable checked-throws analysis. Clauses still parse.
    #[arg(long = "noCheckedThrows", alias = "no-checked-throws")]
    pub no_checked_throws: bool,

    /// Report `@ts-expect-exception` directives that suppress nothing.
    #[arg(
        long = "reportUnusedExceptionDirectives",
        alias = "report-unused-exception-directives"
    )]
    pub report_unused_exception_directives: bool,

    /// Enable color and source snippets in output. Defaults to on for terminals.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub pretty: Option<bool>,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Input files. When empty, files come from the project config.
    pub files: Vec<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// tsc-style lines, optionally pretty.
    Text,
    /// One JSON document with every diagnostic.
    Json,
}
