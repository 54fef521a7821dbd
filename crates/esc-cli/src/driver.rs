//! Per-invocation driver: resolve inputs, check every file, collect results.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};

use errorscript::check_source;
use esc_checker::CheckerOptions;
use esc_common::Diagnostic;

use crate::args::CliArgs;
use crate::config::{TsConfig, discover_files, load_tsconfig, resolve_tsconfig_path};

/// Options and file list for one run.
#[derive(Debug, Clone)]
pub struct ResolvedInputs {
    pub options: CheckerOptions,
    pub files: Vec<PathBuf>,
    /// Directory watched in `--watch` mode.
    pub base_dir: PathBuf,
    pub tsconfig: Option<PathBuf>,
}

/// Source and diagnostics of one checked file.
#[derive(Debug, Clone)]
pub struct FileResult {
    pub file_name: String,
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct CompilationResult {
    pub files: Vec<FileResult>,
}

impl CompilationResult {
    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics.iter())
    }
}

/// Config file values first, then command-line flags on top.
pub fn resolve_inputs(args: &CliArgs, cwd: &Path) -> Result<ResolvedInputs> {
    let tsconfig = resolve_tsconfig_path(cwd, args.project.as_deref())?;
    let config = match &tsconfig {
        Some(path) => Some(load_tsconfig(path)?),
        None => None,
    };
    let base_dir = tsconfig
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);

    let mut options = config
        .as_ref()
        .and_then(|c| c.compiler_options.as_ref())
        .map(|o| o.resolve())
        .unwrap_or_default();
    if args.no_checked_throws {
        options.checked_throws = false;
    }
    if args.report_unused_exception_directives {
        options.report_unused_exception_directives = true;
    }

    let files = if !args.files.is_empty() {
        args.files.iter().map(|f| cwd.join(f)).collect()
    } else if let Some(config) = &config {
        discover_files(&base_dir, config)?
    } else if args.project.is_none() && args.watch {
        discover_files(&base_dir, &TsConfig::default())?
    } else {
        bail!("no input files; pass file names or use --project");
    };

    debug!(files = files.len(), ?options, "resolved inputs");
    Ok(ResolvedInputs {
        options,
        files,
        base_dir,
        tsconfig,
    })
}

/// Check every file in parallel. Each file gets its own pass; nothing is
/// shared between them. Results keep the input order.
pub fn check_files(files: &[PathBuf], options: CheckerOptions, cwd: &Path) -> Result<CompilationResult> {
    let _span = span!(Level::DEBUG, "check_files", count = files.len()).entered();
    let results: Result<Vec<FileResult>> = files
        .par_iter()
        .map(|path| {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = display_name(path, cwd);
            let diagnostics = check_source(&file_name, source.clone(), options);
            Ok(FileResult {
                file_name,
                source,
                diagnostics,
            })
        })
        .collect();
    Ok(CompilationResult { files: results? })
}

pub fn compile(args: &CliArgs, cwd: &Path) -> Result<CompilationResult> {
    let inputs = resolve_inputs(args, cwd)?;
    check_files(&inputs.files, inputs.options, cwd)
}

/// Path as shown in diagnostics: relative to `cwd` when below it, with
/// forward slashes.
pub fn display_name(path: &Path, cwd: &Path) -> String {
    let shown = path.strip_prefix(cwd).unwrap_or(path);
    shown.to_string_lossy().replace('\\', "/")
}
