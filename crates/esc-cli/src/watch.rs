//! `--watch`: re-check on every change to a source or config file.
//!
//! Each change starts a fresh run; nothing from the previous run is reused.

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::args::CliArgs;
use crate::config::has_source_extension;
use crate::driver::{check_files, resolve_inputs};

/// Events arriving within this window are handled by one run.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Run until the watcher channel closes. `on_result` receives the rendered
/// output of every run.
pub fn run(args: &CliArgs, cwd: &Path, mut on_result: impl FnMut(RunOutput)) -> Result<()> {
    let inputs = resolve_inputs(args, cwd)?;
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("failed to create file watcher")?;
    watcher
        .watch(&inputs.base_dir, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", inputs.base_dir.display()))?;
    debug!(dir = %inputs.base_dir.display(), "watching");

    on_result(run_once(args, cwd));

    while let Ok(first) = rx.recv() {
        let mut relevant = is_relevant_event(&first);
        while let Ok(next) = rx.recv_timeout(DEBOUNCE) {
            relevant |= is_relevant_event(&next);
        }
        if relevant {
            on_result(run_once(args, cwd));
        }
    }
    Ok(())
}

/// Outcome of one watch-mode run.
pub enum RunOutput {
    Checked(crate::driver::CompilationResult),
    Failed(anyhow::Error),
}

fn run_once(args: &CliArgs, cwd: &Path) -> RunOutput {
    // Inputs are re-resolved so new files and config edits are picked up.
    let result = resolve_inputs(args, cwd).and_then(|inputs| check_files(&inputs.files, inputs.options, cwd));
    match result {
        Ok(result) => RunOutput::Checked(result),
        Err(err) => {
            warn!(error = %err, "watch run failed");
            RunOutput::Failed(err)
        }
    }
}

/// Whether a watcher event should trigger a new run: a create, modify or
/// remove touching a source file or a `tsconfig*.json`.
pub fn is_relevant_event(event: &notify::Result<Event>) -> bool {
    let Ok(event) = event else {
        return false;
    };
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }
    event.paths.iter().any(|path| is_watched_path(path))
}

fn is_watched_path(path: &Path) -> bool {
    if path.components().any(|c| c.as_os_str() == "node_modules") {
        return false;
    }
    if has_source_extension(path) {
        return true;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("tsconfig") && name.ends_with(".json"))
}
