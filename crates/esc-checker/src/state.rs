//! Checker State
//!
//! `CheckerState` is the entry point of one analysis pass. All analysis
//! methods live in `impl CheckerState` blocks spread across the crate's
//! modules; this file holds the struct and the per-file driver.

use esc_binder::BinderState;
use esc_common::diagnostics::{Diagnostic, sort_and_deduplicate};
use esc_common::position::LineMap;
use esc_parser::NodeIndex;
use esc_parser::node::NodeArena;
use esc_solver::TypeInterner;
use tracing::{Level, debug, span};

use crate::context::{CheckerContext, CheckerOptions};
use crate::directives::DirectiveTable;

/// One analysis pass over one file.
pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        types: &'a TypeInterner,
        file_name: String,
        compiler_options: CheckerOptions,
    ) -> Self {
        CheckerState {
            ctx: CheckerContext::new(arena, binder, types, file_name, compiler_options),
        }
    }

    /// Check a source file and collect its diagnostics.
    pub fn check_source_file(&mut self, root_idx: NodeIndex) {
        let _span = span!(Level::DEBUG, "check_source_file", file = %self.ctx.file_name).entered();
        self.prepare(root_idx);

        if self.ctx.compiler_options.checked_throws {
            self.enforce_call_sites(root_idx);
            if self.ctx.compiler_options.report_unused_exception_directives {
                self.report_unused_directives();
            }
        }
        self.check_variable_initializers(root_idx);

        sort_and_deduplicate(&mut self.ctx.diagnostics);
        debug!(
            diagnostics = self.ctx.diagnostics.len(),
            analyzed_functions = self.ctx.effect_cache.len(),
            "checked source file"
        );
    }

    /// Bind the pass to `root`: line map and directive table. Queries made
    /// without `check_source_file` call this first.
    pub fn prepare(&mut self, root_idx: NodeIndex) {
        if self.ctx.root == root_idx && root_idx.is_some() {
            return;
        }
        let arena = self.ctx.arena;
        self.ctx.root = root_idx;
        self.ctx.line_map = arena
            .get_source_file_at(root_idx)
            .map(|sf| LineMap::build(&sf.text))
            .unwrap_or_default();
        self.ctx.directives = DirectiveTable::build(arena, root_idx, &self.ctx.line_map);
        debug!(directives = self.ctx.directives.len(), "prepared checker");
    }

    fn report_unused_directives(&mut self) {
        let unused: Vec<(u32, u32)> = self
            .ctx
            .directives
            .iter()
            .filter(|(index, _)| !self.ctx.used_directives.contains(index))
            .map(|(_, d)| (d.pos, d.end))
            .collect();
        for (pos, end) in unused {
            self.report_unused_directive(pos, end);
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.ctx.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.ctx.diagnostics)
    }
}
