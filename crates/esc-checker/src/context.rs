//! Checker Context
//!
//! Holds the shared state used throughout one analysis pass. Everything in
//! here is owned by a single `CheckerState` and dropped with it; nothing is
//! shared between passes.

use rustc_hash::{FxHashMap, FxHashSet};

use esc_binder::{BinderState, SymbolId};
use esc_common::diagnostics::Diagnostic;
use esc_common::position::LineMap;
use esc_parser::NodeIndex;
use esc_parser::node::NodeArena;
use esc_solver::{DefId, TypeId, TypeInterner};

use crate::directives::DirectiveTable;
use crate::effect_cache::EffectCache;

/// Compiler options for the effect analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Master switch. When off, `throws`/`rejects` clauses still parse but
    /// no effect diagnostics are produced.
    pub checked_throws: bool,
    /// Report `@ts-expect-exception` directives that suppressed nothing.
    pub report_unused_exception_directives: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            checked_throws: true,
            report_unused_exception_directives: false,
        }
    }
}

/// Shared state for one pass.
pub struct CheckerContext<'a> {
    /// The NodeArena containing the AST.
    pub arena: &'a NodeArena,

    /// The binder state with symbols.
    pub binder: &'a BinderState,

    /// Type interner for structural type interning.
    pub types: &'a TypeInterner,

    /// Current file name.
    pub file_name: String,

    /// Compiler options for this pass.
    pub compiler_options: CheckerOptions,

    /// Root node of the file being checked.
    pub root: NodeIndex,

    pub line_map: LineMap,

    // --- Caches ---
    /// Function effects, keyed by declaration.
    pub effect_cache: EffectCache,

    /// Types of catch variables, keyed by catch clause node.
    pub catch_variable_types: FxHashMap<u32, TypeId>,

    /// Declared or initializer types of value symbols.
    pub symbol_types: FxHashMap<SymbolId, TypeId>,

    /// Nominal definitions created for user classes and interfaces.
    pub class_defs: FxHashMap<SymbolId, DefId>,

    /// Promise rejections carried by `const` initializers.
    pub const_rejects: FxHashMap<SymbolId, TypeId>,

    // --- Narrowing ---
    /// Catch clauses whose block has been walked for guards.
    pub narrowed_catch_clauses: FxHashSet<u32>,
    /// Narrowed types of catch variable references, keyed by identifier node.
    pub narrowed_references: FxHashMap<u32, TypeId>,
    /// Statements no value of the catch variable can reach.
    pub unreachable_statements: FxHashSet<u32>,

    // --- Recursion Guards ---
    /// Symbols whose type is being computed.
    pub symbol_resolution_set: FxHashSet<SymbolId>,
    /// Type aliases being expanded.
    pub alias_resolution_set: FxHashSet<SymbolId>,
    /// Catch clauses whose variable type is being computed.
    pub catch_resolution_set: FxHashSet<u32>,

    // --- Directives ---
    pub directives: DirectiveTable,
    /// Directives that suppressed at least one diagnostic.
    pub used_directives: FxHashSet<usize>,

    // --- Diagnostics ---
    /// Diagnostics produced during checking.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        types: &'a TypeInterner,
        file_name: String,
        compiler_options: CheckerOptions,
    ) -> Self {
        CheckerContext {
            arena,
            binder,
            types,
            file_name,
            compiler_options,
            root: NodeIndex::NONE,
            line_map: LineMap::default(),
            effect_cache: EffectCache::new(),
            catch_variable_types: FxHashMap::default(),
            symbol_types: FxHashMap::default(),
            class_defs: FxHashMap::default(),
            const_rejects: FxHashMap::default(),
            narrowed_catch_clauses: FxHashSet::default(),
            narrowed_references: FxHashMap::default(),
            unreachable_statements: FxHashSet::default(),
            symbol_resolution_set: FxHashSet::default(),
            alias_resolution_set: FxHashSet::default(),
            catch_resolution_set: FxHashSet::default(),
            directives: DirectiveTable::default(),
            used_directives: FxHashSet::default(),
            diagnostics: Vec::new(),
        }
    }
}
