//! Host query surface.
//!
//! A `Project` keeps the parsed and bound state of each open file. Every
//! query runs a fresh checker pass against that state, so results never
//! depend on earlier queries. Results carry the file version they were
//! computed for; a host that has since applied an edit drops them.

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, trace};

use esc_binder::BinderState;
use esc_checker::{CheckerOptions, CheckerState};
use esc_common::Diagnostic;
use esc_common::diagnostics::sort_and_deduplicate;
use esc_parser::node::NodeArena;
use esc_parser::syntax_kind_ext::{CATCH_CLAUSE, is_function_like};
use esc_parser::{NodeIndex, ParserState};
use esc_solver::{TypeFormatter, TypeInterner};

/// A query result tagged with the file version it describes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// Display form of a declaration's effect, as callers observe it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EffectSummary {
    pub throws: String,
    pub rejects: String,
}

/// Parsed and bound state of one file.
pub struct ProjectFile {
    file_name: String,
    version: u64,
    root: NodeIndex,
    parser: ParserState,
    binder: BinderState,
}

impl ProjectFile {
    /// Parse and bind `source_text`.
    pub fn new(file_name: String, source_text: String) -> Self {
        let mut parser = ParserState::new(file_name.clone(), source_text);
        let root = parser.parse_source_file();
        let mut binder = BinderState::new();
        binder.bind_source_file(parser.get_arena(), root);
        ProjectFile {
            file_name,
            version: 1,
            root,
            parser,
            binder,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn arena(&self) -> &NodeArena {
        self.parser.get_arena()
    }

    pub fn binder(&self) -> &BinderState {
        &self.binder
    }

    /// Parser diagnostics followed by one full checker pass.
    pub fn check(&self, options: CheckerOptions) -> Vec<Diagnostic> {
        let types = TypeInterner::new();
        let mut checker = self.checker(&types, options);
        checker.check_source_file(self.root);

        let mut diagnostics = self.parse_diagnostics();
        diagnostics.extend(checker.take_diagnostics());
        sort_and_deduplicate(&mut diagnostics);
        diagnostics
    }

    /// Effect of the innermost function-like declaration containing `offset`.
    pub fn effect_at(&self, offset: u32, options: CheckerOptions) -> Option<EffectSummary> {
        let decl = self.innermost_at(offset, is_function_like)?;
        let types = TypeInterner::new();
        let mut checker = self.checker(&types, options);
        let effect = checker.get_effect_of_declaration(decl)?;
        let formatter = TypeFormatter::new(&types);
        Some(EffectSummary {
            throws: formatter.format(effect.throws.type_id()),
            rejects: formatter.format(effect.rejects.type_id()),
        })
    }

    /// Type of the variable bound by the innermost catch clause containing
    /// `offset`.
    pub fn catch_variable_type_at(&self, offset: u32, options: CheckerOptions) -> Option<String> {
        let clause = self.innermost_at(offset, |kind| kind == CATCH_CLAUSE)?;
        let types = TypeInterner::new();
        let mut checker = self.checker(&types, options);
        let catch_type = checker.get_catch_variable_type(clause)?;
        Some(TypeFormatter::new(&types).format(catch_type))
    }

    fn checker<'a>(&'a self, types: &'a TypeInterner, options: CheckerOptions) -> CheckerState<'a> {
        let mut checker = CheckerState::new(
            self.arena(),
            &self.binder,
            types,
            self.file_name.clone(),
            options,
        );
        checker.prepare(self.root);
        checker
    }

    fn parse_diagnostics(&self) -> Vec<Diagnostic> {
        self.parser
            .get_diagnostics()
            .iter()
            .map(|d| {
                Diagnostic::error(
                    self.file_name.clone(),
                    d.start,
                    d.length,
                    d.message.clone(),
                    d.code,
                )
            })
            .collect()
    }

    fn innermost_at(&self, offset: u32, matches: impl Fn(u16) -> bool) -> Option<NodeIndex> {
        let arena = self.arena();
        let mut found = None;
        let mut current = self.root;
        loop {
            let next = arena.get_children(current).into_iter().find(|&child| {
                arena
                    .get(child)
                    .is_some_and(|n| n.pos <= offset && offset < n.end)
            });
            let Some(child) = next else {
                break;
            };
            if arena.kind_of(child).is_some_and(&matches) {
                found = Some(child);
            }
            current = child;
        }
        trace!(offset, found = ?found.map(|n| n.0), "innermost node");
        found
    }
}

/// Open files and the options every pass runs with.
pub struct Project {
    files: FxHashMap<String, ProjectFile>,
    options: CheckerOptions,
}

impl Project {
    pub fn new(options: CheckerOptions) -> Self {
        Project {
            files: FxHashMap::default(),
            options,
        }
    }

    pub fn options(&self) -> CheckerOptions {
        self.options
    }

    pub fn set_options(&mut self, options: CheckerOptions) {
        self.options = options;
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn file(&self, file_name: &str) -> Option<&ProjectFile> {
        self.files.get(file_name)
    }

    /// Add or replace a file. Returns the new version; versions of a name
    /// keep increasing across replacements.
    pub fn set_file(&mut self, file_name: String, source_text: String) -> u64 {
        let version = self.files.get(&file_name).map_or(1, |f| f.version + 1);
        let mut file = ProjectFile::new(file_name.clone(), source_text);
        file.version = version;
        debug!(file = %file_name, version, "updated file");
        self.files.insert(file_name, file);
        version
    }

    pub fn remove_file(&mut self, file_name: &str) -> Option<ProjectFile> {
        self.files.remove(file_name)
    }

    /// Current version of `file_name`.
    pub fn file_version(&self, file_name: &str) -> Option<u64> {
        self.files.get(file_name).map(ProjectFile::version)
    }

    /// Whether a result computed for `version` still describes the file.
    pub fn is_current<T>(&self, file_name: &str, result: &Versioned<T>) -> bool {
        self.file_version(file_name) == Some(result.version)
    }

    /// All diagnostics for one file.
    pub fn get_diagnostics(&self, file_name: &str) -> Option<Versioned<Vec<Diagnostic>>> {
        let file = self.files.get(file_name)?;
        Some(Versioned {
            version: file.version,
            value: file.check(self.options),
        })
    }

    /// Effect of the function-like declaration enclosing `offset`.
    pub fn get_effect_of_declaration(
        &self,
        file_name: &str,
        offset: u32,
    ) -> Option<Versioned<EffectSummary>> {
        let file = self.files.get(file_name)?;
        let value = file.effect_at(offset, self.options)?;
        Some(Versioned {
            version: file.version,
            value,
        })
    }

    /// Type of the catch variable whose clause encloses `offset`.
    pub fn get_catch_variable_type(
        &self,
        file_name: &str,
        offset: u32,
    ) -> Option<Versioned<String>> {
        let file = self.files.get(file_name)?;
        let value = file.catch_variable_type_at(offset, self.options)?;
        Some(Versioned {
            version: file.version,
            value,
        })
    }
}

/// One-shot check of a single source text.
pub fn check_source(file_name: &str, source_text: String, options: CheckerOptions) -> Vec<Diagnostic> {
    ProjectFile::new(file_name.to_string(), source_text).check(options)
}
