//! Shared fixtures for checker tests: parse, bind and run one pass.

use crate::CheckerState;
use crate::context::CheckerOptions;
use esc_binder::BinderState;
use esc_parser::node::NodeArena;
use esc_parser::syntax_kind_ext;
use esc_parser::{NodeIndex, ParserState};
use esc_solver::TypeInterner;

pub(crate) struct TestProgram {
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub binder: BinderState,
    pub types: TypeInterner,
}

impl TestProgram {
    pub(crate) fn new(source: &str) -> TestProgram {
        let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
        let root = parser.parse_source_file();
        assert!(
            parser.get_diagnostics().is_empty(),
            "unexpected parse errors: {:?}",
            parser.get_diagnostics()
        );
        let arena = parser.into_arena();
        let mut binder = BinderState::new();
        binder.bind_source_file(&arena, root);
        TestProgram {
            arena,
            root,
            binder,
            types: TypeInterner::new(),
        }
    }

    /// A checker bound to this program, ready for queries.
    pub(crate) fn checker(&self, options: CheckerOptions) -> CheckerState<'_> {
        let mut checker = CheckerState::new(
            &self.arena,
            &self.binder,
            &self.types,
            "test.ts".to_string(),
            options,
        );
        checker.prepare(self.root);
        checker
    }

    pub(crate) fn find_all(&self, kind: u16) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            if self.arena.kind_of(idx) == Some(kind) {
                out.push(idx);
            }
            let mut children = self.arena.get_children(idx);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// The function declaration named `name` that has a body, or the last
    /// one with that name.
    pub(crate) fn function(&self, name: &str) -> NodeIndex {
        let candidates: Vec<NodeIndex> = self
            .find_all(syntax_kind_ext::FUNCTION_DECLARATION)
            .into_iter()
            .filter(|&idx| {
                self.arena
                    .get(idx)
                    .and_then(|n| self.arena.get_function(n))
                    .is_some_and(|f| self.arena.identifier_text(f.name) == Some(name))
            })
            .collect();
        let with_body = candidates.iter().copied().find(|&idx| {
            self.arena
                .get(idx)
                .and_then(|n| self.arena.get_function(n))
                .is_some_and(|f| f.body.is_some())
        });
        with_body
            .or_else(|| candidates.last().copied())
            .unwrap_or_else(|| panic!("no function named {name}"))
    }

    /// Method declarations named `name`, in source order.
    pub(crate) fn methods(&self, name: &str) -> Vec<NodeIndex> {
        self.find_all(syntax_kind_ext::METHOD_DECLARATION)
            .into_iter()
            .filter(|&idx| {
                self.arena
                    .get(idx)
                    .and_then(|n| self.arena.get_method_decl(n))
                    .is_some_and(|m| self.arena.property_name_text(m.name) == Some(name))
            })
            .collect()
    }

    pub(crate) fn format(&self, id: esc_solver::TypeId) -> String {
        esc_solver::TypeFormatter::new(&self.types).format(id)
    }
}

/// Run a full pass and return `(code, message)` for every diagnostic.
pub(crate) fn check_with_options(source: &str, options: CheckerOptions) -> Vec<(u32, String)> {
    let program = TestProgram::new(source);
    let mut checker = program.checker(options);
    checker.check_source_file(program.root);
    checker
        .ctx
        .diagnostics
        .iter()
        .map(|d| (d.code, d.message_text.clone()))
        .collect()
}

pub(crate) fn check(source: &str) -> Vec<(u32, String)> {
    check_with_options(source, CheckerOptions::default())
}

pub(crate) fn codes(source: &str) -> Vec<u32> {
    check(source).into_iter().map(|(code, _)| code).collect()
}

/// Display form of what callers of function `name` can throw and reject with.
pub(crate) fn effect_of_function(source: &str, name: &str) -> (String, String) {
    let program = TestProgram::new(source);
    let decl = program.function(name);
    let mut checker = program.checker(CheckerOptions::default());
    let effect = checker
        .get_effect_of_declaration(decl)
        .unwrap_or_else(|| panic!("{name} has no signature"));
    (
        program.format(effect.throws.type_id()),
        program.format(effect.rejects.type_id()),
    )
}
