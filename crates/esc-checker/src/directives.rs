//! `// @ts-expect-exception` directives.
//!
//! A directive is a single-line comment on its own line, immediately before
//! a statement. It binds that one statement and suppresses only the
//! unhandled-throw and unhandled-rejection diagnostics produced for calls
//! inside it. The table is built once per pass from the comment ranges the
//! scanner recorded, before any checking starts, and is never mutated
//! afterwards; which directives were used is tracked by the checker.

use esc_common::comments::is_pragma_comment;
use esc_common::position::LineMap;
use esc_parser::NodeIndex;
use esc_parser::node::NodeArena;
use esc_parser::syntax_kind_ext::*;
use rustc_hash::FxHashMap;
use tracing::trace;

pub const EXPECT_EXCEPTION_PRAGMA: &str = "@ts-expect-exception";

/// One directive and the statement it binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuppressionDirective {
    /// Comment span.
    pub pos: u32,
    pub end: u32,
    /// Statement on the following line, or NONE when there is none.
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct DirectiveTable {
    directives: Vec<SuppressionDirective>,
    by_statement: FxHashMap<NodeIndex, usize>,
}

impl DirectiveTable {
    /// Scan the file's comments and bind each directive to its statement.
    pub fn build(arena: &NodeArena, root: NodeIndex, line_map: &LineMap) -> DirectiveTable {
        let mut table = DirectiveTable::default();
        let Some(source) = arena.get_source_file_at(root) else {
            return table;
        };
        let text: &str = &source.text;

        let pragmas: Vec<_> = source
            .comments
            .iter()
            .filter(|c| is_pragma_comment(c, text, EXPECT_EXCEPTION_PRAGMA))
            .filter(|c| starts_line(text, c.pos))
            .collect();
        if pragmas.is_empty() {
            return table;
        }

        let statements_by_line = statement_starts(arena, root, line_map);
        for comment in pragmas {
            let line = line_map.line_of(comment.pos);
            let statement = statements_by_line
                .get(&(line + 1))
                .copied()
                .unwrap_or(NodeIndex::NONE);
            trace!(pos = comment.pos, statement = statement.0, "expect-exception directive");
            let index = table.directives.len();
            table.directives.push(SuppressionDirective {
                pos: comment.pos,
                end: comment.end,
                statement,
            });
            if statement.is_some() {
                table.by_statement.entry(statement).or_insert(index);
            }
        }
        table
    }

    /// The directive bound to `statement`, if any.
    pub fn directive_for(&self, statement: NodeIndex) -> Option<usize> {
        self.by_statement.get(&statement).copied()
    }

    pub fn get(&self, index: usize) -> Option<&SuppressionDirective> {
        self.directives.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &SuppressionDirective)> {
        self.directives.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Only whitespace precedes `pos` on its line. A comment trailing code is
/// not a directive.
fn starts_line(text: &str, pos: u32) -> bool {
    text.get(..pos as usize).is_some_and(|before| {
        before
            .rsplit(['\n', '\r'])
            .next()
            .is_some_and(|line| line.chars().all(char::is_whitespace))
    })
}

pub(crate) const fn is_statement_kind(kind: u16) -> bool {
    matches!(
        kind,
        BLOCK
            | EMPTY_STATEMENT
            | VARIABLE_STATEMENT
            | EXPRESSION_STATEMENT
            | IF_STATEMENT
            | DO_STATEMENT
            | WHILE_STATEMENT
            | FOR_STATEMENT
            | FOR_IN_STATEMENT
            | FOR_OF_STATEMENT
            | CONTINUE_STATEMENT
            | BREAK_STATEMENT
            | RETURN_STATEMENT
            | SWITCH_STATEMENT
            | LABELED_STATEMENT
            | THROW_STATEMENT
            | TRY_STATEMENT
            | DEBUGGER_STATEMENT
            | FUNCTION_DECLARATION
            | CLASS_DECLARATION
            | INTERFACE_DECLARATION
            | TYPE_ALIAS_DECLARATION
    )
}

/// First (outermost) statement starting on each line.
fn statement_starts(arena: &NodeArena, root: NodeIndex, line_map: &LineMap) -> FxHashMap<u32, NodeIndex> {
    let mut starts = FxHashMap::default();
    let mut stack = vec![root];
    let mut children = Vec::new();
    while let Some(idx) = stack.pop() {
        let Some(node) = arena.get(idx) else {
            continue;
        };
        if is_statement_kind(node.kind) {
            starts.entry(line_map.line_of(node.pos)).or_insert(idx);
        }
        children.clear();
        arena.collect_children(idx, &mut children);
        // Reverse so children are visited in source order.
        stack.extend(children.iter().rev().copied());
    }
    starts
}
