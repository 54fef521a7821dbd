//! Narrowing of catch variables through `instanceof` and `typeof` guards.
//!
//! A catch block is walked once, in statement order, carrying the type the
//! catch variable has at each point. Guards on the variable split that type
//! between the branches of an `if`; branches that leave (`return`, `throw`)
//! drop their share. Two results are recorded:
//!
//! - the narrowed type at each reference to the variable, which
//!   `get_type_of_identifier` reads back (so `throw e` inside
//!   `if (e instanceof ParseError)` throws `ParseError`);
//! - statements that cannot run because every value the variable can hold
//!   was handled earlier, such as `assertNever(e)` after an exhaustive chain.
//!   Those statements contribute nothing to effects or diagnostics.
//!
//! Guards inside loops, `switch` and nested functions are not followed.

use esc_binder::SymbolId;
use esc_parser::NodeIndex;
use esc_parser::syntax_kind_ext::*;
use esc_scanner::SyntaxKind;
use esc_solver::{NarrowingResult, TypeGuard, TypeId, narrow_by_guard};
use tracing::trace;

use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// Walk the block of `catch_clause` once, recording narrowed reference
    /// types and statements made unreachable by exhaustive guards.
    pub(crate) fn narrow_catch_clause(&mut self, catch_clause: NodeIndex) {
        if !self.ctx.narrowed_catch_clauses.insert(catch_clause.0) {
            return;
        }
        let arena = self.ctx.arena;
        let Some(catch) = arena.get(catch_clause).and_then(|n| arena.get_catch_clause(n)) else {
            return;
        };
        let (variable_declaration, block) = (catch.variable_declaration, catch.block);
        let is_identifier_binding = arena
            .get(variable_declaration)
            .and_then(|n| arena.get_variable_declaration(n))
            .is_some_and(|d| arena.kind_of(d.name) == Some(SyntaxKind::Identifier as u16));
        if !is_identifier_binding {
            return;
        }
        let Some(var) = self.ctx.binder.get_node_symbol(variable_declaration) else {
            return;
        };
        let Some(initial) = self.get_catch_variable_type(catch_clause) else {
            return;
        };
        // Nothing reaches a catch whose try cannot throw; its block still counts.
        if initial == TypeId::NEVER {
            return;
        }
        trace!(catch = catch_clause.0, initial = initial.0, "narrowing catch variable");
        let narrower = CatchNarrower { var, declared: initial };
        self.narrow_statement(&narrower, block, initial);
    }

    /// Type of the variable after `stmt` when entered with `current`.
    /// `None` when no path reaches the end of the statement.
    fn narrow_statement(&mut self, narrower: &CatchNarrower, stmt: NodeIndex, current: TypeId) -> Option<TypeId> {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let node = arena.get(stmt)?;
        match node.kind {
            BLOCK => {
                let statements = arena.get_block(node)?.statements.iter().collect::<Vec<_>>();
                self.narrow_statements(narrower, &statements, current)
            }
            IF_STATEMENT => {
                let data = arena.get_if_statement(node)?;
                let (condition, then_statement, else_statement) =
                    (data.expression, data.then_statement, data.else_statement);
                self.record_references(narrower, condition, current);
                let result = self
                    .guard_of(narrower, condition, current)
                    .unwrap_or(NarrowingResult {
                        true_type: current,
                        false_type: current,
                    });
                let then_end = self.narrow_branch(narrower, then_statement, result.true_type);
                let else_end = if else_statement.is_some() {
                    self.narrow_branch(narrower, else_statement, result.false_type)
                } else {
                    Some(result.false_type)
                };
                match (then_end, else_end) {
                    (None, None) => None,
                    (a, b) => Some(types.union(a.into_iter().chain(b).collect())),
                }
            }
            RETURN_STATEMENT | THROW_STATEMENT => {
                self.record_references(narrower, stmt, current);
                None
            }
            BREAK_STATEMENT | CONTINUE_STATEMENT => None,
            EXPRESSION_STATEMENT => {
                self.record_references(narrower, stmt, current);
                let expr = arena.get_expression_statement(node)?.expression;
                if self.assigns_variable(narrower, expr) {
                    Some(narrower.declared)
                } else {
                    Some(current)
                }
            }
            _ => {
                self.record_references(narrower, stmt, current);
                Some(current)
            }
        }
    }

    fn narrow_statements(&mut self, narrower: &CatchNarrower, statements: &[NodeIndex], mut current: TypeId) -> Option<TypeId> {
        for (i, &stmt) in statements.iter().enumerate() {
            current = self.narrow_statement(narrower, stmt, current)?;
            if current == TypeId::NEVER {
                for &rest in &statements[i + 1..] {
                    self.mark_unreachable(rest);
                }
                break;
            }
        }
        Some(current)
    }

    /// A branch entered with `never` cannot run at all.
    fn narrow_branch(&mut self, narrower: &CatchNarrower, stmt: NodeIndex, entry: TypeId) -> Option<TypeId> {
        if entry == TypeId::NEVER {
            self.mark_unreachable(stmt);
            return None;
        }
        self.narrow_statement(narrower, stmt, entry)
    }

    fn mark_unreachable(&mut self, stmt: NodeIndex) {
        trace!(stmt = stmt.0, "unreachable after exhaustive narrowing");
        self.ctx.unreachable_statements.insert(stmt.0);
    }

    /// Record `current` as the type of every reference to the variable in
    /// `node`, without entering nested functions.
    fn record_references(&mut self, narrower: &CatchNarrower, node: NodeIndex, current: TypeId) {
        let arena = self.ctx.arena;
        let Some(kind) = arena.kind_of(node) else {
            return;
        };
        if is_function_like(kind) {
            return;
        }
        if kind == SyntaxKind::Identifier as u16 {
            if self.refers_to_variable(narrower, node) {
                self.ctx.narrowed_references.insert(node.0, current);
            }
            return;
        }
        for child in arena.get_children(node) {
            self.record_references(narrower, child, current);
        }
    }

    fn refers_to_variable(&self, narrower: &CatchNarrower, expr: NodeIndex) -> bool {
        let arena = self.ctx.arena;
        let expr = arena.skip_outer_expressions(expr);
        arena.kind_of(expr) == Some(SyntaxKind::Identifier as u16)
            && self.ctx.binder.resolve_identifier(arena, expr) == Some(narrower.var)
    }

    fn assigns_variable(&self, narrower: &CatchNarrower, expr: NodeIndex) -> bool {
        let arena = self.ctx.arena;
        let expr = arena.skip_outer_expressions(expr);
        arena
            .get(expr)
            .and_then(|n| arena.get_binary_expr(n))
            .is_some_and(|b| {
                b.operator_token == SyntaxKind::EqualsToken as u16 && self.refers_to_variable(narrower, b.left)
            })
    }

    /// Both branch types of `condition` when it guards the variable.
    fn guard_of(&mut self, narrower: &CatchNarrower, condition: NodeIndex, current: TypeId) -> Option<NarrowingResult> {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let condition = arena.skip_outer_expressions(condition);
        let node = arena.get(condition)?;
        if node.kind == PREFIX_UNARY_EXPRESSION {
            let unary = arena.get_unary_expr(node)?;
            if unary.operator != SyntaxKind::ExclamationToken as u16 {
                return None;
            }
            let operand = unary.operand;
            return self.guard_of(narrower, operand, current).map(NarrowingResult::negate);
        }
        let binary = arena.get_binary_expr(node)?;
        let (left, operator, right) = (binary.left, binary.operator_token, binary.right);
        match SyntaxKind::try_from_u16(operator)? {
            SyntaxKind::InstanceOfKeyword => {
                if !self.refers_to_variable(narrower, left) {
                    return None;
                }
                let instance = self.instance_type_of_constructor(right)?;
                Some(narrow_by_guard(types, current, &TypeGuard::Instanceof(instance)))
            }
            op @ (SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken) => {
                let typeof_result = self
                    .typeof_comparison(narrower, left, right)
                    .or_else(|| self.typeof_comparison(narrower, right, left))?;
                let result = narrow_by_guard(types, current, &TypeGuard::Typeof(typeof_result));
                let negated = matches!(
                    op,
                    SyntaxKind::ExclamationEqualsEqualsToken | SyntaxKind::ExclamationEqualsToken
                );
                Some(if negated { result.negate() } else { result })
            }
            SyntaxKind::AmpersandAmpersandToken => {
                let first = self.guard_of(narrower, left, current)?;
                let second = self.guard_of(narrower, right, first.true_type);
                Some(match second {
                    Some(second) => NarrowingResult {
                        true_type: second.true_type,
                        false_type: types.union2(first.false_type, second.false_type),
                    },
                    None => first,
                })
            }
            SyntaxKind::BarBarToken => {
                let first = self.guard_of(narrower, left, current)?;
                let second = self.guard_of(narrower, right, first.false_type);
                Some(match second {
                    Some(second) => NarrowingResult {
                        true_type: types.union2(first.true_type, second.true_type),
                        false_type: second.false_type,
                    },
                    None => first,
                })
            }
            _ => None,
        }
    }

    /// The string in `typeof <variable> === "<string>"`.
    fn typeof_comparison(&self, narrower: &CatchNarrower, typeof_side: NodeIndex, literal_side: NodeIndex) -> Option<String> {
        let arena = self.ctx.arena;
        let typeof_node = arena.get(arena.skip_outer_expressions(typeof_side))?;
        if typeof_node.kind != TYPE_OF_EXPRESSION {
            return None;
        }
        let operand = arena.get_unary_expr_ex(typeof_node)?.expression;
        if !self.refers_to_variable(narrower, operand) {
            return None;
        }
        let literal = arena.get(arena.skip_outer_expressions(literal_side))?;
        match SyntaxKind::try_from_u16(literal.kind)? {
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                arena.get_literal(literal).map(|lit| lit.text.clone())
            }
            _ => None,
        }
    }

    /// Instance type for the right-hand side of `instanceof`.
    fn instance_type_of_constructor(&mut self, constructor: NodeIndex) -> Option<TypeId> {
        if let Some(sym) = self.class_symbol_of_expression(constructor) {
            return Some(self.class_instance_type(sym));
        }
        let arena = self.ctx.arena;
        let name = arena.identifier_text(arena.skip_outer_expressions(constructor))?;
        self.ctx.types.builtin_type(name)
    }
}

struct CatchNarrower {
    var: SymbolId,
    /// Type the variable has on entry to the catch block.
    declared: TypeId,
}
