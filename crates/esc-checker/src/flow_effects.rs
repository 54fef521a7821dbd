//! Statement-level effect composition.
//!
//! Walks a statement list in order, unioning what each reachable statement
//! throws. A statement that cannot complete normally (throw, return, break,
//! continue, or a compound statement none of whose paths complete) makes
//! the rest of its list unreachable. `try`/`catch` absorbs the try block's
//! effect and types the catch variable with it.
//!
//! `return` expressions are not part of the thrown effect: the promise
//! rejections they carry are collected separately in `returned_rejects`,
//! because they leave through the returned value rather than through the
//! enclosing `try`.

use esc_parser::NodeIndex;
use esc_parser::syntax_kind_ext::*;
use esc_solver::TypeId;
use tracing::trace;

use crate::effect_types::ThrownType;
use crate::state::CheckerState;

/// Outcome of composing one statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FlowEffect {
    pub throws: ThrownType,
    /// Some path reaches the end of the statement.
    pub completes: bool,
    /// Some path leaves through `break`/`continue` to an enclosing statement.
    pub breaks: bool,
}

impl FlowEffect {
    pub(crate) const EMPTY: FlowEffect = FlowEffect {
        throws: ThrownType::NONE,
        completes: true,
        breaks: false,
    };

    const fn completing(throws: ThrownType) -> FlowEffect {
        FlowEffect {
            throws,
            completes: true,
            breaks: false,
        }
    }

    const fn abrupt(throws: ThrownType) -> FlowEffect {
        FlowEffect {
            throws,
            completes: false,
            breaks: false,
        }
    }
}

impl<'a> CheckerState<'a> {
    pub(crate) fn compose_block(&mut self, block: NodeIndex, returned_rejects: &mut ThrownType) -> FlowEffect {
        let arena = self.ctx.arena;
        let Some(data) = arena.get(block).and_then(|n| arena.get_block(n)) else {
            return FlowEffect::EMPTY;
        };
        self.compose_statements(data.statements.iter(), returned_rejects)
    }

    pub(crate) fn compose_statements(
        &mut self,
        statements: impl Iterator<Item = NodeIndex>,
        returned_rejects: &mut ThrownType,
    ) -> FlowEffect {
        let types = self.ctx.types;
        let mut result = FlowEffect::EMPTY;
        for stmt in statements {
            let flow = self.compose_statement(stmt, returned_rejects);
            result.throws = result.throws.union(flow.throws, types);
            result.breaks |= flow.breaks;
            if !flow.completes {
                result.completes = false;
                break;
            }
        }
        result
    }

    pub(crate) fn compose_statement(&mut self, stmt: NodeIndex, returned_rejects: &mut ThrownType) -> FlowEffect {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            self.compose_statement_inner(stmt, returned_rejects)
        })
    }

    fn compose_statement_inner(&mut self, stmt: NodeIndex, returned_rejects: &mut ThrownType) -> FlowEffect {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(node) = arena.get(stmt) else {
            return FlowEffect::EMPTY;
        };
        if self.ctx.unreachable_statements.contains(&stmt.0) {
            return FlowEffect::abrupt(ThrownType::NONE);
        }
        match node.kind {
            BLOCK => self.compose_block(stmt, returned_rejects),
            EXPRESSION_STATEMENT => {
                let expr = arena
                    .get_expression_statement(node)
                    .map_or(NodeIndex::NONE, |e| e.expression);
                FlowEffect::completing(self.get_effect_of_expression(expr).throws)
            }
            VARIABLE_STATEMENT | VARIABLE_DECLARATION_LIST => {
                FlowEffect::completing(self.effect_of_variable_declarations(stmt))
            }
            THROW_STATEMENT => {
                let expr = arena
                    .get_return_statement(node)
                    .map_or(NodeIndex::NONE, |r| r.expression);
                let evaluation = self.get_effect_of_expression(expr).throws;
                let value_type = self.get_type_of_expression(expr);
                let thrown = ThrownType::from_thrown_value(types, value_type);
                trace!(stmt = stmt.0, thrown = %thrown.display(types), "throw");
                FlowEffect::abrupt(evaluation.union(thrown, types))
            }
            RETURN_STATEMENT => {
                let expr = arena
                    .get_return_statement(node)
                    .map_or(NodeIndex::NONE, |r| r.expression);
                let effect = self.get_effect_of_expression(expr);
                *returned_rejects = returned_rejects.union(effect.rejects, types);
                FlowEffect::abrupt(effect.throws)
            }
            BREAK_STATEMENT | CONTINUE_STATEMENT => FlowEffect {
                throws: ThrownType::NONE,
                completes: false,
                breaks: true,
            },
            IF_STATEMENT => {
                let Some(data) = arena.get_if_statement(node) else {
                    return FlowEffect::EMPTY;
                };
                let condition = self.get_effect_of_expression(data.expression).throws;
                let then_flow = self.compose_statement(data.then_statement, returned_rejects);
                let else_flow = if data.else_statement.is_some() {
                    self.compose_statement(data.else_statement, returned_rejects)
                } else {
                    FlowEffect::EMPTY
                };
                FlowEffect {
                    throws: condition
                        .union(then_flow.throws, types)
                        .union(else_flow.throws, types),
                    completes: then_flow.completes || else_flow.completes,
                    breaks: then_flow.breaks || else_flow.breaks,
                }
            }
            WHILE_STATEMENT | DO_STATEMENT | FOR_STATEMENT => {
                let Some(data) = arena.get_loop(node) else {
                    return FlowEffect::EMPTY;
                };
                let mut throws = if arena.kind_of(data.initializer) == Some(VARIABLE_DECLARATION_LIST) {
                    self.effect_of_variable_declarations(data.initializer)
                } else {
                    self.get_effect_of_expression(data.initializer).throws
                };
                throws = throws.union(self.get_effect_of_expression(data.condition).throws, types);
                throws = throws.union(self.get_effect_of_expression(data.incrementor).throws, types);
                let body = self.compose_statement(data.statement, returned_rejects);
                // Loops may run zero times or exit via `break`; treat them as completing.
                FlowEffect::completing(throws.union(body.throws, types))
            }
            FOR_IN_STATEMENT | FOR_OF_STATEMENT => {
                let Some(data) = arena.get_for_in_of(node) else {
                    return FlowEffect::EMPTY;
                };
                let iterated = self.get_effect_of_expression(data.expression);
                // `for await` awaits every element.
                let mut throws = if data.await_modifier {
                    iterated.throws.union(iterated.rejects, types)
                } else {
                    iterated.throws
                };
                let body = self.compose_statement(data.statement, returned_rejects);
                throws = throws.union(body.throws, types);
                FlowEffect::completing(throws)
            }
            SWITCH_STATEMENT => self.compose_switch(stmt, returned_rejects),
            LABELED_STATEMENT => {
                let inner = arena
                    .get_labeled_statement(node)
                    .map_or(NodeIndex::NONE, |l| l.statement);
                let flow = self.compose_statement(inner, returned_rejects);
                FlowEffect {
                    throws: flow.throws,
                    completes: flow.completes || flow.breaks,
                    breaks: false,
                }
            }
            TRY_STATEMENT => self.compose_try(stmt, returned_rejects),
            // Declarations run nothing at this point.
            _ => FlowEffect::EMPTY,
        }
    }

    /// Initializers of a variable statement or declaration list. The values
    /// are stored, so only evaluation throws.
    fn effect_of_variable_declarations(&mut self, idx: NodeIndex) -> ThrownType {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(node) = arena.get(idx) else {
            return ThrownType::NONE;
        };
        let Some(data) = arena.get_variable(node) else {
            return ThrownType::NONE;
        };
        let mut throws = ThrownType::NONE;
        for child in data.declarations.iter() {
            match arena.kind_of(child) {
                Some(VARIABLE_DECLARATION_LIST) => {
                    throws = throws.union(self.effect_of_variable_declarations(child), types);
                }
                Some(VARIABLE_DECLARATION) => {
                    let initializer = arena
                        .get(child)
                        .and_then(|n| arena.get_variable_declaration(n))
                        .map_or(NodeIndex::NONE, |d| d.initializer);
                    throws = throws.union(self.get_effect_of_expression(initializer).throws, types);
                }
                _ => {}
            }
        }
        throws
    }

    fn compose_switch(&mut self, stmt: NodeIndex, returned_rejects: &mut ThrownType) -> FlowEffect {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(data) = arena.get(stmt).and_then(|n| arena.get_switch(n)) else {
            return FlowEffect::EMPTY;
        };
        let mut throws = self.get_effect_of_expression(data.expression).throws;
        let mut has_default = false;
        let mut any_breaks = false;
        let mut last_completes = true;
        for clause_idx in data.clauses.iter() {
            let Some(clause_node) = arena.get(clause_idx) else {
                continue;
            };
            let Some(clause) = arena.get_case_clause(clause_node) else {
                continue;
            };
            if clause_node.kind == DEFAULT_CLAUSE {
                has_default = true;
            } else {
                throws = throws.union(self.get_effect_of_expression(clause.expression).throws, types);
            }
            let flow = self.compose_statements(clause.statements.iter(), returned_rejects);
            throws = throws.union(flow.throws, types);
            any_breaks |= flow.breaks;
            last_completes = flow.completes;
        }
        FlowEffect::completing(throws).with_completion(!has_default || any_breaks || last_completes)
    }

    fn compose_try(&mut self, stmt: NodeIndex, returned_rejects: &mut ThrownType) -> FlowEffect {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(data) = arena.get(stmt).and_then(|n| arena.get_try(n)) else {
            return FlowEffect::EMPTY;
        };
        let (try_block, catch_clause, finally_block) =
            (data.try_block, data.catch_clause, data.finally_block);

        let try_flow = self.compose_block(try_block, returned_rejects);
        let finally_flow = if finally_block.is_some() {
            self.compose_block(finally_block, returned_rejects)
        } else {
            FlowEffect::EMPTY
        };

        let catch = arena.get(catch_clause).and_then(|n| arena.get_catch_clause(n));
        let body_flow = match catch {
            Some(catch) => {
                self.ctx
                    .catch_variable_types
                    .entry(catch_clause.0)
                    .or_insert(try_flow.throws.type_id());
                self.narrow_catch_clause(catch_clause);
                let catch_flow = self.compose_block(catch.block, returned_rejects);
                FlowEffect {
                    throws: catch_flow.throws,
                    completes: try_flow.completes || catch_flow.completes,
                    breaks: try_flow.breaks || catch_flow.breaks,
                }
            }
            None => try_flow,
        };

        // A finally block that leaves abruptly overrides whatever the try
        // or catch was doing.
        if !finally_flow.completes {
            return finally_flow;
        }
        FlowEffect {
            throws: body_flow.throws.union(finally_flow.throws, types),
            completes: body_flow.completes,
            breaks: body_flow.breaks || finally_flow.breaks,
        }
    }

    /// Type of the variable bound by `catch_clause`: everything the try
    /// block can throw. `None` if the node is not a catch clause.
    pub fn get_catch_variable_type(&mut self, catch_clause: NodeIndex) -> Option<TypeId> {
        let arena = self.ctx.arena;
        if arena.kind_of(catch_clause) != Some(CATCH_CLAUSE) {
            return None;
        }
        if let Some(&cached) = self.ctx.catch_variable_types.get(&catch_clause.0) {
            return Some(cached);
        }
        let try_stmt = arena.parent_of(catch_clause);
        let try_block = arena
            .get(try_stmt)
            .and_then(|n| arena.get_try(n))
            .map(|t| t.try_block)?;
        if !self.ctx.catch_resolution_set.insert(catch_clause.0) {
            return Some(TypeId::UNKNOWN);
        }
        let mut scratch = ThrownType::NONE;
        let thrown = self.compose_block(try_block, &mut scratch).throws;
        self.ctx.catch_resolution_set.remove(&catch_clause.0);
        self.ctx
            .catch_variable_types
            .insert(catch_clause.0, thrown.type_id());
        Some(thrown.type_id())
    }
}

impl FlowEffect {
    const fn with_completion(mut self, completes: bool) -> FlowEffect {
        self.completes = completes;
        self
    }
}
