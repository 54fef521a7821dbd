//! Call-site enforcement.
//!
//! A single top-down walk over the file. Every call, `new`, getter read and
//! top-level `await` is asked for its own effect, and the surrounding
//! context decides whether that effect is handled:
//!
//! - Synchronous throws are handled inside a function body (they become
//!   part of the function's effect) or inside a `try` with a `catch`.
//!   `unknown` is never handled by a top-level `try`.
//! - A promise rejection is handled unless the promise is dropped on the
//!   floor: a call used as a bare expression statement. Awaiting, voiding,
//!   chaining, returning or storing the promise all count as handling it
//!   here. Function bodies and `try` blocks do not help a floating promise.
//!
//! A `@ts-expect-exception` directive on the enclosing statement turns
//! either diagnostic into a use of that directive. The same walk validates
//! declared `throws`/`rejects` clauses against inferred effects.

use bitflags::bitflags;
use esc_parser::NodeIndex;
use esc_parser::syntax_kind_ext::*;
use esc_scanner::SyntaxKind;
use esc_solver::is_assignable_to;
use tracing::trace;

use crate::directives::is_statement_kind;
use crate::effect_types::{FunctionEffect, ThrownType};
use crate::signatures::signature_parts;
use crate::state::CheckerState;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct CallSiteFlags: u8 {
        /// Inside the try block of a `try` that has a `catch`.
        const IN_TRY_WITH_CATCH = 1 << 0;
        /// Inside the body of a function, method, accessor or arrow.
        const IN_FUNCTION_BODY = 1 << 1;
        /// The enclosing statement carries a directive.
        const SUPPRESSED = 1 << 2;
    }
}

/// How the value of an expression is consumed by its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PromiseUse {
    /// Discarded: expression statement, left of a comma.
    Statement,
    Awaited,
    Voided,
    /// Receiver of `.then`/`.catch`/`.finally`.
    Chained,
    Returned,
    Stored,
    /// Element of an array literal.
    Aggregated,
    Argument,
    /// Any other operand position.
    Expression,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CallSiteContext {
    pub flags: CallSiteFlags,
    pub directive: Option<usize>,
    pub promise_use: PromiseUse,
}

impl CallSiteContext {
    const TOP_LEVEL: CallSiteContext = CallSiteContext {
        flags: CallSiteFlags::empty(),
        directive: None,
        promise_use: PromiseUse::Statement,
    };

    const fn using(self, promise_use: PromiseUse) -> CallSiteContext {
        CallSiteContext {
            flags: self.flags,
            directive: self.directive,
            promise_use,
        }
    }

    fn with_flags(self, flags: CallSiteFlags) -> CallSiteContext {
        CallSiteContext {
            flags,
            directive: self.directive,
            promise_use: self.promise_use,
        }
    }
}

impl<'a> CheckerState<'a> {
    /// Walk the whole file and report unhandled effects.
    pub(crate) fn enforce_call_sites(&mut self, root: NodeIndex) {
        self.visit_for_effects(root, CallSiteContext::TOP_LEVEL);
    }

    fn visit_for_effects(&mut self, idx: NodeIndex, cx: CallSiteContext) {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || self.visit_for_effects_inner(idx, cx));
    }

    fn visit_for_effects_inner(&mut self, idx: NodeIndex, mut cx: CallSiteContext) {
        let arena = self.ctx.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };
        let kind = node.kind;
        if self.ctx.unreachable_statements.contains(&idx.0) {
            return;
        }

        if is_statement_kind(kind) {
            cx.promise_use = PromiseUse::Expression;
            if let Some(directive) = self.ctx.directives.directive_for(idx) {
                cx.directive = Some(directive);
                cx.flags |= CallSiteFlags::SUPPRESSED;
            }
        }

        match kind {
            k if is_function_like(k) => self.visit_function_like(idx, cx),
            // Field initializers run inside the constructor.
            PROPERTY_DECLARATION => {
                let body_cx = cx
                    .with_flags((cx.flags & CallSiteFlags::SUPPRESSED) | CallSiteFlags::IN_FUNCTION_BODY)
                    .using(PromiseUse::Stored);
                self.visit_children_with(idx, body_cx);
            }
            EXPRESSION_STATEMENT => {
                let expr = arena
                    .get_expression_statement(node)
                    .map_or(NodeIndex::NONE, |e| e.expression);
                self.visit_for_effects(expr, cx.using(PromiseUse::Statement));
            }
            RETURN_STATEMENT => {
                let expr = arena
                    .get_return_statement(node)
                    .map_or(NodeIndex::NONE, |r| r.expression);
                self.visit_for_effects(expr, cx.using(PromiseUse::Returned));
            }
            THROW_STATEMENT => {
                let expr = arena
                    .get_return_statement(node)
                    .map_or(NodeIndex::NONE, |r| r.expression);
                self.visit_for_effects(expr, cx.using(PromiseUse::Stored));
            }
            VARIABLE_DECLARATION => {
                let initializer = arena
                    .get_variable_declaration(node)
                    .map_or(NodeIndex::NONE, |d| d.initializer);
                self.visit_for_effects(initializer, cx.using(PromiseUse::Stored));
            }
            TRY_STATEMENT => {
                let Some(data) = arena.get_try(node) else {
                    return;
                };
                let (try_block, catch_clause, finally_block) =
                    (data.try_block, data.catch_clause, data.finally_block);
                let try_cx = if catch_clause.is_some() {
                    cx.with_flags(cx.flags | CallSiteFlags::IN_TRY_WITH_CATCH)
                } else {
                    cx
                };
                self.visit_for_effects(try_block, try_cx);
                if catch_clause.is_some() {
                    self.narrow_catch_clause(catch_clause);
                }
                self.visit_for_effects(catch_clause, cx);
                self.visit_for_effects(finally_block, cx);
            }
            CALL_EXPRESSION => self.visit_call(idx, cx),
            NEW_EXPRESSION => {
                let effect = self.get_construct_effect(idx);
                self.enforce_effect(idx, effect, cx);
                self.visit_children_with(idx, cx.using(PromiseUse::Argument));
            }
            AWAIT_EXPRESSION => {
                let operand = arena
                    .get_unary_expr_ex(node)
                    .map_or(NodeIndex::NONE, |u| u.expression);
                self.enforce_await(idx, operand, cx);
                self.visit_for_effects(operand, cx.using(PromiseUse::Awaited));
            }
            VOID_EXPRESSION => {
                let operand = arena
                    .get_unary_expr_ex(node)
                    .map_or(NodeIndex::NONE, |u| u.expression);
                self.visit_for_effects(operand, cx.using(PromiseUse::Voided));
            }
            PARENTHESIZED_EXPRESSION | AS_EXPRESSION | SATISFIES_EXPRESSION | NON_NULL_EXPRESSION
            | SPREAD_ELEMENT => {
                let inner = if kind == SPREAD_ELEMENT {
                    arena
                        .get_unary_expr_ex(node)
                        .map_or(NodeIndex::NONE, |u| u.expression)
                } else {
                    let inner = arena.skip_outer_expressions(idx);
                    if inner == idx { NodeIndex::NONE } else { inner }
                };
                self.visit_for_effects(inner, cx);
            }
            BINARY_EXPRESSION => self.visit_binary(idx, cx),
            CONDITIONAL_EXPRESSION => {
                let Some(cond) = arena.get_conditional_expr(node) else {
                    return;
                };
                let (condition, when_true, when_false) =
                    (cond.condition, cond.when_true, cond.when_false);
                self.visit_for_effects(condition, cx.using(PromiseUse::Expression));
                self.visit_for_effects(when_true, cx);
                self.visit_for_effects(when_false, cx);
            }
            ARRAY_LITERAL_EXPRESSION => {
                self.visit_children_with(idx, cx.using(PromiseUse::Aggregated));
            }
            OBJECT_LITERAL_EXPRESSION => self.visit_children_with(idx, cx.using(PromiseUse::Stored)),
            PROPERTY_ACCESS_EXPRESSION => {
                if let Some(getter) = self.getter_of_access(idx) {
                    let effect = self
                        .get_effect_of_declaration(getter)
                        .unwrap_or(FunctionEffect::NONE);
                    self.enforce_effect(idx, effect, cx.using(PromiseUse::Expression));
                }
                let receiver = arena
                    .get_access_expr(node)
                    .map_or(NodeIndex::NONE, |a| a.expression);
                self.visit_for_effects(receiver, cx.using(PromiseUse::Expression));
            }
            _ => self.visit_children_with(idx, cx.using(PromiseUse::Expression)),
        }
    }

    fn visit_children_with(&mut self, idx: NodeIndex, cx: CallSiteContext) {
        for child in self.ctx.arena.get_children(idx) {
            self.visit_for_effects(child, cx);
        }
    }

    fn visit_function_like(&mut self, decl: NodeIndex, cx: CallSiteContext) {
        let arena = self.ctx.arena;
        let Some(parts) = signature_parts(arena, decl) else {
            self.visit_children_with(decl, cx.using(PromiseUse::Expression));
            return;
        };
        if !parts.has_body() {
            return;
        }
        let body = parts.body;
        self.validate_declared_effect(decl);

        let body_cx = CallSiteContext {
            flags: (cx.flags & CallSiteFlags::SUPPRESSED) | CallSiteFlags::IN_FUNCTION_BODY,
            directive: cx.directive,
            promise_use: PromiseUse::Expression,
        };
        for child in arena.get_children(decl) {
            // A concise arrow body is the returned value.
            if child == body && arena.kind_of(body) != Some(BLOCK) {
                self.visit_for_effects(child, body_cx.using(PromiseUse::Returned));
            } else {
                self.visit_for_effects(child, body_cx);
            }
        }
    }

    fn visit_call(&mut self, call: NodeIndex, cx: CallSiteContext) {
        let arena = self.ctx.arena;
        let Some(data) = arena.get(call).and_then(|n| arena.get_call_expr(n)) else {
            return;
        };
        let callee = arena.skip_outer_expressions(data.expression);
        let arguments: Vec<NodeIndex> = data
            .arguments
            .as_ref()
            .map(|list| list.iter().collect())
            .unwrap_or_default();

        let effect = self.get_call_effect(call);
        self.enforce_effect(call, effect, cx);

        // Visit the callee without treating the method name as a getter read.
        let chained = self.promise_method_receiver(call);
        match arena.get(callee) {
            Some(n) if n.kind == PROPERTY_ACCESS_EXPRESSION => {
                let receiver = arena.get_access_expr(n).map_or(NodeIndex::NONE, |a| a.expression);
                let receiver_use = if chained.is_some() {
                    PromiseUse::Chained
                } else {
                    PromiseUse::Expression
                };
                self.visit_for_effects(receiver, cx.using(receiver_use));
            }
            _ => self.visit_for_effects(callee, cx.using(PromiseUse::Expression)),
        }
        for arg in arguments {
            self.visit_for_effects(arg, cx.using(PromiseUse::Argument));
        }
    }

    fn visit_binary(&mut self, idx: NodeIndex, cx: CallSiteContext) {
        let arena = self.ctx.arena;
        let Some(binary) = arena.get(idx).and_then(|n| arena.get_binary_expr(n)) else {
            return;
        };
        let (left, right) = (binary.left, binary.right);
        let operator = SyntaxKind::try_from_u16(binary.operator_token);
        match operator {
            Some(SyntaxKind::CommaToken) => {
                self.visit_for_effects(left, cx.using(PromiseUse::Statement));
                self.visit_for_effects(right, cx);
            }
            Some(
                SyntaxKind::AmpersandAmpersandToken
                | SyntaxKind::BarBarToken
                | SyntaxKind::QuestionQuestionToken,
            ) => {
                self.visit_for_effects(left, cx.using(PromiseUse::Expression));
                self.visit_for_effects(right, cx);
            }
            Some(op) if op.is_assignment_operator() => {
                self.visit_assignment_target(left, cx.using(PromiseUse::Expression));
                self.visit_for_effects(right, cx.using(PromiseUse::Stored));
            }
            _ => {
                self.visit_for_effects(left, cx.using(PromiseUse::Expression));
                self.visit_for_effects(right, cx.using(PromiseUse::Expression));
            }
        }
    }

    /// Writing `obj.prop` calls no getter; only the receiver is evaluated.
    fn visit_assignment_target(&mut self, target: NodeIndex, cx: CallSiteContext) {
        let arena = self.ctx.arena;
        match arena.get(target) {
            Some(n) if n.kind == PROPERTY_ACCESS_EXPRESSION => {
                let receiver = arena.get_access_expr(n).map_or(NodeIndex::NONE, |a| a.expression);
                self.visit_for_effects(receiver, cx);
            }
            _ => self.visit_for_effects(target, cx),
        }
    }

    // =========================================================================
    // Handling decisions
    // =========================================================================

    fn enforce_effect(&mut self, site: NodeIndex, effect: FunctionEffect, cx: CallSiteContext) {
        if !effect.throws.is_empty() && !throws_handled(effect.throws, cx) {
            trace!(site = site.0, throws = %effect.throws.display(self.ctx.types), "unhandled throw");
            if !self.consume_directive(cx) {
                self.report_unhandled_throw(site, effect.throws);
            }
        }
        if !effect.rejects.is_empty() && cx.promise_use == PromiseUse::Statement {
            trace!(site = site.0, rejects = %effect.rejects.display(self.ctx.types), "floating promise");
            if !self.consume_directive(cx) {
                self.report_unhandled_rejection(site, effect.rejects);
            }
        }
    }

    /// At the top level an awaited rejection is thrown where nothing can
    /// catch it but a surrounding `try`.
    fn enforce_await(&mut self, await_expr: NodeIndex, operand: NodeIndex, cx: CallSiteContext) {
        if cx.flags.contains(CallSiteFlags::IN_FUNCTION_BODY) {
            return;
        }
        let rejects = self.get_effect_of_expression(operand).rejects;
        if rejects.is_empty() || throws_handled(rejects, cx) {
            return;
        }
        if !self.consume_directive(cx) {
            self.report_unhandled_rejection(await_expr, rejects);
        }
    }

    /// Record a use of the directive binding the current statement.
    fn consume_directive(&mut self, cx: CallSiteContext) -> bool {
        if !cx.flags.contains(CallSiteFlags::SUPPRESSED) {
            return false;
        }
        if let Some(directive) = cx.directive {
            self.ctx.used_directives.insert(directive);
        }
        true
    }

    // =========================================================================
    // Declared effects
    // =========================================================================

    /// The inferred effect of a body must fit its declared clauses.
    fn validate_declared_effect(&mut self, decl: NodeIndex) {
        let types = self.ctx.types;
        let Some(parts) = signature_parts(self.ctx.arena, decl) else {
            return;
        };
        let declared = self.declared_effect_of(decl);
        if declared.is_empty() {
            return;
        }
        let inferred = self.inferred_effect_of(decl);
        if let Some(declared_throws) = declared.throws
            && !inferred.throws.is_empty()
            && !is_assignable_to(types, inferred.throws.type_id(), declared_throws)
        {
            let anchor = anchor_of(parts.name, parts.throws_clause, decl);
            self.report_declared_effect_too_narrow(anchor, inferred.throws, declared_throws, false);
        }
        if let Some(declared_rejects) = declared.rejects
            && !inferred.rejects.is_empty()
            && !is_assignable_to(types, inferred.rejects.type_id(), declared_rejects)
        {
            let anchor = anchor_of(parts.name, parts.rejects_clause, decl);
            self.report_declared_effect_too_narrow(anchor, inferred.rejects, declared_rejects, true);
        }
    }
}

fn throws_handled(thrown: ThrownType, cx: CallSiteContext) -> bool {
    cx.flags.contains(CallSiteFlags::IN_FUNCTION_BODY)
        || (cx.flags.contains(CallSiteFlags::IN_TRY_WITH_CATCH) && !thrown.is_unknown())
}

fn anchor_of(name: NodeIndex, clause: NodeIndex, decl: NodeIndex) -> NodeIndex {
    if name.is_some() {
        name
    } else if clause.is_some() {
        clause
    } else {
        decl
    }
}
