//! Promise rejection mapping.
//!
//! `get_call_effect` is the effect of the call itself, excluding its callee
//! and arguments. Most calls take it from their target. Promise plumbing is
//! special: `.then`/`.catch`/`.finally` transform the rejection type of the
//! receiver, `Promise.all` rejects with whatever its elements reject with,
//! and `Promise.reject(x)` rejects with the type of `x`.

use esc_parser::NodeIndex;
use esc_parser::syntax_kind_ext::*;
use esc_scanner::SyntaxKind;
use esc_solver::TypeId;
use tracing::trace;

use crate::call_resolution::CallTarget;
use crate::effect_types::{FunctionEffect, ThrownType};
use crate::state::CheckerState;

/// Promise instance methods that derive a new promise from the receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PromiseMethod {
    Then,
    Catch,
    Finally,
}

impl PromiseMethod {
    fn from_name(name: &str) -> Option<PromiseMethod> {
        match name {
            "then" => Some(PromiseMethod::Then),
            "catch" => Some(PromiseMethod::Catch),
            "finally" => Some(PromiseMethod::Finally),
            _ => None,
        }
    }
}

impl<'a> CheckerState<'a> {
    pub(crate) fn get_call_effect(&mut self, call: NodeIndex) -> FunctionEffect {
        let target = self.resolve_call_target(call);
        match target {
            CallTarget::PromiseAll => FunctionEffect::rejecting(self.promise_all_rejects(call)),
            CallTarget::PromiseReject => {
                let argument = self.nth_argument(call, 0);
                let reason = if argument.is_some() {
                    self.get_type_of_expression(argument)
                } else {
                    TypeId::UNDEFINED
                };
                FunctionEffect::rejecting(ThrownType::from_thrown_value(self.ctx.types, reason))
            }
            CallTarget::Unknown => self
                .promise_method_effect(call)
                .unwrap_or(FunctionEffect::NONE),
            _ => self.effect_of_call_target(target, call),
        }
    }

    /// The receiver and method of `recv.then(...)`-style calls.
    pub(crate) fn promise_method_receiver(&self, call: NodeIndex) -> Option<NodeIndex> {
        let arena = self.ctx.arena;
        let data = arena.get(call).and_then(|n| arena.get_call_expr(n))?;
        let callee = arena.skip_outer_expressions(data.expression);
        let access = arena.get(callee).and_then(|n| arena.get_access_expr(n))?;
        if arena.kind_of(callee) != Some(PROPERTY_ACCESS_EXPRESSION) {
            return None;
        }
        let name = arena.property_name_text(access.name_or_argument)?;
        PromiseMethod::from_name(name).map(|_| access.expression)
    }

    /// `then`/`catch`/`finally` on a value whose `then` did not resolve to
    /// a user-defined member.
    fn promise_method_effect(&mut self, call: NodeIndex) -> Option<FunctionEffect> {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let data = arena.get(call).and_then(|n| arena.get_call_expr(n))?;
        let callee = arena.skip_outer_expressions(data.expression);
        let access = arena.get(callee).and_then(|n| arena.get_access_expr(n))?;
        if arena.kind_of(callee) != Some(PROPERTY_ACCESS_EXPRESSION) {
            return None;
        }
        let method = PromiseMethod::from_name(arena.property_name_text(access.name_or_argument)?)?;
        let receiver_rejects = self.get_effect_of_expression(access.expression).rejects;

        let first = self.nth_argument(call, 0);
        let second = self.nth_argument(call, 1);
        let rejects = match method {
            PromiseMethod::Catch => {
                if self.is_absent_handler(first) {
                    receiver_rejects
                } else {
                    self.handler_rejects(first)
                }
            }
            PromiseMethod::Then => {
                let fulfilled = self.handler_rejects(first);
                if self.is_absent_handler(second) {
                    receiver_rejects.union(fulfilled, types)
                } else {
                    fulfilled.union(self.handler_rejects(second), types)
                }
            }
            PromiseMethod::Finally => receiver_rejects.union(self.handler_rejects(first), types),
        };
        trace!(call = call.0, ?method, rejects = %rejects.display(types), "promise method");
        Some(FunctionEffect::rejecting(rejects))
    }

    /// What a handler passed to `then`/`catch`/`finally` makes the derived
    /// promise reject with: anything it throws, and the rejections of any
    /// promise it returns.
    fn handler_rejects(&mut self, handler: NodeIndex) -> ThrownType {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        if handler.is_none() {
            return ThrownType::NONE;
        }
        let inner = arena.skip_outer_expressions(handler);
        let effect = match arena.kind_of(inner) {
            Some(FUNCTION_EXPRESSION | ARROW_FUNCTION) => self
                .get_effect_of_declaration(inner)
                .unwrap_or(FunctionEffect::NONE),
            _ => {
                let target = self.resolve_callee(inner, 0);
                self.effect_of_call_target(target, NodeIndex::NONE)
            }
        };
        effect.throws.union(effect.rejects, types)
    }

    /// `undefined`, `null` or a missing argument in handler position.
    fn is_absent_handler(&self, handler: NodeIndex) -> bool {
        let arena = self.ctx.arena;
        if handler.is_none() {
            return true;
        }
        let inner = arena.skip_outer_expressions(handler);
        arena.kind_of(inner) == Some(SyntaxKind::NullKeyword as u16)
            || (arena.identifier_text(inner) == Some("undefined")
                && self.ctx.binder.resolve_identifier(arena, inner).is_none())
    }

    /// Union of the element rejections of `Promise.all([...])`.
    fn promise_all_rejects(&mut self, call: NodeIndex) -> ThrownType {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let argument = arena.skip_outer_expressions(self.nth_argument(call, 0));
        let Some(literal) = arena
            .get(argument)
            .filter(|n| n.kind == ARRAY_LITERAL_EXPRESSION)
            .and_then(|n| arena.get_literal_expr(n))
        else {
            return self.get_effect_of_expression(argument).rejects;
        };
        let mut rejects = ThrownType::NONE;
        for element in literal.elements.iter() {
            let element = match arena.get(element) {
                Some(n) if n.kind == SPREAD_ELEMENT => arena
                    .get_unary_expr_ex(n)
                    .map_or(NodeIndex::NONE, |s| s.expression),
                _ => element,
            };
            rejects = rejects.union(self.get_effect_of_expression(element).rejects, types);
        }
        rejects
    }

    pub(crate) fn nth_argument(&self, call: NodeIndex, n: usize) -> NodeIndex {
        let arena = self.ctx.arena;
        arena
            .get(call)
            .and_then(|node| arena.get_call_expr(node))
            .and_then(|c| c.arguments.as_ref())
            .and_then(|args| args.iter().nth(n))
            .unwrap_or(NodeIndex::NONE)
    }
}
