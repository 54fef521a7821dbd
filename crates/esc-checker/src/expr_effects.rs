//! Expression effects.
//!
//! An expression throws whatever its evaluation throws: its operands, the
//! calls it makes, the getters it reads. Separately, an expression whose
//! value is a promise carries that promise's rejection type, which only
//! turns into a throw when something awaits it.

use esc_binder::{SymbolId, symbol_flags};
use esc_parser::syntax_kind_ext::*;
use esc_parser::{NodeIndex, node_flags};
use esc_scanner::SyntaxKind;
use esc_solver::TypeId;

use crate::effect_types::{ExprEffect, FunctionEffect, ThrownType};
use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    pub(crate) fn get_effect_of_expression(&mut self, idx: NodeIndex) -> ExprEffect {
        if idx.is_none() {
            return ExprEffect::NONE;
        }
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || self.get_effect_of_expression_inner(idx))
    }

    fn get_effect_of_expression_inner(&mut self, idx: NodeIndex) -> ExprEffect {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(node) = arena.get(idx) else {
            return ExprEffect::NONE;
        };

        if node.kind == SyntaxKind::Identifier as u16 {
            return self.effect_of_identifier(idx);
        }
        if SyntaxKind::try_from_u16(node.kind).is_some() {
            return ExprEffect::NONE;
        }

        match node.kind {
            k if is_function_like(k) => ExprEffect::NONE,
            CLASS_EXPRESSION | CLASS_DECLARATION => ExprEffect::NONE,
            PARENTHESIZED_EXPRESSION | NON_NULL_EXPRESSION | AS_EXPRESSION | SATISFIES_EXPRESSION => {
                let inner = arena.skip_outer_expressions(idx);
                if inner == idx {
                    ExprEffect::NONE
                } else {
                    self.get_effect_of_expression(inner)
                }
            }
            CALL_EXPRESSION => self.effect_of_call_expression(idx),
            NEW_EXPRESSION => self.effect_of_new_expression(idx),
            AWAIT_EXPRESSION => {
                let operand = arena
                    .get_unary_expr_ex(node)
                    .map_or(NodeIndex::NONE, |u| u.expression);
                let inner = self.get_effect_of_expression(operand);
                ExprEffect::throwing(inner.throws.union(inner.rejects, types))
            }
            VOID_EXPRESSION => {
                let operand = arena
                    .get_unary_expr_ex(node)
                    .map_or(NodeIndex::NONE, |u| u.expression);
                self.get_effect_of_expression(operand).without_value()
            }
            BINARY_EXPRESSION => self.effect_of_binary(idx),
            CONDITIONAL_EXPRESSION => {
                let Some(cond) = arena.get_conditional_expr(node) else {
                    return ExprEffect::NONE;
                };
                let (condition, when_true, when_false) =
                    (cond.condition, cond.when_true, cond.when_false);
                let test = self.get_effect_of_expression(condition).without_value();
                let a = self.get_effect_of_expression(when_true);
                let b = self.get_effect_of_expression(when_false);
                test.union(a, types).union(b, types)
            }
            PROPERTY_ACCESS_EXPRESSION => {
                let Some(access) = arena.get_access_expr(node) else {
                    return ExprEffect::NONE;
                };
                let receiver = self.get_effect_of_expression(access.expression).without_value();
                let getter = self.getter_effect_of_access(idx);
                receiver.union(getter.into(), types)
            }
            _ => ExprEffect::throwing(self.effect_of_children(idx)),
        }
    }

    /// Throws of every child expression, values discarded.
    fn effect_of_children(&mut self, idx: NodeIndex) -> ThrownType {
        let types = self.ctx.types;
        let mut throws = ThrownType::NONE;
        for child in self.ctx.arena.get_children(idx) {
            throws = throws.union(self.get_effect_of_expression(child).throws, types);
        }
        throws
    }

    /// A `const` bound to a promise-producing initializer carries that
    /// promise's rejections to wherever it is awaited.
    fn effect_of_identifier(&mut self, ident: NodeIndex) -> ExprEffect {
        let arena = self.ctx.arena;
        let binder = self.ctx.binder;
        let Some(sym) = binder.resolve_identifier(arena, ident) else {
            return ExprEffect::NONE;
        };
        if let Some(&rejects) = self.ctx.const_rejects.get(&sym) {
            return ExprEffect {
                throws: ThrownType::NONE,
                rejects: ThrownType(rejects),
            };
        }
        let Some(initializer) = self.const_initializer(sym) else {
            return ExprEffect::NONE;
        };
        // Placeholder so a self-referencing initializer terminates.
        self.ctx.const_rejects.insert(sym, TypeId::NEVER);
        let rejects = self.get_effect_of_expression(initializer).rejects;
        self.ctx.const_rejects.insert(sym, rejects.type_id());
        ExprEffect {
            throws: ThrownType::NONE,
            rejects,
        }
    }

    fn const_initializer(&self, sym: SymbolId) -> Option<NodeIndex> {
        let arena = self.ctx.arena;
        let symbol = self.ctx.binder.get_symbol(sym)?;
        if !symbol.has_flags(symbol_flags::BLOCK_SCOPED_VARIABLE) {
            return None;
        }
        let decl = symbol.value_declaration;
        let list = arena.get(arena.parent_of(decl))?;
        if list.flags & node_flags::CONST == 0 {
            return None;
        }
        let initializer = arena
            .get(decl)
            .and_then(|n| arena.get_variable_declaration(n))?
            .initializer;
        initializer.is_some().then_some(initializer)
    }

    fn effect_of_call_expression(&mut self, call: NodeIndex) -> ExprEffect {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(data) = arena.get(call).and_then(|n| arena.get_call_expr(n)) else {
            return ExprEffect::NONE;
        };
        let callee = arena.skip_outer_expressions(data.expression);
        let mut throws = self.effect_of_callee_evaluation(callee);
        if let Some(arguments) = data.arguments.as_ref() {
            for arg in arguments.iter() {
                throws = throws.union(self.get_effect_of_expression(arg).throws, types);
            }
        }
        let own = self.get_call_effect(call);
        ExprEffect {
            throws: throws.union(own.throws, types),
            rejects: own.rejects,
        }
    }

    /// What evaluating the callee itself throws, before the call happens:
    /// the receiver of a method call, never the method lookup.
    fn effect_of_callee_evaluation(&mut self, callee: NodeIndex) -> ThrownType {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(node) = arena.get(callee) else {
            return ThrownType::NONE;
        };
        match node.kind {
            PROPERTY_ACCESS_EXPRESSION => {
                let receiver = arena
                    .get_access_expr(node)
                    .map_or(NodeIndex::NONE, |a| a.expression);
                self.get_effect_of_expression(receiver).throws
            }
            ELEMENT_ACCESS_EXPRESSION => {
                let Some(access) = arena.get_access_expr(node) else {
                    return ThrownType::NONE;
                };
                let (receiver, argument) = (access.expression, access.name_or_argument);
                self.get_effect_of_expression(receiver)
                    .throws
                    .union(self.get_effect_of_expression(argument).throws, types)
            }
            _ => self.get_effect_of_expression(callee).throws,
        }
    }

    fn effect_of_new_expression(&mut self, new_expr: NodeIndex) -> ExprEffect {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(data) = arena.get(new_expr).and_then(|n| arena.get_call_expr(n)) else {
            return ExprEffect::NONE;
        };
        let mut throws = ThrownType::NONE;
        if let Some(arguments) = data.arguments.as_ref() {
            for arg in arguments.iter() {
                throws = throws.union(self.get_effect_of_expression(arg).throws, types);
            }
        }
        let own = self.get_construct_effect(new_expr);
        ExprEffect {
            throws: throws.union(own.throws, types),
            rejects: own.rejects,
        }
    }

    /// Effect of the constructor a `new` expression runs.
    pub(crate) fn get_construct_effect(&mut self, new_expr: NodeIndex) -> FunctionEffect {
        let target = self.resolve_construct_target(new_expr);
        self.effect_of_call_target(target, new_expr)
    }

    fn effect_of_binary(&mut self, idx: NodeIndex) -> ExprEffect {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(binary) = arena.get(idx).and_then(|n| arena.get_binary_expr(n)) else {
            return ExprEffect::NONE;
        };
        let (left, right, operator) = (binary.left, binary.right, binary.operator_token);
        let left_effect = self.get_effect_of_expression(left);
        let right_effect = self.get_effect_of_expression(right);
        match SyntaxKind::try_from_u16(operator) {
            Some(
                SyntaxKind::AmpersandAmpersandToken
                | SyntaxKind::BarBarToken
                | SyntaxKind::QuestionQuestionToken,
            ) => left_effect.union(right_effect, types),
            Some(SyntaxKind::CommaToken | SyntaxKind::EqualsToken) => ExprEffect {
                throws: left_effect.throws.union(right_effect.throws, types),
                rejects: right_effect.rejects,
            },
            _ => ExprEffect::throwing(left_effect.throws.union(right_effect.throws, types)),
        }
    }

    /// The `get` accessor a property access reads, if it resolves to one.
    pub(crate) fn getter_of_access(&mut self, access_idx: NodeIndex) -> Option<NodeIndex> {
        let arena = self.ctx.arena;
        let binder = self.ctx.binder;
        let access = arena.get(access_idx).and_then(|n| arena.get_access_expr(n))?;
        let (receiver, name_idx) = (access.expression, access.name_or_argument);
        let name = arena.property_name_text(name_idx)?;

        let member = match self.class_symbol_of_expression(receiver) {
            Some(class_sym) => binder.lookup_member(arena, class_sym, name, true),
            None => {
                let receiver_type = self.get_type_of_expression(receiver);
                self.instance_member_of_type(receiver_type, name)
            }
        }?;
        let symbol = binder.get_symbol(member)?;
        if !symbol.has_flags(symbol_flags::GET_ACCESSOR) {
            return None;
        }
        symbol
            .declarations
            .iter()
            .copied()
            .find(|&d| arena.kind_of(d) == Some(GET_ACCESSOR))
    }

    fn getter_effect_of_access(&mut self, access_idx: NodeIndex) -> FunctionEffect {
        match self.getter_of_access(access_idx) {
            Some(getter) => self
                .get_effect_of_declaration(getter)
                .unwrap_or(FunctionEffect::NONE),
            None => FunctionEffect::NONE,
        }
    }
}
