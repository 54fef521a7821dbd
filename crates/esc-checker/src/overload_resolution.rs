//! Overload selection for effects.
//!
//! A call to an overloaded function sees the clauses of the overload the
//! arguments select, not the union over all overloads. Selection is the
//! usual first-match rule: arity first, then every argument's static type
//! (literals kept, so `"a"` picks an overload declared for `"a"`) must be
//! assignable to the parameter type.

use esc_binder::SymbolId;
use esc_parser::NodeIndex;
use esc_solver::{TypeId, TypeKey, is_assignable_to};
use smallvec::SmallVec;
use tracing::trace;

use crate::call_resolution::CallTarget;
use crate::effect_types::{FunctionEffect, ThrownType};
use crate::signatures::{has_signature, signature_parts};
use crate::state::CheckerState;

/// Result of choosing among a symbol's declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum OverloadChoice {
    /// Exactly one declaration applies.
    Selected(NodeIndex),
    /// No overload accepts the arguments; every candidate is possible.
    Ambiguous(SmallVec<[NodeIndex; 4]>),
    None,
}

impl<'a> CheckerState<'a> {
    /// Overload signatures are the bodiless declarations next to an
    /// implementation; the implementation signature is not callable.
    fn overload_candidates(&self, sym: SymbolId) -> SmallVec<[NodeIndex; 4]> {
        let arena = self.ctx.arena;
        let Some(symbol) = self.ctx.binder.get_symbol(sym) else {
            return SmallVec::new();
        };
        let declarations: SmallVec<[NodeIndex; 4]> = symbol
            .declarations
            .iter()
            .copied()
            .filter(|&d| arena.kind_of(d).is_some_and(has_signature))
            .collect();
        let signatures: SmallVec<[NodeIndex; 4]> = declarations
            .iter()
            .copied()
            .filter(|&d| signature_parts(arena, d).is_some_and(|p| !p.has_body()))
            .collect();
        if signatures.is_empty() {
            declarations
        } else {
            signatures
        }
    }

    pub(crate) fn choose_overload(&mut self, sym: SymbolId, call: NodeIndex) -> OverloadChoice {
        let candidates = self.overload_candidates(sym);
        match candidates.len() {
            0 => return OverloadChoice::None,
            1 => return OverloadChoice::Selected(candidates[0]),
            _ => {}
        }

        let arena = self.ctx.arena;
        let arguments: Vec<NodeIndex> = arena
            .get(call)
            .and_then(|n| arena.get_call_expr(n))
            .and_then(|c| c.arguments.as_ref())
            .map(|list| list.iter().collect())
            .unwrap_or_default();
        let argument_types: Vec<TypeId> = arguments
            .iter()
            .map(|&arg| self.get_type_of_expression(arg))
            .collect();

        for &candidate in &candidates {
            if self.signature_accepts(candidate, &argument_types) {
                trace!(call = call.0, overload = candidate.0, "overload selected");
                return OverloadChoice::Selected(candidate);
            }
        }
        trace!(call = call.0, "no overload matches; using all candidates");
        OverloadChoice::Ambiguous(candidates)
    }

    fn signature_accepts(&mut self, decl: NodeIndex, argument_types: &[TypeId]) -> bool {
        let types = self.ctx.types;
        let signature = self.function_type_of_signature(decl);
        let Some(TypeKey::Function(shape)) = types.lookup(signature) else {
            return false;
        };
        if argument_types.len() < shape.min_arity() {
            return false;
        }
        if shape
            .max_arity()
            .is_some_and(|max| argument_types.len() > max)
        {
            return false;
        }
        argument_types.iter().enumerate().all(|(i, &arg)| {
            let Some(param) = shape.params.get(i).or_else(|| shape.params.last()) else {
                return false;
            };
            let param_type = if param.rest {
                match types.lookup(param.type_id) {
                    Some(TypeKey::Array(element)) => element,
                    _ => TypeId::ANY,
                }
            } else {
                param.type_id
            };
            is_assignable_to(types, arg, param_type)
        })
    }

    /// Declaration a call binds to, for return types.
    pub(crate) fn select_declaration(&mut self, sym: SymbolId, call: NodeIndex) -> Option<NodeIndex> {
        match self.choose_overload(sym, call) {
            OverloadChoice::Selected(decl) => Some(decl),
            OverloadChoice::Ambiguous(candidates) => candidates.first().copied(),
            OverloadChoice::None => None,
        }
    }

    /// What callers of one declaration see. An overload signature without
    /// clauses contributes nothing even when the implementation throws.
    fn effect_of_selected(&mut self, decl: NodeIndex) -> FunctionEffect {
        self.get_effect_of_declaration(decl)
            .unwrap_or(FunctionEffect::NONE)
    }

    /// Effect of invoking `target` from the call (or `new`) expression `call`.
    /// Promise combinators are handled by the promise mapper, which needs
    /// the arguments' own effects.
    pub(crate) fn effect_of_call_target(&mut self, target: CallTarget, call: NodeIndex) -> FunctionEffect {
        let types = self.ctx.types;
        match target {
            CallTarget::Declarations(sym) => match self.choose_overload(sym, call) {
                OverloadChoice::Selected(decl) => self.effect_of_selected(decl),
                OverloadChoice::Ambiguous(candidates) => {
                    let mut effect = FunctionEffect::NONE;
                    for decl in candidates {
                        let candidate = self.effect_of_selected(decl);
                        effect = effect.union(candidate, types);
                    }
                    effect
                }
                OverloadChoice::None => FunctionEffect::NONE,
            },
            CallTarget::Signature(sig) => match types.lookup(sig) {
                Some(TypeKey::Function(shape)) => FunctionEffect {
                    throws: shape.throws.map_or(ThrownType::NONE, ThrownType),
                    rejects: shape.rejects.map_or(ThrownType::NONE, ThrownType),
                },
                _ => FunctionEffect::NONE,
            },
            CallTarget::FunctionLike(decl) => self.effect_of_selected(decl),
            CallTarget::Native(native) => native.to_effect(types),
            CallTarget::PromiseAll | CallTarget::PromiseReject | CallTarget::Unknown => {
                FunctionEffect::NONE
            }
        }
    }
}
