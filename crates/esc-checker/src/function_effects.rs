//! Function effects: inference from bodies, memoized per declaration.

use esc_parser::NodeIndex;
use esc_parser::syntax_kind_ext::BLOCK;
use esc_solver::{TypeFlags, type_flags};
use tracing::debug;

use crate::effect_cache::VisitState;
use crate::effect_types::{FunctionEffect, ThrownType};
use crate::signatures::{SignatureParts, signature_parts};
use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// The effect callers of `decl` observe: the declared clauses where
    /// present, the inferred effect elsewhere. `None` if `decl` has no
    /// signature.
    pub fn get_effect_of_declaration(&mut self, decl: NodeIndex) -> Option<FunctionEffect> {
        let parts = signature_parts(self.ctx.arena, decl)?;
        let declared = self.declared_effect_of(decl);
        let complete = self.declared_effect_is_complete(
            &parts,
            declared.throws.is_some(),
            declared.rejects.is_some(),
        );
        if !parts.has_body() || complete {
            return Some(declared.as_effect());
        }
        let inferred = self.inferred_effect_of(decl);
        Some(FunctionEffect {
            throws: declared.throws.map_or(inferred.throws, ThrownType),
            rejects: declared.rejects.map_or(inferred.rejects, ThrownType),
        })
    }

    /// Whether the clauses alone describe everything a caller can see, so
    /// the body need not be analyzed to answer the query.
    fn declared_effect_is_complete(
        &mut self,
        parts: &SignatureParts<'_>,
        has_throws: bool,
        has_rejects: bool,
    ) -> bool {
        if has_throws && has_rejects {
            return true;
        }
        if parts.is_async {
            return has_rejects;
        }
        if !has_throws {
            return false;
        }
        if parts.type_annotation.is_none() {
            return false;
        }
        let return_type = self.get_type_from_type_node(parts.type_annotation);
        !type_flags(self.ctx.types, return_type).contains(TypeFlags::PROMISE)
    }

    /// Effect inferred from the body of `decl`, ignoring its clauses.
    ///
    /// A query that reaches a declaration already being analyzed is a cycle
    /// and gets `unknown` in the position the function reports through.
    pub(crate) fn inferred_effect_of(&mut self, decl: NodeIndex) -> FunctionEffect {
        let Some(parts) = signature_parts(self.ctx.arena, decl) else {
            return FunctionEffect::NONE;
        };
        if !parts.has_body() {
            return self.declared_effect_of(decl).as_effect();
        }
        match self.ctx.effect_cache.state(decl) {
            VisitState::Done => {
                return self
                    .ctx
                    .effect_cache
                    .get_done(decl)
                    .unwrap_or(FunctionEffect::NONE);
            }
            VisitState::InProgress => {
                debug!(decl = decl.0, "recursive effect query");
                return FunctionEffect::unknown_for(parts.is_async);
            }
            VisitState::Unvisited => {}
        }

        self.ctx.effect_cache.mark_in_progress(decl);
        let (is_async, body) = (parts.is_async, parts.body);
        let mut returned_rejects = ThrownType::NONE;
        let body_throws = if self.ctx.arena.kind_of(body) == Some(BLOCK) {
            self.compose_block(body, &mut returned_rejects).throws
        } else {
            // Concise arrow body: the expression is the return value.
            let effect = self.get_effect_of_expression(body);
            returned_rejects = effect.rejects;
            effect.throws
        };

        let types = self.ctx.types;
        let inferred = if is_async {
            FunctionEffect::rejecting(body_throws.union(returned_rejects, types))
        } else {
            FunctionEffect {
                throws: body_throws,
                rejects: returned_rejects,
            }
        };
        self.ctx.effect_cache.mark_done(decl, inferred);
        debug!(
            decl = decl.0,
            throws = %inferred.throws.display(types),
            rejects = %inferred.rejects.display(types),
            "inferred function effect"
        );
        inferred
    }
}
