//! Error reporting (`error_*` for emission, `report_*` for higher-level wrappers).

use esc_common::diagnostics::{Diagnostic, diagnostic_codes, get_diagnostic_message};
use esc_parser::NodeIndex;
use esc_solver::{TypeFormatter, TypeId};
use tracing::trace;

use crate::effect_types::ThrownType;
use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// Span of a node as (start, end).
    pub(crate) fn get_node_span(&self, idx: NodeIndex) -> Option<(u32, u32)> {
        self.ctx.arena.get(idx).map(|node| (node.pos, node.end))
    }

    /// Emit a templated diagnostic at a node.
    pub(crate) fn error_at_node_msg(&mut self, idx: NodeIndex, code: u32, args: &[&str]) {
        let Some((start, end)) = self.get_node_span(idx) else {
            return;
        };
        self.error_at_position_msg(start, end.saturating_sub(start), code, args);
    }

    pub(crate) fn error_at_position_msg(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        let Some(message) = get_diagnostic_message(code) else {
            return;
        };
        trace!(code, start, "diagnostic");
        self.ctx.diagnostics.push(Diagnostic::from_message(
            self.ctx.file_name.clone(),
            start,
            length,
            message,
            args,
        ));
    }

    pub(crate) fn format_type(&self, id: TypeId) -> String {
        TypeFormatter::new(self.ctx.types).format(id)
    }

    // =========================================================================
    // Effect diagnostics
    // =========================================================================

    pub(crate) fn report_unhandled_throw(&mut self, call: NodeIndex, thrown: ThrownType) {
        let text = thrown.display(self.ctx.types);
        self.error_at_node_msg(call, diagnostic_codes::UNHANDLED_THROWN_TYPE, &[&text]);
    }

    pub(crate) fn report_unhandled_rejection(&mut self, call: NodeIndex, rejects: ThrownType) {
        let text = rejects.display(self.ctx.types);
        self.error_at_node_msg(
            call,
            diagnostic_codes::UNHANDLED_PROMISE_REJECTION_TYPE,
            &[&text],
        );
    }

    pub(crate) fn report_declared_effect_too_narrow(
        &mut self,
        anchor: NodeIndex,
        inferred: ThrownType,
        declared: TypeId,
        is_rejection: bool,
    ) {
        let inferred_text = inferred.display(self.ctx.types);
        let declared_text = self.format_type(declared);
        let code = if is_rejection {
            diagnostic_codes::INFERRED_REJECTION_TYPE_NOT_ASSIGNABLE_TO_DECLARED
        } else {
            diagnostic_codes::INFERRED_THROWN_TYPE_NOT_ASSIGNABLE_TO_DECLARED
        };
        self.error_at_node_msg(anchor, code, &[&inferred_text, &declared_text]);
    }

    pub(crate) fn report_unused_directive(&mut self, pos: u32, end: u32) {
        self.error_at_position_msg(
            pos,
            end.saturating_sub(pos),
            diagnostic_codes::UNUSED_EXPECT_EXCEPTION_DIRECTIVE,
            &[],
        );
    }

    // =========================================================================
    // Type diagnostics
    // =========================================================================

    pub(crate) fn report_type_not_assignable(&mut self, idx: NodeIndex, source: TypeId, target: TypeId) {
        let source_text = self.format_type(source);
        let target_text = self.format_type(target);
        self.error_at_node_msg(
            idx,
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            &[&source_text, &target_text],
        );
    }
}
