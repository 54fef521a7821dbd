//! Initializer assignability for annotated variables (TS2322).
//!
//! Only primitive-to-primitive mismatches are reported; anything involving
//! object, function or `any`-like types is left alone. This runs whether
//! or not effect checking is enabled and is not affected by
//! `@ts-expect-exception`.

use esc_parser::NodeIndex;
use esc_parser::syntax_kind_ext::VARIABLE_DECLARATION;
use esc_solver::{TypeFlags, is_assignable_to, type_flags, widen_literal_type};

use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    pub(crate) fn check_variable_initializers(&mut self, root: NodeIndex) {
        let arena = self.ctx.arena;
        let mut stack = vec![root];
        let mut children = Vec::new();
        while let Some(idx) = stack.pop() {
            let Some(node) = arena.get(idx) else {
                continue;
            };
            if node.kind == VARIABLE_DECLARATION
                && let Some(decl) = arena.get_variable_declaration(node)
                && decl.type_annotation.is_some()
                && decl.initializer.is_some()
            {
                self.check_initializer(decl.name, decl.type_annotation, decl.initializer);
            }
            children.clear();
            arena.collect_children(idx, &mut children);
            stack.extend(children.iter().rev().copied());
        }
    }

    fn check_initializer(&mut self, name: NodeIndex, annotation: NodeIndex, initializer: NodeIndex) {
        let types = self.ctx.types;
        let target = self.get_type_from_type_node(annotation);
        let source = self.get_type_of_expression(initializer);
        if !is_purely_primitive(type_flags(types, target))
            || !is_purely_primitive(type_flags(types, source))
        {
            return;
        }
        if is_assignable_to(types, source, target) {
            return;
        }
        let shown = widen_literal_type(types, source);
        self.report_type_not_assignable(name, shown, target);
    }
}

fn is_purely_primitive(flags: TypeFlags) -> bool {
    flags.contains(TypeFlags::PRIMITIVE)
        && !flags.intersects(TypeFlags::OBJECT_LIKE | TypeFlags::ANY_OR_UNKNOWN | TypeFlags::CALLABLE)
}
