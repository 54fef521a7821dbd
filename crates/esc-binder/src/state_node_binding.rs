//! Node dispatch for the binder walk.

use esc_parser::syntax_kind_ext::*;
use esc_parser::{NodeIndex, node::NodeArena};
use tracing::trace;

use crate::scopes::ContainerKind;
use crate::state::BinderState;

/// Type syntax never declares values, and parameters inside function types
/// must not leak into the enclosing scope.
const fn is_type_node(kind: u16) -> bool {
    (kind >= TYPE_PREDICATE && kind <= LITERAL_TYPE)
        || matches!(
            kind,
            PROPERTY_SIGNATURE | METHOD_SIGNATURE | CALL_SIGNATURE | CONSTRUCT_SIGNATURE
                | INDEX_SIGNATURE
        )
}

impl BinderState {
    pub(crate) fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            VARIABLE_STATEMENT => {
                if let Some(var) = arena.get_variable(node) {
                    let exported = arena.has_modifier(
                        &var.modifiers,
                        esc_scanner::SyntaxKind::ExportKeyword,
                    );
                    for list in var.declarations.iter() {
                        self.bind_variable_declaration_list(arena, list, exported);
                    }
                }
            }
            VARIABLE_DECLARATION_LIST => self.bind_variable_declaration_list(arena, idx, false),
            FUNCTION_DECLARATION => self.bind_function_declaration(arena, idx),
            FUNCTION_EXPRESSION | ARROW_FUNCTION | METHOD_DECLARATION | GET_ACCESSOR
            | SET_ACCESSOR | CONSTRUCTOR => {
                // Class members are bound through their class; methods and
                // accessors reaching here belong to object literals.
                if let Some(name) = Self::member_name_node(arena, idx)
                    && arena.kind_of(name) == Some(COMPUTED_PROPERTY_NAME)
                {
                    self.bind_node(arena, name);
                }
                self.bind_function_like(arena, idx);
            }
            CLASS_DECLARATION | CLASS_EXPRESSION => self.bind_class(arena, idx),
            INTERFACE_DECLARATION => self.bind_interface_declaration(arena, idx),
            TYPE_ALIAS_DECLARATION => self.bind_type_alias_declaration(arena, idx),
            BLOCK => {
                self.enter_scope(ContainerKind::Block, idx);
                self.bind_block_statements(arena, idx);
                self.exit_scope();
            }
            FOR_STATEMENT | FOR_IN_STATEMENT | FOR_OF_STATEMENT | SWITCH_STATEMENT => {
                trace!(kind = kind_name(node.kind), "entering block scope");
                self.enter_scope(ContainerKind::Block, idx);
                self.bind_children(arena, idx);
                self.exit_scope();
            }
            CATCH_CLAUSE => self.bind_catch_clause(arena, idx),
            kind if is_type_node(kind) => {}
            _ => self.bind_children(arena, idx),
        }
    }

    pub(crate) fn bind_children(&mut self, arena: &NodeArena, idx: NodeIndex) {
        for child in arena.get_children(idx) {
            self.bind_node(arena, child);
        }
    }

    /// Bind the statements of a block in the current scope.
    pub(crate) fn bind_block_statements(&mut self, arena: &NodeArena, block: NodeIndex) {
        let Some(data) = arena.get(block).and_then(|n| arena.get_block(n)) else {
            return;
        };
        for stmt in data.statements.iter() {
            self.bind_node(arena, stmt);
        }
    }

    pub(crate) fn member_name_node(arena: &NodeArena, idx: NodeIndex) -> Option<NodeIndex> {
        let node = arena.get(idx)?;
        match node.kind {
            METHOD_DECLARATION => arena.get_method_decl(node).map(|m| m.name),
            GET_ACCESSOR | SET_ACCESSOR => arena.get_accessor(node).map(|a| a.name),
            PROPERTY_DECLARATION => arena.get_property_decl(node).map(|p| p.name),
            PROPERTY_SIGNATURE | METHOD_SIGNATURE => arena.get_signature(node).map(|s| s.name),
            _ => None,
        }
    }
}
