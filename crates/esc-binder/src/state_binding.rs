//! Declaration binding: variables, functions, classes, interfaces, type aliases.

use esc_parser::node::NodeArena;
use esc_parser::syntax_kind_ext::*;
use esc_parser::{NodeIndex, NodeList, node_flags};
use esc_scanner::SyntaxKind;
use tracing::debug;

use crate::scopes::ContainerKind;
use crate::state::{BinderState, MemberTable};
use crate::symbols::{SymbolId, symbol_flags};

/// Pieces of any function-like node the binder cares about.
struct FunctionParts<'a> {
    type_parameters: Option<&'a NodeList>,
    parameters: &'a NodeList,
    body: NodeIndex,
}

fn function_parts(arena: &NodeArena, idx: NodeIndex) -> Option<FunctionParts<'_>> {
    let node = arena.get(idx)?;
    if let Some(f) = arena.get_function(node) {
        return Some(FunctionParts {
            type_parameters: f.type_parameters.as_ref(),
            parameters: &f.parameters,
            body: f.body,
        });
    }
    if let Some(m) = arena.get_method_decl(node) {
        return Some(FunctionParts {
            type_parameters: m.type_parameters.as_ref(),
            parameters: &m.parameters,
            body: m.body,
        });
    }
    if let Some(c) = arena.get_constructor(node) {
        return Some(FunctionParts {
            type_parameters: c.type_parameters.as_ref(),
            parameters: &c.parameters,
            body: c.body,
        });
    }
    arena.get_accessor(node).map(|a| FunctionParts {
        type_parameters: None,
        parameters: &a.parameters,
        body: a.body,
    })
}

impl BinderState {
    // =========================================================================
    // Variables
    // =========================================================================

    pub(crate) fn bind_variable_declaration_list(
        &mut self,
        arena: &NodeArena,
        list_idx: NodeIndex,
        is_exported: bool,
    ) {
        let Some(list_node) = arena.get(list_idx) else {
            return;
        };
        let flags = if list_node.flags & node_flags::BLOCK_SCOPED != 0 {
            symbol_flags::BLOCK_SCOPED_VARIABLE
        } else {
            symbol_flags::FUNCTION_SCOPED_VARIABLE
        };
        let Some(list) = arena.get_variable(list_node) else {
            return;
        };
        for decl_idx in list.declarations.iter() {
            let Some(decl) = arena
                .get(decl_idx)
                .and_then(|n| arena.get_variable_declaration(n))
            else {
                continue;
            };
            self.bind_binding_name(arena, decl.name, decl_idx, flags, is_exported);
            self.bind_node(arena, decl.initializer);
        }
    }

    /// Declare every identifier in a binding name. `declaration` is the node
    /// the symbol points at: the variable declaration, parameter or binding
    /// element that introduces the name.
    pub(crate) fn bind_binding_name(
        &mut self,
        arena: &NodeArena,
        name: NodeIndex,
        declaration: NodeIndex,
        flags: u32,
        is_exported: bool,
    ) {
        let Some(name_node) = arena.get(name) else {
            return;
        };
        if let Some(ident) = arena.get_identifier(name_node) {
            self.declare_symbol(&ident.escaped_text, flags, declaration, is_exported);
            return;
        }
        let Some(pattern) = arena.get_binding_pattern(name_node) else {
            return;
        };
        for element_idx in pattern.elements.iter() {
            let Some(element) = arena
                .get(element_idx)
                .and_then(|n| arena.get_binding_element(n))
            else {
                continue;
            };
            if arena.kind_of(element.property_name) == Some(COMPUTED_PROPERTY_NAME) {
                self.bind_node(arena, element.property_name);
            }
            self.bind_binding_name(arena, element.name, element_idx, flags, is_exported);
            self.bind_node(arena, element.initializer);
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub(crate) fn bind_function_declaration(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(func) = arena.get(idx).and_then(|n| arena.get_function(n)) else {
            return;
        };
        if let Some(name) = arena.identifier_text(func.name) {
            let exported = arena.has_modifier(&func.modifiers, SyntaxKind::ExportKeyword);
            debug!(name, idx = idx.0, "binding function declaration");
            self.declare_symbol(name, symbol_flags::FUNCTION, idx, exported);
        }
        self.bind_function_like(arena, idx);
    }

    /// Open a function scope for `idx` and bind its type parameters,
    /// parameters and body.
    pub(crate) fn bind_function_like(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(parts) = function_parts(arena, idx) else {
            return;
        };
        self.enter_scope(ContainerKind::Function, idx);

        // A named function expression can refer to itself.
        if arena.kind_of(idx) == Some(FUNCTION_EXPRESSION)
            && let Some(name) = arena
                .get(idx)
                .and_then(|n| arena.get_function(n))
                .and_then(|f| arena.identifier_text(f.name))
        {
            self.declare_symbol(name, symbol_flags::FUNCTION, idx, false);
        }

        if let Some(type_params) = parts.type_parameters {
            self.bind_type_parameters(arena, type_params);
        }
        for param in parts.parameters.iter() {
            self.bind_parameter(arena, param);
        }
        if arena.kind_of(parts.body) == Some(BLOCK) {
            self.bind_block_statements(arena, parts.body);
        } else {
            self.bind_node(arena, parts.body);
        }
        self.exit_scope();
    }

    pub(crate) fn bind_parameter(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(param) = arena.get(idx).and_then(|n| arena.get_parameter(n)) else {
            return;
        };
        // `this` parameters only carry a type.
        if arena.kind_of(param.name) != Some(SyntaxKind::ThisKeyword as u16) {
            self.bind_binding_name(
                arena,
                param.name,
                idx,
                symbol_flags::FUNCTION_SCOPED_VARIABLE,
                false,
            );
        }
        self.bind_node(arena, param.initializer);
    }

    pub(crate) fn bind_type_parameters(&mut self, arena: &NodeArena, list: &NodeList) {
        for tp_idx in list.iter() {
            let Some(tp) = arena.get(tp_idx).and_then(|n| arena.get_type_parameter(n)) else {
                continue;
            };
            if let Some(name) = arena.identifier_text(tp.name) {
                self.declare_symbol(name, symbol_flags::TYPE_PARAMETER, tp_idx, false);
            }
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn bind_class(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        let Some(class) = arena.get_class(node) else {
            return;
        };
        let mut flags = symbol_flags::CLASS;
        if arena.has_modifier(&class.modifiers, SyntaxKind::AbstractKeyword) {
            flags |= symbol_flags::ABSTRACT;
        }
        let exported = arena.has_modifier(&class.modifiers, SyntaxKind::ExportKeyword);
        let name = arena.identifier_text(class.name);

        let class_sym = if node.kind == CLASS_DECLARATION {
            let sym = match name {
                Some(name) => self.declare_symbol(name, flags, idx, exported),
                None => self.declare_anonymous("default", flags, idx),
            };
            self.enter_scope(ContainerKind::Class, idx);
            sym
        } else {
            // A class expression's name is only visible inside the class.
            self.enter_scope(ContainerKind::Class, idx);
            match name {
                Some(name) => self.declare_symbol(name, flags, idx, false),
                None => self.declare_anonymous("__class", flags, idx),
            }
        };

        if let Some(type_params) = &class.type_parameters {
            self.bind_type_parameters(arena, type_params);
        }
        if let Some(heritage) = &class.heritage_clauses {
            for clause in heritage.iter() {
                self.bind_children(arena, clause);
            }
        }
        for member in class.members.iter() {
            self.bind_class_member(arena, class_sym, member);
        }
        self.exit_scope();
    }

    fn member_flags(arena: &NodeArena, modifiers: &Option<NodeList>, name: NodeIndex) -> u32 {
        let mut flags = 0;
        if arena.has_modifier(modifiers, SyntaxKind::StaticKeyword) {
            flags |= symbol_flags::STATIC;
        }
        if arena.has_modifier(modifiers, SyntaxKind::PrivateKeyword)
            || arena.kind_of(name) == Some(SyntaxKind::PrivateIdentifier as u16)
        {
            flags |= symbol_flags::PRIVATE;
        }
        if arena.has_modifier(modifiers, SyntaxKind::AbstractKeyword) {
            flags |= symbol_flags::ABSTRACT;
        }
        flags
    }

    const fn member_table(flags: u32) -> MemberTable {
        if flags & symbol_flags::STATIC != 0 {
            MemberTable::Static
        } else {
            MemberTable::Instance
        }
    }

    pub(crate) fn bind_class_member(&mut self, arena: &NodeArena, owner: SymbolId, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        match node.kind {
            PROPERTY_DECLARATION => {
                let Some(prop) = arena.get_property_decl(node) else {
                    return;
                };
                if arena.kind_of(prop.name) == Some(COMPUTED_PROPERTY_NAME) {
                    self.bind_node(arena, prop.name);
                }
                let flags = Self::member_flags(arena, &prop.modifiers, prop.name);
                if let Some(name) = arena.property_name_text(prop.name) {
                    self.declare_member(
                        owner,
                        Self::member_table(flags),
                        name,
                        symbol_flags::PROPERTY | flags,
                        idx,
                    );
                }
                // Initializers run with the instance as receiver.
                self.enter_scope(ContainerKind::Function, idx);
                self.bind_node(arena, prop.initializer);
                self.exit_scope();
            }
            METHOD_DECLARATION | GET_ACCESSOR | SET_ACCESSOR => {
                let (modifiers, name_idx, kind_flag) = match node.kind {
                    METHOD_DECLARATION => match arena.get_method_decl(node) {
                        Some(m) => (&m.modifiers, m.name, symbol_flags::METHOD),
                        None => return,
                    },
                    _ => match arena.get_accessor(node) {
                        Some(a) if node.kind == GET_ACCESSOR => {
                            (&a.modifiers, a.name, symbol_flags::GET_ACCESSOR)
                        }
                        Some(a) => (&a.modifiers, a.name, symbol_flags::SET_ACCESSOR),
                        None => return,
                    },
                };
                if arena.kind_of(name_idx) == Some(COMPUTED_PROPERTY_NAME) {
                    self.bind_node(arena, name_idx);
                }
                let flags = Self::member_flags(arena, modifiers, name_idx);
                if let Some(name) = arena.property_name_text(name_idx) {
                    self.declare_member(
                        owner,
                        Self::member_table(flags),
                        name,
                        kind_flag | flags,
                        idx,
                    );
                }
                self.bind_function_like(arena, idx);
            }
            CONSTRUCTOR => {
                let Some(ctor) = arena.get_constructor(node) else {
                    return;
                };
                self.declare_member(
                    owner,
                    MemberTable::Instance,
                    "__constructor",
                    symbol_flags::CONSTRUCTOR,
                    idx,
                );
                // Parameter properties become instance members.
                for param_idx in ctor.parameters.iter() {
                    let Some(param) = arena.get(param_idx).and_then(|n| arena.get_parameter(n))
                    else {
                        continue;
                    };
                    let is_property = param.modifiers.as_ref().is_some_and(|mods| {
                        mods.iter().any(|m| {
                            arena.kind_of(m).is_some_and(|k| {
                                k == SyntaxKind::PublicKeyword as u16
                                    || k == SyntaxKind::PrivateKeyword as u16
                                    || k == SyntaxKind::ProtectedKeyword as u16
                                    || k == SyntaxKind::ReadonlyKeyword as u16
                                    || k == SyntaxKind::OverrideKeyword as u16
                            })
                        })
                    });
                    if is_property && let Some(name) = arena.identifier_text(param.name) {
                        let flags = Self::member_flags(arena, &param.modifiers, param.name);
                        self.declare_member(
                            owner,
                            MemberTable::Instance,
                            name,
                            symbol_flags::PROPERTY | flags,
                            param_idx,
                        );
                    }
                }
                self.bind_function_like(arena, idx);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Interfaces and type aliases
    // =========================================================================

    pub(crate) fn bind_interface_declaration(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(iface) = arena.get(idx).and_then(|n| arena.get_interface(n)) else {
            return;
        };
        let Some(name) = arena.identifier_text(iface.name) else {
            return;
        };
        let exported = arena.has_modifier(&iface.modifiers, SyntaxKind::ExportKeyword);
        let iface_sym = self.declare_symbol(name, symbol_flags::INTERFACE, idx, exported);

        self.enter_scope(ContainerKind::Class, idx);
        if let Some(type_params) = &iface.type_parameters {
            self.bind_type_parameters(arena, type_params);
        }
        self.exit_scope();

        for member_idx in iface.members.iter() {
            let Some(member) = arena.get(member_idx) else {
                continue;
            };
            let Some(sig) = arena.get_signature(member) else {
                continue;
            };
            let (member_name, flags) = match member.kind {
                PROPERTY_SIGNATURE => (arena.property_name_text(sig.name), symbol_flags::PROPERTY),
                METHOD_SIGNATURE => (arena.property_name_text(sig.name), symbol_flags::METHOD),
                CALL_SIGNATURE => (Some("__call"), symbol_flags::METHOD),
                CONSTRUCT_SIGNATURE => (Some("__new"), symbol_flags::METHOD),
                _ => (None, 0),
            };
            if let Some(member_name) = member_name {
                self.declare_member(iface_sym, MemberTable::Instance, member_name, flags, member_idx);
            }
        }
    }

    pub(crate) fn bind_type_alias_declaration(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(alias) = arena.get(idx).and_then(|n| arena.get_type_alias(n)) else {
            return;
        };
        if let Some(name) = arena.identifier_text(alias.name) {
            let exported = arena.has_modifier(&alias.modifiers, SyntaxKind::ExportKeyword);
            self.declare_symbol(name, symbol_flags::TYPE_ALIAS, idx, exported);
        }
        if let Some(type_params) = &alias.type_parameters {
            self.enter_scope(ContainerKind::Class, idx);
            self.bind_type_parameters(arena, type_params);
            self.exit_scope();
        }
    }

    // =========================================================================
    // Statements with their own scope
    // =========================================================================

    pub(crate) fn bind_catch_clause(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(clause) = arena.get(idx).and_then(|n| arena.get_catch_clause(n)) else {
            return;
        };
        self.enter_scope(ContainerKind::Block, idx);
        if let Some(decl) = arena
            .get(clause.variable_declaration)
            .and_then(|n| arena.get_variable_declaration(n))
        {
            self.bind_binding_name(
                arena,
                decl.name,
                clause.variable_declaration,
                symbol_flags::BLOCK_SCOPED_VARIABLE,
                false,
            );
        }
        self.bind_node(arena, clause.block);
        self.exit_scope();
    }
}
