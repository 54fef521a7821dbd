//! What a call expression invokes.
//!
//! A callee resolves to declarations we can analyze (functions, methods,
//! constructors, inline function expressions), to a function type whose
//! clauses are all we know, to a library function from the native throw
//! map, or to nothing. Unresolvable callees contribute no effect.

use esc_binder::{SymbolId, symbol_flags};
use esc_parser::syntax_kind_ext::*;
use esc_parser::{NodeIndex, node_flags};
use esc_scanner::SyntaxKind;
use esc_solver::{TypeId, TypeKey};
use tracing::trace;

use crate::native_throw_map::{NativeEffect, lookup_native_call, lookup_native_construct};
use crate::state::CheckerState;

/// Aliases followed before giving up (`const g = f; const h = g;`).
const MAX_ALIAS_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CallTarget {
    /// A function, method or constructor symbol: overloads plus implementation.
    Declarations(SymbolId),
    /// A function-typed value; only its declared clauses are known.
    Signature(TypeId),
    /// A function expression, arrow or object literal method.
    FunctionLike(NodeIndex),
    Native(&'static NativeEffect),
    /// `Promise.all` / `Promise.race`: rejects with any element's rejection.
    PromiseAll,
    /// `Promise.reject(x)`.
    PromiseReject,
    Unknown,
}

impl<'a> CheckerState<'a> {
    /// Resolve the target of a call expression.
    pub(crate) fn resolve_call_target(&mut self, call: NodeIndex) -> CallTarget {
        let arena = self.ctx.arena;
        let Some(data) = arena.get(call).and_then(|n| arena.get_call_expr(n)) else {
            return CallTarget::Unknown;
        };
        let callee = arena.skip_outer_expressions(data.expression);
        if arena.kind_of(callee) == Some(SyntaxKind::SuperKeyword as u16) {
            return self.resolve_super_call(call);
        }
        let target = self.resolve_callee(callee, 0);
        trace!(call = call.0, ?target, "call target");
        target
    }

    /// Resolve the constructor invoked by a `new` expression.
    pub(crate) fn resolve_construct_target(&mut self, new_expr: NodeIndex) -> CallTarget {
        let arena = self.ctx.arena;
        let binder = self.ctx.binder;
        let Some(data) = arena.get(new_expr).and_then(|n| arena.get_call_expr(n)) else {
            return CallTarget::Unknown;
        };
        let callee = arena.skip_outer_expressions(data.expression);
        match binder.resolve_identifier(arena, callee) {
            Some(sym) if binder.get_symbol(sym).is_some_and(|s| s.has_flags(symbol_flags::CLASS)) => {
                self.constructor_target_of_class(sym)
            }
            Some(_) => CallTarget::Unknown,
            None => arena
                .identifier_text(callee)
                .and_then(lookup_native_construct)
                .map_or(CallTarget::Unknown, CallTarget::Native),
        }
    }

    /// The nearest constructor up the `extends` chain.
    fn constructor_target_of_class(&self, class_sym: SymbolId) -> CallTarget {
        let arena = self.ctx.arena;
        let binder = self.ctx.binder;
        if let Some(ctor) = binder.lookup_member(arena, class_sym, "__constructor", false) {
            return CallTarget::Declarations(ctor);
        }
        CallTarget::Unknown
    }

    fn resolve_super_call(&mut self, call: NodeIndex) -> CallTarget {
        let arena = self.ctx.arena;
        let binder = self.ctx.binder;
        let Some(class_sym) = self.enclosing_class_symbol(call) else {
            return CallTarget::Unknown;
        };
        for base in binder.get_base_symbols(arena, class_sym) {
            if let Some(ctor) = binder.lookup_member(arena, base, "__constructor", false) {
                return CallTarget::Declarations(ctor);
            }
        }
        CallTarget::Unknown
    }

    pub(crate) fn resolve_callee(&mut self, callee: NodeIndex, depth: usize) -> CallTarget {
        let arena = self.ctx.arena;
        if depth > MAX_ALIAS_DEPTH {
            return CallTarget::Unknown;
        }
        let callee = arena.skip_outer_expressions(callee);
        let Some(node) = arena.get(callee) else {
            return CallTarget::Unknown;
        };
        match node.kind {
            FUNCTION_EXPRESSION | ARROW_FUNCTION => CallTarget::FunctionLike(callee),
            PROPERTY_ACCESS_EXPRESSION => self.resolve_property_callee(callee),
            k if k == SyntaxKind::Identifier as u16 => self.resolve_identifier_callee(callee, depth),
            _ => CallTarget::Unknown,
        }
    }

    fn resolve_identifier_callee(&mut self, ident: NodeIndex, depth: usize) -> CallTarget {
        let arena = self.ctx.arena;
        let binder = self.ctx.binder;
        let Some(sym) = binder.resolve_identifier(arena, ident) else {
            return arena
                .identifier_text(ident)
                .and_then(lookup_native_call)
                .map_or(CallTarget::Unknown, CallTarget::Native);
        };
        let Some(symbol) = binder.get_symbol(sym) else {
            return CallTarget::Unknown;
        };
        if symbol.has_flags(symbol_flags::FUNCTION) {
            return CallTarget::Declarations(sym);
        }
        if !symbol.has_flags(symbol_flags::VARIABLE) {
            return CallTarget::Unknown;
        }

        let decl = symbol.value_declaration;
        let Some(decl_node) = arena.get(decl) else {
            return CallTarget::Unknown;
        };
        let (annotation, initializer) = match decl_node.kind {
            VARIABLE_DECLARATION => match arena.get_variable_declaration(decl_node) {
                Some(v) => (v.type_annotation, v.initializer),
                None => return CallTarget::Unknown,
            },
            PARAMETER => match arena.get_parameter(decl_node) {
                Some(p) => (p.type_annotation, NodeIndex::NONE),
                None => return CallTarget::Unknown,
            },
            _ => return CallTarget::Unknown,
        };
        if annotation.is_some() {
            let declared = self.get_type_from_type_node(annotation);
            return self.target_of_callable_type(declared);
        }
        // Only `const` bindings keep the function they were initialized with.
        let is_const = arena
            .get(arena.parent_of(decl))
            .is_some_and(|list| list.flags & node_flags::CONST != 0);
        if is_const && initializer.is_some() {
            return self.resolve_callee(initializer, depth + 1);
        }
        CallTarget::Unknown
    }

    fn resolve_property_callee(&mut self, access_idx: NodeIndex) -> CallTarget {
        let arena = self.ctx.arena;
        let binder = self.ctx.binder;
        let Some(access) = arena.get(access_idx).and_then(|n| arena.get_access_expr(n)) else {
            return CallTarget::Unknown;
        };
        let (receiver, name_idx) = (access.expression, access.name_or_argument);
        let Some(name) = arena.property_name_text(name_idx) else {
            return CallTarget::Unknown;
        };

        if let Some(class_sym) = self.class_symbol_of_expression(receiver) {
            return match binder.lookup_member(arena, class_sym, name, true) {
                Some(member) => self.target_of_member(member),
                None => CallTarget::Unknown,
            };
        }

        // Library namespaces: `JSON.parse`, `Promise.all`, `Object.defineProperty`.
        let receiver_inner = arena.skip_outer_expressions(receiver);
        if let Some(receiver_name) = arena.identifier_text(receiver_inner)
            && binder.resolve_identifier(arena, receiver_inner).is_none()
        {
            return match (receiver_name, name) {
                ("Promise", "all" | "race") => CallTarget::PromiseAll,
                ("Promise", "reject") => CallTarget::PromiseReject,
                _ => lookup_native_call(&format!("{receiver_name}.{name}"))
                    .map_or(CallTarget::Unknown, CallTarget::Native),
            };
        }

        if let Some(member) = self.object_literal_member(receiver_inner, name) {
            return CallTarget::FunctionLike(member);
        }

        let receiver_type = self.get_type_of_expression(receiver);
        if let Some(member) = self.instance_member_of_type(receiver_type, name) {
            return self.target_of_member(member);
        }
        if let Some(TypeKey::Object(properties)) = self.ctx.types.lookup(receiver_type) {
            let atom = self.ctx.types.intern_string(name);
            if let Some(prop) = properties.iter().find(|p| p.name == atom) {
                return self.target_of_callable_type(prop.type_id);
            }
        }
        CallTarget::Unknown
    }

    /// The function expression or method behind `obj.name` when `obj` is a
    /// `const` bound to an object literal.
    fn object_literal_member(&self, receiver: NodeIndex, name: &str) -> Option<NodeIndex> {
        let arena = self.ctx.arena;
        let sym = self.ctx.binder.resolve_identifier(arena, receiver)?;
        let decl = self.ctx.binder.get_symbol(sym)?.value_declaration;
        let decl_node = arena.get(decl)?;
        let is_const = arena
            .get(arena.parent_of(decl))
            .is_some_and(|list| list.flags & node_flags::CONST != 0);
        if !is_const {
            return None;
        }
        let initializer = arena.get_variable_declaration(decl_node)?.initializer;
        let initializer = arena.skip_outer_expressions(initializer);
        let literal = arena.get(initializer).and_then(|n| arena.get_literal_expr(n))?;
        if arena.kind_of(initializer) != Some(OBJECT_LITERAL_EXPRESSION) {
            return None;
        }
        // Last definition wins, as at runtime.
        literal.elements.iter().rev().find_map(|member| {
            let member_node = arena.get(member)?;
            match member_node.kind {
                METHOD_DECLARATION => {
                    let method = arena.get_method_decl(member_node)?;
                    (arena.property_name_text(method.name) == Some(name)).then_some(member)
                }
                PROPERTY_ASSIGNMENT => {
                    let prop = arena.get_property_assignment(member_node)?;
                    if arena.property_name_text(prop.name) != Some(name) {
                        return None;
                    }
                    let init = arena.skip_outer_expressions(prop.initializer);
                    matches!(arena.kind_of(init), Some(FUNCTION_EXPRESSION | ARROW_FUNCTION))
                        .then_some(init)
                }
                _ => None,
            }
        })
    }

    /// Call target for a class or interface member symbol.
    pub(crate) fn target_of_member(&mut self, member: SymbolId) -> CallTarget {
        let arena = self.ctx.arena;
        let Some(symbol) = self.ctx.binder.get_symbol(member) else {
            return CallTarget::Unknown;
        };
        if symbol.has_flags(symbol_flags::METHOD | symbol_flags::CONSTRUCTOR | symbol_flags::FUNCTION)
        {
            return CallTarget::Declarations(member);
        }
        if symbol.has_flags(symbol_flags::PROPERTY) {
            let decl = symbol.value_declaration;
            if let Some(prop) = arena.get(decl).and_then(|n| arena.get_property_decl(n)) {
                let init = arena.skip_outer_expressions(prop.initializer);
                if matches!(arena.kind_of(init), Some(FUNCTION_EXPRESSION | ARROW_FUNCTION)) {
                    return CallTarget::FunctionLike(init);
                }
            }
            let declared = self.get_type_of_symbol(member);
            return self.target_of_callable_type(declared);
        }
        CallTarget::Unknown
    }

    /// Calls through a value of type `callee_type`: a function type, or an
    /// interface with call signatures.
    fn target_of_callable_type(&mut self, callee_type: TypeId) -> CallTarget {
        match self.ctx.types.lookup(callee_type) {
            Some(TypeKey::Function(_)) => CallTarget::Signature(callee_type),
            Some(TypeKey::Ref { .. }) => self
                .instance_member_of_type(callee_type, "__call")
                .map_or(CallTarget::Unknown, CallTarget::Declarations),
            _ => CallTarget::Unknown,
        }
    }

    /// Return type of a call, through the same resolution the effect uses.
    pub(crate) fn get_return_type_of_call(&mut self, call: NodeIndex) -> TypeId {
        let types = self.ctx.types;
        match self.resolve_call_target(call) {
            CallTarget::Declarations(sym) => match self.select_declaration(sym, call) {
                Some(decl) => self.declared_return_type(decl),
                None => TypeId::ANY,
            },
            CallTarget::Signature(sig) => match types.lookup(sig) {
                Some(TypeKey::Function(shape)) => shape.return_type,
                _ => TypeId::ANY,
            },
            CallTarget::FunctionLike(decl) => self.declared_return_type(decl),
            CallTarget::PromiseAll | CallTarget::PromiseReject => types.promise(TypeId::ANY),
            CallTarget::Native(native) if !native.rejects.is_empty() => types.promise(TypeId::ANY),
            CallTarget::Native(_) | CallTarget::Unknown => TypeId::ANY,
        }
    }
}
