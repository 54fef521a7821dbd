//! Type nodes to solver types.
//!
//! Classes and interfaces become nominal definitions, one per binder symbol.
//! A definition is registered before its `extends` target is resolved so a
//! cyclic hierarchy terminates. Names the binder cannot resolve fall back to
//! the library types the solver knows (`Promise`, `Array`, the error
//! classes); anything else becomes the error type, which is assignable both
//! ways and so never produces follow-on diagnostics.

use esc_binder::{SymbolId, symbol_flags};
use esc_parser::NodeIndex;
use esc_parser::syntax_kind_ext::*;
use esc_scanner::SyntaxKind;
use esc_solver::{DefKind, FunctionShape, ParamInfo, PropertyInfo, TypeId};
use tracing::trace;

use crate::effect_types::DeclaredEffect;
use crate::signatures::signature_parts;
use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// Resolve a type annotation. NONE resolves to `any`.
    pub fn get_type_from_type_node(&mut self, idx: NodeIndex) -> TypeId {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || self.get_type_from_type_node_inner(idx))
    }

    fn get_type_from_type_node_inner(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(node) = arena.get(idx) else {
            return TypeId::ANY;
        };
        if let Some(kind) = SyntaxKind::try_from_u16(node.kind) {
            return match kind {
                SyntaxKind::AnyKeyword => TypeId::ANY,
                SyntaxKind::UnknownKeyword => TypeId::UNKNOWN,
                SyntaxKind::NumberKeyword => TypeId::NUMBER,
                SyntaxKind::StringKeyword => TypeId::STRING,
                SyntaxKind::BooleanKeyword => TypeId::BOOLEAN,
                SyntaxKind::BigIntKeyword => TypeId::BIGINT,
                SyntaxKind::SymbolKeyword => TypeId::SYMBOL,
                SyntaxKind::ObjectKeyword => TypeId::OBJECT,
                SyntaxKind::NeverKeyword => TypeId::NEVER,
                SyntaxKind::UndefinedKeyword => TypeId::UNDEFINED,
                SyntaxKind::VoidKeyword => TypeId::VOID,
                SyntaxKind::NullKeyword => TypeId::NULL,
                SyntaxKind::ThisKeyword => self.this_type_at(idx),
                _ => TypeId::ERROR,
            };
        }

        match node.kind {
            TYPE_REFERENCE => self.get_type_from_type_reference(idx),
            LITERAL_TYPE => arena
                .get_literal_type(node)
                .map_or(TypeId::ERROR, |lit| self.literal_type_of(lit.literal)),
            UNION_TYPE | INTERSECTION_TYPE => {
                let Some(composite) = arena.get_composite_type(node) else {
                    return TypeId::ERROR;
                };
                let members: Vec<TypeId> = composite
                    .types
                    .iter()
                    .map(|t| self.get_type_from_type_node(t))
                    .collect();
                if node.kind == UNION_TYPE {
                    types.union(members)
                } else {
                    types.intersection(members)
                }
            }
            PARENTHESIZED_TYPE | OPTIONAL_TYPE | REST_TYPE => arena
                .get_wrapped_type(node)
                .map_or(TypeId::ERROR, |w| self.get_type_from_type_node(w.type_node)),
            ARRAY_TYPE => {
                let element = arena
                    .get_array_type(node)
                    .map_or(NodeIndex::NONE, |a| a.element_type);
                let element = self.get_type_from_type_node(element);
                types.array(element)
            }
            TUPLE_TYPE => {
                let Some(tuple) = arena.get_tuple_type(node) else {
                    return TypeId::ERROR;
                };
                let elements = tuple
                    .elements
                    .iter()
                    .map(|e| self.get_type_from_type_node(e))
                    .collect();
                types.tuple(elements)
            }
            FUNCTION_TYPE | CONSTRUCTOR_TYPE => self.function_type_of_signature(idx),
            TYPE_LITERAL => self.get_type_from_type_literal(idx),
            TYPE_OPERATOR => {
                let Some(op) = arena.get_type_operator(node) else {
                    return TypeId::ERROR;
                };
                if op.operator == SyntaxKind::KeyOfKeyword as u16 {
                    types.union(vec![TypeId::STRING, TypeId::NUMBER, TypeId::SYMBOL])
                } else if op.operator == SyntaxKind::UniqueKeyword as u16 {
                    TypeId::SYMBOL
                } else {
                    self.get_type_from_type_node(op.type_node)
                }
            }
            TYPE_QUERY => {
                let Some(query) = arena.get_type_query(node) else {
                    return TypeId::ERROR;
                };
                match self.ctx.binder.resolve_identifier(arena, query.expr_name) {
                    Some(sym) => self.get_type_of_symbol(sym),
                    None => TypeId::ERROR,
                }
            }
            TYPE_PREDICATE => TypeId::BOOLEAN,
            INDEXED_ACCESS_TYPE => TypeId::ANY,
            _ => TypeId::ERROR,
        }
    }

    fn get_type_from_type_reference(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(type_ref) = arena.get(idx).and_then(|n| arena.get_type_ref(n)) else {
            return TypeId::ERROR;
        };
        let Some(name) = arena.identifier_text(type_ref.type_name) else {
            // Qualified names: no namespaces to look into.
            return TypeId::ANY;
        };
        let args: Vec<TypeId> = type_ref
            .type_arguments
            .as_ref()
            .map(|list| {
                list.iter()
                    .map(|a| self.get_type_from_type_node(a))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sym) = self.ctx.binder.resolve_type_name(arena, idx, name) {
            return self.get_declared_type_of_type_symbol(sym);
        }

        match name {
            "Promise" | "PromiseLike" => {
                types.promise(args.first().copied().unwrap_or(TypeId::UNKNOWN))
            }
            "Array" | "ReadonlyArray" => types.array(args.first().copied().unwrap_or(TypeId::ANY)),
            _ => types.builtin_type(name).unwrap_or(TypeId::ERROR),
        }
    }

    /// The type a class, interface, alias or type parameter symbol denotes.
    pub(crate) fn get_declared_type_of_type_symbol(&mut self, sym: SymbolId) -> TypeId {
        let binder = self.ctx.binder;
        let Some(symbol) = binder.get_symbol(sym) else {
            return TypeId::ERROR;
        };
        if symbol.has_flags(symbol_flags::CLASS | symbol_flags::INTERFACE) {
            return self.class_instance_type(sym);
        }
        if symbol.has_flags(symbol_flags::TYPE_PARAMETER) {
            return self.ctx.types.type_param(&symbol.escaped_name);
        }
        if symbol.has_flags(symbol_flags::TYPE_ALIAS) {
            return self.get_type_of_alias(sym);
        }
        TypeId::ERROR
    }

    fn get_type_of_alias(&mut self, sym: SymbolId) -> TypeId {
        let arena = self.ctx.arena;
        let Some(decl) = self.ctx.binder.get_symbol(sym).and_then(|s| {
            s.declarations
                .iter()
                .copied()
                .find(|&d| arena.kind_of(d) == Some(TYPE_ALIAS_DECLARATION))
        }) else {
            return TypeId::ERROR;
        };
        if !self.ctx.alias_resolution_set.insert(sym) {
            trace!(sym = sym.0, "circular type alias");
            return TypeId::ERROR;
        }
        let type_node = arena
            .get(decl)
            .and_then(|n| arena.get_type_alias(n))
            .map_or(NodeIndex::NONE, |a| a.type_node);
        let result = self.get_type_from_type_node(type_node);
        self.ctx.alias_resolution_set.remove(&sym);
        result
    }

    /// Nominal instance type of a class or interface symbol.
    pub(crate) fn class_instance_type(&mut self, sym: SymbolId) -> TypeId {
        let types = self.ctx.types;
        if let Some(&def) = self.ctx.class_defs.get(&sym) {
            return types.reference(def, Vec::new());
        }
        let Some(symbol) = self.ctx.binder.get_symbol(sym) else {
            return TypeId::ERROR;
        };
        let kind = if symbol.has_flags(symbol_flags::CLASS) {
            DefKind::Class
        } else {
            DefKind::Interface
        };
        let def = types.define(&symbol.escaped_name, kind, None, Some(sym.0));
        self.ctx.class_defs.insert(sym, def);
        let base = self.heritage_base_type(sym);
        types.set_def_base(def, base);
        types.reference(def, Vec::new())
    }

    /// The first `extends` target of a class or interface, resolving library
    /// classes (`extends Error`) the binder does not know.
    fn heritage_base_type(&mut self, sym: SymbolId) -> Option<TypeId> {
        let arena = self.ctx.arena;
        let binder = self.ctx.binder;
        let declarations = binder.get_symbol(sym)?.declarations.clone();
        for decl in declarations {
            let Some(node) = arena.get(decl) else {
                continue;
            };
            let heritage = match node.kind {
                CLASS_DECLARATION | CLASS_EXPRESSION => {
                    arena.get_class(node).and_then(|c| c.heritage_clauses.as_ref())
                }
                INTERFACE_DECLARATION => arena
                    .get_interface(node)
                    .and_then(|i| i.heritage_clauses.as_ref()),
                _ => None,
            };
            let Some(heritage) = heritage else {
                continue;
            };
            for clause in heritage.iter() {
                let Some(clause) = arena.get(clause).and_then(|n| arena.get_heritage_clause(n))
                else {
                    continue;
                };
                if clause.token != SyntaxKind::ExtendsKeyword as u16 {
                    continue;
                }
                for ty in clause.types.iter() {
                    let Some(expr) = arena
                        .get(ty)
                        .and_then(|n| arena.get_expr_type_args(n))
                        .map(|e| e.expression)
                    else {
                        continue;
                    };
                    let Some(name) = arena.identifier_text(expr) else {
                        continue;
                    };
                    if let Some(base) = binder.resolve_type_name(arena, decl, name) {
                        if base == sym {
                            continue;
                        }
                        return Some(self.get_declared_type_of_type_symbol(base));
                    }
                    if let Some(builtin) = self.ctx.types.builtin_type(name) {
                        return Some(builtin);
                    }
                }
            }
        }
        None
    }

    /// `this` inside a class body is the class instance type.
    pub(crate) fn this_type_at(&mut self, idx: NodeIndex) -> TypeId {
        match self.enclosing_class_symbol(idx) {
            Some(sym) => self.class_instance_type(sym),
            None => TypeId::ANY,
        }
    }

    pub(crate) fn enclosing_class_symbol(&self, idx: NodeIndex) -> Option<SymbolId> {
        let arena = self.ctx.arena;
        let mut current = arena.parent_of(idx);
        while current.is_some() {
            match arena.kind_of(current) {
                Some(CLASS_DECLARATION | CLASS_EXPRESSION | INTERFACE_DECLARATION) => {
                    return self.ctx.binder.get_node_symbol(current);
                }
                // Arrow functions keep the outer `this`; other functions do not.
                Some(FUNCTION_DECLARATION | FUNCTION_EXPRESSION) => return None,
                _ => {}
            }
            current = arena.parent_of(current);
        }
        None
    }

    fn get_type_from_type_literal(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(literal) = arena.get(idx).and_then(|n| arena.get_type_literal(n)) else {
            return TypeId::ERROR;
        };
        let mut properties = Vec::new();
        let mut call_signature = None;
        for member in literal.members.iter() {
            let Some(member_node) = arena.get(member) else {
                continue;
            };
            match member_node.kind {
                PROPERTY_SIGNATURE | METHOD_SIGNATURE => {
                    let Some(sig) = arena.get_signature(member_node) else {
                        continue;
                    };
                    let Some(name) = arena.property_name_text(sig.name) else {
                        continue;
                    };
                    let type_id = if member_node.kind == METHOD_SIGNATURE {
                        self.function_type_of_signature(member)
                    } else {
                        self.get_type_from_type_node(sig.type_annotation)
                    };
                    let mut prop = PropertyInfo::new(types.intern_string(name), type_id);
                    prop.optional = sig.question_token;
                    properties.push(prop);
                }
                CALL_SIGNATURE => {
                    call_signature.get_or_insert(member);
                }
                _ => {}
            }
        }
        match call_signature {
            Some(sig) if properties.is_empty() => self.function_type_of_signature(sig),
            _ => types.object(properties),
        }
    }

    /// Type of a literal node in type or expression position.
    pub(crate) fn literal_type_of(&self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(node) = arena.get(idx) else {
            return TypeId::ERROR;
        };
        match SyntaxKind::try_from_u16(node.kind) {
            Some(SyntaxKind::TrueKeyword) => TypeId::BOOLEAN_TRUE,
            Some(SyntaxKind::FalseKeyword) => TypeId::BOOLEAN_FALSE,
            Some(SyntaxKind::NullKeyword) => TypeId::NULL,
            Some(SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral) => arena
                .get_literal(node)
                .map_or(TypeId::STRING, |lit| types.literal_string(&lit.text)),
            Some(SyntaxKind::NumericLiteral) => arena
                .get_literal(node)
                .and_then(|lit| parse_numeric_literal(&lit.text))
                .map_or(TypeId::NUMBER, |value| types.literal_number(value)),
            Some(SyntaxKind::BigIntLiteral) => arena
                .get_literal(node)
                .map_or(TypeId::BIGINT, |lit| types.literal_bigint(&lit.text)),
            _ => TypeId::ERROR,
        }
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    /// The declared `throws`/`rejects` clauses of a function-like node.
    pub(crate) fn declared_effect_of(&mut self, decl: NodeIndex) -> DeclaredEffect {
        let Some(parts) = signature_parts(self.ctx.arena, decl) else {
            return DeclaredEffect::default();
        };
        let throws = parts
            .throws_clause
            .is_some()
            .then(|| self.get_type_from_type_node(parts.throws_clause));
        let rejects = parts
            .rejects_clause
            .is_some()
            .then(|| self.get_type_from_type_node(parts.rejects_clause));
        DeclaredEffect { throws, rejects }
    }

    /// Declared return type; an unannotated async function returns `Promise<any>`.
    pub(crate) fn declared_return_type(&mut self, decl: NodeIndex) -> TypeId {
        let Some(parts) = signature_parts(self.ctx.arena, decl) else {
            return TypeId::ANY;
        };
        if parts.is_constructor && parts.type_annotation.is_none() {
            return match self.enclosing_class_symbol(decl) {
                Some(sym) => self.class_instance_type(sym),
                None => TypeId::ANY,
            };
        }
        if parts.type_annotation.is_some() {
            self.get_type_from_type_node(parts.type_annotation)
        } else if parts.is_async {
            self.ctx.types.promise(TypeId::ANY)
        } else {
            TypeId::ANY
        }
    }

    /// Function type of any signature-bearing node, clauses included.
    pub(crate) fn function_type_of_signature(&mut self, decl: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(parts) = signature_parts(arena, decl) else {
            return TypeId::ERROR;
        };
        let mut params = Vec::new();
        if let Some(list) = parts.parameters {
            for param_idx in list.iter() {
                let Some(param) = arena.get(param_idx).and_then(|n| arena.get_parameter(n)) else {
                    continue;
                };
                if arena.kind_of(param.name) == Some(SyntaxKind::ThisKeyword as u16) {
                    continue;
                }
                let type_id = if param.type_annotation.is_some() {
                    self.get_type_from_type_node(param.type_annotation)
                } else {
                    TypeId::ANY
                };
                params.push(ParamInfo {
                    name: arena
                        .identifier_text(param.name)
                        .map(|n| types.intern_string(n)),
                    type_id,
                    optional: param.question_token || param.initializer.is_some(),
                    rest: param.dot_dot_dot_token,
                });
            }
        }
        let return_type = self.declared_return_type(decl);
        let declared = self.declared_effect_of(decl);
        types.function(FunctionShape {
            params,
            return_type,
            throws: declared.throws,
            rejects: declared.rejects,
            is_constructor: parts.is_constructor,
        })
    }
}

/// Numeric literal text (with `0x`/`0o`/`0b` prefixes, separators already
/// removed by the scanner) to its value.
pub(crate) fn parse_numeric_literal(text: &str) -> Option<f64> {
    let lower = text.to_ascii_lowercase();
    let radix = if lower.starts_with("0x") {
        16
    } else if lower.starts_with("0o") {
        8
    } else if lower.starts_with("0b") {
        2
    } else {
        return lower.parse::<f64>().ok();
    };
    u64::from_str_radix(&lower[2..], radix)
        .ok()
        .map(|v| v as f64)
}
