//! Static types of expressions and value symbols.
//!
//! Only as much typing as the effect analysis consumes: thrown values,
//! overload arguments, receivers of method calls and annotated variable
//! initializers. Anything outside that falls back to `any`.

use esc_binder::{SymbolId, symbol_flags};
use esc_parser::syntax_kind_ext::*;
use esc_parser::{NodeIndex, node_flags};
use esc_scanner::SyntaxKind;
use esc_solver::{PropertyInfo, TypeId, TypeKey, widen_literal_type};
use tracing::trace;

use crate::signatures::signature_parts;
use crate::state::CheckerState;
use crate::type_resolution::parse_numeric_literal;

impl<'a> CheckerState<'a> {
    pub fn get_type_of_expression(&mut self, idx: NodeIndex) -> TypeId {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || self.get_type_of_expression_inner(idx))
    }

    fn get_type_of_expression_inner(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(node) = arena.get(idx) else {
            return TypeId::ANY;
        };

        if let Some(kind) = SyntaxKind::try_from_u16(node.kind) {
            return match kind {
                SyntaxKind::Identifier => self.get_type_of_identifier(idx),
                SyntaxKind::ThisKeyword => self.this_type_at(idx),
                SyntaxKind::SuperKeyword => {
                    let this_type = self.this_type_at(idx);
                    types.base_of(this_type).unwrap_or(TypeId::ANY)
                }
                SyntaxKind::RegularExpressionLiteral => TypeId::OBJECT,
                SyntaxKind::TemplateHead | SyntaxKind::TemplateMiddle | SyntaxKind::TemplateTail => {
                    TypeId::STRING
                }
                _ => self.literal_type_of(idx),
            };
        }

        match node.kind {
            PARENTHESIZED_EXPRESSION | NON_NULL_EXPRESSION | SATISFIES_EXPRESSION => {
                let inner = arena.skip_outer_expressions(idx);
                if inner == idx {
                    TypeId::ANY
                } else {
                    self.get_type_of_expression(inner)
                }
            }
            AS_EXPRESSION => {
                let type_node = arena
                    .get_type_assertion(node)
                    .map_or(NodeIndex::NONE, |a| a.type_node);
                self.get_type_from_type_node(type_node)
            }
            TEMPLATE_EXPRESSION | TYPE_OF_EXPRESSION => TypeId::STRING,
            VOID_EXPRESSION => TypeId::UNDEFINED,
            DELETE_EXPRESSION => TypeId::BOOLEAN,
            AWAIT_EXPRESSION => {
                let operand = arena
                    .get_unary_expr_ex(node)
                    .map_or(NodeIndex::NONE, |u| u.expression);
                let operand_type = self.get_type_of_expression(operand);
                types.promise_inner(operand_type).unwrap_or(operand_type)
            }
            PREFIX_UNARY_EXPRESSION => self.get_type_of_prefix_unary(idx),
            POSTFIX_UNARY_EXPRESSION => TypeId::NUMBER,
            BINARY_EXPRESSION => self.get_type_of_binary(idx),
            CONDITIONAL_EXPRESSION => {
                let Some(cond) = arena.get_conditional_expr(node) else {
                    return TypeId::ANY;
                };
                let (when_true, when_false) = (cond.when_true, cond.when_false);
                let a = self.get_type_of_expression(when_true);
                let b = self.get_type_of_expression(when_false);
                types.union2(a, b)
            }
            ARRAY_LITERAL_EXPRESSION => self.get_type_of_array_literal(idx),
            OBJECT_LITERAL_EXPRESSION => self.get_type_of_object_literal(idx),
            FUNCTION_EXPRESSION | ARROW_FUNCTION => self.function_type_of_signature(idx),
            CALL_EXPRESSION => self.get_return_type_of_call(idx),
            NEW_EXPRESSION => self.get_type_of_new_expression(idx),
            PROPERTY_ACCESS_EXPRESSION => self.get_type_of_property_access(idx),
            ELEMENT_ACCESS_EXPRESSION => {
                let Some(access) = arena.get_access_expr(node) else {
                    return TypeId::ANY;
                };
                let object_type = self.get_type_of_expression(access.expression);
                match types.lookup(object_type) {
                    Some(TypeKey::Array(element)) => element,
                    Some(TypeKey::Tuple(elements)) => {
                        let index = arena
                            .get(access.name_or_argument)
                            .and_then(|n| arena.get_literal(n))
                            .and_then(|lit| parse_numeric_literal(&lit.text));
                        match index {
                            Some(i) if i >= 0.0 && (i as usize) < elements.len() => {
                                elements[i as usize]
                            }
                            _ => types.union(elements),
                        }
                    }
                    _ => TypeId::ANY,
                }
            }
            _ => TypeId::ANY,
        }
    }

    fn get_type_of_identifier(&mut self, idx: NodeIndex) -> TypeId {
        if let Some(&narrowed) = self.ctx.narrowed_references.get(&idx.0) {
            return narrowed;
        }
        let arena = self.ctx.arena;
        match self.ctx.binder.resolve_identifier(arena, idx) {
            Some(sym) => self.get_type_of_symbol(sym),
            None => match arena.identifier_text(idx) {
                Some("undefined") => TypeId::UNDEFINED,
                Some("NaN" | "Infinity") => TypeId::NUMBER,
                _ => {
                    trace!(idx = idx.0, "unresolved identifier");
                    TypeId::ERROR
                }
            },
        }
    }

    fn get_type_of_prefix_unary(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(unary) = arena.get(idx).and_then(|n| arena.get_unary_expr(n)) else {
            return TypeId::ANY;
        };
        let (operator, operand) = (unary.operator, unary.operand);
        match SyntaxKind::try_from_u16(operator) {
            Some(SyntaxKind::ExclamationToken) => TypeId::BOOLEAN,
            Some(SyntaxKind::MinusToken) => {
                // `-1` keeps its literal type for overload matching.
                let literal = arena
                    .get(operand)
                    .filter(|n| n.kind == SyntaxKind::NumericLiteral as u16)
                    .and_then(|n| arena.get_literal(n))
                    .and_then(|lit| parse_numeric_literal(&lit.text));
                if let Some(value) = literal {
                    return types.literal_number(-value);
                }
                self.numeric_operand_type(operand)
            }
            Some(SyntaxKind::PlusToken) => TypeId::NUMBER,
            _ => self.numeric_operand_type(operand),
        }
    }

    fn numeric_operand_type(&mut self, operand: NodeIndex) -> TypeId {
        let operand_type = self.get_type_of_expression(operand);
        if widen_literal_type(self.ctx.types, operand_type) == TypeId::BIGINT {
            TypeId::BIGINT
        } else {
            TypeId::NUMBER
        }
    }

    fn get_type_of_binary(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(binary) = arena.get(idx).and_then(|n| arena.get_binary_expr(n)) else {
            return TypeId::ANY;
        };
        let (left, operator, right) = (binary.left, binary.operator_token, binary.right);
        let Some(op) = SyntaxKind::try_from_u16(operator) else {
            return TypeId::ANY;
        };
        match op {
            SyntaxKind::CommaToken | SyntaxKind::EqualsToken => self.get_type_of_expression(right),
            SyntaxKind::BarBarToken | SyntaxKind::QuestionQuestionToken => {
                let l = self.get_type_of_expression(left);
                let r = self.get_type_of_expression(right);
                types.union2(l, r)
            }
            SyntaxKind::AmpersandAmpersandToken => self.get_type_of_expression(right),
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken
            | SyntaxKind::InstanceOfKeyword
            | SyntaxKind::InKeyword => TypeId::BOOLEAN,
            SyntaxKind::PlusToken | SyntaxKind::PlusEqualsToken => {
                let l = widen_literal_type(types, self.get_type_of_expression(left));
                let r = widen_literal_type(types, self.get_type_of_expression(right));
                if l == TypeId::STRING || r == TypeId::STRING {
                    TypeId::STRING
                } else if l == TypeId::BIGINT && r == TypeId::BIGINT {
                    TypeId::BIGINT
                } else if l == TypeId::NUMBER && r == TypeId::NUMBER {
                    TypeId::NUMBER
                } else {
                    TypeId::ANY
                }
            }
            op if op.is_assignment_operator() => self.get_type_of_expression(right),
            _ => self.numeric_operand_type(left),
        }
    }

    fn get_type_of_array_literal(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(literal) = arena.get(idx).and_then(|n| arena.get_literal_expr(n)) else {
            return types.array(TypeId::ANY);
        };
        let mut elements = Vec::new();
        for element in literal.elements.iter() {
            let element_type = if arena.kind_of(element) == Some(SPREAD_ELEMENT) {
                let spread = arena
                    .get(element)
                    .and_then(|n| arena.get_unary_expr_ex(n))
                    .map_or(NodeIndex::NONE, |s| s.expression);
                match types.lookup(self.get_type_of_expression(spread)) {
                    Some(TypeKey::Array(inner)) => inner,
                    _ => TypeId::ANY,
                }
            } else if arena.kind_of(element) == Some(OMITTED_EXPRESSION) {
                TypeId::UNDEFINED
            } else {
                self.get_type_of_expression(element)
            };
            elements.push(widen_literal_type(types, element_type));
        }
        if elements.is_empty() {
            return types.array(TypeId::ANY);
        }
        types.array(types.union(elements))
    }

    fn get_type_of_object_literal(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(literal) = arena.get(idx).and_then(|n| arena.get_literal_expr(n)) else {
            return TypeId::OBJECT;
        };
        let mut properties: Vec<PropertyInfo> = Vec::new();
        for member in literal.elements.iter() {
            let Some(member_node) = arena.get(member) else {
                continue;
            };
            let (name, type_id) = match member_node.kind {
                PROPERTY_ASSIGNMENT => {
                    let Some(prop) = arena.get_property_assignment(member_node) else {
                        continue;
                    };
                    let Some(name) = arena.property_name_text(prop.name) else {
                        continue;
                    };
                    (name, self.get_type_of_expression(prop.initializer))
                }
                SHORTHAND_PROPERTY_ASSIGNMENT => {
                    let Some(prop) = arena.get_shorthand_property(member_node) else {
                        continue;
                    };
                    let Some(name) = arena.identifier_text(prop.name) else {
                        continue;
                    };
                    (name, self.get_type_of_expression(prop.name))
                }
                METHOD_DECLARATION | GET_ACCESSOR => {
                    let name_idx = signature_parts(arena, member).map_or(NodeIndex::NONE, |p| p.name);
                    let Some(name) = arena.property_name_text(name_idx) else {
                        continue;
                    };
                    let type_id = if member_node.kind == GET_ACCESSOR {
                        self.declared_return_type(member)
                    } else {
                        self.function_type_of_signature(member)
                    };
                    (name, type_id)
                }
                _ => continue,
            };
            let atom = types.intern_string(name);
            properties.retain(|p| p.name != atom);
            properties.push(PropertyInfo::new(atom, type_id));
        }
        types.object(properties)
    }

    fn get_type_of_new_expression(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(call) = arena.get(idx).and_then(|n| arena.get_call_expr(n)) else {
            return TypeId::ANY;
        };
        let callee = arena.skip_outer_expressions(call.expression);
        if let Some(sym) = self.ctx.binder.resolve_identifier(arena, callee)
            && self
                .ctx
                .binder
                .get_symbol(sym)
                .is_some_and(|s| s.has_flags(symbol_flags::CLASS))
        {
            return self.class_instance_type(sym);
        }
        match arena.identifier_text(callee) {
            Some("Promise") => types.promise(TypeId::ANY),
            Some("Array") => types.array(TypeId::ANY),
            Some(name) => types.builtin_type(name).unwrap_or(TypeId::OBJECT),
            None => TypeId::ANY,
        }
    }

    fn get_type_of_property_access(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(access) = arena.get(idx).and_then(|n| arena.get_access_expr(n)) else {
            return TypeId::ANY;
        };
        let (receiver, name_idx) = (access.expression, access.name_or_argument);
        let Some(name) = arena.property_name_text(name_idx) else {
            return TypeId::ANY;
        };

        // Static members.
        if let Some(class_sym) = self.class_symbol_of_expression(receiver)
            && let Some(member) = self
                .ctx
                .binder
                .lookup_member(arena, class_sym, name, true)
        {
            return self.get_type_of_symbol(member);
        }

        let receiver_type = self.get_type_of_expression(receiver);
        if let Some(member) = self.instance_member_of_type(receiver_type, name) {
            return self.get_type_of_symbol(member);
        }
        match types.lookup(receiver_type) {
            Some(TypeKey::Object(properties)) => {
                let atom = types.intern_string(name);
                properties
                    .iter()
                    .find(|p| p.name == atom)
                    .map_or(TypeId::ANY, |p| p.type_id)
            }
            Some(TypeKey::Array(_) | TypeKey::Tuple(_)) if name == "length" => TypeId::NUMBER,
            Some(TypeKey::Ref { .. })
                if matches!(name, "message" | "name" | "stack")
                    && esc_solver::type_flags(types, receiver_type)
                        .contains(esc_solver::TypeFlags::ERROR_LIKE) =>
            {
                TypeId::STRING
            }
            _ => TypeId::ANY,
        }
    }

    /// The class symbol an expression names, for static member access.
    pub(crate) fn class_symbol_of_expression(&self, expr: NodeIndex) -> Option<SymbolId> {
        let arena = self.ctx.arena;
        let expr = arena.skip_outer_expressions(expr);
        let sym = self.ctx.binder.resolve_identifier(arena, expr)?;
        self.ctx
            .binder
            .get_symbol(sym)
            .filter(|s| s.has_flags(symbol_flags::CLASS))
            .map(|_| sym)
    }

    /// Member of a user class or interface type, searching base classes.
    pub(crate) fn instance_member_of_type(&self, receiver: TypeId, name: &str) -> Option<SymbolId> {
        let types = self.ctx.types;
        let def = types.def_of(receiver)?;
        let origin = types.def_info(def)?.origin?;
        self.ctx
            .binder
            .lookup_member(self.ctx.arena, SymbolId(origin), name, false)
    }

    /// Declared type of a value symbol: variables, parameters, functions and members.
    pub fn get_type_of_symbol(&mut self, sym: SymbolId) -> TypeId {
        if let Some(&cached) = self.ctx.symbol_types.get(&sym) {
            return cached;
        }
        if !self.ctx.symbol_resolution_set.insert(sym) {
            trace!(sym = sym.0, "circular symbol type");
            return TypeId::ANY;
        }
        let result = self.compute_type_of_symbol(sym);
        self.ctx.symbol_resolution_set.remove(&sym);
        // Catch variables depend on the try block, which is memoized separately.
        if !self.is_catch_variable_symbol(sym) {
            self.ctx.symbol_types.insert(sym, result);
        }
        result
    }

    fn is_catch_variable_symbol(&self, sym: SymbolId) -> bool {
        let arena = self.ctx.arena;
        self.ctx.binder.get_symbol(sym).is_some_and(|s| {
            arena.kind_of(arena.parent_of(s.value_declaration)) == Some(CATCH_CLAUSE)
        })
    }

    fn compute_type_of_symbol(&mut self, sym: SymbolId) -> TypeId {
        let arena = self.ctx.arena;
        let types = self.ctx.types;
        let Some(symbol) = self.ctx.binder.get_symbol(sym) else {
            return TypeId::ERROR;
        };
        let flags = symbol.flags;
        let decl = if symbol.value_declaration.is_some() {
            symbol.value_declaration
        } else {
            symbol.declarations.first().copied().unwrap_or(NodeIndex::NONE)
        };
        let Some(decl_node) = arena.get(decl) else {
            return TypeId::ERROR;
        };

        if flags & (symbol_flags::FUNCTION | symbol_flags::METHOD) != 0 {
            return self.function_type_of_signature(decl);
        }
        if flags & symbol_flags::CLASS != 0 {
            return TypeId::ANY;
        }
        if flags & symbol_flags::GET_ACCESSOR != 0 {
            let getter = symbol
                .declarations
                .iter()
                .copied()
                .find(|&d| arena.kind_of(d) == Some(GET_ACCESSOR))
                .unwrap_or(decl);
            return self.declared_return_type(getter);
        }

        match decl_node.kind {
            VARIABLE_DECLARATION => {
                let parent = arena.parent_of(decl);
                if arena.kind_of(parent) == Some(CATCH_CLAUSE) {
                    return self.get_catch_variable_type(parent).unwrap_or(TypeId::UNKNOWN);
                }
                let Some(var) = arena.get_variable_declaration(decl_node) else {
                    return TypeId::ANY;
                };
                let (annotation, initializer) = (var.type_annotation, var.initializer);
                if annotation.is_some() {
                    return self.get_type_from_type_node(annotation);
                }
                if initializer.is_none() {
                    return TypeId::ANY;
                }
                let init_type = self.get_type_of_expression(initializer);
                let is_const = arena
                    .get(parent)
                    .is_some_and(|list| list.flags & node_flags::CONST != 0);
                if is_const {
                    init_type
                } else {
                    widen_literal_type(types, init_type)
                }
            }
            PARAMETER => {
                let Some(param) = arena.get_parameter(decl_node) else {
                    return TypeId::ANY;
                };
                let (annotation, initializer) = (param.type_annotation, param.initializer);
                if annotation.is_some() {
                    self.get_type_from_type_node(annotation)
                } else if initializer.is_some() {
                    let init_type = self.get_type_of_expression(initializer);
                    widen_literal_type(types, init_type)
                } else {
                    TypeId::ANY
                }
            }
            PROPERTY_DECLARATION => {
                let Some(prop) = arena.get_property_decl(decl_node) else {
                    return TypeId::ANY;
                };
                let (annotation, initializer) = (prop.type_annotation, prop.initializer);
                if annotation.is_some() {
                    self.get_type_from_type_node(annotation)
                } else if initializer.is_some() {
                    let init_type = self.get_type_of_expression(initializer);
                    widen_literal_type(types, init_type)
                } else {
                    TypeId::ANY
                }
            }
            PROPERTY_SIGNATURE => {
                let annotation = arena
                    .get_signature(decl_node)
                    .map_or(NodeIndex::NONE, |s| s.type_annotation);
                self.get_type_from_type_node(annotation)
            }
            _ => TypeId::ANY,
        }
    }
}
