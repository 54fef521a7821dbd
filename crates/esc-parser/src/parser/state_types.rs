//! Parser state - type annotations, type parameters and effect clauses

use esc_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use esc_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::{
    ArrayTypeData, CompositeTypeData, FunctionTypeData, IndexedAccessTypeData, LiteralData,
    LiteralTypeData, QualifiedNameData, TupleTypeData, TypeAliasData, TypeLiteralData,
    TypeOperatorData, TypeParameterData, TypePredicateData, TypeQueryData, TypeRefData,
    WrappedTypeData,
};
use super::state::ParserState;
use super::syntax_kind_ext;

impl ParserState {
    // =========================================================================
    // Return types and effect clauses
    // =========================================================================

    /// Parse `<separator> ReturnType throws T rejects U`. Each part is optional
    /// when `separator` is `:`; function types require `=>` and a return type.
    /// The clauses may appear in either order. Returns
    /// `(return_type, throws_clause, rejects_clause)`.
    pub(crate) fn parse_return_type_and_effects(
        &mut self,
        separator: SyntaxKind,
    ) -> (NodeIndex, NodeIndex, NodeIndex) {
        let type_annotation = if separator == SyntaxKind::EqualsGreaterThanToken {
            self.parse_expected(separator);
            self.parse_return_type()
        } else if self.parse_optional(separator) {
            self.parse_return_type()
        } else {
            NodeIndex::NONE
        };

        let mut throws_clause = NodeIndex::NONE;
        let mut rejects_clause = NodeIndex::NONE;
        loop {
            if self.is_token(SyntaxKind::ThrowsKeyword)
                && throws_clause.is_none()
                && self.next_token_can_start_type()
            {
                self.next_token();
                throws_clause = self.parse_type();
            } else if self.is_token(SyntaxKind::RejectsKeyword)
                && rejects_clause.is_none()
                && self.next_token_can_start_type()
            {
                self.next_token();
                rejects_clause = self.parse_type();
            } else {
                break;
            }
        }
        (type_annotation, throws_clause, rejects_clause)
    }

    fn next_token_can_start_type(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_start_of_type()
        })
    }

    /// Return type position: a type or a `x is T` predicate.
    fn parse_return_type(&mut self) -> NodeIndex {
        let is_predicate = (self.token().is_identifier_like()
            || self.is_token(SyntaxKind::ThisKeyword))
            && self.next_token_is_on_same_line(|k| k == SyntaxKind::IsKeyword);
        if !is_predicate {
            return self.parse_type();
        }
        let pos = self.token_pos();
        let parameter_name = self.parse_identifier_name();
        self.next_token();
        let type_node = self.parse_type();
        self.arena.add_type_predicate(
            syntax_kind_ext::TYPE_PREDICATE,
            pos,
            self.prev_token_end,
            TypePredicateData {
                parameter_name,
                type_node,
            },
        )
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(crate) fn is_start_of_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::NewKeyword
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TypeOfKeyword => true,
            SyntaxKind::MinusToken => self.next_token_is(SyntaxKind::NumericLiteral),
            kind => kind.is_identifier_like(),
        }
    }

    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            let pos = self.token_pos();
            return self.arena.add_identifier(pos, pos, "");
        }
        let result = if self.is_start_of_function_type() {
            self.parse_function_type()
        } else {
            self.parse_union_type()
        };
        self.exit_recursion();
        result
    }

    fn is_start_of_function_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::OpenParenToken => self.look_ahead(|p| {
                p.skip_balanced_parens() && p.is_token(SyntaxKind::EqualsGreaterThanToken)
            }),
            _ => false,
        }
    }

    /// Skip from `(` past its matching `)`. Returns false at end of file.
    pub(crate) fn skip_balanced_parens(&mut self) -> bool {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::OpenParenToken => depth += 1,
                SyntaxKind::CloseParenToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return true;
                    }
                }
                SyntaxKind::EndOfFileToken => return false,
                _ => {}
            }
            self.next_token();
        }
    }

    fn parse_function_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let kind = if self.parse_optional(SyntaxKind::NewKeyword) {
            syntax_kind_ext::CONSTRUCTOR_TYPE
        } else {
            syntax_kind_ext::FUNCTION_TYPE
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let (type_annotation, throws_clause, rejects_clause) =
            self.parse_return_type_and_effects(SyntaxKind::EqualsGreaterThanToken);
        self.arena.add_function_type(
            kind,
            pos,
            self.prev_token_end,
            FunctionTypeData {
                type_parameters,
                parameters,
                type_annotation,
                throws_clause,
                rejects_clause,
            },
        )
    }

    fn parse_union_type(&mut self) -> NodeIndex {
        self.parse_composite_type(SyntaxKind::BarToken, syntax_kind_ext::UNION_TYPE, |p| {
            p.parse_intersection_type()
        })
    }

    fn parse_intersection_type(&mut self) -> NodeIndex {
        self.parse_composite_type(
            SyntaxKind::AmpersandToken,
            syntax_kind_ext::INTERSECTION_TYPE,
            |p| p.parse_type_operator_or_higher(),
        )
    }

    fn parse_composite_type(
        &mut self,
        separator: SyntaxKind,
        kind: u16,
        mut parse_constituent: impl FnMut(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let pos = self.token_pos();
        let has_leading = self.parse_optional(separator);
        let first = parse_constituent(self);
        if !self.is_token(separator) && !has_leading {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(separator) {
            types.push(parse_constituent(self));
        }
        if types.len() == 1 {
            return first;
        }
        let types = self.make_node_list(types, pos);
        self.arena.add_composite_type(
            kind,
            pos,
            self.prev_token_end,
            CompositeTypeData { types },
        )
    }

    fn parse_type_operator_or_higher(&mut self) -> NodeIndex {
        let operator = self.token();
        if matches!(
            operator,
            SyntaxKind::KeyOfKeyword | SyntaxKind::ReadonlyKeyword | SyntaxKind::UniqueKeyword
        ) {
            let pos = self.token_pos();
            self.next_token();
            let type_node = self.parse_type_operator_or_higher();
            return self.arena.add_type_operator(
                syntax_kind_ext::TYPE_OPERATOR,
                pos,
                self.prev_token_end,
                TypeOperatorData {
                    operator: operator as u16,
                    type_node,
                },
            );
        }
        self.parse_postfix_type()
    }

    /// `T[]` and `T[K]`.
    fn parse_postfix_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut type_node = self.parse_non_array_type();
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                type_node = self.arena.add_array_type(
                    syntax_kind_ext::ARRAY_TYPE,
                    pos,
                    self.prev_token_end,
                    ArrayTypeData {
                        element_type: type_node,
                    },
                );
            } else {
                let index_type = self.parse_type();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                type_node = self.arena.add_indexed_access_type(
                    syntax_kind_ext::INDEXED_ACCESS_TYPE,
                    pos,
                    self.prev_token_end,
                    IndexedAccessTypeData {
                        object_type: type_node,
                        index_type,
                    },
                );
            }
        }
        type_node
    }

    fn parse_non_array_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
                if !self.next_token_is(SyntaxKind::DotToken) =>
            {
                let kind = self.token();
                let end = self.token_end();
                self.next_token();
                self.arena.add_token(kind as u16, pos, end)
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let kind = self.token();
                let end = self.token_end();
                let text = self.token_value().to_string();
                self.next_token();
                let literal = self.arena.add_literal(kind as u16, pos, end, LiteralData { text });
                self.arena.add_literal_type(
                    syntax_kind_ext::LITERAL_TYPE,
                    pos,
                    end,
                    LiteralTypeData { literal },
                )
            }
            SyntaxKind::MinusToken if self.next_token_is(SyntaxKind::NumericLiteral) => {
                self.next_token();
                let end = self.token_end();
                let text = format!("-{}", self.token_value());
                self.next_token();
                let literal = self.arena.add_literal(
                    SyntaxKind::NumericLiteral as u16,
                    pos,
                    end,
                    LiteralData { text },
                );
                self.arena.add_literal_type(
                    syntax_kind_ext::LITERAL_TYPE,
                    pos,
                    end,
                    LiteralTypeData { literal },
                )
            }
            SyntaxKind::TypeOfKeyword => {
                self.next_token();
                let expr_name = self.parse_entity_name();
                self.arena.add_type_query(
                    syntax_kind_ext::TYPE_QUERY,
                    pos,
                    self.prev_token_end,
                    TypeQueryData { expr_name },
                )
            }
            SyntaxKind::OpenBraceToken => {
                let members = self.parse_type_members();
                self.arena.add_type_literal(
                    syntax_kind_ext::TYPE_LITERAL,
                    pos,
                    self.prev_token_end,
                    TypeLiteralData { members },
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_wrapped_type(
                    syntax_kind_ext::PARENTHESIZED_TYPE,
                    pos,
                    self.prev_token_end,
                    WrappedTypeData { type_node },
                )
            }
            kind if kind.is_identifier_like() || kind == SyntaxKind::ThisKeyword => {
                self.parse_type_reference()
            }
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::TYPE_EXPECTED,
                    diagnostic_codes::TYPE_EXPECTED,
                );
                let type_name = self.arena.add_identifier(pos, pos, "");
                self.arena.add_type_ref(
                    syntax_kind_ext::TYPE_REFERENCE,
                    pos,
                    pos,
                    TypeRefData {
                        type_name,
                        type_arguments: None,
                    },
                )
            }
        }
    }

    fn parse_type_reference(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let type_name = self.parse_entity_name();
        let type_arguments =
            if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                Some(self.parse_type_arguments())
            } else {
                None
            };
        self.arena.add_type_ref(
            syntax_kind_ext::TYPE_REFERENCE,
            pos,
            self.prev_token_end,
            TypeRefData {
                type_name,
                type_arguments,
            },
        )
    }

    /// `A` or `A.B.C`.
    pub(crate) fn parse_entity_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut entity = if self.is_token(SyntaxKind::ThisKeyword) {
            let end = self.token_end();
            self.next_token();
            self.arena.add_identifier(pos, end, "this")
        } else {
            self.parse_identifier()
        };
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name();
            entity = self.arena.add_qualified_name(
                syntax_kind_ext::QUALIFIED_NAME,
                pos,
                self.prev_token_end,
                QualifiedNameData {
                    left: entity,
                    right,
                },
            );
        }
        entity
    }

    /// `<A, B>` in type position.
    pub(crate) fn parse_type_arguments(&mut self) -> NodeList {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::LessThanToken);
        let mut args = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            args.push(self.parse_type());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        self.make_node_list(args, pos)
    }

    fn parse_tuple_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let elements_pos = self.token_pos();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_pos = self.token_pos();
            let is_rest = self.parse_optional(SyntaxKind::DotDotDotToken);
            // Labels (`name: T`, `name?: T`) carry no type information.
            let mut is_optional = false;
            if self.token().is_identifier_like()
                && self.look_ahead(|p| {
                    let next = p.next_token();
                    next == SyntaxKind::ColonToken
                        || (next == SyntaxKind::QuestionToken
                            && p.next_token() == SyntaxKind::ColonToken)
                })
            {
                self.next_token();
                is_optional = self.parse_optional(SyntaxKind::QuestionToken);
                self.parse_expected(SyntaxKind::ColonToken);
            }
            let mut element = self.parse_type();
            is_optional |= self.parse_optional(SyntaxKind::QuestionToken);
            if is_rest || is_optional {
                let kind = if is_rest {
                    syntax_kind_ext::REST_TYPE
                } else {
                    syntax_kind_ext::OPTIONAL_TYPE
                };
                element = self.arena.add_wrapped_type(
                    kind,
                    element_pos,
                    self.prev_token_end,
                    WrappedTypeData { type_node: element },
                );
            }
            elements.push(element);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let elements = self.make_node_list(elements, elements_pos);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_tuple_type(
            syntax_kind_ext::TUPLE_TYPE,
            pos,
            self.prev_token_end,
            TupleTypeData { elements },
        )
    }

    // =========================================================================
    // Type parameters and aliases
    // =========================================================================

    /// `<T extends C = D, ...>`; `None` when no `<` follows.
    pub(crate) fn parse_type_parameters(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        let pos = self.token_pos();
        self.next_token();
        let mut params = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let param_pos = self.token_pos();
            // `const T` type parameters.
            if self.is_token(SyntaxKind::ConstKeyword) {
                self.next_token();
            }
            let name = self.parse_identifier();
            let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            params.push(self.arena.add_type_parameter(
                syntax_kind_ext::TYPE_PARAMETER,
                param_pos,
                self.prev_token_end,
                TypeParameterData {
                    name,
                    constraint,
                    default,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        Some(self.make_node_list(params, pos))
    }

    pub(crate) fn parse_type_alias_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        self.arena.add_type_alias(
            syntax_kind_ext::TYPE_ALIAS_DECLARATION,
            pos,
            self.prev_token_end,
            TypeAliasData {
                modifiers,
                name,
                type_parameters,
                type_node,
            },
        )
    }
}
