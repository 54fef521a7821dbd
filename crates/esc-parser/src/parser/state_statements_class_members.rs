//! Parser state - classes, interfaces and their members

use esc_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::flags::node_flags;
use super::node::{
    AccessExprData, AccessorData, ClassData, ConstructorData, ExprWithTypeArgsData, HeritageData,
    IndexSignatureData, InterfaceData, MethodDeclData, ParameterData, PropertyDeclData,
    SignatureData,
};
use super::state::{CONTEXT_FLAG_AMBIENT, CONTEXT_FLAG_ASYNC, ParserState};
use super::syntax_kind_ext;

impl ParserState {
    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn parse_class_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        let node = self.parse_class_like(pos, modifiers, syntax_kind_ext::CLASS_DECLARATION);
        if self.in_context(CONTEXT_FLAG_AMBIENT) {
            self.arena.add_flags(node, node_flags::AMBIENT);
        }
        node
    }

    pub(crate) fn parse_class_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_class_like(pos, None, syntax_kind_ext::CLASS_EXPRESSION)
    }

    fn parse_class_like(&mut self, pos: u32, modifiers: Option<NodeList>, kind: u16) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.token().is_identifier_like()
            && !self.is_token(SyntaxKind::ImplementsKeyword)
        {
            self.parse_identifier()
        } else {
            if kind == syntax_kind_ext::CLASS_DECLARATION
                && !self.arena.has_modifier(&modifiers, SyntaxKind::DefaultKeyword)
            {
                // Reports `Identifier expected.`
                self.parse_identifier();
            }
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_class_members();
        self.arena.add_class(
            kind,
            pos,
            self.prev_token_end,
            ClassData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    /// `extends A<T>` and `implements B, C` in any order.
    fn parse_heritage_clauses(&mut self) -> Option<NodeList> {
        let pos = self.token_pos();
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            let clause_pos = self.token_pos();
            let token = self.token();
            self.next_token();
            let types_pos = self.token_pos();
            let mut types = Vec::new();
            loop {
                types.push(self.parse_expression_with_type_arguments());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            let types = self.make_node_list(types, types_pos);
            clauses.push(self.arena.add_heritage(
                syntax_kind_ext::HERITAGE_CLAUSE,
                clause_pos,
                self.prev_token_end,
                HeritageData {
                    token: token as u16,
                    types,
                },
            ));
        }
        if clauses.is_empty() {
            None
        } else {
            Some(self.make_node_list(clauses, pos))
        }
    }

    /// `A.B<T>` in a heritage clause.
    fn parse_expression_with_type_arguments(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut expression = self.parse_identifier();
        while self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            expression = self.arena.add_access_expr(
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                pos,
                self.prev_token_end,
                AccessExprData {
                    expression,
                    name_or_argument: name,
                    question_dot_token: false,
                },
            );
        }
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_arguments())
        } else {
            None
        };
        self.arena.add_expr_with_type_args(
            syntax_kind_ext::EXPRESSION_WITH_TYPE_ARGUMENTS,
            pos,
            self.prev_token_end,
            ExprWithTypeArgsData {
                expression,
                type_arguments,
            },
        )
    }

    fn parse_class_members(&mut self) -> NodeList {
        let pos = self.token_pos();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return self.make_node_list(Vec::new(), pos);
        }
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let before = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == before {
                self.next_token();
            }
        }
        let list = self.make_node_list(members, pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        list
    }

    /// Modifier keywords that are followed, on the same line, by a member name.
    fn parse_member_modifiers(&mut self) -> Option<NodeList> {
        let pos = self.token_pos();
        let mut modifiers = Vec::new();
        while (self.token().is_modifier() || self.is_token(SyntaxKind::DeclareKeyword))
            && self.next_token_is_on_same_line(|k| {
                k.is_identifier_or_keyword()
                    || matches!(
                        k,
                        SyntaxKind::StringLiteral
                            | SyntaxKind::NumericLiteral
                            | SyntaxKind::OpenBracketToken
                            | SyntaxKind::PrivateIdentifier
                            | SyntaxKind::AsteriskToken
                    )
            })
        {
            let kind = self.token();
            let start = self.token_pos();
            let end = self.token_end();
            modifiers.push(self.arena.add_token(kind as u16, start, end));
            self.next_token();
        }
        if modifiers.is_empty() {
            None
        } else {
            Some(self.make_node_list(modifiers, pos))
        }
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let modifiers = self.parse_member_modifiers();

        if self.is_token(SyntaxKind::ConstructorKeyword)
            && self.next_token_is(SyntaxKind::OpenParenToken)
        {
            return self.parse_constructor(pos, modifiers);
        }

        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.next_token_is_property_name()
        {
            return self.parse_accessor_declaration(pos, modifiers);
        }

        if self.is_index_signature_start() {
            return self.parse_index_signature(pos, modifiers);
        }

        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if asterisk_token
            || matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            return self.parse_method_declaration(
                pos,
                modifiers,
                asterisk_token,
                name,
                question_token,
            );
        }

        let exclamation_token = !question_token && self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression_or_higher()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena.add_property_decl(
            syntax_kind_ext::PROPERTY_DECLARATION,
            pos,
            self.prev_token_end,
            PropertyDeclData {
                modifiers,
                name,
                question_token,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    fn parse_constructor(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.next_token();
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let (_, throws_clause, _) = self.parse_return_type_and_effects(SyntaxKind::ColonToken);
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_block(false, false)
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        };
        self.arena.add_constructor(
            syntax_kind_ext::CONSTRUCTOR,
            pos,
            self.prev_token_end,
            ConstructorData {
                modifiers,
                type_parameters,
                parameters,
                throws_clause,
                body,
            },
        )
    }

    /// Method in a class or object literal; the name is already parsed.
    pub(crate) fn parse_method_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
        asterisk_token: bool,
        name: NodeIndex,
        question_token: bool,
    ) -> NodeIndex {
        let is_async = self.arena.has_modifier(&modifiers, SyntaxKind::AsyncKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.with_context(
            if is_async { CONTEXT_FLAG_ASYNC } else { 0 },
            CONTEXT_FLAG_ASYNC,
            |p| p.parse_parameters(),
        );
        let (type_annotation, throws_clause, rejects_clause) =
            self.parse_return_type_and_effects(SyntaxKind::ColonToken);
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_block(is_async, asterisk_token)
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        };
        self.arena.add_method_decl(
            syntax_kind_ext::METHOD_DECLARATION,
            pos,
            self.prev_token_end,
            MethodDeclData {
                modifiers,
                asterisk_token,
                name,
                question_token,
                type_parameters,
                parameters,
                type_annotation,
                throws_clause,
                rejects_clause,
                body,
            },
        )
    }

    /// `get name(): T {}` / `set name(v) {}`; the current token is `get`/`set`.
    pub(crate) fn parse_accessor_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        let kind = if self.is_token(SyntaxKind::GetKeyword) {
            syntax_kind_ext::GET_ACCESSOR
        } else {
            syntax_kind_ext::SET_ACCESSOR
        };
        self.next_token();
        let name = self.parse_property_name();
        let parameters = self.parse_parameters();
        let (type_annotation, throws_clause, _) =
            self.parse_return_type_and_effects(SyntaxKind::ColonToken);
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_block(false, false)
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        };
        self.arena.add_accessor(
            kind,
            pos,
            self.prev_token_end,
            AccessorData {
                modifiers,
                name,
                parameters,
                type_annotation,
                throws_clause,
                body,
            },
        )
    }

    /// `[key: string]: T`
    fn is_index_signature_start(&mut self) -> bool {
        self.is_token(SyntaxKind::OpenBracketToken)
            && self.look_ahead(|p| {
                p.next_token().is_identifier_like() && p.next_token() == SyntaxKind::ColonToken
            })
    }

    fn parse_index_signature(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        let params_pos = self.token_pos();
        self.next_token();
        let param_pos = self.token_pos();
        let name = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let param_type = self.parse_type();
        let parameter = self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            param_pos,
            self.prev_token_end,
            ParameterData {
                modifiers: None,
                dot_dot_dot_token: false,
                name,
                question_token: false,
                type_annotation: param_type,
                initializer: NodeIndex::NONE,
            },
        );
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let parameters = self.make_node_list(vec![parameter], params_pos);
        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.parse_type_member_separator();
        self.arena.add_index_signature(
            syntax_kind_ext::INDEX_SIGNATURE,
            pos,
            self.prev_token_end,
            IndexSignatureData {
                modifiers,
                parameters,
                type_annotation,
            },
        )
    }

    // =========================================================================
    // Interfaces and type members
    // =========================================================================

    pub(crate) fn parse_interface_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_type_members();
        self.arena.add_interface(
            syntax_kind_ext::INTERFACE_DECLARATION,
            pos,
            self.prev_token_end,
            InterfaceData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    /// `{ member; member, ... }` for interfaces and type literals.
    pub(crate) fn parse_type_members(&mut self) -> NodeList {
        let pos = self.token_pos();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return self.make_node_list(Vec::new(), pos);
        }
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            members.push(self.parse_type_member());
            if self.token_pos() == before {
                self.next_token();
            }
        }
        let list = self.make_node_list(members, pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        list
    }

    fn parse_type_member_separator(&mut self) {
        if !self.parse_optional(SyntaxKind::SemicolonToken)
            && !self.parse_optional(SyntaxKind::CommaToken)
        {
            self.parse_semicolon();
        }
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();

        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            return self.parse_signature_member(
                pos,
                syntax_kind_ext::CALL_SIGNATURE,
                None,
                NodeIndex::NONE,
                false,
            );
        }
        if self.is_token(SyntaxKind::NewKeyword)
            && self.look_ahead(|p| {
                matches!(
                    p.next_token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                )
            })
        {
            self.next_token();
            return self.parse_signature_member(
                pos,
                syntax_kind_ext::CONSTRUCT_SIGNATURE,
                None,
                NodeIndex::NONE,
                false,
            );
        }

        let modifiers = self.parse_member_modifiers();
        if self.is_index_signature_start() {
            return self.parse_index_signature(pos, modifiers);
        }

        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            return self.parse_signature_member(
                pos,
                syntax_kind_ext::METHOD_SIGNATURE,
                modifiers,
                name,
                question_token,
            );
        }

        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.parse_type_member_separator();
        self.arena.add_signature(
            syntax_kind_ext::PROPERTY_SIGNATURE,
            pos,
            self.prev_token_end,
            SignatureData {
                modifiers,
                name,
                question_token,
                type_parameters: None,
                parameters: None,
                type_annotation,
                throws_clause: NodeIndex::NONE,
                rejects_clause: NodeIndex::NONE,
            },
        )
    }

    fn parse_signature_member(
        &mut self,
        pos: u32,
        kind: u16,
        modifiers: Option<NodeList>,
        name: NodeIndex,
        question_token: bool,
    ) -> NodeIndex {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let (type_annotation, throws_clause, rejects_clause) =
            self.parse_return_type_and_effects(SyntaxKind::ColonToken);
        self.parse_type_member_separator();
        self.arena.add_signature(
            kind,
            pos,
            self.prev_token_end,
            SignatureData {
                modifiers,
                name,
                question_token,
                type_parameters,
                parameters: Some(parameters),
                type_annotation,
                throws_clause,
                rejects_clause,
            },
        )
    }
}
