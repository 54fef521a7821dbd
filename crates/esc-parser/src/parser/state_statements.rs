//! Parser state - statement and declaration parsing methods
use esc_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use esc_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::flags::node_flags;
use super::node::{
    BindingElementData, BindingPatternData, BlockData, CaseClauseData, CatchClauseData,
    ExprStatementData, ForInOfData, FunctionData, IfStatementData, JumpData, LabeledData, LoopData,
    ParameterData, ReturnData, SwitchData, TryData, VariableData, VariableDeclarationData,
};
use super::state::{
    CONTEXT_FLAG_AMBIENT, CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_FUNCTION,
    CONTEXT_FLAG_GENERATOR, ParserState,
};
use super::syntax_kind_ext;

impl ParserState {
    // =========================================================================
    // Statement lists
    // =========================================================================

    /// Parse top-level statements. Stray `}` tokens are reported and skipped.
    pub(crate) fn parse_source_file_statements(&mut self) -> NodeList {
        let pos = self.token_pos();
        let mut statements = Vec::new();

        while !self.is_token(SyntaxKind::EndOfFileToken) {
            if self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
                continue;
            }
            self.parse_statement_into(&mut statements);
        }

        self.make_node_list(statements, pos)
    }

    /// Parse statements up to (not including) the closing brace.
    pub(crate) fn parse_statements(&mut self) -> NodeList {
        let pos = self.token_pos();
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken)
            && !self.is_token(SyntaxKind::CloseBraceToken)
        {
            self.parse_statement_into(&mut statements);
        }
        self.make_node_list(statements, pos)
    }

    /// Parse one statement, recovering from errors so the caller always makes progress.
    fn parse_statement_into(&mut self, statements: &mut Vec<NodeIndex>) {
        let pos_before = self.token_pos();

        if self.is_token(SyntaxKind::Unknown) {
            self.parse_error_at_current_token(
                diagnostic_messages::INVALID_CHARACTER,
                diagnostic_codes::INVALID_CHARACTER,
            );
            self.next_token();
            return;
        }

        let stmt = self.parse_statement();
        if stmt.is_some() {
            statements.push(stmt);
        } else {
            self.parse_error_at_current_token(
                diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
            );
            self.resync_after_error();
        }

        // Force progress when recovery stopped where parsing started.
        if self.token_pos() == pos_before && !self.is_token(SyntaxKind::EndOfFileToken) {
            self.next_token();
        }
    }

    pub(crate) fn is_statement_start(&mut self) -> bool {
        match self.token() {
            SyntaxKind::OpenBraceToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::ExportKeyword => true,
            _ => self.is_start_of_expression(),
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_statement_worker();
        self.exit_recursion();
        result
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.arena
                    .add_token(syntax_kind_ext::EMPTY_STATEMENT, pos, self.prev_token_end)
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, None)
            }
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.parse_variable_statement(pos, None)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, None),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, None),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword | SyntaxKind::BreakKeyword => {
                self.parse_break_or_continue_statement()
            }
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                self.arena
                    .add_token(syntax_kind_ext::DEBUGGER_STATEMENT, pos, self.prev_token_end)
            }
            SyntaxKind::InterfaceKeyword if self.next_token_is_identifier_on_same_line() => {
                self.parse_interface_declaration(pos, None)
            }
            SyntaxKind::TypeKeyword if self.next_token_is_identifier_on_same_line() => {
                self.parse_type_alias_declaration(pos, None)
            }
            SyntaxKind::ExportKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::AbstractKeyword
                if self.is_declaration_modifier_start() =>
            {
                self.parse_declaration_with_modifiers(pos)
            }
            kind if kind.is_identifier_like() && self.next_token_is(SyntaxKind::ColonToken) => {
                self.parse_labeled_statement()
            }
            _ if self.is_start_of_expression() => self.parse_expression_statement(),
            _ => NodeIndex::NONE,
        }
    }

    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            let next = p.next_token();
            next.is_identifier_like()
                || next == SyntaxKind::OpenBracketToken
                || next == SyntaxKind::OpenBraceToken
        })
    }

    fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.next_token_is_on_same_line(|k| k.is_identifier_like())
    }

    /// `export`, `declare`, `async function`, `abstract class` at statement start.
    fn is_declaration_modifier_start(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ExportKeyword => true,
            SyntaxKind::DeclareKeyword => {
                self.next_token_is_on_same_line(|k| k.is_identifier_or_keyword())
            }
            SyntaxKind::AsyncKeyword => {
                self.next_token_is_on_same_line(|k| k == SyntaxKind::FunctionKeyword)
            }
            SyntaxKind::AbstractKeyword => {
                self.next_token_is_on_same_line(|k| k == SyntaxKind::ClassKeyword)
            }
            _ => false,
        }
    }

    /// Parse `export`/`declare`/`default`/`async`/`abstract` modifiers and the
    /// declaration they apply to.
    fn parse_declaration_with_modifiers(&mut self, pos: u32) -> NodeIndex {
        let list_pos = self.token_pos();
        let mut modifiers = Vec::new();
        let mut is_ambient = false;
        let mut is_default = false;
        loop {
            let accept = match self.token() {
                SyntaxKind::ExportKeyword => true,
                SyntaxKind::DefaultKeyword => {
                    modifiers.last().is_some_and(|&m| {
                        self.arena.kind_of(m) == Some(SyntaxKind::ExportKeyword as u16)
                    })
                }
                SyntaxKind::DeclareKeyword | SyntaxKind::AsyncKeyword | SyntaxKind::AbstractKeyword => {
                    self.is_declaration_modifier_start()
                }
                _ => false,
            };
            if !accept {
                break;
            }
            let kind = self.token();
            is_ambient |= kind == SyntaxKind::DeclareKeyword;
            is_default |= kind == SyntaxKind::DefaultKeyword;
            let start = self.token_pos();
            let end = self.token_end();
            modifiers.push(self.arena.add_token(kind as u16, start, end));
            self.next_token();
        }
        let modifiers = Some(self.make_node_list(modifiers, list_pos));
        let ambient = if is_ambient { CONTEXT_FLAG_AMBIENT } else { 0 };

        self.with_context(ambient, 0, |p| match p.token() {
            SyntaxKind::FunctionKeyword => p.parse_function_declaration(pos, modifiers),
            SyntaxKind::ClassKeyword => p.parse_class_declaration(pos, modifiers),
            SyntaxKind::InterfaceKeyword => p.parse_interface_declaration(pos, modifiers),
            SyntaxKind::TypeKeyword => p.parse_type_alias_declaration(pos, modifiers),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                p.parse_variable_statement(pos, modifiers)
            }
            _ if is_default && p.is_start_of_expression() => p.parse_expression_statement(),
            _ => {
                p.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                NodeIndex::NONE
            }
        })
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return self.arena.add_block(
                syntax_kind_ext::BLOCK,
                pos,
                pos,
                BlockData {
                    statements: NodeList::new(),
                    multi_line: false,
                },
            );
        }
        let statements = self.parse_statements();
        let multi_line = self.has_preceding_line_break();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_block(
            syntax_kind_ext::BLOCK,
            pos,
            self.prev_token_end,
            BlockData {
                statements,
                multi_line,
            },
        )
    }

    /// Parse a function body block with the function's async/generator context.
    pub(crate) fn parse_function_block(&mut self, is_async: bool, is_generator: bool) -> NodeIndex {
        let mut set = CONTEXT_FLAG_FUNCTION;
        if is_async {
            set |= CONTEXT_FLAG_ASYNC;
        }
        if is_generator {
            set |= CONTEXT_FLAG_GENERATOR;
        }
        self.with_context(
            set,
            CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN,
            |p| p.parse_block(),
        )
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.arena.add_expr_statement(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            pos,
            self.prev_token_end,
            ExprStatementData { expression },
        )
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.arena.add_labeled(
            syntax_kind_ext::LABELED_STATEMENT,
            pos,
            self.prev_token_end,
            LabeledData { label, statement },
        )
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            pos,
            self.prev_token_end,
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        // ASI after do-while is always allowed.
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.arena.add_loop(
            syntax_kind_ext::DO_STATEMENT,
            pos,
            self.prev_token_end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            pos,
            self.prev_token_end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let await_modifier = self.is_token(SyntaxKind::AwaitKeyword) && self.await_is_keyword();
        if await_modifier {
            self.next_token();
        }
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else if self.is_token(SyntaxKind::VarKeyword)
            || self.is_token(SyntaxKind::ConstKeyword)
            || (self.is_token(SyntaxKind::LetKeyword) && self.is_let_declaration())
        {
            self.with_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| {
                p.parse_variable_declaration_list()
            })
        } else {
            self.with_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| p.parse_expression())
        };

        if self.is_token(SyntaxKind::OfKeyword) || self.is_token(SyntaxKind::InKeyword) {
            let kind = if self.is_token(SyntaxKind::OfKeyword) {
                syntax_kind_ext::FOR_OF_STATEMENT
            } else {
                syntax_kind_ext::FOR_IN_STATEMENT
            };
            self.next_token();
            let expression = if kind == syntax_kind_ext::FOR_OF_STATEMENT {
                self.parse_assignment_expression_or_higher()
            } else {
                self.parse_expression()
            };
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.arena.add_for_in_of(
                kind,
                pos,
                self.prev_token_end,
                ForInOfData {
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                },
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            pos,
            self.prev_token_end,
            LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        )
    }

    fn parse_break_or_continue_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let kind = if self.is_token(SyntaxKind::BreakKeyword) {
            syntax_kind_ext::BREAK_STATEMENT
        } else {
            syntax_kind_ext::CONTINUE_STATEMENT
        };
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.token().is_identifier_like() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena
            .add_jump(kind, pos, self.prev_token_end, JumpData { label })
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena.add_return(
            syntax_kind_ext::RETURN_STATEMENT,
            pos,
            self.prev_token_end,
            ReturnData { expression },
        )
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let expression = if self.has_preceding_line_break() {
            self.parse_error_at_current_token(
                diagnostic_messages::EXPRESSION_EXPECTED,
                diagnostic_codes::EXPRESSION_EXPECTED,
            );
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena.add_return(
            syntax_kind_ext::THROW_STATEMENT,
            pos,
            self.prev_token_end,
            ReturnData { expression },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let clauses_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let clause_pos = self.token_pos();
            let (kind, expression) = if self.parse_optional(SyntaxKind::CaseKeyword) {
                (syntax_kind_ext::CASE_CLAUSE, self.parse_expression())
            } else if self.parse_optional(SyntaxKind::DefaultKeyword) {
                (syntax_kind_ext::DEFAULT_CLAUSE, NodeIndex::NONE)
            } else {
                self.parse_error_at_current_token(
                    &format_message(diagnostic_messages::EXPECTED, &["case"]),
                    diagnostic_codes::EXPECTED,
                );
                self.next_token();
                continue;
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let statements_pos = self.token_pos();
            let mut statements = Vec::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                self.parse_statement_into(&mut statements);
            }
            let statements = self.make_node_list(statements, statements_pos);
            clauses.push(self.arena.add_case_clause(
                kind,
                clause_pos,
                self.prev_token_end,
                CaseClauseData {
                    expression,
                    statements,
                },
            ));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let clauses = self.make_node_list(clauses, clauses_pos);
        self.arena.add_switch(
            syntax_kind_ext::SWITCH_STATEMENT,
            pos,
            self.prev_token_end,
            SwitchData {
                expression,
                clauses,
            },
        )
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_pos = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let decl_pos = self.token_pos();
                let name = self.parse_binding_name();
                let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
                    self.parse_type()
                } else {
                    NodeIndex::NONE
                };
                let decl = self.arena.add_variable_declaration(
                    syntax_kind_ext::VARIABLE_DECLARATION,
                    decl_pos,
                    self.prev_token_end,
                    VariableDeclarationData {
                        name,
                        exclamation_token: false,
                        type_annotation,
                        initializer: NodeIndex::NONE,
                    },
                );
                self.parse_expected(SyntaxKind::CloseParenToken);
                decl
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            self.arena.add_catch_clause(
                syntax_kind_ext::CATCH_CLAUSE,
                catch_pos,
                self.prev_token_end,
                CatchClauseData {
                    variable_declaration,
                    block,
                },
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            self.parse_error_at_current_token(
                &format_message(diagnostic_messages::EXPECTED, &["catch"]),
                diagnostic_codes::EXPECTED,
            );
        }

        self.arena.add_try(
            syntax_kind_ext::TRY_STATEMENT,
            pos,
            self.prev_token_end,
            TryData {
                try_block,
                catch_clause,
                finally_block,
            },
        )
    }

    // =========================================================================
    // Variables and binding patterns
    // =========================================================================

    fn parse_variable_statement(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        let list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        let declarations = self.arena.make_list(vec![list], pos, self.prev_token_end);
        self.arena.add_variable(
            syntax_kind_ext::VARIABLE_STATEMENT,
            pos,
            self.prev_token_end,
            VariableData {
                modifiers,
                declarations,
            },
        )
    }

    /// `var|let|const a = 1, b` (without the terminating semicolon).
    pub(crate) fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();

        let decls_pos = self.token_pos();
        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let declarations = self.make_node_list(declarations, decls_pos);
        let list = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_DECLARATION_LIST,
            pos,
            self.prev_token_end,
            VariableData {
                modifiers: None,
                declarations,
            },
        );
        self.arena.add_flags(list, flags);
        list
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = self.parse_binding_name();
        let exclamation_token = !self.has_preceding_line_break()
            && self.parse_optional(SyntaxKind::ExclamationToken);
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
        self.arena.add_variable_declaration(
            syntax_kind_ext::VARIABLE_DECLARATION,
            pos,
            self.prev_token_end,
            VariableDeclarationData {
                name,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    /// Identifier, object binding pattern or array binding pattern.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let elements_pos = self.token_pos();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_pos = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let (property_name, name) = if dot_dot_dot_token {
                (NodeIndex::NONE, self.parse_identifier())
            } else {
                let property_name = self.parse_property_name();
                if self.parse_optional(SyntaxKind::ColonToken) {
                    (property_name, self.parse_binding_name())
                } else {
                    (NodeIndex::NONE, property_name)
                }
            };
            let initializer = self.parse_binding_initializer();
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                element_pos,
                self.prev_token_end,
                BindingElementData {
                    dot_dot_dot_token,
                    property_name,
                    name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let elements = self.make_node_list(elements, elements_pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_binding_pattern(
            syntax_kind_ext::OBJECT_BINDING_PATTERN,
            pos,
            self.prev_token_end,
            BindingPatternData { elements },
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let elements_pos = self.token_pos();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let hole = self.token_pos();
                elements.push(
                    self.arena
                        .add_token(syntax_kind_ext::OMITTED_EXPRESSION, hole, hole),
                );
                self.next_token();
                continue;
            }
            let element_pos = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = self.parse_binding_initializer();
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                element_pos,
                self.prev_token_end,
                BindingElementData {
                    dot_dot_dot_token,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let elements = self.make_node_list(elements, elements_pos);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_binding_pattern(
            syntax_kind_ext::ARRAY_BINDING_PATTERN,
            pos,
            self.prev_token_end,
            BindingPatternData { elements },
        )
    }

    fn parse_binding_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression_or_higher()
        } else {
            NodeIndex::NONE
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub(crate) fn parse_function_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.token().is_identifier_like() {
            self.parse_identifier()
        } else if self.arena.has_modifier(&modifiers, SyntaxKind::DefaultKeyword) {
            NodeIndex::NONE
        } else {
            self.parse_identifier()
        };
        let is_async = self.arena.has_modifier(&modifiers, SyntaxKind::AsyncKeyword);

        let (type_parameters, parameters) = self.with_context(
            if is_async { CONTEXT_FLAG_ASYNC } else { 0 },
            CONTEXT_FLAG_ASYNC,
            |p| {
                let type_parameters = p.parse_type_parameters();
                let parameters = p.parse_parameters();
                (type_parameters, parameters)
            },
        );
        let (type_annotation, throws_clause, rejects_clause) =
            self.parse_return_type_and_effects(SyntaxKind::ColonToken);

        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_block(is_async, asterisk_token)
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        };

        let node = self.arena.add_function(
            syntax_kind_ext::FUNCTION_DECLARATION,
            pos,
            self.prev_token_end,
            FunctionData {
                modifiers,
                asterisk_token,
                name,
                type_parameters,
                parameters,
                type_annotation,
                throws_clause,
                rejects_clause,
                body,
            },
        );
        if self.in_context(CONTEXT_FLAG_AMBIENT) {
            self.arena.add_flags(node, node_flags::AMBIENT);
        }
        node
    }

    /// `(a: T, b?: U, ...rest: V[])`. Parameter-property modifiers are kept
    /// on the parameter node for constructors.
    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        let pos = self.token_pos();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return self.make_node_list(Vec::new(), pos);
        }
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let list = self.make_node_list(parameters, pos);
        self.parse_expected(SyntaxKind::CloseParenToken);
        list
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let modifiers_pos = self.token_pos();
        let mut modifiers = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword
        ) && self.look_ahead(|p| {
            let next = p.next_token();
            next.is_identifier_like()
                || next == SyntaxKind::OpenBraceToken
                || next == SyntaxKind::OpenBracketToken
        }) {
            let kind = self.token();
            let start = self.token_pos();
            let end = self.token_end();
            modifiers.push(self.arena.add_token(kind as u16, start, end));
            self.next_token();
        }
        let modifiers = if modifiers.is_empty() {
            None
        } else {
            Some(self.make_node_list(modifiers, modifiers_pos))
        };

        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = if self.is_token(SyntaxKind::ThisKeyword) {
            let start = self.token_pos();
            let end = self.token_end();
            self.next_token();
            self.arena.add_identifier(start, end, "this")
        } else {
            self.parse_binding_name()
        };
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let initializer = self.parse_binding_initializer();

        self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            pos,
            self.prev_token_end,
            ParameterData {
                modifiers,
                dot_dot_dot_token,
                name,
                question_token,
                type_annotation,
                initializer,
            },
        )
    }
}
