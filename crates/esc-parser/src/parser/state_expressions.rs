//! Parser state - expression parsing methods

use esc_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use esc_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::flags::node_flags;
use super::node::{
    AccessExprData, BinaryExprData, CallExprData, ComputedPropertyData, ConditionalExprData,
    FunctionData, LiteralData, LiteralExprData, ParameterData, ParenthesizedData,
    PropertyAssignmentData, ShorthandPropertyData, TemplateExprData, TemplateSpanData,
    TypeAssertionData, UnaryExprData, UnaryExprDataEx,
};
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_FUNCTION, CONTEXT_FLAG_GENERATOR,
    ParserState,
};
use super::syntax_kind_ext;

impl ParserState {
    pub(crate) fn is_start_of_expression(&mut self) -> bool {
        match self.token() {
            SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::LessThanToken
            | SyntaxKind::PrivateIdentifier => true,
            kind => kind.is_identifier_like(),
        }
    }

    // =========================================================================
    // Comma, assignment and conditional expressions
    // =========================================================================

    /// Comma-separated expression.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut expr = self.parse_assignment_expression_or_higher();
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression_or_higher();
            expr = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                pos,
                self.prev_token_end,
                BinaryExprData {
                    left: expr,
                    operator_token: SyntaxKind::CommaToken as u16,
                    right,
                },
            );
        }
        expr
    }

    pub(crate) fn parse_assignment_expression_or_higher(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            let pos = self.token_pos();
            return self.arena.add_identifier(pos, pos, "");
        }
        let result = self.parse_assignment_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        if self.is_start_of_arrow_function() {
            return self.parse_arrow_function();
        }
        if self.is_token(SyntaxKind::YieldKeyword) && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }

        let pos = self.token_pos();
        let expr = self.parse_binary_expression_or_higher(0);

        if self.token().is_assignment_operator() {
            let operator = self.token();
            self.next_token();
            let right = self.parse_assignment_expression_or_higher();
            return self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                pos,
                self.prev_token_end,
                BinaryExprData {
                    left: expr,
                    operator_token: operator as u16,
                    right,
                },
            );
        }

        if self.is_token(SyntaxKind::QuestionToken) {
            self.next_token();
            let when_true = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                p.parse_assignment_expression_or_higher()
            });
            self.parse_expected(SyntaxKind::ColonToken);
            let when_false = self.parse_assignment_expression_or_higher();
            return self.arena.add_conditional_expr(
                syntax_kind_ext::CONDITIONAL_EXPRESSION,
                pos,
                self.prev_token_end,
                ConditionalExprData {
                    condition: expr,
                    when_true,
                    when_false,
                },
            );
        }

        expr
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let asterisk_token =
            !self.has_preceding_line_break() && self.parse_optional(SyntaxKind::AsteriskToken);
        let expression = if asterisk_token
            || (!self.has_preceding_line_break() && self.is_start_of_expression())
        {
            self.parse_assignment_expression_or_higher()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_unary_expr_ex(
            syntax_kind_ext::YIELD_EXPRESSION,
            pos,
            self.prev_token_end,
            UnaryExprDataEx {
                expression,
                asterisk_token,
            },
        )
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// Speculatively parse an arrow head: `x =>`, `async x =>`,
    /// `(params): T throws E =>`, `<T>(params) =>`.
    fn is_start_of_arrow_function(&mut self) -> bool {
        let starts = matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) || self.token().is_identifier_like();
        if !starts {
            return false;
        }
        self.look_ahead(|p| {
            p.last_error_pos = None;
            let diagnostics_before = p.parse_diagnostics.len();
            if p.is_token(SyntaxKind::AsyncKeyword) {
                let next = p.next_token();
                if p.has_preceding_line_break() {
                    return false;
                }
                if next == SyntaxKind::EqualsGreaterThanToken {
                    // `async => x` uses `async` as the parameter name.
                    return true;
                }
            }
            if p.token().is_identifier_like() {
                return p.next_token() == SyntaxKind::EqualsGreaterThanToken
                    && !p.has_preceding_line_break();
            }
            p.parse_type_parameters();
            if !p.is_token(SyntaxKind::OpenParenToken) {
                return false;
            }
            p.parse_parameters();
            p.parse_return_type_and_effects(SyntaxKind::ColonToken);
            p.is_token(SyntaxKind::EqualsGreaterThanToken)
                && !p.has_preceding_line_break()
                && p.parse_diagnostics.len() == diagnostics_before
        })
    }

    fn parse_arrow_function(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && !self.next_token_is(SyntaxKind::EqualsGreaterThanToken);
        let modifiers = if is_async {
            let end = self.token_end();
            let token = self.arena.add_token(SyntaxKind::AsyncKeyword as u16, pos, end);
            self.next_token();
            Some(self.arena.make_list(vec![token], pos, end))
        } else {
            None
        };

        let (type_parameters, parameters, type_annotation, throws_clause, rejects_clause) =
            if self.token().is_identifier_like() {
                let param_pos = self.token_pos();
                let name = self.parse_identifier();
                let param = self.arena.add_parameter(
                    syntax_kind_ext::PARAMETER,
                    param_pos,
                    self.prev_token_end,
                    ParameterData {
                        modifiers: None,
                        dot_dot_dot_token: false,
                        name,
                        question_token: false,
                        type_annotation: NodeIndex::NONE,
                        initializer: NodeIndex::NONE,
                    },
                );
                let parameters = self.make_node_list(vec![param], param_pos);
                (None, parameters, NodeIndex::NONE, NodeIndex::NONE, NodeIndex::NONE)
            } else {
                let type_parameters = self.parse_type_parameters();
                let parameters = self.parse_parameters();
                let (ty, throws, rejects) =
                    self.parse_return_type_and_effects(SyntaxKind::ColonToken);
                (type_parameters, parameters, ty, throws, rejects)
            };

        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);

        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_block(is_async, false)
        } else {
            let set = CONTEXT_FLAG_FUNCTION | if is_async { CONTEXT_FLAG_ASYNC } else { 0 };
            self.with_context(set, CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR, |p| {
                p.parse_assignment_expression_or_higher()
            })
        };

        self.arena.add_function(
            syntax_kind_ext::ARROW_FUNCTION,
            pos,
            self.prev_token_end,
            FunctionData {
                modifiers,
                asterisk_token: false,
                name: NodeIndex::NONE,
                type_parameters,
                parameters,
                type_annotation,
                throws_clause,
                rejects_clause,
                body,
            },
        )
    }

    // =========================================================================
    // Binary expressions
    // =========================================================================

    fn binary_precedence(&self, kind: SyntaxKind) -> u8 {
        match kind {
            SyntaxKind::QuestionQuestionToken | SyntaxKind::BarBarToken => 4,
            SyntaxKind::AmpersandAmpersandToken => 5,
            SyntaxKind::BarToken => 6,
            SyntaxKind::CaretToken => 7,
            SyntaxKind::AmpersandToken => 8,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => 9,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword
            | SyntaxKind::AsKeyword
            | SyntaxKind::SatisfiesKeyword => 10,
            SyntaxKind::InKeyword if !self.in_context(CONTEXT_FLAG_DISALLOW_IN) => 10,
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 11,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 12,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 13,
            SyntaxKind::AsteriskAsteriskToken => 14,
            _ => 0,
        }
    }

    /// Precedence climbing. `**` is right-associative.
    fn parse_binary_expression_or_higher(&mut self, min_precedence: u8) -> NodeIndex {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expression_or_higher();

        loop {
            self.current_token = self.scanner.re_scan_greater_token();
            let operator = self.token();
            let precedence = self.binary_precedence(operator);
            let consume = if operator == SyntaxKind::AsteriskAsteriskToken {
                precedence >= min_precedence && precedence > 0
            } else {
                precedence > min_precedence
            };
            if !consume {
                break;
            }

            if matches!(operator, SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword) {
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let type_node = if operator == SyntaxKind::AsKeyword
                    && self.is_token(SyntaxKind::ConstKeyword)
                {
                    let start = self.token_pos();
                    let end = self.token_end();
                    self.next_token();
                    self.arena.add_token(SyntaxKind::ConstKeyword as u16, start, end)
                } else {
                    self.parse_type()
                };
                let kind = if operator == SyntaxKind::AsKeyword {
                    syntax_kind_ext::AS_EXPRESSION
                } else {
                    syntax_kind_ext::SATISFIES_EXPRESSION
                };
                left = self.arena.add_type_assertion(
                    kind,
                    pos,
                    self.prev_token_end,
                    TypeAssertionData {
                        expression: left,
                        type_node,
                    },
                );
                continue;
            }

            self.next_token();
            let right_precedence = if operator == SyntaxKind::AsteriskAsteriskToken {
                precedence - 1
            } else {
                precedence
            };
            let right = self.parse_binary_expression_or_higher(right_precedence);
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                pos,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }
        left
    }

    // =========================================================================
    // Unary expressions
    // =========================================================================

    fn parse_unary_expression_or_higher(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let kind = match self.token() {
            SyntaxKind::DeleteKeyword => Some(syntax_kind_ext::DELETE_EXPRESSION),
            SyntaxKind::TypeOfKeyword => Some(syntax_kind_ext::TYPE_OF_EXPRESSION),
            SyntaxKind::VoidKeyword => Some(syntax_kind_ext::VOID_EXPRESSION),
            SyntaxKind::AwaitKeyword if self.await_is_keyword() && self.is_await_expression() => {
                Some(syntax_kind_ext::AWAIT_EXPRESSION)
            }
            _ => None,
        };
        if let Some(kind) = kind {
            self.next_token();
            let expression = self.parse_unary_expression_or_higher();
            return self.arena.add_unary_expr_ex(
                kind,
                pos,
                self.prev_token_end,
                UnaryExprDataEx {
                    expression,
                    asterisk_token: false,
                },
            );
        }

        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_expression_or_higher();
                self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    UnaryExprData {
                        operator: operator as u16,
                        operand,
                    },
                )
            }
            _ => {
                let expression = self.parse_left_hand_side_expression_or_higher();
                if matches!(
                    self.token(),
                    SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
                ) && !self.has_preceding_line_break()
                {
                    let operator = self.token();
                    self.next_token();
                    return self.arena.add_unary_expr(
                        syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                        pos,
                        self.prev_token_end,
                        UnaryExprData {
                            operator: operator as u16,
                            operand: expression,
                        },
                    );
                }
                expression
            }
        }
    }

    /// At the top level `await` may still be an identifier (`await;`).
    fn is_await_expression(&mut self) -> bool {
        if self.in_context(CONTEXT_FLAG_ASYNC) {
            return true;
        }
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.is_start_of_expression()
        })
    }

    // =========================================================================
    // Left-hand-side expressions: member access, calls, new
    // =========================================================================

    fn parse_left_hand_side_expression_or_higher(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_call_and_member_chain(pos, expression, true)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let callee_pos = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_call_and_member_chain(callee_pos, callee, false);
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            self.try_parse_type_arguments_in_expression()
        } else {
            None
        };
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments())
        } else {
            None
        };
        self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            pos,
            self.prev_token_end,
            CallExprData {
                expression,
                type_arguments,
                arguments,
            },
        )
    }

    /// Member accesses, element accesses, calls and non-null assertions.
    /// `allow_calls` is false for the callee of `new`.
    fn parse_call_and_member_chain(
        &mut self,
        pos: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> NodeIndex {
        let mut in_optional_chain = false;
        loop {
            let question_dot_token = if self.is_token(SyntaxKind::QuestionDotToken) {
                self.next_token();
                in_optional_chain = true;
                true
            } else {
                false
            };
            let chain_flags = if in_optional_chain {
                node_flags::OPTIONAL_CHAIN
            } else {
                node_flags::NONE
            };

            let is_name_access = if question_dot_token {
                !matches!(
                    self.token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken
                )
            } else {
                self.is_token(SyntaxKind::DotToken)
            };
            if is_name_access {
                if !question_dot_token {
                    self.next_token();
                }
                let name = self.parse_identifier_name();
                expression = self.arena.add_access_expr(
                    syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    AccessExprData {
                        expression,
                        name_or_argument: name,
                        question_dot_token,
                    },
                );
                self.arena.add_flags(expression, chain_flags);
                continue;
            }

            if self.is_token(SyntaxKind::OpenBracketToken) {
                self.next_token();
                let argument = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                    p.parse_expression()
                });
                self.parse_expected(SyntaxKind::CloseBracketToken);
                expression = self.arena.add_access_expr(
                    syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    AccessExprData {
                        expression,
                        name_or_argument: argument,
                        question_dot_token,
                    },
                );
                self.arena.add_flags(expression, chain_flags);
                continue;
            }

            if self.is_token(SyntaxKind::ExclamationToken) && !self.has_preceding_line_break() {
                self.next_token();
                expression = self.arena.add_unary_expr_ex(
                    syntax_kind_ext::NON_NULL_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    UnaryExprDataEx {
                        expression,
                        asterisk_token: false,
                    },
                );
                continue;
            }

            if !allow_calls {
                break;
            }

            let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
                match self.try_parse_type_arguments_in_expression() {
                    Some(args) => Some(args),
                    None => break,
                }
            } else {
                None
            };

            if self.is_token(SyntaxKind::OpenParenToken) {
                let arguments = self.parse_arguments();
                expression = self.arena.add_call_expr(
                    syntax_kind_ext::CALL_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    CallExprData {
                        expression,
                        type_arguments,
                        arguments: Some(arguments),
                    },
                );
                self.arena.add_flags(expression, chain_flags);
                continue;
            }

            break;
        }
        expression
    }

    /// `f<T>(...)`: only type arguments followed by `(` count.
    fn try_parse_type_arguments_in_expression(&mut self) -> Option<NodeList> {
        let is_type_arguments = self.look_ahead(|p| {
            p.last_error_pos = None;
            let diagnostics_before = p.parse_diagnostics.len();
            p.parse_type_arguments();
            p.parse_diagnostics.len() == diagnostics_before
                && p.is_token(SyntaxKind::OpenParenToken)
        });
        is_type_arguments.then(|| self.parse_type_arguments())
    }

    pub(crate) fn parse_arguments(&mut self) -> NodeList {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                arguments.push(p.parse_argument_or_array_element());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        let list = self.make_node_list(arguments, pos);
        self.parse_expected(SyntaxKind::CloseParenToken);
        list
    }

    fn parse_argument_or_array_element(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.parse_assignment_expression_or_higher();
            return self.arena.add_unary_expr_ex(
                syntax_kind_ext::SPREAD_ELEMENT,
                pos,
                self.prev_token_end,
                UnaryExprDataEx {
                    expression,
                    asterisk_token: false,
                },
            );
        }
        self.parse_assignment_expression_or_higher()
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let kind = self.token();
                let end = self.token_end();
                self.next_token();
                self.arena.add_token(kind as u16, pos, end)
            }
            SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.parse_literal_node(),
            SyntaxKind::TemplateHead => self.parse_template_expression(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.current_token = self.scanner.re_scan_slash_token();
                self.parse_literal_node()
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression =
                    self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_parenthesized(
                    syntax_kind_ext::PARENTHESIZED_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    ParenthesizedData { expression },
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(None),
            SyntaxKind::AsyncKeyword
                if self.next_token_is_on_same_line(|k| k == SyntaxKind::FunctionKeyword) =>
            {
                let end = self.token_end();
                let token = self.arena.add_token(SyntaxKind::AsyncKeyword as u16, pos, end);
                self.next_token();
                let modifiers = self.arena.make_list(vec![token], pos, end);
                self.parse_function_expression(Some(modifiers))
            }
            SyntaxKind::ClassKeyword => self.parse_class_expression(),
            SyntaxKind::PrivateIdentifier => self.parse_identifier_name(),
            kind if kind.is_identifier_like() => self.parse_identifier(),
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::EXPRESSION_EXPECTED,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                self.arena.add_identifier(pos, pos, "")
            }
        }
    }

    fn parse_literal_node(&mut self) -> NodeIndex {
        let kind = self.token();
        let pos = self.token_pos();
        let end = self.token_end();
        let text = self.token_value().to_string();
        self.next_token();
        self.arena.add_literal(kind as u16, pos, end, LiteralData { text })
    }

    /// `` `head ${a} middle ${b} tail` ``
    fn parse_template_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let head = self.parse_literal_node();
        let spans_pos = self.token_pos();
        let mut spans = Vec::new();
        loop {
            let span_pos = self.token_pos();
            let expression = self.parse_expression();
            let literal = if self.is_token(SyntaxKind::CloseBraceToken) {
                self.current_token = self.scanner.re_scan_template_token();
                self.parse_literal_node()
            } else {
                self.parse_error_at_current_token(
                    &format_message(diagnostic_messages::EXPECTED, &["}"]),
                    diagnostic_codes::EXPECTED,
                );
                let at = self.token_pos();
                self.arena.add_literal(
                    SyntaxKind::TemplateTail as u16,
                    at,
                    at,
                    LiteralData {
                        text: String::new(),
                    },
                )
            };
            let is_tail = self.arena.kind_of(literal) != Some(SyntaxKind::TemplateMiddle as u16);
            spans.push(self.arena.add_template_span(
                syntax_kind_ext::TEMPLATE_SPAN,
                span_pos,
                self.prev_token_end,
                TemplateSpanData {
                    expression,
                    literal,
                },
            ));
            if is_tail {
                break;
            }
        }
        let template_spans = self.make_node_list(spans, spans_pos);
        self.arena.add_template_expr(
            syntax_kind_ext::TEMPLATE_EXPRESSION,
            pos,
            self.prev_token_end,
            TemplateExprData {
                head,
                template_spans,
            },
        )
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let elements_pos = self.token_pos();
        let mut elements = Vec::new();
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                if p.is_token(SyntaxKind::CommaToken) {
                    let hole = p.token_pos();
                    elements.push(
                        p.arena
                            .add_token(syntax_kind_ext::OMITTED_EXPRESSION, hole, hole),
                    );
                    p.next_token();
                    continue;
                }
                elements.push(p.parse_argument_or_array_element());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        let multi_line = self.has_preceding_line_break();
        let elements = self.make_node_list(elements, elements_pos);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            pos,
            self.prev_token_end,
            LiteralExprData {
                elements,
                multi_line,
            },
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let elements_pos = self.token_pos();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_object_literal_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let multi_line = self.has_preceding_line_break();
        let elements = self.make_node_list(elements, elements_pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            pos,
            self.prev_token_end,
            LiteralExprData {
                elements,
                multi_line,
            },
        )
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();

        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_or_higher();
            return self.arena.add_unary_expr_ex(
                syntax_kind_ext::SPREAD_ASSIGNMENT,
                pos,
                self.prev_token_end,
                UnaryExprDataEx {
                    expression,
                    asterisk_token: false,
                },
            );
        }

        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.next_token_is_property_name()
        {
            return self.parse_accessor_declaration(pos, None);
        }

        let modifiers = if self.is_token(SyntaxKind::AsyncKeyword)
            && self.next_token_is_on_same_line(|k| {
                k == SyntaxKind::AsteriskToken || Self::kind_starts_property_name(k)
            }) {
            let end = self.token_end();
            let token = self.arena.add_token(SyntaxKind::AsyncKeyword as u16, pos, end);
            self.next_token();
            Some(self.arena.make_list(vec![token], pos, end))
        } else {
            None
        };
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let is_shorthand_candidate = self.token().is_identifier_like();
        let name = self.parse_property_name();

        if modifiers.is_some()
            || asterisk_token
            || matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            return self.parse_method_declaration(pos, modifiers, asterisk_token, name, false);
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression_or_higher();
            return self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                pos,
                self.prev_token_end,
                PropertyAssignmentData { name, initializer },
            );
        }

        if !is_shorthand_candidate {
            self.parse_expected(SyntaxKind::ColonToken);
        }
        let object_assignment_initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression_or_higher()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_shorthand_property(
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            pos,
            self.prev_token_end,
            ShorthandPropertyData {
                name,
                object_assignment_initializer,
            },
        )
    }

    fn kind_starts_property_name(kind: SyntaxKind) -> bool {
        kind.is_identifier_or_keyword()
            || matches!(
                kind,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::PrivateIdentifier
            )
    }

    /// True when the token after `get`/`set`/`async` begins a member name
    /// rather than ending the member (`get() {}`, `get: 1`).
    pub(crate) fn next_token_is_property_name(&mut self) -> bool {
        self.look_ahead(|p| Self::kind_starts_property_name(p.next_token()))
    }

    /// Identifier, keyword, string/numeric literal, private name or `[expr]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal_node(),
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.parse_assignment_expression_or_higher();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena.add_computed_property(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    pos,
                    self.prev_token_end,
                    ComputedPropertyData { expression },
                )
            }
            kind if kind.is_identifier_or_keyword() || kind == SyntaxKind::PrivateIdentifier => {
                self.parse_identifier_name()
            }
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::IDENTIFIER_EXPECTED,
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
                self.arena.add_identifier(pos, pos, "")
            }
        }
    }

    fn parse_function_expression(&mut self, modifiers: Option<NodeList>) -> NodeIndex {
        let pos = modifiers
            .as_ref()
            .map_or_else(|| self.token_pos(), |list| list.pos);
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let is_async = self.arena.has_modifier(&modifiers, SyntaxKind::AsyncKeyword);
        let name = if self.token().is_identifier_like() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.with_context(
            if is_async { CONTEXT_FLAG_ASYNC } else { 0 },
            CONTEXT_FLAG_ASYNC,
            |p| p.parse_parameters(),
        );
        let (type_annotation, throws_clause, rejects_clause) =
            self.parse_return_type_and_effects(SyntaxKind::ColonToken);
        let body = self.parse_function_block(is_async, asterisk_token);
        self.arena.add_function(
            syntax_kind_ext::FUNCTION_EXPRESSION,
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
        )
    }
}
