//! Parser state: token handling, diagnostics and the entry points.
//!
//! Statement, expression, type and class-member parsing live in the
//! `state_*` modules as further `impl ParserState` blocks.

use esc_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use esc_scanner::{ScannerState, SyntaxKind};
use tracing::debug;

use super::base::{NodeIndex, NodeList};
use super::node::{NodeArena, SourceFileData};

pub const CONTEXT_FLAG_ASYNC: u32 = 1 << 0;
pub const CONTEXT_FLAG_GENERATOR: u32 = 1 << 1;
pub const CONTEXT_FLAG_AMBIENT: u32 = 1 << 2;
/// `in` is not a binary operator (for-statement initializers).
pub const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 3;
/// Inside any function body; `await` is an identifier unless async.
pub const CONTEXT_FLAG_FUNCTION: u32 = 1 << 4;

/// Guard against stack exhaustion on pathological nesting.
const MAX_RECURSION_DEPTH: u32 = 1000;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) current_token: SyntaxKind,
    pub(crate) context_flags: u32,
    /// End of the previous token; used as the end of the node being finished.
    pub(crate) prev_token_end: u32,
    pub(crate) last_error_pos: Option<u32>,
    pub(crate) recursion_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::new(),
            file_name,
            parse_diagnostics: Vec::new(),
            current_token: SyntaxKind::Unknown,
            context_flags: 0,
            prev_token_end: 0,
            last_error_pos: None,
            recursion_depth: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    /// Parse a source file and return the root node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.scanner.scan_shebang_trivia();
        self.next_token();

        let statements = self.parse_source_file_statements();
        let end_pos = self.scanner.source_text().len() as u32;
        let eof_token = self
            .arena
            .add_token(SyntaxKind::EndOfFileToken as u16, end_pos, end_pos);

        for diag in self.scanner.get_scanner_diagnostics().to_vec() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
                code: diag.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
        self.parse_diagnostics.dedup();

        let comments = self.scanner.take_comments();
        let root = self.arena.add_source_file(
            0,
            end_pos,
            SourceFileData {
                statements,
                end_of_file_token: eof_token,
                file_name: self.file_name.clone(),
                text: self.scanner.source_text_arc(),
                comments,
            },
        );
        self.arena.link_parents(root);
        debug!(
            file = %self.file_name,
            nodes = self.arena.nodes.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    /// Start of the current token (after trivia).
    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start() as u32
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end() as u32
    }

    #[inline]
    pub(crate) fn token_value(&self) -> &str {
        self.scanner.get_token_value()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end() as u32;
        self.current_token = self.scanner.scan();
        self.current_token
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report `'x' expected.`
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = kind.text().unwrap_or("token");
        self.parse_error_at_current_token(
            &format_message(diagnostic_messages::EXPECTED, &[text]),
            diagnostic_codes::EXPECTED,
        );
        false
    }

    /// Statement terminator with automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.can_parse_semicolon() {
            return true;
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    /// Run `f` speculatively and restore the scanner afterwards. Diagnostics
    /// reported inside are discarded; nodes created inside stay unreachable.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let token = self.current_token;
        let prev_end = self.prev_token_end;
        let diag_len = self.parse_diagnostics.len();
        let last_error = self.last_error_pos;

        let result = f(self);

        self.scanner.restore_state(snapshot);
        self.current_token = token;
        self.prev_token_end = prev_end;
        self.parse_diagnostics.truncate(diag_len);
        self.last_error_pos = last_error;
        result
    }

    /// Look at the token after the current one.
    pub(crate) fn next_token_is(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| p.next_token() == kind)
    }

    pub(crate) fn next_token_is_on_same_line(&mut self, pred: impl FnOnce(SyntaxKind) -> bool) -> bool {
        self.look_ahead(|p| {
            let next = p.next_token();
            !p.has_preceding_line_break() && pred(next)
        })
    }

    // =========================================================================
    // Context
    // =========================================================================

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with `clear` flags removed, then `set` flags added.
    pub(crate) fn with_context<T>(
        &mut self,
        set: u32,
        clear: u32,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags = (self.context_flags & !clear) | set;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    /// `await` starts an await expression in async functions and at the top level.
    pub(crate) fn await_is_keyword(&self) -> bool {
        self.in_context(CONTEXT_FLAG_ASYNC) || !self.in_context(CONTEXT_FLAG_FUNCTION)
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.parse_error_at_current_token(
                diagnostic_messages::EXPRESSION_EXPECTED,
                diagnostic_codes::EXPRESSION_EXPECTED,
            );
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        // One error per position; cascades add noise only.
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    // =========================================================================
    // Node helpers
    // =========================================================================

    pub(crate) fn make_node_list(&self, nodes: Vec<NodeIndex>, pos: u32) -> NodeList {
        self.arena.make_list(nodes, pos, self.prev_token_end.max(pos))
    }

    /// Identifier from the current token. Contextual keywords are accepted;
    /// anything else reports `Identifier expected.` and yields an empty name.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.token().is_identifier_like() {
            return self.parse_identifier_name();
        }
        self.parse_error_at_current_token(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
        let pos = self.token_pos();
        self.arena.add_identifier(pos, pos, "")
    }

    /// Identifier from any identifier or keyword token (property names).
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let end = self.token_end();
        let text = self.token_value().to_string();
        let kind = if self.is_token(SyntaxKind::PrivateIdentifier) {
            SyntaxKind::PrivateIdentifier
        } else {
            SyntaxKind::Identifier
        };
        self.next_token();
        self.arena.add_identifier_data(
            kind as u16,
            pos,
            end,
            super::node::IdentifierData { escaped_text: text },
        )
    }

    /// Skip tokens until something that can start a statement.
    pub(crate) fn resync_after_error(&mut self) {
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            if self.is_token(SyntaxKind::SemicolonToken) {
                self.next_token();
                return;
            }
            if self.is_token(SyntaxKind::CloseBraceToken) || self.is_statement_start() {
                return;
            }
            self.next_token();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/parser_tests.rs"]
mod tests;
