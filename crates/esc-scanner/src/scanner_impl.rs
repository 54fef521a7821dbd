//! The scanner: turns source text into a token stream on demand.
//!
//! The parser drives the scanner one token at a time and rescans in the
//! few places where the lexical grammar depends on syntactic context
//! (`>` in type arguments, `/` starting a regex, `}` continuing a template).

use std::sync::Arc;

use esc_common::comments::CommentRange;
use esc_common::diagnostics::{diagnostic_codes, diagnostic_messages};

use crate::SyntaxKind;
use crate::char_codes::{
    is_binary_digit, is_identifier_part, is_identifier_start, is_line_break, is_octal_digit,
    is_white_space_single_line,
};
use crate::syntax_kind::text_to_keyword;

pub mod token_flags {
    pub const NONE: u32 = 0;
    pub const PRECEDING_LINE_BREAK: u32 = 1 << 0;
    pub const UNTERMINATED: u32 = 1 << 1;
}

/// A lexical error found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
    comments: Vec<CommentRange>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        ScannerState {
            text: text.into(),
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: token_flags::NONE,
            comments: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    #[inline]
    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    /// Start of the current token, excluding leading trivia.
    #[inline]
    pub fn get_token_start(&self) -> usize {
        self.token_start
    }

    /// Start of the current token, including leading trivia.
    #[inline]
    pub fn get_token_full_start(&self) -> usize {
        self.full_start
    }

    #[inline]
    pub fn get_token_end(&self) -> usize {
        self.pos
    }

    /// Cooked value of the current token (identifier name, string contents, ...).
    #[inline]
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags & token_flags::PRECEDING_LINE_BREAK != 0
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags & token_flags::UNTERMINATED != 0
    }

    pub fn get_comments(&self) -> &[CommentRange] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<CommentRange> {
        std::mem::take(&mut self.comments)
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> u8 {
        self.text.as_bytes().get(pos).copied().unwrap_or(0)
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        // Lookahead rescans the same text; keep one report per location.
        if self
            .diagnostics
            .iter()
            .any(|d| d.pos == pos && d.code == code)
        {
            return;
        }
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    fn record_comment(&mut self, pos: usize, end: usize, is_multi_line: bool) {
        if self
            .comments
            .last()
            .is_some_and(|last| last.pos as usize >= pos)
        {
            return;
        }
        let has_trailing_new_line = self.char_at(end).is_some_and(is_line_break);
        self.comments.push(CommentRange::new(
            pos as u32,
            end as u32,
            is_multi_line,
            has_trailing_new_line,
        ));
    }

    /// Skip a `#!` line at the very start of the file.
    pub fn scan_shebang_trivia(&mut self) {
        if self.pos == 0 && self.text.starts_with("#!") {
            while let Some(ch) = self.char_at(self.pos) {
                if is_line_break(ch) {
                    break;
                }
                self.pos += ch.len_utf8();
            }
        }
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Skip trivia, recording comments and line breaks. Returns when `pos`
    /// is at the first character of the next token.
    fn skip_trivia(&mut self) {
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                return;
            };
            if is_line_break(ch) {
                self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.byte_at(self.pos + 1) == b'/' {
                let start = self.pos;
                self.pos += 2;
                while let Some(c) = self.char_at(self.pos) {
                    if is_line_break(c) {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
                self.record_comment(start, self.pos, false);
            } else if ch == '/' && self.byte_at(self.pos + 1) == b'*' {
                let start = self.pos;
                self.pos += 2;
                let mut closed = false;
                while let Some(c) = self.char_at(self.pos) {
                    if c == '*' && self.byte_at(self.pos + 1) == b'/' {
                        self.pos += 2;
                        closed = true;
                        break;
                    }
                    if is_line_break(c) {
                        self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
                    }
                    self.pos += c.len_utf8();
                }
                if !closed {
                    self.error(
                        self.pos,
                        0,
                        diagnostic_messages::ASTERISK_SLASH_EXPECTED,
                        diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                    );
                }
                self.record_comment(start, self.pos, true);
            } else {
                return;
            }
        }
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = token_flags::NONE;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.char_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.pos += 1;
                self.scan_template(true)
            }
            '0'..='9' => self.scan_number(),
            '.' => {
                if self.byte_at(self.pos + 1).is_ascii_digit() {
                    self.scan_number()
                } else if self.byte_at(self.pos + 1) == b'.' && self.byte_at(self.pos + 2) == b'.'
                {
                    self.punct(3, SyntaxKind::DotDotDotToken)
                } else {
                    self.punct(1, SyntaxKind::DotToken)
                }
            }
            '#' => {
                if self.char_at(self.pos + 1).is_some_and(is_identifier_start) {
                    self.pos += 1;
                    self.scan_identifier_rest();
                    self.token_value = self.get_token_text().to_string();
                    SyntaxKind::PrivateIdentifier
                } else {
                    self.pos += 1;
                    SyntaxKind::Unknown
                }
            }
            c if is_identifier_start(c) => {
                self.scan_identifier_rest();
                self.token_value = self.get_token_text().to_string();
                text_to_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
            }
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn punct(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        let next = self.byte_at(self.pos + 1);
        let next2 = self.byte_at(self.pos + 2);
        match ch {
            '{' => self.punct(1, SyntaxKind::OpenBraceToken),
            '}' => self.punct(1, SyntaxKind::CloseBraceToken),
            '(' => self.punct(1, SyntaxKind::OpenParenToken),
            ')' => self.punct(1, SyntaxKind::CloseParenToken),
            '[' => self.punct(1, SyntaxKind::OpenBracketToken),
            ']' => self.punct(1, SyntaxKind::CloseBracketToken),
            ';' => self.punct(1, SyntaxKind::SemicolonToken),
            ',' => self.punct(1, SyntaxKind::CommaToken),
            ':' => self.punct(1, SyntaxKind::ColonToken),
            '~' => self.punct(1, SyntaxKind::TildeToken),
            '@' => self.punct(1, SyntaxKind::AtToken),
            '?' => match (next, next2) {
                (b'.', d) if !d.is_ascii_digit() => self.punct(2, SyntaxKind::QuestionDotToken),
                (b'?', b'=') => self.punct(3, SyntaxKind::QuestionQuestionEqualsToken),
                (b'?', _) => self.punct(2, SyntaxKind::QuestionQuestionToken),
                _ => self.punct(1, SyntaxKind::QuestionToken),
            },
            '<' => match (next, next2) {
                (b'<', b'=') => self.punct(3, SyntaxKind::LessThanLessThanEqualsToken),
                (b'<', _) => self.punct(2, SyntaxKind::LessThanLessThanToken),
                (b'=', _) => self.punct(2, SyntaxKind::LessThanEqualsToken),
                _ => self.punct(1, SyntaxKind::LessThanToken),
            },
            // `>` is always scanned alone; see `re_scan_greater_token`.
            '>' => self.punct(1, SyntaxKind::GreaterThanToken),
            '=' => match (next, next2) {
                (b'=', b'=') => self.punct(3, SyntaxKind::EqualsEqualsEqualsToken),
                (b'=', _) => self.punct(2, SyntaxKind::EqualsEqualsToken),
                (b'>', _) => self.punct(2, SyntaxKind::EqualsGreaterThanToken),
                _ => self.punct(1, SyntaxKind::EqualsToken),
            },
            '!' => match (next, next2) {
                (b'=', b'=') => self.punct(3, SyntaxKind::ExclamationEqualsEqualsToken),
                (b'=', _) => self.punct(2, SyntaxKind::ExclamationEqualsToken),
                _ => self.punct(1, SyntaxKind::ExclamationToken),
            },
            '+' => match next {
                b'+' => self.punct(2, SyntaxKind::PlusPlusToken),
                b'=' => self.punct(2, SyntaxKind::PlusEqualsToken),
                _ => self.punct(1, SyntaxKind::PlusToken),
            },
            '-' => match next {
                b'-' => self.punct(2, SyntaxKind::MinusMinusToken),
                b'=' => self.punct(2, SyntaxKind::MinusEqualsToken),
                _ => self.punct(1, SyntaxKind::MinusToken),
            },
            '*' => match (next, next2) {
                (b'*', b'=') => self.punct(3, SyntaxKind::AsteriskAsteriskEqualsToken),
                (b'*', _) => self.punct(2, SyntaxKind::AsteriskAsteriskToken),
                (b'=', _) => self.punct(2, SyntaxKind::AsteriskEqualsToken),
                _ => self.punct(1, SyntaxKind::AsteriskToken),
            },
            '/' => match next {
                b'=' => self.punct(2, SyntaxKind::SlashEqualsToken),
                _ => self.punct(1, SyntaxKind::SlashToken),
            },
            '%' => match next {
                b'=' => self.punct(2, SyntaxKind::PercentEqualsToken),
                _ => self.punct(1, SyntaxKind::PercentToken),
            },
            '&' => match (next, next2) {
                (b'&', b'=') => self.punct(3, SyntaxKind::AmpersandAmpersandEqualsToken),
                (b'&', _) => self.punct(2, SyntaxKind::AmpersandAmpersandToken),
                (b'=', _) => self.punct(2, SyntaxKind::AmpersandEqualsToken),
                _ => self.punct(1, SyntaxKind::AmpersandToken),
            },
            '|' => match (next, next2) {
                (b'|', b'=') => self.punct(3, SyntaxKind::BarBarEqualsToken),
                (b'|', _) => self.punct(2, SyntaxKind::BarBarToken),
                (b'=', _) => self.punct(2, SyntaxKind::BarEqualsToken),
                _ => self.punct(1, SyntaxKind::BarToken),
            },
            '^' => match next {
                b'=' => self.punct(2, SyntaxKind::CaretEqualsToken),
                _ => self.punct(1, SyntaxKind::CaretToken),
            },
            _ => {
                self.pos += ch.len_utf8();
                SyntaxKind::Unknown
            }
        }
    }

    fn scan_identifier_rest(&mut self) {
        // First char already validated by the caller.
        if let Some(first) = self.char_at(self.pos) {
            self.pos += first.len_utf8();
        }
        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.unterminated_string(start);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.unterminated_string(start);
                break;
            }
            if ch == '\\' {
                self.scan_escape(&mut value);
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    fn unterminated_string(&mut self, start: usize) {
        self.token_flags |= token_flags::UNTERMINATED;
        self.error(
            start,
            self.pos - start,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
    }

    /// Scan an escape sequence starting at the backslash, appending the cooked
    /// character(s) to `out`.
    fn scan_escape(&mut self, out: &mut String) {
        self.pos += 1;
        let Some(ch) = self.char_at(self.pos) else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !self.byte_at(self.pos).is_ascii_digit() => out.push('\0'),
            'x' => {
                let digits = self.take_hex_digits(2);
                out.extend(digits.and_then(char::from_u32));
            }
            'u' => {
                let code = if self.byte_at(self.pos) == b'{' {
                    self.pos += 1;
                    let start = self.pos;
                    while self.byte_at(self.pos).is_ascii_hexdigit() {
                        self.pos += 1;
                    }
                    let code = u32::from_str_radix(&self.text[start..self.pos], 16).ok();
                    if self.byte_at(self.pos) == b'}' {
                        self.pos += 1;
                    }
                    code
                } else {
                    self.take_hex_digits(4)
                };
                out.extend(code.and_then(char::from_u32));
            }
            '\r' => {
                // Line continuation
                if self.byte_at(self.pos) == b'\n' {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    fn take_hex_digits(&mut self, count: usize) -> Option<u32> {
        let start = self.pos;
        for _ in 0..count {
            if !self.byte_at(self.pos).is_ascii_hexdigit() {
                return None;
            }
            self.pos += 1;
        }
        u32::from_str_radix(&self.text[start..self.pos], 16).ok()
    }

    /// Scan template characters after `` ` `` or `}` up to `${` or the closing backtick.
    fn scan_template(&mut self, started_with_backtick: bool) -> SyntaxKind {
        let mut value = String::new();
        let kind = loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= token_flags::UNTERMINATED;
                self.error(
                    self.token_start,
                    self.pos - self.token_start,
                    diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
                    diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                );
                break if started_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break if started_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.byte_at(self.pos + 1) == b'{' => {
                    self.pos += 2;
                    break if started_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => self.scan_escape(&mut value),
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        };
        self.token_value = value;
        kind
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let radix_prefix = if self.byte_at(start) == b'0' {
            match self.byte_at(start + 1) {
                b'x' | b'X' => Some(16),
                b'b' | b'B' => Some(2),
                b'o' | b'O' => Some(8),
                _ => None,
            }
        } else {
            None
        };

        if let Some(radix) = radix_prefix {
            self.pos += 2;
            while let Some(ch) = self.char_at(self.pos) {
                let valid = match radix {
                    16 => ch.is_ascii_hexdigit(),
                    8 => is_octal_digit(ch),
                    _ => is_binary_digit(ch),
                };
                if !valid && ch != '_' {
                    break;
                }
                self.pos += 1;
            }
        } else {
            self.scan_digits();
            if self.byte_at(self.pos) == b'.' {
                self.pos += 1;
                self.scan_digits();
            }
            if matches!(self.byte_at(self.pos), b'e' | b'E') {
                let save = self.pos;
                self.pos += 1;
                if matches!(self.byte_at(self.pos), b'+' | b'-') {
                    self.pos += 1;
                }
                if self.byte_at(self.pos).is_ascii_digit() {
                    self.scan_digits();
                } else {
                    self.pos = save;
                }
            }
        }

        let digits: String = self.text[start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        if self.byte_at(self.pos) == b'n' {
            self.pos += 1;
            self.token_value = digits;
            return SyntaxKind::BigIntLiteral;
        }
        self.token_value = digits;
        SyntaxKind::NumericLiteral
    }

    fn scan_digits(&mut self) {
        while self.byte_at(self.pos).is_ascii_digit() || self.byte_at(self.pos) == b'_' {
            self.pos += 1;
        }
    }

    // =========================================================================
    // Context-dependent rescans
    // =========================================================================

    /// Combine a `>` token with following characters into `>=`, `>>`, `>>>`,
    /// `>>=` or `>>>=`. Called by the parser in binary-operator position.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        let b1 = self.byte_at(self.pos);
        let b2 = self.byte_at(self.pos + 1);
        let b3 = self.byte_at(self.pos + 2);
        let (extra, kind) = match (b1, b2, b3) {
            (b'>', b'>', b'=') => (3, SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
            (b'>', b'>', _) => (2, SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            (b'>', b'=', _) => (2, SyntaxKind::GreaterThanGreaterThanEqualsToken),
            (b'>', _, _) => (1, SyntaxKind::GreaterThanGreaterThanToken),
            (b'=', _, _) => (1, SyntaxKind::GreaterThanEqualsToken),
            _ => (0, SyntaxKind::GreaterThanToken),
        };
        self.pos += extra;
        self.token = kind;
        kind
    }

    /// Rescan a `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(
            self.token,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.unterminated_regex();
                break;
            };
            if is_line_break(ch) {
                self.unterminated_regex();
                break;
            }
            self.pos += ch.len_utf8();
            match ch {
                '\\' => {
                    if let Some(escaped) = self.char_at(self.pos)
                        && !is_line_break(escaped)
                    {
                        self.pos += escaped.len_utf8();
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value = self.get_token_text().to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    fn unterminated_regex(&mut self) {
        self.token_flags |= token_flags::UNTERMINATED;
        self.error(
            self.token_start,
            self.pos - self.token_start,
            diagnostic_messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
            diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
        );
    }

    /// Rescan a `}` token as the continuation of a template literal.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.token = self.scan_template(false);
        self.token
    }
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
