//! Diagnostic message table.
//!
//! Parser codes follow tsc's numbering; the checked-throws codes live in
//! the 18063.. range next to each other.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: u32 = 1161;
    pub const UNEXPECTED_TOKEN: u32 = 1012;
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: u32 = 2322;
    pub const UNHANDLED_THROWN_TYPE: u32 = 18063;
    pub const UNHANDLED_PROMISE_REJECTION_TYPE: u32 = 18064;
    pub const INFERRED_THROWN_TYPE_NOT_ASSIGNABLE_TO_DECLARED: u32 = 18065;
    pub const INFERRED_REJECTION_TYPE_NOT_ASSIGNABLE_TO_DECLARED: u32 = 18066;
    pub const UNUSED_EXPECT_EXCEPTION_DIRECTIVE: u32 = 18067;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const TYPE_EXPECTED: &str = "Type expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: &str =
        "Unterminated regular expression literal.";
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token.";
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: &str = "Type '{0}' is not assignable to type '{1}'.";
    pub const UNHANDLED_THROWN_TYPE: &str = "Unhandled thrown type: {0}.";
    pub const UNHANDLED_PROMISE_REJECTION_TYPE: &str = "Unhandled promise rejection type: {0}.";
    pub const INFERRED_THROWN_TYPE_NOT_ASSIGNABLE_TO_DECLARED: &str =
        "Inferred thrown type '{0}' is not assignable to declared thrown type '{1}'.";
    pub const INFERRED_REJECTION_TYPE_NOT_ASSIGNABLE_TO_DECLARED: &str =
        "Inferred rejection type '{0}' is not assignable to declared rejection type '{1}'.";
    pub const UNUSED_EXPECT_EXCEPTION_DIRECTIVE: &str = "Unused '@ts-expect-exception' directive.";
}

macro_rules! message {
    ($name:ident, $category:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::$category,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    message!(UNTERMINATED_STRING_LITERAL, Error),
    message!(IDENTIFIER_EXPECTED, Error),
    message!(EXPECTED, Error),
    message!(ASTERISK_SLASH_EXPECTED, Error),
    message!(EXPRESSION_EXPECTED, Error),
    message!(TYPE_EXPECTED, Error),
    message!(INVALID_CHARACTER, Error),
    message!(DECLARATION_OR_STATEMENT_EXPECTED, Error),
    message!(UNTERMINATED_TEMPLATE_LITERAL, Error),
    message!(UNTERMINATED_REGULAR_EXPRESSION_LITERAL, Error),
    message!(UNEXPECTED_TOKEN, Error),
    message!(TYPE_IS_NOT_ASSIGNABLE_TO_TYPE, Error),
    message!(UNHANDLED_THROWN_TYPE, Error),
    message!(UNHANDLED_PROMISE_REJECTION_TYPE, Error),
    message!(INFERRED_THROWN_TYPE_NOT_ASSIGNABLE_TO_DECLARED, Error),
    message!(INFERRED_REJECTION_TYPE_NOT_ASSIGNABLE_TO_DECLARED, Error),
    message!(UNUSED_EXPECT_EXCEPTION_DIRECTIVE, Error),
];
