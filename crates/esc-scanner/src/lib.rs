//! TypeScript scanner/tokenizer for the ErrorScript compiler.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` - Character classification utilities

pub mod char_codes;
mod scanner_impl;
mod syntax_kind;

pub use scanner_impl::{ScannerDiagnostic, ScannerSnapshot, ScannerState, token_flags};
pub use syntax_kind::{SyntaxKind, text_to_keyword};
