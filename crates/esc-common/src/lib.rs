//! Common types and utilities for the ErrorScript compiler.
//!
//! This crate provides foundational types used across all esc crates:
//! - Diagnostics (`Diagnostic`, codes, message templates)
//! - Position/line-map types for source locations
//! - Comment ranges collected by the scanner

// Diagnostic types and the message table
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, Range};

// Comment ranges and directive helpers
pub mod comments;
pub use comments::CommentRange;
