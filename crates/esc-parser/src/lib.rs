//! TypeScript parser and AST types for the ErrorScript compiler.
//!
//! This crate provides:
//! - `ParserState` - Recursive descent parser producing a thin-node arena
//! - `NodeArena` - Node storage with typed data pools
//! - `NodeIndex` / `NodeList` - Handles into the arena
//! - `syntax_kind_ext` - Node kinds above the token range

pub mod parser;

pub use parser::{
    NodeIndex, NodeList, ParseDiagnostic, ParserState, modifier_flags, node, node_flags,
    syntax_kind_ext,
};
