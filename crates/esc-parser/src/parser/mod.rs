//! Parser module: thin-node arena AST plus the recursive descent parser.

mod base;
pub mod flags;
pub mod node;
mod node_access;
mod node_arena;
mod state;
mod state_expressions;
mod state_statements;
mod state_statements_class_members;
mod state_types;
pub mod syntax_kind_ext;

pub use base::{NodeIndex, NodeList};
pub use flags::{modifier_flags, node_flags};
pub use node::NodeArena;
pub use state::{ParseDiagnostic, ParserState};
