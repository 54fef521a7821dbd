//! Name binder for the ErrorScript compiler.
//!
//! Walks a parsed source file once and produces:
//! - a `SymbolArena` with one `Symbol` per declared name (overloads and
//!   merged declarations share a symbol),
//! - persistent scopes keyed by their container node, so the checker can
//!   resolve any identifier after binding has finished,
//! - member tables for classes and interfaces.

mod scopes;
mod state;
mod state_binding;
mod state_lookup;
mod state_node_binding;
mod symbols;

pub use scopes::{ContainerKind, Scope, ScopeId};
pub use state::BinderState;
pub use symbols::{Symbol, SymbolArena, SymbolId, SymbolTable, symbol_flags};

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod binder_tests;

#[cfg(test)]
#[path = "../tests/symbols_tests.rs"]
mod symbols_tests;
