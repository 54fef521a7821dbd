//! Persistent lexical scopes.

use esc_parser::NodeIndex;

use crate::symbols::SymbolTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// What kind of node owns a scope. `var` declarations and parameters live in
/// the nearest `Function` or `SourceFile` scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    SourceFile,
    Function,
    /// Class, interface or type alias: holds type parameters and, for class
    /// expressions, the class's own name.
    Class,
    Block,
}

impl ContainerKind {
    #[inline]
    pub const fn is_function_scope(self) -> bool {
        matches!(self, ContainerKind::SourceFile | ContainerKind::Function)
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: ScopeId,
    pub kind: ContainerKind,
    pub container_node: NodeIndex,
    pub table: SymbolTable,
}
