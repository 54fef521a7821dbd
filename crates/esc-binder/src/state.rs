//! Binder state: symbol arena, persistent scopes and the declaration tables.

use esc_parser::{NodeIndex, node::NodeArena};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::scopes::{ContainerKind, Scope, ScopeId};
use crate::symbols::{SymbolArena, SymbolId, SymbolTable, symbol_flags};

/// Which table of an owner symbol a member goes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MemberTable {
    Instance,
    Static,
}

pub struct BinderState {
    pub symbols: SymbolArena,
    /// Persistent scopes; index is the `ScopeId`.
    pub scopes: Vec<Scope>,
    pub(crate) current_scope_id: ScopeId,
    /// Declaration node -> symbol.
    pub node_symbols: FxHashMap<u32, SymbolId>,
    /// Container node -> scope it opened.
    pub node_scope_ids: FxHashMap<u32, ScopeId>,
    /// Symbols declared at the top level of the file.
    pub file_locals: SymbolTable,
}

impl Default for BinderState {
    fn default() -> Self {
        Self::new()
    }
}

impl BinderState {
    pub fn new() -> BinderState {
        BinderState {
            symbols: SymbolArena::new(),
            scopes: Vec::new(),
            current_scope_id: ScopeId::NONE,
            node_symbols: FxHashMap::default(),
            node_scope_ids: FxHashMap::default(),
            file_locals: SymbolTable::new(),
        }
    }

    /// Bind a whole source file. The binder can be reused; every call starts
    /// from empty tables.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        *self = BinderState::new();
        let Some(source) = arena.get_source_file_at(root) else {
            return;
        };
        debug!(file = %source.file_name, "binding source file");

        self.enter_scope(ContainerKind::SourceFile, root);
        for stmt in source.statements.iter() {
            self.bind_node(arena, stmt);
        }
        self.exit_scope();

        debug!(
            file = %source.file_name,
            symbols = self.symbols.len(),
            scopes = self.scopes.len(),
            "bound source file"
        );
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    pub(crate) fn enter_scope(&mut self, kind: ContainerKind, node: NodeIndex) {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: self.current_scope_id,
            kind,
            container_node: node,
            table: SymbolTable::new(),
        });
        self.node_scope_ids.insert(node.0, id);
        self.current_scope_id = id;
    }

    pub(crate) fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.get(self.current_scope_id.0 as usize) {
            self.current_scope_id = scope.parent;
        }
    }

    /// Nearest enclosing scope that owns `var` declarations.
    fn function_scope_id(&self) -> ScopeId {
        let mut id = self.current_scope_id;
        while let Some(scope) = self.scopes.get(id.0 as usize) {
            if scope.kind.is_function_scope() {
                return id;
            }
            id = scope.parent;
        }
        self.current_scope_id
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Check if two symbol flag sets can be merged into one symbol.
    #[must_use]
    pub const fn can_merge_flags(existing_flags: u32, new_flags: u32) -> bool {
        if existing_flags & symbol_flags::INTERFACE != 0 && new_flags & symbol_flags::INTERFACE != 0
        {
            return true;
        }
        if (existing_flags & symbol_flags::CLASS != 0 && new_flags & symbol_flags::INTERFACE != 0)
            || (existing_flags & symbol_flags::INTERFACE != 0
                && new_flags & symbol_flags::CLASS != 0)
        {
            return true;
        }
        // Overload signatures and their implementation.
        if existing_flags & symbol_flags::FUNCTION != 0 && new_flags & symbol_flags::FUNCTION != 0 {
            return true;
        }
        if existing_flags & symbol_flags::METHOD != 0 && new_flags & symbol_flags::METHOD != 0 {
            return true;
        }
        if existing_flags & symbol_flags::CONSTRUCTOR != 0
            && new_flags & symbol_flags::CONSTRUCTOR != 0
        {
            return true;
        }
        // get/set pairs
        if existing_flags & symbol_flags::ACCESSOR != 0
            && new_flags & symbol_flags::ACCESSOR != 0
            && existing_flags & new_flags & symbol_flags::ACCESSOR == 0
        {
            return true;
        }
        if existing_flags & symbol_flags::FUNCTION_SCOPED_VARIABLE != 0
            && new_flags & symbol_flags::FUNCTION_SCOPED_VARIABLE != 0
        {
            return true;
        }
        // A type-only declaration can share a name with a value.
        let existing_type_only = existing_flags & symbol_flags::VALUE == 0;
        let new_type_only = new_flags & symbol_flags::VALUE == 0;
        (existing_type_only && new_flags & symbol_flags::TYPE == 0)
            || (new_type_only && existing_flags & symbol_flags::TYPE == 0)
    }

    /// Declare `name` in the current scope, or in the nearest function scope
    /// for `var`-like declarations.
    pub(crate) fn declare_symbol(
        &mut self,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
        is_exported: bool,
    ) -> SymbolId {
        let scope_id = if flags & symbol_flags::FUNCTION_SCOPED_VARIABLE != 0 {
            self.function_scope_id()
        } else {
            self.current_scope_id
        };
        let existing = self
            .scopes
            .get(scope_id.0 as usize)
            .and_then(|scope| scope.table.get(name));

        let sym_id = match existing {
            Some(id) if self.try_merge(id, flags, declaration) => id,
            _ => {
                let id = self.alloc_symbol(name, flags, declaration);
                if let Some(scope) = self.scopes.get_mut(scope_id.0 as usize) {
                    scope.table.set(name.to_string(), id);
                    if scope.kind == ContainerKind::SourceFile {
                        self.file_locals.set(name.to_string(), id);
                    }
                }
                id
            }
        };
        if is_exported && let Some(sym) = self.symbols.get_mut(sym_id) {
            sym.is_exported = true;
        }
        self.node_symbols.insert(declaration.0, sym_id);
        sym_id
    }

    /// Declare a member of a class or interface symbol.
    pub(crate) fn declare_member(
        &mut self,
        owner: SymbolId,
        table: MemberTable,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
    ) -> SymbolId {
        let existing = self.symbols.get(owner).and_then(|sym| {
            let members = match table {
                MemberTable::Instance => sym.members.as_deref(),
                MemberTable::Static => sym.exports.as_deref(),
            };
            members.and_then(|m| m.get(name))
        });
        if let Some(id) = existing
            && self.try_merge(id, flags, declaration)
        {
            self.node_symbols.insert(declaration.0, id);
            return id;
        }

        let id = self.alloc_symbol(name, flags, declaration);
        if let Some(member) = self.symbols.get_mut(id) {
            member.parent = owner;
        }
        if let Some(sym) = self.symbols.get_mut(owner) {
            let slot = match table {
                MemberTable::Instance => &mut sym.members,
                MemberTable::Static => &mut sym.exports,
            };
            slot.get_or_insert_with(Box::default)
                .set(name.to_string(), id);
        }
        self.node_symbols.insert(declaration.0, id);
        id
    }

    /// A symbol for a declaration that has no name in any scope
    /// (anonymous classes). Reachable only through `node_symbols`.
    pub(crate) fn declare_anonymous(
        &mut self,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
    ) -> SymbolId {
        let id = self.alloc_symbol(name, flags, declaration);
        self.node_symbols.insert(declaration.0, id);
        id
    }

    fn alloc_symbol(&mut self, name: &str, flags: u32, declaration: NodeIndex) -> SymbolId {
        let id = self.symbols.alloc(flags, name.to_string());
        if let Some(sym) = self.symbols.get_mut(id) {
            sym.declarations.push(declaration);
            if flags & symbol_flags::VALUE != 0 {
                sym.value_declaration = declaration;
            }
        }
        id
    }

    fn try_merge(&mut self, existing: SymbolId, flags: u32, declaration: NodeIndex) -> bool {
        let Some(sym) = self.symbols.get_mut(existing) else {
            return false;
        };
        if !Self::can_merge_flags(sym.flags, flags) {
            debug!(
                name = %sym.escaped_name,
                existing_flags = sym.flags,
                new_flags = flags,
                "redeclaration shadows previous symbol"
            );
            return false;
        }
        sym.flags |= flags;
        if sym.value_declaration.is_none() && flags & symbol_flags::VALUE != 0 {
            sym.value_declaration = declaration;
        }
        if !sym.declarations.contains(&declaration) {
            sym.declarations.push(declaration);
        }
        true
    }
}
