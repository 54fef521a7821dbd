//! Queries over a finished binding: symbols, scopes, name resolution and
//! member lookup.

use esc_parser::node::NodeArena;
use esc_parser::syntax_kind_ext::{CLASS_DECLARATION, CLASS_EXPRESSION, INTERFACE_DECLARATION};
use esc_parser::NodeIndex;
use esc_scanner::SyntaxKind;

use crate::scopes::{Scope, ScopeId};
use crate::state::BinderState;
use crate::symbols::{Symbol, SymbolId, symbol_flags};

/// Inheritance chains longer than this are treated as cyclic.
const MAX_HERITAGE_DEPTH: usize = 32;

impl BinderState {
    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Symbol declared by a declaration node.
    pub fn get_node_symbol(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&node.0).copied()
    }

    pub fn get_scope(&self, id: ScopeId) -> Option<&Scope> {
        if id.is_none() {
            return None;
        }
        self.scopes.get(id.0 as usize)
    }

    /// Innermost scope containing `node` (a container node maps to its own scope).
    pub fn enclosing_scope(&self, arena: &NodeArena, node: NodeIndex) -> ScopeId {
        let mut current = node;
        while current.is_some() {
            if let Some(&scope) = self.node_scope_ids.get(&current.0) {
                return scope;
            }
            current = arena.parent_of(current);
        }
        ScopeId::NONE
    }

    /// Resolve `name` as seen from `location`, considering only symbols whose
    /// flags intersect `meaning` (`symbol_flags::VALUE` or `symbol_flags::TYPE`).
    pub fn resolve_name(
        &self,
        arena: &NodeArena,
        location: NodeIndex,
        name: &str,
        meaning: u32,
    ) -> Option<SymbolId> {
        let mut scope_id = self.enclosing_scope(arena, location);
        while let Some(scope) = self.get_scope(scope_id) {
            if let Some(id) = scope.table.get(name)
                && self.symbols.get(id).is_some_and(|s| s.has_flags(meaning))
            {
                return Some(id);
            }
            scope_id = scope.parent;
        }
        None
    }

    /// Resolve an identifier expression to the value it names.
    pub fn resolve_identifier(&self, arena: &NodeArena, ident: NodeIndex) -> Option<SymbolId> {
        let name = arena.identifier_text(ident)?;
        self.resolve_name(arena, ident, name, symbol_flags::VALUE)
    }

    /// Resolve a type name (class, interface, alias or type parameter).
    pub fn resolve_type_name(
        &self,
        arena: &NodeArena,
        location: NodeIndex,
        name: &str,
    ) -> Option<SymbolId> {
        self.resolve_name(arena, location, name, symbol_flags::TYPE)
    }

    /// Direct member of a class or interface, without inheritance.
    pub fn get_own_member(&self, owner: SymbolId, name: &str, is_static: bool) -> Option<SymbolId> {
        let sym = self.symbols.get(owner)?;
        let table = if is_static {
            sym.exports.as_deref()?
        } else {
            sym.members.as_deref()?
        };
        table.get(name)
    }

    /// Symbols named in the `extends` clauses of a class or interface.
    pub fn get_base_symbols(&self, arena: &NodeArena, owner: SymbolId) -> Vec<SymbolId> {
        let Some(sym) = self.symbols.get(owner) else {
            return Vec::new();
        };
        let mut bases = Vec::new();
        for &decl in &sym.declarations {
            let Some(node) = arena.get(decl) else {
                continue;
            };
            let heritage = match node.kind {
                CLASS_DECLARATION | CLASS_EXPRESSION => {
                    arena.get_class(node).and_then(|c| c.heritage_clauses.as_ref())
                }
                INTERFACE_DECLARATION => arena
                    .get_interface(node)
                    .and_then(|i| i.heritage_clauses.as_ref()),
                _ => None,
            };
            let Some(heritage) = heritage else {
                continue;
            };
            for clause_idx in heritage.iter() {
                let Some(clause) = arena
                    .get(clause_idx)
                    .and_then(|n| arena.get_heritage_clause(n))
                else {
                    continue;
                };
                if clause.token != SyntaxKind::ExtendsKeyword as u16 {
                    continue;
                }
                for ty in clause.types.iter() {
                    let Some(expr) = arena
                        .get(ty)
                        .and_then(|n| arena.get_expr_type_args(n))
                        .map(|e| e.expression)
                    else {
                        continue;
                    };
                    let Some(name) = arena.identifier_text(expr) else {
                        continue;
                    };
                    if let Some(base) = self.resolve_type_name(arena, decl, name)
                        && base != owner
                    {
                        bases.push(base);
                    }
                }
            }
        }
        bases
    }

    /// Member lookup through the `extends` chain, nearest declaration first.
    pub fn lookup_member(
        &self,
        arena: &NodeArena,
        owner: SymbolId,
        name: &str,
        is_static: bool,
    ) -> Option<SymbolId> {
        let mut pending = vec![owner];
        let mut visited = Vec::new();
        while let Some(current) = pending.pop() {
            if visited.contains(&current) || visited.len() >= MAX_HERITAGE_DEPTH {
                continue;
            }
            visited.push(current);
            if let Some(found) = self.get_own_member(current, name, is_static) {
                return Some(found);
            }
            let mut bases = self.get_base_symbols(arena, current);
            bases.reverse();
            pending.extend(bases);
        }
        None
    }
}
