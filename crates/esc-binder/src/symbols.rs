//! Symbols, symbol tables and the symbol arena.

use esc_parser::NodeIndex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 0;
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 1;
    pub const PROPERTY: u32 = 1 << 2;
    pub const FUNCTION: u32 = 1 << 4;
    pub const CLASS: u32 = 1 << 5;
    pub const INTERFACE: u32 = 1 << 6;
    pub const METHOD: u32 = 1 << 8;
    pub const CONSTRUCTOR: u32 = 1 << 9;
    pub const GET_ACCESSOR: u32 = 1 << 10;
    pub const SET_ACCESSOR: u32 = 1 << 11;
    pub const TYPE_PARAMETER: u32 = 1 << 13;
    pub const TYPE_ALIAS: u32 = 1 << 14;
    pub const STATIC: u32 = 1 << 20;
    pub const PRIVATE: u32 = 1 << 21;
    pub const ABSTRACT: u32 = 1 << 22;

    pub const VARIABLE: u32 = FUNCTION_SCOPED_VARIABLE | BLOCK_SCOPED_VARIABLE;
    pub const ACCESSOR: u32 = GET_ACCESSOR | SET_ACCESSOR;
    pub const VALUE: u32 = VARIABLE | PROPERTY | FUNCTION | CLASS | METHOD | ACCESSOR;
    pub const TYPE: u32 = CLASS | INTERFACE | TYPE_ALIAS | TYPE_PARAMETER;
    /// Members that can be invoked and therefore carry a throw effect.
    pub const CALLABLE: u32 = FUNCTION | METHOD | CONSTRUCTOR;
}

/// Handle to a symbol in a `SymbolArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// A named entity. Overload signatures and merged declarations
/// (interface + interface, get + set) accumulate in `declarations`
/// in source order.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub id: SymbolId,
    pub flags: u32,
    pub escaped_name: String,
    pub declarations: SmallVec<[NodeIndex; 1]>,
    /// First value-space declaration (the function, class or variable node).
    pub value_declaration: NodeIndex,
    /// Instance members of classes and interfaces.
    pub members: Option<Box<SymbolTable>>,
    /// Static members of classes.
    pub exports: Option<Box<SymbolTable>>,
    /// Owning class/interface for members.
    pub parent: SymbolId,
    pub is_exported: bool,
}

impl Symbol {
    fn new(id: SymbolId, flags: u32, escaped_name: String) -> Symbol {
        Symbol {
            id,
            flags,
            escaped_name,
            declarations: SmallVec::new(),
            value_declaration: NodeIndex::NONE,
            members: None,
            exports: None,
            parent: SymbolId::NONE,
            is_exported: false,
        }
    }

    #[inline]
    pub const fn has_flags(&self, flags: u32) -> bool {
        self.flags & flags != 0
    }
}

/// Name to symbol map for one scope or member table.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    map: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.map.get(name).copied()
    }

    pub fn set(&mut self, name: String, id: SymbolId) {
        self.map.insert(name, id);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolId)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Owning storage for all symbols of one binding pass.
#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> SymbolArena {
        SymbolArena::default()
    }

    pub fn alloc(&mut self, flags: u32, name: String) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol::new(id, flags, name));
        id
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        if id.is_none() {
            return None;
        }
        self.symbols.get(id.0 as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        if id.is_none() {
            return None;
        }
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}
