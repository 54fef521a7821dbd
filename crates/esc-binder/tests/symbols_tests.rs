use super::*;

#[test]
fn test_symbol_arena_alloc_and_get() {
    let mut arena = SymbolArena::new();
    assert!(arena.is_empty());
    let id = arena.alloc(symbol_flags::FUNCTION, "f".to_string());
    assert_eq!(id, SymbolId(0));
    let sym = arena.get(id).expect("allocated symbol");
    assert_eq!(sym.escaped_name, "f");
    assert!(sym.declarations.is_empty());
    assert!(sym.value_declaration.is_none());
    assert!(sym.parent.is_none());
    assert!(arena.get(SymbolId::NONE).is_none());
}

#[test]
fn test_symbol_table_set_and_get() {
    let mut table = SymbolTable::new();
    table.set("a".to_string(), SymbolId(3));
    assert_eq!(table.get("a"), Some(SymbolId(3)));
    assert_eq!(table.get("b"), None);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_flag_groups() {
    assert_ne!(symbol_flags::VALUE & symbol_flags::FUNCTION, 0);
    assert_ne!(symbol_flags::TYPE & symbol_flags::CLASS, 0);
    assert_ne!(symbol_flags::VALUE & symbol_flags::CLASS, 0);
    assert_eq!(symbol_flags::VALUE & symbol_flags::INTERFACE, 0);
    assert_eq!(symbol_flags::TYPE & symbol_flags::BLOCK_SCOPED_VARIABLE, 0);
}

#[test]
fn test_can_merge_flags() {
    assert!(BinderState::can_merge_flags(symbol_flags::FUNCTION, symbol_flags::FUNCTION));
    assert!(BinderState::can_merge_flags(symbol_flags::INTERFACE, symbol_flags::INTERFACE));
    assert!(BinderState::can_merge_flags(symbol_flags::CLASS, symbol_flags::INTERFACE));
    assert!(BinderState::can_merge_flags(
        symbol_flags::GET_ACCESSOR,
        symbol_flags::SET_ACCESSOR
    ));
    assert!(!BinderState::can_merge_flags(
        symbol_flags::GET_ACCESSOR,
        symbol_flags::GET_ACCESSOR
    ));
    assert!(!BinderState::can_merge_flags(
        symbol_flags::BLOCK_SCOPED_VARIABLE,
        symbol_flags::BLOCK_SCOPED_VARIABLE
    ));
    assert!(!BinderState::can_merge_flags(symbol_flags::CLASS, symbol_flags::FUNCTION));
}
