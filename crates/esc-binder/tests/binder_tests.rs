use super::*;
use esc_parser::node::NodeArena;
use esc_parser::syntax_kind_ext;
use esc_parser::{NodeIndex, ParserState};

fn bind(source: &str) -> (NodeArena, NodeIndex, BinderState) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    (arena, root, binder)
}

fn find_all(arena: &NodeArena, root: NodeIndex, kind: u16) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        if arena.kind_of(idx) == Some(kind) {
            out.push(idx);
        }
        let mut children = arena.get_children(idx);
        children.reverse();
        stack.extend(children);
    }
    out
}

/// Identifier nodes with the given text, in source order.
fn identifiers(arena: &NodeArena, root: NodeIndex, text: &str) -> Vec<NodeIndex> {
    find_all(arena, root, esc_scanner::SyntaxKind::Identifier as u16)
        .into_iter()
        .filter(|&idx| arena.identifier_text(idx) == Some(text))
        .collect()
}

#[test]
fn test_top_level_declarations_in_file_locals() {
    let (_, _, binder) = bind(
        "function f() {}\nclass C {}\ninterface I {}\ntype T = number;\nconst x = 1;\nvar y;",
    );
    for name in ["f", "C", "I", "T", "x", "y"] {
        assert!(binder.file_locals.contains(name), "missing file local {name}");
    }
    let f = binder.file_locals.get("f").and_then(|id| binder.get_symbol(id));
    assert!(f.is_some_and(|s| s.has_flags(symbol_flags::FUNCTION)));
}

#[test]
fn test_overloads_share_one_symbol() {
    let (_, _, binder) = bind(
        "function p(x: string): number;\nfunction p(x: number): number;\nfunction p(x: any): number { return 1; }",
    );
    let sym = binder
        .file_locals
        .get("p")
        .and_then(|id| binder.get_symbol(id))
        .expect("symbol p");
    assert_eq!(sym.declarations.len(), 3, "overloads and implementation merge");
    assert_eq!(sym.value_declaration, sym.declarations[0]);
}

#[test]
fn test_var_hoists_out_of_blocks() {
    let (_, _, binder) = bind("function f() { if (true) { var a = 1; let b = 2; } }");
    assert!(!binder.file_locals.contains("a"));
    let f_scope = binder
        .scopes
        .iter()
        .find(|s| s.kind == ContainerKind::Function)
        .expect("function scope");
    assert!(f_scope.table.contains("a"), "var is hoisted into the function scope");
    assert!(!f_scope.table.contains("b"), "let stays in its block");
}

#[test]
fn test_resolve_identifier_through_scopes() {
    let source = "const outer = 1;\nfunction f(param: number) {\n  const inner = param;\n  return outer + inner;\n}";
    let (arena, root, binder) = bind(source);

    let uses = identifiers(&arena, root, "outer");
    let resolved = binder.resolve_identifier(&arena, uses[1]);
    assert_eq!(resolved, binder.file_locals.get("outer"));

    let param_uses = identifiers(&arena, root, "param");
    let param_sym = binder
        .resolve_identifier(&arena, param_uses[1])
        .expect("param resolves");
    let decl = binder.get_symbol(param_sym).map(|s| s.declarations[0]);
    assert_eq!(
        decl.and_then(|d| arena.kind_of(d)),
        Some(syntax_kind_ext::PARAMETER)
    );
}

#[test]
fn test_inner_declaration_shadows_outer() {
    let source = "const v = 1;\nfunction f() { const v = 2; return v; }";
    let (arena, root, binder) = bind(source);
    let uses = identifiers(&arena, root, "v");
    let resolved = binder.resolve_identifier(&arena, uses[2]);
    assert!(resolved.is_some());
    assert_ne!(resolved, binder.file_locals.get("v"), "inner v shadows outer v");
}

#[test]
fn test_catch_variable_is_scoped_to_clause() {
    let source = "try { x(); } catch (e) { e; }\ne;";
    let (arena, root, binder) = bind(source);
    let uses = identifiers(&arena, root, "e");
    assert_eq!(uses.len(), 3);
    let inner = binder.resolve_identifier(&arena, uses[1]).expect("e in catch");
    let decl = binder.get_symbol(inner).map(|s| s.declarations[0]);
    assert_eq!(
        decl.and_then(|d| arena.kind_of(arena.parent_of(d))),
        Some(syntax_kind_ext::CATCH_CLAUSE)
    );
    assert_eq!(binder.resolve_identifier(&arena, uses[2]), None);
}

#[test]
fn test_class_members_and_statics() {
    let source = "class C {\n  x = 1;\n  constructor(private y: number) {}\n  m() {}\n  static s() {}\n  get g() { return 1; }\n  set g(v) {}\n}";
    let (_, _, binder) = bind(source);
    let class_sym = binder.file_locals.get("C").expect("class C");
    for name in ["x", "y", "m", "g", "__constructor"] {
        assert!(
            binder.get_own_member(class_sym, name, false).is_some(),
            "missing instance member {name}"
        );
    }
    assert!(binder.get_own_member(class_sym, "s", true).is_some());
    assert!(binder.get_own_member(class_sym, "s", false).is_none());

    let accessor = binder
        .get_own_member(class_sym, "g", false)
        .and_then(|id| binder.get_symbol(id))
        .expect("accessor symbol");
    assert!(accessor.has_flags(symbol_flags::GET_ACCESSOR));
    assert!(accessor.has_flags(symbol_flags::SET_ACCESSOR));
    assert_eq!(accessor.declarations.len(), 2);
    assert_eq!(accessor.parent, class_sym);
}

#[test]
fn test_method_overloads_merge() {
    let source = "class C {\n  m(x: string): void;\n  m(x: number): void;\n  m(x: any) {}\n}";
    let (_, _, binder) = bind(source);
    let class_sym = binder.file_locals.get("C").expect("class C");
    let method = binder
        .get_own_member(class_sym, "m", false)
        .and_then(|id| binder.get_symbol(id))
        .expect("method m");
    assert_eq!(method.declarations.len(), 3);
}

#[test]
fn test_interface_declarations_merge_members() {
    let source = "interface A { f(): void; }\ninterface A { g: number; (): void; }";
    let (_, _, binder) = bind(source);
    let iface = binder.file_locals.get("A").expect("interface A");
    assert!(binder.get_own_member(iface, "f", false).is_some());
    assert!(binder.get_own_member(iface, "g", false).is_some());
    assert!(binder.get_own_member(iface, "__call", false).is_some());
    assert_eq!(binder.get_symbol(iface).map(|s| s.declarations.len()), Some(2));
}

#[test]
fn test_lookup_member_through_extends() {
    let source = "class Base { run() {} }\nclass Derived extends Base { other() {} }";
    let (arena, _, binder) = bind(source);
    let derived = binder.file_locals.get("Derived").expect("Derived");
    let base = binder.file_locals.get("Base").expect("Base");
    assert_eq!(binder.get_base_symbols(&arena, derived), vec![base]);
    let run = binder.lookup_member(&arena, derived, "run", false);
    assert_eq!(run, binder.get_own_member(base, "run", false));
    assert!(binder.lookup_member(&arena, derived, "missing", false).is_none());
}

#[test]
fn test_self_extending_class_terminates() {
    let source = "class A extends B {}\nclass B extends A {}";
    let (arena, _, binder) = bind(source);
    let a = binder.file_locals.get("A").expect("A");
    assert!(binder.lookup_member(&arena, a, "nothing", false).is_none());
}

#[test]
fn test_binding_patterns_declare_each_name() {
    let (_, _, binder) = bind("const { a, b: [c, ...d] } = obj;\nlet [e = 1] = arr;");
    for name in ["a", "c", "d", "e"] {
        assert!(binder.file_locals.contains(name), "missing {name}");
    }
    assert!(!binder.file_locals.contains("b"), "property keys are not bindings");
}

#[test]
fn test_named_function_expression_sees_itself() {
    let source = "const f = function fact(n) { return fact(n); };";
    let (arena, root, binder) = bind(source);
    assert!(!binder.file_locals.contains("fact"));
    let uses = identifiers(&arena, root, "fact");
    let resolved = binder.resolve_identifier(&arena, uses[1]).expect("fact resolves");
    let decl = binder.get_symbol(resolved).map(|s| s.declarations[0]);
    assert_eq!(
        decl.and_then(|d| arena.kind_of(d)),
        Some(syntax_kind_ext::FUNCTION_EXPRESSION)
    );
}

#[test]
fn test_type_and_value_meanings_are_separate() {
    let source = "interface Shape {}\nconst Shape = 1;\nlet s: Shape;";
    let (arena, root, binder) = bind(source);
    let uses = identifiers(&arena, root, "Shape");
    let value = binder.resolve_identifier(&arena, uses[1]);
    let ty = binder.resolve_type_name(&arena, uses[2], "Shape");
    assert_eq!(value, ty, "interface and const merge into one symbol");
    let sym = value.and_then(|id| binder.get_symbol(id)).expect("Shape");
    assert!(sym.has_flags(symbol_flags::INTERFACE));
    assert!(sym.has_flags(symbol_flags::BLOCK_SCOPED_VARIABLE));
}

#[test]
fn test_function_type_parameters_do_not_leak() {
    let (_, _, binder) = bind("let cb: (leak: number) => void;");
    assert!(!binder.file_locals.contains("leak"));
}

#[test]
fn test_rebinding_starts_fresh() {
    let mut parser = ParserState::new("a.ts".to_string(), "const a = 1;".to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let first = binder.symbols.len();
    binder.bind_source_file(&arena, root);
    assert_eq!(binder.symbols.len(), first);
}
