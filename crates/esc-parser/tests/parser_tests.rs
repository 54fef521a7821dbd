use super::*;
use crate::parser::flags::node_flags;
use crate::parser::node::NodeArena;
use crate::parser::syntax_kind_ext;

fn parse(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn parse_clean(source: &str) -> (ParserState, NodeIndex) {
    let (parser, root) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "expected no diagnostics for {source:?}, got {:?}",
        parser.get_diagnostics()
    );
    (parser, root)
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    arena
        .get_source_file_at(root)
        .map(|sf| sf.statements.nodes.clone())
        .unwrap_or_default()
}

fn first_of_kind(arena: &NodeArena, root: NodeIndex, kind: u16) -> Option<NodeIndex> {
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        if arena.kind_of(idx) == Some(kind) {
            return Some(idx);
        }
        let mut children = arena.get_children(idx);
        children.reverse();
        stack.extend(children);
    }
    None
}

#[test]
fn test_function_with_throws_clause() {
    let (parser, root) = parse_clean("function f(): number throws RangeError | TypeError { return 1; }");
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    assert_eq!(stmts.len(), 1);
    let node = arena.get(stmts[0]).expect("function node");
    assert_eq!(node.kind, syntax_kind_ext::FUNCTION_DECLARATION);
    let func = arena.get_function(node).expect("function data");
    assert!(func.throws_clause.is_some());
    assert!(func.rejects_clause.is_none());
    assert_eq!(
        arena.kind_of(func.throws_clause),
        Some(syntax_kind_ext::UNION_TYPE),
        "throws clause should hold the union type"
    );
}

#[test]
fn test_throws_and_rejects_in_either_order() {
    let (parser, root) = parse_clean(
        "declare function a(): Promise<void> rejects TypeError throws RangeError;\n\
         declare function b(): Promise<void> throws RangeError rejects TypeError;",
    );
    let arena = parser.get_arena();
    for stmt in statements(arena, root) {
        let node = arena.get(stmt).expect("node");
        let func = arena.get_function(node).expect("function data");
        assert!(func.throws_clause.is_some());
        assert!(func.rejects_clause.is_some());
        assert!(func.body.is_none(), "declare function has no body");
    }
}

#[test]
fn test_throws_is_still_an_identifier() {
    let (parser, root) = parse_clean("let throws = 1; let rejects = throws + 1;");
    assert_eq!(statements(parser.get_arena(), root).len(), 2);
}

#[test]
fn test_overload_signatures() {
    let (parser, root) = parse_clean(
        "function p(x: string): string throws SyntaxError;\n\
         function p(x: number): number;\n\
         function p(x: any): any { return x; }",
    );
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    assert_eq!(stmts.len(), 3);
    let bodies: Vec<bool> = stmts
        .iter()
        .filter_map(|&s| arena.get(s).and_then(|n| arena.get_function(n)))
        .map(|f| f.body.is_some())
        .collect();
    assert_eq!(bodies, vec![false, false, true]);
}

#[test]
fn test_class_members_with_effects() {
    let source = r#"
class Repo extends Base<string> implements Store {
    private readonly items: string[] = [];
    constructor(public name: string) throws TypeError { super(); }
    get size(): number { return this.items.length; }
    async load(): Promise<void> rejects NetworkError { await fetch("x"); }
    static create(): Repo throws Error { return new Repo("a"); }
}
"#;
    let (parser, root) = parse_clean(source);
    let arena = parser.get_arena();
    let class_idx = first_of_kind(arena, root, syntax_kind_ext::CLASS_DECLARATION).expect("class");
    let class = arena
        .get(class_idx)
        .and_then(|n| arena.get_class(n))
        .expect("class data");
    assert_eq!(class.members.len(), 5);
    assert_eq!(class.heritage_clauses.as_ref().map(|h| h.len()), Some(2));

    let ctor = first_of_kind(arena, root, syntax_kind_ext::CONSTRUCTOR).expect("constructor");
    let ctor = arena.get(ctor).and_then(|n| arena.get_constructor(n)).expect("ctor data");
    assert!(ctor.throws_clause.is_some());
    let param = arena
        .get(ctor.parameters.nodes[0])
        .and_then(|n| arena.get_parameter(n))
        .expect("parameter");
    assert!(param.modifiers.is_some(), "parameter property keeps its modifier");
}

#[test]
fn test_interface_signatures_with_effects() {
    let (parser, root) = parse_clean(
        "interface Api {\n  (x: number): void throws RangeError;\n  get(key: string): Promise<string> rejects TypeError;\n  readonly name: string\n}",
    );
    let arena = parser.get_arena();
    let call = first_of_kind(arena, root, syntax_kind_ext::CALL_SIGNATURE).expect("call signature");
    let call = arena.get(call).and_then(|n| arena.get_signature(n)).expect("sig");
    assert!(call.throws_clause.is_some());
    let method =
        first_of_kind(arena, root, syntax_kind_ext::METHOD_SIGNATURE).expect("method signature");
    let method = arena.get(method).and_then(|n| arena.get_signature(n)).expect("sig");
    assert!(method.rejects_clause.is_some());
    assert!(first_of_kind(arena, root, syntax_kind_ext::PROPERTY_SIGNATURE).is_some());
}

#[test]
fn test_function_type_with_throws() {
    let (parser, root) =
        parse_clean("function run(cb: (x: number) => void throws RangeError): void { cb(1); }");
    let arena = parser.get_arena();
    let fn_type = first_of_kind(arena, root, syntax_kind_ext::FUNCTION_TYPE).expect("function type");
    let fn_type = arena
        .get(fn_type)
        .and_then(|n| arena.get_function_type(n))
        .expect("function type data");
    assert!(fn_type.throws_clause.is_some());
}

#[test]
fn test_arrow_functions() {
    let (parser, root) = parse_clean(
        "const a = x => x * 2;\n\
         const b = async (x: number): Promise<number> rejects Error => { return x; };\n\
         const c = (a, b) => a + b;\n\
         const d = (x) throws RangeError => x;\n\
         const e = (1 + 2) * 3;",
    );
    let arena = parser.get_arena();
    let arrows = arena
        .nodes
        .iter()
        .filter(|n| n.kind == syntax_kind_ext::ARROW_FUNCTION)
        .count();
    assert!(arrows >= 4, "expected four arrow functions, found {arrows}");
    assert_eq!(statements(arena, root).len(), 5);
}

#[test]
fn test_try_catch_shapes() {
    let (parser, root) = parse_clean(
        "try { f(); } catch (e: unknown) { throw e; } finally { g(); }\n\
         try { f(); } catch { }\n\
         try { f(); } finally { }",
    );
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    assert_eq!(stmts.len(), 3);
    let first = arena.get(stmts[0]).and_then(|n| arena.get_try(n)).expect("try");
    assert!(first.catch_clause.is_some() && first.finally_block.is_some());
    let catch = arena
        .get(first.catch_clause)
        .and_then(|n| arena.get_catch_clause(n))
        .expect("catch");
    assert!(catch.variable_declaration.is_some());

    let second = arena.get(stmts[1]).and_then(|n| arena.get_try(n)).expect("try");
    let catch = arena
        .get(second.catch_clause)
        .and_then(|n| arena.get_catch_clause(n))
        .expect("catch");
    assert!(catch.variable_declaration.is_none(), "optional catch binding");

    let third = arena.get(stmts[2]).and_then(|n| arena.get_try(n)).expect("try");
    assert!(third.catch_clause.is_none());
}

#[test]
fn test_try_without_handlers_reports_error() {
    let (parser, _) = parse("try { f(); }");
    assert!(
        parser.get_diagnostics().iter().any(|d| d.code == 1005),
        "expected 'catch' expected, got {:?}",
        parser.get_diagnostics()
    );
}

#[test]
fn test_templates_regex_and_operators() {
    let (parser, root) = parse_clean(
        "const s = `a${1}b${x ? y : z}c`;\n\
         const r = /ab+c/gi.test(s);\n\
         const n = a >>> 2 >= b ** 2 ** 3;\n\
         const o = obj?.prop?.[k]?.(1)!;\n\
         const v = { a, b: 1, ...rest, [k]: 2, m() { return 1; }, get g() { return 2; } };\n\
         const t = [1, , ...xs] as const;",
    );
    let arena = parser.get_arena();
    assert_eq!(statements(arena, root).len(), 6);
    assert!(first_of_kind(arena, root, syntax_kind_ext::TEMPLATE_EXPRESSION).is_some());
    let regex = arena
        .nodes
        .iter()
        .any(|n| n.kind == esc_scanner::SyntaxKind::RegularExpressionLiteral as u16);
    assert!(regex, "regex literal should be rescanned");
    let chained = arena
        .nodes
        .iter()
        .filter(|n| n.has_flag(node_flags::OPTIONAL_CHAIN))
        .count();
    assert!(chained >= 3);
}

#[test]
fn test_exponent_is_right_associative() {
    let (parser, root) = parse_clean("x = 2 ** 3 ** 2;");
    let arena = parser.get_arena();
    let stmt = statements(arena, root)[0];
    let expr = arena
        .get(stmt)
        .and_then(|n| arena.get_expression_statement(n))
        .expect("expression statement")
        .expression;
    let assign = arena.get(expr).and_then(|n| arena.get_binary_expr(n)).expect("assignment");
    let pow = arena
        .get(assign.right)
        .and_then(|n| arena.get_binary_expr(n))
        .expect("power");
    assert_eq!(
        arena.kind_of(pow.right),
        Some(syntax_kind_ext::BINARY_EXPRESSION),
        "right operand of ** should itself be a ** expression"
    );
}

#[test]
fn test_await_and_void() {
    let (parser, root) = parse_clean(
        "async function h() { await g(); void g(); }\nawait h();\nfunction k() { let await = 1; }",
    );
    let arena = parser.get_arena();
    let awaits = arena
        .nodes
        .iter()
        .filter(|n| n.kind == syntax_kind_ext::AWAIT_EXPRESSION)
        .count();
    assert_eq!(awaits, 2, "top-level await and awaited call");
    assert!(first_of_kind(arena, root, syntax_kind_ext::VOID_EXPRESSION).is_some());
}

#[test]
fn test_control_flow_statements() {
    parse_clean(
        "outer: for (let i = 0; i < 3; i++) {\n\
           for (const k in o) { if (k) continue outer; else break; }\n\
           for await (const v of xs) {}\n\
           while (x) { do { x--; } while (x > 0) }\n\
           switch (i) { case 1: f(); break; default: g(); }\n\
         }",
    );
}

#[test]
fn test_types() {
    parse_clean(
        "type A = string | number[] | [a: string, b?: number, ...rest: boolean[]];\n\
         type B<T extends object = {}> = { readonly [k: string]: T; m(): void } & keyof T;\n\
         type C = typeof x.y | Array<Map<string, number>> | -1 | 'lit' | (() => void);\n\
         let d: A[\"length\"];",
    );
}

#[test]
fn test_binding_patterns_and_parameters() {
    parse_clean(
        "const { a, b: [c, , d = 1], ...rest } = obj;\n\
         function f({ x }: P, [y]: Q, z = 2, ...more: number[]) {}",
    );
}

#[test]
fn test_error_recovery_continues() {
    let (parser, root) = parse("let = ;\nfunction ok() { return 1; }\n}");
    assert!(!parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    assert!(
        first_of_kind(arena, root, syntax_kind_ext::FUNCTION_DECLARATION).is_some(),
        "parser should recover and parse the following declaration"
    );
    assert!(parser.get_diagnostics().iter().any(|d| d.code == 1128));
}

#[test]
fn test_parents_are_linked() {
    let (parser, root) = parse_clean("function f() { g(); }");
    let arena = parser.get_arena();
    let call = first_of_kind(arena, root, syntax_kind_ext::CALL_EXPRESSION).expect("call");
    let stmt = arena.parent_of(call);
    assert_eq!(arena.kind_of(stmt), Some(syntax_kind_ext::EXPRESSION_STATEMENT));
    let block = arena.parent_of(stmt);
    assert_eq!(arena.kind_of(block), Some(syntax_kind_ext::BLOCK));
}

#[test]
fn test_comments_are_kept_on_source_file() {
    let (parser, root) = parse_clean("// @ts-expect-exception\nf();");
    let arena = parser.get_arena();
    let sf = arena.get_source_file_at(root).expect("source file");
    assert_eq!(sf.comments.len(), 1);
}
