//! Effect analysis benchmarks.
//!
//! Full passes (parse, bind, check) over hand-written snippets and over
//! generated call chains of growing depth.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use errorscript::binder::BinderState;
use errorscript::checker::{CheckerOptions, CheckerState};
use errorscript::parser::ParserState;
use errorscript::solver::TypeInterner;

const TRY_CATCH_CODE: &str = r#"
function parse(text: string) {
    return JSON.parse(text);
}
function load(text: string) {
    try {
        return parse(text);
    } catch (e) {
        throw new TypeError("bad input");
    } finally {
        decodeURI(text);
    }
}
load("{}");
"#;

const ASYNC_CODE: &str = r#"
async function fetchUser(id: number) {
    if (id < 0) {
        throw new RangeError("id");
    }
    return fetch("https://example.com/" + id);
}
async function main() {
    await fetchUser(1);
    const users = await Promise.all([fetchUser(2), fetchUser(3)]);
}
main().catch(() => {});
fetchUser(4).then(() => 1);
"#;

const CLASS_CODE: &str = r#"
class Store {
    constructor(name: string) {
        if (name.length === 0) {
            throw new RangeError("empty");
        }
    }
    get size(): number {
        throw new TypeError("no size");
    }
    read(key: string): string throws SyntaxError {
        return JSON.parse(key);
    }
}
const store = new Store("s");
store.read("k");
store.size;
"#;

const RECURSIVE_CODE: &str = r#"
function even(n: number): boolean { return n === 0 ? true : odd(n - 1); }
function odd(n: number): boolean { if (n < 0) { throw new RangeError("n"); } return n === 0 ? false : even(n - 1); }
even(10);
"#;

fn run_pass(code: &str) -> usize {
    let mut parser = ParserState::new("bench.ts".to_string(), code.to_string());
    let root = parser.parse_source_file();
    let mut binder = BinderState::new();
    binder.bind_source_file(parser.get_arena(), root);
    let types = TypeInterner::new();
    let mut checker = CheckerState::new(
        parser.get_arena(),
        &binder,
        &types,
        "bench.ts".to_string(),
        CheckerOptions::default(),
    );
    checker.check_source_file(root);
    checker.diagnostics().len()
}

/// A chain of `depth` functions, each calling the next, with the last one
/// throwing. Every function in the chain gets the same effect.
fn call_chain(depth: usize) -> String {
    let mut code = String::new();
    for i in 0..depth {
        code.push_str(&format!("function f{i}(x: number) {{ if (x > {i}) {{ f{}(x); }} }}\n", i + 1));
    }
    code.push_str(&format!("function f{depth}(x: number) {{ throw new RangeError(\"end\"); }}\n"));
    code.push_str("f0(1);\n");
    code
}

fn bench_snippets(c: &mut Criterion) {
    let mut group = c.benchmark_group("effect_check");
    let cases = [
        ("try_catch", TRY_CATCH_CODE),
        ("async", ASYNC_CODE),
        ("class", CLASS_CODE),
        ("recursive", RECURSIVE_CODE),
    ];
    for (name, code) in cases {
        group.bench_with_input(BenchmarkId::new("check", name), code, |b, code| {
            b.iter(|| black_box(run_pass(code)))
        });
    }
    group.finish();
}

fn bench_call_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("effect_scaling");
    for depth in [10usize, 100, 500] {
        let code = call_chain(depth);
        group.bench_with_input(BenchmarkId::new("call_chain", depth), &code, |b, code| {
            b.iter(|| black_box(run_pass(code)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_snippets, bench_call_chain);
criterion_main!(benches);
