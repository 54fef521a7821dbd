use super::*;

fn fmt(interner: &TypeInterner, id: TypeId) -> String {
    TypeFormatter::new(interner).format(id)
}

#[test]
fn test_format_intrinsics_and_literals() {
    let interner = TypeInterner::new();
    assert_eq!(fmt(&interner, TypeId::STRING), "string");
    assert_eq!(fmt(&interner, TypeId::UNKNOWN), "unknown");
    assert_eq!(fmt(&interner, TypeId::NEVER), "never");
    let x = interner.literal_string("x");
    assert_eq!(fmt(&interner, x), "\"x\"");
    let n = interner.literal_number(42.0);
    assert_eq!(fmt(&interner, n), "42");
    let half = interner.literal_number(0.5);
    assert_eq!(fmt(&interner, half), "0.5");
    let big = interner.literal_bigint("10");
    assert_eq!(fmt(&interner, big), "10n");
    assert_eq!(fmt(&interner, TypeId::BOOLEAN_TRUE), "true");
}

#[test]
fn test_format_union_in_first_occurrence_order() {
    let interner = TypeInterner::new();
    let range = interner.builtin_type("RangeError").expect("RangeError");
    let type_error = interner.builtin_type("TypeError").expect("TypeError");
    let both = interner.union(vec![range, type_error]);
    assert_eq!(fmt(&interner, both), "RangeError | TypeError");

    // The same set built later in another order keeps the first display.
    let again = interner.union(vec![type_error, range]);
    assert_eq!(again, both);
    assert_eq!(fmt(&interner, again), "RangeError | TypeError");
}

#[test]
fn test_format_nested_union_extends_in_order() {
    let interner = TypeInterner::new();
    let syntax = interner.builtin_type("SyntaxError").expect("SyntaxError");
    let range = interner.builtin_type("RangeError").expect("RangeError");
    let uri = interner.builtin_type("URIError").expect("URIError");
    let inner = interner.union(vec![syntax, range]);
    let outer = interner.union(vec![inner, uri, syntax]);
    assert_eq!(fmt(&interner, outer), "SyntaxError | RangeError | URIError");
}

#[test]
fn test_format_references_and_arrays() {
    let interner = TypeInterner::new();
    let p = interner.promise(TypeId::NUMBER);
    assert_eq!(fmt(&interner, p), "Promise<number>");
    let arr = interner.array(TypeId::STRING);
    assert_eq!(fmt(&interner, arr), "string[]");
    let union = interner.union(vec![TypeId::STRING, TypeId::NUMBER]);
    let union_arr = interner.array(union);
    assert_eq!(fmt(&interner, union_arr), "(number | string)[]");
    let tuple = interner.tuple(vec![TypeId::STRING, TypeId::NUMBER]);
    assert_eq!(fmt(&interner, tuple), "[string, number]");
}

#[test]
fn test_format_object_and_function() {
    let interner = TypeInterner::new();
    let code = interner.intern_string("code");
    let obj = interner.object(vec![PropertyInfo::new(code, TypeId::NUMBER)]);
    assert_eq!(fmt(&interner, obj), "{ code: number; }");
    assert_eq!(fmt(&interner, interner.object(Vec::new())), "{}");

    let x = interner.intern_string("x");
    let range = interner.builtin_type("RangeError").expect("RangeError");
    let f = interner.function(FunctionShape {
        params: vec![ParamInfo {
            name: Some(x),
            type_id: TypeId::NUMBER,
            optional: false,
            rest: false,
        }],
        return_type: TypeId::VOID,
        throws: Some(range),
        rejects: None,
        is_constructor: false,
    });
    assert_eq!(fmt(&interner, f), "(x: number) => void throws RangeError");
}
