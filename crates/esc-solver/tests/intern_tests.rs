use super::*;

#[test]
fn test_interner_intrinsics() {
    let interner = TypeInterner::new();

    assert_eq!(
        interner.lookup(TypeId::STRING),
        Some(TypeKey::Intrinsic(IntrinsicKind::String))
    );
    assert_eq!(
        interner.lookup(TypeId::NEVER),
        Some(TypeKey::Intrinsic(IntrinsicKind::Never))
    );
    assert_eq!(
        interner.lookup(TypeId::BOOLEAN_FALSE),
        Some(TypeKey::Literal(LiteralValue::Boolean(false)))
    );
}

#[test]
fn test_interner_deduplication() {
    let interner = TypeInterner::new();

    let id1 = interner.literal_string("hello");
    let id2 = interner.literal_string("hello");
    let id3 = interner.literal_string("world");

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
    assert!(!id1.is_intrinsic());
}

#[test]
fn test_negative_zero_is_zero() {
    let interner = TypeInterner::new();
    assert_eq!(interner.literal_number(0.0), interner.literal_number(-0.0));
    assert_eq!(interner.literal_number(f64::NAN), TypeId::NUMBER);
}

#[test]
fn test_empty_union_is_never() {
    let interner = TypeInterner::new();
    assert_eq!(interner.union(Vec::new()), TypeId::NEVER);
}

#[test]
fn test_union_removes_never() {
    let interner = TypeInterner::new();
    assert_eq!(interner.union(vec![TypeId::STRING, TypeId::NEVER]), TypeId::STRING);
}

#[test]
fn test_union_unknown_is_absorbing() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    assert_eq!(
        interner.union(vec![error, TypeId::UNKNOWN, TypeId::STRING]),
        TypeId::UNKNOWN
    );
    assert_eq!(interner.union2(TypeId::UNKNOWN, TypeId::NEVER), TypeId::UNKNOWN);
}

#[test]
fn test_union_any_wins_over_unknown() {
    let interner = TypeInterner::new();
    assert_eq!(interner.union(vec![TypeId::UNKNOWN, TypeId::ANY]), TypeId::ANY);
}

#[test]
fn test_union_is_order_independent_and_flat() {
    let interner = TypeInterner::new();
    let range = interner.builtin_type("RangeError").expect("RangeError");
    let type_error = interner.builtin_type("TypeError").expect("TypeError");
    let syntax = interner.builtin_type("SyntaxError").expect("SyntaxError");

    let ab = interner.union(vec![range, type_error]);
    let ba = interner.union(vec![type_error, range]);
    assert_eq!(ab, ba);

    let nested = interner.union(vec![ab, syntax]);
    let flat = interner.union(vec![range, type_error, syntax]);
    assert_eq!(nested, flat);
    assert_eq!(interner.union_members(flat).len(), 3);

    assert_eq!(interner.union(vec![ab, range]), ab, "dedupe");
}

#[test]
fn test_union_literal_absorbed_by_primitive() {
    let interner = TypeInterner::new();
    let hello = interner.literal_string("hello");
    assert_eq!(interner.union(vec![hello, TypeId::STRING]), TypeId::STRING);
    assert_eq!(
        interner.union(vec![TypeId::BOOLEAN_TRUE, TypeId::BOOLEAN_FALSE]),
        TypeId::BOOLEAN
    );
}

#[test]
fn test_union_members() {
    let interner = TypeInterner::new();
    assert!(interner.union_members(TypeId::NEVER).is_empty());
    assert_eq!(interner.union_members(TypeId::STRING), vec![TypeId::STRING]);
}

#[test]
fn test_builtin_errors_extend_error() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    assert_eq!(interner.base_of(error), None);
    for &name in BUILTIN_ERROR_CLASSES.iter().skip(1) {
        let ty = interner.builtin_type(name).expect("builtin registered");
        assert_eq!(interner.base_of(ty), Some(error), "{name} should extend Error");
    }
}

#[test]
fn test_same_name_classes_stay_distinct() {
    let interner = TypeInterner::new();
    let a = interner.define("Local", DefKind::Class, None, Some(1));
    let b = interner.define("Local", DefKind::Class, None, Some(2));
    assert_ne!(interner.reference(a, Vec::new()), interner.reference(b, Vec::new()));
}

#[test]
fn test_promise_inner() {
    let interner = TypeInterner::new();
    let p = interner.promise(TypeId::NUMBER);
    assert_eq!(interner.promise_inner(p), Some(TypeId::NUMBER));
    assert_eq!(interner.promise_inner(TypeId::NUMBER), None);
}

#[test]
fn test_object_property_order_is_canonical() {
    let interner = TypeInterner::new();
    let a = interner.intern_string("a");
    let b = interner.intern_string("b");
    let first = interner.object(vec![
        PropertyInfo::new(b, TypeId::NUMBER),
        PropertyInfo::new(a, TypeId::STRING),
    ]);
    let second = interner.object(vec![
        PropertyInfo::new(a, TypeId::STRING),
        PropertyInfo::new(b, TypeId::NUMBER),
    ]);
    assert_eq!(first, second);
}

#[test]
fn test_widen_literal_types() {
    let interner = TypeInterner::new();
    let x = interner.literal_string("x");
    let one = interner.literal_number(1.0);
    assert_eq!(widen_literal_type(&interner, x), TypeId::STRING);
    assert_eq!(widen_literal_type(&interner, one), TypeId::NUMBER);
    assert_eq!(widen_literal_type(&interner, TypeId::BOOLEAN_TRUE), TypeId::BOOLEAN);

    let code = interner.intern_string("code");
    let fresh = interner.object(vec![PropertyInfo::new(code, one)]);
    let widened = interner.object(vec![PropertyInfo::new(code, TypeId::NUMBER)]);
    assert_eq!(widen_literal_type(&interner, fresh), widened);

    let error = interner.error_type();
    assert_eq!(widen_literal_type(&interner, error), error);
}
