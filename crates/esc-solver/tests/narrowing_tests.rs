use super::*;

fn class(interner: &TypeInterner, name: &str, base: Option<TypeId>) -> TypeId {
    let def = interner.define(name, DefKind::Class, base, None);
    interner.reference(def, Vec::new())
}

fn fmt(interner: &TypeInterner, id: TypeId) -> String {
    TypeFormatter::new(interner).format(id)
}

#[test]
fn test_instanceof_splits_union_members() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let parse = class(&interner, "ParseError", Some(error));
    let range = interner.builtin_type("RangeError").expect("RangeError");
    let source = interner.union(vec![parse, range]);

    let result = narrow_by_instanceof(&interner, source, parse);
    assert_eq!(result.true_type, parse);
    assert_eq!(result.false_type, range);

    let rest = narrow_by_instanceof(&interner, result.false_type, range);
    assert_eq!(rest.false_type, TypeId::NEVER, "every member was matched");
}

#[test]
fn test_instanceof_base_class_covers_subclasses() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let parse = class(&interner, "ParseError", Some(error));
    let type_error = interner.builtin_type("TypeError").expect("TypeError");
    let source = interner.union(vec![parse, type_error]);

    let result = narrow_by_instanceof(&interner, source, error);
    assert_eq!(fmt(&interner, result.true_type), "ParseError | TypeError");
    assert_eq!(result.false_type, TypeId::NEVER);
}

#[test]
fn test_instanceof_subclass_of_member_keeps_member_in_false_branch() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let parse = class(&interner, "ParseError", Some(error));

    let result = narrow_by_instanceof(&interner, error, parse);
    assert_eq!(result.true_type, parse);
    assert_eq!(result.false_type, error);
}

#[test]
fn test_instanceof_on_unknown_narrows_true_branch_only() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let result = narrow_by_guard(&interner, TypeId::UNKNOWN, &TypeGuard::Instanceof(error));
    assert_eq!(result.true_type, error);
    assert_eq!(result.false_type, TypeId::UNKNOWN);
}

#[test]
fn test_typeof_partitions_primitives_and_objects() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let source = interner.union(vec![TypeId::STRING, error, TypeId::NUMBER]);

    let strings = narrow_by_typeof(&interner, source, "string");
    assert_eq!(strings.true_type, TypeId::STRING);
    assert_eq!(fmt(&interner, strings.false_type), "Error | number");

    let objects = narrow_by_typeof(&interner, source, "object");
    assert_eq!(objects.true_type, error);
    assert_eq!(fmt(&interner, objects.false_type), "string | number");
}

#[test]
fn test_typeof_literal_member_matches_its_primitive() {
    let interner = TypeInterner::new();
    let hello = interner.literal_string("hello");
    let result = narrow_by_typeof(&interner, hello, "string");
    assert_eq!(result.true_type, hello);
    assert_eq!(result.false_type, TypeId::NEVER);
}

#[test]
fn test_unrecognized_typeof_result_does_not_narrow() {
    let interner = TypeInterner::new();
    let result = narrow_by_typeof(&interner, TypeId::STRING, "strnig");
    assert_eq!(result.true_type, TypeId::STRING);
    assert_eq!(result.false_type, TypeId::STRING);
    assert_eq!(result.negate().true_type, TypeId::STRING);
}
