use super::*;

#[test]
fn test_identity_and_top_types() {
    let interner = TypeInterner::new();
    assert!(is_assignable_to(&interner, TypeId::STRING, TypeId::STRING));
    assert!(is_assignable_to(&interner, TypeId::STRING, TypeId::UNKNOWN));
    assert!(is_assignable_to(&interner, TypeId::NEVER, TypeId::STRING));
    assert!(is_assignable_to(&interner, TypeId::ANY, TypeId::NUMBER));
    assert!(!is_assignable_to(&interner, TypeId::UNKNOWN, TypeId::STRING));
    assert!(!is_assignable_to(&interner, TypeId::STRING, TypeId::NUMBER));
}

#[test]
fn test_literals_fit_their_primitive() {
    let interner = TypeInterner::new();
    let hello = interner.literal_string("hello");
    let other = interner.literal_string("other");
    assert!(is_assignable_to(&interner, hello, TypeId::STRING));
    assert!(!is_assignable_to(&interner, hello, other));
    assert!(!is_assignable_to(&interner, TypeId::STRING, hello));
    assert!(!is_assignable_to(&interner, hello, TypeId::NUMBER));
}

#[test]
fn test_builtin_error_subclasses() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let range = interner.builtin_type("RangeError").expect("RangeError");
    let type_error = interner.builtin_type("TypeError").expect("TypeError");
    assert!(is_assignable_to(&interner, range, error));
    assert!(!is_assignable_to(&interner, error, range));
    assert!(!is_assignable_to(&interner, range, type_error));
}

#[test]
fn test_user_class_chain() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let app = interner.define("AppError", DefKind::Class, Some(error), Some(1));
    let app_ty = interner.reference(app, Vec::new());
    let db = interner.define("DbError", DefKind::Class, Some(app_ty), Some(2));
    let db_ty = interner.reference(db, Vec::new());
    assert!(is_assignable_to(&interner, db_ty, error));
    assert!(is_assignable_to(&interner, db_ty, app_ty));
    assert!(!is_assignable_to(&interner, app_ty, db_ty));
    assert!(type_flags(&interner, db_ty).contains(TypeFlags::ERROR_LIKE));
}

#[test]
fn test_cyclic_base_chain_terminates() {
    let interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Class, None, Some(1));
    let a_ty = interner.reference(a, Vec::new());
    let b = interner.define("B", DefKind::Class, Some(a_ty), Some(2));
    let b_ty = interner.reference(b, Vec::new());
    interner.set_def_base(a, Some(b_ty));
    let error = interner.error_type();
    assert!(!is_assignable_to(&interner, a_ty, error));
}

#[test]
fn test_union_assignability() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let range = interner.builtin_type("RangeError").expect("RangeError");
    let type_error = interner.builtin_type("TypeError").expect("TypeError");
    let both = interner.union(vec![range, type_error]);

    assert!(is_assignable_to(&interner, both, error), "every member is an Error");
    assert!(is_assignable_to(&interner, range, both));
    assert!(!is_assignable_to(&interner, both, type_error));
    assert!(!is_assignable_to(&interner, error, both));
}

#[test]
fn test_promise_arguments_are_covariant() {
    let interner = TypeInterner::new();
    let one = interner.literal_number(1.0);
    let p_one = interner.promise(one);
    let p_number = interner.promise(TypeId::NUMBER);
    assert!(is_assignable_to(&interner, p_one, p_number));
    assert!(!is_assignable_to(&interner, p_number, p_one));
    assert!(type_flags(&interner, p_number).contains(TypeFlags::PROMISE));
}

#[test]
fn test_structural_objects() {
    let interner = TypeInterner::new();
    let code = interner.intern_string("code");
    let msg = interner.intern_string("msg");
    let small = interner.object(vec![PropertyInfo::new(code, TypeId::NUMBER)]);
    let big = interner.object(vec![
        PropertyInfo::new(code, TypeId::NUMBER),
        PropertyInfo::new(msg, TypeId::STRING),
    ]);
    assert!(is_assignable_to(&interner, big, small));
    assert!(!is_assignable_to(&interner, small, big));
    assert!(is_assignable_to(&interner, small, TypeId::OBJECT));
}

#[test]
fn test_function_throws_must_fit() {
    let interner = TypeInterner::new();
    let error = interner.error_type();
    let range = interner.builtin_type("RangeError").expect("RangeError");
    let make = |throws| {
        interner.function(FunctionShape {
            params: Vec::new(),
            return_type: TypeId::VOID,
            throws,
            rejects: None,
            is_constructor: false,
        })
    };
    let throws_range = make(Some(range));
    let throws_error = make(Some(error));
    let no_clause = make(None);
    assert!(is_assignable_to(&interner, throws_range, throws_error));
    assert!(!is_assignable_to(&interner, throws_error, throws_range));
    assert!(is_assignable_to(&interner, no_clause, throws_range));
    assert!(!is_assignable_to(&interner, throws_range, no_clause));
}

#[test]
fn test_type_parameter_accepts_anything() {
    let interner = TypeInterner::new();
    let t = interner.type_param("T");
    assert!(is_assignable_to(&interner, TypeId::STRING, t));
    assert!(type_flags(&interner, t).contains(TypeFlags::TYPE_PARAMETER));
}

#[test]
fn test_undefined_fits_void() {
    let interner = TypeInterner::new();
    assert!(is_assignable_to(&interner, TypeId::UNDEFINED, TypeId::VOID));
    assert!(!is_assignable_to(&interner, TypeId::NULL, TypeId::NUMBER));
    assert!(type_flags(&interner, TypeId::NULL).contains(TypeFlags::NULLISH));
}
