//! Assignability and type classification.
//!
//! References are nominal: `Derived` is assignable to `Base` only through the
//! recorded `extends` chain. Anonymous types (objects, arrays, tuples,
//! functions) compare structurally.

use tracing::trace;

use crate::intern::TypeInterner;
use crate::types::{FunctionShape, IntrinsicKind, LiteralValue, TypeFlags, TypeId, TypeKey};
use crate::widening::widen_literal_type;

/// Longest `extends` chain walked before giving up (cyclic declarations).
const MAX_BASE_CHAIN: usize = 64;

/// Whether a value of type `source` can be assigned to a slot of type `target`.
pub fn is_assignable_to(interner: &TypeInterner, source: TypeId, target: TypeId) -> bool {
    stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
        let result = is_assignable_worker(interner, source, target);
        trace!(source = source.0, target = target.0, result, "assignability");
        result
    })
}

fn is_assignable_worker(interner: &TypeInterner, source: TypeId, target: TypeId) -> bool {
    if source == target {
        return true;
    }
    if matches!(target, TypeId::ANY | TypeId::UNKNOWN | TypeId::ERROR)
        || matches!(source, TypeId::ANY | TypeId::NEVER | TypeId::ERROR)
    {
        return true;
    }
    let Some(source_key) = interner.lookup(source) else {
        return false;
    };
    let Some(target_key) = interner.lookup(target) else {
        return false;
    };

    // Unions: every source member must fit; the target needs one fitting member.
    if let TypeKey::Union(members) = &source_key {
        return members
            .iter()
            .all(|&m| is_assignable_to(interner, m, target));
    }
    if let TypeKey::Union(members) = &target_key {
        return members
            .iter()
            .any(|&m| is_assignable_to(interner, source, m));
    }
    if let TypeKey::Intersection(members) = &target_key {
        return members
            .iter()
            .all(|&m| is_assignable_to(interner, source, m));
    }
    if let TypeKey::Intersection(members) = &source_key {
        return members
            .iter()
            .any(|&m| is_assignable_to(interner, m, target));
    }

    match (&source_key, &target_key) {
        // Unconstrained type parameters accept anything.
        (_, TypeKey::TypeParameter(_)) => true,
        (TypeKey::Literal(_), _) => {
            let widened = widen_literal_type(interner, source);
            widened != source && is_assignable_to(interner, widened, target)
        }
        (TypeKey::Intrinsic(IntrinsicKind::Undefined), TypeKey::Intrinsic(IntrinsicKind::Void)) => {
            true
        }
        (
            TypeKey::Ref { .. }
            | TypeKey::Object(_)
            | TypeKey::Array(_)
            | TypeKey::Tuple(_)
            | TypeKey::Function(_),
            TypeKey::Intrinsic(IntrinsicKind::Object),
        ) => true,
        (TypeKey::Ref { .. }, TypeKey::Ref { .. }) => is_nominal_subtype(interner, source, target),
        (TypeKey::Array(s), TypeKey::Array(t)) => is_assignable_to(interner, *s, *t),
        (TypeKey::Tuple(elements), TypeKey::Array(t)) => elements
            .iter()
            .all(|&e| is_assignable_to(interner, e, *t)),
        (TypeKey::Tuple(s), TypeKey::Tuple(t)) => {
            s.len() == t.len()
                && s.iter()
                    .zip(t.iter())
                    .all(|(&a, &b)| is_assignable_to(interner, a, b))
        }
        (TypeKey::Object(source_props), TypeKey::Object(target_props)) => {
            target_props.iter().all(|tp| {
                match source_props.iter().find(|sp| sp.name == tp.name) {
                    Some(sp) => is_assignable_to(interner, sp.type_id, tp.type_id),
                    None => tp.optional,
                }
            })
        }
        // Any non-nullish object fits the empty object type.
        (TypeKey::Ref { .. } | TypeKey::Array(_) | TypeKey::Function(_), TypeKey::Object(props)) => {
            props.is_empty()
        }
        (TypeKey::Function(s), TypeKey::Function(t)) => is_function_assignable(interner, s, t),
        _ => false,
    }
}

/// Same definition with assignable arguments, or a base class chain that
/// reaches the target.
fn is_nominal_subtype(interner: &TypeInterner, source: TypeId, target: TypeId) -> bool {
    let Some(TypeKey::Ref {
        def: target_def,
        args: target_args,
    }) = interner.lookup(target)
    else {
        return false;
    };
    let mut current = Some(source);
    let mut steps = 0;
    while let Some(id) = current {
        if let Some(TypeKey::Ref { def, args }) = interner.lookup(id)
            && def == target_def
        {
            return args.len() == target_args.len()
                && args
                    .iter()
                    .zip(target_args.iter())
                    .all(|(&a, &b)| is_assignable_to(interner, a, b));
        }
        steps += 1;
        if steps > MAX_BASE_CHAIN {
            return false;
        }
        current = interner.base_of(id);
    }
    false
}

/// Parameters are compared bivariantly, returns covariantly, and a thrown
/// effect must fit the target's declared effect (no clause means `never`).
fn is_function_assignable(
    interner: &TypeInterner,
    source: &FunctionShape,
    target: &FunctionShape,
) -> bool {
    if source.min_arity() > target.params.len() && target.max_arity().is_some() {
        return false;
    }
    let params_ok = source.params.iter().zip(target.params.iter()).all(|(s, t)| {
        is_assignable_to(interner, t.type_id, s.type_id)
            || is_assignable_to(interner, s.type_id, t.type_id)
    });
    let return_ok = target.return_type == TypeId::VOID
        || is_assignable_to(interner, source.return_type, target.return_type);
    let throws_ok = match (source.throws, target.throws) {
        (Some(s), Some(t)) => is_assignable_to(interner, s, t),
        (Some(s), None) => s == TypeId::NEVER,
        (None, _) => true,
    };
    params_ok && return_ok && throws_ok
}

/// Coarse classification of a type.
pub fn type_flags(interner: &TypeInterner, id: TypeId) -> TypeFlags {
    let Some(key) = interner.lookup(id) else {
        return TypeFlags::empty();
    };
    match key {
        TypeKey::Intrinsic(kind) => match kind {
            IntrinsicKind::Any | IntrinsicKind::Unknown | IntrinsicKind::Error => {
                TypeFlags::ANY_OR_UNKNOWN
            }
            IntrinsicKind::Never => TypeFlags::NEVER,
            IntrinsicKind::Void | IntrinsicKind::Undefined | IntrinsicKind::Null => {
                TypeFlags::NULLISH | TypeFlags::PRIMITIVE
            }
            IntrinsicKind::Object => TypeFlags::OBJECT_LIKE,
            _ => TypeFlags::PRIMITIVE,
        },
        TypeKey::Literal(LiteralValue::Boolean(_))
        | TypeKey::Literal(LiteralValue::String(_))
        | TypeKey::Literal(LiteralValue::Number(_))
        | TypeKey::Literal(LiteralValue::BigInt(_)) => TypeFlags::PRIMITIVE | TypeFlags::LITERAL,
        TypeKey::Union(members) => {
            let mut flags = TypeFlags::UNION;
            for m in members {
                flags |= type_flags(interner, m) & !TypeFlags::UNION;
            }
            flags
        }
        TypeKey::Ref { .. } => {
            let mut flags = TypeFlags::OBJECT_LIKE;
            if interner.promise_inner(id).is_some() {
                flags |= TypeFlags::PROMISE;
            }
            let error = interner.error_type();
            if is_nominal_subtype(interner, id, error) {
                flags |= TypeFlags::ERROR_LIKE;
            }
            flags
        }
        TypeKey::Function(_) => TypeFlags::OBJECT_LIKE | TypeFlags::CALLABLE,
        TypeKey::Intersection(_) | TypeKey::Array(_) | TypeKey::Tuple(_) | TypeKey::Object(_) => {
            TypeFlags::OBJECT_LIKE
        }
        TypeKey::TypeParameter(_) => TypeFlags::TYPE_PARAMETER,
    }
}
