//! Type narrowing for `instanceof` and `typeof` guards.
//!
//! The checker extracts a `TypeGuard` from a condition; this module applies
//! it to a type and returns what is left in each branch. A branch whose type
//! comes out as `never` cannot be reached with a value of the source type.

use tracing::{Level, span, trace};

use crate::intern::TypeInterner;
use crate::relations::{is_assignable_to, type_flags};
use crate::types::{TypeFlags, TypeId};

/// AST-agnostic form of a narrowing condition.
///
/// ```typescript
/// typeof x === "string"   -> TypeGuard::Typeof("string")
/// x instanceof MyError    -> TypeGuard::Instanceof(MyError)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeGuard {
    Typeof(String),
    /// Instance type of the constructor on the right-hand side.
    Instanceof(TypeId),
}

/// The types in both branches of a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarrowingResult {
    pub true_type: TypeId,
    pub false_type: TypeId,
}

impl NarrowingResult {
    /// Swap the branches, for `!guard` and `!==`.
    pub const fn negate(self) -> NarrowingResult {
        NarrowingResult {
            true_type: self.false_type,
            false_type: self.true_type,
        }
    }
}

/// Apply `guard` to `source`.
pub fn narrow_by_guard(interner: &TypeInterner, source: TypeId, guard: &TypeGuard) -> NarrowingResult {
    let _span = span!(Level::TRACE, "narrow_by_guard", source = source.0, ?guard).entered();
    let result = match guard {
        TypeGuard::Typeof(name) => narrow_by_typeof(interner, source, name),
        TypeGuard::Instanceof(instance) => narrow_by_instanceof(interner, source, *instance),
    };
    trace!(true_type = result.true_type.0, false_type = result.false_type.0, "narrowed");
    result
}

pub fn narrow_by_instanceof(interner: &TypeInterner, source: TypeId, instance: TypeId) -> NarrowingResult {
    if matches!(source, TypeId::ANY | TypeId::UNKNOWN | TypeId::ERROR) || instance == TypeId::ERROR {
        return NarrowingResult {
            true_type: if instance == TypeId::ERROR { source } else { instance },
            false_type: source,
        };
    }
    let mut true_members = Vec::new();
    let mut false_members = Vec::new();
    for member in interner.union_members(source) {
        if is_assignable_to(interner, member, instance) {
            true_members.push(member);
        } else if is_assignable_to(interner, instance, member) {
            // A base-class member may or may not hold the derived class.
            true_members.push(instance);
            false_members.push(member);
        } else {
            false_members.push(member);
        }
    }
    NarrowingResult {
        true_type: interner.union(true_members),
        false_type: interner.union(false_members),
    }
}

pub fn narrow_by_typeof(interner: &TypeInterner, source: TypeId, typeof_result: &str) -> NarrowingResult {
    let Some(target) = typeof_target(typeof_result) else {
        return NarrowingResult {
            true_type: source,
            false_type: source,
        };
    };
    if matches!(source, TypeId::ANY | TypeId::UNKNOWN | TypeId::ERROR) {
        let true_type = match target {
            TypeofTarget::Primitive(primitive) => primitive,
            TypeofTarget::Object => interner.union2(TypeId::OBJECT, TypeId::NULL),
            TypeofTarget::Function => source,
        };
        return NarrowingResult {
            true_type,
            false_type: source,
        };
    }
    let (true_members, false_members): (Vec<TypeId>, Vec<TypeId>) = interner
        .union_members(source)
        .into_iter()
        .partition(|&member| matches_typeof(interner, member, target));
    NarrowingResult {
        true_type: interner.union(true_members),
        false_type: interner.union(false_members),
    }
}

#[derive(Clone, Copy)]
enum TypeofTarget {
    Primitive(TypeId),
    Object,
    Function,
}

fn typeof_target(typeof_result: &str) -> Option<TypeofTarget> {
    Some(match typeof_result {
        "string" => TypeofTarget::Primitive(TypeId::STRING),
        "number" => TypeofTarget::Primitive(TypeId::NUMBER),
        "boolean" => TypeofTarget::Primitive(TypeId::BOOLEAN),
        "bigint" => TypeofTarget::Primitive(TypeId::BIGINT),
        "symbol" => TypeofTarget::Primitive(TypeId::SYMBOL),
        "undefined" => TypeofTarget::Primitive(TypeId::UNDEFINED),
        "object" => TypeofTarget::Object,
        "function" => TypeofTarget::Function,
        _ => return None,
    })
}

fn matches_typeof(interner: &TypeInterner, member: TypeId, target: TypeofTarget) -> bool {
    let flags = type_flags(interner, member);
    match target {
        TypeofTarget::Primitive(primitive) => is_assignable_to(interner, member, primitive),
        TypeofTarget::Object => {
            member == TypeId::NULL
                || (flags.contains(TypeFlags::OBJECT_LIKE) && !flags.contains(TypeFlags::CALLABLE))
        }
        TypeofTarget::Function => flags.contains(TypeFlags::CALLABLE),
    }
}
