//! Type solver for the ErrorScript compiler.
//!
//! Types are interned: structurally equal types share one `TypeId`, so type
//! equality is an integer comparison. Unions are normalized on construction
//! (flattened, deduplicated, `never` removed, `any`/`unknown` absorbing),
//! and the same member set always interns to the same id, which is what lets
//! thrown-type sets be plain `TypeId`s in the checker. Display keeps the
//! order in which members first appeared.
//!
//! Class-like types are nominal: a `TypeKey::Ref` names a definition in the
//! interner's definition table, and assignability between references walks
//! the base chain recorded there. The built-in error classes are registered
//! up front with `Error` as their base.

mod builtins;
mod format;
mod intern;
mod narrowing;
mod relations;
pub mod types;
mod widening;

pub use builtins::BUILTIN_ERROR_CLASSES;
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use narrowing::{
    NarrowingResult, TypeGuard, narrow_by_guard, narrow_by_instanceof, narrow_by_typeof,
};
pub use relations::{is_assignable_to, type_flags};
pub use types::{
    Atom, DefId, DefInfo, DefKind, FunctionShape, IntrinsicKind, LiteralValue, ParamInfo,
    PropertyInfo, TypeFlags, TypeId, TypeKey,
};
pub use widening::widen_literal_type;

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod intern_tests;

#[cfg(test)]
#[path = "../tests/relation_tests.rs"]
mod relation_tests;

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod format_tests;

#[cfg(test)]
#[path = "../tests/narrowing_tests.rs"]
mod narrowing_tests;
