//! Type representation.

use serde::Serialize;

/// Interned type handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Produced for unresolvable references; assignable both ways.
    pub const ERROR: TypeId = TypeId(0);
    pub const ANY: TypeId = TypeId(1);
    pub const UNKNOWN: TypeId = TypeId(2);
    pub const NEVER: TypeId = TypeId(3);
    pub const VOID: TypeId = TypeId(4);
    pub const UNDEFINED: TypeId = TypeId(5);
    pub const NULL: TypeId = TypeId(6);
    pub const BOOLEAN: TypeId = TypeId(7);
    pub const NUMBER: TypeId = TypeId(8);
    pub const STRING: TypeId = TypeId(9);
    pub const BIGINT: TypeId = TypeId(10);
    pub const SYMBOL: TypeId = TypeId(11);
    pub const OBJECT: TypeId = TypeId(12);
    pub const BOOLEAN_TRUE: TypeId = TypeId(13);
    pub const BOOLEAN_FALSE: TypeId = TypeId(14);

    /// Number of pre-registered types; the first user type gets this id.
    pub const FIRST_USER: u32 = 15;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Error,
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    BigInt,
    Symbol,
    Object,
}

impl IntrinsicKind {
    pub const fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Error => "error",
            IntrinsicKind::Any => "any",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Never => "never",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Boolean => "boolean",
            IntrinsicKind::Number => "number",
            IntrinsicKind::String => "string",
            IntrinsicKind::BigInt => "bigint",
            IntrinsicKind::Symbol => "symbol",
            IntrinsicKind::Object => "object",
        }
    }
}

/// Interned string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(Atom),
    /// Stored as bits so the key stays `Eq + Hash`; NaN never reaches here.
    Number(u64),
    BigInt(Atom),
    Boolean(bool),
}

/// Handle into the interner's definition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefKind {
    Class,
    Interface,
    /// Library classes the checker knows without a declaration
    /// (`Error` and friends, `Promise`).
    Builtin,
}

/// A named, nominal type definition.
#[derive(Clone, Debug)]
pub struct DefInfo {
    pub name: String,
    pub kind: DefKind,
    /// The `extends` target, as an instantiated reference.
    pub base: Option<TypeId>,
    /// Opaque identity supplied by the definer (the binder's symbol id), so
    /// two classes with the same name stay distinct.
    pub origin: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
}

impl PropertyInfo {
    pub const fn new(name: Atom, type_id: TypeId) -> PropertyInfo {
        PropertyInfo {
            name,
            type_id,
            optional: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Option<Atom>,
    pub type_id: TypeId,
    pub optional: bool,
    pub rest: bool,
}

/// A function type, including its declared effect clauses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    /// `throws T`; `None` when the type carries no clause.
    pub throws: Option<TypeId>,
    /// `rejects T`; `None` when the type carries no clause.
    pub rejects: Option<TypeId>,
    pub is_constructor: bool,
}

impl FunctionShape {
    /// Number of parameters a call must supply.
    pub fn min_arity(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.optional && !p.rest)
            .count()
    }

    /// Maximum number of arguments, or `None` with a rest parameter.
    pub fn max_arity(&self) -> Option<usize> {
        if self.params.iter().any(|p| p.rest) {
            None
        } else {
            Some(self.params.len())
        }
    }
}

/// The structural key a `TypeId` is interned under.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    /// Instantiated reference to a nominal definition (`Error`, `Promise<T>`,
    /// a user class or interface).
    Ref { def: DefId, args: Vec<TypeId> },
    /// Normalized: at least two members, sorted, no nested unions.
    Union(Vec<TypeId>),
    Intersection(Vec<TypeId>),
    Array(TypeId),
    Tuple(Vec<TypeId>),
    /// Anonymous object type; properties sorted by name.
    Object(Vec<PropertyInfo>),
    Function(FunctionShape),
    TypeParameter(Atom),
}

bitflags::bitflags! {
    /// Coarse classification of a type, for quick checks in the checker.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        const ANY_OR_UNKNOWN = 1 << 0;
        const NEVER = 1 << 1;
        const PRIMITIVE = 1 << 2;
        const LITERAL = 1 << 3;
        const NULLISH = 1 << 4;
        const UNION = 1 << 5;
        const OBJECT_LIKE = 1 << 6;
        const CALLABLE = 1 << 7;
        const PROMISE = 1 << 8;
        /// `Error` or a class whose base chain reaches `Error`.
        const ERROR_LIKE = 1 << 9;
        const TYPE_PARAMETER = 1 << 10;
    }
}
