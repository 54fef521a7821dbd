//! Effect values produced by the analysis.
//!
//! An effect is a set of types, represented as one interned union. The
//! solver's union construction already gives the algebra we need: `never`
//! is the empty effect, `unknown` absorbs everything it is joined with, and
//! duplicate or literal members are normalized away.

use esc_solver::{TypeFormatter, TypeId, TypeInterner};
use serde::Serialize;

/// The types a computation can throw (or a promise can reject with).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ThrownType(pub TypeId);

impl ThrownType {
    /// Never throws.
    pub const NONE: ThrownType = ThrownType(TypeId::NEVER);
    /// Could throw anything; produced for recursion.
    pub const UNKNOWN: ThrownType = ThrownType(TypeId::UNKNOWN);

    #[inline]
    pub const fn type_id(self) -> TypeId {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0.0 == TypeId::NEVER.0
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0.0 == TypeId::UNKNOWN.0
    }

    /// Thrown values of type `any` (or of an unresolvable type) carry no
    /// information, so they are recorded as `unknown`.
    pub fn from_thrown_value(types: &TypeInterner, value_type: TypeId) -> ThrownType {
        match value_type {
            TypeId::ANY | TypeId::ERROR => ThrownType::UNKNOWN,
            other => ThrownType(esc_solver::widen_literal_type(types, other)),
        }
    }

    #[must_use]
    pub fn union(self, other: ThrownType, types: &TypeInterner) -> ThrownType {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        ThrownType(types.union2(self.0, other.0))
    }

    pub fn union_all(effects: impl IntoIterator<Item = ThrownType>, types: &TypeInterner) -> ThrownType {
        let members: Vec<TypeId> = effects
            .into_iter()
            .filter(|e| !e.is_empty())
            .map(ThrownType::type_id)
            .collect();
        if members.is_empty() {
            ThrownType::NONE
        } else {
            ThrownType(types.union(members))
        }
    }

    /// Display form used in diagnostics: `TypeError | RangeError`.
    pub fn display(self, types: &TypeInterner) -> String {
        TypeFormatter::new(types).format(self.0)
    }
}

impl Default for ThrownType {
    fn default() -> Self {
        ThrownType::NONE
    }
}

/// The effect a function has on its callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FunctionEffect {
    /// Thrown synchronously by a call.
    pub throws: ThrownType,
    /// Rejection type of the promise the call returns.
    pub rejects: ThrownType,
}

impl FunctionEffect {
    pub const NONE: FunctionEffect = FunctionEffect {
        throws: ThrownType::NONE,
        rejects: ThrownType::NONE,
    };

    pub const fn throwing(throws: ThrownType) -> FunctionEffect {
        FunctionEffect {
            throws,
            rejects: ThrownType::NONE,
        }
    }

    pub const fn rejecting(rejects: ThrownType) -> FunctionEffect {
        FunctionEffect {
            throws: ThrownType::NONE,
            rejects,
        }
    }

    /// What a recursive reference to a function still being analyzed yields.
    pub const fn unknown_for(is_async: bool) -> FunctionEffect {
        if is_async {
            FunctionEffect::rejecting(ThrownType::UNKNOWN)
        } else {
            FunctionEffect::throwing(ThrownType::UNKNOWN)
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.throws.is_empty() && self.rejects.is_empty()
    }

    #[must_use]
    pub fn union(self, other: FunctionEffect, types: &TypeInterner) -> FunctionEffect {
        FunctionEffect {
            throws: self.throws.union(other.throws, types),
            rejects: self.rejects.union(other.rejects, types),
        }
    }
}

/// Result of evaluating one expression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExprEffect {
    /// Thrown while evaluating the expression.
    pub throws: ThrownType,
    /// Rejection type of the promise value the expression produces.
    pub rejects: ThrownType,
}

impl ExprEffect {
    pub const NONE: ExprEffect = ExprEffect {
        throws: ThrownType::NONE,
        rejects: ThrownType::NONE,
    };

    pub const fn throwing(throws: ThrownType) -> ExprEffect {
        ExprEffect {
            throws,
            rejects: ThrownType::NONE,
        }
    }

    /// Keep what evaluation throws, drop the produced promise.
    #[must_use]
    pub const fn without_value(self) -> ExprEffect {
        ExprEffect::throwing(self.throws)
    }

    #[must_use]
    pub fn union(self, other: ExprEffect, types: &TypeInterner) -> ExprEffect {
        ExprEffect {
            throws: self.throws.union(other.throws, types),
            rejects: self.rejects.union(other.rejects, types),
        }
    }
}

impl From<FunctionEffect> for ExprEffect {
    fn from(effect: FunctionEffect) -> ExprEffect {
        ExprEffect {
            throws: effect.throws,
            rejects: effect.rejects,
        }
    }
}

/// `throws T` / `rejects T` clauses written on a declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeclaredEffect {
    pub throws: Option<TypeId>,
    pub rejects: Option<TypeId>,
}

impl DeclaredEffect {
    pub const fn is_empty(&self) -> bool {
        self.throws.is_none() && self.rejects.is_none()
    }

    /// The declared clauses as an effect, treating a missing clause as empty.
    pub fn as_effect(&self) -> FunctionEffect {
        FunctionEffect {
            throws: self.throws.map_or(ThrownType::NONE, ThrownType),
            rejects: self.rejects.map_or(ThrownType::NONE, ThrownType),
        }
    }
}
