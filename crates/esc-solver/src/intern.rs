//! Type interning.

use std::cell::RefCell;

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;
use tracing::trace;

use crate::builtins::PROMISE;
use crate::types::*;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Owns every type of one analysis pass.
///
/// Interior mutability lets the checker intern through a shared reference
/// while it holds other borrows of its state. One interner per pass; it is
/// never shared across threads.
pub struct TypeInterner {
    types: RefCell<FxIndexSet<TypeKey>>,
    atoms: RefCell<FxIndexSet<String>>,
    defs: RefCell<Vec<DefInfo>>,
    /// Member order of each union as first built. The interned key is
    /// sorted so equal sets share an id; display follows this order.
    union_order: RefCell<FxHashMap<TypeId, Vec<TypeId>>>,
    pub(crate) builtins: FxHashMap<String, DefId>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> TypeInterner {
        let mut interner = TypeInterner {
            types: RefCell::new(FxIndexSet::default()),
            atoms: RefCell::new(FxIndexSet::default()),
            defs: RefCell::new(Vec::new()),
            union_order: RefCell::new(FxHashMap::default()),
            builtins: FxHashMap::default(),
        };
        // Order must match the `TypeId` constants.
        for kind in [
            IntrinsicKind::Error,
            IntrinsicKind::Any,
            IntrinsicKind::Unknown,
            IntrinsicKind::Never,
            IntrinsicKind::Void,
            IntrinsicKind::Undefined,
            IntrinsicKind::Null,
            IntrinsicKind::Boolean,
            IntrinsicKind::Number,
            IntrinsicKind::String,
            IntrinsicKind::BigInt,
            IntrinsicKind::Symbol,
            IntrinsicKind::Object,
        ] {
            interner.intern(TypeKey::Intrinsic(kind));
        }
        interner.intern(TypeKey::Literal(LiteralValue::Boolean(true)));
        interner.intern(TypeKey::Literal(LiteralValue::Boolean(false)));
        debug_assert_eq!(interner.len() as u32, TypeId::FIRST_USER);

        interner.register_builtins();
        interner
    }

    pub fn intern(&self, key: TypeKey) -> TypeId {
        let (index, _) = self.types.borrow_mut().insert_full(key);
        TypeId(index as u32)
    }

    pub fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        self.types.borrow().get_index(id.0 as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.borrow().is_empty()
    }

    // =========================================================================
    // Atoms
    // =========================================================================

    pub fn intern_string(&self, text: &str) -> Atom {
        if let Some(index) = self.atoms.borrow().get_index_of(text) {
            return Atom(index as u32);
        }
        let (index, _) = self.atoms.borrow_mut().insert_full(text.to_string());
        Atom(index as u32)
    }

    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.atoms
            .borrow()
            .get_index(atom.0 as usize)
            .cloned()
            .unwrap_or_default()
    }

    // =========================================================================
    // Literals
    // =========================================================================

    pub fn literal_string(&self, value: &str) -> TypeId {
        let atom = self.intern_string(value);
        self.intern(TypeKey::Literal(LiteralValue::String(atom)))
    }

    pub fn literal_number(&self, value: f64) -> TypeId {
        if value.is_nan() {
            return TypeId::NUMBER;
        }
        // -0 and 0 are the same literal type.
        let value = if value == 0.0 { 0.0 } else { value };
        self.intern(TypeKey::Literal(LiteralValue::Number(value.to_bits())))
    }

    pub fn literal_bigint(&self, text: &str) -> TypeId {
        let atom = self.intern_string(text);
        self.intern(TypeKey::Literal(LiteralValue::BigInt(atom)))
    }

    pub const fn literal_boolean(&self, value: bool) -> TypeId {
        if value {
            TypeId::BOOLEAN_TRUE
        } else {
            TypeId::BOOLEAN_FALSE
        }
    }

    // =========================================================================
    // Unions and intersections
    // =========================================================================

    /// Build a normalized union. An empty member list yields `never`.
    ///
    /// Members keep the order in which they first appear; the same set
    /// built in another order interns to the same id.
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        for member in members {
            match self.lookup(member) {
                Some(TypeKey::Union(_)) => flat.extend(self.union_members(member)),
                _ => flat.push(member),
            }
        }

        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::ERROR) {
            return TypeId::ERROR;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }
        flat.retain(|id| *id != TypeId::NEVER);

        if flat.contains(&TypeId::BOOLEAN_TRUE) && flat.contains(&TypeId::BOOLEAN_FALSE) {
            for id in flat.iter_mut() {
                if *id == TypeId::BOOLEAN_TRUE || *id == TypeId::BOOLEAN_FALSE {
                    *id = TypeId::BOOLEAN;
                }
            }
        }

        // Literals are absorbed by their primitive.
        let has_string = flat.contains(&TypeId::STRING);
        let has_number = flat.contains(&TypeId::NUMBER);
        let has_bigint = flat.contains(&TypeId::BIGINT);
        let has_boolean = flat.contains(&TypeId::BOOLEAN);
        if has_string || has_number || has_bigint || has_boolean {
            flat.retain(|id| match self.lookup(*id) {
                Some(TypeKey::Literal(LiteralValue::String(_))) => !has_string,
                Some(TypeKey::Literal(LiteralValue::Number(_))) => !has_number,
                Some(TypeKey::Literal(LiteralValue::BigInt(_))) => !has_bigint,
                Some(TypeKey::Literal(LiteralValue::Boolean(_))) => !has_boolean,
                _ => true,
            });
        }

        let mut ordered: Vec<TypeId> = Vec::with_capacity(flat.len());
        for id in flat {
            if !ordered.contains(&id) {
                ordered.push(id);
            }
        }
        match ordered.len() {
            0 => TypeId::NEVER,
            1 => ordered[0],
            _ => {
                let mut canonical = ordered.clone();
                canonical.sort_unstable();
                let id = self.intern(TypeKey::Union(canonical));
                self.union_order.borrow_mut().entry(id).or_insert(ordered);
                trace!(id = id.0, "interned union");
                id
            }
        }
    }

    pub fn union2(&self, a: TypeId, b: TypeId) -> TypeId {
        if a == b || b == TypeId::NEVER {
            return a;
        }
        if a == TypeId::NEVER {
            return b;
        }
        self.union(vec![a, b])
    }

    /// Members of a union in display order; `never` has none, any other
    /// type is its own single member.
    pub fn union_members(&self, id: TypeId) -> Vec<TypeId> {
        if let Some(ordered) = self.union_order.borrow().get(&id) {
            return ordered.clone();
        }
        match self.lookup(id) {
            Some(TypeKey::Union(members)) => members,
            _ if id == TypeId::NEVER => Vec::new(),
            _ => vec![id],
        }
    }

    pub fn intersection(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: SmallVec<[TypeId; 4]> = SmallVec::new();
        for member in members {
            match self.lookup(member) {
                Some(TypeKey::Intersection(inner)) => flat.extend(inner),
                _ => flat.push(member),
            }
        }
        if flat.contains(&TypeId::NEVER) {
            return TypeId::NEVER;
        }
        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        flat.retain(|id| *id != TypeId::UNKNOWN);
        flat.sort_unstable();
        flat.dedup();
        match flat.len() {
            0 => TypeId::UNKNOWN,
            1 => flat[0],
            _ => self.intern(TypeKey::Intersection(flat.into_vec())),
        }
    }

    // =========================================================================
    // Structured types
    // =========================================================================

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeKey::Array(element))
    }

    pub fn tuple(&self, elements: Vec<TypeId>) -> TypeId {
        self.intern(TypeKey::Tuple(elements))
    }

    /// Anonymous object type. Properties are sorted by name so that the same
    /// shape written in a different order interns to the same id.
    pub fn object(&self, mut properties: Vec<PropertyInfo>) -> TypeId {
        properties.sort_by_cached_key(|p| self.resolve_atom(p.name));
        properties.dedup_by_key(|p| p.name);
        self.intern(TypeKey::Object(properties))
    }

    pub fn function(&self, shape: FunctionShape) -> TypeId {
        self.intern(TypeKey::Function(shape))
    }

    pub fn type_param(&self, name: &str) -> TypeId {
        let atom = self.intern_string(name);
        self.intern(TypeKey::TypeParameter(atom))
    }

    // =========================================================================
    // Nominal definitions
    // =========================================================================

    pub fn define(
        &self,
        name: &str,
        kind: DefKind,
        base: Option<TypeId>,
        origin: Option<u32>,
    ) -> DefId {
        let mut defs = self.defs.borrow_mut();
        let id = DefId(defs.len() as u32);
        defs.push(DefInfo {
            name: name.to_string(),
            kind,
            base,
            origin,
        });
        id
    }

    /// Set the base of a definition after the fact; classes are defined
    /// before their `extends` target is resolved so that cycles terminate.
    pub fn set_def_base(&self, def: DefId, base: Option<TypeId>) {
        if let Some(info) = self.defs.borrow_mut().get_mut(def.0 as usize) {
            info.base = base;
        }
    }

    pub fn def_info(&self, def: DefId) -> Option<DefInfo> {
        self.defs.borrow().get(def.0 as usize).cloned()
    }

    pub fn reference(&self, def: DefId, args: Vec<TypeId>) -> TypeId {
        self.intern(TypeKey::Ref { def, args })
    }

    pub fn def_of(&self, id: TypeId) -> Option<DefId> {
        match self.lookup(id)? {
            TypeKey::Ref { def, .. } => Some(def),
            _ => None,
        }
    }

    /// The `extends` target of a reference type.
    pub fn base_of(&self, id: TypeId) -> Option<TypeId> {
        self.def_of(id)
            .and_then(|def| self.def_info(def))
            .and_then(|info| info.base)
    }

    pub fn builtin_def(&self, name: &str) -> Option<DefId> {
        self.builtins.get(name).copied()
    }

    /// A built-in class as a type (`Error`, `TypeError`, ...).
    pub fn builtin_type(&self, name: &str) -> Option<TypeId> {
        self.builtin_def(name)
            .map(|def| self.reference(def, Vec::new()))
    }

    pub fn error_type(&self) -> TypeId {
        self.builtin_type("Error").unwrap_or(TypeId::ERROR)
    }

    pub fn promise(&self, inner: TypeId) -> TypeId {
        match self.builtin_def(PROMISE) {
            Some(def) => self.reference(def, vec![inner]),
            None => TypeId::ERROR,
        }
    }

    /// `T` for `Promise<T>`; `None` for anything that is not a promise.
    pub fn promise_inner(&self, id: TypeId) -> Option<TypeId> {
        let promise = self.builtin_def(PROMISE)?;
        match self.lookup(id)? {
            TypeKey::Ref { def, args } if def == promise => {
                Some(args.first().copied().unwrap_or(TypeId::UNKNOWN))
            }
            _ => None,
        }
    }
}
