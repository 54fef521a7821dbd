//! Effects of built-in library functions.
//!
//! Library calls have no declarations to analyze, so their effects come from
//! this table, keyed by callee path (`JSON.parse`) or, for constructors, by
//! `new` followed by the class name (`new URL`).

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use esc_solver::TypeInterner;

use crate::effect_types::{FunctionEffect, ThrownType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeEffect {
    pub throws: &'static [&'static str],
    pub rejects: &'static [&'static str],
}

impl NativeEffect {
    const fn throws(throws: &'static [&'static str]) -> NativeEffect {
        NativeEffect {
            throws,
            rejects: &[],
        }
    }

    const fn rejects(rejects: &'static [&'static str]) -> NativeEffect {
        NativeEffect {
            throws: &[],
            rejects,
        }
    }

    /// Resolve the class names to built-in error types.
    pub fn to_effect(&self, types: &TypeInterner) -> FunctionEffect {
        let resolve = |names: &[&str]| {
            ThrownType::union_all(
                names
                    .iter()
                    .filter_map(|name| types.builtin_type(name))
                    .map(ThrownType),
                types,
            )
        };
        FunctionEffect {
            throws: resolve(self.throws),
            rejects: resolve(self.rejects),
        }
    }
}

static NATIVE_THROW_MAP: Lazy<FxHashMap<&'static str, NativeEffect>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("JSON.parse", NativeEffect::throws(&["SyntaxError"]));
    map.insert("JSON.stringify", NativeEffect::throws(&["TypeError"]));
    map.insert("BigInt", NativeEffect::throws(&["SyntaxError", "RangeError"]));
    map.insert("decodeURI", NativeEffect::throws(&["URIError"]));
    map.insert("decodeURIComponent", NativeEffect::throws(&["URIError"]));
    map.insert("encodeURI", NativeEffect::throws(&["URIError"]));
    map.insert("encodeURIComponent", NativeEffect::throws(&["URIError"]));
    map.insert("new URL", NativeEffect::throws(&["TypeError"]));
    map.insert("new RegExp", NativeEffect::throws(&["SyntaxError"]));
    map.insert("new Array", NativeEffect::throws(&["RangeError"]));
    map.insert("Object.defineProperty", NativeEffect::throws(&["TypeError"]));
    map.insert("fetch", NativeEffect::rejects(&["TypeError"]));
    map
});

/// Effect of a call to the library function at `path`.
pub fn lookup_native_call(path: &str) -> Option<&'static NativeEffect> {
    NATIVE_THROW_MAP.get(path)
}

/// Effect of `new Name(...)` for a library class.
pub fn lookup_native_construct(class_name: &str) -> Option<&'static NativeEffect> {
    NATIVE_THROW_MAP.get(format!("new {class_name}").as_str())
}
