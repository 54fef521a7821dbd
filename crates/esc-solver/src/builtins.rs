//! Library classes known without a declaration.

use crate::intern::TypeInterner;
use crate::types::DefKind;

/// Built-in error classes; every one except `Error` extends `Error`.
pub const BUILTIN_ERROR_CLASSES: &[&str] = &[
    "Error",
    "TypeError",
    "RangeError",
    "SyntaxError",
    "ReferenceError",
    "EvalError",
    "URIError",
    "AggregateError",
    "DOMException",
];

pub(crate) const PROMISE: &str = "Promise";

impl TypeInterner {
    pub(crate) fn register_builtins(&mut self) {
        let error_def = self.define("Error", DefKind::Builtin, None, None);
        self.builtins.insert("Error".to_string(), error_def);
        let error = self.reference(error_def, Vec::new());

        // Interned eagerly so union display order follows this list.
        for &name in &BUILTIN_ERROR_CLASSES[1..] {
            let def = self.define(name, DefKind::Builtin, Some(error), None);
            self.builtins.insert(name.to_string(), def);
            self.reference(def, Vec::new());
        }

        let promise = self.define(PROMISE, DefKind::Builtin, None, None);
        self.builtins.insert(PROMISE.to_string(), promise);
    }
}
