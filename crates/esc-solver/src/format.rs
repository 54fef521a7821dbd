//! Type display, in the form TypeScript prints types in diagnostics.

use crate::intern::TypeInterner;
use crate::types::{FunctionShape, LiteralValue, TypeId, TypeKey};

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
}

impl<'a> TypeFormatter<'a> {
    pub const fn new(interner: &'a TypeInterner) -> TypeFormatter<'a> {
        TypeFormatter { interner }
    }

    pub fn format(&self, id: TypeId) -> String {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || self.format_worker(id))
    }

    fn format_worker(&self, id: TypeId) -> String {
        let Some(key) = self.interner.lookup(id) else {
            return "error".to_string();
        };
        match key {
            TypeKey::Intrinsic(kind) => kind.name().to_string(),
            TypeKey::Literal(literal) => self.format_literal(&literal),
            TypeKey::Ref { def, args } => {
                let name = self
                    .interner
                    .def_info(def)
                    .map(|info| info.name)
                    .unwrap_or_default();
                if args.is_empty() {
                    name
                } else {
                    let args: Vec<String> = args.iter().map(|&a| self.format(a)).collect();
                    format!("{name}<{}>", args.join(", "))
                }
            }
            TypeKey::Union(_) => self.format_members(&self.interner.union_members(id), " | "),
            TypeKey::Intersection(members) => self.format_members(&members, " & "),
            TypeKey::Array(element) => {
                let inner = self.format(element);
                if self.needs_parens(element) {
                    format!("({inner})[]")
                } else {
                    format!("{inner}[]")
                }
            }
            TypeKey::Tuple(elements) => {
                let parts: Vec<String> = elements.iter().map(|&e| self.format(e)).collect();
                format!("[{}]", parts.join(", "))
            }
            TypeKey::Object(props) => {
                if props.is_empty() {
                    return "{}".to_string();
                }
                let mut out = String::from("{ ");
                for prop in &props {
                    out.push_str(&self.interner.resolve_atom(prop.name));
                    if prop.optional {
                        out.push('?');
                    }
                    out.push_str(": ");
                    out.push_str(&self.format(prop.type_id));
                    out.push_str("; ");
                }
                out.push('}');
                out
            }
            TypeKey::Function(shape) => self.format_function(&shape),
            TypeKey::TypeParameter(name) => self.interner.resolve_atom(name),
        }
    }

    fn format_literal(&self, literal: &LiteralValue) -> String {
        match literal {
            LiteralValue::String(atom) => format!("\"{}\"", self.interner.resolve_atom(*atom)),
            LiteralValue::Number(bits) => {
                let value = f64::from_bits(*bits);
                if value == f64::INFINITY {
                    "Infinity".to_string()
                } else if value == f64::NEG_INFINITY {
                    "-Infinity".to_string()
                } else {
                    value.to_string()
                }
            }
            LiteralValue::BigInt(atom) => format!("{}n", self.interner.resolve_atom(*atom)),
            LiteralValue::Boolean(value) => value.to_string(),
        }
    }

    fn format_members(&self, members: &[TypeId], separator: &str) -> String {
        let parts: Vec<String> = members
            .iter()
            .map(|&m| {
                let text = self.format(m);
                if self.is_function(m) {
                    format!("({text})")
                } else {
                    text
                }
            })
            .collect();
        parts.join(separator)
    }

    fn format_function(&self, shape: &FunctionShape) -> String {
        let params: Vec<String> = shape
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let name = p
                    .name
                    .map(|atom| self.interner.resolve_atom(atom))
                    .unwrap_or_else(|| format!("arg{i}"));
                let rest = if p.rest { "..." } else { "" };
                let optional = if p.optional { "?" } else { "" };
                format!("{rest}{name}{optional}: {}", self.format(p.type_id))
            })
            .collect();
        let prefix = if shape.is_constructor { "new " } else { "" };
        let mut out = format!(
            "{prefix}({}) => {}",
            params.join(", "),
            self.format(shape.return_type)
        );
        if let Some(throws) = shape.throws {
            out.push_str(" throws ");
            out.push_str(&self.format(throws));
        }
        if let Some(rejects) = shape.rejects {
            out.push_str(" rejects ");
            out.push_str(&self.format(rejects));
        }
        out
    }

    fn is_function(&self, id: TypeId) -> bool {
        matches!(self.interner.lookup(id), Some(TypeKey::Function(_)))
    }

    fn needs_parens(&self, id: TypeId) -> bool {
        matches!(
            self.interner.lookup(id),
            Some(TypeKey::Union(_) | TypeKey::Intersection(_) | TypeKey::Function(_))
        )
    }
}
