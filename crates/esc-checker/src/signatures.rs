//! Uniform view over every node kind that has a call signature.

use esc_parser::node::NodeArena;
use esc_parser::syntax_kind_ext::*;
use esc_parser::{NodeIndex, NodeList};
use esc_scanner::SyntaxKind;

/// The parts of a function-like declaration or signature the checker reads.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SignatureParts<'n> {
    pub kind: u16,
    pub name: NodeIndex,
    pub parameters: Option<&'n NodeList>,
    pub type_annotation: NodeIndex,
    pub throws_clause: NodeIndex,
    pub rejects_clause: NodeIndex,
    /// NONE for signatures, overloads and ambient declarations.
    pub body: NodeIndex,
    pub is_async: bool,
    pub is_constructor: bool,
}

impl SignatureParts<'_> {
    pub(crate) const fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

pub(crate) fn signature_parts(arena: &NodeArena, idx: NodeIndex) -> Option<SignatureParts<'_>> {
    let node = arena.get(idx)?;
    let is_async =
        |modifiers: &Option<NodeList>| arena.has_modifier(modifiers, SyntaxKind::AsyncKeyword);
    match node.kind {
        FUNCTION_DECLARATION | FUNCTION_EXPRESSION | ARROW_FUNCTION => {
            let f = arena.get_function(node)?;
            Some(SignatureParts {
                kind: node.kind,
                name: f.name,
                parameters: Some(&f.parameters),
                type_annotation: f.type_annotation,
                throws_clause: f.throws_clause,
                rejects_clause: f.rejects_clause,
                body: f.body,
                is_async: is_async(&f.modifiers),
                is_constructor: false,
            })
        }
        METHOD_DECLARATION => {
            let m = arena.get_method_decl(node)?;
            Some(SignatureParts {
                kind: node.kind,
                name: m.name,
                parameters: Some(&m.parameters),
                type_annotation: m.type_annotation,
                throws_clause: m.throws_clause,
                rejects_clause: m.rejects_clause,
                body: m.body,
                is_async: is_async(&m.modifiers),
                is_constructor: false,
            })
        }
        CONSTRUCTOR => {
            let c = arena.get_constructor(node)?;
            Some(SignatureParts {
                kind: node.kind,
                name: NodeIndex::NONE,
                parameters: Some(&c.parameters),
                type_annotation: NodeIndex::NONE,
                throws_clause: c.throws_clause,
                rejects_clause: NodeIndex::NONE,
                body: c.body,
                is_async: false,
                is_constructor: true,
            })
        }
        GET_ACCESSOR | SET_ACCESSOR => {
            let a = arena.get_accessor(node)?;
            Some(SignatureParts {
                kind: node.kind,
                name: a.name,
                parameters: Some(&a.parameters),
                type_annotation: a.type_annotation,
                throws_clause: a.throws_clause,
                rejects_clause: NodeIndex::NONE,
                body: a.body,
                is_async: false,
                is_constructor: false,
            })
        }
        METHOD_SIGNATURE | CALL_SIGNATURE | CONSTRUCT_SIGNATURE => {
            let s = arena.get_signature(node)?;
            Some(SignatureParts {
                kind: node.kind,
                name: s.name,
                parameters: s.parameters.as_ref(),
                type_annotation: s.type_annotation,
                throws_clause: s.throws_clause,
                rejects_clause: s.rejects_clause,
                body: NodeIndex::NONE,
                is_async: false,
                is_constructor: node.kind == CONSTRUCT_SIGNATURE,
            })
        }
        FUNCTION_TYPE | CONSTRUCTOR_TYPE => {
            let t = arena.get_function_type(node)?;
            Some(SignatureParts {
                kind: node.kind,
                name: NodeIndex::NONE,
                parameters: Some(&t.parameters),
                type_annotation: t.type_annotation,
                throws_clause: t.throws_clause,
                rejects_clause: t.rejects_clause,
                body: NodeIndex::NONE,
                is_async: false,
                is_constructor: node.kind == CONSTRUCTOR_TYPE,
            })
        }
        _ => None,
    }
}

/// Whether an effect can be asked of this node.
pub(crate) const fn has_signature(kind: u16) -> bool {
    is_function_like(kind) || is_signature_like(kind)
}
