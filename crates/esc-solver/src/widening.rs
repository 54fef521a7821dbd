//! Literal widening.

use crate::intern::TypeInterner;
use crate::types::{LiteralValue, PropertyInfo, TypeId, TypeKey};

/// Widen literal types to their primitive: `"x"` to `string`, `1` to
/// `number`, `true` to `boolean`. Unions and object literal shapes are
/// widened member-wise; everything else is returned unchanged.
pub fn widen_literal_type(interner: &TypeInterner, id: TypeId) -> TypeId {
    match interner.lookup(id) {
        Some(TypeKey::Literal(LiteralValue::String(_))) => TypeId::STRING,
        Some(TypeKey::Literal(LiteralValue::Number(_))) => TypeId::NUMBER,
        Some(TypeKey::Literal(LiteralValue::BigInt(_))) => TypeId::BIGINT,
        Some(TypeKey::Literal(LiteralValue::Boolean(_))) => TypeId::BOOLEAN,
        Some(TypeKey::Union(_)) => {
            let widened = interner
                .union_members(id)
                .into_iter()
                .map(|m| widen_literal_type(interner, m))
                .collect();
            interner.union(widened)
        }
        Some(TypeKey::Object(props)) => {
            let widened = props
                .into_iter()
                .map(|p| PropertyInfo {
                    type_id: widen_literal_type(interner, p.type_id),
                    ..p
                })
                .collect();
            interner.object(widened)
        }
        Some(TypeKey::Array(element)) => interner.array(widen_literal_type(interner, element)),
        _ => id,
    }
}
