//! Enums as types.
//!
//! A member's type is its literal value; the enum type is the union of its
//! members; a non-const enum also exists at runtime as an object whose
//! properties are the members (plus a `[value: number]: string` reverse
//! mapping when the enum is numeric).

use crate::error::EnumError;
use crate::evaluator::EnumValue;
use crate::registry::EnumTable;
use duck_solver::{IndexSignature, ObjectShape, PropertyInfo, TypeId, TypeInterner};

fn value_type(interner: &TypeInterner, value: &EnumValue) -> TypeId {
    match value {
        EnumValue::Number(n) => interner.literal_number(*n),
        EnumValue::String(s) => interner.literal_string(s),
        EnumValue::Computed => TypeId::NUMBER,
    }
}

/// Literal type of `table.member`. Computed members are `number`.
pub fn member_type(
    interner: &TypeInterner,
    table: &EnumTable,
    member: &str,
) -> Result<TypeId, EnumError> {
    table
        .lookup_value(member)
        .map(|value| value_type(interner, value))
}

/// Union of every member type. An empty enum is `never`.
pub fn enum_type(interner: &TypeInterner, table: &EnumTable) -> TypeId {
    let members = table
        .members()
        .map(|(_, value)| value_type(interner, value))
        .collect();
    interner.union(members)
}

/// Shape of the runtime enum object, or `None` for a const enum.
pub fn runtime_object_type(interner: &TypeInterner, table: &EnumTable) -> Option<TypeId> {
    if !table.has_runtime_object() {
        return None;
    }

    let properties = table
        .members()
        .map(|(name, value)| PropertyInfo {
            readonly: true,
            ..PropertyInfo::new(interner.intern_string(name), value_type(interner, value))
        })
        .collect();
    let number_index = table.is_fully_numeric().then_some(IndexSignature {
        key_type: TypeId::NUMBER,
        value_type: TypeId::STRING,
        readonly: true,
    });

    Some(interner.object_with_shape(ObjectShape {
        properties,
        number_index,
        ..ObjectShape::default()
    }))
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
