//! Object type subtyping.
//!
//! Width and depth subtyping over named properties:
//! - every required target property must exist in the source
//! - an optional source property cannot satisfy a required target property
//! - readonly does not affect assignability
//! - private and protected properties are nominal: both sides must declare
//!   them with the same visibility and the same declaring class
//!
//! Index signatures are checked against every source property that they
//! would cover.

use crate::def::TypeResolver;
use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::types::{ObjectShape, PropertyInfo, Visibility};
use crate::utils;

impl<'a, R: TypeResolver> SubtypeChecker<'a, R> {
    pub(crate) fn check_object_subtype(
        &mut self,
        source: &ObjectShape,
        target: &ObjectShape,
    ) -> SubtypeResult {
        for t_prop in &target.properties {
            let result = match source.find_property(t_prop.name) {
                Some(s_prop) => self.check_property_compatibility(s_prop, t_prop),
                None if t_prop.optional => SubtypeResult::True,
                None => SubtypeResult::False,
            };
            if !result.is_true() {
                return result;
            }
        }

        self.check_index_signatures(source, target)
    }

    pub(crate) fn check_property_compatibility(
        &mut self,
        source: &PropertyInfo,
        target: &PropertyInfo,
    ) -> SubtypeResult {
        if !property_visibility_compatible(source, target) {
            return SubtypeResult::False;
        }
        if source.optional && !target.optional {
            return SubtypeResult::False;
        }
        self.check_subtype(source.type_id, target.type_id)
    }

    /// String and number index signatures of `target` against `source`.
    ///
    /// A source without a matching index signature is accepted as long as
    /// none of its properties conflict (implicit index signature).
    pub(crate) fn check_index_signatures(
        &mut self,
        source: &ObjectShape,
        target: &ObjectShape,
    ) -> SubtypeResult {
        if let Some(t_index) = &target.string_index {
            let value = t_index.value_type;
            for s_index in [&source.string_index, &source.number_index]
                .into_iter()
                .flatten()
            {
                let result = self.check_subtype(s_index.value_type, value);
                if !result.is_true() {
                    return result;
                }
            }
            for prop in &source.properties {
                let result = self.check_subtype(prop.type_id, value);
                if !result.is_true() {
                    return result;
                }
            }
        }

        if let Some(t_index) = &target.number_index {
            let value = t_index.value_type;
            if let Some(s_index) = source.number_index.as_ref().or(source.string_index.as_ref()) {
                let result = self.check_subtype(s_index.value_type, value);
                if !result.is_true() {
                    return result;
                }
            }
            for prop in &source.properties {
                if !utils::is_numeric_property_name(self.interner, prop.name) {
                    continue;
                }
                let result = self.check_subtype(prop.type_id, value);
                if !result.is_true() {
                    return result;
                }
            }
        }

        SubtypeResult::True
    }

    /// A shape every function and array satisfies: no required properties
    /// and no index signatures.
    pub(crate) fn is_empty_like_shape(&self, shape: &ObjectShape) -> bool {
        !shape.has_index_signature() && shape.properties.iter().all(|p| p.optional)
    }
}

pub(crate) fn property_visibility_compatible(source: &PropertyInfo, target: &PropertyInfo) -> bool {
    if source.visibility == Visibility::Public && target.visibility == Visibility::Public {
        return true;
    }
    source.visibility == target.visibility && source.parent_id == target.parent_id
}
