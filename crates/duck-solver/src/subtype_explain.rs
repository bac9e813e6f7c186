//! Failure explanation for subtype checks.
//!
//! This is the slow path: it runs only after a check has failed and walks
//! the same rules again to find the first failing component. Pairs are
//! entered into the recursion guard exactly like the fast path, so a
//! property whose types only fail through a cycle is not blamed.

use crate::def::TypeResolver;
use crate::diagnostics::SubtypeFailureReason;
use crate::subtype::SubtypeChecker;
use crate::subtype_rules::functions::arity_compatible;
use crate::subtype_rules::objects::property_visibility_compatible;
use crate::types::{FunctionShape, ObjectShape, TypeData, TypeId};
use crate::utils;
use duck_common::limits::MAX_EXPLAIN_DEPTH;

impl<'a, R: TypeResolver> SubtypeChecker<'a, R> {
    /// Explain why `source` is not assignable to `target`.
    ///
    /// Returns `None` if the types are compatible.
    pub fn explain_failure(
        &mut self,
        source: TypeId,
        target: TypeId,
    ) -> Option<SubtypeFailureReason> {
        if self.is_subtype_of(source, target) {
            return None;
        }
        self.guard.reset();
        Some(self.explain(source, target, 0))
    }

    fn explain(&mut self, source: TypeId, target: TypeId, depth: u32) -> SubtypeFailureReason {
        let mismatch = SubtypeFailureReason::TypeMismatch {
            source_type: source,
            target_type: target,
        };
        if depth >= MAX_EXPLAIN_DEPTH {
            return mismatch;
        }

        let key = (source, target);
        if !self.guard.enter(key).is_entered() {
            return mismatch;
        }
        let reason = self.explain_structural(source, target, depth).unwrap_or(mismatch);
        self.guard.leave(key);
        reason
    }

    fn explain_structural(
        &mut self,
        source: TypeId,
        target: TypeId,
        depth: u32,
    ) -> Option<SubtypeFailureReason> {
        let s_resolved = self.resolve_lazy(source)?;
        let t_resolved = self.resolve_lazy(target)?;
        let s_data = self.interner.lookup(s_resolved)?;
        let t_data = self.interner.lookup(t_resolved)?;

        if let TypeData::Union(members) = s_data {
            let members = self.interner.type_list(members);
            let failing = members
                .iter()
                .copied()
                .find(|&m| !self.check_subtype(m, t_resolved).is_true())?;
            return Some(self.explain(failing, t_resolved, depth + 1));
        }
        if let TypeData::Union(members) = t_data {
            return Some(SubtypeFailureReason::NoUnionMemberMatches {
                source_type: source,
                target_union_members: self.interner.type_list(members).to_vec(),
            });
        }

        match (s_data, t_data) {
            (TypeData::Object(s_shape), TypeData::Object(t_shape)) => {
                let s_shape = self.interner.object_shape(s_shape);
                let t_shape = self.interner.object_shape(t_shape);
                self.explain_object_failure(source, target, &s_shape, &t_shape, depth)
            }
            (TypeData::Function(s_fn), TypeData::Function(t_fn)) => {
                let s_fn = self.interner.function_shape(s_fn);
                let t_fn = self.interner.function_shape(t_fn);
                self.explain_function_failure(&s_fn, &t_fn, depth)
            }
            (TypeData::Array(s_elem), TypeData::Array(t_elem)) => {
                Some(SubtypeFailureReason::ArrayElementMismatch {
                    source_element: s_elem,
                    target_element: t_elem,
                    nested_reason: self.nested(s_elem, t_elem, depth),
                })
            }
            _ => None,
        }
    }

    fn explain_object_failure(
        &mut self,
        source: TypeId,
        target: TypeId,
        s_shape: &ObjectShape,
        t_shape: &ObjectShape,
        depth: u32,
    ) -> Option<SubtypeFailureReason> {
        for t_prop in t_shape.properties_in_declaration_order() {
            let Some(s_prop) = s_shape.find_property(t_prop.name) else {
                if t_prop.optional {
                    continue;
                }
                return Some(SubtypeFailureReason::MissingProperty {
                    property_name: t_prop.name,
                    source_type: source,
                    target_type: target,
                });
            };

            if !property_visibility_compatible(s_prop, t_prop) {
                return Some(if s_prop.visibility != t_prop.visibility {
                    SubtypeFailureReason::PropertyVisibilityMismatch {
                        property_name: t_prop.name,
                        source_visibility: s_prop.visibility,
                        target_visibility: t_prop.visibility,
                    }
                } else {
                    SubtypeFailureReason::PropertyNominalMismatch {
                        property_name: t_prop.name,
                    }
                });
            }
            if s_prop.optional && !t_prop.optional {
                return Some(SubtypeFailureReason::OptionalPropertyRequired {
                    property_name: t_prop.name,
                    source_type: source,
                    target_type: target,
                });
            }
            if !self.check_subtype(s_prop.type_id, t_prop.type_id).is_true() {
                return Some(SubtypeFailureReason::PropertyTypeMismatch {
                    property_name: t_prop.name,
                    source_property_type: s_prop.type_id,
                    target_property_type: t_prop.type_id,
                    nested_reason: self.nested(s_prop.type_id, t_prop.type_id, depth),
                });
            }
        }

        if let Some(t_index) = &t_shape.string_index {
            let candidates = [&s_shape.string_index, &s_shape.number_index]
                .into_iter()
                .flatten()
                .map(|idx| idx.value_type)
                .chain(s_shape.properties.iter().map(|p| p.type_id))
                .collect::<Vec<_>>();
            if let Some(failing) = self.first_failing(&candidates, t_index.value_type) {
                return Some(SubtypeFailureReason::IndexSignatureMismatch {
                    index_kind: "string",
                    source_value_type: failing,
                    target_value_type: t_index.value_type,
                });
            }
        }

        if let Some(t_index) = &t_shape.number_index {
            let candidates = s_shape
                .number_index
                .as_ref()
                .or(s_shape.string_index.as_ref())
                .map(|idx| idx.value_type)
                .into_iter()
                .chain(
                    s_shape
                        .properties
                        .iter()
                        .filter(|p| utils::is_numeric_property_name(self.interner, p.name))
                        .map(|p| p.type_id),
                )
                .collect::<Vec<_>>();
            if let Some(failing) = self.first_failing(&candidates, t_index.value_type) {
                return Some(SubtypeFailureReason::IndexSignatureMismatch {
                    index_kind: "number",
                    source_value_type: failing,
                    target_value_type: t_index.value_type,
                });
            }
        }

        None
    }

    fn explain_function_failure(
        &mut self,
        source: &FunctionShape,
        target: &FunctionShape,
        depth: u32,
    ) -> Option<SubtypeFailureReason> {
        if !self
            .check_subtype(source.return_type, target.return_type)
            .is_true()
        {
            return Some(SubtypeFailureReason::ReturnTypeMismatch {
                source_return: source.return_type,
                target_return: target.return_type,
                nested_reason: self.nested(source.return_type, target.return_type, depth),
            });
        }

        if !arity_compatible(source, target) {
            return Some(SubtypeFailureReason::TooManyParameters {
                source_count: source.required_count(),
                target_count: target.fixed_params().len(),
            });
        }

        let bivariant = self.is_bivariant(source, target);
        let positions = source.fixed_params().len().max(target.fixed_params().len());
        for index in 0..positions {
            let (Some(s_param), Some(t_param)) = (
                self.param_type_at(source, index),
                self.param_type_at(target, index),
            ) else {
                continue;
            };
            if !self.check_parameter(s_param, t_param, bivariant).is_true() {
                let param_name = target
                    .params
                    .get(index)
                    .or_else(|| source.params.get(index))
                    .and_then(|p| p.name);
                return Some(SubtypeFailureReason::ParameterTypeMismatch {
                    param_index: index,
                    param_name,
                    source_param: s_param,
                    target_param: t_param,
                });
            }
        }

        if let (Some(s_rest), Some(t_rest)) = (source.rest_param(), target.rest_param()) {
            let s_elem = self.rest_element_type(s_rest.type_id);
            let t_elem = self.rest_element_type(t_rest.type_id);
            if !self.check_parameter(s_elem, t_elem, bivariant).is_true() {
                return Some(SubtypeFailureReason::ParameterTypeMismatch {
                    param_index: source.params.len() - 1,
                    param_name: t_rest.name,
                    source_param: s_elem,
                    target_param: t_elem,
                });
            }
        }

        None
    }

    /// A nested reason worth printing; plain mismatches add nothing.
    fn nested(
        &mut self,
        source: TypeId,
        target: TypeId,
        depth: u32,
    ) -> Option<Box<SubtypeFailureReason>> {
        match self.explain(source, target, depth + 1) {
            SubtypeFailureReason::TypeMismatch { .. } => None,
            reason => Some(Box::new(reason)),
        }
    }

    fn first_failing(&mut self, candidates: &[TypeId], target: TypeId) -> Option<TypeId> {
        candidates
            .iter()
            .copied()
            .find(|&c| !self.check_subtype(c, target).is_true())
    }
}
