//! Function type subtyping.
//!
//! - return types are covariant
//! - the source may declare fewer parameters than the target, but may not
//!   require more than the target supplies (a target rest parameter
//!   supplies any number)
//! - parameters are compared bivariantly by default; with
//!   `strict_function_types` they are contravariant unless either side is
//!   a method signature

use crate::def::TypeResolver;
use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::types::{FunctionShape, TypeId};
use crate::utils;

impl<'a, R: TypeResolver> SubtypeChecker<'a, R> {
    pub(crate) fn check_function_subtype(
        &mut self,
        source: &FunctionShape,
        target: &FunctionShape,
    ) -> SubtypeResult {
        let result = self.check_subtype(source.return_type, target.return_type);
        if !result.is_true() {
            return result;
        }

        if !arity_compatible(source, target) {
            return SubtypeResult::False;
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
            let result = self.check_parameter(s_param, t_param, bivariant);
            if !result.is_true() {
                return result;
            }
        }

        if let (Some(s_rest), Some(t_rest)) = (source.rest_param(), target.rest_param()) {
            let s_elem = self.rest_element_type(s_rest.type_id);
            let t_elem = self.rest_element_type(t_rest.type_id);
            let result = self.check_parameter(s_elem, t_elem, bivariant);
            if !result.is_true() {
                return result;
            }
        }

        SubtypeResult::True
    }

    pub(crate) fn is_bivariant(&self, source: &FunctionShape, target: &FunctionShape) -> bool {
        !self.strict_function_types || source.is_method || target.is_method
    }

    /// Contravariant check, falling back to the covariant direction when
    /// `bivariant`.
    pub(crate) fn check_parameter(
        &mut self,
        source_param: TypeId,
        target_param: TypeId,
        bivariant: bool,
    ) -> SubtypeResult {
        let contravariant = self.check_subtype(target_param, source_param);
        if contravariant.is_true() || !bivariant {
            return contravariant;
        }
        self.check_subtype(source_param, target_param)
    }

    /// Type supplied at parameter position `index`, if any.
    pub(crate) fn param_type_at(&self, shape: &FunctionShape, index: usize) -> Option<TypeId> {
        let fixed = shape.fixed_params();
        if let Some(param) = fixed.get(index) {
            return Some(param.type_id);
        }
        shape
            .rest_param()
            .map(|rest| self.rest_element_type(rest.type_id))
    }

    pub(crate) fn rest_element_type(&self, type_id: TypeId) -> TypeId {
        let resolved = self.resolve_lazy(type_id).unwrap_or(type_id);
        utils::array_element_type(self.interner, resolved)
    }
}

/// The source may not require more parameters than the target supplies.
pub(crate) fn arity_compatible(source: &FunctionShape, target: &FunctionShape) -> bool {
    target.rest_param().is_some() || source.required_count() <= target.fixed_params().len()
}
